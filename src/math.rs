use std::hash::BuildHasherDefault;

/// Type alias for sets, we use this to hide which type of `HashSet` we are actually using.
pub type Set<S> = fxhash::FxHashSet<S>;
/// Type alias for maps, we use this to hide which type of `HashMap` we are actually using.
pub type Map<K, V> = fxhash::FxHashMap<K, V>;

/// A set that remembers the order in which elements were inserted. Each element is
/// identified with its position, which makes this the interning table for labels.
pub type OrderedSet<S> = indexmap::IndexSet<S, BuildHasherDefault<fxhash::FxHasher>>;
