/// Alias for the default integer type that is used for indexing states and symbols.
pub type DefaultIdType = u32;

/// Dense index of a state inside a [`crate::Dfa`]. States are numbered in the order in
/// which they were declared.
pub type StateIndex = DefaultIdType;

/// Dense index of a symbol inside an [`crate::Alphabet`].
pub type SymbolIndex = DefaultIdType;

/// Conversions between scalar id types and `usize`, which is what we use for
/// indexing into vectors.
pub trait ScalarIdType: Copy + Eq + Ord + std::hash::Hash + std::fmt::Debug {
    /// Converts a `usize` into `Self`. Panics if the value does not fit.
    fn from_usize(n: usize) -> Self;
    /// Converts `self` into a `usize`.
    fn into_usize(self) -> usize;
}

macro_rules! impl_scalar_id_type {
    ($($t:ty),*) => {
        $(
            impl ScalarIdType for $t {
                fn from_usize(n: usize) -> Self {
                    <$t>::try_from(n).expect("index does not fit into id type")
                }
                fn into_usize(self) -> usize {
                    self as usize
                }
            }
        )*
    }
}

impl_scalar_id_type!(u8, u16, u32, u64, usize);
