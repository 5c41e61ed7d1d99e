use std::fmt::Debug;

use crate::{
    error::MalformedAutomaton,
    id::{ScalarIdType, SymbolIndex},
    math::OrderedSet,
    Label,
};

/// The input alphabet of an automaton. Symbols are interned in the order in which they were
/// declared, so a symbol is identified with its [`SymbolIndex`] and every lookup in the
/// transition table is a plain integer operation.
///
/// # Example
/// ```
/// use automata_min::Alphabet;
///
/// let alphabet = Alphabet::new(['a', 'b']).unwrap();
/// assert_eq!(alphabet.size(), 2);
/// assert_eq!(alphabet.index_of(&'b'), Some(1));
/// assert_eq!(alphabet.symbol(0), Some(&'a'));
/// assert!(Alphabet::new(['a', 'a']).is_err());
/// ```
#[derive(Clone)]
pub struct Alphabet<S: Label = char> {
    symbols: OrderedSet<S>,
}

impl<S: Label> Alphabet<S> {
    /// Creates a new alphabet from the given symbols. Fails if no symbol is given or if a
    /// symbol occurs more than once.
    pub fn new<I: IntoIterator<Item = S>>(symbols: I) -> Result<Self, MalformedAutomaton> {
        let mut set = OrderedSet::default();
        for sym in symbols {
            if set.contains(&sym) {
                return Err(MalformedAutomaton::DuplicateSymbol(format!("{sym:?}")));
            }
            set.insert(sym);
        }
        if set.is_empty() {
            return Err(MalformedAutomaton::EmptyAlphabet);
        }
        Ok(Self { symbols: set })
    }

    /// Returns the number of symbols.
    pub fn size(&self) -> usize {
        self.symbols.len()
    }

    /// Iterates over the symbols in declaration order.
    pub fn symbols(&self) -> impl Iterator<Item = &S> + '_ {
        self.symbols.iter()
    }

    /// Iterates over all symbol indices, i.e. `0..self.size()`.
    pub fn indices(&self) -> impl Iterator<Item = SymbolIndex> {
        (0..self.size()).map(SymbolIndex::from_usize)
    }

    /// Looks up the index of `symbol`, returns `None` if it is not part of the alphabet.
    pub fn index_of(&self, symbol: &S) -> Option<SymbolIndex> {
        self.symbols.get_index_of(symbol).map(SymbolIndex::from_usize)
    }

    /// Returns the symbol with the given index.
    pub fn symbol(&self, index: SymbolIndex) -> Option<&S> {
        self.symbols.get_index(index.into_usize())
    }

    /// Returns true if `self` and `other` contain the same symbols, irrespective of order.
    pub fn same_symbols(&self, other: &Self) -> bool {
        self.size() == other.size() && self.symbols().all(|sym| other.symbols.contains(sym))
    }

    pub(crate) fn symbol_unchecked(&self, index: SymbolIndex) -> &S {
        &self.symbols[index.into_usize()]
    }
}

impl Alphabet<char> {
    /// Creates a new alphabet of the given size. The symbols are the first `size` letters of
    /// the latin alphabet, i.e. 'a' to 'z'.
    pub fn of_size(size: usize) -> Self {
        assert!(size > 0 && size <= 26, "alphabet size must be in 1..=26");
        Self {
            symbols: (0..size).map(|i| (b'a' + i as u8) as char).collect(),
        }
    }
}

impl<S: Label> PartialEq for Alphabet<S> {
    fn eq(&self, other: &Self) -> bool {
        self.symbols.iter().eq(other.symbols.iter())
    }
}
impl<S: Label> Eq for Alphabet<S> {}

impl<S: Label> Debug for Alphabet<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.symbols.iter()).finish()
    }
}
