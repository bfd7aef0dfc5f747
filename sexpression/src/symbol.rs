//! Interned symbols.
//!
//! Every [`Symbol`] is owned by a [`SymbolTable`], which hands out the same
//! instance for every request with an equal name. Symbols therefore compare
//! and hash by identity rather than by walking their names.
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, LazyLock, Mutex, PoisonError};

/// A canonical, interned name.
#[derive(Clone)]
pub struct Symbol(Arc<str>);

impl Symbol {
    /// The name this symbol was interned under.
    #[inline]
    pub fn name(&self) -> &str {
        &self.0
    }

    #[inline]
    fn addr(&self) -> usize {
        Arc::as_ptr(&self.0).cast::<u8>() as usize
    }
}

impl PartialEq for Symbol {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        self.name()
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Symbol").field(&self.name()).finish()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Registry of canonical symbols.
///
/// Entries are never evicted: a symbol stays canonical for as long as its
/// table is alive. Interning is safe to call from several threads at once.
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: Mutex<HashSet<Arc<str>>>,
}

static GLOBAL: LazyLock<SymbolTable> = LazyLock::new(SymbolTable::new);

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide table used by [`intern`] and [`crate::parse`].
    pub fn global() -> &'static SymbolTable {
        &GLOBAL
    }

    /// Returns the canonical symbol for `name`, creating it on first use.
    pub fn intern(&self, name: &str) -> Symbol {
        let mut symbols = self.symbols.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(existing) = symbols.get(name) {
            return Symbol(existing.clone());
        }

        let name: Arc<str> = Arc::from(name);
        symbols.insert(name.clone());
        Symbol(name)
    }

    /// Looks up `name` without interning it.
    pub fn get(&self, name: &str) -> Option<Symbol> {
        let symbols = self.symbols.lock().unwrap_or_else(PoisonError::into_inner);
        symbols.get(name).cloned().map(Symbol)
    }

    pub fn len(&self) -> usize {
        self.symbols
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Interns `name` in the global [`SymbolTable`].
pub fn intern(name: &str) -> Symbol {
    SymbolTable::global().intern(name)
}

#[cfg(test)]
mod test {
    use super::{intern, SymbolTable};
    use proptest::prelude::*;
    use rstest::rstest;
    use std::sync::Arc;
    use std::thread;

    #[rstest]
    #[case("hoge")]
    #[case("")]
    #[case("aaa bbb")]
    #[case("あいうえお")]
    fn test_intern_is_canonical(#[case] name: &str) {
        let table = SymbolTable::new();
        let first = table.intern(name);
        let second = table.intern(name);
        assert_eq!(first, second);
        assert_eq!(first.name(), name);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_distinct_names() {
        let table = SymbolTable::new();
        assert_ne!(table.intern("cat"), table.intern("dog"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_tables_are_isolated() {
        let a = SymbolTable::new();
        let b = SymbolTable::new();
        assert_ne!(a.intern("x"), b.intern("x"));
        assert!(b.get("y").is_none());
        assert!(a.get("x").is_some());
    }

    #[test]
    fn test_concurrent_interning_converges() {
        let table = Arc::new(SymbolTable::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let table = table.clone();
                thread::spawn(move || table.intern("shared"))
            })
            .collect();

        let symbols: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(symbols.windows(2).all(|pair| pair[0] == pair[1]));
        assert_eq!(table.len(), 1);
    }

    proptest! {
        #[test]
        fn global_intern_identity(name: String) {
            let symbol = intern(&name);
            prop_assert_eq!(&symbol, &intern(&name));
            prop_assert_eq!(symbol.name(), name.as_str());
        }
    }
}
