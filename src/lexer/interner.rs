//! Identifier interning
//!
//! Each distinct identifier lexeme gets a dense class number, starting at 1,
//! the first time it is seen in a lexing pass. The table lives only as long
//! as the [`super::Lexer`] that owns it.

use rustc_hash::FxHashMap;

#[derive(Debug, Default, Clone)]
pub struct Interner {
    classes: FxHashMap<String, u32>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Class for `lexeme`, assigning the next free one if it is new.
    pub fn intern(&mut self, lexeme: &str) -> u32 {
        if let Some(&class) = self.classes.get(lexeme) {
            return class;
        }
        let class = self.classes.len() as u32 + 1;
        self.classes.insert(lexeme.to_string(), class);
        class
    }

    pub fn get(&self, lexeme: &str) -> Option<u32> {
        self.classes.get(lexeme).copied()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classes_are_dense_and_stable() {
        let mut interner = Interner::new();
        assert!(interner.is_empty());
        assert_eq!(interner.intern("x"), 1);
        assert_eq!(interner.intern("y"), 2);
        assert_eq!(interner.intern("x"), 1);
        assert_eq!(interner.intern("z"), 3);
        assert_eq!(interner.intern("y"), 2);
        assert_eq!(interner.len(), 3);
        assert_eq!(interner.get("z"), Some(3));
        assert_eq!(interner.get("w"), None);
    }
}
