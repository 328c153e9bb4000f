//! The word arena: append-only canonical string storage.
//!
//! Every distinct word seen by the engine is stored exactly once and
//! addressed through a stable [`WordId`] handle. Handles are never
//! invalidated or reclaimed, so a document's frequency map and the
//! inverted index can alias the same word freely, and removing one
//! document can never dangle another's references. Vocabulary storage
//! therefore grows monotonically with distinct words seen, independent
//! of document removals.
//!
//! Interning only happens while a document is being added; every other
//! component performs read-only lookups.
//!
//! # Examples
//!
//! ```
//! use sagitta::analysis::arena::WordArena;
//!
//! let mut arena = WordArena::new();
//! let cat = arena.intern("cat");
//! assert_eq!(arena.intern("cat"), cat); // idempotent
//! assert_eq!(arena.get(cat), "cat");
//! assert_eq!(arena.lookup("dog"), None);
//! ```

use std::sync::Arc;

use ahash::AHashMap;

/// A stable handle to an interned word.
///
/// Equal handles always denote equal words, and equal words always
/// intern to equal handles within one arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WordId(u32);

impl WordId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Append-only interner for canonical word storage.
#[derive(Debug, Default)]
pub struct WordArena {
    // Both sides share one allocation per word.
    words: Vec<Arc<str>>,
    ids: AHashMap<Arc<str>, WordId>,
}

impl WordArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        WordArena::default()
    }

    /// Intern a word, returning its stable handle.
    ///
    /// Repeated insertion of an equal string returns the same handle.
    pub fn intern(&mut self, word: &str) -> WordId {
        if let Some(&id) = self.ids.get(word) {
            return id;
        }
        let id = WordId(self.words.len() as u32);
        let owned: Arc<str> = Arc::from(word);
        self.words.push(owned.clone());
        self.ids.insert(owned, id);
        id
    }

    /// Look up the handle of an already-interned word.
    pub fn lookup(&self, word: &str) -> Option<WordId> {
        self.ids.get(word).copied()
    }

    /// Resolve a handle back to its word.
    pub fn get(&self, id: WordId) -> &str {
        &self.words[id.index()]
    }

    /// Number of distinct words interned.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether no word has been interned yet.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
