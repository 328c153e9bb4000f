//! Text analysis: tokenization, word validation, stop words, and the
//! word arena.
//!
//! Analysis is deliberately minimal: documents and queries are split on
//! space characters, words containing control characters are rejected,
//! stop words are dropped, and every surviving word is interned into the
//! [`arena::WordArena`] so the rest of the engine works with stable
//! integer handles instead of borrowed string slices.

pub mod arena;
pub mod stop_words;
pub mod tokenizer;

pub use arena::{WordArena, WordId};
pub use stop_words::StopWordSet;
