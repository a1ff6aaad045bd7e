//! Word lists and rule tables the counters depend on.
//!
//! All three are read-only once built and can be shared freely across
//! threads.

pub mod abbreviations;
pub mod easy_words;
pub mod syllable_dict;

pub use abbreviations::{AbbreviationEdits, AbbreviationRule, AbbreviationTable, RuleSpec};
pub use easy_words::EasyWords;
pub use syllable_dict::{DictionarySyllables, SyllableEstimator};
