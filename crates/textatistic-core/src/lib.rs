//! Core library for textatistic.
//!
//! Readability statistics for English prose: sentence, word, character,
//! syllable and difficult-word counts, and the Flesch Reading Ease,
//! Flesch-Kincaid, Gunning Fog, SMOG and Dale-Chall scores built from them.
//!
//! # Modules
//!
//! - [`text`] - Normalization and tokenization
//! - [`counts`] - Surface counts
//! - [`scores`] - Readability formulas
//! - [`statistics`] - One-call counts and scores for a passage
//! - [`dictionaries`] - Abbreviation rules, easy-word list, syllable estimation
//! - [`markdown`] - Markdown to prose
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use textatistic_core::{Score, TextStatistics};
//!
//! let stats = TextStatistics::new("The cat sat on the mat. It was warm.").unwrap();
//! println!("{} words, Flesch {:.1}", stats.counts().words, stats.scores().flesch);
//! assert_eq!(stats.scores().get(Score::Flesch), stats.scores().flesch);
//! ```
#![deny(unsafe_code)]

pub mod config;
pub mod counts;
pub mod dictionaries;
pub mod error;
pub mod markdown;
pub mod scores;
pub mod statistics;
pub mod text;

pub use config::{
    Config, ConfigLoader, ConfigSources, DEFAULT_MAX_INPUT_BYTES, LogLevel, ResourceConfig,
};
pub use counts::CountBundle;
pub use dictionaries::{
    AbbreviationEdits, AbbreviationRule, AbbreviationTable, DictionarySyllables, EasyWords,
    SyllableEstimator,
};
pub use error::{
    AbbreviationError, ConfigError, ConfigResult, ResourceError, ResourceResult, ScoreError,
    ScoreResult,
};
pub use scores::{Score, ScoreBundle};
pub use statistics::{Resources, TextStatistics};
pub use text::{NormalizedText, normalize, tokenize};
