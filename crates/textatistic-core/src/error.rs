//! Error types for textatistic-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while building or editing an abbreviation table.
#[derive(Error, Debug)]
pub enum AbbreviationError {
    /// A rules-file row did not have exactly two columns.
    #[error("malformed abbreviation rule on line {line}: {row:?}")]
    MalformedRow {
        /// 1-based line number in the rules source.
        line: usize,
        /// The offending row as read.
        row: String,
    },

    /// A regular-expression rule failed to compile.
    #[error("invalid abbreviation pattern {pattern:?}")]
    InvalidPattern {
        /// The pattern text, without the `r'...'` wrapper.
        pattern: String,
        /// Underlying compile error.
        #[source]
        source: regex::Error,
    },

    /// `modify` named a matcher that is not in the table.
    #[error("no abbreviation rule with matcher {matcher:?}")]
    UnknownMatcher {
        /// The matcher that was looked up.
        matcher: String,
    },

    /// `remove` named a (matcher, replacement) pair that is not in the table.
    #[error("no abbreviation rule {matcher:?} -> {replacement:?}")]
    UnknownRule {
        /// The matcher that was looked up.
        matcher: String,
        /// The replacement that was looked up.
        replacement: String,
    },
}

/// Result type alias using [`AbbreviationError`].
pub type AbbreviationResult<T> = Result<T, AbbreviationError>;

/// Errors raised while loading the collaborators a passage is scored with.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// A word list or rules file could not be read.
    #[error("failed to read {path}")]
    Read {
        /// The path that was read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// No syllable estimator is available for the requested locale.
    #[error("unsupported syllable locale: {0}")]
    UnsupportedLocale(String),

    /// The abbreviation rules were invalid.
    #[error(transparent)]
    Abbreviation(#[from] AbbreviationError),
}

/// Result type alias using [`ResourceError`].
pub type ResourceResult<T> = Result<T, ResourceError>;

/// Errors raised by the readability formulas.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoreError {
    /// The formula needs a non-zero sentence or word count.
    #[error("{score} is undefined: {count} count is zero")]
    DivisionByZero {
        /// Display name of the score being computed.
        score: &'static str,
        /// Which count was zero ("sentence" or "word").
        count: &'static str,
    },
}

/// Result type alias using [`ScoreError`].
pub type ScoreResult<T> = Result<T, ScoreError>;
