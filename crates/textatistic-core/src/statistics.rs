//! One-call readability statistics for a passage.
//!
//! [`TextStatistics`] normalizes and tokenizes the text once, counts
//! everything from that single pass, then scores the counts.
//!
//! ```
//! use textatistic_core::TextStatistics;
//!
//! let stats = TextStatistics::new("The cat sat on the mat. The dog ran fast.").unwrap();
//! assert_eq!(stats.counts().sentences, 2);
//! assert!(stats.scores().flesch > 90.0);
//! ```

use std::fmt;
use std::sync::LazyLock;

use serde::Serialize;

use crate::config::ResourceConfig;
use crate::counts::CountBundle;
use crate::dictionaries::{AbbreviationTable, DictionarySyllables, EasyWords, SyllableEstimator};
use crate::error::{ResourceResult, ScoreResult};
use crate::scores::ScoreBundle;

static BUILTIN: LazyLock<Resources> = LazyLock::new(Resources::default);

/// The read-only collaborators a passage is scored with.
pub struct Resources {
    /// Abbreviation rules applied during normalization.
    pub abbreviations: AbbreviationTable,
    /// Easy-word list for the Dale-Chall difficult-word count.
    pub easy_words: EasyWords,
    /// Per-word syllable estimator.
    pub syllables: Box<dyn SyllableEstimator + Send + Sync>,
}

impl Resources {
    /// The built-in rules, word list and English estimator, built once.
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Build resources from configuration.
    ///
    /// Files named in the config replace the built-in lists; abbreviation
    /// edits are then applied in append, modify, remove order. Any missing
    /// file, bad rule or unsupported locale fails here.
    #[tracing::instrument(skip_all, fields(locale = %config.locale))]
    pub fn from_config(config: &ResourceConfig) -> ResourceResult<Self> {
        let abbreviations = Self::abbreviations_from_config(config)?;
        let easy_words = match config.easy_words {
            Some(ref path) => EasyWords::from_path(path)?,
            None => EasyWords::builtin().clone(),
        };
        let syllables = DictionarySyllables::for_locale(&config.locale)?;
        Ok(Self {
            abbreviations,
            easy_words,
            syllables: Box::new(syllables),
        })
    }

    /// Only the abbreviation table from configuration, with edits applied.
    ///
    /// The easy-word list and locale are not consulted.
    pub fn abbreviations_from_config(config: &ResourceConfig) -> ResourceResult<AbbreviationTable> {
        let mut abbreviations = match config.abbreviations {
            Some(ref path) => AbbreviationTable::from_path(path)?,
            None => AbbreviationTable::builtin().clone(),
        };
        if !config.edits.is_empty() {
            abbreviations.customize(&config.edits)?;
            tracing::debug!(rules = abbreviations.len(), "applied abbreviation edits");
        }
        Ok(abbreviations)
    }

    /// Swap in a different syllable estimator.
    #[must_use]
    pub fn with_syllables(mut self, estimator: impl SyllableEstimator + Send + Sync + 'static) -> Self {
        self.syllables = Box::new(estimator);
        self
    }

    /// Swap in a different abbreviation table.
    #[must_use]
    pub fn with_abbreviations(mut self, abbreviations: AbbreviationTable) -> Self {
        self.abbreviations = abbreviations;
        self
    }

    /// Swap in a different easy-word list.
    #[must_use]
    pub fn with_easy_words(mut self, easy_words: EasyWords) -> Self {
        self.easy_words = easy_words;
        self
    }
}

impl Default for Resources {
    fn default() -> Self {
        Self {
            abbreviations: AbbreviationTable::builtin().clone(),
            easy_words: EasyWords::builtin().clone(),
            syllables: Box::new(DictionarySyllables::default()),
        }
    }
}

impl fmt::Debug for Resources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resources")
            .field("abbreviations", &self.abbreviations.len())
            .field("easy_words", &self.easy_words.len())
            .field("syllables", &self.syllables.locale())
            .finish()
    }
}

/// Counts and scores for one passage.
///
/// Serializes as a single flat object holding every count and score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextStatistics {
    #[serde(flatten)]
    counts: CountBundle,
    #[serde(flatten)]
    scores: ScoreBundle,
}

impl TextStatistics {
    /// Score `text` with the built-in resources.
    pub fn new(text: &str) -> ScoreResult<Self> {
        Self::with_resources(text, Resources::builtin())
    }

    /// Score `text` with the given resources.
    ///
    /// Fails with [`ScoreError::DivisionByZero`](crate::ScoreError::DivisionByZero)
    /// when the passage has no words or no sentence punctuation. Use
    /// [`CountBundle::from_text`] when counts alone are enough.
    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    pub fn with_resources(text: &str, resources: &Resources) -> ScoreResult<Self> {
        let counts = CountBundle::from_text(text, resources);
        Self::from_counts(counts)
    }

    /// Score counts that were computed elsewhere.
    pub fn from_counts(counts: CountBundle) -> ScoreResult<Self> {
        let scores = ScoreBundle::from_counts(&counts)?;
        Ok(Self { counts, scores })
    }

    /// The counts.
    pub const fn counts(&self) -> &CountBundle {
        &self.counts
    }

    /// The scores.
    pub const fn scores(&self) -> &ScoreBundle {
        &self.scores
    }
}
