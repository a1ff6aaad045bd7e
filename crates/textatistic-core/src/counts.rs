//! Surface counts the readability formulas are built from.
//!
//! Sentence and character counts read normalized text; word, difficult-word
//! and syllable counts read the token list. [`CountBundle::prepare`] runs
//! normalization and tokenization once and feeds every counter from that.

use serde::{Deserialize, Serialize};

use crate::dictionaries::{AbbreviationTable, EasyWords, SyllableEstimator};
use crate::statistics::Resources;
use crate::text::{self, NormalizedText};

/// Words with at least this many syllables are polysyllabic.
pub const POLYSYLLABIC_THRESHOLD: usize = 3;

/// Number of `.`, `!` and `?` left after normalization.
pub fn sentence_count(text: &NormalizedText) -> usize {
    text.chars()
        .filter(|c| matches!(c, '.' | '!' | '?'))
        .count()
}

/// Number of non-whitespace characters in normalized text.
pub fn character_count(text: &NormalizedText) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}

/// Number of tokens.
pub fn word_count(words: &[String]) -> usize {
    words.len()
}

/// Number of tokens that are neither numerals nor on the easy-word list.
pub fn difficult_word_count(words: &[String], easy_words: &EasyWords) -> usize {
    words
        .iter()
        .map(|word| word.to_lowercase())
        .filter(|word| !is_numeral(word) && !easy_words.contains(word))
        .count()
}

/// Syllables in one word: whatever the estimator reports, but never less
/// than one.
pub fn syllables_in_word<S>(word: &str, estimator: &S) -> usize
where
    S: SyllableEstimator + ?Sized,
{
    estimator.syllable_units(word).max(1)
}

/// Syllable totals over a token list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyllableCounts {
    /// Sum of per-word syllable counts.
    pub syllables: usize,
    /// Words with [`POLYSYLLABIC_THRESHOLD`] or more syllables.
    pub polysyllabic_words: usize,
}

/// Total syllables and polysyllabic words, one estimator query per token.
pub fn syllable_counts<S>(words: &[String], estimator: &S) -> SyllableCounts
where
    S: SyllableEstimator + ?Sized,
{
    words
        .iter()
        .map(|word| syllables_in_word(word, estimator))
        .fold(SyllableCounts::default(), |mut acc, syllables| {
            acc.syllables += syllables;
            if syllables >= POLYSYLLABIC_THRESHOLD {
                acc.polysyllabic_words += 1;
            }
            acc
        })
}

/// Whether a token reads as a number ("42", "3.14", "1e5", "-7").
fn is_numeral(word: &str) -> bool {
    word.parse::<f64>().is_ok()
}

/// Every count for one passage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountBundle {
    /// Non-whitespace characters after normalization.
    pub characters: usize,
    /// Tokens.
    pub words: usize,
    /// Terminal punctuation marks after normalization.
    pub sentences: usize,
    /// Total syllables.
    pub syllables: usize,
    /// Tokens not on the easy-word list.
    pub difficult_words: usize,
    /// Tokens with three or more syllables.
    pub polysyllabic_words: usize,
}

impl CountBundle {
    /// Normalize and tokenize `text` once, then count everything.
    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    pub fn prepare<S>(
        text: &str,
        abbreviations: &AbbreviationTable,
        estimator: &S,
        easy_words: &EasyWords,
    ) -> Self
    where
        S: SyllableEstimator + ?Sized,
    {
        let normalized = text::normalize(text, abbreviations);
        let words = text::tokenize(&normalized);
        let counts = Self::from_prepared(&normalized, &words, estimator, easy_words);
        tracing::debug!(
            words = counts.words,
            sentences = counts.sentences,
            syllables = counts.syllables,
            "counted passage"
        );
        counts
    }

    /// Count from text that has already been normalized and tokenized.
    ///
    /// `words` must be the tokenization of `normalized`.
    pub fn from_prepared<S>(
        normalized: &NormalizedText,
        words: &[String],
        estimator: &S,
        easy_words: &EasyWords,
    ) -> Self
    where
        S: SyllableEstimator + ?Sized,
    {
        let SyllableCounts {
            syllables,
            polysyllabic_words,
        } = syllable_counts(words, estimator);
        Self {
            characters: character_count(normalized),
            words: word_count(words),
            sentences: sentence_count(normalized),
            syllables,
            difficult_words: difficult_word_count(words, easy_words),
            polysyllabic_words,
        }
    }

    /// Count raw text with a set of resources.
    pub fn from_text(text: &str, resources: &Resources) -> Self {
        Self::prepare(
            text,
            &resources.abbreviations,
            &*resources.syllables,
            &resources.easy_words,
        )
    }
}
