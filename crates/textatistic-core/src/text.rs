//! Text normalization and tokenization.
//!
//! [`normalize`] rewrites raw prose so that punctuation counting approximates
//! sentence counting; [`tokenize`] turns normalized text into words.

use std::fmt;
use std::ops::Deref;
use std::sync::LazyLock;

use regex::Regex;

use crate::dictionaries::AbbreviationTable;

/// `co-` / `Co-` at the start of a word (co-author, Co-op).
static CO_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([Cc]o)-").expect("valid regex"));

/// A decimal point followed by a digit (3.14, .5).
static DECIMAL_POINT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.([0-9])").expect("valid regex"));

/// `?!)` followed by terminal punctuation, as in "(really?!)."
static RHETORICAL_THEN_STOP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?!]+\)[.?!]+").expect("valid regex"));

/// `?!)` followed by a dash, as in "(really?!) - and then".
static RHETORICAL_THEN_DASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?!]+\)\s*-+").expect("valid regex"));

/// Marker that stands in for a decimal point.
pub const DECIMAL_MARKER: char = '+';

/// Text that has been through [`normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedText(String);

impl NormalizedText {
    /// Wrap text the caller has already normalized.
    ///
    /// Counters trust this text as-is; passing raw prose here skews sentence
    /// counts.
    pub const fn assume_normalized(text: String) -> Self {
        Self(text)
    }

    /// The normalized text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unwrap into the underlying string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Deref for NormalizedText {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalize raw text for counting.
///
/// In order:
/// 1. en and em dashes become `-`;
/// 2. the hyphen is dropped from words starting `co-`/`Co-`;
/// 3. a `.` followed by a digit becomes [`DECIMAL_MARKER`];
/// 4. `?`/`!` runs closed by `)` collapse to `).` before terminal
///    punctuation and to `) -` before a dash;
/// 5. every abbreviation rule runs, in table order.
#[tracing::instrument(skip_all, fields(text_len = text.len(), rules = abbreviations.len()))]
pub fn normalize(text: &str, abbreviations: &AbbreviationTable) -> NormalizedText {
    let text = text.replace(['\u{2013}', '\u{2014}'], "-");
    let text = CO_PREFIX.replace_all(&text, "$1");
    let text = DECIMAL_POINT.replace_all(&text, "+$1");
    let text = RHETORICAL_THEN_STOP.replace_all(&text, ").");
    let text = RHETORICAL_THEN_DASH.replace_all(&text, ") -");
    NormalizedText(abbreviations.apply(&text))
}

/// Split normalized text into words.
///
/// Hyphens become spaces first, so "well-known" is two words; then ASCII
/// punctuation is removed and the rest split on whitespace.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .chars()
        .filter_map(|c| match c {
            '-' => Some(' '),
            c if c.is_ascii_punctuation() => None,
            c => Some(c),
        })
        .collect();
    cleaned.split_whitespace().map(str::to_string).collect()
}
