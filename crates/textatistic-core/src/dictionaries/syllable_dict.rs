//! Syllable estimation.
//!
//! The counters only need a syllable count per word, so the estimator is a
//! trait. [`DictionarySyllables`] is the built-in English implementation: an
//! exceptions dictionary with a vowel-group estimate as fallback.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::error::{ResourceError, ResourceResult};

const EXCEPTIONS: &str = include_str!("../../data/syllables_en.txt");

/// Locale used when none is configured.
pub const DEFAULT_LOCALE: &str = "en_US";

/// English words whose syllable count the estimate gets wrong.
pub static SYLLABLE_DICT: LazyLock<HashMap<&'static str, usize>> = LazyLock::new(|| {
    EXCEPTIONS
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let (word, count) = line.split_once(char::is_whitespace)?;
            Some((word, count.trim().parse().ok()?))
        })
        .collect()
});

/// Something that can split a word into syllables.
///
/// Implementations return the number of syllable units they found, which may
/// be zero when a word cannot be segmented; callers apply their own floor.
pub trait SyllableEstimator {
    /// Locale the estimator was built for, e.g. `en_US`.
    fn locale(&self) -> &str;

    /// Number of syllable units in `word`.
    fn syllable_units(&self, word: &str) -> usize;
}

/// Dictionary-backed English syllable estimator.
///
/// Every English region shares one exceptions table and one vowel-group
/// estimate; the locale is validated and reported but does not change counts.
/// The estimate is a heuristic, not hyphenation: words outside the table can
/// be off by one (`Jacksonian` counts 3). Plug in another
/// [`SyllableEstimator`] where that matters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionarySyllables {
    locale: String,
}

impl DictionarySyllables {
    /// Build an estimator for an English locale (`en`, `en_US`, `en-GB`, ...).
    pub fn for_locale(locale: &str) -> ResourceResult<Self> {
        let normalized = locale.replace('-', "_");
        let (language, region) = match normalized.split_once('_') {
            Some((language, region)) => (language, Some(region)),
            None => (normalized.as_str(), None),
        };
        if !language.eq_ignore_ascii_case("en") {
            return Err(ResourceError::UnsupportedLocale(locale.to_string()));
        }
        let locale = match region {
            Some(region) if !region.is_empty() => format!("en_{}", region.to_ascii_uppercase()),
            _ => "en".to_string(),
        };
        Ok(Self { locale })
    }
}

impl Default for DictionarySyllables {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl SyllableEstimator for DictionarySyllables {
    fn locale(&self) -> &str {
        &self.locale
    }

    fn syllable_units(&self, word: &str) -> usize {
        count_syllables(word)
    }
}

/// Look up a word in the exceptions dictionary, ignoring case.
pub fn lookup_syllables(word: &str) -> Option<usize> {
    SYLLABLE_DICT.get(word.to_lowercase().as_str()).copied()
}

/// Estimate syllables by counting vowel groups, then correcting for silent
/// final `e`, consonant + `le`, and silent `-ed` / `-es`.
///
/// Returns 0 for words with no letters.
pub fn estimate_syllables(word: &str) -> usize {
    let letters: Vec<char> = word
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect();
    let Some(&last) = letters.last() else {
        return 0;
    };

    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
    let from_end = |k: usize| letters.len().checked_sub(k).map(|i| letters[i]);

    let mut groups = 0usize;
    let mut previous_was_vowel = false;
    for &c in &letters {
        let vowel = is_vowel(c);
        if vowel && !previous_was_vowel {
            groups += 1;
        }
        previous_was_vowel = vowel;
    }

    if groups > 1 && last == 'e' {
        match from_end(2) {
            // table, simple
            Some('l') if from_end(3).is_some_and(|c| !is_vowel(c)) => {}
            Some(c) if !is_vowel(c) => groups -= 1,
            _ => {}
        }
    } else if groups > 1 && last == 'd' && from_end(2) == Some('e') {
        if !matches!(from_end(3), Some('t' | 'd')) {
            groups -= 1;
        }
    } else if groups > 1
        && last == 's'
        && from_end(2) == Some('e')
        && from_end(3).is_some_and(|c| !is_vowel(c) && !matches!(c, 's' | 'x' | 'z' | 'c' | 'g'))
    {
        groups -= 1;
    }

    groups.max(1)
}

/// Dictionary lookup with estimate fallback.
pub fn count_syllables(word: &str) -> usize {
    lookup_syllables(word).unwrap_or_else(|| estimate_syllables(word))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dictionary_lookup() {
        assert_eq!(lookup_syllables("area"), Some(3));
        assert_eq!(lookup_syllables("Idea"), Some(3));
        assert_eq!(lookup_syllables("chocolate"), Some(3));
        assert_eq!(lookup_syllables("zebra"), None);
    }

    #[test]
    fn dictionary_skips_comments() {
        assert!(!SYLLABLE_DICT.keys().any(|word| word.starts_with('#')));
        assert!(SYLLABLE_DICT.len() > 150);
    }

    #[test]
    fn vowel_groups() {
        assert_eq!(estimate_syllables("hello"), 2);
        assert_eq!(estimate_syllables("world"), 1);
        assert_eq!(estimate_syllables("beautiful"), 3);
        assert_eq!(estimate_syllables("running"), 2);
        assert_eq!(estimate_syllables("rhythm"), 1);
    }

    #[test]
    fn silent_endings() {
        assert_eq!(estimate_syllables("make"), 1);
        assert_eq!(estimate_syllables("whale"), 1);
        assert_eq!(estimate_syllables("table"), 2);
        assert_eq!(estimate_syllables("syllable"), 3);
        assert_eq!(estimate_syllables("agree"), 2);
        assert_eq!(estimate_syllables("jumped"), 1);
        assert_eq!(estimate_syllables("painted"), 2);
        assert_eq!(estimate_syllables("makes"), 1);
        assert_eq!(estimate_syllables("boxes"), 2);
    }

    #[test]
    fn no_letters_is_zero() {
        assert_eq!(estimate_syllables(""), 0);
        assert_eq!(estimate_syllables("1984"), 0);
        assert_eq!(count_syllables("a"), 1);
    }

    #[test]
    fn english_locales() {
        assert_eq!(DictionarySyllables::for_locale("en_US").unwrap().locale(), "en_US");
        assert_eq!(DictionarySyllables::for_locale("en-gb").unwrap().locale(), "en_GB");
        assert_eq!(DictionarySyllables::for_locale("EN").unwrap().locale(), "en");
        assert_eq!(DictionarySyllables::default().locale(), DEFAULT_LOCALE);
    }

    #[test]
    fn english_regions_count_alike() {
        let us = DictionarySyllables::for_locale("en_US").unwrap();
        let gb = DictionarySyllables::for_locale("en_GB").unwrap();
        for word in ["colour", "theatre", "area", "Jacksonian", "evening"] {
            assert_eq!(us.syllable_units(word), gb.syllable_units(word), "{word}");
        }
        assert_eq!(us.syllable_units("Jacksonian"), 3);
    }

    #[test]
    fn other_locales_are_rejected() {
        let err = DictionarySyllables::for_locale("de_DE").unwrap_err();
        assert!(matches!(err, ResourceError::UnsupportedLocale(ref l) if l == "de_DE"));
    }

    #[test]
    fn estimator_uses_dictionary_first() {
        let estimator = DictionarySyllables::default();
        assert_eq!(estimator.syllable_units("business"), 2);
        assert_eq!(estimator.syllable_units("unfortunately"), 5);
    }
}
