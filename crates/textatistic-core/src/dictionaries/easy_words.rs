//! Dale-Chall easy-word list.
//!
//! Words absent from this list count as "difficult" for the Dale-Chall score.
//! The built-in list is embedded at compile time and parsed once.

use std::collections::HashSet;
use std::sync::LazyLock;

use camino::Utf8Path;

use crate::error::{ResourceError, ResourceResult};

const BUILTIN_LIST: &str = include_str!("../../data/dale_chall.txt");

static BUILTIN: LazyLock<EasyWords> = LazyLock::new(|| EasyWords::parse(BUILTIN_LIST));

/// A set of lowercase "easy" words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EasyWords {
    words: HashSet<String>,
}

impl EasyWords {
    /// The built-in Dale-Chall list.
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Parse a newline-delimited word list. Blank lines are skipped and
    /// surrounding whitespace is trimmed; entries are stored as written.
    pub fn parse(list: &str) -> Self {
        list.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Load a word list from a UTF-8 file.
    #[tracing::instrument]
    pub fn from_path(path: &Utf8Path) -> ResourceResult<Self> {
        let list = std::fs::read_to_string(path).map_err(|source| ResourceError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let words = Self::parse(&list);
        tracing::debug!(entries = words.len(), "loaded easy-word list");
        Ok(words)
    }

    /// Exact membership test. Callers lowercase the word first.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl FromIterator<String> for EasyWords {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<&'a str> for EasyWords {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(str::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_list_has_common_words() {
        let easy = EasyWords::builtin();
        assert!(easy.len() > 2500);
        for word in ["the", "cat", "house", "mother", "yesterday", "afternoon"] {
            assert!(easy.contains(word), "{word} should be easy");
        }
    }

    #[test]
    fn builtin_list_excludes_hard_words() {
        let easy = EasyWords::builtin();
        for word in ["implementation", "necessitated", "interdepartmental"] {
            assert!(!easy.contains(word), "{word} should be difficult");
        }
    }

    #[test]
    fn lookup_is_exact() {
        let easy = EasyWords::parse("apple\nbanana\n");
        assert!(easy.contains("apple"));
        assert!(!easy.contains("Apple"));
        assert!(!easy.contains("apples"));
    }

    #[test]
    fn parse_skips_blank_lines_and_duplicates() {
        let easy = EasyWords::parse("a\n\n  b  \na\n");
        assert_eq!(easy.len(), 2);
        assert!(easy.contains("b"));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = camino::Utf8PathBuf::try_from(tmp.path().join("missing.txt")).unwrap();
        let err = EasyWords::from_path(&path).unwrap_err();
        assert!(matches!(err, ResourceError::Read { .. }));
    }

    #[test]
    fn loads_from_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("easy.txt");
        std::fs::write(&path, "one\ntwo\nthree\n").unwrap();
        let path = camino::Utf8PathBuf::try_from(path).unwrap();
        let easy = EasyWords::from_path(&path).unwrap();
        assert_eq!(easy.len(), 3);
        assert!(easy.contains("two"));
    }
}
