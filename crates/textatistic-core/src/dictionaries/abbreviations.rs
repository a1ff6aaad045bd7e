//! Abbreviation substitution rules.
//!
//! Periods inside abbreviations ("i.e.", "Dr.") would otherwise be counted as
//! sentence terminators. The table rewrites them before counting. Rules run in
//! order, each over the output of the previous one.
//!
//! # Rules file format
//!
//! Two comma-separated columns per row: `matcher,replacement`. A matcher
//! written `r'...'` or `r"..."` is a regular expression; anything else is a
//! literal substring. Fields may be double-quoted to embed commas, with `""`
//! standing for a literal quote. Regex replacements use the classic `\1` /
//! `\g<name>` back-reference syntax.
//!
//! Literal matchers are not anchored to word boundaries: `"etc."` also
//! rewrites the tail of `"fetc."`. The built-in rules anchor short title
//! abbreviations with `\b` regex rules instead.

use std::borrow::Cow;
use std::sync::LazyLock;

use camino::Utf8Path;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{AbbreviationError, AbbreviationResult, ResourceError, ResourceResult};

const BUILTIN_RULES: &str = include_str!("../../data/abbreviations.txt");

static BUILTIN: LazyLock<AbbreviationTable> = LazyLock::new(|| {
    AbbreviationTable::parse(BUILTIN_RULES).expect("built-in abbreviation rules are valid")
});

/// A single substitution rule, classified once when it is built.
#[derive(Debug, Clone)]
pub enum AbbreviationRule {
    /// Global substring replacement.
    Literal {
        /// Substring to find.
        matcher: String,
        /// Text to put in its place.
        replacement: String,
    },
    /// Regular-expression substitution.
    Pattern {
        /// The matcher exactly as written, including the `r'...'` wrapper.
        matcher: String,
        /// Compiled pattern.
        regex: Regex,
        /// Replacement as written.
        replacement: String,
        /// Replacement translated to `regex` expansion syntax.
        expansion: String,
    },
}

impl AbbreviationRule {
    /// Build a literal rule.
    pub fn literal(matcher: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self::Literal {
            matcher: matcher.into(),
            replacement: replacement.into(),
        }
    }

    /// Build a regex rule from a bare pattern and a classic-syntax replacement.
    pub fn pattern(pattern: &str, replacement: impl Into<String>) -> AbbreviationResult<Self> {
        Self::compile(format!("r'{pattern}'"), pattern, replacement.into())
    }

    /// Build a rule from a matcher as it appears in a rules file, sniffing the
    /// `r'...'` / `r"..."` marker to decide between literal and regex.
    pub fn parse(matcher: &str, replacement: &str) -> AbbreviationResult<Self> {
        match pattern_body(matcher) {
            Some(pattern) => Self::compile(matcher.to_string(), pattern, replacement.to_string()),
            None => Ok(Self::literal(matcher, replacement)),
        }
    }

    fn compile(matcher: String, pattern: &str, replacement: String) -> AbbreviationResult<Self> {
        let regex = Regex::new(pattern).map_err(|source| AbbreviationError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        let expansion = translate_backrefs(&replacement);
        Ok(Self::Pattern {
            matcher,
            regex,
            replacement,
            expansion,
        })
    }

    /// The matcher as written. Used as the key for [`AbbreviationTable::modify`].
    pub fn matcher(&self) -> &str {
        match self {
            Self::Literal { matcher, .. } | Self::Pattern { matcher, .. } => matcher,
        }
    }

    /// The replacement as written.
    pub fn replacement(&self) -> &str {
        match self {
            Self::Literal { replacement, .. } | Self::Pattern { replacement, .. } => replacement,
        }
    }

    /// Whether this is a regular-expression rule.
    pub const fn is_pattern(&self) -> bool {
        matches!(self, Self::Pattern { .. })
    }

    /// Apply the rule to the whole text once.
    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        match self {
            Self::Literal {
                matcher,
                replacement,
            } => {
                if matcher.is_empty() || !text.contains(matcher.as_str()) {
                    Cow::Borrowed(text)
                } else {
                    Cow::Owned(text.replace(matcher.as_str(), replacement))
                }
            }
            Self::Pattern {
                regex, expansion, ..
            } => regex.replace_all(text, expansion.as_str()),
        }
    }

    fn same_pair(&self, matcher: &str, replacement: &str) -> bool {
        self.matcher() == matcher && self.replacement() == replacement
    }
}

impl PartialEq for AbbreviationRule {
    fn eq(&self, other: &Self) -> bool {
        self.is_pattern() == other.is_pattern()
            && self.same_pair(other.matcher(), other.replacement())
    }
}

impl Eq for AbbreviationRule {}

/// A `(matcher, replacement)` pair as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RuleSpec {
    /// Matcher; `r'...'` marks a regular expression.
    pub matcher: String,
    /// Replacement text.
    pub replacement: String,
}

impl RuleSpec {
    /// Build the rule, compiling it if it is a pattern.
    pub fn build(&self) -> AbbreviationResult<AbbreviationRule> {
        AbbreviationRule::parse(&self.matcher, &self.replacement)
    }
}

impl<M: Into<String>, R: Into<String>> From<(M, R)> for RuleSpec {
    fn from((matcher, replacement): (M, R)) -> Self {
        Self {
            matcher: matcher.into(),
            replacement: replacement.into(),
        }
    }
}

/// A batch of customizations, applied as append, then modify, then remove.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AbbreviationEdits {
    /// Rules added at the end of the table.
    pub append: Vec<RuleSpec>,
    /// Rules replacing the existing rule with the same matcher, in place.
    pub modify: Vec<RuleSpec>,
    /// Exact pairs to delete.
    pub remove: Vec<RuleSpec>,
}

impl AbbreviationEdits {
    /// Whether there is nothing to apply.
    pub fn is_empty(&self) -> bool {
        self.append.is_empty() && self.modify.is_empty() && self.remove.is_empty()
    }
}

/// Ordered list of abbreviation rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AbbreviationTable {
    rules: Vec<AbbreviationRule>,
}

impl AbbreviationTable {
    /// The built-in rules.
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Build a table from already constructed rules.
    pub const fn new(rules: Vec<AbbreviationRule>) -> Self {
        Self { rules }
    }

    /// Parse a rules file. Regex rules are compiled here, so a bad pattern
    /// fails construction rather than normalization.
    pub fn parse(source: &str) -> AbbreviationResult<Self> {
        let mut rules = Vec::new();
        for (index, line) in source.lines().enumerate() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            if line.trim().is_empty() {
                continue;
            }
            let fields = split_row(line);
            let [matcher, replacement] = fields.as_slice() else {
                return Err(AbbreviationError::MalformedRow {
                    line: index + 1,
                    row: line.to_string(),
                });
            };
            rules.push(AbbreviationRule::parse(matcher, replacement)?);
        }
        Ok(Self { rules })
    }

    /// Load a rules file from disk.
    #[tracing::instrument]
    pub fn from_path(path: &Utf8Path) -> ResourceResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| ResourceError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::parse(&source)?;
        tracing::debug!(rules = table.len(), "loaded abbreviation rules");
        Ok(table)
    }

    /// Add rules at the end.
    pub fn append(&mut self, rules: impl IntoIterator<Item = AbbreviationRule>) {
        self.rules.extend(rules);
    }

    /// Replace, in place, the first rule whose matcher equals each new rule's
    /// matcher. Nothing changes unless every target exists.
    pub fn modify(
        &mut self,
        rules: impl IntoIterator<Item = AbbreviationRule>,
    ) -> AbbreviationResult<()> {
        let mut edited = self.rules.clone();
        for rule in rules {
            let index = edited
                .iter()
                .position(|existing| existing.matcher() == rule.matcher())
                .ok_or_else(|| AbbreviationError::UnknownMatcher {
                    matcher: rule.matcher().to_string(),
                })?;
            edited[index] = rule;
        }
        self.rules = edited;
        Ok(())
    }

    /// Delete rules matching each `(matcher, replacement)` pair exactly. When
    /// a pair occurs more than once the last occurrence goes, so an `append`
    /// followed by a `remove` of the same rule restores the previous order.
    /// Nothing changes unless every target exists.
    pub fn remove(&mut self, rules: &[AbbreviationRule]) -> AbbreviationResult<()> {
        let mut edited = self.rules.clone();
        for rule in rules {
            let index = edited
                .iter()
                .rposition(|existing| existing.same_pair(rule.matcher(), rule.replacement()))
                .ok_or_else(|| AbbreviationError::UnknownRule {
                    matcher: rule.matcher().to_string(),
                    replacement: rule.replacement().to_string(),
                })?;
            edited.remove(index);
        }
        self.rules = edited;
        Ok(())
    }

    /// Apply a batch of edits atomically.
    pub fn customize(&mut self, edits: &AbbreviationEdits) -> AbbreviationResult<()> {
        let build = |specs: &[RuleSpec]| {
            specs
                .iter()
                .map(RuleSpec::build)
                .collect::<AbbreviationResult<Vec<_>>>()
        };
        let append = build(&edits.append)?;
        let modify = build(&edits.modify)?;
        let remove = build(&edits.remove)?;

        let mut edited = self.clone();
        edited.append(append);
        edited.modify(modify)?;
        edited.remove(&remove)?;
        *self = edited;
        Ok(())
    }

    /// Run every rule, in order, over the text.
    pub fn apply(&self, text: &str) -> String {
        let mut text = text.to_string();
        for rule in &self.rules {
            let replaced = match rule.apply(&text) {
                Cow::Owned(replaced) => Some(replaced),
                Cow::Borrowed(_) => None,
            };
            if let Some(replaced) = replaced {
                text = replaced;
            }
        }
        text
    }

    /// The rules in order.
    pub fn rules(&self) -> &[AbbreviationRule] {
        &self.rules
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<AbbreviationRule> for AbbreviationTable {
    fn from_iter<I: IntoIterator<Item = AbbreviationRule>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Return the pattern inside an `r'...'` / `r"..."` matcher.
fn pattern_body(matcher: &str) -> Option<&str> {
    let rest = matcher
        .strip_prefix("r'")
        .or_else(|| matcher.strip_prefix("r\""))?;
    // The closing quote is dropped whatever it is.
    let mut chars = rest.chars();
    chars.next_back();
    Some(chars.as_str())
}

/// Rewrite `\1`, `\g<name>` and `\\` into `regex` expansion syntax, escaping
/// any literal `$`.
fn translate_backrefs(replacement: &str) -> String {
    let mut out = String::with_capacity(replacement.len() + 4);
    let mut chars = replacement.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '$' => out.push_str("$$"),
            '\\' => match chars.peek().copied() {
                Some(d) if d.is_ascii_digit() => {
                    out.push_str("${");
                    while let Some(&d) = chars.peek() {
                        if !d.is_ascii_digit() {
                            break;
                        }
                        out.push(d);
                        chars.next();
                    }
                    out.push('}');
                }
                Some('g') => {
                    let mut lookahead = chars.clone();
                    lookahead.next();
                    if lookahead.next() == Some('<') {
                        let name: String = lookahead.by_ref().take_while(|&c| c != '>').collect();
                        out.push_str("${");
                        out.push_str(&name);
                        out.push('}');
                        chars = lookahead;
                    } else {
                        out.push('\\');
                    }
                }
                Some('\\') => {
                    out.push('\\');
                    chars.next();
                }
                _ => out.push('\\'),
            },
            _ => out.push(ch),
        }
    }
    out
}

/// Split one CSV row into fields. Double-quoted fields may contain commas and
/// `""` escapes; whitespace is significant.
fn split_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut chars = line.chars().peekable();
    let mut in_quotes = false;
    let mut at_field_start = true;

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(ch);
            }
            continue;
        }
        match ch {
            '"' if at_field_start => {
                in_quotes = true;
                at_field_start = false;
            }
            ',' => {
                fields.push(std::mem::take(&mut field));
                at_field_start = true;
            }
            _ => {
                field.push(ch);
                at_field_start = false;
            }
        }
    }
    fields.push(field);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[(&str, &str)]) -> AbbreviationTable {
        rows.iter()
            .map(|(m, r)| AbbreviationRule::parse(m, r).unwrap())
            .collect()
    }

    fn matchers(table: &AbbreviationTable) -> Vec<&str> {
        table.rules().iter().map(AbbreviationRule::matcher).collect()
    }

    #[test]
    fn builtin_rules_load() {
        let builtin = AbbreviationTable::builtin();
        assert!(builtin.len() > 50);
        assert_eq!(builtin.rules()[0].matcher(), "i.e.");
        assert!(builtin.rules().iter().any(AbbreviationRule::is_pattern));
    }

    #[test]
    fn marker_selects_regex_rule() {
        let literal = AbbreviationRule::parse("i.e.", "that is").unwrap();
        assert!(!literal.is_pattern());
        let single = AbbreviationRule::parse(r"r'\bDr\.'", "Doctor").unwrap();
        assert!(single.is_pattern());
        let double = AbbreviationRule::parse(r#"r"\bDr\.""#, "Doctor").unwrap();
        assert!(double.is_pattern());
    }

    #[test]
    fn literal_rule_replaces_every_occurrence() {
        let rule = AbbreviationRule::literal("e.g.", "for example");
        assert_eq!(rule.apply("e.g. this, e.g. that"), "for example this, for example that");
    }

    #[test]
    fn literal_rule_is_not_word_anchored() {
        let rule = AbbreviationRule::literal("etc.", "et cetera");
        assert_eq!(rule.apply("fetc."), "fet cetera");
    }

    #[test]
    fn pattern_rule_supports_backrefs() {
        let rule = AbbreviationRule::parse(r"r'\bNo\.(\s*\d)'", r"Number\1").unwrap();
        assert_eq!(rule.apply("See No. 5 and No.7."), "See Number 5 and Number7.");
    }

    #[test]
    fn dollar_in_replacement_is_literal() {
        let rule = AbbreviationRule::pattern("USD", "$").unwrap();
        assert_eq!(rule.apply("5 USD"), "5 $");
    }

    #[test]
    fn invalid_pattern_fails_at_construction() {
        let err = AbbreviationRule::parse("r'(unclosed'", "x").unwrap_err();
        assert!(matches!(err, AbbreviationError::InvalidPattern { .. }));

        let err = AbbreviationTable::parse("ok,fine\nr'[',broken\n").unwrap_err();
        assert!(matches!(err, AbbreviationError::InvalidPattern { .. }));
    }

    #[test]
    fn parse_rejects_rows_without_two_columns() {
        let err = AbbreviationTable::parse("i.e.,that is\nlonely\n").unwrap_err();
        assert!(matches!(err, AbbreviationError::MalformedRow { line: 2, .. }));
    }

    #[test]
    fn parse_handles_quoted_fields() {
        let parsed = AbbreviationTable::parse("\"a,b\",\"say \"\"hi\"\"\"\n").unwrap();
        assert_eq!(parsed.rules()[0].matcher(), "a,b");
        assert_eq!(parsed.rules()[0].replacement(), "say \"hi\"");
    }

    #[test]
    fn rules_apply_in_order() {
        let rules = table(&[("a", "b"), ("b", "c")]);
        assert_eq!(rules.apply("a"), "c");

        let reversed = table(&[("b", "c"), ("a", "b")]);
        assert_eq!(reversed.apply("a"), "b");
    }

    #[test]
    fn append_adds_at_end() {
        let mut rules = table(&[("i.e.", "that is"), ("cf.", "compare")]);
        rules.append([AbbreviationRule::literal("dog", "cat")]);
        assert_eq!(matchers(&rules), ["i.e.", "cf.", "dog"]);
    }

    #[test]
    fn modify_keeps_position() {
        let mut rules = table(&[("i.e.", "that is"), ("cf.", "compare"), ("etc.", "and so on")]);
        rules
            .modify([AbbreviationRule::literal("cf.", "YYY")])
            .unwrap();
        assert_eq!(matchers(&rules), ["i.e.", "cf.", "etc."]);
        assert_eq!(rules.rules()[1].replacement(), "YYY");
    }

    #[test]
    fn modify_unknown_matcher_leaves_table_untouched() {
        let mut rules = table(&[("i.e.", "that is"), ("cf.", "compare")]);
        let before = rules.clone();
        let err = rules
            .modify([
                AbbreviationRule::literal("i.e.", "XXX"),
                AbbreviationRule::literal("nope", "x"),
            ])
            .unwrap_err();
        assert!(matches!(err, AbbreviationError::UnknownMatcher { .. }));
        assert_eq!(rules, before);
    }

    #[test]
    fn remove_requires_exact_pair() {
        let mut rules = table(&[("U. N.", "United Nations"), ("cf.", "compare")]);
        let err = rules
            .remove(&[AbbreviationRule::literal("U. N.", "UN")])
            .unwrap_err();
        assert!(matches!(err, AbbreviationError::UnknownRule { .. }));
        assert_eq!(rules.len(), 2);

        rules
            .remove(&[AbbreviationRule::literal("U. N.", "United Nations")])
            .unwrap();
        assert_eq!(matchers(&rules), ["cf."]);
    }

    #[test]
    fn append_then_remove_restores_order() {
        let original = table(&[("dog", "cat"), ("i.e.", "that is"), ("cf.", "compare")]);
        let mut rules = original.clone();
        let added = AbbreviationRule::literal("dog", "cat");
        rules.append([added.clone()]);
        rules.remove(&[added]).unwrap();
        assert_eq!(rules, original);
    }

    #[test]
    fn customize_applies_append_modify_remove() {
        let mut rules = table(&[
            ("i.e.", "id est"),
            ("cf.", "confer"),
            ("U. N.", "United Nations"),
        ]);
        let edits = AbbreviationEdits {
            append: vec![("dog", "cat").into(), ("mouse", "elephant").into()],
            modify: vec![("i.e.", "XXX").into(), ("cf.", "YYY").into()],
            remove: vec![("U. N.", "United Nations").into()],
        };
        rules.customize(&edits).unwrap();
        assert_eq!(rules.rules()[0].replacement(), "XXX");
        assert_eq!(rules.rules().last().unwrap().matcher(), "mouse");
        assert!(!rules.rules().iter().any(|r| r.matcher() == "U. N."));
    }

    #[test]
    fn failed_customize_is_atomic() {
        let mut rules = table(&[("i.e.", "id est")]);
        let before = rules.clone();
        let edits = AbbreviationEdits {
            append: vec![("dog", "cat").into()],
            remove: vec![("missing", "rule").into()],
            ..AbbreviationEdits::default()
        };
        assert!(rules.customize(&edits).is_err());
        assert_eq!(rules, before);
    }

    #[test]
    fn translate_backrefs_handles_named_and_escaped() {
        assert_eq!(translate_backrefs(r"\1 \2"), "${1} ${2}");
        assert_eq!(translate_backrefs(r"\g<word>!"), "${word}!");
        assert_eq!(translate_backrefs(r"a\\b"), r"a\b");
        assert_eq!(translate_backrefs("cost $5"), "cost $$5");
    }
}
