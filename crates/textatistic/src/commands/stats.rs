//! Stats command: counts and readability scores for one input.

use std::collections::BTreeMap;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use textatistic_core::{CountBundle, ResourceConfig, Resources, Score, ScoreError};

use super::{MarkdownArgs, ResourceArgs, input_label, read_input};

/// Arguments for the `stats` subcommand.
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// File to score, or `-` for standard input.
    pub file: Utf8PathBuf,

    /// Only report these scores (repeatable)
    #[arg(long, value_enum, value_name = "SCORE")]
    pub score: Vec<Score>,

    #[command(flatten)]
    pub resources: ResourceArgs,

    #[command(flatten)]
    pub markdown: MarkdownArgs,
}

impl StatsArgs {
    /// Requested scores in report order, or all of them.
    fn selected_scores(&self) -> Vec<Score> {
        if self.score.is_empty() {
            return Score::ALL.to_vec();
        }
        Score::ALL
            .into_iter()
            .filter(|score| self.score.contains(score))
            .collect()
    }
}

#[derive(Debug, Serialize)]
struct StatsReport<'a> {
    file: &'a str,
    #[serde(flatten)]
    counts: CountBundle,
    #[serde(flatten)]
    scores: BTreeMap<&'static str, f64>,
}

/// Count and score a file.
///
/// Counts are always printed. When a requested score is undefined (no
/// words or no sentence punctuation) the error is returned after the counts.
#[instrument(name = "cmd_stats", skip_all, fields(file = %args.file))]
pub fn cmd_stats(
    args: StatsArgs,
    global_json: bool,
    resource_config: &ResourceConfig,
    config_strip_markdown: Option<bool>,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, scores = ?args.score, "executing stats command");

    let content = read_input(&args.file, max_input_bytes)?;
    let text = args
        .markdown
        .prepare(&args.file, config_strip_markdown, content);

    let resources = Resources::from_config(&args.resources.merge_into(resource_config))
        .context("failed to load scoring resources")?;
    let counts = CountBundle::from_text(&text, &resources);

    let scored: Result<BTreeMap<_, _>, ScoreError> = args
        .selected_scores()
        .into_iter()
        .map(|score| score.compute(&counts).map(|value| (score.key(), value)))
        .collect();

    let label = input_label(&args.file);
    let (scores, failure) = match scored {
        Ok(scores) => (scores, None),
        Err(err) => (BTreeMap::new(), Some(err)),
    };
    let report = StatsReport {
        file: label,
        counts,
        scores,
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    match failure {
        Some(err) => Err(anyhow::Error::new(err).context(format!("cannot score {label}"))),
        None => Ok(()),
    }
}

fn print_report(report: &StatsReport<'_>) {
    let counts = &report.counts;
    println!("{}", report.file.bold());
    for (label, value) in [
        ("Characters", counts.characters),
        ("Words", counts.words),
        ("Sentences", counts.sentences),
        ("Syllables", counts.syllables),
        ("Difficult words", counts.difficult_words),
        ("Polysyllabic words", counts.polysyllabic_words),
    ] {
        println!("  {} {value}", format!("{label:<20}").dimmed());
    }

    if report.scores.is_empty() {
        return;
    }
    println!();
    for score in Score::ALL {
        if let Some(value) = report.scores.get(score.key()) {
            println!("  {} {}", format!("{:<20}", score.name()).dimmed(), format!("{value:.2}").cyan());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(scores: &[Score]) -> StatsArgs {
        StatsArgs {
            file: Utf8PathBuf::from("-"),
            score: scores.to_vec(),
            resources: ResourceArgs::default(),
            markdown: MarkdownArgs::default(),
        }
    }

    #[test]
    fn no_selection_means_every_score() {
        assert_eq!(args(&[]).selected_scores(), Score::ALL.to_vec());
    }

    #[test]
    fn selection_keeps_report_order_and_drops_duplicates() {
        let selected = args(&[Score::DaleChall, Score::Flesch, Score::DaleChall]).selected_scores();
        assert_eq!(selected, vec![Score::Flesch, Score::DaleChall]);
    }

    #[test]
    fn report_serializes_flat() {
        let report = StatsReport {
            file: "essay.txt",
            counts: CountBundle {
                words: 6,
                sentences: 1,
                ..CountBundle::default()
            },
            scores: BTreeMap::from([("flesch", 100.0)]),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["file"], "essay.txt");
        assert_eq!(json["words"], 6);
        assert_eq!(json["flesch"], 100.0);
        assert!(json.get("smog").is_none());
    }
}
