//! Normalize command: show what the counters see.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use tracing::{debug, instrument};

use textatistic_core::{ResourceConfig, Resources, normalize, tokenize};

use super::{MarkdownArgs, read_input};

/// Arguments for the `normalize` subcommand.
#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// File to normalize, or `-` for standard input.
    pub file: Utf8PathBuf,

    /// Print the word list instead of the normalized text
    #[arg(long)]
    pub words: bool,

    /// Abbreviation rules file replacing the built-in rules
    #[arg(long, value_name = "FILE")]
    pub abbreviations: Option<Utf8PathBuf>,

    #[command(flatten)]
    pub markdown: MarkdownArgs,
}

/// Print the normalized text, or its words one per line.
#[instrument(name = "cmd_normalize", skip_all, fields(file = %args.file))]
pub fn cmd_normalize(
    args: NormalizeArgs,
    global_json: bool,
    resource_config: &ResourceConfig,
    config_strip_markdown: Option<bool>,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, words = args.words, "executing normalize command");

    let content = read_input(&args.file, max_input_bytes)?;
    let text = args
        .markdown
        .prepare(&args.file, config_strip_markdown, content);

    let resource_config = ResourceConfig {
        abbreviations: args
            .abbreviations
            .or_else(|| resource_config.abbreviations.clone()),
        ..resource_config.clone()
    };
    let abbreviations = Resources::abbreviations_from_config(&resource_config)
        .context("failed to load abbreviation rules")?;
    let normalized = normalize(&text, &abbreviations);

    match (args.words, global_json) {
        (true, true) => println!("{}", serde_json::to_string_pretty(&tokenize(&normalized))?),
        (true, false) => {
            for word in tokenize(&normalized) {
                println!("{word}");
            }
        }
        (false, true) => println!("{}", serde_json::to_string(normalized.as_str())?),
        (false, false) => println!("{normalized}"),
    }

    Ok(())
}
