//! Command implementations.

use std::io::Read;

use anyhow::{Context, bail};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use textatistic_core::ResourceConfig;

pub mod info;
pub mod normalize;
pub mod stats;

/// Path argument that means "read standard input".
pub const STDIN_PATH: &str = "-";

/// Read a file (or stdin for `-`) and validate its size against the configured limit.
pub fn read_input(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    if path.as_str() == STDIN_PATH {
        return read_stdin(max_bytes);
    }

    // Preflight: check file size via metadata before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = metadata.len() as usize;
        if size > max {
            bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    std::fs::read_to_string(path.as_std_path()).with_context(|| format!("failed to read {path}"))
}

fn read_stdin(max_bytes: Option<usize>) -> anyhow::Result<String> {
    let mut bytes = Vec::new();
    let mut stdin = std::io::stdin().lock();
    match max_bytes {
        // One byte past the limit is enough to know it was exceeded.
        Some(max) => stdin.take(max as u64 + 1).read_to_end(&mut bytes),
        None => stdin.read_to_end(&mut bytes),
    }
    .context("failed to read standard input")?;

    if let Some(max) = max_bytes
        && bytes.len() > max
    {
        bail!("input too large: standard input exceeds {max} bytes");
    }
    String::from_utf8(bytes).context("standard input is not valid UTF-8")
}

/// How an input path is shown in output.
pub fn input_label(path: &Utf8Path) -> &str {
    if path.as_str() == STDIN_PATH {
        "<stdin>"
    } else {
        path.as_str()
    }
}

/// Whether a path names a markdown document.
pub fn is_markdown_path(path: &Utf8Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("markdown"))
}

/// Flags that override the configured scoring resources.
#[derive(Args, Debug, Default)]
pub struct ResourceArgs {
    /// Syllable estimator locale (e.g. en_US, en_GB)
    #[arg(long)]
    pub locale: Option<String>,

    /// Easy-word list replacing the built-in Dale-Chall list
    #[arg(long, value_name = "FILE")]
    pub easy_words: Option<Utf8PathBuf>,

    /// Abbreviation rules file replacing the built-in rules
    #[arg(long, value_name = "FILE")]
    pub abbreviations: Option<Utf8PathBuf>,
}

impl ResourceArgs {
    /// The configured resources with these flags laid over them.
    pub fn merge_into(&self, config: &ResourceConfig) -> ResourceConfig {
        ResourceConfig {
            locale: self.locale.clone().unwrap_or_else(|| config.locale.clone()),
            easy_words: self.easy_words.clone().or_else(|| config.easy_words.clone()),
            abbreviations: self
                .abbreviations
                .clone()
                .or_else(|| config.abbreviations.clone()),
            edits: config.edits.clone(),
        }
    }
}

/// Markdown handling flags.
#[derive(Args, Debug, Default)]
pub struct MarkdownArgs {
    /// Strip markdown before counting
    #[arg(long, overrides_with = "no_strip_markdown")]
    pub strip_markdown: bool,

    /// Count the input as-is, even for .md files
    #[arg(long, overrides_with = "strip_markdown")]
    pub no_strip_markdown: bool,
}

impl MarkdownArgs {
    /// Flags first, then config, then the file extension.
    pub fn should_strip(&self, input: &Utf8Path, configured: Option<bool>) -> bool {
        if self.strip_markdown {
            true
        } else if self.no_strip_markdown {
            false
        } else {
            configured.unwrap_or_else(|| is_markdown_path(input))
        }
    }

    /// Apply the stripping decision to `content`.
    pub fn prepare(&self, input: &Utf8Path, configured: Option<bool>, content: String) -> String {
        if self.should_strip(input, configured) {
            textatistic_core::markdown::strip_to_prose(&content)
        } else {
            content
        }
    }
}
