//! Configuration integration tests.
//!
//! These tests verify config discovery, format parsing, and precedence
//! from an end-to-end perspective using the compiled binary. Tests use
//! `info --json` to assert actual config values, and `stats --json` to
//! check that resource settings reach the counters.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Returns a Command configured to run our binary.
#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

/// Run a command from `dir` and parse its JSON output.
fn run_json(dir: &Path, args: &[&str], stdin: Option<&str>) -> Value {
    let mut command = cmd();
    command.args(["-C", dir.to_str().unwrap()]).args(args).arg("--json");
    if let Some(input) = stdin {
        command.write_stdin(input);
    }
    let output = command.output().expect("failed to run command");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("invalid JSON output")
}

/// Run `info --json` from a directory.
fn info_json(dir: &Path) -> Value {
    run_json(dir, &["info"], None)
}

// =============================================================================
// Config File Discovery
// =============================================================================

#[test]
fn runs_without_config_file() {
    let tmp = TempDir::new().unwrap();
    let json = info_json(tmp.path());

    assert_eq!(json["config"]["log_level"], "info");
    assert_eq!(json["config"]["locale"], "en_US");
    assert!(
        json["config"]["config_file"].is_null(),
        "no config file should be reported"
    );
}

#[test]
fn discovers_dotfile_config_in_current_dir() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".textatistic.toml"), r#"log_level = "debug""#).unwrap();

    let json = info_json(tmp.path());

    assert_eq!(json["config"]["log_level"], "debug");
    let reported = json["config"]["config_file"].as_str().unwrap();
    assert!(reported.ends_with(".textatistic.toml"), "{reported}");
}

#[test]
fn discovers_config_in_parent_directory() {
    let tmp = TempDir::new().unwrap();
    let sub_dir = tmp.path().join("chapters").join("one");
    fs::create_dir_all(&sub_dir).unwrap();
    fs::write(tmp.path().join(".textatistic.toml"), r#"log_level = "warn""#).unwrap();

    let json = info_json(&sub_dir);
    assert_eq!(json["config"]["log_level"], "warn");
}

#[test]
fn regular_name_overrides_dotfile() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".textatistic.toml"), r#"log_level = "debug""#).unwrap();
    fs::write(tmp.path().join("textatistic.toml"), r#"log_level = "error""#).unwrap();

    let json = info_json(tmp.path());
    assert_eq!(json["config"]["log_level"], "error");
}

// =============================================================================
// Formats
// =============================================================================

#[test]
fn parses_every_format() {
    for (name, contents) in [
        (".textatistic.toml", "[resources]\nlocale = \"en_GB\"\n"),
        (".textatistic.yaml", "resources:\n  locale: en_GB\n"),
        (".textatistic.yml", "resources:\n  locale: en_GB\n"),
        (".textatistic.json", r#"{"resources": {"locale": "en_GB"}}"#),
    ] {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(name), contents).unwrap();
        let json = info_json(tmp.path());
        assert_eq!(json["config"]["locale"], "en_GB", "format {name}");
    }
}

// =============================================================================
// Precedence
// =============================================================================

#[test]
fn closer_config_takes_precedence() {
    let tmp = TempDir::new().unwrap();
    let sub_dir = tmp.path().join("sub");
    fs::create_dir(&sub_dir).unwrap();
    fs::write(tmp.path().join(".textatistic.toml"), r#"log_level = "error""#).unwrap();
    fs::write(sub_dir.join(".textatistic.toml"), r#"log_level = "debug""#).unwrap();

    let json = info_json(&sub_dir);
    assert_eq!(json["config"]["log_level"], "debug");
}

#[test]
fn later_extension_overrides_earlier_in_same_directory() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".textatistic.toml"), r#"log_level = "debug""#).unwrap();
    fs::write(tmp.path().join(".textatistic.yaml"), "log_level: error\n").unwrap();

    let json = info_json(tmp.path());
    assert_eq!(json["config"]["log_level"], "error");
}

#[test]
fn explicit_config_overrides_discovered() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".textatistic.toml"), r#"log_level = "debug""#).unwrap();
    let explicit = tmp.path().join("override.toml");
    fs::write(&explicit, r#"log_level = "error""#).unwrap();

    let json = run_json(
        tmp.path(),
        &["--config", explicit.to_str().unwrap(), "info"],
        None,
    );
    assert_eq!(json["config"]["log_level"], "error");
    let reported = json["config"]["config_file"].as_str().unwrap();
    assert!(reported.ends_with("override.toml"), "{reported}");
}

#[test]
fn env_var_overrides_config_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".textatistic.toml"), "[resources]\nlocale = \"en_GB\"\n").unwrap();

    let output = cmd()
        .env("TEXTATISTIC_RESOURCES__LOCALE", "en_AU")
        .args(["-C", tmp.path().to_str().unwrap(), "info", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["config"]["locale"], "en_AU");
}

#[test]
fn disable_input_limit_is_reported() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".textatistic.toml"), "disable_input_limit = true\n").unwrap();

    let json = info_json(tmp.path());
    assert!(json["config"]["max_input_bytes"].is_null());
}

// =============================================================================
// Resources from config
// =============================================================================

#[test]
fn abbreviation_edits_change_sentence_counts() {
    let text = "It was late, approx. midnight.";
    let tmp = TempDir::new().unwrap();
    let baseline = run_json(tmp.path(), &["stats", "-"], Some(text));

    fs::write(
        tmp.path().join(".textatistic.toml"),
        r#"
[[resources.remove]]
matcher = "approx."
replacement = "approximately"
"#,
    )
    .unwrap();
    let edited = run_json(tmp.path(), &["stats", "-"], Some(text));

    assert_eq!(baseline["sentences"], 1);
    assert_eq!(edited["sentences"], 2);
}

#[test]
fn resource_paths_resolve_against_config_file() {
    let tmp = TempDir::new().unwrap();
    let project = tmp.path().join("project");
    let work = project.join("drafts");
    fs::create_dir_all(&work).unwrap();
    fs::write(project.join("easy.txt"), "the\ncat\nsat\n").unwrap();
    fs::write(
        project.join(".textatistic.toml"),
        "[resources]\neasy_words = \"easy.txt\"\n",
    )
    .unwrap();

    let json = run_json(&work, &["stats", "-"], Some("The cat sat."));
    assert_eq!(json["difficult_words"], 0);
}

#[test]
fn explicit_config_keeps_project_resource_paths() {
    let project = TempDir::new().unwrap();
    let elsewhere = TempDir::new().unwrap();
    fs::create_dir(project.path().join(".git")).unwrap();
    fs::write(project.path().join("easy.txt"), "the\ncat\nsat\n").unwrap();
    fs::write(
        project.path().join("textatistic.toml"),
        "[resources]\neasy_words = \"easy.txt\"\n",
    )
    .unwrap();
    fs::write(project.path().join("in.txt"), "The cat sat.").unwrap();
    let extra = elsewhere.path().join("extra.toml");
    fs::write(&extra, r#"log_level = "warn""#).unwrap();

    let json = run_json(
        project.path(),
        &["--config", extra.to_str().unwrap(), "stats", "in.txt"],
        None,
    );
    assert_eq!(json["difficult_words"], 0);
}

#[test]
fn normalize_ignores_unusable_scoring_resources() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".textatistic.toml"),
        "[resources]\nlocale = \"fr_FR\"\neasy_words = \"missing.txt\"\n",
    )
    .unwrap();

    let json = run_json(tmp.path(), &["normalize", "-"], Some("Ask Dr. Who."));
    assert_eq!(json, "Ask Doctor Who.");

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "stats", "-"])
        .write_stdin("Ask Dr. Who.")
        .assert()
        .failure();
}

#[test]
fn unknown_modify_target_fails() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".textatistic.toml"),
        r#"
[[resources.modify]]
matcher = "no such abbreviation"
replacement = "anything"
"#,
    )
    .unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "stats", "-"])
        .write_stdin("The cat sat.")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no abbreviation rule with matcher"));
}

#[test]
fn strip_markdown_setting_applies_to_plain_files() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".textatistic.toml"), "strip_markdown = true\n").unwrap();
    fs::write(
        tmp.path().join("notes.txt"),
        "```\nlet a = 1.5; b. c.\n```\n\nThe cat sat.",
    )
    .unwrap();

    let json = run_json(tmp.path(), &["stats", "notes.txt"], None);
    assert_eq!(json["sentences"], 1);
}

// =============================================================================
// Error Handling
// =============================================================================

#[test]
fn invalid_config_shows_error() {
    for (name, contents) in [
        (".textatistic.toml", "log_level = [not valid"),
        (".textatistic.yaml", "log_level: [unclosed\n"),
        (".textatistic.json", "{not valid json}"),
    ] {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(name), contents).unwrap();
        cmd()
            .args(["-C", tmp.path().to_str().unwrap(), "info"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to load configuration"));
    }
}

#[test]
fn unknown_config_field_is_ignored() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".textatistic.toml"),
        "log_level = \"warn\"\nsome_future_option = true\n",
    )
    .unwrap();

    let json = info_json(tmp.path());
    assert_eq!(json["config"]["log_level"], "warn");
}

// =============================================================================
// Boundary Marker
// =============================================================================

#[test]
fn git_boundary_stops_config_search() {
    let tmp = TempDir::new().unwrap();
    let parent = tmp.path().join("parent");
    let repo = parent.join("repo");
    let work = repo.join("src");
    fs::create_dir_all(&work).unwrap();
    fs::create_dir(repo.join(".git")).unwrap();
    fs::write(parent.join(".textatistic.toml"), r#"log_level = "error""#).unwrap();

    let json = info_json(&work);
    assert_eq!(json["config"]["log_level"], "info");
}

#[test]
fn config_in_same_dir_as_git_is_found() {
    let tmp = TempDir::new().unwrap();
    let repo = tmp.path().join("repo");
    let work = repo.join("src");
    fs::create_dir_all(&work).unwrap();
    fs::create_dir(repo.join(".git")).unwrap();
    fs::write(repo.join(".textatistic.toml"), r#"log_level = "debug""#).unwrap();

    let json = info_json(&work);
    assert_eq!(json["config"]["log_level"], "debug");
}
