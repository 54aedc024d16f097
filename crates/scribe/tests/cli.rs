//! CLI integration tests for scribe commands.
//!
//! These tests focus on exit codes and basic behavioral verification,
//! not specific output formatting which may change.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

/// Helper to create a temp directory for tests.
fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

/// Helper to get a scribe command.
fn scribe() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("scribe").unwrap()
}

/// Helper to run `scribe` with HOME isolated to the provided directory.
fn scribe_with_home(home: &Path) -> Command {
    let mut cmd = scribe();
    cmd.env("HOME", home);
    cmd.env_remove("SCRIBE_LOG");
    cmd
}

/// Strips ANSI escape sequences from a string.
fn strip_ansi(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' {
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            output.push(ch);
        }
    }

    output
}

/// Builds a JSON notebook from `(id, text)` cells.
fn notebook(cells: &[(&str, &str)]) -> String {
    let cells: Vec<Value> = cells
        .iter()
        .map(|(id, value)| {
            serde_json::json!({
                "kind": 2,
                "value": value,
                "metadata": { "type": "text", "id": id }
            })
        })
        .collect();
    serde_json::json!({ "cells": cells }).to_string()
}

/// A home directory and a small English/French translation project.
struct TestProject {
    /// Isolated home directory.
    home: tempfile::TempDir,
    /// Project root.
    project: tempfile::TempDir,
}

impl TestProject {
    fn new() -> Self {
        Self::with_config("root = true\n")
    }

    fn with_config(config: &str) -> Self {
        let project = temp_dir();
        let root = project.path();
        fs::write(root.join(".scribe.toml"), config).unwrap();
        fs::create_dir_all(root.join("sources")).unwrap();
        fs::create_dir_all(root.join("target")).unwrap();
        fs::write(
            root.join("sources/en.source"),
            notebook(&[
                (
                    "GEN 1:1",
                    "In the beginning God created the heavens and the earth.",
                ),
                ("GEN 1:2", "The earth was formless and empty."),
                ("GEN 1:3", "And God said, Let there be light."),
            ]),
        )
        .unwrap();
        fs::write(
            root.join("target/GEN.codex"),
            notebook(&[
                ("GEN 1:1", "Au commencement, Dieu créa les cieux et la terre."),
                ("GEN 1:2", "La terre était informe et vide."),
                ("GEN 1:3", "Dieu dit : Que la lumière soit."),
            ]),
        )
        .unwrap();

        Self {
            home: temp_dir(),
            project,
        }
    }

    /// Adds the Gospel of John to the project.
    fn add_john(&self) {
        let root = self.project.path();
        fs::write(
            root.join("sources/jhn.source"),
            notebook(&[("JHN 1:1", "In the beginning was the Word.")]),
        )
        .unwrap();
        fs::write(
            root.join("target/JHN.codex"),
            notebook(&[("JHN 1:1", "Au commencement était la Parole.")]),
        )
        .unwrap();
    }

    fn cmd(&self) -> Command {
        let mut cmd = scribe_with_home(self.home.path());
        cmd.current_dir(self.project.path());
        cmd
    }

    fn json(&self, args: &[&str]) -> Value {
        let output = self.cmd().args(args).output().unwrap();
        assert!(output.status.success(), "scribe {args:?} failed");
        serde_json::from_slice(&output.stdout).unwrap()
    }
}

mod init {
    use super::*;

    #[test]
    fn creates_config_file() {
        let home = temp_dir();
        let dir = temp_dir();

        scribe_with_home(home.path())
            .current_dir(dir.path())
            .arg("init")
            .assert()
            .success();

        let contents = fs::read_to_string(dir.path().join(".scribe.toml")).unwrap();
        assert!(contents.contains("root = true"));
        assert!(contents.contains("[search]"));
    }

    #[test]
    fn fails_if_config_exists() {
        let home = temp_dir();
        let dir = temp_dir();
        fs::write(dir.path().join(".scribe.toml"), "existing").unwrap();

        scribe_with_home(home.path())
            .current_dir(dir.path())
            .arg("init")
            .assert()
            .failure()
            .stderr(predicate::str::contains("--force"));
    }

    #[test]
    fn force_overwrites_existing() {
        let home = temp_dir();
        let dir = temp_dir();
        fs::write(dir.path().join(".scribe.toml"), "old content").unwrap();

        scribe_with_home(home.path())
            .current_dir(dir.path())
            .args(["init", "--force"])
            .assert()
            .success();

        let contents = fs::read_to_string(dir.path().join(".scribe.toml")).unwrap();
        assert!(contents.contains("[index]"));
    }

    #[test]
    fn works_with_invalid_existing_config() {
        let home = temp_dir();
        let dir = temp_dir();
        fs::write(dir.path().join(".scribe.toml"), "[broken").unwrap();

        scribe_with_home(home.path())
            .current_dir(dir.path())
            .args(["init", "--force"])
            .assert()
            .success();
    }

    #[test]
    fn global_writes_commented_template_to_home() {
        let home = temp_dir();
        let dir = temp_dir();

        scribe_with_home(home.path())
            .current_dir(dir.path())
            .args(["init", "--global"])
            .assert()
            .success();

        let contents = fs::read_to_string(home.path().join(".scribe.toml")).unwrap();
        assert!(contents.contains("# [search]"));
        assert!(!dir.path().join(".scribe.toml").exists());
    }
}

mod config {
    use super::*;

    #[test]
    fn shows_effective_settings() {
        let project = TestProject::with_config("root = true\n[search]\nlimit = 7\n");

        project
            .cmd()
            .arg("config")
            .assert()
            .success()
            .stdout(predicate::str::contains("limit = 7"))
            .stdout(predicate::str::contains("stemmer = \"none\""));
    }

    #[test]
    fn invalid_config_is_an_error() {
        let project = TestProject::with_config("[search\n");

        project
            .cmd()
            .arg("config")
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to load configuration"));
    }
}

mod status {
    use super::*;

    #[test]
    fn without_config_suggests_init() {
        let home = temp_dir();
        let dir = temp_dir();

        scribe_with_home(home.path())
            .current_dir(dir.path())
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("No configuration files found"));
    }

    #[test]
    fn global_config_is_marked_and_sets_no_root() {
        let home = temp_dir();
        let dir = temp_dir();
        fs::write(home.path().join(".scribe.toml"), "[search]\nlimit = 3\n").unwrap();

        let output = scribe_with_home(home.path())
            .current_dir(dir.path())
            .arg("status")
            .output()
            .unwrap();

        let stdout = strip_ansi(&String::from_utf8_lossy(&output.stdout));
        assert!(stdout.contains(".scribe.toml (global)"));
        let root = dir.path().canonicalize().unwrap();
        assert!(
            stdout.contains(&root.display().to_string())
                || stdout.contains(&dir.path().display().to_string())
        );
    }

    #[test]
    fn lists_notebooks_and_index_sizes() {
        let project = TestProject::new();

        let output = project.cmd().arg("status").output().unwrap();
        assert!(output.status.success());

        let stdout = strip_ansi(&String::from_utf8_lossy(&output.stdout));
        assert!(stdout.contains("sources/en.source"));
        assert!(stdout.contains("target/GEN.codex"));
        assert!(stdout.contains("translation pairs   3"));
        assert!(stdout.contains("No issues found."));
    }

    #[test]
    fn reports_warnings_with_failure() {
        let project = TestProject::with_config("root = true\n[index]\nstemmer = \"elvish\"\n");

        let output = project.cmd().arg("status").output().unwrap();
        assert!(!output.status.success());

        let stdout = strip_ansi(&String::from_utf8_lossy(&output.stdout));
        assert!(stdout.contains("unsupported stemmer language: elvish"));
    }

    #[test]
    fn verbose_logs_to_stderr() {
        let project = TestProject::new();

        let output = project.cmd().args(["-v", "status"]).output().unwrap();
        let stderr = strip_ansi(&String::from_utf8_lossy(&output.stderr));
        assert!(stderr.contains("discovered project files"));
    }
}

mod verse {
    use super::*;

    #[test]
    fn shows_translation() {
        let project = TestProject::new();

        project
            .cmd()
            .args(["verse", "GEN 1:2"])
            .assert()
            .success()
            .stdout(predicate::str::contains("La terre était informe et vide."));
    }

    #[test]
    fn json_includes_provenance() {
        let project = TestProject::new();

        let verse = project.json(&["verse", "GEN 1:3", "--json"]);
        assert_eq!(verse["identifier"], "GEN 1:3");
        assert_eq!(verse["lineNumber"], 2);
        assert!(
            verse["documentUri"]
                .as_str()
                .unwrap()
                .ends_with("target/GEN.codex")
        );
    }

    #[test]
    fn source_flag_shows_versions() {
        let project = TestProject::new();

        let verse = project.json(&["verse", "GEN 1:1", "--source", "--json"]);
        assert_eq!(
            verse["content"],
            "In the beginning God created the heavens and the earth."
        );
        assert_eq!(verse["versions"], serde_json::json!(["en"]));
    }

    #[test]
    fn missing_verse_fails() {
        let project = TestProject::new();

        project
            .cmd()
            .args(["verse", "EXO 1:1"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("not found: EXO 1:1"));
    }
}

mod pair {
    use super::*;

    #[test]
    fn shows_both_sides() {
        let project = TestProject::new();

        let pair = project.json(&["pair", "GEN 1:1", "--json"]);
        assert_eq!(
            pair["sourceVerse"]["content"],
            "In the beginning God created the heavens and the earth."
        );
        assert_eq!(
            pair["targetVerse"]["content"],
            "Au commencement, Dieu créa les cieux et la terre."
        );
    }

    #[test]
    fn partial_identifier_is_not_found() {
        let project = TestProject::new();

        project.cmd().args(["pair", "GEN 1"]).assert().failure();
    }
}

mod search {
    use super::*;

    #[test]
    fn finds_translated_text() {
        let project = TestProject::new();

        let results = project.json(&["search", "terre", "--json"]);
        assert_eq!(results["query"], "terre");
        assert_eq!(results["total_matches"], 2);
    }

    #[test]
    fn respects_limit() {
        let project = TestProject::new();

        let results = project.json(&["search", "la", "-n", "1", "--json"]);
        assert_eq!(results["total_matches"], 1);
    }

    #[test]
    fn reports_no_results() {
        let project = TestProject::new();

        project
            .cmd()
            .args(["search", "zzzzqqq"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No results found."));
    }

    #[test]
    fn json_reports_score_and_terms() {
        let project = TestProject::new();

        let results = project.json(&["search", "terre", "--json"]);
        let first = &results["results"][0];
        assert!(first["score"].as_f64().unwrap() > 0.0);
        assert_eq!(first["terms"], serde_json::json!(["terre"]));
        assert!(first["documentUri"].is_string());
    }

    #[test]
    fn scope_limits_results_to_a_book() {
        let project = TestProject::new();
        project.add_john();

        let all = project.json(&["search", "commencement", "--json"]);
        assert_eq!(all["total_matches"], 2);

        let john = project.json(&["search", "commencement", "--in", "JHN", "--json"]);
        assert_eq!(john["total_matches"], 1);
        assert_eq!(john["results"][0]["identifier"], "JHN 1:1");
    }

    #[test]
    fn malformed_scope_is_an_error() {
        let project = TestProject::new();

        project
            .cmd()
            .args(["search", "terre", "--in", "GEN x"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("scope"));
    }

    #[test]
    fn negative_fuzziness_is_an_error() {
        let project = TestProject::new();

        project
            .cmd()
            .args(["search", "terre", "--fuzziness=-1"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("search failed"));
    }
}

mod source {
    use super::*;

    #[test]
    fn finds_pairs_by_source_text() {
        let project = TestProject::new();

        let results = project.json(&["source", "light", "--json"]);
        let ids: Vec<&str> = results["results"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["identifier"].as_str().unwrap())
            .collect();
        assert!(ids.contains(&"GEN 1:3"));
    }

    #[test]
    fn falls_back_to_any_verses() {
        let project = TestProject::new();

        let results = project.json(&["source", "zzzzqqq", "-n", "2", "--json"]);
        assert_eq!(results["total_matches"], 2);
    }

    #[test]
    fn wildcard_fallback_can_be_disabled() {
        let project =
            TestProject::with_config("root = true\n[search]\nwildcard_fallback = false\n");

        let results = project.json(&["source", "zzzzqqq", "--json"]);
        assert_eq!(results["total_matches"], 0);
    }

    #[test]
    fn scope_applies_to_wildcard_fallback() {
        let project = TestProject::new();
        project.add_john();

        let results = project.json(&["source", "zzzzqqq", "--in", "JHN", "--json"]);
        assert_eq!(results["total_matches"], 1);
        assert_eq!(results["results"][0]["identifier"], "JHN 1:1");
        assert_eq!(results["results"][0]["terms"], serde_json::json!([]));
    }

    #[test]
    fn debug_log_shows_tiers() {
        let project = TestProject::new();

        let output = project
            .cmd()
            .env("SCRIBE_LOG", "debug")
            .args(["source", "zzzzqqq"])
            .output()
            .unwrap();
        let stderr = strip_ansi(&String::from_utf8_lossy(&output.stderr));
        assert!(stderr.contains("wildcard"));
    }

    #[test]
    fn table_output_shows_both_texts() {
        let project = TestProject::new();

        project
            .cmd()
            .args(["source", "beginning"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Au commencement"))
            .stdout(predicate::str::contains("In the beginning"));
    }
}
