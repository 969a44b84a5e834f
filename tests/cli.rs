//! Integration tests for top-level CLI behavior.
//!
//! Network-backed commands run against a cassette via `SAHAYATRI_REPLAY`.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde_json::{json, Value};

use sahayatri::cassette::recorder::CassetteRecorder;

fn run_sahayatri(args: &[&str], replay: Option<&Path>) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_sahayatri");
    let mut command = Command::new(bin);
    command
        .args(args)
        .current_dir(std::env::temp_dir())
        .env_remove("SAHAYATRI_RECORD")
        .env_remove("SAHAYATRI_REPLAY")
        .env_remove("SAHAYATRI_LLM_PROVIDER")
        .env_remove("SAHAYATRI_COMMIT_PAGE_SIZE")
        .env_remove("GITHUB_HOST");
    if let Some(path) = replay {
        command.env("SAHAYATRI_REPLAY", path);
    }
    command.output().expect("failed to run sahayatri binary")
}

fn repo() -> Value {
    json!({"owner": "acme", "name": "widgets"})
}

/// Writes a cassette covering one full load plus one answer.
fn cassette(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("sahayatri_cli_{name}"));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("cli.cassette.yaml");

    let mut recorder = CassetteRecorder::new(&path, name, "acme/widgets");
    recorder.record("source", "default_branch", json!({"repo": repo()}), json!({"Ok": "main"}));
    recorder.record(
        "source",
        "tree",
        json!({"repo": repo(), "branch": "main"}),
        json!({"Ok": {
            "entries": [
                {"path": "src/lib.rs", "kind": "blob", "size": 120},
                {"path": "src/widget.rs", "kind": "blob", "size": 80},
                {"path": "docs/guide.md", "kind": "blob", "size": 40}
            ],
            "truncated": false
        }}),
    );
    recorder.record(
        "source",
        "list_commits",
        json!({"repo": repo(), "per_page": 30}),
        json!({"Ok": ["c1"]}),
    );
    recorder.record(
        "source",
        "commit_detail",
        json!({"repo": repo(), "sha": "c1"}),
        json!({"Ok": {
            "sha": "c1aaaaaaaa",
            "message": "Add widget",
            "author": {"login": "arno", "avatar_url": "https://avatars.example.com/a"},
            "timestamp": "2025-03-15T14:30:00Z",
            "files": [{"path": "src/widget.rs", "status": "added", "additions": 80, "deletions": 0}]
        }}),
    );
    recorder.record(
        "llm",
        "complete",
        json!({}),
        json!({"Ok": {"text": "widget.rs sits beside lib.rs in src.", "prompt_tokens": 50, "completion_tokens": 9}}),
    );
    recorder.finish().expect("cassette should be written");
    path
}

#[test]
fn help_shows_usage() {
    let output = run_sahayatri(&["--help"], None);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("graph"));
    assert!(stdout.contains("chat"));
}

#[test]
fn invalid_url_is_rejected() {
    let output = run_sahayatri(&["graph", "not a url"], None);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("Please enter a valid GitHub repository URL"));
}

#[test]
fn node_without_id_shows_error() {
    let output = run_sahayatri(&["node", "https://github.com/acme/widgets"], None);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("<ID>"));
}

#[test]
fn graph_from_cassette() {
    let path = cassette("graph");
    let output = run_sahayatri(&["graph", "https://github.com/acme/widgets"], Some(&path));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.starts_with("acme/widgets\n3 files, 2 directories, 3 edges\n"));
    assert!(stdout.contains("  widget.rs\n"));
}

#[test]
fn graph_json_lists_nodes_and_edges() {
    let path = cassette("graph_json");
    let output =
        run_sahayatri(&["graph", "https://github.com/acme/widgets", "--json"], Some(&path));
    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["nodes"].as_array().unwrap().len(), 5);
    assert_eq!(value["edges"][0], json!({"from": "src", "to": "src/lib.rs"}));
}

#[test]
fn node_shows_relationships() {
    let path = cassette("node");
    let output = run_sahayatri(
        &["node", "https://github.com/acme/widgets", "src/widget.rs"],
        Some(&path),
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("Parents: src/"));
    assert!(stdout.contains("Siblings: src/lib.rs"));
}

#[test]
fn unknown_node_fails() {
    let path = cassette("unknown_node");
    let output =
        run_sahayatri(&["node", "https://github.com/acme/widgets", "src/nope.rs"], Some(&path));
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown node: src/nope.rs"));
}

#[test]
fn commits_filtered_by_path() {
    let path = cassette("commits");
    let output = run_sahayatri(
        &["commits", "https://github.com/acme/widgets", "--path", "WIDGET"],
        Some(&path),
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("arno (1 commit, +80 -0)"));
    assert!(stdout.contains("c1aaaaa 2025-03-15 Add widget"));
}

#[test]
fn ask_prints_answer() {
    let path = cassette("ask");
    let output = run_sahayatri(
        &["ask", "https://github.com/acme/widgets", "How is src laid out?", "--node", "src"],
        Some(&path),
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(stdout.trim(), "widget.rs sits beside lib.rs in src.");
}
