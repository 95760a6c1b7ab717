//! E2E tests for `deprank rank`, `deprank layers` and `deprank cycles`.
//!
//! Covers every input format, stdin input, text + JSON output, and the
//! strict vs lenient handling of undeclared dependencies.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Seven nodes with one cycle (`a3` ⇄ `a4`).
const MIXED_YAML: &str = "\
main: [a4, a1, b2]
a2: [a1]
a1: []
b2: [b1, a2]
b1: []
a3: [b2, b1, a4]
a4: [a3]
";

const FIREFOX_JSON: &str = r#"{
  "firefox": ["libgtk", "libc"],
  "libgtk": ["libglib", "libc"],
  "libglib": ["libc"],
  "libc": []
}"#;

const DIAMOND_TOML: &str = r#"
app = ["net", "fs"]
net = ["core"]
fs = ["core"]
core = []
"#;

fn deprank_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("deprank"));
    cmd.current_dir(dir);
    // Keep the user's own config out of the picture.
    cmd.env("HOME", dir);
    cmd.env("XDG_CONFIG_HOME", dir.join(".config"));
    cmd.env("DEPRANK_LOG", "error");
    cmd.env_remove("FORMAT");
    cmd
}

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write input");
    path
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().expect("deprank should not crash");
    assert!(
        output.status.success(),
        "deprank failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("utf8 stdout")
}

fn json_of(cmd: &mut Command) -> Value {
    serde_json::from_str(&stdout_of(cmd)).expect("valid JSON")
}

// ---------------------------------------------------------------------------
// rank
// ---------------------------------------------------------------------------

#[test]
fn rank_yaml_prints_levels_in_dependency_order() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_file(&dir, "deps.yaml", MIXED_YAML);

    let out = stdout_of(deprank_cmd(dir.path()).arg("rank").arg(&input));
    assert_eq!(
        out,
        "0\tmain\n2\ta3\n1\ta4\n1\tb2\n2\tb1\n2\ta2\n3\ta1\n"
    );
}

#[test]
fn rank_json_output_carries_rank_and_cycle_flags() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_file(&dir, "deps.yml", MIXED_YAML);

    let json = json_of(
        deprank_cmd(dir.path())
            .args(["rank", "--format", "json"])
            .arg(&input),
    );

    assert_eq!(json["cycle_count"], 1);
    let nodes = json["nodes"].as_array().expect("nodes array");
    assert_eq!(nodes.len(), 7);
    assert_eq!(nodes[0]["name"], "main");
    assert_eq!(nodes[0]["level"], 0);
    assert_eq!(nodes[1]["name"], "a3");
    assert_eq!(nodes[1]["in_cycle"], true);
    assert_eq!(nodes[2]["name"], "a4");
    assert_eq!(nodes[1]["rank"], nodes[2]["rank"]);
    assert_eq!(nodes[6]["name"], "a1");
    assert_eq!(nodes[6]["in_cycle"], false);
}

#[test]
fn rank_reverse_gives_build_order() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_file(&dir, "deps.json", FIREFOX_JSON);

    let out = stdout_of(deprank_cmd(dir.path()).args(["rank", "--reverse"]).arg(&input));
    assert_eq!(out, "0\tlibc\n1\tlibglib\n2\tlibgtk\n3\tfirefox\n");
}

#[test]
fn rank_reads_json_from_stdin() {
    let dir = TempDir::new().expect("tempdir");

    let out = stdout_of(
        deprank_cmd(dir.path())
            .args(["rank", "-"])
            .write_stdin(FIREFOX_JSON),
    );
    assert_eq!(out, "0\tfirefox\n1\tlibgtk\n2\tlibglib\n3\tlibc\n");
}

#[test]
fn rank_pretty_output_has_sections() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_file(&dir, "deps.json", FIREFOX_JSON);

    deprank_cmd(dir.path())
        .args(["rank", "--format", "pretty"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Dependency order"))
        .stdout(predicate::str::contains("level 3   libc"))
        .stdout(predicate::str::contains("cycles:      0"));
}

#[test]
fn rank_empty_map_prints_nothing() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_file(&dir, "deps.json", "{}");

    let out = stdout_of(deprank_cmd(dir.path()).arg("rank").arg(&input));
    assert!(out.is_empty());
}

// ---------------------------------------------------------------------------
// Undeclared dependencies
// ---------------------------------------------------------------------------

#[test]
fn undeclared_dependency_fails_by_default() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_file(&dir, "deps.json", r#"{"main": ["lib", "ghost"], "lib": []}"#);

    deprank_cmd(dir.path())
        .arg("rank")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("undeclared node `ghost`"));
}

#[test]
fn append_missing_adds_undeclared_nodes_last() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_file(&dir, "deps.json", r#"{"main": ["lib", "ghost"], "lib": []}"#);

    let out = stdout_of(
        deprank_cmd(dir.path())
            .args(["rank", "--append-missing"])
            .arg(&input),
    );
    assert_eq!(out, "0\tmain\n1\tlib\n1\tghost\n");
}

#[test]
fn duplicate_keys_are_rejected() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_file(&dir, "deps.json", r#"{"a": [], "a": []}"#);

    deprank_cmd(dir.path())
        .arg("rank")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("declared more than once"));
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_file(&dir, "deps.txt", "{}");

    deprank_cmd(dir.path())
        .arg("rank")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot tell the format"));
}

#[test]
fn missing_file_names_the_path() {
    let dir = TempDir::new().expect("tempdir");

    deprank_cmd(dir.path())
        .args(["rank", "nowhere.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nowhere.yaml"));
}

// ---------------------------------------------------------------------------
// layers
// ---------------------------------------------------------------------------

#[test]
fn layers_toml_groups_by_level() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_file(&dir, "deps.toml", DIAMOND_TOML);

    let out = stdout_of(deprank_cmd(dir.path()).arg("layers").arg(&input));
    assert_eq!(out, "0\tapp\n1\tnet\tfs\n2\tcore\n");
}

#[test]
fn layers_json_lists_levels_and_names() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_file(&dir, "deps.toml", DIAMOND_TOML);

    let json = json_of(deprank_cmd(dir.path()).args(["layers", "--json"]).arg(&input));
    let layers = json["layers"].as_array().expect("layers array");
    assert_eq!(layers.len(), 3);
    assert_eq!(layers[1]["level"], 1);
    assert_eq!(layers[1]["nodes"], serde_json::json!(["net", "fs"]));
}

// ---------------------------------------------------------------------------
// cycles
// ---------------------------------------------------------------------------

#[test]
fn cycles_reports_groups_and_self_loops() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_file(
        &dir,
        "deps.yaml",
        "a: [b]\nb: [c]\nc: [a]\ngen: [gen]\nleaf: []\n",
    );

    let json = json_of(deprank_cmd(dir.path()).args(["cycles", "--json"]).arg(&input));
    assert_eq!(json["cycles"], serde_json::json!([["a", "b", "c"]]));
    assert_eq!(json["self_loops"], serde_json::json!(["gen"]));

    let text = stdout_of(deprank_cmd(dir.path()).arg("cycles").arg(&input));
    assert_eq!(text, "cycle\ta\tb\tc\nself-loop\tgen\n");
}

#[test]
fn cycles_pretty_on_acyclic_map() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_file(&dir, "deps.json", FIREFOX_JSON);

    deprank_cmd(dir.path())
        .env("FORMAT", "pretty")
        .arg("cycles")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("No dependency cycles found."));
}

#[test]
fn cyclic_map_still_ranks_with_a_warning() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_file(&dir, "deps.yaml", "a: [b]\nb: [a]\n");

    deprank_cmd(dir.path())
        .env("DEPRANK_LOG", "warn")
        .arg("rank")
        .arg(&input)
        .assert()
        .success()
        .stdout("2\ta\n1\tb\n")
        .stderr(predicate::str::contains("dependency graph has cycles"));
}
