//! End-to-end tests of the `bsn` binary in a scratch project directory.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const DOC: &str = r#"{
    "accounts": {
        "GALICE0000000000000000000000000000000000000000000000000ALCE": {
            "profile": { "Name": ["Alice"] },
            "balances": { "EURMTL": "1500" },
            "tags": { "Trust": ["GBOB00000000000000000000000000000000000000000000000000BOB0"] }
        },
        "GBOB00000000000000000000000000000000000000000000000000BOB0": {
            "tags": { "Trust": ["GALICE0000000000000000000000000000000000000000000000000ALCE"] }
        }
    }
}"#;

const ALICE: &str = "GALICE0000000000000000000000000000000000000000000000000ALCE";

fn bsn(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bsn"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    assert!(bsn(dir.path(), &["init"]).status.success());
    std::fs::write(dir.path().join("bsn.json"), DOC).unwrap();
    dir
}

#[test]
fn init_writes_config_and_state() {
    let dir = project();
    assert!(dir.path().join("bsn.toml").exists());
    assert!(dir.path().join(".bsn").join("state.json").exists());
}

#[test]
fn accounts_lists_by_rating() {
    let dir = project();
    let out = bsn(dir.path(), &["accounts"]);
    assert!(out.status.success());
    let text = stdout(&out);
    let alice = text.find("Alice").unwrap();
    let bob = text.find("GBOB").unwrap();
    assert!(alice < bob);
}

#[test]
fn graph_json_uses_me_as_center() {
    let dir = project();
    assert!(bsn(dir.path(), &["me", "set", ALICE]).status.success());

    let out = bsn(dir.path(), &["graph", "--json"]);
    assert!(out.status.success());
    let graph: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(graph["center"], ALICE);
    assert_eq!(graph["nodes"][0]["x"], 600.0);
    assert_eq!(graph["edges"][0]["bidirectional"], true);
}

#[test]
fn graph_without_center_fails() {
    let dir = project();
    let out = bsn(dir.path(), &["graph"]);
    assert!(!out.status.success());
}

#[test]
fn favorites_persist_between_runs() {
    let dir = project();
    assert!(bsn(dir.path(), &["favorite", "toggle", ALICE]).status.success());

    let out = bsn(dir.path(), &["accounts", "--favorites"]);
    let text = stdout(&out);
    assert!(text.contains("Alice"));
    assert!(!text.contains("GBOB"));
}

#[test]
fn missing_document_is_reported() {
    let dir = TempDir::new().unwrap();
    let out = bsn(dir.path(), &["accounts"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("No directory document"));
}

#[test]
fn commands_work_from_a_subdirectory() {
    let dir = project();
    let sub = dir.path().join("notes").join("drafts");
    std::fs::create_dir_all(&sub).unwrap();

    let out = bsn(&sub, &["accounts"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(stdout(&out).contains("Alice"));

    assert!(bsn(&sub, &["favorite", "toggle", ALICE]).status.success());
    assert!(!sub.join(".bsn").exists());
    let state = std::fs::read_to_string(dir.path().join(".bsn").join("state.json")).unwrap();
    assert!(state.contains(ALICE));
}
