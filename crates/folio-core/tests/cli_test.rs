//! Tests for the `folio` binary: JSON dumps in, JSON out.

use std::io::Write;
use std::process::{Command, Output};

use serde_json::{json, Value};
use tempfile::NamedTempFile;

fn dump() -> NamedTempFile {
    let payload = json!([
        {
            "id": 1,
            "name": "Ada Lovelace's Personal Collection",
            "personal_owner_id": 7,
            "below": ["card"],
            "children": [
                {"id": 10, "name": "Drafts", "location": "/1/", "here": ["card"]}
            ]
        },
        {
            "id": 2,
            "name": "Finance",
            "here": ["dashboard"],
            "below": ["dataset"],
            "children": [
                {"id": 20, "name": "Old", "archived": true, "location": "/2/"},
                {"id": 21, "name": "Reports", "location": "/2/", "here": ["dataset"]}
            ]
        }
    ]);

    let mut file = NamedTempFile::new().expect("create temp file");
    write!(file, "{}", payload).expect("write dump");
    file
}

fn folio(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_folio"))
        .args(args)
        .env_remove("FOLIO_TARGET_MODELS")
        .env_remove("FOLIO_PERSONAL_LABEL")
        .env("RUST_LOG", "off")
        .output()
        .expect("run folio")
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "folio failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn test_tree_command_builds_and_expands() {
    let file = dump();
    let path = file.path().to_str().unwrap();

    let value = stdout_json(&folio(&["tree", "-i", path, "--selected", "10", "--user-id", "7"]));

    assert_eq!(value["empty_state"], false);
    assert_eq!(value["expanded"], json!([1, 10]));
    assert_eq!(value["tree"][0]["name"], "Your personal collection");
    assert_eq!(value["tree"][0]["schemaName"], "Ada Lovelace's Personal Collection");
    assert_eq!(value["tree"][1]["children"].as_array().unwrap().len(), 1);

    let rows = value["rows"].as_array().unwrap();
    let row_ids: Vec<i64> = rows.iter().map(|r| r["id"].as_i64().unwrap()).collect();
    assert_eq!(row_ids, vec![1, 10, 2]);
    assert_eq!(rows[1]["selected"], true);
    assert_eq!(rows[1]["depth"], 1);
}

#[test]
fn test_tree_command_filters_models() {
    let file = dump();
    let path = file.path().to_str().unwrap();

    let value = stdout_json(&folio(&["tree", "-i", path, "--models", "dashboard"]));
    let tree = value["tree"].as_array().unwrap();
    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0]["id"], 2);
    assert_eq!(tree[0]["children"], json!([]));

    let value = stdout_json(&folio(&["tree", "-i", path, "--models", "pulse"]));
    assert_eq!(value["empty_state"], true);
    assert_eq!(value["rows"], Value::Null);
}

#[test]
fn test_path_command() {
    let file = dump();
    let path = file.path().to_str().unwrap();

    let value = stdout_json(&folio(&["path", "-i", path, "--target", "21"]));
    assert_eq!(value["path"], json!([2, 21]));

    let value = stdout_json(&folio(&["path", "-i", path, "--target", "99"]));
    assert_eq!(value["path"], Value::Null);
}

#[test]
fn test_ancestry_command() {
    let file = dump();
    let path = file.path().to_str().unwrap();

    let value = stdout_json(&folio(&["ancestry", "-i", path, "--id", "10"]));
    assert_eq!(value["non_root_parent_id"], 1);
    assert_eq!(value["immediate_parent_id"], 1);
    assert_eq!(value["is_personal_collection_child"], true);

    let value = stdout_json(&folio(&["ancestry", "-i", path, "--id", "21"]));
    assert_eq!(value["is_personal_collection_child"], false);
}

#[test]
fn test_ancestry_command_unresolvable_parent() {
    let mut file = NamedTempFile::new().expect("create temp file");
    let payload = json!([
        {"id": 1, "name": "Ada's", "personal_owner_id": 7},
        {"id": 30, "name": "Broken", "location": "/1/abc/"}
    ]);
    write!(file, "{}", payload).expect("write dump");

    let value = stdout_json(&folio(&["ancestry", "-i", file.path().to_str().unwrap(), "--id", "30"]));
    assert_eq!(value["non_root_parent_id"], 1);
    assert_eq!(value["immediate_parent_id"], Value::Null);
    assert_eq!(value["non_root_ancestor_ids"], json!([1]));
}

#[test]
fn test_personal_command_honors_label_override() {
    let file = dump();
    let path = file.path().to_str().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_folio"))
        .args(["personal", "-i", path, "-u", "7"])
        .env("FOLIO_PERSONAL_LABEL", "Ma collection")
        .env("RUST_LOG", "off")
        .output()
        .expect("run folio");
    let value = stdout_json(&output);

    assert_eq!(value[0]["name"], "Ma collection");
    assert_eq!(value[0]["originalName"], "Ada Lovelace's Personal Collection");
}

#[test]
fn test_validate_command_reports_stale_below() {
    let file = dump();
    let path = file.path().to_str().unwrap();
    let value = stdout_json(&folio(&["validate", "-i", path]));
    assert_eq!(value["valid"], true);

    let mut stale = NamedTempFile::new().expect("create temp file");
    let payload = json!([
        {
            "id": 5,
            "name": "Stale",
            "below": ["dashboard"],
            "children": [{"id": 6, "name": "Cards", "here": ["card"]}]
        }
    ]);
    write!(stale, "{}", payload).expect("write dump");

    let value = stdout_json(&folio(&["validate", "-i", stale.path().to_str().unwrap()]));
    assert_eq!(value["valid"], false);
    assert_eq!(value["violations"], json!([5]));
}

#[test]
fn test_missing_input_fails() {
    let output = folio(&["tree", "-i", "/nonexistent/collections.json"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error"));
}

#[test]
fn test_invalid_collection_id_rejected() {
    let file = dump();
    let path = file.path().to_str().unwrap();

    let output = folio(&["path", "-i", path, "--target", "abc"]);
    assert!(!output.status.success());
}
