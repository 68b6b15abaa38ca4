use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

#[allow(deprecated)]
fn carte(workdir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("carte").expect("binary");
    cmd.current_dir(workdir).env_remove("CARTE_CONFIG");
    cmd
}

fn setup() -> TempDir {
    let temp = tempdir().unwrap();
    fs::write(
        temp.path().join("menu.json"),
        r#"{
          "entries": [
            {"title": "Define", "itemId": 1, "order": 0},
            {"title": "Copy", "itemId": 2, "order": 1},
            {"title": "Share", "itemId": 3, "order": 2},
            {"title": "Translate", "itemId": 4, "order": 3,
             "destination": {"component": {"package": "com.google.android.apps.translate", "class": "CopyDrop"}}}
          ]
        }"#,
    )
    .unwrap();
    temp
}

fn apply_json(workdir: &Path, extra: &[&str]) -> Value {
    let output = carte(workdir)
        .args(["apply", "--menu", "menu.json", "--json"])
        .args(extra)
        .output()
        .expect("command run");
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).expect("valid json")
}

fn titles(body: &Value) -> Vec<String> {
    body["menu"]["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["title"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[test]
fn default_prints_builtin_configuration() {
    let temp = tempdir().unwrap();
    let output = carte(temp.path()).arg("default").output().unwrap();
    assert!(output.status.success());

    let body: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["items"][0]["key"], "Copy");
    assert_eq!(body["hiddenItems"], serde_json::json!(["AI Writer", "Define"]));
    assert_eq!(body["isDebug"], true);
}

#[test]
fn validate_reports_offending_field() {
    let temp = tempdir().unwrap();
    fs::write(
        temp.path().join("bad.json"),
        r#"{"items": [{"key": "", "customLabel": "x"}]}"#,
    )
    .unwrap();
    fs::write(
        temp.path().join("good.json"),
        r#"{"items": [{"key": "Copy", "customLabel": "复制"}], "hiddenItems": ["Define"]}"#,
    )
    .unwrap();

    carte(temp.path())
        .args(["validate", "bad.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("items[0].key"));

    carte(temp.path())
        .args(["validate", "good.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 rules, 1 hidden items"));
}

#[test]
fn apply_without_config_uses_builtin() {
    let temp = setup();
    let body = apply_json(temp.path(), &["--installed", "com.google.android.apps.translate"]);

    assert_eq!(body["outcome"], "applied");
    assert_eq!(titles(&body), vec!["复制", "分享", "谷歌翻译"]);
    assert_eq!(
        body["menu"]["entries"][2]["icon"],
        serde_json::json!({"kind": "application", "value": "com.google.android.apps.translate"})
    );
    assert!(!temp.path().join("carte.json").exists());
}

#[test]
fn apply_json_keeps_trace_on_stderr() {
    let temp = setup();
    let output = carte(temp.path())
        .env_remove("RUST_LOG")
        .args(["apply", "--menu", "menu.json", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Before:"), "stderr: {stderr}");
    assert!(stderr.contains("After: [复制, 分享, 谷歌翻译]"), "stderr: {stderr}");
    assert!(!stderr.contains("Kept 3 entries"), "stderr: {stderr}");

    let body: Value = serde_json::from_slice(&output.stdout).expect("stdout is pure json");
    assert_eq!(body["outcome"], "applied");
}

#[test]
fn edits_are_picked_up_by_apply() {
    let temp = setup();

    carte(temp.path())
        .args(["rule", "add", "--key", "Translate", "--label", "翻译"])
        .assert()
        .success();
    carte(temp.path()).args(["hide", "Share"]).assert().success();
    carte(temp.path())
        .args([
            "rule",
            "remove",
            "--key",
            "Translate",
            "--package",
            "com.google.android.apps.translate",
        ])
        .assert()
        .success();

    let body = apply_json(temp.path(), &[]);
    assert_eq!(titles(&body), vec!["复制", "翻译"]);

    carte(temp.path()).args(["unhide", "Share"]).assert().success();
    let body = apply_json(temp.path(), &[]);
    assert_eq!(titles(&body), vec!["复制", "分享", "翻译"]);
}

#[test]
fn disabled_rule_hides_entry() {
    let temp = setup();
    carte(temp.path())
        .args(["rule", "add", "--key", "Copy", "--label", "复制", "--disabled"])
        .assert()
        .success();

    let body = apply_json(temp.path(), &[]);
    assert!(!titles(&body).contains(&"复制".to_string()));
    assert!(!titles(&body).contains(&"Copy".to_string()));
}

#[test]
fn config_env_var_selects_file() {
    let temp = setup();
    fs::write(
        temp.path().join("custom.json"),
        r#"{"items": [{"key": "Share", "customLabel": "Send"}]}"#,
    )
    .unwrap();

    let output = carte(temp.path())
        .env("CARTE_CONFIG", temp.path().join("custom.json"))
        .args(["apply", "--menu", "menu.json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "0. Send  [ic_menu_share]",
            "1. Define",
            "2. Copy  [ic_menu_save]",
            "3. Translate",
        ]
    );
}

#[test]
fn corrupt_config_is_not_overwritten_by_edits() {
    let temp = setup();
    fs::write(temp.path().join("carte.json"), "{oops").unwrap();

    carte(temp.path())
        .args(["hide", "Copy"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Refusing to edit"));
    assert_eq!(fs::read_to_string(temp.path().join("carte.json")).unwrap(), "{oops");

    // The engine itself still falls back to the default.
    let body = apply_json(temp.path(), &[]);
    assert_eq!(titles(&body), vec!["复制", "分享", "谷歌翻译"]);
}

#[test]
fn debug_toggle_persists() {
    let temp = setup();
    carte(temp.path()).args(["debug", "off"]).assert().success();

    let output = carte(temp.path()).arg("show").output().unwrap();
    let body: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["isDebug"], false);
    assert_eq!(body["items"][0]["key"], "Copy");
}
