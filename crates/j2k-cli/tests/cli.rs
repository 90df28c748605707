//! End-to-end tests for the `j2k` binary.

use assert_cmd::Command;
use std::path::Path;
use tempfile::TempDir;

const UNIT: &str = r#"{
    "name": "Main.java",
    "expressions": [
        {
            "kind": "commented",
            "comments": { "before": ["// entry"] },
            "expr": {
                "kind": "method_call",
                "target": { "kind": "identifier", "name": "foo" },
                "arguments": [{ "kind": "identifier", "name": "x" }],
                "trailing_lambda": { "body": [{ "kind": "identifier", "name": "y" }] }
            }
        }
    ]
}"#;

/// A project directory with an isolated global config home.
fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("xdg")).unwrap();
    dir
}

fn j2k(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("j2k").unwrap();
    cmd.env("XDG_CONFIG_HOME", dir.join("xdg"))
        .env_remove("RUST_LOG")
        .arg("--root")
        .arg(dir);
    cmd
}

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn render_text() {
    let dir = project();
    let file = dir.path().join("main.json");
    std::fs::write(&file, UNIT).unwrap();

    let output = j2k(dir.path()).arg("render").arg(&file).output().unwrap();
    assert!(output.status.success());
    assert_eq!(stdout(&output), "// Main.java\n// entry\nfoo(x) { y }\n");
}

#[test]
fn render_json_without_comments() {
    let dir = project();
    let file = dir.path().join("main.json");
    std::fs::write(&file, UNIT).unwrap();

    let output = j2k(dir.path())
        .args(["render", "--json", "--comments", "discard", "--sequential"])
        .arg(&file)
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value[0]["name"], "Main.java");
    assert_eq!(value[0]["text"], "foo(x) { y }\n");
}

#[test]
fn project_config_applies() {
    let dir = project();
    std::fs::create_dir_all(dir.path().join(".j2k")).unwrap();
    std::fs::write(
        dir.path().join(".j2k/config.toml"),
        "[render]\ncomments = \"discard\"\n",
    )
    .unwrap();
    let file = dir.path().join("main.json");
    std::fs::write(&file, UNIT).unwrap();

    let output = j2k(dir.path()).arg("render").arg(&file).output().unwrap();
    assert_eq!(stdout(&output), "// Main.java\nfoo(x) { y }\n");

    let output = j2k(dir.path()).arg("config").output().unwrap();
    assert!(output.status.success());
    assert!(stdout(&output).contains("comments = \"discard\""));
}

#[test]
fn units_from_several_files_keep_order() {
    let dir = project();
    let first = dir.path().join("a.json");
    let second = dir.path().join("b.json");
    std::fs::write(
        &first,
        r#"{ "units": [
            { "name": "A.java", "expressions": [{ "kind": "literal", "text": "1" }] },
            { "name": "B.java", "expressions": [{ "kind": "literal", "text": "2" }] }
        ] }"#,
    )
    .unwrap();
    std::fs::write(
        &second,
        r#"{ "name": "C.java", "expressions": [{ "kind": "literal", "text": "3" }] }"#,
    )
    .unwrap();

    let output = j2k(dir.path())
        .args(["render", "-j", "2"])
        .arg(&first)
        .arg(&second)
        .output()
        .unwrap();
    assert_eq!(
        stdout(&output),
        "// A.java\n1\n\n// B.java\n2\n\n// C.java\n3\n"
    );
}

#[test]
fn invalid_unit_file_fails() {
    let dir = project();
    let file = dir.path().join("broken.json");
    std::fs::write(&file, "{ \"name\": 3 }").unwrap();

    let output = j2k(dir.path()).arg("render").arg(&file).output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("invalid unit JSON"), "{stderr}");
}
