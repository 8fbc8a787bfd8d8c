use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

fn run_command(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_slidev-deck"))
        .args(args)
        .env_remove("SLIDEV_DECK_SCHEMA_DIR")
        .output()
        .expect("Failed to execute command")
}

fn write_json(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Failed to write JSON file");
    path.to_str().unwrap().to_string()
}

#[test]
fn test_validate_wrapped_deck() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let file = write_json(
        &temp_dir,
        "deck.json",
        r##"{"mode": "build", "deck": {"headmatter": {"title": "Demo"}, "slides": [{"no": 1, "frontmatter": {}, "content_md": "# Hi"}]}}"##,
    );

    let output = run_command(&["validate", &file]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("Validating against DeckSpec"));
    assert!(stdout.contains("Validation successful."));
    assert!(!stdout.contains("Warning"), "Unexpected warning: {}", stdout);
}

#[test]
fn test_validate_unwrapped_deck_warns() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let file = write_json(
        &temp_dir,
        "raw.json",
        r#"{"headmatter": {}, "slides": [{"no": 1, "content_md": "x"}]}"#,
    );

    let output = run_command(&["validate", &file]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("Warning: Document has no 'deck' wrapper"));
}

#[test]
fn test_validate_unknown_shape_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let file = write_json(&temp_dir, "other.json", r#"{"title": "no idea"}"#);

    let output = run_command(&["validate", &file]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("'deck' or 'patch'"), "stderr: {}", stderr);
}

#[test]
fn test_validate_schema_violation_reports_path() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let file = write_json(
        &temp_dir,
        "patch.json",
        r#"{"mode": "build", "patch": {"no": 0, "content_md": "x"}}"#,
    );

    let output = run_command(&["validate", &file]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("$.patch.no"), "stderr: {}", stderr);
}

#[test]
fn test_validate_from_stdin_with_forced_schema() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_slidev-deck"))
        .args(["validate", "--stdin", "--schema", "patch"])
        .env_remove("SLIDEV_DECK_SCHEMA_DIR")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn command");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(br#"{"patch": {"no": 4, "content_md": "hello"}}"#)
        .unwrap();
    let output = child.wait_with_output().expect("Failed to wait for command");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("Validating against SlidePatch"));
    assert!(stdout.contains("'mode' is missing"));
}

#[test]
fn test_validate_without_input_is_usage_error() {
    let output = run_command(&["validate"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("--stdin"));
}

#[test]
fn test_validate_malformed_json() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let file = write_json(&temp_dir, "broken.json", "{ nope");
    let output = run_command(&["validate", &file]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid JSON"));
}
