use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_command(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_slidev-deck"))
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn create_project(base: &Path) {
    fs::write(base.join("package.json"), "{\"name\": \"deck\"}\n")
        .expect("Failed to write package.json");
}

#[test]
fn test_apply_patch_command() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let base = temp_dir.path();
    create_project(base);
    fs::write(base.join("slides.md"), "---\nsrc: ./slides/001.md\n---\n").unwrap();

    let patch_path = base.join("patch.json");
    fs::write(
        &patch_path,
        r##"{
  "mode": "build",
  "patch": {
    "no": 7,
    "frontmatter": {"layout": "center"},
    "content_md": "# Seven\n",
    "notes_md": "Pause here",
    "assets": [
      {"path": "public/hello.txt", "kind": "text", "text": "hello"},
      {"path": "public/copied.txt", "kind": "copy", "from_path": "does-not-exist.txt"}
    ]
  }
}"##,
    )
    .unwrap();

    let output = run_command(&[
        "apply-patch",
        patch_path.to_str().unwrap(),
        "--project",
        base.to_str().unwrap(),
    ]);

    assert!(output.status.success(), "Command failed: {:?}", output);

    let slide = fs::read_to_string(base.join("slides/007.md")).expect("Slide not written");
    assert_eq!(
        slide,
        "---\nlayout: center\n---\n# Seven\n\n<!--\nPause here\n-->\n"
    );
    assert_eq!(
        fs::read_to_string(base.join("public/hello.txt")).unwrap(),
        "hello"
    );
    assert!(!base.join("public/copied.txt").exists());
    assert_eq!(
        fs::read_to_string(base.join("slides.md")).unwrap(),
        "---\nsrc: ./slides/001.md\n---\n",
        "Manifest must not change"
    );
}

#[test]
fn test_apply_patch_custom_filename() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let base = temp_dir.path();
    create_project(base);

    let patch_path = base.join("patch.json");
    fs::write(
        &patch_path,
        r#"{"no": 3, "filename": "custom.md", "frontmatter": {}, "content_md": "Custom"}"#,
    )
    .unwrap();

    let output = run_command(&[
        "apply-patch",
        patch_path.to_str().unwrap(),
        "-p",
        base.to_str().unwrap(),
    ]);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(base.join("slides/custom.md").exists());
    assert!(!base.join("slides/003.md").exists());
}

#[test]
fn test_apply_patch_rejects_non_project() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let base = temp_dir.path();
    let patch_path = base.join("patch.json");
    fs::write(&patch_path, r#"{"no": 1, "content_md": "x"}"#).unwrap();

    let output = run_command(&[
        "apply-patch",
        patch_path.to_str().unwrap(),
        "--project",
        base.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("No package.json"));
    assert!(!base.join("slides").exists());
}
