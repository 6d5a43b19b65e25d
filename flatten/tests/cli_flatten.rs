//! CLI tests for the `flatten` binary.
//!
//! Spawns the binary in a temporary project and verifies the artifact,
//! the overwrite confirmation, and exit codes.

use std::io::Write;
use std::process::{Command, Output, Stdio};

use flatten::config::DEFAULT_OUTPUT_FILE;
use flatten::exit_codes;
use flatten::test_support::TestTree;

fn flatten_with_stdin(tree: &TestTree, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_flatten"))
        .current_dir(tree.path())
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn flatten");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(stdin.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("flatten output")
}

fn sample_project() -> TestTree {
    let tree = TestTree::new().expect("tree");
    tree.write("src/app.ts", "export const app = 1;").expect("write");
    tree.write("src/app.test.ts", "test('app');\n").expect("write");
    tree.write("node_modules/x/index.js", "module.exports = 1;\n")
        .expect("write");
    tree.write(".git/HEAD", "ref: refs/heads/main\n").expect("write");
    tree.write("package-lock.json", "{}\n").expect("write");
    tree.write("README.md", "# Readme\n").expect("write");
    tree
}

#[test]
fn zero_args_writes_artifact_in_cwd() {
    let tree = sample_project();

    let output = flatten_with_stdin(&tree, &[], "");
    assert_eq!(output.status.code(), Some(exit_codes::OK));

    let rule = "=".repeat(80);
    let expected = format!(
        "{rule}\nFLATTENED CODEBASE\n{rule}\n\n\
         --- START OF FILE: README.md ---\n# Readme\n--- END OF FILE: README.md ---\n\n\
         --- START OF FILE: src/app.test.ts ---\ntest('app');\n--- END OF FILE: src/app.test.ts ---\n\n\
         --- START OF FILE: src/app.ts ---\nexport const app = 1;\n--- END OF FILE: src/app.ts ---\n\n"
    );
    assert_eq!(tree.read(DEFAULT_OUTPUT_FILE).expect("artifact"), expected);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Found 3 files to process"));
    assert!(stdout.contains("Successfully processed 3 files"));
    assert!(!stdout.contains("Skipped"));
}

#[test]
fn declining_overwrite_leaves_artifact_unchanged() {
    let tree = sample_project();
    tree.write(DEFAULT_OUTPUT_FILE, b"previous \xFF bytes").expect("write");

    let output = flatten_with_stdin(&tree, &[], "n\n");
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Cancelled."));

    let bytes = std::fs::read(tree.path().join(DEFAULT_OUTPUT_FILE)).expect("read");
    assert_eq!(bytes, b"previous \xFF bytes");
}

#[test]
fn confirming_overwrite_replaces_artifact() {
    let tree = sample_project();
    tree.write(DEFAULT_OUTPUT_FILE, "stale").expect("write");

    let output = flatten_with_stdin(&tree, &[], "y\n");
    assert_eq!(output.status.code(), Some(exit_codes::OK));

    let artifact = tree.read(DEFAULT_OUTPUT_FILE).expect("artifact");
    assert!(artifact.starts_with(&"=".repeat(80)));
    assert!(!artifact.contains("stale"));
    assert!(!artifact.contains(&format!("START OF FILE: {DEFAULT_OUTPUT_FILE}")));
}

#[test]
fn yes_flag_skips_prompt() {
    let tree = sample_project();
    tree.write(DEFAULT_OUTPUT_FILE, "stale").expect("write");

    let output = flatten_with_stdin(&tree, &["--yes"], "");
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert!(!String::from_utf8_lossy(&output.stdout).contains("Continue?"));
    assert!(
        tree.read(DEFAULT_OUTPUT_FILE)
            .expect("artifact")
            .contains("--- START OF FILE: README.md ---")
    );
}

#[test]
fn latin1_file_is_decoded_not_sentinel() {
    let tree = TestTree::new().expect("tree");
    tree.write("notes.md", b"caf\xE9\n").expect("write");

    let output = flatten_with_stdin(&tree, &[], "");
    assert_eq!(output.status.code(), Some(exit_codes::OK));

    let artifact = tree.read(DEFAULT_OUTPUT_FILE).expect("artifact");
    assert!(
        artifact.contains("--- START OF FILE: notes.md ---\ncafé\n--- END OF FILE: notes.md ---")
    );
    assert!(!artifact.contains("[ERROR:"));
}

#[test]
fn config_and_output_flags_apply() {
    let tree = TestTree::new().expect("tree");
    tree.write("src/main.rs", "fn main() {}\n").expect("write");
    tree.write("src/app.ts", "ignored\n").expect("write");
    tree.write("target/debug/build.rs", "ignored\n").expect("write");
    tree.write(
        "flatten.toml",
        "ignored_dirs = [\"target\"]\nincluded_extensions = [\".rs\"]\n",
    )
    .expect("write");

    let output = flatten_with_stdin(
        &tree,
        &["--config", "flatten.toml", "--output", "rust.txt"],
        "",
    );
    assert_eq!(output.status.code(), Some(exit_codes::OK));

    let artifact = tree.read("rust.txt").expect("artifact");
    assert!(artifact.contains("--- START OF FILE: src/main.rs ---"));
    assert!(!artifact.contains("app.ts"));
    assert!(!artifact.contains("target/"));
}

#[test]
fn invalid_config_fails_without_artifact() {
    let tree = sample_project();
    tree.write("flatten.toml", "included_extensions = [\"rs\"]\n")
        .expect("write");

    let output = flatten_with_stdin(&tree, &["--config", "flatten.toml"], "");
    assert_eq!(output.status.code(), Some(exit_codes::FAILED));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error:"));
    assert!(!tree.path().join(DEFAULT_OUTPUT_FILE).exists());
}
