use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

fn wordgrid(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_wordgrid"))
        .args(args)
        .output()
        .expect("Failed to execute wordgrid")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// The JSON line printed after "Dump:".
fn extract_dump(stdout: &str) -> String {
    let mut lines = stdout.lines();
    lines
        .by_ref()
        .find(|line| line.starts_with("Dump:"))
        .expect("no dump header in output");
    lines.next().expect("no dump after header").to_string()
}

#[test]
fn test_generate_single_word() {
    let output = wordgrid(&[
        "generate", "-W", "5", "-H", "5", "-j", "2", "--seed", "1", "--timeout", "30", "cat",
    ]);

    let out = stdout(&output);
    assert!(
        output.status.success(),
        "Command failed with status: {:?}\nstderr: {}\nstdout: {}",
        output.status,
        stderr(&output),
        out
    );
    assert!(out.contains("Generating a 5x5 board for 1 words with 2 workers"));
    assert!(out.contains("Completed after"));
    assert!(out.contains("Board:"));
    assert!(out.contains("+---+---+---+---+---+"));

    let dump = extract_dump(&out);
    assert!(dump.contains(r#""word":"cat""#));

    // The produced dump must validate on its own.
    let check = wordgrid(&["validate", "--dump", &dump]);
    assert!(check.status.success(), "stdout: {}", stdout(&check));
    assert!(stdout(&check).contains("Valid: every word appears exactly once."));
}

#[test]
fn test_generate_rejects_oversized_words() {
    let output = wordgrid(&["generate", "-W", "2", "-H", "2", "hello"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("total length of words (5) is bigger than the board's capacity (4)"));
    assert!(!stdout(&output).contains("Generating"));
}

#[test]
fn test_generate_rejects_oversized_board() {
    let output = wordgrid(&["generate", "-W", "11", "-H", "2", "hi"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("out of range"));
}

#[test]
fn test_generate_times_out_on_hopeless_input() {
    // Two identical one-letter words can never be told apart.
    let output = wordgrid(&[
        "generate", "-W", "2", "-H", "1", "-j", "1", "--timeout", "1", "a", "a",
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("No unambiguous board found"));
}

#[test]
fn test_validate_reports_ambiguous_dump() {
    let dump = r#"{"width":3,"height":3,"rows":[["c","a","t"],[null,null,null],["c","a","t"]],"words":[{"word":"cat","path":[[0,0],[1,0],[2,0]]}]}"#;
    let output = wordgrid(&["validate", "--dump", dump]);

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("Ambiguous: \"cat\""));
    assert!(out.contains("| c | a | t |"));
}

#[test]
fn test_validate_accepts_diagonal_retraversal() {
    let dump = r#"{"width":3,"height":3,"rows":[["A",null,null],[null,"A",null],[null,null,"A"]],"words":[{"word":"AAA","path":[[0,0],[1,1],[2,2]]}]}"#;
    let output = wordgrid(&["validate", "--dump", dump]);

    assert!(output.status.success(), "stdout: {}", stdout(&output));
}

#[test]
fn test_validate_rejects_malformed_dump() {
    let output = wordgrid(&["validate", "--dump", r#"{"width":2}"#]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Error:"));

    let mismatched = r#"{"width":2,"height":1,"rows":[["a","b"]],"words":[{"word":"ba","path":[[0,0],[1,0]]}]}"#;
    let output = wordgrid(&["validate", "--dump", mismatched]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("malformed dump"));
}

#[test]
fn test_validate_from_file() {
    let dump = r#"{"width":2,"height":2,"rows":[["h","i"],[null,null]],"words":[{"word":"hi","path":[[0,0],[1,0]]}]}"#;
    let path: PathBuf =
        std::env::temp_dir().join(format!("wordgrid_dump_{}.json", std::process::id()));
    fs::write(&path, dump).expect("Failed to write dump file");

    let output = wordgrid(&["validate", "--file", path.to_str().unwrap()]);
    let _ = fs::remove_file(&path);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Valid"));
}

#[test]
fn test_validate_missing_file() {
    let output = wordgrid(&["validate", "--file", "/nonexistent/wordgrid/dump.json"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("could not read dump"));
}
