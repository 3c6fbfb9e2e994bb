use std::process::Command;

#[test]
fn cli_compiles_without_warnings() {
    let status = Command::new(env!("CARGO"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(["check", "--quiet", "--bin", "word-defence"])
        .status()
        .expect("failed to invoke cargo check for word-defence CLI binary");

    assert!(status.success(), "cargo check --bin word-defence should succeed");
}

#[test]
fn cli_prints_output_with_word_lengths_preserved() {
    let output = Command::new(env!("CARGO_BIN_EXE_word-defence"))
        .args(["--text", "a bb", "--seed", "7", "--board"])
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run word-defence");

    assert!(output.status.success(), "word-defence should exit cleanly");
    let stdout = String::from_utf8(output.stdout).expect("utf-8 output");
    let mut lines = stdout.lines();

    let delivered: Vec<usize> = lines
        .next()
        .expect("output line")
        .split(' ')
        .map(|word| word.chars().count())
        .collect();
    assert_eq!(delivered, vec![1, 2]);

    let summary = stdout
        .lines()
        .find(|line| line.starts_with("score="))
        .expect("summary line");
    assert!(summary.contains("delivered=2"), "{summary}");
    assert!(stdout.contains('H'), "board shows the hub");
}
