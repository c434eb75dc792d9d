/// Smoke tests to verify the binary runs without panicking
use std::process::Command;

fn lifeterm(args: &[&str]) -> std::process::Output {
    Command::new("cargo")
        .args(["run", "--quiet", "--"])
        .args(args)
        .output()
        .expect("Failed to execute cargo run")
}

#[test]
fn binary_shows_help() {
    let output = lifeterm(&["--help"]);

    assert!(
        output.status.success(),
        "Binary failed to run --help: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("lifeterm"), "Help output should mention lifeterm");
}

#[test]
fn binary_shows_version() {
    let output = lifeterm(&["--version"]);

    assert!(
        output.status.success(),
        "Binary failed to run --version: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn invalid_subcommand_fails_gracefully() {
    let output = lifeterm(&["nonexistent-command"]);

    assert!(
        !output.status.success(),
        "Invalid subcommand should return error status"
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        !stderr.contains("panicked at"),
        "Invalid subcommand should not cause panic"
    );
}

#[test]
fn lists_patterns() {
    let output = lifeterm(&["patterns"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("glider"));
    assert!(stdout.contains("gosper-gun"));
}

#[test]
fn print_mode_renders_a_frame() {
    let output = lifeterm(&[
        "run", "--print", "--rows", "10", "--cols", "20", "--seed", "7", "--generations", "5",
    ]);
    assert!(
        output.status.success(),
        "print mode failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Seed 7 | Gen 5"));
    assert_eq!(stdout.lines().count(), 11);
}

#[test]
fn unknown_pattern_is_an_error_not_a_panic() {
    let output = lifeterm(&["run", "--print", "--pattern", "no-such-thing"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown pattern"));
    assert!(!stderr.contains("panicked at"));
}
