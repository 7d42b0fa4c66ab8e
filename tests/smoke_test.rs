/// Smoke tests to verify the binary runs without panicking
use std::process::Command;

fn netglobe() -> Command {
    Command::new(env!("CARGO_BIN_EXE_netglobe"))
}

#[test]
fn binary_shows_help() {
    let output = netglobe()
        .arg("--help")
        .output()
        .expect("Failed to execute netglobe");

    assert!(
        output.status.success(),
        "Binary failed to run --help: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("netglobe"),
        "Help output should mention netglobe"
    );
}

#[test]
fn binary_shows_version() {
    let output = netglobe()
        .arg("--version")
        .output()
        .expect("Failed to execute netglobe");

    assert!(
        output.status.success(),
        "Binary failed to run --version: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn invalid_subcommand_fails_gracefully() {
    let output = netglobe()
        .arg("nonexistent-command")
        .output()
        .expect("Failed to execute netglobe");

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
fn dump_writes_scene_json() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "[globe]\nnode_count = 5\narc_count = 3\n").unwrap();

    let output = netglobe()
        .args(["dump", "--seed", "7", "--elapsed", "1.0", "--config"])
        .arg(&config)
        .output()
        .expect("Failed to execute netglobe");
    assert!(
        output.status.success(),
        "dump failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["seed"], 7);
    assert_eq!(json["scene"]["nodes"].as_array().map(Vec::len), Some(5));
    assert_eq!(json["scene"]["arcs"].as_array().map(Vec::len), Some(3));
    assert_eq!(json["frame"]["markers"].as_array().map(Vec::len), Some(3));
    assert_eq!(json["scene"]["globe"]["material"]["kind"], "wireframe");
}

#[test]
fn dump_is_reproducible_with_seed() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "").unwrap();

    let run = || {
        netglobe()
            .args(["dump", "--seed", "99", "--config"])
            .arg(&config)
            .output()
            .expect("Failed to execute netglobe")
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn too_few_nodes_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "").unwrap();

    let output = netglobe()
        .args(["dump", "--nodes", "0", "--config"])
        .arg(&config)
        .output()
        .expect("Failed to execute netglobe");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("at least 2 nodes"), "unexpected stderr: {}", stderr);
    assert!(!stderr.contains("panicked at"));
}

#[test]
fn print_renders_braille_frame() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "").unwrap();

    let output = netglobe()
        .args(["print", "--seed", "1", "--width", "40", "--height", "20", "--config"])
        .arg(&config)
        .output()
        .expect("Failed to execute netglobe");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 20);
    assert!(stdout.chars().any(|c| ('\u{2801}'..='\u{28FF}').contains(&c)));
}

#[test]
fn infinite_time_step_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "").unwrap();

    let output = netglobe()
        .args(["run", "--time", "inf", "--seed", "1", "--config"])
        .arg(&config)
        .output()
        .expect("Failed to execute netglobe");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("time_step"), "unexpected stderr: {}", stderr);
    assert!(!stderr.contains("panicked at"));
}
