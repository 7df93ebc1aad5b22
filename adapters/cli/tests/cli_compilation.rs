use std::process::Command;

#[test]
fn cli_compiles_without_warnings() {
    let status = Command::new(env!("CARGO"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(["check", "--quiet", "--bin", "metro-mayhem"])
        .status()
        .expect("failed to invoke cargo check for metro-mayhem CLI binary");

    assert!(status.success(), "cargo check --bin metro-mayhem should succeed");
}

#[test]
fn sample_config_runs_to_completion() {
    let config = concat!(env!("CARGO_MANIFEST_DIR"), "/../../config/metro_mayhem.toml");
    let output = Command::new(env!("CARGO_BIN_EXE_metro-mayhem"))
        .args(["--config", config, "--ticks", "600", "--log-level", "warn"])
        .output()
        .expect("failed to run metro-mayhem");

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ticks 600"), "unexpected summary: {stdout}");
}

#[test]
fn missing_config_fails_with_path() {
    let output = Command::new(env!("CARGO_BIN_EXE_metro-mayhem"))
        .args(["--config", "/nonexistent/metro_mayhem.toml"])
        .output()
        .expect("failed to run metro-mayhem");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("/nonexistent/metro_mayhem.toml"));
}
