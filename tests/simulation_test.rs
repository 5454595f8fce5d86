use std::process::{Command, Output};

fn run_headless(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_green_wave"))
        .args(args)
        .env("RUST_LOG", "warn,green_wave=info")
        .output()
        .expect("Failed to execute simulation")
}

/// Test that the default session runs to the destination
#[test]
fn test_headless_simulation_completes() {
    let output = run_headless(&["--seed", "7"]);

    assert!(
        output.status.success(),
        "Simulation failed to run. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("=== SIMULATION COMPLETE ==="),
        "Simulation did not complete properly. stderr: {}",
        stderr
    );
    assert!(
        stderr.contains("Destination reached: true"),
        "Vehicle did not reach the destination. stderr: {}",
        stderr
    );
}

/// Test that the summary statistics are logged
#[test]
fn test_summary_logged() {
    let output = run_headless(&["--seed", "7", "--policy", "major"]);
    assert!(output.status.success(), "Simulation failed to run");

    let stderr = String::from_utf8_lossy(&output.stderr);
    for key in [
        "Ticks:",
        "Path points:",
        "Path length:",
        "Signals:",
        "Ticks waiting:",
        "Final position:",
    ] {
        assert!(stderr.contains(key), "Missing '{}' statistic", key);
    }

    // Parse the signal count - handle log format with timestamp
    let signals_line = stderr
        .lines()
        .find(|line| line.contains("Signals:"))
        .expect("Could not find 'Signals' line");
    let signals: usize = signals_line
        .split("Signals:")
        .nth(1)
        .and_then(|s| s.trim().parse().ok())
        .expect("Could not parse signal count");
    assert!(signals > 0, "No signals were placed");
}

/// Test that the tick limit stops an unfinished session
#[test]
fn test_tick_limit() {
    let output = run_headless(&["--seed", "7", "--ticks", "3"]);
    assert!(output.status.success(), "Simulation failed to run");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Ticks: 3"));
    assert!(stderr.contains("Destination reached: false"));
}

/// Test that an invalid configuration is rejected
#[test]
fn test_invalid_configuration_fails() {
    let output = run_headless(&["--spacing", "0"]);
    assert!(!output.status.success());

    let output = run_headless(&["--green-start", "70"]);
    assert!(!output.status.success());
}
