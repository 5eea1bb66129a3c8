use std::process::Command;

fn run(config: &str, requests: &str) -> (String, String, bool) {
    let output = Command::new(env!("CARGO_BIN_EXE_station-eng"))
        .arg(format!("tests/fixtures/{config}"))
        .arg(format!("tests/fixtures/{requests}"))
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to run binary");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

#[test]
fn valid_requests() {
    let (stdout, stderr, success) = run("station.json", "valid.csv");

    assert!(success);
    assert!(stderr.is_empty());

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines[0],
        "sales,revenue,rejected_no_fuel,rejected_too_expensive"
    );
    // 10.0 + 5.0x1.3 + 2.5 diesel liters at 1.0
    assert_eq!(lines[1], "3,19.0000,0,0");
}

#[test]
fn errors_warn_but_do_not_block() {
    let (stdout, stderr, success) = run("station.json", "with_errors.csv");

    assert!(success);
    assert!(stderr.contains("unrecognized fuel type"));
    assert!(stderr.contains("failed to parse row"));

    // One sale; the super request finds no pump, the regular one is over
    // the customer's ceiling.
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[1], "1,10.0000,1,1");
}

#[test]
fn missing_config_still_serves_a_report() {
    let (stdout, stderr, success) = run("no_such_config.json", "valid.csv");

    assert!(success);
    assert!(stderr.contains("falling back to empty station config"));

    // No prices configured: every request is rejected without touching
    // the cancellation counters.
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[1], "0,0.0000,0,0");
}
