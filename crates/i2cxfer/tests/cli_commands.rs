#![cfg(all(target_os = "linux", feature = "cli"))]

use std::process::Command;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_i2cxfer"))
}

#[test]
fn version_prints_package_version() {
    let output = bin().arg("version").output().expect("version should run");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn transfer_rejects_invalid_address_without_touching_the_bus() {
    let output = bin()
        .args([
            "transfer",
            "/dev/i2cxfer-does-not-exist",
            "0x99",
            "--read",
            "1",
        ])
        .output()
        .expect("transfer should run");

    // The address error wins over the missing path: validation runs
    // before the bus is opened.
    assert_eq!(output.status.code(), Some(64));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("seven-bit"), "stderr: {stderr}");
}

#[test]
fn transfer_rejects_oversized_read_request() {
    let output = bin()
        .args([
            "transfer",
            "/dev/i2cxfer-does-not-exist",
            "0x54",
            "--read",
            "10000",
        ])
        .output()
        .expect("transfer should run");

    assert_eq!(output.status.code(), Some(64));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("segment limit"), "stderr: {stderr}");
}

#[test]
fn transfer_reports_missing_bus_as_transport_error() {
    let output = bin()
        .args([
            "transfer",
            "/dev/i2cxfer-does-not-exist",
            "0x54",
            "--read",
            "1",
        ])
        .output()
        .expect("transfer should run");

    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unavailable"), "stderr: {stderr}");
}

#[test]
fn transfer_reports_non_i2c_node_as_addressing_failure() {
    // /dev/null opens but rejects i2c ioctls.
    let output = bin()
        .args(["transfer", "/dev/null", "0x54", "--read", "1"])
        .output()
        .expect("transfer should run");

    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("address"), "stderr: {stderr}");
}

#[test]
fn doctor_emits_json_with_overall_status() {
    let output = bin()
        .args(["--format", "json", "doctor"])
        .output()
        .expect("doctor should run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let value: serde_json::Value =
        serde_json::from_str(stdout.trim()).expect("doctor output should be json");
    assert!(value.get("overall").is_some());
    assert!(value.get("checks").is_some());
}
