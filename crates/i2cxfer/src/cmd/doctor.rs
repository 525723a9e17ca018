use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::cmd::DoctorArgs;
use crate::exit::{CliResult, HEALTH_CHECK_FAILED, SUCCESS};
use crate::output::OutputFormat;

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
enum CheckStatus {
    Pass,
    Fail,
    Warn,
    Info,
    Skip,
}

#[derive(Debug, Serialize)]
struct CheckResult {
    name: String,
    status: CheckStatus,
    detail: String,
}

#[derive(Debug, Serialize)]
struct DoctorOutput {
    schema_id: &'static str,
    checks: Vec<CheckResult>,
    overall: &'static str,
}

pub fn run(args: DoctorArgs, format: OutputFormat) -> CliResult<i32> {
    let checks = vec![
        platform_check(),
        device_nodes_check(),
        bus_probe_check(args.bus.as_deref()),
        compiled_features_check(),
    ];

    let has_fail = checks.iter().any(|c| matches!(c.status, CheckStatus::Fail));
    let overall = if has_fail { "fail" } else { "pass" };

    let output = DoctorOutput {
        schema_id: "https://schemas.3leaps.dev/i2cxfer/cli/v1/doctor-report.schema.json",
        checks,
        overall,
    };

    print_doctor(&output, format);

    if has_fail {
        Ok(HEALTH_CHECK_FAILED)
    } else {
        Ok(SUCCESS)
    }
}

fn print_doctor(output: &DoctorOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(output).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table | OutputFormat::Pretty => {
            println!("i2cxfer doctor\n");
            for c in &output.checks {
                println!(
                    "  [{:>4}] {:<22} {}",
                    status_text(c.status),
                    c.name,
                    c.detail
                );
            }
            if output.overall == "pass" {
                println!("\n  Result: all checks passed");
            } else {
                println!("\n  Result: one or more checks failed");
            }
        }
        OutputFormat::Raw => {
            println!("{}", output.overall);
        }
    }
}

fn status_text(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Pass => "PASS",
        CheckStatus::Fail => "FAIL",
        CheckStatus::Warn => "WARN",
        CheckStatus::Info => "INFO",
        CheckStatus::Skip => "SKIP",
    }
}

fn platform_check() -> CheckResult {
    #[cfg(target_os = "linux")]
    {
        CheckResult {
            name: "platform".to_string(),
            status: CheckStatus::Pass,
            detail: "Linux i2c-dev interface available".to_string(),
        }
    }

    #[cfg(not(target_os = "linux"))]
    {
        // i2c-dev is a Linux kernel interface; there is no fallback
        // backend, so doctor fails closed on other platforms.
        CheckResult {
            name: "platform".to_string(),
            status: CheckStatus::Fail,
            detail: "i2c-dev character devices are Linux-only".to_string(),
        }
    }
}

fn device_nodes_check() -> CheckResult {
    match list_device_nodes(Path::new("/dev")) {
        Ok(nodes) if nodes.is_empty() => CheckResult {
            name: "device_nodes".to_string(),
            status: CheckStatus::Warn,
            detail: "no /dev/i2c-* nodes present (is the i2c-dev module loaded?)".to_string(),
        },
        Ok(nodes) => CheckResult {
            name: "device_nodes".to_string(),
            status: CheckStatus::Info,
            detail: format!("{} adapter node(s) under /dev", nodes.len()),
        },
        Err(err) => CheckResult {
            name: "device_nodes".to_string(),
            status: CheckStatus::Warn,
            detail: format!("/dev not readable: {err}"),
        },
    }
}

pub(crate) fn list_device_nodes(dev: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut nodes = Vec::new();
    for entry in std::fs::read_dir(dev)? {
        let entry = entry?;
        if entry.file_name().to_string_lossy().starts_with("i2c-") {
            nodes.push(entry.path());
        }
    }
    nodes.sort();
    Ok(nodes)
}

#[cfg(target_os = "linux")]
fn bus_probe_check(bus: Option<&Path>) -> CheckResult {
    use i2cxfer_bus::ffi::{I2C_FUNC_10BIT_ADDR, I2C_FUNC_I2C};
    use i2cxfer_bus::I2cDev;

    let Some(path) = bus else {
        return CheckResult {
            name: "bus_probe".to_string(),
            status: CheckStatus::Skip,
            detail: "no --bus given".to_string(),
        };
    };

    let dev = match I2cDev::open(path) {
        Ok(dev) => dev,
        Err(err) => {
            return CheckResult {
                name: "bus_probe".to_string(),
                status: CheckStatus::Fail,
                detail: format!("{} failed to open: {err}", path.display()),
            }
        }
    };

    let result = match dev.functionality() {
        Ok(funcs) => CheckResult {
            name: "bus_probe".to_string(),
            status: CheckStatus::Pass,
            detail: format!(
                "{} open, plain-i2c={}, ten-bit={}",
                path.display(),
                funcs & I2C_FUNC_I2C != 0,
                funcs & I2C_FUNC_10BIT_ADDR != 0
            ),
        },
        Err(err) => CheckResult {
            name: "bus_probe".to_string(),
            status: CheckStatus::Fail,
            detail: format!("{} functionality query failed: {err}", path.display()),
        },
    };

    if let Err(err) = dev.close() {
        return CheckResult {
            name: "bus_probe".to_string(),
            status: CheckStatus::Warn,
            detail: format!("{} close failed: {err}", path.display()),
        };
    }

    result
}

#[cfg(not(target_os = "linux"))]
fn bus_probe_check(bus: Option<&Path>) -> CheckResult {
    let _ = bus;
    CheckResult {
        name: "bus_probe".to_string(),
        status: CheckStatus::Skip,
        detail: "bus probe requires Linux".to_string(),
    }
}

fn compiled_features_check() -> CheckResult {
    let mut features = Vec::new();
    if cfg!(feature = "async") {
        features.push("async");
    }
    if cfg!(feature = "cli") {
        features.push("cli");
    }

    CheckResult {
        name: "compiled_features".to_string(),
        status: CheckStatus::Info,
        detail: features.join(", "),
    }
}
