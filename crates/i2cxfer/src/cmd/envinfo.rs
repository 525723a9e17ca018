use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use crate::cmd::EnvinfoArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::OutputFormat;

#[derive(Serialize)]
struct BuildInfo {
    version: &'static str,
    target: String,
    rust_version: &'static str,
    git_hash: &'static str,
    features: Vec<&'static str>,
}

#[derive(Serialize)]
struct HostInfo {
    os: &'static str,
    arch: &'static str,
    /// `/dev/i2c-*` adapter nodes visible to this process.
    adapters: Vec<String>,
}

#[derive(Serialize)]
struct EnvInfoOutput {
    schema_id: &'static str,
    build: BuildInfo,
    host: HostInfo,
    environment: BTreeMap<&'static str, Option<String>>,
}

pub fn run(_args: EnvinfoArgs, format: OutputFormat) -> CliResult<i32> {
    let adapters = super::doctor::list_device_nodes(Path::new("/dev"))
        .unwrap_or_default()
        .iter()
        .map(|node| node.display().to_string())
        .collect();

    let mut environment = BTreeMap::new();
    for var in ["I2CXFER_LOG_LEVEL", "RUST_LOG"] {
        environment.insert(var, std::env::var(var).ok());
    }

    let output = EnvInfoOutput {
        schema_id: "https://schemas.3leaps.dev/i2cxfer/cli/v1/envinfo.schema.json",
        build: BuildInfo {
            version: env!("CARGO_PKG_VERSION"),
            target: build_target(),
            rust_version: option_env!("RUSTC_VERSION").unwrap_or("unknown"),
            git_hash: option_env!("GIT_HASH").unwrap_or("unknown"),
            features: active_features(),
        },
        host: HostInfo {
            os: std::env::consts::OS,
            arch: std::env::consts::ARCH,
            adapters,
        },
        environment,
    };

    print_envinfo(&output, format);
    Ok(SUCCESS)
}

/// The triple recorded at compile time; host consts are the fallback for
/// builds that bypassed the build script.
fn build_target() -> String {
    match option_env!("I2CXFER_BUILD_TARGET") {
        Some(target) => target.to_string(),
        None => format!(
            "{}-unknown-{}",
            std::env::consts::ARCH,
            std::env::consts::OS
        ),
    }
}

fn print_envinfo(output: &EnvInfoOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string(output).unwrap_or_else(|_| "{}".to_string())
        ),
        OutputFormat::Table | OutputFormat::Pretty => {
            println!("i2cxfer {} ({})", output.build.version, output.build.target);
            println!("  rustc:     {}", output.build.rust_version);
            println!("  git hash:  {}", output.build.git_hash);
            println!("  features:  {}", output.build.features.join(", "));
            println!("  host:      {} ({})", output.host.os, output.host.arch);
            if output.host.adapters.is_empty() {
                println!("  adapters:  none visible");
            } else {
                println!("  adapters:  {}", output.host.adapters.join(", "));
            }
            for (var, value) in &output.environment {
                println!("  {var}: {}", value.as_deref().unwrap_or("(not set)"));
            }
        }
        OutputFormat::Raw => println!("{}", output.build.version),
    }
}

fn active_features() -> Vec<&'static str> {
    let mut features = Vec::new();
    if cfg!(feature = "async") {
        features.push("async");
    }
    if cfg!(feature = "cli") {
        features.push("cli");
    }
    features
}
