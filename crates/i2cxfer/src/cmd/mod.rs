use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod doctor;
pub mod envinfo;
pub mod transfer;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Execute one write-then-read transfer.
    Transfer(TransferArgs),
    /// Show version information.
    Version(VersionArgs),
    /// Run local environment health checks.
    Doctor(DoctorArgs),
    /// Print build and environment diagnostics.
    Envinfo(EnvinfoArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Transfer(args) => transfer::run(args, format),
        Command::Version(args) => version::run(args),
        Command::Doctor(args) => doctor::run(args, format),
        Command::Envinfo(args) => envinfo::run(args, format),
    }
}

#[derive(Args, Debug)]
pub struct TransferArgs {
    /// Bus device path (e.g. /dev/i2c-1).
    pub bus: PathBuf,
    /// Slave address (decimal or 0x-hex).
    pub address: String,
    /// Bytes to write, comma-separated (decimal or 0x-hex).
    #[arg(long, value_name = "BYTES")]
    pub write: Option<String>,
    /// Number of bytes to read back.
    #[arg(long, short = 'r', default_value = "0", value_name = "N")]
    pub read: usize,
    /// Address the slave in ten-bit mode.
    #[arg(long)]
    pub ten_bit: bool,
    /// Upper bound on the wait for completion (e.g. 5s, 500ms).
    #[arg(long, value_name = "DUR")]
    pub timeout: Option<String>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

#[derive(Args, Debug, Default)]
pub struct DoctorArgs {
    /// Probe this bus device as part of the checks.
    #[arg(long, value_name = "PATH")]
    pub bus: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub struct EnvinfoArgs {}
