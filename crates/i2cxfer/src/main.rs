mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "i2cxfer",
    version,
    about = "Write-then-read I2C transfers from user space"
)]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(
        long,
        value_name = "LEVEL",
        env = "I2CXFER_LOG_LEVEL",
        default_value = "info",
        global = true
    )]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_transfer_subcommand() {
        let cli = Cli::try_parse_from([
            "i2cxfer",
            "transfer",
            "/dev/i2c-1",
            "0x54",
            "--write",
            "0x04",
            "--read",
            "3",
        ])
        .expect("transfer args should parse");

        assert!(matches!(cli.command, Command::Transfer(_)));
    }

    #[test]
    fn transfer_requires_bus_and_address() {
        let err = Cli::try_parse_from(["i2cxfer", "transfer"])
            .expect_err("missing positionals should fail");

        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn parses_doctor_with_bus_probe() {
        let cli = Cli::try_parse_from(["i2cxfer", "doctor", "--bus", "/dev/i2c-0"])
            .expect("doctor args should parse");

        assert!(matches!(cli.command, Command::Doctor(_)));
    }
}
