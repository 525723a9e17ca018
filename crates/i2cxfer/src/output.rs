use std::io::{IsTerminal, Write};
use std::path::Path;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use i2cxfer_engine::SlaveAddress;
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct TransferOutput<'a> {
    schema_id: &'a str,
    bus: String,
    address: String,
    write_len: usize,
    read_len: usize,
    data: String,
}

/// Render the bytes read back from the device.
pub fn print_transfer(
    bus: &Path,
    address: SlaveAddress,
    write_len: usize,
    data: &[u8],
    format: OutputFormat,
) {
    match format {
        OutputFormat::Json => {
            let out = TransferOutput {
                schema_id: "https://schemas.3leaps.dev/i2cxfer/cli/v1/transfer-result.schema.json",
                bus: bus.display().to_string(),
                address: address.to_string(),
                write_len,
                read_len: data.len(),
                data: hex_string(data),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["BUS", "ADDRESS", "WROTE", "READ", "DATA"])
                .add_row(vec![
                    bus.display().to_string(),
                    address.to_string(),
                    write_len.to_string(),
                    data.len().to_string(),
                    hex_string(data),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "bus={} address={} wrote={} read={} data={}",
                bus.display(),
                address,
                write_len,
                data.len(),
                hex_string(data)
            );
        }
        OutputFormat::Raw => print_raw(data),
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

/// Space-separated lowercase hex; empty input renders as an empty string.
pub fn hex_string(data: &[u8]) -> String {
    data.iter()
        .map(|byte| format!("{byte:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_string_is_space_separated_lowercase() {
        assert_eq!(hex_string(&[0x01, 0xAB, 0x00]), "01 ab 00");
        assert_eq!(hex_string(&[]), "");
    }
}
