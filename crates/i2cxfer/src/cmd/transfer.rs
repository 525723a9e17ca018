use std::time::Duration;

use i2cxfer_engine::{nonblocking, Engine, SlaveAddress};

use crate::cmd::TransferArgs;
use crate::exit::{transfer_error, CliError, CliResult, INTERNAL, SUCCESS, USAGE};
use crate::output::{print_transfer, OutputFormat};

pub fn run(args: TransferArgs, format: OutputFormat) -> CliResult<i32> {
    let address = parse_address(&args.address, args.ten_bit)?;
    let write = parse_bytes(args.write.as_deref().unwrap_or(""))?;
    let timeout = args.timeout.as_deref().map(parse_duration).transpose()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .map_err(|err| CliError::new(INTERNAL, format!("failed to start runtime: {err}")))?;

    let write_len = write.len();
    let data = runtime
        .block_on(async {
            let engine = Engine::new();
            match timeout {
                Some(limit) => {
                    nonblocking::transfer_on_with_timeout(
                        engine, &args.bus, address, write, args.read, limit,
                    )
                    .await
                }
                None => {
                    nonblocking::transfer_on(engine, &args.bus, address, write, args.read).await
                }
            }
        })
        .map_err(|err| transfer_error("transfer failed", err))?;

    print_transfer(&args.bus, address, write_len, &data, format);
    Ok(SUCCESS)
}

fn parse_address(input: &str, ten_bit: bool) -> CliResult<SlaveAddress> {
    let raw = parse_u16(input)
        .ok_or_else(|| CliError::new(USAGE, format!("invalid slave address: {input}")))?;
    let address = if ten_bit {
        SlaveAddress::ten_bit(raw)
    } else {
        SlaveAddress::seven_bit(raw)
    };
    address.map_err(|err| CliError::new(USAGE, err.to_string()))
}

fn parse_bytes(input: &str) -> CliResult<Vec<u8>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(Vec::new());
    }
    input
        .split(',')
        .map(|part| {
            let part = part.trim();
            parse_u16(part)
                .and_then(|value| u8::try_from(value).ok())
                .ok_or_else(|| CliError::new(USAGE, format!("invalid write byte: {part}")))
        })
        .collect()
}

fn parse_u16(input: &str) -> Option<u16> {
    let input = input.trim();
    if let Some(hex) = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
    {
        u16::from_str_radix(hex, 16).ok()
    } else {
        input.parse().ok()
    }
}

fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "duration must not be empty"));
    }

    let (number, unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, "ms")
    } else if let Some(num) = input.strip_suffix('s') {
        (num, "s")
    } else {
        (input, "s")
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration value: {input}")))?;

    if value == 0 {
        return Err(CliError::new(USAGE, "duration must be greater than zero"));
    }

    match unit {
        "ms" => Ok(Duration::from_millis(value)),
        "s" => Ok(Duration::from_secs(value)),
        _ => Err(CliError::new(
            USAGE,
            format!("unsupported duration unit: {unit}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_address_accepts_hex_and_decimal() {
        assert_eq!(parse_address("0x54", false).unwrap().raw(), 0x54);
        assert_eq!(parse_address("84", false).unwrap().raw(), 84);
    }

    #[test]
    fn parse_address_rejects_reserved_values() {
        assert_eq!(parse_address("0x03", false).unwrap_err().code, USAGE);
        assert_eq!(parse_address("0x99", false).unwrap_err().code, USAGE);
        // 0x99 is a legal ten-bit address.
        assert!(parse_address("0x99", true).is_ok());
    }

    #[test]
    fn parse_bytes_handles_mixed_radix_and_empty() {
        assert_eq!(parse_bytes("0x04, 16, 0xff").unwrap(), vec![0x04, 16, 0xFF]);
        assert!(parse_bytes("").unwrap().is_empty());
        assert_eq!(parse_bytes("0x100").unwrap_err().code, USAGE);
    }

    #[test]
    fn parse_duration_seconds_and_millis() {
        assert_eq!(parse_duration("2s").unwrap(), Duration::from_secs(2));
        assert_eq!(parse_duration("150ms").unwrap(), Duration::from_millis(150));
        assert_eq!(parse_duration("3").unwrap(), Duration::from_secs(3));
    }

    #[test]
    fn parse_duration_rejects_invalid_values() {
        assert!(parse_duration("0s").is_err());
        assert!(parse_duration("bad").is_err());
    }
}
