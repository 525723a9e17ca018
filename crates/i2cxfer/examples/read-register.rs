//! Read three bytes from register 0x04 of the device at 0x54, the
//! write-then-read exchange a small EEPROM or sensor typically serves.
//!
//! Run with:
//!   cargo run --example read-register -- /dev/i2c-1

use i2cxfer::engine::nonblocking;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let bus = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "/dev/i2c-1".to_string());

    let data = nonblocking::transfer(&bus, 0x54, vec![0x04], 3).await?;
    println!("read {} bytes: {:02x?}", data.len(), data);
    Ok(())
}
