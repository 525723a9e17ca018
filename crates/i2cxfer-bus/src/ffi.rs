//! Kernel ABI for the `i2c-dev` interface.
//!
//! Mirrors the request numbers and functionality bits from
//! `<linux/i2c-dev.h>` and `<linux/i2c.h>`; `libc` does not carry them.

/// Bind the descriptor to a slave address.
pub const I2C_SLAVE: libc::c_ulong = 0x0703;
/// Select addressing mode: argument 0 = seven-bit, 1 = ten-bit.
pub const I2C_TENBIT: libc::c_ulong = 0x0704;
/// Query adapter functionality bits.
pub const I2C_FUNCS: libc::c_ulong = 0x0705;

/// Adapter supports plain I2C-level transactions.
pub const I2C_FUNC_I2C: libc::c_ulong = 0x0000_0001;
/// Adapter handles ten-bit slave addresses.
pub const I2C_FUNC_10BIT_ADDR: libc::c_ulong = 0x0000_0002;
