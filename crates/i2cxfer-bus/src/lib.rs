//! Raw Linux `i2c-dev` character-device access.
//!
//! This is the lowest layer of i2cxfer: it speaks the kernel's userspace
//! I2C interface (open the adapter node, bind a slave address, plain
//! read/write on the bound descriptor) and reports failures as
//! unclassified [`std::io::Error`] values. Interpreting those failures is
//! the transfer engine's job, one layer up.

#[cfg(target_os = "linux")]
pub mod dev;
#[cfg(target_os = "linux")]
pub mod ffi;

#[cfg(target_os = "linux")]
pub use dev::I2cDev;

/// The `i2c-dev` driver caps one plain read or write at 8 KiB; longer
/// segments are clamped by the kernel rather than rejected, so callers
/// must refuse them up front.
pub const MAX_SEGMENT_LEN: usize = 8192;
