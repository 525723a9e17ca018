//! Asynchronous write-then-read I2C transfers for Linux.
//!
//! i2cxfer performs one combined write-then-read transaction over a Linux
//! `i2c-dev` adapter per call: write N bytes to a slave address, read M
//! bytes back, with every failure mode mapped to a structured kind.
//!
//! # Crate Structure
//!
//! - [`bus`] — Raw `i2c-dev` character-device access (kernel ABI, RAII
//!   device handle)
//! - [`engine`] — The transfer engine: validation, phase sequencing, the
//!   error taxonomy, and (behind the `async` feature) the non-blocking
//!   callers

/// Re-export raw device types.
pub mod bus {
    pub use i2cxfer_bus::*;
}

/// Re-export engine types.
pub mod engine {
    pub use i2cxfer_engine::*;
}
