//! Write-then-read I2C transfers with a structured failure model.
//!
//! One operation: write N bytes to a slave device, then read M bytes
//! back, over a Linux `i2c-dev` adapter. Each call is a fresh
//! open/address/write/read/close cycle: no state survives between
//! calls, and the bus handle is released on every exit path.
//!
//! The blocking surface is [`Engine`]. The `async` feature adds the
//! [`nonblocking`] callers, which run the blocking transaction on
//! tokio's blocking pool so the calling task is never frozen.

pub mod addr;
pub mod engine;
pub mod error;
pub mod traits;

#[cfg(target_os = "linux")]
pub mod linux;

#[cfg(feature = "async")]
pub mod nonblocking;

pub use addr::SlaveAddress;
pub use engine::{Engine, MAX_SEGMENT_LEN};
pub use error::{Phase, Result, TransferError};
pub use traits::{Bus, BusHandle};

#[cfg(target_os = "linux")]
pub use engine::transfer_blocking;
#[cfg(target_os = "linux")]
pub use linux::LinuxBus;
