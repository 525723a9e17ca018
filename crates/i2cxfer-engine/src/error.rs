use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// The data phase an I/O failure occurred in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Write,
    Read,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Write => f.write_str("write"),
            Phase::Read => f.write_str("read"),
        }
    }
}

/// Failures a transfer can surface, one variant per failure kind.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// Malformed address, oversized buffer, or invalid read length.
    /// Detected before any I/O; the device is never touched.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The bus device could not be acquired: path missing, wrong
    /// permissions, or the adapter is held/busy. The io source carries
    /// the distinction.
    #[error("bus {path} unavailable: {source}")]
    BusUnavailable { path: PathBuf, source: io::Error },

    /// The slave address could not be installed on the open handle.
    #[error("failed to address slave {address:#04x} on {path}: {source}")]
    AddressingFailed {
        path: PathBuf,
        address: u16,
        source: io::Error,
    },

    /// The slave NACKed or gave no response during a data phase.
    #[error("device {address:#04x} not responding during {phase} phase: {source}")]
    DeviceNotResponding {
        address: u16,
        phase: Phase,
        source: io::Error,
    },

    /// The driver moved fewer bytes than requested without reporting a
    /// device error. Partial data is discarded, never returned as
    /// success.
    #[error("{phase} phase moved {actual} of {expected} bytes")]
    TransferIncomplete {
        phase: Phase,
        expected: usize,
        actual: usize,
    },

    /// The close failed after an otherwise successful transaction; the
    /// OS-level descriptor may be in an indeterminate state.
    #[error("failed to release bus handle for {path}: {source}")]
    ResourceReleaseFailed { path: PathBuf, source: io::Error },

    /// The caller-defined wait elapsed before the transfer resolved. The
    /// in-flight transaction is not aborted at the device.
    #[error("transfer timed out after {0:?}")]
    Timeout(Duration),
}

pub type Result<T> = std::result::Result<T, TransferError>;
