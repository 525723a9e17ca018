//! The transfer engine: one write-then-read transaction per call.
//!
//! Each call is a fresh acquire/address/write/read/release sequence.
//! Failures at any phase short-circuit the remaining phases but never
//! the release step, and no state survives between calls.

use std::io;
use std::path::Path;

use tracing::{debug, warn};

use crate::addr::SlaveAddress;
use crate::error::{Phase, Result, TransferError};
use crate::traits::{Bus, BusHandle};

#[cfg(target_os = "linux")]
use crate::linux::LinuxBus;

pub use i2cxfer_bus::MAX_SEGMENT_LEN;

/// Executes write-then-read transactions over a [`Bus`].
///
/// The engine is a plain value: construct one wherever a transfer is
/// needed. It holds no handles and no state between calls.
#[derive(Clone, Debug)]
pub struct Engine<B> {
    bus: B,
}

#[cfg(target_os = "linux")]
impl Engine<LinuxBus> {
    /// Engine over the Linux `i2c-dev` interface.
    pub fn new() -> Self {
        Self { bus: LinuxBus }
    }
}

#[cfg(target_os = "linux")]
impl Default for Engine<LinuxBus> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Bus> Engine<B> {
    /// Engine over a custom [`Bus`] implementation.
    pub fn with_bus(bus: B) -> Self {
        Self { bus }
    }

    /// Execute one write-then-read transaction, blocking the calling
    /// thread.
    ///
    /// Writes all of `write` to `address` on the adapter at `path`, then
    /// reads exactly `read_len` bytes back. An empty `write` skips the
    /// write phase; `read_len == 0` skips the read phase and yields an
    /// empty buffer. When both phases run, the write always completes
    /// before the read begins.
    ///
    /// The bus handle is acquired and released within this call on every
    /// exit path. Exactly one open and one close happen per call, and no
    /// retries are performed; retry policy belongs to the caller.
    pub fn transfer(
        &self,
        path: &Path,
        address: SlaveAddress,
        write: &[u8],
        read_len: usize,
    ) -> Result<Vec<u8>> {
        validate_segments(write.len(), read_len)?;

        let mut handle =
            self.bus
                .open(path)
                .map_err(|source| TransferError::BusUnavailable {
                    path: path.to_path_buf(),
                    source,
                })?;

        let outcome = run_phases(&mut handle, path, address, write, read_len);
        let released = handle.release();

        match (outcome, released) {
            (Ok(read), Ok(())) => {
                debug!(?path, %address, wrote = write.len(), read = read.len(), "transfer complete");
                Ok(read)
            }
            (Ok(_), Err(source)) => Err(TransferError::ResourceReleaseFailed {
                path: path.to_path_buf(),
                source,
            }),
            (Err(err), Ok(())) => Err(err),
            (Err(err), Err(close_err)) => {
                warn!(?path, error = %close_err, "bus handle close failed after transfer error");
                Err(err)
            }
        }
    }
}

/// Execute one transaction against a Linux `i2c-dev` adapter, validating
/// `address` as a seven-bit slave address before the bus is touched.
#[cfg(target_os = "linux")]
pub fn transfer_blocking(
    bus: impl AsRef<Path>,
    address: u16,
    write: &[u8],
    read_len: usize,
) -> Result<Vec<u8>> {
    let address = SlaveAddress::seven_bit(address)?;
    Engine::new().transfer(bus.as_ref(), address, write, read_len)
}

fn validate_segments(write_len: usize, read_len: usize) -> Result<()> {
    if write_len > MAX_SEGMENT_LEN {
        return Err(TransferError::InvalidArgument(format!(
            "write buffer of {write_len} bytes exceeds the {MAX_SEGMENT_LEN}-byte segment limit"
        )));
    }
    if read_len > MAX_SEGMENT_LEN {
        return Err(TransferError::InvalidArgument(format!(
            "read length {read_len} exceeds the {MAX_SEGMENT_LEN}-byte segment limit"
        )));
    }
    Ok(())
}

fn run_phases<H: BusHandle>(
    handle: &mut H,
    path: &Path,
    address: SlaveAddress,
    write: &[u8],
    read_len: usize,
) -> Result<Vec<u8>> {
    handle
        .bind_address(address)
        .map_err(|source| TransferError::AddressingFailed {
            path: path.to_path_buf(),
            address: address.raw(),
            source,
        })?;

    // The write phase always precedes the read and always runs when the
    // buffer is non-empty, even for read_len == 0.
    if !write.is_empty() {
        let accepted = retry_interrupted(|| handle.write(write))
            .map_err(|source| classify_phase_error(source, Phase::Write, path, address))?;
        if accepted != write.len() {
            return Err(TransferError::TransferIncomplete {
                phase: Phase::Write,
                expected: write.len(),
                actual: accepted,
            });
        }
        debug!(%address, bytes = accepted, "write phase complete");
    }

    if read_len == 0 {
        return Ok(Vec::new());
    }

    let mut read = vec![0u8; read_len];
    let served = retry_interrupted(|| handle.read(&mut read))
        .map_err(|source| classify_phase_error(source, Phase::Read, path, address))?;
    if served != read_len {
        return Err(TransferError::TransferIncomplete {
            phase: Phase::Read,
            expected: read_len,
            actual: served,
        });
    }
    debug!(%address, bytes = served, "read phase complete");

    Ok(read)
}

/// Translate a data-phase OS error into a failure kind.
///
/// Contention errno maps back to the acquire taxonomy, malformed-request
/// errno to the argument taxonomy. Everything the driver uses for a NACK
/// or an unresponsive slave (`ENXIO`, `EREMOTEIO`, `EIO`, `ETIMEDOUT`,
/// `ENODEV`), plus any errno not recognized here, becomes
/// [`TransferError::DeviceNotResponding`] with the source preserved.
fn classify_phase_error(
    source: io::Error,
    phase: Phase,
    path: &Path,
    address: SlaveAddress,
) -> TransferError {
    match source.raw_os_error() {
        Some(libc::EBUSY) | Some(libc::EAGAIN) => TransferError::BusUnavailable {
            path: path.to_path_buf(),
            source,
        },
        Some(libc::EINVAL) | Some(libc::EMSGSIZE) => TransferError::InvalidArgument(format!(
            "driver rejected {phase} phase request: {source}"
        )),
        _ => TransferError::DeviceNotResponding {
            address: address.raw(),
            phase,
            source,
        },
    }
}

fn retry_interrupted(mut op: impl FnMut() -> io::Result<usize>) -> io::Result<usize> {
    loop {
        match op() {
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            other => return other,
        }
    }
}
