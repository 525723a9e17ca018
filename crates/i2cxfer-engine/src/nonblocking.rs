//! Non-blocking callers for the transfer engine.
//!
//! The OS-level transaction is a blocking syscall sequence, so it runs on
//! tokio's blocking pool; the caller awaits a single future and is never
//! frozen while the bus is busy. Write-before-read ordering is enforced
//! inside the worker, not by interleaving on the caller's task. There is
//! no partial or streaming result.
//!
//! Concurrent transfers to the same adapter serialize (or fail busy) at
//! the OS layer; callers needing ordering across multiple transfers must
//! serialize themselves.

use std::io;
use std::path::Path;
use std::time::Duration;

use bytes::Bytes;

use crate::addr::SlaveAddress;
use crate::engine::Engine;
use crate::error::{Result, TransferError};
use crate::traits::Bus;

/// Write `write` to `address` on the adapter at `bus`, then read
/// `read_len` bytes back, without blocking the calling task.
///
/// `address` is validated as a seven-bit slave address before the bus is
/// touched; use [`transfer_on`] with [`SlaveAddress::ten_bit`] for
/// ten-bit targets.
#[cfg(target_os = "linux")]
pub async fn transfer(
    bus: impl AsRef<Path>,
    address: u16,
    write: impl Into<Bytes>,
    read_len: usize,
) -> Result<Vec<u8>> {
    let address = SlaveAddress::seven_bit(address)?;
    transfer_on(Engine::new(), bus, address, write, read_len).await
}

/// [`transfer`] bounded by `limit`.
///
/// A timeout abandons the wait, not the transaction: `i2c-dev` has no
/// native abort, so an in-flight operation completes or fails on the
/// worker thread, where the bus handle is still released.
#[cfg(target_os = "linux")]
pub async fn transfer_with_timeout(
    bus: impl AsRef<Path>,
    address: u16,
    write: impl Into<Bytes>,
    read_len: usize,
    limit: Duration,
) -> Result<Vec<u8>> {
    let address = SlaveAddress::seven_bit(address)?;
    transfer_on_with_timeout(Engine::new(), bus, address, write, read_len, limit).await
}

/// Run one transaction for `engine` on the blocking pool.
pub async fn transfer_on<B>(
    engine: Engine<B>,
    bus: impl AsRef<Path>,
    address: SlaveAddress,
    write: impl Into<Bytes>,
    read_len: usize,
) -> Result<Vec<u8>>
where
    B: Bus + Send + 'static,
{
    let path = bus.as_ref().to_path_buf();
    let write = write.into();
    let worker_path = path.clone();
    let worker = tokio::task::spawn_blocking(move || {
        engine.transfer(&worker_path, address, &write, read_len)
    });

    match worker.await {
        Ok(outcome) => outcome,
        Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
        // Runtime shutdown cancelled the worker before it opened the
        // device; the bus was never touched.
        Err(err) => Err(TransferError::BusUnavailable {
            path,
            source: io::Error::other(err),
        }),
    }
}

/// [`transfer_on`] bounded by `limit`.
pub async fn transfer_on_with_timeout<B>(
    engine: Engine<B>,
    bus: impl AsRef<Path>,
    address: SlaveAddress,
    write: impl Into<Bytes>,
    read_len: usize,
    limit: Duration,
) -> Result<Vec<u8>>
where
    B: Bus + Send + 'static,
{
    match tokio::time::timeout(limit, transfer_on(engine, bus, address, write, read_len)).await {
        Ok(outcome) => outcome,
        Err(_) => Err(TransferError::Timeout(limit)),
    }
}
