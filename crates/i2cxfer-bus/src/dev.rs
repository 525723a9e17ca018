use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::os::fd::{AsRawFd, IntoRawFd};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::ffi;

/// An open `i2c-dev` adapter device.
///
/// Wraps the character-device file for one adapter (e.g. `/dev/i2c-1`).
/// Dropping the handle closes the descriptor; [`I2cDev::close`] closes it
/// explicitly so the caller can observe the `close(2)` result.
#[derive(Debug)]
pub struct I2cDev {
    file: File,
    path: PathBuf,
}

impl I2cDev {
    /// Open the adapter device at `path` for read/write access.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().read(true).write(true).open(&path)?;
        debug!(?path, "opened i2c bus device");
        Ok(Self { file, path })
    }

    /// Install `address` as the active slave for subsequent I/O.
    ///
    /// Ten-bit mode must be selected before the address is installed; the
    /// kernel validates the address against the selected mode.
    pub fn bind_address(&mut self, address: u16, ten_bit: bool) -> io::Result<()> {
        if ten_bit {
            self.ioctl(ffi::I2C_TENBIT, 1)?;
        }
        self.ioctl(ffi::I2C_SLAVE, libc::c_ulong::from(address))?;
        debug!(path = ?self.path, address, ten_bit, "bound slave address");
        Ok(())
    }

    /// Write `buf` to the bound slave in one `write(2)` call.
    ///
    /// Returns the number of bytes the driver accepted, which may be short.
    pub fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    /// Read into `buf` from the bound slave in one `read(2)` call.
    ///
    /// Returns the number of bytes the driver served, which may be short.
    pub fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }

    /// Query the adapter functionality bits (`I2C_FUNC_*`).
    pub fn functionality(&self) -> io::Result<libc::c_ulong> {
        let mut funcs: libc::c_ulong = 0;
        // SAFETY: `funcs` is a valid writable c_ulong for the duration of
        // the call, and the fd is an open i2c-dev descriptor owned by this
        // handle.
        let rc = unsafe { libc::ioctl(self.file.as_raw_fd(), ffi::I2C_FUNCS, &mut funcs) };
        if rc < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(funcs)
    }

    /// The device path this handle was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Close the descriptor, surfacing the `close(2)` error.
    ///
    /// Dropping the handle also closes it, but swallows the error.
    pub fn close(self) -> io::Result<()> {
        let Self { file, path } = self;
        let fd = file.into_raw_fd();
        // SAFETY: `into_raw_fd` transferred ownership of the descriptor to
        // this call; nothing else will close it.
        let rc = unsafe { libc::close(fd) };
        if rc < 0 {
            return Err(io::Error::last_os_error());
        }
        debug!(?path, "closed i2c bus device");
        Ok(())
    }

    fn ioctl(&mut self, request: libc::c_ulong, arg: libc::c_ulong) -> io::Result<()> {
        // SAFETY: the fd is an open i2c-dev descriptor owned by this
        // handle; both I2C_SLAVE and I2C_TENBIT take their argument by
        // value.
        let rc = unsafe { libc::ioctl(self.file.as_raw_fd(), request, arg) };
        if rc < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_missing_device_fails() {
        let err = I2cDev::open("/dev/i2cxfer-does-not-exist").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn bind_address_on_non_i2c_node_is_rejected() {
        // /dev/null accepts open(O_RDWR) but not i2c ioctls.
        let mut dev = I2cDev::open("/dev/null").expect("/dev/null should open");
        let err = dev.bind_address(0x54, false).unwrap_err();
        assert_eq!(err.raw_os_error(), Some(libc::ENOTTY));
    }

    #[test]
    fn close_succeeds_for_healthy_descriptor() {
        let dev = I2cDev::open("/dev/null").expect("/dev/null should open");
        assert_eq!(dev.path(), Path::new("/dev/null"));
        dev.close().expect("close should succeed");
    }
}
