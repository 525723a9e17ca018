//! The production [`Bus`]: Linux `i2c-dev` character devices.

use std::io;
use std::path::Path;

use i2cxfer_bus::I2cDev;

use crate::addr::SlaveAddress;
use crate::traits::{Bus, BusHandle};

/// Opens `/dev/i2c-*` adapter nodes via [`i2cxfer_bus::I2cDev`].
#[derive(Clone, Copy, Debug, Default)]
pub struct LinuxBus;

impl Bus for LinuxBus {
    type Handle = I2cDev;

    fn open(&self, path: &Path) -> io::Result<I2cDev> {
        I2cDev::open(path)
    }
}

impl BusHandle for I2cDev {
    fn bind_address(&mut self, address: SlaveAddress) -> io::Result<()> {
        I2cDev::bind_address(self, address.raw(), address.is_ten_bit())
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        I2cDev::write(self, buf)
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        I2cDev::read(self, buf)
    }

    fn release(self) -> io::Result<()> {
        self.close()
    }
}
