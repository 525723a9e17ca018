use crate::error::{Result, TransferError};

/// A validated I2C slave address.
///
/// Seven-bit addresses must avoid the ranges the bus reserves for special
/// purposes (general call, CBUS, high-speed master codes, ten-bit
/// prefixes), leaving `0x08..=0x77`. Ten-bit addresses span the full
/// `0x000..=0x3FF`. Construction is the only validation point: a
/// `SlaveAddress` in hand is always safe to install on a bus handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlaveAddress {
    raw: u16,
    ten_bit: bool,
}

impl SlaveAddress {
    /// First usable seven-bit address.
    pub const SEVEN_BIT_MIN: u16 = 0x08;
    /// Last usable seven-bit address.
    pub const SEVEN_BIT_MAX: u16 = 0x77;
    /// Largest ten-bit address.
    pub const TEN_BIT_MAX: u16 = 0x3FF;

    /// Validate `raw` as a seven-bit address.
    pub fn seven_bit(raw: u16) -> Result<Self> {
        if !(Self::SEVEN_BIT_MIN..=Self::SEVEN_BIT_MAX).contains(&raw) {
            return Err(TransferError::InvalidArgument(format!(
                "slave address {raw:#04x} outside the usable seven-bit range {:#04x}..={:#04x}",
                Self::SEVEN_BIT_MIN,
                Self::SEVEN_BIT_MAX
            )));
        }
        Ok(Self {
            raw,
            ten_bit: false,
        })
    }

    /// Validate `raw` as a ten-bit address.
    pub fn ten_bit(raw: u16) -> Result<Self> {
        if raw > Self::TEN_BIT_MAX {
            return Err(TransferError::InvalidArgument(format!(
                "slave address {raw:#05x} exceeds the ten-bit maximum {:#05x}",
                Self::TEN_BIT_MAX
            )));
        }
        Ok(Self { raw, ten_bit: true })
    }

    /// The raw address value.
    pub fn raw(self) -> u16 {
        self.raw
    }

    /// Whether this address uses ten-bit mode.
    pub fn is_ten_bit(self) -> bool {
        self.ten_bit
    }
}

impl TryFrom<u16> for SlaveAddress {
    type Error = TransferError;

    /// Seven-bit validation; use [`SlaveAddress::ten_bit`] for ten-bit
    /// targets.
    fn try_from(raw: u16) -> Result<Self> {
        Self::seven_bit(raw)
    }
}

impl std::fmt::Display for SlaveAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.ten_bit {
            write!(f, "{:#05x}", self.raw)
        } else {
            write!(f, "{:#04x}", self.raw)
        }
    }
}
