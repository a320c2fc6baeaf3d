//! Device description passed explicitly to register-level drivers.
//!
//! A [`DeviceConfig`] says where a device sits on the bus and how it lays
//! out multi-byte values. It is an ordinary value owned by the caller and
//! handed to each driver; there is no global registry. Configs are stored
//! as postcard bytes.

extern crate alloc;

use alloc::vec::Vec;

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror_no_std::Error;

use crate::endian::ByteOrder;

/// Highest valid 7-bit I2C address
pub const MAX_I2C_ADDRESS: u8 = 0x7F;

/// Widest ADC sample a 24-bit register triple can carry
pub const MAX_SAMPLE_BITS: u8 = 24;

/// Errors from validating or decoding a [`DeviceConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Address does not fit in 7 bits
    #[error("Invalid I2C address: {address:#04x}")]
    InvalidAddress {
        /// The rejected address
        address: u8,
    },

    /// Sample width outside `1..=24`
    #[error("Invalid sample width: {bits} bits")]
    InvalidSampleBits {
        /// The rejected width
        bits: u8,
    },

    /// The stored bytes are not a postcard-encoded config
    #[error("Malformed config encoding")]
    Encoding,
}

/// How a register-mapped device is addressed and encodes its values.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceConfig {
    /// 7-bit bus address
    pub address: u8,
    /// Byte order of multi-byte registers
    pub byte_order: ByteOrder,
    /// Significant bits in a 24-bit sample register triple
    pub sample_bits: u8,
}

impl Default for DeviceConfig {
    /// A 20-bit big-endian ADC at address 0x76, the common layout for
    /// barometric pressure/temperature sensors.
    fn default() -> Self {
        Self {
            address: 0x76,
            byte_order: ByteOrder::Big,
            sample_bits: 20,
        }
    }
}

impl DeviceConfig {
    /// Check that the address and sample width are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.address > MAX_I2C_ADDRESS {
            return Err(ConfigError::InvalidAddress {
                address: self.address,
            });
        }
        if self.sample_bits == 0 || self.sample_bits > MAX_SAMPLE_BITS {
            return Err(ConfigError::InvalidSampleBits {
                bits: self.sample_bits,
            });
        }
        Ok(())
    }

    /// Encode as postcard bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ConfigError> {
        postcard::to_allocvec(self).map_err(|e| {
            warn!("DeviceConfig encoding failed: {:?}", e);
            ConfigError::Encoding
        })
    }

    /// Decode from postcard bytes and validate the result.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = postcard::from_bytes(bytes).map_err(|e| {
            warn!("DeviceConfig decoding failed: {:?}", e);
            ConfigError::Encoding
        })?;
        config.validate()?;
        Ok(config)
    }
}
