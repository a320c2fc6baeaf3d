//! Register-mapped device access built on the endian codecs.
//!
//! Sensor drivers read a burst of consecutive registers and decode it with
//! the device's byte order. A 20-bit ADC, for example, is three registers
//! read as one big-endian 24-bit word with the low four bits discarded.
//! [`RegisterDevice`] packages that pattern over any async I2C bus; the bus
//! itself, and whatever calibration math turns samples into physical units,
//! live with the caller.

use embedded_hal_async::i2c::I2c;
use heapless::Vec;
use log::{debug, error};

use crate::config::{ConfigError, DeviceConfig, MAX_SAMPLE_BITS};
use crate::endian::{self, EndianInt};
use crate::error::Error;

/// Largest payload [`RegisterDevice::write_block`] sends after the register address
pub const MAX_WRITE_LEN: usize = 32;

/// Scratch space for one write: register address plus payload
const WRITE_BUFFER_LEN: usize = MAX_WRITE_LEN + 1;

/// Widest single value read by [`RegisterDevice::read`]
const MAX_VALUE_WIDTH: usize = 8;

/// Errors that can occur while reading or writing registers
#[derive(Debug)]
pub enum RegisterError<E> {
    /// Bus transaction failed
    Bus(E),
    /// Bytes arrived but could not be decoded or encoded
    Decode(Error),
}

impl<E> From<Error> for RegisterError<E> {
    fn from(e: Error) -> Self {
        Self::Decode(e)
    }
}

/// Discard the unused low bits of a 24-bit ADC word.
///
/// `raw` holds the three sample registers as read; `sample_bits` is the
/// number of significant leading bits. The shift is arithmetic.
///
/// # Errors
/// [`Error::OutOfRange`] if `sample_bits` is not in `1..=24`.
pub fn sample_from_raw(raw: u32, sample_bits: u8) -> Result<i32, Error> {
    if sample_bits == 0 || sample_bits > MAX_SAMPLE_BITS {
        return Err(Error::OutOfRange {
            index: sample_bits as usize,
            bound: MAX_SAMPLE_BITS as usize,
        });
    }
    let word = (raw & 0x00FF_FFFF) as i32;
    Ok(word >> (MAX_SAMPLE_BITS - sample_bits))
}

/// A device on an async I2C bus whose registers are decoded per its [`DeviceConfig`].
pub struct RegisterDevice<I2C> {
    i2c: I2C,
    config: DeviceConfig,
}

impl<I2C> RegisterDevice<I2C>
where
    I2C: I2c,
{
    /// Wrap `i2c` for the device described by `config`.
    ///
    /// # Errors
    /// Returns the validation error if `config` is unusable.
    pub fn new(i2c: I2C, config: DeviceConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { i2c, config })
    }

    /// The configuration this device was created with.
    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// Give back the bus.
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Read consecutive registers starting at `register` into `buffer`.
    pub async fn read_block(
        &mut self,
        register: u8,
        buffer: &mut [u8],
    ) -> Result<(), RegisterError<I2C::Error>> {
        self.i2c
            .write_read(self.config.address, &[register], buffer)
            .await
            .map_err(|e| {
                error!(
                    "Register read failed at {:#04x}+{}: {:?}",
                    register,
                    buffer.len(),
                    e
                );
                RegisterError::Bus(e)
            })?;
        debug!("Read {:#04x}: {:02x?}", register, buffer);
        Ok(())
    }

    /// Read a single register.
    pub async fn read_u8(&mut self, register: u8) -> Result<u8, RegisterError<I2C::Error>> {
        let mut buffer = [0u8; 1];
        self.read_block(register, &mut buffer).await?;
        Ok(buffer[0])
    }

    /// Read a `T` from `T::WIDTH` consecutive registers in the device byte order.
    pub async fn read<T: EndianInt>(
        &mut self,
        register: u8,
    ) -> Result<T, RegisterError<I2C::Error>> {
        let mut buffer = [0u8; MAX_VALUE_WIDTH];
        let bytes = buffer
            .get_mut(..T::WIDTH)
            .ok_or(Error::BufferTooSmall {
                required: T::WIDTH,
                actual: MAX_VALUE_WIDTH,
            })?;
        self.read_block(register, bytes).await?;
        Ok(T::read(self.config.byte_order, bytes)?)
    }

    /// Read two consecutive registers as a `u16`.
    pub async fn read_u16(&mut self, register: u8) -> Result<u16, RegisterError<I2C::Error>> {
        self.read::<u16>(register).await
    }

    /// Read three consecutive registers as a zero-extended 24-bit value.
    pub async fn read_u24(&mut self, register: u8) -> Result<u32, RegisterError<I2C::Error>> {
        let mut buffer = [0u8; 3];
        self.read_block(register, &mut buffer).await?;
        Ok(endian::read_u24(self.config.byte_order, &buffer)?)
    }

    /// Read an ADC sample from three registers and drop its unused low bits.
    pub async fn read_sample(&mut self, register: u8) -> Result<i32, RegisterError<I2C::Error>> {
        let raw = self.read_u24(register).await?;
        Ok(sample_from_raw(raw, self.config.sample_bits)?)
    }

    /// Write `data` to consecutive registers starting at `register`.
    ///
    /// # Errors
    /// [`Error::LengthError`] (as [`RegisterError::Decode`]) if `data` is
    /// longer than [`MAX_WRITE_LEN`]; nothing is sent in that case.
    pub async fn write_block(
        &mut self,
        register: u8,
        data: &[u8],
    ) -> Result<(), RegisterError<I2C::Error>> {
        let too_long = Error::LengthError {
            required: data.len(),
            actual: MAX_WRITE_LEN,
        };
        let mut frame: Vec<u8, WRITE_BUFFER_LEN> = Vec::new();
        frame.push(register).map_err(|_| too_long)?;
        frame.extend_from_slice(data).map_err(|_| too_long)?;

        debug!("Write {:#04x}: {:02x?}", register, data);
        self.i2c
            .write(self.config.address, &frame)
            .await
            .map_err(|e| {
                error!("Register write failed at {:#04x}: {:?}", register, e);
                RegisterError::Bus(e)
            })
    }

    /// Write a single register.
    pub async fn write_u8(
        &mut self,
        register: u8,
        value: u8,
    ) -> Result<(), RegisterError<I2C::Error>> {
        self.write_block(register, &[value]).await
    }

    /// Write `value` across `T::WIDTH` consecutive registers in the device byte order.
    pub async fn write<T: EndianInt>(
        &mut self,
        register: u8,
        value: T,
    ) -> Result<(), RegisterError<I2C::Error>> {
        let mut buffer = [0u8; MAX_VALUE_WIDTH];
        value.write(self.config.byte_order, &mut buffer)?;
        let bytes = buffer.get(..T::WIDTH).ok_or(Error::BufferTooSmall {
            required: T::WIDTH,
            actual: MAX_VALUE_WIDTH,
        })?;
        self.write_block(register, bytes).await
    }
}
