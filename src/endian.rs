//! Fixed-width integer codecs in big- and little-endian byte order.
//!
//! Reads take the first `W/8` bytes of the source and writes fill the first
//! `W/8` bytes of the destination. A buffer shorter than that fails with
//! [`Error::BufferTooSmall`] before anything is read or written; values are
//! never truncated or wrapped to fit.
//!
//! The named functions (`read_u16_be`, `write_i64_le`, ...) cover every
//! width, signedness and order. [`EndianInt`] and [`ByteOrder`] give the same
//! operations with the order chosen at runtime, which is how register-mapped
//! devices describe themselves.
//!
//! ```
//! use nanoiot_rs::endian::{self, ByteOrder};
//!
//! assert_eq!(endian::read_i16_be(&[0x12, 0x34])?, 0x1234);
//! assert_eq!(ByteOrder::Little.read::<i16>(&[0x12, 0x34])?, 0x3412);
//! # Ok::<(), nanoiot_rs::error::Error>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::view::{BoundedView, ReadView};

/// Byte order of a multi-byte integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ByteOrder {
    /// Most-significant byte at the lowest address
    #[default]
    Big,
    /// Least-significant byte at the lowest address
    Little,
}

impl ByteOrder {
    /// Decode a `T` from the start of `source`.
    #[inline]
    pub fn read<T: EndianInt>(self, source: &[u8]) -> Result<T> {
        T::read(self, source)
    }

    /// Encode `value` into the start of `destination`.
    #[inline]
    pub fn write<T: EndianInt>(self, destination: &mut [u8], value: T) -> Result<()> {
        value.write(self, destination)
    }
}

/// Integer types with a fixed-width byte encoding.
pub trait EndianInt: Sized + Copy {
    /// Encoded size in bytes.
    const WIDTH: usize;

    /// Decode from the first `WIDTH` bytes of `source`.
    ///
    /// # Errors
    /// [`Error::BufferTooSmall`] if `source` holds fewer than `WIDTH` bytes.
    fn read(order: ByteOrder, source: &[u8]) -> Result<Self>;

    /// Encode into the first `WIDTH` bytes of `destination`.
    ///
    /// # Errors
    /// [`Error::BufferTooSmall`] if `destination` holds fewer than `WIDTH` bytes.
    fn write(self, order: ByteOrder, destination: &mut [u8]) -> Result<()>;
}

/// First `N` bytes of `source` as an array.
#[inline]
fn head<const N: usize>(source: &[u8]) -> Result<[u8; N]> {
    source
        .first_chunk::<N>()
        .copied()
        .ok_or(Error::BufferTooSmall {
            required: N,
            actual: source.len(),
        })
}

/// First `N` bytes of `destination`, mutably.
#[inline]
fn head_mut<const N: usize>(destination: &mut [u8]) -> Result<&mut [u8; N]> {
    let actual = destination.len();
    destination
        .first_chunk_mut::<N>()
        .ok_or(Error::BufferTooSmall {
            required: N,
            actual,
        })
}

macro_rules! endian_int {
    ($ty:ty, $width:literal, $read_be:ident, $read_le:ident, $write_be:ident, $write_le:ident) => {
        impl EndianInt for $ty {
            const WIDTH: usize = $width;

            #[inline]
            fn read(order: ByteOrder, source: &[u8]) -> Result<Self> {
                match order {
                    ByteOrder::Big => $read_be(source),
                    ByteOrder::Little => $read_le(source),
                }
            }

            #[inline]
            fn write(self, order: ByteOrder, destination: &mut [u8]) -> Result<()> {
                match order {
                    ByteOrder::Big => $write_be(destination, self),
                    ByteOrder::Little => $write_le(destination, self),
                }
            }
        }

        #[doc = concat!("Read a `", stringify!($ty), "` from the start of `source`, big endian.")]
        #[inline]
        pub fn $read_be(source: &[u8]) -> Result<$ty> {
            head::<$width>(source).map(<$ty>::from_be_bytes)
        }

        #[doc = concat!("Read a `", stringify!($ty), "` from the start of `source`, little endian.")]
        #[inline]
        pub fn $read_le(source: &[u8]) -> Result<$ty> {
            head::<$width>(source).map(<$ty>::from_le_bytes)
        }

        #[doc = concat!("Write a `", stringify!($ty), "` to the start of `destination`, big endian.")]
        #[inline]
        pub fn $write_be(destination: &mut [u8], value: $ty) -> Result<()> {
            *head_mut::<$width>(destination)? = value.to_be_bytes();
            Ok(())
        }

        #[doc = concat!("Write a `", stringify!($ty), "` to the start of `destination`, little endian.")]
        #[inline]
        pub fn $write_le(destination: &mut [u8], value: $ty) -> Result<()> {
            *head_mut::<$width>(destination)? = value.to_le_bytes();
            Ok(())
        }
    };
}

endian_int!(i16, 2, read_i16_be, read_i16_le, write_i16_be, write_i16_le);
endian_int!(u16, 2, read_u16_be, read_u16_le, write_u16_be, write_u16_le);
endian_int!(i32, 4, read_i32_be, read_i32_le, write_i32_be, write_i32_le);
endian_int!(u32, 4, read_u32_be, read_u32_le, write_u32_be, write_u32_le);
endian_int!(i64, 8, read_i64_be, read_i64_le, write_i64_be, write_i64_le);
endian_int!(u64, 8, read_u64_be, read_u64_le, write_u64_be, write_u64_le);

/// Bytes `offset..` of `buffer`, or `BufferTooSmall` if fewer than `width` remain.
#[inline]
fn tail(buffer: &[u8], offset: usize, width: usize) -> Result<&[u8]> {
    buffer
        .get(offset..)
        .filter(|rest| rest.len() >= width)
        .ok_or(Error::BufferTooSmall {
            required: width,
            actual: buffer.len().saturating_sub(offset),
        })
}

/// Decode a `T` starting `offset` bytes into `source`.
///
/// # Errors
/// [`Error::BufferTooSmall`] if fewer than `T::WIDTH` bytes follow `offset`.
pub fn read_at<T: EndianInt>(order: ByteOrder, source: &[u8], offset: usize) -> Result<T> {
    T::read(order, tail(source, offset, T::WIDTH)?)
}

/// Encode `value` starting `offset` bytes into `destination`.
///
/// # Errors
/// [`Error::BufferTooSmall`] if fewer than `T::WIDTH` bytes follow `offset`.
pub fn write_at<T: EndianInt>(
    order: ByteOrder,
    destination: &mut [u8],
    offset: usize,
    value: T,
) -> Result<()> {
    let available = destination.len().saturating_sub(offset);
    match destination.get_mut(offset..) {
        Some(rest) if rest.len() >= T::WIDTH => value.write(order, rest),
        _ => Err(Error::BufferTooSmall {
            required: T::WIDTH,
            actual: available,
        }),
    }
}

/// Read a 24-bit unsigned value, zero-extended into a `u32`.
///
/// Register-mapped ADCs commonly expose one sample as three consecutive
/// registers.
pub fn read_u24(order: ByteOrder, source: &[u8]) -> Result<u32> {
    let [a, b, c] = head::<3>(source)?;
    Ok(match order {
        ByteOrder::Big => u32::from_be_bytes([0, a, b, c]),
        ByteOrder::Little => u32::from_le_bytes([a, b, c, 0]),
    })
}

/// Read a 24-bit two's-complement value, sign-extended into an `i32`.
pub fn read_i24(order: ByteOrder, source: &[u8]) -> Result<i32> {
    let raw = read_u24(order, source)?;
    Ok(((raw << 8) as i32) >> 8)
}

// =============================================================================
// Sequential reader
// =============================================================================

/// Cursor that decodes consecutive integers from a byte view.
///
/// A failed read leaves the cursor where it was.
#[derive(Debug, Clone, Copy)]
pub struct ByteReader<'a> {
    view: BoundedView<'a, u8>,
    position: usize,
    order: ByteOrder,
}

impl<'a> ByteReader<'a> {
    /// Reader over `view`, decoding in `order`.
    pub const fn new(view: BoundedView<'a, u8>, order: ByteOrder) -> Self {
        Self {
            view,
            position: 0,
            order,
        }
    }

    /// Byte order used for every read.
    pub const fn order(&self) -> ByteOrder {
        self.order
    }

    /// Bytes consumed so far.
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.view.len() - self.position
    }

    /// View of the next `count` bytes, advancing past them.
    ///
    /// # Errors
    /// [`Error::BufferTooSmall`] if fewer than `count` bytes remain.
    pub fn take(&mut self, count: usize) -> Result<BoundedView<'a, u8>> {
        let remaining = self.remaining();
        let chunk = self
            .view
            .slice(self.position, count)
            .map_err(|_| Error::BufferTooSmall {
                required: count,
                actual: remaining,
            })?;
        self.position += count;
        Ok(chunk)
    }

    /// Decode the next `T`.
    pub fn read<T: EndianInt>(&mut self) -> Result<T> {
        let chunk = self.take(T::WIDTH)?;
        T::read(self.order, chunk.as_slice())
    }

    /// Decode the next 24-bit unsigned value.
    pub fn read_u24(&mut self) -> Result<u32> {
        let chunk = self.take(3)?;
        read_u24(self.order, chunk.as_slice())
    }

    /// Skip `count` bytes.
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.take(count).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_i16_orders() {
        assert_eq!(read_i16_be(&[0x12, 0x34]), Ok(0x1234));
        assert_eq!(read_i16_le(&[0x12, 0x34]), Ok(0x3412));
    }

    #[test]
    fn test_read_u32_be() {
        assert_eq!(read_u32_be(&[0x00, 0x00, 0x01, 0x00]), Ok(256));
        assert_eq!(read_u32_le(&[0x00, 0x00, 0x01, 0x00]), Ok(0x0001_0000));
    }

    #[test]
    fn test_signed_reinterpretation() {
        assert_eq!(read_i16_be(&[0xFF, 0xFE]), Ok(-2));
        assert_eq!(read_u16_be(&[0xFF, 0xFE]), Ok(0xFFFE));
        assert_eq!(read_i32_le(&[0x00, 0x00, 0x00, 0x80]), Ok(i32::MIN));
        assert_eq!(read_i64_be(&[0x80, 0, 0, 0, 0, 0, 0, 0]), Ok(i64::MIN));
    }

    #[test]
    fn test_read_u64_byte_positions() {
        let bytes = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
        assert_eq!(read_u64_be(&bytes), Ok(0x0102_0304_0506_0708));
        assert_eq!(read_u64_le(&bytes), Ok(0x0807_0605_0403_0201));
    }

    #[test]
    fn test_write_i64_le_minus_one() {
        let mut buffer = [0u8; 8];
        write_i64_le(&mut buffer, -1).unwrap();
        assert_eq!(buffer, [0xFF; 8]);
    }

    #[test]
    fn test_write_places_msb_first_for_big_endian() {
        let mut buffer = [0u8; 4];
        write_u32_be(&mut buffer, 0xDEAD_BEEF).unwrap();
        assert_eq!(buffer, [0xDE, 0xAD, 0xBE, 0xEF]);
        write_u32_le(&mut buffer, 0xDEAD_BEEF).unwrap();
        assert_eq!(buffer, [0xEF, 0xBE, 0xAD, 0xDE]);
    }

    #[test]
    fn test_reads_ignore_trailing_bytes() {
        assert_eq!(read_u16_be(&[0x00, 0x01, 0xFF, 0xFF]), Ok(1));
    }

    #[test]
    fn test_short_buffers_fail_for_every_width() {
        let short = [0u8; 7];
        for len in 0..2 {
            assert_eq!(
                read_u16_be(&short[..len]),
                Err(Error::BufferTooSmall {
                    required: 2,
                    actual: len
                })
            );
            assert!(read_i16_le(&short[..len]).is_err());
            assert!(write_u16_le(&mut [0u8; 1][..len], 1).is_err());
        }
        for len in 0..4 {
            assert!(read_i32_be(&short[..len]).is_err());
            assert!(read_u32_le(&short[..len]).is_err());
            let mut dst = [0u8; 3];
            assert!(write_i32_be(&mut dst[..len.min(3)], 1).is_err());
        }
        for len in 0..8 {
            assert!(read_u64_be(&short[..len]).is_err());
            assert!(read_i64_le(&short[..len]).is_err());
            let mut dst = [0u8; 7];
            assert!(write_u64_le(&mut dst[..len], 1).is_err());
        }
    }

    #[test]
    fn test_every_write_rejects_short_buffers() {
        let mut backing = [0u8; 7];
        for len in 0..2 {
            let dst = &mut backing[..len];
            assert!(write_u16_be(dst, 1).is_err());
            assert!(write_u16_le(dst, 1).is_err());
            assert!(write_i16_be(dst, -1).is_err());
            assert!(write_i16_le(dst, -1).is_err());
        }
        for len in 0..4 {
            let dst = &mut backing[..len];
            assert!(write_u32_be(dst, 1).is_err());
            assert!(write_u32_le(dst, 1).is_err());
            assert!(write_i32_be(dst, -1).is_err());
            assert!(write_i32_le(dst, -1).is_err());
        }
        for len in 0..8 {
            let dst = &mut backing[..len];
            assert!(write_u64_be(dst, 1).is_err());
            assert!(write_u64_le(dst, 1).is_err());
            assert!(write_i64_be(dst, -1).is_err());
            assert!(write_i64_le(dst, -1).is_err());
        }
        assert_eq!(backing, [0; 7]);
    }

    #[test]
    fn test_failed_write_leaves_buffer_untouched() {
        let mut buffer = [0xAAu8; 3];
        assert!(write_u32_be(&mut buffer, 0).is_err());
        assert_eq!(buffer, [0xAA; 3]);
    }

    #[test]
    fn test_byte_order_dispatch() {
        let mut buffer = [0u8; 2];
        ByteOrder::Little.write(&mut buffer, 0x0102u16).unwrap();
        assert_eq!(buffer, [0x02, 0x01]);
        assert_eq!(ByteOrder::Little.read::<u16>(&buffer), Ok(0x0102));
        assert_eq!(ByteOrder::Big.read::<u16>(&buffer), Ok(0x0201));
    }

    #[test]
    fn test_read_write_at_offset() {
        let mut buffer = [0u8; 6];
        write_at(ByteOrder::Big, &mut buffer, 2, 0x1122_3344u32).unwrap();
        assert_eq!(buffer, [0, 0, 0x11, 0x22, 0x33, 0x44]);
        assert_eq!(read_at::<u32>(ByteOrder::Big, &buffer, 2), Ok(0x1122_3344));
        assert_eq!(
            read_at::<u32>(ByteOrder::Big, &buffer, 3),
            Err(Error::BufferTooSmall {
                required: 4,
                actual: 3
            })
        );
        assert_eq!(
            write_at(ByteOrder::Little, &mut buffer, 9, 1u16),
            Err(Error::BufferTooSmall {
                required: 2,
                actual: 0
            })
        );
    }

    #[test]
    fn test_read_24_bit_values() {
        assert_eq!(read_u24(ByteOrder::Big, &[0x12, 0x34, 0x56]), Ok(0x12_3456));
        assert_eq!(read_u24(ByteOrder::Little, &[0x12, 0x34, 0x56]), Ok(0x56_3412));
        assert_eq!(read_i24(ByteOrder::Big, &[0xFF, 0xFF, 0xFE]), Ok(-2));
        assert_eq!(read_i24(ByteOrder::Big, &[0x7F, 0xFF, 0xFF]), Ok(0x7F_FFFF));
        assert!(read_u24(ByteOrder::Big, &[0x12, 0x34]).is_err());
    }

    #[test]
    fn test_reader_sequential_u16() {
        let bytes = [0x00, 0x01, 0x00, 0x02];
        let mut reader = ByteReader::new(BoundedView::new(&bytes), ByteOrder::Big);
        assert_eq!(reader.read::<u16>(), Ok(1));
        assert_eq!(reader.read::<u16>(), Ok(2));
        assert_eq!(reader.remaining(), 0);
        assert!(reader.read::<u16>().is_err());
    }

    #[test]
    fn test_reader_failure_does_not_advance() {
        let bytes = [0x01, 0x02, 0x03, 0x04, 0x05];
        let mut reader = ByteReader::new(BoundedView::new(&bytes), ByteOrder::Little);
        reader.skip(2).unwrap();
        assert_eq!(
            reader.read::<u32>(),
            Err(Error::BufferTooSmall {
                required: 4,
                actual: 3
            })
        );
        assert_eq!(reader.position(), 2);
        assert_eq!(reader.read_u24(), Ok(0x05_0403));
    }
}
