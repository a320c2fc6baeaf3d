//! Property tests for the endian codecs and bounded views.

use nanoiot_rs::endian::{self, ByteOrder, EndianInt};
use nanoiot_rs::{BoundedView, Error, ReadView};
use proptest::prelude::*;

fn arb_order() -> impl Strategy<Value = ByteOrder> {
    prop_oneof![Just(ByteOrder::Big), Just(ByteOrder::Little)]
}

fn round_trip<T>(order: ByteOrder, value: T) -> Result<T, Error>
where
    T: EndianInt + PartialEq + core::fmt::Debug,
{
    let mut buffer = [0u8; 8];
    order.write(&mut buffer[..T::WIDTH], value)?;
    order.read::<T>(&buffer[..T::WIDTH])
}

proptest! {
    #[test]
    fn roundtrip_16(order in arb_order(), signed in any::<i16>(), unsigned in any::<u16>()) {
        prop_assert_eq!(round_trip(order, signed), Ok(signed));
        prop_assert_eq!(round_trip(order, unsigned), Ok(unsigned));
    }

    #[test]
    fn roundtrip_32(order in arb_order(), signed in any::<i32>(), unsigned in any::<u32>()) {
        prop_assert_eq!(round_trip(order, signed), Ok(signed));
        prop_assert_eq!(round_trip(order, unsigned), Ok(unsigned));
    }

    #[test]
    fn roundtrip_64(order in arb_order(), signed in any::<i64>(), unsigned in any::<u64>()) {
        prop_assert_eq!(round_trip(order, signed), Ok(signed));
        prop_assert_eq!(round_trip(order, unsigned), Ok(unsigned));
    }

    /// Big and little endian encodings of the same value are byte reversals.
    #[test]
    fn orders_are_reversed(value in any::<u32>()) {
        let mut big = [0u8; 4];
        let mut little = [0u8; 4];
        endian::write_u32_be(&mut big, value).unwrap();
        endian::write_u32_le(&mut little, value).unwrap();
        little.reverse();
        prop_assert_eq!(big, little);
    }

    /// Signed and unsigned reads see the same bits.
    #[test]
    fn signedness_shares_bits(bytes in any::<[u8; 8]>(), order in arb_order()) {
        let signed = order.read::<i64>(&bytes).unwrap();
        let unsigned = order.read::<u64>(&bytes).unwrap();
        prop_assert_eq!(signed as u64, unsigned);
    }

    #[test]
    fn short_buffers_are_rejected(len in 0usize..8, order in arb_order()) {
        let bytes = vec![0u8; len];
        prop_assert_eq!(
            order.read::<u64>(&bytes),
            Err(Error::BufferTooSmall { required: 8, actual: len })
        );
        if len < 4 {
            prop_assert!(order.read::<i32>(&bytes).is_err());
        }
        if len < 2 {
            prop_assert!(order.read::<u16>(&bytes).is_err());
        }
    }

    #[test]
    fn view_construction_matches_bounds(size in 0usize..32, start in 0usize..40, length in 0usize..40) {
        let buffer = vec![0u8; size];
        let result = BoundedView::with_range(&buffer, start, length);
        prop_assert_eq!(result.is_ok(), start + length <= size);
    }

    #[test]
    fn view_slice_lengths(size in 1usize..32, start in 0usize..32, k in 0usize..40) {
        let buffer: Vec<u8> = (0..size as u8).collect();
        let start = start % size;
        let view = BoundedView::with_range(&buffer, start, size - start).unwrap();
        let n = view.len();
        match view.slice_from(k) {
            Ok(sliced) => {
                prop_assert!(k <= n);
                prop_assert_eq!(sliced.len(), n - k);
                prop_assert_eq!(sliced.as_slice(), &buffer[start + k..]);
            }
            Err(_) => prop_assert!(k > n),
        }
    }
}
