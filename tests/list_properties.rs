//! Property tests for `GrowableList` against a plain linear scan.

use nanoiot_rs::GrowableList;
use proptest::prelude::*;

fn arb_values() -> impl Strategy<Value = Vec<u8>> {
    // Small alphabet so duplicates are common
    prop::collection::vec(0u8..4, 0..24)
}

proptest! {
    #[test]
    fn insert_then_remove_restores(values in arb_values(), index in 0usize..32, item in any::<u8>()) {
        let original: GrowableList<u8> = values.iter().copied().collect();
        let mut list = original.clone();
        let result = list.insert(index, item);
        if index <= values.len() {
            prop_assert!(result.is_ok());
            prop_assert_eq!(list.count(), values.len() + 1);
            prop_assert_eq!(list.get(index), Ok(&item));
            prop_assert_eq!(list.remove_at(index), Ok(item));
        } else {
            prop_assert!(result.is_err());
        }
        prop_assert_eq!(list, original);
    }

    #[test]
    fn remove_at_shifts_down(values in arb_values(), index in 0usize..24) {
        let mut list: GrowableList<u8> = values.iter().copied().collect();
        if index < values.len() {
            prop_assert_eq!(list.remove_at(index), Ok(values[index]));
            let mut expected = values.clone();
            expected.remove(index);
            prop_assert_eq!(list.as_slice(), expected.as_slice());
        } else {
            prop_assert!(list.remove_at(index).is_err());
            prop_assert_eq!(list.count(), values.len());
        }
    }

    #[test]
    fn searches_match_linear_scan(values in arb_values(), item in 0u8..4) {
        let list: GrowableList<u8> = values.iter().copied().collect();
        let first = (0..values.len()).find(|&i| values[i] == item);
        let last = (0..values.len()).rev().find(|&i| values[i] == item);
        prop_assert_eq!(list.index_of(&item), first);
        prop_assert_eq!(list.last_index_of(&item), last);
        prop_assert_eq!(list.contains(&item), first.is_some());
    }

    #[test]
    fn bounded_searches_match_linear_scan(
        values in arb_values(),
        item in 0u8..4,
        start in 0usize..24,
        count in 0usize..24,
    ) {
        let list: GrowableList<u8> = values.iter().copied().collect();

        let forward = list.index_of_in(&item, start, count);
        if start + count <= values.len() {
            let expected = (start..start + count).find(|&i| values[i] == item);
            prop_assert_eq!(forward, Ok(expected));
        } else {
            prop_assert!(forward.is_err());
        }

        let backward = list.last_index_of_in(&item, start, count);
        if start < values.len() && count <= start + 1 {
            let expected = (start + 1 - count..=start).rev().find(|&i| values[i] == item);
            prop_assert_eq!(backward, Ok(expected));
        } else if !(values.is_empty() && count == 0) {
            prop_assert!(backward.is_err());
        }
    }

    #[test]
    fn remove_drops_first_equal(values in arb_values(), item in 0u8..4) {
        let mut list: GrowableList<u8> = values.iter().copied().collect();
        let mut expected = values.clone();
        let position = expected.iter().position(|v| *v == item);
        if let Some(index) = position {
            expected.remove(index);
        }
        prop_assert_eq!(list.remove(&item), position.is_some());
        prop_assert_eq!(list.as_slice(), expected.as_slice());
    }
}
