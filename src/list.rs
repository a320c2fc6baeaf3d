//! Growable, index-addressable list with checked positional operations.
//!
//! [`GrowableList`] keeps insertion order and allows duplicates. Appends are
//! amortized O(1); insertion and removal shift the tail and are linear.
//! Searches compare elements by value (`PartialEq`), so two distinct
//! allocations holding equal data are the same element as far as
//! [`GrowableList::contains`], [`GrowableList::remove`] and the `index_of`
//! family are concerned.
//!
//! Positional arguments are validated up front: an insertion point past the
//! end, or an index/range outside the list, is an [`Error::OutOfRange`] and
//! leaves the list untouched.

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::{self, Vec};
use core::slice::Iter;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Resizable ordered container.
///
/// Not synchronized: sharing one list between threads needs an external lock.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GrowableList<T> {
    items: Vec<T>,
}

impl<T> Default for GrowableList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> GrowableList<T> {
    /// Create an empty list.
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Create an empty list with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Number of elements.
    #[inline]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Elements the list can hold without reallocating. Always `>= count()`.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Make room for at least `additional` more elements.
    pub fn reserve(&mut self, additional: usize) {
        self.items.reserve(additional);
    }

    /// Append `item` at the end.
    pub fn add(&mut self, item: T) {
        if self.items.len() == self.items.capacity() {
            trace!("GrowableList: growing past capacity {}", self.items.capacity());
        }
        self.items.push(item);
    }

    /// Append every item of `items`, preserving order.
    pub fn add_range<I: IntoIterator<Item = T>>(&mut self, items: I) {
        self.items.extend(items);
    }

    /// Insert `item` at `index`, shifting later elements up by one.
    ///
    /// # Errors
    /// [`Error::OutOfRange`] if `index > count()`.
    pub fn insert(&mut self, index: usize, item: T) -> Result<()> {
        self.check_insertion_point(index)?;
        self.items.insert(index, item);
        Ok(())
    }

    /// Insert every item of `items` starting at `index`, in order.
    ///
    /// # Errors
    /// [`Error::OutOfRange`] if `index > count()`.
    pub fn insert_range<I: IntoIterator<Item = T>>(&mut self, index: usize, items: I) -> Result<()> {
        self.check_insertion_point(index)?;
        self.items.splice(index..index, items);
        Ok(())
    }

    /// Remove and return the element at `index`, shifting later elements down.
    ///
    /// # Errors
    /// [`Error::OutOfRange`] if `index >= count()`.
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        self.check_index(index)?;
        Ok(self.items.remove(index))
    }

    /// Remove `count` elements starting at `index`.
    ///
    /// # Errors
    /// [`Error::OutOfRange`] if `index + count > count()`.
    pub fn remove_range(&mut self, index: usize, count: usize) -> Result<()> {
        let end = self.check_range(index, count)?;
        self.items.drain(index..end);
        Ok(())
    }

    /// Remove every element. Capacity is kept.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Element at `index`.
    ///
    /// # Errors
    /// [`Error::OutOfRange`] if `index >= count()`.
    pub fn get(&self, index: usize) -> Result<&T> {
        self.items
            .get(index)
            .ok_or(Error::out_of_range(index, self.items.len()))
    }

    /// Mutable reference to the element at `index`.
    ///
    /// # Errors
    /// [`Error::OutOfRange`] if `index >= count()`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        let bound = self.items.len();
        self.items
            .get_mut(index)
            .ok_or(Error::out_of_range(index, bound))
    }

    /// Replace the element at `index`, returning the previous one.
    ///
    /// # Errors
    /// [`Error::OutOfRange`] if `index >= count()`.
    pub fn set(&mut self, index: usize, item: T) -> Result<T> {
        Ok(core::mem::replace(self.get_mut(index)?, item))
    }

    /// Iterate over the elements in order.
    pub fn iter(&self) -> Iter<'_, T> {
        self.items.iter()
    }

    /// The elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Consume the list, returning its elements.
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(Error::out_of_range(index, self.items.len()))
        }
    }

    fn check_insertion_point(&self, index: usize) -> Result<()> {
        if index <= self.items.len() {
            Ok(())
        } else {
            Err(Error::out_of_range(index, self.items.len()))
        }
    }

    /// Validate `index..index + count`, returning the exclusive end.
    fn check_range(&self, index: usize, count: usize) -> Result<usize> {
        let len = self.items.len();
        match index.checked_add(count) {
            Some(end) if end <= len => Ok(end),
            Some(end) => Err(Error::out_of_range(end, len)),
            None => Err(Error::out_of_range(usize::MAX, len)),
        }
    }
}

impl<T: Clone> GrowableList<T> {
    /// Independent list holding a copy of `count` elements starting at `index`.
    ///
    /// # Errors
    /// [`Error::OutOfRange`] if `index + count > count()`.
    pub fn get_range(&self, index: usize, count: usize) -> Result<Self> {
        let end = self.check_range(index, count)?;
        Ok(Self {
            items: self.items[index..end].to_vec(),
        })
    }

    /// Copy every element into `destination` starting at `destination_index`.
    ///
    /// # Errors
    /// [`Error::LengthError`] if `destination` has fewer than `count()` slots
    /// from `destination_index` onwards.
    pub fn copy_to(&self, destination: &mut [T], destination_index: usize) -> Result<()> {
        let available = destination.len().saturating_sub(destination_index);
        let target = destination_index
            .checked_add(self.items.len())
            .and_then(|end| destination.get_mut(destination_index..end))
            .ok_or(Error::LengthError {
                required: self.items.len(),
                actual: available,
            })?;
        target.clone_from_slice(&self.items);
        Ok(())
    }

    /// Copy `count` elements starting at `index` into `destination` at
    /// `destination_index`.
    ///
    /// # Errors
    /// [`Error::OutOfRange`] if `index + count > count()`, or
    /// [`Error::LengthError`] if `destination` has fewer than `count` slots
    /// from `destination_index` onwards.
    pub fn copy_range_to(
        &self,
        index: usize,
        destination: &mut [T],
        destination_index: usize,
        count: usize,
    ) -> Result<()> {
        let end = self.check_range(index, count)?;
        let available = destination.len().saturating_sub(destination_index);
        let target = destination_index
            .checked_add(count)
            .and_then(|dest_end| destination.get_mut(destination_index..dest_end))
            .ok_or(Error::LengthError {
                required: count,
                actual: available,
            })?;
        target.clone_from_slice(&self.items[index..end]);
        Ok(())
    }

    /// Copy the elements into a new fixed-size boxed slice.
    pub fn to_boxed_slice(&self) -> Box<[T]> {
        self.items.clone().into_boxed_slice()
    }
}

impl<T: PartialEq> GrowableList<T> {
    /// Whether any element equals `item`.
    pub fn contains(&self, item: &T) -> bool {
        self.items.iter().any(|candidate| candidate == item)
    }

    /// Remove the first element equal to `item`. Returns whether one was removed.
    pub fn remove(&mut self, item: &T) -> bool {
        match self.index_of(item) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Index of the first element equal to `item`.
    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.items.iter().position(|candidate| candidate == item)
    }

    /// Index of the first element equal to `item` at or after `start`.
    ///
    /// # Errors
    /// [`Error::OutOfRange`] if `start > count()`.
    pub fn index_of_from(&self, item: &T, start: usize) -> Result<Option<usize>> {
        self.index_of_in(item, start, self.items.len().saturating_sub(start))
    }

    /// Index of the first element equal to `item` within `start..start + count`.
    ///
    /// # Errors
    /// [`Error::OutOfRange`] if `start + count > count()`.
    pub fn index_of_in(&self, item: &T, start: usize, count: usize) -> Result<Option<usize>> {
        self.check_insertion_point(start)?;
        let end = self.check_range(start, count)?;
        Ok(self.items[start..end]
            .iter()
            .position(|candidate| candidate == item)
            .map(|offset| start + offset))
    }

    /// Index of the last element equal to `item`.
    pub fn last_index_of(&self, item: &T) -> Option<usize> {
        self.items.iter().rposition(|candidate| candidate == item)
    }

    /// Index of the last element equal to `item` at or before `index`.
    ///
    /// # Errors
    /// [`Error::OutOfRange`] if `index >= count()`.
    pub fn last_index_of_from(&self, item: &T, index: usize) -> Result<Option<usize>> {
        self.last_index_of_in(item, index, index.saturating_add(1))
    }

    /// Index of the last element equal to `item` among the `count` elements
    /// ending at `index` (`index + 1 - count ..= index`), scanning backwards.
    ///
    /// # Errors
    /// [`Error::OutOfRange`] if `index >= count()` or `count > index + 1`.
    /// An empty list with `count == 0` searches nothing and succeeds.
    pub fn last_index_of_in(&self, item: &T, index: usize, count: usize) -> Result<Option<usize>> {
        if self.items.is_empty() && count == 0 {
            return Ok(None);
        }
        self.check_index(index)?;
        let first = (index + 1)
            .checked_sub(count)
            .ok_or(Error::out_of_range(count, index + 1))?;
        Ok(self.items[first..=index]
            .iter()
            .rposition(|candidate| candidate == item)
            .map(|offset| first + offset))
    }
}

impl<T> FromIterator<T> for GrowableList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: Vec::from_iter(iter),
        }
    }
}

impl<T> Extend<T> for GrowableList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.add_range(iter);
    }
}

impl<T> From<Vec<T>> for GrowableList<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> IntoIterator for GrowableList<T> {
    type Item = T;
    type IntoIter = vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a GrowableList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
