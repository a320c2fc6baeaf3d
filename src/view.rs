//! Bounds-checked, non-owning views over contiguous buffers.
//!
//! A view records the buffer it borrows, a start offset and a length. Logical
//! index `i` always resolves to physical index `start + i`, and every access
//! is checked against the view's own length, never the buffer's, so a view
//! can not read the bytes that sit next to it.
//!
//! Read-only and mutable access are separate types. Both implement
//! [`ReadView`]; only [`BoundedViewMut`] can write. The borrow checker ties
//! each view to the buffer it was cut from, and slicing never copies.
//!
//! Views are plain borrows and carry no synchronization of their own.
//!
//! # Examples
//!
//! ```
//! use nanoiot_rs::view::{BoundedView, ReadView};
//!
//! let registers = [0x00, 0x01, 0x00, 0x02];
//! let view = BoundedView::new(&registers);
//! let second = view.slice(2, 2)?;
//! assert_eq!(second.at(1)?, 0x02);
//! # Ok::<(), nanoiot_rs::error::Error>(())
//! ```

extern crate alloc;

use alloc::vec::Vec;
use core::slice::Iter;

use crate::error::{Error, Result};

/// Read-only view over a byte buffer.
pub type ByteView<'a> = BoundedView<'a, u8>;

/// Mutable view over a byte buffer.
pub type ByteViewMut<'a> = BoundedViewMut<'a, u8>;

/// Read access shared by [`BoundedView`] and [`BoundedViewMut`].
pub trait ReadView<T: Copy> {
    /// The viewed elements as a plain slice.
    fn as_slice(&self) -> &[T];

    /// Number of elements in the view.
    #[inline]
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Whether the view holds no elements.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at logical `index`.
    ///
    /// # Errors
    /// [`Error::OutOfRange`] if `index >= len()`.
    #[inline]
    fn at(&self, index: usize) -> Result<T> {
        let elements = self.as_slice();
        elements
            .get(index)
            .copied()
            .ok_or(Error::out_of_range(index, elements.len()))
    }

    /// Copy every element into `destination`, starting at its index 0.
    ///
    /// # Errors
    /// [`Error::LengthError`] if `destination` is shorter than this view.
    fn copy_to_slice(&self, destination: &mut [T]) -> Result<()> {
        let source = self.as_slice();
        let actual = destination.len();
        let target = destination
            .get_mut(..source.len())
            .ok_or(Error::LengthError {
                required: source.len(),
                actual,
            })?;
        target.copy_from_slice(source);
        Ok(())
    }

    /// Copy every element into another view, starting at its index 0.
    ///
    /// # Errors
    /// [`Error::LengthError`] if `destination` is shorter than this view.
    fn copy_to(&self, destination: &mut BoundedViewMut<'_, T>) -> Result<()> {
        self.copy_to_slice(destination.as_mut_slice())
    }

    /// Copy the viewed elements into a freshly allocated vector.
    fn to_vec(&self) -> Vec<T> {
        self.as_slice().to_vec()
    }
}

/// Validate `start..start + length` against a buffer of `buffer_len` elements.
///
/// An empty buffer only admits `start == 0 && length == 0`, which falls out of
/// the same check.
fn check_range(buffer_len: usize, start: usize, length: usize) -> Result<()> {
    match start.checked_add(length) {
        Some(end) if end <= buffer_len => Ok(()),
        Some(end) => Err(Error::out_of_range(end, buffer_len)),
        None => Err(Error::out_of_range(usize::MAX, buffer_len)),
    }
}

/// Validate a `(from, count)` sub-range of a view of `length` elements.
fn check_slice(length: usize, from: usize, count: usize) -> Result<()> {
    if from > length {
        return Err(Error::out_of_range(from, length));
    }
    check_range(length, from, count)
}

// =============================================================================
// Read-only view
// =============================================================================

/// Non-owning, bounds-checked, read-only view over part of a buffer.
#[derive(Debug, Clone, Copy)]
pub struct BoundedView<'a, T> {
    buffer: &'a [T],
    start: usize,
    length: usize,
}

impl<T> Default for BoundedView<'_, T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a, T: Copy> From<&'a [T]> for BoundedView<'a, T> {
    fn from(buffer: &'a [T]) -> Self {
        Self::new(buffer)
    }
}

impl<'a, T: Copy, const N: usize> From<&'a [T; N]> for BoundedView<'a, T> {
    fn from(buffer: &'a [T; N]) -> Self {
        Self::new(buffer)
    }
}

impl<T> BoundedView<'_, T> {
    /// A zero-length view that borrows nothing.
    pub const fn empty() -> Self {
        Self {
            buffer: &[],
            start: 0,
            length: 0,
        }
    }
}

impl<'a, T: Copy> BoundedView<'a, T> {
    /// View over the entire buffer.
    pub const fn new(buffer: &'a [T]) -> Self {
        Self {
            buffer,
            start: 0,
            length: buffer.len(),
        }
    }

    /// View over `length` elements of `buffer` starting at `start`.
    ///
    /// # Errors
    /// [`Error::OutOfRange`] if `start + length` exceeds the buffer.
    pub fn with_range(buffer: &'a [T], start: usize, length: usize) -> Result<Self> {
        check_range(buffer.len(), start, length)?;
        Ok(Self {
            buffer,
            start,
            length,
        })
    }

    /// Physical offset of this view's first element within the buffer.
    #[inline]
    pub const fn offset(&self) -> usize {
        self.start
    }

    /// View of everything from logical index `from` to the end.
    ///
    /// # Errors
    /// [`Error::OutOfRange`] if `from > len()`.
    pub fn slice_from(&self, from: usize) -> Result<Self> {
        self.slice(from, self.length.saturating_sub(from))
    }

    /// View of exactly `count` elements starting at logical index `from`.
    ///
    /// The new view borrows the same buffer; nothing is copied.
    ///
    /// # Errors
    /// [`Error::OutOfRange`] if `from + count > len()`.
    pub fn slice(&self, from: usize, count: usize) -> Result<Self> {
        check_slice(self.length, from, count)?;
        Ok(Self {
            buffer: self.buffer,
            start: self.start + from,
            length: count,
        })
    }

    /// Iterate over the viewed elements.
    pub fn iter(&self) -> Iter<'a, T> {
        self.elements().iter()
    }

    /// Viewed elements, borrowed for the full buffer lifetime.
    #[inline]
    fn elements(&self) -> &'a [T] {
        // start + length <= buffer.len() holds from construction
        &self.buffer[self.start..self.start + self.length]
    }
}

impl<T: Copy> ReadView<T> for BoundedView<'_, T> {
    #[inline]
    fn as_slice(&self) -> &[T] {
        self.elements()
    }

    #[inline]
    fn len(&self) -> usize {
        self.length
    }
}

impl<'a, T: Copy> IntoIterator for BoundedView<'a, T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements().iter()
    }
}

// =============================================================================
// Mutable view
// =============================================================================

/// Non-owning, bounds-checked view that writes through to its buffer.
#[derive(Debug)]
pub struct BoundedViewMut<'a, T> {
    buffer: &'a mut [T],
    start: usize,
    length: usize,
}

impl<T> Default for BoundedViewMut<'_, T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a, T: Copy> From<&'a mut [T]> for BoundedViewMut<'a, T> {
    fn from(buffer: &'a mut [T]) -> Self {
        Self::new(buffer)
    }
}

impl<'a, T: Copy, const N: usize> From<&'a mut [T; N]> for BoundedViewMut<'a, T> {
    fn from(buffer: &'a mut [T; N]) -> Self {
        Self::new(buffer)
    }
}

impl<T> BoundedViewMut<'_, T> {
    /// A zero-length view that borrows nothing.
    pub fn empty() -> Self {
        Self {
            buffer: &mut [],
            start: 0,
            length: 0,
        }
    }
}

impl<'a, T: Copy> BoundedViewMut<'a, T> {
    /// Mutable view over the entire buffer.
    pub fn new(buffer: &'a mut [T]) -> Self {
        let length = buffer.len();
        Self {
            buffer,
            start: 0,
            length,
        }
    }

    /// Mutable view over `length` elements of `buffer` starting at `start`.
    ///
    /// # Errors
    /// [`Error::OutOfRange`] if `start + length` exceeds the buffer.
    pub fn with_range(buffer: &'a mut [T], start: usize, length: usize) -> Result<Self> {
        check_range(buffer.len(), start, length)?;
        Ok(Self {
            buffer,
            start,
            length,
        })
    }

    /// Physical offset of this view's first element within the buffer.
    #[inline]
    pub const fn offset(&self) -> usize {
        self.start
    }

    /// Overwrite the element at logical `index`.
    ///
    /// # Errors
    /// [`Error::OutOfRange`] if `index >= len()`.
    #[inline]
    pub fn set(&mut self, index: usize, value: T) -> Result<()> {
        *self.at_mut(index)? = value;
        Ok(())
    }

    /// Mutable reference to the element at logical `index`.
    ///
    /// # Errors
    /// [`Error::OutOfRange`] if `index >= len()`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        let length = self.length;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(Error::out_of_range(index, length))
    }

    /// The viewed elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.buffer[self.start..self.start + self.length]
    }

    /// Set every viewed element to `value`.
    pub fn fill(&mut self, value: T) {
        self.as_mut_slice().fill(value);
    }

    /// Read-only view of the same elements.
    pub fn as_view(&self) -> BoundedView<'_, T> {
        BoundedView {
            buffer: &*self.buffer,
            start: self.start,
            length: self.length,
        }
    }

    /// Read-only view of `count` elements starting at logical index `from`.
    ///
    /// # Errors
    /// [`Error::OutOfRange`] if `from + count > len()`.
    pub fn slice(&self, from: usize, count: usize) -> Result<BoundedView<'_, T>> {
        self.as_view().slice(from, count)
    }

    /// Mutable view of everything from logical index `from` to the end,
    /// reborrowed from this one.
    ///
    /// # Errors
    /// [`Error::OutOfRange`] if `from > len()`.
    pub fn slice_from_mut(&mut self, from: usize) -> Result<BoundedViewMut<'_, T>> {
        let count = self.length.saturating_sub(from);
        self.slice_mut(from, count)
    }

    /// Mutable view of `count` elements starting at logical index `from`,
    /// reborrowed from this one.
    ///
    /// # Errors
    /// [`Error::OutOfRange`] if `from + count > len()`.
    pub fn slice_mut(&mut self, from: usize, count: usize) -> Result<BoundedViewMut<'_, T>> {
        check_slice(self.length, from, count)?;
        Ok(BoundedViewMut {
            buffer: &mut *self.buffer,
            start: self.start + from,
            length: count,
        })
    }

    /// Consume this view and narrow it to `count` elements starting at
    /// logical index `from`, keeping the original buffer lifetime.
    ///
    /// # Errors
    /// [`Error::OutOfRange`] if `from + count > len()`.
    pub fn into_slice(self, from: usize, count: usize) -> Result<BoundedViewMut<'a, T>> {
        check_slice(self.length, from, count)?;
        Ok(BoundedViewMut {
            buffer: self.buffer,
            start: self.start + from,
            length: count,
        })
    }

    /// Iterate over the viewed elements.
    pub fn iter(&self) -> Iter<'_, T> {
        self.as_slice().iter()
    }
}

impl<T: Copy> ReadView<T> for BoundedViewMut<'_, T> {
    #[inline]
    fn as_slice(&self) -> &[T] {
        &self.buffer[self.start..self.start + self.length]
    }

    #[inline]
    fn len(&self) -> usize {
        self.length
    }
}
