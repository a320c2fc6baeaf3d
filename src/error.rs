//! Error types shared by views, codecs and lists.
//!
//! Every variant describes a programming error at the call site: a buffer
//! that was sized wrong or an index that was never valid. Nothing here is
//! transient, so callers fix the call rather than retry it.

use thiserror_no_std::Error;

/// Errors raised by bounds-checked operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// An index, start offset or slice bound falls outside the addressable range
    #[error("Index {index} out of range (bound: {bound})")]
    OutOfRange {
        /// The offending index or end position
        index: usize,
        /// The exclusive (or inclusive, for insertion points) limit it was checked against
        bound: usize,
    },

    /// A codec read or write was attempted against a buffer that is too short
    #[error("Buffer too small: {required} bytes required, {actual} available")]
    BufferTooSmall {
        /// Bytes needed for the operation
        required: usize,
        /// Bytes available from the read/write position
        actual: usize,
    },

    /// A copy destination cannot hold the source data
    #[error("Destination too small: {required} elements required, {actual} available")]
    LengthError {
        /// Elements that must fit
        required: usize,
        /// Elements the destination can hold
        actual: usize,
    },
}

/// Result type for bounds-checked operations
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Shorthand for an `OutOfRange` error.
    #[inline]
    pub(crate) const fn out_of_range(index: usize, bound: usize) -> Self {
        Self::OutOfRange { index, bound }
    }
}
