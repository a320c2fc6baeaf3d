//! Memory-safe buffer primitives for constrained IoT device drivers.
//!
//! This crate provides the small building blocks that sensor drivers lean
//! on: bounds-checked views over register buffers, big/little-endian integer
//! codecs, a growable list for collected readings, and a thin register
//! access layer that composes them over an async I2C bus.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets and desktop hosts (for the simulator and tests).

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod config;
pub mod endian;
pub mod error;
pub mod list;
pub mod registers;
pub mod view;

pub use config::{ConfigError, DeviceConfig};
pub use endian::{ByteOrder, ByteReader, EndianInt};
pub use error::{Error, Result};
pub use list::GrowableList;
pub use registers::{RegisterDevice, RegisterError};
pub use view::{BoundedView, BoundedViewMut, ByteView, ByteViewMut, ReadView};
