#![no_std]

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "std")]
pub mod dump;
pub mod encoding;
pub mod error;
pub mod mifare;
pub mod ntag;

pub use error::DecodeError;
