#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![no_std]
#![warn(missing_docs)]

#[cfg(feature = "std")]
extern crate std;

pub mod channel_layout;
mod decode_surface;
pub mod error;
pub mod util;

pub use decode_surface::{decode_block, decode_surface};
pub use error::DecodeError;

#[cfg(test)]
pub mod test_prelude;
