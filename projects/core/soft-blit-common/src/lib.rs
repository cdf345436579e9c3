#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![no_std]
#![warn(missing_docs)]

#[cfg(feature = "std")]
extern crate std;

pub mod allocate;
pub mod color_555;
pub mod color_565;
pub mod color_8888;
pub mod compressed_format;
pub mod decoded_4x4_block;
pub mod palette;
pub mod pixel_format;
pub mod rect;

#[cfg(test)]
pub mod test_prelude;
