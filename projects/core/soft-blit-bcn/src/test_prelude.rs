//! Common test imports and utilities for the block decoder tests
#![allow(unused_imports)]

extern crate alloc;
extern crate std;

pub use alloc::{format, string::String, vec, vec::Vec};

pub use rstest::rstest;

pub use crate::channel_layout::ChannelLayout;
pub use crate::util::{decode_bc1_block, decode_bc2_block, decode_bc3_block};
pub use crate::{decode_block, decode_surface, DecodeError};

pub use soft_blit_common::color_8888::Color8888;
pub use soft_blit_common::compressed_format::CompressedFormat;
pub use soft_blit_common::decoded_4x4_block::Decoded4x4Block;
pub use soft_blit_common::pixel_format::PixelFormat;

/// A DXT1 block where every texel is pure red.
pub const SOLID_RED_BC1: [u8; 8] = [
    0x00, 0xF8, // c0 = R:31 G:0 B:0
    0x00, 0xF8, // c1 = R:31 G:0 B:0
    0x00, 0x00, 0x00, 0x00, // All pixels use index 0
];
