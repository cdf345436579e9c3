//! Common test imports and utilities for the shared types
//!
//! This module provides a common prelude for test modules to avoid
//! duplicate imports across the codebase.
#![allow(unused_imports)]

extern crate alloc;
extern crate std;

pub use alloc::{format, string::String, vec, vec::Vec};

pub use rstest::rstest;

pub use crate::color_555::Color555;
pub use crate::color_565::Color565;
pub use crate::color_8888::Color8888;
pub use crate::compressed_format::CompressedFormat;
pub use crate::pixel_format::{FormatKind, PixelFormat};
pub use crate::rect::Rect;
