//! Common test imports and utilities for the blitter tests
//!
//! This module provides a common prelude for test modules to avoid
//! duplicate imports across the codebase.
#![allow(unused_imports)]

pub use alloc::{format, string::String, vec, vec::Vec};

pub use rstest::rstest;

pub use crate::{
    blt, blt_fast, blt_fast_self, blt_self, BlitConfig, BlitError, BlitFlags, BlitFx,
    BlitOutcome, BlitRequest, BltFastFlags, ClipPolicy, ColorKey, Conversion, ConversionTable,
    Rop, SurfaceDesc, SurfaceError, SurfaceView, SurfaceViewMut, STANDARD_CONVERSIONS,
};
pub use crate::effects::{FxTraversal, KeyTest};

pub use soft_blit_common::color_555::Color555;
pub use soft_blit_common::color_565::Color565;
pub use soft_blit_common::color_8888::Color8888;
pub use soft_blit_common::compressed_format::CompressedFormat;
pub use soft_blit_common::palette::{Palette, PaletteEntry};
pub use soft_blit_common::pixel_format::{FormatKind, PixelFormat};
pub use soft_blit_common::rect::Rect;
