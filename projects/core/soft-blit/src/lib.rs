#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![no_std]
#![warn(missing_docs)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod clip;
pub mod config;
pub mod convert;
pub mod effects;
mod engine;
pub mod error;
pub mod raster;
pub mod request;
pub mod surface;

pub use config::{BlitConfig, ClipPolicy};
pub use convert::{convert_surface, Conversion, ConversionTable, Emulation, STANDARD_CONVERSIONS};
pub use engine::{blt, blt_fast, blt_fast_self, blt_self, BlitOutcome};
pub use error::{BlitError, SurfaceError};
pub use request::{BlitFlags, BlitFx, BlitRequest, BlitRequestBuilder, BltFastFlags, Rop};
pub use surface::{ColorKey, SurfaceDesc, SurfaceView, SurfaceViewMut};

#[cfg(test)]
pub mod test_prelude;
