#![doc = include_str!("../README.MD")]
#![no_std]
#![warn(missing_docs)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod backend;
pub mod dib_surface;
pub mod error;

pub use backend::{LockedRect, SurfaceBackend};
pub use dib_surface::DibSurface;
pub use error::BackendError;

#[cfg(test)]
pub mod test_prelude;
