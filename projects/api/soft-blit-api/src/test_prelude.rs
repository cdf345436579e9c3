//! Common test imports for the surface backend tests.
#![allow(unused_imports)]

pub use alloc::{vec, vec::Vec};

pub use rstest::rstest;

pub use soft_blit::{BlitError, SurfaceError};
