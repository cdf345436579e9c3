//! Error types for surface backend operations.

use soft_blit::{BlitError, SurfaceDesc, SurfaceError};
use soft_blit_common::allocate::AllocateError;
use thiserror::Error;

/// Errors that can occur while operating on a [`DibSurface`](crate::DibSurface).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The blit engine rejected the operation.
    #[error(transparent)]
    Blit(#[from] BlitError),

    /// The pixel storage does not match the surface description.
    #[error(transparent)]
    Surface(#[from] SurfaceError),

    /// Pixel storage could not be allocated.
    #[error("Memory allocation failed: {0}")]
    AllocationFailed(#[from] AllocateError),

    /// `unlock` was called on a surface that is not locked.
    #[error("Surface is not locked.")]
    NotLocked,

    /// The surface is locked; it cannot be locked again or used in a blit
    /// until it is unlocked.
    #[error("Surface is already locked.")]
    AlreadyLocked,

    /// The back buffer does not have the layout of the front buffer.
    #[error("Back buffer {back:?} does not match front buffer {front:?}.")]
    FlipMismatch {
        /// Layout of the front buffer.
        front: SurfaceDesc,
        /// Layout of the back buffer.
        back: SurfaceDesc,
    },

    /// `flip` was called without an attached back buffer.
    #[error("No back buffer is attached.")]
    NoBackBuffer,
}
