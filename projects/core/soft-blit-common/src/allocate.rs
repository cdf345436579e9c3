//! Memory allocation utilities for temporary pixel buffers.
//!
//! Format conversion and block decoding produce an intermediate surface before
//! the blit proper runs. Those surfaces live in [`ScratchBuffer`]s: zeroed,
//! 64-byte aligned allocations that are freed when dropped.
//!
//! ## Useful APIs
//!
//! [`allocate_align_64`]: Allocates uninitialized memory aligned to 64-bytes.
//! [`ScratchBuffer::new`]: Allocates a zeroed buffer usable as a byte slice.

use core::alloc::{Layout, LayoutError};
use core::slice;
use safe_allocator_api::allocator_api::*;
use safe_allocator_api::RawAlloc;
use thiserror::Error;

/// Allocates data with an alignment of 64 bytes.
///
/// # Parameters
///
/// - `num_bytes`: The number of bytes to allocate
///
/// # Returns
///
/// A [`RawAlloc`] containing the allocated data
pub fn allocate_align_64(num_bytes: usize) -> Result<RawAlloc, AllocateError> {
    let layout = Layout::from_size_align(num_bytes, 64)?;
    Ok(RawAlloc::new(layout)?)
}

/// A zero-initialised, 64-byte aligned byte buffer.
pub struct ScratchBuffer {
    allocation: RawAlloc,
    len: usize,
}

impl ScratchBuffer {
    /// Allocates `num_bytes` zeroed bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use soft_blit_common::allocate::ScratchBuffer;
    ///
    /// let mut scratch = ScratchBuffer::new(16).unwrap();
    /// assert!(scratch.as_slice().iter().all(|&b| b == 0));
    /// scratch.as_mut_slice()[3] = 7;
    /// assert_eq!(scratch.as_slice()[3], 7);
    /// ```
    pub fn new(num_bytes: usize) -> Result<Self, AllocateError> {
        // Zero sized layouts are not accepted by the allocator.
        let mut allocation = allocate_align_64(num_bytes.max(1))?;
        unsafe {
            core::ptr::write_bytes(allocation.as_mut_ptr(), 0, num_bytes);
        }
        Ok(Self {
            allocation,
            len: num_bytes,
        })
    }

    /// Length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` when the buffer holds no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The buffer contents.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        // SAFETY: the allocation holds at least `len` bytes, all initialised in `new`.
        unsafe { slice::from_raw_parts(self.allocation.as_ptr(), self.len) }
    }

    /// The buffer contents, mutably.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        // SAFETY: the allocation holds at least `len` bytes, all initialised in `new`.
        unsafe { slice::from_raw_parts_mut(self.allocation.as_mut_ptr(), self.len) }
    }
}

/// An error that happened in memory allocation within the library.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocateError {
    /// An error that occurred while creating a layout for allocation.
    #[error("Invalid layout provided. Likely due to `num_bytes` being larger than isize::MAX. {0}")]
    LayoutError(#[from] LayoutError),

    /// An error that occurred while allocating memory.
    #[error(transparent)]
    AllocationFailed(#[from] AllocError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scratch_buffer_is_zeroed_and_aligned() {
        let scratch = ScratchBuffer::new(100).unwrap();
        assert_eq!(scratch.len(), 100);
        assert_eq!(scratch.as_slice().as_ptr() as usize % 64, 0);
        assert!(scratch.as_slice().iter().all(|&b| b == 0));
    }

    #[test]
    fn empty_scratch_buffer() {
        let scratch = ScratchBuffer::new(0).unwrap();
        assert!(scratch.is_empty());
        assert!(scratch.as_slice().is_empty());
    }
}
