//! Per-call blitter configuration.

use crate::convert::{ConversionTable, STANDARD_CONVERSIONS};

/// What to do when clipping is needed on a stretched axis or together with
/// a mirror or rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClipPolicy {
    /// Log a warning and leave the destination untouched.
    #[default]
    SkipWithDiagnostic,
    /// Fail with [`BlitError::UnsupportedFlagCombination`](crate::BlitError::UnsupportedFlagCombination).
    Fail,
}

/// Settings shared by every blit of a caller.
///
/// # Examples
///
/// ```
/// use soft_blit::{BlitConfig, ClipPolicy, ConversionTable};
///
/// let table = ConversionTable::standard();
/// let config = BlitConfig::new(&table).with_clip_policy(ClipPolicy::Fail);
/// assert_eq!(config.clip_policy, ClipPolicy::Fail);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BlitConfig<'a> {
    /// Conversions available to blits between different formats.
    pub conversions: &'a ConversionTable,
    /// Handling of requests that cannot be clipped.
    pub clip_policy: ClipPolicy,
}

impl Default for BlitConfig<'static> {
    fn default() -> Self {
        Self::new(&STANDARD_CONVERSIONS)
    }
}

impl<'a> BlitConfig<'a> {
    /// A configuration using `conversions` and the default clip policy.
    pub fn new(conversions: &'a ConversionTable) -> Self {
        Self {
            conversions,
            clip_policy: ClipPolicy::default(),
        }
    }

    /// Sets the clip policy.
    pub fn with_clip_policy(mut self, clip_policy: ClipPolicy) -> Self {
        self.clip_policy = clip_policy;
        self
    }
}
