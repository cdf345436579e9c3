//! The blit entry points.
//!
//! Every call runs the same pipeline: validate the request, clip the
//! rectangles, bring the source into the destination format (decode,
//! convert or snapshot), rasterize with or without effects, and report the
//! destination rectangle that was written.

use crate::clip::{clip_fill, clip_rects, ClipResult};
use crate::config::{BlitConfig, ClipPolicy};
use crate::convert::convert_to_scratch;
use crate::effects::{copy_with_effects, FxTraversal, KeyTest};
use crate::error::BlitError;
use crate::raster::{copy_rows, copy_rows_self, fill, stretch};
use crate::request::{BlitFlags, BlitFx, BlitRequest, BltFastFlags, Rop};
use crate::surface::{ScratchSurface, SurfaceDesc, SurfaceView, SurfaceViewMut};
use log::{debug, trace, warn};
use soft_blit_bcn::decode_surface;
use soft_blit_common::pixel_format::PixelFormat;
use soft_blit_common::rect::Rect;

/// Result of a blit that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlitOutcome {
    /// Pixels inside the contained destination rectangle were written.
    Done(Rect),
    /// The request was valid but nothing had to be written.
    NothingToDo,
}

impl BlitOutcome {
    /// The written rectangle, if any.
    #[inline]
    pub fn rect(&self) -> Option<Rect> {
        match self {
            BlitOutcome::Done(rect) => Some(*rect),
            BlitOutcome::NothingToDo => None,
        }
    }
}

/// Where the source pixels of a request live.
#[derive(Clone, Copy)]
enum Source<'s> {
    Absent,
    Surface(SurfaceView<'s>),
    /// The destination surface itself.
    Destination,
}

/// Surface whose destination key [`BlitFlags::KEY_DEST`] reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DestKeyOwner {
    Source,
    Destination,
}

/// The single operation a request resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Fill(u32),
    Copy,
    Nop,
}

/// Blits from `src` (or, for fills, from nothing) onto `dst`.
///
/// Missing rectangles stand for the whole surface. Rectangles overhanging
/// their surface are clipped when the blit is 1:1 and has no mirror or
/// rotation; otherwise [`BlitConfig::clip_policy`] decides. Sources in a
/// different format are converted through [`BlitConfig::conversions`] and
/// block-compressed sources are decoded first.
///
/// With [`BlitFlags::KEY_DEST`] the destination key is taken from the
/// *source* surface's [`SurfaceDesc::dst_color_key`].
///
/// # Errors
///
/// - [`BlitError::InvalidRect`] for a rectangle with `right < left` or `bottom < top`.
/// - [`BlitError::UnsupportedFormat`] for compressed destinations, format pairs
///   without a conversion, and colour keys across formats.
/// - [`BlitError::UnsupportedFlagCombination`] for conflicting operations, a
///   copy without a source, or a key flag whose key is not set.
/// - [`BlitError::UnsupportedBpp`] for sub-byte depths.
/// - [`BlitError::UnsupportedRop`] for raster operations outside [`Rop`].
///
/// A failure may leave some destination rows written.
///
/// # Examples
///
/// ```
/// use soft_blit::{blt, BlitConfig, BlitOutcome, BlitRequest, SurfaceDesc, SurfaceView, SurfaceViewMut};
/// use soft_blit_common::{pixel_format::PixelFormat, rect::Rect};
///
/// let src_pixels = [1u8, 2, 3, 4];
/// let mut dst_pixels = [0u8; 16];
/// let src = SurfaceView::new(&src_pixels, SurfaceDesc::packed(2, 2, PixelFormat::INDEXED8)).unwrap();
/// let mut dst = SurfaceViewMut::new(&mut dst_pixels, SurfaceDesc::packed(4, 4, PixelFormat::INDEXED8)).unwrap();
///
/// let request = BlitRequest::builder().dst_rect(Rect::new(0, 0, 4, 4)).build();
/// let outcome = blt(&mut dst, Some(&src), &request, &BlitConfig::default()).unwrap();
/// assert_eq!(outcome, BlitOutcome::Done(Rect::new(0, 0, 4, 4)));
/// assert_eq!(dst_pixels, [1, 1, 2, 2, 1, 1, 2, 2, 3, 3, 4, 4, 3, 3, 4, 4]);
/// ```
pub fn blt(
    dst: &mut SurfaceViewMut,
    src: Option<&SurfaceView>,
    request: &BlitRequest,
    config: &BlitConfig,
) -> Result<BlitOutcome, BlitError> {
    let source = match src {
        Some(view) => Source::Surface(*view),
        None => Source::Absent,
    };
    execute(dst, source, request, DestKeyOwner::Source, config)
}

/// [`blt`] with `surface` as both source and destination.
///
/// Unscaled copies without effects move rows in an order that never reads
/// an already overwritten row; everything else samples a snapshot of the
/// source rectangle. Either way the result equals copying through a
/// temporary buffer.
pub fn blt_self(
    surface: &mut SurfaceViewMut,
    request: &BlitRequest,
    config: &BlitConfig,
) -> Result<BlitOutcome, BlitError> {
    execute(surface, Source::Destination, request, DestKeyOwner::Source, config)
}

/// Copies `src_rect` of `src` (the whole source when `None`) 1:1 to `(x, y)`
/// on `dst`, optionally colour keyed.
///
/// Unlike [`blt`], [`BltFastFlags::DEST_COLOR_KEY`] reads the destination
/// key of `dst`.
///
/// # Errors
///
/// As [`blt`].
pub fn blt_fast(
    dst: &mut SurfaceViewMut,
    x: i32,
    y: i32,
    src: &SurfaceView,
    src_rect: Option<Rect>,
    flags: BltFastFlags,
    config: &BlitConfig,
) -> Result<BlitOutcome, BlitError> {
    let request = fast_request(x, y, src_rect.unwrap_or_else(|| src.desc().bounds()), flags)?;
    execute(dst, Source::Surface(*src), &request, DestKeyOwner::Destination, config)
}

/// [`blt_fast`] with `surface` as both source and destination.
pub fn blt_fast_self(
    surface: &mut SurfaceViewMut,
    x: i32,
    y: i32,
    src_rect: Option<Rect>,
    flags: BltFastFlags,
    config: &BlitConfig,
) -> Result<BlitOutcome, BlitError> {
    let request = fast_request(x, y, src_rect.unwrap_or_else(|| surface.desc().bounds()), flags)?;
    execute(surface, Source::Destination, &request, DestKeyOwner::Destination, config)
}

fn fast_request(x: i32, y: i32, src_rect: Rect, flags: BltFastFlags) -> Result<BlitRequest, BlitError> {
    if !src_rect.is_normalized() {
        return Err(BlitError::InvalidRect(src_rect));
    }
    let mut blit_flags = BlitFlags::empty();
    if flags.contains(BltFastFlags::SRC_COLOR_KEY) {
        blit_flags |= BlitFlags::KEY_SRC;
    }
    if flags.contains(BltFastFlags::DEST_COLOR_KEY) {
        blit_flags |= BlitFlags::KEY_DEST;
    }
    // Columns and rows landing past i32::MAX are outside every surface; they
    // are dropped from both rectangles so the pair stays 1:1.
    let excess = |origin: i32, extent: i64| (i64::from(origin) + extent - i64::from(i32::MAX)).max(0);
    let excess_x = excess(x, src_rect.width());
    let excess_y = excess(y, src_rect.height());
    let src_rect = Rect::new(
        src_rect.left,
        src_rect.top,
        (i64::from(src_rect.right) - excess_x) as i32,
        (i64::from(src_rect.bottom) - excess_y) as i32,
    );
    let dst_rect = Rect::new(
        x,
        y,
        (i64::from(x) + src_rect.width()) as i32,
        (i64::from(y) + src_rect.height()) as i32,
    );
    Ok(BlitRequest {
        src_rect: Some(src_rect),
        dst_rect: Some(dst_rect),
        flags: blit_flags,
        fx: BlitFx::default(),
    })
}

fn execute(
    dst: &mut SurfaceViewMut,
    source: Source,
    request: &BlitRequest,
    dest_key_owner: DestKeyOwner,
    config: &BlitConfig,
) -> Result<BlitOutcome, BlitError> {
    let flags = request.flags;
    trace!("validate {flags:?}");

    if flags.intersects(BlitFlags::INERT) {
        warn!("ignoring {:?}, not implemented", flags & BlitFlags::INERT);
    }
    if flags.contains(BlitFlags::DEPTH_FILL) {
        warn!("depth fill is not implemented, ignoring");
    }

    let dst_desc = *dst.desc();
    let dst_format = dst_desc.format;
    let dst_rect = resolve_rect(request.dst_rect, &dst_desc)?;
    if dst_format.compressed_format().is_some() {
        return Err(BlitError::UnsupportedFormat {
            src: source_format(&source, &dst_desc).unwrap_or(dst_format),
            dst: dst_format,
        });
    }
    let bytes_per_pixel = depth_of(&dst_format)?;

    let operation = resolve_operation(flags, &request.fx)?;

    let src_desc = match source {
        Source::Absent => None,
        Source::Surface(view) => Some(*view.desc()),
        Source::Destination => Some(dst_desc),
    };

    match operation {
        Operation::Nop => {
            if let Some(desc) = &src_desc {
                resolve_rect(request.src_rect, desc)?;
            }
            Ok(BlitOutcome::NothingToDo)
        }
        Operation::Fill(color) => {
            trace!("clip fill {dst_rect:?}");
            let Some(rect) = clip_fill(&dst_rect, &dst_desc.bounds()) else {
                return Ok(BlitOutcome::NothingToDo);
            };
            trace!("fill {rect:?} with {color:#x}");
            fill(dst.pixels_mut(), dst_desc.pitch, &rect, bytes_per_pixel, color)?;
            trace!("commit {rect:?}");
            Ok(BlitOutcome::Done(rect))
        }
        Operation::Copy => {
            let Some(src_desc) = src_desc else {
                if flags.contains(BlitFlags::DEPTH_FILL) {
                    return Ok(BlitOutcome::NothingToDo);
                }
                warn!("copy requested without a source surface");
                return Err(BlitError::UnsupportedFlagCombination(flags));
            };
            let src_rect = resolve_rect(request.src_rect, &src_desc)?;
            let keys = resolve_keys(flags, &request.fx, &src_desc, &dst_desc, dest_key_owner)?;

            trace!("clip {src_rect:?} -> {dst_rect:?}");
            let (src_rect, dst_rect) = match clip_rects(
                &src_rect,
                &src_desc.bounds(),
                &dst_rect,
                &dst_desc.bounds(),
                flags.has_geometry(),
            ) {
                ClipResult::Visible { src, dst } => (src, dst),
                ClipResult::Empty => return Ok(BlitOutcome::NothingToDo),
                ClipResult::Unclippable => {
                    return match config.clip_policy {
                        ClipPolicy::SkipWithDiagnostic => {
                            warn!(
                                "cannot clip {src_rect:?} -> {dst_rect:?} with stretching or {:?}, skipping",
                                flags & BlitFlags::GEOMETRY
                            );
                            Ok(BlitOutcome::NothingToDo)
                        }
                        ClipPolicy::Fail => Err(BlitError::UnsupportedFlagCombination(flags)),
                    };
                }
            };

            copy(dst, source, &src_desc, src_rect, dst_rect, flags, &keys, config)?;
            trace!("commit {dst_rect:?}");
            Ok(BlitOutcome::Done(dst_rect))
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn copy(
    dst: &mut SurfaceViewMut,
    source: Source,
    src_desc: &SurfaceDesc,
    src_rect: Rect,
    dst_rect: Rect,
    flags: BlitFlags,
    keys: &KeyTest,
    config: &BlitConfig,
) -> Result<(), BlitError> {
    let dst_desc = *dst.desc();
    let bytes_per_pixel = depth_of(&dst_desc.format)?;
    let keyed = flags.has_color_key();
    let geometry = flags.has_geometry();
    let unscaled = src_rect.width() == dst_rect.width() && src_rect.height() == dst_rect.height();

    let scratch: ScratchSurface;
    let (src_pixels, src_pitch, src_rect): (&[u8], usize, Rect) = match source {
        Source::Absent => return Err(BlitError::UnsupportedFlagCombination(flags)),
        Source::Destination => {
            if unscaled && !keyed && !geometry {
                trace!("copy within surface");
                copy_rows_self(dst.pixels_mut(), dst_desc.pitch, &src_rect, &dst_rect, bytes_per_pixel);
                return Ok(());
            }
            trace!("snapshot {src_rect:?}");
            scratch = snapshot(dst.pixels(), &dst_desc, &src_rect, bytes_per_pixel)?;
            (scratch.view().pixels(), scratch.desc().pitch, scratch.desc().bounds())
        }
        Source::Surface(view) => {
            let from = src_desc.format;
            let to = dst_desc.format;
            if let Some(compressed) = from.compressed_format() {
                if keyed {
                    return Err(BlitError::UnsupportedFormat { src: from, dst: to });
                }
                trace!("decode {compressed:?} into {to:?}");
                let mut decoded = ScratchSurface::new(src_desc.width, src_desc.height, to)?;
                let pitch = decoded.desc().pitch;
                decode_surface(
                    compressed,
                    view.pixels(),
                    src_desc.pitch,
                    src_desc.width,
                    src_desc.height,
                    &to,
                    decoded.pixels_mut(),
                    pitch,
                )
                .map_err(|error| {
                    warn!("cannot decode {compressed:?} into {to:?}: {error}");
                    BlitError::UnsupportedFormat { src: from, dst: to }
                })?;
                return rasterize(
                    decoded.view().pixels(),
                    pitch,
                    &src_rect,
                    dst,
                    &dst_rect,
                    flags,
                    keys,
                    bytes_per_pixel,
                );
            }

            depth_of(&from)?;
            if from == to {
                (view.pixels(), src_desc.pitch, src_rect)
            } else {
                if keyed {
                    warn!("colour keys cannot be applied across formats {from:?} -> {to:?}");
                    return Err(BlitError::UnsupportedFormat { src: from, dst: to });
                }
                let conversion = config
                    .conversions
                    .find(&from, &to)
                    .ok_or(BlitError::UnsupportedFormat { src: from, dst: to })?;
                trace!("convert {src_rect:?}");
                scratch = convert_to_scratch(conversion, &view, &src_rect, to, dst.palette())?;
                (scratch.view().pixels(), scratch.desc().pitch, scratch.desc().bounds())
            }
        }
    };

    rasterize(src_pixels, src_pitch, &src_rect, dst, &dst_rect, flags, keys, bytes_per_pixel)
}

#[allow(clippy::too_many_arguments)]
fn rasterize(
    src: &[u8],
    src_pitch: usize,
    src_rect: &Rect,
    dst: &mut SurfaceViewMut,
    dst_rect: &Rect,
    flags: BlitFlags,
    keys: &KeyTest,
    bytes_per_pixel: usize,
) -> Result<(), BlitError> {
    let dst_pitch = dst.desc().pitch;
    let pixels = dst.pixels_mut();

    if flags.has_color_key() || flags.has_geometry() {
        trace!("effects {:?}", flags & (BlitFlags::GEOMETRY | BlitFlags::COLOR_KEYS));
        let traversal = FxTraversal::new(flags, dst_rect, bytes_per_pixel, dst_pitch);
        return copy_with_effects(src, src_pitch, src_rect, pixels, &traversal, keys, bytes_per_pixel);
    }

    if src_rect.width() == dst_rect.width() && src_rect.height() == dst_rect.height() {
        trace!("copy {src_rect:?} -> {dst_rect:?}");
        copy_rows(src, src_pitch, src_rect, pixels, dst_pitch, dst_rect, bytes_per_pixel);
        return Ok(());
    }

    debug!("stretch {src_rect:?} -> {dst_rect:?}");
    stretch(src, src_pitch, src_rect, pixels, dst_pitch, dst_rect, bytes_per_pixel)
}

/// Copies `rect` of a surface into a packed scratch surface of the same format.
fn snapshot(
    pixels: &[u8],
    desc: &SurfaceDesc,
    rect: &Rect,
    bytes_per_pixel: usize,
) -> Result<ScratchSurface, BlitError> {
    let mut scratch = ScratchSurface::new(rect.width() as u32, rect.height() as u32, desc.format)?;
    let bounds = scratch.desc().bounds();
    let pitch = scratch.desc().pitch;
    copy_rows(pixels, desc.pitch, rect, scratch.pixels_mut(), pitch, &bounds, bytes_per_pixel);
    Ok(scratch)
}

fn resolve_rect(rect: Option<Rect>, desc: &SurfaceDesc) -> Result<Rect, BlitError> {
    match rect {
        None => Ok(desc.bounds()),
        Some(rect) if rect.is_normalized() => Ok(rect),
        Some(rect) => Err(BlitError::InvalidRect(rect)),
    }
}

fn depth_of(format: &PixelFormat) -> Result<usize, BlitError> {
    format
        .bytes_per_pixel()
        .ok_or(BlitError::UnsupportedBpp(format.bits_per_pixel))
}

fn source_format(source: &Source, dst_desc: &SurfaceDesc) -> Option<PixelFormat> {
    match source {
        Source::Absent => None,
        Source::Surface(view) => Some(*view.format()),
        Source::Destination => Some(dst_desc.format),
    }
}

/// Picks the dominant operation. Anything that is neither a fill nor a
/// raster operation copies the source, including a depth fill.
fn resolve_operation(flags: BlitFlags, fx: &BlitFx) -> Result<Operation, BlitError> {
    let fill_conflicts = flags.has_color_key() || flags.has_geometry();

    if flags.contains(BlitFlags::COLOR_FILL) {
        if flags.contains(BlitFlags::ROP) || fill_conflicts {
            return Err(BlitError::UnsupportedFlagCombination(flags));
        }
        return Ok(Operation::Fill(fx.fill_color));
    }

    if flags.contains(BlitFlags::ROP) {
        let rop = Rop::from_code(fx.rop)?;
        debug!("raster operation {rop:?}");
        if rop.needs_source() {
            return Ok(Operation::Copy);
        }
        if fill_conflicts {
            return Err(BlitError::UnsupportedFlagCombination(flags));
        }
        return Ok(match rop {
            Rop::Blackness => Operation::Fill(0),
            Rop::Whiteness => Operation::Fill(u32::MAX),
            _ => Operation::Nop,
        });
    }

    Ok(Operation::Copy)
}

/// Builds the colour key test for a copy.
fn resolve_keys(
    flags: BlitFlags,
    fx: &BlitFx,
    src_desc: &SurfaceDesc,
    dst_desc: &SurfaceDesc,
    dest_key_owner: DestKeyOwner,
) -> Result<KeyTest, BlitError> {
    if !flags.has_color_key() {
        return Ok(KeyTest::PASS_ALL);
    }

    let src_key = if flags.contains(BlitFlags::KEY_SRC) {
        Some(
            src_desc
                .src_color_key
                .ok_or(BlitError::UnsupportedFlagCombination(BlitFlags::KEY_SRC))?,
        )
    } else if flags.contains(BlitFlags::KEY_SRC_OVERRIDE) {
        Some(fx.src_color_key)
    } else {
        None
    };

    let dst_key = if flags.contains(BlitFlags::KEY_DEST) {
        let owner = match dest_key_owner {
            DestKeyOwner::Source => src_desc,
            DestKeyOwner::Destination => dst_desc,
        };
        Some(
            owner
                .dst_color_key
                .ok_or(BlitError::UnsupportedFlagCombination(BlitFlags::KEY_DEST))?,
        )
    } else if flags.contains(BlitFlags::KEY_DEST_OVERRIDE) {
        Some(fx.dst_color_key)
    } else {
        None
    };

    Ok(KeyTest::new(src_desc.format.color_key_mask(), src_key, dst_key))
}
