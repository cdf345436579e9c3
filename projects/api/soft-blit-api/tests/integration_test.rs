//! Integration tests for the surface backend

use soft_blit::{BlitConfig, BlitFlags, BlitOutcome, BlitRequest, BltFastFlags, ClipPolicy, ColorKey, SurfaceDesc};
use soft_blit_api::{BackendError, DibSurface, SurfaceBackend};
use soft_blit_common::palette::{Palette, PaletteEntry};
use soft_blit_common::pixel_format::PixelFormat;
use soft_blit_common::rect::Rect;

fn read_u16(pixels: &[u8]) -> Vec<u16> {
    pixels
        .chunks_exact(2)
        .map(|c| u16::from_le_bytes([c[0], c[1]]))
        .collect()
}

/// A 4x4 palettized sprite: a 2x2 red square on a transparent (index 0) background.
fn sprite() -> DibSurface {
    #[rustfmt::skip]
    let pixels = [
        0, 0, 0, 0,
        0, 1, 1, 0,
        0, 1, 1, 0,
        0, 0, 0, 0,
    ];
    let desc = SurfaceDesc::packed(4, 4, PixelFormat::INDEXED8).with_src_color_key(ColorKey::single(0));
    let mut sprite = DibSurface::from_pixels(desc, &pixels).unwrap();
    sprite.set_palette(Palette::from_entries(&[
        PaletteEntry::new(0, 0, 0),
        PaletteEntry::new(255, 0, 0),
    ]));
    sprite
}

#[test]
fn keyed_sprite_over_a_background() {
    let mut canvas = DibSurface::new(6, 6, PixelFormat::INDEXED8).unwrap();
    let background = BlitRequest::builder().color_fill(7).build();
    canvas.blt(None, &background).unwrap();
    canvas.take_dirty();

    let outcome = canvas
        .blt_fast(1, 1, &sprite(), None, BltFastFlags::SRC_COLOR_KEY)
        .unwrap();

    assert_eq!(outcome, BlitOutcome::Done(Rect::new(1, 1, 5, 5)));
    assert_eq!(canvas.take_dirty(), Some(Rect::new(1, 1, 5, 5)));
    #[rustfmt::skip]
    let expected = [
        7, 7, 7, 7, 7, 7,
        7, 7, 7, 7, 7, 7,
        7, 7, 1, 1, 7, 7,
        7, 7, 1, 1, 7, 7,
        7, 7, 7, 7, 7, 7,
        7, 7, 7, 7, 7, 7,
    ];
    assert_eq!(canvas.pixels(), &expected);
}

#[test]
fn palettized_sprite_is_converted_with_its_palette() {
    let mut screen = DibSurface::new(4, 4, PixelFormat::RGB565).unwrap();

    screen.blt(Some(&sprite()), &BlitRequest::default()).unwrap();

    let pixels = read_u16(screen.pixels());
    assert_eq!(pixels[0], 0x0000);
    assert_eq!(pixels[5], 0xF800);
    assert_eq!(pixels[10], 0xF800);
    assert_eq!(pixels[15], 0x0000);
}

#[test]
fn scrolling_within_a_surface() {
    let desc = SurfaceDesc::packed(4, 3, PixelFormat::INDEXED8);
    let pixels: Vec<u8> = (0..12).collect();
    let mut surface = DibSurface::from_pixels(desc, &pixels).unwrap();

    // Scroll up by one row.
    let scroll = BlitRequest::builder()
        .src_rect(Rect::new(0, 1, 4, 3))
        .dst_rect(Rect::new(0, 0, 4, 2))
        .build();
    surface.blt_self(&scroll).unwrap();

    assert_eq!(surface.pixels(), &[4, 5, 6, 7, 8, 9, 10, 11, 8, 9, 10, 11]);
    assert_eq!(surface.take_dirty(), Some(Rect::new(0, 0, 4, 2)));
}

#[test]
fn draw_into_the_back_buffer_then_flip() {
    let mut front = DibSurface::new(4, 4, PixelFormat::INDEXED8).unwrap();
    front
        .attach_back_buffer(DibSurface::new(4, 4, PixelFormat::INDEXED8).unwrap())
        .unwrap();

    {
        let back = front.back_buffer_mut().unwrap();
        let mut locked = back.lock(Some(Rect::new(0, 0, 2, 1))).unwrap();
        locked.pixels[..2].copy_from_slice(&[3, 4]);
        back.unlock().unwrap();
        assert_eq!(back.take_dirty(), Some(Rect::new(0, 0, 2, 1)));
    }
    assert!(front.pixels().iter().all(|&b| b == 0));

    front.flip().unwrap();

    assert_eq!(&front.pixels()[..2], &[3, 4]);
    assert!(front.back_buffer().unwrap().pixels().iter().all(|&b| b == 0));
}

#[test]
fn locked_sources_cannot_be_read() {
    let mut src = DibSurface::new(2, 2, PixelFormat::INDEXED8).unwrap();
    let mut dst = DibSurface::new(2, 2, PixelFormat::INDEXED8).unwrap();
    src.lock(None).unwrap();

    assert_eq!(
        dst.blt(Some(&src), &BlitRequest::default()),
        Err(BackendError::AlreadyLocked)
    );
    assert_eq!(dst.take_dirty(), None);
}

#[test]
fn surfaces_carry_their_clip_policy() {
    let src = DibSurface::new(2, 2, PixelFormat::INDEXED8).unwrap();
    let config = BlitConfig::default().with_clip_policy(ClipPolicy::Fail);
    let mut dst = DibSurface::new(4, 4, PixelFormat::INDEXED8)
        .unwrap()
        .with_config(config);
    // Mirrored and hanging off the right edge.
    let request = BlitRequest::builder()
        .dst_rect(Rect::new(3, 0, 5, 2))
        .flags(BlitFlags::MIRROR_LEFT_RIGHT)
        .build();

    assert!(matches!(
        dst.blt(Some(&src), &request),
        Err(BackendError::Blit(_))
    ));
}
