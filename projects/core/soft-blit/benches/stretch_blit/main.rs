use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use soft_blit::{blt, BlitConfig, BlitFlags, BlitRequest, SurfaceDesc, SurfaceView, SurfaceViewMut};
use soft_blit_common::pixel_format::PixelFormat;
use soft_blit_common::rect::Rect;
use std::hint::black_box;

// Helper to generate a source surface with a predictable pattern
fn generate_test_pixels(width: u32, height: u32, bytes_per_pixel: usize) -> Vec<u8> {
    (0..width as usize * height as usize * bytes_per_pixel)
        .map(|i| (i * 31 + 7) as u8)
        .collect()
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Blit Implementations");
    let config = BlitConfig::default();

    // 256x256 source onto 512x512 destination
    let (src_size, dst_size) = (256u32, 512u32);

    let formats = [
        ("8bpp", PixelFormat::INDEXED8, 1usize),
        ("16bpp", PixelFormat::RGB565, 2),
        ("24bpp", PixelFormat::RGB888, 3),
        ("32bpp", PixelFormat::XRGB8888, 4),
    ];

    let requests = [
        (
            "copy",
            BlitRequest::builder()
                .dst_rect(Rect::bounds(src_size, src_size))
                .build(),
        ),
        (
            "stretch",
            BlitRequest::builder()
                .dst_rect(Rect::bounds(dst_size, dst_size))
                .build(),
        ),
        (
            "stretch mirrored",
            BlitRequest::builder()
                .dst_rect(Rect::bounds(dst_size, dst_size))
                .flags(BlitFlags::MIRROR_LEFT_RIGHT)
                .build(),
        ),
        (
            "rotate 90",
            BlitRequest::builder()
                .dst_rect(Rect::bounds(src_size, src_size))
                .flags(BlitFlags::ROTATE_90)
                .build(),
        ),
    ];

    for (format_name, format, bytes_per_pixel) in formats {
        let src_pixels = generate_test_pixels(src_size, src_size, bytes_per_pixel);
        let mut dst_pixels = vec![0u8; dst_size as usize * dst_size as usize * bytes_per_pixel];
        let src = SurfaceView::new(&src_pixels, SurfaceDesc::packed(src_size, src_size, format))
            .unwrap();

        group.throughput(criterion::Throughput::Bytes(src_pixels.len() as u64));

        for (request_name, request) in requests.iter() {
            let mut dst = SurfaceViewMut::new(
                &mut dst_pixels,
                SurfaceDesc::packed(dst_size, dst_size, format),
            )
            .unwrap();
            group.bench_with_input(
                BenchmarkId::new(*request_name, format_name),
                request,
                |b, request| {
                    b.iter(|| {
                        blt(
                            black_box(&mut dst),
                            black_box(Some(&src)),
                            black_box(request),
                            &config,
                        )
                        .unwrap()
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
