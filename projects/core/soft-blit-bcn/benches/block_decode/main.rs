use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use soft_blit_bcn::decode_surface;
use soft_blit_common::allocate::ScratchBuffer;
use soft_blit_common::compressed_format::CompressedFormat;
use soft_blit_common::pixel_format::PixelFormat;
use std::hint::black_box;

// 1024x1024 texels
const SURFACE_DIMENSION: u32 = 1024;

fn generate_blocks(num_bytes: usize) -> ScratchBuffer {
    let mut input = ScratchBuffer::new(num_bytes).unwrap();
    for (i, byte) in input.as_mut_slice().iter_mut().enumerate() {
        // Simple varying pattern; real data would have more variety, but this is fine for benchmarking
        *byte = (i % 255) as u8;
    }
    input
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Decode Surfaces");

    for format in CompressedFormat::all_values().iter() {
        let src_format = PixelFormat::compressed(*format);
        let src_pitch = src_format.row_bytes(SURFACE_DIMENSION);
        let input = generate_blocks(src_format.min_buffer_len(
            SURFACE_DIMENSION,
            SURFACE_DIMENSION,
            src_pitch,
        ).unwrap());

        group.throughput(criterion::Throughput::Bytes(input.len() as u64));

        for dst_format in [PixelFormat::RGB565, PixelFormat::RGB888, PixelFormat::ARGB8888] {
            let dst_pitch = dst_format.row_bytes(SURFACE_DIMENSION);
            let mut output = ScratchBuffer::new(dst_pitch * SURFACE_DIMENSION as usize).unwrap();
            let name = format!("{format:?}");

            group.bench_with_input(
                BenchmarkId::new(name, dst_format.bits_per_pixel),
                &dst_format,
                |b, dst_format| {
                    b.iter(|| {
                        decode_surface(
                            black_box(*format),
                            black_box(input.as_slice()),
                            src_pitch,
                            SURFACE_DIMENSION,
                            SURFACE_DIMENSION,
                            dst_format,
                            black_box(output.as_mut_slice()),
                            dst_pitch,
                        )
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
