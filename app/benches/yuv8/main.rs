/*
 * Copyright (c) Radzivon Bartoshyk, 11/2024. All rights reserved.
 *
 * Redistribution and use in source and binary forms, with or without modification,
 * are permitted provided that the following conditions are met:
 *
 * 1.  Redistributions of source code must retain the above copyright notice, this
 * list of conditions and the following disclaimer.
 *
 * 2.  Redistributions in binary form must reproduce the above copyright notice,
 * this list of conditions and the following disclaimer in the documentation
 * and/or other materials provided with the distribution.
 *
 * 3.  Neither the name of the copyright holder nor the names of its
 * contributors may be used to endorse or promote products derived from
 * this software without specific prior written permission.
 *
 * THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
use criterion::{criterion_group, criterion_main, Criterion};
use rand::Rng;
use yuv_transform::{
    rgb_to_yuv400, rgb_to_yuv420, rgb_to_yuv422, rgb_to_yuv444, rgb_to_yuv_nv12, rgba_to_yuv420,
    yuv400_to_rgba, yuv420_to_rgb, yuv420_to_rgba, yuv422_to_rgba, yuv444_to_rgba,
    yuv_nv12_to_rgb, yuv_nv12_to_rgba, YuvBiPlanarImageMut, YuvChromaSubsampling,
    YuvGrayImageMut, YuvPlanarImageMut, YuvRange, YuvStandardMatrix,
};

const WIDTH: u32 = 1920;
const HEIGHT: u32 = 1080;

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut rng = rand::rng();
    let src_bytes = (0..WIDTH as usize * HEIGHT as usize * 3)
        .map(|_| rng.random::<u8>())
        .collect::<Vec<_>>();
    let rgba_bytes = src_bytes
        .chunks_exact(3)
        .flat_map(|px| [px[0], px[1], px[2], 255])
        .collect::<Vec<_>>();
    let stride = WIDTH * 3;

    let mut planar_image =
        YuvPlanarImageMut::<u8>::alloc(WIDTH, HEIGHT, YuvChromaSubsampling::Yuv420);
    let mut planar_image422 =
        YuvPlanarImageMut::<u8>::alloc(WIDTH, HEIGHT, YuvChromaSubsampling::Yuv422);
    let mut planar_image444 =
        YuvPlanarImageMut::<u8>::alloc(WIDTH, HEIGHT, YuvChromaSubsampling::Yuv444);
    let mut bi_planar_image =
        YuvBiPlanarImageMut::<u8>::alloc(WIDTH, HEIGHT, YuvChromaSubsampling::Yuv420);
    let mut gray_image = YuvGrayImageMut::<u8>::alloc(WIDTH, HEIGHT);

    rgb_to_yuv420(
        &mut planar_image,
        &src_bytes,
        stride,
        YuvRange::Limited,
        YuvStandardMatrix::Bt601,
    )
    .unwrap();
    rgb_to_yuv422(
        &mut planar_image422,
        &src_bytes,
        stride,
        YuvRange::Limited,
        YuvStandardMatrix::Bt601,
    )
    .unwrap();
    rgb_to_yuv444(
        &mut planar_image444,
        &src_bytes,
        stride,
        YuvRange::Limited,
        YuvStandardMatrix::Bt601,
    )
    .unwrap();
    rgb_to_yuv_nv12(
        &mut bi_planar_image,
        &src_bytes,
        stride,
        YuvRange::Limited,
        YuvStandardMatrix::Bt601,
    )
    .unwrap();
    rgb_to_yuv400(
        &mut gray_image,
        &src_bytes,
        stride,
        YuvRange::Limited,
        YuvStandardMatrix::Bt601,
    )
    .unwrap();

    let fixed_planar = planar_image.to_fixed();
    let fixed_planar422 = planar_image422.to_fixed();
    let fixed_planar444 = planar_image444.to_fixed();
    let fixed_bi_planar = bi_planar_image.to_fixed();
    let fixed_gray = gray_image.to_fixed();

    c.bench_function("yuv_transform RGB -> YUV 4:2:0", |b| {
        let mut target = YuvPlanarImageMut::<u8>::alloc(
            WIDTH,
            HEIGHT,
            YuvChromaSubsampling::Yuv420,
        );
        b.iter(|| {
            rgb_to_yuv420(
                &mut target,
                &src_bytes,
                stride,
                YuvRange::Limited,
                YuvStandardMatrix::Bt601,
            )
            .unwrap();
        })
    });

    c.bench_function("yuv_transform RGBA -> YUV 4:2:0", |b| {
        let mut target = YuvPlanarImageMut::<u8>::alloc(
            WIDTH,
            HEIGHT,
            YuvChromaSubsampling::Yuv420,
        );
        b.iter(|| {
            rgba_to_yuv420(
                &mut target,
                &rgba_bytes,
                WIDTH * 4,
                YuvRange::Limited,
                YuvStandardMatrix::Bt601,
            )
            .unwrap();
        })
    });

    c.bench_function("yuv_transform RGB -> YUV 4:4:4", |b| {
        let mut target = YuvPlanarImageMut::<u8>::alloc(
            WIDTH,
            HEIGHT,
            YuvChromaSubsampling::Yuv444,
        );
        b.iter(|| {
            rgb_to_yuv444(
                &mut target,
                &src_bytes,
                stride,
                YuvRange::Limited,
                YuvStandardMatrix::Bt601,
            )
            .unwrap();
        })
    });

    c.bench_function("yuv_transform RGB -> NV12", |b| {
        let mut target = YuvBiPlanarImageMut::<u8>::alloc(
            WIDTH,
            HEIGHT,
            YuvChromaSubsampling::Yuv420,
        );
        b.iter(|| {
            rgb_to_yuv_nv12(
                &mut target,
                &src_bytes,
                stride,
                YuvRange::Limited,
                YuvStandardMatrix::Bt601,
            )
            .unwrap();
        })
    });

    c.bench_function("yuv_transform YUV 4:2:0 -> RGB", |b| {
        let mut rgb_bytes = vec![0u8; WIDTH as usize * 3 * HEIGHT as usize];
        b.iter(|| {
            yuv420_to_rgb(
                &fixed_planar,
                &mut rgb_bytes,
                stride,
                YuvRange::Limited,
                YuvStandardMatrix::Bt601,
            )
            .unwrap();
        })
    });

    c.bench_function("yuv_transform YUV 4:2:0 -> RGBA", |b| {
        let mut rgba = vec![0u8; WIDTH as usize * 4 * HEIGHT as usize];
        b.iter(|| {
            yuv420_to_rgba(
                &fixed_planar,
                &mut rgba,
                WIDTH * 4,
                YuvRange::Limited,
                YuvStandardMatrix::Bt601,
            )
            .unwrap();
        })
    });

    c.bench_function("yuv_transform YUV 4:2:2 -> RGBA", |b| {
        let mut rgba = vec![0u8; WIDTH as usize * 4 * HEIGHT as usize];
        b.iter(|| {
            yuv422_to_rgba(
                &fixed_planar422,
                &mut rgba,
                WIDTH * 4,
                YuvRange::Limited,
                YuvStandardMatrix::Bt601,
            )
            .unwrap();
        })
    });

    c.bench_function("yuv_transform YUV 4:4:4 -> RGBA", |b| {
        let mut rgba = vec![0u8; WIDTH as usize * 4 * HEIGHT as usize];
        b.iter(|| {
            yuv444_to_rgba(
                &fixed_planar444,
                &mut rgba,
                WIDTH * 4,
                YuvRange::Limited,
                YuvStandardMatrix::Bt601,
            )
            .unwrap();
        })
    });

    c.bench_function("yuv_transform NV12 -> RGB", |b| {
        let mut rgb_bytes = vec![0u8; WIDTH as usize * 3 * HEIGHT as usize];
        b.iter(|| {
            yuv_nv12_to_rgb(
                &fixed_bi_planar,
                &mut rgb_bytes,
                stride,
                YuvRange::Limited,
                YuvStandardMatrix::Bt601,
            )
            .unwrap();
        })
    });

    c.bench_function("yuv_transform NV12 -> RGBA", |b| {
        let mut rgba = vec![0u8; WIDTH as usize * 4 * HEIGHT as usize];
        b.iter(|| {
            yuv_nv12_to_rgba(
                &fixed_bi_planar,
                &mut rgba,
                WIDTH * 4,
                YuvRange::Limited,
                YuvStandardMatrix::Bt601,
            )
            .unwrap();
        })
    });

    c.bench_function("yuv_transform YUV 4:0:0 -> RGBA", |b| {
        let mut rgba = vec![0u8; WIDTH as usize * 4 * HEIGHT as usize];
        b.iter(|| {
            yuv400_to_rgba(
                &fixed_gray,
                &mut rgba,
                WIDTH * 4,
                YuvRange::Limited,
                YuvStandardMatrix::Bt601,
            )
            .unwrap();
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
