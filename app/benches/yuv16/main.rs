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
    rgb_to_yuv420_p16, rgb_to_yuv444_p16, rgb_to_yuv_nv12_p16, rgba_to_yuv422_p16,
    yuv420_to_rgb_p16, yuv422_to_rgba_p16, yuv444_to_rgb_p16, yuv_nv12_to_rgba_p16,
    YuvBiPlanarImageMut, YuvChromaSubsampling, YuvPlanarImageMut, YuvRange, YuvStandardMatrix,
};

const WIDTH: u32 = 1920;
const HEIGHT: u32 = 1080;
const BIT_DEPTH: u32 = 10;

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut rng = rand::rng();
    let src_bytes = (0..WIDTH as usize * HEIGHT as usize * 3)
        .map(|_| rng.random_range(0..1024u16))
        .collect::<Vec<_>>();
    let rgba_bytes = src_bytes
        .chunks_exact(3)
        .flat_map(|px| [px[0], px[1], px[2], 1023])
        .collect::<Vec<_>>();
    let stride = WIDTH * 3;

    let mut planar_image =
        YuvPlanarImageMut::<u16>::alloc(WIDTH, HEIGHT, YuvChromaSubsampling::Yuv420);
    let mut planar_image422 =
        YuvPlanarImageMut::<u16>::alloc(WIDTH, HEIGHT, YuvChromaSubsampling::Yuv422);
    let mut planar_image444 =
        YuvPlanarImageMut::<u16>::alloc(WIDTH, HEIGHT, YuvChromaSubsampling::Yuv444);
    let mut bi_planar_image =
        YuvBiPlanarImageMut::<u16>::alloc(WIDTH, HEIGHT, YuvChromaSubsampling::Yuv420);

    rgb_to_yuv420_p16(
        &mut planar_image,
        &src_bytes,
        stride,
        BIT_DEPTH,
        YuvRange::Limited,
        YuvStandardMatrix::Bt2020,
    )
    .unwrap();
    rgba_to_yuv422_p16(
        &mut planar_image422,
        &rgba_bytes,
        WIDTH * 4,
        BIT_DEPTH,
        YuvRange::Limited,
        YuvStandardMatrix::Bt2020,
    )
    .unwrap();
    rgb_to_yuv444_p16(
        &mut planar_image444,
        &src_bytes,
        stride,
        BIT_DEPTH,
        YuvRange::Limited,
        YuvStandardMatrix::Bt2020,
    )
    .unwrap();
    rgb_to_yuv_nv12_p16(
        &mut bi_planar_image,
        &src_bytes,
        stride,
        BIT_DEPTH,
        YuvRange::Limited,
        YuvStandardMatrix::Bt2020,
    )
    .unwrap();

    let fixed_planar = planar_image.to_fixed();
    let fixed_planar422 = planar_image422.to_fixed();
    let fixed_planar444 = planar_image444.to_fixed();
    let fixed_bi_planar = bi_planar_image.to_fixed();

    c.bench_function("yuv_transform RGB10 -> YUV 4:2:0 10-bit", |b| {
        let mut target =
            YuvPlanarImageMut::<u16>::alloc(WIDTH, HEIGHT, YuvChromaSubsampling::Yuv420);
        b.iter(|| {
            rgb_to_yuv420_p16(
                &mut target,
                &src_bytes,
                stride,
                BIT_DEPTH,
                YuvRange::Limited,
                YuvStandardMatrix::Bt2020,
            )
            .unwrap();
        })
    });

    c.bench_function("yuv_transform RGB10 -> P010", |b| {
        let mut target =
            YuvBiPlanarImageMut::<u16>::alloc(WIDTH, HEIGHT, YuvChromaSubsampling::Yuv420);
        b.iter(|| {
            rgb_to_yuv_nv12_p16(
                &mut target,
                &src_bytes,
                stride,
                BIT_DEPTH,
                YuvRange::Limited,
                YuvStandardMatrix::Bt2020,
            )
            .unwrap();
        })
    });

    c.bench_function("yuv_transform YUV 4:2:0 10-bit -> RGB10", |b| {
        let mut rgb = vec![0u16; WIDTH as usize * 3 * HEIGHT as usize];
        b.iter(|| {
            yuv420_to_rgb_p16(
                &fixed_planar,
                &mut rgb,
                stride,
                BIT_DEPTH,
                YuvRange::Limited,
                YuvStandardMatrix::Bt2020,
            )
            .unwrap();
        })
    });

    c.bench_function("yuv_transform YUV 4:2:2 10-bit -> RGBA10", |b| {
        let mut rgba = vec![0u16; WIDTH as usize * 4 * HEIGHT as usize];
        b.iter(|| {
            yuv422_to_rgba_p16(
                &fixed_planar422,
                &mut rgba,
                WIDTH * 4,
                BIT_DEPTH,
                YuvRange::Limited,
                YuvStandardMatrix::Bt2020,
            )
            .unwrap();
        })
    });

    c.bench_function("yuv_transform YUV 4:4:4 10-bit -> RGB10", |b| {
        let mut rgb = vec![0u16; WIDTH as usize * 3 * HEIGHT as usize];
        b.iter(|| {
            yuv444_to_rgb_p16(
                &fixed_planar444,
                &mut rgb,
                stride,
                BIT_DEPTH,
                YuvRange::Limited,
                YuvStandardMatrix::Bt2020,
            )
            .unwrap();
        })
    });

    c.bench_function("yuv_transform P010 -> RGBA10", |b| {
        let mut rgba = vec![0u16; WIDTH as usize * 4 * HEIGHT as usize];
        b.iter(|| {
            yuv_nv12_to_rgba_p16(
                &fixed_bi_planar,
                &mut rgba,
                WIDTH * 4,
                BIT_DEPTH,
                YuvRange::Limited,
                YuvStandardMatrix::Bt2020,
            )
            .unwrap();
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
