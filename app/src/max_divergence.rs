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
use rand::Rng;
use yuv_transform::{
    rgb_to_yuv420, rgb_to_yuv444, rgb_to_yuv444_p16, yuv420_to_rgb, yuv444_to_rgb,
    yuv444_to_rgb_p16, YuvChromaSubsampling, YuvError, YuvPlanarImageMut, YuvRange,
    YuvStandardMatrix,
};

const IMAGE_WIDTH: usize = 37;
const IMAGE_HEIGHT: usize = 9;
const CHANNELS: usize = 3;

/// Worst per channel error of one colour pushed through a 4:4:4 round trip.
fn round_trip_444(
    rgb: [u8; 3],
    range: YuvRange,
    matrix: YuvStandardMatrix,
) -> Result<[u32; 3], YuvError> {
    let source = rgb.repeat(IMAGE_WIDTH * IMAGE_HEIGHT);
    let mut planar_image = YuvPlanarImageMut::<u8>::alloc(
        IMAGE_WIDTH as u32,
        IMAGE_HEIGHT as u32,
        YuvChromaSubsampling::Yuv444,
    );
    let stride = (IMAGE_WIDTH * CHANNELS) as u32;
    rgb_to_yuv444(&mut planar_image, &source, stride, range, matrix)?;

    let mut decoded = vec![0u8; source.len()];
    yuv444_to_rgb(&planar_image.to_fixed(), &mut decoded, stride, range, matrix)?;

    Ok(max_error(&source, &decoded))
}

fn max_error(source: &[u8], decoded: &[u8]) -> [u32; 3] {
    let mut worst = [0u32; 3];
    for (src, dst) in source
        .chunks_exact(CHANNELS)
        .zip(decoded.chunks_exact(CHANNELS))
    {
        for c in 0..CHANNELS {
            worst[c] = worst[c].max((src[c] as i32 - dst[c] as i32).unsigned_abs());
        }
    }
    worst
}

pub(crate) fn search_for_max_divergences(
    range: YuvRange,
    yuv_matrix: YuvStandardMatrix,
) -> Result<[u32; 3], YuvError> {
    let mut worst = [0u32; 3];
    for r in (0..=255u8).step_by(5) {
        for g in (0..=255u8).step_by(5) {
            for b in (0..=255u8).step_by(5) {
                let divergence = round_trip_444([r, g, b], range, yuv_matrix)?;
                for c in 0..CHANNELS {
                    worst[c] = worst[c].max(divergence[c]);
                }
            }
        }
    }
    Ok(worst)
}

/// Random smooth image through 4:2:0, reports the worst error.
pub(crate) fn subsampled_divergence(
    range: YuvRange,
    yuv_matrix: YuvStandardMatrix,
) -> Result<[u32; 3], YuvError> {
    let mut rng = rand::rng();
    let base: [u8; 3] = [
        rng.random_range(0..=255),
        rng.random_range(0..=255),
        rng.random_range(0..=255),
    ];
    let mut source = vec![0u8; IMAGE_WIDTH * IMAGE_HEIGHT * CHANNELS];
    for (i, px) in source.chunks_exact_mut(CHANNELS).enumerate() {
        let x = (i % IMAGE_WIDTH) as u8;
        for c in 0..CHANNELS {
            px[c] = base[c].saturating_add(x / 4);
        }
    }
    let mut planar_image = YuvPlanarImageMut::<u8>::alloc(
        IMAGE_WIDTH as u32,
        IMAGE_HEIGHT as u32,
        YuvChromaSubsampling::Yuv420,
    );
    let stride = (IMAGE_WIDTH * CHANNELS) as u32;
    rgb_to_yuv420(&mut planar_image, &source, stride, range, yuv_matrix)?;
    let mut decoded = vec![0u8; source.len()];
    yuv420_to_rgb(&planar_image.to_fixed(), &mut decoded, stride, range, yuv_matrix)?;
    Ok(max_error(&source, &decoded))
}

pub(crate) fn high_bit_depth_divergence(
    bit_depth: u32,
    range: YuvRange,
    yuv_matrix: YuvStandardMatrix,
) -> Result<u32, YuvError> {
    let max_colors = (1u32 << bit_depth) - 1;
    let mut rng = rand::rng();
    let source = (0..IMAGE_WIDTH * IMAGE_HEIGHT * CHANNELS)
        .map(|_| rng.random_range(0..=max_colors) as u16)
        .collect::<Vec<_>>();
    let mut planar_image = YuvPlanarImageMut::<u16>::alloc(
        IMAGE_WIDTH as u32,
        IMAGE_HEIGHT as u32,
        YuvChromaSubsampling::Yuv444,
    );
    let stride = (IMAGE_WIDTH * CHANNELS) as u32;
    rgb_to_yuv444_p16(&mut planar_image, &source, stride, bit_depth, range, yuv_matrix)?;
    let mut decoded = vec![0u16; source.len()];
    yuv444_to_rgb_p16(
        &planar_image.to_fixed(),
        &mut decoded,
        stride,
        bit_depth,
        range,
        yuv_matrix,
    )?;
    Ok(source
        .iter()
        .zip(decoded.iter())
        .map(|(&a, &b)| (a as i32 - b as i32).unsigned_abs())
        .max()
        .unwrap_or(0))
}

pub(crate) fn check_div() -> Result<(), YuvError> {
    let matrices = [
        ("Bt.601", YuvStandardMatrix::Bt601),
        ("Bt.709", YuvStandardMatrix::Bt709),
        ("Bt.2020", YuvStandardMatrix::Bt2020),
    ];
    for (name, matrix) in matrices {
        for range in [YuvRange::Full, YuvRange::Limited] {
            let divergence = search_for_max_divergences(range, matrix)?;
            println!("Max Divergence 4:4:4 {:?} {} {:?}", range, name, divergence);
            let divergence = subsampled_divergence(range, matrix)?;
            println!("Max Divergence 4:2:0 {:?} {} {:?}", range, name, divergence);
            for bit_depth in [10, 12] {
                let divergence = high_bit_depth_divergence(bit_depth, range, matrix)?;
                println!(
                    "Max Divergence {}-bit {:?} {} {}",
                    bit_depth, range, name, divergence
                );
            }
        }
    }
    Ok(())
}
