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

#![no_main]

use libfuzzer_sys::fuzz_target;
use yuv_transform::{
    rgb_to_yuv420_p16, rgb_to_yuv444_p16, rgb_to_yuv_nv12_p16, rgba_to_yuv422_p16,
    yuv420_to_rgb_p16, yuv444_to_bgra_p16, yuv_nv12_to_rgba_p16, YuvBiPlanarImageMut,
    YuvChromaSubsampling, YuvPlanarImageMut, YuvRange, YuvStandardMatrix,
};

fuzz_target!(|data: (u8, u8, u8, u8, u8, u8)| {
    let bit_depth = match data.5 % 3 {
        0 => 10,
        1 => 12,
        _ => 16,
    };
    fuzz_p16(data.0, data.1, [data.2, data.3, data.4], bit_depth);
});

fn fuzz_p16(i_width: u8, i_height: u8, color: [u8; 3], bit_depth: u32) {
    if i_height == 0 || i_width == 0 {
        return;
    }
    let width = i_width as u32;
    let height = i_height as u32;
    let scale = bit_depth - 8;
    let color = color.map(|c| (c as u16) << scale);
    let max_colors = ((1u32 << bit_depth) - 1) as u16;
    let source_rgb = color.repeat(width as usize * height as usize);
    let source_rgba =
        [color[0], color[1], color[2], max_colors].repeat(width as usize * height as usize);

    let mut planar_image =
        YuvPlanarImageMut::<u16>::alloc(width, height, YuvChromaSubsampling::Yuv420);
    rgb_to_yuv420_p16(
        &mut planar_image,
        &source_rgb,
        width * 3,
        bit_depth,
        YuvRange::Limited,
        YuvStandardMatrix::Bt2020,
    )
    .unwrap();
    let mut target_rgb = vec![0u16; source_rgb.len()];
    yuv420_to_rgb_p16(
        &planar_image.to_fixed(),
        &mut target_rgb,
        width * 3,
        bit_depth,
        YuvRange::Limited,
        YuvStandardMatrix::Bt2020,
    )
    .unwrap();

    let mut planar_image =
        YuvPlanarImageMut::<u16>::alloc(width, height, YuvChromaSubsampling::Yuv422);
    rgba_to_yuv422_p16(
        &mut planar_image,
        &source_rgba,
        width * 4,
        bit_depth,
        YuvRange::Full,
        YuvStandardMatrix::Bt709,
    )
    .unwrap();

    let mut planar_image =
        YuvPlanarImageMut::<u16>::alloc(width, height, YuvChromaSubsampling::Yuv444);
    rgb_to_yuv444_p16(
        &mut planar_image,
        &source_rgb,
        width * 3,
        bit_depth,
        YuvRange::Full,
        YuvStandardMatrix::Bt601,
    )
    .unwrap();
    let mut target_rgba = vec![0u16; source_rgba.len()];
    yuv444_to_bgra_p16(
        &planar_image.to_fixed(),
        &mut target_rgba,
        width * 4,
        bit_depth,
        YuvRange::Full,
        YuvStandardMatrix::Bt601,
    )
    .unwrap();

    let mut bi_planar_image =
        YuvBiPlanarImageMut::<u16>::alloc(width, height, YuvChromaSubsampling::Yuv420);
    rgb_to_yuv_nv12_p16(
        &mut bi_planar_image,
        &source_rgb,
        width * 3,
        bit_depth,
        YuvRange::Limited,
        YuvStandardMatrix::Bt709,
    )
    .unwrap();
    yuv_nv12_to_rgba_p16(
        &bi_planar_image.to_fixed(),
        &mut target_rgba,
        width * 4,
        bit_depth,
        YuvRange::Limited,
        YuvStandardMatrix::Bt709,
    )
    .unwrap();
}
