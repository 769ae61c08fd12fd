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
    argb_to_yuv410, bgr_to_yuv411, rgb_to_yuv420, rgb_to_yuv422, rgb_to_yuv444, rgba_to_yuv420,
    YuvChromaSubsampling, YuvPlanarImageMut, YuvRange, YuvStandardMatrix,
};

fuzz_target!(|data: (u8, u8, u8, u8, u8, bool)| {
    let range = if data.5 {
        YuvRange::Full
    } else {
        YuvRange::Limited
    };
    fuzz_planar(data.0, data.1, [data.2, data.3, data.4], range);
});

fn fuzz_planar(i_width: u8, i_height: u8, color: [u8; 3], range: YuvRange) {
    if i_height == 0 || i_width == 0 {
        return;
    }
    let width = i_width as u32;
    let height = i_height as u32;
    let source_rgb = color.repeat(width as usize * height as usize);
    let source_rgba = [color[0], color[1], color[2], 255].repeat(width as usize * height as usize);

    let mut planar_image =
        YuvPlanarImageMut::<u8>::alloc(width, height, YuvChromaSubsampling::Yuv420);
    rgb_to_yuv420(&mut planar_image, &source_rgb, width * 3, range, YuvStandardMatrix::Bt601)
        .unwrap();
    rgba_to_yuv420(&mut planar_image, &source_rgba, width * 4, range, YuvStandardMatrix::Bt709)
        .unwrap();

    let mut planar_image =
        YuvPlanarImageMut::<u8>::alloc(width, height, YuvChromaSubsampling::Yuv422);
    rgb_to_yuv422(&mut planar_image, &source_rgb, width * 3, range, YuvStandardMatrix::Bt2020)
        .unwrap();

    let mut planar_image =
        YuvPlanarImageMut::<u8>::alloc(width, height, YuvChromaSubsampling::Yuv444);
    rgb_to_yuv444(&mut planar_image, &source_rgb, width * 3, range, YuvStandardMatrix::Smpte240)
        .unwrap();

    let mut planar_image =
        YuvPlanarImageMut::<u8>::alloc(width, height, YuvChromaSubsampling::Yuv411);
    bgr_to_yuv411(&mut planar_image, &source_rgb, width * 3, range, YuvStandardMatrix::Bt470_6)
        .unwrap();

    let mut planar_image =
        YuvPlanarImageMut::<u8>::alloc(width, height, YuvChromaSubsampling::Yuv410);
    argb_to_yuv410(&mut planar_image, &source_rgba, width * 4, range, YuvStandardMatrix::Bt601)
        .unwrap();
}
