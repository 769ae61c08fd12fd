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
    bgra_to_yuv400, rgb_to_yuv400, rgb_to_yuv400_p16, yuv400_to_abgr, yuv400_to_rgb,
    yuv400_to_rgb_p16, YuvGrayImageMut, YuvRange, YuvStandardMatrix,
};

fuzz_target!(|data: (u8, u8, u8, u8, u8)| {
    fuzz_gray(data.0, data.1, [data.2, data.3, data.4]);
});

fn fuzz_gray(i_width: u8, i_height: u8, color: [u8; 3]) {
    if i_height == 0 || i_width == 0 {
        return;
    }
    let width = i_width as u32;
    let height = i_height as u32;
    let source_rgb = color.repeat(width as usize * height as usize);
    let source_bgra = [color[2], color[1], color[0], 255].repeat(width as usize * height as usize);

    let mut gray_image = YuvGrayImageMut::<u8>::alloc(width, height);
    rgb_to_yuv400(
        &mut gray_image,
        &source_rgb,
        width * 3,
        YuvRange::Limited,
        YuvStandardMatrix::Bt601,
    )
    .unwrap();
    bgra_to_yuv400(
        &mut gray_image,
        &source_bgra,
        width * 4,
        YuvRange::Full,
        YuvStandardMatrix::Bt709,
    )
    .unwrap();

    let mut target_rgb = vec![0u8; source_rgb.len()];
    yuv400_to_rgb(
        &gray_image.to_fixed(),
        &mut target_rgb,
        width * 3,
        YuvRange::Full,
        YuvStandardMatrix::Bt709,
    )
    .unwrap();
    let mut target_abgr = vec![0u8; source_bgra.len()];
    yuv400_to_abgr(
        &gray_image.to_fixed(),
        &mut target_abgr,
        width * 4,
        YuvRange::Limited,
        YuvStandardMatrix::Bt2020,
    )
    .unwrap();

    let source_rgb16 = source_rgb.iter().map(|&x| (x as u16) << 4).collect::<Vec<_>>();
    let mut gray_image = YuvGrayImageMut::<u16>::alloc(width, height);
    rgb_to_yuv400_p16(
        &mut gray_image,
        &source_rgb16,
        width * 3,
        12,
        YuvRange::Limited,
        YuvStandardMatrix::Bt2020,
    )
    .unwrap();
    let mut target_rgb16 = vec![0u16; source_rgb16.len()];
    yuv400_to_rgb_p16(
        &gray_image.to_fixed(),
        &mut target_rgb16,
        width * 3,
        12,
        YuvRange::Limited,
        YuvStandardMatrix::Bt2020,
    )
    .unwrap();
}
