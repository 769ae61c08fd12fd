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
    yuv_nv12_to_rgb, yuv_nv16_to_bgra, yuv_nv21_to_rgba, yuv_nv24_to_argb, yuv_nv42_to_bgr,
    yuv_nv61_to_abgr, BufferStoreMut, YuvBiPlanarImageMut, YuvChromaSubsampling, YuvRange,
    YuvStandardMatrix,
};

fuzz_target!(|data: (u8, u8, u8, u8, bool)| {
    let range = if data.4 {
        YuvRange::Full
    } else {
        YuvRange::Limited
    };
    fuzz_nv(data.0, data.1, data.2, data.3, range);
});

fn filled_image(
    width: u32,
    height: u32,
    y_value: u8,
    uv_value: u8,
    subsampling: YuvChromaSubsampling,
) -> YuvBiPlanarImageMut<'static, u8> {
    let mut image = YuvBiPlanarImageMut::<u8>::alloc(width, height, subsampling);
    image.y_plane = BufferStoreMut::Owned(vec![y_value; image.y_plane.borrow().len()]);
    image.uv_plane = BufferStoreMut::Owned(vec![uv_value; image.uv_plane.borrow().len()]);
    image
}

fn fuzz_nv(i_width: u8, i_height: u8, y_value: u8, uv_value: u8, range: YuvRange) {
    if i_height == 0 || i_width == 0 {
        return;
    }
    let width = i_width as u32;
    let height = i_height as u32;
    let mut target_rgb = vec![0u8; width as usize * height as usize * 3];
    let mut target_rgba = vec![0u8; width as usize * height as usize * 4];

    let image = filled_image(width, height, y_value, uv_value, YuvChromaSubsampling::Yuv420);
    let fixed = image.to_fixed();
    yuv_nv12_to_rgb(&fixed, &mut target_rgb, width * 3, range, YuvStandardMatrix::Bt601).unwrap();
    yuv_nv21_to_rgba(&fixed, &mut target_rgba, width * 4, range, YuvStandardMatrix::Bt709)
        .unwrap();

    let image = filled_image(width, height, y_value, uv_value, YuvChromaSubsampling::Yuv422);
    let fixed = image.to_fixed();
    yuv_nv16_to_bgra(&fixed, &mut target_rgba, width * 4, range, YuvStandardMatrix::Bt2020)
        .unwrap();
    yuv_nv61_to_abgr(&fixed, &mut target_rgba, width * 4, range, YuvStandardMatrix::Bt601)
        .unwrap();

    let image = filled_image(width, height, y_value, uv_value, YuvChromaSubsampling::Yuv444);
    let fixed = image.to_fixed();
    yuv_nv24_to_argb(&fixed, &mut target_rgba, width * 4, range, YuvStandardMatrix::Bt709)
        .unwrap();
    yuv_nv42_to_bgr(&fixed, &mut target_rgb, width * 3, range, YuvStandardMatrix::Smpte240)
        .unwrap();
}
