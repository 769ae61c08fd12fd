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
    yuv410_to_abgr, yuv411_to_bgr, yuv420_to_rgb, yuv420_to_rgba, yuv422_to_bgra, yuv444_to_argb,
    BufferStoreMut, YuvChromaSubsampling, YuvPlanarImage, YuvPlanarImageMut, YuvRange,
    YuvStandardMatrix,
};

fuzz_target!(|data: (u8, u8, u8, u8, u8, bool)| {
    let range = if data.5 {
        YuvRange::Full
    } else {
        YuvRange::Limited
    };
    for subsampling in [
        YuvChromaSubsampling::Yuv420,
        YuvChromaSubsampling::Yuv422,
        YuvChromaSubsampling::Yuv444,
        YuvChromaSubsampling::Yuv411,
        YuvChromaSubsampling::Yuv410,
    ] {
        fuzz_planar(data.0, data.1, data.2, data.3, data.4, subsampling, range);
    }
});

fn filled_image(
    width: u32,
    height: u32,
    y_value: u8,
    u_value: u8,
    v_value: u8,
    subsampling: YuvChromaSubsampling,
) -> YuvPlanarImageMut<'static, u8> {
    let mut image = YuvPlanarImageMut::<u8>::alloc(width, height, subsampling);
    image.y_plane = BufferStoreMut::Owned(vec![y_value; image.y_plane.borrow().len()]);
    image.u_plane = BufferStoreMut::Owned(vec![u_value; image.u_plane.borrow().len()]);
    image.v_plane = BufferStoreMut::Owned(vec![v_value; image.v_plane.borrow().len()]);
    image
}

fn fuzz_planar(
    i_width: u8,
    i_height: u8,
    y_value: u8,
    u_value: u8,
    v_value: u8,
    subsampling: YuvChromaSubsampling,
    range: YuvRange,
) {
    if i_height == 0 || i_width == 0 {
        return;
    }
    let width = i_width as u32;
    let height = i_height as u32;
    let image = filled_image(width, height, y_value, u_value, v_value, subsampling);
    let planar_image: YuvPlanarImage<u8> = image.to_fixed();

    let mut target_rgb = vec![0u8; width as usize * height as usize * 3];
    let mut target_rgba = vec![0u8; width as usize * height as usize * 4];

    match subsampling {
        YuvChromaSubsampling::Yuv420 => {
            yuv420_to_rgb(
                &planar_image,
                &mut target_rgb,
                width * 3,
                range,
                YuvStandardMatrix::Bt601,
            )
            .unwrap();
            yuv420_to_rgba(
                &planar_image,
                &mut target_rgba,
                width * 4,
                range,
                YuvStandardMatrix::Bt709,
            )
            .unwrap();
        }
        YuvChromaSubsampling::Yuv422 => {
            yuv422_to_bgra(
                &planar_image,
                &mut target_rgba,
                width * 4,
                range,
                YuvStandardMatrix::Bt2020,
            )
            .unwrap();
        }
        YuvChromaSubsampling::Yuv444 => {
            yuv444_to_argb(
                &planar_image,
                &mut target_rgba,
                width * 4,
                range,
                YuvStandardMatrix::Bt601,
            )
            .unwrap();
        }
        YuvChromaSubsampling::Yuv411 => {
            yuv411_to_bgr(
                &planar_image,
                &mut target_rgb,
                width * 3,
                range,
                YuvStandardMatrix::Smpte240,
            )
            .unwrap();
        }
        YuvChromaSubsampling::Yuv410 => {
            yuv410_to_abgr(
                &planar_image,
                &mut target_rgba,
                width * 4,
                range,
                YuvStandardMatrix::Bt470_6,
            )
            .unwrap();
        }
        _ => {}
    }
}
