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
use crate::internals::ScalarRows;
use crate::inverse::{y_to_rgbx, YuvDecoder};
use crate::yuv_support::{YuvChromaSubsampling, YuvSourceChannels};
use crate::{YuvError, YuvGrayImage, YuvRange, YuvStandardMatrix};

macro_rules! d_cnv {
    ($method: ident, $method_p16: ident, $px_fmt: expr, $rgb_name: expr) => {
        #[doc = concat!("Convert YUV 4:0:0 (luma only) to gray ", $rgb_name, ".

Luma is expanded with neutral chroma, alpha when present is set to 255.

# Arguments

* `gray_image` - Source gray image.
* `rgba` - A mutable slice to store the converted ", $rgb_name, " data.
* `rgba_stride` - The stride (bytes per row) for the ", $rgb_name, " image data.
* `range` - The YUV range (limited or full).
* `matrix` - The YUV standard matrix (BT.601 or BT.709 or BT.2020 or other).

# Errors

Returns an error if the luma plane or the output ", $rgb_name, " data do not fit
the specified width, height, and strides, or if the matrix cannot be inverted.
")]
        pub fn $method(
            gray_image: &YuvGrayImage<u8>,
            rgba: &mut [u8],
            rgba_stride: u32,
            range: YuvRange,
            matrix: YuvStandardMatrix,
        ) -> Result<(), YuvError> {
            y_to_rgbx::<u8, { $px_fmt as u8 }>(
                gray_image,
                rgba,
                rgba_stride,
                8,
                range,
                matrix,
                &YuvDecoder::new($px_fmt, YuvChromaSubsampling::Yuv444),
            )
        }

        #[doc = concat!("Convert YUV 4:0:0 (luma only) with 10, 12 or 16 bit depth to gray ", $rgb_name, " of the same depth.

# Arguments

* `gray_image` - Source gray image.
* `rgba` - A mutable slice to store the converted ", $rgb_name, " data.
* `rgba_stride` - The stride (components per row) for the ", $rgb_name, " image data.
* `bit_depth` - Bit depth of source and target, one of 8, 10, 12, 16.
* `range` - The YUV range (limited or full).
* `matrix` - The YUV standard matrix (BT.601 or BT.709 or BT.2020 or other).
")]
        pub fn $method_p16(
            gray_image: &YuvGrayImage<u16>,
            rgba: &mut [u16],
            rgba_stride: u32,
            bit_depth: u32,
            range: YuvRange,
            matrix: YuvStandardMatrix,
        ) -> Result<(), YuvError> {
            y_to_rgbx::<u16, { $px_fmt as u8 }>(
                gray_image,
                rgba,
                rgba_stride,
                bit_depth,
                range,
                matrix,
                &ScalarRows,
            )
        }
    };
}

d_cnv!(yuv400_to_rgb, yuv400_to_rgb_p16, YuvSourceChannels::Rgb, "RGB");
d_cnv!(yuv400_to_bgr, yuv400_to_bgr_p16, YuvSourceChannels::Bgr, "BGR");
d_cnv!(yuv400_to_rgba, yuv400_to_rgba_p16, YuvSourceChannels::Rgba, "RGBA");
d_cnv!(yuv400_to_bgra, yuv400_to_bgra_p16, YuvSourceChannels::Bgra, "BGRA");
d_cnv!(yuv400_to_argb, yuv400_to_argb_p16, YuvSourceChannels::Argb, "ARGB");
d_cnv!(yuv400_to_abgr, yuv400_to_abgr_p16, YuvSourceChannels::Abgr, "ABGR");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rgb_to_y::rgb_to_yuv400;
    use crate::YuvGrayImageMut;

    #[test]
    fn test_gray_ramp_is_neutral() {
        let width = 256u32;
        let y_plane = (0..=255u8).collect::<Vec<_>>();
        let gray = YuvGrayImage {
            y_plane: &y_plane,
            y_stride: width,
            width,
            height: 1,
        };
        let mut rgba = vec![0u8; 256 * 4];
        yuv400_to_rgba(&gray, &mut rgba, width * 4, YuvRange::Limited, YuvStandardMatrix::Bt709)
            .unwrap();
        for (y, px) in rgba.chunks_exact(4).enumerate() {
            assert_eq!(px[0], px[1]);
            assert_eq!(px[1], px[2]);
            assert_eq!(px[3], 255);
            if y <= 16 {
                assert_eq!(px[0], 0);
            }
            if y >= 235 {
                assert_eq!(px[0], 255);
            }
        }
        // monotonic
        assert!(rgba.chunks_exact(4).zip(rgba.chunks_exact(4).skip(1)).all(|(a, b)| a[0] <= b[0]));
    }

    #[test]
    fn test_gray_round_trip() {
        let (width, height) = (33u32, 2u32);
        let rgb = (0..width * height)
            .flat_map(|x| {
                let v = (x * 7 % 256) as u8;
                [v, v, v]
            })
            .collect::<Vec<_>>();
        let mut gray = YuvGrayImageMut::<u8>::alloc(width, height);
        rgb_to_yuv400(&mut gray, &rgb, width * 3, YuvRange::Full, YuvStandardMatrix::Bt601)
            .unwrap();
        let mut decoded = vec![0u8; rgb.len()];
        yuv400_to_rgb(
            &gray.to_fixed(),
            &mut decoded,
            width * 3,
            YuvRange::Full,
            YuvStandardMatrix::Bt601,
        )
        .unwrap();
        for (a, b) in rgb.iter().zip(decoded.iter()) {
            assert!((*a as i32 - *b as i32).abs() <= 1);
        }

        let wide = vec![1023u16; 6];
        let gray = YuvGrayImage {
            y_plane: &wide,
            y_stride: 3,
            width: 3,
            height: 2,
        };
        let mut abgr = vec![0u16; 24];
        yuv400_to_abgr_p16(&gray, &mut abgr, 12, 10, YuvRange::Full, YuvStandardMatrix::Bt601)
            .unwrap();
        assert!(abgr.chunks_exact(4).all(|px| px == [1023, 1023, 1023, 1023]));
    }
}
