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
use crate::forward::{rgbx_to_y, RgbEncoder};
use crate::internals::ScalarRows;
use crate::yuv_support::{YuvChromaSubsampling, YuvSourceChannels};
use crate::{YuvError, YuvGrayImageMut, YuvRange, YuvStandardMatrix};

macro_rules! d_cvn {
    ($method: ident, $method_p16: ident, $px_fmt: expr, $rgb_name: expr) => {
        #[doc = concat!("Convert ", $rgb_name, " image data to YUV 4:0:0, luma only.

# Arguments

* `gray_image` - Target gray image.
* `rgba` - The input ", $rgb_name, " image data slice.
* `rgba_stride` - The stride (bytes per row) for the ", $rgb_name, " image data.
* `range` - The YUV range (limited or full).
* `matrix` - The YUV standard matrix (BT.601 or BT.709 or BT.2020 or other).

# Errors

Returns an error if the luma plane or the input ", $rgb_name, " data do not fit
the specified width, height, and strides, or if the matrix cannot be inverted.
")]
        pub fn $method(
            gray_image: &mut YuvGrayImageMut<u8>,
            rgba: &[u8],
            rgba_stride: u32,
            range: YuvRange,
            matrix: YuvStandardMatrix,
        ) -> Result<(), YuvError> {
            rgbx_to_y::<u8, { $px_fmt as u8 }>(
                gray_image,
                rgba,
                rgba_stride,
                8,
                range,
                matrix,
                &RgbEncoder::new($px_fmt, YuvChromaSubsampling::Yuv400),
            )
        }

        #[doc = concat!("Convert ", $rgb_name, " image data with 10, 12 or 16 bit depth to YUV 4:0:0, luma only.

# Arguments

* `gray_image` - Target gray image.
* `rgba` - The input ", $rgb_name, " image data slice.
* `rgba_stride` - The stride (components per row) for the ", $rgb_name, " image data.
* `bit_depth` - Bit depth of source and target, one of 8, 10, 12, 16.
* `range` - The YUV range (limited or full).
* `matrix` - The YUV standard matrix (BT.601 or BT.709 or BT.2020 or other).
")]
        pub fn $method_p16(
            gray_image: &mut YuvGrayImageMut<u16>,
            rgba: &[u16],
            rgba_stride: u32,
            bit_depth: u32,
            range: YuvRange,
            matrix: YuvStandardMatrix,
        ) -> Result<(), YuvError> {
            rgbx_to_y::<u16, { $px_fmt as u8 }>(
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

d_cvn!(rgb_to_yuv400, rgb_to_yuv400_p16, YuvSourceChannels::Rgb, "RGB");
d_cvn!(bgr_to_yuv400, bgr_to_yuv400_p16, YuvSourceChannels::Bgr, "BGR");
d_cvn!(rgba_to_yuv400, rgba_to_yuv400_p16, YuvSourceChannels::Rgba, "RGBA");
d_cvn!(bgra_to_yuv400, bgra_to_yuv400_p16, YuvSourceChannels::Bgra, "BGRA");
d_cvn!(argb_to_yuv400, argb_to_yuv400_p16, YuvSourceChannels::Argb, "ARGB");
d_cvn!(abgr_to_yuv400, abgr_to_yuv400_p16, YuvSourceChannels::Abgr, "ABGR");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rgba_to_yuv::bgra_to_yuv444;
    use crate::YuvPlanarImageMut;
    use rand::Rng;

    #[test]
    fn test_gray_matches_planar_luma() {
        let (width, height) = (45u32, 3u32);
        let mut rng = rand::rng();
        let bgra = (0..width * height * 4)
            .map(|_| rng.random_range(0..=255u8))
            .collect::<Vec<_>>();
        let mut gray = YuvGrayImageMut::<u8>::alloc(width, height);
        bgra_to_yuv400(
            &mut gray,
            &bgra,
            width * 4,
            YuvRange::Full,
            YuvStandardMatrix::Bt709,
        )
        .unwrap();
        let mut planar =
            YuvPlanarImageMut::<u8>::alloc(width, height, YuvChromaSubsampling::Yuv444);
        bgra_to_yuv444(
            &mut planar,
            &bgra,
            width * 4,
            YuvRange::Full,
            YuvStandardMatrix::Bt709,
        )
        .unwrap();
        assert_eq!(gray.y_plane.borrow(), planar.y_plane.borrow());
    }

    #[test]
    fn test_gray_levels_at_12_bit() {
        let (width, height) = (3u32, 2u32);
        let black = vec![0u16; (width * height * 3) as usize];
        let mut gray = YuvGrayImageMut::<u16>::alloc(width, height);
        rgb_to_yuv400_p16(
            &mut gray,
            &black,
            width * 3,
            12,
            YuvRange::Limited,
            YuvStandardMatrix::Bt2020,
        )
        .unwrap();
        assert!(gray.y_plane.borrow().iter().all(|&x| x == 256));

        let mut short = YuvGrayImageMut::<u16>::alloc(width, height);
        let result = rgb_to_yuv400_p16(
            &mut short,
            &black,
            2,
            12,
            YuvRange::Limited,
            YuvStandardMatrix::Bt2020,
        );
        assert!(matches!(result, Err(YuvError::RgbStrideTooSmall(_))));
    }
}
