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
use crate::inverse::{yuv_nv_to_rgbx, YuvDecoder};
use crate::yuv_support::{YuvChromaSubsampling, YuvNVOrder, YuvSourceChannels};
use crate::{YuvBiPlanarImage, YuvError, YuvRange, YuvStandardMatrix};

macro_rules! d_cnv {
    ($method: ident, $method_p16: ident,
    $px_fmt: expr, $sampling: expr, $order: expr,
    $yuv_name: expr, $rgb_name: expr) => {
        #[doc = concat!("Convert ", $yuv_name, " semi-planar format to ", $rgb_name, " format.

Each chroma pair is reused for every pixel of its block, no interpolation is made.
Alpha when present is set to 255.

# Arguments

* `bi_planar_image` - Source semi-planar image.
* `rgba` - A mutable slice to store the converted ", $rgb_name, " data.
* `rgba_stride` - The stride (bytes per row) for the ", $rgb_name, " image data.
* `range` - The YUV range (limited or full).
* `matrix` - The YUV standard matrix (BT.601 or BT.709 or BT.2020 or other).

# Errors

Returns an error if the lengths of the planes or the output ", $rgb_name, " data are not valid based
on the specified width, height, and strides, or if the matrix cannot be inverted.
")]
        pub fn $method(
            bi_planar_image: &YuvBiPlanarImage<u8>,
            rgba: &mut [u8],
            rgba_stride: u32,
            range: YuvRange,
            matrix: YuvStandardMatrix,
        ) -> Result<(), YuvError> {
            yuv_nv_to_rgbx::<u8, { $px_fmt as u8 }, { $sampling as u8 }, { $order as u8 }>(
                bi_planar_image,
                rgba,
                rgba_stride,
                8,
                range,
                matrix,
                &YuvDecoder::new($px_fmt, $sampling),
            )
        }

        #[doc = concat!("Convert ", $yuv_name, " semi-planar format with 10, 12 or 16 bit depth to ", $rgb_name, " format of the same depth.

# Arguments

* `bi_planar_image` - Source semi-planar image.
* `rgba` - A mutable slice to store the converted ", $rgb_name, " data.
* `rgba_stride` - The stride (components per row) for the ", $rgb_name, " image data.
* `bit_depth` - Bit depth of source and target, one of 8, 10, 12, 16.
* `range` - The YUV range (limited or full).
* `matrix` - The YUV standard matrix (BT.601 or BT.709 or BT.2020 or other).

# Errors

Returns an error if the lengths of the planes or the output ", $rgb_name, " data are not valid based
on the specified width, height, and strides, if the bit depth is not supported,
or if the matrix cannot be inverted.
")]
        pub fn $method_p16(
            bi_planar_image: &YuvBiPlanarImage<u16>,
            rgba: &mut [u16],
            rgba_stride: u32,
            bit_depth: u32,
            range: YuvRange,
            matrix: YuvStandardMatrix,
        ) -> Result<(), YuvError> {
            yuv_nv_to_rgbx::<u16, { $px_fmt as u8 }, { $sampling as u8 }, { $order as u8 }>(
                bi_planar_image,
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

macro_rules! d_cnv_layouts {
    ($sampling: expr, $order: expr, $yuv_name: expr,
    [$(($method: ident, $method_p16: ident, $px_fmt: expr, $rgb_name: expr)),*]) => {
        $(d_cnv!($method, $method_p16, $px_fmt, $sampling, $order, $yuv_name, $rgb_name);)*
    };
}

d_cnv_layouts!(
    YuvChromaSubsampling::Yuv420,
    YuvNVOrder::UV,
    "NV12",
    [
        (yuv_nv12_to_rgb, yuv_nv12_to_rgb_p16, YuvSourceChannels::Rgb, "RGB"),
        (yuv_nv12_to_bgr, yuv_nv12_to_bgr_p16, YuvSourceChannels::Bgr, "BGR"),
        (yuv_nv12_to_rgba, yuv_nv12_to_rgba_p16, YuvSourceChannels::Rgba, "RGBA"),
        (yuv_nv12_to_bgra, yuv_nv12_to_bgra_p16, YuvSourceChannels::Bgra, "BGRA"),
        (yuv_nv12_to_argb, yuv_nv12_to_argb_p16, YuvSourceChannels::Argb, "ARGB"),
        (yuv_nv12_to_abgr, yuv_nv12_to_abgr_p16, YuvSourceChannels::Abgr, "ABGR")
    ]
);

d_cnv_layouts!(
    YuvChromaSubsampling::Yuv420,
    YuvNVOrder::VU,
    "NV21",
    [
        (yuv_nv21_to_rgb, yuv_nv21_to_rgb_p16, YuvSourceChannels::Rgb, "RGB"),
        (yuv_nv21_to_bgr, yuv_nv21_to_bgr_p16, YuvSourceChannels::Bgr, "BGR"),
        (yuv_nv21_to_rgba, yuv_nv21_to_rgba_p16, YuvSourceChannels::Rgba, "RGBA"),
        (yuv_nv21_to_bgra, yuv_nv21_to_bgra_p16, YuvSourceChannels::Bgra, "BGRA"),
        (yuv_nv21_to_argb, yuv_nv21_to_argb_p16, YuvSourceChannels::Argb, "ARGB"),
        (yuv_nv21_to_abgr, yuv_nv21_to_abgr_p16, YuvSourceChannels::Abgr, "ABGR")
    ]
);

d_cnv_layouts!(
    YuvChromaSubsampling::Yuv422,
    YuvNVOrder::UV,
    "NV16",
    [
        (yuv_nv16_to_rgb, yuv_nv16_to_rgb_p16, YuvSourceChannels::Rgb, "RGB"),
        (yuv_nv16_to_bgr, yuv_nv16_to_bgr_p16, YuvSourceChannels::Bgr, "BGR"),
        (yuv_nv16_to_rgba, yuv_nv16_to_rgba_p16, YuvSourceChannels::Rgba, "RGBA"),
        (yuv_nv16_to_bgra, yuv_nv16_to_bgra_p16, YuvSourceChannels::Bgra, "BGRA"),
        (yuv_nv16_to_argb, yuv_nv16_to_argb_p16, YuvSourceChannels::Argb, "ARGB"),
        (yuv_nv16_to_abgr, yuv_nv16_to_abgr_p16, YuvSourceChannels::Abgr, "ABGR")
    ]
);

d_cnv_layouts!(
    YuvChromaSubsampling::Yuv422,
    YuvNVOrder::VU,
    "NV61",
    [
        (yuv_nv61_to_rgb, yuv_nv61_to_rgb_p16, YuvSourceChannels::Rgb, "RGB"),
        (yuv_nv61_to_bgr, yuv_nv61_to_bgr_p16, YuvSourceChannels::Bgr, "BGR"),
        (yuv_nv61_to_rgba, yuv_nv61_to_rgba_p16, YuvSourceChannels::Rgba, "RGBA"),
        (yuv_nv61_to_bgra, yuv_nv61_to_bgra_p16, YuvSourceChannels::Bgra, "BGRA"),
        (yuv_nv61_to_argb, yuv_nv61_to_argb_p16, YuvSourceChannels::Argb, "ARGB"),
        (yuv_nv61_to_abgr, yuv_nv61_to_abgr_p16, YuvSourceChannels::Abgr, "ABGR")
    ]
);

d_cnv_layouts!(
    YuvChromaSubsampling::Yuv444,
    YuvNVOrder::UV,
    "NV24",
    [
        (yuv_nv24_to_rgb, yuv_nv24_to_rgb_p16, YuvSourceChannels::Rgb, "RGB"),
        (yuv_nv24_to_bgr, yuv_nv24_to_bgr_p16, YuvSourceChannels::Bgr, "BGR"),
        (yuv_nv24_to_rgba, yuv_nv24_to_rgba_p16, YuvSourceChannels::Rgba, "RGBA"),
        (yuv_nv24_to_bgra, yuv_nv24_to_bgra_p16, YuvSourceChannels::Bgra, "BGRA"),
        (yuv_nv24_to_argb, yuv_nv24_to_argb_p16, YuvSourceChannels::Argb, "ARGB"),
        (yuv_nv24_to_abgr, yuv_nv24_to_abgr_p16, YuvSourceChannels::Abgr, "ABGR")
    ]
);

d_cnv_layouts!(
    YuvChromaSubsampling::Yuv444,
    YuvNVOrder::VU,
    "NV42",
    [
        (yuv_nv42_to_rgb, yuv_nv42_to_rgb_p16, YuvSourceChannels::Rgb, "RGB"),
        (yuv_nv42_to_bgr, yuv_nv42_to_bgr_p16, YuvSourceChannels::Bgr, "BGR"),
        (yuv_nv42_to_rgba, yuv_nv42_to_rgba_p16, YuvSourceChannels::Rgba, "RGBA"),
        (yuv_nv42_to_bgra, yuv_nv42_to_bgra_p16, YuvSourceChannels::Bgra, "BGRA"),
        (yuv_nv42_to_argb, yuv_nv42_to_argb_p16, YuvSourceChannels::Argb, "ARGB"),
        (yuv_nv42_to_abgr, yuv_nv42_to_abgr_p16, YuvSourceChannels::Abgr, "ABGR")
    ]
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rgba_to_nv::{rgb_to_yuv_nv12, rgb_to_yuv_nv21, rgb_to_yuv_nv24_p16};
    use crate::rgba_to_yuv::rgb_to_yuv420;
    use crate::yuv_to_rgba::yuv420_to_bgra;
    use crate::{YuvBiPlanarImageMut, YuvPlanarImageMut};
    use rand::Rng;

    #[test]
    fn test_semi_planar_decodes_like_planar() {
        let (width, height) = (39u32, 7u32);
        let mut rng = rand::rng();
        let rgb = (0..width * height * 3)
            .map(|_| rng.random_range(0..=255u8))
            .collect::<Vec<_>>();

        let mut planar =
            YuvPlanarImageMut::<u8>::alloc(width, height, YuvChromaSubsampling::Yuv420);
        rgb_to_yuv420(
            &mut planar,
            &rgb,
            width * 3,
            YuvRange::Limited,
            YuvStandardMatrix::Bt601,
        )
        .unwrap();
        let mut reference = vec![0u8; (width * height * 4) as usize];
        yuv420_to_bgra(
            &planar.to_fixed(),
            &mut reference,
            width * 4,
            YuvRange::Limited,
            YuvStandardMatrix::Bt601,
        )
        .unwrap();

        let mut nv12 =
            YuvBiPlanarImageMut::<u8>::alloc(width, height, YuvChromaSubsampling::Yuv420);
        rgb_to_yuv_nv12(
            &mut nv12,
            &rgb,
            width * 3,
            YuvRange::Limited,
            YuvStandardMatrix::Bt601,
        )
        .unwrap();
        let mut from_nv12 = vec![0u8; reference.len()];
        yuv_nv12_to_bgra(
            &nv12.to_fixed(),
            &mut from_nv12,
            width * 4,
            YuvRange::Limited,
            YuvStandardMatrix::Bt601,
        )
        .unwrap();
        assert_eq!(reference, from_nv12);

        let mut nv21 =
            YuvBiPlanarImageMut::<u8>::alloc(width, height, YuvChromaSubsampling::Yuv420);
        rgb_to_yuv_nv21(
            &mut nv21,
            &rgb,
            width * 3,
            YuvRange::Limited,
            YuvStandardMatrix::Bt601,
        )
        .unwrap();
        let mut from_nv21 = vec![0u8; reference.len()];
        yuv_nv21_to_bgra(
            &nv21.to_fixed(),
            &mut from_nv21,
            width * 4,
            YuvRange::Limited,
            YuvStandardMatrix::Bt601,
        )
        .unwrap();
        assert_eq!(reference, from_nv21);

        // reading NV21 as NV12 swaps the chroma and changes colors
        let mut swapped = vec![0u8; reference.len()];
        yuv_nv12_to_bgra(
            &nv21.to_fixed(),
            &mut swapped,
            width * 4,
            YuvRange::Limited,
            YuvStandardMatrix::Bt601,
        )
        .unwrap();
        assert_ne!(reference, swapped);
    }

    #[test]
    fn test_nv24_16_bit_black_and_white() {
        let (width, height) = (4u32, 2u32);
        let mut rgb = vec![0u16; (width * height * 3) as usize];
        rgb[..12].fill(65535);
        let mut nv24 =
            YuvBiPlanarImageMut::<u16>::alloc(width, height, YuvChromaSubsampling::Yuv444);
        rgb_to_yuv_nv24_p16(
            &mut nv24,
            &rgb,
            width * 3,
            16,
            YuvRange::Full,
            YuvStandardMatrix::Bt601,
        )
        .unwrap();
        let mut decoded = vec![0u16; rgb.len()];
        yuv_nv24_to_rgb_p16(
            &nv24.to_fixed(),
            &mut decoded,
            width * 3,
            16,
            YuvRange::Full,
            YuvStandardMatrix::Bt601,
        )
        .unwrap();
        assert!(decoded[..12].iter().all(|&x| x >= 65535 - 257));
        assert!(decoded[12..].iter().all(|&x| x == 0));
    }
}
