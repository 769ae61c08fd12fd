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
use crate::inverse::{yuv_to_rgbx, YuvDecoder};
use crate::yuv_support::{YuvChromaSubsampling, YuvSourceChannels};
use crate::{YuvError, YuvPlanarImage, YuvRange, YuvStandardMatrix};

macro_rules! d_cnv {
    ($method: ident, $method_p16: ident,
    $px_fmt: expr, $sampling: expr,
    $yuv_name: expr, $rgb_name: expr) => {
        #[doc = concat!("Convert ", $yuv_name, " planar format to ", $rgb_name, " format.

Each chroma sample is reused for every pixel of its block, no interpolation is made.
", $rgb_name, " channels are clamped to [0, 255], alpha when present is set to 255.

# Arguments

* `planar_image` - Source planar image.
* `rgba` - A mutable slice to store the converted ", $rgb_name, " data.
* `rgba_stride` - The stride (bytes per row) for the ", $rgb_name, " image data.
* `range` - The YUV range (limited or full).
* `matrix` - The YUV standard matrix (BT.601 or BT.709 or BT.2020 or other).

# Errors

Returns an error if the lengths of the planes or the output ", $rgb_name, " data are not valid based
on the specified width, height, and strides, or if the matrix cannot be inverted.
Nothing is written when an error is returned.
")]
        pub fn $method(
            planar_image: &YuvPlanarImage<u8>,
            rgba: &mut [u8],
            rgba_stride: u32,
            range: YuvRange,
            matrix: YuvStandardMatrix,
        ) -> Result<(), YuvError> {
            yuv_to_rgbx::<u8, { $px_fmt as u8 }, { $sampling as u8 }>(
                planar_image,
                rgba,
                rgba_stride,
                8,
                range,
                matrix,
                &YuvDecoder::new($px_fmt, $sampling),
            )
        }

        #[doc = concat!("Convert ", $yuv_name, " planar format with 10, 12 or 16 bit depth to ", $rgb_name, " format of the same depth.

Channels are clamped to [0, 2^bit_depth - 1], alpha when present is set to the maximum.

# Arguments

* `planar_image` - Source planar image.
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
            planar_image: &YuvPlanarImage<u16>,
            rgba: &mut [u16],
            rgba_stride: u32,
            bit_depth: u32,
            range: YuvRange,
            matrix: YuvStandardMatrix,
        ) -> Result<(), YuvError> {
            yuv_to_rgbx::<u16, { $px_fmt as u8 }, { $sampling as u8 }>(
                planar_image,
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

d_cnv!(yuv444_to_rgb, yuv444_to_rgb_p16, YuvSourceChannels::Rgb, YuvChromaSubsampling::Yuv444, "YUV 4:4:4", "RGB");
d_cnv!(yuv444_to_bgr, yuv444_to_bgr_p16, YuvSourceChannels::Bgr, YuvChromaSubsampling::Yuv444, "YUV 4:4:4", "BGR");
d_cnv!(yuv444_to_rgba, yuv444_to_rgba_p16, YuvSourceChannels::Rgba, YuvChromaSubsampling::Yuv444, "YUV 4:4:4", "RGBA");
d_cnv!(yuv444_to_bgra, yuv444_to_bgra_p16, YuvSourceChannels::Bgra, YuvChromaSubsampling::Yuv444, "YUV 4:4:4", "BGRA");
d_cnv!(yuv444_to_argb, yuv444_to_argb_p16, YuvSourceChannels::Argb, YuvChromaSubsampling::Yuv444, "YUV 4:4:4", "ARGB");
d_cnv!(yuv444_to_abgr, yuv444_to_abgr_p16, YuvSourceChannels::Abgr, YuvChromaSubsampling::Yuv444, "YUV 4:4:4", "ABGR");

d_cnv!(yuv422_to_rgb, yuv422_to_rgb_p16, YuvSourceChannels::Rgb, YuvChromaSubsampling::Yuv422, "YUV 4:2:2", "RGB");
d_cnv!(yuv422_to_bgr, yuv422_to_bgr_p16, YuvSourceChannels::Bgr, YuvChromaSubsampling::Yuv422, "YUV 4:2:2", "BGR");
d_cnv!(yuv422_to_rgba, yuv422_to_rgba_p16, YuvSourceChannels::Rgba, YuvChromaSubsampling::Yuv422, "YUV 4:2:2", "RGBA");
d_cnv!(yuv422_to_bgra, yuv422_to_bgra_p16, YuvSourceChannels::Bgra, YuvChromaSubsampling::Yuv422, "YUV 4:2:2", "BGRA");
d_cnv!(yuv422_to_argb, yuv422_to_argb_p16, YuvSourceChannels::Argb, YuvChromaSubsampling::Yuv422, "YUV 4:2:2", "ARGB");
d_cnv!(yuv422_to_abgr, yuv422_to_abgr_p16, YuvSourceChannels::Abgr, YuvChromaSubsampling::Yuv422, "YUV 4:2:2", "ABGR");

d_cnv!(yuv420_to_rgb, yuv420_to_rgb_p16, YuvSourceChannels::Rgb, YuvChromaSubsampling::Yuv420, "YUV 4:2:0", "RGB");
d_cnv!(yuv420_to_bgr, yuv420_to_bgr_p16, YuvSourceChannels::Bgr, YuvChromaSubsampling::Yuv420, "YUV 4:2:0", "BGR");
d_cnv!(yuv420_to_rgba, yuv420_to_rgba_p16, YuvSourceChannels::Rgba, YuvChromaSubsampling::Yuv420, "YUV 4:2:0", "RGBA");
d_cnv!(yuv420_to_bgra, yuv420_to_bgra_p16, YuvSourceChannels::Bgra, YuvChromaSubsampling::Yuv420, "YUV 4:2:0", "BGRA");
d_cnv!(yuv420_to_argb, yuv420_to_argb_p16, YuvSourceChannels::Argb, YuvChromaSubsampling::Yuv420, "YUV 4:2:0", "ARGB");
d_cnv!(yuv420_to_abgr, yuv420_to_abgr_p16, YuvSourceChannels::Abgr, YuvChromaSubsampling::Yuv420, "YUV 4:2:0", "ABGR");

d_cnv!(yuv411_to_rgb, yuv411_to_rgb_p16, YuvSourceChannels::Rgb, YuvChromaSubsampling::Yuv411, "YUV 4:1:1", "RGB");
d_cnv!(yuv411_to_bgr, yuv411_to_bgr_p16, YuvSourceChannels::Bgr, YuvChromaSubsampling::Yuv411, "YUV 4:1:1", "BGR");
d_cnv!(yuv411_to_rgba, yuv411_to_rgba_p16, YuvSourceChannels::Rgba, YuvChromaSubsampling::Yuv411, "YUV 4:1:1", "RGBA");
d_cnv!(yuv411_to_bgra, yuv411_to_bgra_p16, YuvSourceChannels::Bgra, YuvChromaSubsampling::Yuv411, "YUV 4:1:1", "BGRA");
d_cnv!(yuv411_to_argb, yuv411_to_argb_p16, YuvSourceChannels::Argb, YuvChromaSubsampling::Yuv411, "YUV 4:1:1", "ARGB");
d_cnv!(yuv411_to_abgr, yuv411_to_abgr_p16, YuvSourceChannels::Abgr, YuvChromaSubsampling::Yuv411, "YUV 4:1:1", "ABGR");

d_cnv!(yuv410_to_rgb, yuv410_to_rgb_p16, YuvSourceChannels::Rgb, YuvChromaSubsampling::Yuv410, "YUV 4:1:0", "RGB");
d_cnv!(yuv410_to_bgr, yuv410_to_bgr_p16, YuvSourceChannels::Bgr, YuvChromaSubsampling::Yuv410, "YUV 4:1:0", "BGR");
d_cnv!(yuv410_to_rgba, yuv410_to_rgba_p16, YuvSourceChannels::Rgba, YuvChromaSubsampling::Yuv410, "YUV 4:1:0", "RGBA");
d_cnv!(yuv410_to_bgra, yuv410_to_bgra_p16, YuvSourceChannels::Bgra, YuvChromaSubsampling::Yuv410, "YUV 4:1:0", "BGRA");
d_cnv!(yuv410_to_argb, yuv410_to_argb_p16, YuvSourceChannels::Argb, YuvChromaSubsampling::Yuv410, "YUV 4:1:0", "ARGB");
d_cnv!(yuv410_to_abgr, yuv410_to_abgr_p16, YuvSourceChannels::Abgr, YuvChromaSubsampling::Yuv410, "YUV 4:1:0", "ABGR");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rgba_to_yuv::{
        argb_to_yuv444, rgb_to_yuv410, rgb_to_yuv411, rgb_to_yuv420, rgb_to_yuv422,
        rgb_to_yuv444, rgb_to_yuv444_p16, rgba_to_yuv422,
    };
    use crate::YuvPlanarImageMut;
    use rand::Rng;

    fn max_difference<V: Copy + Into<i32>>(a: &[V], b: &[V]) -> i32 {
        a.iter()
            .zip(b.iter())
            .map(|(&x, &y)| (x.into() - y.into()).abs())
            .max()
            .unwrap_or(0)
    }

    #[test]
    fn test_flat_2x2_through_420() {
        let rgb = [128u8, 64, 32].repeat(4);
        let mut planar = YuvPlanarImageMut::<u8>::alloc(2, 2, YuvChromaSubsampling::Yuv420);
        rgb_to_yuv420(&mut planar, &rgb, 6, YuvRange::Limited, YuvStandardMatrix::Bt601).unwrap();
        assert!(planar.y_plane.borrow().iter().all(|&x| x == 84));
        assert_eq!(planar.u_plane.borrow(), &[105]);
        assert_eq!(planar.v_plane.borrow(), &[158]);

        let mut decoded = [0u8; 12];
        yuv420_to_rgb(
            &planar.to_fixed(),
            &mut decoded,
            6,
            YuvRange::Limited,
            YuvStandardMatrix::Bt601,
        )
        .unwrap();
        for px in decoded.chunks_exact(3) {
            assert_eq!(px, &[127, 64, 33]);
        }
    }

    #[test]
    fn test_inverse_shift_truncates() {
        // (19 - 16) * 75 = 225, 225 >> 6 = 3 where rounding would give 4
        let width = 67u32;
        let y_plane = vec![19u8; width as usize];
        let chroma = vec![128u8; width as usize];
        let planar = YuvPlanarImage {
            y_plane: &y_plane,
            y_stride: width,
            u_plane: &chroma,
            u_stride: width,
            v_plane: &chroma,
            v_stride: width,
            width,
            height: 1,
        };
        let mut rgb = vec![0u8; width as usize * 3];
        yuv444_to_rgb(&planar, &mut rgb, width * 3, YuvRange::Limited, YuvStandardMatrix::Bt601)
            .unwrap();
        assert!(rgb.chunks_exact(3).all(|px| px == [3, 3, 3]));

        // 5100 + 102 * 30 = 8160 is 127.5 in Q6
        let y_plane = vec![84u8; width as usize];
        let u_plane = vec![105u8; width as usize];
        let v_plane = vec![158u8; width as usize];
        let planar = YuvPlanarImage {
            y_plane: &y_plane,
            u_plane: &u_plane,
            v_plane: &v_plane,
            ..planar
        };
        yuv444_to_rgb(&planar, &mut rgb, width * 3, YuvRange::Limited, YuvStandardMatrix::Bt601)
            .unwrap();
        assert!(rgb.chunks_exact(3).all(|px| px == [127, 64, 33]));
    }

    #[test]
    fn test_round_trip_444() {
        let (width, height) = (61u32, 9u32);
        let mut rng = rand::rng();
        let rgb = (0..width * height * 3)
            .map(|_| rng.random_range(0..=255u8))
            .collect::<Vec<_>>();
        // worst cases over every 8-bit colour with the truncating inverse
        let cases = [
            (YuvRange::Full, YuvStandardMatrix::Bt601, 3),
            (YuvRange::Full, YuvStandardMatrix::Bt709, 3),
            (YuvRange::Limited, YuvStandardMatrix::Bt601, 4),
            (YuvRange::Limited, YuvStandardMatrix::Bt709, 3),
            (YuvRange::Full, YuvStandardMatrix::Bt2020, 3),
            (YuvRange::Limited, YuvStandardMatrix::Bt2020, 4),
        ];
        for (range, matrix, tolerance) in cases {
            let mut planar =
                YuvPlanarImageMut::<u8>::alloc(width, height, YuvChromaSubsampling::Yuv444);
            rgb_to_yuv444(&mut planar, &rgb, width * 3, range, matrix).unwrap();
            let mut decoded = vec![0u8; rgb.len()];
            yuv444_to_rgb(&planar.to_fixed(), &mut decoded, width * 3, range, matrix).unwrap();
            let diff = max_difference(&rgb, &decoded);
            assert!(
                diff <= tolerance,
                "{:?} {:?} differs by {}",
                range,
                matrix,
                diff
            );
        }
    }

    type Encoder = fn(
        &mut YuvPlanarImageMut<u8>,
        &[u8],
        u32,
        YuvRange,
        YuvStandardMatrix,
    ) -> Result<(), YuvError>;
    type Decoder = fn(
        &YuvPlanarImage<u8>,
        &mut [u8],
        u32,
        YuvRange,
        YuvStandardMatrix,
    ) -> Result<(), YuvError>;

    #[test]
    fn test_round_trip_of_gradient() {
        // steps of at most 2 per column and 3 per row, error grows with the chroma block
        let (width, height) = (64u32, 16u32);
        let rgb = (0..height)
            .flat_map(|y| {
                (0..width).flat_map(move |x| {
                    [(40 + 2 * x + y) as u8, (200 - x - 2 * y) as u8, (60 + x + 3 * y) as u8]
                })
            })
            .collect::<Vec<_>>();
        let schemes: [(YuvChromaSubsampling, Encoder, Decoder, i32); 5] = [
            (YuvChromaSubsampling::Yuv444, rgb_to_yuv444, yuv444_to_rgb, 2),
            (YuvChromaSubsampling::Yuv422, rgb_to_yuv422, yuv422_to_rgb, 3),
            (YuvChromaSubsampling::Yuv420, rgb_to_yuv420, yuv420_to_rgb, 5),
            (YuvChromaSubsampling::Yuv411, rgb_to_yuv411, yuv411_to_rgb, 5),
            (YuvChromaSubsampling::Yuv410, rgb_to_yuv410, yuv410_to_rgb, 15),
        ];
        let matrices = [
            (YuvRange::Full, YuvStandardMatrix::Bt601),
            (YuvRange::Limited, YuvStandardMatrix::Bt709),
        ];
        for (sampling, encode, decode, tolerance) in schemes {
            for (range, matrix) in matrices {
                let mut planar = YuvPlanarImageMut::<u8>::alloc(width, height, sampling);
                encode(&mut planar, &rgb, width * 3, range, matrix).unwrap();
                let mut decoded = vec![0u8; rgb.len()];
                decode(&planar.to_fixed(), &mut decoded, width * 3, range, matrix).unwrap();
                let diff = max_difference(&rgb, &decoded);
                assert!(diff <= tolerance, "{sampling:?} {range:?} {matrix:?} differs by {diff}");
            }
        }
    }

    #[test]
    fn test_round_trip_10_bit() {
        let (width, height) = (17u32, 3u32);
        let mut rng = rand::rng();
        let rgb = (0..width * height * 3)
            .map(|_| rng.random_range(0..=1023u16))
            .collect::<Vec<_>>();
        let mut planar =
            YuvPlanarImageMut::<u16>::alloc(width, height, YuvChromaSubsampling::Yuv444);
        rgb_to_yuv444_p16(
            &mut planar,
            &rgb,
            width * 3,
            10,
            YuvRange::Full,
            YuvStandardMatrix::Bt709,
        )
        .unwrap();
        let mut decoded = vec![0u16; rgb.len()];
        yuv444_to_rgb_p16(
            &planar.to_fixed(),
            &mut decoded,
            width * 3,
            10,
            YuvRange::Full,
            YuvStandardMatrix::Bt709,
        )
        .unwrap();
        assert!(max_difference(&rgb, &decoded) <= 8);
    }

    #[test]
    fn test_alpha_is_opaque_in_every_layout() {
        let (width, height) = (35u32, 2u32);
        let mut planar =
            YuvPlanarImageMut::<u8>::alloc(width, height, YuvChromaSubsampling::Yuv422);
        let rgba = vec![90u8; (width * height * 4) as usize];
        rgba_to_yuv422(
            &mut planar,
            &rgba,
            width * 4,
            YuvRange::Full,
            YuvStandardMatrix::Bt601,
        )
        .unwrap();
        let fixed = planar.to_fixed();
        let stride = width * 4;
        let mut dst = vec![0u8; (stride * height) as usize];

        yuv422_to_rgba(&fixed, &mut dst, stride, YuvRange::Full, YuvStandardMatrix::Bt601).unwrap();
        assert!(dst.chunks_exact(4).all(|px| px[3] == 255));
        dst.fill(0);
        yuv422_to_bgra(&fixed, &mut dst, stride, YuvRange::Full, YuvStandardMatrix::Bt601).unwrap();
        assert!(dst.chunks_exact(4).all(|px| px[3] == 255));
        dst.fill(0);
        yuv422_to_argb(&fixed, &mut dst, stride, YuvRange::Full, YuvStandardMatrix::Bt601).unwrap();
        assert!(dst.chunks_exact(4).all(|px| px[0] == 255));
        dst.fill(0);
        yuv422_to_abgr(&fixed, &mut dst, stride, YuvRange::Full, YuvStandardMatrix::Bt601).unwrap();
        assert!(dst.chunks_exact(4).all(|px| px[0] == 255));

        let mut wide = YuvPlanarImageMut::<u16>::alloc(width, height, YuvChromaSubsampling::Yuv422);
        wide.u_plane.borrow_mut().fill(2048);
        wide.v_plane.borrow_mut().fill(2048);
        let mut dst16 = vec![0u16; (stride * height) as usize];
        yuv422_to_argb_p16(
            &wide.to_fixed(),
            &mut dst16,
            stride,
            12,
            YuvRange::Full,
            YuvStandardMatrix::Bt601,
        )
        .unwrap();
        assert!(dst16.chunks_exact(4).all(|px| px == [4095, 0, 0, 0]));
    }

    #[test]
    fn test_channel_order_of_layouts() {
        let (width, height) = (3u32, 1u32);
        let argb = [255u8, 200, 30, 10].repeat(3);
        let mut planar =
            YuvPlanarImageMut::<u8>::alloc(width, height, YuvChromaSubsampling::Yuv444);
        argb_to_yuv444(
            &mut planar,
            &argb,
            width * 4,
            YuvRange::Full,
            YuvStandardMatrix::Bt709,
        )
        .unwrap();
        let fixed = planar.to_fixed();
        let mut rgb = [0u8; 9];
        yuv444_to_rgb(&fixed, &mut rgb, 9, YuvRange::Full, YuvStandardMatrix::Bt709).unwrap();
        let mut bgr = [0u8; 9];
        yuv444_to_bgr(&fixed, &mut bgr, 9, YuvRange::Full, YuvStandardMatrix::Bt709).unwrap();
        let mut abgr = [0u8; 12];
        yuv444_to_abgr(&fixed, &mut abgr, 12, YuvRange::Full, YuvStandardMatrix::Bt709).unwrap();
        for ((rgb, bgr), abgr) in rgb
            .chunks_exact(3)
            .zip(bgr.chunks_exact(3))
            .zip(abgr.chunks_exact(4))
        {
            assert!(rgb[0] > rgb[1] && rgb[1] > rgb[2]);
            assert_eq!(rgb, &[bgr[2], bgr[1], bgr[0]]);
            assert_eq!(abgr, &[255, bgr[0], bgr[1], bgr[2]]);
        }
    }

    #[test]
    fn test_short_destination_is_rejected() {
        let mut planar = YuvPlanarImageMut::<u8>::alloc(4, 4, YuvChromaSubsampling::Yuv420);
        planar.y_plane.borrow_mut().fill(100);
        let mut rgba = vec![7u8; 4 * 4 * 4 - 1];
        let result = yuv420_to_rgba(
            &planar.to_fixed(),
            &mut rgba,
            16,
            YuvRange::Limited,
            YuvStandardMatrix::Bt601,
        );
        assert!(matches!(result, Err(YuvError::DestinationSizeMismatch(_))));
        assert!(rgba.iter().all(|&x| x == 7));

        let result = yuv420_to_rgba(
            &planar.to_fixed(),
            &mut rgba,
            16,
            YuvRange::Limited,
            YuvStandardMatrix::Custom(0.6, 0.4),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_near_degenerate_matrices_fail_without_writing() {
        let planar = YuvPlanarImageMut::<u8>::alloc(4, 2, YuvChromaSubsampling::Yuv444);
        let mut rgb = vec![9u8; 4 * 2 * 3];
        let result = yuv444_to_rgb(
            &planar.to_fixed(),
            &mut rgb,
            12,
            YuvRange::Limited,
            YuvStandardMatrix::Custom(0.058, 0.942),
        );
        assert!(matches!(result, Err(YuvError::DegenerateColorMatrix { .. })));
        assert!(rgb.iter().all(|&x| x == 9));

        // green coefficients near 160000 in Q6 only overflow with 16 bit samples
        let skewed = YuvStandardMatrix::Custom(0.5, 0.4998);
        let wide = YuvPlanarImageMut::<u16>::alloc(4, 2, YuvChromaSubsampling::Yuv444);
        let mut rgb16 = vec![9u16; 4 * 2 * 3];
        yuv444_to_rgb_p16(&wide.to_fixed(), &mut rgb16, 12, 10, YuvRange::Full, skewed).unwrap();
        rgb16.fill(9);
        let result =
            yuv444_to_rgb_p16(&wide.to_fixed(), &mut rgb16, 12, 16, YuvRange::Full, skewed);
        assert!(matches!(result, Err(YuvError::DegenerateColorMatrix { .. })));
        assert!(rgb16.iter().all(|&x| x == 9));
    }
}
