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
use crate::forward::{rgbx_to_yuv, RgbEncoder};
use crate::internals::ScalarRows;
use crate::yuv_support::{YuvChromaSubsampling, YuvSourceChannels};
use crate::{YuvError, YuvPlanarImageMut, YuvRange, YuvStandardMatrix};

macro_rules! d_cvn {
    ($method: ident, $method_p16: ident,
    $px_fmt: expr, $sampling: expr,
    $yuv_name: expr, $rgb_name: expr) => {
        #[doc = concat!("Convert ", $rgb_name, " image data to ", $yuv_name, " planar format.

This function performs ", $rgb_name, " to ", $yuv_name, " conversion and stores the result in ", $yuv_name, " format,
with separate planes for Y (luminance), U (chrominance), and V (chrominance) components.
Chroma of every block is the rounded box average of its pixels, blocks crossing the right edge
reuse the last column.

# Arguments

* `planar_image` - Target planar image.
* `rgba` - The input ", $rgb_name, " image data slice.
* `rgba_stride` - The stride (bytes per row) for the ", $rgb_name, " image data.
* `range` - The YUV range (limited or full).
* `matrix` - The YUV standard matrix (BT.601 or BT.709 or BT.2020 or other).

# Errors

Returns an error if the lengths of the planes or the input ", $rgb_name, " data are not valid based
on the specified width, height, and strides, or if the matrix cannot be inverted.
Nothing is written when an error is returned.
")]
        pub fn $method(
            planar_image: &mut YuvPlanarImageMut<u8>,
            rgba: &[u8],
            rgba_stride: u32,
            range: YuvRange,
            matrix: YuvStandardMatrix,
        ) -> Result<(), YuvError> {
            rgbx_to_yuv::<u8, { $px_fmt as u8 }, { $sampling as u8 }>(
                planar_image,
                rgba,
                rgba_stride,
                8,
                range,
                matrix,
                &RgbEncoder::new($px_fmt, $sampling),
            )
        }

        #[doc = concat!("Convert ", $rgb_name, " image data with 10, 12 or 16 bit depth to ", $yuv_name, " planar format.

Samples are stored in the low bits of `u16`, the planes receive the same bit depth.

# Arguments

* `planar_image` - Target planar image.
* `rgba` - The input ", $rgb_name, " image data slice.
* `rgba_stride` - The stride (components per row) for the ", $rgb_name, " image data.
* `bit_depth` - Bit depth of source and target, one of 8, 10, 12, 16.
* `range` - The YUV range (limited or full).
* `matrix` - The YUV standard matrix (BT.601 or BT.709 or BT.2020 or other).

# Errors

Returns an error if the lengths of the planes or the input ", $rgb_name, " data are not valid based
on the specified width, height, and strides, if the bit depth is not supported,
or if the matrix cannot be inverted.
")]
        pub fn $method_p16(
            planar_image: &mut YuvPlanarImageMut<u16>,
            rgba: &[u16],
            rgba_stride: u32,
            bit_depth: u32,
            range: YuvRange,
            matrix: YuvStandardMatrix,
        ) -> Result<(), YuvError> {
            rgbx_to_yuv::<u16, { $px_fmt as u8 }, { $sampling as u8 }>(
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

d_cvn!(rgb_to_yuv444, rgb_to_yuv444_p16, YuvSourceChannels::Rgb, YuvChromaSubsampling::Yuv444, "YUV 4:4:4", "RGB");
d_cvn!(bgr_to_yuv444, bgr_to_yuv444_p16, YuvSourceChannels::Bgr, YuvChromaSubsampling::Yuv444, "YUV 4:4:4", "BGR");
d_cvn!(rgba_to_yuv444, rgba_to_yuv444_p16, YuvSourceChannels::Rgba, YuvChromaSubsampling::Yuv444, "YUV 4:4:4", "RGBA");
d_cvn!(bgra_to_yuv444, bgra_to_yuv444_p16, YuvSourceChannels::Bgra, YuvChromaSubsampling::Yuv444, "YUV 4:4:4", "BGRA");
d_cvn!(argb_to_yuv444, argb_to_yuv444_p16, YuvSourceChannels::Argb, YuvChromaSubsampling::Yuv444, "YUV 4:4:4", "ARGB");
d_cvn!(abgr_to_yuv444, abgr_to_yuv444_p16, YuvSourceChannels::Abgr, YuvChromaSubsampling::Yuv444, "YUV 4:4:4", "ABGR");

d_cvn!(rgb_to_yuv422, rgb_to_yuv422_p16, YuvSourceChannels::Rgb, YuvChromaSubsampling::Yuv422, "YUV 4:2:2", "RGB");
d_cvn!(bgr_to_yuv422, bgr_to_yuv422_p16, YuvSourceChannels::Bgr, YuvChromaSubsampling::Yuv422, "YUV 4:2:2", "BGR");
d_cvn!(rgba_to_yuv422, rgba_to_yuv422_p16, YuvSourceChannels::Rgba, YuvChromaSubsampling::Yuv422, "YUV 4:2:2", "RGBA");
d_cvn!(bgra_to_yuv422, bgra_to_yuv422_p16, YuvSourceChannels::Bgra, YuvChromaSubsampling::Yuv422, "YUV 4:2:2", "BGRA");
d_cvn!(argb_to_yuv422, argb_to_yuv422_p16, YuvSourceChannels::Argb, YuvChromaSubsampling::Yuv422, "YUV 4:2:2", "ARGB");
d_cvn!(abgr_to_yuv422, abgr_to_yuv422_p16, YuvSourceChannels::Abgr, YuvChromaSubsampling::Yuv422, "YUV 4:2:2", "ABGR");

d_cvn!(rgb_to_yuv420, rgb_to_yuv420_p16, YuvSourceChannels::Rgb, YuvChromaSubsampling::Yuv420, "YUV 4:2:0", "RGB");
d_cvn!(bgr_to_yuv420, bgr_to_yuv420_p16, YuvSourceChannels::Bgr, YuvChromaSubsampling::Yuv420, "YUV 4:2:0", "BGR");
d_cvn!(rgba_to_yuv420, rgba_to_yuv420_p16, YuvSourceChannels::Rgba, YuvChromaSubsampling::Yuv420, "YUV 4:2:0", "RGBA");
d_cvn!(bgra_to_yuv420, bgra_to_yuv420_p16, YuvSourceChannels::Bgra, YuvChromaSubsampling::Yuv420, "YUV 4:2:0", "BGRA");
d_cvn!(argb_to_yuv420, argb_to_yuv420_p16, YuvSourceChannels::Argb, YuvChromaSubsampling::Yuv420, "YUV 4:2:0", "ARGB");
d_cvn!(abgr_to_yuv420, abgr_to_yuv420_p16, YuvSourceChannels::Abgr, YuvChromaSubsampling::Yuv420, "YUV 4:2:0", "ABGR");

d_cvn!(rgb_to_yuv411, rgb_to_yuv411_p16, YuvSourceChannels::Rgb, YuvChromaSubsampling::Yuv411, "YUV 4:1:1", "RGB");
d_cvn!(bgr_to_yuv411, bgr_to_yuv411_p16, YuvSourceChannels::Bgr, YuvChromaSubsampling::Yuv411, "YUV 4:1:1", "BGR");
d_cvn!(rgba_to_yuv411, rgba_to_yuv411_p16, YuvSourceChannels::Rgba, YuvChromaSubsampling::Yuv411, "YUV 4:1:1", "RGBA");
d_cvn!(bgra_to_yuv411, bgra_to_yuv411_p16, YuvSourceChannels::Bgra, YuvChromaSubsampling::Yuv411, "YUV 4:1:1", "BGRA");
d_cvn!(argb_to_yuv411, argb_to_yuv411_p16, YuvSourceChannels::Argb, YuvChromaSubsampling::Yuv411, "YUV 4:1:1", "ARGB");
d_cvn!(abgr_to_yuv411, abgr_to_yuv411_p16, YuvSourceChannels::Abgr, YuvChromaSubsampling::Yuv411, "YUV 4:1:1", "ABGR");

d_cvn!(rgb_to_yuv410, rgb_to_yuv410_p16, YuvSourceChannels::Rgb, YuvChromaSubsampling::Yuv410, "YUV 4:1:0", "RGB");
d_cvn!(bgr_to_yuv410, bgr_to_yuv410_p16, YuvSourceChannels::Bgr, YuvChromaSubsampling::Yuv410, "YUV 4:1:0", "BGR");
d_cvn!(rgba_to_yuv410, rgba_to_yuv410_p16, YuvSourceChannels::Rgba, YuvChromaSubsampling::Yuv410, "YUV 4:1:0", "RGBA");
d_cvn!(bgra_to_yuv410, bgra_to_yuv410_p16, YuvSourceChannels::Bgra, YuvChromaSubsampling::Yuv410, "YUV 4:1:0", "BGRA");
d_cvn!(argb_to_yuv410, argb_to_yuv410_p16, YuvSourceChannels::Argb, YuvChromaSubsampling::Yuv410, "YUV 4:1:0", "ARGB");
d_cvn!(abgr_to_yuv410, abgr_to_yuv410_p16, YuvSourceChannels::Abgr, YuvChromaSubsampling::Yuv410, "YUV 4:1:0", "ABGR");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BufferStoreMut;
    use rand::Rng;

    fn random_rgb(len: usize) -> Vec<u8> {
        let mut rng = rand::rng();
        (0..len).map(|_| rng.random_range(0..=255u8)).collect()
    }

    #[test]
    fn test_black_and_white_levels() {
        let (width, height) = (4u32, 4u32);
        for (value, expected_y) in [(0u8, 16u8), (255u8, 235u8)] {
            let rgb = vec![value; (width * height * 3) as usize];
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
            assert!(planar.y_plane.borrow().iter().all(|&x| x == expected_y));
            assert!(planar.u_plane.borrow().iter().all(|&x| x == 128));
            assert!(planar.v_plane.borrow().iter().all(|&x| x == 128));
        }

        let rgb = vec![0u16; (width * height * 3) as usize];
        let mut planar =
            YuvPlanarImageMut::<u16>::alloc(width, height, YuvChromaSubsampling::Yuv422);
        rgb_to_yuv422_p16(
            &mut planar,
            &rgb,
            width * 3,
            10,
            YuvRange::Limited,
            YuvStandardMatrix::Bt709,
        )
        .unwrap();
        assert!(planar.y_plane.borrow().iter().all(|&x| x == 64));
        assert!(planar.u_plane.borrow().iter().all(|&x| x == 512));
        assert!(planar.v_plane.borrow().iter().all(|&x| x == 512));
    }

    #[test]
    fn test_420_cadence_with_padded_strides() {
        const SENTINEL: u8 = 0xEE;
        let (width, height) = (8u32, 4u32);
        // every 2x2 block is one flat color
        let mut rgba = vec![0u8; (width * height * 4) as usize];
        let mut rng = rand::rng();
        for by in 0..2 {
            for bx in 0..4 {
                let color = [
                    rng.random_range(0..=255u8),
                    rng.random_range(0..=255u8),
                    rng.random_range(0..=255u8),
                    rng.random_range(0..=255u8),
                ];
                for y in by * 2..by * 2 + 2 {
                    for x in bx * 2..bx * 2 + 2 {
                        let offset = (y * width as usize + x) * 4;
                        rgba[offset..offset + 4].copy_from_slice(&color);
                    }
                }
            }
        }

        let (y_stride, u_stride, v_stride) = (11u32, 6u32, 7u32);
        let mut y_plane = vec![SENTINEL; (y_stride * height) as usize];
        let mut u_plane = vec![SENTINEL; (u_stride * 2) as usize];
        let mut v_plane = vec![SENTINEL; (v_stride * 2) as usize];
        let mut planar = YuvPlanarImageMut {
            y_plane: BufferStoreMut::Borrowed(&mut y_plane),
            y_stride,
            u_plane: BufferStoreMut::Borrowed(&mut u_plane),
            u_stride,
            v_plane: BufferStoreMut::Borrowed(&mut v_plane),
            v_stride,
            width,
            height,
        };
        rgba_to_yuv420(
            &mut planar,
            &rgba,
            width * 4,
            YuvRange::Limited,
            YuvStandardMatrix::Bt709,
        )
        .unwrap();

        let mut full = YuvPlanarImageMut::<u8>::alloc(width, height, YuvChromaSubsampling::Yuv444);
        rgba_to_yuv444(
            &mut full,
            &rgba,
            width * 4,
            YuvRange::Limited,
            YuvStandardMatrix::Bt709,
        )
        .unwrap();

        for y in 0..height as usize {
            let row = &y_plane[y * y_stride as usize..][..y_stride as usize];
            assert_eq!(&row[..8], &full.y_plane.borrow()[y * 8..][..8]);
            assert!(row[8..].iter().all(|&x| x == SENTINEL));
        }
        for cy in 0..2usize {
            let u_row = &u_plane[cy * u_stride as usize..][..u_stride as usize];
            let v_row = &v_plane[cy * v_stride as usize..][..v_stride as usize];
            for cx in 0..4usize {
                let full_offset = cy * 2 * 8 + cx * 2;
                assert_eq!(u_row[cx], full.u_plane.borrow()[full_offset]);
                assert_eq!(v_row[cx], full.v_plane.borrow()[full_offset]);
            }
            assert!(u_row[4..].iter().all(|&x| x == SENTINEL));
            assert!(v_row[4..].iter().all(|&x| x == SENTINEL));
        }
    }

    #[test]
    fn test_422_odd_width_replicates_last_column() {
        let (width, height) = (5u32, 3u32);
        let bgr = random_rgb((width * height * 3) as usize);
        let mut half = YuvPlanarImageMut::<u8>::alloc(width, height, YuvChromaSubsampling::Yuv422);
        bgr_to_yuv422(
            &mut half,
            &bgr,
            width * 3,
            YuvRange::Full,
            YuvStandardMatrix::Bt601,
        )
        .unwrap();
        let mut full = YuvPlanarImageMut::<u8>::alloc(width, height, YuvChromaSubsampling::Yuv444);
        bgr_to_yuv444(
            &mut full,
            &bgr,
            width * 3,
            YuvRange::Full,
            YuvStandardMatrix::Bt601,
        )
        .unwrap();
        assert_eq!(half.u_stride, 3);
        for y in 0..height as usize {
            assert_eq!(half.u_plane.borrow()[y * 3 + 2], full.u_plane.borrow()[y * 5 + 4]);
            assert_eq!(half.v_plane.borrow()[y * 3 + 2], full.v_plane.borrow()[y * 5 + 4]);
        }
    }

    #[test]
    fn test_410_takes_every_fourth_row() {
        let (width, height) = (4u32, 6u32);
        let mut rgb = random_rgb((width * height * 3) as usize);
        // flat rows 0 and 4, rows in between are noise
        for y in [0usize, 4] {
            let color = [rgb[y * 12], rgb[y * 12 + 1], rgb[y * 12 + 2]];
            for x in 0..4 {
                rgb[y * 12 + x * 3..][..3].copy_from_slice(&color);
            }
        }
        let mut quarter =
            YuvPlanarImageMut::<u8>::alloc(width, height, YuvChromaSubsampling::Yuv410);
        rgb_to_yuv410(
            &mut quarter,
            &rgb,
            width * 3,
            YuvRange::Limited,
            YuvStandardMatrix::Bt601,
        )
        .unwrap();
        let mut full = YuvPlanarImageMut::<u8>::alloc(width, height, YuvChromaSubsampling::Yuv444);
        rgb_to_yuv444(
            &mut full,
            &rgb,
            width * 3,
            YuvRange::Limited,
            YuvStandardMatrix::Bt601,
        )
        .unwrap();
        assert_eq!(quarter.u_plane.borrow().len(), 2);
        assert_eq!(quarter.u_plane.borrow()[0], full.u_plane.borrow()[0]);
        assert_eq!(quarter.u_plane.borrow()[1], full.u_plane.borrow()[16]);
        assert_eq!(quarter.v_plane.borrow()[0], full.v_plane.borrow()[0]);
        assert_eq!(quarter.v_plane.borrow()[1], full.v_plane.borrow()[16]);
    }

    #[test]
    fn test_alpha_is_ignored() {
        let (width, height) = (19u32, 4u32);
        let mut argb = random_rgb((width * height * 4) as usize);
        let mut reference =
            YuvPlanarImageMut::<u8>::alloc(width, height, YuvChromaSubsampling::Yuv420);
        argb_to_yuv420(
            &mut reference,
            &argb,
            width * 4,
            YuvRange::Limited,
            YuvStandardMatrix::Bt2020,
        )
        .unwrap();
        for px in argb.chunks_exact_mut(4) {
            px[0] = !px[0];
        }
        let mut flipped =
            YuvPlanarImageMut::<u8>::alloc(width, height, YuvChromaSubsampling::Yuv420);
        argb_to_yuv420(
            &mut flipped,
            &argb,
            width * 4,
            YuvRange::Limited,
            YuvStandardMatrix::Bt2020,
        )
        .unwrap();
        assert_eq!(reference.y_plane.borrow(), flipped.y_plane.borrow());
        assert_eq!(reference.u_plane.borrow(), flipped.u_plane.borrow());
        assert_eq!(reference.v_plane.borrow(), flipped.v_plane.borrow());
    }

    #[test]
    fn test_failures_leave_destination_untouched() {
        let (width, height) = (6u32, 2u32);
        let rgb = random_rgb((width * height * 3) as usize);
        let mut planar = YuvPlanarImageMut::<u8>::alloc(width, height, YuvChromaSubsampling::Yuv444);
        planar.y_plane.borrow_mut().fill(0x5A);
        planar.u_plane.borrow_mut().fill(0x5A);
        planar.v_plane.borrow_mut().fill(0x5A);

        let result = rgb_to_yuv444(
            &mut planar,
            &rgb,
            width * 3,
            YuvRange::Full,
            YuvStandardMatrix::Custom(0.5, 0.5),
        );
        assert!(matches!(result, Err(YuvError::DegenerateColorMatrix { .. })));

        let result = rgb_to_yuv444(
            &mut planar,
            &rgb[..rgb.len() - 1],
            width * 3,
            YuvRange::Full,
            YuvStandardMatrix::Bt601,
        );
        assert!(matches!(result, Err(YuvError::SourceSizeMismatch(_))));

        let wide = vec![0u16; (width * height * 3) as usize];
        let mut planar16 =
            YuvPlanarImageMut::<u16>::alloc(width, height, YuvChromaSubsampling::Yuv444);
        let result = rgb_to_yuv444_p16(
            &mut planar16,
            &wide,
            width * 3,
            14,
            YuvRange::Full,
            YuvStandardMatrix::Bt601,
        );
        assert!(matches!(result, Err(YuvError::UnsupportedBitDepth(14))));

        assert!(planar.y_plane.borrow().iter().all(|&x| x == 0x5A));
        assert!(planar.u_plane.borrow().iter().all(|&x| x == 0x5A));
        assert!(planar.v_plane.borrow().iter().all(|&x| x == 0x5A));
    }

    #[test]
    fn test_near_degenerate_matrices_fail_without_writing() {
        let (width, height) = (5u32, 3u32);
        let rgb = random_rgb((width * height * 3) as usize);
        let mut planar =
            YuvPlanarImageMut::<u8>::alloc(width, height, YuvChromaSubsampling::Yuv444);
        planar.y_plane.borrow_mut().fill(0x33);
        let result = rgb_to_yuv444(
            &mut planar,
            &rgb,
            width * 3,
            YuvRange::Limited,
            YuvStandardMatrix::Custom(0.058, 0.942),
        );
        assert!(matches!(result, Err(YuvError::DegenerateColorMatrix { .. })));
        assert!(planar.y_plane.borrow().iter().all(|&x| x == 0x33));

        // cr_g and cr_b near 640000 in Q8 fit 8 bit samples but not 16 bit ones
        let skewed = YuvStandardMatrix::Custom(0.9999, -0.5);
        rgb_to_yuv444(&mut planar, &rgb, width * 3, YuvRange::Full, skewed).unwrap();
        let wide = vec![0xFFFFu16; (width * height * 3) as usize];
        let mut planar16 =
            YuvPlanarImageMut::<u16>::alloc(width, height, YuvChromaSubsampling::Yuv444);
        planar16.v_plane.borrow_mut().fill(7);
        let result =
            rgb_to_yuv444_p16(&mut planar16, &wide, width * 3, 16, YuvRange::Full, skewed);
        assert!(matches!(result, Err(YuvError::DegenerateColorMatrix { .. })));
        assert!(planar16.v_plane.borrow().iter().all(|&x| x == 7));
    }
}
