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
use crate::forward::{rgbx_to_nv, RgbEncoder};
use crate::internals::ScalarRows;
use crate::yuv_support::{YuvChromaSubsampling, YuvNVOrder, YuvSourceChannels};
use crate::{YuvBiPlanarImageMut, YuvError, YuvRange, YuvStandardMatrix};

macro_rules! d_cvn {
    ($method: ident, $method_p16: ident,
    $px_fmt: expr, $sampling: expr, $order: expr,
    $yuv_name: expr, $rgb_name: expr) => {
        #[doc = concat!("Convert ", $rgb_name, " image data to ", $yuv_name, " semi-planar format.

Luma goes to the Y plane, chroma samples are interleaved into the UV plane
in ", $yuv_name, " order.

# Arguments

* `bi_planar_image` - Target semi-planar image.
* `rgba` - The input ", $rgb_name, " image data slice.
* `rgba_stride` - The stride (bytes per row) for the ", $rgb_name, " image data.
* `range` - The YUV range (limited or full).
* `matrix` - The YUV standard matrix (BT.601 or BT.709 or BT.2020 or other).

# Errors

Returns an error if the lengths of the planes or the input ", $rgb_name, " data are not valid based
on the specified width, height, and strides, or if the matrix cannot be inverted.
")]
        pub fn $method(
            bi_planar_image: &mut YuvBiPlanarImageMut<u8>,
            rgba: &[u8],
            rgba_stride: u32,
            range: YuvRange,
            matrix: YuvStandardMatrix,
        ) -> Result<(), YuvError> {
            rgbx_to_nv::<u8, { $px_fmt as u8 }, { $sampling as u8 }, { $order as u8 }>(
                bi_planar_image,
                rgba,
                rgba_stride,
                8,
                range,
                matrix,
                &RgbEncoder::new($px_fmt, $sampling),
            )
        }

        #[doc = concat!("Convert ", $rgb_name, " image data with 10, 12 or 16 bit depth to ", $yuv_name, " semi-planar format.

# Arguments

* `bi_planar_image` - Target semi-planar image.
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
            bi_planar_image: &mut YuvBiPlanarImageMut<u16>,
            rgba: &[u16],
            rgba_stride: u32,
            bit_depth: u32,
            range: YuvRange,
            matrix: YuvStandardMatrix,
        ) -> Result<(), YuvError> {
            rgbx_to_nv::<u16, { $px_fmt as u8 }, { $sampling as u8 }, { $order as u8 }>(
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

macro_rules! d_cvn_layouts {
    ($sampling: expr, $order: expr, $yuv_name: expr,
    [$(($method: ident, $method_p16: ident, $px_fmt: expr, $rgb_name: expr)),*]) => {
        $(d_cvn!($method, $method_p16, $px_fmt, $sampling, $order, $yuv_name, $rgb_name);)*
    };
}

d_cvn_layouts!(
    YuvChromaSubsampling::Yuv420,
    YuvNVOrder::UV,
    "NV12",
    [
        (rgb_to_yuv_nv12, rgb_to_yuv_nv12_p16, YuvSourceChannels::Rgb, "RGB"),
        (bgr_to_yuv_nv12, bgr_to_yuv_nv12_p16, YuvSourceChannels::Bgr, "BGR"),
        (rgba_to_yuv_nv12, rgba_to_yuv_nv12_p16, YuvSourceChannels::Rgba, "RGBA"),
        (bgra_to_yuv_nv12, bgra_to_yuv_nv12_p16, YuvSourceChannels::Bgra, "BGRA"),
        (argb_to_yuv_nv12, argb_to_yuv_nv12_p16, YuvSourceChannels::Argb, "ARGB"),
        (abgr_to_yuv_nv12, abgr_to_yuv_nv12_p16, YuvSourceChannels::Abgr, "ABGR")
    ]
);

d_cvn_layouts!(
    YuvChromaSubsampling::Yuv420,
    YuvNVOrder::VU,
    "NV21",
    [
        (rgb_to_yuv_nv21, rgb_to_yuv_nv21_p16, YuvSourceChannels::Rgb, "RGB"),
        (bgr_to_yuv_nv21, bgr_to_yuv_nv21_p16, YuvSourceChannels::Bgr, "BGR"),
        (rgba_to_yuv_nv21, rgba_to_yuv_nv21_p16, YuvSourceChannels::Rgba, "RGBA"),
        (bgra_to_yuv_nv21, bgra_to_yuv_nv21_p16, YuvSourceChannels::Bgra, "BGRA"),
        (argb_to_yuv_nv21, argb_to_yuv_nv21_p16, YuvSourceChannels::Argb, "ARGB"),
        (abgr_to_yuv_nv21, abgr_to_yuv_nv21_p16, YuvSourceChannels::Abgr, "ABGR")
    ]
);

d_cvn_layouts!(
    YuvChromaSubsampling::Yuv422,
    YuvNVOrder::UV,
    "NV16",
    [
        (rgb_to_yuv_nv16, rgb_to_yuv_nv16_p16, YuvSourceChannels::Rgb, "RGB"),
        (bgr_to_yuv_nv16, bgr_to_yuv_nv16_p16, YuvSourceChannels::Bgr, "BGR"),
        (rgba_to_yuv_nv16, rgba_to_yuv_nv16_p16, YuvSourceChannels::Rgba, "RGBA"),
        (bgra_to_yuv_nv16, bgra_to_yuv_nv16_p16, YuvSourceChannels::Bgra, "BGRA"),
        (argb_to_yuv_nv16, argb_to_yuv_nv16_p16, YuvSourceChannels::Argb, "ARGB"),
        (abgr_to_yuv_nv16, abgr_to_yuv_nv16_p16, YuvSourceChannels::Abgr, "ABGR")
    ]
);

d_cvn_layouts!(
    YuvChromaSubsampling::Yuv422,
    YuvNVOrder::VU,
    "NV61",
    [
        (rgb_to_yuv_nv61, rgb_to_yuv_nv61_p16, YuvSourceChannels::Rgb, "RGB"),
        (bgr_to_yuv_nv61, bgr_to_yuv_nv61_p16, YuvSourceChannels::Bgr, "BGR"),
        (rgba_to_yuv_nv61, rgba_to_yuv_nv61_p16, YuvSourceChannels::Rgba, "RGBA"),
        (bgra_to_yuv_nv61, bgra_to_yuv_nv61_p16, YuvSourceChannels::Bgra, "BGRA"),
        (argb_to_yuv_nv61, argb_to_yuv_nv61_p16, YuvSourceChannels::Argb, "ARGB"),
        (abgr_to_yuv_nv61, abgr_to_yuv_nv61_p16, YuvSourceChannels::Abgr, "ABGR")
    ]
);

d_cvn_layouts!(
    YuvChromaSubsampling::Yuv444,
    YuvNVOrder::UV,
    "NV24",
    [
        (rgb_to_yuv_nv24, rgb_to_yuv_nv24_p16, YuvSourceChannels::Rgb, "RGB"),
        (bgr_to_yuv_nv24, bgr_to_yuv_nv24_p16, YuvSourceChannels::Bgr, "BGR"),
        (rgba_to_yuv_nv24, rgba_to_yuv_nv24_p16, YuvSourceChannels::Rgba, "RGBA"),
        (bgra_to_yuv_nv24, bgra_to_yuv_nv24_p16, YuvSourceChannels::Bgra, "BGRA"),
        (argb_to_yuv_nv24, argb_to_yuv_nv24_p16, YuvSourceChannels::Argb, "ARGB"),
        (abgr_to_yuv_nv24, abgr_to_yuv_nv24_p16, YuvSourceChannels::Abgr, "ABGR")
    ]
);

d_cvn_layouts!(
    YuvChromaSubsampling::Yuv444,
    YuvNVOrder::VU,
    "NV42",
    [
        (rgb_to_yuv_nv42, rgb_to_yuv_nv42_p16, YuvSourceChannels::Rgb, "RGB"),
        (bgr_to_yuv_nv42, bgr_to_yuv_nv42_p16, YuvSourceChannels::Bgr, "BGR"),
        (rgba_to_yuv_nv42, rgba_to_yuv_nv42_p16, YuvSourceChannels::Rgba, "RGBA"),
        (bgra_to_yuv_nv42, bgra_to_yuv_nv42_p16, YuvSourceChannels::Bgra, "BGRA"),
        (argb_to_yuv_nv42, argb_to_yuv_nv42_p16, YuvSourceChannels::Argb, "ARGB"),
        (abgr_to_yuv_nv42, abgr_to_yuv_nv42_p16, YuvSourceChannels::Abgr, "ABGR")
    ]
);
