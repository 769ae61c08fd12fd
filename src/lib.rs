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
#![deny(deprecated)]
#![allow(clippy::too_many_arguments)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "avx"))]
mod avx2;
mod dispatch;
mod forward;
mod images;
mod internals;
mod inverse;
#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
mod neon;
mod numerics;
mod rgb_to_y;
mod rgba_to_nv;
mod rgba_to_yuv;
#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
mod sse;
mod y_to_rgb;
mod yuv_error;
mod yuv_nv_to_rgba;
mod yuv_support;
mod yuv_to_rgba;

pub use dispatch::{describe_acceleration, try_pin_acceleration, CpuTarget};
pub use images::{
    BufferStoreMut, YuvBiPlanarImage, YuvBiPlanarImageMut, YuvGrayImage, YuvGrayImageMut,
    YuvPlanarImage, YuvPlanarImageMut,
};
pub use yuv_error::{MismatchedSize, YuvError};
pub use yuv_support::{
    get_forward_transform, get_inverse_transform, get_kr_kb, get_yuv_range, CbCrForwardTransform,
    CbCrInverseTransform, ToIntegerTransform, YuvBias, YuvChromaRange, YuvChromaSubsampling,
    YuvNVOrder, YuvRange, YuvSourceChannels, YuvStandardMatrix,
};

pub use rgba_to_yuv::rgb_to_yuv444;
pub use rgba_to_yuv::rgb_to_yuv444_p16;
pub use rgba_to_yuv::bgr_to_yuv444;
pub use rgba_to_yuv::bgr_to_yuv444_p16;
pub use rgba_to_yuv::rgba_to_yuv444;
pub use rgba_to_yuv::rgba_to_yuv444_p16;
pub use rgba_to_yuv::bgra_to_yuv444;
pub use rgba_to_yuv::bgra_to_yuv444_p16;
pub use rgba_to_yuv::argb_to_yuv444;
pub use rgba_to_yuv::argb_to_yuv444_p16;
pub use rgba_to_yuv::abgr_to_yuv444;
pub use rgba_to_yuv::abgr_to_yuv444_p16;
pub use rgba_to_yuv::rgb_to_yuv422;
pub use rgba_to_yuv::rgb_to_yuv422_p16;
pub use rgba_to_yuv::bgr_to_yuv422;
pub use rgba_to_yuv::bgr_to_yuv422_p16;
pub use rgba_to_yuv::rgba_to_yuv422;
pub use rgba_to_yuv::rgba_to_yuv422_p16;
pub use rgba_to_yuv::bgra_to_yuv422;
pub use rgba_to_yuv::bgra_to_yuv422_p16;
pub use rgba_to_yuv::argb_to_yuv422;
pub use rgba_to_yuv::argb_to_yuv422_p16;
pub use rgba_to_yuv::abgr_to_yuv422;
pub use rgba_to_yuv::abgr_to_yuv422_p16;
pub use rgba_to_yuv::rgb_to_yuv420;
pub use rgba_to_yuv::rgb_to_yuv420_p16;
pub use rgba_to_yuv::bgr_to_yuv420;
pub use rgba_to_yuv::bgr_to_yuv420_p16;
pub use rgba_to_yuv::rgba_to_yuv420;
pub use rgba_to_yuv::rgba_to_yuv420_p16;
pub use rgba_to_yuv::bgra_to_yuv420;
pub use rgba_to_yuv::bgra_to_yuv420_p16;
pub use rgba_to_yuv::argb_to_yuv420;
pub use rgba_to_yuv::argb_to_yuv420_p16;
pub use rgba_to_yuv::abgr_to_yuv420;
pub use rgba_to_yuv::abgr_to_yuv420_p16;
pub use rgba_to_yuv::rgb_to_yuv411;
pub use rgba_to_yuv::rgb_to_yuv411_p16;
pub use rgba_to_yuv::bgr_to_yuv411;
pub use rgba_to_yuv::bgr_to_yuv411_p16;
pub use rgba_to_yuv::rgba_to_yuv411;
pub use rgba_to_yuv::rgba_to_yuv411_p16;
pub use rgba_to_yuv::bgra_to_yuv411;
pub use rgba_to_yuv::bgra_to_yuv411_p16;
pub use rgba_to_yuv::argb_to_yuv411;
pub use rgba_to_yuv::argb_to_yuv411_p16;
pub use rgba_to_yuv::abgr_to_yuv411;
pub use rgba_to_yuv::abgr_to_yuv411_p16;
pub use rgba_to_yuv::rgb_to_yuv410;
pub use rgba_to_yuv::rgb_to_yuv410_p16;
pub use rgba_to_yuv::bgr_to_yuv410;
pub use rgba_to_yuv::bgr_to_yuv410_p16;
pub use rgba_to_yuv::rgba_to_yuv410;
pub use rgba_to_yuv::rgba_to_yuv410_p16;
pub use rgba_to_yuv::bgra_to_yuv410;
pub use rgba_to_yuv::bgra_to_yuv410_p16;
pub use rgba_to_yuv::argb_to_yuv410;
pub use rgba_to_yuv::argb_to_yuv410_p16;
pub use rgba_to_yuv::abgr_to_yuv410;
pub use rgba_to_yuv::abgr_to_yuv410_p16;

pub use rgba_to_nv::rgb_to_yuv_nv12;
pub use rgba_to_nv::rgb_to_yuv_nv12_p16;
pub use rgba_to_nv::bgr_to_yuv_nv12;
pub use rgba_to_nv::bgr_to_yuv_nv12_p16;
pub use rgba_to_nv::rgba_to_yuv_nv12;
pub use rgba_to_nv::rgba_to_yuv_nv12_p16;
pub use rgba_to_nv::bgra_to_yuv_nv12;
pub use rgba_to_nv::bgra_to_yuv_nv12_p16;
pub use rgba_to_nv::argb_to_yuv_nv12;
pub use rgba_to_nv::argb_to_yuv_nv12_p16;
pub use rgba_to_nv::abgr_to_yuv_nv12;
pub use rgba_to_nv::abgr_to_yuv_nv12_p16;
pub use rgba_to_nv::rgb_to_yuv_nv21;
pub use rgba_to_nv::rgb_to_yuv_nv21_p16;
pub use rgba_to_nv::bgr_to_yuv_nv21;
pub use rgba_to_nv::bgr_to_yuv_nv21_p16;
pub use rgba_to_nv::rgba_to_yuv_nv21;
pub use rgba_to_nv::rgba_to_yuv_nv21_p16;
pub use rgba_to_nv::bgra_to_yuv_nv21;
pub use rgba_to_nv::bgra_to_yuv_nv21_p16;
pub use rgba_to_nv::argb_to_yuv_nv21;
pub use rgba_to_nv::argb_to_yuv_nv21_p16;
pub use rgba_to_nv::abgr_to_yuv_nv21;
pub use rgba_to_nv::abgr_to_yuv_nv21_p16;
pub use rgba_to_nv::rgb_to_yuv_nv16;
pub use rgba_to_nv::rgb_to_yuv_nv16_p16;
pub use rgba_to_nv::bgr_to_yuv_nv16;
pub use rgba_to_nv::bgr_to_yuv_nv16_p16;
pub use rgba_to_nv::rgba_to_yuv_nv16;
pub use rgba_to_nv::rgba_to_yuv_nv16_p16;
pub use rgba_to_nv::bgra_to_yuv_nv16;
pub use rgba_to_nv::bgra_to_yuv_nv16_p16;
pub use rgba_to_nv::argb_to_yuv_nv16;
pub use rgba_to_nv::argb_to_yuv_nv16_p16;
pub use rgba_to_nv::abgr_to_yuv_nv16;
pub use rgba_to_nv::abgr_to_yuv_nv16_p16;
pub use rgba_to_nv::rgb_to_yuv_nv61;
pub use rgba_to_nv::rgb_to_yuv_nv61_p16;
pub use rgba_to_nv::bgr_to_yuv_nv61;
pub use rgba_to_nv::bgr_to_yuv_nv61_p16;
pub use rgba_to_nv::rgba_to_yuv_nv61;
pub use rgba_to_nv::rgba_to_yuv_nv61_p16;
pub use rgba_to_nv::bgra_to_yuv_nv61;
pub use rgba_to_nv::bgra_to_yuv_nv61_p16;
pub use rgba_to_nv::argb_to_yuv_nv61;
pub use rgba_to_nv::argb_to_yuv_nv61_p16;
pub use rgba_to_nv::abgr_to_yuv_nv61;
pub use rgba_to_nv::abgr_to_yuv_nv61_p16;
pub use rgba_to_nv::rgb_to_yuv_nv24;
pub use rgba_to_nv::rgb_to_yuv_nv24_p16;
pub use rgba_to_nv::bgr_to_yuv_nv24;
pub use rgba_to_nv::bgr_to_yuv_nv24_p16;
pub use rgba_to_nv::rgba_to_yuv_nv24;
pub use rgba_to_nv::rgba_to_yuv_nv24_p16;
pub use rgba_to_nv::bgra_to_yuv_nv24;
pub use rgba_to_nv::bgra_to_yuv_nv24_p16;
pub use rgba_to_nv::argb_to_yuv_nv24;
pub use rgba_to_nv::argb_to_yuv_nv24_p16;
pub use rgba_to_nv::abgr_to_yuv_nv24;
pub use rgba_to_nv::abgr_to_yuv_nv24_p16;
pub use rgba_to_nv::rgb_to_yuv_nv42;
pub use rgba_to_nv::rgb_to_yuv_nv42_p16;
pub use rgba_to_nv::bgr_to_yuv_nv42;
pub use rgba_to_nv::bgr_to_yuv_nv42_p16;
pub use rgba_to_nv::rgba_to_yuv_nv42;
pub use rgba_to_nv::rgba_to_yuv_nv42_p16;
pub use rgba_to_nv::bgra_to_yuv_nv42;
pub use rgba_to_nv::bgra_to_yuv_nv42_p16;
pub use rgba_to_nv::argb_to_yuv_nv42;
pub use rgba_to_nv::argb_to_yuv_nv42_p16;
pub use rgba_to_nv::abgr_to_yuv_nv42;
pub use rgba_to_nv::abgr_to_yuv_nv42_p16;

pub use rgb_to_y::rgb_to_yuv400;
pub use rgb_to_y::rgb_to_yuv400_p16;
pub use rgb_to_y::bgr_to_yuv400;
pub use rgb_to_y::bgr_to_yuv400_p16;
pub use rgb_to_y::rgba_to_yuv400;
pub use rgb_to_y::rgba_to_yuv400_p16;
pub use rgb_to_y::bgra_to_yuv400;
pub use rgb_to_y::bgra_to_yuv400_p16;
pub use rgb_to_y::argb_to_yuv400;
pub use rgb_to_y::argb_to_yuv400_p16;
pub use rgb_to_y::abgr_to_yuv400;
pub use rgb_to_y::abgr_to_yuv400_p16;

pub use yuv_to_rgba::yuv444_to_rgb;
pub use yuv_to_rgba::yuv444_to_rgb_p16;
pub use yuv_to_rgba::yuv444_to_bgr;
pub use yuv_to_rgba::yuv444_to_bgr_p16;
pub use yuv_to_rgba::yuv444_to_rgba;
pub use yuv_to_rgba::yuv444_to_rgba_p16;
pub use yuv_to_rgba::yuv444_to_bgra;
pub use yuv_to_rgba::yuv444_to_bgra_p16;
pub use yuv_to_rgba::yuv444_to_argb;
pub use yuv_to_rgba::yuv444_to_argb_p16;
pub use yuv_to_rgba::yuv444_to_abgr;
pub use yuv_to_rgba::yuv444_to_abgr_p16;
pub use yuv_to_rgba::yuv422_to_rgb;
pub use yuv_to_rgba::yuv422_to_rgb_p16;
pub use yuv_to_rgba::yuv422_to_bgr;
pub use yuv_to_rgba::yuv422_to_bgr_p16;
pub use yuv_to_rgba::yuv422_to_rgba;
pub use yuv_to_rgba::yuv422_to_rgba_p16;
pub use yuv_to_rgba::yuv422_to_bgra;
pub use yuv_to_rgba::yuv422_to_bgra_p16;
pub use yuv_to_rgba::yuv422_to_argb;
pub use yuv_to_rgba::yuv422_to_argb_p16;
pub use yuv_to_rgba::yuv422_to_abgr;
pub use yuv_to_rgba::yuv422_to_abgr_p16;
pub use yuv_to_rgba::yuv420_to_rgb;
pub use yuv_to_rgba::yuv420_to_rgb_p16;
pub use yuv_to_rgba::yuv420_to_bgr;
pub use yuv_to_rgba::yuv420_to_bgr_p16;
pub use yuv_to_rgba::yuv420_to_rgba;
pub use yuv_to_rgba::yuv420_to_rgba_p16;
pub use yuv_to_rgba::yuv420_to_bgra;
pub use yuv_to_rgba::yuv420_to_bgra_p16;
pub use yuv_to_rgba::yuv420_to_argb;
pub use yuv_to_rgba::yuv420_to_argb_p16;
pub use yuv_to_rgba::yuv420_to_abgr;
pub use yuv_to_rgba::yuv420_to_abgr_p16;
pub use yuv_to_rgba::yuv411_to_rgb;
pub use yuv_to_rgba::yuv411_to_rgb_p16;
pub use yuv_to_rgba::yuv411_to_bgr;
pub use yuv_to_rgba::yuv411_to_bgr_p16;
pub use yuv_to_rgba::yuv411_to_rgba;
pub use yuv_to_rgba::yuv411_to_rgba_p16;
pub use yuv_to_rgba::yuv411_to_bgra;
pub use yuv_to_rgba::yuv411_to_bgra_p16;
pub use yuv_to_rgba::yuv411_to_argb;
pub use yuv_to_rgba::yuv411_to_argb_p16;
pub use yuv_to_rgba::yuv411_to_abgr;
pub use yuv_to_rgba::yuv411_to_abgr_p16;
pub use yuv_to_rgba::yuv410_to_rgb;
pub use yuv_to_rgba::yuv410_to_rgb_p16;
pub use yuv_to_rgba::yuv410_to_bgr;
pub use yuv_to_rgba::yuv410_to_bgr_p16;
pub use yuv_to_rgba::yuv410_to_rgba;
pub use yuv_to_rgba::yuv410_to_rgba_p16;
pub use yuv_to_rgba::yuv410_to_bgra;
pub use yuv_to_rgba::yuv410_to_bgra_p16;
pub use yuv_to_rgba::yuv410_to_argb;
pub use yuv_to_rgba::yuv410_to_argb_p16;
pub use yuv_to_rgba::yuv410_to_abgr;
pub use yuv_to_rgba::yuv410_to_abgr_p16;

pub use yuv_nv_to_rgba::yuv_nv12_to_rgb;
pub use yuv_nv_to_rgba::yuv_nv12_to_rgb_p16;
pub use yuv_nv_to_rgba::yuv_nv12_to_bgr;
pub use yuv_nv_to_rgba::yuv_nv12_to_bgr_p16;
pub use yuv_nv_to_rgba::yuv_nv12_to_rgba;
pub use yuv_nv_to_rgba::yuv_nv12_to_rgba_p16;
pub use yuv_nv_to_rgba::yuv_nv12_to_bgra;
pub use yuv_nv_to_rgba::yuv_nv12_to_bgra_p16;
pub use yuv_nv_to_rgba::yuv_nv12_to_argb;
pub use yuv_nv_to_rgba::yuv_nv12_to_argb_p16;
pub use yuv_nv_to_rgba::yuv_nv12_to_abgr;
pub use yuv_nv_to_rgba::yuv_nv12_to_abgr_p16;
pub use yuv_nv_to_rgba::yuv_nv21_to_rgb;
pub use yuv_nv_to_rgba::yuv_nv21_to_rgb_p16;
pub use yuv_nv_to_rgba::yuv_nv21_to_bgr;
pub use yuv_nv_to_rgba::yuv_nv21_to_bgr_p16;
pub use yuv_nv_to_rgba::yuv_nv21_to_rgba;
pub use yuv_nv_to_rgba::yuv_nv21_to_rgba_p16;
pub use yuv_nv_to_rgba::yuv_nv21_to_bgra;
pub use yuv_nv_to_rgba::yuv_nv21_to_bgra_p16;
pub use yuv_nv_to_rgba::yuv_nv21_to_argb;
pub use yuv_nv_to_rgba::yuv_nv21_to_argb_p16;
pub use yuv_nv_to_rgba::yuv_nv21_to_abgr;
pub use yuv_nv_to_rgba::yuv_nv21_to_abgr_p16;
pub use yuv_nv_to_rgba::yuv_nv16_to_rgb;
pub use yuv_nv_to_rgba::yuv_nv16_to_rgb_p16;
pub use yuv_nv_to_rgba::yuv_nv16_to_bgr;
pub use yuv_nv_to_rgba::yuv_nv16_to_bgr_p16;
pub use yuv_nv_to_rgba::yuv_nv16_to_rgba;
pub use yuv_nv_to_rgba::yuv_nv16_to_rgba_p16;
pub use yuv_nv_to_rgba::yuv_nv16_to_bgra;
pub use yuv_nv_to_rgba::yuv_nv16_to_bgra_p16;
pub use yuv_nv_to_rgba::yuv_nv16_to_argb;
pub use yuv_nv_to_rgba::yuv_nv16_to_argb_p16;
pub use yuv_nv_to_rgba::yuv_nv16_to_abgr;
pub use yuv_nv_to_rgba::yuv_nv16_to_abgr_p16;
pub use yuv_nv_to_rgba::yuv_nv61_to_rgb;
pub use yuv_nv_to_rgba::yuv_nv61_to_rgb_p16;
pub use yuv_nv_to_rgba::yuv_nv61_to_bgr;
pub use yuv_nv_to_rgba::yuv_nv61_to_bgr_p16;
pub use yuv_nv_to_rgba::yuv_nv61_to_rgba;
pub use yuv_nv_to_rgba::yuv_nv61_to_rgba_p16;
pub use yuv_nv_to_rgba::yuv_nv61_to_bgra;
pub use yuv_nv_to_rgba::yuv_nv61_to_bgra_p16;
pub use yuv_nv_to_rgba::yuv_nv61_to_argb;
pub use yuv_nv_to_rgba::yuv_nv61_to_argb_p16;
pub use yuv_nv_to_rgba::yuv_nv61_to_abgr;
pub use yuv_nv_to_rgba::yuv_nv61_to_abgr_p16;
pub use yuv_nv_to_rgba::yuv_nv24_to_rgb;
pub use yuv_nv_to_rgba::yuv_nv24_to_rgb_p16;
pub use yuv_nv_to_rgba::yuv_nv24_to_bgr;
pub use yuv_nv_to_rgba::yuv_nv24_to_bgr_p16;
pub use yuv_nv_to_rgba::yuv_nv24_to_rgba;
pub use yuv_nv_to_rgba::yuv_nv24_to_rgba_p16;
pub use yuv_nv_to_rgba::yuv_nv24_to_bgra;
pub use yuv_nv_to_rgba::yuv_nv24_to_bgra_p16;
pub use yuv_nv_to_rgba::yuv_nv24_to_argb;
pub use yuv_nv_to_rgba::yuv_nv24_to_argb_p16;
pub use yuv_nv_to_rgba::yuv_nv24_to_abgr;
pub use yuv_nv_to_rgba::yuv_nv24_to_abgr_p16;
pub use yuv_nv_to_rgba::yuv_nv42_to_rgb;
pub use yuv_nv_to_rgba::yuv_nv42_to_rgb_p16;
pub use yuv_nv_to_rgba::yuv_nv42_to_bgr;
pub use yuv_nv_to_rgba::yuv_nv42_to_bgr_p16;
pub use yuv_nv_to_rgba::yuv_nv42_to_rgba;
pub use yuv_nv_to_rgba::yuv_nv42_to_rgba_p16;
pub use yuv_nv_to_rgba::yuv_nv42_to_bgra;
pub use yuv_nv_to_rgba::yuv_nv42_to_bgra_p16;
pub use yuv_nv_to_rgba::yuv_nv42_to_argb;
pub use yuv_nv_to_rgba::yuv_nv42_to_argb_p16;
pub use yuv_nv_to_rgba::yuv_nv42_to_abgr;
pub use yuv_nv_to_rgba::yuv_nv42_to_abgr_p16;

pub use y_to_rgb::yuv400_to_rgb;
pub use y_to_rgb::yuv400_to_rgb_p16;
pub use y_to_rgb::yuv400_to_bgr;
pub use y_to_rgb::yuv400_to_bgr_p16;
pub use y_to_rgb::yuv400_to_rgba;
pub use y_to_rgb::yuv400_to_rgba_p16;
pub use y_to_rgb::yuv400_to_bgra;
pub use y_to_rgb::yuv400_to_bgra_p16;
pub use y_to_rgb::yuv400_to_argb;
pub use y_to_rgb::yuv400_to_argb_p16;
pub use y_to_rgb::yuv400_to_abgr;
pub use y_to_rgb::yuv400_to_abgr_p16;
