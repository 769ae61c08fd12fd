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
use crate::yuv_error::YuvError;

/// Fractional bits of the forward (RGB to YUV) fixed point coefficients
pub(crate) const FORWARD_PRECISION: u32 = 8;
/// Fractional bits of the inverse (YUV to RGB) fixed point coefficients
pub(crate) const INVERSE_PRECISION: u32 = 6;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CbCrInverseTransform<T> {
    pub y_coef: T,
    pub cr_coef: T,
    pub cb_coef: T,
    pub g_coeff_1: T,
    pub g_coeff_2: T,
}

impl<T> CbCrInverseTransform<T> {
    pub fn new(
        y_coef: T,
        cr_coef: T,
        cb_coef: T,
        g_coeff_1: T,
        g_coeff_2: T,
    ) -> CbCrInverseTransform<T> {
        CbCrInverseTransform {
            y_coef,
            cr_coef,
            cb_coef,
            g_coeff_1,
            g_coeff_2,
        }
    }
}

impl CbCrInverseTransform<f32> {
    /// Integral transformation adds an error not less than 1%
    pub fn to_integers(&self, precision: u32) -> CbCrInverseTransform<i32> {
        let precision_scale: i32 = 1i32 << (precision as i32);
        let cr_coef = (self.cr_coef * precision_scale as f32).round() as i32;
        let cb_coef = (self.cb_coef * precision_scale as f32).round() as i32;
        let y_coef = (self.y_coef * precision_scale as f32).round() as i32;
        let g_coef_1 = (self.g_coeff_1 * precision_scale as f32).round() as i32;
        let g_coef_2 = (self.g_coeff_2 * precision_scale as f32).round() as i32;
        CbCrInverseTransform::<i32> {
            y_coef,
            cr_coef,
            cb_coef,
            g_coeff_1: g_coef_1,
            g_coeff_2: g_coef_2,
        }
    }
}

impl CbCrInverseTransform<i32> {
    /// Whether 8-bit reconstruction can run in signed 16-bit SIMD lanes without a lossy overflow.
    ///
    /// Saturating adds are allowed to clip only when the exact result would be
    /// clamped anyway, which holds while the green accumulation stays in range.
    pub(crate) fn fits_8bit_lanes(&self) -> bool {
        let coefficients_fit = self.y_coef >= 0
            && self.y_coef <= 128
            && self.cr_coef.abs() <= 255
            && self.cb_coef.abs() <= 255
            && self.g_coeff_1.abs() <= 255
            && self.g_coeff_2.abs() <= 255;
        coefficients_fit
            && self.y_coef * 255 + (self.g_coeff_1.abs() + self.g_coeff_2.abs()) * 128
                <= i16::MAX as i32
    }

    /// Whether reconstructing samples up to `max_colors` keeps every i32 accumulation exact.
    ///
    /// Centred luma and chroma both stay within `max_colors` in magnitude.
    pub(crate) fn fits_accumulator(&self, max_colors: u32) -> bool {
        let max = max_colors as i64;
        let chroma = (self.cr_coef.abs() as i64)
            .max(self.cb_coef.abs() as i64)
            .max(self.g_coeff_1.abs() as i64 + self.g_coeff_2.abs() as i64);
        max * (self.y_coef.abs() as i64 + chroma) <= i32::MAX as i64
    }
}

/// Smallest `|1 - kr - kb|` accepted by the coefficient derivation.
///
/// Decimal pairs summing to one rarely give exact zero in f32, they leave a residue near `1e-7`.
pub(crate) const MIN_GREEN_WEIGHT: f32 = 1e-4;

/// `kg = 1 - kr - kb`, rejecting matrices green cannot be reconstructed from.
fn green_weight(kr: f32, kb: f32) -> Result<f32, YuvError> {
    let degenerate = Err(YuvError::DegenerateColorMatrix { kr, kb });
    if !kr.is_finite() || !kb.is_finite() {
        return degenerate;
    }
    let kg = 1.0f32 - kr - kb;
    if kg.abs() < MIN_GREEN_WEIGHT || 1f32 - kr == 0f32 || 1f32 - kb == 0f32 {
        return degenerate;
    }
    Ok(kg)
}

/// Transformation YUV to RGB with coefficients as specified in [ITU-R](https://www.itu.int/rec/T-REC-H.273/en)
///
/// Fails with [YuvError::DegenerateColorMatrix] when `|1 - kr - kb|` is below `1e-4`.
pub fn get_inverse_transform(
    range_bgra: u32,
    range_y: u32,
    range_uv: u32,
    kr: f32,
    kb: f32,
) -> Result<CbCrInverseTransform<f32>, YuvError> {
    let kg = green_weight(kr, kb)?;
    let range_uv = range_bgra as f32 / range_uv as f32;
    let y_coef = range_bgra as f32 / range_y as f32;
    let cr_coeff = (2f32 * (1f32 - kr)) * range_uv;
    let cb_coeff = (2f32 * (1f32 - kb)) * range_uv;
    let g_coeff_1 = (2f32 * ((1f32 - kr) * kr / kg)) * range_uv;
    let g_coeff_2 = (2f32 * ((1f32 - kb) * kb / kg)) * range_uv;
    Ok(CbCrInverseTransform::new(
        y_coef, cr_coeff, cb_coeff, g_coeff_1, g_coeff_2,
    ))
}

/// Forward coefficients, stored signed so every kernel runs the same multiply-add:
/// `cb = r * cb_r + g * cb_g + b * cb_b` with `cb_r`, `cb_g`, `cr_g`, `cr_b` negative.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialOrd, PartialEq)]
pub struct CbCrForwardTransform<T> {
    pub yr: T,
    pub yg: T,
    pub yb: T,
    pub cb_r: T,
    pub cb_g: T,
    pub cb_b: T,
    pub cr_r: T,
    pub cr_g: T,
    pub cr_b: T,
}

pub trait ToIntegerTransform {
    fn to_integers(&self, precision: u32) -> CbCrForwardTransform<i32>;
}

impl ToIntegerTransform for CbCrForwardTransform<f32> {
    fn to_integers(&self, precision: u32) -> CbCrForwardTransform<i32> {
        let scale = (1 << precision) as f32;
        CbCrForwardTransform::<i32> {
            yr: (self.yr * scale).round() as i32,
            yg: (self.yg * scale).round() as i32,
            yb: (self.yb * scale).round() as i32,
            cb_r: (self.cb_r * scale).round() as i32,
            cb_g: (self.cb_g * scale).round() as i32,
            cb_b: (self.cb_b * scale).round() as i32,
            cr_r: (self.cr_r * scale).round() as i32,
            cr_g: (self.cr_g * scale).round() as i32,
            cr_b: (self.cr_b * scale).round() as i32,
        }
    }
}

impl CbCrForwardTransform<i32> {
    /// Whether a row of samples up to `max_colors` plus the rounding bias stays within i32.
    pub(crate) fn fits_accumulator(&self, max_colors: u32) -> bool {
        let max = max_colors as i64;
        let bias = (max << FORWARD_PRECISION) + (1 << (FORWARD_PRECISION - 1));
        [
            [self.yr, self.yg, self.yb],
            [self.cb_r, self.cb_g, self.cb_b],
            [self.cr_r, self.cr_g, self.cr_b],
        ]
        .iter()
        .all(|row| {
            let weight: i64 = row.iter().map(|&c| (c as i64).abs()).sum();
            max * weight + bias <= i32::MAX as i64
        })
    }

    /// Every coefficient is representable in a signed 16-bit lane.
    pub(crate) fn fits_i16_lanes(&self) -> bool {
        [
            self.yr, self.yg, self.yb, self.cb_r, self.cb_g, self.cb_b, self.cr_r, self.cr_g,
            self.cr_b,
        ]
        .iter()
        .all(|&c| c >= i16::MIN as i32 && c <= i16::MAX as i32)
    }
}

/// Transformation RGB to YUV with coefficients as specified in [ITU-R](https://www.itu.int/rec/T-REC-H.273/en)
///
/// Fails with [YuvError::DegenerateColorMatrix] when `|1 - kr - kb|` is below `1e-4`.
pub fn get_forward_transform(
    range_rgba: u32,
    range_y: u32,
    range_uv: u32,
    kr: f32,
    kb: f32,
) -> Result<CbCrForwardTransform<f32>, YuvError> {
    let kg = green_weight(kr, kb)?;

    let yr = kr * range_y as f32 / range_rgba as f32;
    let yg = kg * range_y as f32 / range_rgba as f32;
    let yb = kb * range_y as f32 / range_rgba as f32;

    let cb_r = -0.5f32 * kr / (1f32 - kb) * range_uv as f32 / range_rgba as f32;
    let cb_g = -0.5f32 * kg / (1f32 - kb) * range_uv as f32 / range_rgba as f32;
    let cb_b = 0.5f32 * range_uv as f32 / range_rgba as f32;

    let cr_r = 0.5f32 * range_uv as f32 / range_rgba as f32;
    let cr_g = -0.5f32 * kg / (1f32 - kr) * range_uv as f32 / range_rgba as f32;
    let cr_b = -0.5f32 * kb / (1f32 - kr) * range_uv as f32 / range_rgba as f32;
    Ok(CbCrForwardTransform {
        yr,
        yg,
        yb,
        cb_r,
        cb_g,
        cb_b,
        cr_r,
        cr_g,
        cr_b,
    })
}

/// Additive forward bias with the rounding half step folded in, `round((bias + 0.5) * 2^8)`
#[inline(always)]
pub(crate) const fn forward_bias(bias: u32) -> i32 {
    ((bias as i32) << FORWARD_PRECISION) + (1 << (FORWARD_PRECISION - 1))
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Eq)]
/// Declares YUV range Limited (studio swing) or Full
pub enum YuvRange {
    /// Limited range Y ∈ [16 << (depth - 8), 235 << (depth - 8)], UV ∈ [16 << (depth - 8), 240 << (depth - 8)]
    Limited,
    /// Full range Y ∈ [0, 2^bit_depth - 1], UV ∈ [0, 2^bit_depth - 1]
    Full,
}

#[derive(Debug, Copy, Clone, PartialOrd, PartialEq)]
pub struct YuvChromaRange {
    pub bias_y: u32,
    pub bias_uv: u32,
    pub range_y: u32,
    pub range_uv: u32,
    pub range: YuvRange,
}

/// Resolves black level, chroma neutral level and excursions for `depth` bits
pub const fn get_yuv_range(depth: u32, range: YuvRange) -> YuvChromaRange {
    match range {
        YuvRange::Limited => YuvChromaRange {
            bias_y: 16 << (depth - 8),
            bias_uv: 1 << (depth - 1),
            range_y: 219 << (depth - 8),
            range_uv: 224 << (depth - 8),
            range,
        },
        YuvRange::Full => YuvChromaRange {
            bias_y: 0,
            bias_uv: 1 << (depth - 1),
            range_uv: (1 << depth) - 1,
            range_y: (1 << depth) - 1,
            range,
        },
    }
}

#[derive(Debug, Copy, Clone, PartialOrd, PartialEq)]
/// Declares standard prebuilt YUV conversion matrices, check [ITU-R](https://www.itu.int/rec/T-REC-H.273/en) information for more info
pub enum YuvStandardMatrix {
    Bt601,
    Bt709,
    Bt2020,
    Smpte240,
    Bt470_6,
    /// Custom parameters first goes for kr, second for kb.
    /// Conversions fail with [YuvError::DegenerateColorMatrix] if `|1 - kr - kb| < 1e-4`
    /// or if the fixed point coefficients would overflow at the requested bit depth
    Custom(f32, f32),
}

#[derive(Debug, Copy, Clone, PartialOrd, PartialEq)]
pub struct YuvBias {
    pub kr: f32,
    pub kb: f32,
}

pub const fn get_kr_kb(matrix: YuvStandardMatrix) -> YuvBias {
    match matrix {
        YuvStandardMatrix::Bt601 => YuvBias {
            kr: 0.299f32,
            kb: 0.114f32,
        },
        YuvStandardMatrix::Bt709 => YuvBias {
            kr: 0.2126f32,
            kb: 0.0722f32,
        },
        YuvStandardMatrix::Bt2020 => YuvBias {
            kr: 0.2627f32,
            kb: 0.0593f32,
        },
        YuvStandardMatrix::Smpte240 => YuvBias {
            kr: 0.087f32,
            kb: 0.212f32,
        },
        YuvStandardMatrix::Bt470_6 => YuvBias {
            kr: 0.2220f32,
            kb: 0.0713f32,
        },
        YuvStandardMatrix::Custom(kr, kb) => YuvBias { kr, kb },
    }
}

/// Order of the interleaved chroma pair in a semi-planar (NV) plane
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum YuvNVOrder {
    UV = 0,
    VU = 1,
}

impl YuvNVOrder {
    #[inline(always)]
    pub const fn get_u_position(&self) -> usize {
        match self {
            YuvNVOrder::UV => 0,
            YuvNVOrder::VU => 1,
        }
    }

    #[inline(always)]
    pub const fn get_v_position(&self) -> usize {
        match self {
            YuvNVOrder::UV => 1,
            YuvNVOrder::VU => 0,
        }
    }
}

impl From<u8> for YuvNVOrder {
    #[inline(always)]
    fn from(value: u8) -> Self {
        match value {
            0 => YuvNVOrder::UV,
            1 => YuvNVOrder::VU,
            _ => {
                unimplemented!("Unknown value")
            }
        }
    }
}

/// Chroma subsampling scheme of a planar or semi-planar image
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum YuvChromaSubsampling {
    /// Luma only
    Yuv400 = 0,
    Yuv444 = 1,
    Yuv422 = 2,
    Yuv420 = 3,
    Yuv411 = 4,
    /// Chroma once per 4×4 block, averaged horizontally on every fourth row
    Yuv410 = 5,
}

impl From<u8> for YuvChromaSubsampling {
    #[inline(always)]
    fn from(value: u8) -> Self {
        match value {
            0 => YuvChromaSubsampling::Yuv400,
            1 => YuvChromaSubsampling::Yuv444,
            2 => YuvChromaSubsampling::Yuv422,
            3 => YuvChromaSubsampling::Yuv420,
            4 => YuvChromaSubsampling::Yuv411,
            5 => YuvChromaSubsampling::Yuv410,
            _ => {
                unimplemented!("Unknown value")
            }
        }
    }
}

impl YuvChromaSubsampling {
    /// Horizontal and vertical count of luma samples sharing one chroma sample
    #[inline(always)]
    pub const fn factors(&self) -> (usize, usize) {
        match self {
            YuvChromaSubsampling::Yuv400 | YuvChromaSubsampling::Yuv444 => (1, 1),
            YuvChromaSubsampling::Yuv422 => (2, 1),
            YuvChromaSubsampling::Yuv420 => (2, 2),
            YuvChromaSubsampling::Yuv411 => (4, 1),
            YuvChromaSubsampling::Yuv410 => (4, 4),
        }
    }

    #[inline(always)]
    pub const fn has_chroma(&self) -> bool {
        !matches!(self, YuvChromaSubsampling::Yuv400)
    }

    /// Chroma samples per row, zero for gray images
    #[inline]
    pub const fn chroma_width(&self, width: usize) -> usize {
        if !self.has_chroma() {
            return 0;
        }
        width.div_ceil(self.factors().0)
    }

    /// Chroma rows, zero for gray images
    #[inline]
    pub const fn chroma_height(&self, height: usize) -> usize {
        if !self.has_chroma() {
            return 0;
        }
        height.div_ceil(self.factors().1)
    }
}

/// Packed RGB family pixel layout
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum YuvSourceChannels {
    Rgb = 0,
    Bgr = 1,
    Rgba = 2,
    Bgra = 3,
    Argb = 4,
    Abgr = 5,
}

impl From<u8> for YuvSourceChannels {
    #[inline(always)]
    fn from(value: u8) -> Self {
        match value {
            0 => YuvSourceChannels::Rgb,
            1 => YuvSourceChannels::Bgr,
            2 => YuvSourceChannels::Rgba,
            3 => YuvSourceChannels::Bgra,
            4 => YuvSourceChannels::Argb,
            5 => YuvSourceChannels::Abgr,
            _ => {
                unimplemented!("Unknown value")
            }
        }
    }
}

impl YuvSourceChannels {
    pub(crate) const ALL: [YuvSourceChannels; 6] = [
        YuvSourceChannels::Rgb,
        YuvSourceChannels::Bgr,
        YuvSourceChannels::Rgba,
        YuvSourceChannels::Bgra,
        YuvSourceChannels::Argb,
        YuvSourceChannels::Abgr,
    ];

    #[inline(always)]
    pub const fn get_channels_count(&self) -> usize {
        match self {
            YuvSourceChannels::Rgb | YuvSourceChannels::Bgr => 3,
            YuvSourceChannels::Rgba
            | YuvSourceChannels::Bgra
            | YuvSourceChannels::Argb
            | YuvSourceChannels::Abgr => 4,
        }
    }

    #[inline(always)]
    pub const fn has_alpha(&self) -> bool {
        self.get_channels_count() == 4
    }
}

impl YuvSourceChannels {
    #[inline(always)]
    pub const fn get_r_channel_offset(&self) -> usize {
        match self {
            YuvSourceChannels::Rgb | YuvSourceChannels::Rgba => 0,
            YuvSourceChannels::Bgr | YuvSourceChannels::Bgra => 2,
            YuvSourceChannels::Argb => 1,
            YuvSourceChannels::Abgr => 3,
        }
    }

    #[inline(always)]
    pub const fn get_g_channel_offset(&self) -> usize {
        match self {
            YuvSourceChannels::Argb | YuvSourceChannels::Abgr => 2,
            _ => 1,
        }
    }

    #[inline(always)]
    pub const fn get_b_channel_offset(&self) -> usize {
        match self {
            YuvSourceChannels::Rgb | YuvSourceChannels::Rgba => 2,
            YuvSourceChannels::Bgr | YuvSourceChannels::Bgra => 0,
            YuvSourceChannels::Argb => 3,
            YuvSourceChannels::Abgr => 1,
        }
    }

    /// Alpha offset, meaningful only when [YuvSourceChannels::has_alpha] holds
    #[inline(always)]
    pub const fn get_a_channel_offset(&self) -> usize {
        match self {
            YuvSourceChannels::Rgb | YuvSourceChannels::Bgr => 0,
            YuvSourceChannels::Rgba | YuvSourceChannels::Bgra => 3,
            YuvSourceChannels::Argb | YuvSourceChannels::Abgr => 0,
        }
    }
}
