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
use crate::yuv_support::YuvSourceChannels;
use std::arch::aarch64::*;

/// Loads 16 pixels and returns R, G, B planes.
#[inline(always)]
pub(crate) unsafe fn neon_vld_rgb_for_yuv<const ORIGINS: u8>(
    ptr: *const u8,
) -> (uint8x16_t, uint8x16_t, uint8x16_t) {
    let source_channels: YuvSourceChannels = ORIGINS.into();
    match source_channels {
        YuvSourceChannels::Rgb => {
            let rgb_values = vld3q_u8(ptr);
            (rgb_values.0, rgb_values.1, rgb_values.2)
        }
        YuvSourceChannels::Bgr => {
            let rgb_values = vld3q_u8(ptr);
            (rgb_values.2, rgb_values.1, rgb_values.0)
        }
        YuvSourceChannels::Rgba => {
            let rgb_values = vld4q_u8(ptr);
            (rgb_values.0, rgb_values.1, rgb_values.2)
        }
        YuvSourceChannels::Bgra => {
            let rgb_values = vld4q_u8(ptr);
            (rgb_values.2, rgb_values.1, rgb_values.0)
        }
        YuvSourceChannels::Argb => {
            let rgb_values = vld4q_u8(ptr);
            (rgb_values.1, rgb_values.2, rgb_values.3)
        }
        YuvSourceChannels::Abgr => {
            let rgb_values = vld4q_u8(ptr);
            (rgb_values.3, rgb_values.2, rgb_values.1)
        }
    }
}

#[inline(always)]
pub(crate) unsafe fn neon_store_rgb8<const ORIGINS: u8>(
    ptr: *mut u8,
    r_values: uint8x16_t,
    g_values: uint8x16_t,
    b_values: uint8x16_t,
    v_max_colors: uint8x16_t,
) {
    let destination_channels: YuvSourceChannels = ORIGINS.into();
    match destination_channels {
        YuvSourceChannels::Rgb => {
            vst3q_u8(ptr, uint8x16x3_t(r_values, g_values, b_values));
        }
        YuvSourceChannels::Bgr => {
            vst3q_u8(ptr, uint8x16x3_t(b_values, g_values, r_values));
        }
        YuvSourceChannels::Rgba => {
            vst4q_u8(ptr, uint8x16x4_t(r_values, g_values, b_values, v_max_colors));
        }
        YuvSourceChannels::Bgra => {
            vst4q_u8(ptr, uint8x16x4_t(b_values, g_values, r_values, v_max_colors));
        }
        YuvSourceChannels::Argb => {
            vst4q_u8(ptr, uint8x16x4_t(v_max_colors, r_values, g_values, b_values));
        }
        YuvSourceChannels::Abgr => {
            vst4q_u8(ptr, uint8x16x4_t(v_max_colors, b_values, g_values, r_values));
        }
    }
}

#[inline(always)]
pub(crate) unsafe fn vwiden_u8(v: uint8x16_t) -> (int16x8_t, int16x8_t) {
    (
        vreinterpretq_s16_u16(vmovl_u8(vget_low_u8(v))),
        vreinterpretq_s16_u16(vmovl_high_u8(v)),
    )
}

/// Weights of a single output channel, one per source channel.
#[derive(Copy, Clone)]
pub(crate) struct NeonWeights {
    pub(crate) r: i16,
    pub(crate) g: i16,
    pub(crate) b: i16,
}

/// `(r * wr + g * wg + b * wb + bias) >> 8` for eight samples, saturated to `i16`.
#[inline(always)]
pub(crate) unsafe fn vweighted_sum(
    r: int16x8_t,
    g: int16x8_t,
    b: int16x8_t,
    weights: NeonWeights,
    bias: int32x4_t,
) -> int16x8_t {
    let mut lo = vmlal_n_s16(bias, vget_low_s16(r), weights.r);
    let mut hi = vmlal_high_n_s16(bias, r, weights.r);
    lo = vmlal_n_s16(lo, vget_low_s16(g), weights.g);
    hi = vmlal_high_n_s16(hi, g, weights.g);
    lo = vmlal_n_s16(lo, vget_low_s16(b), weights.b);
    hi = vmlal_high_n_s16(hi, b, weights.b);
    vcombine_s16(
        vqmovn_s32(vshrq_n_s32::<8>(lo)),
        vqmovn_s32(vshrq_n_s32::<8>(hi)),
    )
}
