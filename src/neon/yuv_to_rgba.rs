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
use crate::internals::ProcessedOffset;
use crate::neon::neon_utils::{neon_store_rgb8, vwiden_u8};
use crate::yuv_support::{CbCrInverseTransform, YuvChromaRange, YuvSourceChannels};
use std::arch::aarch64::*;

const STEP: usize = 16;

#[inline(always)]
unsafe fn neon_load_replicated<const HORIZONTAL: usize>(ptr: *const u8) -> uint8x16_t {
    match HORIZONTAL {
        1 => vld1q_u8(ptr),
        2 => {
            let values = vld1_u8(ptr);
            vcombine_u8(vzip1_u8(values, values), vzip2_u8(values, values))
        }
        _ => {
            let values = vcreate_u8((ptr as *const u32).read_unaligned() as u64);
            let doubled = vreinterpret_u16_u8(vzip1_u8(values, values));
            vcombine_u8(
                vreinterpret_u8_u16(vzip1_u16(doubled, doubled)),
                vreinterpret_u8_u16(vzip2_u16(doubled, doubled)),
            )
        }
    }
}

#[derive(Copy, Clone)]
struct NeonInverseCoefficients {
    y_coef: int16x8_t,
    cr_coef: int16x8_t,
    cb_coef: int16x8_t,
    g_coef_1: int16x8_t,
    g_coef_2: int16x8_t,
    y_bias: int16x8_t,
    uv_bias: int16x8_t,
}

#[inline(always)]
unsafe fn vreconstruct(
    y: int16x8_t,
    u: int16x8_t,
    v: int16x8_t,
    c: NeonInverseCoefficients,
) -> (uint8x8_t, uint8x8_t, uint8x8_t) {
    let light = vmulq_s16(vsubq_s16(y, c.y_bias), c.y_coef);
    let u = vsubq_s16(u, c.uv_bias);
    let v = vsubq_s16(v, c.uv_bias);

    let r = vqaddq_s16(light, vmulq_s16(v, c.cr_coef));
    let b = vqaddq_s16(light, vmulq_s16(u, c.cb_coef));
    let g = vqsubq_s16(
        vqsubq_s16(light, vmulq_s16(v, c.g_coef_1)),
        vmulq_s16(u, c.g_coef_2),
    );

    (
        vqmovun_s16(vshrq_n_s16::<6>(r)),
        vqmovun_s16(vshrq_n_s16::<6>(g)),
        vqmovun_s16(vshrq_n_s16::<6>(b)),
    )
}

pub(crate) unsafe fn neon_yuv_to_rgba_row<
    const DESTINATION_CHANNELS: u8,
    const HORIZONTAL: usize,
>(
    transform: &CbCrInverseTransform<i32>,
    range: &YuvChromaRange,
    y_plane: &[u8],
    u_plane: &[u8],
    v_plane: &[u8],
    rgba: &mut [u8],
    width: usize,
) -> ProcessedOffset {
    let destination_channels: YuvSourceChannels = DESTINATION_CHANNELS.into();
    let channels = destination_channels.get_channels_count();

    let y_ptr = y_plane.as_ptr();
    let u_ptr = u_plane.as_ptr();
    let v_ptr = v_plane.as_ptr();
    let rgba_ptr = rgba.as_mut_ptr();

    let coefficients = NeonInverseCoefficients {
        y_coef: vdupq_n_s16(transform.y_coef as i16),
        cr_coef: vdupq_n_s16(transform.cr_coef as i16),
        cb_coef: vdupq_n_s16(transform.cb_coef as i16),
        g_coef_1: vdupq_n_s16(transform.g_coeff_1 as i16),
        g_coef_2: vdupq_n_s16(transform.g_coeff_2 as i16),
        y_bias: vdupq_n_s16(range.bias_y as i16),
        uv_bias: vdupq_n_s16(range.bias_uv as i16),
    };
    let v_alpha = vdupq_n_u8(255);

    let mut cx = 0usize;
    let mut ux = 0usize;

    while cx + STEP <= width {
        let (y_lo, y_hi) = vwiden_u8(vld1q_u8(y_ptr.add(cx)));
        let (u_lo, u_hi) = vwiden_u8(neon_load_replicated::<HORIZONTAL>(u_ptr.add(ux)));
        let (v_lo, v_hi) = vwiden_u8(neon_load_replicated::<HORIZONTAL>(v_ptr.add(ux)));

        let (r_lo, g_lo, b_lo) = vreconstruct(y_lo, u_lo, v_lo, coefficients);
        let (r_hi, g_hi, b_hi) = vreconstruct(y_hi, u_hi, v_hi, coefficients);

        neon_store_rgb8::<DESTINATION_CHANNELS>(
            rgba_ptr.add(cx * channels),
            vcombine_u8(r_lo, r_hi),
            vcombine_u8(g_lo, g_hi),
            vcombine_u8(b_lo, b_hi),
            v_alpha,
        );

        cx += STEP;
        ux += STEP / HORIZONTAL;
    }

    ProcessedOffset { cx, ux }
}
