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
use crate::avx2::avx2_utils::{avx2_pack_u16, avx2_store_rgb, avx2_widen_u8};
use crate::internals::ProcessedOffset;
use crate::yuv_support::{CbCrInverseTransform, YuvChromaRange, YuvSourceChannels};
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

const STEP: usize = 32;

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn avx2_load_replicated<const HORIZONTAL: usize>(ptr: *const u8) -> __m256i {
    match HORIZONTAL {
        1 => _mm256_loadu_si256(ptr as *const __m256i),
        2 => {
            let values = _mm_loadu_si128(ptr as *const __m128i);
            _mm256_set_m128i(
                _mm_unpackhi_epi8(values, values),
                _mm_unpacklo_epi8(values, values),
            )
        }
        _ => {
            let values = _mm_loadl_epi64(ptr as *const __m128i);
            let doubled = _mm_unpacklo_epi8(values, values);
            _mm256_set_m128i(
                _mm_unpackhi_epi16(doubled, doubled),
                _mm_unpacklo_epi16(doubled, doubled),
            )
        }
    }
}

#[derive(Copy, Clone)]
struct Avx2InverseCoefficients {
    y_coef: __m256i,
    cr_coef: __m256i,
    cb_coef: __m256i,
    g_coef_1: __m256i,
    g_coef_2: __m256i,
    y_bias: __m256i,
    uv_bias: __m256i,
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn avx2_reconstruct(
    y: __m256i,
    u: __m256i,
    v: __m256i,
    c: Avx2InverseCoefficients,
) -> (__m256i, __m256i, __m256i) {
    let light = _mm256_mullo_epi16(_mm256_sub_epi16(y, c.y_bias), c.y_coef);
    let u = _mm256_sub_epi16(u, c.uv_bias);
    let v = _mm256_sub_epi16(v, c.uv_bias);

    let r = _mm256_adds_epi16(light, _mm256_mullo_epi16(v, c.cr_coef));
    let b = _mm256_adds_epi16(light, _mm256_mullo_epi16(u, c.cb_coef));
    let g = _mm256_subs_epi16(
        _mm256_subs_epi16(light, _mm256_mullo_epi16(v, c.g_coef_1)),
        _mm256_mullo_epi16(u, c.g_coef_2),
    );

    (
        _mm256_srai_epi16::<6>(r),
        _mm256_srai_epi16::<6>(g),
        _mm256_srai_epi16::<6>(b),
    )
}

#[target_feature(enable = "avx2")]
pub(crate) unsafe fn avx2_yuv_to_rgba_row<
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

    let coefficients = Avx2InverseCoefficients {
        y_coef: _mm256_set1_epi16(transform.y_coef as i16),
        cr_coef: _mm256_set1_epi16(transform.cr_coef as i16),
        cb_coef: _mm256_set1_epi16(transform.cb_coef as i16),
        g_coef_1: _mm256_set1_epi16(transform.g_coeff_1 as i16),
        g_coef_2: _mm256_set1_epi16(transform.g_coeff_2 as i16),
        y_bias: _mm256_set1_epi16(range.bias_y as i16),
        uv_bias: _mm256_set1_epi16(range.bias_uv as i16),
    };

    let mut cx = 0usize;
    let mut ux = 0usize;

    while cx + STEP <= width {
        let (y_lo, y_hi) = avx2_widen_u8(_mm256_loadu_si256(y_ptr.add(cx) as *const __m256i));
        let (u_lo, u_hi) = avx2_widen_u8(avx2_load_replicated::<HORIZONTAL>(u_ptr.add(ux)));
        let (v_lo, v_hi) = avx2_widen_u8(avx2_load_replicated::<HORIZONTAL>(v_ptr.add(ux)));

        let (r_lo, g_lo, b_lo) = avx2_reconstruct(y_lo, u_lo, v_lo, coefficients);
        let (r_hi, g_hi, b_hi) = avx2_reconstruct(y_hi, u_hi, v_hi, coefficients);

        avx2_store_rgb::<DESTINATION_CHANNELS>(
            rgba_ptr.add(cx * channels),
            avx2_pack_u16(r_lo, r_hi),
            avx2_pack_u16(g_lo, g_hi),
            avx2_pack_u16(b_lo, b_hi),
        );

        cx += STEP;
        ux += STEP / HORIZONTAL;
    }

    ProcessedOffset { cx, ux }
}
