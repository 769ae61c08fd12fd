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
use crate::sse::sse_support::sse_store_rgb;
use crate::yuv_support::{CbCrInverseTransform, YuvChromaRange, YuvSourceChannels};
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

const STEP: usize = 16;

/// Loads the chroma samples covering 16 pixels, each repeated `HORIZONTAL` times.
#[inline]
#[target_feature(enable = "sse4.1")]
unsafe fn sse_load_replicated<const HORIZONTAL: usize>(ptr: *const u8) -> __m128i {
    match HORIZONTAL {
        1 => _mm_loadu_si128(ptr as *const __m128i),
        2 => {
            let values = _mm_loadl_epi64(ptr as *const __m128i);
            _mm_unpacklo_epi8(values, values)
        }
        _ => {
            let values = _mm_cvtsi32_si128((ptr as *const i32).read_unaligned());
            let doubled = _mm_unpacklo_epi8(values, values);
            _mm_unpacklo_epi16(doubled, doubled)
        }
    }
}

#[derive(Copy, Clone)]
struct SseInverseCoefficients {
    y_coef: __m128i,
    cr_coef: __m128i,
    cb_coef: __m128i,
    g_coef_1: __m128i,
    g_coef_2: __m128i,
    y_bias: __m128i,
    uv_bias: __m128i,
}

/// Reconstructs eight pixels held in 16-bit lanes, results are `i16` before the final pack.
#[inline]
#[target_feature(enable = "sse4.1")]
unsafe fn sse_reconstruct(
    y: __m128i,
    u: __m128i,
    v: __m128i,
    c: SseInverseCoefficients,
) -> (__m128i, __m128i, __m128i) {
    let light = _mm_mullo_epi16(_mm_sub_epi16(y, c.y_bias), c.y_coef);
    let u = _mm_sub_epi16(u, c.uv_bias);
    let v = _mm_sub_epi16(v, c.uv_bias);

    let r = _mm_adds_epi16(light, _mm_mullo_epi16(v, c.cr_coef));
    let b = _mm_adds_epi16(light, _mm_mullo_epi16(u, c.cb_coef));
    let g = _mm_subs_epi16(
        _mm_subs_epi16(light, _mm_mullo_epi16(v, c.g_coef_1)),
        _mm_mullo_epi16(u, c.g_coef_2),
    );

    (
        _mm_srai_epi16::<6>(r),
        _mm_srai_epi16::<6>(g),
        _mm_srai_epi16::<6>(b),
    )
}

#[target_feature(enable = "sse4.1")]
pub(crate) unsafe fn sse_yuv_to_rgba_row<const DESTINATION_CHANNELS: u8, const HORIZONTAL: usize>(
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

    let coefficients = SseInverseCoefficients {
        y_coef: _mm_set1_epi16(transform.y_coef as i16),
        cr_coef: _mm_set1_epi16(transform.cr_coef as i16),
        cb_coef: _mm_set1_epi16(transform.cb_coef as i16),
        g_coef_1: _mm_set1_epi16(transform.g_coeff_1 as i16),
        g_coef_2: _mm_set1_epi16(transform.g_coeff_2 as i16),
        y_bias: _mm_set1_epi16(range.bias_y as i16),
        uv_bias: _mm_set1_epi16(range.bias_uv as i16),
    };
    let zeros = _mm_setzero_si128();

    let mut cx = 0usize;
    let mut ux = 0usize;

    while cx + STEP <= width {
        let y_values = _mm_loadu_si128(y_ptr.add(cx) as *const __m128i);
        let u_values = sse_load_replicated::<HORIZONTAL>(u_ptr.add(ux));
        let v_values = sse_load_replicated::<HORIZONTAL>(v_ptr.add(ux));

        let (r_lo, g_lo, b_lo) = sse_reconstruct(
            _mm_cvtepu8_epi16(y_values),
            _mm_cvtepu8_epi16(u_values),
            _mm_cvtepu8_epi16(v_values),
            coefficients,
        );
        let (r_hi, g_hi, b_hi) = sse_reconstruct(
            _mm_unpackhi_epi8(y_values, zeros),
            _mm_unpackhi_epi8(u_values, zeros),
            _mm_unpackhi_epi8(v_values, zeros),
            coefficients,
        );

        sse_store_rgb::<DESTINATION_CHANNELS>(
            rgba_ptr.add(cx * channels),
            _mm_packus_epi16(r_lo, r_hi),
            _mm_packus_epi16(g_lo, g_hi),
            _mm_packus_epi16(b_lo, b_hi),
        );

        cx += STEP;
        ux += STEP / HORIZONTAL;
    }

    ProcessedOffset { cx, ux }
}
