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
use crate::internals::{ChromaBlock, ProcessedOffset};
use crate::sse::sse_support::{sse_load_rgb, sse_weighted_sum, SseWeights};
use crate::yuv_support::{forward_bias, CbCrForwardTransform, YuvChromaRange, YuvSourceChannels};
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

const STEP: usize = 16;

#[target_feature(enable = "sse4.1")]
pub(crate) unsafe fn sse_rgba_to_y_row<const ORIGIN_CHANNELS: u8>(
    transform: &CbCrForwardTransform<i32>,
    range: &YuvChromaRange,
    y_plane: &mut [u8],
    rgba: &[u8],
    width: usize,
) -> usize {
    let source_channels: YuvSourceChannels = ORIGIN_CHANNELS.into();
    let channels = source_channels.get_channels_count();

    let y_ptr = y_plane.as_mut_ptr();
    let rgba_ptr = rgba.as_ptr();

    let weights = SseWeights::new(transform.yr, transform.yg, transform.yb);
    let bias = _mm_set1_epi32(forward_bias(range.bias_y));
    let zeros = _mm_setzero_si128();

    let mut cx = 0usize;

    while cx + STEP <= width {
        let (r, g, b) = sse_load_rgb::<ORIGIN_CHANNELS>(rgba_ptr.add(cx * channels));

        let y_lo = sse_weighted_sum(
            _mm_cvtepu8_epi16(r),
            _mm_cvtepu8_epi16(g),
            _mm_cvtepu8_epi16(b),
            weights,
            bias,
        );
        let y_hi = sse_weighted_sum(
            _mm_unpackhi_epi8(r, zeros),
            _mm_unpackhi_epi8(g, zeros),
            _mm_unpackhi_epi8(b, zeros),
            weights,
            bias,
        );

        _mm_storeu_si128(
            y_ptr.add(cx) as *mut __m128i,
            _mm_packus_epi16(y_lo, y_hi),
        );

        cx += STEP;
    }

    cx
}

/// Per-channel block means of 16 source pixels as 16-bit lanes.
///
/// 2x1 and 2x2 give 8 means, 4x1 gives 4 means repeated twice.
#[inline]
#[target_feature(enable = "sse4.1")]
unsafe fn sse_block_mean<const BLOCK: u8>(row0: __m128i, row1: __m128i) -> __m128i {
    let block: ChromaBlock = BLOCK.into();
    let ones = _mm_set1_epi8(1);
    match block {
        ChromaBlock::B1x1 => _mm_cvtepu8_epi16(row0),
        ChromaBlock::B2x1 => {
            let sums = _mm_maddubs_epi16(row0, ones);
            _mm_srli_epi16::<1>(_mm_add_epi16(sums, _mm_set1_epi16(1)))
        }
        ChromaBlock::B2x2 => {
            let sums = _mm_add_epi16(_mm_maddubs_epi16(row0, ones), _mm_maddubs_epi16(row1, ones));
            _mm_srli_epi16::<2>(_mm_add_epi16(sums, _mm_set1_epi16(2)))
        }
        ChromaBlock::B4x1 => {
            let pairs = _mm_maddubs_epi16(row0, ones);
            let sums = _mm_hadd_epi16(pairs, pairs);
            _mm_srli_epi16::<2>(_mm_add_epi16(sums, _mm_set1_epi16(2)))
        }
    }
}

#[target_feature(enable = "sse4.1")]
pub(crate) unsafe fn sse_rgba_to_chroma_row<const ORIGIN_CHANNELS: u8, const BLOCK: u8>(
    transform: &CbCrForwardTransform<i32>,
    range: &YuvChromaRange,
    u_plane: &mut [u8],
    v_plane: &mut [u8],
    rgba0: &[u8],
    rgba1: &[u8],
    width: usize,
) -> ProcessedOffset {
    let source_channels: YuvSourceChannels = ORIGIN_CHANNELS.into();
    let channels = source_channels.get_channels_count();
    let block: ChromaBlock = BLOCK.into();
    let columns = block.columns();

    let u_ptr = u_plane.as_mut_ptr();
    let v_ptr = v_plane.as_mut_ptr();
    let rgba0_ptr = rgba0.as_ptr();
    let rgba1_ptr = rgba1.as_ptr();

    let cb_weights = SseWeights::new(transform.cb_r, transform.cb_g, transform.cb_b);
    let cr_weights = SseWeights::new(transform.cr_r, transform.cr_g, transform.cr_b);
    let bias = _mm_set1_epi32(forward_bias(range.bias_uv));
    let zeros = _mm_setzero_si128();

    let mut cx = 0usize;
    let mut ux = 0usize;

    while cx + STEP <= width {
        let (r0, g0, b0) = sse_load_rgb::<ORIGIN_CHANNELS>(rgba0_ptr.add(cx * channels));
        let (r1, g1, b1) = if block.uses_next_row() {
            sse_load_rgb::<ORIGIN_CHANNELS>(rgba1_ptr.add(cx * channels))
        } else {
            (r0, g0, b0)
        };

        let r = sse_block_mean::<BLOCK>(r0, r1);
        let g = sse_block_mean::<BLOCK>(g0, g1);
        let b = sse_block_mean::<BLOCK>(b0, b1);

        let cb = sse_weighted_sum(r, g, b, cb_weights, bias);
        let cr = sse_weighted_sum(r, g, b, cr_weights, bias);

        match block {
            ChromaBlock::B1x1 => {
                let r = _mm_unpackhi_epi8(r0, zeros);
                let g = _mm_unpackhi_epi8(g0, zeros);
                let b = _mm_unpackhi_epi8(b0, zeros);
                let cb_hi = sse_weighted_sum(r, g, b, cb_weights, bias);
                let cr_hi = sse_weighted_sum(r, g, b, cr_weights, bias);
                _mm_storeu_si128(u_ptr.add(ux) as *mut __m128i, _mm_packus_epi16(cb, cb_hi));
                _mm_storeu_si128(v_ptr.add(ux) as *mut __m128i, _mm_packus_epi16(cr, cr_hi));
            }
            ChromaBlock::B2x1 | ChromaBlock::B2x2 => {
                _mm_storel_epi64(u_ptr.add(ux) as *mut __m128i, _mm_packus_epi16(cb, cb));
                _mm_storel_epi64(v_ptr.add(ux) as *mut __m128i, _mm_packus_epi16(cr, cr));
            }
            ChromaBlock::B4x1 => {
                (u_ptr.add(ux) as *mut i32)
                    .write_unaligned(_mm_cvtsi128_si32(_mm_packus_epi16(cb, cb)));
                (v_ptr.add(ux) as *mut i32)
                    .write_unaligned(_mm_cvtsi128_si32(_mm_packus_epi16(cr, cr)));
            }
        }

        cx += STEP;
        ux += STEP / columns;
    }

    ProcessedOffset { cx, ux }
}
