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
use crate::avx2::avx2_utils::{
    avx2_load_rgb, avx2_pack_u16, avx2_weighted_sum, avx2_widen_u8, shuffle, Avx2Weights,
};
use crate::internals::{ChromaBlock, ProcessedOffset};
use crate::yuv_support::{forward_bias, CbCrForwardTransform, YuvChromaRange, YuvSourceChannels};
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

const STEP: usize = 32;

#[target_feature(enable = "avx2")]
pub(crate) unsafe fn avx2_rgba_to_y_row<const ORIGIN_CHANNELS: u8>(
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

    let weights = Avx2Weights::new(transform.yr, transform.yg, transform.yb);
    let bias = _mm256_set1_epi32(forward_bias(range.bias_y));

    let mut cx = 0usize;

    while cx + STEP <= width {
        let (r, g, b) = avx2_load_rgb::<ORIGIN_CHANNELS>(rgba_ptr.add(cx * channels));
        let (r_lo, r_hi) = avx2_widen_u8(r);
        let (g_lo, g_hi) = avx2_widen_u8(g);
        let (b_lo, b_hi) = avx2_widen_u8(b);

        let y_lo = avx2_weighted_sum(r_lo, g_lo, b_lo, weights, bias);
        let y_hi = avx2_weighted_sum(r_hi, g_hi, b_hi, weights, bias);

        _mm256_storeu_si256(y_ptr.add(cx) as *mut __m256i, avx2_pack_u16(y_lo, y_hi));

        cx += STEP;
    }

    cx
}

/// Per-channel block means of 32 source pixels as 16-bit lanes.
///
/// 2x1 and 2x2 give 16 means in order. 4x1 gives 4 means at the bottom of each 128-bit lane.
#[inline]
#[target_feature(enable = "avx2")]
unsafe fn avx2_block_mean<const BLOCK: u8>(row0: __m256i, row1: __m256i) -> __m256i {
    let block: ChromaBlock = BLOCK.into();
    let ones = _mm256_set1_epi8(1);
    match block {
        ChromaBlock::B1x1 => _mm256_cvtepu8_epi16(_mm256_castsi256_si128(row0)),
        ChromaBlock::B2x1 => {
            let sums = _mm256_maddubs_epi16(row0, ones);
            _mm256_srli_epi16::<1>(_mm256_add_epi16(sums, _mm256_set1_epi16(1)))
        }
        ChromaBlock::B2x2 => {
            let sums = _mm256_add_epi16(
                _mm256_maddubs_epi16(row0, ones),
                _mm256_maddubs_epi16(row1, ones),
            );
            _mm256_srli_epi16::<2>(_mm256_add_epi16(sums, _mm256_set1_epi16(2)))
        }
        ChromaBlock::B4x1 => {
            let pairs = _mm256_maddubs_epi16(row0, ones);
            let sums = _mm256_hadd_epi16(pairs, pairs);
            _mm256_srli_epi16::<2>(_mm256_add_epi16(sums, _mm256_set1_epi16(2)))
        }
    }
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn avx2_pack_lanes_u8(v: __m256i) -> __m128i {
    _mm_packus_epi16(_mm256_castsi256_si128(v), _mm256_extracti128_si256::<1>(v))
}

#[target_feature(enable = "avx2")]
pub(crate) unsafe fn avx2_rgba_to_chroma_row<const ORIGIN_CHANNELS: u8, const BLOCK: u8>(
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

    let cb_weights = Avx2Weights::new(transform.cb_r, transform.cb_g, transform.cb_b);
    let cr_weights = Avx2Weights::new(transform.cr_r, transform.cr_g, transform.cr_b);
    let bias = _mm256_set1_epi32(forward_bias(range.bias_uv));

    let mut cx = 0usize;
    let mut ux = 0usize;

    while cx + STEP <= width {
        let (r0, g0, b0) = avx2_load_rgb::<ORIGIN_CHANNELS>(rgba0_ptr.add(cx * channels));
        let (r1, g1, b1) = if block.uses_next_row() {
            avx2_load_rgb::<ORIGIN_CHANNELS>(rgba1_ptr.add(cx * channels))
        } else {
            (r0, g0, b0)
        };

        let r = avx2_block_mean::<BLOCK>(r0, r1);
        let g = avx2_block_mean::<BLOCK>(g0, g1);
        let b = avx2_block_mean::<BLOCK>(b0, b1);

        let cb = avx2_weighted_sum(r, g, b, cb_weights, bias);
        let cr = avx2_weighted_sum(r, g, b, cr_weights, bias);

        match block {
            ChromaBlock::B1x1 => {
                let r = _mm256_cvtepu8_epi16(_mm256_extracti128_si256::<1>(r0));
                let g = _mm256_cvtepu8_epi16(_mm256_extracti128_si256::<1>(g0));
                let b = _mm256_cvtepu8_epi16(_mm256_extracti128_si256::<1>(b0));
                let cb_hi = avx2_weighted_sum(r, g, b, cb_weights, bias);
                let cr_hi = avx2_weighted_sum(r, g, b, cr_weights, bias);
                _mm256_storeu_si256(u_ptr.add(ux) as *mut __m256i, avx2_pack_u16(cb, cb_hi));
                _mm256_storeu_si256(v_ptr.add(ux) as *mut __m256i, avx2_pack_u16(cr, cr_hi));
            }
            ChromaBlock::B2x1 | ChromaBlock::B2x2 => {
                _mm_storeu_si128(u_ptr.add(ux) as *mut __m128i, avx2_pack_lanes_u8(cb));
                _mm_storeu_si128(v_ptr.add(ux) as *mut __m128i, avx2_pack_lanes_u8(cr));
            }
            ChromaBlock::B4x1 => {
                const GATHER: i32 = shuffle(0, 0, 2, 0);
                let cb = _mm256_castsi256_si128(_mm256_permute4x64_epi64::<GATHER>(cb));
                let cr = _mm256_castsi256_si128(_mm256_permute4x64_epi64::<GATHER>(cr));
                _mm_storel_epi64(u_ptr.add(ux) as *mut __m128i, _mm_packus_epi16(cb, cb));
                _mm_storel_epi64(v_ptr.add(ux) as *mut __m128i, _mm_packus_epi16(cr, cr));
            }
        }

        cx += STEP;
        ux += STEP / columns;
    }

    ProcessedOffset { cx, ux }
}
