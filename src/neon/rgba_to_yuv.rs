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
use crate::neon::neon_utils::{neon_vld_rgb_for_yuv, vweighted_sum, vwiden_u8, NeonWeights};
use crate::yuv_support::{forward_bias, CbCrForwardTransform, YuvChromaRange, YuvSourceChannels};
use std::arch::aarch64::*;

const STEP: usize = 16;

pub(crate) unsafe fn neon_rgba_to_y_row<const ORIGIN_CHANNELS: u8>(
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

    let weights = NeonWeights {
        r: transform.yr as i16,
        g: transform.yg as i16,
        b: transform.yb as i16,
    };
    let bias = vdupq_n_s32(forward_bias(range.bias_y));

    let mut cx = 0usize;

    while cx + STEP <= width {
        let (r, g, b) = neon_vld_rgb_for_yuv::<ORIGIN_CHANNELS>(rgba_ptr.add(cx * channels));
        let (r_lo, r_hi) = vwiden_u8(r);
        let (g_lo, g_hi) = vwiden_u8(g);
        let (b_lo, b_hi) = vwiden_u8(b);

        let y_lo = vweighted_sum(r_lo, g_lo, b_lo, weights, bias);
        let y_hi = vweighted_sum(r_hi, g_hi, b_hi, weights, bias);

        vst1q_u8(
            y_ptr.add(cx),
            vcombine_u8(vqmovun_s16(y_lo), vqmovun_s16(y_hi)),
        );

        cx += STEP;
    }

    cx
}

/// Block means as 16-bit lanes: 8 means for 2x1 and 2x2, 4 means repeated twice for 4x1.
#[inline(always)]
unsafe fn vblock_mean<const BLOCK: u8>(row0: uint8x16_t, row1: uint8x16_t) -> int16x8_t {
    let block: ChromaBlock = BLOCK.into();
    let means = match block {
        ChromaBlock::B1x1 => vmovl_u8(vget_low_u8(row0)),
        ChromaBlock::B2x1 => vrshrq_n_u16::<1>(vpaddlq_u8(row0)),
        ChromaBlock::B2x2 => vrshrq_n_u16::<2>(vaddq_u16(vpaddlq_u8(row0), vpaddlq_u8(row1))),
        ChromaBlock::B4x1 => {
            let pairs = vpaddlq_u8(row0);
            vrshrq_n_u16::<2>(vpaddq_u16(pairs, pairs))
        }
    };
    vreinterpretq_s16_u16(means)
}

pub(crate) unsafe fn neon_rgba_to_chroma_row<const ORIGIN_CHANNELS: u8, const BLOCK: u8>(
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

    let cb_weights = NeonWeights {
        r: transform.cb_r as i16,
        g: transform.cb_g as i16,
        b: transform.cb_b as i16,
    };
    let cr_weights = NeonWeights {
        r: transform.cr_r as i16,
        g: transform.cr_g as i16,
        b: transform.cr_b as i16,
    };
    let bias = vdupq_n_s32(forward_bias(range.bias_uv));

    let mut cx = 0usize;
    let mut ux = 0usize;

    while cx + STEP <= width {
        let (r0, g0, b0) = neon_vld_rgb_for_yuv::<ORIGIN_CHANNELS>(rgba0_ptr.add(cx * channels));
        let (r1, g1, b1) = if block.uses_next_row() {
            neon_vld_rgb_for_yuv::<ORIGIN_CHANNELS>(rgba1_ptr.add(cx * channels))
        } else {
            (r0, g0, b0)
        };

        let r = vblock_mean::<BLOCK>(r0, r1);
        let g = vblock_mean::<BLOCK>(g0, g1);
        let b = vblock_mean::<BLOCK>(b0, b1);

        let cb = vqmovun_s16(vweighted_sum(r, g, b, cb_weights, bias));
        let cr = vqmovun_s16(vweighted_sum(r, g, b, cr_weights, bias));

        match block {
            ChromaBlock::B1x1 => {
                let (_, r) = vwiden_u8(r0);
                let (_, g) = vwiden_u8(g0);
                let (_, b) = vwiden_u8(b0);
                let cb_hi = vqmovun_s16(vweighted_sum(r, g, b, cb_weights, bias));
                let cr_hi = vqmovun_s16(vweighted_sum(r, g, b, cr_weights, bias));
                vst1q_u8(u_ptr.add(ux), vcombine_u8(cb, cb_hi));
                vst1q_u8(v_ptr.add(ux), vcombine_u8(cr, cr_hi));
            }
            ChromaBlock::B2x1 | ChromaBlock::B2x2 => {
                vst1_u8(u_ptr.add(ux), cb);
                vst1_u8(v_ptr.add(ux), cr);
            }
            ChromaBlock::B4x1 => {
                let mut store = [0u8; 8];
                vst1_u8(store.as_mut_ptr(), cb);
                std::ptr::copy_nonoverlapping(store.as_ptr(), u_ptr.add(ux), 4);
                vst1_u8(store.as_mut_ptr(), cr);
                std::ptr::copy_nonoverlapping(store.as_ptr(), v_ptr.add(ux), 4);
            }
        }

        cx += STEP;
        ux += STEP / columns;
    }

    ProcessedOffset { cx, ux }
}
