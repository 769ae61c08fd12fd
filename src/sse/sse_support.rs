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
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

#[inline]
#[target_feature(enable = "sse4.1")]
unsafe fn sse_interleave_rgba(
    c0: __m128i,
    c1: __m128i,
    c2: __m128i,
    c3: __m128i,
) -> (__m128i, __m128i, __m128i, __m128i) {
    let c01_lo = _mm_unpacklo_epi8(c0, c1);
    let c01_hi = _mm_unpackhi_epi8(c0, c1);
    let c23_lo = _mm_unpacklo_epi8(c2, c3);
    let c23_hi = _mm_unpackhi_epi8(c2, c3);

    let px_0 = _mm_unpacklo_epi16(c01_lo, c23_lo);
    let px_1 = _mm_unpackhi_epi16(c01_lo, c23_lo);
    let px_2 = _mm_unpacklo_epi16(c01_hi, c23_hi);
    let px_3 = _mm_unpackhi_epi16(c01_hi, c23_hi);
    (px_0, px_1, px_2, px_3)
}

#[inline]
#[target_feature(enable = "sse4.1")]
unsafe fn sse_deinterleave_rgba(
    rgba0: __m128i,
    rgba1: __m128i,
    rgba2: __m128i,
    rgba3: __m128i,
) -> (__m128i, __m128i, __m128i, __m128i) {
    let t0 = _mm_unpacklo_epi8(rgba0, rgba1);
    let t1 = _mm_unpackhi_epi8(rgba0, rgba1);
    let t2 = _mm_unpacklo_epi8(rgba2, rgba3);
    let t3 = _mm_unpackhi_epi8(rgba2, rgba3);

    let t4 = _mm_unpacklo_epi16(t0, t2);
    let t5 = _mm_unpackhi_epi16(t0, t2);
    let t6 = _mm_unpacklo_epi16(t1, t3);
    let t7 = _mm_unpackhi_epi16(t1, t3);

    let l1 = _mm_unpacklo_epi32(t4, t6);
    let l2 = _mm_unpackhi_epi32(t4, t6);
    let l3 = _mm_unpacklo_epi32(t5, t7);
    let l4 = _mm_unpackhi_epi32(t5, t7);

    #[rustfmt::skip]
    let shuffle = _mm_setr_epi8(0, 4, 8, 12,
                                1, 5, 9, 13,
                                2, 6, 10, 14,
                                3, 7, 11, 15,
    );

    let c0 = _mm_shuffle_epi8(_mm_unpacklo_epi32(l1, l3), shuffle);
    let c1 = _mm_shuffle_epi8(_mm_unpackhi_epi32(l1, l3), shuffle);
    let c2 = _mm_shuffle_epi8(_mm_unpacklo_epi32(l2, l4), shuffle);
    let c3 = _mm_shuffle_epi8(_mm_unpackhi_epi32(l2, l4), shuffle);

    (c0, c1, c2, c3)
}

#[inline]
#[target_feature(enable = "sse4.1")]
unsafe fn sse_deinterleave_rgb(
    rgb0: __m128i,
    rgb1: __m128i,
    rgb2: __m128i,
) -> (__m128i, __m128i, __m128i) {
    #[rustfmt::skip]
    let idx = _mm_setr_epi8(0, 3, 6, 9,
                            12, 15, 2, 5, 8,
                            11, 14, 1, 4, 7,
                            10, 13);

    let r6b5g5_0 = _mm_shuffle_epi8(rgb0, idx);
    let g6r5b5_1 = _mm_shuffle_epi8(rgb1, idx);
    let b6g5r5_2 = _mm_shuffle_epi8(rgb2, idx);

    #[rustfmt::skip]
    let mask010 = _mm_setr_epi8(0, 0, 0, 0,
                                0, 0, -1, -1, -1,
                                -1, -1, 0, 0, 0,
                                0, 0);

    #[rustfmt::skip]
    let mask001 = _mm_setr_epi8(0, 0, 0, 0, 0,
                                0, 0, 0, 0, 0, 0,
                                -1, -1, -1, -1, -1);

    let b2g2b1 = _mm_blendv_epi8(b6g5r5_2, g6r5b5_1, mask001);
    let b2b0b1 = _mm_blendv_epi8(b2g2b1, r6b5g5_0, mask010);

    let r0r1b1 = _mm_blendv_epi8(r6b5g5_0, g6r5b5_1, mask010);
    let r0r1r2 = _mm_blendv_epi8(r0r1b1, b6g5r5_2, mask001);

    let g1r1g0 = _mm_blendv_epi8(g6r5b5_1, r6b5g5_0, mask001);
    let g1g2g0 = _mm_blendv_epi8(g1r1g0, b6g5r5_2, mask010);

    let g0g1g2 = _mm_alignr_epi8::<11>(g1g2g0, g1g2g0);
    let b0b1b2 = _mm_alignr_epi8::<6>(b2b0b1, b2b0b1);

    (r0r1r2, g0g1g2, b0b1b2)
}

#[inline]
#[target_feature(enable = "sse4.1")]
unsafe fn sse_interleave_rgb(
    c0: __m128i,
    c1: __m128i,
    c2: __m128i,
) -> (__m128i, __m128i, __m128i) {
    let sh_a = _mm_setr_epi8(0, 11, 6, 1, 12, 7, 2, 13, 8, 3, 14, 9, 4, 15, 10, 5);
    let sh_b = _mm_setr_epi8(5, 0, 11, 6, 1, 12, 7, 2, 13, 8, 3, 14, 9, 4, 15, 10);
    let sh_c = _mm_setr_epi8(10, 5, 0, 11, 6, 1, 12, 7, 2, 13, 8, 3, 14, 9, 4, 15);
    let a0 = _mm_shuffle_epi8(c0, sh_a);
    let b0 = _mm_shuffle_epi8(c1, sh_b);
    let c0 = _mm_shuffle_epi8(c2, sh_c);

    let m0 = _mm_setr_epi8(0, 0, -1, 0, 0, -1, 0, 0, -1, 0, 0, -1, 0, 0, -1, 0);
    let m1 = _mm_setr_epi8(0, -1, 0, 0, -1, 0, 0, -1, 0, 0, -1, 0, 0, -1, 0, 0);
    let v0 = _mm_blendv_epi8(_mm_blendv_epi8(a0, b0, m1), c0, m0);
    let v1 = _mm_blendv_epi8(_mm_blendv_epi8(b0, c0, m1), a0, m0);
    let v2 = _mm_blendv_epi8(_mm_blendv_epi8(c0, a0, m1), b0, m0);
    (v0, v1, v2)
}

/// Loads 16 pixels of `ORIGIN_CHANNELS` layout and returns R, G, B planes.
#[inline]
#[target_feature(enable = "sse4.1")]
pub(crate) unsafe fn sse_load_rgb<const ORIGIN_CHANNELS: u8>(
    ptr: *const u8,
) -> (__m128i, __m128i, __m128i) {
    let source_channels: YuvSourceChannels = ORIGIN_CHANNELS.into();
    let row0 = _mm_loadu_si128(ptr as *const __m128i);
    let row1 = _mm_loadu_si128(ptr.add(16) as *const __m128i);
    let row2 = _mm_loadu_si128(ptr.add(32) as *const __m128i);
    let planes = if source_channels.get_channels_count() == 4 {
        let row3 = _mm_loadu_si128(ptr.add(48) as *const __m128i);
        let (c0, c1, c2, c3) = sse_deinterleave_rgba(row0, row1, row2, row3);
        [c0, c1, c2, c3]
    } else {
        let (c0, c1, c2) = sse_deinterleave_rgb(row0, row1, row2);
        [c0, c1, c2, _mm_setzero_si128()]
    };
    (
        planes[source_channels.get_r_channel_offset()],
        planes[source_channels.get_g_channel_offset()],
        planes[source_channels.get_b_channel_offset()],
    )
}

/// Stores 16 pixels in `DESTINATION_CHANNELS` layout, alpha is opaque.
#[inline]
#[target_feature(enable = "sse4.1")]
pub(crate) unsafe fn sse_store_rgb<const DESTINATION_CHANNELS: u8>(
    ptr: *mut u8,
    r: __m128i,
    g: __m128i,
    b: __m128i,
) {
    let destination_channels: YuvSourceChannels = DESTINATION_CHANNELS.into();
    let mut planes = [_mm_set1_epi8(-1); 4];
    planes[destination_channels.get_r_channel_offset()] = r;
    planes[destination_channels.get_g_channel_offset()] = g;
    planes[destination_channels.get_b_channel_offset()] = b;
    if destination_channels.get_channels_count() == 4 {
        let (px_0, px_1, px_2, px_3) = sse_interleave_rgba(planes[0], planes[1], planes[2], planes[3]);
        _mm_storeu_si128(ptr as *mut __m128i, px_0);
        _mm_storeu_si128(ptr.add(16) as *mut __m128i, px_1);
        _mm_storeu_si128(ptr.add(32) as *mut __m128i, px_2);
        _mm_storeu_si128(ptr.add(48) as *mut __m128i, px_3);
    } else {
        let (v0, v1, v2) = sse_interleave_rgb(planes[0], planes[1], planes[2]);
        _mm_storeu_si128(ptr as *mut __m128i, v0);
        _mm_storeu_si128(ptr.add(16) as *mut __m128i, v1);
        _mm_storeu_si128(ptr.add(32) as *mut __m128i, v2);
    }
}

/// Weights for `_mm_madd_epi16` over interleaved `(r, g)` pairs and `(b, 0)` pairs.
#[derive(Copy, Clone)]
pub(crate) struct SseWeights {
    pub(crate) rg: __m128i,
    pub(crate) b: __m128i,
}

impl SseWeights {
    #[inline]
    #[target_feature(enable = "sse4.1")]
    pub(crate) unsafe fn new(wr: i32, wg: i32, wb: i32) -> SseWeights {
        SseWeights {
            rg: _mm_set1_epi32(pack_i16_pair(wr, wg)),
            b: _mm_set1_epi32(pack_i16_pair(wb, 0)),
        }
    }
}

/// Two `i16` weights in one 32-bit lane, `lo` in the low half.
#[inline(always)]
pub(crate) const fn pack_i16_pair(lo: i32, hi: i32) -> i32 {
    (((hi as u32) << 16) | (lo as u32 & 0xffff)) as i32
}

/// `(r * wr + g * wg + b * wb + bias) >> 8` for eight 16-bit samples, saturated to `i16`.
#[inline]
#[target_feature(enable = "sse4.1")]
pub(crate) unsafe fn sse_weighted_sum(
    r: __m128i,
    g: __m128i,
    b: __m128i,
    weights: SseWeights,
    bias: __m128i,
) -> __m128i {
    let zeros = _mm_setzero_si128();
    let rg_lo = _mm_unpacklo_epi16(r, g);
    let rg_hi = _mm_unpackhi_epi16(r, g);
    let b_lo = _mm_unpacklo_epi16(b, zeros);
    let b_hi = _mm_unpackhi_epi16(b, zeros);

    let lo = _mm_add_epi32(
        _mm_add_epi32(
            _mm_madd_epi16(rg_lo, weights.rg),
            _mm_madd_epi16(b_lo, weights.b),
        ),
        bias,
    );
    let hi = _mm_add_epi32(
        _mm_add_epi32(
            _mm_madd_epi16(rg_hi, weights.rg),
            _mm_madd_epi16(b_hi, weights.b),
        ),
        bias,
    );
    _mm_packs_epi32(_mm_srai_epi32::<8>(lo), _mm_srai_epi32::<8>(hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_i16_pair_keeps_signs() {
        let packed = pack_i16_pair(-38, 129);
        assert_eq!(packed as u32 & 0xffff, (-38i16) as u16 as u32);
        assert_eq!((packed >> 16) as i16, 129);
        let packed = pack_i16_pair(112, -94);
        assert_eq!(packed as i16, 112);
        assert_eq!((packed >> 16) as i16, -94);
    }

    #[test]
    fn test_layout_load_store_round_trip() {
        if !std::arch::is_x86_feature_detected!("sse4.1") {
            return;
        }
        let rgba = (0..64u8).collect::<Vec<_>>();
        let mut dst = vec![0u8; 64];
        unsafe {
            let (r, g, b) = sse_load_rgb::<{ YuvSourceChannels::Argb as u8 }>(rgba.as_ptr());
            sse_store_rgb::<{ YuvSourceChannels::Bgra as u8 }>(dst.as_mut_ptr(), r, g, b);
        }
        for (src, dst) in rgba.chunks_exact(4).zip(dst.chunks_exact(4)) {
            assert_eq!(dst, &[src[3], src[2], src[1], 255]);
        }

        let rgb = (0..48u8).collect::<Vec<_>>();
        let mut dst = vec![0u8; 48];
        unsafe {
            let (r, g, b) = sse_load_rgb::<{ YuvSourceChannels::Rgb as u8 }>(rgb.as_ptr());
            sse_store_rgb::<{ YuvSourceChannels::Bgr as u8 }>(dst.as_mut_ptr(), r, g, b);
        }
        for (src, dst) in rgb.chunks_exact(3).zip(dst.chunks_exact(3)) {
            assert_eq!(dst, &[src[2], src[1], src[0]]);
        }
    }
}
