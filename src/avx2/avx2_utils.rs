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

#[inline(always)]
pub(crate) const fn shuffle(z: u32, y: u32, x: u32, w: u32) -> i32 {
    // Checked: we want to reinterpret the bits
    ((z << 6) | (y << 4) | (x << 2) | w) as i32
}

/// Packs two vectors of sixteen `i16` into 32 bytes in source order.
#[inline]
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn avx2_pack_u16(s_1: __m256i, s_2: __m256i) -> __m256i {
    let packed = _mm256_packus_epi16(s_1, s_2);
    const MASK: i32 = shuffle(3, 1, 2, 0);
    _mm256_permute4x64_epi64::<MASK>(packed)
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn avx2_deinterleave_rgba(
    rgba0: __m256i,
    rgba1: __m256i,
    rgba2: __m256i,
    rgba3: __m256i,
) -> (__m256i, __m256i, __m256i, __m256i) {
    #[rustfmt::skip]
    let sh = _mm256_setr_epi8(
        0, 4, 8, 12, 1, 5,
        9, 13, 2, 6, 10, 14,
        3, 7, 11, 15, 0, 4,
        8, 12, 1, 5, 9, 13,
        2, 6, 10, 14, 3, 7,
        11, 15,
    );

    let p0 = _mm256_shuffle_epi8(rgba0, sh);
    let p1 = _mm256_shuffle_epi8(rgba1, sh);
    let p2 = _mm256_shuffle_epi8(rgba2, sh);
    let p3 = _mm256_shuffle_epi8(rgba3, sh);

    let p01l = _mm256_unpacklo_epi32(p0, p1);
    let p01h = _mm256_unpackhi_epi32(p0, p1);
    let p23l = _mm256_unpacklo_epi32(p2, p3);
    let p23h = _mm256_unpackhi_epi32(p2, p3);

    let pll = _mm256_permute2x128_si256::<32>(p01l, p23l);
    let plh = _mm256_permute2x128_si256::<49>(p01l, p23l);
    let phl = _mm256_permute2x128_si256::<32>(p01h, p23h);
    let phh = _mm256_permute2x128_si256::<49>(p01h, p23h);

    let c0 = _mm256_unpacklo_epi32(pll, plh);
    let c1 = _mm256_unpackhi_epi32(pll, plh);
    let c2 = _mm256_unpacklo_epi32(phl, phh);
    let c3 = _mm256_unpackhi_epi32(phl, phh);

    (c0, c1, c2, c3)
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn avx2_deinterleave_rgb(
    rgb0: __m256i,
    rgb1: __m256i,
    rgb2: __m256i,
) -> (__m256i, __m256i, __m256i) {
    let s02_low = _mm256_permute2x128_si256::<32>(rgb0, rgb2);
    let s02_high = _mm256_permute2x128_si256::<49>(rgb0, rgb2);

    #[rustfmt::skip]
    let m0 = _mm256_setr_epi8(
        0, 0, -1, 0, 0,
        -1, 0, 0, -1, 0,
        0, -1, 0, 0, -1,
        0, 0, -1, 0, 0,
        -1, 0, 0, -1, 0,
        0, -1, 0, 0, -1,
        0, 0,
    );

    #[rustfmt::skip]
    let m1 = _mm256_setr_epi8(
        0, -1, 0, 0, -1,
        0, 0, -1, 0, 0,
        -1, 0, 0, -1, 0,
        0, -1, 0, 0, -1,
        0, 0, -1, 0, 0,
        -1, 0, 0, -1, 0,
        0, -1,
    );

    let c0 = _mm256_blendv_epi8(_mm256_blendv_epi8(s02_low, s02_high, m0), rgb1, m1);
    let c1 = _mm256_blendv_epi8(_mm256_blendv_epi8(s02_high, s02_low, m1), rgb1, m0);
    let c2 = _mm256_blendv_epi8(_mm256_blendv_epi8(rgb1, s02_low, m0), s02_high, m1);

    #[rustfmt::skip]
    let sh_c0 = _mm256_setr_epi8(
        0, 3, 6, 9, 12,
        15, 2, 5, 8, 11,
        14, 1, 4, 7, 10,
        13, 0, 3, 6, 9,
        12, 15, 2, 5, 8,
        11, 14, 1, 4, 7,
        10, 13,
    );

    #[rustfmt::skip]
    let sh_c1 = _mm256_setr_epi8(
        1, 4, 7, 10, 13,
        0, 3, 6, 9, 12,
        15, 2, 5, 8, 11,
        14, 1, 4, 7, 10,
        13, 0, 3, 6, 9,
        12, 15, 2, 5, 8,
        11, 14,
    );

    #[rustfmt::skip]
    let sh_c2 = _mm256_setr_epi8(
        2, 5, 8, 11, 14,
        1, 4, 7, 10, 13,
        0, 3, 6, 9, 12,
        15, 2, 5, 8, 11,
        14, 1, 4, 7, 10,
        13, 0, 3, 6, 9,
        12, 15,
    );
    (
        _mm256_shuffle_epi8(c0, sh_c0),
        _mm256_shuffle_epi8(c1, sh_c1),
        _mm256_shuffle_epi8(c2, sh_c2),
    )
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn avx2_interleave_rgb(
    c0: __m256i,
    c1: __m256i,
    c2: __m256i,
) -> (__m256i, __m256i, __m256i) {
    let sh_0 = _mm256_setr_epi8(
        0, 11, 6, 1, 12, 7, 2, 13, 8, 3, 14, 9, 4, 15, 10, 5, 0, 11, 6, 1, 12, 7, 2, 13, 8, 3, 14,
        9, 4, 15, 10, 5,
    );
    let sh_1 = _mm256_setr_epi8(
        5, 0, 11, 6, 1, 12, 7, 2, 13, 8, 3, 14, 9, 4, 15, 10, 5, 0, 11, 6, 1, 12, 7, 2, 13, 8, 3,
        14, 9, 4, 15, 10,
    );
    let sh_2 = _mm256_setr_epi8(
        10, 5, 0, 11, 6, 1, 12, 7, 2, 13, 8, 3, 14, 9, 4, 15, 10, 5, 0, 11, 6, 1, 12, 7, 2, 13, 8,
        3, 14, 9, 4, 15,
    );

    let s0 = _mm256_shuffle_epi8(c0, sh_0);
    let s1 = _mm256_shuffle_epi8(c1, sh_1);
    let s2 = _mm256_shuffle_epi8(c2, sh_2);

    let m0 = _mm256_setr_epi8(
        0, -1, 0, 0, -1, 0, 0, -1, 0, 0, -1, 0, 0, -1, 0, 0, 0, -1, 0, 0, -1, 0, 0, -1, 0, 0, -1,
        0, 0, -1, 0, 0,
    );
    let m1 = _mm256_setr_epi8(
        0, 0, -1, 0, 0, -1, 0, 0, -1, 0, 0, -1, 0, 0, -1, 0, 0, 0, -1, 0, 0, -1, 0, 0, -1, 0, 0,
        -1, 0, 0, -1, 0,
    );

    let p0 = _mm256_blendv_epi8(_mm256_blendv_epi8(s0, s1, m0), s2, m1);
    let p1 = _mm256_blendv_epi8(_mm256_blendv_epi8(s1, s2, m0), s0, m1);
    let p2 = _mm256_blendv_epi8(_mm256_blendv_epi8(s2, s0, m0), s1, m1);

    let rgb0 = _mm256_permute2x128_si256::<32>(p0, p1);
    let rgb1 = _mm256_permute2x128_si256::<48>(p2, p0);
    let rgb2 = _mm256_permute2x128_si256::<49>(p1, p2);

    (rgb0, rgb1, rgb2)
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn avx2_interleave_rgba(
    c0: __m256i,
    c1: __m256i,
    c2: __m256i,
    c3: __m256i,
) -> (__m256i, __m256i, __m256i, __m256i) {
    let c01_lo = _mm256_unpacklo_epi8(c0, c1);
    let c01_hi = _mm256_unpackhi_epi8(c0, c1);
    let c23_lo = _mm256_unpacklo_epi8(c2, c3);
    let c23_hi = _mm256_unpackhi_epi8(c2, c3);

    let px_0 = _mm256_unpacklo_epi16(c01_lo, c23_lo);
    let px_1 = _mm256_unpackhi_epi16(c01_lo, c23_lo);
    let px_2 = _mm256_unpacklo_epi16(c01_hi, c23_hi);
    let px_3 = _mm256_unpackhi_epi16(c01_hi, c23_hi);

    (
        _mm256_permute2x128_si256::<32>(px_0, px_1),
        _mm256_permute2x128_si256::<32>(px_2, px_3),
        _mm256_permute2x128_si256::<49>(px_0, px_1),
        _mm256_permute2x128_si256::<49>(px_2, px_3),
    )
}

/// Loads 32 pixels of `ORIGIN_CHANNELS` layout and returns R, G, B planes.
#[inline]
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn avx2_load_rgb<const ORIGIN_CHANNELS: u8>(
    ptr: *const u8,
) -> (__m256i, __m256i, __m256i) {
    let source_channels: YuvSourceChannels = ORIGIN_CHANNELS.into();
    let row0 = _mm256_loadu_si256(ptr as *const __m256i);
    let row1 = _mm256_loadu_si256(ptr.add(32) as *const __m256i);
    let row2 = _mm256_loadu_si256(ptr.add(64) as *const __m256i);
    let planes = if source_channels.get_channels_count() == 4 {
        let row3 = _mm256_loadu_si256(ptr.add(96) as *const __m256i);
        let (c0, c1, c2, c3) = avx2_deinterleave_rgba(row0, row1, row2, row3);
        [c0, c1, c2, c3]
    } else {
        let (c0, c1, c2) = avx2_deinterleave_rgb(row0, row1, row2);
        [c0, c1, c2, _mm256_setzero_si256()]
    };
    (
        planes[source_channels.get_r_channel_offset()],
        planes[source_channels.get_g_channel_offset()],
        planes[source_channels.get_b_channel_offset()],
    )
}

/// Stores 32 pixels in `DESTINATION_CHANNELS` layout, alpha is opaque.
#[inline]
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn avx2_store_rgb<const DESTINATION_CHANNELS: u8>(
    ptr: *mut u8,
    r: __m256i,
    g: __m256i,
    b: __m256i,
) {
    let destination_channels: YuvSourceChannels = DESTINATION_CHANNELS.into();
    let mut planes = [_mm256_set1_epi8(-1); 4];
    planes[destination_channels.get_r_channel_offset()] = r;
    planes[destination_channels.get_g_channel_offset()] = g;
    planes[destination_channels.get_b_channel_offset()] = b;
    if destination_channels.get_channels_count() == 4 {
        let (px_0, px_1, px_2, px_3) =
            avx2_interleave_rgba(planes[0], planes[1], planes[2], planes[3]);
        _mm256_storeu_si256(ptr as *mut __m256i, px_0);
        _mm256_storeu_si256(ptr.add(32) as *mut __m256i, px_1);
        _mm256_storeu_si256(ptr.add(64) as *mut __m256i, px_2);
        _mm256_storeu_si256(ptr.add(96) as *mut __m256i, px_3);
    } else {
        let (rgb0, rgb1, rgb2) = avx2_interleave_rgb(planes[0], planes[1], planes[2]);
        _mm256_storeu_si256(ptr as *mut __m256i, rgb0);
        _mm256_storeu_si256(ptr.add(32) as *mut __m256i, rgb1);
        _mm256_storeu_si256(ptr.add(64) as *mut __m256i, rgb2);
    }
}

/// Zero extends the low and the high 16 bytes into two vectors of `i16`.
#[inline]
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn avx2_widen_u8(v: __m256i) -> (__m256i, __m256i) {
    (
        _mm256_cvtepu8_epi16(_mm256_castsi256_si128(v)),
        _mm256_cvtepu8_epi16(_mm256_extracti128_si256::<1>(v)),
    )
}

/// Weights for `_mm256_madd_epi16` over interleaved `(r, g)` pairs and `(b, 0)` pairs.
#[derive(Copy, Clone)]
pub(crate) struct Avx2Weights {
    pub(crate) rg: __m256i,
    pub(crate) b: __m256i,
}

impl Avx2Weights {
    #[inline]
    #[target_feature(enable = "avx2")]
    pub(crate) unsafe fn new(wr: i32, wg: i32, wb: i32) -> Avx2Weights {
        Avx2Weights {
            rg: _mm256_set1_epi32(pack_i16_pair(wr, wg)),
            b: _mm256_set1_epi32(pack_i16_pair(wb, 0)),
        }
    }
}

#[inline(always)]
const fn pack_i16_pair(lo: i32, hi: i32) -> i32 {
    (((hi as u32) << 16) | (lo as u32 & 0xffff)) as i32
}

/// `(r * wr + g * wg + b * wb + bias) >> 8` for sixteen 16-bit samples, saturated to `i16`.
///
/// Unpack and pack both stay within 128-bit lanes so sample order is preserved.
#[inline]
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn avx2_weighted_sum(
    r: __m256i,
    g: __m256i,
    b: __m256i,
    weights: Avx2Weights,
    bias: __m256i,
) -> __m256i {
    let zeros = _mm256_setzero_si256();
    let rg_lo = _mm256_unpacklo_epi16(r, g);
    let rg_hi = _mm256_unpackhi_epi16(r, g);
    let b_lo = _mm256_unpacklo_epi16(b, zeros);
    let b_hi = _mm256_unpackhi_epi16(b, zeros);

    let lo = _mm256_add_epi32(
        _mm256_add_epi32(
            _mm256_madd_epi16(rg_lo, weights.rg),
            _mm256_madd_epi16(b_lo, weights.b),
        ),
        bias,
    );
    let hi = _mm256_add_epi32(
        _mm256_add_epi32(
            _mm256_madd_epi16(rg_hi, weights.rg),
            _mm256_madd_epi16(b_hi, weights.b),
        ),
        bias,
    );
    _mm256_packs_epi32(_mm256_srai_epi32::<8>(lo), _mm256_srai_epi32::<8>(hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_load_store_round_trip() {
        if !std::arch::is_x86_feature_detected!("avx2") {
            return;
        }
        let rgba = (0..128u8).collect::<Vec<_>>();
        let mut dst = vec![0u8; 128];
        unsafe {
            let (r, g, b) = avx2_load_rgb::<{ YuvSourceChannels::Abgr as u8 }>(rgba.as_ptr());
            avx2_store_rgb::<{ YuvSourceChannels::Rgba as u8 }>(dst.as_mut_ptr(), r, g, b);
        }
        for (src, dst) in rgba.chunks_exact(4).zip(dst.chunks_exact(4)) {
            assert_eq!(dst, &[src[3], src[2], src[1], 255]);
        }

        let bgr = (0..96u8).collect::<Vec<_>>();
        let mut dst = vec![0u8; 128];
        unsafe {
            let (r, g, b) = avx2_load_rgb::<{ YuvSourceChannels::Bgr as u8 }>(bgr.as_ptr());
            avx2_store_rgb::<{ YuvSourceChannels::Argb as u8 }>(dst.as_mut_ptr(), r, g, b);
        }
        for (src, dst) in bgr.chunks_exact(3).zip(dst.chunks_exact(4)) {
            assert_eq!(dst, &[255, src[2], src[1], src[0]]);
        }
    }
}
