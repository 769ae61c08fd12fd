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
#![forbid(unsafe_code)]

#[inline(always)]
/// Saturating arithmetic shift right against `max`, any rounding term must already be in `val`
pub(crate) fn qshr_n<const PRECISION: i32>(val: i32, max: i32) -> i32 {
    (val >> PRECISION).min(max).max(0)
}

#[inline(always)]
/// Rounded mean of `2^shift` summed samples
pub(crate) const fn block_mean(sum: i32, shift: u32) -> i32 {
    (sum + ((1 << shift) >> 1)) >> shift
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_mean_rounding() {
        assert_eq!(block_mean(7, 0), 7);
        assert_eq!(block_mean(3, 1), 2);
        assert_eq!(block_mean(2, 1), 1);
        assert_eq!(block_mean(6, 2), 2);
        assert_eq!(block_mean(5, 2), 1);
        assert_eq!(block_mean(4 * 255, 2), 255);
    }

    #[test]
    fn test_saturating_shifts() {
        assert_eq!(qshr_n::<6>(-200, 255), 0);
        assert_eq!(qshr_n::<6>(-1, 255), 0);
        assert_eq!(qshr_n::<6>(255 * 64 + 63, 255), 255);
        assert_eq!(qshr_n::<6>(300 * 64, 255), 255);
        assert_eq!(qshr_n::<6>(63, 255), 0);
        assert_eq!(qshr_n::<6>(64, 255), 1);
        assert_eq!(qshr_n::<6>(3 * 64 + 51, 255), 3);
        assert_eq!(qshr_n::<8>(4224, 255), 16);
        assert_eq!(qshr_n::<8>(70000 << 8, 65535), 65535);
    }
}
