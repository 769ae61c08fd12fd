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
use rug::float::Round;
use rug::Float;
use yuv_transform::{
    get_forward_transform, get_inverse_transform, get_kr_kb, get_yuv_range,
    CbCrForwardTransform, CbCrInverseTransform, ToIntegerTransform, YuvRange, YuvStandardMatrix,
};

const BITS: u32 = 150;
const FORWARD_PRECISION: u32 = 8;
const INVERSE_PRECISION: u32 = 6;

fn float(v: f32) -> Float {
    Float::with_val(BITS, v)
}

fn to_fixed(v: Float, precision: u32) -> i32 {
    (v * float((1 << precision) as f32))
        .to_i32_saturating_round(Round::Nearest)
        .unwrap_or_default()
}

fn get_forward_coeffs_integral(
    kr: f32,
    kb: f32,
    bit_depth: u32,
    range: YuvRange,
) -> CbCrForwardTransform<i32> {
    let kg = || float(1.0f32) - float(kr) - float(kb);
    let chroma_range = get_yuv_range(bit_depth, range);
    let max_colors = || float(((1 << bit_depth) - 1) as f32);
    let luma = || float(chroma_range.range_y as f32) / max_colors();
    let chroma = || float(chroma_range.range_uv as f32) / max_colors();

    let q = |v: Float| to_fixed(v, FORWARD_PRECISION);

    CbCrForwardTransform {
        yr: q(float(kr) * luma()),
        yg: q(kg() * luma()),
        yb: q(float(kb) * luma()),
        cb_r: q(float(-0.5f32) * float(kr) / (float(1f32) - float(kb)) * chroma()),
        cb_g: q(float(-0.5f32) * kg() / (float(1f32) - float(kb)) * chroma()),
        cb_b: q(float(0.5f32) * chroma()),
        cr_r: q(float(0.5f32) * chroma()),
        cr_g: q(float(-0.5f32) * kg() / (float(1f32) - float(kr)) * chroma()),
        cr_b: q(float(-0.5f32) * float(kb) / (float(1f32) - float(kr)) * chroma()),
    }
}

fn get_inverse_transform_integral(
    kr: f32,
    kb: f32,
    bit_depth: u32,
    range: YuvRange,
) -> CbCrInverseTransform<i32> {
    let kg = || float(1.0f32) - float(kr) - float(kb);
    let chroma_range = get_yuv_range(bit_depth, range);
    let max_colors = || float(((1 << bit_depth) - 1) as f32);
    let range_uv = || max_colors() / float(chroma_range.range_uv as f32);
    let y_coef = max_colors() / float(chroma_range.range_y as f32);
    let cr_coeff = (2f32 * (float(1f32) - float(kr))) * range_uv();
    let cb_coeff = (2f32 * (float(1f32) - float(kb))) * range_uv();
    let g_coeff_1 = (2f32 * ((float(1f32) - float(kr)) * float(kr) / kg())) * range_uv();
    let g_coeff_2 = (2f32 * ((float(1f32) - float(kb)) * float(kb) / kg())) * range_uv();

    let q = |v: Float| to_fixed(v, INVERSE_PRECISION);
    CbCrInverseTransform::new(
        q(y_coef),
        q(cr_coeff),
        q(cb_coeff),
        q(g_coeff_1),
        q(g_coeff_2),
    )
}

fn main() {
    let matrices = [
        YuvStandardMatrix::Bt601,
        YuvStandardMatrix::Bt709,
        YuvStandardMatrix::Bt2020,
        YuvStandardMatrix::Smpte240,
        YuvStandardMatrix::Bt470_6,
    ];
    let mut mismatches = 0usize;
    for matrix in matrices {
        let kr_kb = get_kr_kb(matrix);
        for range in [YuvRange::Limited, YuvRange::Full] {
            for bit_depth in [8u32, 10, 12, 16] {
                let chroma_range = get_yuv_range(bit_depth, range);
                let max_colors = (1u32 << bit_depth) - 1;

                let precise_forward =
                    get_forward_coeffs_integral(kr_kb.kr, kr_kb.kb, bit_depth, range);
                let precise_inverse =
                    get_inverse_transform_integral(kr_kb.kr, kr_kb.kb, bit_depth, range);

                let Ok(forward) = get_forward_transform(
                    max_colors,
                    chroma_range.range_y,
                    chroma_range.range_uv,
                    kr_kb.kr,
                    kr_kb.kb,
                ) else {
                    continue;
                };
                let Ok(inverse) = get_inverse_transform(
                    max_colors,
                    chroma_range.range_y,
                    chroma_range.range_uv,
                    kr_kb.kr,
                    kr_kb.kb,
                ) else {
                    continue;
                };
                let forward = forward.to_integers(FORWARD_PRECISION);
                let inverse = inverse.to_integers(INVERSE_PRECISION);

                println!("{:?} {:?} {}-bit", matrix, range, bit_depth);
                println!("  forward {:?}", precise_forward);
                println!("  inverse {:?}", precise_inverse);
                if forward != precise_forward {
                    mismatches += 1;
                    println!("  crate forward differs: {:?}", forward);
                }
                if inverse != precise_inverse {
                    mismatches += 1;
                    println!("  crate inverse differs: {:?}", inverse);
                }
            }
        }
    }
    println!("{} tables differ from the arbitrary precision derivation", mismatches);
}
