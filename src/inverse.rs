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
use crate::dispatch::{Context, RowKernels};
use crate::images::{YuvBiPlanarImage, YuvGrayImage, YuvPlanarImage};
use crate::internals::{replication_index, InverseRowFn, InverseRowHandler, ProcessedOffset};
use crate::numerics::qshr_n;
use crate::yuv_error::{check_bit_depth, check_rgba_destination};
use crate::yuv_support::{
    get_inverse_transform, get_kr_kb, get_yuv_range, CbCrInverseTransform, YuvChromaRange,
    YuvChromaSubsampling, YuvNVOrder, YuvSourceChannels, INVERSE_PRECISION,
};
use crate::{YuvError, YuvRange, YuvStandardMatrix};
use num_traits::AsPrimitive;
use std::fmt::Debug;

/// 8-bit row handler backed by the dispatcher's kernel table.
#[derive(Copy, Clone)]
pub(crate) struct YuvDecoder {
    handler: Option<InverseRowFn>,
}

impl YuvDecoder {
    pub(crate) fn from_kernels(
        kernels: &RowKernels,
        layout: YuvSourceChannels,
        sampling: YuvChromaSubsampling,
    ) -> YuvDecoder {
        let (horizontal, _) = sampling.factors();
        YuvDecoder {
            handler: kernels.inverse[layout as usize][replication_index(horizontal)],
        }
    }

    pub(crate) fn new(layout: YuvSourceChannels, sampling: YuvChromaSubsampling) -> YuvDecoder {
        YuvDecoder::from_kernels(&Context::global().kernels, layout, sampling)
    }
}

impl InverseRowHandler<u8> for YuvDecoder {
    fn handle_row(
        &self,
        transform: &CbCrInverseTransform<i32>,
        range: &YuvChromaRange,
        y_plane: &[u8],
        u_plane: &[u8],
        v_plane: &[u8],
        rgba: &mut [u8],
        width: usize,
    ) -> ProcessedOffset {
        if let Some(handler) = self.handler {
            if transform.fits_8bit_lanes() {
                unsafe {
                    return handler(transform, range, y_plane, u_plane, v_plane, rgba, width);
                }
            }
        }
        ProcessedOffset::default()
    }
}

/// Source of the chroma rows read by the inverse engine.
trait ChromaSource<V> {
    /// Cb and Cr rows for chroma row `cy`, each exactly chroma-width long.
    fn rows(&mut self, cy: usize) -> (&[V], &[V]);
}

struct PlanarSource<'a, V> {
    u_plane: &'a [V],
    u_stride: usize,
    v_plane: &'a [V],
    v_stride: usize,
    chroma_width: usize,
}

impl<V> ChromaSource<V> for PlanarSource<'_, V> {
    fn rows(&mut self, cy: usize) -> (&[V], &[V]) {
        (
            &self.u_plane[cy * self.u_stride..][..self.chroma_width],
            &self.v_plane[cy * self.v_stride..][..self.chroma_width],
        )
    }
}

/// De-interleaves a semi-planar chroma row once per chroma row.
struct InterleavedSource<'a, V> {
    uv_plane: &'a [V],
    uv_stride: usize,
    order: YuvNVOrder,
    u_scratch: Vec<V>,
    v_scratch: Vec<V>,
    current_row: Option<usize>,
}

impl<V: Copy> ChromaSource<V> for InterleavedSource<'_, V> {
    fn rows(&mut self, cy: usize) -> (&[V], &[V]) {
        if self.current_row != Some(cy) {
            let chroma_width = self.u_scratch.len();
            let uv_row = &self.uv_plane[cy * self.uv_stride..][..chroma_width * 2];
            let u_pos = self.order.get_u_position();
            let v_pos = self.order.get_v_position();
            for ((src, u), v) in uv_row
                .chunks_exact(2)
                .zip(self.u_scratch.iter_mut())
                .zip(self.v_scratch.iter_mut())
            {
                *u = src[u_pos];
                *v = src[v_pos];
            }
            self.current_row = Some(cy);
        }
        (&self.u_scratch, &self.v_scratch)
    }
}

/// Constant neutral chroma, turns the color reconstruction into gray expansion.
struct NeutralSource<V> {
    neutral: Vec<V>,
}

impl<V> ChromaSource<V> for NeutralSource<V> {
    fn rows(&mut self, _cy: usize) -> (&[V], &[V]) {
        (&self.neutral, &self.neutral)
    }
}

pub(crate) struct InverseSetup {
    pub(crate) transform: CbCrInverseTransform<i32>,
    pub(crate) chroma_range: YuvChromaRange,
    pub(crate) max_colors: i32,
}

pub(crate) fn inverse_setup(
    bit_depth: u32,
    range: YuvRange,
    matrix: YuvStandardMatrix,
) -> Result<InverseSetup, YuvError> {
    check_bit_depth(bit_depth)?;
    let chroma_range = get_yuv_range(bit_depth, range);
    let kr_kb = get_kr_kb(matrix);
    let max_colors = (1u32 << bit_depth) - 1;
    let transform = get_inverse_transform(
        max_colors,
        chroma_range.range_y,
        chroma_range.range_uv,
        kr_kb.kr,
        kr_kb.kb,
    )?
    .to_integers(INVERSE_PRECISION);
    if !transform.fits_accumulator(max_colors) {
        return Err(YuvError::DegenerateColorMatrix {
            kr: kr_kb.kr,
            kb: kr_kb.kb,
        });
    }
    Ok(InverseSetup {
        transform,
        chroma_range,
        max_colors: max_colors as i32,
    })
}

/// Reconstructs pixels `start_cx..width`, each chroma sample covers `horizontal` pixels.
#[inline(always)]
#[allow(clippy::too_many_arguments)]
fn decode_row<V, const DESTINATION_CHANNELS: u8>(
    setup: &InverseSetup,
    horizontal: usize,
    y_row: &[V],
    u_row: &[V],
    v_row: &[V],
    rgba: &mut [V],
    start_cx: usize,
) where
    V: Copy + AsPrimitive<i32>,
    i32: AsPrimitive<V>,
{
    let destination_channels: YuvSourceChannels = DESTINATION_CHANNELS.into();
    let channels = destination_channels.get_channels_count();
    let transform = &setup.transform;
    let bias_y = setup.chroma_range.bias_y as i32;
    let bias_uv = setup.chroma_range.bias_uv as i32;
    let max_colors = setup.max_colors;

    for (x, (&y_src, dst)) in y_row
        .iter()
        .zip(rgba.chunks_exact_mut(channels))
        .enumerate()
        .skip(start_cx)
    {
        let y_value: i32 = y_src.as_();
        let cb_value: i32 = u_row[x / horizontal].as_();
        let cr_value: i32 = v_row[x / horizontal].as_();
        let cb = cb_value - bias_uv;
        let cr = cr_value - bias_uv;
        let light = (y_value - bias_y) * transform.y_coef;

        let r = qshr_n::<{ INVERSE_PRECISION as i32 }>(light + transform.cr_coef * cr, max_colors);
        let b = qshr_n::<{ INVERSE_PRECISION as i32 }>(light + transform.cb_coef * cb, max_colors);
        let g = qshr_n::<{ INVERSE_PRECISION as i32 }>(
            light - transform.g_coeff_1 * cr - transform.g_coeff_2 * cb,
            max_colors,
        );

        dst[destination_channels.get_r_channel_offset()] = r.as_();
        dst[destination_channels.get_g_channel_offset()] = g.as_();
        dst[destination_channels.get_b_channel_offset()] = b.as_();
        if destination_channels.has_alpha() {
            dst[destination_channels.get_a_channel_offset()] = max_colors.as_();
        }
    }
}

/// Chroma row `y / vertical` is held across `vertical` luma rows.
#[allow(clippy::too_many_arguments)]
fn decode_rows<V, const DESTINATION_CHANNELS: u8>(
    setup: &InverseSetup,
    sampling: YuvChromaSubsampling,
    handler: &impl InverseRowHandler<V>,
    y_plane: &[V],
    y_stride: usize,
    chroma: &mut impl ChromaSource<V>,
    rgba: &mut [V],
    rgba_stride: usize,
    width: usize,
    height: usize,
) where
    V: Copy + AsPrimitive<i32>,
    i32: AsPrimitive<V>,
{
    let destination_channels: YuvSourceChannels = DESTINATION_CHANNELS.into();
    let row_len = width * destination_channels.get_channels_count();
    let (horizontal, vertical) = sampling.factors();

    for y in 0..height {
        let y_row = &y_plane[y * y_stride..][..width];
        let (u_row, v_row) = chroma.rows(y / vertical);
        let rgba_row = &mut rgba[y * rgba_stride..][..row_len];
        let offset = handler.handle_row(
            &setup.transform,
            &setup.chroma_range,
            y_row,
            u_row,
            v_row,
            rgba_row,
            width,
        );
        decode_row::<V, DESTINATION_CHANNELS>(
            setup, horizontal, y_row, u_row, v_row, rgba_row, offset.cx,
        );
    }
}

/// Converts a planar image with `SAMPLING` chroma into packed RGB family data.
pub(crate) fn yuv_to_rgbx<V, const DESTINATION_CHANNELS: u8, const SAMPLING: u8>(
    planar_image: &YuvPlanarImage<V>,
    rgba: &mut [V],
    rgba_stride: u32,
    bit_depth: u32,
    range: YuvRange,
    matrix: YuvStandardMatrix,
    handler: &impl InverseRowHandler<V>,
) -> Result<(), YuvError>
where
    V: Copy + Debug + AsPrimitive<i32>,
    i32: AsPrimitive<V>,
{
    let destination_channels: YuvSourceChannels = DESTINATION_CHANNELS.into();
    let sampling: YuvChromaSubsampling = SAMPLING.into();
    planar_image.check_constraints(sampling)?;
    check_rgba_destination(
        rgba,
        rgba_stride,
        planar_image.width,
        planar_image.height,
        destination_channels.get_channels_count(),
    )?;
    let setup = inverse_setup(bit_depth, range, matrix)?;

    let width = planar_image.width as usize;
    let height = planar_image.height as usize;
    tracing::trace!(width, height, ?sampling, ?destination_channels, "planar yuv to rgb");

    let mut chroma = PlanarSource {
        u_plane: planar_image.u_plane,
        u_stride: planar_image.u_stride as usize,
        v_plane: planar_image.v_plane,
        v_stride: planar_image.v_stride as usize,
        chroma_width: sampling.chroma_width(width),
    };
    decode_rows::<V, DESTINATION_CHANNELS>(
        &setup,
        sampling,
        handler,
        planar_image.y_plane,
        planar_image.y_stride as usize,
        &mut chroma,
        rgba,
        rgba_stride as usize,
        width,
        height,
    );
    Ok(())
}

/// Converts a semi-planar image, chroma interleaved in `UV_ORDER`, into packed RGB family data.
pub(crate) fn yuv_nv_to_rgbx<
    V,
    const DESTINATION_CHANNELS: u8,
    const SAMPLING: u8,
    const UV_ORDER: u8,
>(
    bi_planar_image: &YuvBiPlanarImage<V>,
    rgba: &mut [V],
    rgba_stride: u32,
    bit_depth: u32,
    range: YuvRange,
    matrix: YuvStandardMatrix,
    handler: &impl InverseRowHandler<V>,
) -> Result<(), YuvError>
where
    V: Copy + Debug + Default + AsPrimitive<i32>,
    i32: AsPrimitive<V>,
{
    let destination_channels: YuvSourceChannels = DESTINATION_CHANNELS.into();
    let sampling: YuvChromaSubsampling = SAMPLING.into();
    let order: YuvNVOrder = UV_ORDER.into();
    bi_planar_image.check_constraints(sampling)?;
    check_rgba_destination(
        rgba,
        rgba_stride,
        bi_planar_image.width,
        bi_planar_image.height,
        destination_channels.get_channels_count(),
    )?;
    let setup = inverse_setup(bit_depth, range, matrix)?;

    let width = bi_planar_image.width as usize;
    let height = bi_planar_image.height as usize;
    tracing::trace!(width, height, ?sampling, ?order, ?destination_channels, "nv to rgb");

    let chroma_width = sampling.chroma_width(width);
    let mut chroma = InterleavedSource {
        uv_plane: bi_planar_image.uv_plane,
        uv_stride: bi_planar_image.uv_stride as usize,
        order,
        u_scratch: vec![V::default(); chroma_width],
        v_scratch: vec![V::default(); chroma_width],
        current_row: None,
    };
    decode_rows::<V, DESTINATION_CHANNELS>(
        &setup,
        sampling,
        handler,
        bi_planar_image.y_plane,
        bi_planar_image.y_stride as usize,
        &mut chroma,
        rgba,
        rgba_stride as usize,
        width,
        height,
    );
    Ok(())
}

/// Expands luma into gray packed RGB family data.
pub(crate) fn y_to_rgbx<V, const DESTINATION_CHANNELS: u8>(
    gray_image: &YuvGrayImage<V>,
    rgba: &mut [V],
    rgba_stride: u32,
    bit_depth: u32,
    range: YuvRange,
    matrix: YuvStandardMatrix,
    handler: &impl InverseRowHandler<V>,
) -> Result<(), YuvError>
where
    V: Copy + Debug + AsPrimitive<i32>,
    i32: AsPrimitive<V>,
{
    let destination_channels: YuvSourceChannels = DESTINATION_CHANNELS.into();
    gray_image.check_constraints()?;
    check_rgba_destination(
        rgba,
        rgba_stride,
        gray_image.width,
        gray_image.height,
        destination_channels.get_channels_count(),
    )?;
    let setup = inverse_setup(bit_depth, range, matrix)?;

    let width = gray_image.width as usize;
    let height = gray_image.height as usize;
    tracing::trace!(width, height, ?destination_channels, "luma to rgb");

    let neutral: V = (setup.chroma_range.bias_uv as i32).as_();
    let mut chroma = NeutralSource {
        neutral: vec![neutral; width],
    };
    decode_rows::<V, DESTINATION_CHANNELS>(
        &setup,
        YuvChromaSubsampling::Yuv400,
        handler,
        gray_image.y_plane,
        gray_image.y_stride as usize,
        &mut chroma,
        rgba,
        rgba_stride as usize,
        width,
        height,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::CpuTarget;
    use crate::internals::ScalarRows;
    use rand::Rng;

    fn random_plane(len: usize) -> Vec<u8> {
        let mut rng = rand::rng();
        (0..len).map(|_| rng.random_range(0..=255u8)).collect()
    }

    fn decode_planar<const DESTINATION_CHANNELS: u8>(
        planar: &YuvPlanarImage<u8>,
        sampling: YuvChromaSubsampling,
        range: YuvRange,
        handler: &impl InverseRowHandler<u8>,
    ) -> Vec<u8> {
        let channels = YuvSourceChannels::from(DESTINATION_CHANNELS).get_channels_count();
        let stride = planar.width as usize * channels;
        let mut rgba = vec![0u8; stride * planar.height as usize];
        macro_rules! run {
            ($sampling: expr) => {
                yuv_to_rgbx::<u8, DESTINATION_CHANNELS, { $sampling as u8 }>(
                    planar,
                    &mut rgba,
                    stride as u32,
                    8,
                    range,
                    YuvStandardMatrix::Bt2020,
                    handler,
                )
            };
        }
        match sampling {
            YuvChromaSubsampling::Yuv444 => run!(YuvChromaSubsampling::Yuv444),
            YuvChromaSubsampling::Yuv422 => run!(YuvChromaSubsampling::Yuv422),
            YuvChromaSubsampling::Yuv420 => run!(YuvChromaSubsampling::Yuv420),
            YuvChromaSubsampling::Yuv411 => run!(YuvChromaSubsampling::Yuv411),
            YuvChromaSubsampling::Yuv410 => run!(YuvChromaSubsampling::Yuv410),
            YuvChromaSubsampling::Yuv400 => unreachable!(),
        }
        .unwrap();
        rgba
    }

    fn assert_targets_match_scalar<const DESTINATION_CHANNELS: u8>() {
        let layout = YuvSourceChannels::from(DESTINATION_CHANNELS);
        let (width, height) = (77u32, 5u32);
        let samplings = [
            YuvChromaSubsampling::Yuv444,
            YuvChromaSubsampling::Yuv422,
            YuvChromaSubsampling::Yuv420,
            YuvChromaSubsampling::Yuv411,
            YuvChromaSubsampling::Yuv410,
        ];
        for sampling in samplings {
            let chroma_width = sampling.chroma_width(width as usize);
            let chroma_height = sampling.chroma_height(height as usize);
            let y_plane = random_plane((width * height) as usize);
            let u_plane = random_plane(chroma_width * chroma_height);
            let v_plane = random_plane(chroma_width * chroma_height);
            let planar = YuvPlanarImage {
                y_plane: &y_plane,
                y_stride: width,
                u_plane: &u_plane,
                u_stride: chroma_width as u32,
                v_plane: &v_plane,
                v_stride: chroma_width as u32,
                width,
                height,
            };
            for range in [YuvRange::Limited, YuvRange::Full] {
                let reference =
                    decode_planar::<DESTINATION_CHANNELS>(&planar, sampling, range, &ScalarRows);
                for target in CpuTarget::PREFERENCE {
                    let Some(kernels) = RowKernels::for_target(target) else {
                        continue;
                    };
                    let vectorized = decode_planar::<DESTINATION_CHANNELS>(
                        &planar,
                        sampling,
                        range,
                        &YuvDecoder::from_kernels(&kernels, layout, sampling),
                    );
                    assert_eq!(
                        reference, vectorized,
                        "{:?} {:?} {:?} {:?}",
                        target, layout, sampling, range
                    );
                }
            }
        }
    }

    #[test]
    fn test_vector_rows_match_scalar() {
        assert_targets_match_scalar::<{ YuvSourceChannels::Rgb as u8 }>();
        assert_targets_match_scalar::<{ YuvSourceChannels::Bgr as u8 }>();
        assert_targets_match_scalar::<{ YuvSourceChannels::Rgba as u8 }>();
        assert_targets_match_scalar::<{ YuvSourceChannels::Bgra as u8 }>();
        assert_targets_match_scalar::<{ YuvSourceChannels::Argb as u8 }>();
        assert_targets_match_scalar::<{ YuvSourceChannels::Abgr as u8 }>();
    }

    #[test]
    fn test_both_saturation_bounds_near_top_of_range() {
        // Bright luma with extreme chroma overshoots the top under BT.2020
        // while dark luma with opposite chroma undershoots zero
        let setup = inverse_setup(8, YuvRange::Limited, YuvStandardMatrix::Bt2020).unwrap();
        let y_row = [235u8, 16, 240, 255];
        let u_row = [255u8, 0, 255, 128];
        let v_row = [255u8, 0, 0, 255];
        let mut rgb = [0u8; 12];
        decode_row::<u8, { YuvSourceChannels::Rgb as u8 }>(
            &setup, 1, &y_row, &u_row, &v_row, &mut rgb, 0,
        );
        assert_eq!(rgb[0], 255);
        assert_eq!(rgb[2], 255);
        assert_eq!(rgb[3], 0);
        assert_eq!(rgb[5], 0);
        assert!(rgb[4] > 0);
        assert_eq!(rgb[9], 255);

        for target in CpuTarget::PREFERENCE {
            let Some(kernels) = RowKernels::for_target(target) else {
                continue;
            };
            let width = 48;
            let y_plane = (0..width).map(|x| 200 + (x % 56) as u8).collect::<Vec<_>>();
            let u_plane = (0..width).map(|x| 255 - (x % 3) as u8).collect::<Vec<_>>();
            let v_plane = (0..width).map(|x| (x % 2) as u8 * 255).collect::<Vec<_>>();
            let planar = YuvPlanarImage {
                y_plane: &y_plane,
                y_stride: width as u32,
                u_plane: &u_plane,
                u_stride: width as u32,
                v_plane: &v_plane,
                v_stride: width as u32,
                width: width as u32,
                height: 1,
            };
            let reference = decode_planar::<{ YuvSourceChannels::Rgba as u8 }>(
                &planar,
                YuvChromaSubsampling::Yuv444,
                YuvRange::Limited,
                &ScalarRows,
            );
            let vectorized = decode_planar::<{ YuvSourceChannels::Rgba as u8 }>(
                &planar,
                YuvChromaSubsampling::Yuv444,
                YuvRange::Limited,
                &YuvDecoder::from_kernels(
                    &kernels,
                    YuvSourceChannels::Rgba,
                    YuvChromaSubsampling::Yuv444,
                ),
            );
            assert_eq!(reference, vectorized, "{:?}", target);
        }
    }

    #[test]
    fn test_chroma_is_replicated_not_interpolated() {
        let setup = inverse_setup(8, YuvRange::Full, YuvStandardMatrix::Bt601).unwrap();
        let y_row = [128u8; 8];
        let u_row = [128u8, 200];
        let v_row = [40u8, 128];
        let mut rgb = [0u8; 8 * 3];
        decode_row::<u8, { YuvSourceChannels::Rgb as u8 }>(
            &setup, 4, &y_row, &u_row, &v_row, &mut rgb, 0,
        );
        for px in rgb[..12].chunks_exact(3) {
            assert_eq!(px, &rgb[..3]);
        }
        for px in rgb[12..].chunks_exact(3) {
            assert_eq!(px, &rgb[12..15]);
        }
        assert_ne!(&rgb[..3], &rgb[12..15]);
    }

    #[test]
    fn test_setup_rejects_degenerate_matrix() {
        assert!(matches!(
            inverse_setup(10, YuvRange::Full, YuvStandardMatrix::Custom(0.25, 0.75)),
            Err(YuvError::DegenerateColorMatrix { .. })
        ));
        assert!(matches!(
            inverse_setup(8, YuvRange::Limited, YuvStandardMatrix::Custom(0.058, 0.942)),
            Err(YuvError::DegenerateColorMatrix { .. })
        ));
        let skewed = YuvStandardMatrix::Custom(0.5, 0.4998);
        assert!(inverse_setup(8, YuvRange::Full, skewed).is_ok());
        assert!(matches!(
            inverse_setup(16, YuvRange::Full, skewed),
            Err(YuvError::DegenerateColorMatrix { .. })
        ));
    }
}
