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
use crate::images::{YuvBiPlanarImageMut, YuvGrayImageMut, YuvPlanarImageMut};
use crate::internals::{ChromaBlock, ChromaRowFn, ForwardRowHandler, LumaRowFn, ProcessedOffset};
use crate::numerics::{block_mean, qshr_n};
use crate::yuv_error::{check_bit_depth, check_rgba_source};
use crate::yuv_support::{
    forward_bias, get_forward_transform, get_kr_kb, get_yuv_range, CbCrForwardTransform,
    ToIntegerTransform, YuvChromaRange, YuvChromaSubsampling, YuvNVOrder, YuvSourceChannels,
    FORWARD_PRECISION,
};
use crate::{YuvError, YuvRange, YuvStandardMatrix};
use num_traits::AsPrimitive;
use std::fmt::Debug;

/// 8-bit row handler backed by the dispatcher's kernel table.
#[derive(Copy, Clone)]
pub(crate) struct RgbEncoder {
    luma: Option<LumaRowFn>,
    chroma: Option<ChromaRowFn>,
}

impl RgbEncoder {
    pub(crate) fn from_kernels(
        kernels: &RowKernels,
        layout: YuvSourceChannels,
        sampling: YuvChromaSubsampling,
    ) -> RgbEncoder {
        let idx = layout as usize;
        RgbEncoder {
            luma: kernels.luma[idx],
            chroma: ChromaBlock::for_subsampling(sampling)
                .and_then(|block| kernels.chroma[idx][block as usize]),
        }
    }

    pub(crate) fn new(layout: YuvSourceChannels, sampling: YuvChromaSubsampling) -> RgbEncoder {
        RgbEncoder::from_kernels(&Context::global().kernels, layout, sampling)
    }
}

impl ForwardRowHandler<u8> for RgbEncoder {
    fn handle_luma_row(
        &self,
        transform: &CbCrForwardTransform<i32>,
        range: &YuvChromaRange,
        y_plane: &mut [u8],
        rgba: &[u8],
        width: usize,
    ) -> usize {
        if let Some(handler) = self.luma {
            if transform.fits_i16_lanes() {
                unsafe {
                    return handler(transform, range, y_plane, rgba, width);
                }
            }
        }
        0
    }

    fn handle_chroma_row(
        &self,
        transform: &CbCrForwardTransform<i32>,
        range: &YuvChromaRange,
        u_plane: &mut [u8],
        v_plane: &mut [u8],
        rgba0: &[u8],
        rgba1: &[u8],
        width: usize,
    ) -> ProcessedOffset {
        if let Some(handler) = self.chroma {
            if transform.fits_i16_lanes() {
                unsafe {
                    return handler(transform, range, u_plane, v_plane, rgba0, rgba1, width);
                }
            }
        }
        ProcessedOffset::default()
    }
}

/// Destination of the chroma rows produced by the forward engine.
trait ChromaRows<V> {
    /// Cb and Cr rows for chroma row `cy`, each exactly chroma-width long.
    fn rows(&mut self, cy: usize) -> (&mut [V], &mut [V]);

    fn commit(&mut self, _cy: usize) {}
}

struct PlanarChroma<'a, V> {
    u_plane: &'a mut [V],
    u_stride: usize,
    v_plane: &'a mut [V],
    v_stride: usize,
    chroma_width: usize,
}

impl<V> ChromaRows<V> for PlanarChroma<'_, V> {
    fn rows(&mut self, cy: usize) -> (&mut [V], &mut [V]) {
        (
            &mut self.u_plane[cy * self.u_stride..][..self.chroma_width],
            &mut self.v_plane[cy * self.v_stride..][..self.chroma_width],
        )
    }
}

/// Chroma is produced into scratch rows and interleaved on commit.
struct InterleavedChroma<'a, V> {
    uv_plane: &'a mut [V],
    uv_stride: usize,
    order: YuvNVOrder,
    u_scratch: Vec<V>,
    v_scratch: Vec<V>,
}

impl<V: Copy> ChromaRows<V> for InterleavedChroma<'_, V> {
    fn rows(&mut self, _cy: usize) -> (&mut [V], &mut [V]) {
        (&mut self.u_scratch, &mut self.v_scratch)
    }

    fn commit(&mut self, cy: usize) {
        let chroma_width = self.u_scratch.len();
        let uv_row = &mut self.uv_plane[cy * self.uv_stride..][..chroma_width * 2];
        let u_pos = self.order.get_u_position();
        let v_pos = self.order.get_v_position();
        for ((dst, &u), &v) in uv_row
            .chunks_exact_mut(2)
            .zip(self.u_scratch.iter())
            .zip(self.v_scratch.iter())
        {
            dst[u_pos] = u;
            dst[v_pos] = v;
        }
    }
}

struct NoChroma;

impl<V> ChromaRows<V> for NoChroma {
    fn rows(&mut self, _cy: usize) -> (&mut [V], &mut [V]) {
        (&mut [], &mut [])
    }
}

pub(crate) struct ForwardSetup {
    pub(crate) transform: CbCrForwardTransform<i32>,
    pub(crate) chroma_range: YuvChromaRange,
    pub(crate) max_colors: i32,
}

pub(crate) fn forward_setup(
    bit_depth: u32,
    range: YuvRange,
    matrix: YuvStandardMatrix,
) -> Result<ForwardSetup, YuvError> {
    check_bit_depth(bit_depth)?;
    let chroma_range = get_yuv_range(bit_depth, range);
    let kr_kb = get_kr_kb(matrix);
    let max_colors = (1u32 << bit_depth) - 1;
    let transform = get_forward_transform(
        max_colors,
        chroma_range.range_y,
        chroma_range.range_uv,
        kr_kb.kr,
        kr_kb.kb,
    )?
    .to_integers(FORWARD_PRECISION);
    if !transform.fits_accumulator(max_colors) {
        return Err(YuvError::DegenerateColorMatrix {
            kr: kr_kb.kr,
            kb: kr_kb.kb,
        });
    }
    Ok(ForwardSetup {
        transform,
        chroma_range,
        max_colors: max_colors as i32,
    })
}

#[inline(always)]
fn encode_luma_row<V, const ORIGIN_CHANNELS: u8>(
    setup: &ForwardSetup,
    y_row: &mut [V],
    rgba: &[V],
    start_cx: usize,
) where
    V: Copy + AsPrimitive<i32>,
    i32: AsPrimitive<V>,
{
    let source_channels: YuvSourceChannels = ORIGIN_CHANNELS.into();
    let channels = source_channels.get_channels_count();
    let transform = &setup.transform;
    let bias_y = forward_bias(setup.chroma_range.bias_y);

    for (y_dst, px) in y_row[start_cx..]
        .iter_mut()
        .zip(rgba[start_cx * channels..].chunks_exact(channels))
    {
        let r: i32 = px[source_channels.get_r_channel_offset()].as_();
        let g: i32 = px[source_channels.get_g_channel_offset()].as_();
        let b: i32 = px[source_channels.get_b_channel_offset()].as_();
        let y = r * transform.yr + g * transform.yg + b * transform.yb + bias_y;
        *y_dst = qshr_n::<{ FORWARD_PRECISION as i32 }>(y, setup.max_colors).as_();
    }
}

/// Box averages every chroma block of the row from `start.ux` on,
/// columns past the row end reuse the last pixel.
#[inline(always)]
#[allow(clippy::too_many_arguments)]
fn encode_chroma_row<V, const ORIGIN_CHANNELS: u8>(
    setup: &ForwardSetup,
    block: ChromaBlock,
    u_row: &mut [V],
    v_row: &mut [V],
    rgba0: &[V],
    rgba1: &[V],
    width: usize,
    start: ProcessedOffset,
) where
    V: Copy + AsPrimitive<i32>,
    i32: AsPrimitive<V>,
{
    let source_channels: YuvSourceChannels = ORIGIN_CHANNELS.into();
    let channels = source_channels.get_channels_count();
    let r_offset = source_channels.get_r_channel_offset();
    let g_offset = source_channels.get_g_channel_offset();
    let b_offset = source_channels.get_b_channel_offset();
    let transform = &setup.transform;
    let bias_uv = forward_bias(setup.chroma_range.bias_uv);
    let columns = block.columns();
    let shift = block.mean_shift();

    for (ux, (u_dst, v_dst)) in u_row
        .iter_mut()
        .zip(v_row.iter_mut())
        .enumerate()
        .skip(start.ux)
    {
        let (mut r, mut g, mut b) = (0i32, 0i32, 0i32);
        for i in 0..columns {
            let x = (ux * columns + i).min(width - 1) * channels;
            let px = &rgba0[x..x + channels];
            r += px[r_offset].as_();
            g += px[g_offset].as_();
            b += px[b_offset].as_();
            if block.uses_next_row() {
                let px = &rgba1[x..x + channels];
                r += px[r_offset].as_();
                g += px[g_offset].as_();
                b += px[b_offset].as_();
            }
        }
        let r = block_mean(r, shift);
        let g = block_mean(g, shift);
        let b = block_mean(b, shift);
        let cb = r * transform.cb_r + g * transform.cb_g + b * transform.cb_b + bias_uv;
        let cr = r * transform.cr_r + g * transform.cr_g + b * transform.cr_b + bias_uv;
        *u_dst = qshr_n::<{ FORWARD_PRECISION as i32 }>(cb, setup.max_colors).as_();
        *v_dst = qshr_n::<{ FORWARD_PRECISION as i32 }>(cr, setup.max_colors).as_();
    }
}

/// Runs luma on every row and chroma on the first row of every chroma block.
///
/// 4:2:0 averages a row with the next one (the last row pairs with itself),
/// 4:1:0 takes rows `0, 4, 8, ...` so a trailing partial block still gets its chroma row.
#[allow(clippy::too_many_arguments)]
fn encode_rows<V, const ORIGIN_CHANNELS: u8>(
    setup: &ForwardSetup,
    sampling: YuvChromaSubsampling,
    handler: &impl ForwardRowHandler<V>,
    y_plane: &mut [V],
    y_stride: usize,
    chroma: &mut impl ChromaRows<V>,
    rgba: &[V],
    rgba_stride: usize,
    width: usize,
    height: usize,
) where
    V: Copy + AsPrimitive<i32>,
    i32: AsPrimitive<V>,
{
    let source_channels: YuvSourceChannels = ORIGIN_CHANNELS.into();
    let row_len = width * source_channels.get_channels_count();
    let block = ChromaBlock::for_subsampling(sampling);
    let (_, vertical) = sampling.factors();

    for y in 0..height {
        let rgba0 = &rgba[y * rgba_stride..][..row_len];
        let y_row = &mut y_plane[y * y_stride..][..width];
        let cx = handler.handle_luma_row(
            &setup.transform,
            &setup.chroma_range,
            y_row,
            rgba0,
            width,
        );
        encode_luma_row::<V, ORIGIN_CHANNELS>(setup, y_row, rgba0, cx);

        let Some(block) = block else {
            continue;
        };
        if y % vertical != 0 {
            continue;
        }
        let rgba1 = if block.uses_next_row() {
            let next = (y + 1).min(height - 1);
            &rgba[next * rgba_stride..][..row_len]
        } else {
            rgba0
        };
        let cy = y / vertical;
        let (u_row, v_row) = chroma.rows(cy);
        let offset = handler.handle_chroma_row(
            &setup.transform,
            &setup.chroma_range,
            u_row,
            v_row,
            rgba0,
            rgba1,
            width,
        );
        encode_chroma_row::<V, ORIGIN_CHANNELS>(
            setup, block, u_row, v_row, rgba0, rgba1, width, offset,
        );
        chroma.commit(cy);
    }
}

/// Converts packed RGB family data into a planar image with `SAMPLING` chroma.
pub(crate) fn rgbx_to_yuv<V, const ORIGIN_CHANNELS: u8, const SAMPLING: u8>(
    planar_image: &mut YuvPlanarImageMut<V>,
    rgba: &[V],
    rgba_stride: u32,
    bit_depth: u32,
    range: YuvRange,
    matrix: YuvStandardMatrix,
    handler: &impl ForwardRowHandler<V>,
) -> Result<(), YuvError>
where
    V: Copy + Debug + AsPrimitive<i32>,
    i32: AsPrimitive<V>,
{
    let source_channels: YuvSourceChannels = ORIGIN_CHANNELS.into();
    let sampling: YuvChromaSubsampling = SAMPLING.into();
    planar_image.check_constraints(sampling)?;
    check_rgba_source(
        rgba,
        rgba_stride,
        planar_image.width,
        planar_image.height,
        source_channels.get_channels_count(),
    )?;
    let setup = forward_setup(bit_depth, range, matrix)?;

    let width = planar_image.width as usize;
    let height = planar_image.height as usize;
    tracing::trace!(width, height, ?sampling, ?source_channels, "rgb to planar yuv");

    let mut chroma = PlanarChroma {
        u_plane: planar_image.u_plane.borrow_mut(),
        u_stride: planar_image.u_stride as usize,
        v_plane: planar_image.v_plane.borrow_mut(),
        v_stride: planar_image.v_stride as usize,
        chroma_width: sampling.chroma_width(width),
    };
    encode_rows::<V, ORIGIN_CHANNELS>(
        &setup,
        sampling,
        handler,
        planar_image.y_plane.borrow_mut(),
        planar_image.y_stride as usize,
        &mut chroma,
        rgba,
        rgba_stride as usize,
        width,
        height,
    );
    Ok(())
}

/// Converts packed RGB family data into a semi-planar image, chroma interleaved in `UV_ORDER`.
pub(crate) fn rgbx_to_nv<V, const ORIGIN_CHANNELS: u8, const SAMPLING: u8, const UV_ORDER: u8>(
    bi_planar_image: &mut YuvBiPlanarImageMut<V>,
    rgba: &[V],
    rgba_stride: u32,
    bit_depth: u32,
    range: YuvRange,
    matrix: YuvStandardMatrix,
    handler: &impl ForwardRowHandler<V>,
) -> Result<(), YuvError>
where
    V: Copy + Debug + Default + AsPrimitive<i32>,
    i32: AsPrimitive<V>,
{
    let source_channels: YuvSourceChannels = ORIGIN_CHANNELS.into();
    let sampling: YuvChromaSubsampling = SAMPLING.into();
    let order: YuvNVOrder = UV_ORDER.into();
    bi_planar_image.check_constraints(sampling)?;
    check_rgba_source(
        rgba,
        rgba_stride,
        bi_planar_image.width,
        bi_planar_image.height,
        source_channels.get_channels_count(),
    )?;
    let setup = forward_setup(bit_depth, range, matrix)?;

    let width = bi_planar_image.width as usize;
    let height = bi_planar_image.height as usize;
    tracing::trace!(width, height, ?sampling, ?order, ?source_channels, "rgb to nv");

    let chroma_width = sampling.chroma_width(width);
    let mut chroma = InterleavedChroma {
        uv_plane: bi_planar_image.uv_plane.borrow_mut(),
        uv_stride: bi_planar_image.uv_stride as usize,
        order,
        u_scratch: vec![V::default(); chroma_width],
        v_scratch: vec![V::default(); chroma_width],
    };
    encode_rows::<V, ORIGIN_CHANNELS>(
        &setup,
        sampling,
        handler,
        bi_planar_image.y_plane.borrow_mut(),
        bi_planar_image.y_stride as usize,
        &mut chroma,
        rgba,
        rgba_stride as usize,
        width,
        height,
    );
    Ok(())
}

/// Converts packed RGB family data into luma only.
pub(crate) fn rgbx_to_y<V, const ORIGIN_CHANNELS: u8>(
    gray_image: &mut YuvGrayImageMut<V>,
    rgba: &[V],
    rgba_stride: u32,
    bit_depth: u32,
    range: YuvRange,
    matrix: YuvStandardMatrix,
    handler: &impl ForwardRowHandler<V>,
) -> Result<(), YuvError>
where
    V: Copy + Debug + AsPrimitive<i32>,
    i32: AsPrimitive<V>,
{
    let source_channels: YuvSourceChannels = ORIGIN_CHANNELS.into();
    gray_image.check_constraints()?;
    check_rgba_source(
        rgba,
        rgba_stride,
        gray_image.width,
        gray_image.height,
        source_channels.get_channels_count(),
    )?;
    let setup = forward_setup(bit_depth, range, matrix)?;

    let width = gray_image.width as usize;
    let height = gray_image.height as usize;
    tracing::trace!(width, height, ?source_channels, "rgb to luma");

    encode_rows::<V, ORIGIN_CHANNELS>(
        &setup,
        YuvChromaSubsampling::Yuv400,
        handler,
        gray_image.y_plane.borrow_mut(),
        gray_image.y_stride as usize,
        &mut NoChroma,
        rgba,
        rgba_stride as usize,
        width,
        height,
    );
    Ok(())
}
