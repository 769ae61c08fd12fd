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
use crate::yuv_support::{
    CbCrForwardTransform, CbCrInverseTransform, YuvChromaRange, YuvChromaSubsampling,
};

/// Progress of a vectorized row kernel: `cx` luma pixels and `ux` chroma samples were written.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub(crate) struct ProcessedOffset {
    pub cx: usize,
    pub ux: usize,
}

/// Block of source pixels averaged into one chroma sample by a single row pass.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum ChromaBlock {
    B1x1 = 0,
    B2x1 = 1,
    B2x2 = 2,
    B4x1 = 3,
}

impl From<u8> for ChromaBlock {
    #[inline(always)]
    fn from(value: u8) -> Self {
        match value {
            0 => ChromaBlock::B1x1,
            1 => ChromaBlock::B2x1,
            2 => ChromaBlock::B2x2,
            3 => ChromaBlock::B4x1,
            _ => {
                unimplemented!("Unknown value")
            }
        }
    }
}

impl ChromaBlock {
    /// Row pass for `subsampling`; 4:1:0 averages four columns on every fourth row only
    pub(crate) const fn for_subsampling(subsampling: YuvChromaSubsampling) -> Option<ChromaBlock> {
        match subsampling {
            YuvChromaSubsampling::Yuv400 => None,
            YuvChromaSubsampling::Yuv444 => Some(ChromaBlock::B1x1),
            YuvChromaSubsampling::Yuv422 => Some(ChromaBlock::B2x1),
            YuvChromaSubsampling::Yuv420 => Some(ChromaBlock::B2x2),
            YuvChromaSubsampling::Yuv411 | YuvChromaSubsampling::Yuv410 => {
                Some(ChromaBlock::B4x1)
            }
        }
    }

    #[inline(always)]
    pub(crate) const fn columns(&self) -> usize {
        match self {
            ChromaBlock::B1x1 => 1,
            ChromaBlock::B2x1 | ChromaBlock::B2x2 => 2,
            ChromaBlock::B4x1 => 4,
        }
    }

    #[inline(always)]
    pub(crate) const fn uses_next_row(&self) -> bool {
        matches!(self, ChromaBlock::B2x2)
    }

    /// log2 of the number of averaged samples
    #[inline(always)]
    pub(crate) const fn mean_shift(&self) -> u32 {
        match self {
            ChromaBlock::B1x1 => 0,
            ChromaBlock::B2x1 => 1,
            ChromaBlock::B2x2 | ChromaBlock::B4x1 => 2,
        }
    }
}

/// Index of the inverse row kernel replicating each chroma sample `factor` times.
#[inline(always)]
pub(crate) const fn replication_index(factor: usize) -> usize {
    match factor {
        1 => 0,
        2 => 1,
        _ => 2,
    }
}

pub(crate) type LumaRowFn = unsafe fn(
    transform: &CbCrForwardTransform<i32>,
    range: &YuvChromaRange,
    y_plane: &mut [u8],
    rgba: &[u8],
    width: usize,
) -> usize;

/// `rgba1` is the next source row; only 2x2 kernels read it.
pub(crate) type ChromaRowFn = unsafe fn(
    transform: &CbCrForwardTransform<i32>,
    range: &YuvChromaRange,
    u_plane: &mut [u8],
    v_plane: &mut [u8],
    rgba0: &[u8],
    rgba1: &[u8],
    width: usize,
) -> ProcessedOffset;

pub(crate) type InverseRowFn = unsafe fn(
    transform: &CbCrInverseTransform<i32>,
    range: &YuvChromaRange,
    y_plane: &[u8],
    u_plane: &[u8],
    v_plane: &[u8],
    rgba: &mut [u8],
    width: usize,
) -> ProcessedOffset;

/// Vectorized prefix of a forward row; the scalar path finishes whatever is left.
pub(crate) trait ForwardRowHandler<V> {
    fn handle_luma_row(
        &self,
        transform: &CbCrForwardTransform<i32>,
        range: &YuvChromaRange,
        y_plane: &mut [V],
        rgba: &[V],
        width: usize,
    ) -> usize;

    #[allow(clippy::too_many_arguments)]
    fn handle_chroma_row(
        &self,
        transform: &CbCrForwardTransform<i32>,
        range: &YuvChromaRange,
        u_plane: &mut [V],
        v_plane: &mut [V],
        rgba0: &[V],
        rgba1: &[V],
        width: usize,
    ) -> ProcessedOffset;
}

/// Vectorized prefix of an inverse row.
pub(crate) trait InverseRowHandler<V> {
    #[allow(clippy::too_many_arguments)]
    fn handle_row(
        &self,
        transform: &CbCrInverseTransform<i32>,
        range: &YuvChromaRange,
        y_plane: &[V],
        u_plane: &[V],
        v_plane: &[V],
        rgba: &mut [V],
        width: usize,
    ) -> ProcessedOffset;
}

/// Handler for containers without vector kernels, everything goes through the scalar path.
#[derive(Debug, Copy, Clone, Default)]
pub(crate) struct ScalarRows;

impl<V> ForwardRowHandler<V> for ScalarRows {
    fn handle_luma_row(
        &self,
        _: &CbCrForwardTransform<i32>,
        _: &YuvChromaRange,
        _: &mut [V],
        _: &[V],
        _: usize,
    ) -> usize {
        0
    }

    fn handle_chroma_row(
        &self,
        _: &CbCrForwardTransform<i32>,
        _: &YuvChromaRange,
        _: &mut [V],
        _: &mut [V],
        _: &[V],
        _: &[V],
        _: usize,
    ) -> ProcessedOffset {
        ProcessedOffset::default()
    }
}

impl<V> InverseRowHandler<V> for ScalarRows {
    fn handle_row(
        &self,
        _: &CbCrInverseTransform<i32>,
        _: &YuvChromaRange,
        _: &[V],
        _: &[V],
        _: &[V],
        _: &mut [V],
        _: usize,
    ) -> ProcessedOffset {
        ProcessedOffset::default()
    }
}
