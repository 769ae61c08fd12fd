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
use crate::yuv_error::{check_chroma_channel, check_interleaved_chroma_channel, check_y8_channel};
use crate::yuv_support::YuvChromaSubsampling;
use crate::YuvError;
use std::fmt::Debug;

/// Plane storage of a writable image, caller owned or allocated by `alloc`
#[derive(Debug)]
pub enum BufferStoreMut<'a, T: Copy + Debug> {
    Borrowed(&'a mut [T]),
    Owned(Vec<T>),
}

impl<T: Copy + Debug> BufferStoreMut<'_, T> {
    pub fn borrow(&self) -> &[T] {
        match self {
            Self::Borrowed(plane) => plane,
            Self::Owned(plane) => plane,
        }
    }

    pub fn borrow_mut(&mut self) -> &mut [T] {
        match self {
            Self::Borrowed(plane) => plane,
            Self::Owned(plane) => plane,
        }
    }
}

fn owned_plane<T>(stride: usize, rows: usize) -> BufferStoreMut<'static, T>
where
    T: Copy + Debug + Default,
{
    BufferStoreMut::Owned(vec![T::default(); stride * rows])
}

/// Luma plane plus one plane of interleaved chroma pairs (NV12, NV21, NV16, ...).
///
/// Strides count elements of `T`; `uv_stride` covers both samples of every pair.
#[derive(Debug, Clone)]
pub struct YuvBiPlanarImage<'a, T>
where
    T: Copy + Debug,
{
    pub y_plane: &'a [T],
    pub y_stride: u32,
    pub uv_plane: &'a [T],
    pub uv_stride: u32,
    pub width: u32,
    pub height: u32,
}

impl<T> YuvBiPlanarImage<'_, T>
where
    T: Copy + Debug,
{
    /// Checks plane lengths and strides for `subsampling`; conversions call this before reading.
    pub fn check_constraints(&self, subsampling: YuvChromaSubsampling) -> Result<(), YuvError> {
        check_y8_channel(self.y_plane, self.y_stride, self.width, self.height)?;
        check_interleaved_chroma_channel(
            self.uv_plane,
            self.uv_stride,
            self.width,
            self.height,
            subsampling,
        )
    }
}

/// Writable counterpart of [YuvBiPlanarImage].
#[derive(Debug)]
pub struct YuvBiPlanarImageMut<'a, T>
where
    T: Copy + Debug,
{
    pub y_plane: BufferStoreMut<'a, T>,
    pub y_stride: u32,
    pub uv_plane: BufferStoreMut<'a, T>,
    pub uv_stride: u32,
    pub width: u32,
    pub height: u32,
}

impl<T> YuvBiPlanarImageMut<'_, T>
where
    T: Copy + Debug,
{
    pub fn check_constraints(&self, subsampling: YuvChromaSubsampling) -> Result<(), YuvError> {
        self.to_fixed().check_constraints(subsampling)
    }

    pub fn to_fixed(&self) -> YuvBiPlanarImage<'_, T> {
        YuvBiPlanarImage {
            y_plane: self.y_plane.borrow(),
            y_stride: self.y_stride,
            uv_plane: self.uv_plane.borrow(),
            uv_stride: self.uv_stride,
            width: self.width,
            height: self.height,
        }
    }
}

impl<T> YuvBiPlanarImageMut<'static, T>
where
    T: Copy + Debug + Default,
{
    /// Tightly packed image sized for `subsampling`
    pub fn alloc(width: u32, height: u32, subsampling: YuvChromaSubsampling) -> Self {
        let uv_stride = subsampling.chroma_width(width as usize) * 2;
        let chroma_height = subsampling.chroma_height(height as usize);
        YuvBiPlanarImageMut {
            y_plane: owned_plane(width as usize, height as usize),
            y_stride: width,
            uv_plane: owned_plane(uv_stride, chroma_height),
            uv_stride: uv_stride as u32,
            width,
            height,
        }
    }
}

/// Luma only image, the source of gray expansion and the target of gray extraction.
#[derive(Debug, Clone)]
pub struct YuvGrayImage<'a, T>
where
    T: Copy + Debug,
{
    pub y_plane: &'a [T],
    pub y_stride: u32,
    pub width: u32,
    pub height: u32,
}

impl<T> YuvGrayImage<'_, T>
where
    T: Copy + Debug,
{
    pub fn check_constraints(&self) -> Result<(), YuvError> {
        check_y8_channel(self.y_plane, self.y_stride, self.width, self.height)
    }
}

#[derive(Debug)]
pub struct YuvGrayImageMut<'a, T>
where
    T: Copy + Debug,
{
    pub y_plane: BufferStoreMut<'a, T>,
    pub y_stride: u32,
    pub width: u32,
    pub height: u32,
}

impl<T> YuvGrayImageMut<'_, T>
where
    T: Copy + Debug,
{
    pub fn check_constraints(&self) -> Result<(), YuvError> {
        self.to_fixed().check_constraints()
    }

    pub fn to_fixed(&self) -> YuvGrayImage<'_, T> {
        YuvGrayImage {
            y_plane: self.y_plane.borrow(),
            y_stride: self.y_stride,
            width: self.width,
            height: self.height,
        }
    }
}

impl<T> YuvGrayImageMut<'static, T>
where
    T: Copy + Debug + Default,
{
    pub fn alloc(width: u32, height: u32) -> Self {
        YuvGrayImageMut {
            y_plane: owned_plane(width as usize, height as usize),
            y_stride: width,
            width,
            height,
        }
    }
}

/// Luma plane with separate Cb and Cr planes.
///
/// Chroma planes hold `ceil(width / h) x ceil(height / v)` samples for the
/// subsampling factors `h` and `v`. Strides count elements of `T`.
#[derive(Debug, Clone)]
pub struct YuvPlanarImage<'a, T>
where
    T: Copy + Debug,
{
    pub y_plane: &'a [T],
    pub y_stride: u32,
    pub u_plane: &'a [T],
    pub u_stride: u32,
    pub v_plane: &'a [T],
    pub v_stride: u32,
    pub width: u32,
    pub height: u32,
}

impl<T> YuvPlanarImage<'_, T>
where
    T: Copy + Debug,
{
    pub fn check_constraints(&self, subsampling: YuvChromaSubsampling) -> Result<(), YuvError> {
        check_y8_channel(self.y_plane, self.y_stride, self.width, self.height)?;
        for (plane, stride) in [(self.u_plane, self.u_stride), (self.v_plane, self.v_stride)] {
            check_chroma_channel(plane, stride, self.width, self.height, subsampling)?;
        }
        Ok(())
    }
}

/// Writable counterpart of [YuvPlanarImage].
#[derive(Debug)]
pub struct YuvPlanarImageMut<'a, T>
where
    T: Copy + Debug,
{
    pub y_plane: BufferStoreMut<'a, T>,
    pub y_stride: u32,
    pub u_plane: BufferStoreMut<'a, T>,
    pub u_stride: u32,
    pub v_plane: BufferStoreMut<'a, T>,
    pub v_stride: u32,
    pub width: u32,
    pub height: u32,
}

impl<T> YuvPlanarImageMut<'_, T>
where
    T: Copy + Debug,
{
    pub fn check_constraints(&self, subsampling: YuvChromaSubsampling) -> Result<(), YuvError> {
        self.to_fixed().check_constraints(subsampling)
    }

    pub fn to_fixed(&self) -> YuvPlanarImage<'_, T> {
        YuvPlanarImage {
            y_plane: self.y_plane.borrow(),
            y_stride: self.y_stride,
            u_plane: self.u_plane.borrow(),
            u_stride: self.u_stride,
            v_plane: self.v_plane.borrow(),
            v_stride: self.v_stride,
            width: self.width,
            height: self.height,
        }
    }
}

impl<T> YuvPlanarImageMut<'static, T>
where
    T: Copy + Debug + Default,
{
    /// Tightly packed image sized for `subsampling`
    pub fn alloc(width: u32, height: u32, subsampling: YuvChromaSubsampling) -> Self {
        let chroma_width = subsampling.chroma_width(width as usize);
        let chroma_height = subsampling.chroma_height(height as usize);
        YuvPlanarImageMut {
            y_plane: owned_plane(width as usize, height as usize),
            y_stride: width,
            u_plane: owned_plane(chroma_width, chroma_height),
            u_stride: chroma_width as u32,
            v_plane: owned_plane(chroma_width, chroma_height),
            v_stride: chroma_width as u32,
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_matches_constraints() {
        let samplings = [
            YuvChromaSubsampling::Yuv444,
            YuvChromaSubsampling::Yuv422,
            YuvChromaSubsampling::Yuv420,
            YuvChromaSubsampling::Yuv411,
            YuvChromaSubsampling::Yuv410,
        ];
        for sampling in samplings {
            let planar = YuvPlanarImageMut::<u8>::alloc(13, 7, sampling);
            assert!(planar.check_constraints(sampling).is_ok());
            assert!(planar.to_fixed().check_constraints(sampling).is_ok());
        }
        for sampling in [
            YuvChromaSubsampling::Yuv444,
            YuvChromaSubsampling::Yuv422,
            YuvChromaSubsampling::Yuv420,
        ] {
            let bi_planar = YuvBiPlanarImageMut::<u16>::alloc(13, 7, sampling);
            assert!(bi_planar.check_constraints(sampling).is_ok());
            assert!(bi_planar.to_fixed().check_constraints(sampling).is_ok());
        }
        let gray = YuvGrayImageMut::<u8>::alloc(13, 7);
        assert!(gray.to_fixed().check_constraints().is_ok());
    }

    #[test]
    fn test_subsampled_alloc_sizes() {
        let planar = YuvPlanarImageMut::<u8>::alloc(9, 6, YuvChromaSubsampling::Yuv410);
        assert_eq!(planar.u_stride, 3);
        assert_eq!(planar.u_plane.borrow().len(), 3 * 2);
        let bi_planar = YuvBiPlanarImageMut::<u8>::alloc(9, 5, YuvChromaSubsampling::Yuv420);
        assert_eq!(bi_planar.uv_stride, 10);
        assert_eq!(bi_planar.uv_plane.borrow().len(), 10 * 3);
    }

    #[test]
    fn test_short_planes_are_rejected() {
        let mut y = vec![0u8; 8 * 4];
        let mut u = vec![0u8; 4 * 2 - 1];
        let mut v = vec![0u8; 4 * 2];
        let planar = YuvPlanarImageMut {
            y_plane: BufferStoreMut::Borrowed(&mut y),
            y_stride: 8,
            u_plane: BufferStoreMut::Borrowed(&mut u),
            u_stride: 4,
            v_plane: BufferStoreMut::Borrowed(&mut v),
            v_stride: 4,
            width: 8,
            height: 4,
        };
        assert!(matches!(
            planar.check_constraints(YuvChromaSubsampling::Yuv420),
            Err(YuvError::ChromaPlaneSizeMismatch(_))
        ));
        assert!(planar
            .check_constraints(YuvChromaSubsampling::Yuv410)
            .is_ok());

        let nv = YuvBiPlanarImageMut::<u8>::alloc(8, 4, YuvChromaSubsampling::Yuv420);
        assert!(nv.check_constraints(YuvChromaSubsampling::Yuv444).is_err());
    }

    #[test]
    fn test_borrowed_storage() {
        let mut y = vec![0u8; 16];
        let mut image = YuvGrayImageMut {
            y_plane: BufferStoreMut::Borrowed(&mut y),
            y_stride: 4,
            width: 4,
            height: 4,
        };
        image.y_plane.borrow_mut()[5] = 9;
        assert!(image.check_constraints().is_ok());
        drop(image);
        assert_eq!(y[5], 9);
    }
}
