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
use crate::yuv_support::YuvChromaSubsampling;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
pub struct MismatchedSize {
    pub expected: usize,
    pub received: usize,
}

#[derive(Debug)]
pub enum YuvError {
    /// `1 - kr - kb` is near 0 or the derived coefficients overflow the fixed point accumulators
    DegenerateColorMatrix { kr: f32, kb: f32 },
    UnsupportedBitDepth(u32),
    PointerOverflow,
    ZeroBaseSize,
    LumaPlaneSizeMismatch(MismatchedSize),
    LumaStrideTooSmall(MismatchedSize),
    ChromaPlaneSizeMismatch(MismatchedSize),
    ChromaStrideTooSmall(MismatchedSize),
    RgbStrideTooSmall(MismatchedSize),
    DestinationSizeMismatch(MismatchedSize),
    SourceSizeMismatch(MismatchedSize),
}

impl Display for YuvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            YuvError::DegenerateColorMatrix { kr, kb } => f.write_fmt(format_args!(
                "Color matrix kr={}, kb={} is degenerate for fixed point conversion",
                kr, kb
            )),
            YuvError::UnsupportedBitDepth(depth) => f.write_fmt(format_args!(
                "Bit depth {} is not supported, expected one of 8, 10, 12, 16",
                depth
            )),
            YuvError::PointerOverflow => f.write_str("Image size overflow pointer capabilities"),
            YuvError::ZeroBaseSize => f.write_str("Zero sized images is not supported"),
            YuvError::LumaPlaneSizeMismatch(size) => f.write_fmt(format_args!(
                "Luma plane have invalid size, it must be at least {}, but it was {}",
                size.expected, size.received
            )),
            YuvError::LumaStrideTooSmall(size) => f.write_fmt(format_args!(
                "Luma stride must be at least {}, but it was {}",
                size.expected, size.received
            )),
            YuvError::ChromaPlaneSizeMismatch(size) => f.write_fmt(format_args!(
                "Chroma plane have invalid size, it must be at least {}, but it was {}",
                size.expected, size.received
            )),
            YuvError::ChromaStrideTooSmall(size) => f.write_fmt(format_args!(
                "Chroma stride must be at least {}, but it was {}",
                size.expected, size.received
            )),
            YuvError::RgbStrideTooSmall(size) => f.write_fmt(format_args!(
                "RGB stride must be at least {}, but it was {}",
                size.expected, size.received
            )),
            YuvError::DestinationSizeMismatch(size) => f.write_fmt(format_args!(
                "Destination must have size at least {} but it is {}",
                size.expected, size.received
            )),
            YuvError::SourceSizeMismatch(size) => f.write_fmt(format_args!(
                "Source must have size at least {} but it is {}",
                size.expected, size.received
            )),
        }
    }
}

impl Error for YuvError {}

#[inline]
pub(crate) fn check_overflow_v2(v0: usize, v1: usize) -> Result<(), YuvError> {
    let (_, overflow) = v0.overflowing_mul(v1);
    if overflow {
        return Err(YuvError::PointerOverflow);
    }
    Ok(())
}

#[inline]
pub(crate) fn check_overflow_v3(v0: usize, v1: usize, v2: usize) -> Result<(), YuvError> {
    let (product0, overflow) = v0.overflowing_mul(v1);
    if overflow {
        return Err(YuvError::PointerOverflow);
    }
    let (_, overflow) = product0.overflowing_mul(v2);
    if overflow {
        return Err(YuvError::PointerOverflow);
    }
    Ok(())
}

/// Smallest slice holding `rows` rows of `row_len` elements spaced by `stride`
#[inline]
fn required_len(stride: usize, row_len: usize, rows: usize) -> usize {
    if rows == 0 {
        return 0;
    }
    stride * (rows - 1) + row_len
}

#[inline]
pub(crate) fn check_bit_depth(bit_depth: u32) -> Result<(), YuvError> {
    match bit_depth {
        8 | 10 | 12 | 16 => Ok(()),
        _ => Err(YuvError::UnsupportedBitDepth(bit_depth)),
    }
}

#[inline]
fn check_packed(
    rgba_stride: u32,
    width: u32,
    height: u32,
    channels: usize,
) -> Result<usize, YuvError> {
    if width == 0 || height == 0 {
        return Err(YuvError::ZeroBaseSize);
    }
    check_overflow_v3(width as usize, height as usize, channels)?;
    check_overflow_v2(rgba_stride as usize, height as usize)?;
    let row_len = width as usize * channels;
    if (rgba_stride as usize) < row_len {
        return Err(YuvError::RgbStrideTooSmall(MismatchedSize {
            expected: row_len,
            received: rgba_stride as usize,
        }));
    }
    Ok(required_len(
        rgba_stride as usize,
        row_len,
        height as usize,
    ))
}

#[inline]
pub(crate) fn check_rgba_destination<V>(
    arr: &[V],
    rgba_stride: u32,
    width: u32,
    height: u32,
    channels: usize,
) -> Result<(), YuvError> {
    let required = check_packed(rgba_stride, width, height, channels)?;
    if arr.len() < required {
        return Err(YuvError::DestinationSizeMismatch(MismatchedSize {
            expected: required,
            received: arr.len(),
        }));
    }
    Ok(())
}

#[inline]
pub(crate) fn check_rgba_source<V>(
    arr: &[V],
    rgba_stride: u32,
    width: u32,
    height: u32,
    channels: usize,
) -> Result<(), YuvError> {
    let required = check_packed(rgba_stride, width, height, channels)?;
    if arr.len() < required {
        return Err(YuvError::SourceSizeMismatch(MismatchedSize {
            expected: required,
            received: arr.len(),
        }));
    }
    Ok(())
}

#[inline]
pub(crate) fn check_y8_channel<V>(
    data: &[V],
    stride: u32,
    width: u32,
    height: u32,
) -> Result<(), YuvError> {
    if width == 0 || height == 0 {
        return Err(YuvError::ZeroBaseSize);
    }
    check_overflow_v2(stride as usize, height as usize)?;
    if (stride as usize) < width as usize {
        return Err(YuvError::LumaStrideTooSmall(MismatchedSize {
            expected: width as usize,
            received: stride as usize,
        }));
    }
    let required = required_len(stride as usize, width as usize, height as usize);
    if data.len() < required {
        return Err(YuvError::LumaPlaneSizeMismatch(MismatchedSize {
            expected: required,
            received: data.len(),
        }));
    }
    Ok(())
}

#[inline]
fn check_chroma_plane<V>(
    data: &[V],
    stride: u32,
    row_len: usize,
    rows: usize,
) -> Result<(), YuvError> {
    check_overflow_v2(stride as usize, rows)?;
    if (stride as usize) < row_len {
        return Err(YuvError::ChromaStrideTooSmall(MismatchedSize {
            expected: row_len,
            received: stride as usize,
        }));
    }
    let required = required_len(stride as usize, row_len, rows);
    if data.len() < required {
        return Err(YuvError::ChromaPlaneSizeMismatch(MismatchedSize {
            expected: required,
            received: data.len(),
        }));
    }
    Ok(())
}

#[inline]
pub(crate) fn check_chroma_channel<V>(
    data: &[V],
    stride: u32,
    image_width: u32,
    image_height: u32,
    sampling: YuvChromaSubsampling,
) -> Result<(), YuvError> {
    check_chroma_plane(
        data,
        stride,
        sampling.chroma_width(image_width as usize),
        sampling.chroma_height(image_height as usize),
    )
}

#[inline]
pub(crate) fn check_interleaved_chroma_channel<V>(
    data: &[V],
    stride: u32,
    image_width: u32,
    image_height: u32,
    sampling: YuvChromaSubsampling,
) -> Result<(), YuvError> {
    check_chroma_plane(
        data,
        stride,
        sampling.chroma_width(image_width as usize) * 2,
        sampling.chroma_height(image_height as usize),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_planes_are_accepted() {
        let plane = vec![0u8; 10 * 3 + 8];
        assert!(check_y8_channel(&plane, 10, 8, 4).is_ok());
        assert!(matches!(
            check_y8_channel(&plane, 10, 8, 5),
            Err(YuvError::LumaPlaneSizeMismatch(_))
        ));
        assert!(matches!(
            check_y8_channel(&plane, 6, 8, 2),
            Err(YuvError::LumaStrideTooSmall(_))
        ));
    }

    #[test]
    fn test_zero_sized_images_are_rejected() {
        let plane = vec![0u8; 16];
        assert!(matches!(
            check_y8_channel(&plane, 4, 0, 4),
            Err(YuvError::ZeroBaseSize)
        ));
        assert!(matches!(
            check_rgba_destination(&plane, 4, 4, 0, 3),
            Err(YuvError::ZeroBaseSize)
        ));
    }

    #[test]
    fn test_chroma_plane_sizes() {
        // 7x5 at 4:2:0 keeps 4x3 chroma samples
        let plane = vec![0u8; 4 * 3];
        assert!(check_chroma_channel(&plane, 4, 7, 5, YuvChromaSubsampling::Yuv420).is_ok());
        assert!(matches!(
            check_chroma_channel(&plane, 4, 7, 6, YuvChromaSubsampling::Yuv422),
            Err(YuvError::ChromaPlaneSizeMismatch(_))
        ));
        assert!(matches!(
            check_interleaved_chroma_channel(&plane, 4, 7, 5, YuvChromaSubsampling::Yuv420),
            Err(YuvError::ChromaStrideTooSmall(_))
        ));
    }

    #[test]
    fn test_bit_depths() {
        for depth in [8, 10, 12, 16] {
            assert!(check_bit_depth(depth).is_ok());
        }
        assert!(matches!(
            check_bit_depth(9),
            Err(YuvError::UnsupportedBitDepth(9))
        ));
    }
}
