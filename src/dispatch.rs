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
#[cfg(any(
    all(
        any(target_arch = "x86", target_arch = "x86_64"),
        any(feature = "sse", feature = "avx")
    ),
    all(target_arch = "aarch64", target_feature = "neon")
))]
use crate::internals::ChromaBlock;
use crate::internals::{ChromaRowFn, InverseRowFn, LumaRowFn};
#[cfg(any(
    all(
        any(target_arch = "x86", target_arch = "x86_64"),
        any(feature = "sse", feature = "avx")
    ),
    all(target_arch = "aarch64", target_feature = "neon")
))]
use crate::yuv_support::YuvSourceChannels;
use std::fmt::{Display, Formatter};
use std::sync::OnceLock;

/// Instruction set the 8-bit row kernels are compiled for.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CpuTarget {
    /// Portable code only, always available
    Scalar,
    /// x86 SSE4.1
    Sse41,
    /// x86 AVX2
    Avx2,
    /// aarch64 NEON
    Neon,
}

impl CpuTarget {
    /// Most capable first
    pub(crate) const PREFERENCE: [CpuTarget; 4] = [
        CpuTarget::Avx2,
        CpuTarget::Sse41,
        CpuTarget::Neon,
        CpuTarget::Scalar,
    ];

    /// Whether kernels for this target are compiled in and the running CPU can execute them.
    pub fn is_supported(&self) -> bool {
        match self {
            CpuTarget::Scalar => true,
            #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
            CpuTarget::Sse41 => std::arch::is_x86_feature_detected!("sse4.1"),
            #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "avx"))]
            CpuTarget::Avx2 => std::arch::is_x86_feature_detected!("avx2"),
            #[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
            CpuTarget::Neon => true,
            #[allow(unreachable_patterns)]
            _ => false,
        }
    }
}

impl Display for CpuTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CpuTarget::Scalar => f.write_str("scalar"),
            CpuTarget::Sse41 => f.write_str("sse4.1"),
            CpuTarget::Avx2 => f.write_str("avx2"),
            CpuTarget::Neon => f.write_str("neon"),
        }
    }
}

/// Row kernels of one target, indexed by [crate::yuv_support::YuvSourceChannels] discriminant.
///
/// `None` leaves the whole row to the scalar path.
#[derive(Copy, Clone)]
pub(crate) struct RowKernels {
    pub(crate) luma: [Option<LumaRowFn>; 6],
    /// Second index is the [crate::internals::ChromaBlock] discriminant
    pub(crate) chroma: [[Option<ChromaRowFn>; 4]; 6],
    /// Second index is [crate::internals::replication_index] of the horizontal factor
    pub(crate) inverse: [[Option<InverseRowFn>; 3]; 6],
}

#[cfg(any(
    all(
        any(target_arch = "x86", target_arch = "x86_64"),
        any(feature = "sse", feature = "avx")
    ),
    all(target_arch = "aarch64", target_feature = "neon")
))]
macro_rules! row_kernels {
    ($luma: ident, $chroma: ident, $inverse: ident) => {
        row_kernels!(
            @layouts $luma, $chroma, $inverse,
            [
                YuvSourceChannels::Rgb,
                YuvSourceChannels::Bgr,
                YuvSourceChannels::Rgba,
                YuvSourceChannels::Bgra,
                YuvSourceChannels::Argb,
                YuvSourceChannels::Abgr
            ]
        )
    };
    (@layouts $luma: ident, $chroma: ident, $inverse: ident, [$($layout: expr),*]) => {
        RowKernels {
            luma: [$(Some($luma::<{ $layout as u8 }> as LumaRowFn)),*],
            chroma: [$([
                Some($chroma::<{ $layout as u8 }, { ChromaBlock::B1x1 as u8 }> as ChromaRowFn),
                Some($chroma::<{ $layout as u8 }, { ChromaBlock::B2x1 as u8 }> as ChromaRowFn),
                Some($chroma::<{ $layout as u8 }, { ChromaBlock::B2x2 as u8 }> as ChromaRowFn),
                Some($chroma::<{ $layout as u8 }, { ChromaBlock::B4x1 as u8 }> as ChromaRowFn),
            ]),*],
            inverse: [$([
                Some($inverse::<{ $layout as u8 }, 1> as InverseRowFn),
                Some($inverse::<{ $layout as u8 }, 2> as InverseRowFn),
                Some($inverse::<{ $layout as u8 }, 4> as InverseRowFn),
            ]),*],
        }
    };
}

impl RowKernels {
    const fn scalar() -> RowKernels {
        RowKernels {
            luma: [None; 6],
            chroma: [[None; 4]; 6],
            inverse: [[None; 3]; 6],
        }
    }

    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
    fn sse() -> RowKernels {
        use crate::sse::{sse_rgba_to_chroma_row, sse_rgba_to_y_row, sse_yuv_to_rgba_row};
        row_kernels!(sse_rgba_to_y_row, sse_rgba_to_chroma_row, sse_yuv_to_rgba_row)
    }

    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "avx"))]
    fn avx2() -> RowKernels {
        use crate::avx2::{avx2_rgba_to_chroma_row, avx2_rgba_to_y_row, avx2_yuv_to_rgba_row};
        row_kernels!(avx2_rgba_to_y_row, avx2_rgba_to_chroma_row, avx2_yuv_to_rgba_row)
    }

    #[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
    fn neon() -> RowKernels {
        use crate::neon::{neon_rgba_to_chroma_row, neon_rgba_to_y_row, neon_yuv_to_rgba_row};
        row_kernels!(neon_rgba_to_y_row, neon_rgba_to_chroma_row, neon_yuv_to_rgba_row)
    }

    /// Table for `target`, `None` when it is not compiled in or not supported by this CPU.
    pub(crate) fn for_target(target: CpuTarget) -> Option<RowKernels> {
        if !target.is_supported() {
            return None;
        }
        match target {
            CpuTarget::Scalar => Some(RowKernels::scalar()),
            #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
            CpuTarget::Sse41 => Some(RowKernels::sse()),
            #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "avx"))]
            CpuTarget::Avx2 => Some(RowKernels::avx2()),
            #[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
            CpuTarget::Neon => Some(RowKernels::neon()),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }
}

/// Process wide kernel selection, published once.
pub(crate) struct Context {
    pub(crate) target: CpuTarget,
    pub(crate) kernels: RowKernels,
}

static CONTEXT: OnceLock<Context> = OnceLock::new();

impl Context {
    fn detect() -> Context {
        let (target, kernels) = CpuTarget::PREFERENCE
            .iter()
            .find_map(|&target| RowKernels::for_target(target).map(|kernels| (target, kernels)))
            .unwrap_or((CpuTarget::Scalar, RowKernels::scalar()));
        tracing::debug!(acceleration = %target, "yuv row kernels selected");
        Context { target, kernels }
    }

    /// Selection is made on first call and never revisited.
    pub(crate) fn global() -> &'static Context {
        CONTEXT.get_or_init(Context::detect)
    }
}

/// Returns the instruction set the conversions run on, selecting it if that has not happened yet.
pub fn describe_acceleration() -> CpuTarget {
    Context::global().target
}

/// Chooses the instruction set before the first conversion.
///
/// Returns `false` and changes nothing when a selection was already published,
/// or when `target` is not compiled in or not supported by the running CPU.
pub fn try_pin_acceleration(target: CpuTarget) -> bool {
    let Some(kernels) = RowKernels::for_target(target) else {
        return false;
    };
    let pinned = CONTEXT.set(Context { target, kernels }).is_ok();
    if pinned {
        tracing::debug!(acceleration = %target, "yuv row kernels pinned");
    }
    pinned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_is_supported_and_stable() {
        let target = describe_acceleration();
        assert!(target.is_supported());
        for _ in 0..4 {
            assert_eq!(describe_acceleration(), target);
        }
        assert!(!try_pin_acceleration(target));
        assert!(!try_pin_acceleration(CpuTarget::Scalar));
        assert_eq!(describe_acceleration(), target);
    }

    #[test]
    fn test_concurrent_first_use_agrees() {
        let handles = (0..4)
            .map(|_| std::thread::spawn(describe_acceleration))
            .collect::<Vec<_>>();
        let selected = handles
            .into_iter()
            .map(|x| x.join().unwrap())
            .collect::<Vec<_>>();
        assert!(selected.iter().all(|&x| x == selected[0]));
    }

    #[test]
    fn test_scalar_table_is_empty() {
        let kernels = RowKernels::for_target(CpuTarget::Scalar).unwrap();
        assert!(kernels.luma.iter().all(|x| x.is_none()));
        assert!(kernels.chroma.iter().flatten().all(|x| x.is_none()));
        assert!(kernels.inverse.iter().flatten().all(|x| x.is_none()));
    }

    #[test]
    fn test_best_supported_target_is_preferred() {
        let best = CpuTarget::PREFERENCE
            .iter()
            .find(|x| RowKernels::for_target(**x).is_some())
            .copied()
            .unwrap();
        assert_eq!(describe_acceleration(), best);
    }
}
