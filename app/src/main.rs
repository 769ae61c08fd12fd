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
mod max_divergence;

use image::{ImageReader, RgbImage};
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use yuv_transform::{
    describe_acceleration, rgb_to_yuv420, rgb_to_yuv_nv12, yuv420_to_rgb, yuv_nv12_to_rgb,
    YuvBiPlanarImageMut, YuvChromaSubsampling, YuvPlanarImageMut, YuvRange, YuvStandardMatrix,
};

fn round_trip(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let img = ImageReader::open(path)?.decode()?.to_rgb8();
    let (width, height) = img.dimensions();
    let stride = width * 3;
    let src_bytes = img.as_raw();

    let mut planar_image =
        YuvPlanarImageMut::<u8>::alloc(width, height, YuvChromaSubsampling::Yuv420);
    let start_time = Instant::now();
    rgb_to_yuv420(
        &mut planar_image,
        src_bytes,
        stride,
        YuvRange::Limited,
        YuvStandardMatrix::Bt709,
    )?;
    println!("RGB -> YUV 4:2:0 time: {:?}", start_time.elapsed());

    let mut rgb = vec![0u8; src_bytes.len()];
    let start_time = Instant::now();
    yuv420_to_rgb(
        &planar_image.to_fixed(),
        &mut rgb,
        stride,
        YuvRange::Limited,
        YuvStandardMatrix::Bt709,
    )?;
    println!("YUV 4:2:0 -> RGB time: {:?}", start_time.elapsed());

    let mut bi_planar_image =
        YuvBiPlanarImageMut::<u8>::alloc(width, height, YuvChromaSubsampling::Yuv420);
    let start_time = Instant::now();
    rgb_to_yuv_nv12(
        &mut bi_planar_image,
        src_bytes,
        stride,
        YuvRange::Limited,
        YuvStandardMatrix::Bt709,
    )?;
    println!("RGB -> NV12 time: {:?}", start_time.elapsed());

    let mut nv_rgb = vec![0u8; src_bytes.len()];
    let start_time = Instant::now();
    yuv_nv12_to_rgb(
        &bi_planar_image.to_fixed(),
        &mut nv_rgb,
        stride,
        YuvRange::Limited,
        YuvStandardMatrix::Bt709,
    )?;
    println!("NV12 -> RGB time: {:?}", start_time.elapsed());

    let diverged = rgb.iter().zip(nv_rgb.iter()).filter(|(a, b)| a != b).count();
    println!("Planar and semi-planar outputs differ in {} samples", diverged);

    let image = RgbImage::from_raw(width, height, rgb).ok_or("round trip buffer too small")?;
    image.save("round_trip.png")?;
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Row kernels: {}", describe_acceleration());

    if let Some(path) = std::env::args().nth(1) {
        if let Err(e) = round_trip(&path) {
            tracing::error!("round trip of {} failed: {}", path, e);
        }
    }

    if let Err(e) = max_divergence::check_div() {
        tracing::error!("divergence search failed: {}", e);
    }
}
