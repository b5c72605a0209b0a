use glam::Vec2;
use rayon::prelude::*;

use super::kernel::{LANCZOS_A, bicubic_weights, lanczos3_weights};
use super::{FilterMode, Transform};
use crate::image::Image;

/// Read-only view of an 8-bit source whose edge pixels extend outward.
///
/// Only positions within the footprint of some source pixel are sampled;
/// everything else resolves to transparent black.
struct Source<'a> {
    bytes: &'a [u8],
    width: i32,
    height: i32,
    stride: usize,
    channels: usize,
}

impl Source<'_> {
    #[inline]
    fn pixel(&self, x: i32, y: i32) -> &[u8] {
        let x = x.clamp(0, self.width - 1) as usize;
        let y = y.clamp(0, self.height - 1) as usize;
        let offset = y * self.stride + x * self.channels;
        &self.bytes[offset..offset + self.channels]
    }

    #[inline]
    fn covers(&self, p: Vec2) -> bool {
        p.x >= -0.5
            && p.y >= -0.5
            && p.x < self.width as f32 - 0.5
            && p.y < self.height as f32 - 0.5
    }

    /// Weighted sum over a separable N x N neighborhood whose first tap is (x0, y0).
    #[inline]
    fn convolve<const N: usize>(
        &self,
        x0: i32,
        y0: i32,
        wx: &[f32; N],
        wy: &[f32; N],
        acc: &mut [f32; 4],
    ) {
        for (j, &wyj) in wy.iter().enumerate() {
            if wyj == 0.0 {
                continue;
            }
            for (i, &wxi) in wx.iter().enumerate() {
                let w = wxi * wyj;
                if w == 0.0 {
                    continue;
                }
                let px = self.pixel(x0 + i as i32, y0 + j as i32);
                for (a, &v) in acc.iter_mut().zip(px) {
                    *a += v as f32 * w;
                }
            }
        }
    }

    fn sample(&self, filter: FilterMode, p: Vec2, acc: &mut [f32; 4]) {
        *acc = [0.0; 4];

        if !self.covers(p) {
            return;
        }

        match filter {
            FilterMode::Nearest => {
                let px = self.pixel(p.x.round() as i32, p.y.round() as i32);
                for (a, &v) in acc.iter_mut().zip(px) {
                    *a = v as f32;
                }
            }
            FilterMode::Bilinear => {
                let x0 = p.x.floor();
                let y0 = p.y.floor();
                let fx = p.x - x0;
                let fy = p.y - y0;
                self.convolve(x0 as i32, y0 as i32, &[1.0 - fx, fx], &[1.0 - fy, fy], acc);
            }
            FilterMode::Bicubic => {
                let x0 = p.x.floor();
                let y0 = p.y.floor();
                let wx = bicubic_weights(p.x - x0);
                let wy = bicubic_weights(p.y - y0);
                self.convolve(x0 as i32 - 1, y0 as i32 - 1, &wx, &wy, acc);
            }
            FilterMode::Lanczos3 => {
                let x0 = p.x.floor();
                let y0 = p.y.floor();
                let wx = lanczos3_weights(p.x - x0);
                let wy = lanczos3_weights(p.y - y0);
                let offset = LANCZOS_A as i32 - 1;
                self.convolve(x0 as i32 - offset, y0 as i32 - offset, &wx, &wy, acc);
            }
        }
    }
}

/// Inverse-maps every output pixel into the input and resamples it.
pub(super) fn apply(params: &Transform, input: &Image, output: &mut Image) {
    let out_stride = output.desc().stride;
    if out_stride == 0 || output.desc().height == 0 {
        return;
    }

    let inverse = params.transform.inverse();
    let filter = params.filter;

    let source = Source {
        bytes: input.bytes(),
        width: input.width() as i32,
        height: input.height() as i32,
        stride: input.desc().stride,
        channels: input.desc().color_format.channel_count.channel_count() as usize,
    };
    let channels = source.channels;

    output
        .bytes_mut()
        .par_chunks_mut(out_stride)
        .enumerate()
        .for_each(|(y, row)| {
            let mut acc = [0.0f32; 4];
            for (x, px) in row.chunks_exact_mut(channels).enumerate() {
                let p = inverse.transform_point2(Vec2::new(x as f32, y as f32));
                source.sample(filter, p, &mut acc);
                for (out, &value) in px.iter_mut().zip(&acc) {
                    *out = value.round().clamp(0.0, u8::MAX as f32) as u8;
                }
            }
        });
}
