use rayon::prelude::*;

use super::{Blend, BlendMode};
use crate::image::Image;

/// Blends `src` over `dst` in place. Formats and sizes are validated by the caller.
pub(super) fn apply_onto(params: &Blend, src: &Image, dst: &mut Image) {
    let stride = dst.desc().stride;
    if stride == 0 || dst.desc().height == 0 {
        return;
    }

    let channel_count = src.desc().color_format.channel_count;
    let channels = channel_count.channel_count() as usize;
    let has_alpha = channel_count.has_alpha();
    let alpha = params.alpha.clamp(0.0, 1.0);

    let src_bytes = src.bytes();

    dst.bytes_mut()
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, dst_row)| {
            let src_row = &src_bytes[y * stride..(y + 1) * stride];
            match params.mode {
                BlendMode::Lighten => lighten_row(src_row, dst_row, channels, has_alpha, alpha),
                BlendMode::Normal => normal_row(src_row, dst_row, channels, has_alpha, alpha),
            }
        });
}

fn lighten_row(src: &[u8], dst: &mut [u8], channels: usize, has_alpha: bool, alpha: f32) {
    let full_strength = alpha >= 1.0;

    for (s, d) in src.chunks_exact(channels).zip(dst.chunks_exact_mut(channels)) {
        if has_alpha && s[channels - 1] == 0 {
            continue;
        }

        if full_strength {
            for (dc, &sc) in d.iter_mut().zip(s) {
                *dc = (*dc).max(sc);
            }
        } else {
            for (dc, &sc) in d.iter_mut().zip(s) {
                let lighter = (*dc).max(sc) as f32;
                let base = *dc as f32;
                *dc = to_u8(base + (lighter - base) * alpha);
            }
        }
    }
}

fn normal_row(src: &[u8], dst: &mut [u8], channels: usize, has_alpha: bool, alpha: f32) {
    let color_channels = if has_alpha { channels - 1 } else { channels };

    for (s, d) in src.chunks_exact(channels).zip(dst.chunks_exact_mut(channels)) {
        let src_alpha = if has_alpha {
            s[channels - 1] as f32 / u8::MAX as f32
        } else {
            1.0
        };
        let a = src_alpha * alpha;
        if a <= 0.0 {
            continue;
        }

        for c in 0..color_channels {
            d[c] = to_u8(s[c] as f32 * a + d[c] as f32 * (1.0 - a));
        }

        if has_alpha {
            let dst_alpha = d[channels - 1] as f32 / u8::MAX as f32;
            let out_alpha = a + dst_alpha * (1.0 - a);
            d[channels - 1] = to_u8(out_alpha * u8::MAX as f32);
        }
    }
}

#[inline]
fn to_u8(value: f32) -> u8 {
    value.round().clamp(0.0, u8::MAX as f32) as u8
}
