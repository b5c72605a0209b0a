//! Resampling kernels used by the CPU transform.

use std::f32::consts::PI;
use std::sync::OnceLock;

/// Lanczos kernel value (direct computation).
///
/// L(x) = sinc(x) * sinc(x/a) for |x| < a, 0 otherwise.
#[inline]
fn lanczos_kernel_direct(x: f32, a: f32) -> f32 {
    if x.abs() < 1e-6 {
        return 1.0;
    }
    if x.abs() >= a {
        return 0.0;
    }

    let pi_x = PI * x;
    let pi_x_a = pi_x / a;

    (pi_x.sin() / pi_x) * (pi_x_a.sin() / pi_x_a)
}

/// Sub-pixel samples per unit interval in the LUT.
const LANCZOS_LUT_RESOLUTION: usize = 4096;

/// Pre-computed Lanczos3 kernel over [0, 3]. The kernel is symmetric.
#[derive(Debug)]
struct LanczosLut {
    values: Vec<f32>,
}

pub(crate) const LANCZOS_A: usize = 3;

impl LanczosLut {
    fn new() -> Self {
        let num_entries = LANCZOS_A * LANCZOS_LUT_RESOLUTION + 1;

        let values = (0..num_entries)
            .map(|i| {
                let x = i as f32 / LANCZOS_LUT_RESOLUTION as f32;
                lanczos_kernel_direct(x, LANCZOS_A as f32)
            })
            .collect();

        Self { values }
    }

    #[inline]
    fn lookup(&self, x: f32) -> f32 {
        let abs_x = x.abs();
        if abs_x >= LANCZOS_A as f32 {
            return 0.0;
        }

        let idx = (abs_x * LANCZOS_LUT_RESOLUTION as f32 + 0.5) as usize;
        self.values[idx.min(self.values.len() - 1)]
    }
}

static LANCZOS3_LUT: OnceLock<LanczosLut> = OnceLock::new();

#[inline]
pub(crate) fn lanczos3_kernel(x: f32) -> f32 {
    LANCZOS3_LUT.get_or_init(LanczosLut::new).lookup(x)
}

/// Bicubic kernel value (Catmull-Rom spline, a = -0.5).
///
/// W(x) = (a+2)|x|^3 - (a+3)|x|^2 + 1       for |x| <= 1
/// W(x) = a|x|^3 - 5a|x|^2 + 8a|x| - 4a     for 1 < |x| < 2
/// W(x) = 0                                  otherwise
#[inline]
pub(crate) fn bicubic_kernel(x: f32) -> f32 {
    const A: f32 = -0.5;

    let abs_x = x.abs();

    if abs_x <= 1.0 {
        ((A + 2.0) * abs_x - (A + 3.0)) * abs_x * abs_x + 1.0
    } else if abs_x < 2.0 {
        ((A * abs_x - 5.0 * A) * abs_x + 8.0 * A) * abs_x - 4.0 * A
    } else {
        0.0
    }
}

/// Bicubic weights for the taps at floor(x) - 1 ..= floor(x) + 2, given fx = x - floor(x).
#[inline]
pub(crate) fn bicubic_weights(fx: f32) -> [f32; 4] {
    [
        bicubic_kernel(fx + 1.0),
        bicubic_kernel(fx),
        bicubic_kernel(fx - 1.0),
        bicubic_kernel(fx - 2.0),
    ]
}

/// Normalized Lanczos3 weights for the taps at floor(x) - 2 ..= floor(x) + 3.
#[inline]
pub(crate) fn lanczos3_weights(fx: f32) -> [f32; 2 * LANCZOS_A] {
    let a = LANCZOS_A as i32;
    let mut weights = [0.0f32; 2 * LANCZOS_A];
    let mut sum = 0.0f32;

    for (i, w) in weights.iter_mut().enumerate() {
        *w = lanczos3_kernel(fx - (i as i32 - a + 1) as f32);
        sum += *w;
    }

    if sum.abs() > 1e-10 {
        weights.iter_mut().for_each(|w| *w /= sum);
    }

    weights
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bicubic_interpolates_at_integers() {
        assert_eq!(bicubic_kernel(0.0), 1.0);
        assert_eq!(bicubic_kernel(1.0), 0.0);
        assert_eq!(bicubic_kernel(-1.0), 0.0);
        assert_eq!(bicubic_kernel(2.0), 0.0);
        assert_eq!(bicubic_weights(0.0), [0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn bicubic_weights_sum_to_one() {
        for i in 0..=20 {
            let fx = i as f32 / 20.0;
            let sum: f32 = bicubic_weights(fx).iter().sum();
            assert!((sum - 1.0).abs() < 1e-5, "fx={} sum={}", fx, sum);
        }
    }

    #[test]
    fn lanczos_lut_matches_direct_computation() {
        for i in 0..=300 {
            let x = i as f32 / 100.0;
            let diff = (lanczos3_kernel(x) - lanczos_kernel_direct(x, 3.0)).abs();
            assert!(diff < 1e-3, "x={} diff={}", x, diff);
            assert_eq!(lanczos3_kernel(x), lanczos3_kernel(-x));
        }
    }

    #[test]
    fn lanczos_weights_are_normalized() {
        for fx in [0.0f32, 0.25, 0.5, 0.9] {
            let sum: f32 = lanczos3_weights(fx).iter().sum();
            assert!((sum - 1.0).abs() < 1e-5);
        }
        let at_integer = lanczos3_weights(0.0);
        assert!((at_integer[2] - 1.0).abs() < 1e-5);
    }
}
