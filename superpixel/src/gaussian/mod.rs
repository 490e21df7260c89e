//! Separable Gaussian pre-smoothing.
//!
//! Only the non-negative half of the kernel is stored; tap `i > 0` is applied
//! to both the left and the right neighbour. Each pass convolves rows and
//! writes its result transposed, so two passes blur both axes and restore the
//! original orientation.


use crate::error::Result;
use crate::pixel::{Image, Pixel, PixelAccessor};

/// Smallest accepted sigma; lower values are clamped to it.
pub const MIN_SIGMA: f64 = 0.01;

/// Kernel support in units of sigma, beyond the sigma itself.
const KERNEL_SUPPORT: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianSmoother {
    sigma: f64,
}

impl GaussianSmoother {
    pub fn new(sigma: f64) -> Self {
        Self {
            sigma: sigma.max(MIN_SIGMA),
        }
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Normalized half kernel: `kernel[0] + 2 * sum(kernel[1..]) == 1`.
    pub fn kernel(&self) -> Vec<f64> {
        let mut kernel = half_kernel(self.sigma);
        normalize(&mut kernel);
        kernel
    }

    /// Returns a blurred copy of `image` in the same pixel format.
    pub fn smooth<P: PixelAccessor>(&self, image: &P) -> Result<Image> {
        let kernel = self.kernel();

        let transposed = convolve_rows_transposed(image, &kernel)?;
        let smoothed = convolve_rows_transposed(&transposed, &kernel)?;

        tracing::debug!(
            sigma = self.sigma,
            taps = kernel.len(),
            width = smoothed.width(),
            height = smoothed.height(),
            "Smoothed image"
        );

        Ok(smoothed)
    }
}

fn half_kernel(sigma: f64) -> Vec<f64> {
    let len = (sigma + KERNEL_SUPPORT + 0.5).floor() as usize + 1;
    (0..len)
        .map(|i| {
            let t = i as f64 / sigma;
            (-0.5 * t * t).exp()
        })
        .collect()
}

fn normalize(kernel: &mut [f64]) {
    let tail: f64 = kernel[1..].iter().map(|v| v.abs()).sum();
    let norm = 2.0 * tail + kernel[0].abs();
    for v in kernel.iter_mut() {
        *v /= norm;
    }
}

/// Convolves every row of `input` with the symmetric half `kernel` and stores
/// pixel `(x, y)` at `(y, x)` of the result. Offsets past either end of a row
/// are clamped to the border pixel.
fn convolve_rows_transposed<P: PixelAccessor>(input: &P, kernel: &[f64]) -> Result<Image> {
    let width = input.width();
    let height = input.height();
    let mut output = Image::new(height, width, input.format());

    if width == 0 {
        return Ok(output);
    }

    let mut row: Vec<[f64; 4]> = Vec::with_capacity(width);

    for y in 0..height {
        row.clear();
        for x in 0..width {
            row.push(input.get(x, y)?.channels().map(f64::from));
        }

        for x in 0..width {
            let mut sum = row[x].map(|c| c * kernel[0]);

            for (i, &weight) in kernel.iter().enumerate().skip(1) {
                let left = &row[x.saturating_sub(i)];
                let right = &row[(x + i).min(width - 1)];
                for ((s, l), r) in sum.iter_mut().zip(left).zip(right) {
                    *s += weight * (l + r);
                }
            }

            output.set(y, x, Pixel::from_channels(sum.map(truncate_sample)))?;
        }
    }

    Ok(output)
}

/// Drops the fractional part and clamps into the 8-bit range.
#[inline]
fn truncate_sample(value: f64) -> u8 {
    value.clamp(0.0, u8::MAX as f64) as u8
}
