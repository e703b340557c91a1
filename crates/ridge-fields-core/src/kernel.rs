//! Gaussian kernels and their directional derivatives.

use crate::Field;

/// Kernel side for a given sigma: `⌊6σ⌋` rounded up to the nearest odd
/// integer, never below 1. An odd side keeps the centered correlation
/// symmetric around the output pixel.
pub fn gaussian_side(sigma: f64) -> usize {
    let side = (6.0 * sigma).floor() as usize;
    if side % 2 == 0 {
        side + 1
    } else {
        side
    }
}

/// 1-D Gaussian samples of the given side, normalized to unit sum.
pub fn gaussian_1d(side: usize, sigma: f64) -> Vec<f64> {
    let center = (side as f64 - 1.0) / 2.0;
    let inv_two_sigma2 = 1.0 / (2.0 * sigma * sigma);
    let mut k: Vec<f64> = (0..side)
        .map(|i| {
            let d = i as f64 - center;
            (-d * d * inv_two_sigma2).exp()
        })
        .collect();
    let sum: f64 = k.iter().sum();
    for v in &mut k {
        *v /= sum;
    }
    k
}

/// 2-D Gaussian kernel: separable product of a unit-sum 1-D Gaussian with
/// its transpose. Side is `gaussian_side(sigma)`.
pub fn gaussian_2d(sigma: f64) -> Field {
    let side = gaussian_side(sigma);
    let g = gaussian_1d(side, sigma);
    Field::from_fn(side, side, |r, c| g[r] * g[c])
}

/// Central-difference derivatives of a kernel along rows and columns,
/// one-sided at the borders. Returns `(d_rows, d_cols)`.
pub fn kernel_gradients(kernel: &Field) -> (Field, Field) {
    let rows = kernel.rows;
    let cols = kernel.cols;

    let d_rows = Field::from_fn(rows, cols, |r, c| {
        if rows == 1 {
            0.0
        } else if r == 0 {
            kernel.at(1, c) - kernel.at(0, c)
        } else if r == rows - 1 {
            kernel.at(rows - 1, c) - kernel.at(rows - 2, c)
        } else {
            (kernel.at(r + 1, c) - kernel.at(r - 1, c)) / 2.0
        }
    });

    let d_cols = Field::from_fn(rows, cols, |r, c| {
        if cols == 1 {
            0.0
        } else if c == 0 {
            kernel.at(r, 1) - kernel.at(r, 0)
        } else if c == cols - 1 {
            kernel.at(r, cols - 1) - kernel.at(r, cols - 2)
        } else {
            (kernel.at(r, c + 1) - kernel.at(r, c - 1)) / 2.0
        }
    });

    (d_rows, d_cols)
}
