//! Dense ridge-orientation estimation from a gradient structure tensor.
//!
//! Orientations are undirected (a ridge has no forward direction), so all
//! averaging and smoothing happens on the sine/cosine of the doubled angle;
//! averaging raw angles cancels near the `0 ≡ π` wraparound.

use std::f64::consts::{FRAC_PI_2, PI};

use log::debug;
use ridge_fields_core::{convolve_same, gaussian_2d, kernel_gradients, Border, Field};

use crate::error::InvalidConfigError;
use crate::params::OrientationParams;

/// Wrap an angle to `[0, π)`.
pub(crate) fn wrap_angle_pi(theta: f64) -> f64 {
    let mut t = theta % PI;
    if t < 0.0 {
        t += PI;
    }
    t
}

/// Estimate the per-pixel ridge-flow direction of a normalized image.
///
/// Returns a field of radians in `[0, π)`, same shape as the input. The
/// gradient direction is perpendicular to ridge flow, hence the `π/2` offset
/// in the final angle.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "info", skip(image, params), fields(rows = image.rows, cols = image.cols))
)]
pub fn estimate_orientation(
    image: &Field,
    params: &OrientationParams,
) -> Result<Field, InvalidConfigError> {
    params.validate()?;

    // Gradient of Gaussian: derive the kernel, not the image.
    let gauss = gaussian_2d(params.gradient_sigma);
    let (d_rows, d_cols) = kernel_gradients(&gauss);
    let gx = convolve_same(image, &d_cols, Border::Zero);
    let gy = convolve_same(image, &d_rows, Border::Zero);

    let n = image.len();
    let mut gxx = Field::zeros(image.rows, image.cols);
    let mut gyy = Field::zeros(image.rows, image.cols);
    let mut gxy = Field::zeros(image.rows, image.cols);
    for i in 0..n {
        let x = gx.data[i];
        let y = gy.data[i];
        gxx.data[i] = x * x;
        gyy.data[i] = y * y;
        gxy.data[i] = 2.0 * x * y;
    }

    // Pool the structure-tensor moments over a neighborhood.
    let pool = gaussian_2d(params.block_sigma);
    let gxx = convolve_same(&gxx, &pool, Border::Clamp);
    let gyy = convolve_same(&gyy, &pool, Border::Clamp);
    let gxy = convolve_same(&gxy, &pool, Border::Clamp);

    let mut sin2 = Field::zeros(image.rows, image.cols);
    let mut cos2 = Field::zeros(image.rows, image.cols);
    for i in 0..n {
        let diff = gxx.data[i] - gyy.data[i];
        let cross = gxy.data[i];
        let denom = (cross * cross + diff * diff).sqrt() + f64::EPSILON;
        sin2.data[i] = cross / denom;
        cos2.data[i] = diff / denom;
    }

    let (sin2, cos2) = if params.smooth_sigma > 0.0 {
        let smooth = gaussian_2d(params.smooth_sigma);
        (
            convolve_same(&sin2, &smooth, Border::Clamp),
            convolve_same(&cos2, &smooth, Border::Clamp),
        )
    } else {
        (sin2, cos2)
    };

    debug!(
        "orientation field {}x{} (gradient kernel {}, pooling kernel {})",
        image.rows, image.cols, gauss.rows, pool.rows
    );

    Ok(Field::from_fn(image.rows, image.cols, |r, c| {
        let i = r * image.cols + c;
        wrap_angle_pi(FRAC_PI_2 + sin2.data[i].atan2(cos2.data[i]) / 2.0)
    }))
}
