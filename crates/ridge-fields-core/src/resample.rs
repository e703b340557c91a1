//! Bicubic resampling and shape-preserving block rotation.
//!
//! Interpolation policy is pinned: Keys cubic convolution (a = -0.5) with
//! clamp-to-edge coordinates. Peak-detection tolerances downstream depend on
//! this choice, so it is not configurable.

use crate::Field;

/// Keys cubic convolution weight, a = -0.5.
#[inline]
fn cubic_weight(t: f64) -> f64 {
    const A: f64 = -0.5;
    let t = t.abs();
    if t <= 1.0 {
        ((A + 2.0) * t - (A + 3.0)) * t * t + 1.0
    } else if t < 2.0 {
        ((A * t - 5.0 * A) * t + 8.0 * A) * t - 4.0 * A
    } else {
        0.0
    }
}

#[inline]
fn get_clamped(src: &Field, r: isize, c: isize) -> f64 {
    let r = r.clamp(0, src.rows as isize - 1) as usize;
    let c = c.clamp(0, src.cols as isize - 1) as usize;
    src.at(r, c)
}

/// Bicubic sample at real coordinates (`x` along columns, `y` along rows).
/// Coordinates outside the grid read the nearest edge value.
pub fn sample_bicubic(src: &Field, x: f64, y: f64) -> f64 {
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;
    let x0 = x0 as isize;
    let y0 = y0 as isize;

    let mut acc = 0.0;
    for n in -1..=2isize {
        let wy = cubic_weight(fy - n as f64);
        if wy == 0.0 {
            continue;
        }
        let mut row_acc = 0.0;
        for m in -1..=2isize {
            let wx = cubic_weight(fx - m as f64);
            row_acc += wx * get_clamped(src, y0 + n, x0 + m);
        }
        acc += wy * row_acc;
    }
    acc
}

/// Rotate a block about its center, keeping the shape.
///
/// Output pixel `(r, c)` samples the input at
/// `center + R(angle) · ((c, r) - center)` with `center = ((cols-1)/2,
/// (rows-1)/2)`; content therefore rotates by `-angle`. Samples falling
/// outside the block clamp to the edge.
pub fn rotate_about_center(src: &Field, angle_rad: f64) -> Field {
    let (sin_a, cos_a) = angle_rad.sin_cos();
    let cx = (src.cols as f64 - 1.0) / 2.0;
    let cy = (src.rows as f64 - 1.0) / 2.0;

    Field::from_fn(src.rows, src.cols, |r, c| {
        let dx = c as f64 - cx;
        let dy = r as f64 - cy;
        let x = cos_a * dx - sin_a * dy + cx;
        let y = sin_a * dx + cos_a * dy + cy;
        sample_bicubic(src, x, y)
    })
}
