//! Dominant ridge frequency of a single image block.
//!
//! The block is rotated so ridges run vertically, projected down the columns
//! and scanned for periodic peaks. The result is a uniform block: either the
//! detected frequency or all zeros when the evidence is insufficient.

use std::f64::consts::{FRAC_PI_2, SQRT_2};

use nalgebra::Vector2;
use ridge_fields_core::{rotate_about_center, Field};

use crate::error::InvalidConfigError;
use crate::params::FrequencyParams;

/// Absolute tolerance for matching a profile sample against its flat
/// dilation. A true local maximum equals its own window maximum exactly; the
/// band additionally admits near-tied neighbors within 2 grey-sum units.
const PEAK_TOLERANCE: f64 = 2.0;

/// Mean orientation of a block in doubled-angle space.
///
/// Averages `(cos 2θ, sin 2θ)` over the block and halves the resulting
/// angle, which is safe across the `0 ≡ π` wraparound.
fn mean_block_orientation(orientation_block: &Field) -> f64 {
    let mut sum = Vector2::<f64>::zeros();
    for &theta in &orientation_block.data {
        let two_theta = 2.0 * theta;
        sum += Vector2::new(two_theta.cos(), two_theta.sin());
    }
    let mean = sum / orientation_block.len() as f64;
    mean.y.atan2(mean.x) / 2.0
}

/// Flat grey-scale dilation of a 1-D profile with an odd window.
fn dilate_profile(profile: &[f64], window: usize) -> Vec<f64> {
    let half = window / 2;
    let n = profile.len();
    (0..n)
        .map(|j| {
            let lo = j.saturating_sub(half);
            let hi = (j + half).min(n - 1);
            profile[lo..=hi]
                .iter()
                .fold(f64::NEG_INFINITY, |m, &v| m.max(v))
        })
        .collect()
}

/// Positions that are local maxima of the profile: within tolerance of their
/// own dilation and above the profile mean.
///
/// Positions whose dilation window is truncated by the profile boundary are
/// excluded. A truncated end sample is trivially its own window maximum, so a
/// profile merely rising into the crop edge would read as a peak there and
/// corrupt the wavelength estimate.
fn detect_peaks(profile: &[f64], window: usize) -> Vec<usize> {
    let n = profile.len();
    if n < window {
        return Vec::new();
    }
    let half = window / 2;
    let dilated = dilate_profile(profile, window);
    let mean = profile.iter().sum::<f64>() / n as f64;
    let mut peaks = Vec::new();
    for j in half..n - half {
        let p = profile[j];
        if (dilated[j] - p).abs() < PEAK_TOLERANCE && p > mean {
            peaks.push(j);
        }
    }
    peaks
}

pub(crate) fn block_frequency(
    block: &Field,
    orientation_block: &Field,
    params: &FrequencyParams,
) -> Field {
    let rows = block.rows;
    let cols = block.cols;

    let orient = mean_block_orientation(orientation_block);

    // Rotate so the ridges run down the columns, then keep only the central
    // square untouched by rotation artifacts.
    let rotated = rotate_about_center(block, orient + FRAC_PI_2);
    let side = (rows as f64 / SQRT_2).floor() as usize;
    if side == 0 {
        return Field::zeros(rows, cols);
    }
    let offset = (rows - side) / 2;
    let col_end = (offset + side).min(cols);
    if offset >= col_end {
        return Field::zeros(rows, cols);
    }

    // Project the cropped square down its columns.
    let profile: Vec<f64> = (offset..col_end)
        .map(|c| (offset..offset + side).map(|r| rotated.at(r, c)).sum())
        .collect();

    let peaks = detect_peaks(&profile, params.window_size);
    if peaks.len() < 2 {
        return Field::zeros(rows, cols);
    }

    let first = peaks[0];
    let last = peaks[peaks.len() - 1];
    let wavelength = (last - first) as f64 / (peaks.len() - 1) as f64;
    if wavelength >= params.min_wavelength && wavelength <= params.max_wavelength {
        Field::from_vec(rows, cols, vec![1.0 / wavelength; rows * cols])
    } else {
        Field::zeros(rows, cols)
    }
}

/// Estimate the ridge frequency of one block given its orientation block.
///
/// The output has the block's shape and a single uniform value: `1/wavelength`
/// when a plausible ridge spacing is found, `0` otherwise. Too few peaks or a
/// wavelength outside the configured bounds is a legitimate zero result, not
/// an error.
pub fn estimate_block_frequency(
    block: &Field,
    orientation_block: &Field,
    params: &FrequencyParams,
) -> Result<Field, InvalidConfigError> {
    params.validate()?;
    if !block.same_shape(orientation_block) {
        return Err(InvalidConfigError::ShapeMismatch {
            what: "orientation block",
            expected_rows: block.rows,
            expected_cols: block.cols,
            rows: orientation_block.rows,
            cols: orientation_block.cols,
        });
    }
    Ok(block_frequency(block, orientation_block, params))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::PI;

    const TAU: f64 = 2.0 * PI;

    fn vertical_ridge_block(side: usize, period: f64) -> (Field, Field) {
        let block = Field::from_fn(side, side, |_, c| (TAU * c as f64 / period).cos());
        let orientation = Field::from_vec(side, side, vec![FRAC_PI_2; side * side]);
        (block, orientation)
    }

    #[test]
    fn mean_orientation_survives_the_wraparound() {
        // angles straddling 0 ≡ π: naive averaging would give π/2
        let block = Field::from_vec(1, 4, vec![0.05, PI - 0.05, 0.03, PI - 0.03]);
        let orient = mean_block_orientation(&block);
        assert_abs_diff_eq!(orient, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn dilation_takes_the_window_maximum() {
        let profile = [0.0, 3.0, 1.0, 0.0, 5.0, 2.0];
        let dilated = dilate_profile(&profile, 3);
        assert_eq!(dilated, vec![3.0, 3.0, 3.0, 5.0, 5.0, 5.0]);
    }

    #[test]
    fn recovers_the_wavelength_of_vertical_ridges() {
        let (block, orientation) = vertical_ridge_block(38, 10.0);
        // scale to a realistic normalized amplitude so the peak tolerance
        // separates neighbors
        let block = Field::from_vec(38, 38, block.data.iter().map(|v| v * SQRT_2).collect());
        let freq = estimate_block_frequency(&block, &orientation, &FrequencyParams::default())
            .unwrap();
        for &v in &freq.data {
            assert_relative_eq!(v, 0.1, max_relative = 0.05);
        }
    }

    #[test]
    fn rising_profile_end_is_not_a_peak() {
        // phase offset places a ridge crest just outside the cropped square;
        // the profile rises into the crop edge there, and counting that end
        // as a peak would skew the wavelength to 9 instead of 10
        let block = Field::from_fn(38, 38, |_, c| {
            SQRT_2 * (TAU * (c as f64 + 76.0) / 10.0).cos()
        });
        let orientation = Field::from_vec(38, 38, vec![FRAC_PI_2; 38 * 38]);
        let freq = estimate_block_frequency(&block, &orientation, &FrequencyParams::default())
            .unwrap();
        for &v in &freq.data {
            assert_relative_eq!(v, 0.1, max_relative = 0.05);
        }
    }

    #[test]
    fn recovers_the_wavelength_of_oblique_ridges() {
        // intensity varies along the 30-degree direction, flow at 120 degrees
        let phi = PI / 6.0;
        let block = Field::from_fn(38, 38, |r, c| {
            let t = c as f64 * phi.cos() + r as f64 * phi.sin();
            SQRT_2 * (TAU * t / 10.0).cos()
        });
        let orientation = Field::from_vec(38, 38, vec![phi + FRAC_PI_2; 38 * 38]);
        let freq = estimate_block_frequency(&block, &orientation, &FrequencyParams::default())
            .unwrap();
        assert!(freq.data[0] > 0.0, "expected a detected frequency");
        assert_relative_eq!(freq.data[0], 0.1, max_relative = 0.1);
    }

    #[test]
    fn constant_block_yields_zeros_not_an_error() {
        let block = Field::from_vec(38, 38, vec![1.0; 38 * 38]);
        let orientation = Field::from_vec(38, 38, vec![FRAC_PI_2; 38 * 38]);
        let freq = estimate_block_frequency(&block, &orientation, &FrequencyParams::default())
            .unwrap();
        assert!(freq.data.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn wavelength_outside_bounds_yields_zeros() {
        // period 20 exceeds max_wavelength 15; amplitude large enough that
        // the dilation tolerance keeps the two peaks isolated
        let block = Field::from_fn(38, 38, |_, c| 3.0 * (TAU * (c as f64 - 9.0) / 20.0).cos());
        let orientation = Field::from_vec(38, 38, vec![FRAC_PI_2; 38 * 38]);
        let freq = estimate_block_frequency(&block, &orientation, &FrequencyParams::default())
            .unwrap();
        assert!(freq.data.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn too_few_periods_yield_zeros() {
        // less than one full period in the cropped square: a single peak
        let (block, orientation) = vertical_ridge_block(38, 80.0);
        let freq = estimate_block_frequency(&block, &orientation, &FrequencyParams::default())
            .unwrap();
        assert!(freq.data.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn mismatched_orientation_shape_is_a_config_error() {
        let block = Field::zeros(38, 38);
        let orientation = Field::zeros(19, 19);
        let err = estimate_block_frequency(&block, &orientation, &FrequencyParams::default())
            .unwrap_err();
        assert!(matches!(err, InvalidConfigError::ShapeMismatch { .. }));
    }
}
