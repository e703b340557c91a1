//! End-to-end scenarios: segmentation -> orientation -> frequency field.

use std::f64::consts::{FRAC_PI_2, PI};

use approx::assert_relative_eq;
use ridge_fields::{
    broadcast_through_mask, estimate_frequency_field, estimate_orientation, segment,
    AnalysisError, DegenerateInputError, Field, FrequencyParams, OrientationParams,
    SegmentationParams,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// 128x128 vertical sinusoidal ridges with a 10-pixel period.
fn ridge_image() -> Field {
    Field::from_fn(128, 128, |_, c| (2.0 * PI * c as f64 / 10.0).cos())
}

#[test]
fn full_pipeline_on_synthetic_ridges() {
    init_logging();
    let image = ridge_image();

    let (normalized, mask) = segment(&image, &SegmentationParams::default()).unwrap();
    assert_eq!(mask.count_true(), 128 * 128, "uniform ridges mask fully");

    let orientation = estimate_orientation(&normalized, &OrientationParams::default()).unwrap();
    for &theta in &orientation.data {
        assert!((0.0..PI).contains(&theta));
    }
    // vertical ridges flow along the rows
    let mid = orientation.at(64, 64);
    let dist = (mid - FRAC_PI_2).abs().min(PI - (mid - FRAC_PI_2).abs());
    assert!(dist < 0.05, "expected flow near pi/2, got {mid}");

    let est = estimate_frequency_field(
        &normalized,
        &mask,
        &orientation,
        &FrequencyParams::default(),
    )
    .unwrap();

    // 38-px tiles at origins 0/38/76 cover rows and cols 0..114; the
    // 14-pixel trailing strip is never visited
    for r in 0..128 {
        for c in 0..128 {
            let v = est.field.at(r, c);
            if r >= 114 || c >= 114 {
                assert_eq!(v, 0.0, "trailing strip at ({r}, {c})");
            } else {
                assert_relative_eq!(v, 0.1, max_relative = 0.05);
            }
        }
    }
    assert_relative_eq!(est.representative, 0.1, max_relative = 0.05);

    // the filter-side input keeps the representative value on the mask
    let filter_freq = broadcast_through_mask(est.representative, &mask);
    assert_relative_eq!(filter_freq.at(120, 120), est.representative);
}

#[test]
fn flat_image_is_rejected_at_segmentation() {
    init_logging();
    let image = Field::from_vec(64, 64, vec![0.25; 64 * 64]);
    let err = segment(&image, &SegmentationParams::default()).unwrap_err();
    assert_eq!(
        err,
        AnalysisError::DegenerateInput(DegenerateInputError::ConstantImage)
    );
}

#[test]
fn background_only_image_yields_no_frequency() {
    init_logging();
    // a mask that marks everything as background must surface an error, not
    // NaN statistics over an empty set
    let image = ridge_image();
    let (normalized, _) = segment(&image, &SegmentationParams::default()).unwrap();
    let orientation = estimate_orientation(&normalized, &OrientationParams::default()).unwrap();
    let background = ridge_fields::Mask::new_false(128, 128);
    let err = estimate_frequency_field(
        &normalized,
        &background,
        &orientation,
        &FrequencyParams::default(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        AnalysisError::DegenerateInput(DegenerateInputError::NoValidFrequency)
    );
}
