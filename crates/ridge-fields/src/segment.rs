//! Image normalization and ridge-region segmentation.

use log::debug;
use ridge_fields_core::{Field, Mask};

use crate::error::{AnalysisError, DegenerateInputError};
use crate::params::SegmentationParams;

/// Normalize an image to zero mean and unit (population) standard deviation.
pub fn normalize(image: &Field) -> Result<Field, DegenerateInputError> {
    let mean = image.mean();
    let std = image.std();
    if std == 0.0 {
        return Err(DegenerateInputError::ConstantImage);
    }
    Ok(Field::from_fn(image.rows, image.cols, |r, c| {
        (image.at(r, c) - mean) / std
    }))
}

/// Normalize an image and derive the ridge-region mask.
///
/// The normalized image is conceptually zero-padded to the next multiple of
/// `block_size`, each tile's standard deviation is broadcast over the tile,
/// and pixels whose tile statistic exceeds the threshold form the mask. The
/// whole image is then renormalized with the mean/std taken over the masked
/// pixels only, so that the ridge region ends up with zero mean and unit
/// standard deviation.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "info", skip(image, params), fields(rows = image.rows, cols = image.cols))
)]
pub fn segment(
    image: &Field,
    params: &SegmentationParams,
) -> Result<(Field, Mask), AnalysisError> {
    params.validate()?;
    let normalized = normalize(image)?;

    let bs = params.block_size;
    let padded_rows = image.rows.div_ceil(bs) * bs;
    let padded_cols = image.cols.div_ceil(bs) * bs;

    let mut padded = Field::zeros(padded_rows, padded_cols);
    for r in 0..image.rows {
        for c in 0..image.cols {
            padded.set(r, c, normalized.at(r, c));
        }
    }

    // Per-tile standard deviation, broadcast over the tile and cropped back
    // to the input shape.
    let mut mask = Mask::new_false(image.rows, image.cols);
    for tile_r in (0..padded_rows).step_by(bs) {
        for tile_c in (0..padded_cols).step_by(bs) {
            let tile = padded.window(tile_r, tile_c, bs, bs);
            let ridge = tile.std() > params.threshold;
            for r in tile_r..(tile_r + bs).min(image.rows) {
                for c in tile_c..(tile_c + bs).min(image.cols) {
                    mask.set(r, c, ridge);
                }
            }
        }
    }

    let selected = mask.count_true();
    debug!(
        "segmentation mask covers {selected}/{} pixels",
        image.rows * image.cols
    );
    if selected == 0 {
        return Err(DegenerateInputError::EmptyMask.into());
    }

    // Renormalize every pixel with foreground-only statistics.
    let mut sum = 0.0;
    for r in 0..image.rows {
        for c in 0..image.cols {
            if mask.at(r, c) {
                sum += normalized.at(r, c);
            }
        }
    }
    let fg_mean = sum / selected as f64;

    let mut var_sum = 0.0;
    for r in 0..image.rows {
        for c in 0..image.cols {
            if mask.at(r, c) {
                let d = normalized.at(r, c) - fg_mean;
                var_sum += d * d;
            }
        }
    }
    let fg_std = (var_sum / selected as f64).sqrt();
    if fg_std == 0.0 {
        return Err(DegenerateInputError::ConstantImage.into());
    }

    let renormalized = Field::from_fn(image.rows, image.cols, |r, c| {
        (normalized.at(r, c) - fg_mean) / fg_std
    });

    Ok((renormalized, mask))
}
