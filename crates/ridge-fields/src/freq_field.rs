//! Full-resolution ridge-frequency field assembled from per-block estimates.

use log::debug;
use ridge_fields_core::{Field, Mask};

use crate::block_freq::block_frequency;
use crate::error::{AnalysisError, DegenerateInputError, InvalidConfigError};
use crate::params::FrequencyParams;

/// Frequency field plus the whole-image summary statistic.
#[derive(Clone, Debug)]
pub struct FrequencyEstimate {
    /// Per-pixel frequency, uniform within each estimated block, `0` where
    /// undetermined (unvisited trailing strip, background, or no evidence).
    pub field: Field,
    /// Mean of the strictly positive entries. Downstream Gabor callers have
    /// historically labelled this value the median frequency; it carries the
    /// mean, and the true median is only logged.
    pub representative: f64,
}

fn median(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

fn check_shape(
    what: &'static str,
    rows: usize,
    cols: usize,
    image: &Field,
) -> Result<(), InvalidConfigError> {
    if rows != image.rows || cols != image.cols {
        return Err(InvalidConfigError::ShapeMismatch {
            what,
            expected_rows: image.rows,
            expected_cols: image.cols,
            rows,
            cols,
        });
    }
    Ok(())
}

/// Tile the image, estimate one ridge frequency per tile and assemble the
/// full-resolution frequency field.
///
/// Tiling steps by `block_size` from the origin and stops once the remaining
/// rows or columns are smaller than `block_size`; the trailing bottom/right
/// strip is never visited and stays at zero. Tile writes are disjoint by
/// construction. Background pixels are zeroed through the mask, and the mean
/// of the remaining positive entries is returned as the representative
/// frequency.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        level = "info",
        skip(image, mask, orientation, params),
        fields(rows = image.rows, cols = image.cols, block = params.block_size)
    )
)]
pub fn estimate_frequency_field(
    image: &Field,
    mask: &Mask,
    orientation: &Field,
    params: &FrequencyParams,
) -> Result<FrequencyEstimate, AnalysisError> {
    params.validate()?;
    check_shape("mask", mask.rows, mask.cols, image)?;
    check_shape("orientation field", orientation.rows, orientation.cols, image)?;

    let bs = params.block_size;
    let mut field = Field::zeros(image.rows, image.cols);

    let mut visited = 0usize;
    let mut determined = 0usize;
    let mut r = 0;
    while r + bs <= image.rows {
        let mut c = 0;
        while c + bs <= image.cols {
            let block = image.window(r, c, bs, bs);
            let orientation_block = orientation.window(r, c, bs, bs);
            let freq_block = block_frequency(&block, &orientation_block, params);
            // uniform per block; one representative sample is enough
            let value = freq_block.data[0];
            field.fill_window(r, c, bs, bs, value);
            visited += 1;
            if value > 0.0 {
                determined += 1;
            }
            c += bs;
        }
        r += bs;
    }
    debug!("frequency blocks: {determined}/{visited} determined");

    // Explicit elementwise mask application, no implicit broadcast.
    for r in 0..field.rows {
        for c in 0..field.cols {
            if !mask.at(r, c) {
                field.set(r, c, 0.0);
            }
        }
    }

    let mut valid: Vec<f64> = field.data.iter().copied().filter(|&v| v > 0.0).collect();
    if valid.is_empty() {
        return Err(DegenerateInputError::NoValidFrequency.into());
    }
    valid.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mean = valid.iter().sum::<f64>() / valid.len() as f64;
    let med = median(&valid);
    debug!(
        "valid frequency entries: {} (mean {mean:.5}, median {med:.5})",
        valid.len()
    );

    Ok(FrequencyEstimate {
        field,
        representative: mean,
    })
}

/// Broadcast a single frequency value through a mask: `value` on foreground
/// cells, `0` elsewhere. This is the shape the external Gabor filter expects
/// as its frequency input.
pub fn broadcast_through_mask(value: f64, mask: &Mask) -> Field {
    Field::from_fn(mask.rows, mask.cols, |r, c| {
        if mask.at(r, c) {
            value
        } else {
            0.0
        }
    })
}
