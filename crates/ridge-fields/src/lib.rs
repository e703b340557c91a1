//! Ridge-pattern analysis for directional (Gabor) enhancement.
//!
//! Given a grayscale ridge impression (fingerprint-like), this crate produces
//! the three fields a Gabor enhancement filter consumes:
//!
//! 1. [`segment`] — a normalized image plus a foreground mask,
//! 2. [`estimate_orientation`] — a dense ridge-flow direction field in
//!    `[0, π)`, computed from a smoothed gradient structure tensor in the
//!    doubled-angle representation,
//! 3. [`estimate_frequency_field`] — a per-block ridge-frequency field and a
//!    representative whole-image frequency.
//!
//! Filter construction, image decoding and binarization are left to callers;
//! [`broadcast_through_mask`] builds the frequency input the filter expects
//! from the representative value.
//!
//! ## Quickstart
//!
//! ```
//! use ridge_fields::{
//!     broadcast_through_mask, estimate_frequency_field, estimate_orientation, segment,
//!     Field, FrequencyParams, OrientationParams, SegmentationParams,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // synthetic vertical ridges with an 8-pixel period
//! let image = Field::from_fn(64, 64, |_, c| {
//!     (2.0 * std::f64::consts::PI * c as f64 / 8.0).cos()
//! });
//!
//! let (normalized, mask) = segment(&image, &SegmentationParams::default())?;
//! let orientation = estimate_orientation(&normalized, &OrientationParams::default())?;
//! let freq = estimate_frequency_field(
//!     &normalized,
//!     &mask,
//!     &orientation,
//!     &FrequencyParams::default(),
//! )?;
//!
//! // the filter input: the representative frequency broadcast through the mask
//! let filter_freq = broadcast_through_mask(freq.representative, &mask);
//! assert_eq!(filter_freq.rows, 64);
//! # Ok(())
//! # }
//! ```

mod block_freq;
mod error;
mod freq_field;
mod orientation;
mod params;
mod segment;

pub use block_freq::estimate_block_frequency;
pub use error::{AnalysisError, DegenerateInputError, InvalidConfigError};
pub use freq_field::{broadcast_through_mask, estimate_frequency_field, FrequencyEstimate};
pub use orientation::estimate_orientation;
pub use params::{FrequencyParams, OrientationParams, SegmentationParams};
pub use segment::{normalize, segment};

pub use ridge_fields_core::{Field, Mask};
