//! Pipeline parameters with 500-dpi-class defaults.

use serde::{Deserialize, Serialize};

use crate::error::InvalidConfigError;

/// Settings for [`segment`](crate::segment).
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SegmentationParams {
    /// Side of the square tiles over which the standard deviation is taken.
    pub block_size: usize,
    /// Per-tile standard deviation above which a tile counts as ridge region.
    /// Relative to a unit-variance normalized image.
    pub threshold: f64,
}

impl Default for SegmentationParams {
    fn default() -> Self {
        Self {
            block_size: 16,
            threshold: 0.1,
        }
    }
}

impl SegmentationParams {
    pub(crate) fn validate(&self) -> Result<(), InvalidConfigError> {
        if self.block_size == 0 {
            return Err(InvalidConfigError::BadBlockSize(self.block_size));
        }
        Ok(())
    }
}

/// Settings for [`estimate_orientation`](crate::estimate_orientation).
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct OrientationParams {
    /// Sigma of the derivative-of-Gaussian used for image gradients.
    pub gradient_sigma: f64,
    /// Sigma of the Gaussian pooling the structure-tensor moments.
    pub block_sigma: f64,
    /// Sigma of the final orientation smoothing; `0` disables smoothing.
    pub smooth_sigma: f64,
}

impl Default for OrientationParams {
    fn default() -> Self {
        Self {
            gradient_sigma: 1.0,
            block_sigma: 7.0,
            smooth_sigma: 7.0,
        }
    }
}

impl OrientationParams {
    pub(crate) fn validate(&self) -> Result<(), InvalidConfigError> {
        if self.gradient_sigma <= 0.0 {
            return Err(InvalidConfigError::NonPositiveSigma(self.gradient_sigma));
        }
        if self.block_sigma <= 0.0 {
            return Err(InvalidConfigError::NonPositiveSigma(self.block_sigma));
        }
        if self.smooth_sigma < 0.0 {
            return Err(InvalidConfigError::NonPositiveSigma(self.smooth_sigma));
        }
        Ok(())
    }
}

/// Settings for [`estimate_frequency_field`](crate::estimate_frequency_field)
/// and [`estimate_block_frequency`](crate::estimate_block_frequency).
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct FrequencyParams {
    /// Side of the square tiles, one frequency estimate per tile.
    pub block_size: usize,
    /// Window length of the flat dilation used to identify profile peaks.
    /// Must be a positive odd integer.
    pub window_size: usize,
    /// Smallest acceptable ridge wavelength, in pixels.
    pub min_wavelength: f64,
    /// Largest acceptable ridge wavelength, in pixels.
    pub max_wavelength: f64,
}

impl Default for FrequencyParams {
    fn default() -> Self {
        Self {
            block_size: 38,
            window_size: 5,
            min_wavelength: 5.0,
            max_wavelength: 15.0,
        }
    }
}

impl FrequencyParams {
    pub(crate) fn validate(&self) -> Result<(), InvalidConfigError> {
        if self.block_size == 0 {
            return Err(InvalidConfigError::BadBlockSize(self.block_size));
        }
        if self.window_size == 0 || self.window_size % 2 == 0 {
            return Err(InvalidConfigError::BadPeakWindow(self.window_size));
        }
        if self.min_wavelength <= 0.0 || self.max_wavelength < self.min_wavelength {
            return Err(InvalidConfigError::BadWavelengthBounds {
                min: self.min_wavelength,
                max: self.max_wavelength,
            });
        }
        Ok(())
    }
}
