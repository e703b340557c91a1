//! Grid, kernel and resampling primitives for ridge-pattern analysis.
//!
//! This crate is intentionally small and purely numeric. It knows nothing
//! about segmentation, orientation or frequency estimation; it only provides
//! the buffers and neighborhood operations those stages are built from.

mod convolve;
mod field;
mod kernel;
mod logger;
mod resample;

pub use convolve::{convolve_same, Border};
pub use field::{Field, Mask};
pub use kernel::{gaussian_1d, gaussian_2d, gaussian_side, kernel_gradients};
pub use resample::{rotate_about_center, sample_bicubic};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;
pub use logger::init_with_level;
