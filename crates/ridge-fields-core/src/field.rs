//! Row-major `f64` grids and boolean masks.
//!
//! These are the only data carriers exchanged between the pipeline stages:
//! plain buffers with explicit `rows × cols`, no strides, no color.

/// Row-major grid of double-precision samples.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<f64>, // len = rows * cols
}

impl Field {
    /// Zero-filled field.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Build a field from a per-cell closure `(row, col) -> value`.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Self { rows, cols, data }
    }

    /// Wrap an existing row-major buffer. `data.len()` must equal `rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        assert_eq!(data.len(), rows * cols, "row-major buffer length mismatch");
        Self { rows, cols, data }
    }

    #[inline]
    pub fn at(&self, r: usize, c: usize) -> f64 {
        self.data[r * self.cols + c]
    }

    #[inline]
    pub fn set(&mut self, r: usize, c: usize, v: f64) {
        self.data[r * self.cols + c] = v;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn same_shape(&self, other: &Field) -> bool {
        self.rows == other.rows && self.cols == other.cols
    }

    /// Arithmetic mean over all samples. `0.0` for an empty field.
    pub fn mean(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.data.iter().sum::<f64>() / self.data.len() as f64
    }

    /// Population standard deviation over all samples.
    pub fn std(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        let mean = self.mean();
        let var = self
            .data
            .iter()
            .map(|v| {
                let d = v - mean;
                d * d
            })
            .sum::<f64>()
            / self.data.len() as f64;
        var.sqrt()
    }

    /// Copy of the `rows × cols` window whose top-left corner is `(r0, c0)`.
    /// The window must lie fully inside the field.
    pub fn window(&self, r0: usize, c0: usize, rows: usize, cols: usize) -> Field {
        assert!(r0 + rows <= self.rows && c0 + cols <= self.cols);
        Field::from_fn(rows, cols, |r, c| self.at(r0 + r, c0 + c))
    }

    /// Fill the window at `(r0, c0)` of the given shape with a single value.
    pub fn fill_window(&mut self, r0: usize, c0: usize, rows: usize, cols: usize, value: f64) {
        assert!(r0 + rows <= self.rows && c0 + cols <= self.cols);
        for r in r0..r0 + rows {
            for c in c0..c0 + cols {
                self.set(r, c, value);
            }
        }
    }

    /// The field rotated by 180 degrees (both axes flipped).
    pub fn flipped(&self) -> Field {
        Field::from_fn(self.rows, self.cols, |r, c| {
            self.at(self.rows - 1 - r, self.cols - 1 - c)
        })
    }
}

/// Row-major boolean grid classifying the field of the same shape.
/// `true` marks the ridge (foreground) region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<bool>, // len = rows * cols
}

impl Mask {
    pub fn new_false(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![false; rows * cols],
        }
    }

    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Self { rows, cols, data }
    }

    #[inline]
    pub fn at(&self, r: usize, c: usize) -> bool {
        self.data[r * self.cols + c]
    }

    #[inline]
    pub fn set(&mut self, r: usize, c: usize, v: bool) {
        self.data[r * self.cols + c] = v;
    }

    /// Number of foreground cells.
    pub fn count_true(&self) -> usize {
        self.data.iter().filter(|&&b| b).count()
    }

    #[inline]
    pub fn matches_field(&self, field: &Field) -> bool {
        self.rows == field.rows && self.cols == field.cols
    }
}
