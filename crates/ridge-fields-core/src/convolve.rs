//! Centered 2-D convolution with a same-size output.

use crate::Field;

/// How samples outside the source grid are supplied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Border {
    /// Out-of-range samples read as zero.
    Zero,
    /// Out-of-range samples read the nearest edge value.
    Clamp,
}

/// True 2-D convolution (kernel flipped) with the output centered on the
/// input, same shape as `src`. Kernels are expected to have odd sides so the
/// center is unambiguous.
pub fn convolve_same(src: &Field, kernel: &Field, border: Border) -> Field {
    let kr = kernel.rows as isize;
    let kc = kernel.cols as isize;
    let cr = (kr - 1) / 2;
    let cc = (kc - 1) / 2;
    let rows = src.rows as isize;
    let cols = src.cols as isize;

    Field::from_fn(src.rows, src.cols, |r, c| {
        let r = r as isize;
        let c = c as isize;
        let mut acc = 0.0;
        for i in 0..kr {
            for j in 0..kc {
                // convolution: the kernel is point-reflected about its center
                let sr = r - (i - cr);
                let sc = c - (j - cc);
                let sample = match border {
                    Border::Zero => {
                        if sr < 0 || sc < 0 || sr >= rows || sc >= cols {
                            continue;
                        }
                        src.at(sr as usize, sc as usize)
                    }
                    Border::Clamp => {
                        let sr = sr.clamp(0, rows - 1) as usize;
                        let sc = sc.clamp(0, cols - 1) as usize;
                        src.at(sr, sc)
                    }
                };
                acc += kernel.at(i as usize, j as usize) * sample;
            }
        }
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn delta3() -> Field {
        let mut k = Field::zeros(3, 3);
        k.set(1, 1, 1.0);
        k
    }

    #[test]
    fn delta_kernel_is_identity() {
        let src = Field::from_fn(4, 5, |r, c| (r * 7 + c) as f64);
        for border in [Border::Zero, Border::Clamp] {
            let out = convolve_same(&src, &delta3(), border);
            assert_eq!(out, src);
        }
    }

    #[test]
    fn offset_delta_shifts_with_flip() {
        // kernel concentrated at (0, 1): convolution shifts content down
        let mut k = Field::zeros(3, 3);
        k.set(0, 1, 1.0);
        let src = Field::from_fn(4, 4, |r, c| (r * 4 + c) as f64);
        let out = convolve_same(&src, &k, Border::Zero);
        // out(r, c) = src(r - (0 - 1), c) = src(r + 1, c)
        assert_eq!(out.at(1, 2), src.at(2, 2));
        assert_eq!(out.at(3, 0), 0.0); // zero border
    }

    #[test]
    fn clamp_border_preserves_constant_fields() {
        let src = Field::from_vec(3, 3, vec![2.0; 9]);
        let k = Field::from_vec(3, 3, vec![1.0 / 9.0; 9]);
        let out = convolve_same(&src, &k, Border::Clamp);
        for v in &out.data {
            assert_abs_diff_eq!(*v, 2.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn zero_border_attenuates_edges() {
        let src = Field::from_vec(3, 3, vec![1.0; 9]);
        let k = Field::from_vec(3, 3, vec![1.0 / 9.0; 9]);
        let out = convolve_same(&src, &k, Border::Zero);
        assert_abs_diff_eq!(out.at(1, 1), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(out.at(0, 0), 4.0 / 9.0, epsilon = 1e-12);
    }
}
