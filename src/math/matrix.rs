use rand::Rng;

use crate::error::{Error, Result};

/// Dense row-major matrix of `f64`.
///
/// Vectors are plain `Vec<f64>` / `&[f64]` and are treated as row vectors, so
/// a layer transform reads `v · M`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// Fills a `rows × cols` matrix with samples from U(-1, 1) drawn from `rng`.
    pub fn uniform<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);

        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = rng.gen::<f64>() * 2.0 - 1.0;
            }
        }

        res
    }

    /// Builds a matrix from nested rows. Fails on ragged input.
    pub fn from_data(data: Vec<Vec<f64>>) -> Result<Matrix> {
        let rows = data.len();
        let cols = data.first().map_or(0, Vec::len);

        if let Some(bad) = data.iter().find(|row| row.len() != cols) {
            return Err(Error::ShapeMismatch {
                what: "matrix row length",
                got: bad.len(),
                expected: cols,
            });
        }

        Ok(Matrix { rows, cols, data })
    }

    /// Outer product `a ⊗ b`, an `a.len() × b.len()` matrix.
    pub fn outer(a: &[f64], b: &[f64]) -> Matrix {
        Matrix {
            rows: a.len(),
            cols: b.len(),
            data: a
                .iter()
                .map(|x| b.iter().map(|y| x * y).collect())
                .collect(),
        }
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .map(|row| row.iter().map(|&x| functor(x)).collect())
                .collect(),
        }
    }

    pub fn scale(&self, factor: f64) -> Matrix {
        self.map(|x| x * factor)
    }

    pub fn checked_add(&self, rhs: &Matrix) -> Result<Matrix> {
        self.zip_with(rhs, |a, b| a + b)
    }

    pub fn checked_sub(&self, rhs: &Matrix) -> Result<Matrix> {
        self.zip_with(rhs, |a, b| a - b)
    }

    /// Row vector times matrix: `v · M`, with `v.len() == rows`.
    pub fn vec_mul(&self, v: &[f64]) -> Result<Vec<f64>> {
        if v.len() != self.rows {
            return Err(Error::ShapeMismatch {
                what: "vector × matrix",
                got: v.len(),
                expected: self.rows,
            });
        }

        let mut res = vec![0.0; self.cols];
        for (x, row) in v.iter().zip(&self.data) {
            for (acc, w) in res.iter_mut().zip(row) {
                *acc += x * w;
            }
        }

        Ok(res)
    }

    /// Row vector times the transpose: `v · Mᵀ`, with `v.len() == cols`.
    pub fn vec_mul_transposed(&self, v: &[f64]) -> Result<Vec<f64>> {
        if v.len() != self.cols {
            return Err(Error::ShapeMismatch {
                what: "vector × transposed matrix",
                got: v.len(),
                expected: self.cols,
            });
        }

        Ok(self
            .data
            .iter()
            .map(|row| row.iter().zip(v).map(|(w, x)| w * x).sum::<f64>())
            .collect())
    }

    fn zip_with<F>(&self, rhs: &Matrix, op: F) -> Result<Matrix>
    where
        F: Fn(f64, f64) -> f64,
    {
        if self.rows != rhs.rows {
            return Err(Error::ShapeMismatch {
                what: "matrix rows",
                got: rhs.rows,
                expected: self.rows,
            });
        }
        if self.cols != rhs.cols {
            return Err(Error::ShapeMismatch {
                what: "matrix columns",
                got: rhs.cols,
                expected: self.cols,
            });
        }

        let data = self
            .data
            .iter()
            .zip(&rhs.data)
            .map(|(a, b)| a.iter().zip(b).map(|(&x, &y)| op(x, y)).collect())
            .collect();

        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn m(data: Vec<Vec<f64>>) -> Matrix {
        Matrix::from_data(data).unwrap()
    }

    #[test]
    fn vec_mul_is_row_vector_times_matrix() {
        let w = m(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        assert_eq!(w.vec_mul(&[1.0, 1.0]).unwrap(), vec![5.0, 7.0, 9.0]);
    }

    #[test]
    fn vec_mul_transposed_goes_back_a_layer() {
        let w = m(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        assert_eq!(
            w.vec_mul_transposed(&[1.0, 0.0, 1.0]).unwrap(),
            vec![4.0, 10.0]
        );
    }

    #[test]
    fn vec_mul_rejects_wrong_length() {
        let w = Matrix::zeros(2, 3);
        assert!(matches!(
            w.vec_mul(&[1.0, 2.0, 3.0]),
            Err(Error::ShapeMismatch { got: 3, expected: 2, .. })
        ));
    }

    #[test]
    fn outer_product_shape_and_values() {
        let o = Matrix::outer(&[1.0, 2.0], &[3.0, 4.0, 5.0]);
        assert_eq!((o.rows, o.cols), (2, 3));
        assert_eq!(o.data[1], vec![6.0, 8.0, 10.0]);
    }

    #[test]
    fn add_and_sub_require_equal_shapes() {
        let a = Matrix::zeros(2, 2);
        let b = Matrix::zeros(2, 3);
        assert!(a.checked_add(&b).is_err());
        assert!(a.checked_sub(&b).is_err());
    }

    #[test]
    fn from_data_rejects_ragged_rows() {
        assert!(Matrix::from_data(vec![vec![1.0, 2.0], vec![3.0]]).is_err());
    }

    #[test]
    fn uniform_is_bounded_and_seeded() {
        let a = Matrix::uniform(4, 5, &mut StdRng::seed_from_u64(7));
        let b = Matrix::uniform(4, 5, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
        assert!(a.data.iter().flatten().all(|x| (-1.0..1.0).contains(x)));
    }
}
