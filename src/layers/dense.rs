use rand::Rng;

use crate::{
    activation::{dsigmoid, sigmoid},
    error::{Error, Result},
    math::{matrix::Matrix, vector},
};

/// One fully connected sigmoid layer: an `input_size × size` weight matrix and
/// a bias vector of length `size`.
///
/// The same type doubles as a gradient slot, in which case it holds
/// derivatives rather than parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub weights: Matrix,
    pub biases: Vec<f64>,
}

impl Layer {
    pub fn zeros(input_size: usize, size: usize) -> Layer {
        Layer {
            weights: Matrix::zeros(input_size, size),
            biases: vec![0.0; size],
        }
    }

    /// Builds a layer from raw parts, checking the bias length against the
    /// weight columns.
    pub fn from_parts(weights: Matrix, biases: Vec<f64>) -> Result<Layer> {
        if biases.len() != weights.cols {
            return Err(Error::ShapeMismatch {
                what: "bias length vs weight columns",
                got: biases.len(),
                expected: weights.cols,
            });
        }
        Ok(Layer { weights, biases })
    }

    /// Redraws every weight, then every bias, from U(-1, 1).
    pub fn fill_uniform<R: Rng>(&mut self, weights_rng: &mut R, biases_rng: &mut R) {
        self.weights = Matrix::uniform(self.weights.rows, self.weights.cols, weights_rng);
        for b in &mut self.biases {
            *b = biases_rng.gen::<f64>() * 2.0 - 1.0;
        }
    }

    pub fn input_size(&self) -> usize {
        self.weights.rows
    }

    pub fn size(&self) -> usize {
        self.weights.cols
    }

    /// `σ(input · W + b)`.
    pub fn feed_from(&self, input: &[f64]) -> Result<Vec<f64>> {
        let z = vector::add(&self.weights.vec_mul(input)?, &self.biases)?;
        Ok(z.into_iter().map(sigmoid).collect())
    }

    /// Gradient slot for this layer given the activation it received, the
    /// activation it produced and the error at its output.
    ///
    /// `biases = σ'(output) ⊙ error`, `weights = input ⊗ biases`.
    pub fn gradient(input: &[f64], output: &[f64], error: &[f64]) -> Result<Layer> {
        let d_out: Vec<f64> = output.iter().copied().map(dsigmoid).collect();
        let biases = vector::hadamard(&d_out, error)?;
        let weights = Matrix::outer(input, &biases);
        Ok(Layer { weights, biases })
    }

    pub fn scale(&self, factor: f64) -> Layer {
        Layer {
            weights: self.weights.scale(factor),
            biases: vector::scale(&self.biases, factor),
        }
    }

    pub fn checked_add(&self, rhs: &Layer) -> Result<Layer> {
        Ok(Layer {
            weights: self.weights.checked_add(&rhs.weights)?,
            biases: vector::add(&self.biases, &rhs.biases)?,
        })
    }

    pub fn checked_sub(&self, rhs: &Layer) -> Result<Layer> {
        Ok(Layer {
            weights: self.weights.checked_sub(&rhs.weights)?,
            biases: vector::sub(&self.biases, &rhs.biases)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_layer_outputs_half() {
        let layer = Layer::zeros(3, 2);
        assert_eq!(layer.feed_from(&[0.2, 0.9, 1.0]).unwrap(), vec![0.5, 0.5]);
    }

    #[test]
    fn gradient_is_outer_product_of_input_and_delta() {
        let g = Layer::gradient(&[1.0, 0.0], &[0.5], &[-0.5]).unwrap();
        assert_eq!(g.biases, vec![-0.125]);
        assert_eq!(g.weights.data, vec![vec![-0.125], vec![0.0]]);
    }

    #[test]
    fn from_parts_checks_bias_length() {
        assert!(Layer::from_parts(Matrix::zeros(2, 3), vec![0.0; 2]).is_err());
        assert!(Layer::from_parts(Matrix::zeros(2, 3), vec![0.0; 3]).is_ok());
    }
}
