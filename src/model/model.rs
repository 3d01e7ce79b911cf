use rand::{rngs::StdRng, SeedableRng};
use rayon::prelude::*;

use crate::{
    error::{Error, Result},
    layers::dense::Layer,
};

/// How `Model::randomize` seeds each layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SeedMode {
    /// Every weight matrix and bias vector restarts from the same seed, so
    /// layers of equal shape receive identical values.
    #[default]
    Shared,
    /// Each layer gets its own seed derived from the base seed and its index.
    PerLayer,
}

/// Weights and biases of a feedforward sigmoid network.
///
/// `sizes` holds `L + 1` layer widths; layer `i` maps `sizes[i]` activations
/// to `sizes[i + 1]`. A `Model` is a plain value: arithmetic returns a new
/// instance and never aliases the operands. Gradients share this type.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    sizes: Vec<usize>,
    layers: Vec<Layer>,
}

impl Model {
    /// Zero-initialized model for the given layer widths.
    pub fn new(sizes: &[usize]) -> Result<Model> {
        if sizes.len() < 2 || sizes.contains(&0) {
            return Err(Error::InvalidLayerSizes {
                got: sizes.to_vec(),
            });
        }

        let layers = sizes
            .windows(2)
            .map(|pair| Layer::zeros(pair[0], pair[1]))
            .collect();

        Ok(Model {
            sizes: sizes.to_vec(),
            layers,
        })
    }

    /// Builds a model from already-shaped layers, deriving `sizes` from them.
    pub fn from_layers(layers: Vec<Layer>) -> Result<Model> {
        let first = layers.first().ok_or(Error::InvalidLayerSizes { got: vec![] })?;

        let mut sizes = Vec::with_capacity(layers.len() + 1);
        sizes.push(first.input_size());
        for (i, layer) in layers.iter().enumerate() {
            if layer.input_size() != sizes[i] {
                return Err(Error::ShapeMismatch {
                    what: "layer input size vs previous layer output",
                    got: layer.input_size(),
                    expected: sizes[i],
                });
            }
            if layer.biases.len() != layer.size() {
                return Err(Error::ShapeMismatch {
                    what: "bias length vs weight columns",
                    got: layer.biases.len(),
                    expected: layer.size(),
                });
            }
            sizes.push(layer.size());
        }

        if sizes.contains(&0) {
            return Err(Error::InvalidLayerSizes { got: sizes });
        }

        Ok(Model { sizes, layers })
    }

    /// A zero model with the same shape as `self`.
    pub fn zeros_like(&self) -> Model {
        Model {
            sizes: self.sizes.clone(),
            layers: self
                .layers
                .iter()
                .map(|l| Layer::zeros(l.input_size(), l.size()))
                .collect(),
        }
    }

    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn input_size(&self) -> usize {
        self.sizes[0]
    }

    pub fn output_size(&self) -> usize {
        self.sizes[self.sizes.len() - 1]
    }

    /// Replaces every weight and bias with values from U(-1, 1).
    pub fn randomize(&mut self, seed: u64, mode: SeedMode) {
        for (i, layer) in self.layers.iter_mut().enumerate() {
            match mode {
                SeedMode::Shared => layer.fill_uniform(
                    &mut StdRng::seed_from_u64(seed),
                    &mut StdRng::seed_from_u64(seed),
                ),
                SeedMode::PerLayer => {
                    let layer_seed = derive_seed(seed, i);
                    layer.fill_uniform(
                        &mut StdRng::seed_from_u64(layer_seed),
                        &mut StdRng::seed_from_u64(derive_seed(layer_seed, usize::MAX)),
                    )
                }
            }
        }
    }

    /// Every weight and bias multiplied by `factor`.
    pub fn scale(&self, factor: f64) -> Model {
        Model {
            sizes: self.sizes.clone(),
            layers: self.layers.par_iter().map(|l| l.scale(factor)).collect(),
        }
    }

    /// `scale(1 / divisor)`.
    pub fn divide(&self, divisor: f64) -> Model {
        self.scale(1.0 / divisor)
    }

    pub fn add(&self, rhs: &Model) -> Result<Model> {
        self.ensure_same_sizes(rhs)?;
        let layers = self
            .layers
            .par_iter()
            .zip(rhs.layers.par_iter())
            .map(|(a, b)| a.checked_add(b))
            .collect::<Result<Vec<_>>>()?;

        Ok(Model {
            sizes: self.sizes.clone(),
            layers,
        })
    }

    pub fn subtract(&self, rhs: &Model) -> Result<Model> {
        self.ensure_same_sizes(rhs)?;
        let layers = self
            .layers
            .par_iter()
            .zip(rhs.layers.par_iter())
            .map(|(a, b)| a.checked_sub(b))
            .collect::<Result<Vec<_>>>()?;

        Ok(Model {
            sizes: self.sizes.clone(),
            layers,
        })
    }

    fn ensure_same_sizes(&self, rhs: &Model) -> Result<()> {
        if self.sizes.len() != rhs.sizes.len() {
            return Err(Error::ShapeMismatch {
                what: "model layer count",
                got: rhs.sizes.len(),
                expected: self.sizes.len(),
            });
        }
        if let Some((got, expected)) = rhs
            .sizes
            .iter()
            .zip(&self.sizes)
            .find(|(got, expected)| got != expected)
        {
            return Err(Error::ShapeMismatch {
                what: "model layer size",
                got: *got,
                expected: *expected,
            });
        }
        Ok(())
    }
}

/// splitmix64-style mix of a base seed with a layer index.
fn derive_seed(seed: u64, index: usize) -> u64 {
    let step = (index as u64).wrapping_add(1);
    let mut z = seed.wrapping_add(step.wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn max_abs_diff(a: &Model, b: &Model) -> f64 {
        a.layers
            .iter()
            .zip(&b.layers)
            .flat_map(|(x, y)| {
                let w = x
                    .weights
                    .data
                    .iter()
                    .flatten()
                    .zip(y.weights.data.iter().flatten())
                    .map(|(p, q)| (p - q).abs());
                let b = x.biases.iter().zip(&y.biases).map(|(p, q)| (p - q).abs());
                w.chain(b).collect::<Vec<_>>()
            })
            .fold(0.0, f64::max)
    }

    fn random_model(sizes: &[usize], seed: u64) -> Model {
        let mut m = Model::new(sizes).unwrap();
        m.randomize(seed, SeedMode::PerLayer);
        m
    }

    #[test]
    fn new_builds_shapes_from_sizes() {
        let m = Model::new(&[3, 4, 2]).unwrap();
        assert_eq!(m.layers().len(), 2);
        assert_eq!((m.layers()[0].weights.rows, m.layers()[0].weights.cols), (3, 4));
        assert_eq!(m.layers()[1].biases.len(), 2);
        assert!(m.layers().iter().all(|l| l.biases.iter().all(|&b| b == 0.0)));
    }

    #[test]
    fn new_rejects_fewer_than_two_sizes() {
        assert!(matches!(
            Model::new(&[5]),
            Err(Error::InvalidLayerSizes { .. })
        ));
        assert!(Model::new(&[]).is_err());
        assert!(Model::new(&[3, 0, 1]).is_err());
    }

    #[test]
    fn from_layers_rejects_inconsistent_neighbours() {
        let layers = vec![Layer::zeros(2, 3), Layer::zeros(4, 1)];
        assert!(matches!(
            Model::from_layers(layers),
            Err(Error::ShapeMismatch { got: 4, expected: 3, .. })
        ));
    }

    #[test]
    fn scale_by_one_is_identity() {
        let m = random_model(&[3, 5, 2], 11);
        assert_eq!(m.scale(1.0), m);
    }

    #[test]
    fn add_then_subtract_round_trips() {
        let a = random_model(&[3, 5, 2], 1);
        let b = random_model(&[3, 5, 2], 2);
        let back = a.add(&b).unwrap().subtract(&b).unwrap();
        assert!(max_abs_diff(&a, &back) < 1e-12);
    }

    #[test]
    fn arithmetic_does_not_touch_operands() {
        let a = random_model(&[2, 2], 3);
        let before = a.clone();
        let _ = a.scale(3.0);
        let _ = a.add(&a).unwrap();
        assert_eq!(a, before);
    }

    #[test]
    fn divide_is_scale_by_reciprocal() {
        let a = random_model(&[2, 3, 1], 4);
        assert!(max_abs_diff(&a.divide(4.0), &a.scale(0.25)) < 1e-15);
    }

    #[test]
    fn arithmetic_on_different_shapes_fails() {
        let a = Model::new(&[2, 3, 1]).unwrap();
        let b = Model::new(&[2, 4, 1]).unwrap();
        let c = Model::new(&[2, 3]).unwrap();
        assert!(a.add(&b).is_err());
        assert!(a.subtract(&c).is_err());
    }

    #[test]
    fn shared_seed_repeats_values_across_layers() {
        let mut m = Model::new(&[3, 3, 3]).unwrap();
        m.randomize(69, SeedMode::Shared);
        assert_eq!(m.layers()[0], m.layers()[1]);
        assert_eq!(m.layers()[0].weights.data[0], m.layers()[0].biases);
    }

    #[test]
    fn per_layer_seed_decorrelates_layers() {
        let mut m = Model::new(&[3, 3, 3]).unwrap();
        m.randomize(69, SeedMode::PerLayer);
        assert_ne!(m.layers()[0], m.layers()[1]);

        let mut again = Model::new(&[3, 3, 3]).unwrap();
        again.randomize(69, SeedMode::PerLayer);
        assert_eq!(m, again);
    }
}
