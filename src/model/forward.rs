use crate::{
    error::{Error, Result},
    model::model::Model,
};

impl Model {
    /// Forward pass. Returns every activation `a[0..=L]`, where `a[0]` is the
    /// input itself and `a[L]` is the prediction.
    pub fn feed_forward(&self, input: &[f64]) -> Result<Vec<Vec<f64>>> {
        if input.len() != self.input_size() {
            return Err(Error::ShapeMismatch {
                what: "input vector length",
                got: input.len(),
                expected: self.input_size(),
            });
        }

        let mut activations = Vec::with_capacity(self.layers().len() + 1);
        activations.push(input.to_vec());
        for (i, layer) in self.layers().iter().enumerate() {
            let next = layer.feed_from(&activations[i])?;
            activations.push(next);
        }

        Ok(activations)
    }

    /// Just the last activation of `feed_forward`.
    pub fn predict(&self, input: &[f64]) -> Result<Vec<f64>> {
        let mut activations = self.feed_forward(input)?;
        Ok(activations.pop().unwrap_or_default())
    }
}
