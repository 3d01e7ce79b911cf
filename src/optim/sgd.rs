use crate::{
    data::sample::Sample,
    error::Result,
    gradient::backprop::compute_gradient,
    model::model::Model,
    optim::{Optimizer, OptimizerKind},
    score::tracker::ScoreTracker,
};

/// Plain stochastic gradient descent: one update per sample.
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }
}

impl Optimizer for Sgd {
    fn kind(&self) -> OptimizerKind {
        OptimizerKind::Sgd
    }

    fn batch_size(&self) -> usize {
        1
    }

    /// `model - ∇(sample) · α`, applied once per sample in `batch`.
    fn step(&mut self, model: &Model, batch: &[&Sample], tracker: &mut ScoreTracker) -> Result<Model> {
        let mut current = model.clone();
        for sample in batch {
            let gradient = compute_gradient(&current, sample, tracker)?;
            current = current.subtract(&gradient.scale(self.learning_rate))?;
        }
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_step_moves_output_bias_against_the_error() {
        let model = Model::new(&[2, 2, 1]).unwrap();
        let sample = Sample::new(vec![1.0, 0.0], vec![1.0]);
        let mut tracker = ScoreTracker::new(1);

        let next = Sgd::new(0.1).step(&model, &[&sample], &mut tracker).unwrap();

        // ∂b = σ'(0.5) · (0.5 - 1) = -0.125
        assert!((next.layers()[1].biases[0] - 0.0125).abs() < 1e-12);
        assert_eq!(tracker.count(), 1);
    }
}
