use crate::{
    data::sample::Sample,
    error::Result,
    gradient::backprop::batch_gradient,
    model::model::Model,
    optim::{Optimizer, OptimizerKind},
    score::tracker::ScoreTracker,
};

/// Mini-batch SGD: one update per batch, using the batch-averaged gradient.
pub struct MiniBatchSgd {
    pub learning_rate: f64,
    pub batch_size: usize,
}

impl MiniBatchSgd {
    pub fn new(learning_rate: f64, batch_size: usize) -> MiniBatchSgd {
        MiniBatchSgd {
            learning_rate,
            batch_size,
        }
    }
}

impl Optimizer for MiniBatchSgd {
    fn kind(&self) -> OptimizerKind {
        OptimizerKind::MiniBatchSgd
    }

    fn batch_size(&self) -> usize {
        self.batch_size
    }

    fn step(&mut self, model: &Model, batch: &[&Sample], tracker: &mut ScoreTracker) -> Result<Model> {
        let gradient = batch_gradient(model, batch, tracker)?;
        model.subtract(&gradient.scale(self.learning_rate))
    }
}
