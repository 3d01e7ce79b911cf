use crate::{
    data::sample::Sample,
    error::Result,
    gradient::backprop::batch_gradient,
    model::model::Model,
    optim::{Optimizer, OptimizerKind},
    score::tracker::ScoreTracker,
};

/// Nesterov accelerated momentum over mini-batches.
///
/// Per batch:
/// ```text
/// lookahead = model - velocity · γ
/// velocity  = velocity · γ + ∇lookahead(batch) · α
/// model     = model - velocity / batch.len()
/// ```
/// The batch gradient is already a mean, so the final division shrinks the
/// step by the batch size a second time. This is preserved on purpose until
/// it is confirmed to be redundant.
pub struct Nesterov {
    pub learning_rate: f64,
    pub momentum: f64,
    pub batch_size: usize,
    velocity: Option<Model>,
}

impl Nesterov {
    pub fn new(learning_rate: f64, momentum: f64, batch_size: usize) -> Nesterov {
        Nesterov {
            learning_rate,
            momentum,
            batch_size,
            velocity: None,
        }
    }

    pub fn velocity(&self) -> Option<&Model> {
        self.velocity.as_ref()
    }
}

impl Optimizer for Nesterov {
    fn kind(&self) -> OptimizerKind {
        OptimizerKind::Nesterov
    }

    fn batch_size(&self) -> usize {
        self.batch_size
    }

    fn begin_epoch(&mut self, model: &Model) {
        self.velocity = Some(model.zeros_like());
    }

    fn step(&mut self, model: &Model, batch: &[&Sample], tracker: &mut ScoreTracker) -> Result<Model> {
        let velocity = match self.velocity.take() {
            Some(v) => v,
            None => model.zeros_like(),
        };

        let lookahead = model.subtract(&velocity.scale(self.momentum))?;
        let gradient = batch_gradient(&lookahead, batch, tracker)?;
        let velocity = velocity
            .scale(self.momentum)
            .add(&gradient.scale(self.learning_rate))?;
        let next = model.subtract(&velocity.divide(batch.len() as f64))?;

        self.velocity = Some(velocity);
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch() -> Vec<Sample> {
        vec![
            Sample::new(vec![1.0, 0.0], vec![1.0]),
            Sample::new(vec![0.0, 1.0], vec![1.0]),
        ]
    }

    #[test]
    fn first_step_from_zero_velocity() {
        let model = Model::new(&[2, 2, 1]).unwrap();
        let data = batch();
        let refs: Vec<&Sample> = data.iter().collect();
        let mut opt = Nesterov::new(0.5, 0.9, 2);
        opt.begin_epoch(&model);

        let mut scratch = ScoreTracker::new(2);
        let gradient = batch_gradient(&model, &data, &mut scratch).unwrap();

        let mut tracker = ScoreTracker::new(2);
        let next = opt.step(&model, &refs, &mut tracker).unwrap();

        // velocity = ∇ · α, update = velocity / 2
        let expected = model.subtract(&gradient.scale(0.5).divide(2.0)).unwrap();
        assert_eq!(next, expected);
        assert_eq!(opt.velocity(), Some(&gradient.scale(0.5)));
    }

    #[test]
    fn velocity_carries_across_batches_and_resets_per_epoch() {
        let model = Model::new(&[2, 2, 1]).unwrap();
        let data = batch();
        let refs: Vec<&Sample> = data.iter().collect();
        let mut opt = Nesterov::new(0.5, 0.9, 2);
        opt.begin_epoch(&model);

        let mut tracker = ScoreTracker::new(4);
        let after_one = opt.step(&model, &refs, &mut tracker).unwrap();
        let v1 = opt.velocity().cloned().unwrap();

        let lookahead = after_one.subtract(&v1.scale(0.9)).unwrap();
        let mut scratch = ScoreTracker::new(2);
        let g2 = batch_gradient(&lookahead, &data, &mut scratch).unwrap();
        let v2 = v1.scale(0.9).add(&g2.scale(0.5)).unwrap();

        let after_two = opt.step(&after_one, &refs, &mut tracker).unwrap();
        assert_eq!(opt.velocity(), Some(&v2));
        assert_eq!(after_two, after_one.subtract(&v2.divide(2.0)).unwrap());

        opt.begin_epoch(&after_two);
        assert_eq!(opt.velocity(), Some(&after_two.zeros_like()));
    }
}
