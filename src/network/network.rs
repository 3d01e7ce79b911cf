use log::{debug, warn};

use crate::{
    data::sample::{batches, shuffled, validate_samples, Sample},
    error::Result,
    gradient::backprop::output_error,
    model::{checkpoint::Checkpoint, model::Model, model::SeedMode},
    optim::{Optimizer, OptimizerKind},
    score::tracker::{Score, ScoreTracker},
    train::{progress::Progress, train_config::TrainConfig},
};

/// The current checkpoint plus the hyperparameters used to train it.
pub struct NeuralNetwork {
    pub checkpoint: Model,
    pub config: TrainConfig,
}

impl NeuralNetwork {
    /// Zero-initialized network for the given layer widths.
    pub fn new(sizes: &[usize], config: TrainConfig) -> Result<NeuralNetwork> {
        Ok(NeuralNetwork::from_model(Model::new(sizes)?, config))
    }

    pub fn from_model(checkpoint: Model, config: TrainConfig) -> NeuralNetwork {
        NeuralNetwork { checkpoint, config }
    }

    pub fn from_checkpoint(checkpoint: Checkpoint, config: TrainConfig) -> Result<NeuralNetwork> {
        Ok(NeuralNetwork::from_model(Model::from_checkpoint(checkpoint)?, config))
    }

    pub fn randomize(&mut self, seed: u64, mode: SeedMode) {
        debug!("randomizing weights and biases (seed {seed}, {mode:?})");
        self.checkpoint.randomize(seed, mode);
    }

    /// One epoch over a shuffled copy of `dataset` with the selected strategy.
    pub fn train(&mut self, dataset: &[Sample], kind: OptimizerKind) -> Result<Score> {
        self.config.validate()?;
        let mut optimizer = kind.build(&self.config);
        self.train_with(dataset, optimizer.as_mut())
    }

    /// Like `train`, selecting the strategy by tag. An unknown tag fails before
    /// anything is touched.
    pub fn train_by_name(&mut self, dataset: &[Sample], tag: &str) -> Result<Score> {
        let kind: OptimizerKind = tag.parse()?;
        self.train(dataset, kind)
    }

    /// One epoch driven by a caller-supplied optimizer.
    ///
    /// The epoch runs on a copy of the checkpoint, which replaces
    /// `self.checkpoint` only once every step has succeeded. A NaN loss is not
    /// an error; check `Score::is_diverged()`.
    pub fn train_with(&mut self, dataset: &[Sample], optimizer: &mut dyn Optimizer) -> Result<Score> {
        validate_samples(dataset, &self.checkpoint)?;
        debug!(
            "training one {} epoch over {} samples (batch size {})",
            optimizer.kind(),
            dataset.len(),
            optimizer.batch_size()
        );

        let mut tracker = ScoreTracker::new(dataset.len());
        let order = shuffled(dataset, self.config.shuffle_seed);
        let mut model = self.checkpoint.clone();

        optimizer.begin_epoch(&model);
        for batch in batches(&order, optimizer.batch_size())? {
            model = optimizer.step(&model, batch, &mut tracker)?;
            self.report(&tracker);
        }

        self.checkpoint = model;
        let score = tracker.score();
        if score.is_diverged() {
            warn!("{} epoch diverged: loss is {}", optimizer.kind(), score.loss);
        }
        Ok(score)
    }

    /// Scores every sample against the current checkpoint without updating it.
    pub fn evaluate(&self, dataset: &[Sample]) -> Result<Score> {
        validate_samples(dataset, &self.checkpoint)?;

        let mut tracker = ScoreTracker::new(dataset.len());
        for sample in dataset {
            let prediction = self.checkpoint.predict(&sample.input)?;
            tracker.add_score(&output_error(&prediction, &sample.target)?);
            self.report(&tracker);
        }

        Ok(tracker.score())
    }

    fn report(&self, tracker: &ScoreTracker) {
        if let Some(tx) = &self.config.progress_tx {
            // A dropped receiver only means nobody is watching.
            let _ = tx.send(Progress {
                processed: tracker.count(),
                total: tracker.total(),
            });
        }
    }
}
