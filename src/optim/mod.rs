pub mod minibatch;
pub mod nesterov;
pub mod sgd;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    data::sample::Sample,
    error::{Error, Result},
    model::model::Model,
    score::tracker::ScoreTracker,
    train::train_config::TrainConfig,
};

pub use minibatch::MiniBatchSgd;
pub use nesterov::Nesterov;
pub use sgd::Sgd;

/// A gradient-descent strategy driven one batch at a time over an epoch.
pub trait Optimizer: Send {
    fn kind(&self) -> OptimizerKind;

    /// Samples consumed per `step`.
    fn batch_size(&self) -> usize;

    /// Called once with the starting model before the first step of an epoch.
    fn begin_epoch(&mut self, _model: &Model) {}

    /// Produces the updated model for one batch. Output errors of every
    /// sample seen are recorded into `tracker`.
    fn step(&mut self, model: &Model, batch: &[&Sample], tracker: &mut ScoreTracker) -> Result<Model>;
}

/// Strategy selector, as named in configs and on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptimizerKind {
    Sgd,
    MiniBatchSgd,
    Nesterov,
}

impl OptimizerKind {
    pub fn build(self, config: &TrainConfig) -> Box<dyn Optimizer> {
        match self {
            OptimizerKind::Sgd => Box::new(Sgd::new(config.alpha)),
            OptimizerKind::MiniBatchSgd => Box::new(MiniBatchSgd::new(config.alpha, config.batch_size)),
            OptimizerKind::Nesterov => {
                Box::new(Nesterov::new(config.alpha, config.gamma, config.batch_size))
            }
        }
    }
}

impl FromStr for OptimizerKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "sgd" => Ok(OptimizerKind::Sgd),
            "minibatch-sgd" | "mini-batch-sgd" | "minibatchsgd" => Ok(OptimizerKind::MiniBatchSgd),
            "nesterov" => Ok(OptimizerKind::Nesterov),
            _ => Err(Error::UnknownOptimizer(s.to_owned())),
        }
    }
}

impl fmt::Display for OptimizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            OptimizerKind::Sgd => "sgd",
            OptimizerKind::MiniBatchSgd => "minibatch-sgd",
            OptimizerKind::Nesterov => "nesterov",
        };
        write!(f, "{tag}")
    }
}
