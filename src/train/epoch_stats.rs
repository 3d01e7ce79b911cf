use serde::{Deserialize, Serialize};

use crate::{optim::OptimizerKind, score::tracker::Score};

/// Summary of one driver epoch: a training call followed by an evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochStats {
    /// 0-based epoch number.
    pub epoch: usize,
    pub optimizer: OptimizerKind,
    pub train: Score,
    pub eval: Score,
    /// Wall-clock duration of the training call in milliseconds.
    pub elapsed_ms: u64,
}

impl EpochStats {
    /// A checkpoint is only worth persisting while the evaluation loss is finite.
    pub fn should_persist(&self) -> bool {
        !self.eval.is_diverged()
    }
}
