use std::sync::mpsc;

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    train::progress::Progress,
};

/// Hyperparameters and hooks for a `NeuralNetwork::train` call.
///
/// # Fields
/// - `alpha`        — learning rate applied to every gradient
/// - `gamma`        — momentum decay, used by Nesterov only
/// - `batch_size`   — samples per step for the batched strategies
/// - `shuffle_seed` — `Some(seed)` makes the per-epoch shuffle reproducible;
///                    `None` reshuffles from the thread RNG every call
/// - `progress_tx`  — optional channel sender; one `Progress` is sent after
///                    every step. A dropped receiver is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub alpha: f64,
    pub gamma: f64,
    pub batch_size: usize,
    pub shuffle_seed: Option<u64>,
    #[serde(skip)]
    pub progress_tx: Option<mpsc::Sender<Progress>>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            alpha: 0.01,
            gamma: 0.9,
            batch_size: 128,
            shuffle_seed: None,
            progress_tx: None,
        }
    }
}

impl TrainConfig {
    /// Rejects values no strategy can run with.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::InvalidConfig("batch_size must be at least 1".to_owned()));
        }
        if !self.alpha.is_finite() {
            return Err(Error::InvalidConfig(format!("alpha must be finite, got {}", self.alpha)));
        }
        if !self.gamma.is_finite() {
            return Err(Error::InvalidConfig(format!("gamma must be finite, got {}", self.gamma)));
        }
        Ok(())
    }

    /// Deserializes a config from a JSON file. Missing keys keep their defaults.
    pub fn load_json(path: &str) -> Result<TrainConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: TrainConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }
}
