pub mod activation;
pub mod data;
pub mod error;
pub mod gradient;
pub mod layers;
pub mod math;
pub mod model;
pub mod network;
pub mod optim;
pub mod score;
pub mod train;

// Convenience re-exports
pub use data::sample::Sample;
pub use error::{Error, Result};
pub use math::matrix::Matrix;
pub use model::{Checkpoint, LayerSnapshot, Model, SeedMode};
pub use network::network::NeuralNetwork;
pub use optim::{MiniBatchSgd, Nesterov, Optimizer, OptimizerKind, Sgd};
pub use score::tracker::{Score, ScoreTracker};
pub use train::{EpochStats, Progress, TrainConfig};
