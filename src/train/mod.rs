pub mod epoch_stats;
pub mod progress;
pub mod train_config;

pub use epoch_stats::EpochStats;
pub use progress::Progress;
pub use train_config::TrainConfig;
