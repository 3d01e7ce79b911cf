pub mod tracker;

pub use tracker::{Score, ScoreTracker};
