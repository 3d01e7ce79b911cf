pub mod checkpoint;
pub mod forward;
pub mod model;

pub use checkpoint::{Checkpoint, LayerSnapshot};
pub use model::{Model, SeedMode};
