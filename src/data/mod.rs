pub mod idx;
pub mod sample;

pub use idx::{load_mnist, parse_idx_pair, Split};
pub use sample::{batches, shuffled, validate_samples, Sample};
