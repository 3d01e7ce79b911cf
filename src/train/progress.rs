use serde::{Deserialize, Serialize};

/// Sent after each optimizer step (and each evaluated sample) so a driver can
/// render progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub processed: usize,
    pub total: usize,
}

impl Progress {
    /// Whole percent done, in `0..=100`.
    pub fn percent(&self) -> usize {
        if self.total == 0 {
            return 100;
        }
        100 * self.processed / self.total
    }
}
