use serde::{Deserialize, Serialize};

/// Aggregate result of a training or evaluation call.
///
/// - `loss`     — mean over samples of `Σ|error_k|`
/// - `accuracy` — percentage of samples whose every output error rounds to 0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub loss: f64,
    pub accuracy: f64,
}

impl Score {
    /// True when the loss is NaN or infinite. The trainer never acts on this
    /// itself; the caller decides whether to keep the checkpoint.
    pub fn is_diverged(&self) -> bool {
        !self.loss.is_finite()
    }
}

/// Running loss/accuracy over one call. Owned by the call and passed down
/// explicitly, never shared between calls.
#[derive(Debug, Clone, Default)]
pub struct ScoreTracker {
    count: usize,
    total: usize,
    loss_sum: f64,
    accuracy_sum: f64,
}

impl ScoreTracker {
    pub fn new(total: usize) -> ScoreTracker {
        ScoreTracker {
            total,
            ..ScoreTracker::default()
        }
    }

    pub fn reset(&mut self, total: usize) {
        *self = ScoreTracker::new(total);
    }

    /// Records the output error of one sample.
    pub fn add_score(&mut self, errors: &[f64]) {
        self.count += 1;
        self.loss_sum += errors.iter().map(|e| e.abs()).sum::<f64>();
        if errors.iter().all(|e| e.round().abs() == 0.0) {
            self.accuracy_sum += 100.0;
        }
    }

    /// Samples recorded so far.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Sums divided by `total`, the sample count announced at reset.
    pub fn score(&self) -> Score {
        let total = self.total as f64;
        Score {
            loss: self.loss_sum / total,
            accuracy: self.accuracy_sum / total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_and_missed_samples_average_out() {
        let mut t = ScoreTracker::new(2);
        t.add_score(&[0.0, 0.0]);
        t.add_score(&[1.0, 1.0]);

        let s = t.score();
        assert_eq!(s.loss, 1.0);
        assert_eq!(s.accuracy, 50.0);
        assert_eq!(t.count(), 2);
    }

    #[test]
    fn accuracy_needs_every_unit_to_round_to_zero() {
        let mut t = ScoreTracker::new(3);
        t.add_score(&[0.49, -0.49]);
        t.add_score(&[0.1, 0.6]);
        t.add_score(&[-0.5]);
        assert!((t.score().accuracy - 100.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn loss_sums_absolute_errors() {
        let mut t = ScoreTracker::new(1);
        t.add_score(&[-0.25, 0.5, -0.25]);
        assert_eq!(t.score().loss, 1.0);
    }

    #[test]
    fn reset_clears_sums() {
        let mut t = ScoreTracker::new(1);
        t.add_score(&[3.0]);
        t.reset(4);
        assert_eq!(t.count(), 0);
        assert_eq!(t.total(), 4);
        assert_eq!(t.score().loss, 0.0);
    }

    #[test]
    fn nan_error_surfaces_as_divergence() {
        let mut t = ScoreTracker::new(1);
        t.add_score(&[f64::NAN]);
        let s = t.score();
        assert!(s.is_diverged());
        assert_eq!(s.accuracy, 0.0);
    }
}
