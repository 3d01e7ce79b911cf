use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    model::model::Model,
};

/// One training example: an input vector and its encoded target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub input: Vec<f64>,
    pub target: Vec<f64>,
}

impl Sample {
    pub fn new(input: Vec<f64>, target: Vec<f64>) -> Sample {
        Sample { input, target }
    }
}

/// Checks that the dataset is non-empty and every sample fits the model's
/// input and output widths.
pub fn validate_samples(samples: &[Sample], model: &Model) -> Result<()> {
    if samples.is_empty() {
        return Err(Error::EmptyDataset);
    }

    for sample in samples {
        if sample.input.len() != model.input_size() {
            return Err(Error::ShapeMismatch {
                what: "sample input length",
                got: sample.input.len(),
                expected: model.input_size(),
            });
        }
        if sample.target.len() != model.output_size() {
            return Err(Error::ShapeMismatch {
                what: "sample target length",
                got: sample.target.len(),
                expected: model.output_size(),
            });
        }
    }

    Ok(())
}

/// A shuffled order over `samples`, borrowing rather than copying them.
/// `seed = None` draws from the thread RNG, so the order differs between runs.
pub fn shuffled(samples: &[Sample], seed: Option<u64>) -> Vec<&Sample> {
    let mut order: Vec<&Sample> = samples.iter().collect();
    match seed {
        Some(seed) => order.shuffle(&mut StdRng::seed_from_u64(seed)),
        None => order.shuffle(&mut rand::thread_rng()),
    }
    order
}

/// Splits `samples` into contiguous batches of `batch_size`; the last batch
/// holds the remainder. Yields `ceil(n / batch_size)` batches.
pub fn batches<T>(samples: &[T], batch_size: usize) -> Result<std::slice::Chunks<'_, T>> {
    if batch_size == 0 {
        return Err(Error::InvalidConfig("batch_size must be at least 1".to_owned()));
    }
    Ok(samples.chunks(batch_size))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(n: usize) -> Vec<Sample> {
        (0..n)
            .map(|i| Sample::new(vec![i as f64, 0.0], vec![1.0]))
            .collect()
    }

    #[test]
    fn batch_count_and_remainder() {
        for (n, b) in [(10, 3), (9, 3), (1, 128), (128, 128), (7, 1)] {
            let samples = dataset(n);
            let sizes: Vec<usize> = batches(&samples, b).unwrap().map(<[Sample]>::len).collect();

            assert_eq!(sizes.len(), n.div_ceil(b));
            let expected_last = if n % b == 0 { b } else { n % b };
            assert_eq!(*sizes.last().unwrap(), expected_last);
            assert!(sizes[..sizes.len() - 1].iter().all(|&s| s == b));
        }
    }

    #[test]
    fn batches_keep_sample_order() {
        let samples = dataset(5);
        let flat: Vec<Sample> = batches(&samples, 2).unwrap().flatten().cloned().collect();
        assert_eq!(flat, samples);
    }

    #[test]
    fn zero_batch_size_is_a_config_error() {
        assert!(matches!(
            batches(&dataset(3), 0),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn seeded_shuffle_is_a_reproducible_permutation() {
        let samples = dataset(20);
        let a = shuffled(&samples, Some(42));
        let b = shuffled(&samples, Some(42));
        assert_eq!(a, b);

        let mut keys: Vec<f64> = a.iter().map(|s| s.input[0]).collect();
        keys.sort_by(|x, y| x.total_cmp(y));
        assert_eq!(keys, (0..20).map(|i| i as f64).collect::<Vec<_>>());
    }

    #[test]
    fn shuffle_borrows_the_dataset() {
        let samples = dataset(16);
        let order = shuffled(&samples, Some(3));
        assert_eq!(order.len(), samples.len());

        // every entry points into `samples`, each one exactly once
        let mut hits = vec![0; samples.len()];
        for s in &order {
            let idx = samples
                .iter()
                .position(|orig| std::ptr::eq(orig, *s))
                .expect("shuffled entry must borrow from the dataset");
            hits[idx] += 1;
        }
        assert!(hits.iter().all(|&h| h == 1));
    }

    #[test]
    fn batches_of_borrowed_samples() {
        let samples = dataset(7);
        let order = shuffled(&samples, Some(11));
        let sizes: Vec<usize> = batches(&order, 3).unwrap().map(<[&Sample]>::len).collect();
        assert_eq!(sizes, vec![3, 3, 1]);
    }

    #[test]
    fn validation_checks_widths() {
        let model = Model::new(&[2, 3, 1]).unwrap();
        assert!(validate_samples(&dataset(4), &model).is_ok());
        assert!(matches!(validate_samples(&[], &model), Err(Error::EmptyDataset)));

        let bad = vec![Sample::new(vec![0.0, 0.0], vec![1.0, 0.0])];
        assert!(matches!(
            validate_samples(&bad, &model),
            Err(Error::ShapeMismatch { got: 2, expected: 1, .. })
        ));
    }
}
