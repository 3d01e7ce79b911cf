//! Elementwise helpers over plain `f64` slices.

use crate::error::{Error, Result};

fn ensure_same_len(what: &'static str, a: &[f64], b: &[f64]) -> Result<()> {
    if a.len() != b.len() {
        return Err(Error::ShapeMismatch {
            what,
            got: b.len(),
            expected: a.len(),
        });
    }
    Ok(())
}

pub fn add(a: &[f64], b: &[f64]) -> Result<Vec<f64>> {
    ensure_same_len("vector add", a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| x + y).collect())
}

pub fn sub(a: &[f64], b: &[f64]) -> Result<Vec<f64>> {
    ensure_same_len("vector sub", a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| x - y).collect())
}

/// Element-wise (Hadamard) product.
pub fn hadamard(a: &[f64], b: &[f64]) -> Result<Vec<f64>> {
    ensure_same_len("hadamard product", a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| x * y).collect())
}

pub fn scale(a: &[f64], factor: f64) -> Vec<f64> {
    a.iter().map(|x| x * factor).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elementwise_ops() {
        assert_eq!(add(&[1.0, 2.0], &[3.0, 4.0]).unwrap(), vec![4.0, 6.0]);
        assert_eq!(sub(&[1.0, 2.0], &[3.0, 4.0]).unwrap(), vec![-2.0, -2.0]);
        assert_eq!(hadamard(&[1.0, 2.0], &[3.0, 4.0]).unwrap(), vec![3.0, 8.0]);
        assert_eq!(scale(&[1.0, -2.0], 0.5), vec![0.5, -1.0]);
    }

    #[test]
    fn length_mismatch_is_an_error() {
        assert!(matches!(
            hadamard(&[1.0], &[1.0, 2.0]),
            Err(Error::ShapeMismatch { got: 2, expected: 1, .. })
        ));
    }
}
