/// Logistic function `eˣ / (1 + eˣ)`.
///
/// Evaluated as `1 / (1 + e⁻ˣ)` for non-negative `x` so large inputs never
/// overflow `exp`; both branches agree within floating tolerance.
pub fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let k = x.exp();
        k / (1.0 + k)
    }
}

/// Sigmoid derivative expressed through the already-computed activation `a = σ(x)`.
pub fn dsigmoid(a: f64) -> f64 {
    a * (1.0 - a)
}
