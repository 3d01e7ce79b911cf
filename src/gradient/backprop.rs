use std::borrow::Borrow;

use rayon::prelude::*;

use crate::{
    data::sample::Sample,
    error::{Error, Result},
    layers::dense::Layer,
    math::vector,
    model::model::Model,
    score::tracker::ScoreTracker,
};

/// `prediction - target`. Seeds backpropagation and is also what gets scored.
pub fn output_error(prediction: &[f64], target: &[f64]) -> Result<Vec<f64>> {
    vector::sub(prediction, target)
}

/// Errors at each layer's output, `errors[i]` belonging to layer `i`, derived
/// from the output error by `errors[i - 1] = errors[i] · W[i]ᵀ`.
///
/// Known discrepancy: the sigmoid derivative of the intermediate activation is
/// not folded in before handing the error to the previous layer. It only
/// enters when that layer forms its own bias gradient. With more than one
/// hidden layer this is not the textbook gradient. Left uncorrected until the
/// intended behaviour is confirmed.
pub fn propagate_errors(output_error: Vec<f64>, model: &Model) -> Result<Vec<Vec<f64>>> {
    let layers = model.layers();
    let mut errors = vec![Vec::new(); layers.len()];
    errors[layers.len() - 1] = output_error;

    for i in (1..layers.len()).rev() {
        errors[i - 1] = layers[i].weights.vec_mul_transposed(&errors[i])?;
    }

    Ok(errors)
}

/// Gradient of one sample plus its output error, without touching any score.
fn sample_gradient(model: &Model, sample: &Sample) -> Result<(Model, Vec<f64>)> {
    let activations = model.feed_forward(&sample.input)?;
    let prediction = &activations[activations.len() - 1];
    let error = output_error(prediction, &sample.target)?;
    let errors = propagate_errors(error.clone(), model)?;

    let layers = (0..model.layers().len())
        .rev()
        .map(|i| Layer::gradient(&activations[i], &activations[i + 1], &errors[i]))
        .collect::<Result<Vec<_>>>()?;

    let gradient = Model::from_layers(layers.into_iter().rev().collect())?;
    Ok((gradient, error))
}

/// Per-sample gradient. The output error is recorded into `tracker`.
pub fn compute_gradient(model: &Model, sample: &Sample, tracker: &mut ScoreTracker) -> Result<Model> {
    let (gradient, error) = sample_gradient(model, sample)?;
    tracker.add_score(&error);
    Ok(gradient)
}

/// Mean of the per-sample gradients over `batch`.
///
/// Samples are differentiated in parallel; the sum is then folded in batch
/// order, and scores are recorded in that same order. Takes owned or borrowed
/// samples.
pub fn batch_gradient<S>(model: &Model, batch: &[S], tracker: &mut ScoreTracker) -> Result<Model>
where
    S: Borrow<Sample> + Sync,
{
    if batch.is_empty() {
        return Err(Error::EmptyBatch);
    }

    let per_sample = batch
        .par_iter()
        .map(|sample| sample_gradient(model, sample.borrow()))
        .collect::<Result<Vec<_>>>()?;

    let mut sum = model.zeros_like();
    for (gradient, error) in &per_sample {
        sum = sum.add(gradient)?;
        tracker.add_score(error);
    }

    Ok(sum.divide(batch.len() as f64))
}
