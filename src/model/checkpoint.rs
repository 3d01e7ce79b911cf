use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    layers::dense::Layer,
    math::matrix::Matrix,
    model::model::Model,
};

/// Weights (`rows × cols`) and bias (`cols`) of one layer, as exchanged with
/// persistent storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSnapshot {
    pub weights: Vec<Vec<f64>>,
    pub bias: Vec<f64>,
}

/// Serializable snapshot of every layer of a `Model`, input side first.
///
/// Layer sizes are not stored; they are derived from the shapes when the
/// checkpoint is turned back into a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub layers: Vec<LayerSnapshot>,
}

impl Checkpoint {
    /// Serializes the checkpoint to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a checkpoint from a JSON file previously written by `save_json`.
    pub fn load_json(path: &str) -> Result<Checkpoint> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

impl Model {
    /// Rebuilds a model from a checkpoint. Fails when a bias length disagrees
    /// with its weight columns or adjacent layers do not line up.
    pub fn from_checkpoint(checkpoint: Checkpoint) -> Result<Model> {
        let layers = checkpoint
            .layers
            .into_iter()
            .map(|snap| Layer::from_parts(Matrix::from_data(snap.weights)?, snap.bias))
            .collect::<Result<Vec<_>>>()?;

        Model::from_layers(layers)
    }

    pub fn snapshot(&self) -> Checkpoint {
        Checkpoint {
            layers: self
                .layers()
                .iter()
                .map(|l| LayerSnapshot {
                    weights: l.weights.data.clone(),
                    bias: l.biases.clone(),
                })
                .collect(),
        }
    }
}
