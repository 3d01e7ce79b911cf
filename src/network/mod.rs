pub mod network;

pub use network::NeuralNetwork;
