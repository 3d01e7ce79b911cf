use ferrite_ff::{NeuralNetwork, OptimizerKind, Sample, SeedMode, TrainConfig};

fn main() -> ferrite_ff::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let samples = vec![
        Sample::new(vec![1.0, 0.0], vec![1.0]),
        Sample::new(vec![1.0, 1.0], vec![0.0]),
        Sample::new(vec![0.0, 1.0], vec![1.0]),
        Sample::new(vec![0.0, 0.0], vec![0.0]),
    ];

    let config = TrainConfig {
        alpha: 0.5,
        ..TrainConfig::default()
    };
    let mut network = NeuralNetwork::new(&[2, 4, 1], config)?;
    network.randomize(69, SeedMode::PerLayer);

    for epoch in 0..5000 {
        let score = network.train(&samples, OptimizerKind::Sgd)?;
        if epoch % 1000 == 0 {
            log::info!("Epoch {epoch}: loss = {:.6}, acc = {:.1}%", score.loss, score.accuracy);
        }
    }

    for sample in &samples {
        log::info!(
            "Input: {:?} -> Output: {:.4}",
            sample.input,
            network.checkpoint.predict(&sample.input)?[0]
        );
    }
    Ok(())
}
