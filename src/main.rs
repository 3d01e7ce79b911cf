use std::{
    env,
    path::Path,
    process,
    sync::mpsc,
    thread,
    time::Instant,
};

use ferrite_ff::{
    data::idx::{load_mnist, Split},
    Checkpoint, EpochStats, Error, NeuralNetwork, OptimizerKind, Progress, Result, SeedMode,
    TrainConfig,
};
use log::{debug, error, info};

const DEFAULT_SIZES: [usize; 4] = [784, 16, 16, 10];
const DEFAULT_SEED: u64 = 69;
const DEFAULT_EPOCHS: usize = 100;

fn program_name(args: &[String]) -> &str {
    args.first().map_or("ferrite-ff", String::as_str)
}

fn progress_line(p: &Progress) -> String {
    format!("[loading] {} / {}, {}%", p.processed, p.total, p.percent())
}

fn usage(program: &str) -> ! {
    eprintln!(
        "Usage: {program} <mnist_dir> <checkpoint.json> [epochs] [sgd|minibatch-sgd|nesterov] [config.json]"
    );
    process::exit(2);
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        usage(program_name(&args));
    }

    if let Err(e) = run(&args) {
        error!("{e}");
        process::exit(1);
    }
}

fn run(args: &[String]) -> Result<()> {
    let mnist_dir = Path::new(&args[1]);
    let checkpoint_path = args[2].as_str();
    let epochs = match args.get(3) {
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|e| Error::InvalidConfig(format!("epochs '{raw}': {e}")))?,
        None => DEFAULT_EPOCHS,
    };
    let kind = match args.get(4) {
        Some(tag) => tag.parse::<OptimizerKind>()?,
        None => OptimizerKind::Nesterov,
    };
    let mut config = match args.get(5) {
        Some(path) => TrainConfig::load_json(path)?,
        None => TrainConfig::default(),
    };

    let (progress_tx, progress_rx) = mpsc::channel::<Progress>();
    config.progress_tx = Some(progress_tx);
    let reporter = thread::spawn(move || {
        let mut last = None;
        for p in progress_rx {
            let percent = p.percent();
            if last != Some(percent) {
                last = Some(percent);
                info!("{}", progress_line(&p));
            }
        }
    });

    let mut network = if Path::new(checkpoint_path).exists() {
        info!("loading checkpoint from {checkpoint_path}");
        NeuralNetwork::from_checkpoint(Checkpoint::load_json(checkpoint_path)?, config)?
    } else {
        info!("no checkpoint at {checkpoint_path}, starting from {DEFAULT_SIZES:?}");
        let mut network = NeuralNetwork::new(&DEFAULT_SIZES, config)?;
        network.randomize(DEFAULT_SEED, SeedMode::Shared);
        network
    };

    info!("reading data from {}", mnist_dir.display());
    let test_data = load_mnist(mnist_dir, Split::Test)?;
    let train_data = load_mnist(mnist_dir, Split::Train)?;
    info!(
        "{} training / {} test samples, optimizer {kind}",
        train_data.len(),
        test_data.len()
    );

    for epoch in 0..epochs {
        info!("------------------------------------------------------------------");
        info!("epoch {epoch}: training...");
        let started = Instant::now();
        let train = network.train(&train_data, kind)?;
        let elapsed_ms = started.elapsed().as_millis() as u64;
        info!("Loss: [{:.5}], Acc: [{:.3}%]", train.loss, train.accuracy);

        info!("epoch {epoch}: evaluating...");
        let eval = network.evaluate(&test_data)?;
        info!("Loss: [{:.5}], Acc: [{:.3}%]", eval.loss, eval.accuracy);

        let stats = EpochStats {
            epoch,
            optimizer: kind,
            train,
            eval,
            elapsed_ms,
        };
        if !stats.should_persist() {
            error!("evaluation loss diverged at epoch {epoch}; {checkpoint_path} left untouched");
            break;
        }

        network.checkpoint.snapshot().save_json(checkpoint_path)?;
        debug!("epoch {} took {} ms, checkpoint written", stats.epoch, stats.elapsed_ms);
    }

    drop(network);
    let _ = reporter.join();
    Ok(())
}
