mod builder;
mod model_trainer;
mod predictor;
mod trainer;

pub use builder::TrainerBuilder;
pub use model_trainer::ModelTrainer;
pub use predictor::Predictor;
pub use trainer::Trainer;

use log::info;
use rand::{SeedableRng, rngs::StdRng};

use crate::{Result, dataset::Dataset, specs::TrainerSpec};

/// Compiles the model described by `spec`, initializes its parameters and fits it to `dataset`.
///
/// # Arguments
/// * `spec` - The model, loss, optimizer and epochs to use.
/// * `dataset` - The samples to fit.
///
/// # Returns
/// A `Predictor` holding the fitted parameters, or an error if training failed.
pub fn fit(spec: &TrainerSpec, dataset: Dataset) -> Result<Predictor> {
    let samples = dataset.len();
    let mut trainer = TrainerBuilder::new().build(spec, dataset);
    let mut rng = generate_rng(spec.seed);
    let mut params = trainer.init_params(&mut rng)?;

    info!(
        "fitting {} parameters on {samples} samples for {} epochs",
        params.len(),
        spec.epochs
    );

    let losses = trainer.train(&mut params)?;
    Ok(Predictor::new(trainer, params, losses))
}

fn generate_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
