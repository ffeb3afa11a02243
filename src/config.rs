use std::{env, fs, num::NonZeroUsize, path::Path};

use log::{debug, info};
use machine_learning::specs::{LossFnSpec, OptimizerSpec, TrainerSpec, DEFAULT_EPOCHS};
use serde::{Deserialize, Serialize};

use crate::{
    editor::{Pair, SEED_PAIRS},
    PlaygroundErr, Result,
};

/// Environment variable holding the path of a JSON config file.
pub const CONFIG_VAR: &str = "PLAYGROUND_CONFIG";

/// Environment variable overriding the initialization seed.
pub const SEED_VAR: &str = "PLAYGROUND_SEED";

/// How the playground starts and how its model gets compiled and fitted.
///
/// Every field is optional in JSON, missing ones take their default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlaygroundConfig {
    pub epochs: NonZeroUsize,
    pub loss: LossFnSpec,
    pub optimizer: OptimizerSpec,
    pub seed: Option<u64>,
    pub pairs: Vec<Pair>,
    pub value_to_predict: i64,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            epochs: DEFAULT_EPOCHS,
            loss: LossFnSpec::default(),
            optimizer: OptimizerSpec::default(),
            seed: None,
            pairs: SEED_PAIRS.to_vec(),
            value_to_predict: 1,
        }
    }
}

impl PlaygroundConfig {
    /// Parses a config from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("reading config file {}", path.display());

        let content = fs::read_to_string(path)?;

        Self::from_json(&content)
    }

    /// Builds the config from the environment: the file named by `PLAYGROUND_CONFIG` if set,
    /// the defaults otherwise, then `PLAYGROUND_SEED` on top.
    pub fn from_env() -> Result<Self> {
        let mut config = match env::var(CONFIG_VAR) {
            Ok(path) => {
                info!("loading config from {path}");
                Self::load(path)?
            }
            Err(_) => Self::default(),
        };

        if let Ok(seed) = env::var(SEED_VAR) {
            config.seed = Some(parse_seed(&seed)?);
        }

        Ok(config)
    }

    /// The trainer spec the session compiles on every training.
    pub fn trainer_spec(&self) -> TrainerSpec {
        TrainerSpec::linear_regression(self.epochs, self.loss, self.optimizer, self.seed)
    }
}

fn parse_seed(raw: &str) -> Result<u64> {
    raw.trim()
        .parse()
        .map_err(|e| PlaygroundErr::Config(format!("{SEED_VAR} must be an unsigned integer: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_the_default() {
        let config = PlaygroundConfig::from_json("{}").unwrap();
        assert_eq!(config, PlaygroundConfig::default());
    }

    #[test]
    fn defaults_are_250_epochs_of_sgd() {
        let config = PlaygroundConfig::default();
        let spec = config.trainer_spec();

        assert_eq!(spec.epochs.get(), 250);
        assert_eq!(spec.loss, LossFnSpec::Mse);
        assert_eq!(
            spec.optimizer,
            OptimizerSpec::GradientDescent {
                learning_rate: 0.01
            }
        );
        assert_eq!(config.value_to_predict, 1);
        assert_eq!(config.pairs, SEED_PAIRS);
    }

    #[test]
    fn partial_document_overrides_only_what_it_names() {
        let json = r#"{
            "epochs": 10,
            "optimizer": { "name": "sgd", "learning_rate": 0.05 },
            "seed": 7,
            "pairs": [{ "x": 0, "y": 1 }],
            "valueToPredict": 3
        }"#;

        let config = PlaygroundConfig::from_json(json).unwrap();

        assert_eq!(config.epochs.get(), 10);
        assert_eq!(config.loss, LossFnSpec::Mse);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.pairs, [Pair::new(0., 1.)]);
        assert_eq!(config.value_to_predict, 3);
    }

    #[test]
    fn zero_epochs_is_rejected() {
        assert!(PlaygroundConfig::from_json(r#"{ "epochs": 0 }"#).is_err());
    }

    #[test]
    fn unreadable_file_is_an_io_error() {
        let err = PlaygroundConfig::load("/nonexistent/playground.json").unwrap_err();
        assert!(matches!(err, PlaygroundErr::Io(_)));
    }

    #[test]
    fn seed_must_be_numeric() {
        assert_eq!(parse_seed(" 12 ").unwrap(), 12);
        assert!(parse_seed("twelve").is_err());
    }
}
