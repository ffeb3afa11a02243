use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

/// The learning rate used by `"sgd"` when none is given.
pub const DEFAULT_LEARNING_RATE: f32 = 0.01;

/// The amount of epochs a linear regression is fitted for when none is given.
pub const DEFAULT_EPOCHS: NonZeroUsize = NonZeroUsize::new(250).unwrap();

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayerSpec {
    Dense { dim: (usize, usize) },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModelSpec {
    Sequential { layers: Vec<LayerSpec> },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossFnSpec {
    #[default]
    #[serde(rename = "meanSquaredError")]
    Mse,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name")]
pub enum OptimizerSpec {
    #[serde(rename = "sgd")]
    GradientDescent {
        #[serde(default = "default_learning_rate")]
        learning_rate: f32,
    },
}

impl Default for OptimizerSpec {
    fn default() -> Self {
        Self::GradientDescent {
            learning_rate: DEFAULT_LEARNING_RATE,
        }
    }
}

fn default_learning_rate() -> f32 {
    DEFAULT_LEARNING_RATE
}

/// Everything needed to compile and fit a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainerSpec {
    pub model: ModelSpec,
    pub loss: LossFnSpec,
    pub optimizer: OptimizerSpec,
    pub epochs: NonZeroUsize,
    pub seed: Option<u64>,
}

impl TrainerSpec {
    /// A single dense unit with one input, fitted with mean squared error and `"sgd"`.
    pub fn linear_regression(
        epochs: NonZeroUsize,
        loss: LossFnSpec,
        optimizer: OptimizerSpec,
        seed: Option<u64>,
    ) -> Self {
        Self {
            model: ModelSpec::Sequential {
                layers: vec![LayerSpec::Dense { dim: (1, 1) }],
            },
            loss,
            optimizer,
            epochs,
            seed,
        }
    }
}

impl Default for TrainerSpec {
    fn default() -> Self {
        Self::linear_regression(
            DEFAULT_EPOCHS,
            LossFnSpec::default(),
            OptimizerSpec::default(),
            None,
        )
    }
}
