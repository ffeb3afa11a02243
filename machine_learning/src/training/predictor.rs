use ndarray::Array2;

use super::Trainer;
use crate::{MlErr, Result};

/// A fitted model: the trainer it was fitted with and the resulting parameters.
pub struct Predictor {
    trainer: Box<dyn Trainer>,
    params: Vec<f32>,
    losses: Vec<f32>,
}

impl Predictor {
    pub(super) fn new(trainer: Box<dyn Trainer>, params: Vec<f32>, losses: Vec<f32>) -> Self {
        Self {
            trainer,
            params,
            losses,
        }
    }

    /// Evaluates the fitted model on a single input value.
    ///
    /// # Arguments
    /// * `x` - The input.
    ///
    /// # Returns
    /// The single output of the model.
    pub fn predict(&mut self, x: f32) -> Result<f32> {
        let x = Array2::from_elem((1, 1), x);
        let y = self.trainer.infer(&self.params, x.view())?;

        y.first().copied().ok_or(MlErr::SizeMismatch {
            what: "prediction",
            got: 0,
            expected: 1,
        })
    }

    /// The fitted parameters.
    pub fn params(&self) -> &[f32] {
        &self.params
    }

    /// The loss of each training epoch.
    pub fn losses(&self) -> &[f32] {
        &self.losses
    }
}

impl std::fmt::Debug for Predictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Predictor")
            .field("params", &self.params)
            .field("epochs", &self.losses.len())
            .finish()
    }
}
