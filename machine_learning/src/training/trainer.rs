use ndarray::{Array2, ArrayView2};
use rand::rngs::StdRng;

use crate::Result;

/// A type-erased, ready to fit model together with everything it is trained with.
pub trait Trainer: Send {
    /// Returns the amount of parameters of the model.
    fn size(&self) -> usize;

    /// Samples the model's starting parameters.
    fn init_params(&self, rng: &mut StdRng) -> Result<Vec<f32>>;

    /// Runs every epoch, updating `params` in place.
    ///
    /// # Returns
    /// The loss of each epoch.
    fn train(&mut self, params: &mut [f32]) -> Result<Vec<f32>>;

    /// Evaluates the model on every row of `x`.
    fn infer(&mut self, params: &[f32], x: ArrayView2<f32>) -> Result<Array2<f32>>;
}
