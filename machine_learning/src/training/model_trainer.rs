use std::{iter, num::NonZeroUsize};

use log::{debug, warn};
use ndarray::{Array2, ArrayView2};
use rand::rngs::StdRng;

use super::Trainer;
use crate::{
    MlErr, Result,
    arch::{Model, loss::LossFn},
    dataset::Dataset,
    optimization::Optimizer,
};

const LOG_EVERY: usize = 50;

/// A model `Trainer`. Contains the relevant components needed for training a model,
/// including the model itself.
///
/// Each epoch is a single full batch pass over the dataset, in insertion order.
pub struct ModelTrainer<M, O, L>
where
    M: Model,
    O: Optimizer,
    L: LossFn,
{
    model: M,
    optimizer: O,
    loss_fn: L,
    dataset: Dataset,
    epochs: NonZeroUsize,
    grad: Vec<f32>,
}

impl<M, O, L> ModelTrainer<M, O, L>
where
    M: Model,
    O: Optimizer,
    L: LossFn,
{
    /// Returns a new `ModelTrainer`.
    ///
    /// # Arguments
    /// * `model` - The model that will be trained.
    /// * `optimizer` - The optimization algorithm.
    /// * `loss_fn` - The loss function used to measure the difference between a model's output and the expected one.
    /// * `dataset` - The dataset the model will be trained with.
    /// * `epochs` - The amount of passes over the dataset per `train` call.
    pub fn new(model: M, optimizer: O, loss_fn: L, dataset: Dataset, epochs: NonZeroUsize) -> Self {
        Self {
            grad: vec![0.0; model.size()],
            model,
            optimizer,
            loss_fn,
            dataset,
            epochs,
        }
    }

    /// Performs `epochs` epochs of training its model.
    ///
    /// # Arguments
    /// * `params` - The model's parameters, updated in place.
    ///
    /// # Returns
    /// The loss of every epoch, or an error if the dataset is empty or the loss stops being finite.
    pub fn train(&mut self, params: &mut [f32]) -> Result<Vec<f32>> {
        if self.dataset.is_empty() {
            return Err(MlErr::EmptyDataset);
        }

        let epochs = self.epochs.get();
        let mut losses = Vec::with_capacity(epochs);

        for epoch in 0..epochs {
            let batches = iter::once(self.dataset.full_batch()?);
            let loss = self.model.backprop(
                params,
                &mut self.grad,
                &self.loss_fn,
                &mut self.optimizer,
                batches,
            )?;

            if !loss.is_finite() {
                warn!("loss became {loss} at epoch {epoch}, aborting");
                return Err(MlErr::Diverged { epoch, loss });
            }

            if epoch % LOG_EVERY == 0 {
                debug!("epoch {epoch}: loss {loss}");
            }

            losses.push(loss);
        }

        Ok(losses)
    }
}

impl<M, O, L> Trainer for ModelTrainer<M, O, L>
where
    M: Model + Send,
    O: Optimizer + Send,
    L: LossFn + Send,
{
    fn size(&self) -> usize {
        self.model.size()
    }

    fn init_params(&self, rng: &mut StdRng) -> Result<Vec<f32>> {
        self.model.init_params(rng)
    }

    fn train(&mut self, params: &mut [f32]) -> Result<Vec<f32>> {
        ModelTrainer::train(self, params)
    }

    fn infer(&mut self, params: &[f32], x: ArrayView2<f32>) -> Result<Array2<f32>> {
        Ok(self.model.forward(params, x)?.to_owned())
    }
}
