use std::mem;

use ndarray::ArrayView2;
use rand::Rng;

use super::{Model, layers::Layer, loss::LossFn};
use crate::{MlErr, Result, optimization::Optimizer};

/// A sequential model: information flows forward when computing an output and backward when
/// computing the *deltas* of its layers.
///
/// The parameters of every layer are laid out one after the other in a single flat slice, in
/// the same order as the layers.
#[derive(Debug, Clone)]
pub struct Sequential {
    layers: Vec<Layer>,
}

impl Sequential {
    /// Creates a new `Sequential`.
    ///
    /// # Arguments
    /// * `layers` - The layers the sequential is composed of.
    ///
    /// # Returns
    /// A new `Sequential` instance.
    pub fn new<I>(layers: I) -> Self
    where
        I: IntoIterator<Item = Layer>,
    {
        Self {
            layers: layers.into_iter().collect(),
        }
    }

    fn check_len(&self, what: &'static str, got: usize) -> Result<()> {
        let expected = self.size();

        if got != expected {
            return Err(MlErr::SizeMismatch {
                what,
                got,
                expected,
            });
        }

        Ok(())
    }
}

impl Model for Sequential {
    fn size(&self) -> usize {
        self.layers.iter().map(|layer| layer.size()).sum()
    }

    fn init_params<R: Rng>(&self, rng: &mut R) -> Result<Vec<f32>> {
        let mut params = Vec::with_capacity(self.size());

        for layer in &self.layers {
            params.extend(layer.init_params(rng)?);
        }

        Ok(params)
    }

    fn forward<'a>(
        &'a mut self,
        params: &[f32],
        mut x: ArrayView2<'a, f32>,
    ) -> Result<ArrayView2<'a, f32>> {
        self.check_len("model parameters", params.len())?;

        let mut rest = params;

        for layer in self.layers.iter_mut() {
            let (head, tail) = rest.split_at(layer.size());
            x = layer.forward(head, x)?;
            rest = tail;
        }

        Ok(x)
    }

    // Every batch updates the parameters, the returned loss is the mean of the batch losses
    // measured before each update.
    fn backprop<'a, L, O, I>(
        &mut self,
        params: &mut [f32],
        grad: &mut [f32],
        loss_fn: &L,
        optimizer: &mut O,
        batches: I,
    ) -> Result<f32>
    where
        L: LossFn,
        O: Optimizer,
        I: Iterator<Item = (ArrayView2<'a, f32>, ArrayView2<'a, f32>)>,
    {
        self.check_len("model parameters", params.len())?;
        self.check_len("model gradient", grad.len())?;

        let mut total_loss = 0.0;
        let mut num_batches = 0;

        for (x, y) in batches {
            grad.fill(0.0);

            let y_pred = self.forward(params, x)?;
            total_loss += loss_fn.loss(y_pred, y);
            num_batches += 1;

            let d_last = loss_fn.loss_prime(y_pred, y);
            let mut d = d_last.view();

            let mut params_rest: &[f32] = params;
            let mut grad_rest: &mut [f32] = grad;

            for layer in self.layers.iter_mut().rev() {
                let at = params_rest.len() - layer.size();
                let (params_head, layer_params) = params_rest.split_at(at);
                let (grad_head, layer_grad) = mem::take(&mut grad_rest).split_at_mut(at);

                d = layer.backward(layer_params, layer_grad, d)?;

                params_rest = params_head;
                grad_rest = grad_head;
            }

            optimizer.update_params(params, grad);
        }

        if num_batches == 0 {
            return Err(MlErr::EmptyDataset);
        }

        Ok(total_loss / num_batches as f32)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;
    use crate::{arch::loss::Mse, optimization::GradientDescent};

    #[test]
    fn forward_chains_layers() {
        let mut model = Sequential::new([Layer::dense((1, 2)), Layer::dense((2, 1))]);
        // w1 = [1, 2], b1 = [0, 1], w2 = [1, 1], b2 = [-1]
        let params = [1.0, 2.0, 0.0, 1.0, 1.0, 1.0, -1.0];
        let x = array![[1.0], [2.0]];

        let y = model.forward(&params, x.view()).unwrap();
        assert_eq!(y, array![[3.0f32], [6.0]]);
    }

    #[test]
    fn a_single_step_moves_towards_the_target() {
        let mut model = Sequential::new([Layer::dense((1, 1))]);
        let mut params = vec![0.0, 0.0];
        let mut grad = vec![0.0; 2];
        let mut optimizer = GradientDescent::new(0.1);
        let x = array![[1.0], [2.0]];
        let y = array![[2.0], [4.0]];

        let batches = std::iter::once((x.view(), y.view()));
        let loss = model
            .backprop(&mut params, &mut grad, &Mse, &mut optimizer, batches)
            .unwrap();

        assert_eq!(loss, 10.0);
        // dw = 2/2 * (-2*1 + -4*2) = -10, db = 2/2 * (-2 + -4) = -6
        assert_eq!(grad, [-10.0, -6.0]);
        assert!((params[0] - 1.0).abs() < 1e-6);
        assert!((params[1] - 0.6).abs() < 1e-6);
    }

    #[test]
    fn no_batches_is_an_error() {
        let mut model = Sequential::new([Layer::dense((1, 1))]);
        let mut params = vec![0.0; 2];
        let mut grad = vec![0.0; 2];
        let mut optimizer = GradientDescent::new(0.1);
        let batches = std::iter::empty();

        let err = model
            .backprop(&mut params, &mut grad, &Mse, &mut optimizer, batches)
            .unwrap_err();

        assert!(matches!(err, MlErr::EmptyDataset));
    }

    #[test]
    fn mismatched_parameters_fail() {
        let mut model = Sequential::new([Layer::dense((1, 1))]);
        let x = array![[1.0]];

        assert!(model.forward(&[1.0, 2.0, 3.0], x.view()).is_err());
    }
}
