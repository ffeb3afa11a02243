use ndarray::{linalg, prelude::*};
use rand::Rng;

use crate::{
    MlErr, Result,
    initialization::{ParamGen, RandParamGen},
};

/// A fully connected linear layer, `z = x·w + b`.
///
/// The layer doesn't own its parameters, it views the slice it is handed on each pass as
/// `dim.0 * dim.1` weights followed by `dim.1` biases.
#[derive(Debug, Clone)]
pub struct Dense {
    dim: (usize, usize),
    size: usize,

    // Forward metadata
    x: Array2<f32>,
    z: Array2<f32>,

    // Backward metadata
    d: Array2<f32>,
}

impl Dense {
    /// Creates a new `Dense` layer.
    ///
    /// # Arguments
    /// * `dim` - The amount of inputs and outputs of the layer.
    pub fn new(dim: (usize, usize)) -> Self {
        let zeros = Array2::zeros((0, 0));

        Self {
            dim,
            size: (dim.0 + 1) * dim.1,
            x: zeros.clone(),
            z: zeros.clone(),
            d: zeros,
        }
    }

    /// Returns the size of this layer.
    ///
    /// # Returns
    /// The amount of parameters this layer has.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Samples Glorot uniform weights and zeroed biases.
    pub fn init_params<R: Rng>(&self, rng: &mut R) -> Result<Vec<f32>> {
        let w_size = self.size - self.dim.1;
        let mut weights = RandParamGen::glorot_uniform(rng, w_size, self.dim.0, self.dim.1)?;

        let mut params = weights.sample(w_size).unwrap_or_default();
        params.resize(self.size, 0.0);
        Ok(params)
    }

    /// Computes the layer output for every row of `x`, keeping `x` for the backward pass.
    pub fn forward(&mut self, params: &[f32], x: ArrayView2<f32>) -> Result<ArrayView2<'_, f32>> {
        if x.ncols() != self.dim.0 {
            return Err(MlErr::SizeMismatch {
                what: "dense input",
                got: x.ncols(),
                expected: self.dim.0,
            });
        }

        let (w, b) = self.view_params(params)?;
        let shape = (x.nrows(), self.dim.1);

        if self.z.dim() != shape {
            self.z = Array2::zeros(shape);
        }

        linalg::general_mat_mul(1.0, &x, &w, 0.0, &mut self.z);
        self.z += &b;

        self.x = x.to_owned();
        Ok(self.z.view())
    }

    /// Writes this layer's gradient into `grad` and returns the delta for the previous layer.
    pub fn backward(
        &mut self,
        params: &[f32],
        grad: &mut [f32],
        d: ArrayView2<f32>,
    ) -> Result<ArrayView2<'_, f32>> {
        if d.dim() != self.z.dim() {
            return Err(MlErr::SizeMismatch {
                what: "dense delta rows",
                got: d.nrows(),
                expected: self.z.nrows(),
            });
        }

        let (mut dw, mut db) = self.view_grad(grad)?;
        linalg::general_mat_mul(1.0, &self.x.t(), &d, 0.0, &mut dw);
        db.assign(&d.sum_axis(Axis(0)));

        let (w, _) = self.view_params(params)?;
        let shape = (d.nrows(), self.dim.0);

        if self.d.dim() != shape {
            self.d = Array2::zeros(shape);
        }

        linalg::general_mat_mul(1.0, &d, &w.t(), 0.0, &mut self.d);
        Ok(self.d.view())
    }

    /// Gives a view of the raw gradient slice as the delta weights and delta biases of this layer.
    ///
    /// # Arguments
    /// * `grad` - A gradient slice.
    ///
    /// # Returns
    /// A tuple containing the delta weights and delta biases.
    fn view_grad<'a>(
        &self,
        grad: &'a mut [f32],
    ) -> Result<(ArrayViewMut2<'a, f32>, ArrayViewMut1<'a, f32>)> {
        self.check_len("dense gradient", grad.len())?;

        let w_size = self.size - self.dim.1;
        let (dw_raw, db_raw) = grad.split_at_mut(w_size);
        let dw = ArrayViewMut2::from_shape(self.dim, dw_raw)?;
        let db = ArrayViewMut1::from_shape(self.dim.1, db_raw)?;
        Ok((dw, db))
    }

    /// Gives a view of the raw parameter slice as the weights and biases of this layer.
    ///
    /// # Arguments
    /// * `params` - A slice of parameters.
    ///
    /// # Returns
    /// A tuple containing the weights and biases.
    fn view_params<'a>(
        &self,
        params: &'a [f32],
    ) -> Result<(ArrayView2<'a, f32>, ArrayView1<'a, f32>)> {
        self.check_len("dense parameters", params.len())?;

        let w_size = self.size - self.dim.1;
        let (w_raw, b_raw) = params.split_at(w_size);
        let weights = ArrayView2::from_shape(self.dim, w_raw)?;
        let biases = ArrayView1::from_shape(self.dim.1, b_raw)?;
        Ok((weights, biases))
    }

    fn check_len(&self, what: &'static str, got: usize) -> Result<()> {
        if got != self.size {
            return Err(MlErr::SizeMismatch {
                what,
                got,
                expected: self.size,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn forward_is_affine() {
        let mut dense = Dense::new((1, 1));
        let params = [2.0, -1.0];
        let x = array![[-1.0], [0.0], [3.0]];

        let z = dense.forward(&params, x.view()).unwrap();
        assert_eq!(z, array![[-3.0f32], [-1.0], [5.0]]);
    }

    #[test]
    fn backward_writes_weight_and_bias_gradients() {
        let mut dense = Dense::new((1, 1));
        let params = [1.0, 0.0];
        let mut grad = [0.0; 2];
        let x = array![[1.0], [2.0]];
        let d = array![[0.5], [1.0]];

        dense.forward(&params, x.view()).unwrap();
        let back = dense.backward(&params, &mut grad, d.view()).unwrap();

        assert_eq!(back, array![[0.5f32], [1.0]]);
        assert_eq!(grad, [2.5, 1.5]);
    }

    #[test]
    fn wrong_param_count_fails() {
        let mut dense = Dense::new((2, 1));
        let x = array![[1.0, 2.0]];

        let err = dense.forward(&[1.0], x.view()).unwrap_err();
        assert!(matches!(err, MlErr::SizeMismatch { expected: 3, .. }));
    }

    #[test]
    fn biases_start_at_zero() {
        let dense = Dense::new((3, 2));
        let mut rng = StdRng::seed_from_u64(1);

        let params = dense.init_params(&mut rng).unwrap();
        assert_eq!(params.len(), dense.size());
        assert_eq!(params[6..], [0.0, 0.0]);
    }
}
