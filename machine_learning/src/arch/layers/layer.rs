use ndarray::ArrayView2;
use rand::Rng;

use super::Dense;
use crate::Result;

#[derive(Debug, Clone)]
pub enum Layer {
    Dense(Dense),
}
use Layer::*;

impl Layer {
    pub fn dense(dim: (usize, usize)) -> Self {
        Self::Dense(Dense::new(dim))
    }

    pub fn size(&self) -> usize {
        match self {
            Dense(l) => l.size(),
        }
    }

    pub fn init_params<R: Rng>(&self, rng: &mut R) -> Result<Vec<f32>> {
        match self {
            Dense(l) => l.init_params(rng),
        }
    }

    pub fn forward<'a>(
        &'a mut self,
        params: &[f32],
        x: ArrayView2<'a, f32>,
    ) -> Result<ArrayView2<'a, f32>> {
        match self {
            Dense(l) => l.forward(params, x),
        }
    }

    pub fn backward<'a>(
        &'a mut self,
        params: &[f32],
        grad: &mut [f32],
        d: ArrayView2<f32>,
    ) -> Result<ArrayView2<'a, f32>> {
        match self {
            Dense(l) => l.backward(params, grad, d),
        }
    }
}
