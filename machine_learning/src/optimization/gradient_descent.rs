use super::Optimizer;

/// Plain (full batch when fed a single batch per epoch) gradient descent.
#[derive(Debug, Clone, Copy)]
pub struct GradientDescent {
    learning_rate: f32,
}

impl GradientDescent {
    /// Returns a new `GradientDescent`.
    ///
    /// # Arguments
    /// * `learning_rate` - The *length* of the steps taken on `update_params`.
    pub fn new(learning_rate: f32) -> Self {
        Self { learning_rate }
    }

    pub fn learning_rate(&self) -> f32 {
        self.learning_rate
    }
}

impl Optimizer for GradientDescent {
    /// Makes a step in the opposite direction of the gradient, with a length of `learning_rate`.
    fn update_params(&mut self, params: &mut [f32], grad: &[f32]) {
        let lr = self.learning_rate;

        for (w, g) in params.iter_mut().zip(grad) {
            *w -= lr * g;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_against_the_gradient() {
        let mut optimizer = GradientDescent::new(0.5);
        let mut params = [1.0, -1.0, 0.0];

        optimizer.update_params(&mut params, &[2.0, -2.0, 0.0]);
        assert_eq!(params, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn zero_learning_rate_is_a_no_op() {
        let mut optimizer = GradientDescent::new(0.0);
        let mut params = [3.0, 4.0];

        optimizer.update_params(&mut params, &[100.0, -100.0]);
        assert_eq!(params, [3.0, 4.0]);
    }
}
