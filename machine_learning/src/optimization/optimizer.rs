pub trait Optimizer {
    /// Takes one step over `params` given the gradient of the loss with respect to them.
    fn update_params(&mut self, params: &mut [f32], grad: &[f32]);
}
