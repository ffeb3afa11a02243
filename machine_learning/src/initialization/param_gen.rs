/// Produces the starting values of a layer's parameters.
pub trait ParamGen {
    /// Samples up to `n` values.
    ///
    /// # Returns
    /// Fewer than `n` values when the generator's limit is reached, `None` once exhausted.
    fn sample(&mut self, n: usize) -> Option<Vec<f32>>;
}
