use super::{ModelTrainer, Trainer};
use crate::{
    arch::{
        Model, Sequential,
        layers::Layer,
        loss::{LossFn, Mse},
    },
    dataset::Dataset,
    optimization::{GradientDescent, Optimizer},
    specs::{LayerSpec, LossFnSpec, ModelSpec, OptimizerSpec, TrainerSpec},
};

/// Builds `Trainer`s given a specification.
#[derive(Default)]
pub struct TrainerBuilder;

impl TrainerBuilder {
    /// Creates a new `TrainerBuilder`.
    pub fn new() -> Self {
        Self
    }

    /// Builds a new `Trainer` following a spec.
    ///
    /// # Arguments
    /// * `spec` - The specification for the trainer.
    /// * `dataset` - The samples the trainer will fit.
    pub fn build(&self, spec: &TrainerSpec, dataset: Dataset) -> Box<dyn Trainer> {
        self.resolve_model(spec, dataset)
    }

    fn resolve_model(&self, spec: &TrainerSpec, dataset: Dataset) -> Box<dyn Trainer> {
        match &spec.model {
            ModelSpec::Sequential {
                layers: layer_specs,
            } => {
                let layers = layer_specs.iter().map(|ls| self.resolve_layer(*ls));
                let model = Sequential::new(layers);
                self.resolve_optimizer(spec, model, dataset)
            }
        }
    }

    fn resolve_layer(&self, spec: LayerSpec) -> Layer {
        match spec {
            LayerSpec::Dense { dim } => Layer::dense(dim),
        }
    }

    fn resolve_optimizer<M>(
        &self,
        spec: &TrainerSpec,
        model: M,
        dataset: Dataset,
    ) -> Box<dyn Trainer>
    where
        M: Model + Send + 'static,
    {
        match spec.optimizer {
            OptimizerSpec::GradientDescent { learning_rate } => {
                let optimizer = GradientDescent::new(learning_rate);
                self.resolve_loss(spec, model, optimizer, dataset)
            }
        }
    }

    fn resolve_loss<M, O>(
        &self,
        spec: &TrainerSpec,
        model: M,
        optimizer: O,
        dataset: Dataset,
    ) -> Box<dyn Trainer>
    where
        M: Model + Send + 'static,
        O: Optimizer + Send + 'static,
    {
        match spec.loss {
            LossFnSpec::Mse => {
                let loss = Mse::new();
                self.terminate_build(spec, model, optimizer, loss, dataset)
            }
        }
    }

    fn terminate_build<M, O, L>(
        &self,
        spec: &TrainerSpec,
        model: M,
        optimizer: O,
        loss: L,
        dataset: Dataset,
    ) -> Box<dyn Trainer>
    where
        M: Model + Send + 'static,
        O: Optimizer + Send + 'static,
        L: LossFn + Send + 'static,
    {
        let trainer = ModelTrainer::new(model, optimizer, loss, dataset, spec.epochs);
        Box::new(trainer)
    }
}
