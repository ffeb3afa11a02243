use std::fmt;

use futures::FutureExt;
use log::{info, warn};
use machine_learning::{dataset::Dataset, specs::TrainerSpec, Predictor};
use tokio::{
    runtime::Handle,
    task::{JoinError, JoinHandle},
};

use crate::{config::PlaygroundConfig, editor::Pair, parse::parse_int, PlaygroundErr, Result};

/// Shown before the first training completes.
pub const UNTRAINED_STATUS: &str = "Click on train!";

/// Shown once a training completes, until the first prediction.
pub const READY_STATUS: &str = "Ready for making predictions";

/// The name of the prediction target field.
pub const TARGET_FIELD: &str = "valueToPredict";

type Fit = JoinHandle<machine_learning::Result<Predictor>>;

/// What the prediction area displays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Prediction {
    Status(&'static str),
    Value(f64),
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prediction::Status(status) => write!(f, "{status}"),
            Prediction::Value(value) => write!(f, "{value}"),
        }
    }
}

/// The regression model wrapper: the fitted model if any, the prediction target and the last
/// prediction.
///
/// Fitting runs on tokio's blocking pool. The session only changes when a fit completes, and it
/// changes all at once; a failed fit leaves it as it was.
pub struct Session {
    spec: TrainerSpec,
    model: Option<Predictor>,
    predicted: Prediction,
    value_to_predict: f64,
    pending: Option<Fit>,
}

impl Session {
    /// Creates an untrained `Session`.
    ///
    /// # Arguments
    /// * `config` - Provides the trainer spec and the starting prediction target.
    pub fn new(config: &PlaygroundConfig) -> Self {
        Self {
            spec: config.trainer_spec(),
            model: None,
            predicted: Prediction::Status(UNTRAINED_STATUS),
            value_to_predict: config.value_to_predict as f64,
            pending: None,
        }
    }

    /// Whether a fit has completed, that is, whether `predict` can be called.
    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    /// Whether a fit is outstanding.
    pub fn is_training(&self) -> bool {
        self.pending.is_some()
    }

    pub fn predicted(&self) -> Prediction {
        self.predicted
    }

    pub fn value_to_predict(&self) -> f64 {
        self.value_to_predict
    }

    /// The loss of each epoch of the last completed fit.
    pub fn losses(&self) -> Option<&[f32]> {
        self.model.as_ref().map(|model| model.losses())
    }

    /// Sets the prediction target from the user's text.
    ///
    /// # Arguments
    /// * `field` - The field name, only `"valueToPredict"` exists.
    /// * `raw` - The text typed by the user, non numeric text is stored as `NaN`.
    pub fn update_target(&mut self, field: &str, raw: &str) -> Result<()> {
        if field != TARGET_FIELD {
            return Err(PlaygroundErr::UnknownField(field.to_string()));
        }

        self.value_to_predict = parse_int(raw);
        Ok(())
    }

    /// Starts fitting a fresh model to `pairs` in the background.
    ///
    /// # Arguments
    /// * `pairs` - The training examples, read once, right now.
    ///
    /// # Returns
    /// An error if a fit is already outstanding, if `pairs` is empty, or if there is no tokio
    /// runtime to run the fit on.
    pub fn begin_training(&mut self, pairs: &[Pair]) -> Result<()> {
        if self.pending.is_some() {
            return Err(PlaygroundErr::TrainingInProgress);
        }

        let xs: Vec<f32> = pairs.iter().map(|p| p.x as f32).collect();
        let ys: Vec<f32> = pairs.iter().map(|p| p.y as f32).collect();

        let dataset = Dataset::from_columns(&xs, &ys)?;
        if dataset.is_empty() {
            return Err(machine_learning::MlErr::EmptyDataset.into());
        }

        let runtime = Handle::try_current()?;
        let spec = self.spec.clone();

        info!("training on {} pairs", dataset.len());
        self.pending = Some(runtime.spawn_blocking(move || machine_learning::fit(&spec, dataset)));
        Ok(())
    }

    /// Waits for the outstanding fit, if any, and applies its outcome.
    ///
    /// Dropping the returned future before it resolves leaves the fit outstanding.
    pub async fn complete_training(&mut self) -> Result<()> {
        let Some(fit) = self.pending.as_mut() else {
            return Ok(());
        };

        let joined = fit.await;
        self.pending = None;
        self.apply(joined)
    }

    /// Applies the outcome of the outstanding fit if it already finished.
    ///
    /// # Returns
    /// `None` if there is no outstanding fit or it is still running.
    pub fn poll_training(&mut self) -> Option<Result<()>> {
        let joined = self.pending.as_mut()?.now_or_never()?;
        self.pending = None;
        Some(self.apply(joined))
    }

    /// Fits a fresh model to `pairs`, replacing the previous one once done.
    pub async fn train(&mut self, pairs: &[Pair]) -> Result<()> {
        self.begin_training(pairs)?;
        self.complete_training().await
    }

    /// Evaluates the fitted model at the prediction target and stores the result.
    ///
    /// # Returns
    /// The prediction, or `PlaygroundErr::NotTrained` if no fit has completed yet.
    pub fn predict(&mut self) -> Result<f64> {
        let model = self.model.as_mut().ok_or(PlaygroundErr::NotTrained)?;
        let value = f64::from(model.predict(self.value_to_predict as f32)?);

        self.predicted = Prediction::Value(value);
        Ok(value)
    }

    fn apply(
        &mut self,
        joined: std::result::Result<machine_learning::Result<Predictor>, JoinError>,
    ) -> Result<()> {
        match joined {
            Ok(Ok(model)) => {
                info!("training done, parameters {:?}", model.params());
                self.model = Some(model);
                self.predicted = Prediction::Status(READY_STATUS);
                Ok(())
            }
            Ok(Err(e)) => {
                warn!("training failed: {e}");
                Err(e.into())
            }
            Err(e) => {
                warn!("training task aborted: {e}");
                Err(e.into())
            }
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("trained", &self.is_trained())
            .field("training", &self.is_training())
            .field("predicted", &self.predicted)
            .field("value_to_predict", &self.value_to_predict)
            .finish()
    }
}
