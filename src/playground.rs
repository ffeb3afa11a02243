use std::fmt;

use log::debug;

use crate::{
    config::PlaygroundConfig,
    editor::{DatasetEditor, PairTable},
    event::Event,
    session::{Session, TARGET_FIELD},
    PlaygroundErr, Result,
};

/// The whole component: the pair table, the regression session and the wiring between them.
#[derive(Debug)]
pub struct Playground {
    editor: DatasetEditor,
    session: Session,
}

impl Playground {
    pub fn new(config: &PlaygroundConfig) -> Self {
        Self {
            editor: DatasetEditor::new(PairTable::new(config.pairs.clone())),
            session: Session::new(config),
        }
    }

    pub fn editor(&self) -> &DatasetEditor {
        &self.editor
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The predict button is only enabled once a training completed.
    pub fn predict_enabled(&self) -> bool {
        self.session.is_trained()
    }

    pub fn is_training(&self) -> bool {
        self.session.is_training()
    }

    /// Dispatches one event.
    ///
    /// `Event::Train` only starts the fit, see [`Playground::settle`].
    pub fn handle(&mut self, event: Event) -> Result<()> {
        debug!("handling {event:?}");

        match event {
            Event::FieldChange { index, field, raw } => {
                self.editor.set_field(index, &field, &raw)?;
            }
            Event::AddPair => {
                self.editor.append();
            }
            Event::Train => self.session.begin_training(self.editor.pairs())?,
            Event::Predict => {
                if !self.predict_enabled() {
                    return Err(PlaygroundErr::NotTrained);
                }
                self.session.predict()?;
            }
            Event::TargetChange { field, raw } => self.session.update_target(&field, &raw)?,
        }

        Ok(())
    }

    /// Waits for the outstanding fit, if any, and applies it.
    pub async fn settle(&mut self) -> Result<()> {
        self.session.complete_training().await
    }

    /// Applies the outstanding fit if it already finished.
    pub fn poll(&mut self) -> Option<Result<()>> {
        self.session.poll_training()
    }
}

impl fmt::Display for Playground {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Training Data (x, y) pairs")?;
        writeln!(f, "{:>4} {:>8} {:>8}", "#", "X", "Y")?;

        for (i, pair) in self.editor.pairs().iter().enumerate() {
            writeln!(f, "{i:>4} {:>8} {:>8}", pair.x, pair.y)?;
        }

        writeln!(f, "Predicting")?;
        writeln!(f, "{TARGET_FIELD}: {}", self.session.value_to_predict())?;
        writeln!(f, "{}", self.session.predicted())?;

        let button = match (self.is_training(), self.predict_enabled()) {
            (true, _) => "training...",
            (false, true) => "predict enabled",
            (false, false) => "predict disabled",
        };
        write!(f, "[{button}]")
    }
}
