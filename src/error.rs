use std::{error::Error, fmt, io};

use machine_learning::MlErr;
use tokio::{runtime::TryCurrentError, task::JoinError};

/// The playground's result type.
pub type Result<T> = std::result::Result<T, PlaygroundErr>;

/// Everything that can go wrong while editing, training or predicting.
#[derive(Debug)]
pub enum PlaygroundErr {
    /// A prediction was requested before any training completed.
    NotTrained,
    /// A training was requested while another one is still running.
    TrainingInProgress,
    /// The fit itself failed (empty dataset, diverging loss...).
    Training(MlErr),
    /// The background fit panicked or was cancelled.
    TrainingAborted(JoinError),
    /// Training was requested outside of a tokio runtime.
    NoRuntime(TryCurrentError),
    IndexOutOfBounds {
        index: usize,
        len: usize,
    },
    UnknownField(String),
    InvalidEvent(String),
    Config(String),
    Json(serde_json::Error),
    Io(io::Error),
}

impl fmt::Display for PlaygroundErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaygroundErr::NotTrained => write!(f, "the model has not been trained yet"),
            PlaygroundErr::TrainingInProgress => write!(f, "a training is already running"),
            PlaygroundErr::Training(e) => write!(f, "training failed: {e}"),
            PlaygroundErr::TrainingAborted(e) => write!(f, "training was aborted: {e}"),
            PlaygroundErr::NoRuntime(e) => write!(f, "cannot train without a runtime: {e}"),
            PlaygroundErr::IndexOutOfBounds { index, len } => {
                write!(f, "pair {index} does not exist, there are {len} pairs")
            }
            PlaygroundErr::UnknownField(name) => write!(f, "unknown field: {name}"),
            PlaygroundErr::InvalidEvent(line) => write!(f, "invalid event: {line}"),
            PlaygroundErr::Config(msg) => write!(f, "invalid config: {msg}"),
            PlaygroundErr::Json(e) => write!(f, "invalid JSON: {e}"),
            PlaygroundErr::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl Error for PlaygroundErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PlaygroundErr::Training(e) => Some(e),
            PlaygroundErr::TrainingAborted(e) => Some(e),
            PlaygroundErr::NoRuntime(e) => Some(e),
            PlaygroundErr::Json(e) => Some(e),
            PlaygroundErr::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MlErr> for PlaygroundErr {
    fn from(value: MlErr) -> Self {
        Self::Training(value)
    }
}

impl From<JoinError> for PlaygroundErr {
    fn from(value: JoinError) -> Self {
        Self::TrainingAborted(value)
    }
}

impl From<TryCurrentError> for PlaygroundErr {
    fn from(value: TryCurrentError) -> Self {
        Self::NoRuntime(value)
    }
}

impl From<serde_json::Error> for PlaygroundErr {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<io::Error> for PlaygroundErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}
