use std::{
    error::Error,
    fmt::{self, Display},
};

use ndarray::ShapeError;
use rand::distr::uniform;

/// The result type used in the entire machine learning module.
pub type Result<T> = std::result::Result<T, MlErr>;

/// The machine learning module's error type.
#[derive(Debug)]
pub enum MlErr {
    SizeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    Shape(ShapeError),
    EmptyDataset,
    Diverged {
        epoch: usize,
        loss: f32,
    },
    InvalidDistribution(uniform::Error),
}

impl Display for MlErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MlErr::SizeMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "There's a size mismatch in {what}, got {got} and expected {expected}"
            ),
            MlErr::Shape(e) => write!(f, "Invalid array shape: {e}"),
            MlErr::EmptyDataset => write!(f, "Cannot train a model on an empty dataset"),
            MlErr::Diverged { epoch, loss } => write!(
                f,
                "Training diverged at epoch {epoch}, the loss became {loss}"
            ),
            MlErr::InvalidDistribution(e) => {
                write!(f, "Failed to build the initialization distribution: {e}")
            }
        }
    }
}

impl Error for MlErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MlErr::Shape(e) => Some(e),
            MlErr::InvalidDistribution(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ShapeError> for MlErr {
    fn from(value: ShapeError) -> Self {
        Self::Shape(value)
    }
}

impl From<uniform::Error> for MlErr {
    fn from(value: uniform::Error) -> Self {
        Self::InvalidDistribution(value)
    }
}
