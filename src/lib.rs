//! An editable table of `(x, y)` pairs, a linear regression fitted on it and predictions
//! made with the fitted model.

pub mod config;
pub mod editor;
pub mod error;
pub mod event;
mod parse;
pub mod playground;
pub mod session;

pub use config::PlaygroundConfig;
pub use editor::{DatasetEditor, Field, Pair, PairTable};
pub use error::{PlaygroundErr, Result};
pub use event::Event;
pub use parse::parse_int;
pub use playground::Playground;
pub use session::{Prediction, Session};
