use std::str::FromStr;

use crate::{session::TARGET_FIELD, PlaygroundErr};

/// A user interaction with the playground.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A pair's field was edited.
    FieldChange {
        index: usize,
        field: String,
        raw: String,
    },
    /// The add button was pressed.
    AddPair,
    /// The train button was pressed.
    Train,
    /// The predict button was pressed.
    Predict,
    /// The prediction target was edited.
    TargetChange { field: String, raw: String },
}

/// Parses the line commands of the text front end:
///
/// ```text
/// x <index> <value>    y <index> <value>    add    train    target <value>    predict
/// ```
///
/// A missing value is an empty edit, which stores `NaN`.
impl FromStr for Event {
    type Err = PlaygroundErr;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let invalid = || PlaygroundErr::InvalidEvent(line.to_string());
        let mut words = line.split_whitespace();
        let command = words.next().ok_or_else(invalid)?;

        let event = match command {
            "x" | "y" => {
                let index = words
                    .next()
                    .and_then(|i| i.parse().ok())
                    .ok_or_else(invalid)?;

                Event::FieldChange {
                    index,
                    field: command.to_string(),
                    raw: words.next().unwrap_or_default().to_string(),
                }
            }
            "add" => Event::AddPair,
            "train" => Event::Train,
            "predict" => Event::Predict,
            "target" => Event::TargetChange {
                field: TARGET_FIELD.to_string(),
                raw: words.next().unwrap_or_default().to_string(),
            },
            _ => return Err(invalid()),
        };

        if words.next().is_some() {
            return Err(invalid());
        }

        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_changes() {
        assert_eq!(
            "x 2 -4".parse::<Event>().unwrap(),
            Event::FieldChange {
                index: 2,
                field: "x".into(),
                raw: "-4".into()
            }
        );
        assert_eq!(
            "y 0".parse::<Event>().unwrap(),
            Event::FieldChange {
                index: 0,
                field: "y".into(),
                raw: "".into()
            }
        );
    }

    #[test]
    fn buttons() {
        assert_eq!("add".parse::<Event>().unwrap(), Event::AddPair);
        assert_eq!(" train ".parse::<Event>().unwrap(), Event::Train);
        assert_eq!("predict".parse::<Event>().unwrap(), Event::Predict);
    }

    #[test]
    fn target_change() {
        assert_eq!(
            "target 12".parse::<Event>().unwrap(),
            Event::TargetChange {
                field: TARGET_FIELD.into(),
                raw: "12".into()
            }
        );
    }

    #[test]
    fn malformed_lines() {
        for line in ["", "jump", "x", "x -1 3", "x one 3", "add 1", "x 0 1 2"] {
            assert!(
                matches!(line.parse::<Event>(), Err(PlaygroundErr::InvalidEvent(_))),
                "{line:?} should be rejected"
            );
        }
    }
}
