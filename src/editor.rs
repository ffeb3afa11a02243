use std::{fmt, str::FromStr};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{parse::parse_int, PlaygroundErr, Result};

/// One `(x, y)` training example.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pair {
    pub x: f64,
    pub y: f64,
}

impl Pair {
    /// The pair appended by [`DatasetEditor::append`].
    pub const DEFAULT: Pair = Pair { x: 1., y: 1. };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn with(self, field: Field, value: f64) -> Self {
        match field {
            Field::X => Self { x: value, ..self },
            Field::Y => Self { y: value, ..self },
        }
    }
}

/// The pairs the table starts with, all on `y = 2x - 1`.
pub const SEED_PAIRS: [Pair; 6] = [
    Pair::new(-1., -3.),
    Pair::new(0., -1.),
    Pair::new(1., 1.),
    Pair::new(2., 3.),
    Pair::new(3., 5.),
    Pair::new(4., 7.),
];

/// An editable column of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    X,
    Y,
}

impl FromStr for Field {
    type Err = PlaygroundErr;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "x" => Ok(Field::X),
            "y" => Ok(Field::Y),
            other => Err(PlaygroundErr::UnknownField(other.to_string())),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::X => write!(f, "x"),
            Field::Y => write!(f, "y"),
        }
    }
}

/// An immutable snapshot of the ordered pairs.
///
/// Every edit produces a new table, the previous one is left untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct PairTable {
    pairs: Vec<Pair>,
}

impl PairTable {
    pub fn new(pairs: Vec<Pair>) -> Self {
        Self { pairs }
    }

    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns a copy of this table where only `field` of the pair at `index` changed.
    ///
    /// # Arguments
    /// * `index` - The position of the pair to edit.
    /// * `field` - The column to edit.
    /// * `raw` - The text typed by the user, non numeric text is stored as `NaN`.
    ///
    /// # Returns
    /// The new table, or an error if there is no pair at `index`.
    pub fn with_field(&self, index: usize, field: Field, raw: &str) -> Result<Self> {
        let len = self.pairs.len();
        let pair = self
            .pairs
            .get(index)
            .ok_or(PlaygroundErr::IndexOutOfBounds { index, len })?;

        let mut pairs = self.pairs.clone();
        pairs[index] = pair.with(field, parse_int(raw));
        Ok(Self { pairs })
    }

    /// Returns a copy of this table with [`Pair::DEFAULT`] appended.
    pub fn with_default_pair(&self) -> Self {
        let mut pairs = Vec::with_capacity(self.pairs.len() + 1);
        pairs.extend_from_slice(&self.pairs);
        pairs.push(Pair::DEFAULT);
        Self { pairs }
    }

    /// Splits the pairs into parallel x and y columns, `xs[i]` and `ys[i]` come from the same pair.
    pub fn split(&self) -> (Vec<f64>, Vec<f64>) {
        self.pairs.iter().map(|p| (p.x, p.y)).unzip()
    }
}

impl Default for PairTable {
    fn default() -> Self {
        Self::new(SEED_PAIRS.to_vec())
    }
}

/// Holds the current table and applies the user's edits to it.
#[derive(Debug, Clone, Default)]
pub struct DatasetEditor {
    table: PairTable,
}

impl DatasetEditor {
    pub fn new(table: PairTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &PairTable {
        &self.table
    }

    pub fn pairs(&self) -> &[Pair] {
        self.table.pairs()
    }

    /// Replaces one field of one pair.
    ///
    /// # Arguments
    /// * `index` - The position of the pair to edit.
    /// * `field` - The field name, `"x"` or `"y"`.
    /// * `raw` - The text typed by the user.
    ///
    /// # Returns
    /// The updated table. On error the table is left as it was.
    pub fn set_field(&mut self, index: usize, field: &str, raw: &str) -> Result<&PairTable> {
        let field: Field = field.parse()?;
        self.table = self.table.with_field(index, field, raw)?;
        debug!("pair {index}: {field} set from {raw:?}");
        Ok(&self.table)
    }

    /// Appends the default pair.
    pub fn append(&mut self) -> &PairTable {
        self.table = self.table.with_default_pair();
        debug!("appended a pair, {} in total", self.table.len());
        &self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn same_bits(a: &[Pair], b: &[Pair]) -> bool {
        let bits = |p: &Pair| (p.x.to_bits(), p.y.to_bits());
        a.iter().map(bits).eq(b.iter().map(bits))
    }

    #[test]
    fn starts_with_the_seed_pairs() {
        let editor = DatasetEditor::default();
        assert_eq!(editor.pairs(), SEED_PAIRS);
    }

    #[test]
    fn set_field_changes_exactly_one_value() {
        for index in 0..SEED_PAIRS.len() {
            for field in ["x", "y"] {
                let mut editor = DatasetEditor::default();
                let table = editor.set_field(index, field, "42").unwrap();

                for (i, (pair, seed)) in table.pairs().iter().zip(SEED_PAIRS).enumerate() {
                    let expected = match (i == index, field) {
                        (true, "x") => Pair { x: 42., ..seed },
                        (true, _) => Pair { y: 42., ..seed },
                        _ => seed,
                    };

                    assert_eq!(*pair, expected);
                }
            }
        }
    }

    #[test]
    fn non_numeric_text_is_stored_as_nan() {
        let mut editor = DatasetEditor::default();
        let table = editor.set_field(2, "y", "abc").unwrap();

        assert!(table.pairs()[2].y.is_nan());
        assert_eq!(table.pairs()[2].x, 1.);
        assert!(same_bits(&table.pairs()[3..], &SEED_PAIRS[3..]));
    }

    #[test]
    fn edits_leave_the_previous_snapshot_untouched() {
        let before = PairTable::default();
        let after = before.with_field(0, Field::X, "9").unwrap();

        assert_eq!(before.pairs(), SEED_PAIRS);
        assert_eq!(after.pairs()[0], Pair::new(9., -3.));
    }

    #[test]
    fn out_of_range_edits_are_rejected() {
        let mut editor = DatasetEditor::default();
        let err = editor.set_field(6, "x", "1").unwrap_err();

        assert!(matches!(
            err,
            PlaygroundErr::IndexOutOfBounds { index: 6, len: 6 }
        ));
        assert_eq!(editor.pairs(), SEED_PAIRS);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let mut editor = DatasetEditor::default();
        let err = editor.set_field(0, "z", "1").unwrap_err();

        assert!(matches!(err, PlaygroundErr::UnknownField(ref name) if name == "z"));
        assert_eq!(editor.pairs(), SEED_PAIRS);
    }

    #[test]
    fn append_adds_one_default_pair_at_the_end() {
        let mut editor = DatasetEditor::default();
        editor.set_field(1, "x", "x").unwrap();
        let before = editor.pairs().to_vec();

        let table = editor.append();

        assert_eq!(table.len(), before.len() + 1);
        assert!(same_bits(&table.pairs()[..before.len()], &before));
        assert_eq!(table.pairs().last(), Some(&Pair::DEFAULT));
    }

    #[test]
    fn split_keeps_index_correspondence() {
        let (xs, ys) = PairTable::default().split();

        assert_eq!(xs, [-1., 0., 1., 2., 3., 4.]);
        assert_eq!(ys, [-3., -1., 1., 3., 5., 7.]);
    }
}
