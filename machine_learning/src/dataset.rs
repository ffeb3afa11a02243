use ndarray::{ArrayView2, Axis};

use crate::{MlErr, Result};

/// A row-major collection of samples, each row being `x_size` inputs followed by `y_size`
/// expected outputs.
#[derive(Debug, Clone)]
pub struct Dataset {
    data: Vec<f32>,
    x_size: usize,
    y_size: usize,
}

impl Dataset {
    /// Creates a new `Dataset`.
    ///
    /// # Arguments
    /// * `data` - The flattened samples.
    /// * `x_size` - The amount of inputs per sample.
    /// * `y_size` - The amount of outputs per sample.
    ///
    /// # Returns
    /// A new `Dataset` or an error if `data` can't be split into whole rows.
    pub fn new(data: Vec<f32>, x_size: usize, y_size: usize) -> Result<Self> {
        let row_size = x_size + y_size;

        if row_size == 0 || data.len() % row_size != 0 {
            return Err(MlErr::SizeMismatch {
                what: "dataset rows",
                got: data.len(),
                expected: row_size,
            });
        }

        Ok(Self {
            data,
            x_size,
            y_size,
        })
    }

    /// Creates a single input, single output `Dataset` from two parallel columns.
    ///
    /// # Arguments
    /// * `xs` - The inputs.
    /// * `ys` - The expected outputs, `ys[i]` corresponds to `xs[i]`.
    ///
    /// # Returns
    /// A new `Dataset` or an error if the columns differ in length.
    pub fn from_columns(xs: &[f32], ys: &[f32]) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(MlErr::SizeMismatch {
                what: "dataset columns",
                got: ys.len(),
                expected: xs.len(),
            });
        }

        let data = xs.iter().zip(ys).flat_map(|(&x, &y)| [x, y]).collect();
        Self::new(data, 1, 1)
    }

    /// Returns the amount of samples.
    pub fn len(&self) -> usize {
        self.data.len() / (self.x_size + self.y_size)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn x_size(&self) -> usize {
        self.x_size
    }

    pub fn y_size(&self) -> usize {
        self.y_size
    }

    /// Views every sample at once, in insertion order.
    ///
    /// # Returns
    /// A tuple with the inputs and the expected outputs.
    pub fn full_batch(&self) -> Result<(ArrayView2<'_, f32>, ArrayView2<'_, f32>)> {
        let rows = ArrayView2::from_shape((self.len(), self.x_size + self.y_size), &self.data)?;
        Ok(rows.split_at(Axis(1), self.x_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_are_interleaved_in_order() {
        let dataset = Dataset::from_columns(&[1., 2., 3.], &[10., 20., 30.]).unwrap();
        let (x, y) = dataset.full_batch().unwrap();

        assert_eq!(dataset.len(), 3);
        assert_eq!(x.column(0).to_vec(), [1., 2., 3.]);
        assert_eq!(y.column(0).to_vec(), [10., 20., 30.]);
    }

    #[test]
    fn mismatched_columns_fail() {
        let err = Dataset::from_columns(&[1., 2.], &[1.]).unwrap_err();
        assert!(matches!(err, MlErr::SizeMismatch { .. }));
    }

    #[test]
    fn partial_rows_fail() {
        assert!(Dataset::new(vec![1., 2., 3.], 1, 1).is_err());
    }

    #[test]
    fn empty_dataset_has_no_rows() {
        let dataset = Dataset::from_columns(&[], &[]).unwrap();
        let (x, y) = dataset.full_batch().unwrap();

        assert!(dataset.is_empty());
        assert_eq!(x.nrows(), 0);
        assert_eq!(y.nrows(), 0);
    }
}
