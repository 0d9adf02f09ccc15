//! ndarray integration for the temperature matrix
//!
//! Views the matrix as a `(height, width)` array and builds it back from one.
//!
//! Enable with the `ndarray` feature flag.

use crate::types::MetadataRecord;
use ndarray::{ArrayView2, ShapeError};
use thiserror::Error;

/// Error type for ndarray conversions
#[derive(Debug, Error)]
pub enum MatrixError {
    /// Width, height or matrix slot is empty
    #[error("matrix or its dimensions are unset")]
    Unset,
    /// Matrix length does not match width × height
    #[error("matrix does not match its dimensions: {0}")]
    Shape(#[from] ShapeError),
    /// Dimension does not fit the 16-bit width/height fields
    #[error("{rows}x{cols} matrix exceeds 16-bit dimensions")]
    TooLarge { rows: usize, cols: usize },
}

impl MetadataRecord {
    /// Borrow the matrix as a `(height, width)` array
    pub fn matrix_view(&self) -> Result<ArrayView2<'_, f32>, MatrixError> {
        let (Some(width), Some(height), Some(matrix)) = (self.width, self.height, &self.matrix)
        else {
            return Err(MatrixError::Unset);
        };
        Ok(ArrayView2::from_shape(
            (usize::from(height), usize::from(width)),
            matrix.as_slice(),
        )?)
    }

    /// Replace the matrix, setting width and height from its shape
    pub fn set_matrix(&mut self, matrix: ArrayView2<'_, f32>) -> Result<(), MatrixError> {
        let (rows, cols) = matrix.dim();
        let (Ok(height), Ok(width)) = (u16::try_from(rows), u16::try_from(cols)) else {
            return Err(MatrixError::TooLarge { rows, cols });
        };
        self.width = Some(width);
        self.height = Some(height);
        self.matrix = Some(matrix.iter().copied().collect());
        Ok(())
    }
}
