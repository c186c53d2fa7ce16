//! Error types shared by the buffer, transform and render modules.

use thiserror::Error;

/// Errors that can occur while building buffers or rendering transforms.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    /// A row of pixels did not have the same length as the first row.
    #[error("Ragged pixel rows: row {row} has {actual} pixels, expected {expected}")]
    ShapeMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Raw pixel data length doesn't match the requested dimensions.
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Pixel coordinates outside the buffer extent.
    #[error("Pixel ({x}, {y}) is outside the {width}x{height} buffer")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// The composed matrix cannot be inverted, so inverse sampling is impossible.
    #[error("Degenerate transform: determinant {determinant} is not invertible")]
    DegenerateTransform { determinant: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TransformError::OutOfBounds {
            x: 10,
            y: 2,
            width: 10,
            height: 5,
        };
        assert_eq!(err.to_string(), "Pixel (10, 2) is outside the 10x5 buffer");

        let err = TransformError::ShapeMismatch {
            row: 3,
            expected: 10,
            actual: 9,
        };
        assert_eq!(
            err.to_string(),
            "Ragged pixel rows: row 3 has 9 pixels, expected 10"
        );

        let err = TransformError::DegenerateTransform { determinant: 0.0 };
        assert_eq!(
            err.to_string(),
            "Degenerate transform: determinant 0 is not invertible"
        );
    }
}
