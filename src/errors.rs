//! Errors
//!
//! Custom error types used throughout the `infotree` crate.
use thiserror::Error;

/// Errors that can occur when configuring, fitting or using a tree.
#[derive(Debug, Error, PartialEq)]
pub enum TreeError {
    /// Prediction was requested before the model was fitted.
    #[error("This model is not fitted yet, call `fit` before using it.")]
    NotFitted,
    /// Number of features at prediction time differs from the one seen during fitting.
    #[error("The model was fitted on {0} features, but data with {1} features was provided.")]
    ShapeMismatch(usize, usize),
    /// First value is the name of the parameter, second is expected, third is what was passed.
    #[error("Invalid parameter value passed for {0}, expected {1} but {2} provided.")]
    InvalidParameter(String, String, String),
    /// Parameter name is not one the model recognizes.
    #[error("Invalid parameter {0} for estimator DecisionTreeClassifier.")]
    UnknownParameter(String),
    /// Number of labels does not match the number of rows.
    #[error("Found {0} rows in the data, but {1} labels.")]
    LabelLengthMismatch(usize, usize),
    /// Data without rows or without columns.
    #[error("At least one row and one column are required, data with shape ({0}, {1}) was provided.")]
    EmptyData(usize, usize),
    /// NaN or infinite value found in the data.
    #[error("Non finite value found in the data at row {0}, column {1}.")]
    NonFiniteValue(usize, usize),
    /// Unable to write model to file.
    #[error("Unable to write model to file: {0}")]
    UnableToWrite(String),
    /// Unable to read model from file.
    #[error("Unable to read model from a file {0}")]
    UnableToRead(String),
}
