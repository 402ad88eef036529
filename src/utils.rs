use crate::data::Matrix;
use crate::errors::TreeError;

/// Create a string of all available items.
pub fn items_to_strings(items: Vec<&str>) -> String {
    items.join(", ")
}

// Validation
pub fn validate_min_parameter(value: i64, min: i64, parameter: &str) -> Result<(), TreeError> {
    if value < min {
        Err(TreeError::InvalidParameter(
            parameter.to_string(),
            format!("integer value of at least {}", min),
            value.to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Check the matrix holds only finite values, reporting the first offending cell.
pub fn validate_finite(data: &Matrix<f64>) -> Result<(), TreeError> {
    match data.data.iter().position(|v| !v.is_finite()) {
        // Column major storage.
        Some(p) => Err(TreeError::NonFiniteValue(p % data.rows, p / data.rows)),
        None => Ok(()),
    }
}

/// Sorted distinct labels.
pub fn unique_labels(y: &[usize]) -> Vec<usize> {
    let mut classes = y.to_vec();
    classes.sort_unstable();
    classes.dedup();
    classes
}
