//! Engine error taxonomy

use crate::features::Feature;
use thiserror::Error;

/// Failures raised before any scoring work is attempted
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// A field is absent (`value: None`) or holds NaN or an infinity
    #[error("invalid input: {field} {}", describe(.value))]
    InvalidInput { field: Feature, value: Option<f64> },
}

fn describe(value: &Option<f64>) -> String {
    match value {
        Some(v) => format!("must be finite (got {})", v),
        None => "is missing".to_string(),
    }
}

impl EngineError {
    /// Field the failure refers to
    pub fn field(&self) -> Feature {
        match self {
            EngineError::InvalidInput { field, .. } => *field,
        }
    }

    /// True when the field was absent rather than non-finite
    pub fn is_missing(&self) -> bool {
        matches!(self, EngineError::InvalidInput { value: None, .. })
    }
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let missing = EngineError::InvalidInput {
            field: Feature::Bmi,
            value: None,
        };
        assert_eq!(missing.to_string(), "invalid input: bmi is missing");
        assert!(missing.is_missing());

        let infinite = EngineError::InvalidInput {
            field: Feature::Age,
            value: Some(f64::INFINITY),
        };
        assert_eq!(infinite.to_string(), "invalid input: age must be finite (got inf)");
        assert!(!infinite.is_missing());
    }
}
