/// Error returned from the model dispatch layer and the bound transforms
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum FitModelError {
    #[error("invalid bound configuration: max ({max}) must be greater than min ({min})")]
    InvalidBounds { min: f64, max: f64 },

    #[error("value {value} lies outside the bound interval [{min}, {max}]")]
    ValueOutsideBounds { value: f64, min: f64, max: f64 },

    #[error("{model} expects {expected} parameters, got {actual}")]
    ParameterCountMismatch {
        model: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("parameter index {index} is out of range for {model} with {count} parameters")]
    ParameterIndexOutOfRange {
        model: &'static str,
        index: usize,
        count: usize,
    },
}
