use thiserror::Error;

/// Rejection of a run parameter, raised before any peak data is touched.
#[derive(Error, Clone, PartialEq, Debug)]
#[error("invalid value for parameter `{parameter}`: {message}")]
pub struct ParameterError {
    pub parameter: &'static str,
    pub message: String,
}

impl ParameterError {
    pub fn new(parameter: &'static str, message: impl Into<String>) -> Self {
        ParameterError {
            parameter,
            message: message.into(),
        }
    }
}
