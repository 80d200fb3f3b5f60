use thiserror::Error;

use crate::status::ServiceStatus;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("cannot {transition} a record in status {from}")]
    InvalidTransition {
        transition: &'static str,
        from: ServiceStatus,
    },
}

impl ModelError {
    pub fn required(field: &str) -> Self {
        Self::Validation(format!("{field} is required"))
    }
}
