use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("invalid date bound {field}: '{value}'")]
    InvalidDateBound { field: &'static str, value: String },
}
