use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PdError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },
}
