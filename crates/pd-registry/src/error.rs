//! Error types for registry lookups and invocations.

use pd_core::ErrorKind;
use thiserror::Error;

/// Errors that can occur while resolving a named function.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Unknown {namespace} function: {name}")]
    UnknownFunction {
        namespace: &'static str,
        name: String,
    },

    #[error("Duplicate {namespace} function: {name}")]
    DuplicateFunction {
        namespace: &'static str,
        name: String,
    },

    #[error("Missing argument '{param}' for {function}")]
    MissingArgument { function: String, param: String },

    #[error("Unexpected argument '{param}' for {function}")]
    UnexpectedArgument { function: String, param: String },

    #[error("Non-finite argument '{param}' = {value} for {function}")]
    NonFiniteArgument {
        function: String,
        param: String,
        value: f64,
    },

    #[error("{function} rejected '{param}': {reason}")]
    Domain {
        function: String,
        param: String,
        reason: String,
    },

    #[error("{function} returned non-finite value {value}")]
    NonFiniteResult { function: String, value: f64 },
}

pub type RegistryResult<T> = Result<T, RegistryError>;

impl From<RegistryError> for ErrorKind {
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::UnknownFunction { namespace, name } => ErrorKind::UnknownFunction {
                registry: namespace,
                name,
            },
            RegistryError::DuplicateFunction { namespace, name } => ErrorKind::InvalidParam {
                function: name,
                param: String::new(),
                reason: format!("registered twice in the {namespace} registry"),
            },
            RegistryError::MissingArgument { function, param } => ErrorKind::InvalidParam {
                function,
                param,
                reason: "missing argument".to_string(),
            },
            RegistryError::UnexpectedArgument { function, param } => ErrorKind::InvalidParam {
                function,
                param,
                reason: "unexpected argument".to_string(),
            },
            RegistryError::NonFiniteArgument {
                function,
                param,
                value,
            } => ErrorKind::InvalidParam {
                function,
                param,
                reason: format!("non-finite value {value}"),
            },
            RegistryError::Domain {
                function,
                param,
                reason,
            } => ErrorKind::InvalidParam {
                function,
                param,
                reason,
            },
            RegistryError::NonFiniteResult { function, value } => ErrorKind::InvalidParam {
                function,
                param: String::new(),
                reason: format!("evaluated to non-finite value {value}"),
            },
        }
    }
}
