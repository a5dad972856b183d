//! Error taxonomy and warnings reported while building or solving a network.
//!
//! Every fatal failure is an [`ErrorKind`] wrapped in a [`NetworkError`] that
//! locates the offending component by position and name. Non-fatal findings
//! are [`Warning`]s attached to the solve result.

use std::fmt;
use thiserror::Error;

/// Coarse grouping of [`ErrorKind`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorClass {
    Schema,
    Resolution,
    Topology,
    Numeric,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorClass::Schema => "schema",
            ErrorClass::Resolution => "resolution",
            ErrorClass::Topology => "topology",
            ErrorClass::Numeric => "numeric",
        };
        f.write_str(label)
    }
}

/// What went wrong, independent of where.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorKind {
    // Schema
    #[error("missing required field `{field}`")]
    MissingRequiredField { field: String },

    #[error("field `{field}` is invalid: expected {expected}, found {found}")]
    InvalidFieldType {
        field: String,
        expected: &'static str,
        found: String,
    },

    // Resolution
    #[error("unknown {registry} function '{name}'")]
    UnknownFunction { registry: &'static str, name: String },

    #[error("geometry key '{key}' cannot be named by a ${{geom.<key>}} placeholder")]
    UnknownGeomKey { key: String },

    #[error("ref_area station '{station}' is not a key of the resolved geometry")]
    UnresolvedStation { station: String },

    #[error("placeholder '{placeholder}' refers to undefined geometry key '{key}'")]
    UnresolvedPlaceholder { placeholder: String, key: String },

    #[error(
        "loss parameter '{param}' is a nested call to '{func}'; \
         only numbers and ${{geom.<key>}} references are allowed"
    )]
    NestedCallableNotAllowed { param: String, func: String },

    #[error("invalid parameter '{param}' for '{function}': {reason}")]
    InvalidParam {
        function: String,
        param: String,
        reason: String,
    },

    // Topology
    #[error("no inlet precedes this component")]
    MissingInlet,

    #[error("a second inlet was found")]
    UnexpectedInlet,

    #[error("outlet reached before any inlet")]
    UnexpectedOutlet,

    #[error("component follows the outlet")]
    ComponentAfterOutlet,

    #[error("network ends without an outlet")]
    MissingOutlet,

    // Numeric
    #[error("reference area for station '{station}' must be positive, got {area}")]
    NonPositiveArea { station: String, area: f64 },

    #[error("division by zero: {what} = {value}")]
    DivisionByZero { what: &'static str, value: f64 },

    #[error("pipe geometry `{key}` {reason}")]
    MissingPipeGeometry {
        key: &'static str,
        reason: &'static str,
    },
}

impl ErrorKind {
    pub fn class(&self) -> ErrorClass {
        use ErrorKind::*;
        match self {
            MissingRequiredField { .. } | InvalidFieldType { .. } => ErrorClass::Schema,
            UnknownFunction { .. }
            | UnknownGeomKey { .. }
            | UnresolvedStation { .. }
            | UnresolvedPlaceholder { .. }
            | NestedCallableNotAllowed { .. }
            | InvalidParam { .. } => ErrorClass::Resolution,
            MissingInlet | UnexpectedInlet | UnexpectedOutlet | ComponentAfterOutlet
            | MissingOutlet => ErrorClass::Topology,
            NonPositiveArea { .. } | DivisionByZero { .. } | MissingPipeGeometry { .. } => {
                ErrorClass::Numeric
            }
        }
    }

    /// Attach the position and name of the component that raised this error.
    pub fn at(self, index: usize, name: impl Into<String>) -> NetworkError {
        NetworkError {
            index,
            name: name.into(),
            kind: self,
        }
    }
}

/// An [`ErrorKind`] located at a component of the network.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("component #{index} '{name}': {kind}")]
pub struct NetworkError {
    pub index: usize,
    pub name: String,
    pub kind: ErrorKind,
}

impl NetworkError {
    pub fn class(&self) -> ErrorClass {
        self.kind.class()
    }
}

/// Non-fatal findings; never abort a solve.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Warning {
    /// The outlet declares a mass flow rate that differs from the one carried
    /// through the network.
    MassBalanceMismatch {
        index: usize,
        name: String,
        declared: f64,
        computed: f64,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::MassBalanceMismatch {
                index,
                name,
                declared,
                computed,
            } => write!(
                f,
                "component #{index} '{name}': declared mass flow rate {declared} kg/s \
                 differs from computed {computed} kg/s"
            ),
        }
    }
}
