//! pd-core: shared foundation for the pressure-drop engine.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - units (uom SI types + constructors)
//! - error (numeric helper errors)
//! - diagnostic (the network error taxonomy and solver warnings)

pub mod diagnostic;
pub mod error;
pub mod numeric;
pub mod units;

pub use diagnostic::{ErrorClass, ErrorKind, NetworkError, Warning};
pub use error::PdError;
pub use numeric::*;
pub use units::*;
