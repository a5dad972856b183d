//! pd-registry: named numeric functions for geometry and loss resolution.
//!
//! Two registries with disjoint namespaces map a function name to a
//! [`NamedFunction`]. A registry binds a parameter mapping onto the function's
//! declared arguments and invokes it:
//!
//! ```
//! use pd_registry::{Params, builtin};
//!
//! let geom = builtin::geometry_registry();
//! let params = Params::from([("D".to_string(), 1.0)]);
//! let area = geom.resolve("area_circle", &params).unwrap();
//! assert!((area - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
//! ```
//!
//! Registries are populated once and shared read-only across solves; they are
//! `Send + Sync`.

pub mod builtin;
pub mod error;
pub mod formula;
pub mod geometry;
pub mod loss;
pub mod registry;

pub use error::{RegistryError, RegistryResult};
pub use formula::{Formula, FormulaError, NamedFunction};
pub use registry::{FunctionRegistry, GeomRegistry, Geometry, Loss, LossRegistry, Namespace, Params};
