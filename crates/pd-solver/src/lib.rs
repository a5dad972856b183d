//! Single-pass pressure-drop solver for an ordered chain of components.
//!
//! The solver walks the network once, from the inlet to the outlet, carrying
//! a flow state (mass flow rate, density, pressure, temperature). For each
//! junction or pipe it resolves the declared geometry and loss coefficient
//! through the registries, computes the reference velocity and the pressure
//! drop, and lowers the pressure accordingly. Density and temperature are
//! carried forward unchanged.

pub mod config;
pub mod physics;
pub mod placeholder;
pub mod resolve;
pub mod result;
pub mod solve;
pub mod state;

pub use config::SolverConfig;
pub use placeholder::{ArgTerm, PlaceholderError};
pub use resolve::{ResolvedGeom, resolve_geom, resolve_loss, resolve_ref_area};
pub use result::{ComponentResult, SolveFailure, SolveResult, Solution, StepKind};
pub use solve::{check_topology, solve, solve_with_config};
pub use state::{FlowState, Phase};
