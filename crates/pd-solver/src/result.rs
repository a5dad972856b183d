//! Solve output: the per-component trace and the final boundary state.

use crate::resolve::ResolvedGeom;
use crate::state::FlowState;
use pd_core::{NetworkError, Warning};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Junction,
    Pipe,
}

/// One solved junction or pipe. Values are SI (Pa, m/s, m², kg/s).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentResult {
    /// Position in the network, inlet and outlet included.
    pub index: usize,
    pub name: String,
    pub kind: StepKind,
    pub geom: ResolvedGeom,
    pub ref_area: f64,
    pub flow_splits: u32,
    pub mass_flow_rate: f64,
    /// Reference velocity through `ref_area`.
    pub velocity: f64,
    /// Pipes only.
    pub inlet_velocity: Option<f64>,
    /// Pipes only.
    pub outlet_velocity: Option<f64>,
    /// K for a junction, Darcy f for a pipe.
    pub coefficient: f64,
    pub dp_loss: f64,
    pub dp_gravity: f64,
    pub dp_accel: f64,
    /// `dp_loss + dp_gravity + dp_accel`
    pub pressure_drop: f64,
    pub inlet_pressure: f64,
    /// Pressure leaving the component.
    pub pressure: f64,
    /// Pressure drop accumulated since the inlet, this component included.
    pub cumulative_dp: f64,
}

/// A completed solve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    pub network: String,
    pub inlet: FlowState,
    pub final_state: FlowState,
    pub component_results: Vec<ComponentResult>,
    pub warnings: Vec<Warning>,
}

impl Solution {
    /// Inlet pressure minus outlet pressure (Pa).
    pub fn total_pressure_drop(&self) -> f64 {
        self.inlet.pressure.value - self.final_state.pressure.value
    }

    /// Pressure entering the network followed by the pressure after each
    /// junction or pipe.
    pub fn pressure_profile(&self) -> Vec<f64> {
        std::iter::once(self.inlet.pressure.value)
            .chain(self.component_results.iter().map(|r| r.pressure))
            .collect()
    }
}

/// A solve aborted at its first fatal error.
///
/// `partial_results` holds the components solved before the failure; no
/// final state is exposed.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{error}")]
pub struct SolveFailure {
    pub error: NetworkError,
    pub partial_results: Vec<ComponentResult>,
    pub warnings: Vec<Warning>,
}

pub type SolveResult = Result<Solution, SolveFailure>;
