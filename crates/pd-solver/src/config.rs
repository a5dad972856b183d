//! Solver configuration.

use pd_core::numeric::Tolerances;
use pd_core::units::constants::G0_MPS2;
use serde::{Deserialize, Serialize};

/// Switches for the optional pipe terms and the outlet comparison tolerance.
///
/// The default reproduces the friction-only pipe model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Add `ρ g L` for pipes flowing up or down.
    pub include_gravity: bool,
    /// Add `½ ρ (v_out² − v_in²)` across pipes.
    pub include_acceleration: bool,
    /// Gravitational acceleration (m/s²).
    pub gravity: f64,
    /// Outlet mass flow comparison (kg/s).
    pub mass_balance: Tolerances,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            include_gravity: false,
            include_acceleration: false,
            gravity: G0_MPS2,
            mass_balance: Tolerances {
                abs: 1e-9,
                rel: 1e-6,
            },
        }
    }
}

impl SolverConfig {
    /// Friction, hydrostatic and acceleration terms all enabled.
    pub fn full_pipe_model() -> Self {
        Self {
            include_gravity: true,
            include_acceleration: true,
            ..Self::default()
        }
    }
}
