//! Running flow state and the march phase machine.

use pd_core::ErrorKind;
use pd_core::units::{Density, MassRate, Pressure, Temperature, k, kg_per_m3, kgps, pa};
use pd_project::{ComponentKind, InletFlow};
use serde::Serialize;

/// Snapshot of the flow between two components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlowState {
    pub mass_flow_rate: MassRate,
    pub density: Density,
    pub pressure: Pressure,
    pub temperature: Option<Temperature>,
}

impl FlowState {
    pub fn from_inlet(flow: &InletFlow) -> Self {
        Self {
            mass_flow_rate: kgps(flow.mass_flow_rate),
            density: kg_per_m3(flow.density),
            pressure: pa(flow.pressure),
            temperature: flow.temperature.map(k),
        }
    }

    /// Same state at a new pressure; mass flow, density and temperature carry
    /// forward unchanged.
    pub fn with_pressure(self, pressure: Pressure) -> Self {
        Self { pressure, ..self }
    }
}

/// Where the march stands in the component sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    AwaitingInlet,
    Flowing,
    Terminated,
}

impl Phase {
    /// Phase after accepting a component of the given kind.
    pub fn advance(self, kind: &ComponentKind) -> Result<Phase, ErrorKind> {
        use ComponentKind::*;
        match (self, kind) {
            (Phase::Terminated, _) => Err(ErrorKind::ComponentAfterOutlet),
            (Phase::AwaitingInlet, Inlet(_)) => Ok(Phase::Flowing),
            (Phase::AwaitingInlet, Outlet(_)) => Err(ErrorKind::UnexpectedOutlet),
            (Phase::AwaitingInlet, Junction(_) | Pipe(_)) => Err(ErrorKind::MissingInlet),
            (Phase::Flowing, Inlet(_)) => Err(ErrorKind::UnexpectedInlet),
            (Phase::Flowing, Outlet(_)) => Ok(Phase::Terminated),
            (Phase::Flowing, Junction(_) | Pipe(_)) => Ok(Phase::Flowing),
        }
    }

    /// Check the phase once the sequence is exhausted.
    pub fn finish(self) -> Result<(), ErrorKind> {
        match self {
            Phase::AwaitingInlet => Err(ErrorKind::MissingInlet),
            Phase::Flowing => Err(ErrorKind::MissingOutlet),
            Phase::Terminated => Ok(()),
        }
    }
}
