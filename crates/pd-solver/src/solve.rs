//! The single forward march over the component sequence.

use crate::config::SolverConfig;
use crate::physics;
use crate::resolve::{ResolvedGeom, resolve_geom, resolve_loss, resolve_ref_area};
use crate::result::{ComponentResult, SolveFailure, SolveResult, Solution, StepKind};
use crate::state::{FlowState, Phase};
use pd_core::numeric::nearly_equal;
use pd_core::units::pa;
use pd_core::{ErrorKind, NetworkError, Warning};
use pd_project::{
    ComponentKind, ComponentSpec, FlowDirection, GeomTree, LossSpec, NetworkSpec, OutletFlow,
    RefAreaSpec,
};
use pd_registry::{GeomRegistry, LossRegistry};
use tracing::{debug, info, info_span, warn};

/// Solve with the default configuration (friction-only pipes).
pub fn solve(network: &NetworkSpec, geom: &GeomRegistry, loss: &LossRegistry) -> SolveResult {
    solve_with_config(network, geom, loss, &SolverConfig::default())
}

/// March the network from inlet to outlet.
///
/// Stops at the first fatal error; the returned [`SolveFailure`] carries the
/// results of every component solved before it.
pub fn solve_with_config(
    network: &NetworkSpec,
    geom: &GeomRegistry,
    loss: &LossRegistry,
    config: &SolverConfig,
) -> SolveResult {
    let span = info_span!("solve", network = %network.name);
    let _guard = span.enter();
    info!(components = network.components.len(), "starting solve");

    let mut march = March {
        geom,
        loss,
        config,
        phase: Phase::AwaitingInlet,
        inlet: None,
        current: None,
        results: Vec::new(),
        warnings: Vec::new(),
    };

    for (index, component) in network.components.iter().enumerate() {
        if let Err(kind) = march.step(index, component) {
            return Err(march.fail(kind.at(index, component.name.as_str())));
        }
    }

    if let Err(kind) = march.phase.finish() {
        let error = locate_end(network, kind);
        return Err(march.fail(error));
    }

    match (march.inlet, march.current) {
        (Some(inlet), Some(final_state)) => {
            info!(
                pressure = final_state.pressure.value,
                dp_total = inlet.pressure.value - final_state.pressure.value,
                warnings = march.warnings.len(),
                "solve finished"
            );
            Ok(Solution {
                network: network.name.clone(),
                inlet,
                final_state,
                component_results: march.results,
                warnings: march.warnings,
            })
        }
        // A terminated march has always seen an inlet.
        _ => {
            let error = ErrorKind::MissingInlet.at(0, network.name.as_str());
            Err(march.fail(error))
        }
    }
}

/// Scan the component order without resolving any values.
///
/// Reports the same topology errors the march would raise.
pub fn check_topology(network: &NetworkSpec) -> Result<(), NetworkError> {
    let mut phase = Phase::AwaitingInlet;
    for (index, component) in network.components.iter().enumerate() {
        phase = phase
            .advance(&component.kind)
            .map_err(|kind| kind.at(index, component.name.as_str()))?;
    }
    phase.finish().map_err(|kind| locate_end(network, kind))
}

/// Errors raised after the last component point at it; an empty network
/// points at itself.
fn locate_end(network: &NetworkSpec, kind: ErrorKind) -> NetworkError {
    match network.components.last() {
        Some(last) => kind.at(network.components.len() - 1, last.name.as_str()),
        None => kind.at(0, network.name.as_str()),
    }
}

struct March<'a> {
    geom: &'a GeomRegistry,
    loss: &'a LossRegistry,
    config: &'a SolverConfig,
    phase: Phase,
    inlet: Option<FlowState>,
    current: Option<FlowState>,
    results: Vec<ComponentResult>,
    warnings: Vec<Warning>,
}

/// Borrowed view of the fields junctions and pipes share.
struct Element<'s> {
    kind: StepKind,
    geom: &'s GeomTree,
    ref_area: &'s RefAreaSpec,
    loss: &'s LossSpec,
    flow_direction: FlowDirection,
}

impl March<'_> {
    fn step(&mut self, index: usize, component: &ComponentSpec) -> Result<(), ErrorKind> {
        self.phase = self.phase.advance(&component.kind)?;

        match &component.kind {
            ComponentKind::Inlet(flow) => {
                let state = FlowState::from_inlet(flow);
                debug!(
                    index,
                    component = %component.name,
                    mass_flow_rate = flow.mass_flow_rate,
                    pressure = flow.pressure,
                    "inlet"
                );
                self.inlet = Some(state);
                self.current = Some(state);
                Ok(())
            }
            ComponentKind::Outlet(flow) => {
                self.check_outlet(index, &component.name, flow);
                Ok(())
            }
            ComponentKind::Junction(spec) => self.solve_element(
                index,
                &component.name,
                Element {
                    kind: StepKind::Junction,
                    geom: &spec.geom,
                    ref_area: &spec.ref_area,
                    loss: &spec.loss,
                    flow_direction: FlowDirection::Side,
                },
            ),
            ComponentKind::Pipe(spec) => self.solve_element(
                index,
                &component.name,
                Element {
                    kind: StepKind::Pipe,
                    geom: &spec.geom,
                    ref_area: &spec.ref_area,
                    loss: &spec.loss,
                    flow_direction: spec.flow_direction,
                },
            ),
        }
    }

    fn solve_element(
        &mut self,
        index: usize,
        name: &str,
        element: Element<'_>,
    ) -> Result<(), ErrorKind> {
        // Phase::advance only lets junctions and pipes through while flowing.
        let state = self.current.ok_or(ErrorKind::MissingInlet)?;

        let geom = resolve_geom(element.geom, self.geom)?;

        let (area, splits) = resolve_ref_area(element.ref_area, &geom)?;
        if area <= 0.0 {
            return Err(ErrorKind::NonPositiveArea {
                station: element.ref_area.station.clone(),
                area,
            });
        }

        let mdot = state.mass_flow_rate.value;
        let rho = state.density.value;
        if rho.is_nan() || rho <= 0.0 {
            return Err(ErrorKind::DivisionByZero {
                what: "density",
                value: rho,
            });
        }
        let velocity = physics::velocity(mdot, rho, area, splits);

        let coefficient = resolve_loss(element.loss, &geom, self.loss)?;

        let mut terms = Terms::default();
        match element.kind {
            StepKind::Junction => {
                terms.loss = physics::junction_loss(coefficient, rho, velocity);
            }
            StepKind::Pipe => {
                let length = geom.get("length").ok_or(ErrorKind::MissingPipeGeometry {
                    key: "length",
                    reason: "is not defined",
                })?;
                let d_h = positive_geom(&geom, "hydraulic_diameter")?;
                terms.loss = physics::pipe_friction(coefficient, length, d_h, rho, velocity);

                if self.config.include_gravity {
                    terms.gravity = physics::hydrostatic(
                        rho,
                        self.config.gravity,
                        length,
                        element.flow_direction.sign(),
                    );
                }

                if self.config.include_acceleration {
                    let a_in = positive_geom(&geom, "inlet_area")?;
                    let a_out = positive_geom(&geom, "outlet_area")?;
                    let v_in = physics::velocity(mdot, rho, a_in, splits);
                    let v_out = physics::velocity(mdot, rho, a_out, splits);
                    terms.accel = physics::acceleration(rho, v_in, v_out);
                    terms.velocities = Some((v_in, v_out));
                } else {
                    terms.velocities = end_velocities(&geom, mdot, rho, splits);
                }
            }
        }

        let pressure_drop = terms.loss + terms.gravity + terms.accel;
        let inlet_pressure = state.pressure.value;
        let pressure = inlet_pressure - pressure_drop;
        let cumulative_dp = self.results.last().map_or(0.0, |r| r.cumulative_dp) + pressure_drop;

        debug!(
            index,
            component = name,
            velocity,
            coefficient,
            dp = pressure_drop,
            pressure,
            "component solved"
        );

        self.current = Some(state.with_pressure(pa(pressure)));
        self.results.push(ComponentResult {
            index,
            name: name.to_string(),
            kind: element.kind,
            geom,
            ref_area: area,
            flow_splits: splits,
            mass_flow_rate: mdot,
            velocity,
            inlet_velocity: terms.velocities.map(|(v, _)| v),
            outlet_velocity: terms.velocities.map(|(_, v)| v),
            coefficient,
            dp_loss: terms.loss,
            dp_gravity: terms.gravity,
            dp_accel: terms.accel,
            pressure_drop,
            inlet_pressure,
            pressure,
            cumulative_dp,
        });
        Ok(())
    }

    fn check_outlet(&mut self, index: usize, name: &str, flow: &OutletFlow) {
        let (Some(declared), Some(state)) = (flow.mass_flow_rate, self.current) else {
            return;
        };
        let computed = state.mass_flow_rate.value;
        if nearly_equal(declared, computed, self.config.mass_balance) {
            return;
        }
        let warning = Warning::MassBalanceMismatch {
            index,
            name: name.to_string(),
            declared,
            computed,
        };
        warn!("{warning}");
        self.warnings.push(warning);
    }

    fn fail(self, error: NetworkError) -> SolveFailure {
        warn!(error = %error, solved = self.results.len(), "solve aborted");
        SolveFailure {
            error,
            partial_results: self.results,
            warnings: self.warnings,
        }
    }
}

#[derive(Default)]
struct Terms {
    loss: f64,
    gravity: f64,
    accel: f64,
    velocities: Option<(f64, f64)>,
}

fn positive_geom(geom: &ResolvedGeom, key: &'static str) -> Result<f64, ErrorKind> {
    match geom.get(key) {
        Some(v) if v > 0.0 => Ok(v),
        Some(_) => Err(ErrorKind::MissingPipeGeometry {
            key,
            reason: "must be positive",
        }),
        None => Err(ErrorKind::MissingPipeGeometry {
            key,
            reason: "is not defined",
        }),
    }
}

/// Inlet and outlet velocities when both end areas are usable.
fn end_velocities(geom: &ResolvedGeom, mdot: f64, rho: f64, splits: u32) -> Option<(f64, f64)> {
    let a_in = geom.get("inlet_area").filter(|a| *a > 0.0)?;
    let a_out = geom.get("outlet_area").filter(|a| *a > 0.0)?;
    Some((
        physics::velocity(mdot, rho, a_in, splits),
        physics::velocity(mdot, rho, a_out, splits),
    ))
}
