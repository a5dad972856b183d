//! End-to-end solves over hand-checked networks.

use pd_core::{ErrorClass, ErrorKind, Warning};
use pd_project::{
    ComponentKind, ComponentSpec, GeomTree, GeomValue, InletFlow, JunctionSpec, LossArg, LossSpec,
    NetworkSpec, OutletFlow, RefAreaSpec,
};
use pd_registry::builtin;
use pd_solver::{SolverConfig, StepKind, solve, solve_with_config};
use std::num::NonZeroU32;
use std::path::Path;

fn rel_close(a: f64, b: f64, rel: f64) -> bool {
    (a - b).abs() <= rel * b.abs().max(1.0)
}

fn supply() -> ComponentSpec {
    ComponentSpec::inlet(
        "supply",
        InletFlow {
            mass_flow_rate: 4000.0,
            density: 8000.0,
            pressure: 100_000.0,
            temperature: None,
        },
    )
}

fn exit() -> ComponentSpec {
    ComponentSpec::outlet("exit", OutletFlow::default())
}

fn orifice(geom: GeomTree, station: &str, loss: LossSpec) -> ComponentSpec {
    ComponentSpec::junction(
        "orifice",
        JunctionSpec {
            geom,
            ref_area: RefAreaSpec::new(station),
            loss,
        },
    )
}

fn unit_circle() -> GeomTree {
    GeomTree::from([(
        "outlet_area".to_string(),
        GeomValue::call("area_circle", [("D", 1.0)]),
    )])
}

fn network(components: Vec<ComponentSpec>) -> NetworkSpec {
    NetworkSpec {
        name: "scenario".into(),
        components,
    }
}

#[test]
fn junction_with_fixed_form_loss() {
    let net = network(vec![
        supply(),
        orifice(unit_circle(), "outlet_area", LossSpec::Scalar(14.7)),
        exit(),
    ]);
    let sol = solve(&net, &builtin::geometry_registry(), &builtin::loss_registry()).unwrap();

    assert_eq!(sol.component_results.len(), 1);
    let r = &sol.component_results[0];
    assert_eq!(r.kind, StepKind::Junction);
    assert!(rel_close(r.geom.get("outlet_area").unwrap(), 0.7854, 1e-4));
    assert!(rel_close(r.velocity, 0.6366, 1e-4));
    assert_eq!(r.coefficient, 14.7);
    assert!(rel_close(r.pressure_drop, 23_850.0, 2e-3));
    assert!(rel_close(r.pressure, 76_150.0, 1e-3));
    assert!(rel_close(sol.final_state.pressure.value, r.pressure, 1e-12));
    assert!(sol.warnings.is_empty());
}

#[test]
fn unreferenced_geometry_keys_may_use_any_text() {
    let geom = GeomTree::from([
        ("throat".to_string(), GeomValue::Scalar(0.5)),
        ("bevel-length".to_string(), GeomValue::Scalar(0.01)),
        ("outer wall".to_string(), GeomValue::Scalar(2.0)),
    ]);
    let net = network(vec![supply(), orifice(geom, "throat", LossSpec::Scalar(1.0)), exit()]);
    let sol = solve(&net, &builtin::geometry_registry(), &builtin::loss_registry()).unwrap();

    let r = &sol.component_results[0];
    assert_eq!(r.geom.get("bevel-length"), Some(0.01));
    assert!(rel_close(r.velocity, 1.0, 1e-12));
    assert!(rel_close(r.pressure_drop, 4_000.0, 1e-12));
    assert!(rel_close(sol.final_state.pressure.value, 96_000.0, 1e-12));
}

#[test]
fn missing_station_is_unresolved() {
    let geom = GeomTree::from([("inlet_area".to_string(), GeomValue::Scalar(0.5))]);
    let net = network(vec![
        supply(),
        orifice(geom, "outlet_area", LossSpec::Scalar(1.0)),
        exit(),
    ]);
    let err = solve(&net, &builtin::geometry_registry(), &builtin::loss_registry()).unwrap_err();

    assert_eq!(err.error.index, 1);
    assert_eq!(err.error.name, "orifice");
    assert_eq!(
        err.error.kind,
        ErrorKind::UnresolvedStation {
            station: "outlet_area".into()
        }
    );
    assert_eq!(err.error.class(), ErrorClass::Resolution);
    assert!(err.partial_results.is_empty());
}

#[test]
fn second_inlet_keeps_only_earlier_results() {
    let net = network(vec![
        supply(),
        orifice(unit_circle(), "outlet_area", LossSpec::Scalar(1.0)),
        supply(),
        orifice(unit_circle(), "outlet_area", LossSpec::Scalar(1.0)),
        exit(),
    ]);
    let err = solve(&net, &builtin::geometry_registry(), &builtin::loss_registry()).unwrap_err();

    assert_eq!(err.error, ErrorKind::UnexpectedInlet.at(2, "supply"));
    assert_eq!(err.partial_results.len(), 1);
    assert_eq!(err.partial_results[0].index, 1);
    assert!(err.to_string().contains("second inlet"));
}

#[test]
fn loss_placeholders_read_resolved_geometry() {
    let geom = GeomTree::from([
        (
            "inlet_area".to_string(),
            GeomValue::call("area_circle", [("D", 0.5)]),
        ),
        (
            "outlet_area".to_string(),
            GeomValue::call("area_circle", [("D", 1.0)]),
        ),
    ]);
    let loss = LossSpec::call(
        "sudden_expansion",
        [
            ("inlet_area", LossArg::geom_ref("inlet_area")),
            ("outlet_area", LossArg::geom_ref("outlet_area")),
        ],
    );
    let net = network(vec![supply(), orifice(geom, "inlet_area", loss), exit()]);
    let sol = solve(&net, &builtin::geometry_registry(), &builtin::loss_registry()).unwrap();

    // (1 - A_in / A_out)² with A_in / A_out = 1/4
    assert!(rel_close(sol.component_results[0].coefficient, 0.5625, 1e-12));
}

#[test]
fn unknown_loss_function() {
    let loss = LossSpec::call("no_such_correlation", Vec::<(&str, LossArg)>::new());
    let net = network(vec![supply(), orifice(unit_circle(), "outlet_area", loss), exit()]);
    let err = solve(&net, &builtin::geometry_registry(), &builtin::loss_registry()).unwrap_err();
    assert_eq!(
        err.error.kind,
        ErrorKind::UnknownFunction {
            registry: "loss",
            name: "no_such_correlation".into()
        }
    );
}

#[test]
fn geometry_names_are_not_visible_to_loss() {
    let loss = LossSpec::call("area_circle", [("D", LossArg::Number(1.0))]);
    let net = network(vec![supply(), orifice(unit_circle(), "outlet_area", loss), exit()]);
    let err = solve(&net, &builtin::geometry_registry(), &builtin::loss_registry()).unwrap_err();
    assert!(matches!(
        err.error.kind,
        ErrorKind::UnknownFunction { registry: "loss", .. }
    ));
}

#[test]
fn flow_splits_scale_velocity_only() {
    let mut split = orifice(unit_circle(), "outlet_area", LossSpec::Scalar(1.0));
    if let ComponentKind::Junction(spec) = &mut split.kind {
        spec.ref_area = RefAreaSpec::new("outlet_area").with_splits(NonZeroU32::new(2).unwrap());
    }
    let single = orifice(unit_circle(), "outlet_area", LossSpec::Scalar(1.0));

    let regs = (builtin::geometry_registry(), builtin::loss_registry());
    let a = solve(&network(vec![supply(), single, exit()]), &regs.0, &regs.1).unwrap();
    let b = solve(&network(vec![supply(), split, exit()]), &regs.0, &regs.1).unwrap();

    let (ra, rb) = (&a.component_results[0], &b.component_results[0]);
    assert!(rel_close(ra.velocity, 2.0 * rb.velocity, 1e-12));
    assert!(rel_close(ra.pressure_drop, 4.0 * rb.pressure_drop, 1e-12));
    assert_eq!(rb.flow_splits, 2);
    assert_eq!(ra.mass_flow_rate, rb.mass_flow_rate);
}

#[test]
fn outlet_mass_flow_mismatch_warns_without_aborting() {
    let out = ComponentSpec::outlet(
        "exit",
        OutletFlow {
            mass_flow_rate: Some(3990.0),
            ..OutletFlow::default()
        },
    );
    let net = network(vec![
        supply(),
        orifice(unit_circle(), "outlet_area", LossSpec::Scalar(14.7)),
        out,
    ]);
    let sol = solve(&net, &builtin::geometry_registry(), &builtin::loss_registry()).unwrap();

    assert_eq!(sol.warnings.len(), 1);
    let Warning::MassBalanceMismatch {
        index,
        declared,
        computed,
        ..
    } = &sol.warnings[0];
    assert_eq!((*index, *declared, *computed), (2, 3990.0, 4000.0));
    assert_eq!(sol.final_state.mass_flow_rate.value, 4000.0);
}

#[test]
fn matching_outlet_is_silent() {
    let out = ComponentSpec::outlet(
        "exit",
        OutletFlow {
            mass_flow_rate: Some(4000.0),
            ..OutletFlow::default()
        },
    );
    let net = network(vec![supply(), out]);
    let sol = solve(&net, &builtin::geometry_registry(), &builtin::loss_registry()).unwrap();
    assert!(sol.warnings.is_empty());
    assert!(sol.component_results.is_empty());
    assert_eq!(sol.total_pressure_drop(), 0.0);
}

#[test]
fn demo_network_solves() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../networks/demo.yaml");
    let spec = pd_project::load(&path).unwrap();
    let geom = builtin::geometry_registry();
    let loss = builtin::loss_registry();

    let plain = solve(&spec, &geom, &loss).unwrap();
    assert_eq!(plain.component_results.len(), 3);
    assert!(plain.warnings.is_empty());
    assert!(plain.component_results.iter().all(|r| r.pressure_drop > 0.0));
    assert!(plain.final_state.pressure.value < 350_000.0);

    let full = solve_with_config(&spec, &geom, &loss, &SolverConfig::full_pipe_model()).unwrap();
    let riser = &full.component_results[1];
    assert_eq!(riser.kind, StepKind::Pipe);
    // 998 * 9.80665 * 6 climbing
    assert!(rel_close(riser.dp_gravity, 58_722.2, 1e-4));
    assert_eq!(riser.dp_accel, 0.0);
    assert!(full.total_pressure_drop() > plain.total_pressure_drop());
}
