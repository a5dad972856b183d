//! Schema validation: decoded component defs → typed model.
//!
//! Stops at the first problem and reports it with the component's position
//! and name.

use crate::model::*;
use crate::schema::*;
use pd_core::{ErrorKind, NetworkError};
use serde_json::Value;
use std::collections::BTreeMap;
use std::num::NonZeroU32;

type FieldResult<T> = Result<T, ErrorKind>;

/// Name reported for components whose `name` is missing or malformed.
pub const UNNAMED: &str = "<unnamed>";

pub fn build_network(doc: &NetworkDocument) -> Result<NetworkSpec, NetworkError> {
    let components = doc
        .network
        .iter()
        .enumerate()
        .map(|(index, value)| build_component(index, value))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(NetworkSpec {
        name: doc.name.clone(),
        components,
    })
}

fn build_component(index: usize, value: &Value) -> Result<ComponentSpec, NetworkError> {
    let located_name = value.get("name").and_then(Value::as_str).unwrap_or(UNNAMED);
    let def = decode(value).map_err(|kind| kind.at(index, located_name))?;
    let kind = component_kind(def.kind).map_err(|kind| kind.at(index, def.name.as_str()))?;

    Ok(ComponentSpec {
        name: def.name,
        desc: def.desc,
        kind,
    })
}

fn decode(value: &Value) -> FieldResult<ComponentDef> {
    if !value.is_object() {
        return Err(invalid("component", "mapping", value.to_string()));
    }
    for field in ["name", "type"] {
        if value.get(field).is_none_or(Value::is_null) {
            return Err(missing(field));
        }
    }
    serde_json::from_value(value.clone()).map_err(|e| {
        invalid(
            "component",
            "inlet, outlet, junction or pipe mapping",
            e.to_string(),
        )
    })
}

fn component_kind(def: ComponentKindDef) -> FieldResult<ComponentKind> {
    let kind = match def {
        ComponentKindDef::Inlet { flow } => {
            ComponentKind::Inlet(inlet_flow(required(flow, "flow")?)?)
        }
        ComponentKindDef::Outlet { flow } => ComponentKind::Outlet(OutletFlow {
            mass_flow_rate: flow.mass_flow_rate,
            density: flow.density,
            pressure: flow.pressure,
            temperature: flow.temperature,
        }),
        // flow_direction is checked and dropped; junctions have no hydrostatic term.
        ComponentKindDef::Junction(body) => {
            let (geom, _) = geom_tree(required(body.geom, "geom")?)?;
            let ref_area = ref_area(required(body.ref_area, "ref_area")?)?;
            let loss = required(body.loss, "loss")?;
            ComponentKind::Junction(JunctionSpec {
                geom,
                ref_area,
                loss: loss_spec(loss.form, "loss.form")?,
            })
        }
        ComponentKindDef::Pipe(body) => {
            let (geom, flow_direction) = geom_tree(required(body.geom, "geom")?)?;
            if let Some(key) = PIPE_GEOM_KEYS.iter().find(|key| !geom.contains_key(**key)) {
                return Err(missing(&format!("geom.{key}")));
            }
            let ref_area = ref_area(required(body.ref_area, "ref_area")?)?;
            let loss = required(body.loss, "loss")?;
            ComponentKind::Pipe(PipeSpec {
                geom,
                ref_area,
                loss: loss_spec(loss.friction, "loss.friction")?,
                flow_direction,
            })
        }
    };
    Ok(kind)
}

fn inlet_flow(flow: InletFlowDef) -> FieldResult<InletFlow> {
    Ok(InletFlow {
        mass_flow_rate: positive(
            required(flow.mass_flow_rate, "flow.mass_flow_rate")?,
            "flow.mass_flow_rate",
        )?,
        density: positive(required(flow.density, "flow.density")?, "flow.density")?,
        pressure: required(flow.pressure, "flow.pressure")?,
        temperature: flow.temperature,
    })
}

/// Split the reserved `flow_direction` key off the geometry entries.
fn geom_tree(entries: BTreeMap<String, ValueDef>) -> FieldResult<(GeomTree, FlowDirection)> {
    let mut tree = GeomTree::new();
    let mut direction = FlowDirection::default();

    for (key, value) in entries {
        let path = format!("geom.{key}");

        if key == FLOW_DIRECTION_KEY {
            let parsed = match &value {
                ValueDef::Text(text) => FlowDirection::parse(text),
                _ => None,
            };
            direction =
                parsed.ok_or_else(|| invalid(&path, "'up', 'down' or 'side'", describe(&value)))?;
            continue;
        }

        let geom_value = match value {
            ValueDef::Number(v) => GeomValue::Scalar(v),
            ValueDef::Call(call) => GeomValue::Call(geom_call(call)?),
            text @ ValueDef::Text(_) => {
                return Err(invalid(
                    &path,
                    "number or {func, params} mapping",
                    describe(&text),
                ));
            }
        };
        tree.insert(key, geom_value);
    }

    Ok((tree, direction))
}

fn geom_call(call: CallDef) -> FieldResult<GeomCall> {
    let CallDef { func, params: raw } = call;
    let mut params = BTreeMap::new();

    for (param, value) in raw {
        match value {
            ValueDef::Number(v) => {
                params.insert(param, v);
            }
            other => {
                return Err(ErrorKind::InvalidParam {
                    function: func,
                    param,
                    reason: format!(
                        "geometry parameters must be numbers, found {}",
                        describe(&other)
                    ),
                });
            }
        }
    }

    Ok(GeomCall { func, params })
}

fn ref_area(def: RefAreaDef) -> FieldResult<RefAreaSpec> {
    let station = required(def.station, "ref_area.station")?;
    let flow_splits = NonZeroU32::new(def.flow_splits).ok_or_else(|| {
        invalid(
            "ref_area.flow_splits",
            "integer >= 1",
            format!("number {}", def.flow_splits),
        )
    })?;
    Ok(RefAreaSpec {
        station,
        flow_splits,
    })
}

fn loss_spec(value: Option<ValueDef>, path: &str) -> FieldResult<LossSpec> {
    match required(value, path)? {
        ValueDef::Number(v) => Ok(LossSpec::Scalar(v)),
        ValueDef::Call(CallDef { func, params }) => Ok(LossSpec::Call(LossCall {
            func,
            params: params.into_iter().map(|(k, v)| (k, loss_arg(v))).collect(),
        })),
        text @ ValueDef::Text(_) => Err(invalid(
            path,
            "number or {func, params} mapping",
            describe(&text),
        )),
    }
}

fn loss_arg(value: ValueDef) -> LossArg {
    match value {
        ValueDef::Number(v) => LossArg::Number(v),
        ValueDef::Text(text) => LossArg::Expr(text),
        ValueDef::Call(call) => LossArg::Nested { func: call.func },
    }
}

fn required<T>(value: Option<T>, field: &str) -> FieldResult<T> {
    value.ok_or_else(|| missing(field))
}

fn positive(value: f64, field: &str) -> FieldResult<f64> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(invalid(field, "positive number", format!("number {value}")))
    }
}

fn missing(field: &str) -> ErrorKind {
    ErrorKind::MissingRequiredField {
        field: field.to_string(),
    }
}

fn invalid(field: &str, expected: &'static str, found: String) -> ErrorKind {
    ErrorKind::InvalidFieldType {
        field: field.to_string(),
        expected,
        found,
    }
}

fn describe(value: &ValueDef) -> String {
    match value {
        ValueDef::Number(v) => format!("number {v}"),
        ValueDef::Text(text) => format!("string '{text}'"),
        ValueDef::Call(call) => format!("call to '{}'", call.func),
    }
}
