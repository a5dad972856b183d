//! Turns declared geometry and loss specifications into numbers.
//!
//! Resolution is pure: the same tree and registries always produce the same
//! values, and nothing is cached between calls.

use crate::placeholder::{self, ArgTerm};
use pd_core::ErrorKind;
use pd_project::{GeomTree, GeomValue, LossArg, LossSpec, RefAreaSpec};
use pd_registry::{GeomRegistry, LossRegistry, Params};
use serde::Serialize;
use std::collections::BTreeMap;

/// Geometry of one component with every key reduced to a number.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct ResolvedGeom {
    values: BTreeMap<String, f64>,
}

impl ResolvedGeom {
    pub fn get(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(String, f64)> for ResolvedGeom {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Resolve each geometry key independently: scalars pass through, calls go
/// through the geometry registry.
pub fn resolve_geom(tree: &GeomTree, registry: &GeomRegistry) -> Result<ResolvedGeom, ErrorKind> {
    let mut values = BTreeMap::new();

    for (key, value) in tree {
        if !placeholder::is_addressable_key(key) {
            return Err(ErrorKind::UnknownGeomKey { key: key.clone() });
        }

        let resolved = match value {
            GeomValue::Scalar(v) if v.is_finite() => *v,
            GeomValue::Scalar(v) => {
                return Err(ErrorKind::InvalidFieldType {
                    field: format!("geom.{key}"),
                    expected: "finite number",
                    found: format!("number {v}"),
                });
            }
            GeomValue::Call(call) => registry.resolve(&call.func, &call.params)?,
        };
        values.insert(key.clone(), resolved);
    }

    Ok(ResolvedGeom { values })
}

/// Reference area named by `ref_area.station`, with the branch count.
pub fn resolve_ref_area(spec: &RefAreaSpec, geom: &ResolvedGeom) -> Result<(f64, u32), ErrorKind> {
    let area = geom
        .get(&spec.station)
        .ok_or_else(|| ErrorKind::UnresolvedStation {
            station: spec.station.clone(),
        })?;
    Ok((area, spec.flow_splits.get()))
}

/// Resolve a loss coefficient, substituting `${geom.<key>}` parameters from
/// the resolved geometry before dispatching to the loss registry.
///
/// Nested calls inside the parameters are rejected before the registry is
/// consulted.
pub fn resolve_loss(
    spec: &LossSpec,
    geom: &ResolvedGeom,
    registry: &LossRegistry,
) -> Result<f64, ErrorKind> {
    let call = match spec {
        LossSpec::Scalar(v) => return Ok(*v),
        LossSpec::Call(call) => call,
    };

    let mut params = Params::new();
    for (param, arg) in &call.params {
        let value = match arg {
            LossArg::Number(v) => *v,
            LossArg::Expr(text) => match placeholder::parse(text) {
                Ok(ArgTerm::Literal(v)) => v,
                Ok(ArgTerm::GeomRef(key)) => {
                    geom.get(&key)
                        .ok_or_else(|| ErrorKind::UnresolvedPlaceholder {
                            placeholder: text.clone(),
                            key,
                        })?
                }
                Err(e) => {
                    return Err(ErrorKind::InvalidParam {
                        function: call.func.clone(),
                        param: param.clone(),
                        reason: e.to_string(),
                    });
                }
            },
            LossArg::Nested { func } => {
                return Err(ErrorKind::NestedCallableNotAllowed {
                    param: param.clone(),
                    func: func.clone(),
                });
            }
        };
        params.insert(param.clone(), value);
    }

    Ok(registry.resolve(&call.func, &params)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pd_registry::{FormulaError, builtin};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn tree(entries: Vec<(&str, GeomValue)>) -> GeomTree {
        entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }

    #[test]
    fn geometry_scalars_and_calls() {
        let geom = resolve_geom(
            &tree(vec![
                ("outlet_area", GeomValue::call("area_circle", [("D", 1.0)])),
                ("bevel_length", GeomValue::Scalar(0.1)),
            ]),
            &builtin::geometry_registry(),
        )
        .unwrap();

        assert_eq!(geom.len(), 2);
        assert_eq!(geom.get("bevel_length"), Some(0.1));
        assert!((geom.get("outlet_area").unwrap() - std::f64::consts::FRAC_PI_4).abs() < 1e-15);
    }

    #[test]
    fn geometry_errors() {
        let reg = builtin::geometry_registry();

        let err = resolve_geom(&tree(vec![("", GeomValue::Scalar(1.0))]), &reg).unwrap_err();
        assert_eq!(err, ErrorKind::UnknownGeomKey { key: String::new() });
        let err = resolve_geom(&tree(vec![("a}", GeomValue::Scalar(1.0))]), &reg).unwrap_err();
        assert_eq!(err, ErrorKind::UnknownGeomKey { key: "a}".into() });

        let err = resolve_geom(
            &tree(vec![("a", GeomValue::call("area_square", [("L", 1.0)]))]),
            &reg,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ErrorKind::UnknownFunction {
                registry: "geometry",
                name: "area_square".into()
            }
        );

        let err = resolve_geom(
            &tree(vec![("a", GeomValue::call("area_circle", [("diameter", 1.0)]))]),
            &reg,
        )
        .unwrap_err();
        assert!(matches!(err, ErrorKind::InvalidParam { ref param, .. } if param == "D"));
    }

    #[test]
    fn hyphenated_keys_resolve_and_can_be_referenced() {
        let geom = resolve_geom(
            &tree(vec![
                ("throat", GeomValue::Scalar(0.5)),
                ("bevel-length", GeomValue::Scalar(0.01)),
            ]),
            &builtin::geometry_registry(),
        )
        .unwrap();
        assert_eq!(geom.get("bevel-length"), Some(0.01));

        let mut loss = LossRegistry::new();
        loss.register_fn("identity", &["x"], |a| Ok::<_, FormulaError>(a[0]))
            .unwrap();
        let spec = LossSpec::call("identity", [("x", LossArg::geom_ref("bevel-length"))]);
        assert_eq!(resolve_loss(&spec, &geom, &loss).unwrap(), 0.01);

        let spec = LossSpec::call("identity", [("x", LossArg::geom_ref("bevel length"))]);
        assert_eq!(
            resolve_loss(&spec, &geom, &loss).unwrap_err(),
            ErrorKind::UnresolvedPlaceholder {
                placeholder: "${geom.bevel length}".into(),
                key: "bevel length".into()
            }
        );
    }

    #[test]
    fn station_lookup() {
        let geom: ResolvedGeom = [("inlet_area".to_string(), 2.0)].into_iter().collect();
        let err = resolve_ref_area(&RefAreaSpec::new("outlet_area"), &geom).unwrap_err();
        assert_eq!(
            err,
            ErrorKind::UnresolvedStation {
                station: "outlet_area".into()
            }
        );
        assert_eq!(
            resolve_ref_area(&RefAreaSpec::new("inlet_area"), &geom).unwrap(),
            (2.0, 1)
        );
    }

    #[test]
    fn placeholder_substitution_matches_direct_call() {
        let loss = builtin::loss_registry();
        let geom: ResolvedGeom = [
            ("inlet_area".to_string(), 1.0),
            ("outlet_area".to_string(), 4.0),
        ]
        .into_iter()
        .collect();

        let spec = LossSpec::call(
            "sudden_expansion",
            [
                ("inlet_area", LossArg::geom_ref("inlet_area")),
                ("outlet_area", LossArg::geom_ref("outlet_area")),
            ],
        );
        let via_placeholder = resolve_loss(&spec, &geom, &loss).unwrap();

        let direct = loss
            .resolve(
                "sudden_expansion",
                &Params::from([("inlet_area".to_string(), 1.0), ("outlet_area".to_string(), 4.0)]),
            )
            .unwrap();
        assert_eq!(via_placeholder, direct);
    }

    #[test]
    fn missing_placeholder_key() {
        let spec = LossSpec::call("sudden_expansion", [("inlet_area", LossArg::geom_ref("a_in"))]);
        let err =
            resolve_loss(&spec, &ResolvedGeom::default(), &builtin::loss_registry()).unwrap_err();
        assert_eq!(
            err,
            ErrorKind::UnresolvedPlaceholder {
                placeholder: "${geom.a_in}".into(),
                key: "a_in".into()
            }
        );
    }

    #[test]
    fn malformed_text_is_invalid_param() {
        let spec = LossSpec::call("free_discharge", [("x", LossArg::Expr("inlet_area".into()))]);
        let err =
            resolve_loss(&spec, &ResolvedGeom::default(), &builtin::loss_registry()).unwrap_err();
        assert!(matches!(err, ErrorKind::InvalidParam { ref param, .. } if param == "x"));
    }

    #[test]
    fn nested_callable_never_reaches_registry() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut loss = LossRegistry::new();
        let counter = calls.clone();
        loss.register_fn("identity", &["x"], move |a| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<_, FormulaError>(a[0])
        })
        .unwrap();

        let spec = LossSpec::call(
            "identity",
            [(
                "x",
                LossArg::Nested {
                    func: "area_circle".into(),
                },
            )],
        );
        let err = resolve_loss(&spec, &ResolvedGeom::default(), &loss).unwrap_err();
        assert_eq!(
            err,
            ErrorKind::NestedCallableNotAllowed {
                param: "x".into(),
                func: "area_circle".into()
            }
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn scalar_loss_passes_through() {
        let v = resolve_loss(
            &LossSpec::Scalar(14.7),
            &ResolvedGeom::default(),
            &LossRegistry::new(),
        )
        .unwrap();
        assert_eq!(v, 14.7);
    }
}
