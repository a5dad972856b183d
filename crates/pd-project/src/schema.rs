//! Network document definitions.
//!
//! The `network` array is kept as raw values so that each entry can be
//! decoded into a [`ComponentDef`] on its own; a decode failure is then
//! reported against that entry's position and name. Fields whose absence is
//! a schema error are optional here and required by [`crate::validate`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// ```yaml
/// name: demo
/// network:
///   - name: supply
///     type: inlet
///     flow: { mass_flow_rate: 4000, density: 8000, pressure: 100000 }
///   - name: orifice
///     type: junction
///     geom:
///       outlet_area: { func: area_circle, params: { D: 1.0 } }
///     ref_area: { station: outlet_area }
///     loss: { form: 14.7 }
///   - name: exit
///     type: outlet
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkDocument {
    pub name: String,
    #[serde(default)]
    pub network: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComponentDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(flatten)]
    pub kind: ComponentKindDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ComponentKindDef {
    Inlet {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        flow: Option<InletFlowDef>,
    },
    Outlet {
        #[serde(default)]
        flow: OutletFlowDef,
    },
    Junction(ElementDef),
    Pipe(ElementDef),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InletFlowDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass_flow_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OutletFlowDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass_flow_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

/// Body shared by junctions and pipes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ElementDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geom: Option<BTreeMap<String, ValueDef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_area: Option<RefAreaDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loss: Option<LossDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RefAreaDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station: Option<String>,
    #[serde(default = "default_flow_splits")]
    pub flow_splits: u32,
}

fn default_flow_splits() -> u32 {
    1
}

/// `loss.form` for junctions, `loss.friction` for pipes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LossDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form: Option<ValueDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friction: Option<ValueDef>,
}

/// A geometry entry, loss role or call parameter as written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ValueDef {
    Number(f64),
    Text(String),
    Call(CallDef),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CallDef {
    pub func: String,
    #[serde(default)]
    pub params: BTreeMap<String, ValueDef>,
}
