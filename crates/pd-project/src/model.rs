//! Typed component model.
//!
//! One variant per component type, each carrying only the fields that type
//! requires. Instances built through [`crate::build_network`] have already
//! passed schema validation.

use std::collections::BTreeMap;
use std::fmt;
use std::num::NonZeroU32;

/// Ordered chain of components; order is flow direction.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkSpec {
    pub name: String,
    pub components: Vec<ComponentSpec>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComponentSpec {
    pub name: String,
    pub desc: Option<String>,
    pub kind: ComponentKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComponentKind {
    Inlet(InletFlow),
    Outlet(OutletFlow),
    /// Local form loss; the loss resolves to K.
    Junction(JunctionSpec),
    /// Distributed friction; the loss resolves to the Darcy factor f.
    Pipe(PipeSpec),
}

impl ComponentKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            ComponentKind::Inlet(_) => "inlet",
            ComponentKind::Outlet(_) => "outlet",
            ComponentKind::Junction(_) => "junction",
            ComponentKind::Pipe(_) => "pipe",
        }
    }
}

/// Boundary state imposed by the inlet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InletFlow {
    /// kg/s, > 0
    pub mass_flow_rate: f64,
    /// kg/m³, > 0
    pub density: f64,
    /// Pa
    pub pressure: f64,
    /// K
    pub temperature: Option<f64>,
}

/// Values the outlet expects; only compared, never imposed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OutletFlow {
    pub mass_flow_rate: Option<f64>,
    pub density: Option<f64>,
    pub pressure: Option<f64>,
    pub temperature: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JunctionSpec {
    pub geom: GeomTree,
    pub ref_area: RefAreaSpec,
    pub loss: LossSpec,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipeSpec {
    /// Holds at least `inlet_area`, `outlet_area`, `hydraulic_diameter`, `length`.
    pub geom: GeomTree,
    pub ref_area: RefAreaSpec,
    pub loss: LossSpec,
    pub flow_direction: FlowDirection,
}

/// Geometry keys every pipe must define.
pub const PIPE_GEOM_KEYS: [&str; 4] = ["inlet_area", "outlet_area", "hydraulic_diameter", "length"];

/// Reserved pipe geometry key holding a [`FlowDirection`] string.
pub const FLOW_DIRECTION_KEY: &str = "flow_direction";

/// Vertical orientation of a pipe, used by the hydrostatic term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowDirection {
    Up,
    Down,
    #[default]
    Side,
}

impl FlowDirection {
    /// Case-insensitive `up`, `down` or `side`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Some(FlowDirection::Up),
            "down" => Some(FlowDirection::Down),
            "side" => Some(FlowDirection::Side),
            _ => None,
        }
    }

    /// +1 climbing, -1 descending, 0 horizontal.
    pub fn sign(self) -> f64 {
        match self {
            FlowDirection::Up => 1.0,
            FlowDirection::Down => -1.0,
            FlowDirection::Side => 0.0,
        }
    }
}

impl fmt::Display for FlowDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FlowDirection::Up => "up",
            FlowDirection::Down => "down",
            FlowDirection::Side => "side",
        })
    }
}

/// Geometry key → declared value. Keys resolve independently of each other.
pub type GeomTree = BTreeMap<String, GeomValue>;

#[derive(Debug, Clone, PartialEq)]
pub enum GeomValue {
    Scalar(f64),
    Call(GeomCall),
}

impl GeomValue {
    pub fn call<K: Into<String>>(
        func: impl Into<String>,
        params: impl IntoIterator<Item = (K, f64)>,
    ) -> Self {
        GeomValue::Call(GeomCall {
            func: func.into(),
            params: params.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        })
    }
}

/// Geometry registry call; params are plain numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct GeomCall {
    pub func: String,
    pub params: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RefAreaSpec {
    /// Geometry key whose resolved value is the reference area.
    pub station: String,
    /// Identical parallel branches sharing the mass flow.
    pub flow_splits: NonZeroU32,
}

impl RefAreaSpec {
    pub fn new(station: impl Into<String>) -> Self {
        Self {
            station: station.into(),
            flow_splits: NonZeroU32::MIN,
        }
    }

    pub fn with_splits(mut self, flow_splits: NonZeroU32) -> Self {
        self.flow_splits = flow_splits;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LossSpec {
    Scalar(f64),
    Call(LossCall),
}

impl LossSpec {
    pub fn call<K: Into<String>>(
        func: impl Into<String>,
        params: impl IntoIterator<Item = (K, LossArg)>,
    ) -> Self {
        LossSpec::Call(LossCall {
            func: func.into(),
            params: params.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        })
    }
}

/// Loss registry call whose params may reference resolved geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct LossCall {
    pub func: String,
    pub params: BTreeMap<String, LossArg>,
}

/// A loss parameter as written in the document.
#[derive(Debug, Clone, PartialEq)]
pub enum LossArg {
    Number(f64),
    /// Text to be parsed: a `${geom.<key>}` reference or a numeric literal.
    Expr(String),
    /// A `{func: ...}` descriptor; never valid, kept so resolution can reject it.
    Nested { func: String },
}

impl LossArg {
    pub fn geom_ref(key: &str) -> Self {
        LossArg::Expr(format!("${{geom.{key}}}"))
    }
}

impl ComponentSpec {
    fn with_kind(name: impl Into<String>, kind: ComponentKind) -> Self {
        Self {
            name: name.into(),
            desc: None,
            kind,
        }
    }

    pub fn inlet(name: impl Into<String>, flow: InletFlow) -> Self {
        Self::with_kind(name, ComponentKind::Inlet(flow))
    }

    pub fn outlet(name: impl Into<String>, flow: OutletFlow) -> Self {
        Self::with_kind(name, ComponentKind::Outlet(flow))
    }

    pub fn junction(name: impl Into<String>, spec: JunctionSpec) -> Self {
        Self::with_kind(name, ComponentKind::Junction(spec))
    }

    pub fn pipe(name: impl Into<String>, spec: PipeSpec) -> Self {
        Self::with_kind(name, ComponentKind::Pipe(spec))
    }

    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = Some(desc.into());
        self
    }
}
