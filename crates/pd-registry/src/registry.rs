//! Name → function registries with typed, disjoint namespaces.

use crate::error::{RegistryError, RegistryResult};
use crate::formula::{Formula, FormulaError, NamedFunction};
use pd_core::numeric::ensure_finite;
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Named scalar arguments handed to a registry function.
pub type Params = BTreeMap<String, f64>;

/// Marker for a registry namespace.
pub trait Namespace: 'static {
    const NAME: &'static str;
}

/// Geometry formulas (areas, diameters, lengths).
#[derive(Debug)]
pub enum Geometry {}

/// Loss correlations (form-loss and friction coefficients).
#[derive(Debug)]
pub enum Loss {}

impl Namespace for Geometry {
    const NAME: &'static str = "geometry";
}

impl Namespace for Loss {
    const NAME: &'static str = "loss";
}

pub type GeomRegistry = FunctionRegistry<Geometry>;
pub type LossRegistry = FunctionRegistry<Loss>;

/// Registry of named functions for one namespace.
///
/// The namespace is part of the type, so a `GeomRegistry` can never be passed
/// where a `LossRegistry` is expected.
pub struct FunctionRegistry<N: Namespace> {
    entries: BTreeMap<String, Arc<dyn NamedFunction>>,
    _namespace: PhantomData<fn() -> N>,
}

impl<N: Namespace> Default for FunctionRegistry<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Namespace> Clone for FunctionRegistry<N> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            _namespace: PhantomData,
        }
    }
}

impl<N: Namespace> fmt::Debug for FunctionRegistry<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("namespace", &N::NAME)
            .field("functions", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<N: Namespace> FunctionRegistry<N> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            _namespace: PhantomData,
        }
    }

    pub fn namespace(&self) -> &'static str {
        N::NAME
    }

    /// Register a function under a new name. Fails if the name is taken.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        function: impl NamedFunction + 'static,
    ) -> RegistryResult<()> {
        let name = name.into();
        if self.entries.contains_key(&name) {
            return Err(RegistryError::DuplicateFunction {
                namespace: N::NAME,
                name,
            });
        }
        self.entries.insert(name, Arc::new(function));
        Ok(())
    }

    /// Register a closure taking positional arguments in `parameters` order.
    pub fn register_fn<F>(
        &mut self,
        name: impl Into<String>,
        parameters: &'static [&'static str],
        eval: F,
    ) -> RegistryResult<()>
    where
        F: Fn(&[f64]) -> Result<f64, FormulaError> + Send + Sync + 'static,
    {
        self.register(name, Formula::new(parameters, eval))
    }

    /// Insert or replace a function; returns the previous entry.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        function: impl NamedFunction + 'static,
    ) -> Option<Arc<dyn NamedFunction>> {
        self.entries.insert(name.into(), Arc::new(function))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn NamedFunction>> {
        self.entries.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up `name`, bind `params` onto its arguments and evaluate it.
    pub fn resolve(&self, name: &str, params: &Params) -> RegistryResult<f64> {
        let function = self
            .entries
            .get(name)
            .ok_or_else(|| RegistryError::UnknownFunction {
                namespace: N::NAME,
                name: name.to_string(),
            })?;

        let args = bind(name, function.parameters(), params)?;

        let value = function
            .invoke(&args)
            .map_err(|e| RegistryError::Domain {
                function: name.to_string(),
                param: e.param,
                reason: e.reason,
            })?;

        ensure_finite(value, "function result").map_err(|_| RegistryError::NonFiniteResult {
            function: name.to_string(),
            value,
        })
    }
}

/// Map named params onto declared positional arguments.
fn bind(function: &str, declared: &[&'static str], params: &Params) -> RegistryResult<Vec<f64>> {
    let mut args = Vec::with_capacity(declared.len());
    for &param in declared {
        let value = *params
            .get(param)
            .ok_or_else(|| RegistryError::MissingArgument {
                function: function.to_string(),
                param: param.to_string(),
            })?;
        if !value.is_finite() {
            return Err(RegistryError::NonFiniteArgument {
                function: function.to_string(),
                param: param.to_string(),
                value,
            });
        }
        args.push(value);
    }

    if let Some(extra) = params.keys().find(|k| !declared.contains(&k.as_str())) {
        return Err(RegistryError::UnexpectedArgument {
            function: function.to_string(),
            param: extra.clone(),
        });
    }

    Ok(args)
}
