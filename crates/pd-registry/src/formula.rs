//! Callable abstraction stored in a registry.

use std::fmt;

/// A formula refused its inputs.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("{param}: {reason}")]
pub struct FormulaError {
    pub param: String,
    pub reason: String,
}

impl FormulaError {
    pub fn domain(param: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            param: param.into(),
            reason: reason.into(),
        }
    }
}

/// A pure numeric function of named scalar arguments.
///
/// Implementations declare their argument names; the registry binds a
/// parameter mapping onto that order before calling [`NamedFunction::invoke`].
pub trait NamedFunction: Send + Sync {
    /// Argument names, in the positional order `invoke` expects.
    fn parameters(&self) -> &[&'static str];

    /// Evaluate with positional arguments, one per entry of `parameters()`.
    fn invoke(&self, args: &[f64]) -> Result<f64, FormulaError>;
}

/// Closure-backed [`NamedFunction`].
pub struct Formula<F> {
    parameters: &'static [&'static str],
    eval: F,
}

impl<F> Formula<F>
where
    F: Fn(&[f64]) -> Result<f64, FormulaError> + Send + Sync,
{
    pub const fn new(parameters: &'static [&'static str], eval: F) -> Self {
        Self { parameters, eval }
    }
}

impl<F> NamedFunction for Formula<F>
where
    F: Fn(&[f64]) -> Result<f64, FormulaError> + Send + Sync,
{
    fn parameters(&self) -> &[&'static str] {
        self.parameters
    }

    /// Rejects an argument slice whose length differs from `parameters()`,
    /// so `eval` may index every declared position.
    fn invoke(&self, args: &[f64]) -> Result<f64, FormulaError> {
        if args.len() != self.parameters.len() {
            return Err(FormulaError::domain(
                "arguments",
                format!("expected {}, got {}", self.parameters.len(), args.len()),
            ));
        }
        (self.eval)(args)
    }
}

impl<F> fmt::Debug for Formula<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Formula")
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_argument_slice_is_an_error() {
        let f = Formula::new(&["a", "b"], |a: &[f64]| Ok(a[0] + a[1]));
        assert_eq!(f.invoke(&[1.0, 2.0]), Ok(3.0));

        let err = f.invoke(&[1.0]).unwrap_err();
        assert_eq!(err.param, "arguments");
        assert_eq!(err.to_string(), "arguments: expected 2, got 1");
    }
}
