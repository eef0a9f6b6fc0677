//! Correlation registry and evaluation errors.

use pvt_core::{CoreError, UnitKind};
use thiserror::Error;

/// Result type for registry and evaluation operations.
pub type CorrelationResult<T> = Result<T, CorrelationError>;

/// Errors raised while loading the catalog or evaluating a correlation.
///
/// Load-time variants abort the load; evaluation-time variants only fail the
/// call that raised them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CorrelationError {
    #[error("Correlation '{name}' is already registered")]
    DuplicateCorrelationName { name: String },

    #[error("Unknown correlation '{name}'")]
    UnknownCorrelation { name: String },

    #[error("Correlation '{correlation}' has no parameter or synonym named '{name}'")]
    UnknownParameter { correlation: String, name: String },

    #[error("Missing parameter '{name}' for correlation '{correlation}'")]
    MissingParameter { correlation: String, name: String },

    #[error("'{synonym}' and '{target}' were both supplied to '{correlation}'")]
    ConflictingSynonym {
        correlation: String,
        synonym: String,
        target: String,
    },

    #[error("Incompatible unit kinds for '{parameter}': cannot convert {from} to {to}")]
    IncompatibleUnitKind {
        parameter: String,
        from: UnitKind,
        to: UnitKind,
    },

    #[error("Precondition {relation} violated for '{correlation}' ({left} vs {right})")]
    PreconditionViolated {
        correlation: String,
        relation: String,
        left: f64,
        right: f64,
    },

    #[error("No equation variant of '{correlation}' applies to the given inputs")]
    NoApplicableVariant { correlation: String },

    #[error("Convergence failed for {what} after {iterations} iterations")]
    ConvergenceFailure { what: String, iterations: usize },

    #[error("Non-finite value supplied for '{parameter}'")]
    NonFiniteInput { parameter: String },

    #[error("'{correlation}' ({variant}) produced a non-finite result")]
    NonFiniteResult { correlation: String, variant: String },

    #[error("'{equation}' is outside its domain: {reason}")]
    OutsideDomain { equation: String, reason: String },

    #[error("Invalid sweep: {reason}")]
    InvalidSweep { reason: String },

    #[error("Catalog '{source_name}' could not be parsed: {message}")]
    CatalogParse {
        source_name: String,
        message: String,
    },

    #[error("Invalid definition of '{correlation}': {reason}")]
    InvalidDefinition { correlation: String, reason: String },

    #[error("Unresolved reference '{reference}' in '{correlation}'")]
    UnresolvedReference {
        correlation: String,
        reference: String,
    },

    #[error("Unknown equation '{equation}' in '{correlation}'")]
    UnknownEquation {
        correlation: String,
        equation: String,
    },

    #[error("Unit error: {0}")]
    Unit(#[from] CoreError),
}

impl CorrelationError {
    /// Attach the parameter name to a unit conversion failure.
    pub(crate) fn from_unit(parameter: &str, err: CoreError) -> Self {
        match err {
            CoreError::IncompatibleUnitKind { from, to } => Self::IncompatibleUnitKind {
                parameter: parameter.to_string(),
                from,
                to,
            },
            other => Self::Unit(other),
        }
    }

    /// True for errors raised by a single evaluation rather than by the load.
    pub fn is_evaluation_error(&self) -> bool {
        !matches!(
            self,
            Self::DuplicateCorrelationName { .. }
                | Self::CatalogParse { .. }
                | Self::InvalidDefinition { .. }
                | Self::UnresolvedReference { .. }
                | Self::UnknownEquation { .. }
        )
    }
}
