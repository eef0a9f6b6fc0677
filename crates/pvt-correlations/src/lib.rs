//! pvt-correlations: catalog, registry and evaluator for empirical
//! black-oil and gas PVT correlations.
//!
//! Correlations are declared as data (YAML catalog records naming a numeric
//! kernel) and resolved once into an immutable [`Registry`]. Evaluating a
//! correlation checks inputs against the declared parameter schema,
//! normalizes units, selects an equation variant and reports out-of-range
//! inputs and outputs as warnings next to the value.
//!
//! # Example
//!
//! ```no_run
//! use pvt_correlations::{InputSet, Registry};
//!
//! let registry = Registry::builtin().unwrap();
//! let inputs = InputSet::new()
//!     .with("yg", 0.75)
//!     .with("rsb", 500.0)
//!     .with("api", 35.0)
//!     .with("t", 150.0);
//! let pb = registry.evaluate("PbStanding", &inputs).unwrap();
//! println!("pb = {} ({} warnings)", pb.value, pb.warnings.len());
//! ```

pub mod catalog;
pub mod definition;
pub mod describe;
pub mod error;
pub mod evaluator;
pub mod kernels;
pub mod registry;
pub mod schema;
pub mod solver;
pub mod sweep;
pub mod validate;

pub use definition::{CorrelationDefinition, EquationVariant, Guard, ParameterSpec};
pub use describe::CorrelationSchema;
pub use error::{CorrelationError, CorrelationResult};
pub use evaluator::{
    Bound, Evaluation, InputSet, InputValue, RangeWarning, Tuning, WarningTarget, evaluate,
};
pub use registry::{Registry, RegistryBuilder};
pub use schema::{Category, CorrelationRecord, Grid, Relation};
pub use sweep::{SweepDefinition, SweepPoint, SweepResult, SweepType};

pub use pvt_core::{Quantity, UnitKind};
