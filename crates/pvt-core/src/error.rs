use crate::unit::UnitKind;
use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Incompatible unit kinds: cannot convert {from} to {to}")]
    IncompatibleUnitKind { from: UnitKind, to: UnitKind },

    #[error("Unknown unit '{symbol}'")]
    UnknownUnit { symbol: String },

    #[error("Ambiguous unit '{symbol}': {reason}")]
    AmbiguousUnit { symbol: String, reason: &'static str },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },
}
