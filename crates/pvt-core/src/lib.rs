//! pvt-core: stable foundation for the PVT correlation workspace.
//!
//! Contains:
//! - unit (field unit kinds, conversion families, symbol parsing)
//! - quantity (value + unit kind, lossless conversion)
//! - si (uom SI types for exporting field quantities)
//! - numeric (tolerances, finiteness and inclusive bound checks)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod quantity;
pub mod si;
pub mod unit;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use quantity::{Quantity, convert};
pub use unit::{UnitFamily, UnitKind, api_to_sg, sg_to_api};
