//! Equation kernels.
//!
//! A kernel is the numeric body of one equation variant. The catalog refers
//! to kernels by id; at load time each kernel argument is bound to a declared
//! parameter by name, so a kernel receives its arguments already converted
//! into the parameter's declared unit and in the order of `params`.

use crate::error::{CorrelationError, CorrelationResult};

/// Destructure a kernel argument slice into a fixed-size array.
macro_rules! args {
    ($id:literal, $a:expr, [$($name:ident),+ $(,)?]) => {
        let &[$($name),+] = $a else {
            return Err($crate::kernels::arity_error(
                $id,
                [$(stringify!($name)),+].len(),
                $a.len(),
            ));
        };
    };
}

mod bubble_point;
mod gas;
mod gas_compressibility;
mod interfacial_tension;
mod oil_compressibility;
mod oil_viscosity;
mod oil_volume_factor;
mod water;
mod wet_gas;

pub type KernelFn = fn(&[f64]) -> CorrelationResult<f64>;

#[derive(Debug)]
pub struct Kernel {
    pub id: &'static str,
    /// Parameter names, in argument order.
    pub params: &'static [&'static str],
    pub eval: KernelFn,
}

impl Kernel {
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

const TABLES: &[&[Kernel]] = &[
    bubble_point::KERNELS,
    oil_volume_factor::KERNELS,
    oil_viscosity::KERNELS,
    oil_compressibility::KERNELS,
    gas_compressibility::KERNELS,
    gas::KERNELS,
    wet_gas::KERNELS,
    water::KERNELS,
    interfacial_tension::KERNELS,
];

/// Find a kernel by id.
pub fn lookup(id: &str) -> Option<&'static Kernel> {
    TABLES.iter().flat_map(|t| t.iter()).find(|k| k.id == id)
}

/// All kernel ids, in table order.
pub fn ids() -> impl Iterator<Item = &'static str> {
    TABLES.iter().flat_map(|t| t.iter()).map(|k| k.id)
}

fn arity_error(id: &str, expected: usize, got: usize) -> CorrelationError {
    CorrelationError::InvalidDefinition {
        correlation: id.to_string(),
        reason: format!("kernel expects {expected} arguments, got {got}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn kernel_ids_are_unique() {
        let mut seen = HashSet::new();
        for id in ids() {
            assert!(seen.insert(id), "duplicate kernel id {id}");
        }
    }

    #[test]
    fn wrong_arity_is_an_error_not_a_panic() {
        let kernel = lookup("pb_standing").unwrap();
        let err = (kernel.eval)(&[0.75, 500.0]).unwrap_err();
        assert!(matches!(err, CorrelationError::InvalidDefinition { .. }));
    }
}
