//! Embedded catalog documents, one per property family.

/// `(source name, YAML text)` pairs in load order.
pub const BUILTIN: &[(&str, &str)] = &[
    ("bubble_point.yaml", include_str!("../catalog/bubble_point.yaml")),
    ("oil_volume_factor.yaml", include_str!("../catalog/oil_volume_factor.yaml")),
    ("oil_viscosity.yaml", include_str!("../catalog/oil_viscosity.yaml")),
    ("oil_compressibility.yaml", include_str!("../catalog/oil_compressibility.yaml")),
    ("gas_compressibility.yaml", include_str!("../catalog/gas_compressibility.yaml")),
    ("gas.yaml", include_str!("../catalog/gas.yaml")),
    ("wet_gas.yaml", include_str!("../catalog/wet_gas.yaml")),
    ("water.yaml", include_str!("../catalog/water.yaml")),
    ("interfacial_tension.yaml", include_str!("../catalog/interfacial_tension.yaml")),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::CorrelationRecord;

    #[test]
    fn every_document_parses() {
        for (source, text) in BUILTIN {
            let records: Vec<CorrelationRecord> = serde_yaml::from_str(text)
                .unwrap_or_else(|e| panic!("{source}: {e}"));
            assert!(!records.is_empty(), "{source} is empty");
        }
    }
}
