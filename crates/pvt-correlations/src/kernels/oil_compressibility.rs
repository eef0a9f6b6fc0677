//! Isothermal oil compressibility (1/psia).

use super::{Kernel, bubble_point};
use crate::error::CorrelationResult;

pub(super) const KERNELS: &[Kernel] = &[
    Kernel { id: "cob_mccain", params: &["api", "rsb", "t", "p", "pb"], eval: cob_mccain },
    Kernel {
        id: "coa_vasquez_beggs",
        params: &["yg", "api", "rsb", "t", "tsep", "psep", "p"],
        eval: coa_vasquez_beggs,
    },
    Kernel { id: "coa_petrosky_farshad", params: &["yg", "api", "rsb", "t", "p"], eval: coa_petrosky_farshad },
];

/// Below the bubble point. Temperature in Rankine.
fn cob_mccain(a: &[f64]) -> CorrelationResult<f64> {
    args!("cob_mccain", a, [api, rsb, t, p, pb]);
    Ok((-7.573 - 1.450 * p.ln() - 0.383 * pb.ln() + 1.402 * t.ln() + 0.256 * api.ln() + 0.449 * rsb.ln()).exp())
}

fn coa_vasquez_beggs(a: &[f64]) -> CorrelationResult<f64> {
    args!("coa_vasquez_beggs", a, [yg, api, rsb, t, tsep, psep, p]);
    let ygs = bubble_point::vasquez_beggs_gas_gravity(yg, api, tsep, psep);
    Ok((-1433.0 + 5.0 * rsb + 17.2 * t - 1180.0 * ygs + 12.61 * api) / (1e5 * p))
}

fn coa_petrosky_farshad(a: &[f64]) -> CorrelationResult<f64> {
    args!("coa_petrosky_farshad", a, [yg, api, rsb, t, p]);
    Ok(1.705e-7 * rsb.powf(0.693_57) * yg.powf(0.1885) * api.powf(0.3272) * t.powf(0.6729) * p.powf(-0.5906))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compressibility_falls_with_pressure() {
        let low = cob_mccain(&[35.0, 600.0, 640.0, 1000.0, 2500.0]).unwrap();
        let high = cob_mccain(&[35.0, 600.0, 640.0, 2000.0, 2500.0]).unwrap();
        assert!(high < low);

        let low = coa_vasquez_beggs(&[0.8, 35.0, 600.0, 180.0, 100.0, 114.7, 3000.0]).unwrap();
        let high = coa_vasquez_beggs(&[0.8, 35.0, 600.0, 180.0, 100.0, 114.7, 5000.0]).unwrap();
        assert!(high < low);
        assert!((low / high - 5.0 / 3.0).abs() < 1e-12);

        let low = coa_petrosky_farshad(&[0.8, 35.0, 600.0, 180.0, 3000.0]).unwrap();
        let high = coa_petrosky_farshad(&[0.8, 35.0, 600.0, 180.0, 5000.0]).unwrap();
        assert!(high < low);
    }

    #[test]
    fn magnitudes_are_typical_of_black_oil() {
        let co = coa_vasquez_beggs(&[0.8, 35.0, 600.0, 180.0, 100.0, 114.7, 3000.0]).unwrap();
        assert!(co > 1e-6 && co < 1e-4, "co = {co}");
        let co = cob_mccain(&[35.0, 600.0, 640.0, 1500.0, 2500.0]).unwrap();
        assert!(co > 1e-6 && co < 1e-3, "co = {co}");
    }
}
