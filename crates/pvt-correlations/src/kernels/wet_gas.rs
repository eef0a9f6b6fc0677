//! McCain wet gas recombination: additional gas produced, equivalent volume
//! and reservoir gas gravity.

use super::Kernel;
use crate::error::CorrelationResult;

pub(super) const KERNELS: &[Kernel] = &[
    Kernel { id: "ywgr_mccain", params: &["yg", "yo", "rsp1", "gpa", "veq"], eval: ywgr_mccain },
    Kernel { id: "gpasp_mccain", params: &["tsep", "psep", "yg", "api"], eval: gpasp_mccain },
    Kernel { id: "gpasp2_mccain", params: &["tsep", "tsep2", "psep", "yg", "api"], eval: gpasp2_mccain },
    Kernel { id: "veqsp_mccain", params: &["tsep", "psep", "yg", "api"], eval: veqsp_mccain },
    Kernel { id: "veqsp2_mccain", params: &["tsep", "tsep2", "psep", "yg", "api"], eval: veqsp2_mccain },
];

fn ywgr_mccain(a: &[f64]) -> CorrelationResult<f64> {
    args!("ywgr_mccain", a, [yg, yo, rsp1, gpa, veq]);
    Ok((rsp1 * yg + 4600.0 * yo + gpa) / (rsp1 + veq))
}

/// Two stages of separation.
fn gpasp_mccain(a: &[f64]) -> CorrelationResult<f64> {
    args!("gpasp_mccain", a, [tsep, psep, yg, api]);
    Ok(1.459_93 * (psep - 14.65).powf(1.3394) * yg.powf(7.094_34) * api.powf(1.143_56) * tsep.powf(-0.934_46))
}

/// Three stages of separation.
fn gpasp2_mccain(a: &[f64]) -> CorrelationResult<f64> {
    args!("gpasp2_mccain", a, [tsep, tsep2, psep, yg, api]);
    Ok(2.992_22
        * (psep - 14.65).powf(0.970_497)
        * yg.powf(6.804_91)
        * api.powf(1.079_16)
        * tsep.powf(-1.196_05)
        * tsep2.powf(0.553_669))
}

fn veqsp_mccain(a: &[f64]) -> CorrelationResult<f64> {
    args!("veqsp_mccain", a, [tsep, psep, yg, api]);
    Ok(635.53 + 0.361_821 * psep.powf(1.054_35) * yg.powf(5.083_05) * api.powf(1.581_24) * tsep.powf(-0.791_301))
}

fn veqsp2_mccain(a: &[f64]) -> CorrelationResult<f64> {
    args!("veqsp2_mccain", a, [tsep, tsep2, psep, yg, api]);
    Ok(535.916
        + 2.6231
            * psep.powf(0.793_183)
            * yg.powf(4.6612)
            * api.powf(1.2094)
            * tsep.powf(-0.849_115)
            * tsep2.powf(0.269_869))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recombined_gravity_is_heavier_than_separator_gas() {
        let gpa = gpasp_mccain(&[80.0, 400.0, 0.7, 55.0]).unwrap();
        let veq = veqsp_mccain(&[80.0, 400.0, 0.7, 55.0]).unwrap();
        let ywgr = ywgr_mccain(&[0.7, 0.76, 20_000.0, gpa, veq]).unwrap();
        assert!(ywgr > 0.7 && ywgr < 1.0, "ywgr = {ywgr}");
    }

    #[test]
    fn more_separator_pressure_releases_more_gas() {
        let low = gpasp2_mccain(&[80.0, 70.0, 300.0, 0.7, 55.0]).unwrap();
        let high = gpasp2_mccain(&[80.0, 70.0, 900.0, 0.7, 55.0]).unwrap();
        assert!(high > low);
        let low = veqsp2_mccain(&[80.0, 70.0, 300.0, 0.7, 55.0]).unwrap();
        let high = veqsp2_mccain(&[80.0, 70.0, 900.0, 0.7, 55.0]).unwrap();
        assert!(high > low && low > 535.916);
    }
}
