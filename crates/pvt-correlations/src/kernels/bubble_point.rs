//! Bubble point pressure (psia).

use super::Kernel;
use crate::error::CorrelationResult;
use pvt_core::sg_to_api;

pub(super) const KERNELS: &[Kernel] = &[
    Kernel { id: "pb_al_marhoun", params: &["yg", "yo", "rsb", "t"], eval: al_marhoun },
    Kernel { id: "pb_al_shammasi", params: &["yg", "yo", "rsb", "t"], eval: al_shammasi },
    Kernel { id: "pb_de_ghetto_extra_heavy", params: &["yg", "rsb", "api", "t"], eval: de_ghetto_extra_heavy },
    Kernel { id: "pb_de_ghetto_heavy", params: &["yg", "rsb", "api", "t"], eval: de_ghetto_heavy },
    Kernel { id: "pb_dindoruk_christman", params: &["yg", "rsb", "api", "t"], eval: dindoruk_christman },
    Kernel { id: "pb_dokla_osman", params: &["yg", "rsb", "yo", "t"], eval: dokla_osman },
    Kernel { id: "pb_hanafy", params: &["rsb"], eval: hanafy },
    Kernel { id: "pb_kartoatmodjo_schmidt_heavy", params: &["yg", "rsb", "api", "t", "tsep", "psep"], eval: kartoatmodjo_schmidt_heavy },
    Kernel { id: "pb_kartoatmodjo_schmidt_light", params: &["yg", "rsb", "api", "t", "tsep", "psep"], eval: kartoatmodjo_schmidt_light },
    Kernel { id: "pb_lasater", params: &["yg", "rsb", "yo", "t"], eval: lasater },
    Kernel { id: "pb_petrosky_farshad", params: &["yg", "rsb", "api", "t"], eval: petrosky_farshad },
    Kernel { id: "pb_standing", params: &["yg", "rsb", "api", "t"], eval: standing },
    Kernel { id: "pb_total_cfp_extra_heavy", params: &["yg", "rsb", "api", "t"], eval: total_cfp_extra_heavy },
    Kernel { id: "pb_total_cfp_medium", params: &["yg", "rsb", "api", "t"], eval: total_cfp_medium },
    Kernel { id: "pb_total_cfp_light", params: &["yg", "rsb", "api", "t"], eval: total_cfp_light },
    Kernel { id: "pb_vasquez_beggs_heavy", params: &["yg", "rsb", "api", "t", "tsep", "psep"], eval: vasquez_beggs_heavy },
    Kernel { id: "pb_vasquez_beggs_light", params: &["yg", "rsb", "api", "t", "tsep", "psep"], eval: vasquez_beggs_light },
    Kernel { id: "pb_velarde", params: &["yg", "rsb", "api", "t"], eval: velarde },
    Kernel { id: "pb_cegarra_medium", params: &["yg", "rsb", "api", "t"], eval: cegarra_medium },
    Kernel { id: "pb_cegarra_light", params: &["yg", "rsb", "api", "t"], eval: cegarra_light },
    Kernel { id: "pb_perez_ml", params: &["yg", "rsb", "api", "t"], eval: perez_ml },
    Kernel { id: "pb_millan_arcia", params: &["yg", "rsb", "api", "t"], eval: millan_arcia },
    Kernel { id: "pb_manucci_rosales", params: &["yg", "rsb", "api", "t"], eval: manucci_rosales },
    Kernel {
        id: "pb_glaso",
        params: &["yg", "rsb", "api", "t", "n2_concentration", "co2_concentration", "h2s_concentration"],
        eval: glaso,
    },
];

/// Temperature in Rankine.
fn al_marhoun(a: &[f64]) -> CorrelationResult<f64> {
    args!("pb_al_marhoun", a, [yg, yo, rsb, t]);
    Ok(5.380_88e-3 * rsb.powf(0.715_082) * yg.powf(-1.877_84) * yo.powf(3.1437) * t.powf(1.326_57))
}

fn al_shammasi(a: &[f64]) -> CorrelationResult<f64> {
    args!("pb_al_shammasi", a, [yg, yo, rsb, t]);
    Ok(yo.powf(5.527_215) * (-1.841_408 * yo * yg).exp() * (rsb * (t + 460.0) * yg).powf(0.783_716))
}

/// Extra-heavy oils, API <= 10.
fn de_ghetto_extra_heavy(a: &[f64]) -> CorrelationResult<f64> {
    args!("pb_de_ghetto_extra_heavy", a, [yg, rsb, api, t]);
    Ok((rsb / yg).powf(1.0 / 1.1128) * 10.7025 / 10f64.powf(0.0169 * api - 0.00156 * t))
}

/// Heavy oils, 10 < API <= 22.3.
fn de_ghetto_heavy(a: &[f64]) -> CorrelationResult<f64> {
    args!("pb_de_ghetto_heavy", a, [yg, rsb, api, t]);
    Ok(15.7286 * (rsb / yg).powf(0.7885) * 10f64.powf(0.0020 * t) / 10f64.powf(0.0142 * api))
}

fn dindoruk_christman(a: &[f64]) -> CorrelationResult<f64> {
    args!("pb_dindoruk_christman", a, [yg, rsb, api, t]);
    const A1: f64 = 1.428_28e-10;
    const A2: f64 = 2.844_591_797;
    const A3: f64 = -6.748_96e-4;
    const A4: f64 = 1.225_226_436;
    const A5: f64 = 0.033_383_304;
    const A6: f64 = -0.272_945_957;
    const A7: f64 = -0.084_226_069;
    const A8: f64 = 1.869_979_257;
    const A9: f64 = 1.221_486_524;
    const A10: f64 = 1.370_508_349;
    const A11: f64 = 0.011_688_308;

    let den = A5 + 2.0 * rsb.powf(A6) / yg.powf(A7);
    let x = (A1 * t.powf(A2) + A3 * api.powf(A4)) / (den * den);
    Ok(A8 * (rsb.powf(A9) * 10f64.powf(x) / yg.powf(A10) + A11))
}

/// Temperature in Rankine.
fn dokla_osman(a: &[f64]) -> CorrelationResult<f64> {
    args!("pb_dokla_osman", a, [yg, rsb, yo, t]);
    Ok(0.836_386e4 * yg.powf(-1.010_49) * yo.powf(0.107_991) * t.powf(-0.952_584) * rsb.powf(0.724_047))
}

fn hanafy(a: &[f64]) -> CorrelationResult<f64> {
    args!("pb_hanafy", a, [rsb]);
    let rsft = 69.0 + 1.071 * rsb;
    let rsi = 23.94 + 1.101 * rsft;
    Ok(3.205 * rsi + 157.27)
}

/// Gas gravity corrected to a 114.7 psia separator.
pub(super) fn kartoatmodjo_gas_gravity(yg: f64, api: f64, tsep: f64, psep: f64) -> f64 {
    yg * (1.0 + 0.1595 * api.powf(0.4078) * tsep.powf(-0.2466) * (psep / 114.7).log10())
}

fn kartoatmodjo_schmidt(c: [f64; 4], a: &[f64]) -> CorrelationResult<f64> {
    args!("pb_kartoatmodjo_schmidt", a, [yg, rsb, api, t, tsep, psep]);
    let ygcorr = kartoatmodjo_gas_gravity(yg, api, tsep, psep);
    let [c1, c2, c3, c4] = c;
    Ok((rsb / (c1 * ygcorr.powf(c2) * 10f64.powf(c3 * api / (t + 460.0)))).powf(c4))
}

/// API <= 30.
fn kartoatmodjo_schmidt_heavy(a: &[f64]) -> CorrelationResult<f64> {
    kartoatmodjo_schmidt([0.05958, 0.7972, 13.1405, 0.9986], a)
}

/// API > 30.
fn kartoatmodjo_schmidt_light(a: &[f64]) -> CorrelationResult<f64> {
    kartoatmodjo_schmidt([0.0315, 0.7587, 11.289, 0.9143], a)
}

fn lasater(a: &[f64]) -> CorrelationResult<f64> {
    args!("pb_lasater", a, [yg, rsb, yo, t]);
    let api = sg_to_api(yo);
    let mo = if api <= 40.0 {
        630.0 - 10.0 * api
    } else {
        73_110.0 * api.powf(-1.562)
    };
    let moles_gas = rsb / 379.3;
    let x = moles_gas / (moles_gas + 350.0 * yo / mo);
    let factor = if x <= 0.6 {
        0.679 * (2.786 * x).exp() - 0.323
    } else {
        8.26 * x.powf(3.56) + 1.95
    };
    Ok(factor * (t + 459.6) / yg)
}

fn petrosky_farshad(a: &[f64]) -> CorrelationResult<f64> {
    args!("pb_petrosky_farshad", a, [yg, rsb, api, t]);
    let x = 4.561e-5 * t.powf(1.3911) - 7.916e-4 * api.powf(1.541);
    Ok(112.727 * (rsb.powf(0.5774) / yg.powf(0.8439) * 10f64.powf(x) - 12.34))
}

fn standing(a: &[f64]) -> CorrelationResult<f64> {
    args!("pb_standing", a, [yg, rsb, api, t]);
    Ok(18.2 * ((rsb / yg).powf(0.83) * 10f64.powf(0.00091 * t - 0.0125 * api) - 1.4))
}

fn total_cfp(c: [f64; 4], a: &[f64]) -> CorrelationResult<f64> {
    args!("pb_total_cfp", a, [yg, rsb, api, t]);
    let [c1, c2, c3, c4] = c;
    Ok(c1 * (rsb / yg).powf(c2) * 10f64.powf(c3 * t - c4 * api))
}

/// API <= 10.
fn total_cfp_extra_heavy(a: &[f64]) -> CorrelationResult<f64> {
    total_cfp([12.847, 0.9636, 0.000_993, 0.034_17], a)
}

/// 10 < API <= 35.
fn total_cfp_medium(a: &[f64]) -> CorrelationResult<f64> {
    total_cfp([25.2755, 0.7617, 0.000_835, 0.011_292], a)
}

/// API > 35.
fn total_cfp_light(a: &[f64]) -> CorrelationResult<f64> {
    total_cfp([216.4711, 0.6922, -0.000_427, 0.023_14], a)
}

/// Gas gravity corrected to a 100 psig separator.
pub(super) fn vasquez_beggs_gas_gravity(yg: f64, api: f64, tsep: f64, psep: f64) -> f64 {
    yg * (1.0 + 5.912e-5 * api * tsep * (psep / 114.7).log10())
}

fn vasquez_beggs(c: [f64; 3], a: &[f64]) -> CorrelationResult<f64> {
    args!("pb_vasquez_beggs", a, [yg, rsb, api, t, tsep, psep]);
    let ygs = vasquez_beggs_gas_gravity(yg, api, tsep, psep);
    let [c1, c2, c3] = c;
    Ok((rsb / (c1 * ygs * (c3 * api / (t + 460.0)).exp())).powf(1.0 / c2))
}

/// API <= 30.
fn vasquez_beggs_heavy(a: &[f64]) -> CorrelationResult<f64> {
    vasquez_beggs([0.0362, 1.0937, 25.724], a)
}

/// API > 30.
fn vasquez_beggs_light(a: &[f64]) -> CorrelationResult<f64> {
    vasquez_beggs([0.0178, 1.187, 23.931], a)
}

fn velarde(a: &[f64]) -> CorrelationResult<f64> {
    args!("pb_velarde", a, [yg, rsb, api, t]);
    let x = 0.013_098 * t.powf(0.282_372) - 8.2e-6 * api.powf(2.176_124);
    Ok(1091.47 * (rsb.powf(0.081_465) * yg.powf(-0.161_488) * 10f64.powf(x) - 0.740_152).powf(5.354_891))
}

fn cegarra(l: [f64; 5], a: &[f64]) -> CorrelationResult<f64> {
    args!("pb_cegarra", a, [yg, rsb, api, t]);
    let [l1, l2, l3, l4, l5] = l;
    Ok(l1 * ((rsb / yg).powf(l2) * 10f64.powf(l3 * t - l4 * api) - l5))
}

/// API < 29.9.
fn cegarra_medium(a: &[f64]) -> CorrelationResult<f64> {
    cegarra([154.158, 0.4577, 0.000_668, 0.000_514, 4.702_57], a)
}

/// API >= 29.9.
fn cegarra_light(a: &[f64]) -> CorrelationResult<f64> {
    cegarra([809.238, 0.32, 0.000_61, 0.011, 1.1142], a)
}

fn perez_ml(a: &[f64]) -> CorrelationResult<f64> {
    args!("pb_perez_ml", a, [yg, rsb, api, t]);
    Ok(10.667_657 * (rsb / yg).powf(1.001_391_01) * 10f64.powf(0.000_257_3 * t - 0.025_364_3 * api))
}

fn millan_arcia(a: &[f64]) -> CorrelationResult<f64> {
    args!("pb_millan_arcia", a, [yg, rsb, api, t]);
    Ok(25.3302 * ((rsb / yg).powf(0.8303) * 10f64.powf(0.00091 * t - 0.0125 * api)).powf(0.9433))
}

fn manucci_rosales(a: &[f64]) -> CorrelationResult<f64> {
    args!("pb_manucci_rosales", a, [yg, rsb, api, t]);
    Ok(84.88 * (rsb / yg).powf(0.53) * 10f64.powf(0.000_922 * t - 0.0072 * api))
}

/// Hydrocarbon bubble point corrected for N2, CO2 and H2S (mole fractions).
fn glaso(a: &[f64]) -> CorrelationResult<f64> {
    args!("pb_glaso", a, [yg, rsb, api, t, n2, co2, h2s]);
    let x = (rsb / yg).powf(0.816) * t.powf(0.172) / api.powf(0.989);
    let log_x = x.log10();
    let pb_hc = 10f64.powf(1.7669 + 1.7447 * log_x - 0.302_18 * log_x * log_x);

    let n2_effect = 1.0
        + ((-2.65e-4 * api + 5.5e-3) * t + 0.0931 * api - 0.8295) * n2
        + (1.954e-11 * api.powf(4.699) * t + 0.027 * api - 2.366) * n2 * n2;
    let co2_effect = 1.0 - 693.8 * co2 * t.powf(-1.553);
    let h2s_effect = 1.0 - (0.9035 + 0.0015 * api) * h2s + 0.019 * (45.0 - api) * h2s * h2s;

    Ok(pb_hc * n2_effect * co2_effect * h2s_effect)
}
