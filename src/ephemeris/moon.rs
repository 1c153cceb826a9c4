//! Apparent longitude of the Moon from the principal periodic terms of
//! ELP-2000/82.

use super::series::LunarTerms;
use super::sun::{centuries, nutation_in_longitude};
use crate::solver::normalize_360;
use crate::time_scales::Tt;

/// Fundamental arguments in degrees, `t` in Julian centuries of TT.
struct Arguments {
    /// Mean longitude of the Moon, L′.
    mean_longitude: f64,
    /// Mean elongation, D.
    elongation: f64,
    /// Mean anomaly of the Sun, M.
    sun_anomaly: f64,
    /// Mean anomaly of the Moon, M′.
    moon_anomaly: f64,
    /// Argument of latitude, F.
    latitude: f64,
}

impl Arguments {
    fn at(t: f64) -> Self {
        let t2 = t * t;
        let t3 = t2 * t;
        let t4 = t3 * t;
        Self {
            mean_longitude: 218.3164477 + 481267.88123421 * t - 0.0015786 * t2 + t3 / 538841.0
                - t4 / 65194000.0,
            elongation: 297.8501921 + 445267.1114034 * t - 0.0018819 * t2 + t3 / 545868.0
                - t4 / 113065000.0,
            sun_anomaly: 357.5291092 + 35999.0502909 * t - 0.0001536 * t2 + t3 / 24490000.0,
            moon_anomaly: 134.9633964 + 477198.8675055 * t + 0.0087414 * t2 + t3 / 69699.0
                - t4 / 14712000.0,
            latitude: 93.2720950 + 483202.0175233 * t - 0.0036539 * t2 - t3 / 3526000.0
                + t4 / 863310000.0,
        }
    }
}

/// Apparent geocentric longitude of the Moon in degrees, `[0, 360)`.
pub fn apparent_longitude(terms: &LunarTerms, tt: Tt) -> f64 {
    let t = centuries(tt);
    let args = Arguments::at(t);
    // decreasing eccentricity of the Earth's orbit
    let e = 1.0 - 0.002516 * t - 0.0000074 * t * t;

    let periodic: f64 = terms
        .0
        .iter()
        .map(|term| {
            let [d, m, mp, f] = term.multipliers.map(f64::from);
            let arg = d * args.elongation
                + m * args.sun_anomaly
                + mp * args.moon_anomaly
                + f * args.latitude;
            term.amplitude * e.powi(term.multipliers[1].unsigned_abs() as i32) * arg.to_radians().sin()
        })
        .sum();

    // Venus, Jupiter and the flattening of the Earth
    let a1 = (119.75 + 131.849 * t).to_radians();
    let a2 = (53.09 + 479264.290 * t).to_radians();
    let additive = 3958.0 * a1.sin()
        + 1962.0 * (args.mean_longitude - args.latitude).to_radians().sin()
        + 318.0 * a2.sin();

    normalize_360(args.mean_longitude + (periodic + additive) * 1e-6 + nutation_in_longitude(t))
}
