//! Apparent longitude of the Sun from the Earth's VSOP87 series.

use super::series::Vsop;
use crate::solver::normalize_360;
use crate::time_scales::Tt;

pub(crate) const J2000: f64 = 2451545.0;
const ARCSEC: f64 = 1.0 / 3600.0;

/// Julian centuries of TT since J2000.0.
pub(crate) fn centuries(tt: Tt) -> f64 {
    (tt.0 - J2000) / 36525.0
}

/// Nutation in longitude Δψ in degrees, to about 0.5″.
pub fn nutation_in_longitude(t: f64) -> f64 {
    let omega = (125.04452 - 1934.136261 * t).to_radians();
    let l_sun = (280.4665 + 36000.7698 * t).to_radians();
    let l_moon = (218.3165 + 481267.8813 * t).to_radians();
    (-17.20 * omega.sin() - 1.32 * (2.0 * l_sun).sin() - 0.23 * (2.0 * l_moon).sin()
        + 0.21 * (2.0 * omega).sin())
        * ARCSEC
}

/// Apparent geocentric longitude of the Sun in degrees, `[0, 360)`.
pub fn apparent_longitude(earth: &Vsop, tt: Tt) -> f64 {
    let t = centuries(tt);
    let tau = t / 10.0;
    // geocentric = heliocentric Earth + 180°
    let geometric = earth.longitude_at(tau).to_degrees() + 180.0;
    let fk5 = -0.09033 * ARCSEC;
    let aberration = -20.4898 * ARCSEC / earth.radius_at(tau);
    normalize_360(geometric + fk5 + nutation_in_longitude(t) + aberration)
}
