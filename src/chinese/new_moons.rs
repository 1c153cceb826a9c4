//! 定朔
//!
//! 朔即日月黃經相同之時，求解 `normalize_180(λ☾(t) − λ☉(t)) = 0`。

use tracing::trace;

use crate::ephemeris::Ephemeris;
use crate::error::Error;
use crate::solver::{Newton, normalize_180};

/// 朔望月平均長度（日）。
pub const SYNODIC_MONTH: f64 = 29.53;

/// 自冬至所在月起所取的朔數。
pub const COUNT: usize = 15;

/// 求 `guess` 附近的朔（JD，UT）。
///
/// 迭代收斂至離 `guess` 最近的朔，可能在 `guess` 之前，也可能在其後。
pub fn nearest<E: Ephemeris>(ephemeris: &E, solver: &Newton, guess: f64) -> Result<f64, Error> {
    solver.solve(guess, |jd| ephemeris.elongation(jd).map(normalize_180))
}

/// 求冬至 `winter_solstice` 所在月之朔起的連續 15 個朔（JD，UT）。
///
/// 首項不晚於冬至：若自冬至迭代得到的朔在冬至之後，則冬至屬前一月，改自前一月起算。
pub fn locate<E: Ephemeris>(
    ephemeris: &E,
    solver: &Newton,
    winter_solstice: f64,
) -> Result<[f64; COUNT], Error> {
    let mut first = nearest(ephemeris, solver, winter_solstice)?;
    if first > winter_solstice {
        trace!(first, winter_solstice, "new moon after solstice, stepping back");
        first = nearest(ephemeris, solver, winter_solstice - SYNODIC_MONTH)?;
    }

    let mut jds = [0.0; COUNT];
    jds[0] = first;
    for i in 1..COUNT {
        jds[i] = nearest(ephemeris, solver, jds[i - 1] + SYNODIC_MONTH)?;
    }
    Ok(jds)
}
