//! 節氣推算
//!
//! 節氣時刻即太陽視黃經到達 15° 整數倍之時，以牛頓法求解
//! `normalize_180(λ☉(t) − 目標黃經) = 0`。

use tracing::debug;

use super::fmt;
use super::{SolarTerm, UTC_OFFSET_HOURS};
use crate::date::{CivilDateTime, Date};
use crate::ephemeris::Ephemeris;
use crate::error::{EphemerisError, Error};
use crate::solver::{Newton, normalize_180, normalize_360};

/// 一歲內自冬至至次一冬至的節氣數，含首尾兩冬至。
pub const COUNT: usize = 25;

/// 求太陽視黃經到達 `longitude` 的時刻（JD，UT），自 `guess` 開始迭代。
pub fn crossing<E: Ephemeris>(
    ephemeris: &E,
    solver: &Newton,
    guess: f64,
    longitude: f64,
) -> Result<f64, Error> {
    let target = normalize_360(longitude);
    solver.solve(guess, |jd| {
        ephemeris
            .solar_longitude(jd)
            .map(|lon| normalize_180(lon - target))
    })
}

/// 求公元 `year` 年冬至起的 25 個節氣時刻（JD，UT）。
///
/// 第 0 項為 `year` 年冬至，第 `i` 項黃經為 `270° + 15°·i`，第 24 項為次年冬至。
/// 偶數項為中氣，奇數項為節。
pub fn locate<E: Ephemeris>(ephemeris: &E, solver: &Newton, year: i32) -> Result<[f64; COUNT], Error> {
    let seed = Date::from_gregorian(year, 12, 20)
        .ok_or_else(|| EphemerisError::new(format!("no solar terms for year {year}")))?
        .midnight_jd(0);

    let mut jds = [0.0; COUNT];
    jds[0] = crossing(ephemeris, solver, seed, 270.0)?;
    debug!(year, winter_solstice = jds[0], "winter solstice located");
    for i in 1..COUNT {
        jds[i] = crossing(ephemeris, solver, jds[i - 1] + 15.0, 270.0 + 15.0 * i as f64)?;
    }
    Ok(jds)
}

/// 取出十三個中氣（兩冬至及其間十一中氣）。
pub fn major_terms(jds: &[f64; COUNT]) -> [f64; 13] {
    std::array::from_fn(|i| jds[2 * i])
}

/// 取得公元 `year` 年自小寒至冬至的 24 個節氣，時刻為北京時間。
///
/// # 用例
///
/// ```
/// use nongli::config::Config;
/// use nongli::chinese::solar_terms_of_year;
/// use nongli::ephemeris::SeriesEphemeris;
///
/// let config = Config::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"));
/// let eph = SeriesEphemeris::open(&config).unwrap();
/// let terms = solar_terms_of_year(&eph, 2020).unwrap();
///
/// assert_eq!("芒种", terms[10].name);
/// let t = terms[10].instant;
/// assert_eq!((2020, 6, 5, 12), (t.year, t.month, t.day, t.hour));
/// assert_eq!("冬至", terms[23].name);
/// ```
pub fn solar_terms_of_year<E: Ephemeris>(ephemeris: &E, year: i32) -> Result<Vec<SolarTerm>, Error> {
    let jds = locate(ephemeris, &Newton::default(), year - 1)?;
    Ok((1..COUNT)
        .map(|i| SolarTerm {
            // 自冬至起第 i 項，自大雪起為第 i + 1 項
            name: fmt::solar_term(i as u32 + 1),
            instant: CivilDateTime::from_julian_day(jds[i], UTC_OFFSET_HOURS),
        })
        .collect())
}
