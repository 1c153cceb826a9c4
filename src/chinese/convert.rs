//! 公曆轉農曆

use tracing::{debug, debug_span};

use super::{
    LunarCalendar, LunarMonth, Month, SolarTerm, TZ_OFFSET_MINUTES, UTC_OFFSET_HOURS, fmt, months,
    new_moons, solar_terms,
};
use super::sexagenary::{Branch, Pillar};
use crate::config::Config;
use crate::date::{CivilDateTime, Date};
use crate::ephemeris::{Ephemeris, SeriesEphemeris};
use crate::error::{EphemerisError, Error};
use crate::solver::{Newton, normalize_360};

/// 日柱起點 2017-04-07 的儒略日數，該日為甲子日。
const DAY_EPOCH_JDN: i32 = 2_457_851;

/// 大雪的太陽黃經，月柱以此起算。
const DAXUE_LONGITUDE: f64 = 255.0;

/// 將北京時間轉為農曆，曆表目錄取自環境變量 `EPHE_PATH`。
///
/// 依次檢查設置、檢查日期、載入曆表，然後換算，見 [`convert`]。
pub fn lunar_calendar(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> Result<LunarCalendar, Error> {
    let input = CivilDateTime::new(year, month, day, hour, minute, second);
    convert_configured(Config::from_env(), &input)
}

fn convert_configured(
    config: Result<Config, Error>,
    input: &CivilDateTime,
) -> Result<LunarCalendar, Error> {
    let config = config?;
    input.validate()?;
    let ephemeris = SeriesEphemeris::open(&config)?;
    convert(&ephemeris, input)
}

/// 將北京時間 `input` 轉為農曆，並推算四柱與所在月的節、中氣。
///
/// `input.year` 為歷史紀年（無公元 0 年）。曆表查詢失敗或迭代不收斂時整個換算失敗，
/// 不返回部分結果。
///
/// # 用例
///
/// ```
/// use nongli::CivilDateTime;
/// use nongli::config::Config;
/// use nongli::chinese::convert;
/// use nongli::ephemeris::SeriesEphemeris;
///
/// let config = Config::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"));
/// let eph = SeriesEphemeris::open(&config).unwrap();
///
/// let cal = convert(&eph, &CivilDateTime::new(2022, 2, 3, 22, 5, 3)).unwrap();
/// assert_eq!("正月", cal.month_name);
/// assert_eq!("壬寅", cal.lunar_year.name());
/// assert_eq!("辛丑", cal.year_pillar.name());
/// ```
pub fn convert<E: Ephemeris>(ephemeris: &E, input: &CivilDateTime) -> Result<LunarCalendar, Error> {
    let span = debug_span!("convert", %input);
    let _enter = span.enter();

    let current = input.to_julian_day(UTC_OFFSET_HOURS)?;
    let solver = Newton::default();
    let year = input.astronomical_year();

    // 上年冬至至本年冬至
    let (terms, months, leap) = lunar_window(ephemeris, &solver, year - 1)?;
    let year_start = months;
    // 古代儒略曆歲首晚於冬至，年初數日可能早於上年冬至所在月
    let (months, leap) = if current < months[0].first_day_jd {
        debug!(year, "date precedes the winter solstice month, using the year before");
        let (_, earlier, leap) = lunar_window(ephemeris, &solver, year - 2)?;
        (earlier, leap)
    } else {
        (months, leap)
    };

    let index = months
        .windows(2)
        .position(|w| w[0].first_day_jd <= current && current < w[1].first_day_jd)
        .ok_or_else(|| EphemerisError::new(format!("new moons do not cover JD {current}")))?;
    let lunar_month = months[index];
    let day = (current - lunar_month.first_day_jd).floor() as u32 + 1;
    if day > 30 {
        return Err(EphemerisError::new(format!(
            "lunar month from JD {} lasts over 30 days",
            lunar_month.first_day_jd
        ))
        .into());
    }
    debug!(month = index, day, "lunar date found");

    // 正月初一換年，以本年正月為準
    let first_month = year_start
        .iter()
        .find(|m| m.month == Month::Common(1))
        .unwrap_or(&year_start[0]);
    let lunar_year = if current < first_month.first_day_jd {
        Pillar::of_year(year - 1)
    } else {
        Pillar::of_year(year)
    };

    // 立春換年
    let year_pillar = if current < terms[3] {
        Pillar::of_year(year - 1)
    } else {
        Pillar::of_year(year)
    };

    let day_epoch = Date::from_jdn(DAY_EPOCH_JDN).midnight_jd(TZ_OFFSET_MINUTES);
    let day_pillar = Pillar::JIA_ZI.plus((current - day_epoch).floor() as i64);

    // 自大雪起每 30° 為一月，0 為子月
    let sun = ephemeris.solar_longitude(current)?;
    let month_num = (normalize_360(sun - DAXUE_LONGITUDE) / 30.0).floor() as i64;
    let month_branch = Branch::ZI.plus(month_num);
    let month_pillar = year_pillar
        .stem()
        .class()
        .yin_month()
        .plus(month_branch.minus(Branch::YIN) as i64);

    // 子時跨 23:00 至 00:59
    let hour_pillar = day_pillar
        .stem()
        .class()
        .zi_hour()
        .plus((input.hour as i64 + 1) / 2);

    let jie_longitude = DAXUE_LONGITUDE + 30.0 * month_num as f64;
    let jie_jd = solar_terms::crossing(ephemeris, &solver, current, jie_longitude)?;
    let zhongqi_jd = solar_terms::crossing(ephemeris, &solver, jie_jd + 15.0, jie_longitude + 15.0)?;
    let term_index = 2 * month_num as u32;

    Ok(LunarCalendar {
        is_leap_year: leap.is_some(),
        lunar_year,
        month: lunar_month.month,
        month_name: fmt::month(lunar_month.month),
        day,
        day_name: fmt::day(day),
        year_pillar,
        month_pillar,
        day_pillar,
        hour_pillar,
        jie: SolarTerm {
            name: fmt::solar_term(term_index),
            instant: CivilDateTime::from_julian_day(jie_jd, UTC_OFFSET_HOURS),
        },
        zhongqi: SolarTerm {
            name: fmt::solar_term(term_index + 1),
            instant: CivilDateTime::from_julian_day(zhongqi_jd, UTC_OFFSET_HOURS),
        },
    })
}

/// 自 `anchor` 年冬至起的節氣、已置閏的十五個月及閏月位置。
fn lunar_window<E: Ephemeris>(
    ephemeris: &E,
    solver: &Newton,
    anchor: i32,
) -> Result<([f64; solar_terms::COUNT], [LunarMonth; new_moons::COUNT], Option<usize>), Error> {
    let terms = solar_terms::locate(ephemeris, solver, anchor)?;
    let new_moons = new_moons::locate(ephemeris, solver, terms[0])?;
    let mut months = months::build(&new_moons);
    let leap = months::resolve_leap(&mut months, &solar_terms::major_terms(&terms));
    Ok((terms, months, leap))
}
