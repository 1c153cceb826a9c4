//! Chinese calendar
//!
//! Note: 為方便處理諸多術語，本模塊文檔用中文。
//!
//! 本程序即時以曆表（見 [`crate::ephemeris`]）推算節氣與朔，再依現行規則排月置閏，
//! 並推出年、月、日、時四柱干支。時刻一律以北京時間（UTC+8）為準。
//!
//! 推算以「歲」為單位：自某年冬至所在月起取十五個月，足以涵蓋次年全年。
//!
//! # 用例
//!
//! ```
//! use nongli::CivilDateTime;
//! use nongli::config::Config;
//! use nongli::chinese::{self, Month};
//! use nongli::ephemeris::SeriesEphemeris;
//!
//! let config = Config::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"));
//! let eph = SeriesEphemeris::open(&config).unwrap();
//!
//! let cal = chinese::convert(&eph, &CivilDateTime::new(2020, 6, 10, 11, 5, 3)).unwrap();
//! assert_eq!(Month::Leap(4), cal.month);
//! assert_eq!("闰四月", cal.month_name);
//! assert_eq!("十九", cal.day_name);
//! assert_eq!("甲申", cal.day_pillar.name());
//! ```

use std::fmt as std_fmt;

use crate::date::CivilDateTime;

pub mod convert;
pub mod fmt;
pub mod months;
pub mod new_moons;
pub mod sexagenary;
pub mod solar_terms;

pub use convert::{convert, lunar_calendar};
pub use sexagenary::{Branch, ParsePillarError, Pillar, Stem, StemClass};
pub use solar_terms::solar_terms_of_year;

/// 北京時間與 UTC 之差（分鐘）。
pub const TZ_OFFSET_MINUTES: i32 = 480;
/// 北京時間與 UTC 之差（小時）。
pub const UTC_OFFSET_HOURS: f64 = 8.0;

/// 月名，`Common` 為平月，`Leap` 為閏月。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Month {
    Common(u32),
    Leap(u32),
}
impl Month {
    /// 取得月序號，無論平閏。
    pub fn num(&self) -> u32 {
        use Month::*;
        *match self {
            Common(v) | Leap(v) => v,
        }
    }
    /// 閏月為 `true`，平月為 `false`
    pub fn is_leap(&self) -> bool {
        matches!(self, Self::Leap(_))
    }
    /// 取得月名的文本形式，十一、十二月稱「冬月」「腊月」。
    pub fn name(&self) -> String {
        fmt::month(*self)
    }
}

/// 月首信息
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LunarMonth {
    /// 月名
    pub month: Month,
    /// 初一北京時間零時的儒略日（UT）
    pub first_day_jd: f64,
}

/// 節氣及其交節時刻（北京時間，秒數捨去）。
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SolarTerm {
    pub name: &'static str,
    pub instant: CivilDateTime,
}

impl std_fmt::Display for SolarTerm {
    fn fmt(&self, f: &mut std_fmt::Formatter<'_>) -> std_fmt::Result {
        write!(f, "{} {}", self.name, self.instant)
    }
}

/// 換算結果。
#[derive(Debug, Clone, PartialEq)]
pub struct LunarCalendar {
    /// 該歲有閏月則為 `true`
    pub is_leap_year: bool,
    /// 農曆年干支，以正月初一換年
    pub lunar_year: Pillar,
    /// 農曆月
    pub month: Month,
    /// 月名，如「正月」「闰四月」「腊月」
    pub month_name: String,
    /// 農曆日，`1..=30`
    pub day: u32,
    /// 日名，如「初一」「廿九」
    pub day_name: String,
    /// 年柱，以立春換年
    pub year_pillar: Pillar,
    /// 月柱，以節換月
    pub month_pillar: Pillar,
    /// 日柱
    pub day_pillar: Pillar,
    /// 時柱
    pub hour_pillar: Pillar,
    /// 本月之節（交節在前）
    pub jie: SolarTerm,
    /// 本月之中氣
    pub zhongqi: SolarTerm,
}

impl std_fmt::Display for LunarCalendar {
    fn fmt(&self, f: &mut std_fmt::Formatter<'_>) -> std_fmt::Result {
        write!(
            f,
            "{}年{}{} {}年 {}月 {}日 {}时",
            self.lunar_year,
            self.month_name,
            self.day_name,
            self.year_pillar,
            self.month_pillar,
            self.day_pillar,
            self.hour_pillar
        )
    }
}
