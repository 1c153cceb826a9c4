//! Calendar-independant dates, and civil date-times built on them.

use std::fmt;
use std::ops::{Add, Sub};

use crate::error::Error;

/// Calendar used to label a day.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum CalendarSystem {
    /// Proleptic Julian calendar.
    Julian,
    /// Proleptic Gregorian calendar.
    Gregorian,
}

impl CalendarSystem {
    /// JDN of 1582-10-15 (Gregorian), the first day of the Gregorian calendar.
    pub const REFORM_JDN: i32 = 2299161;

    /// Picks the calendar in civil use on the given day: Julian before
    /// 1582-10-15, Gregorian from then on.
    pub fn for_date(year: i32, month: u32, day: u32) -> Self {
        if (year, month, day) < (1582, 10, 15) {
            Self::Julian
        } else {
            Self::Gregorian
        }
    }

    /// Picks the calendar in civil use on the day numbered `jdn`.
    pub fn for_jdn(jdn: i32) -> Self {
        if jdn < Self::REFORM_JDN {
            Self::Julian
        } else {
            Self::Gregorian
        }
    }
}

/// A calendar-independant date.
///
/// Supported range begins from January 1, 4713 BC, proleptic Julian calendar.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Date {
    jdn: i32,
}

impl Date {
    /// Creates a `Date` with a Julian day number (JDN).
    pub fn from_jdn(jdn: i32) -> Self {
        Self { jdn }
    }
    /// Returns the Julian day number (JDN) of the date.
    pub fn jdn(&self) -> i32 {
        self.jdn
    }

    /// Creates a `Date` from a year, month and day in the given calendar.
    ///
    /// `year` should be an astronomical year number, i.e. 1 BC is `0`, 2
    /// BC is `-1`, etc.
    ///
    /// Returns `None` if the day does not exist (e.g. February 30) or the
    /// result is out of supported range.
    ///
    /// # Example
    ///
    /// ```
    /// use nongli::date::{CalendarSystem, Date};
    ///
    /// let date = Date::from_ymd(CalendarSystem::Julian, 1582, 10, 4).unwrap();
    /// assert_eq!(date + 1, Date::from_gregorian(1582, 10, 15).unwrap());
    /// assert_eq!(None, Date::from_ymd(CalendarSystem::Gregorian, 2023, 2, 29));
    /// ```
    pub fn from_ymd(calendar: CalendarSystem, year: i32, month: u32, day: u32) -> Option<Self> {
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return None;
        }
        let (y, m, d) = (year, month as i32, day as i32);
        let jdn = match calendar {
            CalendarSystem::Gregorian => {
                (1461 * (y + 4800 + (m - 14) / 12)) / 4
                    + (367 * (m - 2 - 12 * ((m - 14) / 12))) / 12
                    - (3 * ((y + 4900 + (m - 14) / 12) / 100)) / 4
                    + d
                    - 32075
            }
            CalendarSystem::Julian => {
                367 * y - (7 * (y + 5001 + (m - 9) / 7)) / 4 + (275 * m) / 9 + d + 1729777
            }
        };
        if jdn < 0 {
            return None;
        }
        let date = Self::from_jdn(jdn);
        (date.ymd(calendar) == (year, month, day)).then_some(date)
    }

    /// Creates a `Date` with a Gregorian calendar date.
    ///
    /// # Example
    ///
    /// ```
    /// use nongli::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!(2451545, date.jdn());
    /// ```
    pub fn from_gregorian(year: i32, month: u32, day: u32) -> Option<Self> {
        Self::from_ymd(CalendarSystem::Gregorian, year, month, day)
    }
    /// Creates a `Date` with a Julian calendar date.
    pub fn from_julian(year: i32, month: u32, day: u32) -> Option<Self> {
        Self::from_ymd(CalendarSystem::Julian, year, month, day)
    }

    /// Represents the date in the given calendar, in `(year, month, day)`
    /// format with an astronomical year number.
    pub fn ymd(&self, calendar: CalendarSystem) -> (i32, u32, u32) {
        let jdn = self.jdn;
        let correction = match calendar {
            CalendarSystem::Gregorian => (((4 * jdn + 274277) / 146097) * 3) / 4 - 38,
            CalendarSystem::Julian => 0,
        };
        let f = jdn + 1401 + correction;
        let e = 4 * f + 3;
        let g = (e % 1461) / 4;
        let h = 5 * g + 2;
        let day = (h % 153) / 5 + 1;
        let month = (h / 153 + 2) % 12 + 1;
        let year = e / 1461 - 4716 + (12 + 2 - month) / 12;
        (year, month as u32, day as u32)
    }
    /// Represents the date in Gregorian calendar.
    ///
    /// # Example
    ///
    /// ```
    /// use nongli::Date;
    ///
    /// let date = Date::from_jdn(2451545);
    /// assert_eq!((2000, 1, 1), date.gregorian());
    /// ```
    pub fn gregorian(&self) -> (i32, u32, u32) {
        self.ymd(CalendarSystem::Gregorian)
    }
    /// Represents the date in Julian calendar.
    pub fn julian(&self) -> (i32, u32, u32) {
        self.ymd(CalendarSystem::Julian)
    }
    /// Represents the date in the calendar in civil use on that day.
    pub fn civil(&self) -> (i32, u32, u32) {
        self.ymd(CalendarSystem::for_jdn(self.jdn))
    }
    /// Formats the date in ISO 8601 format.
    ///
    /// # Example
    ///
    /// ```
    /// use nongli::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!("2000-01-01", date.iso_gregorian());
    /// ```
    pub fn iso_gregorian(&self) -> String {
        let (y, m, d) = self.gregorian();
        format!("{:04}-{:02}-{:02}", y, m, d)
    }

    /// Returns the day of week of the date, in ISO-8601 numbering (i.e.
    /// `1..=7` for Monday through Sunday)
    pub fn day_of_week(&self) -> i32 {
        self.jdn.rem_euclid(7) + 1
    }

    /// Julian day of the midnight starting this date, in a timezone ahead
    /// (east) of UTC by `tz_offset_minutes` minutes.
    ///
    /// ```
    /// use nongli::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!(2451544.5, date.midnight_jd(0));
    /// ```
    pub fn midnight_jd(&self, tz_offset_minutes: i32) -> f64 {
        self.jdn as f64 - 0.5 - tz_offset_minutes as f64 / 1440.0
    }
}

impl Add<i32> for Date {
    type Output = Date;
    fn add(self, rhs: i32) -> Self::Output {
        Date::from_jdn(self.jdn + rhs)
    }
}
impl Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> Self::Output {
        self.jdn - rhs.jdn
    }
}

/// A civil date-time in a fixed-offset timezone.
///
/// `year` uses historical numbering: there is no year 0, and 1 BC is `-1`.
/// The calendar is implied by the date: Julian before 1582-10-15, Gregorian
/// from then on.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct CivilDateTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl CivilDateTime {
    pub const fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Astronomical year number: 1 BC is `0`.
    pub fn astronomical_year(&self) -> i32 {
        if self.year < 0 { self.year + 1 } else { self.year }
    }

    /// Calendar system the date is written in.
    pub fn calendar(&self) -> CalendarSystem {
        CalendarSystem::for_date(self.year, self.month, self.day)
    }

    /// Checks that the date-time exists.
    ///
    /// Leap seconds are not representable, so `second` must be below 60.
    ///
    /// # Example
    ///
    /// ```
    /// use nongli::CivilDateTime;
    ///
    /// assert!(CivilDateTime::new(2023, 1, 1, 0, 0, 0).validate().is_ok());
    /// assert!(CivilDateTime::new(2023, 2, 29, 0, 0, 0).validate().is_err());
    /// assert!(CivilDateTime::new(1582, 10, 10, 0, 0, 0).validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), Error> {
        let reason = if self.year == 0 {
            "year 0 does not exist"
        } else if !(1..=12).contains(&self.month) {
            "month must be in 1..=12"
        } else if !(1..=31).contains(&self.day) {
            "day must be in 1..=31"
        } else if self.hour > 23 {
            "hour must be in 0..=23"
        } else if self.minute > 59 {
            "minute must be in 0..=59"
        } else if self.second > 59 {
            "second must be in 0..=59"
        } else if self.year == 1582 && self.month == 10 && (5..=14).contains(&self.day) {
            "date skipped by the Gregorian reform"
        } else if self.date().is_none() {
            "no such day in that month"
        } else {
            return Ok(());
        };
        Err(self.invalid(reason))
    }

    fn invalid(&self, reason: &'static str) -> Error {
        Error::InvalidDateTime {
            year: self.year,
            month: self.month,
            day: self.day,
            hour: self.hour,
            minute: self.minute,
            second: self.second,
            reason,
        }
    }

    /// The calendar-independant date, or `None` if it does not exist.
    pub fn date(&self) -> Option<Date> {
        Date::from_ymd(self.calendar(), self.astronomical_year(), self.month, self.day)
    }

    /// Hours elapsed since midnight, as a fraction.
    pub fn hour_fraction(&self) -> f64 {
        self.hour as f64 + self.minute as f64 / 60.0 + self.second as f64 / 3600.0
    }

    /// Converts into a Julian day (UT), treating `self` as local time ahead
    /// (east) of UTC by `utc_offset_hours`.
    ///
    /// # Example
    ///
    /// ```
    /// use nongli::CivilDateTime;
    ///
    /// let jd = CivilDateTime::new(2000, 1, 1, 20, 0, 0).to_julian_day(8.0).unwrap();
    /// assert_eq!(2451545.0, jd);
    /// ```
    pub fn to_julian_day(&self, utc_offset_hours: f64) -> Result<f64, Error> {
        self.validate()?;
        let date = self
            .date()
            .ok_or_else(|| self.invalid("no such day in that month"))?;
        Ok(date.jdn() as f64 - 0.5 + (self.hour_fraction() - utc_offset_hours) / 24.0)
    }

    /// Converts a Julian day (UT) into local civil time ahead (east) of UTC by
    /// `utc_offset_hours`. Seconds are truncated.
    ///
    /// # Example
    ///
    /// ```
    /// use nongli::CivilDateTime;
    ///
    /// let dt = CivilDateTime::from_julian_day(2451545.0, 8.0);
    /// assert_eq!(CivilDateTime::new(2000, 1, 1, 20, 0, 0), dt);
    /// ```
    pub fn from_julian_day(jd: f64, utc_offset_hours: f64) -> Self {
        const MS_PER_DAY: i64 = 86_400_000;
        // round to whole milliseconds before truncating to seconds
        let ms = ((jd + 0.5 + utc_offset_hours / 24.0) * MS_PER_DAY as f64).round() as i64;
        let jdn = ms.div_euclid(MS_PER_DAY);
        let seconds = (ms.rem_euclid(MS_PER_DAY) / 1000) as u32;
        let (year, month, day) = Date::from_jdn(jdn as i32).civil();
        Self {
            year: if year <= 0 { year - 1 } else { year },
            month,
            day,
            hour: seconds / 3600,
            minute: seconds / 60 % 60,
            second: seconds % 60,
        }
    }
}

/// Years BC are written with a leading minus sign before four digits, as in
/// `-0001-05-08 00:00:00` for 1 BC.
impl fmt::Display for CivilDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.year < 0 { "-" } else { "" };
        write!(
            f,
            "{sign}{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year.unsigned_abs(),
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() {
        let date = Date::from_jdn(2440588);
        assert_eq!(2440588, date.jdn());
    }

    #[test]
    fn from_gregorian() {
        let date = Date::from_gregorian(1970, 1, 1).unwrap();
        assert_eq!(2440588, date.jdn());
        let date = Date::from_gregorian(2021, 9, 8).unwrap();
        assert_eq!(2459466, date.jdn());
        assert_eq!(None, Date::from_gregorian(2021, 9, 31));
        assert_eq!(None, Date::from_gregorian(2021, 13, 1));
    }

    #[test]
    fn to_gregorian() {
        let date = Date::from_jdn(2440588);
        assert_eq!((1970, 1, 1), date.gregorian());
        let date = Date::from_jdn(2459466);
        assert_eq!((2021, 9, 8), date.gregorian());
        let date = Date::from_jdn(2451545);
        assert_eq!((2000, 1, 1), date.gregorian());
    }

    #[test]
    fn julian_calendar() {
        let date = Date::from_julian(2000, 1, 1).unwrap();
        assert_eq!(2451558, date.jdn());
        assert_eq!((2000, 1, 1), date.julian());
        assert_eq!((2000, 1, 14), date.gregorian());
        // leap day only in the Julian calendar
        assert!(Date::from_julian(1900, 2, 29).is_some());
        assert!(Date::from_gregorian(1900, 2, 29).is_none());
        // Julian epoch
        assert_eq!(0, Date::from_julian(-4712, 1, 1).unwrap().jdn());
    }

    #[test]
    fn calendar_reform() {
        let last_julian = Date::from_julian(1582, 10, 4).unwrap();
        let first_gregorian = Date::from_gregorian(1582, 10, 15).unwrap();
        assert_eq!(1, first_gregorian - last_julian);
        assert_eq!(CalendarSystem::REFORM_JDN, first_gregorian.jdn());
        assert_eq!((1582, 10, 4), last_julian.civil());
        assert_eq!((1582, 10, 15), first_gregorian.civil());
    }

    #[test]
    fn to_day_of_week() {
        let date = Date::from_gregorian(1970, 1, 1).unwrap();
        assert_eq!(4, date.day_of_week());
        let date = Date::from_gregorian(2021, 9, 8).unwrap();
        assert_eq!(3, date.day_of_week());
    }

    #[test]
    fn iso_format() {
        assert_eq!(
            "2021-09-08",
            Date::from_gregorian(2021, 9, 8).unwrap().iso_gregorian()
        );
    }

    #[test]
    fn validate_fields() {
        let ok = CivilDateTime::new(2023, 1, 1, 0, 0, 0);
        assert!(ok.validate().is_ok());
        for bad in [
            CivilDateTime::new(0, 1, 1, 0, 0, 0),
            CivilDateTime::new(2023, 13, 1, 0, 0, 0),
            CivilDateTime::new(2023, 1, 32, 0, 0, 0),
            CivilDateTime::new(2023, 1, 1, 24, 0, 0),
            CivilDateTime::new(2023, 1, 1, 0, 60, 0),
            CivilDateTime::new(2023, 1, 1, 0, 0, 60),
            CivilDateTime::new(2023, 2, 29, 0, 0, 0),
            CivilDateTime::new(2023, 4, 31, 0, 0, 0),
        ] {
            assert!(
                matches!(bad.validate(), Err(Error::InvalidDateTime { .. })),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn validate_reform_gap() {
        for day in 5..=14 {
            assert!(CivilDateTime::new(1582, 10, day, 0, 0, 0).validate().is_err());
        }
        assert!(CivilDateTime::new(1582, 10, 4, 23, 59, 59).validate().is_ok());
        assert!(CivilDateTime::new(1582, 10, 15, 0, 0, 0).validate().is_ok());
        assert!(CivilDateTime::new(1500, 2, 29, 0, 0, 0).validate().is_ok());
    }

    #[test]
    fn julian_day_round_trip() {
        for dt in [
            CivilDateTime::new(2022, 1, 10, 22, 5, 3),
            CivilDateTime::new(1582, 10, 4, 12, 0, 0),
            CivilDateTime::new(1582, 10, 15, 0, 0, 1),
            CivilDateTime::new(-1, 12, 31, 23, 59, 59),
            CivilDateTime::new(1, 1, 1, 0, 0, 0),
        ] {
            let jd = dt.to_julian_day(8.0).unwrap();
            // truncation of seconds: nudge by a few microseconds
            let back = CivilDateTime::from_julian_day(jd + 1e-7, 8.0);
            assert_eq!(dt, back);
        }
    }

    #[test]
    fn bc_years_are_contiguous() {
        let last_bc = CivilDateTime::new(-1, 12, 31, 0, 0, 0).to_julian_day(0.0).unwrap();
        let first_ad = CivilDateTime::new(1, 1, 1, 0, 0, 0).to_julian_day(0.0).unwrap();
        assert_eq!(1.0, first_ad - last_bc);
    }

    #[test]
    fn display() {
        assert_eq!(
            "2022-01-05 17:13:54",
            CivilDateTime::new(2022, 1, 5, 17, 13, 54).to_string()
        );
        assert_eq!(
            "-0001-05-08 00:00:00",
            CivilDateTime::new(-1, 5, 8, 0, 0, 0).to_string()
        );
        assert_eq!(
            "-2998-01-05 12:00:00",
            CivilDateTime::new(-2998, 1, 5, 12, 0, 0).to_string()
        );
        assert_eq!(
            "0618-06-18 09:30:00",
            CivilDateTime::new(618, 6, 18, 9, 30, 0).to_string()
        );
    }
}
