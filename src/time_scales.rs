//! Deals with different time scales, specifically, conversion from UT (UTC or
//! UT1) into TT.
//!
//! Civil time is kept in UT, while the ephemeris series are evaluated in TT.
//! The difference, ΔT = TT − UT, comes from a piecewise model:
//!
//! - before 1600: the two quadratics of Stephenson & Houlden (1986);
//! - 1600 to 1972: interpolation in the biennial table compiled by J. Meeus;
//! - 1972 to the expiry of the leap second list: TAI − UTC + 32.184 s;
//! - afterwards: a [long-term estimate](https://astro.ukho.gov.uk/nao/lvm/)
//!   offset to join the leap second list without a jump.

use std::sync::OnceLock;

use crate::date::Date;

const JULIAN_CENTURY: f64 = 36525.0;
const TT_MINUS_TAI: f64 = 32.184;

/// [Terristrial time](https://en.wikipedia.org/wiki/Terrestrial_Time),
/// represented in Julian date (JD).
///
/// Ephemeris series are computed in this time scale. TDB differs from it by
/// no more than a few milliseconds and is treated as the same.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Tt(pub f64);

/// [Universal time](https://en.wikipedia.org/wiki/Universal_Time), the actual
/// civil time used for determining the actual date at a given time point,
/// represented in Julian date (JD).
///
/// This can be either UTC (coordinated universal time, based on TAI with leap
/// seconds) or UT1 (mean solar time on the Prime Meridian) depending on the
/// year. Specifically, UTC from 1972-01-01T00:00Z to the expiry of the known
/// leap second list, UT1 otherwise.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Ut(pub f64);

impl From<Ut> for Tt {
    fn from(ut: Ut) -> Tt {
        Tt(ut.0 + delta_t(ut) / 86400.0)
    }
}

impl Ut {
    /// Returns the date at the time point in timezone ahead (east) of UTC by
    /// `tz_offset_minutes` minutes.
    ///
    /// For Beijing time (UTC+8), `tz_offset_minutes` should be +480.
    ///
    /// # Example
    ///
    /// ```
    /// use nongli::time_scales::Ut;
    /// let ut = Ut(2451543.25); // 1999-12-30T18:00Z
    /// assert_eq!((1999, 12, 30), ut.date_in_timezone(0).gregorian());
    /// assert_eq!((1999, 12, 31), ut.date_in_timezone(480).gregorian());
    /// ```
    pub fn date_in_timezone(&self, tz_offset_minutes: i32) -> Date {
        let jdn = (self.0 + tz_offset_minutes as f64 / 1440.0).round() as i32;
        Date::from_jdn(jdn)
    }
}

/// Returns ΔT = TT − UT in seconds at the given instant.
///
/// # Example
///
/// ```
/// use nongli::time_scales::{delta_t, Ut};
///
/// // 2017-01-01T00:00Z, after the most recent leap second
/// assert!((delta_t(Ut(2457754.5)) - 69.184).abs() < 1e-9);
/// ```
pub fn delta_t(ut: Ut) -> f64 {
    let data = leap_seconds::data();
    match ut.0 {
        jd if jd < 2_067_314.5 => ancient(jd),
        jd if jd < 2_305_447.5 => medieval(jd),
        jd if jd < data.starts => table(jd),
        jd if jd <= data.expires => {
            let inserted = data.effective.partition_point(|&t| t <= jd);
            (10 + inserted) as f64 + TT_MINUS_TAI
        }
        jd => leap_seconds::estimate(jd) + data.c2,
    }
}

fn ancient(jd: f64) -> f64 {
    let c = (jd - 2_067_314.5) / JULIAN_CENTURY;
    1830.0 - 405.0 * c + 46.5 * c * c
}

fn medieval(jd: f64) -> f64 {
    let c = (jd - 2_396_758.5) / JULIAN_CENTURY;
    22.5 * c * c
}

/// Biennial ΔT from 1620 to 1992, in seconds.
#[rustfmt::skip]
const TABLE: [f64; 187] = [
    124.0,115.0,106.0, 98.0, 91.0, 85.0, 79.0, 74.0, 70.0, 65.0,
     62.0, 58.0, 55.0, 53.0, 50.0, 48.0, 46.0, 44.0, 42.0, 40.0,
     37.0, 35.0, 33.0, 31.0, 28.0, 26.0, 24.0, 22.0, 20.0, 18.0,
     16.0, 14.0, 13.0, 12.0, 11.0, 10.0,  9.0,  9.0,  9.0,  9.0,
      9.0,  9.0,  9.0,  9.0, 10.0, 10.0, 10.0, 10.0, 10.0, 11.0,
     11.0, 11.0, 11.0, 11.0, 11.0, 11.0, 12.0, 12.0, 12.0, 12.0,
     12.0, 12.0, 13.0, 13.0, 13.0, 13.0, 14.0, 14.0, 14.0, 15.0,
     15.0, 15.0, 15.0, 16.0, 16.0, 16.0, 16.0, 16.0, 17.0, 17.0,
     17.0, 17.0, 17.0, 17.0, 17.0, 17.0, 16.0, 16.0, 15.0, 14.0,
     13.7, 13.1, 12.7, 12.5, 12.5, 12.5, 12.5, 12.5, 12.5, 12.3,
     12.0, 11.4, 10.6,  9.6,  8.6,  7.5,  6.6,  6.0,  5.7,  5.6,
      5.7,  5.9,  6.2,  6.5,  6.8,  7.1,  7.3,  7.5,  7.7,  7.8,
      7.9,  7.5,  6.4,  5.4,  2.9,  1.6, -1.0, -2.7, -3.6, -4.7,
     -5.4, -5.2, -5.5, -5.6, -5.8, -5.9, -6.2, -6.4, -6.1, -4.7,
     -2.7,  0.0,  2.6,  5.4,  7.7, 10.5, 13.4, 16.0, 18.2, 20.2,
     21.2, 22.4, 23.5, 23.9, 24.3, 24.0, 23.9, 23.9, 23.7, 24.0,
     24.3, 25.3, 26.2, 27.3, 28.2, 29.1, 30.0, 30.7, 31.4, 32.2,
     33.1, 34.0, 35.0, 36.5, 38.3, 40.2, 42.2, 44.5, 46.5, 48.5,
     50.5, 52.2, 53.8, 54.9, 55.8, 56.9, 58.3,
];

fn table(jd: f64) -> f64 {
    const START: f64 = 2_312_752.5; // 1620-01-01
    const STEP: f64 = 730.5;

    let x = (jd - START) / STEP;
    let mid = (x.round().max(0.0) as usize).clamp(1, TABLE.len() - 2);
    let n = (x - mid as f64).max(-1.0);
    let a = TABLE[mid] - TABLE[mid - 1];
    let b = TABLE[mid + 1] - TABLE[mid];
    let c = b - a;
    TABLE[mid] + n / 2.0 * (a + b + n * c)
}

mod leap_seconds {
    use std::f64::consts::PI;

    use super::{Date, OnceLock, TT_MINUS_TAI};

    /// Last days of UTC months that ended with a leap second.
    pub const DATES: &[(i32, u32, u32)] = &[
        (1972, 6, 30),
        (1972, 12, 31),
        (1973, 12, 31),
        (1974, 12, 31),
        (1975, 12, 31),
        (1976, 12, 31),
        (1977, 12, 31),
        (1978, 12, 31),
        (1979, 12, 31),
        (1981, 6, 30),
        (1982, 6, 30),
        (1983, 6, 30),
        (1985, 6, 30),
        (1987, 12, 31),
        (1989, 12, 31),
        (1990, 12, 31),
        (1992, 6, 30),
        (1993, 6, 30),
        (1994, 6, 30),
        (1995, 12, 31),
        (1997, 6, 30),
        (1998, 12, 31),
        (2005, 12, 31),
        (2008, 12, 31),
        (2012, 6, 30),
        (2015, 6, 30),
        (2016, 12, 31),
    ];
    pub const DATE_EXPIRES: (i32, u32, u32) = (2026, 6, 28);

    #[derive(Debug, Clone)]
    pub struct Data {
        /// 1972-01-01T00:00Z
        pub starts: f64,
        /// Instants (UTC) from which each leap second is in effect.
        pub effective: Vec<f64>,
        pub expires: f64,
        pub c2: f64,
    }

    static COMPUTED: OnceLock<Data> = OnceLock::new();

    fn midnight_after(y: i32, m: u32, d: u32) -> f64 {
        match Date::from_gregorian(y, m, d) {
            Some(date) => (date + 1).midnight_jd(0),
            None => unreachable!("date not recognized: {:?}", (y, m, d)),
        }
    }

    pub fn data() -> &'static Data {
        COMPUTED.get_or_init(|| {
            let starts = midnight_after(1971, 12, 31);
            let effective: Vec<_> = DATES
                .iter()
                .map(|&(y, m, d)| midnight_after(y, m, d))
                .collect();
            let (y, m, d) = DATE_EXPIRES;
            let expires = midnight_after(y, m, d);
            let c2 = (10 + DATES.len()) as f64 + TT_MINUS_TAI - estimate(expires);
            Data {
                starts,
                effective,
                expires,
                c2,
            }
        })
    }

    pub fn estimate(jd: f64) -> f64 {
        let y = (jd - 2451544.5) / 365.2425 + 2000.0;
        let t = (y - 1825.0) / 100.0;
        31.4115 * t * t + 284.8435805251424 * (2.0 * PI * (t + 0.75) / 14.0).cos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn leap_second_era() {
        // 1972-01-01 right at the start: TAI - UTC = 10 s
        assert_abs_diff_eq!(42.184, delta_t(Ut(2441317.5)), epsilon = 1e-9);
        // 2000-01-01: 32 s
        assert_abs_diff_eq!(64.184, delta_t(Ut(2451544.5)), epsilon = 1e-9);
        // one second either side of 2017-01-01T00:00Z
        assert_abs_diff_eq!(
            68.184,
            delta_t(Ut(2457754.5 - 1.0 / 86400.0)),
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(69.184, delta_t(Ut(2457754.5)), epsilon = 1e-9);
    }

    #[test]
    fn table_joins_leap_seconds() {
        let before = delta_t(Ut(2441317.5 - 1e-6));
        assert_abs_diff_eq!(before, 42.184, epsilon = 0.5);
    }

    #[test]
    fn estimate_joins_leap_seconds() {
        let expires = leap_seconds::data().expires;
        let before = delta_t(Ut(expires));
        let after = delta_t(Ut(expires + 1e-6));
        assert_abs_diff_eq!(before, after, epsilon = 1e-3);
    }

    #[test]
    fn historical_values() {
        // 1900: about -2.7 s
        assert_abs_diff_eq!(delta_t(Ut(2415020.5)), -2.7, epsilon = 0.5);
        // 1700: about 9 s
        assert_abs_diff_eq!(delta_t(Ut(2341972.5)), 9.0, epsilon = 1.0);
        // medieval and ancient eras are minutes to hours
        assert!(delta_t(Ut(2100000.0)) > 1000.0);
        assert!(delta_t(Ut(1000000.0)) > 10000.0);
    }

    #[test]
    fn ut_to_tt() {
        let tt = Tt::from(Ut(2451544.5));
        assert_abs_diff_eq!(tt.0, 2451544.5 + 64.184 / 86400.0, epsilon = 1e-9);
    }

    #[test]
    fn date_in_timezone() {
        let ut_midnight = Ut(2451542.5 + 16.0 / 24.0); // 1999-12-31T00:00 UTC+8
        let ut_before_midnight = Ut(ut_midnight.0 - 1.0 / 86400.0);
        let ut_after_midnight = Ut(ut_midnight.0 + 1.0 / 86400.0);
        assert_eq!(
            (1999, 12, 30),
            ut_before_midnight.date_in_timezone(480).gregorian()
        );
        assert_eq!(
            (1999, 12, 31),
            ut_after_midnight.date_in_timezone(480).gregorian()
        );
    }
}
