//! 排月與置閏

use tracing::debug;

use super::{LunarMonth, Month, TZ_OFFSET_MINUTES, new_moons};
use crate::time_scales::Ut;

/// 由 15 個朔排出 15 個月，月首取朔日北京時間零時。
///
/// 首月為冬至所在月，記為十一月，其後依次為十二月、正月……，暫不置閏。
pub fn build(new_moons: &[f64; new_moons::COUNT]) -> [LunarMonth; new_moons::COUNT] {
    std::array::from_fn(|i| {
        let num = match (i as u32 + 11) % 12 {
            0 => 12,
            n => n,
        };
        LunarMonth {
            month: Month::Common(num),
            first_day_jd: Ut(new_moons[i])
                .date_in_timezone(TZ_OFFSET_MINUTES)
                .midnight_jd(TZ_OFFSET_MINUTES),
        }
    })
}

/// 依中氣置閏，返回閏月的位置。
///
/// `major_terms` 為兩冬至及其間的十三個中氣。兩冬至間若有十三個月，則自首月起第一個
/// 不含中氣的月為閏月，沿用前月之名；自閏月起各月序號減一。末一冬至屬下一歲，不計入。
pub fn resolve_leap(months: &mut [LunarMonth; new_moons::COUNT], major_terms: &[f64; 13]) -> Option<usize> {
    let winter_solstice = major_terms[12];
    // 首月至末一冬至所在月之前一月
    let count = months
        .partition_point(|m| m.first_day_jd <= winter_solstice)
        .saturating_sub(1);
    debug!(count, "months between winter solstices");
    if count == 12 {
        return None;
    }

    let leap = months.windows(2).position(|w| {
        !major_terms[..12]
            .iter()
            .any(|&jd| w[0].first_day_jd < jd && jd < w[1].first_day_jd)
    })?;
    for (i, m) in months.iter_mut().enumerate().skip(leap) {
        let num = match m.month.num() - 1 {
            0 => 12,
            n => n,
        };
        m.month = if i == leap {
            Month::Leap(num)
        } else {
            Month::Common(num)
        };
    }
    debug!(leap, month = months[leap].month.num(), "leap month inserted");
    Some(leap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chinese::fmt;
    use crate::date::Date;

    /// 北京時間當日 06:00
    fn jd(y: i32, m: u32, d: u32) -> f64 {
        Date::from_gregorian(y, m, d).unwrap().midnight_jd(TZ_OFFSET_MINUTES) + 0.25
    }

    #[test]
    fn first_day_is_local_midnight() {
        // 2022-01-02T18:33Z 即北京時間 1 月 3 日 02:33
        let new_moons = std::array::from_fn(|i| 2459582.273 + 29.53 * i as f64);
        let months = build(&new_moons);
        assert_eq!(
            Date::from_gregorian(2022, 1, 3).unwrap().midnight_jd(480),
            months[0].first_day_jd
        );
        assert_eq!(Month::Common(11), months[0].month);
        assert_eq!(Month::Common(12), months[1].month);
        assert_eq!(Month::Common(1), months[2].month);
        assert_eq!(Month::Common(12), months[13].month);
        assert_eq!(Month::Common(1), months[14].month);
    }

    #[test]
    fn leap_2020() {
        // 2019-11-26 起的十五個月，2020 年閏四月
        let starts = [
            (2019, 11, 26),
            (2019, 12, 26),
            (2020, 1, 25),
            (2020, 2, 23),
            (2020, 3, 24),
            (2020, 4, 23),
            (2020, 5, 23),
            (2020, 6, 21),
            (2020, 7, 21),
            (2020, 8, 19),
            (2020, 9, 17),
            (2020, 10, 17),
            (2020, 11, 15),
            (2020, 12, 15),
            (2021, 1, 13),
        ];
        let majors = [
            (2019, 12, 22),
            (2020, 1, 20),
            (2020, 2, 19),
            (2020, 3, 20),
            (2020, 4, 19),
            (2020, 5, 20),
            (2020, 6, 21),
            (2020, 7, 22),
            (2020, 8, 22),
            (2020, 9, 22),
            (2020, 10, 23),
            (2020, 11, 22),
            (2020, 12, 21),
        ];
        let new_moons = starts.map(|(y, m, d)| jd(y, m, d));
        let major_terms = majors.map(|(y, m, d)| jd(y, m, d));
        let mut months = build(&new_moons);
        assert_eq!(Some(6), resolve_leap(&mut months, &major_terms));

        let names: Vec<_> = months.iter().map(|m| fmt::month(m.month)).collect();
        assert_eq!(
            [
                "冬月", "腊月", "正月", "二月", "三月", "四月", "闰四月", "五月", "六月", "七月",
                "八月", "九月", "十月", "冬月", "腊月"
            ],
            names.as_slice()
        );
        assert_eq!(1, months.iter().filter(|m| m.month.is_leap()).count());
    }

    #[test]
    fn leap_2017() {
        let starts = [
            (2016, 11, 29),
            (2016, 12, 29),
            (2017, 1, 28),
            (2017, 2, 26),
            (2017, 3, 28),
            (2017, 4, 26),
            (2017, 5, 26),
            (2017, 6, 24),
            (2017, 7, 23),
            (2017, 8, 22),
            (2017, 9, 20),
            (2017, 10, 20),
            (2017, 11, 18),
            (2017, 12, 18),
            (2018, 1, 17),
        ];
        let major_terms = [
            (2016, 12, 21),
            (2017, 1, 20),
            (2017, 2, 18),
            (2017, 3, 20),
            (2017, 4, 20),
            (2017, 5, 21),
            (2017, 6, 21),
            (2017, 7, 22),
            (2017, 8, 23),
            (2017, 9, 23),
            (2017, 10, 23),
            (2017, 11, 22),
            (2017, 12, 22),
        ]
        .map(|(y, m, d)| jd(y, m, d));
        let mut months = build(&starts.map(|(y, m, d)| jd(y, m, d)));
        assert_eq!(Some(8), resolve_leap(&mut months, &major_terms));
        assert_eq!(Month::Leap(6), months[8].month);
        assert_eq!(Month::Common(6), months[7].month);
        assert_eq!(Month::Common(7), months[9].month);
        assert_eq!(Month::Common(11), months[13].month);
        assert_eq!(Month::Common(12), months[14].month);
    }

    #[test]
    fn no_leap_with_twelve_months() {
        // 2021 年：冬至 2020-12-21 至 2021-12-21 間十二個月
        let starts = [
            (2020, 12, 15),
            (2021, 1, 13),
            (2021, 2, 12),
            (2021, 3, 13),
            (2021, 4, 12),
            (2021, 5, 12),
            (2021, 6, 10),
            (2021, 7, 10),
            (2021, 8, 8),
            (2021, 9, 7),
            (2021, 10, 6),
            (2021, 11, 5),
            (2021, 12, 4),
            (2022, 1, 3),
            (2022, 2, 1),
        ];
        let major_terms = [
            (2020, 12, 21),
            (2021, 1, 20),
            (2021, 2, 18),
            (2021, 3, 20),
            (2021, 4, 20),
            (2021, 5, 21),
            (2021, 6, 21),
            (2021, 7, 22),
            (2021, 8, 23),
            (2021, 9, 23),
            (2021, 10, 23),
            (2021, 11, 22),
            (2021, 12, 21),
        ]
        .map(|(y, m, d)| jd(y, m, d));
        let mut months = build(&starts.map(|(y, m, d)| jd(y, m, d)));
        let before = months;
        assert_eq!(None, resolve_leap(&mut months, &major_terms));
        assert_eq!(before, months);
        assert_eq!(Month::Common(12), months[13].month);
    }
}
