//! 格式化相關功能
//!
//! 輸出文本一律用簡體字，如「腊月」「闰四月」「芒种」。

use super::Month;

/// 漢數字，第 `1..=9` 項分別為「一」到「九」。為便於格式化日期，第 0 項為「十」。
pub const NUM_CHINESE: &[&str] = &["十", "一", "二", "三", "四", "五", "六", "七", "八", "九"];

/// 天干名，甲至癸。
pub const STEM_NAMES: &[&str] = &["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];

/// 地支名，子至亥。
pub const BRANCH_NAMES: &[&str] = &[
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];

/// 節氣名，自大雪（黃經 255°）起，每項相隔 15°。
pub const SOLAR_TERM_NAMES: &[&str] = &[
    "大雪", "冬至", "小寒", "大寒", "立春", "雨水", "惊蛰", "春分", "清明", "谷雨", "立夏", "小满",
    "芒种", "夏至", "小暑", "大暑", "立秋", "处暑", "白露", "秋分", "寒露", "霜降", "立冬", "小雪",
];

/// 取得月名（含「月」字）。十一、十二月稱「冬月」「腊月」，閏月冠以「闰」。
///
/// # 用例
///
/// ```
/// use nongli::chinese::{self, Month::*};
///
/// assert_eq!("冬月", chinese::fmt::month(Common(11)));
/// assert_eq!("闰四月", chinese::fmt::month(Leap(4)));
/// ```
///
/// # Panics
///
/// 若月序號不在 `1..=12` 間則 panic。
pub fn month(m: Month) -> String {
    let mut rt = String::new();
    if m.is_leap() {
        rt += "闰";
    }
    let num = m.num();
    rt += match num {
        1 => "正",
        2..=9 => NUM_CHINESE[num as usize],
        10 => "十",
        11 => "冬",
        12 => "腊",
        _ => panic!("month {} not in 1..=12", num),
    };
    rt += "月";
    rt
}

/// 取得日名，前十日為「初一」到「初十」，第 21 至 29 日為「廿一」到「廿九」。
///
/// # 用例
///
/// ```
/// use nongli::chinese;
///
/// assert_eq!("初十", chinese::fmt::day(10));
/// assert_eq!("廿五", chinese::fmt::day(25));
/// assert_eq!("三十", chinese::fmt::day(30));
/// ```
///
/// # Panics
///
/// 若日序號不在 `1..=30` 間則 panic。
pub fn day(d: u32) -> String {
    match d {
        1..=10 => "初",
        11..=19 => "十",
        20 => "二",
        21..=29 => "廿",
        30 => "三",
        _ => panic!("day {} not in 1..=30", d),
    }
    .to_owned()
        + NUM_CHINESE[(d % 10) as usize]
}

/// 節氣序號轉為名稱。序號自大雪起算，`0..24` 分別為大雪到小雪，超出則按 24 取模。
///
/// # 用例
///
/// ```
/// use nongli::chinese;
///
/// assert_eq!("小寒", chinese::fmt::solar_term(2));
/// assert_eq!("冬至", chinese::fmt::solar_term(25));
/// ```
pub fn solar_term(term: u32) -> &'static str {
    SOLAR_TERM_NAMES[(term % 24) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chinese::Month::*;

    #[test]
    fn test_month() {
        for (std, m) in [
            ("正月", Common(1)),
            ("十月", Common(10)),
            ("腊月", Common(12)),
            ("闰正月", Leap(1)),
            ("闰冬月", Leap(11)),
        ] {
            assert_eq!(std, month(m));
        }
    }

    #[test]
    #[should_panic]
    fn month_out_of_range() {
        month(Common(13));
    }

    #[test]
    fn test_day() {
        for (std, d) in [
            ("初一", 1),
            ("初十", 10),
            ("十一", 11),
            ("十九", 19),
            ("二十", 20),
            ("廿一", 21),
            ("三十", 30),
        ] {
            assert_eq!(std, day(d));
        }
    }

    #[test]
    fn test_solar_term() {
        for (std, n) in [("大雪", 0), ("芒种", 12), ("夏至", 13), ("小雪", 23), ("大雪", 24)] {
            assert_eq!(std, solar_term(n));
        }
    }
}
