//! 干支
//!
//! 天干、地支各自循環，兩者依次相配得六十干支。干支序號以甲子為 0，至癸亥為 59；
//! 天干與地支奇偶須相同，故僅有六十種組合，[`Pillar`] 的構造保證這一點。

use std::fmt;
use std::str::FromStr;

use super::fmt::{BRANCH_NAMES, STEM_NAMES};

/// 天干，序號 `0..10` 對應甲至癸。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Stem(u8);

/// 地支，序號 `0..12` 對應子至亥。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Branch(u8);

/// 干支（柱），序號 `0..60`，甲子為 0。
///
/// # 用例
///
/// ```
/// use nongli::chinese::Pillar;
///
/// let p: Pillar = "辛丑".parse().unwrap();
/// assert_eq!(37, p.index());
/// assert_eq!("壬寅", p.plus(1).name());
/// assert_eq!(p, p.plus(60));
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Pillar(u8);

impl Stem {
    pub const JIA: Stem = Stem(0);

    /// 依序號取天干，序號按 10 取模。
    pub fn from_index(index: i64) -> Self {
        Self(index.rem_euclid(10) as u8)
    }
    pub fn index(&self) -> u8 {
        self.0
    }
    pub fn plus(self, n: i64) -> Self {
        Self::from_index(self.0 as i64 + n)
    }
    /// 自 `other` 數至 `self` 的步數，`0..10`。
    pub fn minus(self, other: Stem) -> u8 {
        (self.0 + 10 - other.0) % 10
    }
    pub fn name(&self) -> &'static str {
        STEM_NAMES[self.0 as usize]
    }
    /// 五合所屬的組，見 [`StemClass`]。
    pub fn class(&self) -> StemClass {
        use StemClass::*;
        match self.0 % 5 {
            0 => JiaJi,
            1 => YiGeng,
            2 => BingXin,
            3 => DingRen,
            _ => WuGui,
        }
    }
}

impl Branch {
    pub const ZI: Branch = Branch(0);
    pub const YIN: Branch = Branch(2);

    /// 依序號取地支，序號按 12 取模。
    pub fn from_index(index: i64) -> Self {
        Self(index.rem_euclid(12) as u8)
    }
    pub fn index(&self) -> u8 {
        self.0
    }
    pub fn plus(self, n: i64) -> Self {
        Self::from_index(self.0 as i64 + n)
    }
    /// 自 `other` 數至 `self` 的步數，`0..12`。
    pub fn minus(self, other: Branch) -> u8 {
        (self.0 + 12 - other.0) % 12
    }
    pub fn name(&self) -> &'static str {
        BRANCH_NAMES[self.0 as usize]
    }
}

impl Pillar {
    pub const JIA_ZI: Pillar = Pillar(0);

    /// 依序號取干支，序號按 60 取模。
    pub fn from_index(index: i64) -> Self {
        Self(index.rem_euclid(60) as u8)
    }

    /// 由天干、地支組成干支；奇偶不同則無此干支，返回 `None`。
    ///
    /// # 用例
    ///
    /// ```
    /// use nongli::chinese::{Branch, Pillar, Stem};
    ///
    /// assert_eq!(Some(Pillar::JIA_ZI), Pillar::new(Stem::JIA, Branch::ZI));
    /// assert_eq!(None, Pillar::new(Stem::JIA, Branch::from_index(1)));
    /// ```
    pub fn new(stem: Stem, branch: Branch) -> Option<Self> {
        if stem.0 % 2 != branch.0 % 2 {
            return None;
        }
        // 6s - 5b ≡ s (mod 10) 且 ≡ b (mod 12)
        Some(Self::from_index(6 * stem.0 as i64 - 5 * branch.0 as i64))
    }

    pub fn index(&self) -> u8 {
        self.0
    }
    pub fn stem(&self) -> Stem {
        Stem(self.0 % 10)
    }
    pub fn branch(&self) -> Branch {
        Branch(self.0 % 12)
    }
    /// 前進 `n` 步，`n` 可為負。
    pub fn plus(self, n: i64) -> Self {
        Self::from_index(self.0 as i64 + n)
    }
    /// 取得兩字名稱，如「甲子」。
    pub fn name(&self) -> String {
        self.to_string()
    }

    /// 取得公元年（天文紀年，即公元前 1 年為 0）的干支，1864 年為甲子。
    ///
    /// # 用例
    ///
    /// ```
    /// use nongli::chinese::Pillar;
    ///
    /// assert_eq!("庚子", Pillar::of_year(2020).name());
    /// assert_eq!("甲子", Pillar::of_year(-2696).name());
    /// ```
    pub fn of_year(year: i32) -> Self {
        Self::JIA_ZI.plus(year as i64 - 1864)
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.stem().name(), self.branch().name())
    }
}

/// 干支文本無法識別。
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
#[error("not a sexagenary pillar: {0:?}")]
pub struct ParsePillarError(pub String);

impl FromStr for Pillar {
    type Err = ParsePillarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePillarError(s.to_owned());
        let mut chars = s.chars();
        let (Some(c1), Some(c2), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(err());
        };
        let position = |names: &[&str], c: char| {
            names
                .iter()
                .position(|n| n.chars().eq(std::iter::once(c)))
                .ok_or_else(err)
        };
        let stem = Stem(position(STEM_NAMES, c1)? as u8);
        let branch = Branch(position(BRANCH_NAMES, c2)? as u8);
        Self::new(stem, branch).ok_or_else(err)
    }
}

/// 天干五合的五組：甲己、乙庚、丙辛、丁壬、戊癸。
///
/// 年干定正月（寅月）之干，日干定子時之干，皆依此分組查表。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum StemClass {
    JiaJi,
    YiGeng,
    BingXin,
    DingRen,
    WuGui,
}

impl StemClass {
    /// 寅月的月柱（五虎遁）：甲己之年丙寅，乙庚戊寅，丙辛庚寅，丁壬壬寅，戊癸甲寅。
    pub fn yin_month(self) -> Pillar {
        use StemClass::*;
        Pillar(match self {
            JiaJi => 2,    // 丙寅
            YiGeng => 14,  // 戊寅
            BingXin => 26, // 庚寅
            DingRen => 38, // 壬寅
            WuGui => 50,   // 甲寅
        })
    }

    /// 子時的時柱（五鼠遁）：甲己之日甲子，乙庚丙子，丙辛戊子，丁壬庚子，戊癸壬子。
    pub fn zi_hour(self) -> Pillar {
        use StemClass::*;
        Pillar(match self {
            JiaJi => 0,    // 甲子
            YiGeng => 12,  // 丙子
            BingXin => 24, // 戊子
            DingRen => 36, // 庚子
            WuGui => 48,   // 壬子
        })
    }
}
