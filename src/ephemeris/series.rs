//! Coefficient tables of the analytical series, and their text format.
//!
//! Both files are whitespace-separated columns, one term per line. Blank
//! lines and lines starting with `#` are skipped.
//!
//! - Earth (VSOP87): `series power amplitude phase frequency`, where
//!   `series` is `L` (longitude) or `R` (radius vector). The term value is
//!   `amplitude * cos(phase + frequency * tau)` in units of 1e-8.
//! - Moon: `D M M' F amplitude`, four integer multipliers of the fundamental
//!   arguments and a sine amplitude in units of 1e-6 degree.

use std::num::{ParseFloatError, ParseIntError};

/// One VSOP87 term.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct VsopTerm {
    pub amplitude: f64,
    pub phase: f64,
    pub frequency: f64,
}

/// VSOP87 series of a planet, grouped by power of time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vsop {
    /// `longitude[p]` holds the terms multiplied by `tau^p`.
    pub longitude: Vec<Vec<VsopTerm>>,
    pub radius: Vec<Vec<VsopTerm>>,
}

impl Vsop {
    /// Total number of terms.
    pub fn len(&self) -> usize {
        self.longitude.iter().chain(&self.radius).map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Heliocentric longitude in radians, `tau` in Julian millennia from
    /// J2000.0.
    pub fn longitude_at(&self, tau: f64) -> f64 {
        evaluate(&self.longitude, tau)
    }

    /// Radius vector in AU.
    pub fn radius_at(&self, tau: f64) -> f64 {
        evaluate(&self.radius, tau)
    }
}

fn evaluate(series: &[Vec<VsopTerm>], tau: f64) -> f64 {
    // Horner over the powers of tau
    series.iter().rev().fold(0.0, |acc, terms| {
        let sum: f64 = terms
            .iter()
            .map(|t| t.amplitude * (t.phase + t.frequency * tau).cos())
            .sum();
        acc * tau + sum
    }) * 1e-8
}

/// One periodic term of the lunar longitude.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LunarTerm {
    /// Multipliers of D, M, M', F.
    pub multipliers: [i8; 4],
    /// Sine amplitude, 1e-6 degree.
    pub amplitude: f64,
}

/// Periodic terms of the lunar longitude.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LunarTerms(pub Vec<LunarTerm>);

impl LunarTerms {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Error in a coefficient file.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("line {line_num}, field {field_num}: {reason}")]
    Field {
        line_num: usize,
        field_num: usize,
        reason: FieldError,
    },
    #[error("no {0} terms")]
    Empty(&'static str),
}

impl ParseError {
    fn field(line_num: usize, field_num: usize, reason: FieldError) -> Self {
        Self::Field {
            line_num,
            field_num,
            reason,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    #[error("invalid integer ({0})")]
    InvalidInt(ParseIntError),
    #[error("invalid number ({0})")]
    InvalidFloat(ParseFloatError),
    #[error("not a finite number")]
    NotFinite,
    #[error("missing field")]
    MissingField,
    #[error("unexpected extra field")]
    ExtraField,
    #[error("unknown series {0:?}")]
    UnknownSeries(String),
    #[error("power {0} is too high")]
    PowerTooHigh(u32),
}

const MAX_POWER: u32 = 5;

/// Lines worth parsing, with their 1-based numbers.
fn content_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    (1usize..)
        .zip(text.lines())
        .map(|(n, line)| (n, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

/// Parses the Earth's VSOP87 table.
///
/// # Example
///
/// ```
/// use nongli::ephemeris::series::parse_vsop;
///
/// let vsop = parse_vsop("L 0 100000000 0 0\nR 0 100000000 0 0\n").unwrap();
/// assert!((vsop.radius_at(0.3) - 1.0).abs() < 1e-12);
/// ```
pub fn parse_vsop(text: &str) -> Result<Vsop, ParseError> {
    let mut vsop = Vsop::default();
    for (line_num, line) in content_lines(text) {
        let mut it = line.split_whitespace();
        let series = match it.next() {
            Some("L") => &mut vsop.longitude,
            Some("R") => &mut vsop.radius,
            Some(other) => {
                return Err(ParseError::field(
                    line_num,
                    1,
                    FieldError::UnknownSeries(other.to_owned()),
                ));
            }
            None => continue,
        };
        let power: u32 = require_next(&mut it, line_num, 2)?
            .parse()
            .map_err(|e| ParseError::field(line_num, 2, FieldError::InvalidInt(e)))?;
        if power > MAX_POWER {
            return Err(ParseError::field(line_num, 2, FieldError::PowerTooHigh(power)));
        }
        let term = VsopTerm {
            amplitude: require_next_f64(&mut it, line_num, 3)?,
            phase: require_next_f64(&mut it, line_num, 4)?,
            frequency: require_next_f64(&mut it, line_num, 5)?,
        };
        require_end(&mut it, line_num, 6)?;

        let power = power as usize;
        if series.len() <= power {
            series.resize_with(power + 1, Vec::new);
        }
        series[power].push(term);
    }
    if vsop.longitude.iter().all(Vec::is_empty) {
        return Err(ParseError::Empty("longitude"));
    }
    if vsop.radius.iter().all(Vec::is_empty) {
        return Err(ParseError::Empty("radius"));
    }
    Ok(vsop)
}

/// Parses the table of lunar longitude terms.
pub fn parse_lunar(text: &str) -> Result<LunarTerms, ParseError> {
    let mut terms = Vec::new();
    for (line_num, line) in content_lines(text) {
        let mut it = line.split_whitespace();
        let mut multipliers = [0i8; 4];
        for (i, m) in multipliers.iter_mut().enumerate() {
            *m = require_next(&mut it, line_num, i + 1)?
                .parse()
                .map_err(|e| ParseError::field(line_num, i + 1, FieldError::InvalidInt(e)))?;
        }
        let amplitude = require_next_f64(&mut it, line_num, 5)?;
        require_end(&mut it, line_num, 6)?;
        terms.push(LunarTerm {
            multipliers,
            amplitude,
        });
    }
    if terms.is_empty() {
        return Err(ParseError::Empty("lunar"));
    }
    Ok(LunarTerms(terms))
}

fn require_next<'a, I: Iterator<Item = &'a str>>(
    it: &mut I,
    line_num: usize,
    field_num: usize,
) -> Result<&'a str, ParseError> {
    it.next()
        .ok_or_else(|| ParseError::field(line_num, field_num, FieldError::MissingField))
}

fn require_next_f64<'a, I: Iterator<Item = &'a str>>(
    it: &mut I,
    line_num: usize,
    field_num: usize,
) -> Result<f64, ParseError> {
    let v: f64 = require_next(it, line_num, field_num)?
        .parse()
        .map_err(|e| ParseError::field(line_num, field_num, FieldError::InvalidFloat(e)))?;
    if !v.is_finite() {
        return Err(ParseError::field(line_num, field_num, FieldError::NotFinite));
    }
    Ok(v)
}

fn require_end<'a, I: Iterator<Item = &'a str>>(
    it: &mut I,
    line_num: usize,
    field_num: usize,
) -> Result<(), ParseError> {
    match it.next() {
        None => Ok(()),
        Some(_) => Err(ParseError::field(line_num, field_num, FieldError::ExtraField)),
    }
}
