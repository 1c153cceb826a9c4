//! Ephemeris providers: apparent geocentric ecliptic longitudes of the Sun
//! and the Moon at a given instant.
//!
//! The calendar computations only ever ask two questions, so a provider is
//! anything that implements [`Ephemeris`]. Queries go through a short-lived
//! [`EphemerisSession`], opened right before an elementary query and dropped
//! right after, so that providers backed by a scoped native handle can
//! acquire and release it per query.
//!
//! [`SeriesEphemeris`] is the built-in provider. It evaluates truncated
//! VSOP87 (Sun) and ELP-2000/82 (Moon) series whose coefficients are read
//! from the directory named by [`Config`].

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::Config;
use crate::error::{EphemerisError, Error};
use crate::solver::normalize_360;
use crate::time_scales::{Tt, Ut};

pub mod moon;
pub mod series;
pub mod sun;

use series::{LunarTerms, Vsop};

/// File holding the VSOP87 series of the Earth.
pub const EARTH_FILE: &str = "vsop87_earth.txt";
/// File holding the periodic terms of the lunar longitude.
pub const MOON_FILE: &str = "elp_moon.txt";

/// A source of solar and lunar positions.
///
/// Instants are Julian days in UT. Longitudes are in degrees, apparent,
/// referred to the true equinox of date, and lie in `[0, 360)`.
pub trait Ephemeris {
    /// Handle through which queries are answered.
    type Session<'a>: EphemerisSession
    where
        Self: 'a;

    /// Acquires a session for one elementary query.
    fn session(&self) -> Result<Self::Session<'_>, EphemerisError>;

    /// Apparent longitude of the Sun, in a session of its own.
    fn solar_longitude(&self, jd_ut: f64) -> Result<f64, EphemerisError> {
        self.session()?.solar_longitude(jd_ut)
    }

    /// Longitude of the Moon minus that of the Sun, in `[0, 360)`.
    ///
    /// Both bodies are queried in the same session.
    fn elongation(&self, jd_ut: f64) -> Result<f64, EphemerisError> {
        let mut session = self.session()?;
        let sun = session.solar_longitude(jd_ut)?;
        let moon = session.lunar_longitude(jd_ut)?;
        Ok(normalize_360(moon - sun))
    }
}

/// An open session of an [`Ephemeris`].
pub trait EphemerisSession {
    fn solar_longitude(&mut self, jd_ut: f64) -> Result<f64, EphemerisError>;
    fn lunar_longitude(&mut self, jd_ut: f64) -> Result<f64, EphemerisError>;
}

/// Built-in provider evaluating analytical series.
///
/// Supports instants from -3001-01-01 (Julian calendar, astronomical year
/// numbering) to 3002-01-01 (Gregorian), enough to convert any date in years
/// -3000 to 3000. Accuracy is in the order of seconds of arc near the
/// present, which puts solar terms and new moons within a minute or so.
///
/// # Example
///
/// ```
/// use nongli::config::Config;
/// use nongli::ephemeris::{Ephemeris, SeriesEphemeris};
///
/// let config = Config::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"));
/// let eph = SeriesEphemeris::open(&config).unwrap();
///
/// // June solstice 2020: 2020-06-20T21:43Z
/// let lon = eph.solar_longitude(2459021.405).unwrap();
/// assert!((lon - 90.0).abs() < 0.01);
/// ```
#[derive(Debug, Clone)]
pub struct SeriesEphemeris {
    earth: Vsop,
    moon: LunarTerms,
}

/// First instant accepted by [`SeriesEphemeris`], JD(UT).
pub const JD_MIN: f64 = 624_942.5;
/// End of the range accepted by [`SeriesEphemeris`], JD(UT), exclusive.
pub const JD_MAX: f64 = 2_817_517.5;

impl SeriesEphemeris {
    /// Loads the series from the data directory in `config`.
    ///
    /// Fails with [`Error::Configuration`] if a data file is missing or
    /// malformed.
    pub fn open(config: &Config) -> Result<Self, Error> {
        let earth = load(&config.data_file(EARTH_FILE), series::parse_vsop)?;
        let moon = load(&config.data_file(MOON_FILE), series::parse_lunar)?;
        debug!(
            path = %config.ephe_path.display(),
            earth_terms = earth.len(),
            moon_terms = moon.len(),
            "ephemeris loaded"
        );
        Ok(Self { earth, moon })
    }

    /// Builds a provider from already parsed series.
    pub fn from_series(earth: Vsop, moon: LunarTerms) -> Self {
        Self { earth, moon }
    }

    fn tt(jd_ut: f64) -> Result<Tt, EphemerisError> {
        if !jd_ut.is_finite() {
            return Err(EphemerisError::new(format!("time {jd_ut} is not finite")));
        }
        if !(JD_MIN..JD_MAX).contains(&jd_ut) {
            return Err(EphemerisError::new(format!(
                "JD {jd_ut} outside supported range {JD_MIN}..{JD_MAX}"
            )));
        }
        Ok(Tt::from(Ut(jd_ut)))
    }
}

fn load<T>(path: &Path, parse: fn(&str) -> Result<T, series::ParseError>) -> Result<T, Error> {
    let text = fs::read_to_string(path)
        .map_err(|e| Error::Configuration(format!("cannot read {}: {e}", path.display())))?;
    parse(&text).map_err(|e| Error::Configuration(format!("{}: {e}", path.display())))
}

impl Ephemeris for SeriesEphemeris {
    type Session<'a> = SeriesSession<'a>;

    fn session(&self) -> Result<SeriesSession<'_>, EphemerisError> {
        Ok(SeriesSession { ephemeris: self })
    }
}

/// Session of a [`SeriesEphemeris`]. Holds nothing but a borrow.
#[derive(Debug)]
pub struct SeriesSession<'a> {
    ephemeris: &'a SeriesEphemeris,
}

impl EphemerisSession for SeriesSession<'_> {
    fn solar_longitude(&mut self, jd_ut: f64) -> Result<f64, EphemerisError> {
        let tt = SeriesEphemeris::tt(jd_ut)?;
        Ok(sun::apparent_longitude(&self.ephemeris.earth, tt))
    }

    fn lunar_longitude(&mut self, jd_ut: f64) -> Result<f64, EphemerisError> {
        let tt = SeriesEphemeris::tt(jd_ut)?;
        Ok(moon::apparent_longitude(&self.ephemeris.moon, tt))
    }
}
