//! Conversion of civil date-times (Beijing time) into the Chinese lunisolar
//! calendar, with the four sexagenary pillars (year, month, day, hour) and
//! the solar terms bracketing the date.
//!
//! Solar terms and new moons are computed on demand from an ephemeris
//! rather than read from precomputed tables, so any date from 3000 BC to AD
//! 3000 can be converted. The built-in ephemeris reads its coefficients from
//! the directory named by the `EPHE_PATH` environment variable (see
//! [`config`]); the `data/` directory of this crate is one such directory.
//!
//! # Examples
//!
//! Basic usage with [`Date`]:
//!
//! ```
//! use nongli::Date;
//!
//! let date = Date::from_gregorian(2000, 1, 1).unwrap();
//!
//! assert_eq!(6, date.day_of_week()); // Saturday
//! assert_eq!(2451545, date.jdn());
//! ```
//!
//! Chinese lunisolar calendar:
//!
//! ```
//! use nongli::CivilDateTime;
//! use nongli::config::Config;
//! use nongli::ephemeris::SeriesEphemeris;
//!
//! let config = Config::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"));
//! let eph = SeriesEphemeris::open(&config).unwrap();
//!
//! let cal = nongli::convert(&eph, &CivilDateTime::new(2022, 1, 10, 22, 5, 3)).unwrap();
//! assert_eq!("腊月", cal.month_name);
//! assert_eq!("初八", cal.day_name);
//! assert_eq!("癸亥", cal.day_pillar.name());
//! assert_eq!("小寒", cal.jie.name);
//! ```
//!
//! With `EPHE_PATH` set, [`lunar_calendar`] does the same from bare fields.
//!
//! # Logging
//!
//! The crate emits [`tracing`] events (conversion spans at `DEBUG`, solver
//! iterations at `TRACE`, non-convergence at `WARN`) and never installs a
//! subscriber itself.

pub mod chinese;
pub mod config;
pub mod date;
pub mod ephemeris;
pub mod error;
pub mod solver;
pub mod time_scales;

pub use chinese::{LunarCalendar, convert, lunar_calendar};
pub use config::Config;
pub use date::{CalendarSystem, CivilDateTime, Date};
pub use error::{EphemerisError, Error};
