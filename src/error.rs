//! Error types.

/// Failure reported by an [`Ephemeris`](crate::ephemeris::Ephemeris)
/// provider while answering a single query.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("ephemeris query failed: {message}")]
pub struct EphemerisError {
    /// Provider-supplied description.
    pub message: String,
}

impl EphemerisError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error type for all fallible operations in this crate.
///
/// Conversions are all-or-nothing: any of these aborts the whole call and no
/// partial result is produced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A required resource (the ephemeris data directory or one of its
    /// files) is missing or unusable. Reported before any computation.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The civil date-time does not exist.
    #[error(
        "invalid date-time {year}-{month}-{day} {hour}:{minute}:{second}: {reason}"
    )]
    InvalidDateTime {
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        reason: &'static str,
    },

    /// An ephemeris query failed.
    #[error(transparent)]
    Computation(#[from] EphemerisError),

    /// Newton iteration hit its iteration cap without the step size dropping
    /// below tolerance.
    #[error("root finding from {guess} did not converge after {iterations} iterations")]
    DidNotConverge {
        /// Initial guess, in Julian days.
        guess: f64,
        /// Number of iterations performed.
        iterations: usize,
    },
}
