//! Root finding over functions of time, and normalization of angles.

use tracing::{trace, warn};

use crate::error::Error;

/// Maps an angle in degrees onto `(-180, 180]`.
///
/// Signed angular distances must pass through here before root finding, so
/// that 359° against a 1° target reads as −2° rather than 358°.
///
/// ```
/// use nongli::solver::normalize_180;
///
/// assert_eq!(-174.0, normalize_180(186.0));
/// assert_eq!(180.0, normalize_180(-180.0));
/// assert_eq!(-2.0, normalize_180(359.0 - 1.0 - 360.0));
/// ```
pub fn normalize_180(angle: f64) -> f64 {
    let r = angle.rem_euclid(360.0);
    if r > 180.0 { r - 360.0 } else { r }
}

/// Maps an angle in degrees onto `[0, 360)`.
pub fn normalize_360(angle: f64) -> f64 {
    let r = angle.rem_euclid(360.0);
    // rem_euclid may round up to the modulus for tiny negative inputs
    if r >= 360.0 { 0.0 } else { r }
}

/// Newton-Raphson iteration with a forward-difference derivative.
///
/// Iteration stops once a step moves the estimate by no more than
/// `tolerance`; the estimate *before* that step is returned.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Newton {
    /// Increment used to estimate the derivative.
    pub step: f64,
    /// Largest step size accepted as converged.
    pub tolerance: f64,
    /// Iterations allowed before giving up with [`Error::DidNotConverge`].
    pub max_iterations: usize,
}

impl Default for Newton {
    fn default() -> Self {
        Self {
            step: 5e-6,
            tolerance: 1e-7,
            max_iterations: 1000,
        }
    }
}

impl Newton {
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Finds a root of `f` near `guess`.
    ///
    /// Any error from `f` aborts the iteration and is returned as is.
    ///
    /// # Example
    ///
    /// ```
    /// use nongli::solver::Newton;
    ///
    /// let root = Newton::default()
    ///     .solve(0.0, |x| Ok::<_, nongli::Error>(x * x + x - 1.0))
    ///     .unwrap();
    /// assert!((root - (5f64.sqrt() - 1.0) / 2.0).abs() < 1e-7);
    /// ```
    pub fn solve<F, E>(&self, guess: f64, mut f: F) -> Result<f64, Error>
    where
        F: FnMut(f64) -> Result<f64, E>,
        E: Into<Error>,
    {
        let mut x = guess;
        for iteration in 1..=self.max_iterations {
            let fx = f(x).map_err(Into::into)?;
            let fx_step = f(x + self.step).map_err(Into::into)?;
            let derivative = (fx_step - fx) / self.step;
            let next = x - fx / derivative;
            if (next - x).abs() <= self.tolerance {
                trace!(guess, root = x, iteration, "newton converged");
                return Ok(x);
            }
            if !next.is_finite() {
                warn!(guess, x, iteration, "newton step left the finite range");
                return Err(Error::DidNotConverge {
                    guess,
                    iterations: iteration,
                });
            }
            x = next;
        }
        warn!(guess, x, iterations = self.max_iterations, "newton did not converge");
        Err(Error::DidNotConverge {
            guess,
            iterations: self.max_iterations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EphemerisError;
    use approx::assert_abs_diff_eq;

    #[test]
    fn normalize_180_range() {
        for (expected, angle) in [
            (186.1 - 360.0, 186.1),
            (-186.1 + 360.0, -186.1),
            (186.0 - 360.0, 186.0 + 720.0),
            (-186.0 + 360.0, -186.0 - 720.0),
            (180.0, 180.0),
            (180.0, -180.0),
            (0.0, 360.0),
        ] {
            assert_abs_diff_eq!(expected, normalize_180(angle), epsilon = 1.0 / 3600.0);
        }
    }

    #[test]
    fn normalize_180_idempotent() {
        let mut angle = -1000.0;
        while angle < 1000.0 {
            let once = normalize_180(angle);
            assert!(once > -180.0 && once <= 180.0, "{angle} -> {once}");
            assert_abs_diff_eq!(once, normalize_180(once), epsilon = 1e-9);
            angle += 7.3;
        }
    }

    #[test]
    fn normalize_360_range() {
        assert_eq!(105.0, normalize_360(-255.0));
        assert_eq!(0.0, normalize_360(720.0));
        assert_eq!(0.0, normalize_360(-1e-20));
        assert_abs_diff_eq!(35.0, normalize_360(290.0 - 255.0), epsilon = 1e-12);
    }

    #[test]
    fn quadratic_root() {
        let root = Newton::default()
            .solve(0.0, |x| Ok::<_, Error>(x * x + x - 1.0))
            .unwrap();
        assert_abs_diff_eq!((5f64.sqrt() - 1.0) / 2.0, root, epsilon = 1e-7);
    }

    #[test]
    fn periodic_root() {
        // a body moving 1°/day, crossing 15° on day 15 from a 300° start
        let target = 15.0;
        let root = Newton::default()
            .solve(10.0, |t| {
                Ok::<_, Error>(normalize_180(normalize_360(300.0 + t) - target))
            })
            .unwrap();
        assert_abs_diff_eq!(75.0, root, epsilon = 1e-6);
    }

    #[test]
    fn returns_iterate_before_last_step() {
        // linear function: the first step lands exactly on the root, the
        // second is below tolerance, so the second iterate is returned
        let mut calls = Vec::new();
        let root = Newton::default()
            .solve(10.0, |x| {
                calls.push(x);
                Ok::<_, Error>(2.0 * (x - 3.0))
            })
            .unwrap();
        assert_abs_diff_eq!(3.0, root, epsilon = 1e-7);
        assert_eq!(4, calls.len());
    }

    #[test]
    fn error_short_circuits() {
        let mut calls = 0;
        let result = Newton::default().solve(0.0, |_| {
            calls += 1;
            Err::<f64, _>(EphemerisError::new("no data"))
        });
        assert_eq!(
            Err(Error::Computation(EphemerisError::new("no data"))),
            result
        );
        assert_eq!(1, calls);
    }

    #[test]
    fn oscillation_hits_iteration_cap() {
        // Newton on x^(1/3) diverges from any non-zero guess
        let result = Newton::default()
            .with_max_iterations(50)
            .solve(1.0, |x: f64| Ok::<_, Error>(x.cbrt()));
        assert!(matches!(
            result,
            Err(Error::DidNotConverge { guess, .. }) if guess == 1.0
        ));
    }

    #[test]
    fn flat_function_does_not_converge() {
        let result = Newton::default().solve(1.0, |_| Ok::<_, Error>(1.0));
        assert!(matches!(
            result,
            Err(Error::DidNotConverge { iterations: 1, .. })
        ));
    }
}
