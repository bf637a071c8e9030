use tracing::{debug, trace};

use crate::error::{Error, SolverStage};

/// Default system constant, constraining the change in volatility over
/// time. Reasonable choices are between `0.3` and `1.2`.
pub const DEFAULT_TAU: f64 = 0.5;

/// Default width of the bracket at which the volatility iteration stops.
pub const DEFAULT_CONVERGENCE_TOLERANCE: f64 = 0.000_001;

/// Default cap on iterations of both the bracket search and the regula
/// falsi.
pub const DEFAULT_MAX_ITERATIONS: u32 = 1000;

/// Finds the new volatility of a player after a rating period, using the
/// Illinois variant of regula falsi on `x = ln(sigma'^2)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct VolatilityEstimator {
    tau: f64,
    tolerance: f64,
    max_iterations: u32,
}

impl Default for VolatilityEstimator {
    fn default() -> VolatilityEstimator {
        VolatilityEstimator::new(
            DEFAULT_TAU,
            DEFAULT_CONVERGENCE_TOLERANCE,
            DEFAULT_MAX_ITERATIONS,
        )
    }
}

impl VolatilityEstimator {
    pub fn new(tau: f64, tolerance: f64, max_iterations: u32) -> VolatilityEstimator {
        assert!(tau.is_finite() && tau > 0.0);
        assert!(tolerance.is_finite() && tolerance > 0.0);
        assert!(max_iterations > 0);
        VolatilityEstimator {
            tau,
            tolerance,
            max_iterations,
        }
    }

    pub fn tau(&self) -> f64 {
        self.tau
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// New volatility for a player with deviation `phi` and volatility
    /// `sigma`, given the `variance` and `delta` aggregated over the games
    /// of the rating period. All values on the internal scale.
    pub fn estimate(&self, phi: f64, sigma: f64, variance: f64, delta: f64) -> Result<f64, Error> {
        let ln_sigma_sq = (sigma * sigma).ln();
        let phi_sq = phi * phi;
        let delta_sq = delta * delta;
        let tau_sq = self.tau * self.tau;

        let f = |x: f64| {
            let ex = x.exp();
            let denom = phi_sq + variance + ex;
            ex * (delta_sq - phi_sq - variance - ex) / (2.0 * denom * denom)
                - (x - ln_sigma_sq) / tau_sq
        };

        let mut a = ln_sigma_sq;
        let mut f_a = f(a);
        let mut b = if delta_sq > phi_sq + variance {
            (delta_sq - phi_sq - variance).ln()
        } else {
            self.step_down(ln_sigma_sq, &f)?
        };
        let mut f_b = f(b);

        if f_a * f_b > 0.0 {
            b = self.step_down(ln_sigma_sq, &f)?;
            f_b = f(b);
        }
        // Also false if either side is NaN.
        let bracketed = f_a * f_b <= 0.0;
        if !bracketed {
            debug!(a, b, f_a, f_b, "volatility root not bracketed");
            return Err(Error::NonConvergence {
                stage: SolverStage::Bracket,
                iterations: self.max_iterations,
            });
        }

        let mut iterations = 0;
        while (b - a).abs() > self.tolerance {
            if iterations == self.max_iterations {
                debug!(iterations, a, b, "volatility regula falsi did not converge");
                return Err(Error::NonConvergence {
                    stage: SolverStage::RegulaFalsi,
                    iterations,
                });
            }
            iterations += 1;

            let c = a + (a - b) * f_a / (f_b - f_a);
            if !c.is_finite() {
                debug!(iterations, a, b, f_a, f_b, "volatility regula falsi diverged");
                return Err(Error::NonConvergence {
                    stage: SolverStage::RegulaFalsi,
                    iterations,
                });
            }
            let f_c = f(c);

            if f_c * f_b <= 0.0 {
                a = b;
                f_a = f_b;
            } else {
                f_a /= 2.0;
            }
            b = c;
            f_b = f_c;

            trace!(iterations, a, b, "volatility iteration");
        }

        Ok((a / 2.0).exp())
    }

    /// Steps down from `start` in multiples of tau until `f` is no longer
    /// negative.
    fn step_down<F>(&self, start: f64, f: F) -> Result<f64, Error>
    where
        F: Fn(f64) -> f64,
    {
        for k in 1..=self.max_iterations {
            let candidate = start - f64::from(k) * self.tau;
            if f(candidate) >= 0.0 {
                return Ok(candidate);
            }
        }
        debug!(start, tau = self.tau, "volatility bracket search exhausted");
        Err(Error::NonConvergence {
            stage: SolverStage::Bracket,
            iterations: self.max_iterations,
        })
    }
}
