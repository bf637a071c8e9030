use tracing::debug;

use crate::{
    error::{Error, InvalidConfig, Role},
    internal_rating::{
        InternalRating, ScaleConverter, INTERNAL_RATING_CENTER, INTERNAL_RATING_SCALE,
    },
    pairwise::{aggregate, expectation},
    rating::{Game, Rating},
    score::Score,
    volatility::{
        VolatilityEstimator, DEFAULT_CONVERGENCE_TOLERANCE, DEFAULT_MAX_ITERATIONS, DEFAULT_TAU,
    },
};

/// Parameters for a [`RatingSystem`].
///
/// With the `serde` feature, the builder can be deserialized from a config
/// where every field is optional. Deserialization fails with
/// [`InvalidConfig`] for values the setters would reject.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawRatingSystemBuilder"))]
pub struct RatingSystemBuilder {
    default_rating: f64,
    default_deviation: f64,
    default_volatility: f64,

    tau: f64,

    rating_scale: f64,
    rating_center: f64,

    convergence_tolerance: f64,
    max_iterations: u32,
}

impl Default for RatingSystemBuilder {
    fn default() -> RatingSystemBuilder {
        RatingSystemBuilder::new()
    }
}

impl RatingSystemBuilder {
    pub fn new() -> RatingSystemBuilder {
        RatingSystemBuilder {
            default_rating: 1500.0,
            default_deviation: 350.0,
            default_volatility: 0.06,

            tau: DEFAULT_TAU,

            rating_scale: INTERNAL_RATING_SCALE,
            rating_center: INTERNAL_RATING_CENTER,

            convergence_tolerance: DEFAULT_CONVERGENCE_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    pub fn default_rating(&mut self, default_rating: f64) -> &mut Self {
        assert!(default_rating.is_finite());
        self.default_rating = default_rating;
        self
    }

    pub fn default_deviation(&mut self, default_deviation: f64) -> &mut Self {
        assert!(default_deviation > 0.0);
        self.default_deviation = default_deviation;
        self
    }

    pub fn default_volatility(&mut self, default_volatility: f64) -> &mut Self {
        assert!(default_volatility > 0.0);
        self.default_volatility = default_volatility;
        self
    }

    pub fn tau(&mut self, tau: f64) -> &mut Self {
        assert!(tau > 0.0);
        self.tau = tau;
        self
    }

    pub fn rating_scale(&mut self, rating_scale: f64) -> &mut Self {
        assert!(rating_scale > 0.0);
        self.rating_scale = rating_scale;
        self
    }

    pub fn rating_center(&mut self, rating_center: f64) -> &mut Self {
        assert!(rating_center.is_finite());
        self.rating_center = rating_center;
        self
    }

    pub fn convergence_tolerance(&mut self, convergence_tolerance: f64) -> &mut Self {
        assert!(convergence_tolerance > 0.0);
        self.convergence_tolerance = convergence_tolerance;
        self
    }

    pub fn max_iterations(&mut self, max_iterations: u32) -> &mut Self {
        assert!(max_iterations > 0);
        self.max_iterations = max_iterations;
        self
    }

    /// Checks all parameters at once.
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        let positive = |value: f64| value.is_finite() && value > 0.0;

        if !self.default_rating.is_finite() {
            return Err(InvalidConfig("default_rating must be finite"));
        }
        if !positive(self.default_deviation) {
            return Err(InvalidConfig("default_deviation must be positive"));
        }
        if !positive(self.default_volatility) {
            return Err(InvalidConfig("default_volatility must be positive"));
        }
        if !positive(self.tau) {
            return Err(InvalidConfig("tau must be positive"));
        }
        if !positive(self.rating_scale) {
            return Err(InvalidConfig("rating_scale must be positive"));
        }
        if !self.rating_center.is_finite() {
            return Err(InvalidConfig("rating_center must be finite"));
        }
        if !positive(self.convergence_tolerance) {
            return Err(InvalidConfig("convergence_tolerance must be positive"));
        }
        if self.max_iterations == 0 {
            return Err(InvalidConfig("max_iterations must be positive"));
        }
        Ok(())
    }

    /// # Panics
    ///
    /// Panics if [`validate()`](RatingSystemBuilder::validate) fails, for
    /// example after setting an infinite default deviation.
    pub fn build(&self) -> RatingSystem {
        if let Err(err) = self.validate() {
            panic!("{err}");
        }

        RatingSystem {
            default_rating: Rating::new(
                self.default_rating,
                self.default_deviation,
                self.default_volatility,
            ),
            converter: ScaleConverter::new(self.rating_scale, self.rating_center),
            estimator: VolatilityEstimator::new(
                self.tau,
                self.convergence_tolerance,
                self.max_iterations,
            ),
        }
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawRatingSystemBuilder {
    default_rating: f64,
    default_deviation: f64,
    default_volatility: f64,
    tau: f64,
    rating_scale: f64,
    rating_center: f64,
    convergence_tolerance: f64,
    max_iterations: u32,
}

#[cfg(feature = "serde")]
impl Default for RawRatingSystemBuilder {
    fn default() -> RawRatingSystemBuilder {
        let defaults = RatingSystemBuilder::new();
        RawRatingSystemBuilder {
            default_rating: defaults.default_rating,
            default_deviation: defaults.default_deviation,
            default_volatility: defaults.default_volatility,
            tau: defaults.tau,
            rating_scale: defaults.rating_scale,
            rating_center: defaults.rating_center,
            convergence_tolerance: defaults.convergence_tolerance,
            max_iterations: defaults.max_iterations,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<RawRatingSystemBuilder> for RatingSystemBuilder {
    type Error = InvalidConfig;

    fn try_from(raw: RawRatingSystemBuilder) -> Result<RatingSystemBuilder, InvalidConfig> {
        let builder = RatingSystemBuilder {
            default_rating: raw.default_rating,
            default_deviation: raw.default_deviation,
            default_volatility: raw.default_volatility,
            tau: raw.tau,
            rating_scale: raw.rating_scale,
            rating_center: raw.rating_center,
            convergence_tolerance: raw.convergence_tolerance,
            max_iterations: raw.max_iterations,
        };
        builder.validate()?;
        Ok(builder)
    }
}

/// Glicko-2 rating system with fixed parameters.
///
/// Computes a single player's rating after a rating period from the games
/// played in that period. Each call is independent, so ratings of different
/// players can be updated in parallel.
#[derive(Debug, Clone)]
pub struct RatingSystem {
    default_rating: Rating,
    converter: ScaleConverter,
    estimator: VolatilityEstimator,
}

impl Default for RatingSystem {
    fn default() -> RatingSystem {
        RatingSystem::new()
    }
}

impl RatingSystem {
    pub fn builder() -> RatingSystemBuilder {
        RatingSystemBuilder::default()
    }

    pub fn new() -> RatingSystem {
        RatingSystem::builder().build()
    }

    /// Rating of a player that has not played any games.
    pub fn new_player_rating(&self) -> Rating {
        self.default_rating
    }

    pub fn scale_converter(&self) -> &ScaleConverter {
        &self.converter
    }

    pub fn volatility_estimator(&self) -> &VolatilityEstimator {
        &self.estimator
    }

    pub fn tau(&self) -> f64 {
        self.estimator.tau()
    }

    /// Expected score of `first` in a game against `second`, taking into
    /// account the uncertainty of the rating of `second`.
    pub fn expected_score(&self, first: &Rating, second: &Rating) -> Result<Score, Error> {
        let first = self.validated(first, Role::Player)?;
        let second = self.validated(second, Role::Opponent(0))?;
        Ok(expectation(first.mu, second.mu, second.phi))
    }

    /// Computes the rating of `player` after a rating period in which the
    /// given `games` were played. The order of games is irrelevant.
    ///
    /// Opponent ratings are taken as they were at the start of the rating
    /// period.
    pub fn calculate_new_rating(&self, player: &Rating, games: &[Game]) -> Result<Rating, Error> {
        let internal = self.validated(player, Role::Player)?;

        if games.is_empty() {
            let inflated = InternalRating {
                phi: internal.pre_period_phi(internal.sigma),
                ..internal
            };
            debug!(rating = f64::from(player.rating), "no games in rating period");
            return Ok(Rating {
                deviation: self.converter.to_natural(&inflated).deviation,
                ..*player
            });
        }

        let opponents = games
            .iter()
            .enumerate()
            .map(|(index, game)| {
                self.validated(&game.opponent, Role::Opponent(index))
                    .map(|opponent| (opponent, game.outcome.score()))
            })
            .collect::<Result<Vec<_>, Error>>()?;

        let aggregate = aggregate(internal.mu, opponents)?;

        let sigma = self.estimator.estimate(
            internal.phi,
            internal.sigma,
            aggregate.variance,
            aggregate.delta(),
        )?;

        let phi_star = internal.pre_period_phi(sigma);
        let phi = 1.0 / (1.0 / (phi_star * phi_star) + 1.0 / aggregate.variance).sqrt();
        let mu = internal.mu + phi * phi * aggregate.improvement;

        let updated = self.converter.to_natural(&InternalRating { mu, phi, sigma });

        debug!(
            games = games.len(),
            rating = f64::from(updated.rating),
            deviation = f64::from(updated.deviation),
            volatility = f64::from(updated.volatility),
            "rating period applied"
        );

        Ok(updated)
    }

    fn validated(&self, rating: &Rating, role: Role) -> Result<InternalRating, Error> {
        let invalid = |reason: &'static str| Err(Error::InvalidInput { role, reason });

        if !f64::from(rating.rating).is_finite() {
            return invalid("rating is not finite");
        }
        if !f64::from(rating.deviation).is_finite() {
            return invalid("deviation is not finite");
        }
        if f64::from(rating.deviation) <= 0.0 {
            return invalid("deviation must be positive");
        }
        if !f64::from(rating.volatility).is_finite() {
            return invalid("volatility is not finite");
        }
        if f64::from(rating.volatility) <= 0.0 {
            return invalid("volatility must be positive");
        }

        let internal = self.converter.to_internal(rating);
        // Squares feed into reciprocals and logarithms.
        if !internal.is_finite()
            || !(internal.phi * internal.phi).is_normal()
            || !(internal.sigma * internal.sigma).is_normal()
        {
            return invalid("rating is out of range for the internal scale");
        }
        Ok(internal)
    }
}
