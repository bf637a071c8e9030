//! Per-opponent quantities on the internal scale, and their aggregation over
//! a rating period.

use std::f64::consts::PI;

use crate::{error::Error, internal_rating::InternalRating, score::Score};

/// Weight of a comparison against an opponent with deviation `phi`.
///
/// `1.0` for a perfectly known opponent, shrinking towards `0.0` as the
/// opponent's rating becomes less certain.
#[inline]
pub fn g(phi: f64) -> f64 {
    1.0 / (1.0 + 3.0 * phi * phi / (PI * PI)).sqrt()
}

/// Expected score of a player with rating `mu` against an opponent with
/// rating `mu_opponent` and deviation `phi_opponent`.
#[inline]
pub fn expectation(mu: f64, mu_opponent: f64, phi_opponent: f64) -> Score {
    Score(1.0 / (1.0 + (-g(phi_opponent) * (mu - mu_opponent)).exp()))
}

/// Sums over all games of a rating period.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct Aggregate {
    /// Estimated variance of the player's rating based only on game
    /// outcomes.
    pub variance: f64,
    /// Sum of `g * (score - expectation)` over all games.
    pub improvement: f64,
}

impl Aggregate {
    /// Estimated rating change based only on game outcomes.
    pub fn delta(&self) -> f64 {
        self.variance * self.improvement
    }
}

/// Aggregates the games of a rating period for a player with rating `mu`.
///
/// An empty period has no variance, so callers must handle it before
/// getting here.
pub(crate) fn aggregate<I>(mu: f64, games: I) -> Result<Aggregate, Error>
where
    I: IntoIterator<Item = (InternalRating, Score)>,
{
    let mut information = 0.0;
    let mut improvement = 0.0;
    let mut num_games = 0usize;

    for (opponent, score) in games {
        let g = g(opponent.phi);
        let expected = expectation(mu, opponent.mu, opponent.phi);
        information += g * g * expected.value() * expected.opposite().value();
        improvement += g * (score - expected);
        num_games += 1;
    }

    if num_games == 0 || information <= 0.0 {
        return Err(Error::DegenerateAggregation);
    }

    Ok(Aggregate {
        variance: information.recip(),
        improvement,
    })
}
