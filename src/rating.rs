use std::ops::{Add, Div, Sub};

use crate::score::Outcome;

/// Number representing playing strength, such that the difference between two
/// ratings can be used to predict an expected score. Higher is better.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RatingScalar(pub f64);

impl From<RatingScalar> for f64 {
    #[inline]
    fn from(RatingScalar(rating): RatingScalar) -> f64 {
        rating
    }
}

impl Sub<RatingScalar> for RatingScalar {
    type Output = RatingDifference;

    #[inline]
    fn sub(self, rhs: RatingScalar) -> RatingDifference {
        RatingDifference(self.0 - rhs.0)
    }
}

impl Add<RatingDifference> for RatingScalar {
    type Output = RatingScalar;

    #[inline]
    fn add(self, RatingDifference(difference): RatingDifference) -> RatingScalar {
        RatingScalar(self.0 + difference)
    }
}

/// A difference between two ratings. Rating deviations are expressed as
/// rating differences.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RatingDifference(pub f64);

impl From<RatingDifference> for f64 {
    #[inline]
    fn from(RatingDifference(difference): RatingDifference) -> f64 {
        difference
    }
}

impl Div<f64> for RatingDifference {
    type Output = RatingDifference;

    #[inline]
    fn div(self, scalar: f64) -> RatingDifference {
        RatingDifference(self.0 / scalar)
    }
}

/// Number indicating the degree of expected fluctuation in a rating.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Volatility(pub f64);

impl From<Volatility> for f64 {
    #[inline]
    fn from(Volatility(volatility): Volatility) -> f64 {
        volatility
    }
}

/// A player's rating on the public (Glicko-1) scale.
///
/// Ratings are plain values. Updating a rating produces a new one, see
/// [`RatingSystem::calculate_new_rating()`](crate::RatingSystem::calculate_new_rating).
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rating {
    /// Number indicating playing strength. Higher is better. The difference
    /// between two ratings determines the expected score in a game between
    /// the two players.
    pub rating: RatingScalar,
    /// Uncertainty in the rating. A range from rating minus twice the deviation
    /// to rating plus twice the deviation approximately represents a 95%
    /// confidence interval.
    pub deviation: RatingDifference,
    /// Number indicating the degree of expected fluctuation in the rating.
    pub volatility: Volatility,
}

impl Rating {
    pub fn new(rating: f64, deviation: f64, volatility: f64) -> Rating {
        Rating {
            rating: RatingScalar(rating),
            deviation: RatingDifference(deviation),
            volatility: Volatility(volatility),
        }
    }
}

/// A completed game against an opponent, as seen by the player being rated.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Game {
    /// Opponent's rating at the start of the rating period.
    pub opponent: Rating,
    pub outcome: Outcome,
}

impl Game {
    pub fn new(opponent: Rating, outcome: Outcome) -> Game {
        Game { opponent, outcome }
    }

    pub fn win(opponent: Rating) -> Game {
        Game::new(opponent, Outcome::Win)
    }

    pub fn loss(opponent: Rating) -> Game {
        Game::new(opponent, Outcome::Loss)
    }

    pub fn draw(opponent: Rating) -> Game {
        Game::new(opponent, Outcome::Draw)
    }
}
