//! Glicko-2 rating updates for one player and one rating period.
//!
//! A [`Rating`] is updated from the [`Game`]s played during a rating period,
//! following [Glickman's description of the algorithm](http://www.glicko.net/glicko/glicko2.pdf).
//!
//! ```
//! use glicko2_period::{calculate_new_rating, Game, Rating};
//!
//! let player = Rating::new(1500.0, 200.0, 0.06);
//! let games = [
//!     Game::win(Rating::new(1400.0, 30.0, 0.06)),
//!     Game::loss(Rating::new(1550.0, 100.0, 0.06)),
//!     Game::loss(Rating::new(1700.0, 300.0, 0.06)),
//! ];
//!
//! let updated = calculate_new_rating(&player, &games)?;
//! assert!((f64::from(updated.rating) - 1464.05).abs() < 0.01);
//! # Ok::<_, glicko2_period::Error>(())
//! ```
//!
//! Use [`RatingSystem::builder()`] for parameters other than the standard
//! defaults.

mod error;
mod internal_rating;
pub mod pairwise;
mod rating;
mod rating_system;
mod score;
mod volatility;

pub use error::{Error, InvalidConfig, Role, SolverStage};
pub use internal_rating::{
    InternalRating, ScaleConverter, INTERNAL_RATING_CENTER, INTERNAL_RATING_SCALE,
};
pub use rating::{Game, Rating, RatingDifference, RatingScalar, Volatility};
pub use rating_system::{RatingSystem, RatingSystemBuilder};
pub use score::{Outcome, Score};
pub use volatility::{
    VolatilityEstimator, DEFAULT_CONVERGENCE_TOLERANCE, DEFAULT_MAX_ITERATIONS, DEFAULT_TAU,
};

/// Rating of a player that has not played any games, with the standard
/// defaults.
pub fn new_player_rating() -> Rating {
    RatingSystem::new().new_player_rating()
}

/// Computes the rating of `player` after a rating period, using the default
/// [`RatingSystem`].
pub fn calculate_new_rating(player: &Rating, games: &[Game]) -> Result<Rating, Error> {
    RatingSystem::new().calculate_new_rating(player, games)
}
