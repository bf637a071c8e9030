#![no_main]

use arbitrary::Arbitrary;
use glicko2_period::{Error, Game, Outcome, Rating, RatingSystem};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct ArbitraryRating {
    rating: f64,
    deviation: f64,
    volatility: f64,
}

impl ArbitraryRating {
    fn into_clamped(self) -> Rating {
        // Keep NaN and non-positive values, they must be rejected cleanly.
        Rating::new(
            self.rating.clamp(-500.0, 3500.0),
            self.deviation.clamp(-1.0, 1700.0),
            self.volatility.clamp(-0.1, 1.0),
        )
    }
}

#[derive(Arbitrary, Debug)]
enum ArbitraryOutcome {
    Win,
    Loss,
    Draw,
}

impl From<ArbitraryOutcome> for Outcome {
    fn from(outcome: ArbitraryOutcome) -> Outcome {
        match outcome {
            ArbitraryOutcome::Win => Outcome::Win,
            ArbitraryOutcome::Loss => Outcome::Loss,
            ArbitraryOutcome::Draw => Outcome::Draw,
        }
    }
}

#[derive(Arbitrary, Debug)]
struct RatingPeriod {
    player: ArbitraryRating,
    games: Vec<(ArbitraryRating, ArbitraryOutcome)>,
}

fn assert_rating(rating: &Rating) {
    assert!(f64::from(rating.rating).is_finite());
    assert!(f64::from(rating.deviation).is_finite());
    assert!(f64::from(rating.deviation) > 0.0);
    assert!(f64::from(rating.volatility).is_finite());
    assert!(f64::from(rating.volatility) > 0.0);
}

fuzz_target!(|period: RatingPeriod| {
    let player = period.player.into_clamped();
    let games: Vec<Game> = period
        .games
        .into_iter()
        .map(|(opponent, outcome)| Game::new(opponent.into_clamped(), outcome.into()))
        .collect();

    match RatingSystem::new().calculate_new_rating(&player, &games) {
        Ok(updated) => assert_rating(&updated),
        Err(Error::InvalidInput { .. } | Error::NonConvergence { .. }) => {}
        Err(Error::DegenerateAggregation) => assert!(!games.is_empty()),
    }
});
