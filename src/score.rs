use std::ops;

/// A score or expectation value in the range `0.0..=1.0`, where `0.0` is a
/// loss and `1.0` is a win.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default)]
pub struct Score(pub f64);

impl From<Score> for f64 {
    #[inline]
    fn from(Score(score): Score) -> f64 {
        score
    }
}

impl Score {
    pub const LOSS: Score = Score(0.0);
    pub const DRAW: Score = Score(0.5);
    pub const WIN: Score = Score(1.0);

    /// The same game seen from the other side.
    #[must_use]
    #[inline]
    pub fn opposite(self) -> Score {
        Score(1.0 - self.0)
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl ops::Sub<Score> for Score {
    type Output = f64;

    /// Surprise of an actual score relative to an expected score.
    #[inline]
    fn sub(self, rhs: Score) -> f64 {
        self.0 - rhs.0
    }
}

/// Result of a single game, from the point of view of the player being
/// rated.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

impl Outcome {
    pub fn score(self) -> Score {
        match self {
            Outcome::Win => Score::WIN,
            Outcome::Loss => Score::LOSS,
            Outcome::Draw => Score::DRAW,
        }
    }

    /// The outcome recorded for the opponent.
    #[must_use]
    pub fn opposite(self) -> Outcome {
        match self {
            Outcome::Win => Outcome::Loss,
            Outcome::Loss => Outcome::Win,
            Outcome::Draw => Outcome::Draw,
        }
    }
}

impl From<Outcome> for Score {
    #[inline]
    fn from(outcome: Outcome) -> Score {
        outcome.score()
    }
}
