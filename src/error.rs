use std::fmt;

use thiserror::Error;

/// Which rating in a rating period failed validation.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Role {
    Player,
    /// Opponent at the given index of the games slice.
    Opponent(usize),
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Role::Player => f.write_str("player"),
            Role::Opponent(index) => write!(f, "opponent {index}"),
        }
    }
}

/// Stage of the volatility solver that ran out of iterations.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SolverStage {
    /// Stepping down from `ln(sigma^2)` in search of a bracket.
    Bracket,
    /// Illinois regula falsi inside the bracket.
    RegulaFalsi,
}

impl fmt::Display for SolverStage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            SolverStage::Bracket => "bracket search",
            SolverStage::RegulaFalsi => "regula falsi",
        })
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("invalid {role} rating: {reason}")]
    InvalidInput { role: Role, reason: &'static str },
    #[error("volatility {stage} did not converge within {iterations} iterations")]
    NonConvergence {
        stage: SolverStage,
        iterations: u32,
    },
    #[error("cannot aggregate a rating period without informative games")]
    DegenerateAggregation,
}

/// Rating system parameters that cannot be used.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[error("invalid rating system config: {0}")]
pub struct InvalidConfig(pub(crate) &'static str);
