use crate::rating::{Rating, RatingDifference, RatingScalar, Volatility};

/// Factor between the public rating scale and the internal Glicko-2 scale.
pub const INTERNAL_RATING_SCALE: f64 = 173.7178;

/// Public rating that maps to `0.0` on the internal scale.
pub const INTERNAL_RATING_CENTER: f64 = 1500.0;

/// A rating on the internal Glicko-2 scale, where the update formulas are
/// stated.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct InternalRating {
    pub mu: f64,
    pub phi: f64,
    pub sigma: f64,
}

impl InternalRating {
    pub(crate) fn is_finite(&self) -> bool {
        self.mu.is_finite() && self.phi.is_finite() && self.sigma.is_finite()
    }

    /// Deviation after one more rating period of uncertainty with the given
    /// volatility.
    pub(crate) fn pre_period_phi(&self, sigma: f64) -> f64 {
        (self.phi * self.phi + sigma * sigma).sqrt()
    }
}

/// Converts ratings between the public scale and the internal Glicko-2
/// scale. Volatility is scale invariant and passes through unchanged.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScaleConverter {
    scale: f64,
    center: RatingScalar,
}

impl Default for ScaleConverter {
    fn default() -> ScaleConverter {
        ScaleConverter::new(INTERNAL_RATING_SCALE, INTERNAL_RATING_CENTER)
    }
}

impl ScaleConverter {
    pub fn new(scale: f64, center: f64) -> ScaleConverter {
        assert!(scale.is_finite() && scale > 0.0);
        assert!(center.is_finite());
        ScaleConverter {
            scale,
            center: RatingScalar(center),
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn center(&self) -> f64 {
        self.center.into()
    }

    pub fn to_internal(&self, rating: &Rating) -> InternalRating {
        InternalRating {
            mu: f64::from(rating.rating - self.center) / self.scale,
            phi: f64::from(rating.deviation / self.scale),
            sigma: rating.volatility.into(),
        }
    }

    pub fn to_natural(&self, internal: &InternalRating) -> Rating {
        Rating {
            rating: self.center + RatingDifference(internal.mu * self.scale),
            deviation: RatingDifference(internal.phi * self.scale),
            volatility: Volatility(internal.sigma),
        }
    }
}
