use itertools::{Itertools, MinMaxResult};

use crate::model::Spot;

pub const MIN_RADIUS_M: f64 = 300.0;
pub const MAX_RADIUS_M: f64 = 1200.0;
/// Used when visitor counts carry no spread to scale against
pub const FLAT_RADIUS_M: f64 = 600.0;

/// Linear map from visitor counts to catchment circle radii in meters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusScale {
    range: Option<(u64, u64)>,
}

impl RadiusScale {
    /// Scale spanning the visitor counts of the valid spots
    pub fn from_spots<'a, I>(spots: I) -> Self
    where
        I: IntoIterator<Item = &'a Spot>,
    {
        Self::from_counts(
            spots
                .into_iter()
                .filter(|s| s.is_valid())
                .map(|s| s.visitors),
        )
    }

    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = u64>,
    {
        let range = match counts.into_iter().minmax() {
            MinMaxResult::NoElements => None,
            MinMaxResult::OneElement(v) => Some((v, v)),
            MinMaxResult::MinMax(min, max) => Some((min, max)),
        };
        Self { range }
    }

    /// 300 m at the smallest count up to 1200 m at the largest.
    ///
    /// Counts outside the observed range extrapolate linearly.
    #[allow(clippy::cast_precision_loss)]
    pub fn radius_m(&self, visitors: u64) -> f64 {
        match self.range {
            Some((min, max)) if max > min => {
                let offset = visitors as f64 - min as f64;
                MIN_RADIUS_M + offset * (MAX_RADIUS_M - MIN_RADIUS_M) / (max - min) as f64
            }
            _ => FLAT_RADIUS_M,
        }
    }
}
