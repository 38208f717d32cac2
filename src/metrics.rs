//! Gain and discount primitives for skill-ranking nDCG
//!
//! The scoring variant used here discounts twice:
//!
//! ```text
//! gain(s, i)  = 1 / log2(p + 2)        if s sits at ideal position p
//!             = 0.1 / log2(i + 2)      otherwise
//! DCG         = Σ gain(s_i, i) / log2(i + 2)
//! IDCG        = Σ 1 / log2(p + 2)      over the ideal positions
//! NDCG        = DCG / IDCG             (0.0 when IDCG is 0.0)
//! ```
//!
//! Scores must stay numerically identical to earlier runs, so neither the
//! second discount nor the unclamped result may change. Because IDCG above
//! is discounted once while DCG is discounted twice, an observed ranking
//! equal to the ideal one scores below 1.0 whenever it holds more than one
//! skill. [`IdcgPolicy::IdealDcg`] instead normalizes by the DCG of the
//! ideal ordering itself, under which the ideal ordering scores exactly 1.0.

use serde::{Deserialize, Serialize};

/// Scale of the gain awarded to skills absent from the ideal ranking
pub const UNRANKED_GAIN_SCALE: f64 = 0.1;

/// Logarithmic discount for a 0-indexed position: `log2(position + 2)`
#[must_use]
pub fn discount(position: usize) -> f64 {
    (position as f64 + 2.0).log2()
}

/// Gain vector of an ideal ranking with `len` entries
///
/// Strictly decreasing; `gains[0] == 1.0`.
#[must_use]
pub fn ideal_gains(len: usize) -> Vec<f64> {
    (0..len).map(|position| 1.0 / discount(position)).collect()
}

/// Gain of the skill observed at `position`
///
/// `ideal_position` is the skill's place in the ideal ranking, or `None`
/// when the ideal ranking does not contain it.
#[must_use]
pub fn skill_gain(ideal_position: Option<usize>, position: usize) -> f64 {
    match ideal_position {
        Some(ideal) => 1.0 / discount(ideal),
        None => UNRANKED_GAIN_SCALE / discount(position),
    }
}

/// Discounted cumulative gain of an observed ranking
///
/// Each item is the ideal position of the skill at that observed position.
pub fn dcg<I>(ideal_positions: I) -> f64
where
    I: IntoIterator<Item = Option<usize>>,
{
    ideal_positions
        .into_iter()
        .enumerate()
        .map(|(position, ideal)| skill_gain(ideal, position) / discount(position))
        .sum()
}

/// How the normalizing ideal DCG is derived from the ideal gain vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdcgPolicy {
    /// Sum of the ideal gains (comparable with historical scores)
    #[default]
    GainSum,
    /// DCG of the ideal ranking observed in its own order
    IdealDcg,
}

impl IdcgPolicy {
    /// Ideal DCG for a precomputed ideal gain vector
    #[must_use]
    pub fn idcg(self, ideal_gains: &[f64]) -> f64 {
        match self {
            Self::GainSum => ideal_gains.iter().sum(),
            Self::IdealDcg => ideal_gains
                .iter()
                .enumerate()
                .map(|(position, gain)| gain / discount(position))
                .sum(),
        }
    }

    /// Stable name of the policy
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::GainSum => "gain_sum",
            Self::IdealDcg => "ideal_dcg",
        }
    }
}

/// Normalize a DCG by its ideal DCG
///
/// Returns exactly 0.0 when `idcg` is 0.0. Not clamped to `[0, 1]`.
#[must_use]
pub fn ndcg(dcg: f64, idcg: f64) -> f64 {
    if idcg == 0.0 {
        0.0
    } else {
        dcg / idcg
    }
}
