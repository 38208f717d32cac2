//! Diagnostic breakdown of one ranking evaluation
//!
//! Field names of [`RankingAnalysis`] and [`SkillMatch`] are consumed by
//! downstream reporting and must stay stable.

use serde::{Deserialize, Serialize};

/// Classification of an observed skill against the ideal ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// In the ideal ranking, at its ideal position
    PerfectMatch,
    /// In the ideal ranking, at another position
    Misplaced,
    /// Not in the ideal ranking
    NotInIdeal,
}

impl MatchStatus {
    /// Stable name used in serialized output
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PerfectMatch => "perfect_match",
            Self::Misplaced => "misplaced",
            Self::NotInIdeal => "not_in_ideal",
        }
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One observed skill and where it sits relative to the ideal ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillMatch {
    /// Normalized skill label
    pub skill: String,
    /// Observed position (0-indexed)
    pub position: usize,
    /// Ideal position; serialized as -1 when absent
    #[serde(with = "ideal_position")]
    pub ideal_position: Option<usize>,
    /// Classification
    pub status: MatchStatus,
}

impl SkillMatch {
    /// Classify `skill` observed at `position`
    #[must_use]
    pub fn classify(skill: String, position: usize, ideal_position: Option<usize>) -> Self {
        let status = match ideal_position {
            Some(ideal) if ideal == position => MatchStatus::PerfectMatch,
            Some(_) => MatchStatus::Misplaced,
            None => MatchStatus::NotInIdeal,
        };

        Self {
            skill,
            position,
            ideal_position,
            status,
        }
    }

    /// Whether the skill appears anywhere in the ideal ranking
    #[must_use]
    pub fn in_ideal(&self) -> bool {
        self.ideal_position.is_some()
    }
}

/// Result of evaluating one observed ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingAnalysis {
    /// Normalized DCG (not clamped to [0, 1])
    pub ndcg_score: f64,
    /// Number of observed skills after normalization
    pub total_skills: usize,
    /// Skills at their ideal position
    pub matches: Vec<SkillMatch>,
    /// Misplaced skills and skills absent from the ideal ranking
    pub mismatches: Vec<SkillMatch>,
    /// `matches.len()`
    pub match_count: usize,
    /// `mismatches.len()`
    pub mismatch_count: usize,
    /// Observed occurrences of ideal skills over ideal size, in percent
    ///
    /// Repeated skills count once per occurrence, so this can exceed 100.
    pub coverage_percentage: f64,
    /// Distinct ideal skills observed over ideal size, in percent
    #[serde(default)]
    pub distinct_coverage_percentage: f64,
}

impl RankingAnalysis {
    /// Misplaced skills only
    pub fn misplaced(&self) -> impl Iterator<Item = &SkillMatch> {
        self.mismatches
            .iter()
            .filter(|m| m.status == MatchStatus::Misplaced)
    }

    /// Skills absent from the ideal ranking
    pub fn not_in_ideal(&self) -> impl Iterator<Item = &SkillMatch> {
        self.mismatches
            .iter()
            .filter(|m| m.status == MatchStatus::NotInIdeal)
    }
}

/// Serde adapter mapping `None` to `-1`
mod ideal_position {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<usize>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(position) => serializer.serialize_u64(*position as u64),
            None => serializer.serialize_i64(-1),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<usize>, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        if raw < 0 {
            Ok(None)
        } else {
            usize::try_from(raw)
                .map(Some)
                .map_err(serde::de::Error::custom)
        }
    }
}
