//! Ideal and observed skill rankings

use crate::lexicon::fold_label;
use crate::metrics::ideal_gains;
use crate::{Error, Result};
use std::collections::HashMap;

/// Raw skill labels in the order an extractor emitted them
pub type ObservedRanking = Vec<String>;

/// Split semicolon-delimited ranked text into labels
///
/// Segments are trimmed and empty segments dropped; order is preserved.
#[must_use]
pub fn parse_ranked_list(text: &str) -> ObservedRanking {
    text.split(';')
        .map(str::trim)
        .filter(|skill| !skill.is_empty())
        .map(String::from)
        .collect()
}

/// Ground-truth importance ordering of skills, most important first
///
/// Labels are lowercased and trimmed, not passed through a lexicon: they
/// are expected to be canonical already. When a label repeats, its first
/// position wins.
#[derive(Debug, Clone, PartialEq)]
pub struct IdealRanking {
    skills: Vec<String>,
    positions: HashMap<String, usize>,
    gains: Vec<f64>,
}

impl IdealRanking {
    /// Create an ideal ranking from labels ordered most to least important
    pub fn new<I, S>(skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let skills: Vec<String> = skills
            .into_iter()
            .map(|skill| fold_label(skill.as_ref()))
            .collect();

        let mut positions = HashMap::with_capacity(skills.len());
        for (position, skill) in skills.iter().enumerate() {
            positions.entry(skill.clone()).or_insert(position);
        }

        let gains = ideal_gains(skills.len());

        Self {
            skills,
            positions,
            gains,
        }
    }

    /// Parse an ideal ranking from a JSON string array or semicolon-delimited text
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.starts_with('[') {
            let skills: Vec<String> = serde_json::from_str(trimmed)
                .map_err(|e| Error::InvalidIdealRanking(e.to_string()))?;
            Ok(Self::new(skills))
        } else {
            Ok(Self::new(parse_ranked_list(trimmed)))
        }
    }

    /// Skills in ideal order
    #[must_use]
    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    /// Ideal gain vector, parallel to [`IdealRanking::skills`]
    #[must_use]
    pub fn gains(&self) -> &[f64] {
        &self.gains
    }

    /// Ideal position of an already-normalized skill
    #[must_use]
    pub fn position(&self, skill: &str) -> Option<usize> {
        self.positions.get(skill).copied()
    }

    /// Whether the ideal ranking contains an already-normalized skill
    #[must_use]
    pub fn contains(&self, skill: &str) -> bool {
        self.positions.contains_key(skill)
    }

    /// Number of positions in the ranking
    #[must_use]
    pub fn len(&self) -> usize {
        self.skills.len()
    }

    /// Whether the ranking is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}
