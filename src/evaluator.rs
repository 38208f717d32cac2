//! Ranking evaluator: scores observed skill rankings against an ideal one

use crate::analysis::{MatchStatus, RankingAnalysis, SkillMatch};
use crate::lexicon::Lexicon;
use crate::metrics::{self, IdcgPolicy};
use crate::ranking::{parse_ranked_list, IdealRanking};
use crate::{Error, Result};
use std::collections::HashSet;

/// Scores observed skill rankings against a fixed ideal ranking
///
/// The ideal ranking, its gain vector and the lexicon are frozen at
/// construction. Every evaluation is a pure function of that state and its
/// input, so one evaluator can be shared across threads.
///
/// ```rust
/// use skillrank::RankingEvaluator;
///
/// let evaluator = RankingEvaluator::new(["Python", "Golang", "REST API"]);
/// let analysis = evaluator.analyze_text("Golang; Flask");
///
/// assert_eq!(analysis.total_skills, 2);
/// assert_eq!(analysis.mismatch_count, 2);
/// assert!(analysis.ndcg_score > 0.0 && analysis.ndcg_score < 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct RankingEvaluator {
    ideal: IdealRanking,
    lexicon: Lexicon,
    idcg_policy: IdcgPolicy,
    idcg: f64,
}

impl RankingEvaluator {
    /// Create an evaluator with the built-in lexicon and default IDCG policy
    pub fn new<I, S>(ideal_ranking: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_parts(
            IdealRanking::new(ideal_ranking),
            Lexicon::builtin(),
            IdcgPolicy::default(),
        )
    }

    /// Start building a configured evaluator
    #[must_use]
    pub fn builder() -> RankingEvaluatorBuilder {
        RankingEvaluatorBuilder::new()
    }

    fn from_parts(ideal: IdealRanking, lexicon: Lexicon, idcg_policy: IdcgPolicy) -> Self {
        for skill in ideal.skills() {
            if !lexicon.is_canonical(skill) {
                tracing::warn!(
                    skill = %skill,
                    canonical = %lexicon.normalize(skill),
                    "ideal skill is not canonical; observed labels will never match it"
                );
            }
        }

        let idcg = idcg_policy.idcg(ideal.gains());

        Self {
            ideal,
            lexicon,
            idcg_policy,
            idcg,
        }
    }

    /// The ideal ranking
    #[must_use]
    pub fn ideal_ranking(&self) -> &IdealRanking {
        &self.ideal
    }

    /// The normalization lexicon
    #[must_use]
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// The IDCG policy
    #[must_use]
    pub fn idcg_policy(&self) -> IdcgPolicy {
        self.idcg_policy
    }

    /// Map a raw label to its canonical form
    #[must_use]
    pub fn normalize_label(&self, raw: &str) -> String {
        self.lexicon.normalize(raw)
    }

    /// Parse semicolon-delimited text and normalize every label
    #[must_use]
    pub fn extract_skills(&self, text: &str) -> Vec<String> {
        parse_ranked_list(text)
            .iter()
            .map(|skill| self.normalize_label(skill))
            .collect()
    }

    /// DCG of an already-normalized ranking
    pub fn compute_dcg<S: AsRef<str>>(&self, ranked_skills: &[S]) -> f64 {
        metrics::dcg(
            ranked_skills
                .iter()
                .map(|skill| self.ideal.position(skill.as_ref())),
        )
    }

    /// Ideal DCG under the configured policy
    #[must_use]
    pub fn calculate_idcg(&self) -> f64 {
        self.idcg
    }

    /// NDCG of an already-normalized ranking
    pub fn calculate_ndcg<S: AsRef<str>>(&self, ranked_skills: &[S]) -> f64 {
        metrics::ndcg(self.compute_dcg(ranked_skills), self.idcg)
    }

    /// Normalize, score and classify a ranking of raw labels
    pub fn analyze_ranking<S: AsRef<str>>(&self, ranked_skills: &[S]) -> RankingAnalysis {
        let normalized: Vec<String> = ranked_skills
            .iter()
            .map(|skill| self.normalize_label(skill.as_ref()))
            .collect();

        let ndcg_score = self.calculate_ndcg(&normalized);

        let mut matches = Vec::new();
        let mut mismatches = Vec::new();
        let mut occurrences = 0usize;
        let mut distinct: HashSet<&str> = HashSet::new();

        for (position, skill) in normalized.iter().enumerate() {
            let ideal_position = self.ideal.position(skill);
            if ideal_position.is_some() {
                occurrences += 1;
                distinct.insert(skill.as_str());
            }

            let classified = SkillMatch::classify(skill.clone(), position, ideal_position);
            tracing::trace!(
                skill = %classified.skill,
                position,
                status = %classified.status,
                "classified skill"
            );

            if classified.status == MatchStatus::PerfectMatch {
                matches.push(classified);
            } else {
                mismatches.push(classified);
            }
        }

        let analysis = RankingAnalysis {
            ndcg_score,
            total_skills: normalized.len(),
            match_count: matches.len(),
            mismatch_count: mismatches.len(),
            matches,
            mismatches,
            coverage_percentage: self.percent_of_ideal(occurrences),
            distinct_coverage_percentage: self.percent_of_ideal(distinct.len()),
        };

        tracing::debug!(
            total_skills = analysis.total_skills,
            ndcg = analysis.ndcg_score,
            matches = analysis.match_count,
            mismatches = analysis.mismatch_count,
            "analyzed ranking"
        );

        analysis
    }

    /// Parse semicolon-delimited text, then analyze it
    #[must_use]
    pub fn analyze_text(&self, text: &str) -> RankingAnalysis {
        self.analyze_ranking(&parse_ranked_list(text))
    }

    fn percent_of_ideal(&self, count: usize) -> f64 {
        if self.ideal.is_empty() {
            0.0
        } else {
            count as f64 / self.ideal.len() as f64 * 100.0
        }
    }
}

/// Builder for [`RankingEvaluator`]
#[derive(Debug, Default)]
pub struct RankingEvaluatorBuilder {
    ideal: Option<IdealRanking>,
    lexicon: Option<Lexicon>,
    idcg_policy: IdcgPolicy,
}

impl RankingEvaluatorBuilder {
    /// Create a new evaluator builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ideal ranking from labels ordered most to least important
    #[must_use]
    pub fn ideal_ranking<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.ideal = Some(IdealRanking::new(skills));
        self
    }

    /// Set a prebuilt ideal ranking
    #[must_use]
    pub fn ideal(mut self, ideal: IdealRanking) -> Self {
        self.ideal = Some(ideal);
        self
    }

    /// Set the lexicon (defaults to [`Lexicon::builtin`])
    #[must_use]
    pub fn lexicon(mut self, lexicon: Lexicon) -> Self {
        self.lexicon = Some(lexicon);
        self
    }

    /// Set the IDCG policy
    #[must_use]
    pub fn idcg_policy(mut self, policy: IdcgPolicy) -> Self {
        self.idcg_policy = policy;
        self
    }

    /// Build the evaluator
    pub fn build(self) -> Result<RankingEvaluator> {
        let ideal = self
            .ideal
            .ok_or_else(|| Error::InvalidConfig("ideal ranking required".to_string()))?;

        let lexicon = self.lexicon.unwrap_or_default();

        Ok(RankingEvaluator::from_parts(
            ideal,
            lexicon,
            self.idcg_policy,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn backend_evaluator() -> RankingEvaluator {
        RankingEvaluator::new(["python", "golang", "rest api"])
    }

    // ============ Normalization Tests ============

    #[test]
    fn test_normalize_label_alias() {
        let evaluator = backend_evaluator();
        assert_eq!(evaluator.normalize_label(" Flask "), "python");
    }

    #[test]
    fn test_extract_skills_parses_and_normalizes() {
        let evaluator = backend_evaluator();
        let skills = evaluator.extract_skills("Go (Golang); ; RESTful API; Elixir");
        assert_eq!(skills, vec!["golang", "rest api", "elixir"]);
    }

    // ============ DCG Tests ============

    #[test]
    fn test_compute_dcg_empty() {
        let evaluator = backend_evaluator();
        assert_eq!(evaluator.compute_dcg::<&str>(&[]), 0.0);
    }

    #[test]
    fn test_compute_dcg_unknown_skill_bonus() {
        let evaluator = backend_evaluator();
        assert!((evaluator.compute_dcg(&["quantum computing"]) - 0.1).abs() < EPS);
    }

    #[test]
    fn test_compute_dcg_expects_normalized_input() {
        let evaluator = backend_evaluator();
        // "Python" is not folded here, so it earns only the unknown bonus
        assert!((evaluator.compute_dcg(&["Python"]) - 0.1).abs() < EPS);
        assert!((evaluator.compute_dcg(&["python"]) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_compute_dcg_double_discount() {
        let evaluator = backend_evaluator();
        // rest api (ideal 2) observed at position 1: (1 / log2 4) / log2 3
        let expected = 0.5 / 3f64.log2();
        let dcg = evaluator.compute_dcg(&["quantum", "rest api"]);
        assert!((dcg - (0.1 + expected)).abs() < EPS);
    }

    // ============ IDCG / NDCG Tests ============

    #[test]
    fn test_calculate_idcg_gain_sum() {
        let evaluator = backend_evaluator();
        let expected = 1.0 + 1.0 / 3f64.log2() + 0.5;
        assert!((evaluator.calculate_idcg() - expected).abs() < EPS);
    }

    #[test]
    fn test_calculate_idcg_empty_ideal() {
        let evaluator = RankingEvaluator::new(Vec::<String>::new());
        assert_eq!(evaluator.calculate_idcg(), 0.0);
        assert_eq!(evaluator.calculate_ndcg(&["python"]), 0.0);
    }

    #[test]
    fn test_identity_under_gain_sum_scores_below_one() {
        let evaluator = backend_evaluator();
        let ndcg = evaluator.calculate_ndcg(&["python", "golang", "rest api"]);
        let dcg = 1.0 + 1.0 / 3f64.log2().powi(2) + 0.25;
        let idcg = 1.0 + 1.0 / 3f64.log2() + 0.5;
        assert!((ndcg - dcg / idcg).abs() < EPS);
        assert!(ndcg < 1.0);
    }

    #[test]
    fn test_identity_under_ideal_dcg_scores_one() {
        let evaluator = RankingEvaluator::builder()
            .ideal_ranking(["python", "golang", "rest api"])
            .idcg_policy(IdcgPolicy::IdealDcg)
            .build()
            .unwrap();
        let ndcg = evaluator.calculate_ndcg(&["python", "golang", "rest api"]);
        assert!((ndcg - 1.0).abs() < EPS);
    }

    #[test]
    fn test_single_skill_identity_scores_one_under_both_policies() {
        for policy in [IdcgPolicy::GainSum, IdcgPolicy::IdealDcg] {
            let evaluator = RankingEvaluator::builder()
                .ideal_ranking(["python"])
                .idcg_policy(policy)
                .build()
                .unwrap();
            assert!((evaluator.calculate_ndcg(&["python"]) - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn test_ndcg_not_clamped_by_unknown_bonus() {
        let evaluator = RankingEvaluator::new(["python"]);
        let ranked = ["python", "a", "b", "c", "d", "e", "f"];
        assert!(evaluator.calculate_ndcg(&ranked) > 1.0);
    }

    // ============ Analysis Tests ============

    #[test]
    fn test_analyze_identity() {
        let evaluator = backend_evaluator();
        let analysis = evaluator.analyze_ranking(&["python", "golang", "rest api"]);

        assert_eq!(analysis.total_skills, 3);
        assert_eq!(analysis.match_count, 3);
        assert_eq!(analysis.mismatch_count, 0);
        assert!((analysis.coverage_percentage - 100.0).abs() < EPS);
        assert!(analysis
            .matches
            .iter()
            .all(|m| m.status == MatchStatus::PerfectMatch));
    }

    #[test]
    fn test_analyze_swapped_pair() {
        let evaluator = backend_evaluator();
        let analysis = evaluator.analyze_ranking(&["golang", "python"]);

        assert_eq!(analysis.match_count, 0);
        assert_eq!(analysis.mismatch_count, 2);
        assert!(analysis.misplaced().count() == 2);
        assert_eq!(analysis.mismatches[0].ideal_position, Some(1));
        assert_eq!(analysis.mismatches[1].ideal_position, Some(0));
        assert!((analysis.coverage_percentage - 200.0 / 3.0).abs() < EPS);
        assert!(analysis.ndcg_score > 0.0 && analysis.ndcg_score < 1.0);
    }

    #[test]
    fn test_analyze_alias_maps_to_ideal_skill() {
        let evaluator = backend_evaluator();
        let analysis = evaluator.analyze_ranking(&["Flask"]);

        assert_eq!(analysis.match_count, 1);
        assert_eq!(analysis.matches[0].skill, "python");
        assert_eq!(analysis.matches[0].ideal_position, Some(0));
    }

    #[test]
    fn test_analyze_unknown_skill() {
        let evaluator = backend_evaluator();
        let analysis = evaluator.analyze_ranking(&["quantum computing"]);

        assert_eq!(analysis.mismatch_count, 1);
        let m = &analysis.mismatches[0];
        assert_eq!(m.status, MatchStatus::NotInIdeal);
        assert_eq!(m.ideal_position, None);
        let expected = 0.1 / evaluator.calculate_idcg();
        assert!((analysis.ndcg_score - expected).abs() < EPS);
        assert_eq!(analysis.coverage_percentage, 0.0);
    }

    #[test]
    fn test_analyze_empty() {
        let evaluator = backend_evaluator();
        let analysis = evaluator.analyze_ranking::<&str>(&[]);

        assert_eq!(analysis.ndcg_score, 0.0);
        assert_eq!(analysis.total_skills, 0);
        assert!(analysis.matches.is_empty());
        assert!(analysis.mismatches.is_empty());
    }

    #[test]
    fn test_analyze_empty_ideal_has_zero_coverage() {
        let evaluator = RankingEvaluator::new(Vec::<String>::new());
        let analysis = evaluator.analyze_ranking(&["python"]);

        assert_eq!(analysis.ndcg_score, 0.0);
        assert_eq!(analysis.coverage_percentage, 0.0);
        assert_eq!(analysis.distinct_coverage_percentage, 0.0);
        assert_eq!(analysis.mismatch_count, 1);
    }

    #[test]
    fn test_coverage_counts_repeated_occurrences() {
        let evaluator = RankingEvaluator::new(["python", "golang"]);
        // flask and python both normalize to python
        let analysis = evaluator.analyze_ranking(&["python", "flask"]);

        assert!((analysis.coverage_percentage - 100.0).abs() < EPS);
        assert!((analysis.distinct_coverage_percentage - 50.0).abs() < EPS);
    }

    #[test]
    fn test_coverage_can_exceed_one_hundred() {
        let evaluator = RankingEvaluator::new(["python"]);
        let analysis = evaluator.analyze_ranking(&["python", "flask", "python (flask)"]);

        assert!((analysis.coverage_percentage - 300.0).abs() < EPS);
        assert!((analysis.distinct_coverage_percentage - 100.0).abs() < EPS);
    }

    #[test]
    fn test_analyze_text_matches_analyze_ranking() {
        let evaluator = backend_evaluator();
        let from_text = evaluator.analyze_text("Golang ; Flask;;");
        let from_list = evaluator.analyze_ranking(&["Golang", "Flask"]);
        assert_eq!(from_text, from_list);
    }

    // ============ Builder Tests ============

    #[test]
    fn test_builder_requires_ideal_ranking() {
        let err = RankingEvaluator::builder().build().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_builder_defaults() {
        let evaluator = RankingEvaluator::builder()
            .ideal_ranking(["python"])
            .build()
            .unwrap();
        assert_eq!(evaluator.idcg_policy(), IdcgPolicy::GainSum);
        assert_eq!(evaluator.lexicon(), &Lexicon::builtin());
    }

    #[test]
    fn test_builder_custom_lexicon() {
        let lexicon = Lexicon::from_pairs([("rustlang", "rust")]).unwrap();
        let evaluator = RankingEvaluator::builder()
            .ideal(IdealRanking::new(["rust"]))
            .lexicon(lexicon)
            .build()
            .unwrap();

        let analysis = evaluator.analyze_ranking(&["RustLang", "Flask"]);
        assert_eq!(analysis.match_count, 1);
        // custom lexicon does not know the built-in aliases
        assert_eq!(analysis.mismatches[0].skill, "flask");
    }

    #[test]
    fn test_non_canonical_ideal_label_is_accepted() {
        let evaluator = RankingEvaluator::new(["Flask", "golang"]);
        assert_eq!(evaluator.ideal_ranking().skills(), ["flask", "golang"]);
        // "flask" normalizes to "python" and never hits the ideal slot
        let analysis = evaluator.analyze_ranking(&["flask"]);
        assert_eq!(analysis.mismatches[0].status, MatchStatus::NotInIdeal);
    }

    // ============ Concurrency Tests ============

    #[test]
    fn test_evaluator_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RankingEvaluator>();
    }

    #[test]
    fn test_concurrent_evaluation() {
        let evaluator = std::sync::Arc::new(backend_evaluator());
        let expected = evaluator.analyze_text("golang; python");

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let evaluator = std::sync::Arc::clone(&evaluator);
                std::thread::spawn(move || evaluator.analyze_text("golang; python"))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }
}
