//! skillrank: nDCG evaluation of ranked skill lists
//!
//! Scores how well a ranked list of extracted skill terms follows a
//! human-defined ideal importance ordering. Each evaluation yields a single
//! comparable nDCG score plus a diagnostic breakdown (perfect matches,
//! misplaced skills, unknown skills, coverage).
//!
//! # Quick Start
//!
//! ```rust
//! use skillrank::{MatchStatus, RankingEvaluator};
//!
//! let evaluator = RankingEvaluator::new(["Python", "Golang", "REST API"]);
//!
//! // Raw extractor output: semicolon-delimited, aliases allowed
//! let analysis = evaluator.analyze_text("Flask; Go (Golang); Quantum Computing");
//!
//! assert_eq!(analysis.total_skills, 3);
//! assert_eq!(analysis.match_count, 2);
//! assert_eq!(analysis.mismatches[0].status, MatchStatus::NotInIdeal);
//! assert!(analysis.ndcg_score > 0.0);
//! ```
//!
//! # Normalization
//!
//! Observed labels are folded to lowercase, trimmed, and mapped through a
//! [`Lexicon`]. The built-in lexicon collapses common spellings of backend
//! engineering skills (`"Flask"` → `"python"`, `"PostgreSQL"` →
//! `"databases (mysql, postgres, mongodb)"`, ...). A custom lexicon can be
//! loaded from JSON and injected through [`RankingEvaluator::builder`].
//!
//! # Scoring
//!
//! See [`metrics`] for the exact gain and discount formulas, and
//! [`IdcgPolicy`] for the two available normalizations.
//!
//! ```rust
//! use skillrank::{IdcgPolicy, RankingEvaluator};
//!
//! let evaluator = RankingEvaluator::builder()
//!     .ideal_ranking(["python", "golang"])
//!     .idcg_policy(IdcgPolicy::IdealDcg)
//!     .build()
//!     .unwrap();
//!
//! let score = evaluator.calculate_ndcg(&["python", "golang"]);
//! assert!((score - 1.0).abs() < 1e-12);
//! ```

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::must_use_candidate)]

pub mod analysis;
pub mod error;
pub mod evaluator;
pub mod lexicon;
pub mod metrics;
pub mod ranking;

pub use analysis::{MatchStatus, RankingAnalysis, SkillMatch};
pub use error::{Error, Result};
pub use evaluator::{RankingEvaluator, RankingEvaluatorBuilder};
pub use lexicon::Lexicon;
pub use metrics::IdcgPolicy;
pub use ranking::{parse_ranked_list, IdealRanking, ObservedRanking};
