//! Skill-label normalization lexicon
//!
//! A [`Lexicon`] maps raw or alias spellings of a skill to one canonical
//! label. Lookups are case-insensitive and ignore surrounding whitespace;
//! labels the lexicon does not know pass through (lowercased and trimmed).
//!
//! The built-in table is fixed reference data: scores are only comparable
//! across runs evaluated with the same table. To update synonyms without
//! touching the scoring code, export it with [`Lexicon::to_json`], edit the
//! file and load it back with [`Lexicon::from_json`].

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Version tag reported by [`Lexicon::builtin`]
pub const BUILTIN_LEXICON_VERSION: &str = "1";

/// Built-in alias table (alias, canonical)
const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("python (flask)", "python"),
    ("flask", "python"),
    ("python", "python"),
    ("golang", "golang"),
    ("go (golang)", "golang"),
    ("go", "golang"),
    ("restful api", "rest api"),
    ("rest api design", "rest api"),
    ("rest api design & optimization", "rest api"),
    ("rest api", "rest api"),
    ("microservices", "microservices architecture"),
    ("microservices architecture", "microservices architecture"),
    ("distributed systems", "distributed systems"),
    ("distributed systems design", "distributed systems"),
    (
        "databases (mysql, postgres, mongodb)",
        "databases (mysql, postgres, mongodb)",
    ),
    ("mysql", "databases (mysql, postgres, mongodb)"),
    ("postgresql", "databases (mysql, postgres, mongodb)"),
    ("postgres", "databases (mysql, postgres, mongodb)"),
    ("mongodb", "databases (mysql, postgres, mongodb)"),
    ("sql", "sql"),
    ("sql proficiency", "sql"),
    ("sql proficiency (mysql, postgresql)", "sql"),
    ("nosql", "nosql"),
    ("nosql databases", "nosql"),
    ("nosql databases (mongodb, etc.)", "nosql"),
    ("aws", "aws"),
    ("aws / azure", "aws"),
    ("azure", "aws"),
    ("cloud services (aws or azure)", "aws"),
    ("cloud platforms (aws, gcp, azure)", "aws"),
    ("cloud platforms", "aws"),
    ("docker", "docker"),
    ("containerization", "docker"),
    ("containerization (docker)", "docker"),
    ("kubernetes (k8s)", "kubernetes (k8s)"),
    ("kubernetes", "kubernetes (k8s)"),
    ("orchestration", "kubernetes (k8s)"),
    ("orchestration (kubernetes)", "kubernetes (k8s)"),
    ("ci/cd", "ci/cd"),
    ("ci/cd pipeline", "ci/cd"),
    ("ci/cd pipeline development", "ci/cd"),
    ("kafka", "kafka"),
    ("amazon sqs", "kafka"),
    ("messaging systems", "kafka"),
    ("messaging systems (amazon sqs, kafka)", "kafka"),
    ("terraform", "terraform"),
    ("infrastructure as code", "terraform"),
    ("infrastructure as code (terraform)", "terraform"),
    ("technical lead", "technical lead"),
    ("technical leadership", "technical lead"),
    ("technical leadership & mentorship", "technical lead"),
    ("mentorship", "technical lead"),
];

/// Lowercase and trim a label into lookup-key form
#[must_use]
pub fn fold_label(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// On-disk representation of a lexicon
#[derive(Debug, Serialize, Deserialize)]
struct LexiconFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    aliases: BTreeMap<String, String>,
}

/// Alias table mapping skill spellings to canonical labels
///
/// Every canonical label is a fixed point of the table, which makes
/// [`Lexicon::normalize`] idempotent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    version: Option<String>,
    aliases: HashMap<String, String>,
}

impl Lexicon {
    /// The built-in skill lexicon
    #[must_use]
    pub fn builtin() -> Self {
        let aliases = BUILTIN_ALIASES
            .iter()
            .map(|&(alias, canonical)| (alias.to_string(), canonical.to_string()))
            .collect();

        Self {
            version: Some(BUILTIN_LEXICON_VERSION.to_string()),
            aliases,
        }
    }

    /// A lexicon with no aliases; normalization only lowercases and trims
    #[must_use]
    pub fn identity() -> Self {
        Self {
            version: None,
            aliases: HashMap::new(),
        }
    }

    /// Build a lexicon from `(alias, canonical)` pairs
    ///
    /// Aliases and canonical labels are folded to lowercase/trimmed form.
    /// Canonical labels that are not listed as aliases are added as fixed
    /// points.
    pub fn from_pairs<I, A, C>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (A, C)>,
        A: AsRef<str>,
        C: AsRef<str>,
    {
        let mut aliases: HashMap<String, String> = HashMap::new();

        for (alias, canonical) in pairs {
            let alias = fold_label(alias.as_ref());
            let canonical = fold_label(canonical.as_ref());

            if alias.is_empty() {
                return Err(Error::InvalidLexicon("empty alias".to_string()));
            }
            if canonical.is_empty() {
                return Err(Error::InvalidLexicon(format!(
                    "empty canonical label for alias '{alias}'"
                )));
            }

            if let Some(existing) = aliases.get(&alias) {
                if *existing != canonical {
                    return Err(Error::InvalidLexicon(format!(
                        "alias '{alias}' maps to both '{existing}' and '{canonical}'"
                    )));
                }
                continue;
            }
            aliases.insert(alias, canonical);
        }

        let canonicals: Vec<String> = aliases.values().cloned().collect();
        for canonical in canonicals {
            if let Some(target) = aliases.get(&canonical) {
                if *target != canonical {
                    return Err(Error::InvalidLexicon(format!(
                        "canonical label '{canonical}' is itself an alias of '{target}'"
                    )));
                }
                continue;
            }
            aliases.insert(canonical.clone(), canonical);
        }

        Ok(Self {
            version: None,
            aliases,
        })
    }

    /// Load a lexicon from its JSON asset form
    ///
    /// ```json
    /// {"version": "2", "aliases": {"flask": "python", "python": "python"}}
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let file: LexiconFile = serde_json::from_str(json)?;
        let mut lexicon = Self::from_pairs(file.aliases)?;
        lexicon.version = file.version;
        Ok(lexicon)
    }

    /// Export the lexicon as a JSON asset, with aliases in sorted order
    pub fn to_json(&self) -> Result<String> {
        let file = LexiconFile {
            version: self.version.clone(),
            aliases: self
                .aliases
                .iter()
                .map(|(alias, canonical)| (alias.clone(), canonical.clone()))
                .collect(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// Set the version tag
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Version tag of this lexicon, if any
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Map a raw label to its canonical form
    #[must_use]
    pub fn normalize(&self, raw: &str) -> String {
        let key = fold_label(raw);
        match self.aliases.get(&key) {
            Some(canonical) => canonical.clone(),
            None => key,
        }
    }

    /// Whether `label` is already in canonical form
    #[must_use]
    pub fn is_canonical(&self, label: &str) -> bool {
        self.normalize(label) == label
    }

    /// Distinct canonical labels, sorted
    #[must_use]
    pub fn canonical_labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.aliases.values().map(String::as_str).collect();
        labels.sort_unstable();
        labels.dedup();
        labels
    }

    /// Number of alias entries (canonical fixed points included)
    #[must_use]
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    /// Whether the lexicon has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::builtin()
    }
}
