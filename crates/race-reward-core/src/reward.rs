//! Reward types and weighted scoring terms

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::config::RewardParams;
use crate::error::Result;
use crate::telemetry::Telemetry;

/// Reward for one step, with the share each term added
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reward {
    /// Final running reward after every term has folded in
    pub value: f64,
    /// Weighted contribution of each term, keyed by term name
    #[serde(default)]
    pub components: RewardComponents,
}

/// Term name to weighted contribution
pub type RewardComponents = HashMap<String, f64>;

/// Static description of a registered term, as listed by `components()`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardComponentDef {
    /// Term name, also the key in [`RewardComponents`]
    pub name: String,
    /// What the term rewards
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Expected range of the unweighted score
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
    /// Weight applied by the composer
    #[serde(default = "default_weight")]
    pub default_weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

/// Unweighted score of one term: `(telemetry, params, running reward) -> score`
pub type ScoreFn = fn(&Telemetry, &RewardParams, f64) -> Result<f64>;

/// A pure scoring function paired with its weight
#[derive(Clone, Copy)]
pub struct ScoringTerm {
    pub name: &'static str,
    pub description: &'static str,
    /// Expected range of the unweighted score, `None` when unbounded
    pub range: Option<[f64; 2]>,
    pub weight: f64,
    pub score: ScoreFn,
}

impl ScoringTerm {
    /// Unweighted score of this term given the running `reward`
    pub fn evaluate(
        &self,
        telemetry: &Telemetry,
        params: &RewardParams,
        reward: f64,
    ) -> Result<f64> {
        (self.score)(telemetry, params, reward)
    }

    /// Whether `score` lies inside the declared range; unbounded terms accept anything
    pub fn in_range(&self, score: f64) -> bool {
        match self.range {
            Some([low, high]) => (low..=high).contains(&score),
            None => true,
        }
    }

    /// Same term with a different weight
    pub fn with_weight(self, weight: f64) -> Self {
        Self { weight, ..self }
    }

    /// Serializable description of this term
    pub fn definition(&self) -> RewardComponentDef {
        RewardComponentDef {
            name: self.name.to_string(),
            description: Some(self.description.to_string()),
            range: self.range,
            default_weight: self.weight,
        }
    }
}

impl fmt::Debug for ScoringTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScoringTerm")
            .field("name", &self.name)
            .field("weight", &self.weight)
            .finish()
    }
}

/// Immutable ordered registration table of scoring terms.
///
/// Built once from configuration and handed to the composer. Terms fold in
/// the order they were registered.
#[derive(Debug, Clone)]
pub struct TermSet {
    baseline: f64,
    params: RewardParams,
    terms: Vec<ScoringTerm>,
}

impl TermSet {
    /// Term set folding `terms` in order, starting from `baseline`
    pub fn new(baseline: f64, params: RewardParams, terms: Vec<ScoringTerm>) -> Self {
        Self {
            baseline,
            params,
            terms,
        }
    }

    /// Initial value of the running reward
    pub fn baseline(&self) -> f64 {
        self.baseline
    }

    /// Constants handed to every term
    pub fn params(&self) -> &RewardParams {
        &self.params
    }

    /// Terms in fold order
    pub fn terms(&self) -> &[ScoringTerm] {
        &self.terms
    }

    /// Number of registered terms
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Trait for computing rewards from a telemetry snapshot
pub trait RewardFunction: Send + Sync {
    /// Compute the reward with its decomposition
    fn compute(&self, telemetry: &Telemetry) -> Result<Reward>;

    /// List available reward components
    fn components(&self) -> Vec<RewardComponentDef>;
}
