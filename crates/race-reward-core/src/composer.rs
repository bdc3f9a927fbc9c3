//! Reward composer: folds weighted terms over a baseline reward

use tracing::{debug, trace, warn};

use crate::config::{RewardConfig, Variant};
use crate::error::Result;
use crate::reward::{Reward, RewardComponentDef, RewardComponents, RewardFunction, TermSet};
use crate::telemetry::Telemetry;

/// Combines a term set into one scalar reward.
///
/// Starting from the baseline, each term in registration order updates the
/// running reward as `reward + score(telemetry, reward) * weight`. The first
/// failing term aborts the whole call.
#[derive(Debug, Clone)]
pub struct RewardComposer {
    terms: TermSet,
}

impl RewardComposer {
    /// Composer over an already built term set
    pub fn new(terms: TermSet) -> Self {
        Self { terms }
    }

    /// Composer for a built-in variant with default configuration
    pub fn for_variant(variant: Variant) -> Self {
        let config = RewardConfig::for_variant(variant);
        Self::new(TermSet::new(config.baseline, config.params, variant.terms()))
    }

    /// Build the term set from configuration
    pub fn from_config(config: &RewardConfig) -> Result<Self> {
        Ok(Self::new(config.build()?))
    }

    /// Registered terms, baseline and constants
    pub fn terms(&self) -> &TermSet {
        &self.terms
    }

    /// Final accumulated reward
    pub fn compose(&self, telemetry: &Telemetry) -> Result<f64> {
        self.fold(telemetry, |_, _| {})
    }

    /// Final reward together with each term's weighted contribution
    pub fn compose_detailed(&self, telemetry: &Telemetry) -> Result<Reward> {
        let mut components = RewardComponents::with_capacity(self.terms.len());
        let value = self.fold(telemetry, |name, contribution| {
            components.insert(name.to_string(), contribution);
        })?;
        Ok(Reward { value, components })
    }

    fn fold(
        &self,
        telemetry: &Telemetry,
        mut record: impl FnMut(&'static str, f64),
    ) -> Result<f64> {
        let params = self.terms.params();
        let mut reward = self.terms.baseline();

        for term in self.terms.terms() {
            let score = term.evaluate(telemetry, params, reward)?;
            if !term.in_range(score) {
                warn!(
                    term = term.name,
                    score,
                    range = ?term.range,
                    "Score outside declared range"
                );
            }
            let contribution = score * term.weight;
            reward += contribution;
            trace!(term = term.name, contribution, reward, "Applied scoring term");
            record(term.name, contribution);
        }

        debug!(reward, terms = self.terms.len(), "Composed reward");
        Ok(reward)
    }
}

impl RewardFunction for RewardComposer {
    fn compute(&self, telemetry: &Telemetry) -> Result<Reward> {
        self.compose_detailed(telemetry)
    }

    fn components(&self) -> Vec<RewardComponentDef> {
        self.terms
            .terms()
            .iter()
            .map(|term| term.definition())
            .collect()
    }
}

/// Per-step entry point invoked by the training harness (centerline terms)
pub fn reward_function(telemetry: &Telemetry) -> Result<f64> {
    RewardComposer::for_variant(Variant::Centerline).compose(telemetry)
}

/// Per-step entry point for the track-keeping terms
pub fn track_keeping_reward(telemetry: &Telemetry) -> Result<f64> {
    RewardComposer::for_variant(Variant::TrackKeeping).compose(telemetry)
}
