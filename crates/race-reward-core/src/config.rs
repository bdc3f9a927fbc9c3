//! Reward configuration

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, RewardError};
use crate::reward::{ScoringTerm, TermSet};
use crate::terms;

/// Built-in term sets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Centre line, progress and lap pace, plus the shared steering terms
    #[default]
    Centerline,
    /// Wheels on track and straight-line driving, plus the shared steering terms
    TrackKeeping,
}

impl Variant {
    /// Registration table for this variant, in fold order
    pub fn terms(self) -> Vec<ScoringTerm> {
        match self {
            Variant::Centerline => vec![
                terms::STAY_NEAR_CENTER,
                terms::INCREASING_PROGRESS,
                terms::REWARD_SPEED,
                terms::REDUCE_HIGH_SPEED_STEERING,
                terms::HEADING_REWARD,
                terms::STEERING_HEADING_REWARD,
            ],
            // Shared steering terms first, then the track-keeping ones
            Variant::TrackKeeping => vec![
                terms::REDUCE_HIGH_SPEED_STEERING,
                terms::HEADING_REWARD,
                terms::STEERING_HEADING_REWARD,
                terms::STAY_ON_TRACK,
                terms::NO_STEERING_ON_STRAIGHT,
                terms::SPEEDUP_ON_STRAIGHT,
            ],
        }
    }

    /// Name used on the command line and in config files
    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Centerline => "centerline",
            Variant::TrackKeeping => "track-keeping",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "centerline" => Ok(Variant::Centerline),
            "track-keeping" => Ok(Variant::TrackKeeping),
            other => Err(format!(
                "unknown variant '{other}', expected centerline or track-keeping"
            )),
        }
    }
}

/// Constants consumed by the scoring terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardParams {
    /// Step budget for one full lap
    #[serde(default = "default_lap_steps")]
    pub lap_steps: f64,
    /// Top speed of the car's action space, m/s
    #[serde(default = "default_max_speed")]
    pub max_speed: f64,
    /// Fraction of `max_speed` that counts as flat out
    #[serde(default = "default_near_max_ratio")]
    pub near_max_ratio: f64,
    /// Curve magnitude below which the track is straight, degrees
    #[serde(default = "default_straight_threshold")]
    pub straight_threshold: f64,
    /// Steering magnitude below which the wheel is centred, degrees
    #[serde(default = "default_steering_threshold")]
    pub steering_threshold: f64,
    /// Heading error at which alignment scores drop to zero, degrees
    #[serde(default = "default_heading_tolerance")]
    pub heading_tolerance: f64,
    /// Relative distance from centre that still earns full reward
    #[serde(default = "default_center_dead_band")]
    pub center_dead_band: f64,
    /// Steering penalty per (m/s * degree)
    #[serde(default = "default_steering_penalty")]
    pub steering_penalty: f64,
}

fn default_lap_steps() -> f64 {
    300.0
}

fn default_max_speed() -> f64 {
    4.0
}

fn default_near_max_ratio() -> f64 {
    0.9
}

fn default_straight_threshold() -> f64 {
    1.0
}

fn default_steering_threshold() -> f64 {
    1.0
}

fn default_heading_tolerance() -> f64 {
    30.0
}

fn default_center_dead_band() -> f64 {
    0.3
}

fn default_steering_penalty() -> f64 {
    0.02
}

impl Default for RewardParams {
    fn default() -> Self {
        Self {
            lap_steps: default_lap_steps(),
            max_speed: default_max_speed(),
            near_max_ratio: default_near_max_ratio(),
            straight_threshold: default_straight_threshold(),
            steering_threshold: default_steering_threshold(),
            heading_tolerance: default_heading_tolerance(),
            center_dead_band: default_center_dead_band(),
            steering_penalty: default_steering_penalty(),
        }
    }
}

/// Reward configuration: which term set, its constants and weight overrides
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardConfig {
    /// Term set to register
    #[serde(default)]
    pub variant: Variant,
    /// Initial running reward
    #[serde(default = "default_baseline")]
    pub baseline: f64,
    /// Term constants
    #[serde(default)]
    pub params: RewardParams,
    /// Weight multipliers by term name, replacing the built-in weight
    #[serde(default)]
    pub weights: HashMap<String, f64>,
}

fn default_baseline() -> f64 {
    0.1
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self::for_variant(Variant::default())
    }
}

impl RewardConfig {
    /// Default baseline, constants and weights for `variant`
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            variant,
            baseline: default_baseline(),
            params: RewardParams::default(),
            weights: HashMap::new(),
        }
    }

    /// Parse a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the immutable term set
    pub fn build(&self) -> Result<TermSet> {
        let mut terms = self.variant.terms();

        for (name, &weight) in &self.weights {
            let term = terms
                .iter_mut()
                .find(|term| term.name == name.as_str())
                .ok_or_else(|| RewardError::UnknownTerm(name.clone()))?;
            *term = term.with_weight(weight);
        }

        Ok(TermSet::new(self.baseline, self.params.clone(), terms))
    }
}
