//! # race-reward-core
//!
//! Reward shaping for a simulated autonomous race car.
//!
//! Each simulation step the training harness hands over a telemetry snapshot
//! and receives one scalar reward. This crate provides:
//! - Typed access to the telemetry snapshot
//! - Track bearing and curvature from the waypoint polyline
//! - Weighted scoring terms and the two built-in term sets
//! - The composer that folds terms over a baseline reward
//! - Serde-backed configuration for weights and constants

pub mod composer;
pub mod config;
pub mod error;
pub mod geometry;
pub mod reward;
pub mod telemetry;
pub mod terms;

pub use composer::{RewardComposer, reward_function, track_keeping_reward};
pub use config::{RewardConfig, RewardParams, Variant};
pub use error::{Result, RewardError};
pub use geometry::{Point, angle_diff, is_straight, track_curve, track_direction};
pub use reward::{
    Reward, RewardComponentDef, RewardComponents, RewardFunction, ScoreFn, ScoringTerm, TermSet,
};
pub use telemetry::Telemetry;
