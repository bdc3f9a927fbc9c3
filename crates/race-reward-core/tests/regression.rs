//! Pinned rewards for a reference telemetry snapshot

use race_reward_core::{
    RewardComposer, RewardConfig, RewardError, RewardFunction, Telemetry, Variant,
    reward_function, track_keeping_reward,
};

const SAMPLE: &str = r#"{
    "progress": 50,
    "steps": 150,
    "track_width": 0.6,
    "distance_from_center": 0.0,
    "speed": 1.0,
    "steering_angle": 15,
    "waypoints": [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 1.0]],
    "closest_waypoints": [3, 4],
    "heading": 45.0
}"#;

fn sample() -> Telemetry {
    Telemetry::from_json(SAMPLE).unwrap()
}

#[test]
fn test_centerline_baseline() {
    // 0.1 + 2.0 (centre) + 0.5 (progress) + 1.0 (pace) + 0.7 (steering), both headings off by > 30
    assert_eq!(reward_function(&sample()).unwrap(), 4.3);
}

#[test]
fn test_track_keeping_baseline() {
    let telemetry = sample().with("all_wheels_on_track", true);
    // 0.1 + 0.7 (steering) + 2.0 (on track), wheel turned and car slow on a straight
    let reward = track_keeping_reward(&telemetry).unwrap();
    assert_eq!(reward, 2.8);
    assert_ne!(reward, reward_function(&telemetry).unwrap());
}

#[test]
fn test_track_keeping_needs_wheel_flag() {
    assert_eq!(
        track_keeping_reward(&sample()),
        Err(RewardError::MissingKey("all_wheels_on_track".into()))
    );
}

#[test]
fn test_repeat_calls_bit_identical() {
    let telemetry = sample().with("all_wheels_on_track", true);
    for variant in [Variant::Centerline, Variant::TrackKeeping] {
        let composer = RewardComposer::for_variant(variant);
        let first = composer.compose(&telemetry).unwrap();
        let second = composer.compose(&telemetry).unwrap();
        assert_eq!(first.to_bits(), second.to_bits(), "{variant}");
    }
}

#[test]
fn test_zero_steps_fails() {
    let telemetry = sample().with("steps", 0);
    assert_eq!(reward_function(&telemetry), Err(RewardError::ZeroSteps));
}

#[test]
fn test_zero_track_width_fails() {
    let telemetry = sample().with("track_width", 0.0);
    assert_eq!(
        reward_function(&telemetry),
        Err(RewardError::InvalidTrackWidth(0.0))
    );
}

#[test]
fn test_breakdown_matches_total() {
    let composer = RewardComposer::for_variant(Variant::Centerline);
    let reward = composer.compute(&sample()).unwrap();

    assert_eq!(reward.value, 4.3);
    assert_eq!(reward.components.len(), 6);
    assert_eq!(reward.components["stay_near_center"], 2.0);
    assert_eq!(reward.components["reward_speed"], 1.0);
    assert_eq!(reward.components["heading_reward"], 0.0);
    assert_eq!(reward.components["steering_heading_reward"], 0.0);
}

#[test]
fn test_configured_weights() {
    let config = RewardConfig::from_json(
        r#"{"variant": "centerline", "baseline": 0.0, "weights": {"stay_near_center": 0.0}}"#,
    )
    .unwrap();
    let composer = RewardComposer::from_config(&config).unwrap();
    let reward = composer.compose(&sample()).unwrap();
    assert!((reward - 2.2).abs() < 1e-12, "got {reward}");
}
