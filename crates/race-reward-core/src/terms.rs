//! Built-in scoring terms
//!
//! Every term is a pure function of the telemetry snapshot. None of them
//! reads the running reward today, but the signature carries it so a term
//! may scale with what has been earned so far.

use crate::config::RewardParams;
use crate::error::{Result, RewardError};
use crate::geometry::{angle_diff, is_straight, track_curve, track_direction};
use crate::reward::ScoringTerm;
use crate::telemetry::Telemetry;

pub const STAY_NEAR_CENTER: ScoringTerm = ScoringTerm {
    name: "stay_near_center",
    description: "Keep the car close to the centre line",
    range: Some([0.0, 1.0]),
    weight: 2.0,
    score: stay_near_center,
};

pub const INCREASING_PROGRESS: ScoringTerm = ScoringTerm {
    name: "increasing_progress",
    description: "The closer to the finish, the higher the reward",
    range: Some([0.0, 1.0]),
    weight: 1.0,
    score: increasing_progress,
};

pub const REWARD_SPEED: ScoringTerm = ScoringTerm {
    name: "reward_speed",
    description: "Reward lap pace, about 1.0 when on target for the lap step budget",
    range: None,
    weight: 1.0,
    score: reward_speed,
};

pub const REDUCE_HIGH_SPEED_STEERING: ScoringTerm = ScoringTerm {
    name: "reduce_high_speed_steering",
    description: "Penalise steering, more at higher speed",
    range: None,
    weight: 1.0,
    score: reduce_high_speed_steering,
};

pub const HEADING_REWARD: ScoringTerm = ScoringTerm {
    name: "heading_reward",
    description: "Reward pointing along the track",
    range: Some([0.0, 1.0]),
    weight: 1.0,
    score: heading_reward,
};

pub const STEERING_HEADING_REWARD: ScoringTerm = ScoringTerm {
    name: "steering_heading_reward",
    description: "Reward steering towards the track a few waypoints ahead",
    range: Some([0.0, 1.0]),
    weight: 2.0,
    score: steering_heading_reward,
};

pub const STAY_ON_TRACK: ScoringTerm = ScoringTerm {
    name: "stay_on_track",
    description: "Reward keeping all wheels on the track",
    range: Some([0.0, 1.0]),
    weight: 2.0,
    score: stay_on_track,
};

pub const NO_STEERING_ON_STRAIGHT: ScoringTerm = ScoringTerm {
    name: "no_steering_on_straight",
    description: "Reward a centred wheel on straights",
    range: Some([0.0, 1.0]),
    weight: 2.0,
    score: no_steering_on_straight,
};

pub const SPEEDUP_ON_STRAIGHT: ScoringTerm = ScoringTerm {
    name: "speedup_on_straight",
    description: "Reward flat out on straights and backing off in curves",
    range: Some([0.0, 1.0]),
    weight: 3.0,
    score: speedup_on_straight,
};

/// Full reward inside the dead band around the centre line, falling to zero
/// at `1 + center_dead_band` half-widths out.
///
/// Fails with [`RewardError::InvalidTrackWidth`] unless the width is positive.
pub fn stay_near_center(t: &Telemetry, params: &RewardParams, _reward: f64) -> Result<f64> {
    let track_width = t.f64("track_width")?;
    if track_width.is_nan() || track_width <= 0.0 {
        return Err(RewardError::InvalidTrackWidth(track_width));
    }
    let distance_from_center = t.f64("distance_from_center")?;
    let rel_dist = distance_from_center / (track_width / 2.0);
    Ok((1.0 - (rel_dist - params.center_dead_band)).clamp(0.0, 1.0))
}

/// Progress percentage scaled to [0, 1]
pub fn increasing_progress(t: &Telemetry, _params: &RewardParams, _reward: f64) -> Result<f64> {
    Ok(t.f64("progress")? * 0.01)
}

/// Progress per step, scaled so finishing in `lap_steps` earns 1.0.
///
/// Fails with [`RewardError::ZeroSteps`] before the first step.
pub fn reward_speed(t: &Telemetry, params: &RewardParams, _reward: f64) -> Result<f64> {
    let progress = t.f64("progress")?;
    let steps = t.f64("steps")?;
    if steps == 0.0 {
        return Err(RewardError::ZeroSteps);
    }
    Ok(progress / 100.0 / steps * params.lap_steps)
}

/// Goes negative for hard steering at speed.
pub fn reduce_high_speed_steering(
    t: &Telemetry,
    params: &RewardParams,
    _reward: f64,
) -> Result<f64> {
    let speed = t.f64("speed")?;
    let steering_angle = t.f64("steering_angle")?;
    Ok(1.0 - params.steering_penalty * speed * steering_angle.abs())
}

/// Alignment of the car's heading with the next track segment
pub fn heading_reward(t: &Telemetry, params: &RewardParams, _reward: f64) -> Result<f64> {
    let heading = t.f64("heading")?;
    let direction = track_direction(t, 1, 0)?;
    Ok(alignment(direction, heading, params))
}

/// Alignment of heading plus steering with the track three waypoints ahead
pub fn steering_heading_reward(t: &Telemetry, params: &RewardParams, _reward: f64) -> Result<f64> {
    let heading = t.f64("heading")?;
    let steering_angle = t.f64("steering_angle")?;
    let direction = track_direction(t, 3, 0)?;
    Ok(alignment(direction, heading + steering_angle, params))
}

/// 1.0 while all wheels are on the track
pub fn stay_on_track(t: &Telemetry, _params: &RewardParams, _reward: f64) -> Result<f64> {
    Ok(indicator(t.bool("all_wheels_on_track")?))
}

/// 1.0 when the wheel is centred on a straight
pub fn no_steering_on_straight(t: &Telemetry, params: &RewardParams, _reward: f64) -> Result<f64> {
    let steering_angle = t.f64("steering_angle")?;
    let straight = is_straight(track_curve(t)?, params.straight_threshold);
    Ok(indicator(
        straight && steering_angle.abs() < params.steering_threshold,
    ))
}

/// 1.0 when flat out on a straight, or below flat out in a curve
pub fn speedup_on_straight(t: &Telemetry, params: &RewardParams, _reward: f64) -> Result<f64> {
    let speed = t.f64("speed")?;
    let flat_out = speed >= params.max_speed * params.near_max_ratio;
    let straight = is_straight(track_curve(t)?, params.straight_threshold);
    Ok(indicator(straight == flat_out))
}

fn alignment(direction: f64, bearing: f64, params: &RewardParams) -> f64 {
    (1.0 - angle_diff(direction, bearing) / params.heading_tolerance).max(0.0)
}

fn indicator(condition: bool) -> f64 {
    if condition { 1.0 } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params() -> RewardParams {
        RewardParams::default()
    }

    fn straight_track(closest: [usize; 2]) -> Telemetry {
        Telemetry::new()
            .with(
                "waypoints",
                json!([[0.0, 0.0], [1.0, 0.0], [2.0, 0.0], [3.0, 0.0], [4.0, 0.0], [5.0, 0.0], [6.0, 0.0]]),
            )
            .with("closest_waypoints", json!(closest))
    }

    fn bend_track() -> Telemetry {
        Telemetry::new()
            .with(
                "waypoints",
                json!([[0.0, 0.0], [1.0, 0.0], [2.0, 0.0], [3.0, 1.0], [3.0, 2.0], [3.0, 3.0]]),
            )
            .with("closest_waypoints", json!([1, 2]))
    }

    #[test]
    fn test_stay_near_center_on_centre_line() {
        for width in [0.3, 0.6, 1.07, 4.0] {
            let t = Telemetry::new()
                .with("track_width", width)
                .with("distance_from_center", 0.0);
            assert_eq!(stay_near_center(&t, &params(), 0.1).unwrap(), 1.0);
        }
    }

    #[test]
    fn test_stay_near_center_falls_off() {
        let at = |distance: f64| {
            let t = Telemetry::new()
                .with("track_width", 1.0)
                .with("distance_from_center", distance);
            stay_near_center(&t, &params(), 0.0).unwrap()
        };
        // Inside the dead band the reward stays maxed out
        assert_eq!(at(0.15), 1.0);
        assert!((at(0.25) - 0.8).abs() < 1e-12);
        assert_eq!(at(0.9), 0.0);
    }

    #[test]
    fn test_stay_near_center_rejects_zero_width() {
        for width in [0.0, -0.6] {
            let t = Telemetry::new()
                .with("track_width", width)
                .with("distance_from_center", 0.0);
            assert_eq!(
                stay_near_center(&t, &params(), 0.0),
                Err(RewardError::InvalidTrackWidth(width))
            );
        }
    }

    #[test]
    fn test_increasing_progress() {
        let t = Telemetry::new().with("progress", 50);
        assert_eq!(increasing_progress(&t, &params(), 0.0).unwrap(), 0.5);
    }

    #[test]
    fn test_reward_speed_on_pace() {
        let t = Telemetry::new().with("progress", 50).with("steps", 150);
        assert_eq!(reward_speed(&t, &params(), 0.0).unwrap(), 1.0);
    }

    #[test]
    fn test_reward_speed_zero_steps() {
        let t = Telemetry::new().with("progress", 0).with("steps", 0);
        assert_eq!(reward_speed(&t, &params(), 0.0), Err(RewardError::ZeroSteps));
    }

    #[test]
    fn test_high_speed_steering_goes_negative() {
        let t = Telemetry::new()
            .with("speed", 4.0)
            .with("steering_angle", -30.0);
        let score = reduce_high_speed_steering(&t, &params(), 0.0).unwrap();
        assert!((score - (1.0 - 2.4)).abs() < 1e-12);

        let t = Telemetry::new().with("speed", 1.0).with("steering_angle", 15);
        assert_eq!(reduce_high_speed_steering(&t, &params(), 0.0).unwrap(), 0.7);
    }

    #[test]
    fn test_heading_alignment() {
        let aligned = straight_track([1, 2]).with("heading", 0.0);
        assert_eq!(heading_reward(&aligned, &params(), 0.0).unwrap(), 1.0);

        let off = straight_track([1, 2]).with("heading", 15.0);
        assert_eq!(heading_reward(&off, &params(), 0.0).unwrap(), 0.5);

        let reversed = straight_track([1, 2]).with("heading", 180.0);
        assert_eq!(heading_reward(&reversed, &params(), 0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_steering_heading_counts_steering() {
        let t = straight_track([1, 2])
            .with("heading", 20.0)
            .with("steering_angle", -20.0);
        assert_eq!(steering_heading_reward(&t, &params(), 0.0).unwrap(), 1.0);
    }

    #[test]
    fn test_stay_on_track() {
        let on = Telemetry::new().with("all_wheels_on_track", true);
        let off = Telemetry::new().with("all_wheels_on_track", false);
        assert_eq!(stay_on_track(&on, &params(), 0.0).unwrap(), 1.0);
        assert_eq!(stay_on_track(&off, &params(), 0.0).unwrap(), 0.0);
        assert_eq!(
            stay_on_track(&Telemetry::new(), &params(), 0.0),
            Err(RewardError::MissingKey("all_wheels_on_track".into()))
        );
    }

    #[test]
    fn test_no_steering_on_straight() {
        let centred = straight_track([1, 2]).with("steering_angle", 0.5);
        assert_eq!(no_steering_on_straight(&centred, &params(), 0.0).unwrap(), 1.0);

        let steering = straight_track([1, 2]).with("steering_angle", -5.0);
        assert_eq!(no_steering_on_straight(&steering, &params(), 0.0).unwrap(), 0.0);

        let bend = bend_track().with("steering_angle", 0.0);
        assert_eq!(no_steering_on_straight(&bend, &params(), 0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_speedup_on_straight() {
        let fast_straight = straight_track([1, 2]).with("speed", 3.8);
        let slow_straight = straight_track([1, 2]).with("speed", 2.0);
        let fast_bend = bend_track().with("speed", 4.0);
        let slow_bend = bend_track().with("speed", 1.5);

        assert_eq!(speedup_on_straight(&fast_straight, &params(), 0.0).unwrap(), 1.0);
        assert_eq!(speedup_on_straight(&slow_straight, &params(), 0.0).unwrap(), 0.0);
        assert_eq!(speedup_on_straight(&fast_bend, &params(), 0.0).unwrap(), 0.0);
        assert_eq!(speedup_on_straight(&slow_bend, &params(), 0.0).unwrap(), 1.0);
    }
}
