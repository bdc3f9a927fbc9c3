//! Track bearing and curvature from the waypoint polyline
//!
//! Waypoints form a closed loop, so every index is taken modulo the number
//! of points. Bearings are in degrees, counter-clockwise from +x.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RewardError};
use crate::telemetry::Telemetry;

/// 2D track point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Point at `(x, y)` in track coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Bearing of the segment from `self` to `to`, in degrees
    pub fn bearing_to(&self, to: &Point) -> f64 {
        (to.y - self.y).atan2(to.x - self.x).to_degrees()
    }
}

/// Track bearing around the car.
///
/// The segment runs from `waypoints_behind` points before the previous
/// closest waypoint to `waypoints_ahead` points after the next one.
pub fn track_direction(
    telemetry: &Telemetry,
    waypoints_ahead: usize,
    waypoints_behind: usize,
) -> Result<f64> {
    let waypoints = telemetry.points("waypoints")?;
    let [prev, next] = telemetry.index_pair("closest_waypoints")?;

    let n = waypoints.len();
    if n == 0 {
        return Err(RewardError::EmptyWaypoints);
    }

    // Reduce before combining so arbitrarily large indices cannot overflow
    let next_point = &waypoints[(next % n + waypoints_ahead % n) % n];
    let prev_point = &waypoints[(prev % n + n - waypoints_behind % n) % n];

    Ok(prev_point.bearing_to(next_point))
}

/// Signed bend of the track ahead, in degrees within (-180, 180].
///
/// Compares the wide segment (one point behind, three ahead) with the
/// immediate one between the two closest waypoints.
pub fn track_curve(telemetry: &Telemetry) -> Result<f64> {
    let local = track_direction(telemetry, 0, 0)?;
    let wide = track_direction(telemetry, 3, 1)?;
    Ok(normalize_degrees(wide - local))
}

/// Whether a curve value counts as straight track
pub fn is_straight(curve: f64, threshold: f64) -> bool {
    curve.abs() < threshold
}

/// Shortest circular distance between two bearings, in [0, 180]
pub fn angle_diff(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs() % 360.0;
    if diff > 180.0 { 360.0 - diff } else { diff }
}

/// Wrap an angle into (-180, 180]
fn normalize_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 { wrapped - 360.0 } else { wrapped }
}
