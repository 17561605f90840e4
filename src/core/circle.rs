//! Circle detector: coarse closed-loop heuristic behind the save gesture
//!
//! Checks, in order:
//! - sample count >= min_samples
//! - bounding box width and height >= min_bound_size
//! - first-to-last distance <= max_closure_distance
//! - at least one sample strictly inside each quadrant around the box centre
//!
//! This is not a curve fit. A large, roughly closed squiggle that touches all
//! four quadrants is a circle.

use crate::config::GestureConfig;
use crate::types::{CircleVerdict, ReasonCode, Trajectory};
use crate::{CIRCLE_MAX_CLOSURE_DISTANCE, CIRCLE_MIN_BOUND_SIZE, CIRCLE_MIN_SAMPLES};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleDetector {
    min_samples: usize,
    min_bound_size: f64,
    max_closure_distance: f64,
}

impl Default for CircleDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl CircleDetector {
    pub fn new() -> Self {
        Self {
            min_samples: CIRCLE_MIN_SAMPLES,
            min_bound_size: CIRCLE_MIN_BOUND_SIZE,
            max_closure_distance: CIRCLE_MAX_CLOSURE_DISTANCE,
        }
    }

    pub fn from_config(config: &GestureConfig) -> Self {
        Self {
            min_samples: config.circle_min_samples,
            min_bound_size: config.circle_min_bound_size,
            max_closure_distance: config.circle_max_closure_distance,
        }
    }

    pub fn is_circle(&self, trajectory: &Trajectory) -> bool {
        self.evaluate(trajectory).is_circle
    }

    /// Run every check and report the first one that fails
    pub fn evaluate(&self, trajectory: &Trajectory) -> CircleVerdict {
        let sample_count = trajectory.len();
        if sample_count < self.min_samples {
            return CircleVerdict::rejected(ReasonCode::G002_CIRCLE_TOO_FEW_SAMPLES, sample_count);
        }

        let bounds = match trajectory.bounding_box() {
            Some(b) => b,
            None => {
                return CircleVerdict::rejected(
                    ReasonCode::G002_CIRCLE_TOO_FEW_SAMPLES,
                    sample_count,
                )
            }
        };
        let closure_distance = trajectory.closure_distance();

        let verdict = |is_circle: bool, reason: ReasonCode| CircleVerdict {
            is_circle,
            reason,
            sample_count,
            bounds: Some(bounds),
            closure_distance,
        };

        if bounds.width() < self.min_bound_size || bounds.height() < self.min_bound_size {
            return verdict(false, ReasonCode::G003_CIRCLE_TOO_SMALL);
        }

        if closure_distance.map_or(true, |d| d > self.max_closure_distance) {
            return verdict(false, ReasonCode::G004_CIRCLE_NOT_CLOSED);
        }

        if !covers_all_quadrants(trajectory, bounds.center().x, bounds.center().y) {
            return verdict(false, ReasonCode::G005_CIRCLE_MISSING_QUADRANT);
        }

        verdict(true, ReasonCode::G001_CIRCLE_DETECTED)
    }
}

/// Samples on a centre line count for no quadrant
fn covers_all_quadrants(trajectory: &Trajectory, cx: f64, cy: f64) -> bool {
    let mut seen = [false; 4];
    for p in trajectory.points() {
        if p.x > cx && p.y < cy {
            seen[0] = true;
        }
        if p.x < cx && p.y < cy {
            seen[1] = true;
        }
        if p.x < cx && p.y > cy {
            seen[2] = true;
        }
        if p.x > cx && p.y > cy {
            seen[3] = true;
        }
        if seen.iter().all(|q| *q) {
            return true;
        }
    }
    false
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PointSample;

    /// Closed loop around (cx, cy)
    fn loop_points(cx: f64, cy: f64, r: f64, n: usize) -> Trajectory {
        let points = (0..=n)
            .map(|i| {
                let a = std::f64::consts::TAU * i as f64 / n as f64;
                PointSample::new(cx + r * a.cos(), cy + r * a.sin())
            })
            .collect();
        Trajectory::from_points(points)
    }

    #[test]
    fn test_round_loop_is_circle() {
        let detector = CircleDetector::new();
        let verdict = detector.evaluate(&loop_points(200.0, 200.0, 60.0, 32));
        assert!(verdict.is_circle);
        assert_eq!(verdict.reason, ReasonCode::G001_CIRCLE_DETECTED);
    }

    #[test]
    fn test_too_few_samples() {
        let detector = CircleDetector::new();
        let t = loop_points(0.0, 0.0, 80.0, 18); // 19 points
        assert_eq!(t.len(), 19);
        let verdict = detector.evaluate(&t);
        assert!(!verdict.is_circle);
        assert_eq!(verdict.reason, ReasonCode::G002_CIRCLE_TOO_FEW_SAMPLES);
    }

    #[test]
    fn test_empty_is_not_circle() {
        assert!(!CircleDetector::new().is_circle(&Trajectory::new()));
    }

    #[test]
    fn test_small_loop_rejected() {
        let verdict = CircleDetector::new().evaluate(&loop_points(0.0, 0.0, 20.0, 40));
        assert_eq!(verdict.reason, ReasonCode::G003_CIRCLE_TOO_SMALL);
    }

    #[test]
    fn test_open_arc_rejected() {
        // three quarters of a big circle: start and end ~141 apart
        let points = (0..=30)
            .map(|i| {
                let a = 1.5 * std::f64::consts::PI * i as f64 / 30.0;
                PointSample::new(100.0 * a.cos(), 100.0 * a.sin())
            })
            .collect();
        let verdict = CircleDetector::new().evaluate(&Trajectory::from_points(points));
        assert_eq!(verdict.reason, ReasonCode::G004_CIRCLE_NOT_CLOSED);
    }

    #[test]
    fn test_back_and_forth_misses_quadrants() {
        // diagonal out and back: big box, closed, but only two quadrants
        let mut points = Vec::new();
        for i in 0..=12 {
            points.push(PointSample::new(i as f64 * 10.0, i as f64 * 10.0));
        }
        for i in (0..12).rev() {
            points.push(PointSample::new(i as f64 * 10.0, i as f64 * 10.0));
        }
        let verdict = CircleDetector::new().evaluate(&Trajectory::from_points(points));
        assert_eq!(verdict.reason, ReasonCode::G005_CIRCLE_MISSING_QUADRANT);
    }

    #[test]
    fn test_exact_minimum_size_accepted() {
        // square of side exactly 50, closure exactly 0
        let mut points = Vec::new();
        for i in 0..5 {
            points.push(PointSample::new(i as f64 * 10.0, 0.0));
        }
        for i in 0..5 {
            points.push(PointSample::new(50.0, i as f64 * 10.0));
        }
        for i in 0..5 {
            points.push(PointSample::new(50.0 - i as f64 * 10.0, 50.0));
        }
        for i in 0..5 {
            points.push(PointSample::new(0.0, 50.0 - i as f64 * 10.0));
        }
        points.push(PointSample::new(0.0, 0.0));
        assert_eq!(points.len(), 21);
        assert!(CircleDetector::new().is_circle(&Trajectory::from_points(points)));
    }

    #[test]
    fn test_config_thresholds_apply() {
        let config = GestureConfig {
            circle_min_samples: 50,
            ..GestureConfig::default()
        };
        let detector = CircleDetector::from_config(&config);
        assert!(!detector.is_circle(&loop_points(0.0, 0.0, 60.0, 32)));
        assert!(detector.is_circle(&loop_points(0.0, 0.0, 60.0, 64)));
    }
}
