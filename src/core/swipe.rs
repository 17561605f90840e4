//! Swipe resolver: final drag offset → direction
//!
//! The dominant axis decides. `|dx| > |dy|` is horizontal, everything else
//! (ties included) is vertical. Only the dominant axis is compared against the
//! threshold, so a long diagonal that is under the threshold on its dominant
//! axis resolves to nothing.

use crate::config::GestureConfig;
use crate::types::{DragOffset, ReasonCode, SwipeDirection};
use crate::DIRECTIONAL_THRESHOLD;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeResolver {
    threshold: f64,
}

impl Default for SwipeResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SwipeResolver {
    pub fn new() -> Self {
        Self::with_threshold(DIRECTIONAL_THRESHOLD)
    }

    pub fn with_threshold(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn from_config(config: &GestureConfig) -> Self {
        Self::with_threshold(config.directional_threshold)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Direction whose threshold the offset strictly exceeds, if any
    pub fn resolve(&self, offset: &DragOffset) -> Option<SwipeDirection> {
        if offset.is_horizontal() {
            if offset.dx > self.threshold {
                Some(SwipeDirection::Right)
            } else if offset.dx < -self.threshold {
                Some(SwipeDirection::Left)
            } else {
                None
            }
        } else if offset.dy < -self.threshold {
            Some(SwipeDirection::Up)
        } else if offset.dy > self.threshold {
            Some(SwipeDirection::Down)
        } else {
            None
        }
    }

    /// Reason code for a resolution
    pub fn reason(direction: Option<SwipeDirection>) -> ReasonCode {
        match direction {
            Some(SwipeDirection::Right) => ReasonCode::S101_SWIPE_RIGHT,
            Some(SwipeDirection::Left) => ReasonCode::S102_SWIPE_LEFT,
            Some(SwipeDirection::Up) => ReasonCode::S103_SWIPE_UP,
            Some(SwipeDirection::Down) => ReasonCode::S104_SWIPE_DOWN,
            None => ReasonCode::S105_BELOW_THRESHOLD,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(dx: f64, dy: f64) -> Option<SwipeDirection> {
        SwipeResolver::new().resolve(&DragOffset::new(dx, dy))
    }

    #[test]
    fn test_four_directions() {
        assert_eq!(resolve(150.0, 0.0), Some(SwipeDirection::Right));
        assert_eq!(resolve(-150.0, 0.0), Some(SwipeDirection::Left));
        assert_eq!(resolve(0.0, -150.0), Some(SwipeDirection::Up));
        assert_eq!(resolve(0.0, 150.0), Some(SwipeDirection::Down));
    }

    #[test]
    fn test_threshold_is_strict() {
        assert_eq!(resolve(100.0, 0.0), None);
        assert_eq!(resolve(0.0, -100.0), None);
        assert_eq!(resolve(100.5, 0.0), Some(SwipeDirection::Right));
    }

    #[test]
    fn test_tie_goes_vertical() {
        assert_eq!(resolve(150.0, 150.0), Some(SwipeDirection::Down));
        assert_eq!(resolve(-150.0, -150.0), Some(SwipeDirection::Up));
    }

    #[test]
    fn test_only_dominant_axis_counts() {
        // horizontal dominant but under threshold, vertical never checked
        assert_eq!(resolve(99.0, 98.0), None);
        assert_eq!(resolve(0.0, 0.0), None);
        assert_eq!(resolve(50.0, 50.0), None);
    }

    #[test]
    fn test_custom_threshold() {
        let resolver = SwipeResolver::with_threshold(40.0);
        assert_eq!(
            resolver.resolve(&DragOffset::new(50.0, 10.0)),
            Some(SwipeDirection::Right)
        );
    }
}
