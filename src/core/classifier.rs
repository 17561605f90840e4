//! Gesture classifier: one decision per drag-end
//!
//! Circle first. A trajectory that passes the circle check is a save even when
//! its offset also crosses a swipe threshold.

use crate::config::GestureConfig;
use crate::core::{CircleDetector, SwipeResolver};
use crate::types::{Classification, DragOffset, InteractionType, ReasonCode, Trajectory};

/// Stateless; the same input always classifies the same way
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GestureClassifier {
    circle: CircleDetector,
    swipe: SwipeResolver,
}

impl GestureClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &GestureConfig) -> Self {
        Self {
            circle: CircleDetector::from_config(config),
            swipe: SwipeResolver::from_config(config),
        }
    }

    pub fn classify(&self, trajectory: &Trajectory, offset: &DragOffset) -> Option<InteractionType> {
        self.classify_detailed(trajectory, offset).kind
    }

    /// Classification with the reason and circle measurements attached
    pub fn classify_detailed(&self, trajectory: &Trajectory, offset: &DragOffset) -> Classification {
        let circle = self.circle.evaluate(trajectory);
        if circle.is_circle {
            return Classification {
                kind: Some(InteractionType::Save),
                reason: ReasonCode::G001_CIRCLE_DETECTED,
                offset: *offset,
                circle,
            };
        }

        let direction = self.swipe.resolve(offset);
        Classification {
            kind: direction.map(|d| d.interaction()),
            reason: SwipeResolver::reason(direction),
            offset: *offset,
            circle,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
