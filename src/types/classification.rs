//! Results of the gesture recognizers

use serde::{Deserialize, Serialize};

use crate::types::{BoundingBox, DragOffset, InteractionType, ReasonCode};

/// Circle detector result with the measurements behind it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleVerdict {
    pub is_circle: bool,
    pub reason: ReasonCode,
    pub sample_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<BoundingBox>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closure_distance: Option<f64>,
}

impl CircleVerdict {
    pub fn rejected(reason: ReasonCode, sample_count: usize) -> Self {
        Self {
            is_circle: false,
            reason,
            sample_count,
            bounds: None,
            closure_distance: None,
        }
    }
}

/// One decision per drag-end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// `None` means snap back with no event
    pub kind: Option<InteractionType>,
    pub reason: ReasonCode,
    pub offset: DragOffset,
    pub circle: CircleVerdict,
}

impl Classification {
    pub fn is_resolved(&self) -> bool {
        self.kind.is_some()
    }
}
