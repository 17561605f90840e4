//! Reason codes for gesture decisions and lifecycle transitions

use serde::{Deserialize, Serialize};

/// Reason codes attached to every classification and lifecycle output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ReasonCode {
    // =========================================================================
    // G0xx: Circle detection
    // =========================================================================
    /// All circle conditions hold
    G001_CIRCLE_DETECTED,
    /// Fewer samples than the minimum
    G002_CIRCLE_TOO_FEW_SAMPLES,
    /// Bounding box narrower or shorter than the minimum
    G003_CIRCLE_TOO_SMALL,
    /// First and last sample too far apart
    G004_CIRCLE_NOT_CLOSED,
    /// At least one quadrant around the centre has no sample
    G005_CIRCLE_MISSING_QUADRANT,

    // =========================================================================
    // S1xx: Swipe resolution
    // =========================================================================
    S101_SWIPE_RIGHT,
    S102_SWIPE_LEFT,
    S103_SWIPE_UP,
    S104_SWIPE_DOWN,
    /// Dominant axis did not cross the threshold
    S105_BELOW_THRESHOLD,

    // =========================================================================
    // L2xx: Card lifecycle
    // =========================================================================
    /// Pointer down on an idle card
    L201_DRAG_STARTED,
    /// Sample appended while dragging
    L202_SAMPLE_RECORDED,
    /// Input arrived in a state that does not accept it
    L203_INPUT_IGNORED,
    /// Swipe resolved, card flying off-screen
    L204_EXIT_STARTED,
    /// Circle resolved, card popping and shrinking
    L205_SAVE_STARTED,
    /// No outcome, card snapping back
    L206_RETURN_STARTED,
    /// Exit animation finished, event emitted
    L207_EXIT_COMPLETED,
    /// Return animation finished, card idle again
    L208_RETURN_COMPLETED,
    /// Animation did not report back in time and was forced
    L209_ANIMATION_TIMED_OUT,
    /// Completion token does not match the pending intent
    L210_STALE_ANIMATION_TOKEN,
}

impl ReasonCode {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::G001_CIRCLE_DETECTED => "G001_CIRCLE_DETECTED",
            Self::G002_CIRCLE_TOO_FEW_SAMPLES => "G002_CIRCLE_TOO_FEW_SAMPLES",
            Self::G003_CIRCLE_TOO_SMALL => "G003_CIRCLE_TOO_SMALL",
            Self::G004_CIRCLE_NOT_CLOSED => "G004_CIRCLE_NOT_CLOSED",
            Self::G005_CIRCLE_MISSING_QUADRANT => "G005_CIRCLE_MISSING_QUADRANT",
            Self::S101_SWIPE_RIGHT => "S101_SWIPE_RIGHT",
            Self::S102_SWIPE_LEFT => "S102_SWIPE_LEFT",
            Self::S103_SWIPE_UP => "S103_SWIPE_UP",
            Self::S104_SWIPE_DOWN => "S104_SWIPE_DOWN",
            Self::S105_BELOW_THRESHOLD => "S105_BELOW_THRESHOLD",
            Self::L201_DRAG_STARTED => "L201_DRAG_STARTED",
            Self::L202_SAMPLE_RECORDED => "L202_SAMPLE_RECORDED",
            Self::L203_INPUT_IGNORED => "L203_INPUT_IGNORED",
            Self::L204_EXIT_STARTED => "L204_EXIT_STARTED",
            Self::L205_SAVE_STARTED => "L205_SAVE_STARTED",
            Self::L206_RETURN_STARTED => "L206_RETURN_STARTED",
            Self::L207_EXIT_COMPLETED => "L207_EXIT_COMPLETED",
            Self::L208_RETURN_COMPLETED => "L208_RETURN_COMPLETED",
            Self::L209_ANIMATION_TIMED_OUT => "L209_ANIMATION_TIMED_OUT",
            Self::L210_STALE_ANIMATION_TOKEN => "L210_STALE_ANIMATION_TOKEN",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::G001_CIRCLE_DETECTED => "Closed loop detected",
            Self::G002_CIRCLE_TOO_FEW_SAMPLES => "Too few samples for a circle",
            Self::G003_CIRCLE_TOO_SMALL => "Loop too small",
            Self::G004_CIRCLE_NOT_CLOSED => "Loop not closed",
            Self::G005_CIRCLE_MISSING_QUADRANT => "Path did not go all the way around",
            Self::S101_SWIPE_RIGHT => "Swiped right",
            Self::S102_SWIPE_LEFT => "Swiped left",
            Self::S103_SWIPE_UP => "Swiped up",
            Self::S104_SWIPE_DOWN => "Swiped down",
            Self::S105_BELOW_THRESHOLD => "Movement below threshold",
            Self::L201_DRAG_STARTED => "Drag started",
            Self::L202_SAMPLE_RECORDED => "Sample recorded",
            Self::L203_INPUT_IGNORED => "Input ignored in current state",
            Self::L204_EXIT_STARTED => "Card leaving the stack",
            Self::L205_SAVE_STARTED => "Card being saved",
            Self::L206_RETURN_STARTED => "Card returning to origin",
            Self::L207_EXIT_COMPLETED => "Card gone, interaction emitted",
            Self::L208_RETURN_COMPLETED => "Card back at rest",
            Self::L209_ANIMATION_TIMED_OUT => "Animation timed out, forced",
            Self::L210_STALE_ANIMATION_TOKEN => "Stale animation completion",
        }
    }

    /// Circle rejection reasons
    pub fn is_circle_rejection(&self) -> bool {
        matches!(
            self,
            Self::G002_CIRCLE_TOO_FEW_SAMPLES
                | Self::G003_CIRCLE_TOO_SMALL
                | Self::G004_CIRCLE_NOT_CLOSED
                | Self::G005_CIRCLE_MISSING_QUADRANT
        )
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
