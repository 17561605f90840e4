//! Card lifecycle state definitions

use colored::Color;
use serde::{Deserialize, Serialize};

/// States of the top card's interaction machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardState {
    /// At rest at the origin, waiting for a touch
    Idle,
    /// Pointer down, trajectory recording
    Dragging,
    /// Pointer released, classification running
    Resolving,
    /// Flying off-screen after a swipe
    ExitingDirectional,
    /// Pop and shrink after a circle
    ExitingSave,
    /// Snapping back to the origin
    Returning,
    /// Removed from the stack
    Gone,
}

impl CardState {
    /// Accepts pointer input
    pub fn is_interactive(&self) -> bool {
        matches!(self, CardState::Idle | CardState::Dragging)
    }

    /// Waiting on an animation completion
    pub fn is_animating(&self) -> bool {
        matches!(
            self,
            CardState::ExitingDirectional | CardState::ExitingSave | CardState::Returning
        )
    }

    pub fn is_terminal(&self) -> bool {
        *self == CardState::Gone
    }

    /// Terminal color for display
    pub fn color(&self) -> Color {
        match self {
            CardState::Idle => Color::BrightBlack,
            CardState::Dragging => Color::Cyan,
            CardState::Resolving => Color::Yellow,
            CardState::ExitingDirectional => Color::Green,
            CardState::ExitingSave => Color::Magenta,
            CardState::Returning => Color::Yellow,
            CardState::Gone => Color::Blue,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            CardState::Idle => "🃏",
            CardState::Dragging => "✋",
            CardState::Resolving => "⏳",
            CardState::ExitingDirectional => "💨",
            CardState::ExitingSave => "⭐",
            CardState::Returning => "↩️",
            CardState::Gone => "✔️",
        }
    }
}

impl std::fmt::Display for CardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CardState::Idle => "IDLE",
            CardState::Dragging => "DRAGGING",
            CardState::Resolving => "RESOLVING",
            CardState::ExitingDirectional => "EXITING_DIRECTIONAL",
            CardState::ExitingSave => "EXITING_SAVE",
            CardState::Returning => "RETURNING",
            CardState::Gone => "GONE",
        };
        write!(f, "{}", name)
    }
}
