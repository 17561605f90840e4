//! Interaction outcomes and the events emitted to the feed

use serde::{Deserialize, Serialize};

/// What a completed gesture means for a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionType {
    /// Swipe right
    Relevant,
    /// Swipe up
    RelevantLike,
    /// Swipe left
    Irrelevant,
    /// Swipe down
    IrrelevantDislike,
    /// Circle
    Save,
}

impl InteractionType {
    pub const ALL: [InteractionType; 5] = [
        InteractionType::Relevant,
        InteractionType::RelevantLike,
        InteractionType::Irrelevant,
        InteractionType::IrrelevantDislike,
        InteractionType::Save,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Relevant => "relevant",
            Self::RelevantLike => "relevant_like",
            Self::Irrelevant => "irrelevant",
            Self::IrrelevantDislike => "irrelevant_dislike",
            Self::Save => "save",
        }
    }

    /// Swipe direction that produces this outcome, `None` for save
    pub fn direction(&self) -> Option<SwipeDirection> {
        match self {
            Self::Relevant => Some(SwipeDirection::Right),
            Self::Irrelevant => Some(SwipeDirection::Left),
            Self::RelevantLike => Some(SwipeDirection::Up),
            Self::IrrelevantDislike => Some(SwipeDirection::Down),
            Self::Save => None,
        }
    }

    pub fn is_directional(&self) -> bool {
        self.direction().is_some()
    }

    /// Haptic signal played when this outcome is resolved
    pub fn feedback(&self) -> FeedbackPulse {
        match self {
            Self::Save => FeedbackPulse::Triple,
            _ => FeedbackPulse::Short,
        }
    }
}

impl std::fmt::Display for InteractionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Screen direction of a swipe. Negative y is up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

impl SwipeDirection {
    pub fn interaction(&self) -> InteractionType {
        match self {
            Self::Right => InteractionType::Relevant,
            Self::Left => InteractionType::Irrelevant,
            Self::Up => InteractionType::RelevantLike,
            Self::Down => InteractionType::IrrelevantDislike,
        }
    }

    /// Unit vector in screen coordinates
    pub fn unit(&self) -> (f64, f64) {
        match self {
            Self::Right => (1.0, 0.0),
            Self::Left => (-1.0, 0.0),
            Self::Up => (0.0, -1.0),
            Self::Down => (0.0, 1.0),
        }
    }
}

/// Emitted once per resolved gesture, after the exit animation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionEvent {
    pub post_id: String,
    #[serde(rename = "type")]
    pub kind: InteractionType,
}

impl InteractionEvent {
    pub fn new(post_id: impl Into<String>, kind: InteractionType) -> Self {
        Self {
            post_id: post_id.into(),
            kind,
        }
    }
}

/// Haptic signal sent to the feedback collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackPulse {
    /// Directional swipe
    Short,
    /// Save
    Triple,
}

impl FeedbackPulse {
    /// Vibration pattern in milliseconds (on, off, on, ...)
    pub fn pattern_ms(&self) -> &'static [u64] {
        match self {
            Self::Short => &[20],
            Self::Triple => &[50, 50, 50],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_roundtrip() {
        for kind in InteractionType::ALL {
            if let Some(dir) = kind.direction() {
                assert_eq!(dir.interaction(), kind);
            }
        }
    }

    #[test]
    fn test_event_json_uses_type_key() {
        let event = InteractionEvent::new("p1", InteractionType::RelevantLike);
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"post_id":"p1","type":"relevant_like"}"#);
    }

    #[test]
    fn test_feedback_per_outcome() {
        assert_eq!(InteractionType::Save.feedback(), FeedbackPulse::Triple);
        assert_eq!(InteractionType::Irrelevant.feedback(), FeedbackPulse::Short);
        assert_eq!(FeedbackPulse::Triple.pattern_ms(), &[50, 50, 50]);
    }
}
