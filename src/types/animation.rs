//! Animation intents handed to the renderer
//!
//! The engine never animates anything itself. It describes the target of each
//! stage and waits for the renderer to report completion with the intent's token.

use serde::{Deserialize, Serialize};

use crate::types::SwipeDirection;

/// Visual transform of a card relative to its resting position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardTransform {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub opacity: f64,
}

impl Default for CardTransform {
    fn default() -> Self {
        Self::origin()
    }
}

impl CardTransform {
    pub fn origin() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
            opacity: 1.0,
        }
    }

    /// Overwrite the fields the stage names
    pub fn apply(&mut self, stage: &AnimationStage) {
        if let Some(x) = stage.x {
            self.x = x;
        }
        if let Some(y) = stage.y {
            self.y = y;
        }
        if let Some(scale) = stage.scale {
            self.scale = scale;
        }
        if let Some(opacity) = stage.opacity {
            self.opacity = opacity;
        }
    }
}

/// One step of an animation; `None` fields are left untouched
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationStage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Renderer default when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "direction", rename_all = "snake_case")]
pub enum AnimationKind {
    Exit(SwipeDirection),
    Save,
    Return,
}

/// A pending animation the renderer must play and acknowledge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationIntent {
    /// Echoed back on completion
    pub token: u64,
    pub kind: AnimationKind,
    pub stages: Vec<AnimationStage>,
}

impl AnimationIntent {
    /// Transform after every stage has run, starting from `from`
    pub fn final_transform(&self, from: CardTransform) -> CardTransform {
        let mut transform = from;
        for stage in &self.stages {
            transform.apply(stage);
        }
        transform
    }

    /// Sum of declared stage durations
    pub fn declared_duration_ms(&self) -> u64 {
        self.stages.iter().filter_map(|s| s.duration_ms).sum()
    }
}
