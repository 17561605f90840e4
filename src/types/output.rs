//! Output structures for terminal display and the API

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::types::{
    AnimationIntent, CardState, CardTransform, Classification, InteractionEvent, ReasonCode,
};

/// Output of every lifecycle input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifecycleOutput {
    pub timestamp: DateTime<Utc>,
    pub post_id: String,
    /// State after the input was handled
    pub state: CardState,
    pub reason: ReasonCode,
    pub transform: CardTransform,
    pub sample_count: usize,
    /// Present on pointer-up
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
    /// Present when an animation was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<AnimationIntent>,
    /// Present once, when an exit animation completes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<InteractionEvent>,
}

impl LifecycleOutput {
    pub fn new(
        post_id: impl Into<String>,
        state: CardState,
        reason: ReasonCode,
        transform: CardTransform,
        sample_count: usize,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            post_id: post_id.into(),
            state,
            reason,
            transform,
            sample_count,
            classification: None,
            intent: None,
            event: None,
        }
    }

    pub fn with_classification(mut self, classification: Classification) -> Self {
        self.classification = Some(classification);
        self
    }

    pub fn with_intent(mut self, intent: AnimationIntent) -> Self {
        self.intent = Some(intent);
        self
    }

    pub fn with_event(mut self, event: InteractionEvent) -> Self {
        self.event = Some(event);
        self
    }

    fn outcome_label(&self) -> String {
        match (&self.event, &self.classification) {
            (Some(event), _) => format!("emitted={}", event.kind),
            (None, Some(c)) => match c.kind {
                Some(kind) => format!("outcome={}", kind),
                None => "outcome=none".to_string(),
            },
            (None, None) => String::new(),
        }
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let line = format!(
            "{} [{}] state={} | x={:.0} y={:.0} | samples={} | {} {}",
            self.state.emoji(),
            self.post_id,
            self.state,
            self.transform.x,
            self.transform.y,
            self.sample_count,
            self.reason.code(),
            self.outcome_label(),
        );
        line.trim_end().color(self.state.color()).to_string()
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        let mut line = format!(
            "post={} | state={} | x={:.1} | y={:.1} | samples={} | reason={}",
            self.post_id,
            self.state,
            self.transform.x,
            self.transform.y,
            self.sample_count,
            self.reason.code()
        );
        let outcome = self.outcome_label();
        if !outcome.is_empty() {
            line.push_str(" | ");
            line.push_str(&outcome);
        }
        if let Some(intent) = &self.intent {
            line.push_str(&format!(" | token={}", intent.token));
        }
        line
    }
}
