//! Haptic feedback collaborators
//!
//! Pulses are fire-and-forget. A sink must return immediately and must never
//! fail the caller.

use std::sync::Mutex;

use tracing::debug;

use crate::types::FeedbackPulse;

pub trait FeedbackSink: Send + Sync {
    fn pulse(&self, pulse: FeedbackPulse);
}

/// Drops every pulse
#[derive(Debug, Default)]
pub struct NullFeedback;

impl FeedbackSink for NullFeedback {
    fn pulse(&self, _pulse: FeedbackPulse) {}
}

/// Writes pulses to the trace log
#[derive(Debug, Default)]
pub struct LogFeedback;

impl FeedbackSink for LogFeedback {
    fn pulse(&self, pulse: FeedbackPulse) {
        debug!(?pulse, pattern_ms = ?pulse.pattern_ms(), "feedback pulse");
    }
}

/// Keeps pulses in memory
#[derive(Debug, Default)]
pub struct RecordingFeedback {
    pulses: Mutex<Vec<FeedbackPulse>>,
}

impl RecordingFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pulses(&self) -> Vec<FeedbackPulse> {
        match self.pulses.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl FeedbackSink for RecordingFeedback {
    fn pulse(&self, pulse: FeedbackPulse) {
        match self.pulses.lock() {
            Ok(mut guard) => guard.push(pulse),
            Err(poisoned) => poisoned.into_inner().push(pulse),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
