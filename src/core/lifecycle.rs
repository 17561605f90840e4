//! Card lifecycle: state machine of the top card
//!
//! State transitions:
//! - IDLE → DRAGGING: pointer down
//! - DRAGGING → DRAGGING: pointer move (sample appended)
//! - DRAGGING → RESOLVING: pointer up (classification, synchronous)
//! - RESOLVING → EXITING_SAVE | EXITING_DIRECTIONAL | RETURNING: intent issued
//! - EXITING_* → GONE: animation complete, event emitted once
//! - RETURNING → IDLE: animation complete, no event
//!
//! Pointer input is ignored outside IDLE/DRAGGING. Animation completions must
//! echo the pending intent's token. A pending intent that never reports back
//! is forced once the safety timeout elapses (see [`CardLifecycle::check_timeout`]).

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::config::GestureConfig;
use crate::core::{FeedbackSink, GestureClassifier, TrajectoryRecorder};
use crate::types::{
    AnimationIntent, AnimationKind, AnimationStage, CardState, CardTransform, InteractionEvent,
    InteractionType, LifecycleOutput, PointSample, ReasonCode, SwipeDirection,
};
use crate::{SAVE_POP_MS, SAVE_POP_SCALE, SAVE_SHRINK_MS};

#[derive(Debug, Clone)]
struct PendingAnimation {
    intent: AnimationIntent,
    /// Event to emit on completion; `None` for a return
    outcome: Option<InteractionType>,
    started: Instant,
}

/// Interaction state of one top card
pub struct CardLifecycle {
    post_id: String,
    state: CardState,
    transform: CardTransform,
    recorder: TrajectoryRecorder,
    classifier: GestureClassifier,
    exit_distance: f64,
    timeout: Duration,
    pending: Option<PendingAnimation>,
    next_token: u64,
    emitted: Option<InteractionEvent>,
    feedback: Arc<dyn FeedbackSink>,
}

impl std::fmt::Debug for CardLifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardLifecycle")
            .field("post_id", &self.post_id)
            .field("state", &self.state)
            .field("transform", &self.transform)
            .field("samples", &self.recorder.sample_count())
            .field("pending", &self.pending)
            .field("emitted", &self.emitted)
            .finish_non_exhaustive()
    }
}

impl CardLifecycle {
    pub fn new(
        post_id: impl Into<String>,
        config: &GestureConfig,
        feedback: Arc<dyn FeedbackSink>,
    ) -> Self {
        Self {
            post_id: post_id.into(),
            state: CardState::Idle,
            transform: CardTransform::origin(),
            recorder: TrajectoryRecorder::new(),
            classifier: GestureClassifier::from_config(config),
            exit_distance: config.exit_translate_distance,
            timeout: Duration::from_millis(config.animation_timeout_ms),
            pending: None,
            next_token: 1,
            emitted: None,
            feedback,
        }
    }

    /// Touch on the card
    pub fn pointer_down(&mut self, point: PointSample) -> LifecycleOutput {
        if self.state != CardState::Idle {
            return self.ignored("pointer_down");
        }
        self.recorder.begin(point);
        self.transform = CardTransform::origin();
        self.state = CardState::Dragging;
        debug!(post_id = %self.post_id, x = point.x, y = point.y, "drag started");
        self.output(ReasonCode::L201_DRAG_STARTED)
    }

    /// Pointer moved while down. O(1) amortized.
    pub fn pointer_move(&mut self, point: PointSample) -> LifecycleOutput {
        if self.state != CardState::Dragging || !self.recorder.record(point) {
            return self.ignored("pointer_move");
        }
        let offset = self.recorder.current_offset();
        self.transform.x = offset.dx;
        self.transform.y = offset.dy;
        self.output(ReasonCode::L202_SAMPLE_RECORDED)
    }

    /// Release: classify and request the matching animation
    pub fn pointer_up(&mut self) -> LifecycleOutput {
        if self.state != CardState::Dragging {
            return self.ignored("pointer_up");
        }
        self.state = CardState::Resolving;

        // trajectory is dropped at the end of this call whatever the outcome
        let (trajectory, offset) = self.recorder.finish();
        let classification = self.classifier.classify_detailed(&trajectory, &offset);
        let sample_count = trajectory.len();

        let token = self.next_token;
        self.next_token += 1;

        let direction = classification.kind.and_then(|kind| kind.direction());
        let (state, reason, intent) = match (classification.kind, direction) {
            (Some(InteractionType::Save), _) => (
                CardState::ExitingSave,
                ReasonCode::L205_SAVE_STARTED,
                save_intent(token),
            ),
            (_, Some(direction)) => (
                CardState::ExitingDirectional,
                ReasonCode::L204_EXIT_STARTED,
                exit_intent(token, direction, self.exit_distance),
            ),
            _ => (
                CardState::Returning,
                ReasonCode::L206_RETURN_STARTED,
                return_intent(token),
            ),
        };

        if let Some(kind) = classification.kind {
            self.feedback.pulse(kind.feedback());
        }

        debug!(
            post_id = %self.post_id,
            samples = sample_count,
            dx = offset.dx,
            dy = offset.dy,
            outcome = ?classification.kind,
            reason = classification.reason.code(),
            "drag resolved"
        );

        self.state = state;
        self.pending = Some(PendingAnimation {
            intent: intent.clone(),
            outcome: classification.kind,
            started: Instant::now(),
        });

        let mut output = self
            .output(reason)
            .with_classification(classification)
            .with_intent(intent);
        output.sample_count = sample_count;
        output
    }

    /// Renderer finished the intent carrying `token`
    pub fn complete_animation(&mut self, token: u64) -> LifecycleOutput {
        let expected = match &self.pending {
            Some(p) => p.intent.token,
            None => return self.ignored("complete_animation"),
        };
        if expected != token {
            warn!(post_id = %self.post_id, expected, got = token, "stale animation completion");
            return self.output(ReasonCode::L210_STALE_ANIMATION_TOKEN);
        }
        self.finish_pending(false)
    }

    /// Force a pending intent that has outlived the safety timeout
    pub fn check_timeout(&mut self, now: Instant) -> Option<LifecycleOutput> {
        let started = self.pending.as_ref()?.started;
        if now.saturating_duration_since(started) < self.timeout {
            return None;
        }
        warn!(post_id = %self.post_id, state = %self.state, "animation timed out");
        Some(self.finish_pending(true))
    }

    fn finish_pending(&mut self, timed_out: bool) -> LifecycleOutput {
        let pending = match self.pending.take() {
            Some(p) => p,
            None => return self.ignored("finish"),
        };
        self.transform = pending.intent.final_transform(self.transform);

        match pending.outcome {
            Some(kind) => {
                let event = InteractionEvent::new(self.post_id.clone(), kind);
                self.state = CardState::Gone;
                self.emitted = Some(event.clone());
                info!(post_id = %self.post_id, interaction = %kind, "interaction emitted");
                let reason = if timed_out {
                    ReasonCode::L209_ANIMATION_TIMED_OUT
                } else {
                    ReasonCode::L207_EXIT_COMPLETED
                };
                self.output(reason).with_event(event)
            }
            None => {
                self.state = CardState::Idle;
                self.transform = CardTransform::origin();
                let reason = if timed_out {
                    ReasonCode::L209_ANIMATION_TIMED_OUT
                } else {
                    ReasonCode::L208_RETURN_COMPLETED
                };
                self.output(reason)
            }
        }
    }

    fn ignored(&self, input: &str) -> LifecycleOutput {
        debug!(post_id = %self.post_id, state = %self.state, input, "input ignored");
        self.output(ReasonCode::L203_INPUT_IGNORED)
    }

    fn output(&self, reason: ReasonCode) -> LifecycleOutput {
        LifecycleOutput::new(
            self.post_id.clone(),
            self.state,
            reason,
            self.transform,
            self.recorder.sample_count(),
        )
    }

    pub fn post_id(&self) -> &str {
        &self.post_id
    }

    pub fn state(&self) -> CardState {
        self.state
    }

    pub fn transform(&self) -> CardTransform {
        self.transform
    }

    pub fn sample_count(&self) -> usize {
        self.recorder.sample_count()
    }

    pub fn is_interactive(&self) -> bool {
        self.state.is_interactive()
    }

    pub fn pending_intent(&self) -> Option<&AnimationIntent> {
        self.pending.as_ref().map(|p| &p.intent)
    }

    /// The event this card produced, once it is gone
    pub fn emitted_event(&self) -> Option<&InteractionEvent> {
        self.emitted.as_ref()
    }
}

fn exit_intent(token: u64, direction: SwipeDirection, distance: f64) -> AnimationIntent {
    let (ux, uy) = direction.unit();
    let stage = match direction {
        SwipeDirection::Left | SwipeDirection::Right => AnimationStage {
            x: Some(ux * distance),
            opacity: Some(0.0),
            ..Default::default()
        },
        SwipeDirection::Up | SwipeDirection::Down => AnimationStage {
            y: Some(uy * distance),
            opacity: Some(0.0),
            ..Default::default()
        },
    };
    AnimationIntent {
        token,
        kind: AnimationKind::Exit(direction),
        stages: vec![stage],
    }
}

fn save_intent(token: u64) -> AnimationIntent {
    AnimationIntent {
        token,
        kind: AnimationKind::Save,
        stages: vec![
            AnimationStage {
                scale: Some(SAVE_POP_SCALE),
                duration_ms: Some(SAVE_POP_MS),
                ..Default::default()
            },
            AnimationStage {
                scale: Some(0.0),
                opacity: Some(0.0),
                duration_ms: Some(SAVE_SHRINK_MS),
                ..Default::default()
            },
        ],
    }
}

fn return_intent(token: u64) -> AnimationIntent {
    AnimationIntent {
        token,
        kind: AnimationKind::Return,
        stages: vec![AnimationStage {
            x: Some(0.0),
            y: Some(0.0),
            ..Default::default()
        }],
    }
}

// =============================================================================
// TESTS
// =============================================================================
