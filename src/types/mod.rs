//! Core types for OmniFeed

mod animation;
mod classification;
mod feed;
mod interaction;
mod output;
mod point;
mod post;
mod reason;
mod state;

pub use animation::{AnimationIntent, AnimationKind, AnimationStage, CardTransform};
pub use classification::{CircleVerdict, Classification};
pub use feed::{FeedStatus, HistoryEntry, InteractionSummary, StackCard};
pub use interaction::{FeedbackPulse, InteractionEvent, InteractionType, SwipeDirection};
pub use output::LifecycleOutput;
pub use point::{BoundingBox, DragOffset, PointSample, Trajectory};
pub use post::{Platform, SocialPost};
pub use reason::ReasonCode;
pub use state::CardState;
