//! Core modules for OmniFeed

pub mod recorder;
pub mod circle;
pub mod swipe;
pub mod classifier;
pub mod feedback;
pub mod lifecycle;
pub mod source;
pub mod feed;
pub mod script;
pub mod api;

pub use recorder::TrajectoryRecorder;
pub use circle::CircleDetector;
pub use swipe::SwipeResolver;
pub use classifier::GestureClassifier;
pub use feedback::{FeedbackSink, LogFeedback, NullFeedback, RecordingFeedback};
pub use lifecycle::CardLifecycle;
pub use source::{JsonFileSource, MockFeedSource, PostSource};
pub use feed::FeedController;
pub use script::{parse_line, parse_script, run_command, ScriptCommand};
pub use api::{
    create_router, run_server, sweep_timeouts, AppState, BroadcastFeedback, FeedUpdate,
    PointerPhase, PointerRequest,
};
