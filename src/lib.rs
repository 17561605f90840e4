//! OmniFeed: gesture engine for a swipeable card-stack feed
//!
//! pointer samples → TrajectoryRecorder → GestureClassifier
//! (CircleDetector, then SwipeResolver) → CardLifecycle → FeedController

pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod types;

pub use error::{FeedError, Result};

// =============================================================================
// GESTURE THRESHOLDS
// =============================================================================

/// Distance a drag must cover on its dominant axis to count as a swipe
pub const DIRECTIONAL_THRESHOLD: f64 = 100.0;

/// Minimum samples before a trajectory can be a circle
pub const CIRCLE_MIN_SAMPLES: usize = 20;

/// Minimum bounding-box width and height of a circle
pub const CIRCLE_MIN_BOUND_SIZE: f64 = 50.0;

/// Maximum first-to-last sample distance of a circle
pub const CIRCLE_MAX_CLOSURE_DISTANCE: f64 = 100.0;

// =============================================================================
// ANIMATION
// =============================================================================

/// How far an exiting card travels on its dominant axis
pub const EXIT_TRANSLATE_DISTANCE: f64 = 500.0;

/// Save animation, stage 1: pop
pub const SAVE_POP_SCALE: f64 = 1.1;
pub const SAVE_POP_MS: u64 = 200;

/// Save animation, stage 2: shrink to nothing
pub const SAVE_SHRINK_MS: u64 = 300;

/// A pending animation intent is forced to complete after this long
pub const ANIMATION_TIMEOUT_MS: u64 = 2000;

// =============================================================================
// FEED
// =============================================================================

/// Prefetch when fewer than this many posts remain past the resolved one
pub const PREFETCH_MARGIN: usize = 3;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
