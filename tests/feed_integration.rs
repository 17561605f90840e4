//! Integration tests for the feed controller
//!
//! Tests the full path: gestures → top card → events → history / favorites / prefetch

use std::collections::HashSet;
use std::io::Write as _;
use std::sync::Arc;
use std::time::{Duration, Instant};

use omnifeed::config::{AppConfig, GestureConfig};
use omnifeed::core::{FeedController, JsonFileSource, MockFeedSource, RecordingFeedback};
use omnifeed::types::{CardState, FeedbackPulse, InteractionType, PointSample};
use omnifeed::FeedError;
use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

fn mock_feed() -> (FeedController, Arc<RecordingFeedback>) {
    let sink = Arc::new(RecordingFeedback::new());
    let mut feed = FeedController::new(
        AppConfig::default(),
        Box::new(MockFeedSource::new()),
        sink.clone(),
    );
    feed.load_more().unwrap();
    (feed, sink)
}

fn resolve(feed: &mut FeedController, dx: f64, dy: f64) {
    feed.pointer_down(PointSample::new(0.0, 0.0)).unwrap();
    feed.pointer_move(PointSample::new(dx, dy)).unwrap();
    feed.pointer_up().unwrap();
    feed.complete_pending().unwrap();
}

fn save(feed: &mut FeedController) {
    feed.pointer_down(PointSample::new(80.0, 0.0)).unwrap();
    for i in 1..=30 {
        let a = std::f64::consts::TAU * i as f64 / 30.0;
        feed.pointer_move(PointSample::new(80.0 * a.cos(), 80.0 * a.sin()))
            .unwrap();
    }
    feed.pointer_up().unwrap();
    feed.complete_pending().unwrap();
}

/// Test a session of mixed gestures lands in history in order
#[test]
fn test_history_records_each_event_once() {
    let (mut feed, sink) = mock_feed();
    let first = feed.top_post().unwrap().id.clone();

    resolve(&mut feed, 150.0, 0.0);
    resolve(&mut feed, 0.0, -150.0);
    resolve(&mut feed, 40.0, 40.0); // returns, no event
    save(&mut feed);

    let kinds: Vec<_> = feed.history().iter().map(|h| h.event.kind).collect();
    assert_eq!(
        kinds,
        vec![
            InteractionType::Relevant,
            InteractionType::RelevantLike,
            InteractionType::Save
        ]
    );
    assert_eq!(feed.history()[0].event.post_id, first);
    assert_eq!(feed.current_index(), 3);
    assert_eq!(
        sink.pulses(),
        vec![FeedbackPulse::Short, FeedbackPulse::Short, FeedbackPulse::Triple]
    );
}

/// Test the visible stack is the top card and one staged placeholder
#[test]
fn test_visible_stack_follows_index() {
    let (mut feed, _) = mock_feed();
    let before: Vec<_> = feed.visible_stack().iter().map(|c| c.post.id.clone()).collect();
    resolve(&mut feed, -150.0, 0.0);
    let after = feed.visible_stack();
    assert_eq!(after.len(), 2);
    assert_eq!(after.iter().filter(|c| c.is_top).count(), 1);
    assert_eq!(after[0].post.id, before[1]);
}

/// Test prefetch keeps the queue ahead of the reader
#[test]
fn test_prefetch_keeps_feed_going() {
    let (mut feed, _) = mock_feed();
    for _ in 0..6 {
        resolve(&mut feed, 150.0, 0.0);
    }
    assert_eq!(feed.current_index(), 6);
    assert!(!feed.is_caught_up());
    assert!(feed.posts().len() >= 8);
}

/// Test saved posts survive a reset while history does not
#[test]
fn test_favorites_survive_reset() {
    let (mut feed, _) = mock_feed();
    save(&mut feed);
    let saved = feed.favorites()[0].id.clone();

    feed.reset().unwrap();
    assert!(feed.history().is_empty());
    assert_eq!(feed.current_index(), 0);
    assert_eq!(feed.favorites().len(), 1);
    assert_eq!(feed.favorites()[0].id, saved);
}

/// Test the summary tallies every kind
#[test]
fn test_summary() {
    let (mut feed, _) = mock_feed();
    resolve(&mut feed, 150.0, 0.0);
    resolve(&mut feed, -150.0, 0.0);
    resolve(&mut feed, 0.0, 150.0);
    save(&mut feed);

    let summary = feed.summary();
    assert_eq!(summary.total, 4);
    assert_eq!(summary.count(InteractionType::Relevant), 1);
    assert_eq!(summary.count(InteractionType::Irrelevant), 1);
    assert_eq!(summary.count(InteractionType::IrrelevantDislike), 1);
    assert_eq!(summary.favorites, 1);
    assert_eq!(summary.relevance_ratio(), Some(0.5));
}

/// Test tick forces a stalled exit and advances the feed
#[test]
fn test_tick_advances_stalled_feed() {
    let config = AppConfig {
        gesture: GestureConfig {
            animation_timeout_ms: 100,
            ..GestureConfig::default()
        },
        ..AppConfig::default()
    };
    let mut feed = FeedController::new(
        config,
        Box::new(MockFeedSource::new()),
        Arc::new(RecordingFeedback::new()),
    );
    feed.load_more().unwrap();

    feed.pointer_down(PointSample::new(0.0, 0.0)).unwrap();
    feed.pointer_move(PointSample::new(0.0, 300.0)).unwrap();
    let up = feed.pointer_up().unwrap();
    assert_eq!(up.state, CardState::ExitingDirectional);

    assert!(feed.tick(Instant::now()).is_none());
    let forced = feed.tick(Instant::now() + Duration::from_millis(200)).unwrap();
    assert_eq!(forced.event.unwrap().kind, InteractionType::IrrelevantDislike);
    assert_eq!(feed.current_index(), 1);
    assert_eq!(feed.history().len(), 1);
}

/// Test posts from a JSON file are normalized before they reach the stack
#[test]
fn test_json_source_posts_are_normalized() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(
        br#"[{"platform":"news","author":"Wire","handle":"@wire","content":"Only story","timestamp":"1h","likes":1,"comments":0,"tags":["news"]}]"#,
    )
    .unwrap();
    file.flush().unwrap();

    let mut feed = FeedController::new(
        AppConfig::default(),
        Box::new(JsonFileSource::new(file.path())),
        Arc::new(RecordingFeedback::new()),
    );
    assert_eq!(feed.load_more().unwrap(), 1);
    let post = feed.top_post().unwrap().clone();
    assert!(post.id.starts_with("post-"));
    assert_eq!(post.id, format!("{}-1", post.derive_id()));
    assert!(post.image_url.is_some());
    assert!(post.avatar_url.contains("wire"));
    assert!(feed.staged_post().is_none());

    resolve(&mut feed, 150.0, 0.0);
    assert_eq!(feed.history()[0].event.post_id, post.id);
}

/// Test every prefetched batch from a JSON file gets fresh ids
#[test]
fn test_json_source_prefetch_keeps_ids_unique() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(
        br#"[
            {"id":"lead","platform":"news","author":"Wire","handle":"@wire","content":"Lead","timestamp":"1h","likes":1,"comments":0,"tags":[]},
            {"platform":"tech","author":"Lab","handle":"@lab","content":"Chips","timestamp":"2h","likes":3,"comments":1,"tags":[]}
        ]"#,
    )
    .unwrap();
    file.flush().unwrap();

    let mut feed = FeedController::new(
        AppConfig::default(),
        Box::new(JsonFileSource::new(file.path())),
        Arc::new(RecordingFeedback::new()),
    );
    assert_eq!(feed.load_more().unwrap(), 2);

    // each resolve near the end of a two-post queue triggers a prefetch
    resolve(&mut feed, 150.0, 0.0);
    resolve(&mut feed, -150.0, 0.0);
    assert!(feed.posts().len() >= 6);

    let ids: HashSet<_> = feed.posts().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids.len(), feed.posts().len());
    assert!(ids.contains("lead-1") && ids.contains("lead-2") && ids.contains("lead-3"));

    let events: HashSet<_> = feed.history().iter().map(|h| h.event.post_id.as_str()).collect();
    assert_eq!(events.len(), 2);
}

/// Test an empty feed reports NoTopCard
#[test]
fn test_empty_feed_errors() {
    let mut feed = FeedController::new(
        AppConfig::default(),
        Box::new(MockFeedSource::new()),
        Arc::new(RecordingFeedback::new()),
    );
    assert!(feed.is_caught_up());
    assert!(matches!(feed.pointer_up(), Err(FeedError::NoTopCard)));
    assert!(feed.tick(Instant::now()).is_none());
}
