//! Integration tests for gesture scripts
//!
//! Tests the full path: script text → ScriptCommand → FeedController → outputs

use std::sync::Arc;

use omnifeed::config::AppConfig;
use omnifeed::core::{
    parse_script, run_command, FeedController, MockFeedSource, RecordingFeedback, ScriptCommand,
};
use omnifeed::types::{CardState, InteractionType, LifecycleOutput, ReasonCode};
use omnifeed::FeedError;
use pretty_assertions::assert_eq;

fn feed() -> FeedController {
    let mut feed = FeedController::new(
        AppConfig::default(),
        Box::new(MockFeedSource::new()),
        Arc::new(RecordingFeedback::new()),
    );
    feed.load_more().unwrap();
    feed
}

fn run(feed: &mut FeedController, script: &str) -> Vec<LifecycleOutput> {
    parse_script(script)
        .unwrap()
        .iter()
        .flat_map(|cmd| run_command(feed, cmd).unwrap())
        .collect()
}

const SESSION: &str = "\
# right, up, a wobble, then a circle
swipe 160 0
complete
swipe 0 -140 6
complete

swipe 30 20
complete

circle 200 200 70
complete
";

/// Test a mixed script drives the feed end to end
#[test]
fn test_session_script() {
    let mut feed = feed();
    let outputs = run(&mut feed, SESSION);

    let events: Vec<_> = outputs
        .iter()
        .filter_map(|o| o.event.as_ref().map(|e| e.kind))
        .collect();
    assert_eq!(
        events,
        vec![
            InteractionType::Relevant,
            InteractionType::RelevantLike,
            InteractionType::Save
        ]
    );
    assert_eq!(feed.current_index(), 3);
    assert_eq!(feed.favorites().len(), 1);
}

/// Test primitive commands match the composite swipe
#[test]
fn test_primitives_match_composite() {
    let mut a = feed();
    let mut b = feed();
    let composite = run(&mut a, "swipe -150 0 3\n");
    let primitive = run(&mut b, "down 0 0\nmove -50 0\nmove -100 0\nmove -150 0\nup\n");

    assert_eq!(composite.len(), primitive.len());
    let last_a = composite.last().unwrap();
    let last_b = primitive.last().unwrap();
    assert_eq!(last_a.state, last_b.state);
    assert_eq!(last_a.classification, last_b.classification);
    assert_eq!(last_a.intent, last_b.intent);
}

/// Test tick forces a stalled animation
#[test]
fn test_tick_command_times_out() {
    let mut feed = feed();
    let outputs = run(&mut feed, "swipe 0 200\ntick 5000\n");
    let last = outputs.last().unwrap();
    assert_eq!(last.reason, ReasonCode::L209_ANIMATION_TIMED_OUT);
    assert_eq!(last.state, CardState::Gone);
    assert_eq!(feed.history().len(), 1);
}

/// Test a short tick leaves the animation pending
#[test]
fn test_short_tick_is_silent() {
    let mut feed = feed();
    let outputs = run(&mut feed, "swipe 0 200\ntick 10\n");
    assert_eq!(outputs.last().unwrap().state, CardState::ExitingDirectional);
    assert!(feed.history().is_empty());
}

/// Test `complete` with nothing pending is ignored
#[test]
fn test_complete_without_intent() {
    let mut feed = feed();
    let outputs = run(&mut feed, "complete\n");
    assert_eq!(outputs[0].reason, ReasonCode::L203_INPUT_IGNORED);
}

/// Test parse errors point at the offending line
#[test]
fn test_parse_error_line() {
    let err = parse_script("swipe 10 0\n\n# ok\nflick 3\n").unwrap_err();
    match err {
        FeedError::Script { line, message } => {
            assert_eq!(line, 4);
            assert!(message.contains("flick"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

/// Test circle command produces a closed loop
#[test]
fn test_circle_command_parse() {
    let commands = parse_script("circle 0 0 50 24").unwrap();
    assert_eq!(
        commands,
        vec![ScriptCommand::Circle {
            cx: 0.0,
            cy: 0.0,
            radius: 50.0,
            steps: 24
        }]
    );
    let samples = commands[0].samples();
    assert_eq!(samples.len(), 25);
}

/// Test `load` appends a batch without touching history
#[test]
fn test_load_command_keeps_history() {
    let mut feed = feed();
    run(&mut feed, "swipe 160 0\ncomplete\n");
    let queued = feed.posts().len();

    let outputs = run(&mut feed, "load\n");
    assert!(outputs.is_empty());
    assert!(feed.posts().len() > queued);
    assert_eq!(feed.history().len(), 1);
    assert_eq!(feed.current_index(), 1);
}
