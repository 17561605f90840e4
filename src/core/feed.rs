//! Feed controller: post queue, current index, history
//!
//! The top card is `posts[current_index]`, the first post not yet resolved.
//! Only that card owns a [`CardLifecycle`]; the next post is a static
//! placeholder. The lifecycle is created lazily on first input and dropped the
//! moment it emits its event.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use crate::config::{AppConfig, FeedConfig, GestureConfig};
use crate::core::{CardLifecycle, FeedbackSink, PostSource};
use crate::error::{FeedError, Result};
use crate::types::{
    FeedStatus, HistoryEntry, InteractionEvent, InteractionSummary, InteractionType,
    LifecycleOutput, PointSample, SocialPost, StackCard,
};

pub struct FeedController {
    gesture: GestureConfig,
    feed: FeedConfig,
    posts: Vec<SocialPost>,
    current_index: usize,
    history: Vec<HistoryEntry>,
    favorites: Vec<SocialPost>,
    top: Option<CardLifecycle>,
    source: Box<dyn PostSource>,
    feedback: Arc<dyn FeedbackSink>,
}

impl std::fmt::Debug for FeedController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedController")
            .field("posts", &self.posts.len())
            .field("current_index", &self.current_index)
            .field("history", &self.history.len())
            .field("favorites", &self.favorites.len())
            .field("top", &self.top)
            .finish_non_exhaustive()
    }
}

impl FeedController {
    /// Empty feed; call [`FeedController::load_more`] to fill it
    pub fn new(
        config: AppConfig,
        source: Box<dyn PostSource>,
        feedback: Arc<dyn FeedbackSink>,
    ) -> Self {
        Self {
            gesture: config.gesture,
            feed: config.feed,
            posts: Vec::new(),
            current_index: 0,
            history: Vec::new(),
            favorites: Vec::new(),
            top: None,
            source,
            feedback,
        }
    }

    /// Fetch one batch and append it. On failure the queue is untouched.
    pub fn load_more(&mut self) -> Result<usize> {
        let batch = match self.source.fetch(&self.feed.interests) {
            Ok(batch) => batch,
            Err(e) => {
                warn!(error = %e, "post source failed");
                return Err(match e {
                    FeedError::Source { .. } => e,
                    other => FeedError::Source {
                        message: other.to_string(),
                    },
                });
            }
        };
        let added = batch.len();
        self.posts.extend(batch.into_iter().map(SocialPost::normalize));
        info!(added, queued = self.posts.len(), "posts loaded");
        Ok(added)
    }

    // =========================================================================
    // Gesture input, forwarded to the top card
    // =========================================================================

    pub fn pointer_down(&mut self, point: PointSample) -> Result<LifecycleOutput> {
        let output = self.top_lifecycle()?.pointer_down(point);
        Ok(output)
    }

    pub fn pointer_move(&mut self, point: PointSample) -> Result<LifecycleOutput> {
        let output = self.top_lifecycle()?.pointer_move(point);
        Ok(output)
    }

    pub fn pointer_up(&mut self) -> Result<LifecycleOutput> {
        let output = self.top_lifecycle()?.pointer_up();
        Ok(output)
    }

    /// Animation completion callback from the renderer
    pub fn complete_animation(&mut self, token: u64) -> Result<LifecycleOutput> {
        let output = self.top_lifecycle()?.complete_animation(token);
        Ok(self.settle(output))
    }

    /// Complete whatever intent is pending on the top card
    pub fn complete_pending(&mut self) -> Result<LifecycleOutput> {
        let lifecycle = self.top_lifecycle()?;
        let token = lifecycle.pending_intent().map(|i| i.token).unwrap_or(0);
        let output = lifecycle.complete_animation(token);
        Ok(self.settle(output))
    }

    /// Force animations that have outlived the safety timeout
    pub fn tick(&mut self, now: Instant) -> Option<LifecycleOutput> {
        let output = self.top.as_mut()?.check_timeout(now)?;
        Some(self.settle(output))
    }

    fn top_lifecycle(&mut self) -> Result<&mut CardLifecycle> {
        let post_id = match self.posts.get(self.current_index) {
            Some(post) => post.id.clone(),
            None => return Err(FeedError::NoTopCard),
        };
        let gesture = self.gesture;
        let feedback = self.feedback.clone();
        Ok(self
            .top
            .get_or_insert_with(|| CardLifecycle::new(post_id, &gesture, feedback)))
    }

    /// Apply an emitted event, if the output carries one
    fn settle(&mut self, output: LifecycleOutput) -> LifecycleOutput {
        if let Some(event) = &output.event {
            self.apply_event(event.clone());
        }
        output
    }

    fn apply_event(&mut self, event: InteractionEvent) {
        let resolved = self.current_index;
        if event.kind == InteractionType::Save {
            if let Some(post) = self.posts.get(resolved) {
                self.favorites.push(post.clone());
            }
        }
        info!(post_id = %event.post_id, interaction = %event.kind, index = resolved, "feed advanced");
        self.history.push(HistoryEntry::new(event));
        self.current_index += 1;
        self.top = None;

        if resolved + self.feed.prefetch_margin > self.posts.len() {
            if let Err(e) = self.load_more() {
                warn!(error = %e, "prefetch failed, feed keeps its current queue");
            }
        }
    }

    /// Clear queue, index and history (favorites survive), then reload
    pub fn reset(&mut self) -> Result<usize> {
        info!(history = self.history.len(), "feed reset");
        self.posts.clear();
        self.history.clear();
        self.current_index = 0;
        self.top = None;
        self.load_more()
    }

    // =========================================================================
    // Views
    // =========================================================================

    pub fn top_post(&self) -> Option<&SocialPost> {
        self.posts.get(self.current_index)
    }

    pub fn staged_post(&self) -> Option<&SocialPost> {
        self.posts.get(self.current_index + 1)
    }

    /// Top card first, then the staged placeholder
    pub fn visible_stack(&self) -> Vec<StackCard<'_>> {
        let mut stack = Vec::with_capacity(2);
        if let Some(post) = self.top_post() {
            stack.push(StackCard { post, is_top: true });
        }
        if let Some(post) = self.staged_post() {
            stack.push(StackCard {
                post,
                is_top: false,
            });
        }
        stack
    }

    pub fn top_card(&self) -> Option<&CardLifecycle> {
        self.top.as_ref()
    }

    pub fn is_caught_up(&self) -> bool {
        self.current_index >= self.posts.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn posts(&self) -> &[SocialPost] {
        &self.posts
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn favorites(&self) -> &[SocialPost] {
        &self.favorites
    }

    pub fn summary(&self) -> InteractionSummary {
        InteractionSummary::from_history(&self.history, self.favorites.len())
    }

    pub fn status(&self) -> FeedStatus {
        FeedStatus {
            current_index: self.current_index,
            queued: self.posts.len(),
            caught_up: self.is_caught_up(),
            top_post: self.top_post().cloned(),
            staged_post_id: self.staged_post().map(|p| p.id.clone()),
            card_state: self.top.as_ref().map(|t| t.state()),
            pending_token: self
                .top
                .as_ref()
                .and_then(|t| t.pending_intent())
                .map(|i| i.token),
            history_len: self.history.len(),
            favorites_len: self.favorites.len(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MockFeedSource, NullFeedback};
    use crate::types::CardState;

    struct FailingSource;

    impl PostSource for FailingSource {
        fn fetch(&self, _interests: &[String]) -> Result<Vec<SocialPost>> {
            Err(FeedError::Source {
                message: "backend down".to_string(),
            })
        }
    }

    fn feed() -> FeedController {
        let mut feed = FeedController::new(
            AppConfig::default(),
            Box::new(MockFeedSource::new()),
            Arc::new(NullFeedback),
        );
        feed.load_more().unwrap();
        feed
    }

    fn swipe(feed: &mut FeedController, dx: f64, dy: f64) -> LifecycleOutput {
        feed.pointer_down(PointSample::new(0.0, 0.0)).unwrap();
        feed.pointer_move(PointSample::new(dx / 2.0, dy / 2.0)).unwrap();
        feed.pointer_move(PointSample::new(dx, dy)).unwrap();
        let up = feed.pointer_up().unwrap();
        let token = up.intent.unwrap().token;
        feed.complete_animation(token).unwrap()
    }

    #[test]
    fn test_empty_feed_has_no_top_card() {
        let mut feed = FeedController::new(
            AppConfig::default(),
            Box::new(MockFeedSource::new()),
            Arc::new(NullFeedback),
        );
        assert!(feed.is_caught_up());
        assert!(matches!(
            feed.pointer_down(PointSample::new(0.0, 0.0)),
            Err(FeedError::NoTopCard)
        ));
    }

    #[test]
    fn test_stack_has_one_top() {
        let feed = feed();
        let stack = feed.visible_stack();
        assert_eq!(stack.len(), 2);
        assert!(stack[0].is_top);
        assert!(!stack[1].is_top);
        assert_eq!(stack[0].post.id, "1-1");
    }

    #[test]
    fn test_event_advances_and_logs() {
        let mut feed = feed();
        let out = swipe(&mut feed, 200.0, 0.0);
        assert_eq!(out.event.unwrap().post_id, "1-1");
        assert_eq!(feed.current_index(), 1);
        assert_eq!(feed.history().len(), 1);
        assert_eq!(feed.history()[0].event.kind, InteractionType::Relevant);
        assert!(feed.top_card().is_none());
        assert_eq!(feed.top_post().unwrap().id, "1-2");
    }

    #[test]
    fn test_prefetch_near_end() {
        let mut feed = feed();
        assert_eq!(feed.posts().len(), 2);
        swipe(&mut feed, -200.0, 0.0);
        // 0 + 3 > 2, next batch requested
        assert_eq!(feed.posts().len(), 4);
    }

    #[test]
    fn test_return_does_not_advance() {
        let mut feed = feed();
        let out = swipe(&mut feed, 30.0, 30.0);
        assert_eq!(out.state, CardState::Idle);
        assert_eq!(feed.current_index(), 0);
        assert!(feed.history().is_empty());
    }

    #[test]
    fn test_save_adds_favorite_and_survives_reset() {
        let mut feed = feed();
        feed.pointer_down(PointSample::new(100.0, 0.0)).unwrap();
        for i in 1..=32 {
            let a = std::f64::consts::TAU * i as f64 / 32.0;
            feed.pointer_move(PointSample::new(100.0 * a.cos(), 100.0 * a.sin()))
                .unwrap();
        }
        let up = feed.pointer_up().unwrap();
        assert_eq!(up.state, CardState::ExitingSave);
        feed.complete_pending().unwrap();

        assert_eq!(feed.favorites().len(), 1);
        assert_eq!(feed.summary().count(InteractionType::Save), 1);

        feed.reset().unwrap();
        assert_eq!(feed.current_index(), 0);
        assert!(feed.history().is_empty());
        assert_eq!(feed.favorites().len(), 1);
        assert_eq!(feed.posts().len(), 2);
    }

    #[test]
    fn test_failing_source_keeps_queue() {
        let mut feed = FeedController::new(
            AppConfig::default(),
            Box::new(FailingSource),
            Arc::new(NullFeedback),
        );
        assert!(matches!(feed.load_more(), Err(FeedError::Source { .. })));
        assert!(feed.posts().is_empty());
    }
}
