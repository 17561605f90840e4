//! Feed-level records: history, stack view, summary

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{CardState, InteractionEvent, InteractionType, SocialPost};

/// An interaction event as logged by the feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub event: InteractionEvent,
    pub recorded_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(event: InteractionEvent) -> Self {
        Self {
            event,
            recorded_at: Utc::now(),
        }
    }
}

/// A card in the visible stack; only the top one is interactive
#[derive(Debug, Clone, Serialize)]
pub struct StackCard<'a> {
    pub post: &'a SocialPost,
    pub is_top: bool,
}

/// Snapshot of the feed for status displays
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedStatus {
    pub current_index: usize,
    pub queued: usize,
    pub caught_up: bool,
    pub top_post: Option<SocialPost>,
    pub staged_post_id: Option<String>,
    /// `None` until the top card receives input
    pub card_state: Option<CardState>,
    pub pending_token: Option<u64>,
    pub history_len: usize,
    pub favorites_len: usize,
}

/// Tally of interactions so far
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractionSummary {
    pub total: usize,
    pub counts: HashMap<InteractionType, usize>,
    pub favorites: usize,
}

impl InteractionSummary {
    pub fn from_history<'a>(
        history: impl IntoIterator<Item = &'a HistoryEntry>,
        favorites: usize,
    ) -> Self {
        let mut summary = Self {
            favorites,
            ..Self::default()
        };
        for entry in history {
            summary.total += 1;
            *summary.counts.entry(entry.event.kind).or_insert(0) += 1;
        }
        summary
    }

    pub fn count(&self, kind: InteractionType) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Relevant plus liked, over everything seen
    pub fn relevance_ratio(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        let positive = self.count(InteractionType::Relevant)
            + self.count(InteractionType::RelevantLike)
            + self.count(InteractionType::Save);
        Some(positive as f64 / self.total as f64)
    }
}
