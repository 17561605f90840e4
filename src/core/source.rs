//! Post sources: where the feed gets its cards

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::error::{FeedError, Result};
use crate::types::{Platform, SocialPost};

pub trait PostSource: Send + Sync {
    /// One batch of posts for the given interests
    fn fetch(&self, interests: &[String]) -> Result<Vec<SocialPost>>;
}

/// Built-in offline feed: the same two posts every batch, ids unique per batch
#[derive(Debug, Default)]
pub struct MockFeedSource {
    batches: AtomicU64,
}

impl MockFeedSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PostSource for MockFeedSource {
    fn fetch(&self, interests: &[String]) -> Result<Vec<SocialPost>> {
        let batch = self.batches.fetch_add(1, Ordering::Relaxed) + 1;
        debug!(batch, interests = ?interests, "mock feed batch");

        Ok(vec![
            SocialPost {
                id: format!("{}-1", batch),
                platform: Platform::Twitter,
                author: "Elon Musk Parody".to_string(),
                handle: "@elon_fake".to_string(),
                avatar_url: "https://picsum.photos/seed/elon/100/100".to_string(),
                content: "La IA va a cambiar todo. ¿Están listos? 🚀 #AI #Future".to_string(),
                image_url: None,
                timestamp: "2h".to_string(),
                likes: 1200,
                comments: 300,
                tags: vec!["Tech".to_string(), "AI".to_string()],
            },
            SocialPost {
                id: format!("{}-2", batch),
                platform: Platform::Instagram,
                author: "Photography Daily".to_string(),
                handle: "@photo_daily".to_string(),
                avatar_url: "https://picsum.photos/seed/photo/100/100".to_string(),
                content: "Golden hour in Paris. Nothing beats this view. 📸✨".to_string(),
                image_url: Some("https://picsum.photos/seed/paris/600/800".to_string()),
                timestamp: "5h".to_string(),
                likes: 4500,
                comments: 120,
                tags: vec!["Travel".to_string(), "Art".to_string()],
            },
        ])
    }
}

/// Posts from a JSON array on disk. Every fetch re-reads the file, so ids get
/// a batch suffix to stay unique across prefetches.
#[derive(Debug)]
pub struct JsonFileSource {
    path: PathBuf,
    batches: AtomicU64,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            batches: AtomicU64::new(0),
        }
    }
}

impl PostSource for JsonFileSource {
    fn fetch(&self, _interests: &[String]) -> Result<Vec<SocialPost>> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| FeedError::Source {
            message: format!("{}: {}", self.path.display(), e),
        })?;
        let posts: Vec<SocialPost> = serde_json::from_str(&content)?;
        let batch = self.batches.fetch_add(1, Ordering::Relaxed) + 1;
        debug!(batch, path = %self.path.display(), posts = posts.len(), "file batch");

        Ok(posts
            .into_iter()
            .map(|mut post| {
                let base = if post.id.trim().is_empty() {
                    post.derive_id()
                } else {
                    post.id.clone()
                };
                post.id = format!("{}-{}", base, batch);
                post
            })
            .collect())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_ids_unique_per_batch() {
        let source = MockFeedSource::new();
        let a = source.fetch(&[]).unwrap();
        let b = source.fetch(&[]).unwrap();
        assert_eq!(a.len(), 2);
        assert_ne!(a[0].id, b[0].id);
        assert_eq!(a[1].platform, Platform::Instagram);
    }

    #[test]
    fn test_file_ids_unique_per_batch() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            r#"[{"id":"a","platform":"twitter","author":"A","content":"x","likes":0,"comments":0},
                {"platform":"news","author":"B","content":"y","likes":0,"comments":0}]"#,
        )
        .unwrap();

        let source = JsonFileSource::new(file.path());
        let first = source.fetch(&[]).unwrap();
        let second = source.fetch(&[]).unwrap();
        assert_eq!(first[0].id, "a-1");
        assert_eq!(second[0].id, "a-2");
        assert!(first[1].id.starts_with("post-"));
        assert_ne!(first[1].id, second[1].id);
    }

    #[test]
    fn test_missing_file_is_source_error() {
        let source = JsonFileSource::new("./no/such/posts.json");
        assert!(matches!(source.fetch(&[]), Err(FeedError::Source { .. })));
    }
}
