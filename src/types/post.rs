//! Post records supplied by a post source

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Twitter,
    Instagram,
    Linkedin,
    News,
}

impl Platform {
    /// Picture-first platforms get a picture when the source sent none
    pub fn is_image_centric(&self) -> bool {
        matches!(self, Platform::Instagram | Platform::News)
    }
}

/// One card's worth of content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialPost {
    /// May arrive empty from a source; see [`SocialPost::normalize`]
    #[serde(default)]
    pub id: String,
    pub platform: Platform,
    pub author: String,
    #[serde(default)]
    pub handle: String,
    #[serde(default)]
    pub avatar_url: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Relative age as shown on the card ("2h")
    #[serde(default)]
    pub timestamp: String,
    pub likes: u64,
    pub comments: u64,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl SocialPost {
    /// Stable id from author, handle and content
    pub fn derive_id(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.author.as_bytes());
        hasher.update([0u8]);
        hasher.update(self.handle.as_bytes());
        hasher.update([0u8]);
        hasher.update(self.content.as_bytes());
        let digest = hasher.finalize();
        let hex: String = digest[..8].iter().map(|b| format!("{:02x}", b)).collect();
        format!("post-{}", hex)
    }

    /// Fill the fields a source is allowed to omit
    pub fn normalize(mut self) -> Self {
        if self.id.trim().is_empty() {
            self.id = self.derive_id();
        }
        if self.avatar_url.is_empty() {
            let seed = if self.handle.is_empty() { &self.author } else { &self.handle };
            self.avatar_url = format!("https://picsum.photos/seed/{}/100/100", url_seed(seed));
        }
        if self.image_url.is_none() && self.platform.is_image_centric() {
            self.image_url = Some(format!(
                "https://picsum.photos/seed/{}/600/800",
                url_seed(&self.id)
            ));
        }
        self
    }
}

fn url_seed(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-').collect()
}
