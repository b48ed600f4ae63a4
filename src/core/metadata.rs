use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Everything the stream extractor reports about one video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamInfo {
    pub id: String,
    pub url: String,
    pub name: String,
    pub description: Option<String>,
    pub duration: Option<u64>,
    pub uploader_name: Option<String>,
    pub uploader_url: Option<String>,
    pub upload_date: Option<String>,
    pub view_count: Option<u64>,
    pub like_count: Option<u64>,
    pub comment_count: Option<u64>,
    pub thumbnail_url: Option<String>,
    pub tags: Vec<String>,
}

/// A video as it appears inside a list (channel, playlist, search, trend).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamInfoItem {
    pub url: String,
    pub name: String,
    pub uploader_name: Option<String>,
    pub duration: Option<u64>,
    pub view_count: Option<u64>,
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentsInfoItem {
    pub comment_id: String,
    pub text: String,
    pub uploader_id: String,
    pub posted_at: String,
    pub like_count: u64,
    pub is_premium: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletPosition {
    Regular,
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletSize {
    Small,
    Medium,
    Big,
}

/// A comment anchored to a playback offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletComment {
    pub text: String,
    pub offset_ms: u64,
    pub position: BulletPosition,
    pub size: BulletSize,
    /// 0xRRGGBB
    pub color: u32,
    pub by_owner: bool,
}

impl BulletComment {
    pub fn offset(&self) -> Duration {
        Duration::from_millis(self.offset_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionItem {
    pub service_id: u32,
    pub url: String,
    pub name: String,
}

/// Cursor pointing at one page of a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub url: String,
    pub id: Option<String>,
}

impl Page {
    pub fn new(url: impl Into<String>, id: Option<String>) -> Self {
        Self {
            url: url.into(),
            id,
        }
    }

    /// The page number or offset carried in `id`, when numeric.
    pub fn number(&self) -> Option<u64> {
        self.id.as_deref().and_then(|id| id.parse().ok())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoItemsPage<T> {
    pub items: Vec<T>,
    pub next_page: Option<Page>,
}

impl<T> InfoItemsPage<T> {
    pub fn new(items: Vec<T>, next_page: Option<Page>) -> Self {
        Self { items, next_page }
    }

    pub fn has_next_page(&self) -> bool {
        self.next_page.is_some()
    }
}
