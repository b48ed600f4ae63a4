use crate::core::{KeyedCache, Result};
use serde::Deserialize;
use std::future::Future;
use std::sync::Arc;

/// Parsed response of the watch API: what the stream extractor reports
/// and the comment session both extractors of comments need.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchData {
    pub video: WatchVideo,
    #[serde(default)]
    pub owner: Option<WatchOwner>,
    #[serde(default)]
    pub channel: Option<WatchChannel>,
    #[serde(default)]
    pub tag: WatchTags,
    pub comment: WatchComment,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchVideo {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub count: WatchCounts,
    pub duration: u64,
    pub thumbnail: WatchThumbnail,
    #[serde(default)]
    pub registered_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct WatchCounts {
    pub view: u64,
    pub comment: u64,
    pub mylist: u64,
    pub like: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchThumbnail {
    pub url: String,
    #[serde(default)]
    pub large_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WatchOwner {
    pub id: u64,
    pub nickname: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WatchChannel {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct WatchTags {
    pub items: Vec<WatchTag>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WatchTag {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchComment {
    pub nv_comment: NvCommentSession,
}

/// Session handed out with the watch data; the comment server only answers
/// requests that carry it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NvCommentSession {
    pub thread_key: String,
    pub server: String,
    pub params: serde_json::Value,
}

impl WatchData {
    pub fn uploader_name(&self) -> Option<&str> {
        self.owner
            .as_ref()
            .map(|o| o.nickname.as_str())
            .or_else(|| self.channel.as_ref().map(|c| c.name.as_str()))
    }

    pub fn uploader_url(&self) -> Option<String> {
        match (&self.owner, &self.channel) {
            (Some(owner), _) => Some(format!("{}{}", super::USER_URL, owner.id)),
            (None, Some(channel)) => Some(format!("{}{}", super::CHANNEL_URL, channel.id)),
            (None, None) => None,
        }
    }

    pub fn thumbnail_url(&self) -> &str {
        self.video
            .thumbnail
            .large_url
            .as_deref()
            .unwrap_or(&self.video.thumbnail.url)
    }

    pub fn tags(&self) -> Vec<String> {
        self.tag.items.iter().map(|t| t.name.clone()).collect()
    }
}

/// Every comment thread of one video, as returned by the comment server.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CommentThreads {
    pub threads: Vec<CommentThread>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThread {
    pub id: String,
    /// `main`, `owner` or `easy`.
    pub fork: String,
    #[serde(default)]
    pub comment_count: u64,
    #[serde(default)]
    pub comments: Vec<NvComment>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NvComment {
    pub id: String,
    pub no: u64,
    pub vpos_ms: u64,
    pub body: String,
    #[serde(default)]
    pub commands: Vec<String>,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub posted_at: String,
    #[serde(default)]
    pub nicoru_count: u64,
}

impl CommentThreads {
    pub fn fork<'a>(&'a self, fork: &'a str) -> impl Iterator<Item = &'a NvComment> + 'a {
        self.threads
            .iter()
            .filter(move |t| t.fork == fork)
            .flat_map(|t| t.comments.iter())
    }

    /// Every comment with the fork of the thread it came from.
    pub fn all(&self) -> impl Iterator<Item = (&str, &NvComment)> {
        self.threads
            .iter()
            .flat_map(|t| t.comments.iter().map(move |c| (t.fork.as_str(), c)))
    }
}

/// Watch data keyed by video id. Shared by every video-scoped extractor of
/// a service.
pub struct WatchDataCache {
    entries: KeyedCache<Arc<WatchData>>,
}

impl WatchDataCache {
    pub fn new() -> Self {
        Self {
            entries: KeyedCache::new("watch data"),
        }
    }

    pub async fn get(&self, video_id: &str) -> Option<Arc<WatchData>> {
        self.entries.get(video_id).await
    }

    pub async fn get_or_populate<F, Fut>(&self, video_id: &str, fetch: F) -> Result<Arc<WatchData>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<WatchData>>,
    {
        self.entries
            .get_or_populate(video_id, || async move { fetch().await.map(Arc::new) })
            .await
    }

    pub async fn invalidate(&self, video_id: &str) -> bool {
        self.entries.invalidate(video_id).await
    }

    pub async fn len(&self) -> usize {
        self.entries.len().await
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.is_empty().await
    }
}

impl Default for WatchDataCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Comment threads keyed by video id. Comments and bullet comments of the
/// same video read the same entry.
pub struct CommentsCache {
    entries: KeyedCache<Arc<CommentThreads>>,
}

impl CommentsCache {
    pub fn new() -> Self {
        Self {
            entries: KeyedCache::new("comments"),
        }
    }

    pub async fn get(&self, video_id: &str) -> Option<Arc<CommentThreads>> {
        self.entries.get(video_id).await
    }

    pub async fn get_or_populate<F, Fut>(
        &self,
        video_id: &str,
        fetch: F,
    ) -> Result<Arc<CommentThreads>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<CommentThreads>>,
    {
        self.entries
            .get_or_populate(video_id, || async move { fetch().await.map(Arc::new) })
            .await
    }

    pub async fn invalidate(&self, video_id: &str) -> bool {
        self.entries.invalidate(video_id).await
    }

    pub async fn len(&self) -> usize {
        self.entries.len().await
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.is_empty().await
    }
}

impl Default for CommentsCache {
    fn default() -> Self {
        Self::new()
    }
}
