use super::cache::{CommentThreads, CommentsCache, NvComment, WatchDataCache};
use super::watch::cached_comment_threads;
use super::NiconicoService;
use crate::core::{
    CommentsExtractor, CommentsInfoItem, ExtractionError, InfoItemsPage, ListLinkHandler, Page,
    Result,
};
use async_trait::async_trait;
use std::sync::Arc;

/// The flat comment thread of a video, newest first. Threads are fetched
/// once into the comments cache; pages are slices of the cached entry.
pub struct NiconicoCommentsExtractor {
    service: NiconicoService,
    link_handler: ListLinkHandler,
    watch_data_cache: Arc<WatchDataCache>,
    comments_cache: Arc<CommentsCache>,
}

impl NiconicoCommentsExtractor {
    pub fn new(
        service: NiconicoService,
        link_handler: ListLinkHandler,
        watch_data_cache: Arc<WatchDataCache>,
        comments_cache: Arc<CommentsCache>,
    ) -> Self {
        Self {
            service,
            link_handler,
            watch_data_cache,
            comments_cache,
        }
    }

    async fn threads(&self) -> Result<Arc<CommentThreads>> {
        cached_comment_threads(
            &self.service,
            &self.watch_data_cache,
            &self.comments_cache,
            self.link_handler.id(),
        )
        .await
    }

    /// A cursor past the last comment yields an empty final page.
    async fn page_at(&self, offset: u64) -> Result<InfoItemsPage<CommentsInfoItem>> {
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let threads = self.threads().await?;
        let page_size = self.service.config().page_size.max(1) as usize;

        let mut comments: Vec<&NvComment> = threads.fork("main").collect();
        comments.sort_by(|a, b| b.no.cmp(&a.no));

        let items = comments
            .iter()
            .skip(offset)
            .take(page_size)
            .map(|c| comment_item(c))
            .collect();

        let next_page = offset
            .checked_add(page_size)
            .filter(|next| *next < comments.len())
            .map(|next| Page::new(self.link_handler.url(), Some(next.to_string())));
        Ok(InfoItemsPage::new(items, next_page))
    }
}

fn comment_item(comment: &NvComment) -> CommentsInfoItem {
    CommentsInfoItem {
        comment_id: comment.id.clone(),
        text: comment.body.clone(),
        uploader_id: comment.user_id.clone(),
        posted_at: comment.posted_at.clone(),
        like_count: comment.nicoru_count,
        is_premium: comment.is_premium,
    }
}

#[async_trait]
impl CommentsExtractor for NiconicoCommentsExtractor {
    fn link_handler(&self) -> &ListLinkHandler {
        &self.link_handler
    }

    async fn initial_page(&self) -> Result<InfoItemsPage<CommentsInfoItem>> {
        let offset = self
            .link_handler
            .cursor()
            .and_then(Page::number)
            .unwrap_or(0);
        self.page_at(offset).await
    }

    async fn page(&self, page: &Page) -> Result<InfoItemsPage<CommentsInfoItem>> {
        let offset = page
            .number()
            .ok_or_else(|| ExtractionError::parsing(format!("bad comments page {:?}", page)))?;
        self.page_at(offset).await
    }
}
