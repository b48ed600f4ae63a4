use super::nvapi::{get_data, NvVideo};
use super::{NiconicoService, USER_VIDEOS_URL};
use crate::core::{
    ExtractionError, InfoItemsPage, ListExtractor, ListLinkHandler, Page, Result, StreamInfoItem,
};
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserVideos {
    total_count: u64,
    items: Vec<UserVideo>,
}

#[derive(Deserialize)]
struct UserVideo {
    essential: NvVideo,
}

/// Uploads of one user, newest first.
pub struct NiconicoUserExtractor {
    service: NiconicoService,
    link_handler: ListLinkHandler,
}

impl NiconicoUserExtractor {
    pub fn new(service: NiconicoService, link_handler: ListLinkHandler) -> Self {
        Self {
            service,
            link_handler,
        }
    }

    fn videos_url(&self, page: u64) -> String {
        format!(
            "{}{}/videos?sortKey=registeredAt&sortOrder=desc&pageSize={}&page={}",
            USER_VIDEOS_URL,
            self.link_handler.id(),
            self.service.config().page_size,
            page
        )
    }

    async fn fetch_page(&self, number: u64) -> Result<InfoItemsPage<StreamInfoItem>> {
        let videos: UserVideos = get_data(&self.service, &self.videos_url(number)).await?;

        let seen = number.checked_mul(u64::from(self.service.config().page_size));
        let has_more =
            !videos.items.is_empty() && seen.map_or(false, |seen| seen < videos.total_count);
        let next_page = number
            .checked_add(1)
            .filter(|_| has_more)
            .map(|next| Page::new(self.videos_url(next), Some(next.to_string())));
        let items = videos
            .items
            .into_iter()
            .map(|v| v.essential.into_item())
            .collect();
        Ok(InfoItemsPage::new(items, next_page))
    }
}

#[async_trait]
impl ListExtractor for NiconicoUserExtractor {
    fn link_handler(&self) -> &ListLinkHandler {
        &self.link_handler
    }

    async fn initial_page(&self) -> Result<InfoItemsPage<StreamInfoItem>> {
        let number = self
            .link_handler
            .cursor()
            .and_then(Page::number)
            .unwrap_or(1);
        self.fetch_page(number).await
    }

    async fn page(&self, page: &Page) -> Result<InfoItemsPage<StreamInfoItem>> {
        let number = page
            .number()
            .ok_or_else(|| ExtractionError::parsing(format!("bad user page {:?}", page)))?;
        self.fetch_page(number).await
    }
}
