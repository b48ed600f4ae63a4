use super::nvapi::{get_data, NvVideo};
use super::{NiconicoService, MYLIST_URL};
use crate::core::{
    ExtractionError, InfoItemsPage, ListExtractor, ListLinkHandler, Page, Result, StreamInfoItem,
};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

#[derive(Deserialize)]
struct MylistData {
    mylist: Mylist,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Mylist {
    name: String,
    #[serde(default)]
    has_next: bool,
    items: Vec<MylistItem>,
}

#[derive(Deserialize)]
struct MylistItem {
    video: NvVideo,
}

pub struct NiconicoPlaylistExtractor {
    service: NiconicoService,
    link_handler: ListLinkHandler,
}

impl NiconicoPlaylistExtractor {
    pub fn new(service: NiconicoService, link_handler: ListLinkHandler) -> Self {
        Self {
            service,
            link_handler,
        }
    }

    fn mylist_url(&self, page: u64) -> String {
        format!(
            "{}{}?pageSize={}&page={}",
            MYLIST_URL,
            self.link_handler.id(),
            self.service.config().page_size,
            page
        )
    }

    async fn fetch_page(&self, number: u64) -> Result<InfoItemsPage<StreamInfoItem>> {
        let data: MylistData = get_data(&self.service, &self.mylist_url(number)).await?;
        debug!("mylist {:?} page {}", data.mylist.name, number);

        let next_page = number
            .checked_add(1)
            .filter(|_| data.mylist.has_next)
            .map(|next| Page::new(self.mylist_url(next), Some(next.to_string())));
        let items = data
            .mylist
            .items
            .into_iter()
            .map(|item| item.video.into_item())
            .collect();
        Ok(InfoItemsPage::new(items, next_page))
    }
}

#[async_trait]
impl ListExtractor for NiconicoPlaylistExtractor {
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
            .ok_or_else(|| ExtractionError::parsing(format!("bad mylist page {:?}", page)))?;
        self.fetch_page(number).await
    }
}
