use super::{NiconicoService, LOCALE, WATCH_URL};
use crate::core::{
    ExtractionError, InfoItemsPage, Page, Request, Result, SearchExtractor, SearchQueryHandler,
    StreamInfoItem,
};
use async_trait::async_trait;
use serde::Deserialize;

/// The snapshot API refuses offsets beyond this.
const MAX_OFFSET: u64 = 100_000;
const MAX_LIMIT: u32 = 100;

#[derive(Deserialize)]
struct SnapshotResponse {
    meta: SnapshotMeta,
    #[serde(default)]
    data: Vec<SnapshotVideo>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotMeta {
    status: u16,
    #[serde(default)]
    total_count: u64,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotVideo {
    content_id: String,
    title: String,
    #[serde(default)]
    view_counter: Option<u64>,
    #[serde(default)]
    length_seconds: Option<u64>,
    #[serde(default)]
    thumbnail_url: Option<String>,
}

pub struct NiconicoSearchExtractor {
    service: NiconicoService,
    query_handler: SearchQueryHandler,
}

impl NiconicoSearchExtractor {
    pub fn new(service: NiconicoService, query_handler: SearchQueryHandler) -> Self {
        Self {
            service,
            query_handler,
        }
    }

    fn limit(&self) -> u32 {
        self.service.config().page_size.clamp(1, MAX_LIMIT)
    }

    async fn fetch_at(&self, offset: u64) -> Result<InfoItemsPage<StreamInfoItem>> {
        if offset > MAX_OFFSET {
            return Err(ExtractionError::parsing(format!(
                "search offset {} is beyond {}",
                offset, MAX_OFFSET
            )));
        }
        let limit = self.limit();
        let url = format!(
            "{}&_offset={}&_limit={}",
            self.query_handler.url(),
            offset,
            limit
        );
        let request = Request::get(url).header("Accept-Language", LOCALE);
        let response: SnapshotResponse = self
            .service
            .downloader()
            .execute(request)
            .await?
            .error_for_status()?
            .json()?;

        if response.meta.status != 200 {
            return Err(ExtractionError::ContentNotAvailable(
                response
                    .meta
                    .error_message
                    .unwrap_or_else(|| format!("search failed with {}", response.meta.status)),
            ));
        }

        let next_page = offset
            .checked_add(u64::from(limit))
            .filter(|next| *next < response.meta.total_count && *next <= MAX_OFFSET)
            .map(|next| Page::new(self.query_handler.url(), Some(next.to_string())));
        let items = response
            .data
            .into_iter()
            .map(|v| StreamInfoItem {
                url: format!("{}{}", WATCH_URL, v.content_id),
                name: v.title,
                uploader_name: None,
                duration: v.length_seconds,
                view_count: v.view_counter,
                thumbnail_url: v.thumbnail_url,
            })
            .collect();
        Ok(InfoItemsPage::new(items, next_page))
    }
}

#[async_trait]
impl SearchExtractor for NiconicoSearchExtractor {
    fn query_handler(&self) -> &SearchQueryHandler {
        &self.query_handler
    }

    async fn initial_page(&self) -> Result<InfoItemsPage<StreamInfoItem>> {
        let offset = self
            .query_handler
            .cursor()
            .and_then(Page::number)
            .unwrap_or(0);
        self.fetch_at(offset).await
    }

    async fn page(&self, page: &Page) -> Result<InfoItemsPage<StreamInfoItem>> {
        let offset = page
            .number()
            .ok_or_else(|| ExtractionError::parsing(format!("bad search page {:?}", page)))?;
        self.fetch_at(offset).await
    }
}
