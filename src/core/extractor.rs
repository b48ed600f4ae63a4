use crate::core::error::{ExtractionError, Result};
use crate::core::{
    BulletComment, CommentsInfoItem, InfoItemsPage, LinkHandler, LinkType, ListLinkHandler, Page,
    SearchQueryHandler, StreamInfo, StreamInfoItem, StreamingService, SubscriptionItem,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;
use url::Url;

#[async_trait]
pub trait StreamExtractor: Send + Sync {
    fn link_handler(&self) -> &LinkHandler;

    fn id(&self) -> &str {
        self.link_handler().id()
    }

    fn url(&self) -> &str {
        self.link_handler().url()
    }

    async fn fetch(&self) -> Result<StreamInfo>;
}

/// Paged lists of videos: channels, playlists and kiosks.
#[async_trait]
pub trait ListExtractor: Send + Sync {
    fn link_handler(&self) -> &ListLinkHandler;

    fn id(&self) -> &str {
        self.link_handler().id()
    }

    fn url(&self) -> &str {
        self.link_handler().url()
    }

    async fn initial_page(&self) -> Result<InfoItemsPage<StreamInfoItem>>;

    async fn page(&self, page: &Page) -> Result<InfoItemsPage<StreamInfoItem>>;
}

#[async_trait]
pub trait SearchExtractor: Send + Sync {
    fn query_handler(&self) -> &SearchQueryHandler;

    fn search_string(&self) -> &str {
        self.query_handler().search_string()
    }

    async fn initial_page(&self) -> Result<InfoItemsPage<StreamInfoItem>>;

    async fn page(&self, page: &Page) -> Result<InfoItemsPage<StreamInfoItem>>;
}

#[async_trait]
pub trait CommentsExtractor: Send + Sync {
    fn link_handler(&self) -> &ListLinkHandler;

    async fn initial_page(&self) -> Result<InfoItemsPage<CommentsInfoItem>>;

    async fn page(&self, page: &Page) -> Result<InfoItemsPage<CommentsInfoItem>>;
}

#[async_trait]
pub trait BulletCommentsExtractor: Send + Sync {
    fn link_handler(&self) -> &ListLinkHandler;

    /// All bullet comments of the video, ordered by playback offset.
    async fn bullet_comments(&self) -> Result<Vec<BulletComment>>;
}

#[async_trait]
pub trait SuggestionExtractor: Send + Sync {
    async fn suggestion_list(&self, query: &str) -> Result<Vec<String>>;
}

#[async_trait]
pub trait SubscriptionExtractor: Send + Sync {
    async fn subscriptions(&self, source: &str) -> Result<Vec<SubscriptionItem>>;
}

/// Registry of services; finds the one that understands a URL.
pub struct ExtractorEngine {
    pub services: Vec<Arc<dyn StreamingService>>,
}

impl ExtractorEngine {
    pub fn new() -> Self {
        Self {
            services: Vec::new(),
        }
    }

    pub fn register_service(&mut self, service: Arc<dyn StreamingService>) {
        debug!(
            "registering service {} ({})",
            service.info().name,
            service.service_id()
        );
        self.services.push(service);
    }

    pub fn service_by_id(&self, service_id: u32) -> Option<Arc<dyn StreamingService>> {
        self.services
            .iter()
            .find(|s| s.service_id() == service_id)
            .cloned()
    }

    pub fn service_by_name(&self, name: &str) -> Option<Arc<dyn StreamingService>> {
        self.services
            .iter()
            .find(|s| s.info().name.eq_ignore_ascii_case(name))
            .cloned()
    }

    /// First registered service that recognises the URL, with the kind of
    /// link it recognised.
    pub fn resolve(&self, url: &str) -> Result<(Arc<dyn StreamingService>, LinkType)> {
        Url::parse(url).map_err(|e| ExtractionError::parsing(format!("{}: {}", url, e)))?;

        for service in &self.services {
            let link_type = service.link_type(url);
            if link_type != LinkType::None {
                return Ok((service.clone(), link_type));
            }
        }

        Err(ExtractionError::parsing(format!(
            "no registered service accepts {}",
            url
        )))
    }

    pub fn service_by_url(&self, url: &str) -> Result<Arc<dyn StreamingService>> {
        self.resolve(url).map(|(service, _)| service)
    }
}

impl Default for ExtractorEngine {
    fn default() -> Self {
        Self::new()
    }
}
