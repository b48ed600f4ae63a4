use crate::core::error::{ExtractionError, Result};
use crate::core::extractor::{
    BulletCommentsExtractor, CommentsExtractor, ListExtractor, SearchExtractor, StreamExtractor,
    SubscriptionExtractor, SuggestionExtractor,
};
use crate::core::kiosk::KioskList;
use crate::core::linkhandler::{
    LinkHandler, LinkHandlerFactory, ListLinkHandler, ListLinkHandlerFactory, SearchQueryHandler,
    SearchQueryHandlerFactory,
};
use crate::core::{Capability, LinkType, ServiceInfo};
use std::sync::Arc;

/// A content provider: the composition point between link handler
/// factories and the extractors that consume their handlers.
///
/// Factory getters return `None` and extractor constructors return
/// [`ExtractionError::Unsupported`] for capabilities the service has no
/// implementation of. The advertised manifest lives in [`ServiceInfo`].
pub trait StreamingService: Send + Sync {
    fn service_id(&self) -> u32;

    fn info(&self) -> &ServiceInfo;

    fn base_url(&self) -> &str;

    /// Whether the manifest advertises `capability`.
    fn supports(&self, capability: Capability) -> bool {
        self.info().capabilities.contains(capability)
    }

    fn stream_lh_factory(&self) -> Arc<dyn LinkHandlerFactory>;

    fn channel_lh_factory(&self) -> Option<Arc<dyn ListLinkHandlerFactory>> {
        None
    }

    fn playlist_lh_factory(&self) -> Option<Arc<dyn ListLinkHandlerFactory>> {
        None
    }

    fn search_qh_factory(&self) -> Option<Arc<dyn SearchQueryHandlerFactory>> {
        None
    }

    fn comments_lh_factory(&self) -> Option<Arc<dyn ListLinkHandlerFactory>> {
        None
    }

    fn bullet_comments_lh_factory(&self) -> Option<Arc<dyn ListLinkHandlerFactory>> {
        None
    }

    fn stream_extractor(&self, handler: LinkHandler) -> Result<Box<dyn StreamExtractor>>;

    fn channel_extractor(&self, _handler: ListLinkHandler) -> Result<Box<dyn ListExtractor>> {
        Err(ExtractionError::Unsupported(Capability::Channel))
    }

    fn playlist_extractor(&self, _handler: ListLinkHandler) -> Result<Box<dyn ListExtractor>> {
        Err(ExtractionError::Unsupported(Capability::Playlist))
    }

    fn search_extractor(&self, _handler: SearchQueryHandler) -> Result<Box<dyn SearchExtractor>> {
        Err(ExtractionError::Unsupported(Capability::Search))
    }

    fn comments_extractor(&self, _handler: ListLinkHandler) -> Result<Box<dyn CommentsExtractor>> {
        Err(ExtractionError::Unsupported(Capability::Comments))
    }

    fn bullet_comments_extractor(
        &self,
        _handler: ListLinkHandler,
    ) -> Result<Box<dyn BulletCommentsExtractor>> {
        Err(ExtractionError::Unsupported(Capability::BulletComments))
    }

    fn suggestion_extractor(&self) -> Option<Box<dyn SuggestionExtractor>> {
        None
    }

    fn subscription_extractor(&self) -> Option<Box<dyn SubscriptionExtractor>> {
        None
    }

    fn kiosk_list(&self) -> Result<KioskList> {
        Ok(KioskList::new(self.service_id()))
    }

    fn link_type(&self, url: &str) -> LinkType {
        if self.stream_lh_factory().accepts_url(url) {
            LinkType::Stream
        } else if self
            .channel_lh_factory()
            .map_or(false, |f| f.accepts_url(url))
        {
            LinkType::Channel
        } else if self
            .playlist_lh_factory()
            .map_or(false, |f| f.accepts_url(url))
        {
            LinkType::Playlist
        } else {
            LinkType::None
        }
    }

    fn stream_extractor_from_url(&self, url: &str) -> Result<Box<dyn StreamExtractor>> {
        let handler = self.stream_lh_factory().from_url(url)?;
        self.stream_extractor(handler)
    }

    fn channel_extractor_from_url(&self, url: &str) -> Result<Box<dyn ListExtractor>> {
        let factory = self
            .channel_lh_factory()
            .ok_or(ExtractionError::Unsupported(Capability::Channel))?;
        self.channel_extractor(factory.from_url(url)?)
    }

    fn playlist_extractor_from_url(&self, url: &str) -> Result<Box<dyn ListExtractor>> {
        let factory = self
            .playlist_lh_factory()
            .ok_or(ExtractionError::Unsupported(Capability::Playlist))?;
        self.playlist_extractor(factory.from_url(url)?)
    }

    fn comments_extractor_from_url(&self, url: &str) -> Result<Box<dyn CommentsExtractor>> {
        let factory = self
            .comments_lh_factory()
            .ok_or(ExtractionError::Unsupported(Capability::Comments))?;
        self.comments_extractor(factory.from_url(url)?)
    }

    fn bullet_comments_extractor_from_url(
        &self,
        url: &str,
    ) -> Result<Box<dyn BulletCommentsExtractor>> {
        let factory = self
            .bullet_comments_lh_factory()
            .ok_or(ExtractionError::Unsupported(Capability::BulletComments))?;
        self.bullet_comments_extractor(factory.from_url(url)?)
    }

    fn search_extractor_for_query(
        &self,
        query: &str,
        content_filters: &[String],
        sort_filters: &[String],
    ) -> Result<Box<dyn SearchExtractor>> {
        let factory = self
            .search_qh_factory()
            .ok_or(ExtractionError::Unsupported(Capability::Search))?;
        self.search_extractor(factory.from_query(query, content_filters, sort_filters)?)
    }
}
