//! NicoNico (nicovideo.jp).
//!
//! The service owns one instance of every link handler factory and, on
//! first use, one watch-data cache and one comments cache. Stream, comments
//! and bullet-comments extractors built by the same service share those
//! caches, so a video's watch page is fetched once no matter how many
//! capabilities look at it.

mod bullet_comments;
pub mod cache;
mod comments;
pub mod linkhandler;
mod nvapi;
mod playlist;
mod search;
mod stream;
mod suggestion;
mod trend;
mod user;
mod watch;

pub use bullet_comments::NiconicoBulletCommentsExtractor;
pub use cache::{CommentThreads, CommentsCache, NvComment, WatchData, WatchDataCache};
pub use comments::NiconicoCommentsExtractor;
pub use playlist::NiconicoPlaylistExtractor;
pub use search::NiconicoSearchExtractor;
pub use stream::NiconicoStreamExtractor;
pub use suggestion::NiconicoSuggestionExtractor;
pub use trend::NiconicoTrendExtractor;
pub use user::NiconicoUserExtractor;

use crate::config::Config;
use crate::core::{
    BulletCommentsExtractor, Capability, CapabilitySet, CommentsExtractor, Downloader,
    ExtractionError, HttpDownloader, KioskExtractorFactory, KioskList, LinkHandler,
    LinkHandlerFactory, ListExtractor, ListLinkHandler, ListLinkHandlerFactory, RequestHeaders,
    Result, SearchExtractor, SearchQueryHandler, SearchQueryHandlerFactory, ServiceInfo,
    StreamExtractor, StreamingService, SuggestionExtractor,
};
use linkhandler::{
    NiconicoCommentsLinkHandlerFactory, NiconicoPlaylistLinkHandlerFactory,
    NiconicoSearchQueryHandlerFactory, NiconicoStreamLinkHandlerFactory,
    NiconicoTrendLinkHandlerFactory, NiconicoUserLinkHandlerFactory, TRENDING_KIOSK_ID,
};
use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::debug;

pub const SERVICE_NAME: &str = "NicoNico";
pub const BASE_URL: &str = "https://www.nicovideo.jp";
pub const USER_URL: &str = "https://www.nicovideo.jp/user/";
pub const WATCH_URL: &str = "https://www.nicovideo.jp/watch/";
pub const CHANNEL_URL: &str = "https://ch.nicovideo.jp/";
pub const MYLIST_PAGE_URL: &str = "https://www.nicovideo.jp/mylist/";
pub const DAILY_TREND_URL: &str = "https://www.nicovideo.jp/ranking/genre/all?term=24h&rss=2.0";
pub const SUGGESTION_URL: &str = "https://sug.search.nicovideo.jp/suggestion/expand/";
pub const WATCH_API_URL: &str = "https://www.nicovideo.jp/api/watch/v3_guest/";
pub const MYLIST_URL: &str = "https://nvapi.nicovideo.jp/v2/mylists/";
pub const USER_VIDEOS_URL: &str = "https://nvapi.nicovideo.jp/v3/users/";
pub const SEARCH_API_URL: &str =
    "https://snapshot.search.nicovideo.jp/api/v2/snapshot/video/contents/search";
pub const TRENDING_RSS_STR: &str = r"^第\d+位：(.*)$";

/// Most videos only carry Japanese metadata; asking for ja-JP returns the
/// original titles.
pub const LOCALE: &str = "ja-JP";

/// Capabilities advertised regardless of configuration.
const BASE_CAPABILITIES: CapabilitySet = CapabilitySet::empty()
    .with(Capability::Stream)
    .with(Capability::Playlist)
    .with(Capability::Channel)
    .with(Capability::Search)
    .with(Capability::Suggestions)
    .with(Capability::Trending);

/// Headers identifying the web frontend, required by nvapi and nvcomment.
pub fn frontend_headers() -> RequestHeaders {
    let mut headers = RequestHeaders::new();
    headers.insert("X-Frontend-Id".to_string(), "6".to_string());
    headers.insert("X-Frontend-Version".to_string(), "0".to_string());
    headers
}

struct ServiceState {
    service_id: u32,
    info: ServiceInfo,
    config: Config,
    downloader: Arc<dyn Downloader>,
    stream_factory: Arc<NiconicoStreamLinkHandlerFactory>,
    channel_factory: Arc<NiconicoUserLinkHandlerFactory>,
    playlist_factory: Arc<NiconicoPlaylistLinkHandlerFactory>,
    search_factory: Arc<NiconicoSearchQueryHandlerFactory>,
    comments_factory: Arc<NiconicoCommentsLinkHandlerFactory>,
    bullet_comments_factory: Arc<NiconicoCommentsLinkHandlerFactory>,
    trend_factory: Arc<NiconicoTrendLinkHandlerFactory>,
    watch_data_cache: OnceCell<Arc<WatchDataCache>>,
    comments_cache: OnceCell<Arc<CommentsCache>>,
}

/// Cheap to clone; clones share factories, downloader and caches. Build a
/// new service with [`NiconicoService::new`] to get isolated caches.
#[derive(Clone)]
pub struct NiconicoService {
    state: Arc<ServiceState>,
}

impl NiconicoService {
    pub fn new(config: Config) -> Result<Self> {
        let downloader = Arc::new(HttpDownloader::new(&config)?);
        Ok(Self::with_downloader(config, downloader))
    }

    pub fn with_downloader(config: Config, downloader: Arc<dyn Downloader>) -> Self {
        let mut capabilities = BASE_CAPABILITIES;
        if config.advertise_comments {
            capabilities = capabilities
                .with(Capability::Comments)
                .with(Capability::BulletComments);
        }

        let stream_factory = Arc::new(NiconicoStreamLinkHandlerFactory);
        let shared_stream: Arc<dyn LinkHandlerFactory> = stream_factory.clone();

        Self {
            state: Arc::new(ServiceState {
                service_id: config.service_id,
                info: ServiceInfo {
                    name: SERVICE_NAME.to_string(),
                    capabilities,
                },
                config,
                downloader,
                stream_factory,
                channel_factory: Arc::new(NiconicoUserLinkHandlerFactory),
                playlist_factory: Arc::new(NiconicoPlaylistLinkHandlerFactory),
                search_factory: Arc::new(NiconicoSearchQueryHandlerFactory),
                comments_factory: Arc::new(NiconicoCommentsLinkHandlerFactory::new(
                    shared_stream.clone(),
                )),
                bullet_comments_factory: Arc::new(NiconicoCommentsLinkHandlerFactory::new(
                    shared_stream,
                )),
                trend_factory: Arc::new(NiconicoTrendLinkHandlerFactory),
                watch_data_cache: OnceCell::new(),
                comments_cache: OnceCell::new(),
            }),
        }
    }

    pub fn config(&self) -> &Config {
        &self.state.config
    }

    pub fn downloader(&self) -> &dyn Downloader {
        self.state.downloader.as_ref()
    }

    /// Headers the mylist and user-video APIs expect.
    pub fn mylist_headers() -> RequestHeaders {
        let mut headers = frontend_headers();
        headers.insert("Referer".to_string(), format!("{}/", BASE_URL));
        headers.insert("Origin".to_string(), BASE_URL.to_string());
        headers
    }

    pub fn watch_data_cache(&self) -> Arc<WatchDataCache> {
        self.state
            .watch_data_cache
            .get_or_init(|| {
                debug!("creating watch data cache for service {}", self.state.service_id);
                Arc::new(WatchDataCache::new())
            })
            .clone()
    }

    pub fn comments_cache(&self) -> Arc<CommentsCache> {
        self.state
            .comments_cache
            .get_or_init(|| {
                debug!("creating comments cache for service {}", self.state.service_id);
                Arc::new(CommentsCache::new())
            })
            .clone()
    }

    pub fn is_watch_data_cache_created(&self) -> bool {
        self.state.watch_data_cache.get().is_some()
    }

    pub fn is_comments_cache_created(&self) -> bool {
        self.state.comments_cache.get().is_some()
    }

    /// Capabilities missing from the manifest are still constructible
    /// unless `strict_capabilities` is set.
    fn check_constructible(&self, capability: Capability) -> Result<()> {
        if self.supports(capability) {
            return Ok(());
        }
        if self.state.config.strict_capabilities {
            return Err(ExtractionError::Unsupported(capability));
        }
        debug!(
            "{} is not advertised by {}, constructing its extractor anyway",
            capability, SERVICE_NAME
        );
        Ok(())
    }
}

impl StreamingService for NiconicoService {
    fn service_id(&self) -> u32 {
        self.state.service_id
    }

    fn info(&self) -> &ServiceInfo {
        &self.state.info
    }

    fn base_url(&self) -> &str {
        BASE_URL
    }

    fn stream_lh_factory(&self) -> Arc<dyn LinkHandlerFactory> {
        self.state.stream_factory.clone()
    }

    fn channel_lh_factory(&self) -> Option<Arc<dyn ListLinkHandlerFactory>> {
        Some(self.state.channel_factory.clone())
    }

    fn playlist_lh_factory(&self) -> Option<Arc<dyn ListLinkHandlerFactory>> {
        Some(self.state.playlist_factory.clone())
    }

    fn search_qh_factory(&self) -> Option<Arc<dyn SearchQueryHandlerFactory>> {
        Some(self.state.search_factory.clone())
    }

    fn comments_lh_factory(&self) -> Option<Arc<dyn ListLinkHandlerFactory>> {
        Some(self.state.comments_factory.clone())
    }

    fn bullet_comments_lh_factory(&self) -> Option<Arc<dyn ListLinkHandlerFactory>> {
        Some(self.state.bullet_comments_factory.clone())
    }

    fn stream_extractor(&self, handler: LinkHandler) -> Result<Box<dyn StreamExtractor>> {
        self.check_constructible(Capability::Stream)?;
        Ok(Box::new(NiconicoStreamExtractor::new(
            self.clone(),
            handler,
            self.watch_data_cache(),
        )))
    }

    fn channel_extractor(&self, handler: ListLinkHandler) -> Result<Box<dyn ListExtractor>> {
        self.check_constructible(Capability::Channel)?;
        Ok(Box::new(NiconicoUserExtractor::new(self.clone(), handler)))
    }

    fn playlist_extractor(&self, handler: ListLinkHandler) -> Result<Box<dyn ListExtractor>> {
        self.check_constructible(Capability::Playlist)?;
        Ok(Box::new(NiconicoPlaylistExtractor::new(self.clone(), handler)))
    }

    fn search_extractor(&self, handler: SearchQueryHandler) -> Result<Box<dyn SearchExtractor>> {
        self.check_constructible(Capability::Search)?;
        Ok(Box::new(NiconicoSearchExtractor::new(self.clone(), handler)))
    }

    fn comments_extractor(&self, handler: ListLinkHandler) -> Result<Box<dyn CommentsExtractor>> {
        self.check_constructible(Capability::Comments)?;
        Ok(Box::new(NiconicoCommentsExtractor::new(
            self.clone(),
            handler,
            self.watch_data_cache(),
            self.comments_cache(),
        )))
    }

    fn bullet_comments_extractor(
        &self,
        handler: ListLinkHandler,
    ) -> Result<Box<dyn BulletCommentsExtractor>> {
        self.check_constructible(Capability::BulletComments)?;
        Ok(Box::new(NiconicoBulletCommentsExtractor::new(
            self.clone(),
            handler,
            self.watch_data_cache(),
            self.comments_cache(),
        )))
    }

    fn suggestion_extractor(&self) -> Option<Box<dyn SuggestionExtractor>> {
        Some(Box::new(NiconicoSuggestionExtractor::new(self.clone())))
    }

    fn kiosk_list(&self) -> Result<KioskList> {
        let service = self.clone();
        let trend_factory = self.state.trend_factory.clone();
        let extractor_factory: KioskExtractorFactory =
            Arc::new(move |url: &str, id: &str| -> Result<Box<dyn ListExtractor>> {
                let handler = trend_factory.from_url(url)?;
                Ok(Box::new(NiconicoTrendExtractor::new(service.clone(), handler, id)))
            });

        let mut kiosks = KioskList::new(self.service_id());
        kiosks.add_kiosk_entry(
            extractor_factory,
            self.state.trend_factory.clone(),
            TRENDING_KIOSK_ID,
        )?;
        kiosks.set_default_kiosk(TRENDING_KIOSK_ID)?;
        Ok(kiosks)
    }
}
