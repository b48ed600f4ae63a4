pub mod cache;
pub mod capability;
pub mod downloader;
pub mod error;
pub mod extractor;
pub mod kiosk;
pub mod linkhandler;
pub mod metadata;
pub mod service;

pub use cache::KeyedCache;
pub use capability::{Capability, CapabilitySet, LinkType, ServiceInfo};
pub use downloader::{Downloader, HttpDownloader, Method, Request, RequestHeaders, Response};
pub use error::{ExtractionError, Result};
pub use extractor::{
    BulletCommentsExtractor, CommentsExtractor, ExtractorEngine, ListExtractor, SearchExtractor,
    StreamExtractor, SubscriptionExtractor, SuggestionExtractor,
};
pub use kiosk::{KioskEntry, KioskExtractorFactory, KioskList};
pub use linkhandler::{
    LinkHandler, LinkHandlerFactory, ListLinkHandler, ListLinkHandlerFactory, SearchQueryHandler,
    SearchQueryHandlerFactory,
};
pub use metadata::{
    BulletComment, BulletPosition, BulletSize, CommentsInfoItem, InfoItemsPage, Page, StreamInfo,
    StreamInfoItem, SubscriptionItem,
};
pub use service::StreamingService;
