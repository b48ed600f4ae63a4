use crate::core::{LinkHandlerFactory, ListLinkHandlerFactory, Result};
use std::sync::Arc;

/// Comment threads of a video. Every decision about what counts as a video
/// URL is delegated to the wrapped stream factory, so a comments handler
/// always carries the same id the stream extractor would see.
#[derive(Clone)]
pub struct NiconicoCommentsLinkHandlerFactory {
    stream: Arc<dyn LinkHandlerFactory>,
}

impl NiconicoCommentsLinkHandlerFactory {
    pub fn new(stream: Arc<dyn LinkHandlerFactory>) -> Self {
        Self { stream }
    }

    pub fn stream_factory(&self) -> &Arc<dyn LinkHandlerFactory> {
        &self.stream
    }
}

impl ListLinkHandlerFactory for NiconicoCommentsLinkHandlerFactory {
    fn id_from_url(&self, url: &str) -> Result<String> {
        self.stream.id_from_url(url)
    }

    fn url_from_query(&self, id: &str, _: &[String], _: &[String]) -> Result<String> {
        self.stream.url_from_id(id)
    }

    fn accepts_url(&self, url: &str) -> bool {
        self.stream.accepts_url(url)
    }
}
