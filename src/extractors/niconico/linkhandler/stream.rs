use crate::core::{ExtractionError, LinkHandlerFactory, Result};
use crate::extractors::niconico::WATCH_URL;
use once_cell::sync::Lazy;
use regex::Regex;

static WATCH_URL_MATCH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^https?://(?:(?:(?:www|sp)\.)?nicovideo\.jp/watch|nico\.ms)",
        r"/(?P<id>(?:sm|so)\d+)(?:[/?#].*)?$",
    ))
    .expect("Invalid regex")
});

static VIDEO_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:sm|so)\d+$").expect("Invalid regex"));

/// Videos: `sm`/`so` followed by digits, under `/watch/` or on `nico.ms`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NiconicoStreamLinkHandlerFactory;

impl LinkHandlerFactory for NiconicoStreamLinkHandlerFactory {
    fn id_from_url(&self, url: &str) -> Result<String> {
        WATCH_URL_MATCH
            .captures(url)
            .and_then(|c| c.name("id"))
            .map(|id| id.as_str().to_string())
            .ok_or_else(|| ExtractionError::parsing(format!("not a video URL: {}", url)))
    }

    fn url_from_id(&self, id: &str) -> Result<String> {
        if !VIDEO_ID.is_match(id) {
            return Err(ExtractionError::parsing(format!("not a video id: {:?}", id)));
        }
        Ok(format!("{}{}", WATCH_URL, id))
    }

    fn accepts_url(&self, url: &str) -> bool {
        WATCH_URL_MATCH.is_match(url)
    }
}
