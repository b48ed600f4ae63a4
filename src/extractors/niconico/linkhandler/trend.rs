use crate::core::{ExtractionError, ListLinkHandlerFactory, Result};
use crate::extractors::niconico::DAILY_TREND_URL;
use once_cell::sync::Lazy;
use regex::Regex;

pub const TRENDING_KIOSK_ID: &str = "Trending";

static RANKING_URL_MATCH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://(?:www|sp)\.nicovideo\.jp/ranking(?:[/?#].*)?$").expect("Invalid regex")
});

#[derive(Debug, Default, Clone, Copy)]
pub struct NiconicoTrendLinkHandlerFactory;

impl ListLinkHandlerFactory for NiconicoTrendLinkHandlerFactory {
    fn id_from_url(&self, url: &str) -> Result<String> {
        if RANKING_URL_MATCH.is_match(url) {
            Ok(TRENDING_KIOSK_ID.to_string())
        } else {
            Err(ExtractionError::parsing(format!("not a ranking URL: {}", url)))
        }
    }

    fn url_from_query(&self, id: &str, _: &[String], _: &[String]) -> Result<String> {
        if id != TRENDING_KIOSK_ID {
            return Err(ExtractionError::parsing(format!("unknown kiosk {:?}", id)));
        }
        Ok(DAILY_TREND_URL.to_string())
    }

    fn accepts_url(&self, url: &str) -> bool {
        RANKING_URL_MATCH.is_match(url)
    }
}
