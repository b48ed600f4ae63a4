use crate::core::{ExtractionError, ListLinkHandlerFactory, Result};
use crate::extractors::niconico::USER_URL;
use once_cell::sync::Lazy;
use regex::Regex;

static USER_URL_MATCH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://(?:www|sp)\.nicovideo\.jp/user/(?P<id>\d+)(?:/video)?/?(?:[?#].*)?$")
        .expect("Invalid regex")
});

static USER_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").expect("Invalid regex"));

#[derive(Debug, Default, Clone, Copy)]
pub struct NiconicoUserLinkHandlerFactory;

impl ListLinkHandlerFactory for NiconicoUserLinkHandlerFactory {
    fn id_from_url(&self, url: &str) -> Result<String> {
        USER_URL_MATCH
            .captures(url)
            .and_then(|c| c.name("id"))
            .map(|id| id.as_str().to_string())
            .ok_or_else(|| ExtractionError::parsing(format!("not a user URL: {}", url)))
    }

    fn url_from_query(&self, id: &str, _: &[String], _: &[String]) -> Result<String> {
        if !USER_ID.is_match(id) {
            return Err(ExtractionError::parsing(format!("not a user id: {:?}", id)));
        }
        Ok(format!("{}{}", USER_URL, id))
    }

    fn accepts_url(&self, url: &str) -> bool {
        USER_URL_MATCH.is_match(url)
    }
}
