use crate::core::{ExtractionError, ListLinkHandlerFactory, Result};
use crate::extractors::niconico::MYLIST_PAGE_URL;
use once_cell::sync::Lazy;
use regex::Regex;

static MYLIST_URL_MATCH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^https?://(?:www|sp)\.nicovideo\.jp/(?:user/\d+/)?mylist/(?P<id>\d+)/?(?:[?#].*)?$",
    )
    .expect("Invalid regex")
});

static MYLIST_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").expect("Invalid regex"));

/// Mylists, reachable both at `/mylist/<id>` and under their owner's page.
#[derive(Debug, Default, Clone, Copy)]
pub struct NiconicoPlaylistLinkHandlerFactory;

impl ListLinkHandlerFactory for NiconicoPlaylistLinkHandlerFactory {
    fn id_from_url(&self, url: &str) -> Result<String> {
        MYLIST_URL_MATCH
            .captures(url)
            .and_then(|c| c.name("id"))
            .map(|id| id.as_str().to_string())
            .ok_or_else(|| ExtractionError::parsing(format!("not a mylist URL: {}", url)))
    }

    fn url_from_query(&self, id: &str, _: &[String], _: &[String]) -> Result<String> {
        if !MYLIST_ID.is_match(id) {
            return Err(ExtractionError::parsing(format!("not a mylist id: {:?}", id)));
        }
        Ok(format!("{}{}", MYLIST_PAGE_URL, id))
    }

    fn accepts_url(&self, url: &str) -> bool {
        MYLIST_URL_MATCH.is_match(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_mylist_forms_resolve_to_canonical() {
        let factory = NiconicoPlaylistLinkHandlerFactory;
        let nested = factory
            .from_url("https://www.nicovideo.jp/user/42/mylist/1234")
            .unwrap();
        let direct = factory
            .from_url("https://www.nicovideo.jp/mylist/1234")
            .unwrap();

        assert_eq!(nested.id(), "1234");
        assert_eq!(nested.url(), direct.url());
        assert_eq!(direct.url(), "https://www.nicovideo.jp/mylist/1234");
    }
}
