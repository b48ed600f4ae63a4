use super::{NiconicoService, LOCALE, TRENDING_RSS_STR};
use crate::core::{
    InfoItemsPage, LinkHandlerFactory, ListExtractor, ListLinkHandler, Page, Request, Result,
    StreamInfoItem, StreamingService,
};
use crate::utils::parse_duration;
use async_trait::async_trait;
use feed_rs::model::Entry;
use feed_rs::parser;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static RANKED_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(TRENDING_RSS_STR).expect("Invalid regex"));
static THUMBNAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<img[^>]*\ssrc="([^"]+)""#).expect("Invalid regex"));
static LENGTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"nico-info-length">([\d:]+)<"#).expect("Invalid regex"));
static VIEWS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"nico-info-total-view">([\d,]+)<"#).expect("Invalid regex"));

fn capture<'a>(re: &Regex, text: &'a str) -> Option<&'a str> {
    re.captures(text).and_then(|c| c.get(1)).map(|m| m.as_str())
}

fn ranking_item(
    entry: &Entry,
    stream_factory: &dyn LinkHandlerFactory,
) -> Option<StreamInfoItem> {
    let link = entry.links.first()?.href.trim();
    let handler = match stream_factory.from_url(link) {
        Ok(handler) => handler,
        Err(e) => {
            debug!("skipping ranking entry: {}", e);
            return None;
        }
    };

    let title = entry
        .title
        .as_ref()
        .map(|t| t.content.trim())
        .unwrap_or_default();
    let name = capture(&RANKED_TITLE, title).unwrap_or(title).to_string();

    // The description is an HTML fragment carrying the thumbnail and counters.
    let description = entry
        .summary
        .as_ref()
        .map(|s| s.content.as_str())
        .unwrap_or_default();

    Some(StreamInfoItem {
        url: handler.url().to_string(),
        name,
        uploader_name: None,
        duration: capture(&LENGTH, description).and_then(parse_duration),
        view_count: capture(&VIEWS, description).and_then(|v| v.replace(',', "").parse().ok()),
        thumbnail_url: capture(&THUMBNAIL, description).map(str::to_string),
    })
}

/// Parses the ranking feed. Items whose link is not a video are skipped.
pub(crate) fn parse_ranking_rss(
    rss: &str,
    stream_factory: &dyn LinkHandlerFactory,
) -> Result<Vec<StreamInfoItem>> {
    let feed = parser::parse(rss.as_bytes())?;
    Ok(feed
        .entries
        .iter()
        .filter_map(|entry| ranking_item(entry, stream_factory))
        .collect())
}

/// The daily all-genre ranking. One page.
pub struct NiconicoTrendExtractor {
    service: NiconicoService,
    link_handler: ListLinkHandler,
    kiosk_id: String,
}

impl NiconicoTrendExtractor {
    pub fn new(service: NiconicoService, link_handler: ListLinkHandler, kiosk_id: &str) -> Self {
        Self {
            service,
            link_handler,
            kiosk_id: kiosk_id.to_string(),
        }
    }

    pub fn kiosk_id(&self) -> &str {
        &self.kiosk_id
    }
}

#[async_trait]
impl ListExtractor for NiconicoTrendExtractor {
    fn link_handler(&self) -> &ListLinkHandler {
        &self.link_handler
    }

    async fn initial_page(&self) -> Result<InfoItemsPage<StreamInfoItem>> {
        let request = Request::get(self.link_handler.url()).header("Accept-Language", LOCALE);
        let response = self
            .service
            .downloader()
            .execute(request)
            .await?
            .error_for_status()?;

        let items =
            parse_ranking_rss(&response.body, self.service.stream_lh_factory().as_ref())?;
        debug!("{} kiosk returned {} items", self.kiosk_id, items.len());
        Ok(InfoItemsPage::new(items, None))
    }

    async fn page(&self, _page: &Page) -> Result<InfoItemsPage<StreamInfoItem>> {
        Ok(InfoItemsPage::new(Vec::new(), None))
    }
}
