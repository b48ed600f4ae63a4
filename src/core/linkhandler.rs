use crate::core::error::{ExtractionError, Result};
use crate::core::Page;
use url::Url;

/// A URL resolved and validated for one capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkHandler {
    original_url: String,
    url: String,
    id: String,
}

impl LinkHandler {
    fn new(original_url: impl Into<String>, url: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
            url: url.into(),
            id: id.into(),
        }
    }

    pub fn original_url(&self) -> &str {
        &self.original_url
    }

    /// Canonical URL rebuilt from the id.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn base_url(&self) -> Result<String> {
        let parsed = Url::parse(&self.url)
            .map_err(|e| ExtractionError::parsing(format!("{}: {}", self.url, e)))?;
        let host = parsed
            .host_str()
            .ok_or_else(|| ExtractionError::parsing(format!("{} has no host", self.url)))?;
        Ok(format!("{}://{}", parsed.scheme(), host))
    }
}

/// A link handler for something list-shaped: filters, sort order and an
/// optional cursor to resume from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListLinkHandler {
    link: LinkHandler,
    content_filters: Vec<String>,
    sort_filters: Vec<String>,
    cursor: Option<Page>,
}

impl ListLinkHandler {
    fn new(link: LinkHandler, content_filters: Vec<String>, sort_filters: Vec<String>) -> Self {
        Self {
            link,
            content_filters,
            sort_filters,
            cursor: None,
        }
    }

    pub fn original_url(&self) -> &str {
        self.link.original_url()
    }

    pub fn url(&self) -> &str {
        self.link.url()
    }

    pub fn id(&self) -> &str {
        self.link.id()
    }

    pub fn content_filters(&self) -> &[String] {
        &self.content_filters
    }

    pub fn sort_filters(&self) -> &[String] {
        &self.sort_filters
    }

    pub fn cursor(&self) -> Option<&Page> {
        self.cursor.as_ref()
    }

    pub fn with_cursor(mut self, page: Page) -> Self {
        self.cursor = Some(page);
        self
    }
}

/// A search request. The handler id is the raw query text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQueryHandler {
    list: ListLinkHandler,
}

impl SearchQueryHandler {
    pub fn search_string(&self) -> &str {
        self.list.id()
    }

    pub fn url(&self) -> &str {
        self.list.url()
    }

    pub fn original_url(&self) -> &str {
        self.list.original_url()
    }

    pub fn content_filters(&self) -> &[String] {
        self.list.content_filters()
    }

    pub fn sort_filters(&self) -> &[String] {
        self.list.sort_filters()
    }

    pub fn cursor(&self) -> Option<&Page> {
        self.list.cursor()
    }

    pub fn with_cursor(self, page: Page) -> Self {
        Self {
            list: self.list.with_cursor(page),
        }
    }
}

fn check_filters(kind: &str, requested: &[String], available: &[&str]) -> Result<()> {
    match requested.iter().find(|f| !available.contains(&f.as_str())) {
        Some(unknown) => Err(ExtractionError::parsing(format!(
            "unknown {} filter {:?}, expected one of {:?}",
            kind, unknown, available
        ))),
        None => Ok(()),
    }
}

/// Resolves single-resource URLs (one video).
pub trait LinkHandlerFactory: Send + Sync {
    /// Extracts the id; fails with `Parsing` when the URL is foreign.
    fn id_from_url(&self, url: &str) -> Result<String>;

    /// Builds the canonical URL; fails with `Parsing` on a malformed id.
    fn url_from_id(&self, id: &str) -> Result<String>;

    fn accepts_url(&self, url: &str) -> bool;

    fn from_url(&self, url: &str) -> Result<LinkHandler> {
        if !self.accepts_url(url) {
            return Err(ExtractionError::parsing(format!("URL not accepted: {}", url)));
        }
        let id = self.id_from_url(url)?;
        let canonical = self.url_from_id(&id)?;
        Ok(LinkHandler::new(url, canonical, id))
    }

    fn from_id(&self, id: &str) -> Result<LinkHandler> {
        let url = self.url_from_id(id)?;
        Ok(LinkHandler::new(url.clone(), url, id))
    }
}

/// Resolves list-shaped URLs (channels, playlists, comment threads, kiosks).
pub trait ListLinkHandlerFactory: Send + Sync {
    fn id_from_url(&self, url: &str) -> Result<String>;

    fn url_from_query(
        &self,
        id: &str,
        content_filters: &[String],
        sort_filters: &[String],
    ) -> Result<String>;

    fn accepts_url(&self, url: &str) -> bool;

    fn available_content_filters(&self) -> &[&'static str] {
        &[]
    }

    fn available_sort_filters(&self) -> &[&'static str] {
        &[]
    }

    fn from_query(
        &self,
        id: &str,
        content_filters: &[String],
        sort_filters: &[String],
    ) -> Result<ListLinkHandler> {
        check_filters("content", content_filters, self.available_content_filters())?;
        check_filters("sort", sort_filters, self.available_sort_filters())?;
        let url = self.url_from_query(id, content_filters, sort_filters)?;
        Ok(ListLinkHandler::new(
            LinkHandler::new(url.clone(), url, id),
            content_filters.to_vec(),
            sort_filters.to_vec(),
        ))
    }

    fn from_id(&self, id: &str) -> Result<ListLinkHandler> {
        self.from_query(id, &[], &[])
    }

    fn from_url(&self, url: &str) -> Result<ListLinkHandler> {
        if !self.accepts_url(url) {
            return Err(ExtractionError::parsing(format!("URL not accepted: {}", url)));
        }
        let id = self.id_from_url(url)?;
        let canonical = self.url_from_query(&id, &[], &[])?;
        Ok(ListLinkHandler::new(
            LinkHandler::new(url, canonical, id),
            Vec::new(),
            Vec::new(),
        ))
    }
}

/// Resolves search queries and search page URLs.
pub trait SearchQueryHandlerFactory: Send + Sync {
    fn url_from_query(
        &self,
        query: &str,
        content_filters: &[String],
        sort_filters: &[String],
    ) -> Result<String>;

    fn search_string_from_url(&self, url: &str) -> Result<String>;

    fn accepts_url(&self, url: &str) -> bool;

    /// Content filters implied by a search URL (e.g. a tag search page).
    fn content_filters_from_url(&self, _url: &str) -> Vec<String> {
        Vec::new()
    }

    fn available_content_filters(&self) -> &[&'static str] {
        &[]
    }

    fn available_sort_filters(&self) -> &[&'static str] {
        &[]
    }

    /// Whether an empty query is a meaningful request on this service.
    fn allows_empty_query(&self) -> bool {
        false
    }

    fn from_query(
        &self,
        query: &str,
        content_filters: &[String],
        sort_filters: &[String],
    ) -> Result<SearchQueryHandler> {
        if query.trim().is_empty() && !self.allows_empty_query() {
            return Err(ExtractionError::parsing("empty search query"));
        }
        check_filters("content", content_filters, self.available_content_filters())?;
        check_filters("sort", sort_filters, self.available_sort_filters())?;
        let url = self.url_from_query(query, content_filters, sort_filters)?;
        Ok(SearchQueryHandler {
            list: ListLinkHandler::new(
                LinkHandler::new(url.clone(), url, query),
                content_filters.to_vec(),
                sort_filters.to_vec(),
            ),
        })
    }

    fn from_url(&self, url: &str) -> Result<SearchQueryHandler> {
        if !self.accepts_url(url) {
            return Err(ExtractionError::parsing(format!("URL not accepted: {}", url)));
        }
        let query = self.search_string_from_url(url)?;
        let content_filters = self.content_filters_from_url(url);
        let handler = self.from_query(&query, &content_filters, &[])?;
        Ok(SearchQueryHandler {
            list: ListLinkHandler {
                link: LinkHandler::new(url, handler.url(), query),
                ..handler.list
            },
        })
    }
}
