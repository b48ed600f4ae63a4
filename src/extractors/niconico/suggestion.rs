use super::{NiconicoService, SUGGESTION_URL};
use crate::core::{Request, Result, SuggestionExtractor};
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Deserialize)]
struct Suggestions {
    #[serde(default)]
    candidates: Vec<String>,
}

pub struct NiconicoSuggestionExtractor {
    service: NiconicoService,
}

impl NiconicoSuggestionExtractor {
    pub fn new(service: NiconicoService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl SuggestionExtractor for NiconicoSuggestionExtractor {
    async fn suggestion_list(&self, query: &str) -> Result<Vec<String>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}{}", SUGGESTION_URL, urlencoding::encode(query));
        let suggestions: Suggestions = self
            .service
            .downloader()
            .execute(Request::get(url))
            .await?
            .error_for_status()?
            .json()?;
        Ok(suggestions.candidates)
    }
}
