use crate::core::error::{ExtractionError, Result};
use crate::core::extractor::ListExtractor;
use crate::core::linkhandler::ListLinkHandlerFactory;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Builds the extractor for a kiosk from its URL and kiosk id.
pub type KioskExtractorFactory =
    Arc<dyn Fn(&str, &str) -> Result<Box<dyn ListExtractor>> + Send + Sync>;

#[derive(Clone)]
pub struct KioskEntry {
    pub extractor_factory: KioskExtractorFactory,
    pub link_handler_factory: Arc<dyn ListLinkHandlerFactory>,
}

/// Named curated lists a service exposes, one of them the default.
pub struct KioskList {
    service_id: u32,
    entries: BTreeMap<String, KioskEntry>,
    default_kiosk: Option<String>,
}

impl KioskList {
    pub fn new(service_id: u32) -> Self {
        Self {
            service_id,
            entries: BTreeMap::new(),
            default_kiosk: None,
        }
    }

    pub fn service_id(&self) -> u32 {
        self.service_id
    }

    pub fn add_kiosk_entry(
        &mut self,
        extractor_factory: KioskExtractorFactory,
        link_handler_factory: Arc<dyn ListLinkHandlerFactory>,
        id: &str,
    ) -> Result<()> {
        if self.entries.contains_key(id) {
            return Err(ExtractionError::setup(format!(
                "kiosk {:?} is already registered",
                id
            )));
        }
        self.entries.insert(
            id.to_string(),
            KioskEntry {
                extractor_factory,
                link_handler_factory,
            },
        );
        Ok(())
    }

    pub fn set_default_kiosk(&mut self, id: &str) -> Result<()> {
        if !self.entries.contains_key(id) {
            return Err(ExtractionError::setup(format!(
                "cannot make unknown kiosk {:?} the default",
                id
            )));
        }
        self.default_kiosk = Some(id.to_string());
        Ok(())
    }

    pub fn default_kiosk_id(&self) -> Option<&str> {
        self.default_kiosk.as_deref()
    }

    pub fn available_kiosks(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn link_handler_factory(&self, id: &str) -> Result<Arc<dyn ListLinkHandlerFactory>> {
        self.entries
            .get(id)
            .map(|entry| entry.link_handler_factory.clone())
            .ok_or_else(|| ExtractionError::KioskNotFound(id.to_string()))
    }

    pub fn extractor_by_id(&self, id: &str) -> Result<Box<dyn ListExtractor>> {
        let entry = self
            .entries
            .get(id)
            .ok_or_else(|| ExtractionError::KioskNotFound(id.to_string()))?;
        let url = entry.link_handler_factory.url_from_query(id, &[], &[])?;
        (entry.extractor_factory)(&url, id)
    }

    pub fn default_kiosk_extractor(&self) -> Result<Box<dyn ListExtractor>> {
        let id = self
            .default_kiosk
            .as_deref()
            .ok_or_else(|| ExtractionError::setup("no default kiosk"))?;
        self.extractor_by_id(id)
    }

    pub fn extractor_by_url(&self, url: &str) -> Result<Box<dyn ListExtractor>> {
        for (id, entry) in &self.entries {
            if entry.link_handler_factory.accepts_url(url) {
                return (entry.extractor_factory)(url, id);
            }
        }
        Err(ExtractionError::parsing(format!("no kiosk accepts {}", url)))
    }
}
