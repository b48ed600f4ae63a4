use super::cache::{WatchData, WatchDataCache};
use super::watch::cached_watch_data;
use super::NiconicoService;
use crate::core::{LinkHandler, Result, StreamExtractor, StreamInfo};
use async_trait::async_trait;
use std::sync::Arc;

pub struct NiconicoStreamExtractor {
    service: NiconicoService,
    link_handler: LinkHandler,
    watch_data_cache: Arc<WatchDataCache>,
}

impl NiconicoStreamExtractor {
    pub fn new(
        service: NiconicoService,
        link_handler: LinkHandler,
        watch_data_cache: Arc<WatchDataCache>,
    ) -> Self {
        Self {
            service,
            link_handler,
            watch_data_cache,
        }
    }

    pub async fn watch_data(&self) -> Result<Arc<WatchData>> {
        cached_watch_data(&self.service, &self.watch_data_cache, self.link_handler.id()).await
    }
}

fn stream_info(url: &str, watch: &WatchData) -> StreamInfo {
    let video = &watch.video;
    StreamInfo {
        id: video.id.clone(),
        url: url.to_string(),
        name: video.title.clone(),
        description: Some(video.description.clone()).filter(|d| !d.is_empty()),
        duration: Some(video.duration),
        uploader_name: watch.uploader_name().map(str::to_string),
        uploader_url: watch.uploader_url(),
        upload_date: video.registered_at.clone(),
        view_count: Some(video.count.view),
        like_count: Some(video.count.like),
        comment_count: Some(video.count.comment),
        thumbnail_url: Some(watch.thumbnail_url().to_string()),
        tags: watch.tags(),
    }
}

#[async_trait]
impl StreamExtractor for NiconicoStreamExtractor {
    fn link_handler(&self) -> &LinkHandler {
        &self.link_handler
    }

    async fn fetch(&self) -> Result<StreamInfo> {
        let watch = self.watch_data().await?;
        Ok(stream_info(self.link_handler.url(), &watch))
    }
}
