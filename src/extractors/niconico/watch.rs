use super::cache::{CommentThreads, CommentsCache, WatchData, WatchDataCache};
use super::{frontend_headers, NiconicoService, LOCALE, WATCH_API_URL};
use crate::core::{Downloader, ExtractionError, Request, Result};
use crate::utils::action_track_id;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

pub(crate) fn watch_api_url(video_id: &str) -> String {
    format!(
        "{}{}?_frontendId=6&_frontendVersion=0&actionTrackId={}",
        WATCH_API_URL,
        video_id,
        action_track_id()
    )
}

pub(crate) async fn fetch_watch_data(
    downloader: &dyn Downloader,
    video_id: &str,
) -> Result<WatchData> {
    debug!("fetching watch data for {}", video_id);
    let request = Request::get(watch_api_url(video_id))
        .headers(&frontend_headers())
        .header("Accept-Language", LOCALE);
    let response = downloader.execute(request).await?;

    if response.status == 404 || response.status == 410 {
        return Err(ExtractionError::ContentNotAvailable(format!(
            "{} was deleted or never existed",
            video_id
        )));
    }

    let envelope: Envelope<WatchData> = response.error_for_status()?.json()?;
    Ok(envelope.data)
}

pub(crate) async fn fetch_comment_threads(
    downloader: &dyn Downloader,
    watch: &WatchData,
) -> Result<CommentThreads> {
    let session = &watch.comment.nv_comment;
    debug!("fetching comment threads for {}", watch.video.id);

    let body = json!({
        "params": session.params,
        "threadKey": session.thread_key,
        "additionals": {},
    });
    let request = Request::post(
        format!("{}/v1/threads", session.server.trim_end_matches('/')),
        body.to_string(),
    )
    .headers(&frontend_headers())
    .header("Content-Type", "application/json");

    let envelope: Envelope<CommentThreads> =
        downloader.execute(request).await?.error_for_status()?.json()?;
    Ok(envelope.data)
}

/// Watch data for `video_id`, fetched at most once per cache.
pub(crate) async fn cached_watch_data(
    service: &NiconicoService,
    cache: &WatchDataCache,
    video_id: &str,
) -> Result<Arc<WatchData>> {
    cache
        .get_or_populate(video_id, || fetch_watch_data(service.downloader(), video_id))
        .await
}

/// Comment threads for `video_id`. Populating them needs the comment session
/// from the watch data, which comes from (and goes into) the watch cache.
pub(crate) async fn cached_comment_threads(
    service: &NiconicoService,
    watch_cache: &WatchDataCache,
    comments_cache: &CommentsCache,
    video_id: &str,
) -> Result<Arc<CommentThreads>> {
    comments_cache
        .get_or_populate(video_id, || async {
            let watch = cached_watch_data(service, watch_cache, video_id).await?;
            fetch_comment_threads(service.downloader(), &watch).await
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_api_url() {
        let url = watch_api_url("sm9");
        assert!(url.starts_with("https://www.nicovideo.jp/api/watch/v3_guest/sm9?"));
        assert!(url.contains("_frontendId=6"));
        assert!(url.contains("actionTrackId="));
    }
}
