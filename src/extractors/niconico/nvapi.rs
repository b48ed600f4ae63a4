use super::{NiconicoService, LOCALE, WATCH_URL};
use crate::core::{Request, Result, StreamInfoItem};
use serde::de::DeserializeOwned;
use serde::Deserialize;

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

/// GETs an nvapi endpoint with the mylist headers and unwraps `data`.
pub(crate) async fn get_data<T: DeserializeOwned>(
    service: &NiconicoService,
    url: &str,
) -> Result<T> {
    let request = Request::get(url)
        .headers(&NiconicoService::mylist_headers())
        .header("Accept-Language", LOCALE);
    let envelope: Envelope<T> = service
        .downloader()
        .execute(request)
        .await?
        .error_for_status()?
        .json()?;
    Ok(envelope.data)
}

/// The video summary nvapi embeds in user and mylist listings.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NvVideo {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub count: NvCount,
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub thumbnail: Option<NvThumbnail>,
    #[serde(default)]
    pub owner: Option<NvOwner>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct NvCount {
    pub view: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NvThumbnail {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub listing_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NvOwner {
    #[serde(default)]
    pub name: Option<String>,
}

impl NvVideo {
    pub fn into_item(self) -> StreamInfoItem {
        StreamInfoItem {
            url: format!("{}{}", WATCH_URL, self.id),
            name: self.title,
            uploader_name: self.owner.and_then(|o| o.name),
            duration: self.duration,
            view_count: self.count.view,
            thumbnail_url: self.thumbnail.and_then(|t| t.listing_url.or(t.url)),
        }
    }
}
