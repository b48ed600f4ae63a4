use super::cache::{CommentsCache, NvComment, WatchDataCache};
use super::watch::cached_comment_threads;
use super::NiconicoService;
use crate::core::{
    BulletComment, BulletCommentsExtractor, BulletPosition, BulletSize, ListLinkHandler, Result,
};
use async_trait::async_trait;
use std::sync::Arc;

const DEFAULT_COLOR: u32 = 0xFFFFFF;

fn named_color(command: &str) -> Option<u32> {
    let color = match command {
        "white" => 0xFFFFFF,
        "red" => 0xFF0000,
        "pink" => 0xFF8080,
        "orange" => 0xFFC000,
        "yellow" => 0xFFFF00,
        "green" => 0x00FF00,
        "cyan" => 0x00FFFF,
        "blue" => 0x0000FF,
        "purple" => 0xC000FF,
        "black" => 0x000000,
        hex => {
            let digits = hex.strip_prefix('#')?;
            if digits.len() != 6 {
                return None;
            }
            return u32::from_str_radix(digits, 16).ok();
        }
    };
    Some(color)
}

/// Decodes the mail commands attached to a comment. Later commands win.
fn decode_commands(commands: &[String]) -> (BulletPosition, BulletSize, u32) {
    let mut position = BulletPosition::Regular;
    let mut size = BulletSize::Medium;
    let mut color = DEFAULT_COLOR;

    for command in commands {
        match command.as_str() {
            "ue" => position = BulletPosition::Top,
            "shita" => position = BulletPosition::Bottom,
            "naka" => position = BulletPosition::Regular,
            "big" => size = BulletSize::Big,
            "small" => size = BulletSize::Small,
            "medium" => size = BulletSize::Medium,
            other => {
                if let Some(c) = named_color(other) {
                    color = c;
                }
            }
        }
    }

    (position, size, color)
}

fn bullet_comment(fork: &str, comment: &NvComment) -> BulletComment {
    let (position, size, color) = decode_commands(&comment.commands);
    BulletComment {
        text: comment.body.clone(),
        offset_ms: comment.vpos_ms,
        position,
        size,
        color,
        by_owner: fork == "owner",
    }
}

/// Time-anchored comments from every fork of a video's threads.
pub struct NiconicoBulletCommentsExtractor {
    service: NiconicoService,
    link_handler: ListLinkHandler,
    watch_data_cache: Arc<WatchDataCache>,
    comments_cache: Arc<CommentsCache>,
}

impl NiconicoBulletCommentsExtractor {
    pub fn new(
        service: NiconicoService,
        link_handler: ListLinkHandler,
        watch_data_cache: Arc<WatchDataCache>,
        comments_cache: Arc<CommentsCache>,
    ) -> Self {
        Self {
            service,
            link_handler,
            watch_data_cache,
            comments_cache,
        }
    }
}

#[async_trait]
impl BulletCommentsExtractor for NiconicoBulletCommentsExtractor {
    fn link_handler(&self) -> &ListLinkHandler {
        &self.link_handler
    }

    async fn bullet_comments(&self) -> Result<Vec<BulletComment>> {
        let threads = cached_comment_threads(
            &self.service,
            &self.watch_data_cache,
            &self.comments_cache,
            self.link_handler.id(),
        )
        .await?;

        let mut ordered: Vec<(&str, &NvComment)> = threads.all().collect();
        ordered.sort_by_key(|(_, c)| (c.vpos_ms, c.no));

        Ok(ordered
            .into_iter()
            .map(|(fork, comment)| bullet_comment(fork, comment))
            .collect())
    }
}
