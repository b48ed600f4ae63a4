use crate::config::Config;
use crate::core::{
    BulletCommentsExtractor, Capability, CommentsExtractor, ExtractorEngine, InfoItemsPage,
    LinkHandlerFactory, LinkType, ListExtractor, ListLinkHandlerFactory, SearchExtractor,
    StreamExtractor, StreamInfo, StreamInfoItem, StreamingService, SuggestionExtractor,
};
use crate::extractors::NiconicoService;
use crate::utils::format_duration;
use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

#[derive(Parser)]
#[command(name = "nicopipe")]
#[command(about = "Resolve NicoNico links and extract videos, lists and comments")]
#[command(version)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show which service and link type a URL resolves to
    Resolve { url: String },
    /// Print stream info for a video
    Stream {
        url: String,
        /// Also fetch the first page of comments
        #[arg(long)]
        with_comments: bool,
    },
    /// Print comments for a video
    Comments {
        url: String,
        #[arg(short, long, default_value = "1")]
        pages: usize,
    },
    /// Print bullet comments in playback order
    BulletComments {
        url: String,
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// List a user's uploads
    Channel {
        url: String,
        #[arg(short, long, default_value = "1")]
        pages: usize,
    },
    /// List a mylist
    Playlist {
        url: String,
        #[arg(short, long, default_value = "1")]
        pages: usize,
    },
    Search {
        query: String,
        /// Content filter (videos, tags)
        #[arg(short, long)]
        filter: Vec<String>,
        /// Sort filter, e.g. view_count
        #[arg(short, long)]
        sort: Option<String>,
        #[arg(short, long, default_value = "1")]
        pages: usize,
    },
    Suggest { query: String },
    /// Print the default kiosk
    Trending,
    /// Print the capability manifest
    Capabilities,
}

impl Cli {
    pub async fn run(&self) -> Result<()> {
        let config = Config::load(self.config.as_deref())?;
        let service = NiconicoService::new(config)?;

        match &self.command {
            Command::Resolve { url } => {
                let mut engine = ExtractorEngine::new();
                engine.register_service(Arc::new(service));
                let (service, link_type) = engine.resolve(url)?;
                println!("Service: {} ({})", service.info().name, service.service_id());
                println!("Link type: {:?}", link_type);
                let id = match link_type {
                    LinkType::Stream => {
                        Some(service.stream_lh_factory().from_url(url)?.id().to_string())
                    }
                    LinkType::Channel => service
                        .channel_lh_factory()
                        .map(|f| f.id_from_url(url))
                        .transpose()?,
                    LinkType::Playlist => service
                        .playlist_lh_factory()
                        .map(|f| f.id_from_url(url))
                        .transpose()?,
                    LinkType::None => None,
                };
                if let Some(id) = id {
                    println!("Id: {}", id);
                }
            }
            Command::Stream { url, with_comments } => {
                let stream = service.stream_extractor_from_url(url)?;
                if *with_comments {
                    let comments = service.comments_extractor_from_url(url)?;
                    let (info, page) = futures::try_join!(stream.fetch(), comments.initial_page())?;
                    print_stream(&info);
                    println!("Comments:");
                    for comment in &page.items {
                        println!("  [{}] {}", comment.posted_at, comment.text);
                    }
                } else {
                    print_stream(&stream.fetch().await?);
                }
            }
            Command::Comments { url, pages } => {
                let extractor = service.comments_extractor_from_url(url)?;
                let mut page = extractor.initial_page().await?;
                for n in 0..*pages {
                    for comment in &page.items {
                        println!(
                            "[{}] {}: {}",
                            comment.posted_at, comment.uploader_id, comment.text
                        );
                    }
                    let Some(next) = page.next_page.clone().filter(|_| n + 1 < *pages) else {
                        break;
                    };
                    page = extractor.page(&next).await?;
                }
            }
            Command::BulletComments { url, limit } => {
                let extractor = service.bullet_comments_extractor_from_url(url)?;
                for comment in extractor.bullet_comments().await?.iter().take(*limit) {
                    println!(
                        "{:>9} {:?}/{:?} #{:06x} {}",
                        format_duration(comment.offset().as_secs()),
                        comment.position,
                        comment.size,
                        comment.color,
                        comment.text
                    );
                }
            }
            Command::Channel { url, pages } => {
                let extractor = service.channel_extractor_from_url(url)?;
                print_list(extractor.as_ref(), *pages).await?;
            }
            Command::Playlist { url, pages } => {
                let extractor = service.playlist_extractor_from_url(url)?;
                print_list(extractor.as_ref(), *pages).await?;
            }
            Command::Search {
                query,
                filter,
                sort,
                pages,
            } => {
                let sort: Vec<String> = sort.iter().cloned().collect();
                let extractor = service.search_extractor_for_query(query, filter, &sort)?;
                println!("Searching: {}", extractor.search_string());
                let mut page = extractor.initial_page().await?;
                for n in 0..*pages {
                    print_items(&page);
                    let Some(next) = page.next_page.clone().filter(|_| n + 1 < *pages) else {
                        break;
                    };
                    page = extractor.page(&next).await?;
                }
            }
            Command::Suggest { query } => {
                let extractor = service
                    .suggestion_extractor()
                    .ok_or_else(|| anyhow!("{} has no suggestions", service.info().name))?;
                for suggestion in extractor.suggestion_list(query).await? {
                    println!("{}", suggestion);
                }
            }
            Command::Trending => {
                let kiosks = service.kiosk_list()?;
                debug!("kiosks: {:?}", kiosks.available_kiosks().collect::<Vec<_>>());
                let extractor = kiosks.default_kiosk_extractor()?;
                print_list(extractor.as_ref(), 1).await?;
            }
            Command::Capabilities => {
                let info = service.info();
                println!("{} ({})", info.name, service.service_id());
                for capability in Capability::ALL {
                    let mark = if info.capabilities.contains(capability) { "x" } else { " " };
                    println!("  [{}] {}", mark, capability);
                }
            }
        }

        Ok(())
    }
}

fn print_stream(info: &StreamInfo) {
    println!("Title: {}", info.name);
    println!("Id: {}", info.id);
    if let Some(uploader) = &info.uploader_name {
        println!("Uploader: {}", uploader);
    }
    if let Some(duration) = info.duration {
        println!("Duration: {}", format_duration(duration));
    }
    if let Some(view_count) = info.view_count {
        println!("Views: {}", view_count);
    }
    if !info.tags.is_empty() {
        println!("Tags: {}", info.tags.join(", "));
    }
}

fn print_items(page: &InfoItemsPage<StreamInfoItem>) {
    for item in &page.items {
        let duration = item.duration.map(format_duration).unwrap_or_default();
        println!("{:>8}  {}  {}", duration, item.name, item.url);
    }
}

async fn print_list(extractor: &dyn ListExtractor, pages: usize) -> Result<()> {
    let mut page = extractor.initial_page().await?;
    for n in 0..pages {
        print_items(&page);
        let Some(next) = page.next_page.clone().filter(|_| n + 1 < pages) else {
            break;
        };
        page = extractor.page(&next).await?;
    }
    Ok(())
}
