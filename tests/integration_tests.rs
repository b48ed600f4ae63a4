use anyhow::Result;
use async_trait::async_trait;
use nicopipe::config::Config;
use nicopipe::core::{
    Capability, Downloader, ExtractionError, ExtractorEngine, KioskExtractorFactory, KioskList,
    LinkHandlerFactory, LinkType, ListExtractor, ListLinkHandlerFactory, Page, Request, Response,
    StreamingService,
};
use nicopipe::extractors::niconico::linkhandler::NiconicoTrendLinkHandlerFactory;
use nicopipe::extractors::NiconicoService;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_test::assert_ok;

const WATCH_API: &str = "https://www.nicovideo.jp/api/watch/v3_guest/";
const THREADS_API: &str = "https://nv-comment.example/v1/threads";

const WATCH_BODY: &str = r#"{"data":{
    "video":{"id":"sm12345","title":"Test video","description":"hello",
        "count":{"view":10,"comment":3,"mylist":0,"like":2},"duration":253,
        "thumbnail":{"url":"https://img.example/sm12345"},
        "registeredAt":"2024-01-01T00:00:00+09:00"},
    "owner":{"id":99887766,"nickname":"uploader"},
    "tag":{"items":[{"name":"music"},{"name":"vocaloid"}]},
    "comment":{"nvComment":{"threadKey":"key","server":"https://nv-comment.example",
        "params":{"targets":[]}}}
}}"#;

const THREADS_BODY: &str = r#"{"data":{"threads":[
    {"id":"1","fork":"owner","commentCount":1,"comments":[
        {"id":"o1","no":1,"vposMs":500,"body":"owner says hi","commands":["ue","red"]}]},
    {"id":"2","fork":"main","commentCount":2,"comments":[
        {"id":"c1","no":1,"vposMs":2000,"body":"first","userId":"u1","postedAt":"t1"},
        {"id":"c2","no":2,"vposMs":1000,"body":"second","userId":"u2","postedAt":"t2"}]}
]}}"#;

/// Serves canned bodies by URL prefix and counts requests per prefix.
struct StubDownloader {
    routes: Vec<(String, String)>,
    hits: Mutex<HashMap<String, usize>>,
    delay: Option<Duration>,
    failures_left: Mutex<usize>,
}

impl StubDownloader {
    fn new() -> Self {
        Self {
            routes: Vec::new(),
            hits: Mutex::new(HashMap::new()),
            delay: None,
            failures_left: Mutex::new(0),
        }
    }

    fn route(mut self, prefix: &str, body: &str) -> Self {
        self.routes.push((prefix.to_string(), body.to_string()));
        self
    }

    fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    fn fail_first(self, n: usize) -> Self {
        *self.failures_left.lock().unwrap() = n;
        self
    }

    fn hits(&self, prefix: &str) -> usize {
        self.hits.lock().unwrap().get(prefix).copied().unwrap_or(0)
    }
}

#[async_trait]
impl Downloader for StubDownloader {
    async fn execute(&self, request: Request) -> nicopipe::core::Result<Response> {
        let route = self
            .routes
            .iter()
            .find(|(prefix, _)| request.url.starts_with(prefix.as_str()));

        let Some((prefix, body)) = route else {
            return Ok(Response {
                status: 404,
                url: request.url,
                body: String::new(),
            });
        };
        *self.hits.lock().unwrap().entry(prefix.clone()).or_default() += 1;

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let fail = {
            let mut left = self.failures_left.lock().unwrap();
            let fail = *left > 0;
            if fail {
                *left -= 1;
            }
            fail
        };
        let status = if fail { 500 } else { 200 };

        Ok(Response {
            status,
            url: request.url,
            body: body.clone(),
        })
    }
}

fn stub_service(stub: StubDownloader) -> (NiconicoService, Arc<StubDownloader>) {
    stub_service_with(Config::default(), stub)
}

fn stub_service_with(
    config: Config,
    stub: StubDownloader,
) -> (NiconicoService, Arc<StubDownloader>) {
    let stub = Arc::new(stub);
    let service = NiconicoService::with_downloader(config, stub.clone());
    (service, stub)
}

fn small_pages(page_size: u32) -> Config {
    Config {
        page_size,
        ..Config::default()
    }
}

fn video_stub() -> StubDownloader {
    StubDownloader::new()
        .route(WATCH_API, WATCH_BODY)
        .route(THREADS_API, THREADS_BODY)
}

#[tokio::test]
async fn test_link_handler_ids_round_trip() -> Result<()> {
    let service = NiconicoService::new(Config::default())?;

    let stream = service.stream_lh_factory();
    for id in ["sm12345", "so6789", "sm1"] {
        let url = stream.url_from_id(id)?;
        assert_eq!(stream.from_url(&url)?.id(), id);
    }

    let channel = service.channel_lh_factory().expect("channel factory");
    let url = channel.from_id("99887766")?.url().to_string();
    assert_eq!(channel.from_url(&url)?.id(), "99887766");

    let playlist = service.playlist_lh_factory().expect("playlist factory");
    let url = playlist.from_id("42")?.url().to_string();
    assert_eq!(playlist.from_url(&url)?.id(), "42");

    Ok(())
}

#[tokio::test]
async fn test_stream_url_scenario() -> Result<()> {
    let service = NiconicoService::new(Config::default())?;
    let url = "https://www.nicovideo.jp/watch/sm12345";

    let stream = service.stream_lh_factory().from_url(url)?;
    assert_eq!(stream.id(), "sm12345");
    assert_eq!(service.stream_lh_factory().url_from_id("sm12345")?, url);

    let comments = service.comments_lh_factory().expect("comments factory");
    assert_eq!(comments.from_url(url)?.id(), stream.id());
    let bullets = service.bullet_comments_lh_factory().expect("bullet factory");
    assert_eq!(bullets.from_url(url)?.id(), stream.id());

    Ok(())
}

#[tokio::test]
async fn test_comments_id_matches_stream_id_for_every_url_shape() -> Result<()> {
    let service = NiconicoService::new(Config::default())?;
    let comments = service.comments_lh_factory().expect("comments factory");

    for url in [
        "https://nico.ms/sm9",
        "https://sp.nicovideo.jp/watch/so6789?ref=top",
        "http://nicovideo.jp/watch/sm12345#comments",
    ] {
        let stream_id = service.stream_lh_factory().from_url(url)?.id().to_string();
        assert_eq!(comments.from_url(url)?.id(), stream_id);
    }

    Ok(())
}

#[tokio::test]
async fn test_user_url_scenario() -> Result<()> {
    let service = NiconicoService::new(Config::default())?;
    let url = "https://www.nicovideo.jp/user/99887766";

    let channel = service.channel_lh_factory().expect("channel factory");
    assert_eq!(channel.from_url(url)?.id(), "99887766");
    assert!(matches!(
        service.stream_lh_factory().from_url(url),
        Err(ExtractionError::Parsing(_))
    ));
    assert!(matches!(
        service.comments_lh_factory().expect("comments factory").from_url(url),
        Err(ExtractionError::Parsing(_))
    ));

    Ok(())
}

#[tokio::test]
async fn test_invalid_ids_are_parsing_errors() -> Result<()> {
    let service = NiconicoService::new(Config::default())?;
    let stream = service.stream_lh_factory();

    for id in ["", "12345", "lv12345", "sm", "smabc"] {
        assert!(matches!(stream.from_id(id), Err(ExtractionError::Parsing(_))));
    }
    assert!(matches!(
        stream.from_url("not a url"),
        Err(ExtractionError::Parsing(_))
    ));

    Ok(())
}

#[tokio::test]
async fn test_subscriptions_are_reported_unsupported() -> Result<()> {
    let service = NiconicoService::new(Config::default())?;
    assert!(service.subscription_extractor().is_none());
    assert!(!service.supports(Capability::Subscriptions));
    assert!(service.suggestion_extractor().is_some());
    Ok(())
}

#[tokio::test]
async fn test_kiosk_list_has_one_default() -> Result<()> {
    let service = NiconicoService::new(Config::default())?;
    let kiosks = service.kiosk_list()?;

    assert_eq!(kiosks.len(), 1);
    assert_eq!(kiosks.default_kiosk_id(), Some("Trending"));
    assert_ok!(kiosks.link_handler_factory("Trending"));
    assert!(matches!(
        kiosks.link_handler_factory("Hot"),
        Err(ExtractionError::KioskNotFound(_))
    ));

    let extractor = kiosks.default_kiosk_extractor()?;
    assert_eq!(extractor.id(), "Trending");

    let by_url = kiosks.extractor_by_url("https://www.nicovideo.jp/ranking")?;
    assert_eq!(by_url.id(), "Trending");
    assert!(matches!(
        kiosks.extractor_by_url("https://www.nicovideo.jp/watch/sm1"),
        Err(ExtractionError::Parsing(_))
    ));

    Ok(())
}

#[tokio::test]
async fn test_kiosk_setup_errors() -> Result<()> {
    let factory: KioskExtractorFactory =
        Arc::new(|_url: &str, _id: &str| -> nicopipe::core::Result<Box<dyn ListExtractor>> {
            Err(ExtractionError::Unsupported(Capability::Trending))
        });
    let lhf = Arc::new(NiconicoTrendLinkHandlerFactory);

    let mut kiosks = KioskList::new(6);
    kiosks.add_kiosk_entry(factory.clone(), lhf.clone(), "Trending")?;
    assert!(matches!(
        kiosks.add_kiosk_entry(factory, lhf, "Trending"),
        Err(ExtractionError::Setup(_))
    ));
    assert!(matches!(
        kiosks.set_default_kiosk("Missing"),
        Err(ExtractionError::Setup(_))
    ));
    assert!(kiosks.default_kiosk_id().is_none());

    Ok(())
}

#[tokio::test]
async fn test_engine_resolves_link_types() -> Result<()> {
    let mut engine = ExtractorEngine::new();
    engine.register_service(Arc::new(NiconicoService::new(Config::default())?));

    let cases = [
        ("https://www.nicovideo.jp/watch/sm12345", LinkType::Stream),
        ("https://www.nicovideo.jp/user/99887766", LinkType::Channel),
        ("https://www.nicovideo.jp/mylist/42", LinkType::Playlist),
    ];
    for (url, expected) in cases {
        let (service, link_type) = engine.resolve(url)?;
        assert_eq!(service.service_id(), 6);
        assert_eq!(link_type, expected);
    }

    assert!(matches!(
        engine.resolve("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
        Err(ExtractionError::Parsing(_))
    ));
    assert!(engine.service_by_name("niconico").is_some());
    assert!(engine.service_by_id(6).is_some());
    assert_eq!(
        engine.service_by_url("https://nico.ms/sm9")?.info().name,
        "NicoNico"
    );

    Ok(())
}

#[tokio::test]
async fn test_stream_info_from_watch_data() -> Result<()> {
    let (service, _stub) = stub_service(video_stub());

    let info = service
        .stream_extractor_from_url("https://nico.ms/sm12345")?
        .fetch()
        .await?;
    assert_eq!(info.id, "sm12345");
    assert_eq!(info.url, "https://www.nicovideo.jp/watch/sm12345");
    assert_eq!(info.name, "Test video");
    assert_eq!(info.duration, Some(253));
    assert_eq!(info.uploader_name.as_deref(), Some("uploader"));
    assert_eq!(
        info.uploader_url.as_deref(),
        Some("https://www.nicovideo.jp/user/99887766")
    );
    assert_eq!(info.tags, vec!["music", "vocaloid"]);

    Ok(())
}

#[tokio::test]
async fn test_sequential_lookups_fetch_once() -> Result<()> {
    let (service, stub) = stub_service(video_stub());
    let url = "https://www.nicovideo.jp/watch/sm12345";

    let first = service.stream_extractor_from_url(url)?.fetch().await?;
    let second = service.stream_extractor_from_url(url)?.fetch().await?;
    assert_eq!(first, second);
    assert_eq!(stub.hits(WATCH_API), 1);

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_lookups_fetch_once() -> Result<()> {
    let (service, stub) = stub_service(video_stub().delay(Duration::from_millis(50)));
    let url = "https://www.nicovideo.jp/watch/sm12345";

    let tasks: Vec<_> = (0..16)
        .map(|_| {
            let service = service.clone();
            tokio::spawn(async move {
                let extractor = service.stream_extractor_from_url(url)?;
                extractor.fetch().await
            })
        })
        .collect();

    for task in futures::future::join_all(tasks).await {
        assert_eq!(task??.id, "sm12345");
    }
    assert_eq!(stub.hits(WATCH_API), 1);

    Ok(())
}

#[tokio::test]
async fn test_failed_fetch_does_not_poison_cache() -> Result<()> {
    let (service, stub) = stub_service(video_stub().fail_first(1));
    let url = "https://www.nicovideo.jp/watch/sm12345";

    let err = service
        .stream_extractor_from_url(url)?
        .fetch()
        .await
        .unwrap_err();
    assert!(matches!(err, ExtractionError::Status { status: 500, .. }));
    assert!(err.is_recoverable());

    let info = service.stream_extractor_from_url(url)?.fetch().await?;
    assert_eq!(info.id, "sm12345");
    assert_eq!(stub.hits(WATCH_API), 2);

    // now cached
    service.stream_extractor_from_url(url)?.fetch().await?;
    assert_eq!(stub.hits(WATCH_API), 2);

    Ok(())
}

#[tokio::test]
async fn test_invalidate_forces_refetch() -> Result<()> {
    let (service, stub) = stub_service(video_stub());
    let url = "https://www.nicovideo.jp/watch/sm12345";

    service.stream_extractor_from_url(url)?.fetch().await?;
    assert!(service.watch_data_cache().invalidate("sm12345").await);
    assert!(!service.watch_data_cache().invalidate("sm12345").await);
    service.stream_extractor_from_url(url)?.fetch().await?;
    assert_eq!(stub.hits(WATCH_API), 2);

    Ok(())
}

#[tokio::test]
async fn test_separate_services_fetch_independently() -> Result<()> {
    let stub = Arc::new(video_stub());
    let a = NiconicoService::with_downloader(Config::default(), stub.clone());
    let b = NiconicoService::with_downloader(Config::default(), stub.clone());
    let url = "https://www.nicovideo.jp/watch/sm12345";

    a.stream_extractor_from_url(url)?.fetch().await?;
    b.stream_extractor_from_url(url)?.fetch().await?;
    assert_eq!(stub.hits(WATCH_API), 2);

    Ok(())
}

#[tokio::test]
async fn test_comment_extractors_share_one_fetch() -> Result<()> {
    let (service, stub) = stub_service(video_stub());
    let url = "https://www.nicovideo.jp/watch/sm12345";

    let stream = service.stream_extractor_from_url(url)?;
    let comments = service.comments_extractor_from_url(url)?;
    let bullets = service.bullet_comments_extractor_from_url(url)?;

    let (info, page, bullet_list) = futures::try_join!(
        stream.fetch(),
        comments.initial_page(),
        bullets.bullet_comments()
    )?;
    assert_eq!(info.id, "sm12345");

    let texts: Vec<&str> = page.items.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["second", "first"]);
    assert!(!page.has_next_page());

    let offsets: Vec<u64> = bullet_list.iter().map(|b| b.offset_ms).collect();
    assert_eq!(offsets, vec![500, 1000, 2000]);
    assert!(bullet_list[0].by_owner);
    assert_eq!(bullet_list[0].color, 0xFF0000);
    assert!(!bullet_list[1].by_owner);

    assert_eq!(stub.hits(WATCH_API), 1);
    assert_eq!(stub.hits(THREADS_API), 1);
    assert!(service.is_watch_data_cache_created());
    assert!(service.is_comments_cache_created());

    Ok(())
}

#[tokio::test]
async fn test_deleted_video_is_not_available() -> Result<()> {
    let (service, _stub) = stub_service(StubDownloader::new());

    let err = service
        .stream_extractor_from_url("https://www.nicovideo.jp/watch/sm404")?
        .fetch()
        .await
        .unwrap_err();
    assert!(matches!(err, ExtractionError::ContentNotAvailable(_)));

    Ok(())
}

#[tokio::test]
async fn test_strict_capabilities_refuse_undeclared_extractors() -> Result<()> {
    let url = "https://www.nicovideo.jp/watch/sm12345";

    let lenient = NiconicoService::new(Config::default())?;
    assert_ok!(lenient.comments_extractor_from_url(url));

    let strict = NiconicoService::new(Config {
        strict_capabilities: true,
        ..Config::default()
    })?;
    assert!(matches!(
        strict.comments_extractor_from_url(url),
        Err(ExtractionError::Unsupported(Capability::Comments))
    ));
    assert!(matches!(
        strict.bullet_comments_extractor_from_url(url),
        Err(ExtractionError::Unsupported(Capability::BulletComments))
    ));
    assert_ok!(strict.stream_extractor_from_url(url));

    Ok(())
}

#[tokio::test]
async fn test_playlist_pages() -> Result<()> {
    let body = r#"{"data":{"mylist":{"name":"favs","hasNext":true,"items":[
        {"video":{"id":"sm1","title":"one","duration":60,"count":{"view":5},
            "thumbnail":{"url":"https://img.example/1"},"owner":{"name":"alice"}}}
    ]}}}"#;
    let stub = StubDownloader::new().route("https://nvapi.nicovideo.jp/v2/mylists/42", body);
    let (service, stub) = stub_service(stub);

    let extractor =
        service.playlist_extractor_from_url("https://www.nicovideo.jp/user/1/mylist/42")?;
    let page = extractor.initial_page().await?;
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].url, "https://www.nicovideo.jp/watch/sm1");
    assert_eq!(page.items[0].uploader_name.as_deref(), Some("alice"));

    let next = page.next_page.expect("next page");
    assert_eq!(next.number(), Some(2));
    assert!(next.url.contains("page=2"));
    assert_eq!(stub.hits("https://nvapi.nicovideo.jp/v2/mylists/42"), 1);

    Ok(())
}

#[tokio::test]
async fn test_search_pages() -> Result<()> {
    let body = r#"{"meta":{"status":200,"totalCount":100},"data":[
        {"contentId":"sm9","title":"found","viewCounter":7,"lengthSeconds":30}
    ]}"#;
    let prefix = "https://snapshot.search.nicovideo.jp/";
    let (service, _stub) = stub_service(StubDownloader::new().route(prefix, body));

    let extractor =
        service.search_extractor_for_query("初音ミク", &[], &["view_count".to_string()])?;
    assert_eq!(extractor.search_string(), "初音ミク");

    let page = extractor.initial_page().await?;
    assert_eq!(page.items[0].url, "https://www.nicovideo.jp/watch/sm9");
    assert_eq!(page.items[0].view_count, Some(7));
    assert_eq!(page.next_page.and_then(|p| p.number()), Some(32));

    assert!(matches!(
        service.search_extractor_for_query("x", &["bogus".to_string()], &[]),
        Err(ExtractionError::Parsing(_))
    ));

    Ok(())
}

#[tokio::test]
async fn test_trending_kiosk_parses_feed() -> Result<()> {
    let feed = r#"<rss version="2.0"><channel><title>ranking</title>
        <item><title>第1位：Song</title>
            <link>https://www.nicovideo.jp/watch/sm100?ref=rss</link></item>
        <item><title>第2位：Other</title>
            <link>https://www.nicovideo.jp/watch/so200</link></item>
    </channel></rss>"#;
    let (service, _stub) =
        stub_service(StubDownloader::new().route("https://www.nicovideo.jp/ranking/", feed));

    let page = service.kiosk_list()?.default_kiosk_extractor()?.initial_page().await?;
    let names: Vec<&str> = page.items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Song", "Other"]);
    assert_eq!(page.items[1].url, "https://www.nicovideo.jp/watch/so200");
    assert!(!page.has_next_page());

    Ok(())
}

const USER_VIDEOS: &str = "https://nvapi.nicovideo.jp/v3/users/99887766/videos";
const USER_VIDEOS_BODY: &str = r#"{"data":{"totalCount":3,"items":[
    {"essential":{"id":"sm1","title":"a"}},
    {"essential":{"id":"sm2","title":"b"}}
]}}"#;

#[tokio::test]
async fn test_channel_pages_until_total_count() -> Result<()> {
    let stub = StubDownloader::new().route(USER_VIDEOS, USER_VIDEOS_BODY);
    let (service, stub) = stub_service_with(small_pages(2), stub);

    let extractor = service.channel_extractor_from_url("https://www.nicovideo.jp/user/99887766")?;
    let page = extractor.initial_page().await?;
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[1].url, "https://www.nicovideo.jp/watch/sm2");

    let next = page.next_page.expect("next page");
    assert_eq!(next.number(), Some(2));
    assert!(next.url.contains("page=2"));
    assert!(next.url.contains("pageSize=2"));

    let last = extractor.page(&next).await?;
    assert!(!last.has_next_page());
    assert_eq!(stub.hits(USER_VIDEOS), 2);

    Ok(())
}

#[tokio::test]
async fn test_suggestions() -> Result<()> {
    let prefix = "https://sug.search.nicovideo.jp/suggestion/expand/";
    let stub = StubDownloader::new().route(prefix, r#"{"candidates":["a","b"]}"#);
    let (service, stub) = stub_service(stub);

    let suggestions = service.suggestion_extractor().expect("suggestion extractor");
    assert_eq!(suggestions.suggestion_list("初音").await?, vec!["a", "b"]);
    assert_eq!(stub.hits(prefix), 1);

    assert!(suggestions.suggestion_list("").await?.is_empty());
    assert!(suggestions.suggestion_list("   ").await?.is_empty());
    assert_eq!(stub.hits(prefix), 1);

    Ok(())
}

#[tokio::test]
async fn test_comments_walk_one_per_page() -> Result<()> {
    let (service, stub) = stub_service_with(small_pages(1), video_stub());

    let extractor = service.comments_extractor_from_url("https://www.nicovideo.jp/watch/sm12345")?;
    let page = extractor.initial_page().await?;
    let texts: Vec<&str> = page.items.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["second"]);

    let next = page.next_page.expect("next page");
    assert_eq!(next.number(), Some(1));

    let last = extractor.page(&next).await?;
    let texts: Vec<&str> = last.items.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["first"]);
    assert!(!last.has_next_page());
    assert_eq!(stub.hits(THREADS_API), 1);

    Ok(())
}

fn max_cursor(url: &str) -> Page {
    Page::new(url, Some(u64::MAX.to_string()))
}

#[tokio::test]
async fn test_comments_cursor_at_u64_max_is_an_empty_last_page() -> Result<()> {
    let (service, _stub) = stub_service(video_stub());
    let url = "https://www.nicovideo.jp/watch/sm12345";

    let page = service
        .comments_extractor_from_url(url)?
        .page(&max_cursor(url))
        .await?;
    assert!(page.items.is_empty());
    assert!(!page.has_next_page());

    Ok(())
}

#[tokio::test]
async fn test_search_cursor_at_u64_max_is_rejected_without_a_request() -> Result<()> {
    let prefix = "https://snapshot.search.nicovideo.jp/";
    let (service, stub) = stub_service(StubDownloader::new().route(prefix, "{}"));

    let extractor = service.search_extractor_for_query("x", &[], &[])?;
    let result = extractor.page(&max_cursor(prefix)).await;
    assert!(matches!(result, Err(ExtractionError::Parsing(_))));
    assert_eq!(stub.hits(prefix), 0);

    Ok(())
}

#[tokio::test]
async fn test_channel_cursor_at_u64_max_ends_paging() -> Result<()> {
    let stub = StubDownloader::new().route(USER_VIDEOS, USER_VIDEOS_BODY);
    let (service, _stub) = stub_service(stub);

    let page = service
        .channel_extractor_from_url("https://www.nicovideo.jp/user/99887766")?
        .page(&max_cursor(USER_VIDEOS))
        .await?;
    assert_eq!(page.items.len(), 2);
    assert!(!page.has_next_page());

    Ok(())
}

#[tokio::test]
async fn test_playlist_cursor_at_u64_max_ends_paging() -> Result<()> {
    let body = r#"{"data":{"mylist":{"name":"favs","hasNext":true,"items":[]}}}"#;
    let prefix = "https://nvapi.nicovideo.jp/v2/mylists/42";
    let (service, _stub) = stub_service(StubDownloader::new().route(prefix, body));

    let page = service
        .playlist_extractor_from_url("https://www.nicovideo.jp/user/1/mylist/42")?
        .page(&max_cursor(prefix))
        .await?;
    assert!(!page.has_next_page());

    Ok(())
}
