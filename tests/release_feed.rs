//! Integration tests for build-id resolution against a mocked release feed.
//!
//! Uses wiremock for HTTP mocking. Covers the success path, the platform and
//! channel query mapping, error statuses, malformed bodies, and transport
//! failures.

use browser_cache::browser_data::{ReleaseFeed, chrome, chromedriver};
use browser_cache::{BrowserCacheError, BrowserPlatform, ReleaseChannel};
use rstest::rstest;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FEED_PATH: &str = "/fetch_releases";

fn feed_for(server: &MockServer) -> ReleaseFeed {
    ReleaseFeed::with_endpoint(format!("{}{FEED_PATH}", server.uri()))
}

async fn mount_body(server: &MockServer, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(FEED_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn resolves_version_of_first_release() {
    let server = MockServer::start().await;
    mount_body(&server, 200, r#"[{"version":"115.0.5790.0"},{"version":"114.0.5735.90"}]"#).await;

    let build_id = chrome::resolve_build_id_with(
        &feed_for(&server),
        BrowserPlatform::Linux,
        ReleaseChannel::default(),
    )
    .await
    .expect("resolve build id");

    assert_eq!(build_id, "115.0.5790.0");
}

#[rstest]
#[case(BrowserPlatform::Linux, "linux")]
#[case(BrowserPlatform::Mac, "mac")]
#[case(BrowserPlatform::MacArm, "mac")]
#[case(BrowserPlatform::Win32, "win")]
#[case(BrowserPlatform::Win64, "win64")]
#[tokio::test]
async fn queries_feed_with_remote_platform_token(
    #[case] platform: BrowserPlatform,
    #[case] token: &str,
) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FEED_PATH))
        .and(query_param("platform", token))
        .and(query_param("channel", "stable"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"[{"version":"116.0.5845.96"}]"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let feed = feed_for(&server);
    let build_id = chrome::resolve_build_id_with(&feed, platform, ReleaseChannel::Stable)
        .await
        .expect("resolve build id");

    assert_eq!(build_id, "116.0.5845.96");
}

#[tokio::test]
async fn beta_is_requested_by_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FEED_PATH))
        .and(query_param("channel", "beta"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"[{"version":"117.0.5938.11"}]"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let build_id = chromedriver::resolve_build_id_with(
        &feed_for(&server),
        BrowserPlatform::Win64,
        ReleaseChannel::default(),
    )
    .await
    .expect("resolve build id");

    assert_eq!(build_id, "117.0.5938.11");
}

#[rstest]
#[case(400)]
#[case(404)]
#[case(500)]
#[tokio::test]
async fn error_status_is_reported_with_its_code(#[case] status: u16) {
    let server = MockServer::start().await;
    mount_body(&server, status, "upstream unavailable").await;

    let err = chrome::resolve_build_id_with(
        &feed_for(&server),
        BrowserPlatform::Linux,
        ReleaseChannel::Beta,
    )
    .await
    .expect_err("error status must fail");

    assert!(matches!(err, BrowserCacheError::Status { status: code } if code == status));
    assert_eq!(err.to_string(), format!("Got status code {status}"));
}

#[rstest]
#[case("not json at all")]
#[case("[]")]
#[case(r#"[{"milestone":115}]"#)]
#[case(r#"{"version":"115.0.5790.0"}"#)]
#[tokio::test]
async fn malformed_body_is_reported_as_not_found(#[case] body: &str) {
    let server = MockServer::start().await;
    mount_body(&server, 200, body).await;

    let err = chrome::resolve_build_id_with(
        &feed_for(&server),
        BrowserPlatform::Mac,
        ReleaseChannel::Beta,
    )
    .await
    .expect_err("malformed body must fail");

    assert!(matches!(err, BrowserCacheError::BuildIdNotFound));
    assert_eq!(err.to_string(), "Chrome version not found");
}

#[tokio::test]
async fn transport_failure_is_propagated() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    let feed = ReleaseFeed::with_endpoint(format!("http://{addr}{FEED_PATH}"));

    let err = chrome::resolve_build_id_with(&feed, BrowserPlatform::Linux, ReleaseChannel::Beta)
        .await
        .expect_err("closed server must fail");

    assert!(matches!(err, BrowserCacheError::Transport(_)), "got {err:?}");
}

#[tokio::test]
async fn concurrent_lookups_do_not_interfere() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("platform", "linux"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"[{"version":"1.0.0"}]"#))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("platform", "win64"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"[{"version":"2.0.0"}]"#))
        .mount(&server)
        .await;
    let feed = feed_for(&server);

    let (linux, windows) = tokio::join!(
        chrome::resolve_build_id_with(&feed, BrowserPlatform::Linux, ReleaseChannel::Beta),
        chrome::resolve_build_id_with(&feed, BrowserPlatform::Win64, ReleaseChannel::Beta),
    );

    assert_eq!(linux.expect("linux"), "1.0.0");
    assert_eq!(windows.expect("windows"), "2.0.0");
}
