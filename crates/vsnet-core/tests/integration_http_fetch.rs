//! Integration test: the same tree served over HTTP and fetched with libcurl.

mod common;

use vsnet_core::config::{TreeSource, VsConfig};
use vsnet_core::fetch::{Fetcher, HttpFetcher};
use vsnet_core::{ConcretePath, LoadError};

#[tokio::test]
async fn load_over_http_is_rewritten() {
    let tree = common::tree::sample();
    let server = common::static_server::start(tree.path());
    let nav = VsConfig::default()
        .navigator(&TreeSource::Url(server.url.clone()))
        .unwrap();

    let page = nav.load("mail.vs/folder/page.html").await.unwrap();
    assert!(page.html);
    assert_eq!(page.content_type.as_deref(), Some("text/html; charset=utf-8"));
    assert!(page.text().contains("return __vsNavigate('mail.vs/other.html')"));

    let page = nav.load("mail.vs/style.css").await.unwrap();
    assert!(!page.html);
    assert_eq!(page.content, b"body { color: black; }");
    assert!(server.requests() >= 2);
}

#[tokio::test]
async fn http_404_is_not_found() {
    let tree = common::tree::sample();
    let server = common::static_server::start(tree.path());
    let nav = VsConfig::default()
        .navigator(&TreeSource::Url(server.url.clone()))
        .unwrap();

    match nav.load("news.vs").await.unwrap_err() {
        LoadError::NotFound { path, status, .. } => {
            assert_eq!(path, "news/start.html");
            assert_eq!(status, Some(404));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn redirects_are_followed() {
    let tree = common::tree::sample();
    let server = common::static_server::start(tree.path());
    let fetcher = HttpFetcher::new(&format!("{}moved/", server.url)).unwrap();
    let response = fetcher
        .fetch(&ConcretePath::from_tree("mail/other.html"))
        .unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body, b"<p>other</p>");
}

#[tokio::test]
async fn unreachable_server_is_not_found() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let nav = VsConfig::default()
        .navigator(&TreeSource::Url(format!("http://127.0.0.1:{}/", port)))
        .unwrap();

    match nav.load("mail.vs").await.unwrap_err() {
        LoadError::NotFound { status, detail, .. } => {
            assert_eq!(status, None);
            assert!(detail.is_some());
        }
        other => panic!("unexpected {other:?}"),
    }
}
