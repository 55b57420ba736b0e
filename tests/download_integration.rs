//! Integration tests for mirror resolution and candidate downloads.

mod support;

use support::{mirror_page, start_mock_server_or_skip};
use tempfile::TempDir;
use toshi_core::catalog::Record;
use toshi_core::download::{DownloadAttempter, DownloadError};
use toshi_core::resolver::resolve_candidates;
use toshi_core::transport::{HttpClient, TransportError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

fn record_with_mirror(mirror: &str, extension: &str) -> Record {
    Record {
        id: "42".to_string(),
        authors: "Doe".to_string(),
        title: "Book".to_string(),
        extension: extension.to_string(),
        mirrors: vec![mirror.to_string(), String::new()],
        ..Record::default()
    }
}

#[tokio::test]
async fn test_resolver_keeps_matching_links_only() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    let uri = server.uri();
    let links = vec![
        format!("{uri}/files/book.pdf"),
        format!("{uri}/files/book.epub"),
        format!("{uri}/files/book.mobi"),
    ];
    Mock::given(method("GET"))
        .and(path("/main/42"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(mirror_page(&links), "text/html"))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new().unwrap();
    let record = record_with_mirror(&format!("{uri}/main/42"), "epub");
    let candidates = resolve_candidates(&client, &record).await;

    assert_eq!(candidates, vec![format!("{uri}/files/book.epub")]);
}

#[tokio::test]
async fn test_resolver_absolutizes_relative_links() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    let uri = server.uri();
    let links = vec!["/get.php?md5=42&name=book.epub".to_string()];
    Mock::given(method("GET"))
        .and(path("/main/42"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(mirror_page(&links), "text/html"))
        .mount(&server)
        .await;

    let client = HttpClient::new().unwrap();
    let record = record_with_mirror(&format!("{uri}/main/42"), "epub");
    let candidates = resolve_candidates(&client, &record).await;

    assert_eq!(candidates, vec![format!("{uri}/get.php?md5=42&name=book.epub")]);
}

#[tokio::test]
async fn test_resolver_mirror_failure_yields_no_candidates() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/main/42"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = HttpClient::new().unwrap();
    let record = record_with_mirror(&format!("{}/main/42", server.uri()), "epub");
    assert!(resolve_candidates(&client, &record).await.is_empty());
}

#[tokio::test]
async fn test_resolver_without_mirror_makes_no_request() {
    let client = HttpClient::new().unwrap();
    let record = record_with_mirror("", "epub");
    assert!(resolve_candidates(&client, &record).await.is_empty());
}

#[tokio::test]
async fn test_attempter_falls_back_after_not_found() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/a/book.epub"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/b/book.epub"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ok".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let out = dir.path().join("output");
    let uri = server.uri();
    let candidates = vec![format!("{uri}/a/book.epub"), format!("{uri}/b/book.epub")];

    let client = HttpClient::new().unwrap();
    let report = DownloadAttempter::new(&out)
        .attempt(&client, &candidates, "Doe - Book.epub")
        .await
        .unwrap();

    assert_eq!(report.attempts, 2);
    assert_eq!(report.url, candidates[1]);
    assert_eq!(report.path, out.join("Doe - Book.epub"));
    assert_eq!(std::fs::read(&report.path).unwrap(), b"ok");
}

#[tokio::test]
async fn test_attempter_all_failing_wraps_last_error() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/a/book.epub"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/b/book.epub"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let uri = server.uri();
    let candidates = vec![format!("{uri}/a/book.epub"), format!("{uri}/b/book.epub")];

    let client = HttpClient::new().unwrap();
    let error = DownloadAttempter::new(dir.path())
        .attempt(&client, &candidates, "book.epub")
        .await
        .unwrap_err();

    match error {
        DownloadError::AllCandidatesFailed { attempts, source } => {
            assert_eq!(attempts, 2);
            assert!(
                matches!(source, TransportError::HttpStatus { status: 502, .. }),
                "got {source:?}"
            );
        }
        other => panic!("expected AllCandidatesFailed, got {other:?}"),
    }
    assert!(!dir.path().join("book.epub").exists());
}
