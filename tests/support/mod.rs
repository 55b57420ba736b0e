//! Shared helpers for integration tests: socket guard and catalog fixtures.

#![allow(dead_code)]

use std::net::TcpListener;
use std::panic::Location;

use wiremock::MockServer;

#[must_use]
pub fn socket_tests_required() -> bool {
    std::env::var("TOSHI_REQUIRE_SOCKET_TESTS")
        .ok()
        .is_some_and(|value| matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
}

#[track_caller]
#[must_use]
pub fn should_skip_socket_bound_test() -> bool {
    if TcpListener::bind("127.0.0.1:0").is_ok() {
        return false;
    }

    let location = Location::caller();
    let message = format!(
        "[socket-bound-test] cannot bind localhost socket at {}:{}; wiremock-based test cannot run in this environment",
        location.file(),
        location.line()
    );
    if socket_tests_required() {
        panic!("{message}. Set TOSHI_REQUIRE_SOCKET_TESTS=0 to allow local skip behavior.");
    }

    eprintln!("{message}. Skipping test. Set TOSHI_REQUIRE_SOCKET_TESTS=1 to fail-fast instead.");
    true
}

pub async fn start_mock_server_or_skip() -> Option<MockServer> {
    if should_skip_socket_bound_test() {
        None
    } else {
        Some(MockServer::start().await)
    }
}

/// One result row in the simple view: id, author, title, extension, mirror.
pub fn result_row(id: u32, author: &str, title: &str, extension: &str, mirror: &str) -> String {
    format!(
        "<tr valign=\"top\" bgcolor=\"\"><td>{id}</td><td><a href=\"search.php?req={author}\">{author}</a></td>\
         <td width=\"500\"><a href=\"book/index.php?md5={id}\" title=\"\">{title}</a></td>\
         <td>Publisher</td><td nowrap>2021</td><td>320</td><td>English</td><td nowrap>2 Mb</td>\
         <td nowrap>{extension}</td><td><a href=\"{mirror}\" title=\"this mirror\">[1]</a></td>\
         <td><a href=\"https://edit.example/{id}\" title=\"edit\">[edit]</a></td></tr>"
    )
}

/// A results page with a header row, `rows`, and an optional paginator for `total_pages`.
pub fn results_page(rows: &[String], total_pages: Option<usize>) -> String {
    let script = total_pages
        .map(|total| {
            format!(
                "<script type=\"text/javascript\">paginator = new Paginator(\"paginator_example_top\", {total}, 25, 1, \"search.php?req=x&page=\");</script>"
            )
        })
        .unwrap_or_default();
    format!(
        "<!DOCTYPE html><html><head><title>Library</title></head><body>{script}\
         <table class=\"c\"><tr valign=\"top\" bgcolor=\"#C0C0C0\"><td><b>ID</b></td><td><b>Author(s)</b></td></tr>{}</table>\
         </body></html>",
        rows.concat()
    )
}

/// A mirror page whose download section lists `links` in order.
pub fn mirror_page(links: &[String]) -> String {
    let items: String = links
        .iter()
        .map(|href| format!("<li><a href=\"{href}\">GET</a></li>"))
        .collect();
    format!(
        "<html><body><h1>Book</h1><div id=\"download\"><h2><a href=\"{}\">GET</a></h2><ul>{items}</ul></div></body></html>",
        links.first().map_or("", String::as_str)
    )
}
