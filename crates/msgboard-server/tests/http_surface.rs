//! End-to-end tests over the real HTTP surface.
//!
//! Each test spins up the full router on a loopback listener and speaks raw
//! HTTP/1.1 over a TCP stream, then asserts on both the wire responses and
//! the injected metrics registry.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::net::SocketAddr;

use axum::http::Method;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use msgboard_server::app_state::AppState;
use msgboard_server::obs::metrics::Endpoint;
use msgboard_server::{config, router};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Serve the router for an already-built state on port 0.
async fn serve(state: AppState) -> SocketAddr {
    let app = router::build_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Build state over a fresh temp database and serve the router on port 0.
async fn spawn_app(tag: &str) -> (SocketAddr, AppState) {
    let path = std::env::temp_dir().join(format!("msgboard-http-{}-{}.db", tag, std::process::id()));
    let _ = std::fs::remove_file(&path);
    let yaml = format!(
        "version: 1\ndatabase:\n  url: \"sqlite://{}?mode=rwc\"\n",
        path.display()
    );
    let state = AppState::new(config::load_from_str(&yaml).unwrap());
    state.ensure_schema().await.unwrap();

    let addr = serve(state.clone()).await;
    (addr, state)
}

async fn send_raw(addr: SocketAddr, raw: String) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(raw.as_bytes()).await.unwrap();
    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).await.unwrap();
    String::from_utf8(buf).unwrap()
}

async fn get(addr: SocketAddr, path: &str) -> String {
    send_raw(
        addr,
        format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n"),
    )
    .await
}

async fn post_form(addr: SocketAddr, path: &str, body: &str) -> String {
    send_raw(
        addr,
        format!(
            "POST {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\
             Content-Type: application/x-www-form-urlencoded\r\nContent-Length: {}\r\n\r\n{body}",
            body.len()
        ),
    )
    .await
}

fn status_of(resp: &str) -> u16 {
    resp.split_whitespace().nth(1).unwrap().parse().unwrap()
}

fn body_of(resp: &str) -> &str {
    resp.split_once("\r\n\r\n").map(|(_, b)| b).unwrap_or("")
}

fn is_redirect_home(resp: &str) -> bool {
    status_of(resp) == 302 && resp.to_lowercase().contains("location: /")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_body_is_exact() {
    let (addr, _state) = spawn_app("health").await;

    let resp = get(addr, "/health").await;
    assert_eq!(status_of(&resp), 200);
    assert_eq!(
        body_of(&resp),
        "{\"status\": \"healthy\", \"service\": \"flask-app\"}"
    );

    // the hand-formatted body must still be well-formed JSON
    let v: serde_json::Value = serde_json::from_str(body_of(&resp)).unwrap();
    assert_eq!(v["status"], "healthy");
    assert_eq!(v["service"], "flask-app");
}

#[tokio::test]
async fn empty_board_shows_zero_messages() {
    let (addr, state) = spawn_app("empty").await;

    let resp = get(addr, "/").await;
    assert_eq!(status_of(&resp), 200);
    assert!(body_of(&resp).contains("No messages yet."));
    assert_eq!(state.metrics().total_messages.value(), 0);
}

#[tokio::test]
async fn added_message_appears_on_top() {
    let (addr, state) = spawn_app("add").await;

    assert!(is_redirect_home(&post_form(addr, "/add", "message=older").await));
    assert!(is_redirect_home(&post_form(addr, "/add", "message=hello").await));

    let resp = get(addr, "/").await;
    let body = body_of(&resp);
    let hello = body.find("hello").unwrap();
    let older = body.find("older").unwrap();
    assert!(hello < older, "newest entry must render first");
    assert_eq!(state.metrics().total_messages.value(), 2);
}

#[tokio::test]
async fn empty_message_inserts_nothing() {
    let (addr, _state) = spawn_app("add-empty").await;

    assert!(is_redirect_home(&post_form(addr, "/add", "message=").await));

    let resp = get(addr, "/").await;
    assert!(body_of(&resp).contains("No messages yet."));
}

#[tokio::test]
async fn delete_of_missing_id_redirects_cleanly() {
    let (addr, _state) = spawn_app("del-missing").await;

    assert!(is_redirect_home(&post_form(addr, "/add", "message=keep").await));
    assert!(is_redirect_home(&get(addr, "/delete/999").await));

    let resp = get(addr, "/").await;
    assert!(body_of(&resp).contains("keep"));
}

#[tokio::test]
async fn delete_removes_the_row() {
    let (addr, state) = spawn_app("del").await;

    assert!(is_redirect_home(&post_form(addr, "/add", "message=doomed").await));
    let mut conn = state.db().acquire().await.unwrap();
    let id = state.store().list_all(&mut conn).await.unwrap()[0].id;
    drop(conn);

    assert!(is_redirect_home(&get(addr, &format!("/delete/{id}")).await));
    let resp = get(addr, "/").await;
    assert!(body_of(&resp).contains("No messages yet."));
}

#[tokio::test]
async fn every_request_increments_its_counter_cell() {
    let (addr, state) = spawn_app("counters").await;

    get(addr, "/health").await;
    get(addr, "/health").await;
    post_form(addr, "/add", "message=x").await;
    get(addr, "/").await;

    let m = state.metrics();
    assert_eq!(m.request_count.get(&Method::GET, Endpoint::Health, 200), 2);
    assert_eq!(m.request_count.get(&Method::POST, Endpoint::AddMessage, 302), 1);
    assert_eq!(m.request_count.get(&Method::GET, Endpoint::Index, 200), 1);
    assert!(m.request_latency.count(Endpoint::Health) >= 2);

    // steady state: every paired acquire/release returned the gauge to zero
    assert_eq!(m.db_connections.value(), 0);
}

#[tokio::test]
async fn acquire_failure_answers_500_and_is_still_counted() {
    // unreachable database: missing directory, read-only mode, no schema
    let yaml = "version: 1\ndatabase:\n  url: \"sqlite:///nonexistent-dir/msgboard.db?mode=ro\"\n";
    let state = AppState::new(config::load_from_str(yaml).unwrap());
    let addr = serve(state.clone()).await;

    let resp = get(addr, "/").await;
    assert_eq!(status_of(&resp), 500);
    assert_eq!(body_of(&resp), "Database connection failed");

    // the failed request is counted exactly once, under its real status
    let m = state.metrics();
    assert_eq!(m.request_count.get(&Method::GET, Endpoint::Index, 500), 1);
    assert_eq!(m.request_count.get(&Method::GET, Endpoint::Index, 200), 0);
    assert!(m.request_latency.count(Endpoint::Index) >= 1);
    assert_eq!(m.db_connections.value(), 0);
}

#[tokio::test]
async fn unmatched_path_is_counted_as_unknown() {
    let (addr, state) = spawn_app("unknown").await;

    let resp = get(addr, "/no/such/route").await;
    assert_eq!(status_of(&resp), 404);
    assert_eq!(
        state
            .metrics()
            .request_count
            .get(&Method::GET, Endpoint::Unknown, 404),
        1
    );
}

#[tokio::test]
async fn metrics_endpoint_is_itself_instrumented() {
    let (addr, state) = spawn_app("scrape").await;

    get(addr, "/metrics").await;
    let second = get(addr, "/metrics").await;
    assert_eq!(status_of(&second), 200);
    assert!(second
        .to_lowercase()
        .contains("content-type: text/plain; version=0.0.4"));

    // the first scrape is visible inside the second one
    assert!(body_of(&second).contains(
        "msgboard_request_count_total{endpoint=\"metrics\",http_status=\"200\",method=\"GET\"} 1"
    ));
    assert_eq!(
        state
            .metrics()
            .request_count
            .get(&Method::GET, Endpoint::Metrics, 200),
        2
    );
}
