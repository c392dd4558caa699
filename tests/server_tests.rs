//! HTTP API integration tests.
//!
//! Handlers are exercised in-process with `tower::ServiceExt::oneshot`;
//! one test also runs a real listener and queries it with `HttpSource`.

#![cfg(all(feature = "server", feature = "remote"))]

use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use card_keypad::cards::{CardRecord, VariantSet};
use card_keypad::core::{CardNumber, LookupError, ServerConfig};
use card_keypad::server::{build_router, AppState};
use card_keypad::source::{CardSource, HttpSource};
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

const CARDS_CSV: &str = "\
number,filename,Card Name
5,005.png,Harbor
12,012a.png,Market
12,./012b.png,Night market
";

/// Temp layout: `cards.csv`, `public/index.html`, `public/cards/005.png`.
struct Fixture {
    dir: TempDir,
    config: ServerConfig,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let public = dir.path().join("public");
        fs::create_dir_all(public.join("cards")).unwrap();
        fs::write(public.join("index.html"), "<h1>keypad</h1>").unwrap();
        fs::write(public.join("cards/005.png"), b"png").unwrap();
        fs::write(dir.path().join("cards.csv"), CARDS_CSV).unwrap();

        let root = dir.path().to_path_buf();
        let config = ServerConfig::from_lookup(&root, |key| match key {
            "PUBLIC_DIR" => Some("public".into()),
            "CARDS_CSV" => Some("cards.csv".into()),
            "PORT" => Some("0".into()),
            "BIND_ADDR" => Some("127.0.0.1".into()),
            _ => None,
        });
        Self { dir, config }
    }

    fn csv_path(&self) -> &Path {
        &self.config.cards_csv
    }

    fn state(&self) -> AppState {
        AppState::load(self.csv_path().to_path_buf()).unwrap()
    }

    fn router(&self) -> Router {
        build_router(self.state(), &self.config)
    }
}

async fn send(app: Router, method: Method, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = send(app, Method::GET, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

// =============================================================================
// Card Lookup
// =============================================================================

/// Test that all variants of a number come back in file order.
#[tokio::test]
async fn test_cards_lists_variants() {
    let fixture = Fixture::new();
    let (status, body) = get_json(fixture.router(), "/api/cards/012").await;

    assert_eq!(status, StatusCode::OK);
    let variants: VariantSet = serde_json::from_value(body).unwrap();
    assert_eq!(variants.len(), 2);
    assert_eq!(variants.get(1).unwrap().filename, "012b.png");
    assert_eq!(variants.get(1).unwrap().image_url, "cards/012b.png");
}

/// Test that leading zeros are optional.
#[tokio::test]
async fn test_cards_unpadded_number() {
    let fixture = Fixture::new();
    let (status, body) = get_json(fixture.router(), "/api/cards/5").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

/// Test that a valid number without cards is a 404 with an error body.
#[tokio::test]
async fn test_cards_not_found() {
    let fixture = Fixture::new();
    let (status, body) = get_json(fixture.router(), "/api/cards/007").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "no card for number 007");
}

/// Test that malformed and out-of-range numbers are a 400.
#[tokio::test]
async fn test_cards_bad_number() {
    let fixture = Fixture::new();
    for uri in ["/api/cards/abc", "/api/cards/500", "/api/cards/-1"] {
        let (status, body) = get_json(fixture.router(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(body["error"].is_string(), "{uri}");
    }
}

/// Test that the single-card route picks by filename basename.
#[tokio::test]
async fn test_card_by_filename() {
    let fixture = Fixture::new();

    let (status, body) =
        get_json(fixture.router(), "/api/card/12?filename=cards/012b.png").await;
    assert_eq!(status, StatusCode::OK);
    let record: CardRecord = serde_json::from_value(body).unwrap();
    assert_eq!(record.filename, "012b.png");

    let (status, body) = get_json(fixture.router(), "/api/card/12").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["filename"], "012a.png");

    let (status, _) = get_json(fixture.router(), "/api/card/12?filename=999.png").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get_json(fixture.router(), "/api/card/8").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Health and Reload
// =============================================================================

/// Test that health reports the catalog size.
#[tokio::test]
async fn test_health() {
    let fixture = Fixture::new();
    let (status, body) = get_json(fixture.router(), "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["numbers"], 2);
    assert_eq!(body["total"], 3);
}

/// Test that reload picks up edits and keeps old data on failure.
#[tokio::test]
async fn test_reload() {
    let fixture = Fixture::new();
    let state = fixture.state();
    let app = build_router(state.clone(), &fixture.config);

    fs::write(fixture.csv_path(), "number,filename\n1,001.png\n").unwrap();
    let (status, body) = send(app.clone(), Method::POST, "/api/reload").await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["total"], 1);
    assert_eq!(state.catalog().await.len(), 1);

    fs::write(fixture.csv_path(), "filename\n001.png\n").unwrap();
    let (status, body) = send(app.clone(), Method::POST, "/api/reload").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert!(body["error"].as_str().unwrap().contains("number"));

    let (_, health) = get_json(app, "/api/health").await;
    assert_eq!(health["total"], 1);
}

// =============================================================================
// Static Files
// =============================================================================

/// Test that the frontend and card images are served.
#[tokio::test]
async fn test_static_files() {
    let fixture = Fixture::new();

    let (status, body) = send(fixture.router(), Method::GET, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"<h1>keypad</h1>");

    let (status, body) = send(fixture.router(), Method::GET, "/cards/005.png").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"png");

    let (status, _) = send(fixture.router(), Method::GET, "/cards/404.png").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(fixture.dir.path().join("public").is_dir());
}

// =============================================================================
// Remote Source
// =============================================================================

/// Test that `HttpSource` talks to a live server.
#[tokio::test]
async fn test_http_source_end_to_end() {
    let fixture = Fixture::new();
    let app = fixture.router();

    let listener = tokio::net::TcpListener::bind(fixture.config.bind).await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let source = HttpSource::new(format!("http://{addr}"));

    let stats = source.stats().await.unwrap();
    assert_eq!(stats.numbers, 2);
    assert_eq!(stats.total, 3);

    let twelve = CardNumber::new(12).unwrap();
    assert_eq!(source.variants(twelve).await.unwrap().len(), 2);

    let seven = CardNumber::new(7).unwrap();
    assert!(source.variants(seven).await.unwrap().is_empty());
}

/// Test that an unreachable server is a transport error.
#[tokio::test]
async fn test_http_source_unreachable() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let source = HttpSource::new(format!("http://{addr}"));
    let err = source.stats().await.unwrap_err();
    assert!(matches!(err, LookupError::Transport(_)));
}
