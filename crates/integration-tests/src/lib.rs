//! Integration tests for Puntaditas.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p puntaditas-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_engine` - Cart invariants and scenarios through the public API
//! - `persistence` - Cart survival across engine instances on disk
//! - `catalog` - Catalog loading over HTTP, including the fallback path
//!
//! This crate also provides a throwaway HTTP server for serving catalog
//! documents, so the catalog tests never leave the machine.

use axum::Router;
use axum::http::{StatusCode, header};
use axum::routing::get;
use tokio::net::TcpListener;
use url::Url;

/// Catalog document used by the HTTP tests.
pub const SAMPLE_CATALOG: &str = r#"[
    {"id": 10, "nombre": "Pulpo", "precio": 8000},
    {"id": 11, "nombre": "Gatito", "precio": 11500.5}
]"#;

/// Serve `body` with `status` at `/api.json` on an ephemeral local port.
///
/// Returns the URL of the document. The server runs until the test's
/// runtime shuts down.
///
/// # Panics
///
/// Panics if the listener cannot be bound.
#[allow(clippy::unwrap_used)]
pub async fn serve_catalog(status: StatusCode, body: &'static str) -> Url {
    let app = Router::new().route(
        "/api.json",
        get(move || async move { (status, [(header::CONTENT_TYPE, "application/json")], body) }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Url::parse(&format!("http://{addr}/api.json")).unwrap()
}
