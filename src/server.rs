// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::header::{CONTENT_TYPE, LAST_MODIFIED};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

use crate::config::Config;
use crate::error::ServeError;
use crate::pipeline::build_feed;

/// Content type of the feed response. Kept as Atom for client compatibility
/// even though the body is RSS.
pub const FEED_CONTENT_TYPE: &str = "application/atom+xml";

/// Shared, read-only state for request handlers
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
}

/// Build the router: the feed at `feed_path`, every other path from `file_root`.
pub fn create_router(config: Arc<Config>) -> Router {
    let files = ServeDir::new(&config.channel.file_root);

    Router::new()
        .route(&config.feed_path, get(serve_feed))
        .fallback_service(files)
        .with_state(AppState { config })
}

/// Serve on an already bound listener until the process stops
pub async fn serve(listener: TcpListener, config: Config) -> std::io::Result<()> {
    let app = create_router(Arc::new(config));
    axum::serve(listener, app.into_make_service()).await
}

/// Bind `config.listen` and serve
pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let addr = config.listen_addr()?;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(
        "Serving feed at http://{}{} from {}",
        listener.local_addr()?,
        config.feed_path,
        config.channel.file_root.display()
    );

    serve(listener, config).await?;
    Ok(())
}

async fn serve_feed(State(state): State<AppState>) -> Result<Response, ServeError> {
    let config = state.config.clone();
    let rendered =
        tokio::task::spawn_blocking(move || build_feed(&config, Some(Utc::now()))).await??;

    tracing::debug!("Built feed with {} episodes", rendered.episode_count);

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(FEED_CONTENT_TYPE));
    if let Some(value) = rendered
        .last_modified
        .and_then(|dt| HeaderValue::from_str(&http_date(dt)).ok())
    {
        headers.insert(LAST_MODIFIED, value);
    }

    Ok((StatusCode::OK, headers, Bytes::from(rendered.body)).into_response())
}

/// Format a timestamp as an HTTP-date (IMF-fixdate)
fn http_date(dt: DateTime<Utc>) -> String {
    dt.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

impl IntoResponse for ServeError {
    fn into_response(self) -> Response {
        tracing::error!("Failed to serve feed: {}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, "Failed to build feed").into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChannelConfig;
    use crate::feed::ChannelItunes;
    use chrono::TimeZone;
    use std::path::Path;
    use std::time::{Duration, SystemTime};
    use tempfile::tempdir;
    use url::Url;

    fn config(root: &Path) -> Config {
        Config {
            listen: "127.0.0.1:0".to_string(),
            feed_path: "/podcast.xml".to_string(),
            read_tags: false,
            channel: ChannelConfig {
                title: "Attic Tapes".to_string(),
                description: "Old recordings".to_string(),
                url: Url::parse("https://example.com/").unwrap(),
                feed_url: Url::parse("https://example.com/podcast.xml").unwrap(),
                file_root: root.to_path_buf(),
                language: None,
                copyright: None,
                image: None,
                itunes: ChannelItunes::default(),
            },
        }
    }

    async fn start(config: Config) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(serve(listener, config));
        format!("http://{addr}")
    }

    fn client() -> reqwest::Client {
        reqwest::Client::builder().no_proxy().build().unwrap()
    }

    #[test]
    fn http_date_uses_gmt() {
        let dt = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        assert_eq!(http_date(dt), "Tue, 14 Nov 2023 22:13:20 GMT");
    }

    #[tokio::test]
    async fn feed_route_returns_document_with_headers() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.mp3");
        std::fs::write(&path, b"audio").unwrap();
        let file = std::fs::File::options().write(true).open(&path).unwrap();
        file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000))
            .unwrap();
        drop(file);

        let base = start(config(dir.path())).await;
        let response = client()
            .get(format!("{base}/podcast.xml"))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 200);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/atom+xml"
        );
        assert_eq!(
            response.headers().get("last-modified").unwrap(),
            "Tue, 14 Nov 2023 22:13:20 GMT"
        );

        let body = response.text().await.unwrap();
        assert!(body.contains("<title>a</title>"));
        assert!(body.contains("length=\"5\""));
    }

    #[tokio::test]
    async fn empty_feed_has_no_last_modified() {
        let dir = tempdir().unwrap();

        let base = start(config(dir.path())).await;
        let response = client()
            .get(format!("{base}/podcast.xml"))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 200);
        assert!(response.headers().get("last-modified").is_none());
    }

    #[tokio::test]
    async fn other_paths_serve_files_unchanged() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("season 1")).unwrap();
        std::fs::write(dir.path().join("season 1/a b.mp3"), b"raw bytes").unwrap();

        let base = start(config(dir.path())).await;
        let client = client();

        let found = client
            .get(format!("{base}/season%201/a%20b.mp3"))
            .send()
            .await
            .unwrap();
        assert_eq!(found.status().as_u16(), 200);
        assert_eq!(found.bytes().await.unwrap().as_ref(), b"raw bytes");

        let missing = client
            .get(format!("{base}/nope.mp3"))
            .send()
            .await
            .unwrap();
        assert_eq!(missing.status().as_u16(), 404);
    }

    #[tokio::test]
    async fn scan_failure_becomes_server_error() {
        let dir = tempdir().unwrap();
        let base = start(config(&dir.path().join("gone"))).await;

        let response = client()
            .get(format!("{base}/podcast.xml"))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 500);
        let body = response.text().await.unwrap();
        assert!(!body.contains("<rss"));
    }
}
