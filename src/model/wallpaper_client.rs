//! Wallpaper service client: the only place that touches the network

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use url::Url;

use super::classifier::RawOutcome;
use super::types::Identifier;
use crate::{log_api_request, log_api_result};

const USER_AGENT: &str = concat!("animewall/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid server url `{url}`: {reason}")]
    InvalidServerUrl { url: String, reason: String },
    #[error("failed to build http client: {0}")]
    Build(#[source] reqwest::Error),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("image returned status {0}")]
    ImageStatus(u16),
}

/// Seam between the request pipeline and the transport
#[async_trait]
pub trait WallpaperSource: Send + Sync {
    /// One attempt at the aggregated wallpaper payload; never retried
    async fn fetch_wallpapers(&self, identifier: &Identifier) -> RawOutcome;

    /// Load one image sub-resource; any error means the image is broken
    async fn load_image(&self, url: &str) -> Result<(), ClientError>;
}

#[derive(Clone)]
pub struct HttpWallpaperSource {
    client: Client,
    base_url: Url,
}

impl HttpWallpaperSource {
    /// `timeout` of `None` leaves requests unbounded, like reqwest's default
    pub fn new(base_url: Url, timeout: Option<Duration>) -> Result<Self, ClientError> {
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidServerUrl {
                url: base_url.to_string(),
                reason: "url cannot be a base".to_string(),
            });
        }

        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ClientError::Build)?;

        Ok(Self { client, base_url })
    }

    /// `{base}/api/wallpapers/{identifier}`, identifier as one encoded segment
    pub fn endpoint(&self, identifier: &Identifier) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["api", "wallpapers", identifier.as_str()]);
        }
        url
    }

    async fn get_json(&self, url: Url) -> Result<(u16, Option<serde_json::Value>), ClientError> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        let body = if bytes.is_empty() {
            None
        } else {
            serde_json::from_slice(&bytes).ok()
        };
        Ok((status, body))
    }
}

#[async_trait]
impl WallpaperSource for HttpWallpaperSource {
    async fn fetch_wallpapers(&self, identifier: &Identifier) -> RawOutcome {
        let url = self.endpoint(identifier);
        log_api_request!("fetch_wallpapers", identifier = %identifier, url = %url);

        let result = self.get_json(url).await;
        log_api_result!("fetch_wallpapers", result);

        match result {
            Ok((status, body)) => {
                tracing::info!(identifier = %identifier, status, has_body = body.is_some(), "Wallpaper service responded");
                RawOutcome::Response { status, body }
            }
            Err(ClientError::Transport(e)) if e.is_timeout() => {
                RawOutcome::TimedOut { detail: e.to_string() }
            }
            Err(e) => RawOutcome::Transport { detail: e.to_string() },
        }
    }

    async fn load_image(&self, url: &str) -> Result<(), ClientError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::ImageStatus(status.as_u16()));
        }
        // Drain the body so a truncated transfer counts as a failure too
        response.bytes().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::Path,
        http::StatusCode,
        routing::get,
        Json, Router,
    };
    use serde_json::json;
    use tokio::net::TcpListener;

    async fn serve(router: Router) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        Url::parse(&format!("http://{addr}")).unwrap()
    }

    fn source(base: Url) -> HttpWallpaperSource {
        HttpWallpaperSource::new(base, Some(Duration::from_secs(5))).unwrap()
    }

    #[test]
    fn endpoint_encodes_identifier_as_one_segment() {
        let base = Url::parse("http://example.test/prefix/").unwrap();
        let source = source(base);
        let id = Identifier::parse("a b/c?").unwrap();
        assert_eq!(
            source.endpoint(&id).as_str(),
            "http://example.test/prefix/api/wallpapers/a%20b%2Fc%3F"
        );
    }

    #[test]
    fn rejects_non_base_urls() {
        let base = Url::parse("mailto:someone@example.test").unwrap();
        assert!(matches!(
            HttpWallpaperSource::new(base, None),
            Err(ClientError::InvalidServerUrl { .. })
        ));
    }

    #[tokio::test]
    async fn fetch_reports_status_and_json_body() {
        let router = Router::new().route(
            "/api/wallpapers/:username",
            get(|Path(username): Path<String>| async move {
                if username == "ghost" {
                    (StatusCode::NOT_FOUND, Json(json!({"error": "MAL user not found"})))
                } else {
                    (StatusCode::OK, Json(json!({"message": format!("hi {username}")})))
                }
            }),
        );
        let source = source(serve(router).await);

        let outcome = source
            .fetch_wallpapers(&Identifier::parse("ghost").unwrap())
            .await;
        assert_eq!(
            outcome,
            RawOutcome::Response {
                status: 404,
                body: Some(json!({"error": "MAL user not found"})),
            }
        );

        let outcome = source
            .fetch_wallpapers(&Identifier::parse("spike").unwrap())
            .await;
        assert_eq!(
            outcome,
            RawOutcome::Response { status: 200, body: Some(json!({"message": "hi spike"})) }
        );
    }

    #[tokio::test]
    async fn non_json_body_is_reported_as_missing() {
        let router = Router::new().route(
            "/api/wallpapers/:username",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>") }),
        );
        let source = source(serve(router).await);

        let outcome = source
            .fetch_wallpapers(&Identifier::parse("spike").unwrap())
            .await;
        assert_eq!(outcome, RawOutcome::Response { status: 500, body: None });
    }

    #[tokio::test]
    async fn unreachable_server_is_transport_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source = source(Url::parse(&format!("http://{addr}")).unwrap());
        let outcome = source
            .fetch_wallpapers(&Identifier::parse("spike").unwrap())
            .await;
        assert!(matches!(outcome, RawOutcome::Transport { .. }));
    }

    #[tokio::test]
    async fn slow_service_is_a_timeout_not_a_transport_failure() {
        let router = Router::new().route(
            "/api/wallpapers/:username",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                Json(json!({}))
            }),
        );
        let base = serve(router).await;
        let source = HttpWallpaperSource::new(base, Some(Duration::from_millis(200))).unwrap();

        let outcome = source
            .fetch_wallpapers(&Identifier::parse("spike").unwrap())
            .await;
        assert!(matches!(outcome, RawOutcome::TimedOut { .. }), "got {outcome:?}");
    }

    #[tokio::test]
    async fn no_timeout_waits_for_a_slow_service() {
        let router = Router::new().route(
            "/api/wallpapers/:username",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(300)).await;
                Json(json!({}))
            }),
        );
        let source = HttpWallpaperSource::new(serve(router).await, None).unwrap();

        let outcome = source
            .fetch_wallpapers(&Identifier::parse("spike").unwrap())
            .await;
        assert_eq!(outcome, RawOutcome::Response { status: 200, body: Some(json!({})) });
    }

    #[tokio::test]
    async fn image_load_fails_on_error_status() {
        let router = Router::new()
            .route("/ok.jpg", get(|| async { (StatusCode::OK, "jpeg-bytes") }))
            .route("/gone.jpg", get(|| async { StatusCode::GONE }));
        let base = serve(router).await;
        let source = source(base.clone());

        assert!(source.load_image(base.join("ok.jpg").unwrap().as_str()).await.is_ok());
        assert!(matches!(
            source.load_image(base.join("gone.jpg").unwrap().as_str()).await,
            Err(ClientError::ImageStatus(410))
        ));
    }
}
