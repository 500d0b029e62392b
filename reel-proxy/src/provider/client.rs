//! Provider REST client
//!
//! Issues the operation-creation, operation-status and download calls. The
//! credential is passed per call and sent as the `x-goog-api-key` header, so
//! it never appears in URLs or logs.
//!
//! Redirects are followed by hand: the key is attached only to hops that stay
//! on the provider host.

use reel_core::domain::operation::Operation;
use reel_core::dto::video::GenerateVideoBody;
use reqwest::{Client, Url, header, redirect};
use serde::de::DeserializeOwned;

use crate::provider::error::ProviderError;
use crate::provider::types::{PredictRequest, ProviderOperation};

const API_KEY_HEADER: &str = "x-goog-api-key";

const MAX_REDIRECTS: usize = 10;

/// HTTP client for the provider API
#[derive(Debug, Clone)]
pub struct ProviderClient {
    /// Base URL including the API version (e.g. ".../v1beta")
    base_url: String,
    client: Client,
}

impl ProviderClient {
    /// Creates a client that never follows redirects on its own
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderError> {
        let client = Client::builder().redirect(redirect::Policy::none()).build()?;
        Ok(Self::with_client(base_url, client))
    }

    /// Wraps an existing HTTP client
    ///
    /// `client` must not follow redirects itself, or the credential can reach
    /// whatever host a download redirects to.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Starts a long-running generation
    pub async fn create_operation(
        &self,
        api_key: &str,
        body: &GenerateVideoBody,
    ) -> Result<Operation, ProviderError> {
        let url = format!("{}/models/{}:predictLongRunning", self.base_url, body.model);
        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, api_key)
            .json(&PredictRequest::from(body))
            .send()
            .await?;

        let operation: ProviderOperation = Self::handle_response(response).await?;
        Ok(operation.into())
    }

    /// Fetches the current state of an operation by name
    pub async fn get_operation(&self, api_key: &str, name: &str) -> Result<Operation, ProviderError> {
        let url = format!("{}/{}", self.base_url, name.trim_start_matches('/'));
        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, api_key)
            .send()
            .await?;

        let operation: ProviderOperation = Self::handle_response(response).await?;
        Ok(operation.into())
    }

    /// Opens the download of a generated video
    ///
    /// The response is returned unread so the caller can stream the body.
    /// Redirects off the provider host (signed storage URLs) are followed
    /// without the credential.
    pub async fn download(&self, api_key: &str, uri: &str) -> Result<reqwest::Response, ProviderError> {
        let mut url = Url::parse(uri).map_err(|e| ProviderError::ParseError(e.to_string()))?;
        let mut redirects = 0;

        let response = loop {
            let mut request = self.client.get(url.clone());
            if self.is_provider_url(&url) {
                request = request.header(API_KEY_HEADER, api_key);
            }
            let response = request.send().await?;

            let Some(next) = redirect_target(&response) else {
                break response;
            };

            redirects += 1;
            if redirects > MAX_REDIRECTS {
                return Err(ProviderError::Status {
                    status: response.status().as_u16(),
                    message: format!("too many redirects downloading {}", uri),
                });
            }

            tracing::debug!(
                "Download redirected to {} (credential {})",
                next.host_str().unwrap_or_default(),
                if self.is_provider_url(&next) { "kept" } else { "dropped" }
            );
            url = next;
        };

        if !response.status().is_success() {
            return Err(ProviderError::from_response(response).await);
        }

        Ok(response)
    }

    /// Whether `uri` points at the provider, and may therefore carry the key
    pub fn is_provider_uri(&self, uri: &str) -> bool {
        Url::parse(uri).is_ok_and(|target| self.is_provider_url(&target))
    }

    fn is_provider_url(&self, target: &Url) -> bool {
        let Ok(base) = Url::parse(&self.base_url) else {
            return false;
        };

        target.scheme() == base.scheme()
            && target.host_str() == base.host_str()
            && target.port_or_known_default() == base.port_or_known_default()
    }

    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ProviderError> {
        if !response.status().is_success() {
            return Err(ProviderError::from_response(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }
}

/// Absolute URL of the next hop, if `response` is a redirect with a Location
fn redirect_target(response: &reqwest::Response) -> Option<Url> {
    if !response.status().is_redirection() {
        return None;
    }

    let location = response.headers().get(header::LOCATION)?.to_str().ok()?;
    response.url().join(location).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Json, Router,
        extract::{Path, State},
        http::{HeaderMap, StatusCode},
        response::{IntoResponse, Redirect},
        routing::{get, post},
    };
    use std::sync::{Arc, Mutex};
    use reel_core::domain::request::{AspectRatio, GenerationRequest, Resolution, VideoMode};
    use reel_core::prompt::build_generate_body;
    use serde_json::{Value, json};

    fn authorized(headers: &HeaderMap) -> bool {
        headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok()) == Some("test-key")
    }

    async fn predict(
        Path(target): Path<String>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> impl IntoResponse {
        if !authorized(&headers) {
            return (
                StatusCode::FORBIDDEN,
                Json(json!({ "error": { "code": 403, "message": "API key not valid" } })),
            );
        }
        let model = target.trim_end_matches(":predictLongRunning");
        (
            StatusCode::OK,
            Json(json!({
                "name": format!("models/{}/operations/op-1", model),
                "echo": body,
            })),
        )
    }

    async fn status(Path((model, id)): Path<(String, String)>) -> Json<Value> {
        Json(json!({
            "name": format!("models/{}/operations/{}", model, id),
            "done": true,
            "response": {
                "generateVideoResponse": {
                    "generatedSamples": [{ "video": { "uri": "http://files/v.mp4" } }]
                }
            }
        }))
    }

    async fn spawn_provider() -> String {
        let app = Router::new()
            .route("/v1beta/models/{target}", post(predict))
            .route("/v1beta/models/{model}/operations/{id}", get(status));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/v1beta", addr)
    }

    fn body() -> GenerateVideoBody {
        build_generate_body(&GenerationRequest::new(
            VideoMode::TextToVideo,
            "a red fox in snow",
            Resolution::P720,
            AspectRatio::Portrait,
        ))
    }

    #[tokio::test]
    async fn test_create_operation_posts_to_model() {
        let client = ProviderClient::new(spawn_provider().await).unwrap();
        let op = client.create_operation("test-key", &body()).await.unwrap();
        assert_eq!(op.name, "models/veo-3.1-fast-generate-preview/operations/op-1");
        assert!(!op.done);
    }

    #[tokio::test]
    async fn test_create_operation_surfaces_provider_message() {
        let client = ProviderClient::new(spawn_provider().await).unwrap();
        let err = client.create_operation("wrong-key", &body()).await.unwrap_err();
        assert!(
            matches!(err, ProviderError::Status { status: 403, ref message } if message == "API key not valid")
        );
    }

    #[tokio::test]
    async fn test_get_operation_maps_response() {
        let client = ProviderClient::new(spawn_provider().await).unwrap();
        let op = client
            .get_operation("test-key", "models/veo/operations/op-1")
            .await
            .unwrap();
        assert!(op.done);
        assert_eq!(op.video_uri(), Some("http://files/v.mp4"));
    }

    async fn spawn(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    type SeenKeys = Arc<Mutex<Vec<Option<String>>>>;

    /// Storage host that records which credential, if any, each request carried
    async fn spawn_storage() -> (String, SeenKeys) {
        let seen = SeenKeys::default();
        let app = Router::new()
            .route(
                "/signed/{file}",
                get(|State(seen): State<SeenKeys>, headers: HeaderMap| async move {
                    let key = headers
                        .get(API_KEY_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    seen.lock().unwrap().push(key);
                    "MP4"
                }),
            )
            .with_state(Arc::clone(&seen));
        (spawn(app).await, seen)
    }

    async fn provider_file(headers: HeaderMap) -> impl IntoResponse {
        if !authorized(&headers) {
            return (StatusCode::FORBIDDEN, "API key not valid").into_response();
        }
        "MP4".into_response()
    }

    #[tokio::test]
    async fn test_download_redirect_to_other_host_drops_key() {
        let (storage, seen) = spawn_storage().await;
        let target = format!("{}/signed/v.mp4", storage);
        let provider = spawn(Router::new().route(
            "/v1beta/files/{file}",
            get(move |headers: HeaderMap| {
                let target = target.clone();
                async move {
                    if !authorized(&headers) {
                        return (StatusCode::FORBIDDEN, "API key not valid").into_response();
                    }
                    Redirect::temporary(&target).into_response()
                }
            }),
        ))
        .await;

        let client = ProviderClient::new(format!("{}/v1beta", provider)).unwrap();
        let response = client
            .download("test-key", &format!("{}/v1beta/files/v.mp4:download?alt=media", provider))
            .await
            .unwrap();

        assert_eq!(response.bytes().await.unwrap().as_ref(), b"MP4");
        assert_eq!(*seen.lock().unwrap(), vec![None]);
    }

    #[tokio::test]
    async fn test_download_redirect_on_provider_keeps_key() {
        let provider = spawn(
            Router::new()
                .route(
                    "/v1beta/files/moved",
                    get(|| async { Redirect::temporary("/v1beta/files/v.mp4") }),
                )
                .route("/v1beta/files/v.mp4", get(provider_file)),
        )
        .await;

        let client = ProviderClient::new(format!("{}/v1beta", provider)).unwrap();
        let response = client
            .download("test-key", &format!("{}/v1beta/files/moved", provider))
            .await
            .unwrap();

        assert_eq!(response.bytes().await.unwrap().as_ref(), b"MP4");
    }

    #[tokio::test]
    async fn test_download_gives_up_on_redirect_loop() {
        let provider = spawn(Router::new().route(
            "/v1beta/files/loop",
            get(|| async { Redirect::temporary("/v1beta/files/loop") }),
        ))
        .await;

        let client = ProviderClient::new(format!("{}/v1beta", provider)).unwrap();
        let err = client
            .download("test-key", &format!("{}/v1beta/files/loop", provider))
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::Status { status: 307, .. }));
    }

    #[test]
    fn test_is_provider_uri() {
        let client = ProviderClient::new("https://generativelanguage.googleapis.com/v1beta/").unwrap();
        assert_eq!(client.base_url(), "https://generativelanguage.googleapis.com/v1beta");
        assert!(client.is_provider_uri(
            "https://generativelanguage.googleapis.com/v1beta/files/abc:download?alt=media"
        ));
        assert!(!client.is_provider_uri("https://attacker.example/steal?alt=media"));
        assert!(!client.is_provider_uri("http://generativelanguage.googleapis.com/v1beta/files/abc"));
        assert!(!client.is_provider_uri("not a url"));
    }
}
