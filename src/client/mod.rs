//! Client layer: hands the encoded request to the scoring service over HTTP.
//!
//! Response bodies are returned as received; decoding them is left to the caller.

use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::{Request, SerializationError, ValidationError};

const DEFAULT_HOST: &str = "minfraud.maxmind.com";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        auth: &'a Auth,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        auth: &'a Auth,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self
                .client
                .post(url)
                .basic_auth(&auth.account_id, Some(&auth.license_key))
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .header(reqwest::header::ACCEPT, "application/json")
                .body(body)
                .send()
                .await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Clone)]
/// Account id and license key, sent as HTTP basic auth.
pub struct Auth {
    account_id: String,
    license_key: String,
}

impl Auth {
    pub const ACCOUNT_ID_FIELD: &'static str = "account_id";
    pub const LICENSE_KEY_FIELD: &'static str = "license_key";

    /// Validate that both parts are non-empty after trimming.
    pub fn new(
        account_id: impl Into<String>,
        license_key: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            account_id: non_empty(account_id.into(), Self::ACCOUNT_ID_FIELD)?,
            license_key: non_empty(license_key.into(), Self::LICENSE_KEY_FIELD)?,
        })
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Auth")
            .field("account_id", &self.account_id)
            .field("license_key", &"<redacted>")
            .finish()
    }
}

fn non_empty(value: String, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(trimmed.to_owned())
}

/// The scoring services that accept a [`Request`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    Score,
    Insights,
    Factors,
}

impl Service {
    /// Path segment under `/minfraud/v2.0/`.
    pub fn path(self) -> &'static str {
        match self {
            Self::Score => "score",
            Self::Insights => "insights",
            Self::Factors => "factors",
        }
    }
}

#[derive(Debug, Clone)]
struct Endpoints {
    score: String,
    insights: String,
    factors: String,
}

impl Endpoints {
    fn for_host(host: &str) -> Self {
        let url = |service: Service| format!("https://{host}/minfraud/v2.0/{}", service.path());
        Self {
            score: url(Service::Score),
            insights: url(Service::Insights),
            factors: url(Service::Factors),
        }
    }

    fn get(&self, service: Service) -> &str {
        match service {
            Service::Score => &self.score,
            Service::Insights => &self.insights,
            Service::Factors => &self.factors,
        }
    }

    fn set(&mut self, service: Service, url: String) {
        match service {
            Service::Score => self.score = url,
            Service::Insights => self.insights = url,
            Service::Factors => self.factors = url,
        }
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`MinFraudClient`].
pub enum MinFraudError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code returned by the server.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// The request could not be encoded.
    #[error(transparent)]
    Serialization(#[from] SerializationError),

    /// One of the constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone)]
/// Builder for [`MinFraudClient`].
pub struct MinFraudClientBuilder {
    auth: Auth,
    endpoints: Endpoints,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl MinFraudClientBuilder {
    pub fn new(auth: Auth) -> Self {
        Self {
            auth,
            endpoints: Endpoints::for_host(DEFAULT_HOST),
            timeout: None,
            user_agent: None,
        }
    }

    /// Point every service at `https://{host}/minfraud/v2.0/...`.
    ///
    /// Overrides set earlier with [`MinFraudClientBuilder::endpoint`] are discarded.
    pub fn host(mut self, host: impl AsRef<str>) -> Self {
        self.endpoints = Endpoints::for_host(host.as_ref());
        self
    }

    /// Override the full URL for a single service.
    pub fn endpoint(mut self, service: Service, url: impl Into<String>) -> Self {
        self.endpoints.set(service, url.into());
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn build(self) -> Result<MinFraudClient, MinFraudError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| MinFraudError::Transport(Box::new(err)))?;

        Ok(MinFraudClient {
            auth: self.auth,
            endpoints: self.endpoints,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// Sends [`Request`]s to the minFraud web services.
///
/// No retries and no caching: each call is one HTTP POST.
pub struct MinFraudClient {
    auth: Auth,
    endpoints: Endpoints,
    http: Arc<dyn HttpTransport>,
}

impl MinFraudClient {
    /// Create a client for the default host.
    pub fn new(auth: Auth) -> Self {
        Self {
            auth,
            endpoints: Endpoints::for_host(DEFAULT_HOST),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    pub fn builder(auth: Auth) -> MinFraudClientBuilder {
        MinFraudClientBuilder::new(auth)
    }

    pub async fn score(&self, request: &Request) -> Result<String, MinFraudError> {
        self.post_raw(Service::Score, request).await
    }

    pub async fn insights(&self, request: &Request) -> Result<String, MinFraudError> {
        self.post_raw(Service::Insights, request).await
    }

    pub async fn factors(&self, request: &Request) -> Result<String, MinFraudError> {
        self.post_raw(Service::Factors, request).await
    }

    /// POST the encoded request to `service` and return the raw response body.
    ///
    /// Errors:
    /// - [`MinFraudError::Serialization`] if the request cannot be encoded,
    /// - [`MinFraudError::Transport`] for connection-level failures,
    /// - [`MinFraudError::HttpStatus`] for non-2xx responses.
    pub async fn post_raw(
        &self,
        service: Service,
        request: &Request,
    ) -> Result<String, MinFraudError> {
        let body = request.to_json()?;
        let url = self.endpoints.get(service);
        tracing::debug!(url, bytes = body.len(), "posting scoring request");

        let response = self
            .http
            .post_json(url, &self.auth, body)
            .await
            .map_err(MinFraudError::Transport)?;
        tracing::debug!(url, status = response.status, "scoring service responded");

        if !(200..=299).contains(&response.status) {
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(MinFraudError::HttpStatus {
                status: response.status,
                body,
            });
        }

        Ok(response.body)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use crate::domain::{Email, Event, EventType};

    use super::*;

    #[derive(Debug, Clone)]
    struct FakeTransport {
        state: Arc<Mutex<FakeTransportState>>,
    }

    #[derive(Debug)]
    struct FakeTransportState {
        last_url: Option<String>,
        last_credentials: Option<(String, String)>,
        last_body: Option<String>,
        response_status: u16,
        response_body: String,
    }

    impl FakeTransport {
        fn new(response_status: u16, response_body: impl Into<String>) -> Self {
            Self {
                state: Arc::new(Mutex::new(FakeTransportState {
                    last_url: None,
                    last_credentials: None,
                    last_body: None,
                    response_status,
                    response_body: response_body.into(),
                })),
            }
        }

        fn last_request(&self) -> (Option<String>, Option<(String, String)>, Option<String>) {
            let state = self.state.lock().unwrap();
            (
                state.last_url.clone(),
                state.last_credentials.clone(),
                state.last_body.clone(),
            )
        }
    }

    impl HttpTransport for FakeTransport {
        fn post_json<'a>(
            &'a self,
            url: &'a str,
            auth: &'a Auth,
            body: String,
        ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
            Box::pin(async move {
                let (status, body) = {
                    let mut state = self.state.lock().unwrap();
                    state.last_url = Some(url.to_owned());
                    state.last_credentials =
                        Some((auth.account_id.clone(), auth.license_key.clone()));
                    state.last_body = Some(body);
                    (state.response_status, state.response_body.clone())
                };
                Ok(HttpResponse { status, body })
            })
        }
    }

    fn make_client(transport: FakeTransport) -> MinFraudClient {
        MinFraudClient {
            auth: Auth::new("42", "secret").unwrap(),
            endpoints: Endpoints::for_host("example.invalid"),
            http: Arc::new(transport),
        }
    }

    fn sample_request() -> Request {
        Request::builder()
            .email(Email::builder().address("test@test.org").unwrap().build())
            .event(Event::builder().event_type(EventType::Survey).build())
            .build()
    }

    #[tokio::test]
    async fn score_posts_encoded_request_with_credentials() {
        let transport = FakeTransport::new(200, r#"{"risk_score":0.01}"#);
        let client = make_client(transport.clone());

        let body = client.score(&sample_request()).await.unwrap();
        assert_eq!(body, r#"{"risk_score":0.01}"#);

        let (url, credentials, sent) = transport.last_request();
        assert_eq!(
            url.as_deref(),
            Some("https://example.invalid/minfraud/v2.0/score")
        );
        assert_eq!(credentials, Some(("42".to_owned(), "secret".to_owned())));
        assert_eq!(
            sent.as_deref(),
            Some(r#"{"email":{"address":"test@test.org","domain":"test.org"},"event":{"type":"survey"}}"#)
        );
    }

    #[tokio::test]
    async fn each_service_uses_its_own_endpoint() {
        let transport = FakeTransport::new(200, "{}");
        let client = make_client(transport.clone());
        let request = Request::default();

        client.insights(&request).await.unwrap();
        let (url, _, body) = transport.last_request();
        assert_eq!(
            url.as_deref(),
            Some("https://example.invalid/minfraud/v2.0/insights")
        );
        assert_eq!(body.as_deref(), Some("{}"));

        client.factors(&request).await.unwrap();
        let (url, _, _) = transport.last_request();
        assert_eq!(
            url.as_deref(),
            Some("https://example.invalid/minfraud/v2.0/factors")
        );
    }

    #[tokio::test]
    async fn non_success_status_keeps_body() {
        let transport = FakeTransport::new(401, r#"{"code":"AUTHORIZATION_INVALID"}"#);
        let client = make_client(transport);

        let err = client.score(&sample_request()).await.unwrap_err();
        match err {
            MinFraudError::HttpStatus { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body.as_deref(), Some(r#"{"code":"AUTHORIZATION_INVALID"}"#));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_error_body_maps_to_none() {
        let transport = FakeTransport::new(503, "  ");
        let client = make_client(transport);

        let err = client.score(&sample_request()).await.unwrap_err();
        assert!(matches!(
            err,
            MinFraudError::HttpStatus {
                status: 503,
                body: None
            }
        ));
    }

    #[test]
    fn auth_rejects_empty_parts() {
        assert_eq!(
            Auth::new("  ", "key").unwrap_err(),
            ValidationError::Empty {
                field: "account_id"
            }
        );
        assert_eq!(
            Auth::new("42", "").unwrap_err(),
            ValidationError::Empty {
                field: "license_key"
            }
        );
    }

    #[test]
    fn auth_debug_hides_license_key() {
        let auth = Auth::new("42", "secret").unwrap();
        let debug = format!("{auth:?}");
        assert!(debug.contains("42"));
        assert!(!debug.contains("secret"));
    }

    #[test]
    fn builder_endpoint_overrides_are_applied() {
        let client = MinFraudClient::builder(Auth::new("42", "key").unwrap())
            .host("sandbox.maxmind.com")
            .endpoint(Service::Factors, "https://example.invalid/factors")
            .build()
            .unwrap();
        assert_eq!(
            client.endpoints.get(Service::Score),
            "https://sandbox.maxmind.com/minfraud/v2.0/score"
        );
        assert_eq!(
            client.endpoints.get(Service::Factors),
            "https://example.invalid/factors"
        );

        let client = MinFraudClient::new(Auth::new("42", "key").unwrap());
        assert_eq!(
            client.endpoints.get(Service::Insights),
            "https://minfraud.maxmind.com/minfraud/v2.0/insights"
        );
    }
}
