//! HTTP client for the INSW commodity API.
//!
//! Every tool call builds its own [`CommodityClient`] and issues exactly one
//! GET request. All failures come back as a typed [`UpstreamError`] so the
//! caller can log the cause before collapsing it into the user-facing
//! message.

use reqwest::{
    StatusCode, Url,
    header::{ACCEPT, AUTHORIZATION, ORIGIN, USER_AGENT},
};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::core::config::{ApiConfig, Config, CredentialsConfig};

/// Header carrying the INSW API key.
pub const API_KEY_HEADER: &str = "x-insw-key";

/// Page size requested from the search endpoint.
pub const SEARCH_PAGE_SIZE: u32 = 10;

/// Offset requested from the search endpoint.
pub const SEARCH_OFFSET: u32 = 0;

/// Why an upstream request produced no usable JSON.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The request did not complete within the configured timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// DNS, TCP or TLS failure before a response arrived.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The API answered with a non-2xx status.
    #[error("upstream returned HTTP {status}")]
    HttpStatus { status: StatusCode },

    /// The body was not valid JSON.
    #[error("response body is not valid JSON: {0}")]
    Decode(String),

    /// The body decoded to nothing usable (`null`, `{}`, `[]`, `""`, `0` or `false`).
    #[error("response body is empty")]
    Empty,

    /// The request could not be built (bad URL, header value or TLS setup).
    #[error("invalid request: {0}")]
    Request(String),
}

impl UpstreamError {
    /// Short, stable label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout(_) => "timeout",
            Self::Connection(_) => "connection",
            Self::HttpStatus { .. } => "http_status",
            Self::Decode(_) => "decode",
            Self::Empty => "empty",
            Self::Request(_) => "request",
        }
    }
}

#[derive(Serialize)]
struct DetailQuery<'a> {
    hs_code: &'a str,
}

#[derive(Serialize)]
struct SearchQuery<'a> {
    keyword: &'a str,
    size: u32,
    from: u32,
}

/// Client for the two INSW commodity endpoints.
#[derive(Debug, Clone)]
pub struct CommodityClient {
    api: ApiConfig,
    credentials: CredentialsConfig,
}

impl CommodityClient {
    pub fn new(api: ApiConfig, credentials: CredentialsConfig) -> Self {
        Self { api, credentials }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api.clone(), config.credentials.clone())
    }

    /// URL of the detail endpoint for `hscode`.
    pub fn detail_url(&self, hscode: &str) -> Result<Url, UpstreamError> {
        with_query(&self.api.detail_url, &DetailQuery { hs_code: hscode })
    }

    /// URL of the search endpoint for `query`, first page only.
    pub fn search_url(&self, query: &str) -> Result<Url, UpstreamError> {
        with_query(
            &self.api.search_url,
            &SearchQuery {
                keyword: query,
                size: SEARCH_PAGE_SIZE,
                from: SEARCH_OFFSET,
            },
        )
    }

    /// Issue a single GET to `url` and decode the JSON body.
    ///
    /// A body that decodes to an empty value is reported as [`UpstreamError::Empty`].
    #[instrument(skip_all, fields(url = %url))]
    pub async fn execute(&self, url: Url) -> Result<Value, UpstreamError> {
        let timeout = self.api.timeout;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| UpstreamError::Request(format!("failed to create HTTP client: {e}")))?;

        let mut request = client
            .get(url)
            .header(USER_AGENT, &self.api.user_agent)
            .header(ACCEPT, "*/*")
            .header(AUTHORIZATION, &self.credentials.authorization)
            .header(API_KEY_HEADER, &self.credentials.api_key);

        if !self.api.origin.is_empty() {
            request = request.header(ORIGIN, &self.api.origin);
        }

        debug!("Sending request to commodity API");

        let response = request
            .send()
            .await
            .map_err(|e| classify(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::HttpStatus { status });
        }

        let body = response.bytes().await.map_err(|e| classify(e, timeout))?;

        debug!("Commodity API response received: {} bytes", body.len());

        let value: Value =
            serde_json::from_slice(&body).map_err(|e| UpstreamError::Decode(e.to_string()))?;

        if is_empty(&value) {
            return Err(UpstreamError::Empty);
        }

        Ok(value)
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

fn with_query<T: Serialize>(base: &str, query: &T) -> Result<Url, UpstreamError> {
    let mut url = Url::parse(base)
        .map_err(|e| UpstreamError::Request(format!("invalid endpoint URL '{base}': {e}")))?;
    let encoded = serde_urlencoded::to_string(query)
        .map_err(|e| UpstreamError::Request(format!("failed to encode query: {e}")))?;
    url.set_query(Some(&encoded));
    Ok(url)
}

fn classify(err: reqwest::Error, timeout: Duration) -> UpstreamError {
    if err.is_timeout() {
        UpstreamError::Timeout(timeout)
    } else if err.is_builder() {
        UpstreamError::Request(err.to_string())
    } else if err.is_decode() || err.is_body() {
        UpstreamError::Decode(err.to_string())
    } else {
        UpstreamError::Connection(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base: &str) -> CommodityClient {
        let api = ApiConfig {
            detail_url: format!("{base}/api-prod-ba/ref/hscode/komoditas"),
            search_url: format!("{base}/api/cms/hscode"),
            timeout: Duration::from_millis(500),
            ..ApiConfig::default()
        };
        let credentials = CredentialsConfig {
            authorization: "Basic test-token".to_string(),
            api_key: "test-key".to_string(),
        };
        CommodityClient::new(api, credentials)
    }

    #[test]
    fn test_detail_url_against_default_endpoint() {
        let client = CommodityClient::from_config(&Config::default());
        let url = client.detail_url("01019000").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.insw.go.id/api-prod-ba/ref/hscode/komoditas?hs_code=01019000"
        );
    }

    #[test]
    fn test_search_url_against_default_endpoint() {
        let client = CommodityClient::from_config(&Config::default());
        let url = client.search_url("mobil").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.insw.go.id/api/cms/hscode?keyword=mobil&size=10&from=0"
        );
    }

    #[test]
    fn test_search_url_encodes_query() {
        let client = CommodityClient::from_config(&Config::default());
        let url = client.search_url("live cattle&size=999").unwrap();
        assert_eq!(url.query(), Some("keyword=live+cattle%26size%3D999&size=10&from=0"));

        let pairs: Vec<_> = url.query_pairs().collect();
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[0].1, "live cattle&size=999");
    }

    #[test]
    fn test_search_url_with_empty_query() {
        let client = CommodityClient::from_config(&Config::default());
        let url = client.search_url("").unwrap();
        assert_eq!(url.query(), Some("keyword=&size=10&from=0"));
    }

    #[test]
    fn test_invalid_base_url_is_request_error() {
        let api = ApiConfig {
            detail_url: "not a url".to_string(),
            ..ApiConfig::default()
        };
        let client = CommodityClient::new(api, CredentialsConfig::default());
        let err = client.detail_url("0101").unwrap_err();
        assert_eq!(err.kind(), "request");
    }

    #[tokio::test]
    async fn test_execute_sends_header_bundle() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api-prod-ba/ref/hscode/komoditas"))
            .and(query_param("hs_code", "0101"))
            .and(header("user-agent", "hscode-cut/1.0"))
            .and(header("accept", "*/*"))
            .and(header("authorization", "Basic test-token"))
            .and(header("x-insw-key", "test-key"))
            .and(header("origin", "https://insw.go.id"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"data": {}}"#))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let url = client.detail_url("0101").unwrap();
        let value = client.execute(url).await.unwrap();

        assert_eq!(value, serde_json::json!({"data": {}}));
    }

    #[tokio::test]
    async fn test_execute_sends_empty_credentials() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/cms/hscode"))
            .and(|req: &wiremock::Request| {
                req.headers.get("authorization").map(|v| v.is_empty()) == Some(true)
            })
            .and(|req: &wiremock::Request| {
                req.headers.get("x-insw-key").map(|v| v.is_empty()) == Some(true)
            })
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"data": [1]}"#))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = CommodityClient::new(
            test_client(&mock_server.uri()).api,
            CredentialsConfig::default(),
        );
        let url = client.search_url("kopi").unwrap();
        let value = client.execute(url).await.unwrap();

        assert_eq!(value, serde_json::json!({"data": [1]}));
    }

    #[tokio::test]
    async fn test_execute_empty_bodies() {
        for body in ["null", "{}", "[]", "\"\"", "0", "false"] {
            let mock_server = MockServer::start().await;

            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(200).set_body_string(body))
                .mount(&mock_server)
                .await;

            let client = test_client(&mock_server.uri());
            let url = client.detail_url("0101").unwrap();
            let err = client.execute(url).await.unwrap_err();

            assert!(matches!(err, UpstreamError::Empty), "body {body}");
        }
    }

    #[test]
    fn test_is_empty() {
        assert!(is_empty(&serde_json::json!(0.0)));
        assert!(!is_empty(&serde_json::json!({"data": null})));
        assert!(!is_empty(&serde_json::json!([0])));
        assert!(!is_empty(&serde_json::json!(true)));
        assert!(!is_empty(&serde_json::json!(1)));
    }

    #[tokio::test]
    async fn test_execute_non_success_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string(r#"{"error": "boom"}"#))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let url = client.detail_url("0101").unwrap();
        let err = client.execute(url).await.unwrap_err();

        assert!(matches!(
            err,
            UpstreamError::HttpStatus { status } if status == StatusCode::INTERNAL_SERVER_ERROR
        ));
    }

    #[tokio::test]
    async fn test_execute_malformed_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let url = client.search_url("kopi").unwrap();
        let err = client.execute(url).await.unwrap_err();

        assert_eq!(err.kind(), "decode");
    }

    #[tokio::test]
    async fn test_execute_timeout() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"data": {}}"#)
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let url = client.detail_url("0101").unwrap();
        let err = client.execute(url).await.unwrap_err();

        assert!(matches!(err, UpstreamError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_execute_connection_refused() {
        // Port 1 (tcpmux) is never served in test environments.
        let client = test_client("http://127.0.0.1:1");
        let url = client.detail_url("0101").unwrap();
        let err = client.execute(url).await.unwrap_err();

        assert_eq!(err.kind(), "connection");
    }
}
