use crate::domain::error::WolframError;
use crate::domain::model::QueryResult;
use crate::domain::traits::AnswerEngine;
use crate::infrastructure::config::Config;
use crate::infrastructure::network::http::create_client;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Request};

/// Wolfram|Alpha v2.0 query endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.wolframalpha.com/v2/query";

/// Wolfram|Alpha v2.0 client
///
/// The appid is given once at construction and sent with every query.
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct WolframClient {
    client: Client,
    app_id: String,
    endpoint: String,
}

impl WolframClient {
    pub fn new(app_id: impl Into<String>) -> Result<Self, WolframError> {
        let client = create_client(&Config::default())?;
        Ok(Self::with_http_client(app_id, client))
    }

    /// Reuse an existing `reqwest::Client` (and its connection pool).
    pub fn with_http_client(app_id: impl Into<String>, client: Client) -> Self {
        Self {
            client,
            app_id: app_id.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Build a client from the config file settings; the appid must be set.
    pub fn from_config(config: &Config) -> Result<Self, WolframError> {
        let app_id = config
            .app_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| WolframError::Config("Wolfram|Alpha appid not configured".to_string()))?;
        let client = create_client(config)?;
        Ok(Self::with_http_client(app_id, client))
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Build the GET request without sending it.
    ///
    /// Caller parameters come first and may repeat a key (several
    /// `assumption` values, for instance), followed by `input` and `appid`.
    pub fn request(&self, input: &str, params: &[(&str, &str)]) -> Result<Request, WolframError> {
        let mut pairs: Vec<(&str, &str)> = params.to_vec();
        pairs.push(("input", input));
        pairs.push(("appid", self.app_id.as_str()));

        Ok(self.client.get(&self.endpoint).query(&pairs).build()?)
    }

    /// Run a query and return the raw XML body.
    pub async fn query_raw(
        &self,
        input: &str,
        params: &[(&str, &str)],
    ) -> Result<String, WolframError> {
        let request = self.request(input, params)?;
        tracing::debug!(input, extra_params = params.len(), "querying wolfram|alpha");

        let response = self.client.execute(request).await?.error_for_status()?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        if !content_type.starts_with("text/xml") {
            tracing::warn!(content_type, "unexpected content type from wolfram|alpha");
        }

        let body = response.text().await?;
        tracing::debug!(bytes = body.len(), "received response");
        Ok(body)
    }

    /// Query Wolfram|Alpha and parse the response.
    ///
    /// Extra parameters are passed through untouched, e.g. assumptions:
    /// `client.query("pi", &[("assumption", "*C.pi-_*NamedConstant-")])`.
    /// A response carrying an `<error>` element fails with
    /// [`WolframError::Api`].
    pub async fn query(
        &self,
        input: &str,
        params: &[(&str, &str)],
    ) -> Result<QueryResult, WolframError> {
        let body = self.query_raw(input, params).await?;
        let result = QueryResult::from_xml(&body)?;

        if let Some(error) = result.error() {
            return Err(error.into());
        }

        Ok(result)
    }
}

#[async_trait]
impl AnswerEngine for WolframClient {
    async fn ask(
        &self,
        input: &str,
        params: &[(&str, &str)],
    ) -> Result<QueryResult, WolframError> {
        self.query(input, params).await
    }
}
