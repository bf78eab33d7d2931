use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::redirect::Policy;
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("invalid endpoint URL: {url}")]
    InvalidEndpoint { url: String },

    #[error("failed to build HTTP client: {source}")]
    HttpClientBuild {
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to setup proxy {proxy}: {source}")]
    ProxySetup {
        proxy: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("call to {function} failed: {source}")]
    Transport {
        function: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("call to {function} returned HTTP {status}")]
    Status { function: String, status: u16 },

    #[error("call to {function} returned an unreadable body: {source}")]
    Decode {
        function: String,
        #[source]
        source: reqwest::Error,
    },
}

// every backend function goes through one POST endpoint; the function
// name and its parameter bag travel in the request body
#[derive(Clone, Debug)]
pub struct RpcClient {
    endpoint: reqwest::Url,
    client: reqwest::Client,
}

impl RpcClient {
    pub fn new(
        endpoint: &str,
        timeout_seconds: usize,
        proxy: Option<&str>,
    ) -> Result<Self, RpcError> {
        let endpoint = reqwest::Url::parse(endpoint).map_err(|_| RpcError::InvalidEndpoint {
            url: endpoint.to_string(),
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let timeout = Duration::from_secs(timeout_seconds.try_into().unwrap_or(10));

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .redirect(Policy::limited(10))
            .timeout(timeout);

        if let Some(proxy) = proxy.map(str::trim).filter(|p| !p.is_empty()) {
            let proxy_setup = reqwest::Proxy::all(proxy).map_err(|e| RpcError::ProxySetup {
                proxy: proxy.to_string(),
                source: e,
            })?;
            builder = builder.proxy(proxy_setup);
        }

        let client = builder
            .build()
            .map_err(|e| RpcError::HttpClientBuild { source: e })?;

        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &reqwest::Url {
        &self.endpoint
    }

    pub async fn call(&self, function: &str, parameters: Value) -> Result<Value, RpcError> {
        let body = json!({
            "function": function,
            "parameters": parameters,
        });

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| RpcError::Transport {
                function: function.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RpcError::Status {
                function: function.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| RpcError::Decode {
                function: function.to_string(),
                source: e,
            })
    }
}
