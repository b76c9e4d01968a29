// src/gateway.rs

//! Content gateway: the single place that talks HTTP to upstream providers.
//!
//! Every call is one GET with no retries. Transport failures become
//! `GatewayError { status: 0 }`, non-success statuses become
//! `GatewayError { status }`, and bodies that do not decode become
//! `AppError::Decode`.

use reqwest::Client;
use reqwest::header::CACHE_CONTROL;
use serde::de::DeserializeOwned;

use crate::error::{AppError, GatewayError, Result};
use crate::utils::url::{display_path, join_path};

/// Credential attached to every request as a query parameter.
#[derive(Clone)]
struct QueryCredential {
    param: String,
    value: String,
}

/// HTTP client bound to one upstream base URL.
#[derive(Clone)]
pub struct ContentGateway {
    client: Client,
    base_url: String,
    credential: Option<QueryCredential>,
}

impl ContentGateway {
    /// Create a gateway for `base_url` sharing the given client.
    pub fn new(client: Client, base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        // Reject unusable endpoints at construction rather than per call.
        join_path(&base_url, "")?;
        Ok(Self {
            client,
            base_url,
            credential: None,
        })
    }

    /// Send `value` as query parameter `param` on every request.
    ///
    /// The credential is never included in error paths or logs.
    pub fn with_query_credential(mut self, param: &str, value: &str) -> Self {
        self.credential = Some(QueryCredential {
            param: param.to_string(),
            value: value.to_string(),
        });
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` with `params` and decode the JSON body.
    ///
    /// `cache_hint_secs` is forwarded as `Cache-Control: max-age` and has no
    /// effect on the result.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
        cache_hint_secs: u64,
    ) -> Result<T> {
        // The credential is appended below, never to `shown`.
        let shown = display_path(path, params);
        let mut url = join_path(&self.base_url, path)?;

        if self.credential.is_some() || !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            if let Some(credential) = &self.credential {
                pairs.append_pair(&credential.param, &credential.value);
            }
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }

        log::debug!("GET {} (cache hint {}s)", shown, cache_hint_secs);

        let response = self
            .client
            .get(url)
            .header(CACHE_CONTROL, format!("max-age={cache_hint_secs}"))
            .send()
            .await
            .map_err(|e| {
                log::debug!("No response for {}: {}", shown, e);
                GatewayError::unreachable(&shown)
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError {
                status: status.as_u16(),
                path: shown,
            }
            .into());
        }

        let body = response.bytes().await.map_err(|e| {
            log::debug!("Body read failed for {}: {}", shown, e);
            GatewayError::unreachable(&shown)
        })?;

        serde_json::from_slice(&body).map_err(|e| AppError::decode(shown, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unparsable_base_url() {
        assert!(ContentGateway::new(Client::new(), "::nope::").is_err());
    }

    #[test]
    fn keeps_base_url() {
        let gateway = ContentGateway::new(Client::new(), "http://localhost:8000").unwrap();
        assert_eq!(gateway.base_url(), "http://localhost:8000");
    }
}
