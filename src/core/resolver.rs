use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;

use crate::core::normalizer::{self, provider_message};
use crate::core::registry::ProviderRegistry;
use crate::models::media::MediaDescriptor;
use crate::platforms::traits::MetadataSource;
use crate::platforms::Platform;
use prenivdl_core::PipelineError;

const METADATA_TIMEOUT: Duration = Duration::from_secs(30);
const EXHAUSTED: &str = "all APIs failed";

/// Fetches endpoint JSON over HTTP.
pub struct HttpMetadataSource {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpMetadataSource {
    pub fn new(client: reqwest::Client) -> Self {
        Self::with_timeout(client, METADATA_TIMEOUT)
    }

    pub fn with_timeout(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

#[async_trait]
impl MetadataSource for HttpMetadataSource {
    async fn fetch_json(&self, url: &str) -> anyhow::Result<serde_json::Value> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| provider_message(&v));
            return Err(match message {
                Some(m) => anyhow!(m),
                None => anyhow!("API Error: HTTP {}", status.as_u16()),
            });
        }

        serde_json::from_str(&body).map_err(|e| anyhow!("Invalid JSON response: {}", e))
    }
}

/// Walks a platform's endpoint chain until one response is accepted.
pub struct SourceResolver {
    registry: Arc<ProviderRegistry>,
    source: Arc<dyn MetadataSource>,
}

impl SourceResolver {
    pub fn new(registry: Arc<ProviderRegistry>, source: Arc<dyn MetadataSource>) -> Self {
        Self { registry, source }
    }

    /// Only the first accepted response is normalized. Per-endpoint failures
    /// stay local; exhaustion reports the last reason seen.
    pub async fn resolve(
        &self,
        platform: Platform,
        url: &str,
    ) -> Result<MediaDescriptor, PipelineError> {
        let chain = self.registry.endpoints_for(platform);
        let mut last_error: Option<String> = None;

        for endpoint in chain {
            let request_url = endpoint.request_url(url);
            tracing::debug!(
                "[resolver] {} endpoint #{} ({})",
                platform,
                endpoint.rank,
                endpoint.schema
            );

            let raw = match self.source.fetch_json(&request_url).await {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::warn!("[resolver] {} endpoint #{} failed: {}", platform, endpoint.rank, e);
                    last_error = Some(e.to_string());
                    continue;
                }
            };

            match normalizer::accept(&raw, endpoint.schema) {
                Ok(payload) => {
                    tracing::info!(
                        "[resolver] {} resolved via endpoint #{} ({})",
                        platform,
                        endpoint.rank,
                        endpoint.schema
                    );
                    return payload.into_descriptor();
                }
                Err(reason) => {
                    tracing::warn!(
                        "[resolver] {} endpoint #{} rejected: {}",
                        platform,
                        endpoint.rank,
                        reason
                    );
                    last_error = Some(reason);
                }
            }
        }

        Err(PipelineError::ResolutionFailed(
            last_error.unwrap_or_else(|| EXHAUSTED.to_string()),
        ))
    }
}
