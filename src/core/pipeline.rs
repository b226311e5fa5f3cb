use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::batch::{self, BatchSummary};
use crate::core::events::EventEmitter;
use crate::core::filename;
use crate::core::http_client;
use crate::core::registry::ProviderRegistry;
use crate::core::resolver::{HttpMetadataSource, SourceResolver};
use crate::models::media::{DownloadRequest, MediaDescriptor, MediaKind, MediaVariant, Selection};
use crate::models::settings::{AppSettings, DownloadPathConfig};
use crate::platforms::traits::{MetadataSource, VariantSelector};
use crate::platforms::Platform;
use prenivdl_core::platforms::parse_host;
use prenivdl_core::PipelineError;

#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    /// The user declined at the selection step; nothing was transferred.
    Cancelled,
    Stored(PathBuf),
    Batch(BatchSummary),
}

/// classify → resolve → select → download, for one URL at a time.
pub struct Pipeline {
    resolver: SourceResolver,
    client: reqwest::Client,
    settings: AppSettings,
}

impl Pipeline {
    pub fn new(settings: AppSettings) -> anyhow::Result<Self> {
        let client = http_client::build_client(&settings)?;
        let registry = ProviderRegistry::with_api_base(&settings.providers.api_base);
        let source = Arc::new(HttpMetadataSource::new(client.clone()));
        Ok(Self::with_parts(registry, source, client, settings))
    }

    pub fn with_parts(
        registry: ProviderRegistry,
        source: Arc<dyn MetadataSource>,
        client: reqwest::Client,
        settings: AppSettings,
    ) -> Self {
        Self {
            resolver: SourceResolver::new(Arc::new(registry), source),
            client,
            settings,
        }
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn classify(&self, url: &str) -> Result<Platform, PipelineError> {
        Platform::classify(url.trim())
    }

    pub async fn resolve(&self, url: &str) -> Result<MediaDescriptor, PipelineError> {
        let platform = self.classify(url)?;
        self.resolver.resolve(platform, url.trim()).await
    }

    /// Resolves `url` as `platform` regardless of its host. The URL must
    /// still be a well-formed http(s) URL.
    pub async fn resolve_for(
        &self,
        platform: Platform,
        url: &str,
    ) -> Result<MediaDescriptor, PipelineError> {
        let url = url.trim();
        parse_host(url)?;
        if let Ok(detected) = Platform::classify(url) {
            if detected != platform {
                tracing::debug!("[pipeline] {} URL forced through {}", detected, platform);
            }
        }
        self.resolver.resolve(platform, url).await
    }

    /// Audio variants carry the configured size guard; other kinds are
    /// unbounded.
    pub fn plan_request(
        &self,
        descriptor: &MediaDescriptor,
        variant: &MediaVariant,
        dest_dir: &Path,
        index: Option<usize>,
    ) -> DownloadRequest {
        let max_size_bytes = match variant.kind {
            MediaKind::Audio => self.settings.download.max_audio_size_bytes,
            MediaKind::Video | MediaKind::Image => None,
        };
        DownloadRequest {
            variant: variant.clone(),
            dest_dir: dest_dir.to_path_buf(),
            filename: filename::build_filename(descriptor, variant, index),
            max_size_bytes,
        }
    }

    pub async fn run(
        &self,
        url: &str,
        forced: Option<Platform>,
        selector: &dyn VariantSelector,
        paths: &DownloadPathConfig,
        emitter: &dyn EventEmitter,
    ) -> Result<PipelineOutcome, PipelineError> {
        let descriptor = match forced {
            Some(platform) => self.resolve_for(platform, url).await?,
            None => self.resolve(url).await?,
        };

        let selection = selector.present_choices(&descriptor).await;
        let dest_dir = paths.current();

        match selection {
            Selection::Cancelled => Ok(PipelineOutcome::Cancelled),
            Selection::Single(variant) => {
                let request = self.plan_request(&descriptor, &variant, dest_dir, None);
                let path = batch::transfer(&self.client, &request, 1, 1, emitter).await?;
                Ok(PipelineOutcome::Stored(path))
            }
            Selection::All(variants) => {
                let requests: Vec<DownloadRequest> = variants
                    .iter()
                    .enumerate()
                    .map(|(i, v)| self.plan_request(&descriptor, v, dest_dir, Some(i + 1)))
                    .collect();
                let summary = batch::download_all(&self.client, &requests, emitter).await;
                Ok(PipelineOutcome::Batch(summary))
            }
        }
    }
}
