use serde::Deserialize;

use crate::models::media::{DescriptorBuilder, MediaDescriptor, MediaKind, MediaVariant};
use crate::platforms::{lenient, lenient_default, lenient_list, Platform};
use prenivdl_core::PipelineError;

/// Multi-field extractor response: a flat list of play URLs, best first.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UrlsData {
    #[serde(deserialize_with = "lenient_list")]
    pub urls: Vec<String>,
    #[serde(deserialize_with = "lenient_default")]
    pub metadata: UrlsMetadata,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UrlsMetadata {
    #[serde(deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub creator: Option<String>,
}

/// REST aggregator response: links grouped under `download`, plus stats.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DownloadData {
    #[serde(deserialize_with = "lenient_default")]
    pub download: DownloadLinks,
    #[serde(deserialize_with = "lenient_default")]
    pub metadata: DownloadMetadata,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DownloadLinks {
    #[serde(deserialize_with = "lenient_list")]
    pub video: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DownloadMetadata {
    #[serde(deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub description: Option<String>,
    pub stats: Option<serde_json::Value>,
    #[serde(deserialize_with = "lenient_list")]
    pub hashtags: Vec<String>,
}

fn video_variants(urls: Vec<String>) -> impl Iterator<Item = MediaVariant> {
    urls.into_iter()
        .filter(|u| !u.trim().is_empty())
        .enumerate()
        .map(|(i, url)| {
            MediaVariant::new(
                MediaKind::Video,
                url,
                format!("Video Quality {}", i + 1),
                Some("mp4"),
            )
        })
}

pub fn urls_complete(data: &UrlsData) -> bool {
    data.urls.iter().any(|u| !u.trim().is_empty())
}

pub fn download_complete(data: &DownloadData) -> bool {
    data.download.video.iter().any(|u| !u.trim().is_empty())
}

pub fn normalize_urls(data: UrlsData) -> Result<MediaDescriptor, PipelineError> {
    let meta = data.metadata;
    let mut builder = DescriptorBuilder::new(Platform::TikTok)
        .title(meta.title)
        .author(meta.creator)
        .meta("description", meta.description);

    for variant in video_variants(data.urls) {
        builder = builder.variant(variant);
    }
    builder.build()
}

pub fn normalize_download(data: DownloadData) -> Result<MediaDescriptor, PipelineError> {
    let meta = data.metadata;
    let mut builder = DescriptorBuilder::new(Platform::TikTok)
        .title(meta.title)
        .meta("description", meta.description);

    if let Some(stats) = meta.stats.as_ref().and_then(|s| s.as_object()) {
        for (field, key) in [
            ("likeCount", "likes"),
            ("playCount", "views"),
            ("commentCount", "comments"),
            ("shareCount", "shares"),
        ] {
            if let Some(value) = stats.get(field) {
                builder = builder.meta(key, value.clone());
            }
        }
    }

    if !meta.hashtags.is_empty() {
        builder = builder.meta("hashtags", meta.hashtags);
    }

    for variant in video_variants(data.download.video) {
        builder = builder.variant(variant);
    }
    builder.build()
}
