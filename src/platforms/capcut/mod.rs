use serde::Deserialize;

use crate::models::media::{DescriptorBuilder, MediaDescriptor, MediaKind, MediaVariant};
use crate::platforms::{has_text, lenient, lenient_list, Platform};
use prenivdl_core::PipelineError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CapcutData {
    #[serde(deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub author: Option<String>,
    /// Milliseconds.
    #[serde(deserialize_with = "lenient")]
    pub duration: Option<f64>,
    pub id: Option<serde_json::Value>,
    #[serde(deserialize_with = "lenient")]
    pub unique_id: Option<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub medias: Vec<CapcutMedia>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CapcutMedia {
    #[serde(deserialize_with = "lenient")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub quality: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub extension: Option<String>,
}

pub fn is_complete(data: &CapcutData) -> bool {
    data.medias.iter().any(|m| has_text(&m.url))
}

pub fn normalize(data: CapcutData) -> Result<MediaDescriptor, PipelineError> {
    let mut builder = DescriptorBuilder::new(Platform::CapCut)
        .title(data.title)
        .author(data.author)
        .meta("unique_id", data.unique_id);
    if let Some(ms) = data.duration.filter(|ms| ms.is_finite() && *ms >= 0.0) {
        builder = builder.meta("duration_secs", (ms / 1000.0) as u64);
    }
    if let Some(id) = data.id {
        builder = builder.meta("id", id);
    }

    for (i, media) in data.medias.into_iter().enumerate() {
        let ext = media.extension.as_deref();
        let kind = match ext.map(str::to_ascii_lowercase).as_deref() {
            Some("mp3" | "m4a") => MediaKind::Audio,
            Some("jpg" | "jpeg" | "png" | "webp") => MediaKind::Image,
            _ => MediaKind::Video,
        };
        let label = media
            .quality
            .filter(|q| !q.trim().is_empty())
            .unwrap_or_else(|| format!("Media {}", i + 1));
        builder = builder.variant(MediaVariant::new(
            kind,
            media.url.unwrap_or_default(),
            label,
            ext,
        ));
    }
    builder.build()
}
