use serde::Deserialize;

use crate::models::media::{DescriptorBuilder, MediaDescriptor, MediaKind, MediaVariant};
use crate::platforms::{lenient, lenient_list, Platform};
use prenivdl_core::PipelineError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RedNoteData {
    #[serde(deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub nickname: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub desc: Option<String>,
    pub duration: Option<serde_json::Value>,
    pub engagement: Option<serde_json::Value>,
    #[serde(deserialize_with = "lenient_list")]
    pub downloads: Vec<RedNoteDownload>,
    #[serde(deserialize_with = "lenient_list")]
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RedNoteDownload {
    #[serde(deserialize_with = "lenient")]
    pub quality: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub url: Option<String>,
}

/// Notes are either video or image galleries, so the object itself is the
/// only requirement; an empty note surfaces later as a malformed payload.
pub fn is_complete(_data: &RedNoteData) -> bool {
    true
}

pub fn normalize(data: RedNoteData) -> Result<MediaDescriptor, PipelineError> {
    let mut builder = DescriptorBuilder::new(Platform::RedNote)
        .title(data.title)
        .author(data.nickname)
        .meta("description", data.desc);
    if let Some(duration) = data.duration {
        builder = builder.meta("duration", duration);
    }
    if let Some(engagement) = data.engagement {
        builder = builder.meta("engagement", engagement);
    }

    for (i, download) in data.downloads.into_iter().enumerate() {
        let label = download
            .quality
            .filter(|q| !q.trim().is_empty())
            .unwrap_or_else(|| format!("Video {}", i + 1));
        builder = builder.variant(MediaVariant::new(
            MediaKind::Video,
            download.url.unwrap_or_default(),
            label,
            Some("mp4"),
        ));
    }
    for (i, image) in data.images.into_iter().enumerate() {
        builder = builder.variant(MediaVariant::new(
            MediaKind::Image,
            image,
            format!("Image {}", i + 1),
            None,
        ));
    }
    builder.build()
}
