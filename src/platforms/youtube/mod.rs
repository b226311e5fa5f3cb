use serde::Deserialize;

use crate::models::media::{DescriptorBuilder, MediaDescriptor, MediaKind, MediaVariant};
use crate::platforms::{has_text, lenient, Platform};
use prenivdl_core::PipelineError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct YoutubeData {
    #[serde(deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub author: Option<String>,
    pub duration: Option<serde_json::Value>,
    #[serde(deserialize_with = "lenient")]
    pub thumbnail: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub mp4: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub mp3: Option<String>,
}

pub fn is_complete(data: &YoutubeData) -> bool {
    has_text(&data.mp4) || has_text(&data.mp3)
}

pub fn normalize(data: YoutubeData) -> Result<MediaDescriptor, PipelineError> {
    let mut builder = DescriptorBuilder::new(Platform::YouTube)
        .title(data.title)
        .author(data.author)
        .meta("thumbnail", data.thumbnail);
    if let Some(duration) = data.duration {
        builder = builder.meta("duration", duration);
    }
    if let Some(mp4) = data.mp4 {
        builder = builder.variant(MediaVariant::new(MediaKind::Video, mp4, "Video (MP4)", Some("mp4")));
    }
    if let Some(mp3) = data.mp3 {
        builder = builder.variant(MediaVariant::new(MediaKind::Audio, mp3, "Audio (MP3)", Some("mp3")));
    }
    builder.build()
}
