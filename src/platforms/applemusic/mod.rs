use serde::Deserialize;

use crate::models::media::{DescriptorBuilder, MediaDescriptor, MediaKind, MediaVariant};
use crate::platforms::{has_text, lenient, Platform};
use prenivdl_core::PipelineError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppleMusicData {
    #[serde(deserialize_with = "lenient")]
    pub mp3_download_link: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub cover_download_link: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub page_title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub artist: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub music_release_date: Option<String>,
}

pub fn is_complete(data: &AppleMusicData) -> bool {
    has_text(&data.mp3_download_link)
}

pub fn normalize(data: AppleMusicData) -> Result<MediaDescriptor, PipelineError> {
    let mut builder = DescriptorBuilder::new(Platform::AppleMusic)
        .title(data.page_title)
        .author(data.artist)
        .meta("release_date", data.music_release_date);
    if let Some(link) = data.mp3_download_link {
        builder = builder.variant(MediaVariant::new(MediaKind::Audio, link, "Audio (MP3)", Some("mp3")));
    }
    if let Some(cover) = data.cover_download_link {
        builder = builder.variant(MediaVariant::new(MediaKind::Image, cover, "Cover Image", Some("jpg")));
    }
    builder.build()
}
