use serde::Deserialize;

use crate::models::media::{DescriptorBuilder, MediaDescriptor, MediaKind, MediaVariant};
use crate::platforms::{has_text, lenient, lenient_list, Platform};
use prenivdl_core::PipelineError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FacebookData {
    #[serde(deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub thumbnail: Option<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub data: Vec<FacebookMedia>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FacebookMedia {
    #[serde(deserialize_with = "lenient")]
    pub resolution: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub format: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub url: Option<String>,
}

pub fn is_complete(data: &FacebookData) -> bool {
    data.data.iter().any(|m| has_text(&m.url))
}

pub fn normalize(data: FacebookData) -> Result<MediaDescriptor, PipelineError> {
    let mut builder = DescriptorBuilder::new(Platform::Facebook)
        .title(data.title)
        .meta("thumbnail", data.thumbnail);

    for media in data.data {
        let resolution = media.resolution.unwrap_or_else(|| "Unknown".to_string());
        let format = media.format.unwrap_or_else(|| "mp4".to_string());
        let label = format!("{} - {}", resolution, format.to_uppercase());
        builder = builder.variant(MediaVariant::new(
            MediaKind::Video,
            media.url.unwrap_or_default(),
            label,
            Some(&format),
        ));
    }
    builder.build()
}
