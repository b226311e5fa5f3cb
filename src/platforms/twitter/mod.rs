use serde::Deserialize;

use crate::models::media::{DescriptorBuilder, MediaDescriptor, MediaKind, MediaVariant};
use crate::platforms::{has_text, lenient, Platform};
use prenivdl_core::PipelineError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TwitterData {
    #[serde(deserialize_with = "lenient")]
    pub download_link: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub video_title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub video_description: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub img_url: Option<String>,
}

pub fn is_complete(data: &TwitterData) -> bool {
    has_text(&data.download_link)
}

pub fn normalize(data: TwitterData) -> Result<MediaDescriptor, PipelineError> {
    let mut builder = DescriptorBuilder::new(Platform::Twitter)
        .title(data.video_title)
        .meta("description", data.video_description)
        .meta("thumbnail", data.img_url);

    if let Some(link) = data.download_link {
        builder = builder.variant(MediaVariant::new(MediaKind::Video, link, "Video", Some("mp4")));
    }
    builder.build()
}
