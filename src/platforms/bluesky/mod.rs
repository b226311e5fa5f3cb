use serde::Deserialize;

use crate::models::media::{DescriptorBuilder, MediaDescriptor, MediaKind, MediaVariant};
use crate::platforms::{has_text, lenient, lenient_default, Platform};
use prenivdl_core::PipelineError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BlueskyData {
    #[serde(deserialize_with = "lenient")]
    pub download_link: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub video_url: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub caption: Option<String>,
    #[serde(deserialize_with = "lenient_default")]
    pub profile: BlueskyProfile,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BlueskyProfile {
    #[serde(deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub handle: Option<String>,
}

pub fn is_complete(data: &BlueskyData) -> bool {
    has_text(&data.download_link)
}

/// The file always comes from `downloadLink`. `videoUrl` is usually an HLS
/// playlist and only tells a video post from an image post.
pub fn normalize(data: BlueskyData) -> Result<MediaDescriptor, PipelineError> {
    let mut builder = DescriptorBuilder::new(Platform::Bluesky)
        .title(data.caption)
        .author(data.profile.handle)
        .meta("profile_name", data.profile.name);

    if let Some(link) = data.download_link {
        let variant = if has_text(&data.video_url) {
            MediaVariant::new(MediaKind::Video, link, "Video", Some("mp4"))
        } else {
            MediaVariant::new(MediaKind::Image, link, "Image", Some("jpg"))
        };
        builder = builder.variant(variant);
    }
    builder.build()
}
