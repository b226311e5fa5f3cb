use serde::Deserialize;

use crate::models::media::{DescriptorBuilder, MediaDescriptor, MediaKind, MediaVariant};
use crate::platforms::{has_text, lenient, Platform};
use prenivdl_core::PipelineError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PinterestData {
    #[serde(deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub media_type: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub image: Option<String>,
    pub pinner: Option<serde_json::Value>,
}

impl PinterestData {
    fn is_video(&self) -> bool {
        self.media_type
            .as_deref()
            .is_some_and(|t| t.to_ascii_lowercase().contains("video"))
    }
}

/// A pin needs either a media URL or a still image.
pub fn is_complete(data: &PinterestData) -> bool {
    has_text(&data.url) || has_text(&data.image)
}

fn pinner_name(pinner: &serde_json::Value) -> Option<String> {
    match pinner {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Object(map) => ["full_name", "username", "name"]
            .iter()
            .find_map(|k| map.get(*k).and_then(|v| v.as_str()))
            .map(str::to_string),
        _ => None,
    }
}

pub fn normalize(data: PinterestData) -> Result<MediaDescriptor, PipelineError> {
    let is_video = data.is_video();
    let author = data.pinner.as_ref().and_then(pinner_name);

    let mut builder = DescriptorBuilder::new(Platform::Pinterest)
        .title(data.title)
        .author(author)
        .meta("media_type", data.media_type);

    match (data.url.filter(|u| !u.trim().is_empty()), data.image) {
        (Some(url), image) if is_video => {
            builder = builder
                .variant(MediaVariant::new(MediaKind::Video, url, "Video", Some("mp4")))
                .meta("thumbnail", image);
        }
        (Some(url), image) => {
            let kind = MediaKind::guess_from_url(&url);
            let kind = if kind == MediaKind::Video { MediaKind::Image } else { kind };
            builder = builder
                .variant(MediaVariant::new(kind, url, "Image", None))
                .meta("thumbnail", image);
        }
        (None, Some(image)) => {
            builder = builder.variant(MediaVariant::new(MediaKind::Image, image, "Image", None));
        }
        (None, None) => {}
    }
    builder.build()
}
