use serde::{Deserialize, Deserializer};

use crate::models::media::{DescriptorBuilder, MediaDescriptor, MediaKind, MediaVariant};
use crate::platforms::{has_text, lenient, lenient_list, Platform};
use prenivdl_core::PipelineError;

/// The igdl endpoint answers with a bare list; posts with several slides
/// yield several entries, images and videos mixed.
#[derive(Debug, Clone, Default)]
pub struct InstagramData(pub Vec<InstagramMedia>);

impl<'de> Deserialize<'de> for InstagramData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        lenient_list(deserializer).map(InstagramData)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InstagramMedia {
    #[serde(deserialize_with = "lenient")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub thumbnail: Option<String>,
}

pub fn is_complete(data: &InstagramData) -> bool {
    data.0.iter().any(|m| has_text(&m.url))
}

pub fn normalize(data: InstagramData) -> Result<MediaDescriptor, PipelineError> {
    let mut builder = DescriptorBuilder::new(Platform::Instagram);

    if let Some(thumb) = data.0.iter().find_map(|m| m.thumbnail.clone()) {
        builder = builder.meta("thumbnail", thumb);
    }

    for (i, media) in data.0.into_iter().enumerate() {
        let url = media.url.unwrap_or_default();
        let kind = MediaKind::guess_from_url(&url);
        builder = builder.variant(MediaVariant::new(
            kind,
            url,
            format!("Media {} ({})", i + 1, kind),
            None,
        ));
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn mixed_slides_are_split_by_kind() {
        let data: InstagramData = serde_json::from_value(json!([
            {"url": "https://cdn/reel.mp4?x=1", "thumbnail": "https://cdn/t.jpg"},
            {"url": "https://cdn/slide.jpg"}
        ]))
        .unwrap();

        assert!(is_complete(&data));
        let d = normalize(data).unwrap();
        assert_eq!(d.videos.len(), 1);
        assert_eq!(d.images.len(), 1);
        assert_eq!(d.images[0].label, "Media 2 (image)");
        assert_eq!(d.title, None);
    }

    #[test]
    fn broken_slides_are_dropped() {
        let data: InstagramData = serde_json::from_value(json!([
            null,
            {"url": null, "thumbnail": 3},
            {"url": "https://cdn/slide.jpg"}
        ]))
        .unwrap();

        assert!(is_complete(&data));
        let d = normalize(data).unwrap();
        assert_eq!(d.images.len(), 1);
        assert!(d.metadata.get("thumbnail").is_none());
    }

    #[test]
    fn object_instead_of_list_is_incomplete() {
        let data: InstagramData = serde_json::from_value(json!({"url": "x"})).unwrap();
        assert!(!is_complete(&data));
    }
}
