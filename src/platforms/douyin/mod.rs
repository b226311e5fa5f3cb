use serde::Deserialize;

use crate::models::media::{DescriptorBuilder, MediaDescriptor, MediaKind, MediaVariant};
use crate::platforms::{has_text, lenient, lenient_list, Platform};
use prenivdl_core::PipelineError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DouyinData {
    #[serde(deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub thumbnail: Option<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub downloads: Vec<DouyinDownload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DouyinDownload {
    #[serde(deserialize_with = "lenient")]
    pub quality: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub url: Option<String>,
}

pub fn is_complete(data: &DouyinData) -> bool {
    data.downloads.iter().any(|d| has_text(&d.url))
}

pub fn normalize(data: DouyinData) -> Result<MediaDescriptor, PipelineError> {
    let mut builder = DescriptorBuilder::new(Platform::Douyin)
        .title(data.title)
        .meta("thumbnail", data.thumbnail);

    for (i, download) in data.downloads.into_iter().enumerate() {
        let label = download
            .quality
            .filter(|q| !q.trim().is_empty())
            .unwrap_or_else(|| format!("Video Quality {}", i + 1));
        let url = download.url.unwrap_or_default();
        let kind = MediaKind::guess_from_url(&url);
        builder = builder.variant(MediaVariant::new(kind, url, label, None));
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn quality_labels_fall_back_to_position() {
        let data: DouyinData = serde_json::from_value(json!({
            "title": "douyin clip",
            "downloads": [
                {"quality": "HD", "url": "https://cdn/hd"},
                {"url": "https://cdn/sd"},
                {"quality": "MP3", "url": "https://cdn/music.mp3"}
            ]
        }))
        .unwrap();

        assert!(is_complete(&data));
        let d = normalize(data).unwrap();
        assert_eq!(d.videos.len(), 2);
        assert_eq!(d.videos[0].label, "HD");
        assert_eq!(d.videos[1].label, "Video Quality 2");
        assert_eq!(d.audios.len(), 1);
    }

    #[test]
    fn null_url_entry_is_skipped() {
        let data: DouyinData = serde_json::from_value(json!({
            "thumbnail": {"url": "https://cdn/t.jpg"},
            "downloads": [{"quality": "HD", "url": null}, {"quality": "SD", "url": "https://cdn/sd"}]
        }))
        .unwrap();

        assert!(is_complete(&data));
        let d = normalize(data).unwrap();
        assert_eq!(d.videos.len(), 1);
        assert_eq!(d.videos[0].label, "SD");
        assert!(!d.metadata.contains_key("thumbnail"));
    }
}
