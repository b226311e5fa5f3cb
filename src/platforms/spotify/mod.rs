use serde::Deserialize;

use crate::models::media::{DescriptorBuilder, MediaDescriptor, MediaKind, MediaVariant};
use crate::platforms::{has_text, lenient, Platform};
use prenivdl_core::PipelineError;

/// spotifyv2: Indonesian field names (`artis`, `durasi`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TrackData {
    #[serde(deserialize_with = "lenient")]
    pub download: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub artis: Option<String>,
    pub durasi: Option<serde_json::Value>,
    #[serde(deserialize_with = "lenient")]
    pub image: Option<String>,
}

/// Legacy spotify endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Mp3Data {
    #[serde(deserialize_with = "lenient")]
    pub mp3_download_link: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub song_title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub artist: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub cover_download_link: Option<String>,
}

fn cover_image(builder: DescriptorBuilder, link: Option<String>) -> DescriptorBuilder {
    match link {
        Some(link) => builder.variant(MediaVariant::new(MediaKind::Image, link, "Cover Image", Some("jpg"))),
        None => builder,
    }
}

pub fn track_complete(data: &TrackData) -> bool {
    has_text(&data.download)
}

pub fn mp3_complete(data: &Mp3Data) -> bool {
    has_text(&data.mp3_download_link)
}

pub fn normalize_track(data: TrackData) -> Result<MediaDescriptor, PipelineError> {
    let mut builder = DescriptorBuilder::new(Platform::Spotify)
        .title(data.title)
        .author(data.artis);
    if let Some(duration) = data.durasi {
        builder = builder.meta("duration", duration);
    }
    if let Some(link) = data.download {
        builder = builder.variant(MediaVariant::new(MediaKind::Audio, link, "Audio (MP3)", Some("mp3")));
    }
    cover_image(builder, data.image).build()
}

pub fn normalize_mp3(data: Mp3Data) -> Result<MediaDescriptor, PipelineError> {
    let mut builder = DescriptorBuilder::new(Platform::Spotify)
        .title(data.song_title)
        .author(data.artist)
        .meta("description", data.description);
    if let Some(link) = data.mp3_download_link {
        builder = builder.variant(MediaVariant::new(MediaKind::Audio, link, "Audio (MP3)", Some("mp3")));
    }
    cover_image(builder, data.cover_download_link).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn track_schema_reads_localized_fields() {
        let data: TrackData = serde_json::from_value(json!({
            "download": "https://cdn/song.mp3",
            "title": "Song",
            "artis": "Band",
            "durasi": "3:21",
            "image": "https://cdn/cover.jpg"
        }))
        .unwrap();

        assert!(track_complete(&data));
        let d = normalize_track(data).unwrap();
        assert_eq!(d.author.as_deref(), Some("Band"));
        assert_eq!(d.audios.len(), 1);
        assert!(d.videos.is_empty());
        assert_eq!(d.metadata["duration"], json!("3:21"));
        assert_eq!(d.images[0].url, "https://cdn/cover.jpg");
    }

    #[test]
    fn mp3_schema_maps_song_title_and_cover() {
        let data: Mp3Data = serde_json::from_value(json!({
            "mp3DownloadLink": "https://cdn/a.mp3",
            "songTitle": "Other",
            "artist": "Solo",
            "coverDownloadLink": "https://cdn/c.jpg"
        }))
        .unwrap();

        assert!(mp3_complete(&data));
        let d = normalize_mp3(data).unwrap();
        assert_eq!(d.title.as_deref(), Some("Other"));
        assert_eq!(d.audios[0].extension, "mp3");
        let labels: Vec<&str> = d.variants().map(|v| v.label.as_str()).collect();
        assert_eq!(labels, ["Audio (MP3)", "Cover Image"]);
        assert_eq!(d.images[0].url, "https://cdn/c.jpg");
        assert_eq!(d.images[0].extension, "jpg");
    }

    #[test]
    fn no_cover_means_audio_only() {
        let data: TrackData = serde_json::from_value(json!({
            "download": "https://cdn/song.mp3",
            "image": null,
            "title": {"text": "Song"}
        }))
        .unwrap();

        let d = normalize_track(data).unwrap();
        assert_eq!(d.variant_count(), 1);
        assert!(d.images.is_empty());
        assert_eq!(d.title, None);
    }

    #[test]
    fn missing_links_are_incomplete() {
        assert!(!track_complete(&TrackData::default()));
        let data: Mp3Data = serde_json::from_value(json!({"songTitle": "x"})).unwrap();
        assert!(!mp3_complete(&data));
    }
}
