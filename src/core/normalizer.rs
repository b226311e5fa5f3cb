use serde::Deserialize;
use serde_json::Value;

use crate::models::media::MediaDescriptor;
use crate::platforms::{
    applemusic, bluesky, capcut, douyin, facebook, instagram, pinterest, rednote, spotify,
    threads, tiktok, twitter, youtube, Platform,
};
use prenivdl_core::PipelineError;

/// Response shape an endpoint promises. Several endpoints of one platform may
/// speak different shapes; the tag travels with the endpoint, not the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaVersion {
    TikTokUrls,
    TikTokDownload,
    Facebook,
    Instagram,
    Twitter,
    Douyin,
    SpotifyTrack,
    SpotifyMp3,
    Pinterest,
    AppleMusic,
    YouTube,
    CapCut,
    Bluesky,
    RedNote,
    Threads,
}

impl SchemaVersion {
    pub fn platform(&self) -> Platform {
        match self {
            SchemaVersion::TikTokUrls | SchemaVersion::TikTokDownload => Platform::TikTok,
            SchemaVersion::Facebook => Platform::Facebook,
            SchemaVersion::Instagram => Platform::Instagram,
            SchemaVersion::Twitter => Platform::Twitter,
            SchemaVersion::Douyin => Platform::Douyin,
            SchemaVersion::SpotifyTrack | SchemaVersion::SpotifyMp3 => Platform::Spotify,
            SchemaVersion::Pinterest => Platform::Pinterest,
            SchemaVersion::AppleMusic => Platform::AppleMusic,
            SchemaVersion::YouTube => Platform::YouTube,
            SchemaVersion::CapCut => Platform::CapCut,
            SchemaVersion::Bluesky => Platform::Bluesky,
            SchemaVersion::RedNote => Platform::RedNote,
            SchemaVersion::Threads => Platform::Threads,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaVersion::TikTokUrls => "tiktok-urls",
            SchemaVersion::TikTokDownload => "tiktok-download",
            SchemaVersion::Facebook => "facebook",
            SchemaVersion::Instagram => "instagram",
            SchemaVersion::Twitter => "twitter",
            SchemaVersion::Douyin => "douyin",
            SchemaVersion::SpotifyTrack => "spotify-track",
            SchemaVersion::SpotifyMp3 => "spotify-mp3",
            SchemaVersion::Pinterest => "pinterest",
            SchemaVersion::AppleMusic => "applemusic",
            SchemaVersion::YouTube => "youtube",
            SchemaVersion::CapCut => "capcut",
            SchemaVersion::Bluesky => "bluesky",
            SchemaVersion::RedNote => "rednote",
            SchemaVersion::Threads => "threads",
        }
    }
}

impl std::fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `data` member of a provider response, decoded for its schema.
#[derive(Debug, Clone)]
pub enum ProviderPayload {
    TikTokUrls(tiktok::UrlsData),
    TikTokDownload(tiktok::DownloadData),
    Facebook(facebook::FacebookData),
    Instagram(instagram::InstagramData),
    Twitter(twitter::TwitterData),
    Douyin(douyin::DouyinData),
    SpotifyTrack(spotify::TrackData),
    SpotifyMp3(spotify::Mp3Data),
    Pinterest(pinterest::PinterestData),
    AppleMusic(applemusic::AppleMusicData),
    YouTube(youtube::YoutubeData),
    CapCut(capcut::CapcutData),
    Bluesky(bluesky::BlueskyData),
    RedNote(rednote::RedNoteData),
    Threads(threads::ThreadsData),
}

impl ProviderPayload {
    pub fn decode(data: &Value, schema: SchemaVersion) -> Result<Self, serde_json::Error> {
        Ok(match schema {
            SchemaVersion::TikTokUrls => Self::TikTokUrls(Deserialize::deserialize(data)?),
            SchemaVersion::TikTokDownload => Self::TikTokDownload(Deserialize::deserialize(data)?),
            SchemaVersion::Facebook => Self::Facebook(Deserialize::deserialize(data)?),
            SchemaVersion::Instagram => Self::Instagram(Deserialize::deserialize(data)?),
            SchemaVersion::Twitter => Self::Twitter(Deserialize::deserialize(data)?),
            SchemaVersion::Douyin => Self::Douyin(Deserialize::deserialize(data)?),
            SchemaVersion::SpotifyTrack => Self::SpotifyTrack(Deserialize::deserialize(data)?),
            SchemaVersion::SpotifyMp3 => Self::SpotifyMp3(Deserialize::deserialize(data)?),
            SchemaVersion::Pinterest => Self::Pinterest(Deserialize::deserialize(data)?),
            SchemaVersion::AppleMusic => Self::AppleMusic(Deserialize::deserialize(data)?),
            SchemaVersion::YouTube => Self::YouTube(Deserialize::deserialize(data)?),
            SchemaVersion::CapCut => Self::CapCut(Deserialize::deserialize(data)?),
            SchemaVersion::Bluesky => Self::Bluesky(Deserialize::deserialize(data)?),
            SchemaVersion::RedNote => Self::RedNote(Deserialize::deserialize(data)?),
            SchemaVersion::Threads => Self::Threads(Deserialize::deserialize(data)?),
        })
    }

    /// Whether the payload carries the field its schema depends on.
    pub fn is_complete(&self) -> bool {
        match self {
            Self::TikTokUrls(d) => tiktok::urls_complete(d),
            Self::TikTokDownload(d) => tiktok::download_complete(d),
            Self::Facebook(d) => facebook::is_complete(d),
            Self::Instagram(d) => instagram::is_complete(d),
            Self::Twitter(d) => twitter::is_complete(d),
            Self::Douyin(d) => douyin::is_complete(d),
            Self::SpotifyTrack(d) => spotify::track_complete(d),
            Self::SpotifyMp3(d) => spotify::mp3_complete(d),
            Self::Pinterest(d) => pinterest::is_complete(d),
            Self::AppleMusic(d) => applemusic::is_complete(d),
            Self::YouTube(d) => youtube::is_complete(d),
            Self::CapCut(d) => capcut::is_complete(d),
            Self::Bluesky(d) => bluesky::is_complete(d),
            Self::RedNote(d) => rednote::is_complete(d),
            Self::Threads(d) => threads::is_complete(d),
        }
    }

    pub fn into_descriptor(self) -> Result<MediaDescriptor, PipelineError> {
        match self {
            Self::TikTokUrls(d) => tiktok::normalize_urls(d),
            Self::TikTokDownload(d) => tiktok::normalize_download(d),
            Self::Facebook(d) => facebook::normalize(d),
            Self::Instagram(d) => instagram::normalize(d),
            Self::Twitter(d) => twitter::normalize(d),
            Self::Douyin(d) => douyin::normalize(d),
            Self::SpotifyTrack(d) => spotify::normalize_track(d),
            Self::SpotifyMp3(d) => spotify::normalize_mp3(d),
            Self::Pinterest(d) => pinterest::normalize(d),
            Self::AppleMusic(d) => applemusic::normalize(d),
            Self::YouTube(d) => youtube::normalize(d),
            Self::CapCut(d) => capcut::normalize(d),
            Self::Bluesky(d) => bluesky::normalize(d),
            Self::RedNote(d) => rednote::normalize(d),
            Self::Threads(d) => threads::normalize(d),
        }
    }
}

/// Loose truthiness of the provider `status` field. Aggregators send
/// `true`, `1`, `"success"` or `200` interchangeably.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Human-readable reason a provider attached to its response, if any.
pub fn provider_message(raw: &Value) -> Option<String> {
    ["message", "msg", "error"].iter().find_map(|key| match raw.get(*key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    })
}

/// Acceptance check for one endpoint response. The error string is the
/// reason the resolver reports if this turns out to be the last attempt.
pub fn accept(raw: &Value, schema: SchemaVersion) -> Result<ProviderPayload, String> {
    let status = raw.get("status").unwrap_or(&Value::Null);
    if !is_truthy(status) {
        return Err(provider_message(raw)
            .unwrap_or_else(|| format!("{} API reported failure status", schema)));
    }

    let data = match raw.get("data") {
        Some(Value::Null) | None => {
            return Err(provider_message(raw)
                .unwrap_or_else(|| format!("{} response has no data", schema)))
        }
        Some(data) => data,
    };

    let payload = ProviderPayload::decode(data, schema)
        .map_err(|e| format!("unexpected {} payload: {}", schema, e))?;

    if !payload.is_complete() {
        return Err(provider_message(raw)
            .unwrap_or_else(|| format!("{} response is missing its download link", schema)));
    }
    Ok(payload)
}

/// Pure conversion of a raw provider response into a descriptor.
pub fn normalize(raw: &Value, schema: SchemaVersion) -> Result<MediaDescriptor, PipelineError> {
    accept(raw, schema)
        .map_err(PipelineError::MalformedPayload)?
        .into_descriptor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn truthiness_follows_loose_rules() {
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(200)));
        assert!(is_truthy(&json!("ok")));
        assert!(is_truthy(&json!({})));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&Value::Null));
    }

    #[test]
    fn false_status_prefers_provider_message() {
        let raw = json!({"status": false, "message": "Video is private"});
        let err = accept(&raw, SchemaVersion::Threads).unwrap_err();
        assert_eq!(err, "Video is private");

        let raw = json!({"status": false});
        let err = accept(&raw, SchemaVersion::Threads).unwrap_err();
        assert!(err.contains("threads"));
    }

    #[test]
    fn missing_status_is_rejected() {
        let raw = json!({"data": {"download": "https://cdn/x.mp4"}});
        assert!(accept(&raw, SchemaVersion::Threads).is_err());
    }

    #[test]
    fn null_data_is_rejected() {
        let raw = json!({"status": true, "data": null});
        assert!(accept(&raw, SchemaVersion::RedNote).is_err());
    }

    #[test]
    fn wrong_shape_is_rejected_not_panicking() {
        let raw = json!({"status": true, "data": "just a string"});
        let err = accept(&raw, SchemaVersion::Facebook).unwrap_err();
        assert!(err.starts_with("unexpected facebook payload"));
    }

    #[test]
    fn incomplete_payload_is_rejected() {
        let raw = json!({"status": true, "data": {"urls": [], "metadata": {}}});
        assert!(accept(&raw, SchemaVersion::TikTokUrls).is_err());
    }

    #[test]
    fn same_platform_schemas_are_not_interchangeable() {
        let raw = json!({
            "status": true,
            "data": {"download": {"video": ["https://cdn/1.mp4"]}, "metadata": {}}
        });
        assert!(accept(&raw, SchemaVersion::TikTokUrls).is_err());
        assert!(accept(&raw, SchemaVersion::TikTokDownload).is_ok());
    }

    #[test]
    fn normalize_is_idempotent() {
        let raw = json!({
            "status": true,
            "data": {
                "title": "note",
                "nickname": "me",
                "downloads": [{"quality": "720p", "url": "https://cdn/v.mp4"}],
                "images": ["https://cdn/1.jpg"]
            }
        });
        let a = normalize(&raw, SchemaVersion::RedNote).unwrap();
        let b = normalize(&raw, SchemaVersion::RedNote).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.platform, Platform::RedNote);
    }

    #[test]
    fn optional_field_types_do_not_decide_acceptance() {
        let capcut = json!({
            "status": true,
            "data": {
                "duration": 15000.5,
                "medias": [{"url": "https://cdn/v.mp4", "quality": "HD", "extension": "mp4"}]
            }
        });
        let d = normalize(&capcut, SchemaVersion::CapCut).unwrap();
        assert_eq!(d.videos.len(), 1);

        let rednote = json!({
            "status": true,
            "data": {
                "downloads": [{"quality": "720p", "url": null}],
                "images": ["https://ci/1.jpg", "https://ci/2.jpg"]
            }
        });
        let d = normalize(&rednote, SchemaVersion::RedNote).unwrap();
        assert!(d.videos.is_empty());
        assert_eq!(d.images.len(), 2);

        let tiktok = json!({
            "status": true,
            "data": {
                "download": {"video": ["https://cdn/1.mp4"]},
                "metadata": {"hashtags": ["fyp", 3], "stats": null}
            }
        });
        assert!(accept(&tiktok, SchemaVersion::TikTokDownload).is_ok());
    }

    #[test]
    fn normalize_reports_malformed_payload() {
        let raw = json!({"status": true, "data": {"title": "empty"}});
        let err = normalize(&raw, SchemaVersion::RedNote).unwrap_err();
        assert!(matches!(err, PipelineError::MalformedPayload(_)));
    }

    #[test]
    fn every_schema_decodes_an_empty_object_or_list() {
        let all = [
            SchemaVersion::TikTokUrls,
            SchemaVersion::TikTokDownload,
            SchemaVersion::Facebook,
            SchemaVersion::Twitter,
            SchemaVersion::Douyin,
            SchemaVersion::SpotifyTrack,
            SchemaVersion::SpotifyMp3,
            SchemaVersion::Pinterest,
            SchemaVersion::AppleMusic,
            SchemaVersion::YouTube,
            SchemaVersion::CapCut,
            SchemaVersion::Bluesky,
            SchemaVersion::RedNote,
            SchemaVersion::Threads,
        ];
        for schema in all {
            assert!(ProviderPayload::decode(&json!({}), schema).is_ok(), "{}", schema);
        }
        assert!(ProviderPayload::decode(&json!([]), SchemaVersion::Instagram).is_ok());
    }
}
