use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;
use crate::platforms::Platform;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Audio,
    Image,
}

const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".webp", ".heic", ".gif"];
const AUDIO_EXTENSIONS: &[&str] = &[".mp3", ".m4a", ".aac", ".ogg", ".opus", ".wav"];

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
            MediaKind::Image => "image",
        }
    }

    pub fn default_extension(&self) -> &'static str {
        match self {
            MediaKind::Video => "mp4",
            MediaKind::Audio => "mp3",
            MediaKind::Image => "jpg",
        }
    }

    /// Best guess from the URL path for providers that mix kinds in one list
    /// without tagging them. Unknown paths are treated as video.
    pub fn guess_from_url(url: &str) -> MediaKind {
        let path = url::Url::parse(url)
            .map(|u| u.path().to_lowercase())
            .unwrap_or_else(|_| url.to_lowercase());

        if IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
            MediaKind::Image
        } else if AUDIO_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
            MediaKind::Audio
        } else {
            MediaKind::Video
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One downloadable asset of a resolved post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaVariant {
    pub kind: MediaKind,
    pub url: String,
    pub label: String,
    pub extension: String,
}

impl MediaVariant {
    /// `extension` comes from the provider, so it is reduced to lowercase
    /// ASCII alphanumerics; an empty result falls back to the kind's default.
    pub fn new(
        kind: MediaKind,
        url: impl Into<String>,
        label: impl Into<String>,
        extension: Option<&str>,
    ) -> Self {
        let extension: String = extension
            .unwrap_or_default()
            .trim_start_matches('.')
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        let extension = if extension.is_empty() {
            kind.default_extension().to_string()
        } else {
            extension
        };

        Self {
            kind,
            url: url.into(),
            label: label.into(),
            extension,
        }
    }
}

/// Canonical, provider-independent description of a resolved post.
///
/// `title` and `author` stay `None` when the provider omitted them;
/// placeholder text is a presentation concern. Always built through
/// [`DescriptorBuilder`], which refuses to produce a descriptor without
/// variants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaDescriptor {
    pub platform: Platform,
    pub title: Option<String>,
    pub author: Option<String>,
    pub videos: Vec<MediaVariant>,
    pub audios: Vec<MediaVariant>,
    pub images: Vec<MediaVariant>,
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl MediaDescriptor {
    pub fn variants_of(&self, kind: MediaKind) -> &[MediaVariant] {
        match kind {
            MediaKind::Video => &self.videos,
            MediaKind::Audio => &self.audios,
            MediaKind::Image => &self.images,
        }
    }

    /// All variants: videos, then audio, then images, each in provider order.
    pub fn variants(&self) -> impl Iterator<Item = &MediaVariant> {
        self.videos
            .iter()
            .chain(self.audios.iter())
            .chain(self.images.iter())
    }

    pub fn variant_count(&self) -> usize {
        self.videos.len() + self.audios.len() + self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variant_count() == 0
    }
}

pub struct DescriptorBuilder {
    platform: Platform,
    title: Option<String>,
    author: Option<String>,
    videos: Vec<MediaVariant>,
    audios: Vec<MediaVariant>,
    images: Vec<MediaVariant>,
    metadata: BTreeMap<String, serde_json::Value>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl DescriptorBuilder {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            title: None,
            author: None,
            videos: Vec::new(),
            audios: Vec::new(),
            images: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn title(mut self, title: Option<String>) -> Self {
        self.title = non_blank(title);
        self
    }

    pub fn author(mut self, author: Option<String>) -> Self {
        self.author = non_blank(author);
        self
    }

    /// Appends a variant to the list for its kind. Variants with an empty
    /// URL are dropped.
    pub fn variant(mut self, variant: MediaVariant) -> Self {
        if variant.url.trim().is_empty() {
            return self;
        }
        match variant.kind {
            MediaKind::Video => self.videos.push(variant),
            MediaKind::Audio => self.audios.push(variant),
            MediaKind::Image => self.images.push(variant),
        }
        self
    }

    /// Null values and blank strings are skipped.
    pub fn meta(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        let value = value.into();
        let keep = match &value {
            serde_json::Value::Null => false,
            serde_json::Value::String(s) => !s.trim().is_empty(),
            _ => true,
        };
        if keep {
            self.metadata.insert(key.to_string(), value);
        }
        self
    }

    pub fn build(self) -> Result<MediaDescriptor, PipelineError> {
        if self.videos.is_empty() && self.audios.is_empty() && self.images.is_empty() {
            return Err(PipelineError::MalformedPayload(format!(
                "{} response contains no downloadable media",
                self.platform
            )));
        }

        Ok(MediaDescriptor {
            platform: self.platform,
            title: self.title,
            author: self.author,
            videos: self.videos,
            audios: self.audios,
            images: self.images,
            metadata: self.metadata,
        })
    }
}

/// What the selection step hands back to the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Single(MediaVariant),
    All(Vec<MediaVariant>),
    Cancelled,
}

/// One planned transfer. Consumed by the download engine.
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub variant: MediaVariant,
    pub dest_dir: PathBuf,
    pub filename: String,
    pub max_size_bytes: Option<u64>,
}

impl DownloadRequest {
    pub fn dest_path(&self) -> PathBuf {
        self.dest_dir.join(&self.filename)
    }
}
