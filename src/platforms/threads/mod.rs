use serde::Deserialize;

use crate::models::media::{DescriptorBuilder, MediaDescriptor, MediaKind, MediaVariant};
use crate::platforms::{has_text, lenient, Platform};
use prenivdl_core::PipelineError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ThreadsData {
    #[serde(deserialize_with = "lenient")]
    pub download: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub quality: Option<String>,
}

pub fn is_complete(data: &ThreadsData) -> bool {
    has_text(&data.download)
}

pub fn normalize(data: ThreadsData) -> Result<MediaDescriptor, PipelineError> {
    let mut builder = DescriptorBuilder::new(Platform::Threads);
    if let Some(link) = data.download {
        let kind = MediaKind::guess_from_url(&link);
        let label = data
            .quality
            .filter(|q| !q.trim().is_empty())
            .unwrap_or_else(|| kind.to_string());
        builder = builder.variant(MediaVariant::new(kind, link, label, None));
    }
    builder.build()
}
