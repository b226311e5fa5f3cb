use async_trait::async_trait;

use crate::models::media::{MediaDescriptor, Selection};

/// Fetches one provider endpoint and returns its JSON body.
///
/// Any failure (transport, timeout, non-JSON body, HTTP error) is an `Err`;
/// the resolver treats all of them as "try the next endpoint".
#[async_trait]
pub trait MetadataSource: Send + Sync {
    async fn fetch_json(&self, url: &str) -> anyhow::Result<serde_json::Value>;
}

/// Lets the caller pick which variants of a descriptor to download.
#[async_trait]
pub trait VariantSelector: Send + Sync {
    async fn present_choices(&self, descriptor: &MediaDescriptor) -> Selection;
}
