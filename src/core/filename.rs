use std::sync::atomic::{AtomicU64, Ordering};

use unicode_normalization::UnicodeNormalization;

use crate::models::media::{MediaDescriptor, MediaVariant};

const MAX_SLUG_CHARS: usize = 32;

static LAST_STAMP: AtomicU64 = AtomicU64::new(0);

/// Unix millis, strictly increasing within the process so two names built in
/// the same millisecond never collide.
pub fn unique_millis() -> u64 {
    let now = chrono::Utc::now().timestamp_millis().max(0) as u64;
    match LAST_STAMP.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
        Some(now.max(last + 1))
    }) {
        Ok(prev) => now.max(prev + 1),
        Err(_) => now,
    }
}

/// Keeps letters and digits of any script, after NFC composition.
pub fn slug(text: &str) -> String {
    text.nfc()
        .filter(|c| c.is_alphanumeric())
        .take(MAX_SLUG_CHARS)
        .collect()
}

/// Middle part of a file name: the author slug when known, then the kind.
pub fn disambiguator(descriptor: &MediaDescriptor, variant: &MediaVariant) -> String {
    let author = descriptor.author.as_deref().map(slug).unwrap_or_default();
    if author.is_empty() {
        variant.kind.as_str().to_string()
    } else {
        format!("{}_{}", author, variant.kind)
    }
}

/// `{platform}_{disambiguator}_{millis}[_{index}].{extension}`
pub fn build_filename(
    descriptor: &MediaDescriptor,
    variant: &MediaVariant,
    index: Option<usize>,
) -> String {
    let stamp = unique_millis();
    let middle = disambiguator(descriptor, variant);
    let name = match index {
        Some(i) => format!(
            "{}_{}_{}_{}.{}",
            descriptor.platform, middle, stamp, i, variant.extension
        ),
        None => format!("{}_{}_{}.{}", descriptor.platform, middle, stamp, variant.extension),
    };
    sanitize_filename::sanitize(name)
}
