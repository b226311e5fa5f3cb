use crate::core::normalizer::SchemaVersion;
use crate::platforms::Platform;

/// One metadata endpoint of a platform. Lower `rank` is tried first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointSpec {
    pub platform: Platform,
    pub rank: u8,
    /// Full URL with a single `{url}` placeholder for the encoded target.
    pub template: String,
    pub schema: SchemaVersion,
}

impl EndpointSpec {
    pub fn request_url(&self, target: &str) -> String {
        self.template
            .replace("{url}", &urlencoding::encode(target.trim()))
    }
}

/// Paths relative to the aggregator base, in preference order per platform.
const ENDPOINTS: &[(Platform, &str, SchemaVersion)] = &[
    (Platform::TikTok, "/api/d/tiktok?url={url}", SchemaVersion::TikTokUrls),
    (Platform::TikTok, "/api/d/tiktok/v2?url={url}", SchemaVersion::TikTokDownload),
    (Platform::Facebook, "/api/d/facebook?url={url}", SchemaVersion::Facebook),
    (Platform::Instagram, "/api/d/igdl?url={url}", SchemaVersion::Instagram),
    (Platform::Twitter, "/api/d/twitter?url={url}", SchemaVersion::Twitter),
    (Platform::Douyin, "/api/d/douyin?url={url}", SchemaVersion::Douyin),
    (Platform::Spotify, "/api/d/spotifyv2?url={url}", SchemaVersion::SpotifyTrack),
    (Platform::Spotify, "/api/d/spotify?url={url}", SchemaVersion::SpotifyMp3),
    (Platform::Pinterest, "/api/d/pinterest?url={url}", SchemaVersion::Pinterest),
    (Platform::AppleMusic, "/api/d/musicapple?url={url}", SchemaVersion::AppleMusic),
    (Platform::YouTube, "/api/d/youtube?url={url}", SchemaVersion::YouTube),
    (Platform::CapCut, "/api/d/capcut?url={url}", SchemaVersion::CapCut),
    (Platform::Bluesky, "/api/d/bluesky?url={url}", SchemaVersion::Bluesky),
    (Platform::RedNote, "/api/d/rednote?url={url}", SchemaVersion::RedNote),
    (Platform::Threads, "/api/d/threads?url={url}", SchemaVersion::Threads),
];

pub struct ProviderRegistry {
    endpoints: Vec<EndpointSpec>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self {
            endpoints: Vec::new(),
        }
    }

    /// The built-in endpoint table rooted at `api_base`.
    pub fn with_api_base(api_base: &str) -> Self {
        let base = api_base.trim_end_matches('/');
        let mut registry = Self::new();
        for (platform, path, schema) in ENDPOINTS {
            registry.register(*platform, format!("{}{}", base, path), *schema);
        }
        registry
    }

    /// Appends an endpoint after the ones already registered for `platform`.
    pub fn register(&mut self, platform: Platform, template: String, schema: SchemaVersion) {
        let rank = self
            .endpoints
            .iter()
            .filter(|e| e.platform == platform)
            .count() as u8;
        self.endpoints.push(EndpointSpec {
            platform,
            rank,
            template,
            schema,
        });
    }

    /// Fallback chain for `platform`, ordered by rank.
    pub fn endpoints_for(&self, platform: Platform) -> Vec<&EndpointSpec> {
        let mut chain: Vec<&EndpointSpec> = self
            .endpoints
            .iter()
            .filter(|e| e.platform == platform)
            .collect();
        chain.sort_by_key(|e| e.rank);
        chain
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::with_api_base(&prenivdl_core::models::settings::default_api_base())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_platform_has_an_endpoint() {
        let registry = ProviderRegistry::default();
        for platform in Platform::ALL {
            assert!(
                !registry.endpoints_for(platform).is_empty(),
                "no endpoint for {}",
                platform
            );
        }
    }

    #[test]
    fn schema_belongs_to_its_platform() {
        let registry = ProviderRegistry::default();
        for platform in Platform::ALL {
            for endpoint in registry.endpoints_for(platform) {
                assert_eq!(endpoint.schema.platform(), platform);
            }
        }
    }

    #[test]
    fn tiktok_chain_is_urls_then_download() {
        let registry = ProviderRegistry::default();
        let chain = registry.endpoints_for(Platform::TikTok);
        assert_eq!(chain.len(), 2);
        assert_eq!(chain[0].rank, 0);
        assert_eq!(chain[0].schema, SchemaVersion::TikTokUrls);
        assert_eq!(chain[1].rank, 1);
        assert_eq!(chain[1].schema, SchemaVersion::TikTokDownload);
    }

    #[test]
    fn spotify_chain_is_track_then_mp3() {
        let registry = ProviderRegistry::default();
        let schemas: Vec<SchemaVersion> = registry
            .endpoints_for(Platform::Spotify)
            .iter()
            .map(|e| e.schema)
            .collect();
        assert_eq!(schemas, [SchemaVersion::SpotifyTrack, SchemaVersion::SpotifyMp3]);
    }

    #[test]
    fn request_url_percent_encodes_target() {
        let registry = ProviderRegistry::with_api_base("http://127.0.0.1:9000/");
        let endpoint = registry.endpoints_for(Platform::TikTok)[0];
        assert_eq!(
            endpoint.request_url("https://www.tiktok.com/@u/video/1?lang=en&x=1"),
            "http://127.0.0.1:9000/api/d/tiktok?url=https%3A%2F%2Fwww.tiktok.com%2F%40u%2Fvideo%2F1%3Flang%3Den%26x%3D1"
        );
    }

    #[test]
    fn register_appends_with_next_rank() {
        let mut registry = ProviderRegistry::new();
        registry.register(Platform::Threads, "http://a/{url}".into(), SchemaVersion::Threads);
        registry.register(Platform::Threads, "http://b/{url}".into(), SchemaVersion::Threads);
        let chain = registry.endpoints_for(Platform::Threads);
        assert_eq!(chain[0].template, "http://a/{url}");
        assert_eq!(chain[1].rank, 1);
        assert!(registry.endpoints_for(Platform::TikTok).is_empty());
    }
}
