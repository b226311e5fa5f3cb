pub mod traits;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    TikTok,
    Facebook,
    Instagram,
    Twitter,
    Douyin,
    Spotify,
    Pinterest,
    AppleMusic,
    YouTube,
    CapCut,
    Bluesky,
    RedNote,
    Threads,
}

/// Hostnames each platform answers to. A host matches when it equals one
/// of these or ends with `.` followed by one of these. No suffix appears
/// under two platforms.
const DOMAINS: &[(Platform, &[&str])] = &[
    (Platform::TikTok, &["tiktok.com"]),
    (Platform::Facebook, &["facebook.com", "fb.watch"]),
    (Platform::Instagram, &["instagram.com"]),
    (Platform::Twitter, &["twitter.com", "x.com"]),
    (Platform::Douyin, &["douyin.com"]),
    (Platform::Spotify, &["spotify.com"]),
    (Platform::Pinterest, &["pinterest.com", "pin.it"]),
    (Platform::AppleMusic, &["apple.com"]),
    (Platform::YouTube, &["youtube.com", "youtu.be"]),
    (Platform::CapCut, &["capcut.com"]),
    (Platform::Bluesky, &["bsky.app", "bsky.social"]),
    (Platform::RedNote, &["xiaohongshu.com", "xhslink.com", "rednote.com"]),
    (Platform::Threads, &["threads.net", "threads.com"]),
];

fn host_matches(host: &str, domain: &str) -> bool {
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

impl Platform {
    pub const ALL: [Platform; 13] = [
        Platform::TikTok,
        Platform::Facebook,
        Platform::Instagram,
        Platform::Twitter,
        Platform::Douyin,
        Platform::Spotify,
        Platform::Pinterest,
        Platform::AppleMusic,
        Platform::YouTube,
        Platform::CapCut,
        Platform::Bluesky,
        Platform::RedNote,
        Platform::Threads,
    ];

    /// Lowercase identifier, also used as the filename prefix.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::TikTok => "tiktok",
            Platform::Facebook => "facebook",
            Platform::Instagram => "instagram",
            Platform::Twitter => "twitter",
            Platform::Douyin => "douyin",
            Platform::Spotify => "spotify",
            Platform::Pinterest => "pinterest",
            Platform::AppleMusic => "applemusic",
            Platform::YouTube => "youtube",
            Platform::CapCut => "capcut",
            Platform::Bluesky => "bluesky",
            Platform::RedNote => "rednote",
            Platform::Threads => "threads",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::TikTok => "TikTok",
            Platform::Facebook => "Facebook",
            Platform::Instagram => "Instagram",
            Platform::Twitter => "Twitter/X",
            Platform::Douyin => "Douyin",
            Platform::Spotify => "Spotify",
            Platform::Pinterest => "Pinterest",
            Platform::AppleMusic => "Apple Music",
            Platform::YouTube => "YouTube",
            Platform::CapCut => "CapCut",
            Platform::Bluesky => "Bluesky",
            Platform::RedNote => "RedNote",
            Platform::Threads => "Threads",
        }
    }

    pub fn domains(&self) -> &'static [&'static str] {
        DOMAINS
            .iter()
            .find(|(p, _)| p == self)
            .map(|(_, d)| *d)
            .unwrap_or(&[])
    }

    pub fn from_url(url: &str) -> Option<Platform> {
        Self::classify(url).ok()
    }

    /// Maps a URL to the platform serving it.
    ///
    /// Syntax problems yield [`PipelineError::InvalidUrl`]; well-formed URLs on
    /// unknown hosts yield [`PipelineError::NotRecognized`].
    pub fn classify(url: &str) -> Result<Platform, PipelineError> {
        let host = parse_host(url)?;

        for (platform, domains) in DOMAINS {
            if !domains.iter().any(|d| host_matches(&host, d)) {
                continue;
            }
            // apple.com alone also covers the store, support pages, etc.
            if *platform == Platform::AppleMusic && !url.contains("music.apple.com") {
                continue;
            }
            return Ok(*platform);
        }

        Err(PipelineError::NotRecognized(host))
    }
}

/// Validates that `url` is an absolute http(s) URL with a host and returns
/// the lowercased hostname.
pub fn parse_host(url: &str) -> Result<String, PipelineError> {
    let parsed =
        url::Url::parse(url.trim()).map_err(|e| PipelineError::InvalidUrl(format!("{url}: {e}")))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(PipelineError::InvalidUrl(format!(
            "{url}: unsupported scheme '{}'",
            parsed.scheme()
        )));
    }

    parsed
        .host_str()
        .filter(|h| !h.is_empty())
        .map(|h| h.to_lowercase())
        .ok_or_else(|| PipelineError::InvalidUrl(format!("{url}: missing host")))
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_every_platform() {
        let cases = [
            ("https://www.tiktok.com/@u/video/1", Platform::TikTok),
            ("https://vt.tiktok.com/ZS123/", Platform::TikTok),
            ("https://www.facebook.com/watch/?v=1234567890", Platform::Facebook),
            ("https://fb.watch/abc/", Platform::Facebook),
            ("https://www.instagram.com/p/ABC123/", Platform::Instagram),
            ("https://twitter.com/user/status/1234567890", Platform::Twitter),
            ("https://x.com/user/status/1234567890", Platform::Twitter),
            ("https://www.douyin.com/video/1234567890", Platform::Douyin),
            ("https://open.spotify.com/track/ABC123", Platform::Spotify),
            ("https://www.pinterest.com/pin/1234567890/", Platform::Pinterest),
            ("https://pin.it/abc", Platform::Pinterest),
            ("https://music.apple.com/id/album/song/123456", Platform::AppleMusic),
            ("https://www.youtube.com/watch?v=ABC123", Platform::YouTube),
            ("https://youtu.be/ABC123", Platform::YouTube),
            ("https://www.capcut.com/tv2/ABC123/", Platform::CapCut),
            ("https://bsky.app/profile/user.bsky.social/post/ABC123", Platform::Bluesky),
            ("https://www.xiaohongshu.com/explore/abc", Platform::RedNote),
            ("http://xhslink.com/a/abc", Platform::RedNote),
            ("https://www.threads.net/@user/post/abc", Platform::Threads),
        ];

        for (url, expected) in cases {
            assert_eq!(Platform::classify(url).unwrap(), expected, "{}", url);
        }
    }

    #[test]
    fn host_is_case_insensitive() {
        assert_eq!(
            Platform::classify("https://WWW.TikTok.COM/@u/video/1").unwrap(),
            Platform::TikTok
        );
    }

    #[test]
    fn bare_apple_com_is_not_apple_music() {
        let err = Platform::classify("https://www.apple.com/iphone/").unwrap_err();
        assert!(matches!(err, PipelineError::NotRecognized(_)));
    }

    #[test]
    fn suffix_match_requires_dot_boundary() {
        let err = Platform::classify("https://nottiktok.com/video/1").unwrap_err();
        assert!(matches!(err, PipelineError::NotRecognized(_)));
        let err = Platform::classify("https://max.com/show/1").unwrap_err();
        assert!(matches!(err, PipelineError::NotRecognized(_)));
    }

    #[test]
    fn unknown_domain_is_not_recognized() {
        let err = Platform::classify("https://example.com/video").unwrap_err();
        assert!(matches!(err, PipelineError::NotRecognized(ref h) if h == "example.com"));
    }

    #[test]
    fn garbage_is_invalid_url() {
        assert!(matches!(
            Platform::classify("not a url"),
            Err(PipelineError::InvalidUrl(_))
        ));
    }

    #[test]
    fn non_http_scheme_is_invalid_url() {
        assert!(matches!(
            Platform::classify("ftp://tiktok.com/file"),
            Err(PipelineError::InvalidUrl(_))
        ));
        assert!(matches!(
            Platform::classify("mailto:someone@tiktok.com"),
            Err(PipelineError::InvalidUrl(_))
        ));
    }

    #[test]
    fn classification_is_stable() {
        let url = "https://music.apple.com/us/album/x/1?i=2";
        let first = Platform::from_url(url);
        for _ in 0..5 {
            assert_eq!(Platform::from_url(url), first);
        }
    }

    #[test]
    fn no_domain_registered_twice() {
        let mut seen = std::collections::HashSet::new();
        for platform in Platform::ALL {
            for domain in platform.domains() {
                assert!(seen.insert(*domain), "duplicate domain {}", domain);
            }
        }
    }

    #[test]
    fn no_domain_is_a_dotted_suffix_of_another() {
        let all: Vec<(Platform, &str)> = Platform::ALL
            .iter()
            .flat_map(|p| p.domains().iter().map(move |d| (*p, *d)))
            .collect();
        for (pa, a) in &all {
            for (pb, b) in &all {
                if pa != pb {
                    assert!(!host_matches(a, b), "{} shadows {}", b, a);
                }
            }
        }
    }
}
