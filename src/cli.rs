use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::platforms::Platform;

/// Social media downloader: paste a post link, pick a variant, get a file.
#[derive(Debug, Parser)]
#[command(name = "prenivdl", version)]
#[command(about = "Download media from social platforms through aggregator APIs", long_about = None)]
pub struct Cli {
    /// Download directory (default: "resultdownload_preniv", or the configured one).
    #[arg(short, long, global = true, value_name = "DIR")]
    pub path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Args)]
pub struct UrlArg {
    /// Post, video or track URL.
    pub url: String,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Start interactive mode.
    #[command(alias = "i")]
    Interactive,

    /// Resolve a URL and print the media descriptor as JSON.
    Info(UrlArg),

    /// Download from TikTok.
    #[command(alias = "tt")]
    Tiktok(UrlArg),

    /// Download from Facebook.
    #[command(alias = "fb")]
    Facebook(UrlArg),

    /// Download from Instagram.
    #[command(alias = "ig")]
    Instagram(UrlArg),

    /// Download from Twitter/X.
    #[command(alias = "tw")]
    Twitter(UrlArg),

    /// Download from Douyin.
    #[command(alias = "dy")]
    Douyin(UrlArg),

    /// Download from Spotify.
    #[command(alias = "sp")]
    Spotify(UrlArg),

    /// Download from Pinterest.
    #[command(alias = "pin")]
    Pinterest(UrlArg),

    /// Download from Apple Music.
    #[command(name = "applemusic", alias = "am")]
    AppleMusic(UrlArg),

    /// Download from YouTube.
    #[command(alias = "yt")]
    Youtube(UrlArg),

    /// Download from CapCut.
    #[command(alias = "cc")]
    Capcut(UrlArg),

    /// Download from Bluesky.
    #[command(alias = "bsky")]
    Bluesky(UrlArg),

    /// Download from RedNote (Xiaohongshu).
    #[command(alias = "xhs")]
    Rednote(UrlArg),

    /// Download from Threads.
    #[command(alias = "th")]
    Threads(UrlArg),
}

impl CliCommand {
    /// Platform subcommands resolve through their own endpoints even when the
    /// URL host says otherwise.
    pub fn platform_target(&self) -> Option<(Platform, &str)> {
        let (platform, arg) = match self {
            CliCommand::Tiktok(a) => (Platform::TikTok, a),
            CliCommand::Facebook(a) => (Platform::Facebook, a),
            CliCommand::Instagram(a) => (Platform::Instagram, a),
            CliCommand::Twitter(a) => (Platform::Twitter, a),
            CliCommand::Douyin(a) => (Platform::Douyin, a),
            CliCommand::Spotify(a) => (Platform::Spotify, a),
            CliCommand::Pinterest(a) => (Platform::Pinterest, a),
            CliCommand::AppleMusic(a) => (Platform::AppleMusic, a),
            CliCommand::Youtube(a) => (Platform::YouTube, a),
            CliCommand::Capcut(a) => (Platform::CapCut, a),
            CliCommand::Bluesky(a) => (Platform::Bluesky, a),
            CliCommand::Rednote(a) => (Platform::RedNote, a),
            CliCommand::Threads(a) => (Platform::Threads, a),
            CliCommand::Interactive | CliCommand::Info(_) => return None,
        };
        Some((platform, arg.url.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_command_means_interactive() {
        let cli = Cli::try_parse_from(["prenivdl"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.path.is_none());
    }

    #[test]
    fn alias_maps_to_platform() {
        let cli = Cli::try_parse_from(["prenivdl", "am", "https://music.apple.com/x"]).unwrap();
        let (platform, url) = cli.command.as_ref().unwrap().platform_target().unwrap();
        assert_eq!(platform, Platform::AppleMusic);
        assert_eq!(url, "https://music.apple.com/x");
    }

    #[test]
    fn global_path_after_subcommand() {
        let cli = Cli::try_parse_from([
            "prenivdl",
            "tiktok",
            "https://www.tiktok.com/@u/video/1",
            "--path",
            "clips",
        ])
        .unwrap();
        assert_eq!(cli.path, Some(PathBuf::from("clips")));
    }

    #[test]
    fn info_is_not_a_download_target() {
        let cli = Cli::try_parse_from(["prenivdl", "info", "https://x.com/a/status/1"]).unwrap();
        assert!(cli.command.unwrap().platform_target().is_none());
    }

    #[test]
    fn every_platform_has_a_subcommand() {
        let names: Vec<String> = Cli::command()
            .get_subcommands()
            .map(|c| c.get_name().to_string())
            .collect();
        for platform in Platform::ALL {
            assert!(names.iter().any(|n| n == platform.as_str()), "{}", platform);
        }
    }
}
