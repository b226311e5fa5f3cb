use std::sync::LazyLock;

use regex::Regex;

use crate::commands::download::download_url;
use crate::commands::prompt::read_line;
use crate::core::pipeline::Pipeline;
use crate::models::settings::DownloadPathConfig;
use crate::platforms::Platform;

static URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S+").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Help,
    Quit,
    Clear,
    Path,
    /// `None` when `/setpath` had no argument.
    SetPath(Option<String>),
    Unknown(String),
}

pub fn parse_directive(line: &str) -> Option<Directive> {
    let rest = line.trim().strip_prefix('/')?;
    let (command, arg) = match rest.split_once(char::is_whitespace) {
        Some((c, a)) => (c, a.trim()),
        None => (rest, ""),
    };

    Some(match command.to_lowercase().as_str() {
        "help" => Directive::Help,
        "quit" | "exit" => Directive::Quit,
        "clear" => Directive::Clear,
        "path" => Directive::Path,
        "setpath" if arg.is_empty() => Directive::SetPath(None),
        "setpath" => Directive::SetPath(Some(arg.to_string())),
        other => Directive::Unknown(other.to_string()),
    })
}

/// First http(s) URL in free text. Sentence punctuation stuck to the end
/// of a pasted link is dropped.
pub fn extract_url(text: &str) -> Option<&str> {
    URL_RE
        .find_iter(text)
        .map(|m| m.as_str().trim_end_matches(['.', ',', ';', '!', '?', ')', '"', '\'']))
        .find(|candidate| url::Url::parse(candidate).is_ok_and(|u| u.has_host()))
}

fn print_banner() {
    println!();
    println!("  PRENIVDL");
    println!("  Paste a link to download, or type /help.");
    println!();
}

fn print_help() {
    println!();
    println!(" Available Commands:");
    println!("   • /help     - Show this help message");
    println!("   • /clear    - Clear the screen");
    println!("   • /quit     - Exit the application");
    println!("   • /path     - Show current download path");
    println!("   • /setpath  - Set custom download directory");
    println!();
    println!(" Supported Platforms:");
    for platform in Platform::ALL {
        println!(
            "   • {} ({})",
            platform.display_name(),
            platform.domains().join(", ")
        );
    }
    println!();
}

/// Line-oriented loop until `/quit`, `/exit` or end of input.
pub async fn run(pipeline: &Pipeline, paths: &mut DownloadPathConfig) {
    print_banner();

    while let Some(line) = read_line("prenivdl » ".to_string()).await {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(directive) = parse_directive(line) {
            match directive {
                Directive::Help => print_help(),
                Directive::Quit => break,
                Directive::Clear => {
                    print!("\x1B[2J\x1B[H");
                    print_banner();
                }
                Directive::Path => {
                    println!(" Current download path: {}", paths.current().display());
                    println!(" Use /setpath <new_path> to change download location");
                }
                Directive::SetPath(None) => {
                    println!(" Please provide a path. Usage: /setpath <directory_name>");
                }
                Directive::SetPath(Some(dir)) => {
                    paths.set(&dir);
                    println!(" Download path set to: {}", dir);
                }
                Directive::Unknown(command) => {
                    println!(" Unknown command: /{}", command);
                    println!(" Type /help for available commands.");
                }
            }
            continue;
        }

        match extract_url(line) {
            Some(url) => download_url(pipeline, url, None, paths).await,
            None => {
                println!(" • Please provide a social media URL to download from.");
                println!(" • Type /help to see supported platforms.");
            }
        }
        println!();
    }

    println!(" Thanks for using PRENIVDL!");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_are_case_insensitive() {
        assert_eq!(parse_directive("/HELP"), Some(Directive::Help));
        assert_eq!(parse_directive(" /exit "), Some(Directive::Quit));
        assert_eq!(parse_directive("/quit"), Some(Directive::Quit));
        assert_eq!(parse_directive("hello"), None);
    }

    #[test]
    fn setpath_keeps_spaces_in_argument() {
        assert_eq!(
            parse_directive("/setpath  my downloads "),
            Some(Directive::SetPath(Some("my downloads".into())))
        );
        assert_eq!(parse_directive("/setpath"), Some(Directive::SetPath(None)));
    }

    #[test]
    fn unknown_directive_is_reported() {
        assert_eq!(parse_directive("/nope"), Some(Directive::Unknown("nope".into())));
    }

    #[test]
    fn first_url_is_extracted_from_free_text() {
        assert_eq!(
            extract_url("check https://www.tiktok.com/@u/video/1 and http://x.com/b"),
            Some("https://www.tiktok.com/@u/video/1")
        );
        assert_eq!(extract_url("no link here"), None);
        assert_eq!(extract_url("ftp://files.example.com/a"), None);
    }

    #[test]
    fn trailing_punctuation_is_not_part_of_the_url() {
        assert_eq!(
            extract_url("look (https://bsky.app/profile/a/post/1)."),
            Some("https://bsky.app/profile/a/post/1")
        );
    }
}
