use std::io::Write;

use async_trait::async_trait;

use crate::models::media::{MediaDescriptor, MediaVariant, Selection};
use crate::platforms::traits::VariantSelector;

pub const NO_TITLE: &str = "No title";
pub const UNKNOWN_AUTHOR: &str = "Unknown artist";

/// Prints `prompt` and reads one line from stdin without blocking the
/// runtime. `None` on end of input or a read error.
pub async fn read_line(prompt: String) -> Option<String> {
    tokio::task::spawn_blocking(move || {
        let mut out = std::io::stdout().lock();
        let _ = write!(out, "{}", prompt);
        let _ = out.flush();
        drop(out);

        let mut line = String::new();
        match std::io::stdin().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    })
    .await
    .ok()
    .flatten()
}

pub fn print_descriptor(descriptor: &MediaDescriptor) {
    println!();
    println!(" {} media:", descriptor.platform.display_name());
    println!("   • Title: {}", descriptor.title.as_deref().unwrap_or(NO_TITLE));
    println!(
        "   • Author: {}",
        descriptor.author.as_deref().unwrap_or(UNKNOWN_AUTHOR)
    );
    for (key, value) in &descriptor.metadata {
        if key == "thumbnail" {
            continue;
        }
        let text = match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        println!("   • {}: {}", key, text);
    }
    println!();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Index(usize),
    All,
    Cancel,
}

/// Interprets one answer to the variant menu. `None` means "ask again".
pub fn parse_choice(input: &str, variant_count: usize) -> Option<Choice> {
    let answer = input.trim().to_lowercase();
    match answer.as_str() {
        "0" | "c" | "cancel" | "q" => Some(Choice::Cancel),
        "a" | "all" if variant_count > 1 => Some(Choice::All),
        other => other
            .parse::<usize>()
            .ok()
            .filter(|n| (1..=variant_count).contains(n))
            .map(|n| Choice::Index(n - 1)),
    }
}

fn render_menu(variants: &[&MediaVariant]) -> String {
    let mut menu = String::from(" Select download option:\n");
    for (i, v) in variants.iter().enumerate() {
        menu.push_str(&format!("   {}) {} [{}]\n", i + 1, v.label, v.kind));
    }
    if variants.len() > 1 {
        menu.push_str("   a) Download All\n");
    }
    menu.push_str("   0) Cancel\n");
    menu
}

/// Numbered terminal menu over stdin/stdout.
pub struct PromptSelector;

#[async_trait]
impl VariantSelector for PromptSelector {
    async fn present_choices(&self, descriptor: &MediaDescriptor) -> Selection {
        print_descriptor(descriptor);

        let variants: Vec<&MediaVariant> = descriptor.variants().collect();
        if let [only] = variants.as_slice() {
            return Selection::Single((*only).clone());
        }

        print!("{}", render_menu(&variants));
        loop {
            let Some(answer) = read_line(" » ".to_string()).await else {
                return Selection::Cancelled;
            };
            match parse_choice(&answer, variants.len()) {
                Some(Choice::Index(i)) => return Selection::Single(variants[i].clone()),
                Some(Choice::All) => {
                    return Selection::All(variants.iter().map(|v| (*v).clone()).collect())
                }
                Some(Choice::Cancel) => return Selection::Cancelled,
                None => println!(" Enter 1-{}, 'a' for all, or 0 to cancel.", variants.len()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::media::MediaKind;

    #[test]
    fn numbers_pick_one_based_variants() {
        assert_eq!(parse_choice("1", 3), Some(Choice::Index(0)));
        assert_eq!(parse_choice(" 3 ", 3), Some(Choice::Index(2)));
        assert_eq!(parse_choice("4", 3), None);
    }

    #[test]
    fn all_only_offered_for_several_variants() {
        assert_eq!(parse_choice("a", 2), Some(Choice::All));
        assert_eq!(parse_choice("ALL", 2), Some(Choice::All));
        assert_eq!(parse_choice("a", 1), None);
    }

    #[test]
    fn cancel_words() {
        for input in ["0", "c", "Cancel", "q"] {
            assert_eq!(parse_choice(input, 2), Some(Choice::Cancel));
        }
        assert_eq!(parse_choice("", 2), None);
        assert_eq!(parse_choice("maybe", 2), None);
    }

    #[test]
    fn menu_lists_download_all_for_batches() {
        let a = MediaVariant::new(MediaKind::Image, "u1", "Image 1", None);
        let b = MediaVariant::new(MediaKind::Image, "u2", "Image 2", None);
        let menu = render_menu(&[&a, &b]);
        assert!(menu.contains("1) Image 1 [image]"));
        assert!(menu.contains("a) Download All"));
        assert!(!render_menu(&[&a]).contains("Download All"));
    }

    #[tokio::test]
    async fn single_variant_skips_the_prompt() {
        let d = crate::models::media::DescriptorBuilder::new(crate::platforms::Platform::Threads)
            .variant(MediaVariant::new(MediaKind::Video, "https://cdn/v.mp4", "HD", None))
            .build()
            .unwrap();
        match PromptSelector.present_choices(&d).await {
            Selection::Single(v) => assert_eq!(v.label, "HD"),
            other => panic!("unexpected selection: {:?}", other),
        }
    }
}
