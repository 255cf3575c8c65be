//! Plain-text previews sized for social platforms, and export file naming.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::config::PreviewConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    X,
    LinkedIn,
    Instagram,
}

#[derive(Debug, Error)]
#[error("unknown platform `{0}` (expected x, linkedin or instagram)")]
pub struct UnknownPlatform(String);

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" | "twitter" => Ok(Platform::X),
            "linkedin" => Ok(Platform::LinkedIn),
            "instagram" | "ig" => Ok(Platform::Instagram),
            _ => Err(UnknownPlatform(s.to_string())),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Platform::X => "X",
            Platform::LinkedIn => "LinkedIn",
            Platform::Instagram => "Instagram",
        })
    }
}

/// Strip markup characters and cut the text to what the platform shows.
pub fn preview(content: &str, platform: Platform, config: &PreviewConfig) -> String {
    let clean: String = content
        .chars()
        .filter(|c| !config.strip_chars.contains(*c))
        .collect();

    match platform {
        Platform::X => truncate(&clean, config.x_limit).to_string(),
        Platform::Instagram => {
            format!("{}{}", truncate(&clean, config.instagram_limit), config.ellipsis)
        }
        Platform::LinkedIn => clean,
    }
}

pub(crate) fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// File name for a downloaded export: `{prefix}-{slug}.{extension}`.
///
/// Each whitespace run in the prompt becomes a single `-`, and the result is
/// lower-cased.
pub fn export_file_name(prompt: &str, prefix: &str, extension: &str) -> String {
    let mut slug = String::with_capacity(prompt.len());
    let mut in_whitespace = false;
    for ch in prompt.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
        } else {
            slug.extend(ch.to_lowercase());
            in_whitespace = false;
        }
    }
    format!("{prefix}-{slug}.{extension}")
}
