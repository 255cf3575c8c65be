use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::config::RepurposeConfig;
use crate::preview::truncate;

const REPURPOSE_TAG: &str = "[REPURPOSE]";

/// Content formats an existing result can be recycled into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    AdsCopy,
    Carousel,
    SocialPost,
    BatchGen,
}

#[derive(Debug, Error)]
#[error("unknown repurpose target `{0}` (expected ads_copy, carousel, social_post or batch_gen)")]
pub struct UnknownTarget(String);

impl FromStr for Target {
    type Err = UnknownTarget;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "ads_copy" => Ok(Target::AdsCopy),
            "carousel" => Ok(Target::Carousel),
            "social_post" => Ok(Target::SocialPost),
            "batch_gen" => Ok(Target::BatchGen),
            _ => Err(UnknownTarget(s.to_string())),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Target::AdsCopy => "ADS_COPY",
            Target::Carousel => "CAROUSEL",
            Target::SocialPost => "SOCIAL_POST",
            Target::BatchGen => "BATCH_GEN",
        })
    }
}

/// Build the follow-up prompt that turns existing content into another format.
///
/// Only the first `source_limit` characters of the content are quoted, and the
/// quote always ends in `...`.
pub fn repurpose_prompt(content: &str, target: Target, config: &RepurposeConfig) -> String {
    format!(
        "{REPURPOSE_TAG} Transform this content into a {target}: {}...",
        truncate(content, config.source_limit)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_targets() {
        assert_eq!("ads_copy".parse::<Target>().unwrap(), Target::AdsCopy);
        assert_eq!("SOCIAL_POST".parse::<Target>().unwrap(), Target::SocialPost);
        assert_eq!("batch-gen".parse::<Target>().unwrap(), Target::BatchGen);
        assert_eq!("Carousel".parse::<Target>().unwrap(), Target::Carousel);
        assert!("video".parse::<Target>().is_err());
    }

    #[test]
    fn short_content_is_quoted_whole() {
        assert_eq!(
            repurpose_prompt("# Launch *today*", Target::Carousel, &RepurposeConfig::default()),
            "[REPURPOSE] Transform this content into a CAROUSEL: # Launch *today*..."
        );
    }

    #[test]
    fn long_content_is_cut_at_source_limit() {
        let content = "a".repeat(1000);
        let prompt = repurpose_prompt(&content, Target::AdsCopy, &RepurposeConfig::default());
        let prefix = "[REPURPOSE] Transform this content into a ADS_COPY: ";
        assert_eq!(prompt, format!("{prefix}{}...", "a".repeat(800)));
    }

    #[test]
    fn cut_respects_char_boundaries() {
        let content = "é".repeat(801);
        let prompt = repurpose_prompt(&content, Target::SocialPost, &RepurposeConfig::default());
        assert!(prompt.ends_with(&format!(": {}...", "é".repeat(800))));

        let config = RepurposeConfig { source_limit: 2 };
        assert_eq!(
            repurpose_prompt("🚀🚀🚀", Target::BatchGen, &config),
            "[REPURPOSE] Transform this content into a BATCH_GEN: 🚀🚀..."
        );
    }
}
