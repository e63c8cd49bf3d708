//! Prompt Composer — maps (topic, category, platform) to a system/user prompt pair.
//!
//! Pure: no I/O, no state. The platform table is passed in by reference.

use crate::content::platforms::{PlatformSpec, PlatformTable};
use crate::content::prompts::{
    DEFAULT_CATEGORY, EDITORIAL_GUIDELINES, OUTPUT_FORMAT_INSTRUCTION, SYSTEM_PROMPT,
};
use crate::errors::AppError;

/// The two prompts sent to the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

/// Builds the prompt pair for one generation request.
///
/// Fails with `InvalidTopic` when `topic` is blank and with `InvalidPlatform`
/// when `platform` is not in the table. A blank `category` falls back to
/// `DEFAULT_CATEGORY`.
pub fn compose(
    topic: &str,
    category: Option<&str>,
    platform: &str,
    platforms: &PlatformTable,
) -> Result<PromptPair, AppError> {
    if topic.trim().is_empty() {
        return Err(AppError::InvalidTopic);
    }

    let spec = platforms
        .get(platform)
        .ok_or_else(|| AppError::InvalidPlatform {
            platform: platform.to_string(),
            supported: platforms.keys(),
        })?;

    let category = category
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CATEGORY);

    Ok(PromptPair {
        system: SYSTEM_PROMPT.to_string(),
        user: build_user_prompt(topic, category, platform, spec),
    })
}

fn build_user_prompt(topic: &str, category: &str, platform: &str, spec: &PlatformSpec) -> String {
    let mut requirements = vec![
        format!("Tone: {}", spec.tone),
        format!("Length: {}", spec.length),
        format!("Style: {}", spec.style),
        format!(
            "Include {} relevant hashtags at the end",
            spec.hashtag_count
        ),
    ];
    requirements.extend(EDITORIAL_GUIDELINES.iter().map(|g| g.to_string()));

    let requirements = requirements
        .iter()
        .map(|r| format!("- {r}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Create a {} post about this trending topic:\n\n\
         \"{topic}\"\n\n\
         Category: {category}\n\n\
         Requirements:\n{requirements}\n\n\
         {OUTPUT_FORMAT_INSTRUCTION}",
        platform.to_uppercase()
    )
}
