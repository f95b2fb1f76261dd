//! Audience rewrites.

use insightgen_core::{Audience, Platform};

/// How `rewrite` treats backend failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, strum::Display)]
pub enum RewriteMode {
    /// Surface backend failures as errors
    #[default]
    Strict,
    /// Return the original content when the backend fails
    BestEffort,
}

/// Audience-specific rewrite instruction.
pub const fn audience_instruction(audience: Audience) -> &'static str {
    match audience {
        Audience::Technical => {
            "Use precise engineering terminology (e.g., \"latency\", \"vector embeddings\"). Assume the reader is a developer."
        }
        Audience::General => {
            "Use simple analogies. Explain \"why it matters\" rather than \"how it works\"."
        }
        Audience::Executive => "Focus on ROI and strategic advantage.",
        Audience::SystemDesign => {
            "Focus on architectural patterns and productive workflows. Use a learning/informative tone."
        }
    }
}

/// Prompt asking the backend to rewrite `content` for `audience`.
pub fn rewrite_prompt(content: &str, platform: Platform, audience: Audience) -> String {
    let name = platform.display_name();
    format!(
        r#"Role: Expert Social Media Editor.
Task: Rewrite the following {name} post for a {audience} audience.

Constraints:
1. Preserve Insight: Keep the original core facts and research. Do not hallucinate new data.
2. HUMANIZE (CRITICAL): Remove all robotic phrasing ("In the realm of", "It is crucial"). Use contractions, direct address ("You"), and variable sentence structure. Sound like a person, not a PR release.
3. Audience: {instruction}
4. Platform Optimization: Strictly adhere to character limits and formatting for {name} (max {max} characters).
5. Output: Return ONLY the rewritten post text. Do not include introductory text.

ORIGINAL CONTENT:
{content}"#,
        instruction = audience_instruction(audience),
        max = platform.spec().max_chars(),
    )
}
