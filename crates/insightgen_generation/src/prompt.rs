//! Prompt construction for the grounded text call.

use std::borrow::Cow;
use std::fmt::Write;

use insightgen_core::{GenerationRequest, OptionFlags, Platform, Tone};

/// System instruction sent with every grounded text call.
pub const SYSTEM_INSTRUCTION: &str = r#"Role: You are an expert Social Media Growth Engineer and Copywriter. Your primary constraint is to generate high-value content that strictly adheres to specific character limits and "Sweet Spot" ranges.

### ANTI-ROBOT PROTOCOL (CRITICAL)
- ABSOLUTELY FORBIDDEN PHRASES: "In the ever-evolving landscape", "Delve into", "Game-changer", "Unlock the power", "It is important to note", "In summary", "Let's explore", "A testament to", "Buckle up".
- Tone: 100% Human. Conversational, opinionated, and authentic. Use "I" and "We" to sound personal.
- Style: Use contractions ("it's" not "it is"). Start sentences with "And", "But", or "So" to maintain flow. Vary sentence length. Use sentence fragments for impact.
- Formatting: Do NOT use a wall of emojis. Do NOT use standard AI bullet point structures (e.g. "Here are 3 benefits:"). Weave points into the narrative or use unique formatting.

### RESEARCH PROTOCOL (MANDATORY)
1. Fact-Check: Never make generic claims. Find a specific paper, benchmark, or company update.
2. Cross-Reference: Search for information across high-authority sources.
3. Deep Thinking: Analyze the "Why" and the "How."

### STRICT LENGTH OPTIMIZATION
You must strictly adhere to the character limits for the chosen platform.
- LinkedIn: 1,000-1,500 chars (Sweet Spot). HOOK MUST BE UNDER 140 CHARS.
- Facebook: 40-80 chars (Sweet Spot).
- X (Twitter): 240-259 chars (Sweet Spot). No fluff.
- Instagram: 125-150 chars (Sweet Spot).
- Medium: 3,000-6,000 chars. Structured long-form with headings.
"#;

const ARCHITECTURAL_ANGLE: &str = "System Design & Engineering Patterns. Focus on 'How to design' and 'Productive workflows'. Structure the information so it is easy to understand for all audiences (Learning & Informative tone). Use analogies for complex concepts.";

const RESEARCH_PROTOCOL: &str = r#"Use Google Search to find 3 distinct types of information from the last 2 weeks:
1. Hard Data: A specific benchmark, cost metric, latency number, or financial figure.
2. Industry News/Magazines: A recent article from a major tech publication (Wired, Verge, TechCrunch) or a top engineering blog.
3. Community Pulse: A controversial opinion or debate currently happening in the AI community.
Constraint: Do not just invent facts. Find real ones."#;

/// Voice and structure directives of one platform.
struct StrategyBlock {
    heading: &'static str,
    directives: &'static [&'static str],
}

const LINKEDIN_STRATEGY: StrategyBlock = StrategyBlock {
    heading: "LinkedIn (Professional Insights)",
    directives: &[
        "VOICE: 100% Human. No corporate jargon. Write like a senior engineer sharing a war story or a hot take.",
        "Structure: Hook (under 140 chars) -> Context -> Insight -> Conclusion/Ask.",
        "Anti-Patterns: No \"In today's landscape\". No \"It is important to note\".",
    ],
};

const X_STRATEGY: StrategyBlock = StrategyBlock {
    heading: "X / Twitter (Concise & Real-Time)",
    directives: &[
        "VOICE: Insider, punchy, slightly colloquial. Use lowercase if it fits the vibe.",
        "Format: Thread-starter style or singular impact statement.",
    ],
};

const FACEBOOK_STRATEGY: StrategyBlock = StrategyBlock {
    heading: "Facebook (Relatable Storytelling)",
    directives: &[
        "VOICE: Casual, \"Update for friends\" vibe. Not \"Brand Announcement\" vibe.",
        "If the topic is complex, max 250 characters.",
    ],
};

const INSTAGRAM_STRATEGY: StrategyBlock = StrategyBlock {
    heading: "Instagram (Visual First)",
    directives: &["VOICE: Aesthetic, mood-setting, personal."],
};

const MEDIUM_STRATEGY: StrategyBlock = StrategyBlock {
    heading: "Medium (Long-form Blog)",
    directives: &[],
};

fn strategy_block(platform: Platform) -> &'static StrategyBlock {
    match platform {
        Platform::LinkedIn => &LINKEDIN_STRATEGY,
        Platform::X => &X_STRATEGY,
        Platform::Facebook => &FACEBOOK_STRATEGY,
        Platform::Instagram => &INSTAGRAM_STRATEGY,
        Platform::Medium => &MEDIUM_STRATEGY,
    }
}

/// Render the strategy block of `platform`, including its limits.
///
/// Lengths come from the platform's [`PlatformSpec`](insightgen_core::PlatformSpec).
pub fn platform_strategy(platform: Platform) -> String {
    let block = strategy_block(platform);
    let spec = platform.spec();
    let (low, high) = *spec.sweet_spot();

    let mut out = format!("Constraint: {}\n", block.heading);
    for directive in block.directives {
        let _ = writeln!(out, "- {}", directive);
    }
    if !platform.is_long_form() {
        let _ = writeln!(out, "- Technical Limit: {} characters.", spec.max_chars());
    }
    let _ = writeln!(out, "- Target Length: {}-{} characters (Sweet Spot).", low, high);
    if let Some(cutoff) = spec.cutoff() {
        let _ = writeln!(
            out,
            "- \"See More\" Cutoff: ~{} chars. Put the hook immediately.",
            cutoff
        );
    }
    out
}

/// Angle instruction for `tone`.
///
/// The structured/system-design tone expands to a full instruction; the
/// others pass their name through.
pub fn angle_instruction(tone: Tone) -> Cow<'static, str> {
    match tone {
        Tone::Architectural => Cow::Borrowed(ARCHITECTURAL_ANGLE),
        other => Cow::Owned(other.to_string()),
    }
}

/// Conditional fragments in their fixed order.
///
/// Inactive flags contribute nothing, except emoji and hashtags which always
/// contribute either an instruction or an explicit suppression.
fn option_fragments(options: &OptionFlags) -> Vec<&'static str> {
    let conditional: [(bool, &'static str); 7] = [
        (
            options.comparison_format,
            "STRUCTURE: Strict \"Before vs After\" or \"Old Way vs New Way\" comparison format.",
        ),
        (
            options.cta,
            "ACTION: Include a strong, direct Call to Action (e.g., \"Check the link in comments\") alongside the question.",
        ),
        (
            options.tldr,
            "SUMMARY: Append a \"TL;DR\" section at the very bottom.",
        ),
        (
            options.future_outlook,
            "FUTURE LENS: Include a \"Future Outlook\" section (6-12 month prediction).",
        ),
        (
            options.counterpoint,
            "COUNTERPOINT: Include a \"Devil's Advocate\" section.",
        ),
        (
            options.implementation_steps,
            "ACTION PLAN: Include a 3-step \"Implementation Plan\".",
        ),
        (options.prompt_chain, "Include a \"Prompt Chain\" example."),
    ];

    let mut fragments: Vec<&'static str> = conditional
        .into_iter()
        .filter_map(|(active, fragment)| active.then_some(fragment))
        .collect();

    fragments.push(if options.emoji {
        "Use emojis naturally (max 2-3 unique ones)."
    } else {
        "NO emojis."
    });
    fragments.push(if options.hashtags {
        "Return 3-5 relevant hashtags in the \"hashtags\" array. Do not put them in the post body."
    } else {
        "NO hashtags. Return an empty \"hashtags\" array."
    });
    fragments
}

fn output_contract(strip_emphasis: bool) -> String {
    let body_format = if strip_emphasis {
        "The actual social media post text as plain text. Do not use asterisks (*) for bold, italics or bullets."
    } else {
        "The actual social media post text, formatted with Markdown."
    };

    format!(
        r#"Return a valid JSON object with these keys. Ensure all strings are properly escaped (e.g. escape " quotes inside the content).
{{
  "researchSummary": "A concise summary of the specific papers, articles, or data points you found. Mention the source names.",
  "contentAngle": "The specific angle taken.",
  "postContent": "{}",
  "hashtags": ["tag1", "tag2"]
}}"#,
        body_format
    )
}

/// Build the complete instruction for the grounded text call.
///
/// Order: platform strategy, research protocol, angle, option fragments,
/// output contract. The request must already be validated; a `Custom` topic
/// with no text renders an empty topic.
pub fn build_prompt(request: &GenerationRequest, strip_emphasis: bool) -> String {
    let platform = *request.platform();
    let topic = request.effective_topic();
    let name = platform.display_name();

    let mut prompt = format!(
        "TASK: Perform DEEP RESEARCH and write a viral, high-engagement {} post about \"{}\".\n\n",
        name, topic
    );

    let _ = writeln!(prompt, "STEP 1: PLATFORM STRATEGY");
    let _ = writeln!(prompt, "{}", platform_strategy(platform));

    let _ = writeln!(prompt, "STEP 2: DEEP WEB SEARCH (MANDATORY)");
    let _ = writeln!(prompt, "{}\n", RESEARCH_PROTOCOL);

    let _ = writeln!(prompt, "STEP 3: SYNTHESIS & ANGLE");
    let _ = writeln!(
        prompt,
        "Identify the \"So What?\". Why does this matter to a human engineer or business leader right now?"
    );
    let _ = writeln!(
        prompt,
        "Filter: Identify the 3 most important points that will resonate with the {} audience.",
        name
    );
    let _ = writeln!(prompt, "Angle: {}.\n", angle_instruction(*request.tone()));

    let _ = writeln!(prompt, "STEP 4: WRITE POST");
    let _ = writeln!(prompt, "1. Analyze: Review research from Step 2.");
    let _ = writeln!(prompt, "2. Filter: Pick top points for {}.", name);
    let _ = writeln!(
        prompt,
        "3. Draft: Write the post. CAREFULLY COUNT CHARACTERS. Do not truncate vital info."
    );
    let _ = writeln!(
        prompt,
        "4. Review (HUMAN CHECK): Does it sound like a robot? If yes, rewrite it. Remove \"In conclusion\", \"Moreover\", \"Furthermore\"."
    );
    let _ = writeln!(prompt, "\nADDITIONAL INSTRUCTIONS:");
    for fragment in option_fragments(request.options()) {
        let _ = writeln!(prompt, "- {}", fragment);
    }

    let _ = writeln!(prompt, "\nSTEP 5: FORMAT OUTPUT");
    prompt.push_str(&output_contract(strip_emphasis));
    prompt
}
