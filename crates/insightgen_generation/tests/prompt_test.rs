//! Prompt rendering for posts, images and rewrites.

use insightgen_core::{
    AspectRatio, Audience, GenerationRequest, ImageStyle, OptionFlags, Platform, Tone, Topic,
};
use insightgen_generation::{
    ImageOptions, angle_instruction, build_prompt, image_prompt, platform_strategy,
    rewrite_prompt,
};
use strum::IntoEnumIterator;

fn request(options: OptionFlags) -> GenerationRequest {
    GenerationRequest::builder()
        .platform(Platform::LinkedIn)
        .topic(Topic::named("RAG & Vector DBs"))
        .tone(Tone::Educational)
        .options(options)
        .build()
        .unwrap()
}

#[test]
fn sections_appear_in_fixed_order() {
    let prompt = build_prompt(&request(OptionFlags::default().with_tldr(true)), true);
    let positions: Vec<usize> = [
        "Constraint: LinkedIn",
        "Hard Data",
        "Angle: Educational",
        "TL;DR",
        "\"researchSummary\"",
    ]
    .iter()
    .map(|needle| prompt.find(needle).expect(needle))
    .collect();

    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
}

#[test]
fn inactive_flags_contribute_nothing() {
    let flags = OptionFlags::default();
    let prompt = build_prompt(&request(flags), true);
    assert!(!prompt.contains("TL;DR"));
    assert!(!prompt.contains("Devil's Advocate"));
    assert!(!prompt.contains("Call to Action"));
    assert!(!prompt.contains("Prompt Chain"));
}

#[test]
fn emoji_and_hashtags_always_contribute() {
    let on = build_prompt(&request(OptionFlags::default()), true);
    assert!(on.contains("Use emojis naturally"));
    assert!(on.contains("3-5 relevant hashtags"));

    let off = build_prompt(
        &request(
            OptionFlags::default()
                .with_emoji(false)
                .with_hashtags(false),
        ),
        true,
    );
    assert!(off.contains("NO emojis."));
    assert!(off.contains("NO hashtags."));
}

#[test]
fn architectural_tone_is_elaborated() {
    assert!(angle_instruction(Tone::Architectural).contains("Productive workflows"));
    assert_eq!(angle_instruction(Tone::Skeptical), "Skeptical");
}

#[test]
fn every_strategy_carries_its_sweet_spot() {
    for platform in Platform::iter() {
        let (low, high) = *platform.spec().sweet_spot();
        let block = platform_strategy(platform);
        assert!(
            block.contains(&format!("{}-{}", low, high)),
            "{platform}: {block}"
        );
    }
    assert!(platform_strategy(Platform::Medium).contains("3000-6000"));
}

#[test]
fn emphasis_contract_follows_setting() {
    let strict = build_prompt(&request(OptionFlags::default()), true);
    assert!(strict.contains("Do not use asterisks"));
    let markdown = build_prompt(&request(OptionFlags::default()), false);
    assert!(markdown.contains("formatted with Markdown"));
}

fn image_request(platform: Platform) -> GenerationRequest {
    GenerationRequest::builder()
        .platform(platform)
        .topic(Topic::named("LLM Architectures"))
        .tone(Tone::Visionary)
        .build()
        .unwrap()
}

#[test]
fn aspect_ratio_defaults_per_platform() {
    let options = ImageOptions::default();
    assert_eq!(
        options.resolve_aspect_ratio(&image_request(Platform::Instagram)),
        AspectRatio::Square
    );
    assert_eq!(
        options.resolve_aspect_ratio(&image_request(Platform::Facebook)),
        AspectRatio::Landscape
    );
    assert_eq!(
        options.resolve_aspect_ratio(&image_request(Platform::LinkedIn)),
        AspectRatio::Widescreen
    );
}

#[test]
fn explicit_aspect_ratio_wins() {
    let options = ImageOptions {
        aspect_ratio: Some(AspectRatio::Tall),
        ..Default::default()
    };
    assert_eq!(
        options.resolve_aspect_ratio(&image_request(Platform::Instagram)),
        AspectRatio::Tall
    );
}

#[test]
fn topic_prompt_names_style_mood_and_ratio() {
    let request = image_request(Platform::X);
    let options = ImageOptions::with_style(ImageStyle::Cyberpunk);
    let prompt = image_prompt(&request, &options, AspectRatio::Widescreen);

    assert!(prompt.contains("X (Twitter) post about: \"LLM Architectures\""));
    assert!(prompt.contains("Style: Cyberpunk art style."));
    assert!(prompt.contains("Mood: Visionary."));
    assert!(prompt.contains("Aspect Ratio: 16:9."));
    assert!(prompt.contains("Do not include any text"));
}

#[test]
fn blank_description_falls_back_to_topic() {
    let request = image_request(Platform::X);
    let options = ImageOptions {
        description: Some("   ".to_string()),
        ..Default::default()
    };
    let prompt = image_prompt(&request, &options, AspectRatio::Square);
    assert!(prompt.contains("LLM Architectures"));

    let options = ImageOptions {
        description: Some("a robot watering plants".to_string()),
        ..Default::default()
    };
    let prompt = image_prompt(&request, &options, AspectRatio::Square);
    assert!(prompt.contains("based on this description: \"a robot watering plants\""));
    assert!(!prompt.contains("LLM Architectures"));
}

#[test]
fn prompt_carries_audience_and_content() {
    let prompt = rewrite_prompt("Original text", Platform::LinkedIn, Audience::SystemDesign);
    assert!(prompt.contains("for a System Design audience"));
    assert!(prompt.contains("architectural patterns"));
    assert!(prompt.ends_with("Original text"));
    assert!(prompt.contains("max 3000 characters"));
}
