//! Platform table, request validation and post assembly.

use std::str::FromStr;

use insightgen_core::{
    CharReport, GeneratedPost, GenerationRequest, GroundingSource, OptionFlags, Platform, Topic,
};
use strum::IntoEnumIterator;

#[test]
fn every_platform_has_consistent_spec() {
    for platform in Platform::iter() {
        let spec = platform.spec();
        assert!(spec.sweet_spot().0 <= spec.sweet_spot().1);
        assert!(spec.sweet_spot().1 <= *spec.max_chars());
    }
}

#[test]
fn only_medium_is_long_form() {
    let long_form: Vec<_> = Platform::iter().filter(|p| p.is_long_form()).collect();
    assert_eq!(long_form, vec![Platform::Medium]);
}

#[test]
fn compose_urls_are_https_and_facebook_opens_the_feed() {
    for platform in Platform::iter() {
        assert!(platform.compose_url().starts_with("https://"));
    }
    assert_eq!(Platform::Facebook.compose_url(), "https://www.facebook.com/");
}

#[test]
fn preview_cuts_on_char_boundary() {
    let text = "é".repeat(200);
    let preview = Platform::Instagram.spec().preview(&text);
    assert_eq!(preview.chars().count(), 125);
    assert_eq!(Platform::X.spec().preview(&text), text);
}

#[test]
fn names_round_trip_through_strum_and_serde() {
    assert_eq!(Platform::X.to_string(), "X (Twitter)");
    assert_eq!(Platform::from_str("X (Twitter)").ok(), Some(Platform::X));
    let json = serde_json::to_string(&Platform::Facebook).unwrap();
    assert_eq!(json, "\"Facebook\"");
}

#[test]
fn char_report_flags_sweet_spot() {
    let report = CharReport::measure(&"a".repeat(60), Platform::Facebook);
    assert!(*report.in_sweet_spot());
    assert!(*report.within_limit());

    let too_long = CharReport::measure(&"a".repeat(300), Platform::X);
    assert!(!*too_long.within_limit());
}

#[test]
fn custom_topic_requires_text() {
    let request = GenerationRequest::builder()
        .topic(Topic::Custom)
        .custom_topic(Some("   ".to_string()))
        .build()
        .unwrap();
    assert!(request.validate().is_err());

    let request = GenerationRequest::builder()
        .topic(Topic::Custom)
        .build()
        .unwrap();
    assert!(request.validate().is_err());
}

#[test]
fn custom_topic_text_is_used() {
    let request = GenerationRequest::builder()
        .topic(Topic::Custom)
        .custom_topic(Some("WebGPU inference".to_string()))
        .build()
        .unwrap();
    assert!(request.validate().is_ok());
    assert_eq!(request.effective_topic(), "WebGPU inference");
}

#[test]
fn named_topic_ignores_custom_text() {
    let request = GenerationRequest::builder()
        .topic(Topic::named("LLM Architectures"))
        .custom_topic(Some("ignored".to_string()))
        .build()
        .unwrap();
    assert_eq!(request.effective_topic(), "LLM Architectures");
}

#[test]
fn default_flags_enable_emoji_and_hashtags() {
    let flags = OptionFlags::default();
    assert!(flags.emoji && flags.hashtags);
    assert!(!flags.cta);

    let flags = flags.with_tldr(true).with_emoji(false);
    assert!(flags.tldr);
    assert!(!flags.emoji);
}

fn post(content: &str) -> GeneratedPost {
    GeneratedPost::builder()
        .research_summary("summary")
        .content_angle("General")
        .content(content)
        .sources(vec![
            GroundingSource::new("Paper", "https://arxiv.example/1"),
            GroundingSource::new("Blog", "https://blog.example/2"),
        ])
        .build()
        .unwrap()
}

#[test]
fn builder_defaults_optional_parts() {
    let post = post("Hi");
    assert!(post.hashtags().is_empty());
    assert!(post.image_url().is_none());
}

#[test]
fn sources_render_one_per_line() {
    assert_eq!(
        post("x").sources_as_text(),
        "Paper: https://arxiv.example/1\nBlog: https://blog.example/2"
    );
}

#[test]
fn only_image_and_content_are_replaceable() {
    let mut post = post("draft");
    post.set_content("final");
    post.set_image_url(Some("https://cdn.example/a.png".to_string()));
    assert_eq!(post.content(), "final");
    assert_eq!(post.image_url().as_deref(), Some("https://cdn.example/a.png"));
    assert_eq!(post.research_summary(), "summary");
}

#[test]
fn char_report_counts_scalar_values() {
    let report = post("héllo").char_report(Platform::X);
    assert_eq!(*report.count(), 5);
    assert!(*report.within_limit());
}
