mod support;

use std::sync::Arc;
use support::StubStory;
use taleweaver_core::{GenerationRequest, StoryMode};
use taleweaver_error::{ProviderErrorKind, TaleweaverErrorKind};
use taleweaver_interface::StoryProvider;
use taleweaver_story::StoryGenerator;

const KITTEN: &str = "STORY:\nA girl finds a lost kitten.\nLOCATION: Willow Park\nCHOICES:\n1. Return the kitten\n2. Keep searching for its owner";

fn request(mode: StoryMode) -> GenerationRequest {
    GenerationRequest::builder()
        .prompt_text("an adventure about kindness")
        .mode(mode)
        .build()
        .unwrap()
}

fn generator(providers: Vec<Arc<StubStory>>) -> StoryGenerator {
    StoryGenerator::new(
        providers
            .into_iter()
            .map(|p| p as Arc<dyn StoryProvider>)
            .collect(),
    )
}

#[tokio::test]
async fn test_fresh_story_end_to_end() {
    let primary = StubStory::replying("primary", KITTEN);
    let result = generator(vec![primary.clone()])
        .generate(&request(StoryMode::Fresh))
        .await
        .unwrap();

    assert_eq!(result.story_text, "A girl finds a lost kitten.");
    assert_eq!(result.location, "Willow Park");
    assert_eq!(
        result.choices,
        vec!["Return the kitten", "Keep searching for its owner"]
    );
    assert_eq!(result.provider_used, "primary");
    assert_eq!(result.attempts.len(), 1);
    assert_eq!(primary.call_count(), 1);
}

#[tokio::test]
async fn test_continuation_with_plain_prose() {
    let prose = "The kitten purred all the way home, and everyone smiled.";
    let primary = StubStory::replying("primary", prose);
    let result = generator(vec![primary.clone()])
        .generate(&request(StoryMode::continuation("Return the kitten")))
        .await
        .unwrap();

    assert_eq!(result.story_text, prose);
    assert!(result.location.is_empty());
    assert!(result.choices.is_empty());

    let prompt = primary.last_prompt().unwrap();
    assert!(prompt.user.contains("Return the kitten"));
}

#[tokio::test]
async fn test_falls_back_when_primary_fails() {
    let primary = StubStory::failing("primary", ProviderErrorKind::Http("timeout".into()));
    let backup = StubStory::replying("backup", KITTEN);
    let result = generator(vec![primary.clone(), backup.clone()])
        .generate(&request(StoryMode::Fresh))
        .await
        .unwrap();

    assert_eq!(result.provider_used, "backup");
    assert_eq!(result.attempts.len(), 2);
    assert!(!result.attempts[0].succeeded);
    assert_eq!(result.attempts[0].provider_name, "primary");
    assert!(result.attempts[1].succeeded);
    assert_eq!(result.attempts[1].raw_text.as_deref(), Some(KITTEN));
    assert_eq!(primary.call_count(), 1);
    assert_eq!(backup.call_count(), 1);
}

#[tokio::test]
async fn test_all_providers_fail_in_order() {
    let primary = StubStory::failing("primary", ProviderErrorKind::Http("timeout".into()));
    let backup = StubStory::failing(
        "backup",
        ProviderErrorKind::Unauthorized("bad key".into()),
    );
    let err = generator(vec![primary, backup])
        .generate(&request(StoryMode::Fresh))
        .await
        .unwrap_err();

    let TaleweaverErrorKind::Generation(generation) = err.kind() else {
        panic!("expected generation error, got {err}");
    };
    let failures = generation.failures();
    assert_eq!(failures.len(), 2);
    assert_eq!(failures[0].provider, "primary");
    assert!(failures[0].reason.contains("timeout"));
    assert_eq!(failures[1].provider, "backup");
    assert!(failures[1].reason.contains("bad key"));
    assert!(err.to_string().contains("All providers exhausted"));
}

#[tokio::test]
async fn test_no_configured_provider_is_exhausted_with_no_failures() {
    let missing = StubStory::unconfigured("primary");
    let err = generator(vec![missing.clone()])
        .generate(&request(StoryMode::Fresh))
        .await
        .unwrap_err();

    let TaleweaverErrorKind::Generation(generation) = err.kind() else {
        panic!("expected generation error, got {err}");
    };
    assert!(generation.failures().is_empty());
    assert_eq!(missing.call_count(), 0);
}

#[tokio::test]
async fn test_unconfigured_provider_is_skipped() {
    let missing = StubStory::unconfigured("primary");
    let backup = StubStory::replying("backup", KITTEN);
    let result = generator(vec![missing.clone(), backup])
        .generate(&request(StoryMode::Fresh))
        .await
        .unwrap();

    assert_eq!(result.provider_used, "backup");
    assert_eq!(result.attempts.len(), 1);
    assert_eq!(missing.call_count(), 0);
}

#[tokio::test]
async fn test_choices_capped_at_three() {
    let chatty = "STORY: Many paths.\nCHOICES:\n1. A\n2. B\n3. C\n- D\n- E";
    let result = generator(vec![StubStory::replying("primary", chatty)])
        .generate(&request(StoryMode::Fresh))
        .await
        .unwrap();

    assert_eq!(result.choices, vec!["A", "B", "C"]);
}

#[tokio::test]
async fn test_ending_clears_choices() {
    let result = generator(vec![StubStory::replying("primary", KITTEN)])
        .generate(&request(StoryMode::Ending))
        .await
        .unwrap();

    assert_eq!(result.story_text, "A girl finds a lost kitten.");
    assert!(result.choices.is_empty());
}

#[tokio::test]
async fn test_health_check_skips_unreachable_provider() {
    let down = StubStory::unreachable("primary", KITTEN);
    let backup = StubStory::replying("backup", KITTEN);
    let result = generator(vec![down.clone(), backup.clone()])
        .with_probe_before_generate(true)
        .generate(&request(StoryMode::Fresh))
        .await
        .unwrap();

    assert_eq!(result.provider_used, "backup");
    assert_eq!(down.call_count(), 0);
    assert_eq!(backup.call_count(), 1);
    assert_eq!(result.attempts.len(), 1);
    assert_eq!(result.attempts[0].provider_name, "backup");
}

#[tokio::test]
async fn test_availability_alone_keeps_unreachable_provider() {
    let down = StubStory::unreachable("primary", KITTEN);
    let backup = StubStory::replying("backup", KITTEN);
    let result = generator(vec![down.clone(), backup.clone()])
        .generate(&request(StoryMode::Fresh))
        .await
        .unwrap();

    assert_eq!(result.provider_used, "primary");
    assert_eq!(down.call_count(), 1);
    assert_eq!(backup.call_count(), 0);
    assert_eq!(result.attempts.len(), 1);
}

#[tokio::test]
async fn test_health_check_still_skips_unconfigured_provider() {
    let missing = StubStory::unconfigured("primary");
    let backup = StubStory::replying("backup", KITTEN);
    let result = generator(vec![missing.clone(), backup])
        .with_probe_before_generate(true)
        .generate(&request(StoryMode::Fresh))
        .await
        .unwrap();

    assert_eq!(result.provider_used, "backup");
    assert_eq!(missing.call_count(), 0);
}
