use chrono::{TimeZone, Utc};
use std::str::FromStr;
use strum::IntoEnumIterator;
use taleweaver_core::{
    AgeBand, CompletedBook, Coordinates, GenerationRequest, PageKey, StoryMode,
};

#[test]
fn test_age_band_boundaries() {
    let cases = [
        (0, AgeBand::Toddler),
        (3, AgeBand::Toddler),
        (4, AgeBand::Preschool),
        (5, AgeBand::Preschool),
        (6, AgeBand::EarlyReader),
        (7, AgeBand::EarlyReader),
        (8, AgeBand::MiddleGrade),
        (10, AgeBand::MiddleGrade),
        (11, AgeBand::PreTeen),
        (13, AgeBand::PreTeen),
        (14, AgeBand::Teen),
        (99, AgeBand::Teen),
    ];
    for (age, band) in cases {
        assert_eq!(AgeBand::from_age(age), band, "age {}", age);
    }
}

#[test]
fn test_age_band_choice_ceiling() {
    let ceilings: Vec<usize> = AgeBand::iter().map(|band| band.max_choices()).collect();
    assert_eq!(ceilings, vec![2, 2, 3, 3, 3, 3]);
}

#[test]
fn test_age_band_names() {
    assert_eq!(AgeBand::EarlyReader.to_string(), "early_reader");
    assert_eq!(AgeBand::from_str("pre_teen").unwrap(), AgeBand::PreTeen);
    assert_eq!(
        serde_json::to_string(&AgeBand::MiddleGrade).unwrap(),
        "\"middle_grade\""
    );
}

#[test]
fn test_story_mode_wire_format() {
    let json = serde_json::to_value(StoryMode::continuation("Open the door")).unwrap();
    assert_eq!(json["mode"], "continuation");
    assert_eq!(json["previous_choice"], "Open the door");

    let ending: StoryMode = serde_json::from_str(r#"{"mode":"ending"}"#).unwrap();
    assert!(ending.is_ending());
    assert_eq!(ending.previous_choice(), None);
    assert_eq!(StoryMode::default(), StoryMode::Fresh);
}

#[test]
fn test_request_defaults() {
    let request = GenerationRequest::builder()
        .prompt_text("An interactive adventure about owls")
        .build()
        .unwrap();

    assert_eq!(request.mode(), &StoryMode::Fresh);
    assert_eq!(request.age_band(), &None);
    assert!(request.characters().is_empty());
    assert_eq!(request.params().max_tokens, 1000);
    assert_eq!(request.params().temperature, 0.7);
}

#[test]
fn test_request_requires_prompt_text() {
    assert!(GenerationRequest::builder().build().is_err());
}

#[test]
fn test_page_keys_share_session_and_seed() {
    let first = PageKey::start();
    let third = first.next().next();

    assert_eq!(third.page_number, 3);
    assert_eq!(third.collection(), first.session_id.to_string());
    assert_eq!(third.art_seed(), first.art_seed());
    assert_eq!(third.file_name("png"), "page-3.png");
    assert_ne!(PageKey::start().session_id, first.session_id);
}

#[test]
fn test_coordinate_ranges() {
    assert!(Coordinates::new(47.6, -122.3).is_valid());
    assert!(Coordinates::new(-90.0, 180.0).is_valid());
    assert!(!Coordinates::new(90.5, 0.0).is_valid());
    assert!(!Coordinates::new(0.0, -181.0).is_valid());
}

#[test]
fn test_book_summary() {
    let book = CompletedBook::builder()
        .id("7")
        .theme("friendship")
        .pages(vec!["a".to_string(), "b".to_string(), "c".to_string()])
        .user_name("Sam")
        .completed_at(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        .build()
        .unwrap();
    assert_eq!(
        book.summary(),
        "Theme: friendship. Pages: 3. Completed by: Sam"
    );
}
