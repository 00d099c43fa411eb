use taleweaver_story::{parse_choices, parse_story};

#[test]
fn test_well_formed_response_recovers_all_sections() {
    let raw = "STORY:\nA girl finds a lost kitten.\nLOCATION: Willow Park\nCHOICES:\n1. Return the kitten\n2. Keep searching for its owner";
    let parsed = parse_story(raw);

    assert_eq!(parsed.story_text, "A girl finds a lost kitten.");
    assert_eq!(parsed.location, "Willow Park");
    assert_eq!(
        parsed.choices,
        vec!["Return the kitten", "Keep searching for its owner"]
    );
}

#[test]
fn test_newline_placement_does_not_matter() {
    let layouts = [
        "STORY: Two otters race.LOCATION: Pebble Creek CHOICES:\n1. Race again\n2. Rest",
        "STORY:\n\n  Two otters race.  \n\nLOCATION:\n Pebble Creek \n\nCHOICES:\n\n1. Race again\n\n2. Rest\n",
        "Sure! Here you go.\nSTORY: Two otters race.\nLOCATION: Pebble Creek\nCHOICES:\n  1. Race again\n  2. Rest",
    ];

    for raw in layouts {
        let parsed = parse_story(raw);
        assert_eq!(parsed.story_text, "Two otters race.", "layout: {raw:?}");
        assert_eq!(parsed.location, "Pebble Creek", "layout: {raw:?}");
        assert_eq!(parsed.choices, vec!["Race again", "Rest"], "layout: {raw:?}");
    }
}

#[test]
fn test_text_without_story_marker_is_all_story() {
    let raw = "  Once upon a time a hedgehog learned to share.\nLOCATION: nowhere  ";
    let parsed = parse_story(raw);

    assert_eq!(
        parsed.story_text,
        "Once upon a time a hedgehog learned to share.\nLOCATION: nowhere"
    );
    assert!(parsed.location.is_empty());
    assert!(parsed.choices.is_empty());
}

#[test]
fn test_empty_input_parses_to_empty_story() {
    let parsed = parse_story("");
    assert!(parsed.story_text.is_empty());
    assert!(parsed.location.is_empty());
    assert!(parsed.choices.is_empty());
}

#[test]
fn test_location_without_choices() {
    let parsed = parse_story("STORY: The owl slept.\nLOCATION: Oak Hollow Library\n");
    assert_eq!(parsed.story_text, "The owl slept.");
    assert_eq!(parsed.location, "Oak Hollow Library");
    assert!(parsed.choices.is_empty());
}

#[test]
fn test_choices_without_location() {
    let parsed = parse_story("STORY: The owl woke.\nCHOICES:\n- Fly north\n- Fly south");
    assert_eq!(parsed.story_text, "The owl woke.");
    assert!(parsed.location.is_empty());
    assert_eq!(parsed.choices, vec!["Fly north", "Fly south"]);
}

#[test]
fn test_markers_are_case_sensitive() {
    let raw = "story: lower case\nlocation: somewhere\nchoices:\n1. nope";
    let parsed = parse_story(raw);
    assert_eq!(parsed.story_text, raw);
    assert!(parsed.choices.is_empty());
}

#[test]
fn test_clean_choice_line_is_stripped_once() {
    assert_eq!(parse_choices("1. Go left"), vec!["Go left"]);
    assert_eq!(parse_choices("Go left"), Vec::<String>::new());
}

#[test]
fn test_duplicate_choices_are_kept_in_order() {
    let parsed = parse_story("STORY: x\nCHOICES:\n1. Wait\n2) Wait\n3 - Run");
    assert_eq!(parsed.choices, vec!["Wait", "Wait", "Run"]);
}
