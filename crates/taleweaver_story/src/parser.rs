//! Marker parser for provider responses.
//!
//! Providers are asked to answer with `STORY:`, `LOCATION:` and `CHOICES:`
//! markers. Parsing never fails: text without markers becomes the story body
//! and missing sections come back empty. Markers are matched case-sensitively.

use taleweaver_core::ParsedStory;

const STORY_MARKER: &str = "STORY:";
const LOCATION_MARKER: &str = "LOCATION:";
const CHOICES_MARKER: &str = "CHOICES:";

/// Ordinal and bullet prefixes stripped from choice lines, first match wins.
const CHOICE_PREFIXES: [&str; 10] = ["1.", "2.", "3.", "1)", "2)", "3)", "1 -", "2 -", "3 -", "- "];

/// Split a raw provider response into story, location and choices.
///
/// # Examples
///
/// ```
/// use taleweaver_story::parse_story;
///
/// let parsed = parse_story("STORY: A bear bakes bread.\nLOCATION: Maple Bakery\nCHOICES:\n1. Taste it\n2. Share it");
/// assert_eq!(parsed.story_text, "A bear bakes bread.");
/// assert_eq!(parsed.location, "Maple Bakery");
/// assert_eq!(parsed.choices, vec!["Taste it", "Share it"]);
///
/// let plain = parse_story("Just prose.");
/// assert_eq!(plain.story_text, "Just prose.");
/// assert!(plain.choices.is_empty());
/// ```
pub fn parse_story(raw: &str) -> ParsedStory {
    let Some((_, rest)) = raw.split_once(STORY_MARKER) else {
        return ParsedStory {
            story_text: raw.trim().to_string(),
            ..ParsedStory::default()
        };
    };

    let (story, location, block) = match rest.split_once(LOCATION_MARKER) {
        Some((story, after)) => match after.split_once(CHOICES_MARKER) {
            Some((location, block)) => (story, location, block),
            None => (story, after, ""),
        },
        None => match rest.split_once(CHOICES_MARKER) {
            Some((story, block)) => (story, "", block),
            None => (rest, "", ""),
        },
    };

    ParsedStory {
        story_text: story.trim().to_string(),
        location: location.trim().to_string(),
        choices: parse_choices(block),
    }
}

/// Choice lines from a `CHOICES:` block, in source order.
pub fn parse_choices(block: &str) -> Vec<String> {
    block
        .lines()
        .map(str::trim)
        .filter(|line| is_choice_line(line))
        .map(strip_prefix)
        .filter(|choice| !choice.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_choice_line(line: &str) -> bool {
    line.starts_with('-') || line.chars().next().is_some_and(|c| c.is_ascii_digit())
}

fn strip_prefix(line: &str) -> &str {
    CHOICE_PREFIXES
        .iter()
        .find_map(|prefix| line.strip_prefix(prefix))
        .unwrap_or(line)
        .trim()
}
