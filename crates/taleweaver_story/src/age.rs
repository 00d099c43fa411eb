//! Age-appropriate writing guidelines.

use taleweaver_core::{AgeBand, StoryMode};

struct BandStyle {
    label: &'static str,
    sentences: &'static str,
    vocabulary: &'static str,
}

fn style(band: AgeBand) -> BandStyle {
    match band {
        AgeBand::Toddler => BandStyle {
            label: "ages 0-3",
            sentences: "Very short sentences of three to six words, with gentle repetition.",
            vocabulary: "Only simple, familiar words; sounds and rhymes are welcome.",
        },
        AgeBand::Preschool => BandStyle {
            label: "ages 4-5",
            sentences: "Short sentences of five to eight words.",
            vocabulary: "Everyday words a preschooler already knows.",
        },
        AgeBand::EarlyReader => BandStyle {
            label: "ages 6-7",
            sentences: "Simple sentences of no more than twelve words.",
            vocabulary: "Easy words, with an occasional new word explained by context.",
        },
        AgeBand::MiddleGrade => BandStyle {
            label: "ages 8-10",
            sentences: "Varied sentences of up to eighteen words.",
            vocabulary: "Richer vocabulary and light figurative language.",
        },
        AgeBand::PreTeen => BandStyle {
            label: "ages 11-13",
            sentences: "Varied sentence length, including some complex sentences.",
            vocabulary: "Descriptive, age-appropriate vocabulary.",
        },
        AgeBand::Teen => BandStyle {
            label: "ages 14 and up",
            sentences: "Natural, flowing prose with varied rhythm.",
            vocabulary: "Full vocabulary; handle serious themes gently.",
        },
    }
}

/// Writing guideline block for a reader's age band.
///
/// Returns an empty string when the band is unknown. The choice ceiling line
/// is left out for endings, which offer no choices at all.
///
/// # Examples
///
/// ```
/// use taleweaver_core::{AgeBand, StoryMode};
/// use taleweaver_story::age_guidelines;
///
/// assert!(age_guidelines(None, &StoryMode::Fresh).is_empty());
/// assert!(age_guidelines(Some(AgeBand::Toddler), &StoryMode::Fresh).contains("at most 2 choices"));
/// assert!(!age_guidelines(Some(AgeBand::Toddler), &StoryMode::Ending).contains("choices"));
/// ```
pub fn age_guidelines(band: Option<AgeBand>, mode: &StoryMode) -> String {
    let Some(band) = band else {
        return String::new();
    };
    let style = style(band);
    let mut block = format!(
        "Reader guidelines ({}):\n- Sentences: {}\n- Vocabulary: {}",
        style.label, style.sentences, style.vocabulary
    );
    if !mode.is_ending() {
        block.push_str(&format!(
            "\n- Offer at most {} choices.",
            band.max_choices()
        ));
    }
    block
}
