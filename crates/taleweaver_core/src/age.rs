//! Reader age bands.

use serde::{Deserialize, Serialize};

/// Closed set of reading-age bands.
///
/// Each band covers ages up to and including its upper bound; anything above
/// thirteen is a teen reader.
///
/// # Examples
///
/// ```
/// use taleweaver_core::AgeBand;
///
/// assert_eq!(AgeBand::from_age(3), AgeBand::Toddler);
/// assert_eq!(AgeBand::from_age(4), AgeBand::Preschool);
/// assert_eq!(AgeBand::from_age(14), AgeBand::Teen);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AgeBand {
    /// Ages 0 to 3
    Toddler,
    /// Ages 4 to 5
    Preschool,
    /// Ages 6 to 7
    EarlyReader,
    /// Ages 8 to 10
    MiddleGrade,
    /// Ages 11 to 13
    PreTeen,
    /// Ages 14 and up
    Teen,
}

impl AgeBand {
    /// Map an age in years to its band.
    pub fn from_age(age: u8) -> Self {
        match age {
            0..=3 => Self::Toddler,
            4..=5 => Self::Preschool,
            6..=7 => Self::EarlyReader,
            8..=10 => Self::MiddleGrade,
            11..=13 => Self::PreTeen,
            _ => Self::Teen,
        }
    }

    /// Most choices a page for this band may offer.
    pub fn max_choices(&self) -> usize {
        match self {
            Self::Toddler | Self::Preschool => 2,
            _ => 3,
        }
    }
}
