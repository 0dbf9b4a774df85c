use serde::{
    Deserialize,
    Serialize,
};

use super::clock;
use crate::pinyin;

/// HSK vocabulary bands, in study order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Band {
    #[serde(rename = "hsk1")]
    Hsk1,
    #[serde(rename = "hsk2")]
    Hsk2,
    #[serde(rename = "hsk3")]
    Hsk3,
    #[serde(rename = "hsk4")]
    Hsk4,
    #[serde(rename = "hsk5")]
    Hsk5,
    #[serde(rename = "hsk6")]
    Hsk6,
    #[serde(rename = "hsk7-9")]
    Hsk7to9,
}

impl Band {
    pub const ALL: [Band; 7] = [
        Band::Hsk1,
        Band::Hsk2,
        Band::Hsk3,
        Band::Hsk4,
        Band::Hsk5,
        Band::Hsk6,
        Band::Hsk7to9,
    ];

    /// File and storage key, e.g. `hsk1`, `hsk7-9`.
    pub fn key(&self) -> &'static str {
        match self {
            Band::Hsk1 => "hsk1",
            Band::Hsk2 => "hsk2",
            Band::Hsk3 => "hsk3",
            Band::Hsk4 => "hsk4",
            Band::Hsk5 => "hsk5",
            Band::Hsk6 => "hsk6",
            Band::Hsk7to9 => "hsk7-9",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Band::Hsk1 => "HSK 1",
            Band::Hsk2 => "HSK 2",
            Band::Hsk3 => "HSK 3",
            Band::Hsk4 => "HSK 4",
            Band::Hsk5 => "HSK 5",
            Band::Hsk6 => "HSK 6",
            Band::Hsk7to9 => "HSK 7-9",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhraseRecord {
    pub id: u32,
    pub band: Band,
    pub ordinal: u32, // 1-based position in the band's vocabulary list
    pub simplified: String,
    pub traditional: String, // empty when identical to the simplified form
    pub pinyin: String,      // tone-span markup, e.g. <span class="tone3">hǎo</span>
    pub english: String,
    pub classifier: String,
    pub taiwan_pinyin: String,
    pub same_pronunciation: String, // free-text list from the source data
    pub times_seen: u32,
    pub times_correct: u32,
    pub last_time_seen: String,
    pub last_time_correct: String,
    pub due_date: String,
    pub ease_factor: f64,
    pub deleted: bool,
}

impl PhraseRecord {
    /// Question text shown to the user.
    pub fn prompt(&self) -> String {
        if self.traditional.is_empty() {
            self.simplified.clone()
        } else {
            format!("{}|{}", self.simplified, self.traditional)
        }
    }

    /// Pronunciation in its diacritic display form, markup removed.
    pub fn answer_text(&self) -> String {
        pinyin::strip_markup(&self.pinyin)
    }

    pub fn details(&self) -> &str {
        &self.english
    }

    pub fn never_seen(&self) -> bool {
        clock::is_never(&self.last_time_seen) || clock::is_never(&self.due_date)
    }
}

/// One answer timing, appended on every submission and never rewritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseTimeSample {
    pub phrase_id: u32,
    pub timestamp: String,
    pub elapsed_seconds: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct,
    Wrong,
    Homonym,
}

/// SM-2 answer quality, from total blackout (0) to perfect recall (5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Quality {
    Zero,
    One,
    Two,
    Three,
    Four,
    Five,
}

impl Quality {
    pub fn value(&self) -> u8 {
        match self {
            Quality::Zero => 0,
            Quality::One => 1,
            Quality::Two => 2,
            Quality::Three => 3,
            Quality::Four => 4,
            Quality::Five => 5,
        }
    }

    /// Grades 0-2 mean the phrase was not recalled.
    pub fn is_failing(&self) -> bool {
        matches!(self, Quality::Zero | Quality::One | Quality::Two)
    }
}
