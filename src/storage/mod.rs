pub mod json_store;

pub use json_store::JsonStore;

use crate::core::{
    Band,
    PhraseRecord,
    PinlianError,
};

/// Operations the review engine needs from a phrase store. Every query
/// excludes soft-deleted records; statistics cover all recorded answers,
/// not a single phrase.
pub trait PhraseStore {
    fn phrases_in_level_up_to(
        &self,
        band: Band,
        max_ordinal: u32,
    ) -> Result<Vec<PhraseRecord>, PinlianError>;

    /// Phrases in the band and ordinal range whose due date has passed.
    /// Never-reviewed phrases count as due.
    fn phrases_due_today(
        &self,
        band: Band,
        max_ordinal: u32,
        limit: Option<usize>,
    ) -> Result<Vec<PhraseRecord>, PinlianError>;

    /// Other phrases written with the same simplified form, in storage order.
    fn phrases_sharing_logograph(
        &self,
        simplified: &str,
        exclude_id: u32,
    ) -> Result<Vec<PhraseRecord>, PinlianError>;

    /// Other phrases pronounced identically (tone-numbered comparison of the
    /// markup pronunciation).
    fn phrases_sharing_pronunciation(
        &self,
        pinyin_markup: &str,
        exclude_id: u32,
    ) -> Result<Vec<PhraseRecord>, PinlianError>;

    /// Applies one answered question: bumps the seen counter, adds the
    /// correctness to the correct counter, stamps `last_time_seen` (and
    /// `last_time_correct` on a correct answer) with `answered_at`, and
    /// writes the new due date and ease factor.
    fn update_phrase_after_answer(
        &mut self,
        id: u32,
        was_correct: bool,
        answered_at: &str,
        due_date: &str,
        ease_factor: f64,
    ) -> Result<(), PinlianError>;

    fn soft_delete_phrase(&mut self, id: u32) -> Result<(), PinlianError>;

    fn insert_response_time_sample(
        &mut self,
        phrase_id: u32,
        timestamp: &str,
        elapsed_seconds: f64,
    ) -> Result<(), PinlianError>;

    fn response_time_count(&self) -> Result<usize, PinlianError>;

    /// Mean of all recorded response times; NaN when none exist.
    fn response_time_mean(&self) -> Result<f64, PinlianError>;

    /// Population variance of all recorded response times; NaN when none
    /// exist.
    fn response_time_variance(&self) -> Result<f64, PinlianError>;
}
