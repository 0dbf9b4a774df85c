use std::time::Instant;

use rand::{
    rng,
    seq::IndexedRandom,
    Rng,
};

use crate::{
    core::{
        clock,
        AnswerOutcome,
        Band,
        PhraseRecord,
        PinlianError,
        Quality,
    },
    review::{
        answer,
        quality,
        scheduler,
        stats::ResponseStats,
    },
    storage::PhraseStore,
};

/// One enabled band with the highest vocabulary position to draw from.
#[derive(Debug, Clone, Copy)]
pub struct LevelRange {
    pub band: Band,
    pub max_ordinal: u32,
}

#[derive(Debug, Clone)]
pub struct StudyConfig {
    pub levels: Vec<LevelRange>,
    /// Probability of drawing from the whole level instead of the due pool.
    pub new_card_chance: f64,
}

struct OpenQuestion {
    phrase: PhraseRecord,
    siblings: Vec<PhraseRecord>,
    started: Instant,
}

pub struct ReviewSession<S: PhraseStore> {
    store: S,
    config: StudyConfig,
    current: Option<OpenQuestion>,
}

impl<S: PhraseStore> ReviewSession<S> {
    pub fn new(store: S, config: StudyConfig) -> Result<Self, PinlianError> {
        if !(0.0..1.0).contains(&config.new_card_chance) {
            return Err(PinlianError::InvalidConfig(format!(
                "new-card chance must be in [0, 1), got {}",
                config.new_card_chance
            )));
        }

        Ok(Self { store, config, current: None })
    }

    /// Draws the next question and opens it, replacing any unanswered one.
    /// Bands are weighted by their ordinal range, so larger selections come
    /// up proportionally more often.
    pub fn select_next_question(&mut self) -> Result<&PhraseRecord, PinlianError> {
        let mut rng = rng();

        let level = *self
            .config
            .levels
            .choose_weighted(&mut rng, |level| level.max_ordinal)
            .map_err(|_| PinlianError::NoEligiblePhrases)?;

        // New-card draws sample the whole level; review draws prefer phrases
        // due today and widen back out when nothing is due.
        let pool = if rng.random_bool(self.config.new_card_chance) {
            self.store.phrases_in_level_up_to(level.band, level.max_ordinal)?
        } else {
            let due = self.store.phrases_due_today(level.band, level.max_ordinal, None)?;
            if due.is_empty() {
                self.store.phrases_in_level_up_to(level.band, level.max_ordinal)?
            } else {
                due
            }
        };

        let phrase = pool.choose(&mut rng).ok_or(PinlianError::NoEligiblePhrases)?.clone();
        let siblings = self.store.phrases_sharing_logograph(&phrase.simplified, phrase.id)?;

        let question = self.current.insert(OpenQuestion {
            phrase,
            siblings,
            started: Instant::now(),
        });
        Ok(&question.phrase)
    }

    /// Evaluates the typed pronunciation against the open question, grades it
    /// from the elapsed time, reschedules the phrase, and records the answer.
    pub fn submit_answer(
        &mut self,
        raw_text: &str,
        ignore_tones: bool,
    ) -> Result<(AnswerOutcome, Quality), PinlianError> {
        let question = self
            .current
            .as_ref()
            .ok_or_else(|| PinlianError::Custom("no question is open".to_string()))?;
        let elapsed = question.started.elapsed().as_secs_f64();

        let outcome =
            answer::evaluate(raw_text, &question.phrase, &question.siblings, ignore_tones);
        let stats = ResponseStats::read(&self.store)?;
        let grade = quality::assess(outcome, elapsed, &stats, !question.siblings.is_empty());

        // One clock read per answer; the schedule and every stamp written
        // below carry the same moment.
        let now = clock::now();
        let schedule = scheduler::reschedule(&question.phrase, grade, now)?;
        let answered_at = clock::format_timestamp(now);
        let phrase_id = question.phrase.id;
        self.store.update_phrase_after_answer(
            phrase_id,
            outcome == AnswerOutcome::Correct,
            &answered_at,
            &schedule.due_date,
            schedule.ease_factor,
        )?;
        self.store.insert_response_time_sample(phrase_id, &answered_at, elapsed)?;
        self.current = None;

        Ok((outcome, grade))
    }

    /// Soft-deletes the open question's phrase and closes the question.
    pub fn delete_current_phrase(&mut self) -> Result<(), PinlianError> {
        let question = self
            .current
            .take()
            .ok_or_else(|| PinlianError::Custom("no question is open".to_string()))?;
        self.store.soft_delete_phrase(question.phrase.id)
    }

    pub fn current_phrase(&self) -> Option<&PhraseRecord> {
        self.current.as_ref().map(|question| &question.phrase)
    }

    pub fn has_open_question(&self) -> bool {
        self.current.is_some()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Ends the session, handing the store back to the caller.
    pub fn into_store(self) -> S {
        self.store
    }
}
