use super::stats::ResponseStats;
use crate::core::{
    AnswerOutcome,
    Quality,
};

/// Population statistics are only trusted once this many answers exist.
pub const MIN_SAMPLE_COUNT: usize = 100;

/// Converts an answer outcome into an SM-2 quality grade. Response speed is
/// benchmarked against the whole population: fast means at most one standard
/// deviation below the mean, slow means more than one above. With fewer than
/// [`MIN_SAMPLE_COUNT`] recorded answers, speed is ignored and each outcome
/// falls back to its middle grade. A wrong answer only earns partial credit
/// when the phrase has alternate readings, and quality 2 of that credit only
/// on a statistically fast response.
pub fn assess(
    outcome: AnswerOutcome,
    elapsed_seconds: f64,
    stats: &ResponseStats,
    has_alternates: bool,
) -> Quality {
    let sufficient = stats.count >= MIN_SAMPLE_COUNT;
    let fast = sufficient && elapsed_seconds <= stats.mean - stats.stddev;
    let slow = sufficient && elapsed_seconds > stats.mean + stats.stddev;

    match outcome {
        AnswerOutcome::Correct => {
            if !sufficient {
                Quality::Four
            } else if fast {
                Quality::Five
            } else if slow {
                Quality::Three
            } else {
                Quality::Four
            }
        }
        AnswerOutcome::Homonym => {
            if fast {
                Quality::Four
            } else {
                Quality::Three
            }
        }
        AnswerOutcome::Wrong => {
            if !has_alternates {
                Quality::Zero
            } else if fast {
                Quality::Two
            } else {
                Quality::One
            }
        }
    }
}
