use chrono::NaiveDateTime;

use crate::core::{
    clock,
    PhraseRecord,
    PinlianError,
    Quality,
};

pub const MIN_EASE_FACTOR: f64 = 1.3;
pub const INITIAL_EASE_FACTOR: f64 = 2.5;

/// Ease adjustment per quality grade, the standard SM-2 table.
pub fn ease_delta(quality: Quality) -> f64 {
    match quality {
        Quality::Five => 0.10,
        Quality::Four => 0.00,
        Quality::Three => -0.14,
        Quality::Two => -0.32,
        Quality::One => -0.54,
        Quality::Zero => -0.80,
    }
}

pub fn next_ease_factor(ease_factor: f64, quality: Quality) -> f64 {
    (ease_factor + ease_delta(quality)).max(MIN_EASE_FACTOR)
}

#[derive(Debug, Clone)]
pub struct Schedule {
    pub ease_factor: f64,
    pub due_date: String,
}

/// Computes the updated ease factor and next due date for one answer, as of
/// `now`.
pub fn reschedule(
    phrase: &PhraseRecord,
    quality: Quality,
    now: NaiveDateTime,
) -> Result<Schedule, PinlianError> {
    let ease_factor = next_ease_factor(phrase.ease_factor, quality);

    // Failed recall and first-ever review both restart at a one-day interval.
    if quality.is_failing() || phrase.never_seen() {
        return Ok(Schedule { ease_factor, due_date: clock::days_from(now, 1.0) });
    }

    let interval = clock::days_between(&phrase.last_time_seen, &phrase.due_date)?.round();
    let due_date = if interval == 1.0 {
        // Canonical SM-2 first graduation: one day jumps straight to six.
        clock::days_from(now, 6.0)
    } else {
        clock::days_from(now, interval * ease_factor)
    };

    Ok(Schedule { ease_factor, due_date })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Band;

    const QUALITIES: [Quality; 6] = [
        Quality::Zero,
        Quality::One,
        Quality::Two,
        Quality::Three,
        Quality::Four,
        Quality::Five,
    ];

    fn reviewed_phrase(last_time_seen: &str, due_date: &str, ease_factor: f64) -> PhraseRecord {
        PhraseRecord {
            id: 1,
            band: Band::Hsk1,
            ordinal: 1,
            simplified: "好".to_string(),
            traditional: String::new(),
            pinyin: "<span class=\"tone3\">hǎo</span>".to_string(),
            english: String::new(),
            classifier: String::new(),
            taiwan_pinyin: String::new(),
            same_pronunciation: String::new(),
            times_seen: 3,
            times_correct: 2,
            last_time_seen: last_time_seen.to_string(),
            last_time_correct: last_time_seen.to_string(),
            due_date: due_date.to_string(),
            ease_factor,
            deleted: false,
        }
    }

    fn fixed_now() -> NaiveDateTime {
        clock::parse_timestamp("2024-03-05 09:30:00").unwrap()
    }

    #[test]
    fn test_ease_factor_never_drops_below_floor() {
        for quality in QUALITIES {
            assert!(next_ease_factor(1.3, quality) >= MIN_EASE_FACTOR);
            assert!(next_ease_factor(2.0, quality) >= MIN_EASE_FACTOR);
        }

        // Repeated blackouts stay pinned at the floor.
        let mut ease = 2.5;
        for _ in 0..10 {
            ease = next_ease_factor(ease, Quality::Zero);
        }
        assert!((ease - MIN_EASE_FACTOR).abs() < 1e-9);
    }

    #[test]
    fn test_ease_delta_applied() {
        assert!((next_ease_factor(2.5, Quality::Three) - 2.36).abs() < 1e-9);
        assert!((next_ease_factor(2.5, Quality::Five) - 2.6).abs() < 1e-9);
        assert!((next_ease_factor(2.5, Quality::Four) - 2.5).abs() < 1e-9);
        assert!((next_ease_factor(2.5, Quality::Zero) - 1.7).abs() < 1e-9);
    }

    #[test]
    fn test_failing_quality_resets_to_one_day() {
        let phrase = reviewed_phrase("2024-02-01 09:30:00", "2024-02-21 09:30:00", 2.5);

        for quality in [Quality::Zero, Quality::One, Quality::Two] {
            let schedule = reschedule(&phrase, quality, fixed_now()).unwrap();
            assert_eq!(schedule.due_date, "2024-03-06 09:30:00");
        }
    }

    #[test]
    fn test_first_review_gets_one_day() {
        // Never-seen phrase with a passing grade still confirms at one day.
        let phrase = reviewed_phrase(clock::NEVER, clock::NEVER, 2.5);

        let schedule = reschedule(&phrase, Quality::Four, fixed_now()).unwrap();
        assert_eq!(schedule.due_date, "2024-03-06 09:30:00");
        assert!((schedule.ease_factor - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_one_day_interval_graduates_to_six() {
        let phrase = reviewed_phrase("2024-03-01 09:30:00", "2024-03-02 09:30:00", 1.3);

        let schedule = reschedule(&phrase, Quality::Four, fixed_now()).unwrap();
        assert_eq!(schedule.due_date, "2024-03-11 09:30:00");
    }

    #[test]
    fn test_interval_grows_with_ease_factor() {
        // Ten-day history at ease 2.5 with a neutral grade: next gap is 25 days.
        let phrase = reviewed_phrase("2024-02-10 09:30:00", "2024-02-20 09:30:00", 2.5);

        let schedule = reschedule(&phrase, Quality::Four, fixed_now()).unwrap();
        assert_eq!(schedule.due_date, "2024-03-30 09:30:00");

        // Quality five also nudges the ease factor up first.
        let schedule = reschedule(&phrase, Quality::Five, fixed_now()).unwrap();
        assert!((schedule.ease_factor - 2.6).abs() < 1e-9);
        assert_eq!(schedule.due_date, "2024-03-31 09:30:00");
    }

    #[test]
    fn test_interval_rounds_from_history() {
        // 5 days and 13 hours round to 6 days; ease 2.0 doubles it to 12.
        let phrase = reviewed_phrase("2024-02-10 09:00:00", "2024-02-15 22:00:00", 2.0);

        let schedule = reschedule(&phrase, Quality::Four, fixed_now()).unwrap();
        assert_eq!(schedule.due_date, "2024-03-17 09:30:00");
    }
}
