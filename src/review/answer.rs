use crate::{
    core::{
        AnswerOutcome,
        PhraseRecord,
    },
    pinyin,
};

/// Lower-cases, strips whitespace, and optionally drops tone digits so
/// `"Ni3 Hao3"` and `"nihao"` compare equal under tone-ignoring matching.
pub fn normalize_input(raw: &str, ignore_tones: bool) -> String {
    let mut text: String =
        raw.to_lowercase().chars().filter(|c| !c.is_whitespace()).collect();
    if ignore_tones {
        text.retain(|c| !matches!(c, '1'..='5'));
    }
    text
}

fn normalize_expected(pinyin_markup: &str, ignore_tones: bool) -> String {
    normalize_input(&pinyin::extract_from_markup(pinyin_markup), ignore_tones)
}

/// Grades the user's text against the current phrase, then against phrases
/// sharing its logograph. The first sibling match wins; anything else is
/// wrong. Matching is exact after normalization.
pub fn evaluate(
    user_input: &str,
    phrase: &PhraseRecord,
    siblings: &[PhraseRecord],
    ignore_tones: bool,
) -> AnswerOutcome {
    let input = normalize_input(user_input, ignore_tones);

    if input == normalize_expected(&phrase.pinyin, ignore_tones) {
        return AnswerOutcome::Correct;
    }

    for sibling in siblings {
        if input == normalize_expected(&sibling.pinyin, ignore_tones) {
            return AnswerOutcome::Homonym;
        }
    }

    AnswerOutcome::Wrong
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        clock,
        Band,
    };

    fn phrase(simplified: &str, markup: &str) -> PhraseRecord {
        PhraseRecord {
            id: 1,
            band: Band::Hsk1,
            ordinal: 1,
            simplified: simplified.to_string(),
            traditional: String::new(),
            pinyin: markup.to_string(),
            english: String::new(),
            classifier: String::new(),
            taiwan_pinyin: String::new(),
            same_pronunciation: String::new(),
            times_seen: 0,
            times_correct: 0,
            last_time_seen: clock::NEVER.to_string(),
            last_time_correct: clock::NEVER.to_string(),
            due_date: clock::NEVER.to_string(),
            ease_factor: 2.5,
            deleted: false,
        }
    }

    #[test]
    fn test_exact_match_is_correct() {
        let current = phrase("他", "<span class=\"tone1\">tā</span>");

        assert_eq!(evaluate("ta1", &current, &[], false), AnswerOutcome::Correct);
        assert_eq!(evaluate("ta2", &current, &[], false), AnswerOutcome::Wrong);
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        let current = phrase(
            "你好",
            "<span class=\"tone3\">Nǐ</span><span class=\"tone3\">hǎo</span>",
        );

        assert_eq!(evaluate("ni3hao3", &current, &[], false), AnswerOutcome::Correct);
        assert_eq!(evaluate(" NI3 hao3 ", &current, &[], false), AnswerOutcome::Correct);
    }

    #[test]
    fn test_sibling_match_is_homonym() {
        let current = phrase("好", "<span class=\"tone3\">hǎo</span>");
        let siblings = vec![phrase("好", "<span class=\"tone4\">hào</span>")];

        assert_eq!(evaluate("hao3", &current, &siblings, false), AnswerOutcome::Correct);
        assert_eq!(evaluate("hao4", &current, &siblings, false), AnswerOutcome::Homonym);
        assert_eq!(evaluate("hao1", &current, &siblings, false), AnswerOutcome::Wrong);
    }

    #[test]
    fn test_ignore_tones() {
        let current = phrase("他", "<span class=\"tone1\">tā</span>");

        assert_eq!(evaluate("ta", &current, &[], true), AnswerOutcome::Correct);
        assert_eq!(evaluate("ta4", &current, &[], true), AnswerOutcome::Correct);
        assert_eq!(evaluate("ta4", &current, &[], false), AnswerOutcome::Wrong);
        assert_eq!(evaluate("ti", &current, &[], true), AnswerOutcome::Wrong);
    }

    #[test]
    fn test_normalize_input() {
        assert_eq!(normalize_input(" Ni3 Hao3 ", false), "ni3hao3");
        assert_eq!(normalize_input(" Ni3 Hao3 ", true), "nihao");
        // Only tone digits are stripped under tone-ignoring.
        assert_eq!(normalize_input("abc6", true), "abc6");
    }
}
