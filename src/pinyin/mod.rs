use regex::Regex;

/// Maps a diacritic-marked pinyin vowel to its plain form and tone digit.
/// The ü family maps to `v`, the usual ASCII substitute.
fn tone_mark(c: char) -> Option<(char, char)> {
    let converted = match c {
        'ā' => ('a', '1'),
        'á' => ('a', '2'),
        'ǎ' => ('a', '3'),
        'à' => ('a', '4'),
        'ē' => ('e', '1'),
        'é' => ('e', '2'),
        'ě' => ('e', '3'),
        'è' => ('e', '4'),
        'ī' => ('i', '1'),
        'í' => ('i', '2'),
        'ǐ' => ('i', '3'),
        'ì' => ('i', '4'),
        'ō' => ('o', '1'),
        'ó' => ('o', '2'),
        'ǒ' => ('o', '3'),
        'ò' => ('o', '4'),
        'ū' => ('u', '1'),
        'ú' => ('u', '2'),
        'ǔ' => ('u', '3'),
        'ù' => ('u', '4'),
        'ǖ' => ('v', '1'),
        'ǘ' => ('v', '2'),
        'ǚ' => ('v', '3'),
        'ǜ' => ('v', '4'),
        'Ā' => ('A', '1'),
        'Á' => ('A', '2'),
        'Ǎ' => ('A', '3'),
        'À' => ('A', '4'),
        'Ē' => ('E', '1'),
        'É' => ('E', '2'),
        'Ě' => ('E', '3'),
        'È' => ('E', '4'),
        'Ī' => ('I', '1'),
        'Í' => ('I', '2'),
        'Ǐ' => ('I', '3'),
        'Ì' => ('I', '4'),
        'Ō' => ('O', '1'),
        'Ó' => ('O', '2'),
        'Ǒ' => ('O', '3'),
        'Ò' => ('O', '4'),
        'Ū' => ('U', '1'),
        'Ú' => ('U', '2'),
        'Ǔ' => ('U', '3'),
        'Ù' => ('U', '4'),
        'Ǖ' => ('V', '1'),
        'Ǘ' => ('V', '2'),
        'Ǚ' => ('V', '3'),
        'Ǜ' => ('V', '4'),
        _ => return None,
    };
    Some(converted)
}

/// Converts a diacritic-marked syllable to tone-numbered form: `hǎo` becomes
/// `hao3`, `tā` becomes `ta1`. Only the first marked vowel carries the tone;
/// everything after it is kept as-is with the digit appended at the end.
/// Syllables with no mark get the neutral tone digit 5.
pub fn to_tone_number(syllable: &str) -> String {
    for (i, c) in syllable.char_indices() {
        if let Some((plain, tone)) = tone_mark(c) {
            let mut converted = String::with_capacity(syllable.len() + 1);
            converted.push_str(&syllable[..i]);
            converted.push(plain);
            converted.push_str(&syllable[i + c.len_utf8()..]);
            converted.push(tone);
            return converted;
        }
    }
    format!("{}5", syllable)
}

fn span_regex() -> Regex {
    Regex::new(r#"<span class="tone(\d)">([^<]*)</span>"#).unwrap()
}

/// Concatenated tone-numbered pronunciation of every tone span in the markup.
/// Markup without tone spans yields an empty string.
pub fn extract_from_markup(markup: &str) -> String {
    span_regex().captures_iter(markup).map(|caps| to_tone_number(&caps[2])).collect()
}

/// Diacritic display form of the pronunciation, markup removed.
pub fn strip_markup(markup: &str) -> String {
    span_regex().captures_iter(markup).map(|caps| caps[2].to_string()).collect()
}
