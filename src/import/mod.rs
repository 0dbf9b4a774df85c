use std::{
    fs,
    path::Path,
    time::Instant,
};

use crate::{
    core::{
        clock,
        Band,
        PhraseRecord,
        PinlianError,
    },
    review::scheduler::INITIAL_EASE_FACTOR,
    storage::JsonStore,
};

#[derive(Debug, Default)]
pub struct ImportReport {
    pub inserted: usize,
    pub bands: Vec<(Band, usize)>,
}

/// Imports every band whose file pair exists in `dir`, rebuilding the phrase
/// table from scratch, then persists the store. Bands without files are
/// skipped; a directory with none at all is rejected before anything is
/// cleared.
pub fn import_directory(store: &mut JsonStore, dir: &Path) -> Result<ImportReport, PinlianError> {
    let start = Instant::now();

    let mut pairs = Vec::new();
    for band in Band::ALL {
        let vocab_path = dir.join(format!("{}.txt", band.key()));
        let data_path = dir.join(format!("{}_data.tsv", band.key()));
        if !vocab_path.exists() || !data_path.exists() {
            println!("No {} files in {}, skipping", band.key(), dir.display());
            continue;
        }
        pairs.push((band, vocab_path, data_path));
    }
    if pairs.is_empty() {
        return Err(PinlianError::Custom(format!(
            "no vocabulary files found in {}",
            dir.display()
        )));
    }

    store.clear_phrases();

    let mut report = ImportReport::default();
    for (band, vocab_path, data_path) in pairs {
        let records = read_band(band, &vocab_path, &data_path)?;
        let count = records.len();
        store.insert_phrases(records);
        println!("Imported {} phrases for {}", count, band.label());

        report.inserted += count;
        report.bands.push((band, count));
    }

    store.persist()?;
    println!("Import finished in {:.1}s", start.elapsed().as_secs_f32());
    Ok(report)
}

// Each band comes as a file pair: `hsk1.txt` with one simplified phrase per
// line (the line number is the ordinal) and `hsk1_data.tsv` with a header
// line followed by the tab-separated entry details in the same order, one
// row per reading.
fn read_band(
    band: Band,
    vocab_path: &Path,
    data_path: &Path,
) -> Result<Vec<PhraseRecord>, PinlianError> {
    let vocab = fs::read_to_string(vocab_path)?;
    let data = fs::read_to_string(data_path)?;

    let mut rows = parse_data_rows(&data, data_path)?.into_iter().peekable();
    let mut records = Vec::new();

    for (index, line) in vocab.lines().enumerate() {
        let simplified = line.trim();
        if simplified.is_empty() {
            continue;
        }
        let ordinal = (index + 1) as u32;

        // A phrase with several readings has one data row per reading, all
        // sharing the vocabulary line's ordinal. Vocabulary lines with no
        // data row advance without inserting anything.
        while rows.peek().is_some_and(|row| row.simplified == simplified) {
            if let Some(row) = rows.next() {
                records.push(new_record(band, ordinal, row));
            }
        }
    }

    let leftover = rows.count();
    if leftover > 0 {
        println!(
            "{}: {} data rows had no matching vocabulary line",
            data_path.display(),
            leftover
        );
    }

    Ok(records)
}

struct DataRow {
    simplified: String,
    traditional: String,
    pinyin: String,
    english: String,
    classifier: String,
    taiwan_pinyin: String,
    same_pronunciation: String,
}

fn parse_data_rows(content: &str, path: &Path) -> Result<Vec<DataRow>, PinlianError> {
    let mut rows = Vec::new();

    // Line 1 is the column header.
    for (index, line) in content.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }

        let columns: Vec<&str> = line.split('\t').collect();
        if columns.len() < 7 {
            return Err(PinlianError::Custom(format!(
                "{} line {}: expected 7 tab-separated columns, found {}",
                path.display(),
                index + 1,
                columns.len()
            )));
        }

        let simplified = columns[0].trim().to_string();
        let traditional = columns[1].trim();
        rows.push(DataRow {
            // The traditional column repeats the simplified form when they
            // are identical; store it empty in that case.
            traditional: if traditional == simplified {
                String::new()
            } else {
                traditional.to_string()
            },
            simplified,
            pinyin: columns[2].trim().to_string(),
            english: columns[3].trim().to_string(),
            classifier: columns[4].trim().to_string(),
            taiwan_pinyin: columns[5].trim().to_string(),
            same_pronunciation: columns[6].trim().to_string(),
        });
    }

    Ok(rows)
}

fn new_record(band: Band, ordinal: u32, row: DataRow) -> PhraseRecord {
    PhraseRecord {
        id: 0, // assigned by the store
        band,
        ordinal,
        simplified: row.simplified,
        traditional: row.traditional,
        pinyin: row.pinyin,
        english: row.english,
        classifier: row.classifier,
        taiwan_pinyin: row.taiwan_pinyin,
        same_pronunciation: row.same_pronunciation,
        times_seen: 0,
        times_correct: 0,
        last_time_seen: clock::NEVER.to_string(),
        last_time_correct: clock::NEVER.to_string(),
        due_date: clock::NEVER.to_string(),
        ease_factor: INITIAL_EASE_FACTOR,
        deleted: false,
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::storage::PhraseStore;

    fn fixture_dir(name: &str) -> PathBuf {
        let dir =
            std::env::temp_dir().join(format!("pinlian_import_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_import_pairs_rows_with_vocabulary_ordinals() {
        let dir = fixture_dir("pairs");
        // 呢 has no data row; line 4 is blank but still counts as an ordinal.
        fs::write(dir.join("hsk1.txt"), "好\n呢\n他\n\n银行\n").unwrap();
        fs::write(
            dir.join("hsk1_data.tsv"),
            "Simplified\tTraditional\tPinyin\tEnglish\tClassifier\tTaiwan Pinyin\tSame Pinyin\n\
             好\t好\t<span class=\"tone3\">hǎo</span>\tgood\t\t\t\n\
             好\t好\t<span class=\"tone4\">hào</span>\tto like\t\t\t\n\
             他\t他\t<span class=\"tone1\">tā</span>\the\t\t\tta1: 她\n\
             银行\t銀行\t<span class=\"tone2\">yín</span><span class=\"tone2\">háng</span>\tbank\t\t\t\n",
        )
        .unwrap();

        let mut store = JsonStore::in_memory();
        let report = import_directory(&mut store, &dir).unwrap();
        assert_eq!(report.inserted, 4);
        assert_eq!(report.bands, vec![(Band::Hsk1, 4)]);

        let phrases = store.phrases_in_level_up_to(Band::Hsk1, 100).unwrap();
        assert_eq!(phrases.len(), 4);
        assert_eq!(phrases[0].ordinal, 1);
        assert_eq!(phrases[1].ordinal, 1); // second reading of 好
        assert_eq!(phrases[2].ordinal, 3);
        assert_eq!(phrases[3].ordinal, 5);

        assert!(phrases[0].traditional.is_empty());
        assert_eq!(phrases[3].traditional, "銀行");
        assert_eq!(phrases[2].same_pronunciation, "ta1: 她");
        assert!(phrases.iter().all(|p| {
            p.never_seen()
                && p.times_seen == 0
                && !p.deleted
                && (p.ease_factor - INITIAL_EASE_FACTOR).abs() < 1e-9
        }));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_short_data_row_is_rejected_with_line_number() {
        let dir = fixture_dir("short_row");
        fs::write(dir.join("hsk1.txt"), "好\n").unwrap();
        fs::write(
            dir.join("hsk1_data.tsv"),
            "Simplified\tTraditional\tPinyin\tEnglish\tClassifier\tTaiwan Pinyin\tSame Pinyin\n\
             好\t好\t<span class=\"tone3\">hǎo</span>\tgood\n",
        )
        .unwrap();

        let mut store = JsonStore::in_memory();
        match import_directory(&mut store, &dir) {
            Err(PinlianError::Custom(message)) => {
                assert!(message.contains("hsk1_data.tsv"));
                assert!(message.contains("line 2"));
            }
            other => panic!("Expected Custom error, got {:?}", other),
        }

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_band_files_are_skipped() {
        let dir = fixture_dir("missing");
        fs::write(dir.join("hsk2.txt"), "爱\n").unwrap();
        fs::write(
            dir.join("hsk2_data.tsv"),
            "Simplified\tTraditional\tPinyin\tEnglish\tClassifier\tTaiwan Pinyin\tSame Pinyin\n\
             爱\t愛\t<span class=\"tone4\">ài</span>\tto love\t\t\t\n",
        )
        .unwrap();

        let mut store = JsonStore::in_memory();
        let report = import_directory(&mut store, &dir).unwrap();
        assert_eq!(report.inserted, 1);
        assert_eq!(report.bands, vec![(Band::Hsk2, 1)]);

        let phrases = store.phrases_in_level_up_to(Band::Hsk2, 10).unwrap();
        assert_eq!(phrases[0].traditional, "愛");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_header_line_is_not_a_data_row() {
        let dir = fixture_dir("header");
        fs::write(dir.join("hsk1.txt"), "好\n").unwrap();
        fs::write(
            dir.join("hsk1_data.tsv"),
            "Simplified\tTraditional\tPinyin\tEnglish\tClassifier\tTaiwan Pinyin\tSame Pinyin\n\
             好\t好\t<span class=\"tone3\">hǎo</span>\tgood\t\t\t\n",
        )
        .unwrap();

        let mut store = JsonStore::in_memory();
        let report = import_directory(&mut store, &dir).unwrap();
        assert_eq!(report.inserted, 1);
        assert_eq!(store.phrases_in_level_up_to(Band::Hsk1, 10).unwrap()[0].english, "good");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_reimport_replaces_phrases_instead_of_duplicating() {
        let dir = fixture_dir("reimport");
        fs::write(dir.join("hsk1.txt"), "好\n").unwrap();
        fs::write(
            dir.join("hsk1_data.tsv"),
            "Simplified\tTraditional\tPinyin\tEnglish\tClassifier\tTaiwan Pinyin\tSame Pinyin\n\
             好\t好\t<span class=\"tone3\">hǎo</span>\tgood\t\t\t\n",
        )
        .unwrap();

        let mut store = JsonStore::in_memory();
        import_directory(&mut store, &dir).unwrap();
        import_directory(&mut store, &dir).unwrap();

        let phrases = store.phrases_in_level_up_to(Band::Hsk1, 10).unwrap();
        assert_eq!(phrases.len(), 1);
        // A stale duplicate would also register as a sibling reading.
        assert!(store.phrases_sharing_logograph("好", phrases[0].id).unwrap().is_empty());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_directory_without_band_files_is_rejected() {
        let seeded = fixture_dir("seed");
        fs::write(seeded.join("hsk1.txt"), "好\n").unwrap();
        fs::write(
            seeded.join("hsk1_data.tsv"),
            "Simplified\tTraditional\tPinyin\tEnglish\tClassifier\tTaiwan Pinyin\tSame Pinyin\n\
             好\t好\t<span class=\"tone3\">hǎo</span>\tgood\t\t\t\n",
        )
        .unwrap();
        let empty = fixture_dir("no_files");

        let mut store = JsonStore::in_memory();
        import_directory(&mut store, &seeded).unwrap();

        // A wrong directory must not wipe what an earlier import built.
        match import_directory(&mut store, &empty) {
            Err(PinlianError::Custom(message)) => {
                assert!(message.contains("no vocabulary files"))
            }
            other => panic!("Expected Custom error, got {:?}", other),
        }
        assert_eq!(store.phrase_count(), 1);

        let _ = fs::remove_dir_all(&seeded);
        let _ = fs::remove_dir_all(&empty);
    }
}
