use std::{
    fs,
    path::{
        Path,
        PathBuf,
    },
    time::Instant,
};

use serde::{
    Deserialize,
    Serialize,
};

use super::PhraseStore;
use crate::{
    core::{
        clock,
        Band,
        PhraseRecord,
        PinlianError,
        ResponseTimeSample,
    },
    persistence::get_app_data_dir,
    pinyin,
};

const PHRASES_FILE: &str = "phrases.json";
const RESPONSE_TIMES_FILE: &str = "response_times.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PhraseTable {
    phrases: Vec<PhraseRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ResponseTimeLog {
    samples: Vec<ResponseTimeSample>,
}

/// Phrase store backed by two JSON files: the phrase table and the
/// append-only response-time log. Without a directory it runs purely in
/// memory.
#[derive(Debug)]
pub struct JsonStore {
    phrases: Vec<PhraseRecord>,
    samples: Vec<ResponseTimeSample>,
    dir: Option<PathBuf>,
}

impl JsonStore {
    /// Opens the store in the platform app-data directory.
    pub fn load() -> Result<Self, PinlianError> {
        let start = Instant::now();
        let store = Self::open(&get_app_data_dir())?;
        println!(
            "Loaded {} phrases and {} response times ({:.1}s)",
            store.phrases.len(),
            store.samples.len(),
            start.elapsed().as_secs_f32()
        );
        Ok(store)
    }

    pub fn open(dir: &Path) -> Result<Self, PinlianError> {
        let table: PhraseTable = read_json_file(&dir.join(PHRASES_FILE))?;
        let log: ResponseTimeLog = read_json_file(&dir.join(RESPONSE_TIMES_FILE))?;

        Ok(Self {
            phrases: table.phrases,
            samples: log.samples,
            dir: Some(dir.to_path_buf()),
        })
    }

    pub fn in_memory() -> Self {
        Self { phrases: Vec::new(), samples: Vec::new(), dir: None }
    }

    /// Drops every phrase, deleted ones included, so an import can rebuild
    /// the table. Response-time history stays.
    pub fn clear_phrases(&mut self) {
        self.phrases.clear();
    }

    /// Appends new records, assigning each the next free ID. Call
    /// [`JsonStore::persist`] afterwards to write them out.
    pub fn insert_phrases(&mut self, records: Vec<PhraseRecord>) {
        let mut next_id = self.phrases.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        for mut record in records {
            record.id = next_id;
            next_id += 1;
            self.phrases.push(record);
        }
    }

    pub fn phrase_count(&self) -> usize {
        self.phrases.iter().filter(|p| !p.deleted).count()
    }

    /// Highest vocabulary position available in a band, for range pickers.
    pub fn max_ordinal(&self, band: Band) -> u32 {
        self.phrases
            .iter()
            .filter(|p| !p.deleted && p.band == band)
            .map(|p| p.ordinal)
            .max()
            .unwrap_or(0)
    }

    pub fn persist(&self) -> Result<(), PinlianError> {
        self.save_phrases()?;
        self.save_samples()
    }

    fn save_phrases(&self) -> Result<(), PinlianError> {
        let table = PhraseTable { phrases: self.phrases.clone() };
        self.write_json_file(PHRASES_FILE, &table)
    }

    fn save_samples(&self) -> Result<(), PinlianError> {
        let log = ResponseTimeLog { samples: self.samples.clone() };
        self.write_json_file(RESPONSE_TIMES_FILE, &log)
    }

    fn write_json_file<T: Serialize>(&self, filename: &str, data: &T) -> Result<(), PinlianError> {
        let Some(dir) = &self.dir else {
            return Ok(());
        };

        fs::create_dir_all(dir).map_err(|e| {
            PinlianError::Custom(format!("Failed to create store directory: {}", e))
        })?;

        let content = serde_json::to_string_pretty(data)?;
        fs::write(dir.join(filename), content)
            .map_err(|e| PinlianError::Custom(format!("Failed to write {}: {}", filename, e)))
    }
}

fn read_json_file<T: for<'de> Deserialize<'de> + Default>(
    path: &Path,
) -> Result<T, PinlianError> {
    if !path.exists() {
        return Ok(T::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| PinlianError::Custom(format!("Failed to read {}: {}", path.display(), e)))?;
    Ok(serde_json::from_str(&content)?)
}

impl PhraseStore for JsonStore {
    fn phrases_in_level_up_to(
        &self,
        band: Band,
        max_ordinal: u32,
    ) -> Result<Vec<PhraseRecord>, PinlianError> {
        Ok(self
            .phrases
            .iter()
            .filter(|p| !p.deleted && p.band == band && p.ordinal <= max_ordinal)
            .cloned()
            .collect())
    }

    fn phrases_due_today(
        &self,
        band: Band,
        max_ordinal: u32,
        limit: Option<usize>,
    ) -> Result<Vec<PhraseRecord>, PinlianError> {
        let now = clock::now();
        let due = self
            .phrases
            .iter()
            .filter(|p| {
                !p.deleted
                    && p.band == band
                    && p.ordinal <= max_ordinal
                    && clock::is_due(&p.due_date, now)
            })
            .cloned();

        Ok(match limit {
            Some(n) => due.take(n).collect(),
            None => due.collect(),
        })
    }

    fn phrases_sharing_logograph(
        &self,
        simplified: &str,
        exclude_id: u32,
    ) -> Result<Vec<PhraseRecord>, PinlianError> {
        Ok(self
            .phrases
            .iter()
            .filter(|p| !p.deleted && p.id != exclude_id && p.simplified == simplified)
            .cloned()
            .collect())
    }

    fn phrases_sharing_pronunciation(
        &self,
        pinyin_markup: &str,
        exclude_id: u32,
    ) -> Result<Vec<PhraseRecord>, PinlianError> {
        // Malformed markup extracts to an empty string; never match on it.
        let wanted = pinyin::extract_from_markup(pinyin_markup).to_lowercase();
        if wanted.is_empty() {
            return Ok(Vec::new());
        }

        Ok(self
            .phrases
            .iter()
            .filter(|p| {
                !p.deleted
                    && p.id != exclude_id
                    && pinyin::extract_from_markup(&p.pinyin).to_lowercase() == wanted
            })
            .cloned()
            .collect())
    }

    fn update_phrase_after_answer(
        &mut self,
        id: u32,
        was_correct: bool,
        answered_at: &str,
        due_date: &str,
        ease_factor: f64,
    ) -> Result<(), PinlianError> {
        let phrase = self
            .phrases
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| PinlianError::Custom(format!("unknown phrase id {}", id)))?;

        phrase.times_seen += 1;
        if was_correct {
            phrase.times_correct += 1;
            phrase.last_time_correct = answered_at.to_string();
        }
        phrase.last_time_seen = answered_at.to_string();
        phrase.due_date = due_date.to_string();
        phrase.ease_factor = ease_factor;

        self.save_phrases()
    }

    fn soft_delete_phrase(&mut self, id: u32) -> Result<(), PinlianError> {
        let phrase = self
            .phrases
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| PinlianError::Custom(format!("unknown phrase id {}", id)))?;

        phrase.deleted = true;
        self.save_phrases()
    }

    fn insert_response_time_sample(
        &mut self,
        phrase_id: u32,
        timestamp: &str,
        elapsed_seconds: f64,
    ) -> Result<(), PinlianError> {
        self.samples.push(ResponseTimeSample {
            phrase_id,
            timestamp: timestamp.to_string(),
            elapsed_seconds,
        });
        self.save_samples()
    }

    fn response_time_count(&self) -> Result<usize, PinlianError> {
        Ok(self.samples.len())
    }

    fn response_time_mean(&self) -> Result<f64, PinlianError> {
        if self.samples.is_empty() {
            return Ok(f64::NAN);
        }
        let sum: f64 = self.samples.iter().map(|s| s.elapsed_seconds).sum();
        Ok(sum / self.samples.len() as f64)
    }

    fn response_time_variance(&self) -> Result<f64, PinlianError> {
        if self.samples.is_empty() {
            return Ok(f64::NAN);
        }
        let mean = self.response_time_mean()?;
        let squared: f64 =
            self.samples.iter().map(|s| (s.elapsed_seconds - mean).powi(2)).sum();
        Ok(squared / self.samples.len() as f64)
    }
}
