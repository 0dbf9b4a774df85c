use std::collections::HashMap;

use serde::{
    Deserialize,
    Serialize,
};

use crate::core::Band;

pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandSelection {
    pub enabled: bool,
    /// Highest vocabulary position to draw from within the band.
    pub end_ordinal: u32,
}

/// Study configuration persisted between runs, keyed by band name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudySettings {
    pub bands: HashMap<String, BandSelection>,
    pub new_card_chance: f64,
    pub ignore_tones: bool,
}

impl Default for StudySettings {
    fn default() -> Self {
        Self { bands: HashMap::new(), new_card_chance: 0.2, ignore_tones: false }
    }
}

impl StudySettings {
    pub fn band(&self, band: Band) -> BandSelection {
        self.bands
            .get(band.key())
            .copied()
            .unwrap_or(BandSelection { enabled: false, end_ordinal: 1 })
    }

    pub fn band_mut(&mut self, band: Band, default_end: u32) -> &mut BandSelection {
        self.bands
            .entry(band.key().to_string())
            .or_insert(BandSelection { enabled: false, end_ordinal: default_end })
    }

    pub fn any_band_enabled(&self) -> bool {
        self.bands.values().any(|selection| selection.enabled)
    }
}
