use std::fs;

use eframe::egui;

use super::{
    settings::{
        StudySettings,
        SETTINGS_FILE,
    },
    setup_view,
    testing_view,
    theme::{
        set_theme,
        Theme,
    },
    top_bar,
};
use crate::{
    core::{
        AnswerOutcome,
        Band,
        PhraseRecord,
        PinlianError,
    },
    persistence::{
        load_json_or_default,
        save_json,
    },
    review::{
        LevelRange,
        ReviewSession,
        StudyConfig,
    },
    storage::{
        JsonStore,
        PhraseStore,
    },
};

/// One setup row: a band and how many phrases the store actually has for it.
#[derive(Debug, Clone, Copy)]
pub struct BandRow {
    pub band: Band,
    pub available: u32,
}

/// Everything shown once an answer has been checked or revealed. Checking
/// closes the open question, so the prompt is carried over here.
pub struct Feedback {
    pub prompt: String,
    /// `None` for a reveal, which shows the answer without grading it.
    pub outcome: Option<AnswerOutcome>,
    pub answer_text: String,
    pub details: String,
    pub homonyms: Vec<String>,
    pub same_pronunciation: String,
}

#[derive(Clone, Copy, PartialEq)]
enum View {
    Setup,
    Testing,
}

pub struct PinlianApp {
    // Present in exactly one place: the setup view holds the store, a
    // running session owns it.
    pub store: Option<JsonStore>,
    pub session: Option<ReviewSession<JsonStore>>,

    pub settings: StudySettings,
    pub band_rows: Vec<BandRow>,

    pub theme: Theme,
    pub input: String,
    pub feedback: Option<Feedback>,
    pub status: Option<String>,
    view: View,
}

impl PinlianApp {
    pub fn new(cc: &eframe::CreationContext<'_>, store: JsonStore) -> Self {
        let settings = load_json_or_default::<StudySettings>(SETTINGS_FILE);
        let band_rows: Vec<BandRow> = Band::ALL
            .iter()
            .map(|&band| BandRow { band, available: store.max_ordinal(band) })
            .collect();

        let mut app = Self {
            store: Some(store),
            session: None,
            settings,
            band_rows,
            theme: Theme::default(),
            input: String::new(),
            feedback: None,
            status: None,
            view: View::Setup,
        };
        app.clamp_settings();

        setup_fonts(&cc.egui_ctx);
        set_theme(&cc.egui_ctx, app.theme.clone());
        cc.egui_ctx.set_zoom_factor(cc.egui_ctx.zoom_factor() + 0.3);

        app
    }

    /// Saved settings can reference more phrases than the store holds after
    /// a re-import; pull every selection back into range.
    fn clamp_settings(&mut self) {
        for row in &self.band_rows {
            let selection = self.settings.band_mut(row.band, row.available.max(1));
            if row.available == 0 {
                selection.enabled = false;
                continue;
            }
            selection.end_ordinal = selection.end_ordinal.clamp(1, row.available);
        }
        self.settings.new_card_chance = self.settings.new_card_chance.clamp(0.0, 0.9);
    }

    fn enabled_levels(&self) -> Vec<LevelRange> {
        self.band_rows
            .iter()
            .filter(|row| row.available > 0 && self.settings.band(row.band).enabled)
            .map(|row| LevelRange {
                band: row.band,
                max_ordinal: self.settings.band(row.band).end_ordinal.min(row.available),
            })
            .collect()
    }

    fn begin_session(&mut self) {
        self.save_settings();

        let Some(store) = self.store.take() else {
            return;
        };
        let config = StudyConfig {
            levels: self.enabled_levels(),
            new_card_chance: self.settings.new_card_chance.clamp(0.0, 0.9),
        };

        match ReviewSession::new(store, config) {
            Ok(session) => {
                self.session = Some(session);
                self.view = View::Testing;
                self.next_question();
            }
            Err(e) => {
                self.status = Some(e.to_string());
            }
        }
    }

    fn end_session(&mut self) {
        self.save_settings();

        if let Some(session) = self.session.take() {
            self.store = Some(session.into_store());
        }
        self.feedback = None;
        self.input.clear();
        self.status = None;
        self.view = View::Setup;
    }

    fn next_question(&mut self) {
        self.feedback = None;
        self.input.clear();

        let Some(session) = &mut self.session else {
            return;
        };
        match session.select_next_question() {
            Ok(_) => {
                self.status = None;
            }
            Err(PinlianError::NoEligiblePhrases) => {
                self.status =
                    Some("No phrases in the selected levels. Go back and widen them.".to_string());
            }
            Err(e) => {
                self.status = Some(e.to_string());
            }
        }
    }

    fn check_answer(&mut self) {
        // An empty box is an accidental click or stray Enter, not an answer.
        if self.input.trim().is_empty() {
            return;
        }
        let Some(session) = &mut self.session else {
            return;
        };
        let Some(phrase) = session.current_phrase().cloned() else {
            return;
        };

        match session.submit_answer(&self.input, self.settings.ignore_tones) {
            Ok((outcome, _quality)) => {
                self.feedback = Some(build_feedback(session, &phrase, Some(outcome)));
                self.status = None;
            }
            Err(e) => {
                self.status = Some(e.to_string());
            }
        }
    }

    // Enter on an empty box shows the answer without grading it; the
    // question stays open.
    fn reveal_answer(&mut self) {
        let Some(session) = &self.session else {
            return;
        };
        let Some(phrase) = session.current_phrase() else {
            return;
        };
        self.feedback = Some(build_feedback(session, phrase, None));
    }

    fn delete_phrase(&mut self) {
        if let Some(session) = &mut self.session {
            if let Err(e) = session.delete_current_phrase() {
                self.status = Some(e.to_string());
                return;
            }
        }
        self.next_question();
    }

    pub fn phrase_count(&self) -> usize {
        match (&self.store, &self.session) {
            (Some(store), _) => store.phrase_count(),
            (None, Some(session)) => session.store().phrase_count(),
            (None, None) => 0,
        }
    }

    fn save_settings(&self) {
        if let Err(e) = save_json(&self.settings, SETTINGS_FILE) {
            eprintln!("Failed to save settings: {}", e);
        }
    }
}

fn build_feedback(
    session: &ReviewSession<JsonStore>,
    phrase: &PhraseRecord,
    outcome: Option<AnswerOutcome>,
) -> Feedback {
    let homonyms = session
        .store()
        .phrases_sharing_pronunciation(&phrase.pinyin, phrase.id)
        .map(|phrases| {
            phrases.iter().map(|p| format!("{} ({})", p.simplified, p.answer_text())).collect()
        })
        .unwrap_or_default();

    Feedback {
        prompt: phrase.prompt(),
        outcome,
        answer_text: phrase.answer_text(),
        details: phrase.details().to_string(),
        homonyms,
        same_pronunciation: phrase.same_pronunciation.clone(),
    }
}

impl eframe::App for PinlianApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        top_bar::show(ctx, self);

        match self.view {
            View::Setup => {
                if let Some(action) = setup_view::show(ctx, self) {
                    match action {
                        setup_view::SetupAction::Begin => self.begin_session(),
                    }
                }
            }
            View::Testing => {
                if let Some(action) = testing_view::show(ctx, self) {
                    match action {
                        testing_view::TestingAction::Back => self.end_session(),
                        testing_view::TestingAction::Check => self.check_answer(),
                        testing_view::TestingAction::Reveal => self.reveal_answer(),
                        testing_view::TestingAction::Next => self.next_question(),
                        testing_view::TestingAction::Delete => self.delete_phrase(),
                    }
                }
            }
        }
    }
}

// The default egui fonts have no CJK coverage, so pull in a system font at
// startup. Hanzi render as boxes if none of these paths exist.
fn setup_fonts(ctx: &egui::Context) {
    const CANDIDATES: [&str; 6] = [
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/truetype/wqy/wqy-zenhei.ttc",
        "/System/Library/Fonts/PingFang.ttc",
        "C:\\Windows\\Fonts\\msyh.ttc",
        "C:\\Windows\\Fonts\\simhei.ttf",
    ];

    for path in CANDIDATES {
        let Ok(bytes) = fs::read(path) else {
            continue;
        };

        let mut fonts = egui::FontDefinitions::default();
        fonts
            .font_data
            .insert("cjk".to_owned(), std::sync::Arc::new(egui::FontData::from_owned(bytes)));
        fonts
            .families
            .entry(egui::FontFamily::Proportional)
            .or_default()
            .insert(0, "cjk".to_owned());
        fonts.families.entry(egui::FontFamily::Monospace).or_default().push("cjk".to_owned());
        ctx.set_fonts(fonts);
        return;
    }

    eprintln!("No CJK font found; Chinese text may not render correctly");
}

pub fn run_gui(store: JsonStore) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([860.0, 560.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native("Pinlian", options, Box::new(|cc| Ok(Box::new(PinlianApp::new(cc, store)))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock;

    fn phrase(simplified: &str, markup: &str) -> PhraseRecord {
        PhraseRecord {
            id: 0,
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

    fn testing_app() -> PinlianApp {
        let mut store = JsonStore::in_memory();
        store.insert_phrases(vec![phrase("好", "<span class=\"tone3\">hǎo</span>")]);

        let config = StudyConfig {
            levels: vec![LevelRange { band: Band::Hsk1, max_ordinal: 1 }],
            new_card_chance: 0.0,
        };
        let mut session = ReviewSession::new(store, config).unwrap();
        session.select_next_question().unwrap();

        PinlianApp {
            store: None,
            session: Some(session),
            settings: StudySettings::default(),
            band_rows: vec![BandRow { band: Band::Hsk1, available: 1 }],
            theme: Theme::default(),
            input: String::new(),
            feedback: None,
            status: None,
            view: View::Testing,
        }
    }

    fn stored_phrase(app: &PinlianApp) -> PhraseRecord {
        app.session
            .as_ref()
            .unwrap()
            .store()
            .phrases_in_level_up_to(Band::Hsk1, 1)
            .unwrap()
            .into_iter()
            .next()
            .unwrap()
    }

    #[test]
    fn test_blank_input_is_not_graded() {
        let mut app = testing_app();
        app.input = "   ".to_string();
        app.check_answer();

        assert!(app.feedback.is_none());
        assert!(app.session.as_ref().unwrap().has_open_question());
        let phrase = stored_phrase(&app);
        assert_eq!(phrase.times_seen, 0);
        assert!(clock::is_never(&phrase.last_time_seen));
        assert_eq!(app.session.as_ref().unwrap().store().response_time_count().unwrap(), 0);
    }

    #[test]
    fn test_reveal_shows_answer_without_grading() {
        let mut app = testing_app();
        app.reveal_answer();

        let feedback = app.feedback.as_ref().unwrap();
        assert!(feedback.outcome.is_none());
        assert_eq!(feedback.prompt, "好");
        assert_eq!(feedback.answer_text, "hǎo");
        assert!(app.session.as_ref().unwrap().has_open_question());
        assert_eq!(stored_phrase(&app).times_seen, 0);
    }

    #[test]
    fn test_typed_answer_is_graded() {
        let mut app = testing_app();
        app.input = "hao3".to_string();
        app.check_answer();

        let feedback = app.feedback.as_ref().unwrap();
        assert_eq!(feedback.outcome, Some(AnswerOutcome::Correct));
        assert!(!app.session.as_ref().unwrap().has_open_question());
        assert_eq!(stored_phrase(&app).times_seen, 1);
    }
}
