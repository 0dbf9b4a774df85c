use eframe::egui::{
    self,
    Button,
    Key,
    RichText,
    TextEdit,
};

use super::app::PinlianApp;
use crate::core::AnswerOutcome;

pub enum TestingAction {
    Back,
    Check,
    Reveal,
    Next,
    Delete,
}

/// The question/answer loop.
pub fn show(ctx: &egui::Context, app: &mut PinlianApp) -> Option<TestingAction> {
    let mut action = None;
    let has_question = app.session.as_ref().is_some_and(|session| session.has_open_question());

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.horizontal(|ui| {
            if ui.button("Back").clicked() {
                action = Some(TestingAction::Back);
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.add_enabled(has_question, Button::new("Delete")).clicked() {
                    action = Some(TestingAction::Delete);
                }
            });
        });

        ui.add_space(20.0);

        ui.vertical_centered(|ui| {
            let prompt = match (&app.feedback, &app.session) {
                (Some(feedback), _) => Some(feedback.prompt.clone()),
                (None, Some(session)) => session.current_phrase().map(|phrase| phrase.prompt()),
                (None, None) => None,
            };
            if let Some(prompt) = prompt {
                ui.label(app.theme.heading(&prompt).size(52.0));
            }

            ui.add_space(12.0);

            if let Some(feedback) = &app.feedback {
                match feedback.outcome {
                    Some(outcome) => {
                        let (color, verdict) = match outcome {
                            AnswerOutcome::Correct => (app.theme.green(), "Correct"),
                            AnswerOutcome::Homonym => {
                                (app.theme.yellow(), "Right sound, wrong word")
                            }
                            AnswerOutcome::Wrong => (app.theme.red(), "Wrong"),
                        };
                        ui.colored_label(color, RichText::new(&feedback.answer_text).size(26.0));
                        ui.colored_label(color, verdict);
                    }
                    // Revealed rather than answered; no verdict to show.
                    None => {
                        ui.label(RichText::new(&feedback.answer_text).size(26.0));
                    }
                }
                ui.add_space(6.0);
                ui.label(&feedback.details);

                let alternates = if feedback.homonyms.is_empty() {
                    feedback.same_pronunciation.clone()
                } else {
                    feedback.homonyms.join("、")
                };
                if !alternates.is_empty() {
                    ui.add_space(4.0);
                    ui.weak(format!("Same pronunciation: {}", alternates));
                }
            } else {
                // Keep the input from jumping when the answer appears.
                ui.add_space(64.0);
            }

            ui.add_space(16.0);

            let response = ui.add_sized(
                [320.0, 26.0],
                TextEdit::singleline(&mut app.input).hint_text("pinyin, e.g. ni3hao3"),
            );
            if response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                // Enter checks typed input or reveals on an empty box; once
                // feedback is up it advances.
                action = Some(if app.feedback.is_none() && has_question {
                    if app.input.trim().is_empty() {
                        TestingAction::Reveal
                    } else {
                        TestingAction::Check
                    }
                } else {
                    TestingAction::Next
                });
                response.request_focus();
            }

            ui.add_space(10.0);

            if app.feedback.is_none() {
                if ui.add_enabled(has_question, Button::new("Check")).clicked() {
                    action = Some(TestingAction::Check);
                }
            } else if ui.button("Next").clicked() {
                action = Some(TestingAction::Next);
            }

            if let Some(status) = &app.status {
                ui.add_space(10.0);
                ui.colored_label(app.theme.orange(), status);
            }
        });
    });

    action
}
