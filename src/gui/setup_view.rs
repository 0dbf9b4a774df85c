use eframe::egui::{
    self,
    Checkbox,
    Slider,
    SliderClamping,
};
use egui_extras::{
    Column,
    TableBuilder,
};

use super::app::{
    BandRow,
    PinlianApp,
};

pub enum SetupAction {
    Begin,
}

/// Level selection and study options, shown between sessions.
pub fn show(ctx: &egui::Context, app: &mut PinlianApp) -> Option<SetupAction> {
    let mut action = None;

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.add_space(6.0);
        ui.label(app.theme.heading("Study setup").size(24.0));
        ui.add_space(10.0);

        let visible: Vec<BandRow> =
            app.band_rows.iter().copied().filter(|row| row.available > 0).collect();

        if visible.is_empty() {
            ui.label("No vocabulary loaded. Import word lists with `pinlian import <directory>`.");
            return;
        }

        let mut toggled: Option<(usize, bool)> = None;

        TableBuilder::new(ui)
            .striped(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::exact(26.0))
            .column(Column::exact(90.0))
            .column(Column::remainder())
            .column(Column::exact(80.0))
            .header(24.0, |mut header| {
                header.col(|_| {});
                header.col(|ui| {
                    ui.strong("Level");
                });
                header.col(|ui| {
                    ui.strong("Words to draw from");
                });
                header.col(|ui| {
                    ui.strong("Available");
                });
            })
            .body(|body| {
                body.rows(28.0, visible.len(), |mut row| {
                    let index = row.index();
                    let band_row = visible[index];
                    let selection = app.settings.band(band_row.band);

                    row.col(|ui| {
                        let mut enabled = selection.enabled;
                        if ui.add(Checkbox::without_text(&mut enabled)).changed() {
                            toggled = Some((index, enabled));
                        }
                    });
                    row.col(|ui| {
                        let color = if selection.enabled {
                            ui.visuals().strong_text_color()
                        } else {
                            ui.visuals().weak_text_color()
                        };
                        ui.colored_label(color, band_row.band.label());
                    });
                    row.col(|ui| {
                        let selection = app.settings.band_mut(band_row.band, band_row.available);
                        ui.add_enabled_ui(selection.enabled, |ui| {
                            ui.add_sized(
                                [ui.available_width() - 8.0, 18.0],
                                Slider::new(&mut selection.end_ordinal, 1..=band_row.available)
                                    .clamping(SliderClamping::Always),
                            );
                        });
                    });
                    row.col(|ui| {
                        ui.label(band_row.available.to_string());
                    });
                });
            });

        // Levels unlock in order: switching one on pulls in everything
        // before it, switching one off drops everything after it.
        if let Some((index, enabled)) = toggled {
            if enabled {
                for row in &visible[..=index] {
                    app.settings.band_mut(row.band, row.available).enabled = true;
                }
            } else {
                for row in &visible[index..] {
                    app.settings.band_mut(row.band, row.available).enabled = false;
                }
            }
        }

        ui.add_space(14.0);
        ui.separator();
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.label("Chance of drawing an unscheduled word:");
            ui.add(
                Slider::new(&mut app.settings.new_card_chance, 0.0..=0.9)
                    .clamping(SliderClamping::Always)
                    .fixed_decimals(2),
            );
        });
        ui.checkbox(&mut app.settings.ignore_tones, "Ignore tones when checking answers");

        ui.add_space(14.0);

        let ready = app.settings.any_band_enabled();
        if ui.add_enabled(ready, egui::Button::new("Begin")).clicked() {
            action = Some(SetupAction::Begin);
        }

        if let Some(status) = &app.status {
            ui.add_space(8.0);
            ui.colored_label(app.theme.orange(), status);
        }
    });

    action
}
