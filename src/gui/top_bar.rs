use eframe::egui::{
    self,
    containers,
};

use super::app::PinlianApp;

pub fn show(ctx: &egui::Context, app: &PinlianApp) {
    egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
        containers::menu::Bar::new().ui(ui, |ui| {
            egui::widgets::global_theme_preference_switch(ui);
            ui.separator();

            ui.menu_button("File", |ui| {
                if ui.button("Quit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.weak(format!("{} phrases", app.phrase_count()));
            });
        });
    });
}
