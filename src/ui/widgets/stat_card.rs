//! Stat card widget.

use egui::{Color32, RichText, Ui};

use crate::ui::theme::DarkTheme;

/// A small framed card with a big number, used in the stat rows at the
/// top of each screen.
pub fn stat_card(ui: &mut Ui, label: &str, value: &str, accent: Color32) {
    egui::Frame::new()
        .fill(DarkTheme::CARD_BG)
        .inner_margin(10.0)
        .outer_margin(2.0)
        .corner_radius(6.0)
        .show(ui, |ui| {
            ui.set_min_width(90.0);
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(value).size(24.0).color(accent).strong());
                ui.label(RichText::new(label).size(12.0).color(DarkTheme::TEXT_SECONDARY));
            });
        });
}

/// Stat card showing a percentage value.
pub fn percentage_card(ui: &mut Ui, label: &str, percentage: u8, accent: Color32) {
    stat_card(ui, label, &format!("{}%", percentage), accent);
}
