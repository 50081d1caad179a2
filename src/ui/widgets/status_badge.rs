//! Status badge widget.

use egui::{RichText, Ui};

use crate::gateway::types::{AttendanceStatus, SetoranStatus};
use crate::ui::theme::status_colors;

/// Colored badge for an attendance status.
pub fn attendance_badge(ui: &mut Ui, status: AttendanceStatus) {
    badge(ui, status_icon(status), status.display_label(), status_colors::attendance_color(status));
}

/// Colored badge for a setoran review status.
pub fn setoran_badge(ui: &mut Ui, status: SetoranStatus) {
    let icon = match status {
        SetoranStatus::Pending => "⏳",
        SetoranStatus::Accepted => "✔",
        SetoranStatus::Rejected => "✖",
    };
    badge(ui, icon, status.display_label(), status_colors::setoran_color(status));
}

fn status_icon(status: AttendanceStatus) -> &'static str {
    match status {
        AttendanceStatus::Present => "✔",
        AttendanceStatus::Excused => "⏱",
        AttendanceStatus::Absent => "✖",
    }
}

fn badge(ui: &mut Ui, icon: &str, label: &str, color: egui::Color32) {
    egui::Frame::new()
        .fill(color.linear_multiply(0.15))
        .inner_margin(egui::Margin::symmetric(8, 3))
        .corner_radius(10.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(icon).color(color).size(12.0));
                ui.label(RichText::new(label).color(color).size(12.0).strong());
            });
        });
}
