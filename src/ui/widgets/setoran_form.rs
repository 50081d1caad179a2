//! Setoran submission form.
//!
//! Shared between the setoran screen and the standalone input screen.

use egui::{RichText, Ui};

use crate::gateway::types::SetoranKind;
use crate::setoran::NewSetoran;
use crate::ui::theme::DarkTheme;

/// Form actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetoranFormAction {
    /// Submit the current form state.
    Submit,
    /// Clear the form.
    Reset,
}

/// Setoran form state.
#[derive(Default)]
pub struct SetoranForm {
    /// Current form fields
    pub fields: NewSetoran,
    /// Disable the submit button while an insert is in flight
    pub submitting: bool,
}

impl SetoranForm {
    /// Create an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all fields.
    pub fn reset(&mut self) {
        self.fields = NewSetoran::default();
        self.submitting = false;
    }

    /// Render the form.
    pub fn show(&mut self, ui: &mut Ui) -> Option<SetoranFormAction> {
        let mut action = None;

        ui.horizontal(|ui| {
            ui.label(RichText::new("Form Setoran Baru").strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("✖").clicked() {
                    action = Some(SetoranFormAction::Reset);
                }
            });
        });

        ui.add_space(8.0);

        // Kind selector
        ui.horizontal(|ui| {
            ui.selectable_value(&mut self.fields.kind, SetoranKind::Hafalan, "Hafalan");
            ui.selectable_value(&mut self.fields.kind, SetoranKind::Murojaah, "Murojaah");
        });

        ui.add_space(8.0);

        ui.label("Nama Surah");
        ui.text_edit_singleline(&mut self.fields.surah);

        ui.label("Juz (1-30)");
        ui.text_edit_singleline(&mut self.fields.juz);

        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label("Ayat Mulai");
                ui.text_edit_singleline(&mut self.fields.ayat_start);
            });
            ui.vertical(|ui| {
                ui.label("Ayat Selesai");
                ui.text_edit_singleline(&mut self.fields.ayat_end);
            });
        });

        ui.label("File Audio (MP3/M4A)");
        ui.horizontal(|ui| {
            ui.text_edit_singleline(&mut self.fields.file_url);
            if ui.button("Pilih File...").clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Audio", &["mp3", "m4a", "wav"])
                    .pick_file()
                {
                    self.fields.file_url = path.display().to_string();
                }
            }
        });

        ui.add_space(12.0);

        ui.horizontal(|ui| {
            let submit_label = if self.submitting {
                "Mengirim..."
            } else {
                "Kirim Setoran"
            };

            let submit = egui::Button::new(RichText::new(submit_label).color(egui::Color32::WHITE))
                .fill(DarkTheme::ACCENT);
            if ui.add_enabled(!self.submitting, submit).clicked() {
                action = Some(SetoranFormAction::Submit);
            }

            if ui.button("Batal").clicked() {
                action = Some(SetoranFormAction::Reset);
            }
        });

        action
    }
}
