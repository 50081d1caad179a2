//! Standalone setoran input screen.
//!
//! The same form as the setoran screen, without the history list, for the
//! quick-input tab.

use egui::{RichText, Ui};

use crate::setoran::NewSetoran;
use crate::ui::theme::DarkTheme;
use crate::ui::widgets::{SetoranForm, SetoranFormAction};

/// Input screen actions.
#[derive(Debug, Clone)]
pub enum InputSetoranAction {
    /// Submit the form.
    Submit(NewSetoran),
    /// Navigate back to the dashboard.
    Back,
}

/// Input screen state.
#[derive(Default)]
pub struct InputSetoranScreen {
    /// Submission form
    form: SetoranForm,
    /// Last submit error
    pub error: Option<String>,
    /// Transient status line
    pub status: Option<String>,
}

impl InputSetoranScreen {
    /// Create a new input screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// A submission went through: clear the form and show the status.
    pub fn on_submitted(&mut self) {
        self.form.reset();
        self.error = None;
        self.status = Some("Setoran terkirim dan menunggu penilaian".to_string());
    }

    /// Record a submit failure.
    pub fn set_error(&mut self, message: String) {
        self.form.submitting = false;
        self.error = Some(message);
    }

    /// Render the input screen.
    pub fn show(&mut self, ui: &mut Ui) -> Option<InputSetoranAction> {
        let mut action = None;

        ui.heading("Input Setoran");
        ui.label(
            RichText::new("Kirim hafalan atau murojaah Anda").color(DarkTheme::TEXT_SECONDARY),
        );

        if let Some(error) = &self.error {
            ui.colored_label(DarkTheme::ERROR, error);
        }
        if let Some(status) = &self.status {
            ui.colored_label(DarkTheme::SUCCESS, status);
        }

        ui.add_space(10.0);

        egui::Frame::new()
            .fill(DarkTheme::CARD_BG)
            .inner_margin(10.0)
            .corner_radius(6.0)
            .show(ui, |ui| match self.form.show(ui) {
                Some(SetoranFormAction::Submit) => {
                    self.form.submitting = true;
                    self.status = None;
                    action = Some(InputSetoranAction::Submit(self.form.fields.clone()));
                }
                Some(SetoranFormAction::Reset) => {
                    self.form.reset();
                    self.status = None;
                }
                None => {}
            });

        ui.add_space(10.0);
        if ui.button("← Beranda").clicked() {
            action = Some(InputSetoranAction::Back);
        }

        action
    }
}
