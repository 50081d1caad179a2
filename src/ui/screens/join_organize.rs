//! Join-a-class screen.

use egui::{RichText, Ui};

use crate::gateway::types::Profile;
use crate::ui::theme::DarkTheme;

/// Join screen actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOrganizeAction {
    /// Try to join with the entered code.
    Join(String),
    /// Reload the profile (membership may have changed elsewhere).
    RefreshProfile,
    /// Navigate back to the dashboard.
    Back,
}

/// Join screen state.
#[derive(Default)]
pub struct JoinOrganizeScreen {
    /// Entered class code
    code: String,
    /// Join in flight
    pub joining: bool,
    /// Last join error
    pub error: Option<String>,
    /// Transient status line (join results)
    pub status: Option<String>,
}

impl JoinOrganizeScreen {
    /// Create a new join screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// A join went through.
    pub fn on_joined(&mut self, organize_name: &str) {
        self.joining = false;
        self.code.clear();
        self.error = None;
        self.status = Some(format!("Berhasil bergabung dengan kelas \"{}\"", organize_name));
    }

    /// Record a join failure.
    pub fn set_error(&mut self, message: String) {
        self.joining = false;
        self.error = Some(message);
    }

    /// Render the join screen.
    pub fn show(&mut self, ui: &mut Ui, profile: Option<&Profile>) -> Option<JoinOrganizeAction> {
        let mut action = None;

        ui.heading("Gabung Kelas");

        let already_joined = profile.map(|p| p.organize_id.is_some()).unwrap_or(false);

        if already_joined {
            ui.add_space(10.0);
            ui.label(RichText::new("✔ Sudah Bergabung").size(18.0).color(DarkTheme::SUCCESS));
            ui.label(
                RichText::new("Anda sudah bergabung dengan kelas aktif")
                    .color(DarkTheme::TEXT_SECONDARY),
            );

            ui.add_space(10.0);
            ui.horizontal(|ui| {
                if ui.button("← Kembali ke Beranda").clicked() {
                    action = Some(JoinOrganizeAction::Back);
                }
                if ui.button("⟳ Refresh Data").clicked() {
                    action = Some(JoinOrganizeAction::RefreshProfile);
                }
            });

            return action;
        }

        ui.label(
            RichText::new("Masukkan kode kelas untuk bergabung")
                .color(DarkTheme::TEXT_SECONDARY),
        );

        if let Some(error) = &self.error {
            ui.colored_label(DarkTheme::ERROR, error);
        }
        if let Some(status) = &self.status {
            ui.colored_label(DarkTheme::SUCCESS, status);
        }

        ui.add_space(10.0);

        ui.horizontal(|ui| {
            ui.label("🔑");
            let response = ui.text_edit_singleline(&mut self.code);
            if response.changed() {
                self.code = self.code.to_uppercase();
                self.code.truncate(6);
            }
        });

        ui.add_space(8.0);

        let join_label = if self.joining { "Bergabung..." } else { "Gabung Kelas" };
        let join = egui::Button::new(RichText::new(join_label).color(egui::Color32::WHITE))
            .fill(DarkTheme::ACCENT);
        if ui.add_enabled(!self.joining, join).clicked() {
            self.joining = true;
            self.error = None;
            action = Some(JoinOrganizeAction::Join(self.code.clone()));
        }

        ui.add_space(10.0);
        if ui.button("← Beranda").clicked() {
            action = Some(JoinOrganizeAction::Back);
        }

        action
    }
}
