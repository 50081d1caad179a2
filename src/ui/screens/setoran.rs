//! Setoran screen.
//!
//! Upload a new submission and track the review status of earlier ones.

use egui::{RichText, Ui};

use crate::gateway::types::SetoranRow;
use crate::setoran::{NewSetoran, SetoranSummary};
use crate::ui::theme::DarkTheme;
use crate::ui::widgets::{setoran_badge, stat_card, SetoranForm, SetoranFormAction};

/// Setoran screen actions.
#[derive(Debug, Clone)]
pub enum SetoranAction {
    /// Re-run the setoran fetch.
    Refresh,
    /// Submit the form.
    Submit(NewSetoran),
    /// Navigate back to the dashboard.
    Back,
}

/// Setoran screen state.
#[derive(Default)]
pub struct SetoranScreen {
    /// Own submissions, newest-first
    pub records: Vec<SetoranRow>,
    /// Derived aggregates
    pub summary: SetoranSummary,
    /// Fetch in flight
    pub loading: bool,
    /// Last fetch or submit error
    pub error: Option<String>,
    /// Transient status line (submit results)
    pub status: Option<String>,
    /// Submission form
    form: SetoranForm,
    /// Form visibility
    show_form: bool,
}

impl SetoranScreen {
    /// Create a new setoran screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the record list after a fetch.
    pub fn set_records(&mut self, records: Vec<SetoranRow>) {
        self.summary = SetoranSummary::from_records(&records);
        self.records = records;
        self.loading = false;
        self.error = None;
    }

    /// Record a failure; previous view state is retained.
    pub fn set_error(&mut self, message: String) {
        self.loading = false;
        self.form.submitting = false;
        self.error = Some(message);
    }

    /// A submission went through: clear the form and show the status.
    pub fn on_submitted(&mut self) {
        self.form.reset();
        self.show_form = false;
        self.status = Some("Setoran terkirim dan menunggu penilaian".to_string());
    }

    /// Render the setoran screen.
    pub fn show(&mut self, ui: &mut Ui) -> Option<SetoranAction> {
        let mut action = None;

        ui.horizontal(|ui| {
            ui.heading("Setoran Hafalan");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("⟳ Refresh").clicked() {
                    action = Some(SetoranAction::Refresh);
                }
                if self.loading {
                    ui.spinner();
                }
            });
        });

        if let Some(error) = &self.error {
            ui.colored_label(DarkTheme::ERROR, error);
        }
        if let Some(status) = &self.status {
            ui.colored_label(DarkTheme::SUCCESS, status);
        }

        ui.add_space(10.0);

        ui.horizontal(|ui| {
            stat_card(ui, "Menunggu", &self.summary.pending.to_string(), DarkTheme::WARNING);
            stat_card(ui, "Diterima", &self.summary.accepted.to_string(), DarkTheme::SUCCESS);
            stat_card(ui, "Ditolak", &self.summary.rejected.to_string(), DarkTheme::ERROR);
            stat_card(ui, "Total Poin", &self.summary.total_points.to_string(), DarkTheme::ACCENT);
        });

        ui.add_space(10.0);

        let toggle_label = if self.show_form {
            "▲ Tutup Form"
        } else {
            "⬆ Setoran Baru"
        };
        if ui.button(toggle_label).clicked() {
            self.show_form = !self.show_form;
            self.status = None;
        }

        if self.show_form {
            ui.add_space(6.0);
            egui::Frame::new()
                .fill(DarkTheme::CARD_BG)
                .inner_margin(10.0)
                .corner_radius(6.0)
                .show(ui, |ui| match self.form.show(ui) {
                    Some(SetoranFormAction::Submit) => {
                        self.form.submitting = true;
                        action = Some(SetoranAction::Submit(self.form.fields.clone()));
                    }
                    Some(SetoranFormAction::Reset) => {
                        self.form.reset();
                        self.show_form = false;
                    }
                    None => {}
                });
        }

        ui.add_space(12.0);
        ui.label(RichText::new("Riwayat Setoran").strong());

        if self.records.is_empty() {
            ui.label(RichText::new("Belum ada setoran").italics());
        } else {
            egui::ScrollArea::vertical().max_height(360.0).show(ui, |ui| {
                for record in &self.records {
                    egui::Frame::new()
                        .fill(DarkTheme::CARD_BG)
                        .inner_margin(8.0)
                        .outer_margin(2.0)
                        .corner_radius(4.0)
                        .show(ui, |ui| {
                            ui.horizontal(|ui| {
                                ui.vertical(|ui| {
                                    ui.label(RichText::new(record.range_label()).strong());
                                    ui.label(
                                        RichText::new(format!(
                                            "{} · Juz {} · {}",
                                            record.jenis.display_label(),
                                            record.juz,
                                            record.tanggal.format("%d %B %Y"),
                                        ))
                                        .size(12.0)
                                        .color(DarkTheme::TEXT_SECONDARY),
                                    );
                                    if let Some(catatan) = &record.catatan {
                                        ui.label(
                                            RichText::new(format!("Catatan: {}", catatan))
                                                .size(12.0)
                                                .color(DarkTheme::TEXT_MUTED),
                                        );
                                    }
                                });

                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::Center),
                                    |ui| {
                                        setoran_badge(ui, record.status);
                                        if record.poin > 0 {
                                            ui.label(
                                                RichText::new(format!("+{} poin", record.poin))
                                                    .color(DarkTheme::ACCENT)
                                                    .size(12.0),
                                            );
                                        }
                                        ui.hyperlink_to("🎧 audio", &record.file_url);
                                    },
                                );
                            });
                        });
                }
            });
        }

        ui.add_space(10.0);
        if ui.button("← Beranda").clicked() {
            action = Some(SetoranAction::Back);
        }

        action
    }
}
