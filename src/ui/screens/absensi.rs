//! Attendance screen.
//!
//! Students see their own history and statistics; teachers and parents
//! see the class recap with search, status filters, per-student detail
//! and the CSV export dialog.

use egui::{RichText, Ui};
use uuid::Uuid;

use crate::attendance::roster::{filter_students, StatusFilter, StudentAttendance};
use crate::events::AbsensiData;
use crate::gateway::types::{Profile, Role};
use crate::ui::theme::DarkTheme;
use crate::ui::widgets::{attendance_badge, percentage_card, stat_card};

/// Attendance screen actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbsensiAction {
    /// Re-run the attendance fetch.
    Refresh,
    /// Export the date range to CSV.
    Export { start: String, end: String },
    /// Navigate back to the dashboard.
    Back,
}

/// Attendance screen view mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum AbsensiView {
    /// Roster (or own history for students)
    #[default]
    Overview,
    /// One student's record list
    StudentDetail,
}

/// Attendance screen state.
#[derive(Default)]
pub struct AbsensiScreen {
    /// Fetched attendance data
    pub data: Option<AbsensiData>,
    /// Fetch in flight
    pub loading: bool,
    /// Last fetch error, previous data stays visible
    pub error: Option<String>,
    /// Transient status line (export results)
    pub status: Option<String>,
    /// Search text
    search_text: String,
    /// Current status filter
    filter: StatusFilter,
    /// Current view mode
    view: AbsensiView,
    /// Selected student id
    selected_student: Option<Uuid>,
    /// Export dialog visibility
    show_export: bool,
    /// Export range start, `YYYY-MM-DD`
    start_date: String,
    /// Export range end, `YYYY-MM-DD`
    end_date: String,
}

impl AbsensiScreen {
    /// Create a new attendance screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the attendance data after a fetch.
    pub fn set_data(&mut self, data: AbsensiData) {
        self.data = Some(data);
        self.loading = false;
        self.error = None;
    }

    /// Record a fetch failure; previous view state is retained.
    pub fn set_error(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    /// Close the export dialog and clear its inputs after a finished export.
    pub fn finish_export(&mut self, status: String) {
        self.show_export = false;
        self.start_date.clear();
        self.end_date.clear();
        self.status = Some(status);
    }

    /// Render the attendance screen.
    pub fn show(&mut self, ui: &mut Ui, profile: Option<&Profile>) -> Option<AbsensiAction> {
        let mut action = None;

        let is_student = matches!(profile.map(|p| p.role), Some(Role::Siswa));

        ui.horizontal(|ui| {
            ui.heading(if is_student { "Absensi Saya" } else { "Rekap Absensi" });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("⟳ Refresh").clicked() {
                    action = Some(AbsensiAction::Refresh);
                }
                if !is_student && ui.button("⬇ Export").clicked() {
                    self.show_export = true;
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
            ui.colored_label(DarkTheme::TEXT_SECONDARY, status);
        }

        ui.add_space(10.0);

        match self.data.clone() {
            Some(AbsensiData::Student { records, stats }) => {
                ui.horizontal(|ui| {
                    percentage_card(ui, "Kehadiran", stats.percentage, DarkTheme::ACCENT);
                    stat_card(ui, "Hadir", &stats.present_count.to_string(), DarkTheme::SUCCESS);
                    stat_card(ui, "Izin", &stats.excused_count.to_string(), DarkTheme::WARNING);
                    stat_card(ui, "Alpha", &stats.absent_count.to_string(), DarkTheme::ERROR);
                });

                ui.add_space(10.0);
                ui.label(RichText::new("Riwayat Kehadiran").strong());

                if records.is_empty() {
                    ui.label(RichText::new("Belum ada data absensi").italics());
                } else {
                    egui::ScrollArea::vertical().max_height(400.0).show(ui, |ui| {
                        for record in &records {
                            egui::Frame::new()
                                .fill(DarkTheme::CARD_BG)
                                .inner_margin(8.0)
                                .outer_margin(2.0)
                                .corner_radius(4.0)
                                .show(ui, |ui| {
                                    ui.horizontal(|ui| {
                                        ui.label(record.date.format("%A, %d %B %Y").to_string());
                                        ui.with_layout(
                                            egui::Layout::right_to_left(egui::Align::Center),
                                            |ui| {
                                                attendance_badge(ui, record.status);
                                                if let Some(note) = &record.note {
                                                    ui.label(
                                                        RichText::new(note)
                                                            .size(12.0)
                                                            .color(DarkTheme::TEXT_MUTED),
                                                    );
                                                }
                                            },
                                        );
                                    });
                                });
                        }
                    });
                }
            }
            Some(AbsensiData::Class { roster, details }) => match self.view {
                AbsensiView::Overview => {
                    if roster.failed > 0 {
                        ui.colored_label(
                            DarkTheme::WARNING,
                            format!("{} santri gagal dimuat", roster.failed),
                        );
                    }

                    self.show_roster_controls(ui);
                    ui.add_space(8.0);

                    let filtered =
                        filter_students(&roster.students, &self.search_text, self.filter);

                    if filtered.is_empty() {
                        ui.label(RichText::new("Tidak ada santri yang cocok").italics());
                    } else {
                        egui::ScrollArea::vertical().max_height(320.0).show(ui, |ui| {
                            for student in &filtered {
                                if self.show_student_card(ui, student) {
                                    self.selected_student = Some(student.id);
                                    self.view = AbsensiView::StudentDetail;
                                }
                            }
                        });
                    }

                    ui.add_space(12.0);
                    ui.label(RichText::new("Detail 7 Hari Terakhir").strong());
                    for detail in &details {
                        let present = detail
                            .students
                            .iter()
                            .filter(|s| s.status == crate::gateway::types::AttendanceStatus::Present)
                            .count();
                        egui::CollapsingHeader::new(format!(
                            "{} · {}/{} hadir",
                            detail.date.format("%d %B %Y"),
                            present,
                            detail.students.len()
                        ))
                        .show(ui, |ui| {
                            for student in &detail.students {
                                ui.horizontal(|ui| {
                                    ui.label(&student.name);
                                    attendance_badge(ui, student.status);
                                    if let Some(note) = &student.note {
                                        ui.label(
                                            RichText::new(note)
                                                .size(12.0)
                                                .color(DarkTheme::TEXT_MUTED),
                                        );
                                    }
                                });
                            }
                        });
                    }
                }
                AbsensiView::StudentDetail => {
                    let student = self
                        .selected_student
                        .and_then(|id| roster.students.iter().find(|s| s.id == id));

                    match student {
                        Some(student) => self.show_student_detail(ui, student),
                        None => {
                            self.view = AbsensiView::Overview;
                        }
                    }

                    if ui.button("← Kembali ke daftar").clicked() {
                        self.view = AbsensiView::Overview;
                        self.selected_student = None;
                    }
                }
            },
            None => {
                if self.loading {
                    ui.label(RichText::new("Memuat data absensi...").italics());
                }
            }
        }

        if let Some(export) = self.show_export_dialog(ui) {
            action = Some(export);
        }

        ui.add_space(10.0);
        if ui.button("← Beranda").clicked() {
            action = Some(AbsensiAction::Back);
        }

        action
    }

    /// Search box and status filter chips.
    fn show_roster_controls(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.label("🔍");
            ui.text_edit_singleline(&mut self.search_text);
        });

        ui.horizontal(|ui| {
            ui.label("Filter:");
            for filter in [
                StatusFilter::All,
                StatusFilter::Present,
                StatusFilter::Excused,
                StatusFilter::Absent,
            ] {
                ui.selectable_value(&mut self.filter, filter, filter.display_label());
            }
        });
    }

    /// One roster card; returns true when the detail view was requested.
    fn show_student_card(&self, ui: &mut Ui, student: &StudentAttendance) -> bool {
        let mut clicked = false;

        egui::Frame::new()
            .fill(DarkTheme::CARD_BG)
            .inner_margin(8.0)
            .outer_margin(2.0)
            .corner_radius(4.0)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(RichText::new(&student.name).strong());
                        ui.label(
                            RichText::new(format!(
                                "{}% hadir · {} hari tercatat",
                                student.stats.percentage, student.stats.total_days
                            ))
                            .size(12.0)
                            .color(DarkTheme::TEXT_SECONDARY),
                        );
                    });

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Detail").clicked() {
                            clicked = true;
                        }
                        if let Some(last) = &student.last {
                            attendance_badge(ui, last.status);
                        }
                    });
                });
            });

        clicked
    }

    /// One student's full record list.
    fn show_student_detail(&self, ui: &mut Ui, student: &StudentAttendance) {
        ui.label(RichText::new(&student.name).size(18.0).strong());
        ui.horizontal(|ui| {
            percentage_card(ui, "Kehadiran", student.stats.percentage, DarkTheme::ACCENT);
            stat_card(ui, "Hadir", &student.stats.present_count.to_string(), DarkTheme::SUCCESS);
            stat_card(ui, "Izin", &student.stats.excused_count.to_string(), DarkTheme::WARNING);
            stat_card(ui, "Alpha", &student.stats.absent_count.to_string(), DarkTheme::ERROR);
        });

        ui.add_space(8.0);
        egui::ScrollArea::vertical().max_height(300.0).show(ui, |ui| {
            for record in &student.records {
                ui.horizontal(|ui| {
                    ui.label(record.date.format("%d %B %Y").to_string());
                    attendance_badge(ui, record.status);
                    if let Some(note) = &record.note {
                        ui.label(RichText::new(note).size(12.0).color(DarkTheme::TEXT_MUTED));
                    }
                });
            }
        });
    }

    /// Export dialog; emits the export action once both bounds are entered.
    fn show_export_dialog(&mut self, ui: &mut Ui) -> Option<AbsensiAction> {
        if !self.show_export {
            return None;
        }

        let mut action = None;
        let mut open = true;

        egui::Window::new("Export Absensi")
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ui.ctx(), |ui| {
                ui.label("Rentang tanggal (YYYY-MM-DD)");

                ui.horizontal(|ui| {
                    ui.label("Mulai:");
                    ui.text_edit_singleline(&mut self.start_date);
                });
                ui.horizontal(|ui| {
                    ui.label("Selesai:");
                    ui.text_edit_singleline(&mut self.end_date);
                });

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    let export = egui::Button::new(
                        RichText::new("Export CSV").color(egui::Color32::WHITE),
                    )
                    .fill(DarkTheme::ACCENT);
                    if ui.add(export).clicked() {
                        action = Some(AbsensiAction::Export {
                            start: self.start_date.clone(),
                            end: self.end_date.clone(),
                        });
                    }
                    if ui.button("Batal").clicked() {
                        self.show_export = false;
                    }
                });
            });

        if !open {
            self.show_export = false;
        }

        action
    }
}
