//! Dashboard screen.
//!
//! Role-shaped overview: stats cards, recent activity, prayer times card
//! and navigation into the other screens.

use chrono::{Local, Timelike};
use egui::{RichText, Ui};

use crate::dashboard::{greeting, DashboardStats};
use crate::gateway::types::{Profile, SetoranStatus};
use crate::prayer::{format_remaining, next_prayer, PrayerTimes};
use crate::ui::screens::Screen;
use crate::ui::theme::{status_colors, DarkTheme};
use crate::ui::widgets::stat_card;

/// Home screen actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeAction {
    /// Re-run the dashboard fetch.
    Refresh,
    /// Navigate to another screen.
    Navigate(Screen),
}

/// Home screen state.
#[derive(Default)]
pub struct HomeScreen {
    /// Fetched dashboard data
    pub stats: Option<DashboardStats>,
    /// Fetched prayer times
    pub prayer: Option<PrayerTimes>,
    /// Location label for the prayer card
    pub location_name: String,
    /// Fetch in flight
    pub loading: bool,
    /// Last fetch error, previous data stays visible
    pub error: Option<String>,
}

impl HomeScreen {
    /// Create a new home screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the dashboard data after a fetch.
    pub fn set_stats(&mut self, stats: DashboardStats) {
        self.stats = Some(stats);
        self.loading = false;
        self.error = None;
    }

    /// Record a fetch failure; previous view state is retained.
    pub fn set_error(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    /// Render the home screen.
    pub fn show(&mut self, ui: &mut Ui, profile: Option<&Profile>) -> Option<HomeAction> {
        let mut action = None;

        let now = Local::now();
        match profile {
            Some(profile) => {
                ui.heading(format!("{}, {}", greeting(now.hour()), profile.name));
                ui.label(
                    RichText::new(profile.role.display_name())
                        .color(DarkTheme::TEXT_SECONDARY),
                );
            }
            None => {
                ui.heading("Memuat profil...");
            }
        }

        ui.add_space(10.0);

        ui.horizontal(|ui| {
            if ui.button("⟳ Refresh").clicked() {
                action = Some(HomeAction::Refresh);
            }
            if self.loading {
                ui.spinner();
            }
        });

        if let Some(error) = &self.error {
            ui.colored_label(DarkTheme::ERROR, error);
        }

        ui.add_space(10.0);

        self.show_prayer_card(ui, now.time());

        ui.add_space(10.0);

        match &self.stats {
            Some(stats) => self.show_stats(ui, stats.clone()),
            None if self.loading => {
                ui.label(RichText::new("Memuat data...").italics());
            }
            None => {}
        }

        ui.add_space(16.0);

        // Navigation
        ui.label(RichText::new("Menu").strong());
        ui.horizontal_wrapped(|ui| {
            for screen in [
                Screen::Absensi,
                Screen::Setoran,
                Screen::InputSetoran,
                Screen::Leaderboard,
                Screen::JoinOrganize,
            ] {
                if ui.button(screen.title()).clicked() {
                    action = Some(HomeAction::Navigate(screen));
                }
            }
        });

        action
    }

    /// Prayer times card with the next upcoming prayer.
    fn show_prayer_card(&self, ui: &mut Ui, now: chrono::NaiveTime) {
        let Some(times) = &self.prayer else {
            return;
        };

        let next = next_prayer(times, now);

        egui::Frame::new()
            .fill(DarkTheme::CARD_BG)
            .inner_margin(10.0)
            .corner_radius(6.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("🕌").size(20.0));
                    ui.vertical(|ui| {
                        ui.label(
                            RichText::new(format!(
                                "{} {}",
                                next.name,
                                next.time.format("%H:%M")
                            ))
                            .strong(),
                        );
                        ui.label(
                            RichText::new(format!(
                                "{} lagi · {}",
                                format_remaining(next.remaining),
                                self.location_name
                            ))
                            .size(12.0)
                            .color(DarkTheme::TEXT_SECONDARY),
                        );
                    });

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        for (name, time) in times.schedule() {
                            ui.label(
                                RichText::new(format!("{} {}", name, time.format("%H:%M")))
                                    .size(11.0)
                                    .color(DarkTheme::TEXT_MUTED),
                            );
                        }
                    });
                });
            });
    }

    fn show_stats(&self, ui: &mut Ui, stats: DashboardStats) {
        match stats {
            DashboardStats::Student(student) => {
                ui.horizontal(|ui| {
                    stat_card(ui, "Total Poin", &student.total_points.to_string(), DarkTheme::ACCENT);
                    stat_card(ui, "Setoran", &student.summary.total.to_string(), DarkTheme::SUCCESS);
                    stat_card(ui, "Menunggu", &student.summary.pending.to_string(), DarkTheme::WARNING);
                    stat_card(ui, "Label", &student.label_count.to_string(), DarkTheme::ACCENT);
                });

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    stat_card(
                        ui,
                        "Hafalan Diterima",
                        &student.summary.hafalan_accepted.to_string(),
                        DarkTheme::SUCCESS,
                    );
                    stat_card(
                        ui,
                        "Murojaah Diterima",
                        &student.summary.murojaah_accepted.to_string(),
                        DarkTheme::SUCCESS,
                    );
                });

                if !student.recent.is_empty() {
                    ui.add_space(10.0);
                    ui.label(RichText::new("Aktivitas Terbaru").strong());
                    for record in &student.recent {
                        ui.horizontal(|ui| {
                            ui.label(record.range_label());
                            ui.label(
                                RichText::new(record.status.display_label())
                                    .color(status_colors::setoran_color(record.status))
                                    .size(12.0),
                            );
                        });
                    }
                }
            }
            DashboardStats::Teacher(teacher) => {
                ui.horizontal(|ui| {
                    stat_card(
                        ui,
                        "Menunggu Penilaian",
                        &teacher.pending_setoran.to_string(),
                        DarkTheme::WARNING,
                    );
                    stat_card(ui, "Santri", &teacher.student_count.to_string(), DarkTheme::ACCENT);
                });

                ui.add_space(8.0);
                ui.label(RichText::new("Kehadiran Hari Ini").strong());
                ui.horizontal(|ui| {
                    stat_card(ui, "Hadir", &teacher.today.present.to_string(), DarkTheme::SUCCESS);
                    stat_card(ui, "Izin", &teacher.today.excused.to_string(), DarkTheme::WARNING);
                    stat_card(ui, "Alpha", &teacher.today.absent.to_string(), DarkTheme::ERROR);
                });

                if !teacher.recent_pending.is_empty() {
                    ui.add_space(10.0);
                    ui.label(RichText::new("Setoran Masuk").strong());
                    for item in &teacher.recent_pending {
                        let name = item
                            .siswa
                            .as_ref()
                            .map(|s| s.name.as_str())
                            .unwrap_or("Unknown");
                        ui.horizontal(|ui| {
                            ui.label(name);
                            ui.label(
                                RichText::new(item.setoran.range_label())
                                    .color(DarkTheme::TEXT_SECONDARY)
                                    .size(12.0),
                            );
                        });
                    }
                }
            }
            DashboardStats::Parent(parent) => match parent.child {
                Some(child) => {
                    ui.label(RichText::new(format!("Perkembangan {}", child.name)).strong());
                    ui.add_space(6.0);
                    ui.horizontal(|ui| {
                        stat_card(ui, "Total Poin", &child.total_points.to_string(), DarkTheme::ACCENT);
                        stat_card(ui, "Setoran", &child.summary.total.to_string(), DarkTheme::SUCCESS);
                        stat_card(
                            ui,
                            "Hadir 30 Hari",
                            &format!("{}/{}", child.present_days, child.recorded_days),
                            DarkTheme::SUCCESS,
                        );
                    });

                    if !child.recent.is_empty() {
                        ui.add_space(10.0);
                        ui.label(RichText::new("Setoran Terbaru").strong());
                        for record in &child.recent {
                            ui.horizontal(|ui| {
                                ui.label(record.range_label());
                                let accepted = record.status == SetoranStatus::Accepted;
                                let color = if accepted {
                                    DarkTheme::SUCCESS
                                } else {
                                    status_colors::setoran_color(record.status)
                                };
                                ui.label(
                                    RichText::new(record.status.display_label())
                                        .color(color)
                                        .size(12.0),
                                );
                            });
                        }
                    }
                }
                None => {
                    ui.label(RichText::new("Belum ada santri di kelas ini").italics());
                }
            },
            DashboardStats::Admin(admin) => {
                ui.horizontal(|ui| {
                    stat_card(ui, "Pengguna", &admin.user_count.to_string(), DarkTheme::ACCENT);
                    stat_card(ui, "Kelas", &admin.organize_count.to_string(), DarkTheme::ACCENT);
                });
            }
            DashboardStats::NotJoined => {
                ui.label(RichText::new("Belum bergabung dengan kelas").italics());
            }
        }
    }
}
