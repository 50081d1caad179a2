//! Leaderboard screen.
//!
//! Class ranking by total points, with search, category chips, the
//! caller's own rank card, a top-3 podium and category leader cards.

use egui::{Color32, RichText, Ui};

use crate::gateway::types::Profile;
use crate::points::filter::{filtered_view, LeaderboardSort};
use crate::points::rankings::{entry_for, leader_by, LeaderboardEntry, PointCategory};
use crate::ui::theme::{status_colors, DarkTheme};

/// Leaderboard screen actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderboardAction {
    /// Re-run the leaderboard fetch.
    Refresh,
    /// Navigate back to the dashboard.
    Back,
}

/// Leaderboard screen state.
#[derive(Default)]
pub struct LeaderboardScreen {
    /// Full ranking, as fetched
    pub entries: Vec<LeaderboardEntry>,
    /// Fetch in flight
    pub loading: bool,
    /// Last fetch error, previous data stays visible
    pub error: Option<String>,
    /// Search text
    search_text: String,
    /// Selected category chip
    sort: LeaderboardSort,
}

impl LeaderboardScreen {
    /// Create a new leaderboard screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the ranking after a fetch.
    pub fn set_entries(&mut self, entries: Vec<LeaderboardEntry>) {
        self.entries = entries;
        self.loading = false;
        self.error = None;
    }

    /// Record a fetch failure; previous view state is retained.
    pub fn set_error(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    /// Render the leaderboard screen.
    pub fn show(&mut self, ui: &mut Ui, profile: Option<&Profile>) -> Option<LeaderboardAction> {
        let mut action = None;

        ui.horizontal(|ui| {
            ui.heading("🏆 Leaderboard");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("⟳ Refresh").clicked() {
                    action = Some(LeaderboardAction::Refresh);
                }
                if self.loading {
                    ui.spinner();
                }
            });
        });
        ui.label(
            RichText::new("Kompetisi pembelajaran Quran").color(DarkTheme::TEXT_SECONDARY),
        );

        if let Some(error) = &self.error {
            ui.colored_label(DarkTheme::ERROR, error);
        }

        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.label("🔍");
            ui.text_edit_singleline(&mut self.search_text);
        });

        ui.horizontal(|ui| {
            for sort in [
                LeaderboardSort::Total,
                LeaderboardSort::Memorization,
                LeaderboardSort::Quiz,
            ] {
                ui.selectable_value(&mut self.sort, sort, sort.display_label());
            }
        });

        ui.add_space(8.0);

        // My rank card
        if let Some(me) = profile.and_then(|p| entry_for(&self.entries, p.id)) {
            let me = me.clone();
            self.show_my_rank(ui, &me);
            ui.add_space(8.0);
        }

        let view = filtered_view(&self.entries, &self.search_text, self.sort);

        // Podium for the unfiltered ranking
        if view.len() >= 3
            && self.search_text.trim().is_empty()
            && self.sort == LeaderboardSort::Total
        {
            self.show_podium(ui, &view);
            ui.add_space(8.0);
        }

        let section = if self.search_text.trim().is_empty() {
            "Semua Peringkat".to_string()
        } else {
            format!("Hasil Pencarian ({})", view.len())
        };
        ui.label(RichText::new(section).strong());

        if view.is_empty() {
            ui.label(RichText::new("Tidak ada santri yang cocok").italics());
        } else {
            let my_id = profile.map(|p| p.id);
            egui::ScrollArea::vertical().max_height(320.0).show(ui, |ui| {
                for entry in &view {
                    self.show_entry_row(ui, entry, my_id == Some(entry.student_id));
                }
            });
        }

        ui.add_space(10.0);
        self.show_category_cards(ui);

        ui.add_space(10.0);
        if ui.button("← Beranda").clicked() {
            action = Some(LeaderboardAction::Back);
        }

        action
    }

    /// The caller's own rank card.
    fn show_my_rank(&self, ui: &mut Ui, me: &LeaderboardEntry) {
        egui::Frame::new()
            .fill(DarkTheme::CARD_BG)
            .inner_margin(10.0)
            .corner_radius(6.0)
            .show(ui, |ui| {
                ui.label(RichText::new("Peringkat Saya").size(12.0).color(DarkTheme::TEXT_SECONDARY));
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(format!("#{}", me.rank))
                            .size(24.0)
                            .color(status_colors::rank_color(me.rank))
                            .strong(),
                    );
                    ui.vertical(|ui| {
                        ui.label(RichText::new(&me.name).strong());
                        ui.label(
                            RichText::new(format!(
                                "{} poin · Hafalan: {} · Quiz: {}",
                                me.total_points, me.memorization_points, me.quiz_points
                            ))
                            .size(12.0)
                            .color(DarkTheme::TEXT_SECONDARY),
                        );
                    });
                });
            });
    }

    /// Top-3 podium.
    fn show_podium(&self, ui: &mut Ui, view: &[LeaderboardEntry]) {
        ui.label(RichText::new("Top 3 Santri Terbaik").strong());
        ui.columns(3, |columns| {
            // Render 2nd, 1st, 3rd to keep the winner in the middle
            let order = [(1usize, 0usize), (0, 1), (2, 2)];
            for (entry_index, column_index) in order {
                let Some(entry) = view.get(entry_index) else {
                    continue;
                };
                let column = &mut columns[column_index];
                let color = status_colors::rank_color(entry.rank);
                let icon = match entry.rank {
                    1 => "👑",
                    2 => "🏆",
                    _ => "🥉",
                };

                egui::Frame::new()
                    .fill(DarkTheme::CARD_BG)
                    .inner_margin(8.0)
                    .corner_radius(6.0)
                    .show(column, |ui| {
                        ui.vertical_centered(|ui| {
                            ui.label(RichText::new(icon).size(22.0));
                            ui.label(RichText::new(&entry.name).strong());
                            ui.label(
                                RichText::new(format!("{} poin", entry.total_points))
                                    .size(12.0)
                                    .color(DarkTheme::TEXT_SECONDARY),
                            );
                            ui.label(RichText::new(format!("#{}", entry.rank)).color(color).strong());
                        });
                    });
            }
        });
    }

    /// One ranking row.
    fn show_entry_row(&self, ui: &mut Ui, entry: &LeaderboardEntry, is_me: bool) {
        let fill = if is_me {
            DarkTheme::ACCENT.linear_multiply(0.15)
        } else {
            DarkTheme::CARD_BG
        };

        egui::Frame::new()
            .fill(fill)
            .inner_margin(8.0)
            .outer_margin(2.0)
            .corner_radius(4.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(format!("#{}", entry.rank))
                            .color(status_colors::rank_color(entry.rank))
                            .strong(),
                    );
                    ui.vertical(|ui| {
                        let name = if is_me {
                            format!("{} (Saya)", entry.name)
                        } else {
                            entry.name.clone()
                        };
                        ui.label(RichText::new(name).strong());
                        ui.label(
                            RichText::new(format!(
                                "Hafalan: {} · Quiz: {}",
                                entry.memorization_points, entry.quiz_points
                            ))
                            .size(12.0)
                            .color(DarkTheme::TEXT_SECONDARY),
                        );
                    });

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new(format!("{} poin", entry.total_points)).strong(),
                        );
                        if entry.rank <= 3 {
                            ui.label(
                                RichText::new(format!("Juara {}", entry.rank))
                                    .size(11.0)
                                    .color(status_colors::rank_color(entry.rank)),
                            );
                        }
                    });
                });
            });
    }

    /// Category leader cards.
    fn show_category_cards(&self, ui: &mut Ui) {
        ui.label(RichText::new("Kategori Pencapaian").strong());
        ui.columns(2, |columns| {
            let cards = [
                (0usize, "📖 Top Hafalan", PointCategory::Memorization),
                (1, "🏅 Top Quiz", PointCategory::Quiz),
            ];
            for (column_index, title, category) in cards {
                let leader = leader_by(&self.entries, category);
                let column = &mut columns[column_index];

                egui::Frame::new()
                    .fill(DarkTheme::CARD_BG)
                    .inner_margin(8.0)
                    .corner_radius(6.0)
                    .show(column, |ui| {
                        ui.label(RichText::new(title).strong());
                        match leader {
                            Some(leader) => {
                                let points = match category {
                                    PointCategory::Memorization => leader.memorization_points,
                                    PointCategory::Quiz => leader.quiz_points,
                                };
                                ui.label(&leader.name);
                                ui.label(
                                    RichText::new(format!("{} poin", points))
                                        .size(12.0)
                                        .color(DarkTheme::TEXT_SECONDARY),
                                );
                            }
                            None => {
                                ui.label(RichText::new("-").color(Color32::GRAY));
                            }
                        }
                    });
            }
        });
    }
}
