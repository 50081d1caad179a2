//! UI theme definitions.

use egui::{Color32, Visuals};

use crate::gateway::types::{AttendanceStatus, SetoranStatus};

/// Theme configuration for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Get the egui Visuals for this theme.
    pub fn visuals(&self) -> Visuals {
        match self {
            Theme::Dark => dark_visuals(),
            Theme::Light => light_visuals(),
        }
    }
}

/// Dark theme colors.
pub struct DarkTheme;

impl DarkTheme {
    /// Background color
    pub const BACKGROUND: Color32 = Color32::from_rgb(18, 20, 18);
    /// Panel background
    pub const PANEL_BG: Color32 = Color32::from_rgb(26, 30, 27);
    /// Card background
    pub const CARD_BG: Color32 = Color32::from_rgb(36, 42, 38);
    /// Primary text
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(240, 243, 240);
    /// Secondary text
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(158, 168, 160);
    /// Muted text
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(100, 108, 102);
    /// Accent color (green)
    pub const ACCENT: Color32 = Color32::from_rgb(16, 185, 129);
    /// Success color (green)
    pub const SUCCESS: Color32 = Color32::from_rgb(16, 185, 129);
    /// Warning color (amber)
    pub const WARNING: Color32 = Color32::from_rgb(245, 158, 11);
    /// Error color (red)
    pub const ERROR: Color32 = Color32::from_rgb(239, 68, 68);
    /// Border color
    pub const BORDER: Color32 = Color32::from_rgb(58, 66, 60);
}

/// Light theme colors.
pub struct LightTheme;

impl LightTheme {
    /// Background color
    pub const BACKGROUND: Color32 = Color32::from_rgb(249, 250, 249);
    /// Panel background
    pub const PANEL_BG: Color32 = Color32::from_rgb(255, 255, 255);
    /// Card background
    pub const CARD_BG: Color32 = Color32::from_rgb(243, 246, 244);
    /// Primary text
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(30, 36, 32);
    /// Secondary text
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(96, 104, 98);
    /// Muted text
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(148, 156, 150);
    /// Accent color (green)
    pub const ACCENT: Color32 = Color32::from_rgb(5, 150, 105);
    /// Success color (green)
    pub const SUCCESS: Color32 = Color32::from_rgb(5, 150, 105);
    /// Warning color (amber)
    pub const WARNING: Color32 = Color32::from_rgb(217, 119, 6);
    /// Error color (red)
    pub const ERROR: Color32 = Color32::from_rgb(220, 38, 38);
    /// Border color
    pub const BORDER: Color32 = Color32::from_rgb(220, 226, 222);
}

/// Create dark theme visuals.
fn dark_visuals() -> Visuals {
    let mut visuals = Visuals::dark();

    visuals.window_fill = DarkTheme::PANEL_BG;
    visuals.panel_fill = DarkTheme::PANEL_BG;
    visuals.faint_bg_color = DarkTheme::CARD_BG;
    visuals.extreme_bg_color = DarkTheme::BACKGROUND;

    visuals.widgets.noninteractive.bg_fill = DarkTheme::CARD_BG;
    visuals.widgets.inactive.bg_fill = DarkTheme::CARD_BG;
    visuals.widgets.hovered.bg_fill = Color32::from_rgb(48, 56, 50);
    visuals.widgets.active.bg_fill = DarkTheme::ACCENT;

    visuals.selection.bg_fill = DarkTheme::ACCENT.linear_multiply(0.4);
    visuals.selection.stroke.color = DarkTheme::ACCENT;

    visuals.widgets.noninteractive.fg_stroke.color = DarkTheme::TEXT_PRIMARY;
    visuals.widgets.inactive.fg_stroke.color = DarkTheme::TEXT_SECONDARY;
    visuals.widgets.hovered.fg_stroke.color = DarkTheme::TEXT_PRIMARY;
    visuals.widgets.active.fg_stroke.color = DarkTheme::TEXT_PRIMARY;

    visuals.widgets.noninteractive.bg_stroke.color = DarkTheme::BORDER;
    visuals.widgets.inactive.bg_stroke.color = DarkTheme::BORDER;

    visuals
}

/// Create light theme visuals.
fn light_visuals() -> Visuals {
    let mut visuals = Visuals::light();

    visuals.window_fill = LightTheme::PANEL_BG;
    visuals.panel_fill = LightTheme::PANEL_BG;
    visuals.faint_bg_color = LightTheme::CARD_BG;
    visuals.extreme_bg_color = LightTheme::BACKGROUND;

    visuals.widgets.noninteractive.bg_fill = LightTheme::CARD_BG;
    visuals.widgets.inactive.bg_fill = LightTheme::CARD_BG;
    visuals.widgets.hovered.bg_fill = Color32::from_rgb(230, 236, 232);
    visuals.widgets.active.bg_fill = LightTheme::ACCENT;

    visuals.selection.bg_fill = LightTheme::ACCENT.linear_multiply(0.2);
    visuals.selection.stroke.color = LightTheme::ACCENT;

    visuals.widgets.noninteractive.fg_stroke.color = LightTheme::TEXT_PRIMARY;
    visuals.widgets.inactive.fg_stroke.color = LightTheme::TEXT_SECONDARY;
    visuals.widgets.hovered.fg_stroke.color = LightTheme::TEXT_PRIMARY;
    visuals.widgets.active.fg_stroke.color = Color32::WHITE;

    visuals.widgets.noninteractive.bg_stroke.color = LightTheme::BORDER;
    visuals.widgets.inactive.bg_stroke.color = LightTheme::BORDER;

    visuals
}

/// Status colors for display.
pub mod status_colors {
    use super::*;

    /// Green for present, amber for excused, red for absent.
    pub fn attendance_color(status: AttendanceStatus) -> Color32 {
        match status {
            AttendanceStatus::Present => DarkTheme::SUCCESS,
            AttendanceStatus::Excused => DarkTheme::WARNING,
            AttendanceStatus::Absent => DarkTheme::ERROR,
        }
    }

    /// Amber for pending, green for accepted, red for rejected.
    pub fn setoran_color(status: SetoranStatus) -> Color32 {
        match status {
            SetoranStatus::Pending => DarkTheme::WARNING,
            SetoranStatus::Accepted => DarkTheme::SUCCESS,
            SetoranStatus::Rejected => DarkTheme::ERROR,
        }
    }

    /// Gold, silver, bronze for the podium; accent green below.
    pub fn rank_color(rank: u32) -> Color32 {
        match rank {
            1 => Color32::from_rgb(255, 215, 0),
            2 => Color32::from_rgb(192, 192, 192),
            3 => Color32::from_rgb(205, 127, 50),
            _ => DarkTheme::ACCENT,
        }
    }
}
