//! UI screens for the application.

pub mod absensi;
pub mod home;
pub mod input_setoran;
pub mod join_organize;
pub mod leaderboard;
pub mod setoran;

pub use absensi::AbsensiScreen;
pub use home::HomeScreen;
pub use input_setoran::InputSetoranScreen;
pub use join_organize::JoinOrganizeScreen;
pub use leaderboard::LeaderboardScreen;
pub use setoran::SetoranScreen;

/// Screen navigation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Dashboard
    #[default]
    Home,
    /// Attendance screen
    Absensi,
    /// Setoran list and submission screen
    Setoran,
    /// Standalone setoran input screen
    InputSetoran,
    /// Leaderboard screen
    Leaderboard,
    /// Join-a-class screen
    JoinOrganize,
}

impl Screen {
    /// Title shown in the navigation bar.
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Home => "Beranda",
            Screen::Absensi => "Absensi",
            Screen::Setoran => "Setoran",
            Screen::InputSetoran => "Input Setoran",
            Screen::Leaderboard => "Leaderboard",
            Screen::JoinOrganize => "Gabung Kelas",
        }
    }
}
