//! Main application state and egui integration.
//!
//! The frame loop owns every piece of view state. Background fetches run
//! on the tokio runtime and report back through a crossbeam channel; each
//! data stream carries a refresh-sequence token so a slow response can
//! never overwrite the result of a newer refresh.

use anyhow::Context as _;
use chrono::Local;
use crossbeam::channel::{unbounded, Receiver, Sender};
use eframe::egui;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tahfidz::attendance::export::{self, default_file_name, AttendanceExporter, DateRange};
use tahfidz::attendance::roster;
use tahfidz::attendance::AttendanceStats;
use tahfidz::config::{load_config, AppConfig, ThemePreference};
use tahfidz::dashboard;
use tahfidz::events::{AbsensiData, AppEvent, RefreshGuard};
use tahfidz::gateway::types::{Role, UserRow};
use tahfidz::gateway::{Profile, RealtimeClient, TableClient};
use tahfidz::organize;
use tahfidz::points::rankings;
use tahfidz::prayer;
use tahfidz::setoran::{self, NewSetoran};
use tahfidz::ui::screens::{
    AbsensiScreen, HomeScreen, InputSetoranScreen, JoinOrganizeScreen, LeaderboardScreen, Screen,
    SetoranScreen,
};
use tahfidz::ui::screens::absensi::AbsensiAction;
use tahfidz::ui::screens::home::HomeAction;
use tahfidz::ui::screens::input_setoran::InputSetoranAction;
use tahfidz::ui::screens::join_organize::JoinOrganizeAction;
use tahfidz::ui::screens::leaderboard::LeaderboardAction;
use tahfidz::ui::screens::setoran::SetoranAction;
use tahfidz::ui::theme::Theme;

/// Main application state.
pub struct TahfidzApp {
    /// Application configuration
    config: AppConfig,
    /// UI theme
    theme: Theme,
    /// Async runtime for fetch tasks
    runtime: tokio::runtime::Runtime,
    /// Table-store gateway
    gateway: TableClient,
    /// Change-notification client
    realtime: Option<Arc<RealtimeClient>>,
    /// Plain HTTP client for the prayer times API
    http: reqwest::Client,
    /// Signed-in profile, once loaded
    profile: Option<Profile>,
    /// Current screen
    current_screen: Screen,
    /// Home screen state
    home_screen: HomeScreen,
    /// Attendance screen state
    absensi_screen: AbsensiScreen,
    /// Setoran screen state
    setoran_screen: SetoranScreen,
    /// Standalone input screen state
    input_setoran_screen: InputSetoranScreen,
    /// Leaderboard screen state
    leaderboard_screen: LeaderboardScreen,
    /// Join screen state
    join_screen: JoinOrganizeScreen,
    /// Event channel from background tasks
    event_tx: Sender<AppEvent>,
    event_rx: Receiver<AppEvent>,
    /// Refresh guards, one per data stream
    dashboard_guard: RefreshGuard,
    absensi_guard: RefreshGuard,
    setoran_guard: RefreshGuard,
    leaderboard_guard: RefreshGuard,
    /// Status bar text
    backend_status: String,
}

impl TahfidzApp {
    /// Create a new application instance.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Load configuration
        let config = load_config().unwrap_or_default();

        // Set up theme
        let theme = initial_theme(config.ui.theme);
        cc.egui_ctx.set_visuals(theme.visuals());
        if (config.ui.font_scale - 1.0).abs() > f32::EPSILON {
            cc.egui_ctx.set_zoom_factor(config.ui.font_scale);
        }

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .expect("failed to start async runtime");

        let gateway = TableClient::with_timeout(
            config.backend.url.clone(),
            config.backend.api_key.clone(),
            Duration::from_secs(config.backend.request_timeout_secs),
        );
        let http = reqwest::Client::new();

        let (event_tx, event_rx) = unbounded();

        let mut app = Self {
            theme,
            runtime,
            gateway,
            realtime: None,
            http,
            profile: None,
            current_screen: Screen::Home,
            home_screen: HomeScreen::new(),
            absensi_screen: AbsensiScreen::new(),
            setoran_screen: SetoranScreen::new(),
            input_setoran_screen: InputSetoranScreen::new(),
            leaderboard_screen: LeaderboardScreen::new(),
            join_screen: JoinOrganizeScreen::new(),
            event_tx,
            event_rx,
            dashboard_guard: RefreshGuard::default(),
            absensi_guard: RefreshGuard::default(),
            setoran_guard: RefreshGuard::default(),
            leaderboard_guard: RefreshGuard::default(),
            backend_status: String::new(),
            config,
        };

        app.home_screen.location_name = app.config.prayer.location_name.clone();

        if app.config.backend.url.is_empty() {
            app.backend_status =
                "Backend belum dikonfigurasi (lihat config.toml)".to_string();
        } else {
            app.load_profile();
            app.start_realtime();
        }

        if app.config.prayer.enabled {
            app.fetch_prayer_times();
        }

        app
    }

    /// Fetch the signed-in user's profile row.
    fn load_profile(&mut self) {
        let Some(user_id) = self.config.backend.user_id else {
            self.backend_status = "User id belum dikonfigurasi".to_string();
            return;
        };

        let gateway = self.gateway.clone();
        let tx = self.event_tx.clone();
        self.runtime.spawn(async move {
            let result = gateway
                .from("users")
                .eq("id", user_id)
                .fetch_one::<UserRow>()
                .await
                .map(|row| row.map(Profile::from));
            let _ = tx.send(AppEvent::ProfileLoaded(result));
        });
    }

    /// Connect the change-notification channel and bridge its events into
    /// the frame loop.
    fn start_realtime(&mut self) {
        if !self.config.realtime.enabled {
            return;
        }

        let endpoint = if self.config.realtime.endpoint.is_empty() {
            RealtimeClient::endpoint_from_base(&self.config.backend.url)
        } else {
            self.config.realtime.endpoint.clone()
        };

        let client = Arc::new(RealtimeClient::new(
            endpoint,
            self.config.backend.api_key.clone(),
            self.config.realtime.tables.clone(),
            Duration::from_secs(self.config.realtime.heartbeat_secs),
        ));

        let tx = self.event_tx.clone();
        let task_client = Arc::clone(&client);
        self.runtime.spawn(async move {
            match task_client.start().await {
                Ok(()) => {
                    let mut changes = task_client.subscribe();
                    while let Ok(change) = changes.recv().await {
                        if tx.send(AppEvent::TableChanged(change.table)).is_err() {
                            break;
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!("Change notifications unavailable: {}", e);
                }
            }
        });

        self.realtime = Some(client);
    }

    /// Fetch today's prayer times for the configured coordinates.
    fn fetch_prayer_times(&mut self) {
        let http = self.http.clone();
        let latitude = self.config.prayer.latitude;
        let longitude = self.config.prayer.longitude;
        let tx = self.event_tx.clone();
        self.runtime.spawn(async move {
            let result = prayer::fetch_prayer_times(&http, latitude, longitude).await;
            let _ = tx.send(AppEvent::PrayerLoaded(result));
        });
    }

    /// Re-run the dashboard fetch-and-aggregate pipeline.
    fn refresh_dashboard(&mut self) {
        let Some(profile) = self.profile.clone() else {
            return;
        };

        let seq = self.dashboard_guard.begin();
        self.home_screen.loading = true;

        let gateway = self.gateway.clone();
        let tx = self.event_tx.clone();
        self.runtime.spawn(async move {
            let today = Local::now().date_naive();
            let result = dashboard::fetch_dashboard(&gateway, &profile, today).await;
            let _ = tx.send(AppEvent::DashboardLoaded { seq, result });
        });
    }

    /// Re-run the attendance fetch, shaped by role.
    fn refresh_absensi(&mut self) {
        let Some(profile) = self.profile.clone() else {
            return;
        };

        let seq = self.absensi_guard.begin();
        self.absensi_screen.loading = true;

        let gateway = self.gateway.clone();
        let tx = self.event_tx.clone();
        self.runtime.spawn(async move {
            let today = Local::now().date_naive();
            let result = async {
                match profile.role {
                    Role::Siswa => {
                        let records =
                            roster::fetch_student_records(&gateway, profile.id).await?;
                        let stats = AttendanceStats::from_records(&records);
                        Ok(AbsensiData::Student { records, stats })
                    }
                    _ => match profile.organize_id {
                        Some(organize_id) => {
                            let fetch =
                                roster::fetch_class_attendance(&gateway, organize_id).await?;
                            let details =
                                roster::fetch_daily_details(&gateway, &fetch.students, today)
                                    .await;
                            Ok(AbsensiData::Class {
                                roster: fetch,
                                details,
                            })
                        }
                        None => Ok(AbsensiData::Class {
                            roster: Default::default(),
                            details: Vec::new(),
                        }),
                    },
                }
            }
            .await;
            let _ = tx.send(AppEvent::AbsensiLoaded { seq, result });
        });
    }

    /// Re-run the setoran list fetch.
    fn refresh_setoran(&mut self) {
        let Some(profile) = self.profile.clone() else {
            return;
        };

        let seq = self.setoran_guard.begin();
        self.setoran_screen.loading = true;

        let gateway = self.gateway.clone();
        let tx = self.event_tx.clone();
        self.runtime.spawn(async move {
            let result = setoran::fetch_my_setoran(&gateway, profile.id).await;
            let _ = tx.send(AppEvent::SetoranLoaded { seq, result });
        });
    }

    /// Re-run the leaderboard fetch-and-rank pipeline.
    fn refresh_leaderboard(&mut self) {
        let Some(profile) = self.profile.clone() else {
            return;
        };

        let Some(organize_id) = profile.organize_id else {
            self.leaderboard_screen
                .set_error("Belum bergabung dengan kelas".to_string());
            return;
        };

        let seq = self.leaderboard_guard.begin();
        self.leaderboard_screen.loading = true;

        let gateway = self.gateway.clone();
        let tx = self.event_tx.clone();
        self.runtime.spawn(async move {
            let result = rankings::fetch_leaderboard(&gateway, organize_id).await;
            let _ = tx.send(AppEvent::LeaderboardLoaded { seq, result });
        });
    }

    /// Validate and insert a new setoran.
    fn submit_setoran(&mut self, form: NewSetoran) {
        let Some(profile) = self.profile.clone() else {
            return;
        };

        let gateway = self.gateway.clone();
        let tx = self.event_tx.clone();
        self.runtime.spawn(async move {
            let today = Local::now().date_naive();
            let result =
                setoran::submit::submit(&gateway, profile.id, profile.organize_id, &form, today)
                    .await;
            let _ = tx.send(AppEvent::SetoranSubmitted(result));
        });
    }

    /// Render the CSV export for a date range.
    fn export_attendance(&mut self, start: String, end: String) {
        let gateway = self.gateway.clone();
        let tx = self.event_tx.clone();
        self.runtime.spawn(async move {
            let result = async {
                let range = DateRange::parse(&start, &end)?;
                let exporter = AttendanceExporter::new(gateway);
                let csv = exporter.export_range(range).await?;
                Ok((range, csv))
            }
            .await;
            let _ = tx.send(AppEvent::ExportReady(result));
        });
    }

    /// Try to join an organization by class code.
    fn join_organize(&mut self, code: String) {
        let Some(profile) = self.profile.clone() else {
            return;
        };

        let gateway = self.gateway.clone();
        let tx = self.event_tx.clone();
        self.runtime.spawn(async move {
            let result = organize::join_by_code(&gateway, &profile, &code).await;
            let _ = tx.send(AppEvent::OrganizeJoined(result));
        });
    }

    /// Process pending events from background tasks.
    fn process_events(&mut self) {
        // Collect first to avoid borrowing the receiver across handlers
        let events: Vec<AppEvent> = self.event_rx.try_iter().collect();

        for event in events {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::ProfileLoaded(result) => match result {
                Ok(Some(profile)) => {
                    tracing::info!("Signed in as {} ({:?})", profile.name, profile.role);
                    self.backend_status = profile.name.clone();
                    self.profile = Some(profile);
                    self.refresh_dashboard();
                }
                Ok(None) => {
                    self.backend_status = "Profil tidak ditemukan".to_string();
                }
                Err(e) => {
                    tracing::error!("Profile fetch failed: {}", e);
                    self.backend_status = format!("Gagal memuat profil: {}", e);
                }
            },
            AppEvent::DashboardLoaded { seq, result } => {
                if !self.dashboard_guard.is_current(seq) {
                    tracing::debug!("Dropping stale dashboard response");
                    return;
                }
                match result {
                    Ok(stats) => self.home_screen.set_stats(stats),
                    Err(e) => self.home_screen.set_error(e.to_string()),
                }
            }
            AppEvent::AbsensiLoaded { seq, result } => {
                if !self.absensi_guard.is_current(seq) {
                    tracing::debug!("Dropping stale attendance response");
                    return;
                }
                match result {
                    Ok(data) => self.absensi_screen.set_data(data),
                    Err(e) => self.absensi_screen.set_error(e.to_string()),
                }
            }
            AppEvent::SetoranLoaded { seq, result } => {
                if !self.setoran_guard.is_current(seq) {
                    tracing::debug!("Dropping stale setoran response");
                    return;
                }
                match result {
                    Ok(records) => self.setoran_screen.set_records(records),
                    Err(e) => self.setoran_screen.set_error(e.to_string()),
                }
            }
            AppEvent::LeaderboardLoaded { seq, result } => {
                if !self.leaderboard_guard.is_current(seq) {
                    tracing::debug!("Dropping stale leaderboard response");
                    return;
                }
                match result {
                    Ok(entries) => self.leaderboard_screen.set_entries(entries),
                    Err(e) => self.leaderboard_screen.set_error(e.to_string()),
                }
            }
            AppEvent::PrayerLoaded(result) => match result {
                Ok(times) => {
                    self.home_screen.prayer = Some(times);
                }
                Err(e) => {
                    tracing::warn!("Prayer times unavailable: {}", e);
                }
            },
            AppEvent::ExportReady(result) => match result {
                Ok((range, csv)) => self.save_export(range, &csv),
                Err(e) => self.absensi_screen.set_error(e.to_string()),
            },
            AppEvent::SetoranSubmitted(result) => match result {
                Ok(()) => {
                    self.setoran_screen.on_submitted();
                    self.input_setoran_screen.on_submitted();
                    self.refresh_setoran();
                    self.refresh_dashboard();
                }
                Err(e) => {
                    let message = e.to_string();
                    self.setoran_screen.set_error(message.clone());
                    self.input_setoran_screen.set_error(message);
                }
            },
            AppEvent::OrganizeJoined(result) => match result {
                Ok(organize) => {
                    if let Some(profile) = &mut self.profile {
                        profile.organize_id = Some(organize.id);
                    }
                    self.join_screen.on_joined(&organize.name);
                    self.refresh_dashboard();
                }
                Err(e) => self.join_screen.set_error(e.to_string()),
            },
            AppEvent::TableChanged(table) => self.on_table_changed(&table),
        }
    }

    /// A backend table changed: re-run the fetch pipeline of the screens
    /// that derive from it.
    fn on_table_changed(&mut self, table: &str) {
        if self.profile.is_none() {
            return;
        }
        tracing::debug!("Refetching after change on {}", table);

        match table {
            "attendance" => {
                self.refresh_absensi();
                self.refresh_dashboard();
            }
            "setoran" => {
                self.refresh_setoran();
                self.refresh_dashboard();
            }
            "siswa_poin" => {
                self.refresh_leaderboard();
                self.refresh_dashboard();
            }
            _ => self.refresh_dashboard(),
        }
    }

    /// Ask where to save a finished export, then write it.
    fn save_export(&mut self, range: DateRange, csv: &str) {
        let picked = rfd::FileDialog::new()
            .set_file_name(default_file_name(range))
            .save_file();

        match picked {
            Some(path) => match write_export(&path, csv) {
                Ok(()) => {
                    tracing::info!("Export saved to {}", path.display());
                    self.absensi_screen
                        .finish_export(format!("Tersimpan di {}", path.display()));
                }
                Err(e) => self.absensi_screen.set_error(e.to_string()),
            },
            None => {
                self.absensi_screen
                    .finish_export("Export dibatalkan".to_string());
            }
        }
    }

    /// Navigate to a different screen, re-running its fetch pipeline.
    fn navigate(&mut self, screen: Screen) {
        tracing::debug!("Navigating from {:?} to {:?}", self.current_screen, screen);
        self.current_screen = screen;

        // Derived state is recomputed in full on every mount
        match screen {
            Screen::Home => self.refresh_dashboard(),
            Screen::Absensi => self.refresh_absensi(),
            Screen::Setoran => self.refresh_setoran(),
            Screen::Leaderboard => self.refresh_leaderboard(),
            Screen::InputSetoran | Screen::JoinOrganize => {}
        }
    }

    /// Toggle the theme between dark and light.
    fn toggle_theme(&mut self, ctx: &egui::Context) {
        self.theme = match self.theme {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        };
        ctx.set_visuals(self.theme.visuals());
    }
}

impl eframe::App for TahfidzApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Process fetch results each frame
        self.process_events();

        // Wake up regularly so channel events are picked up promptly
        ctx.request_repaint_after(Duration::from_millis(250));

        // Handle keyboard shortcuts
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) && self.current_screen != Screen::Home {
            self.navigate(Screen::Home);
        }

        // Top panel with navigation
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Tahfidz");

                for screen in [
                    Screen::Home,
                    Screen::Absensi,
                    Screen::Setoran,
                    Screen::Leaderboard,
                ] {
                    if ui
                        .selectable_label(self.current_screen == screen, screen.title())
                        .clicked()
                    {
                        self.navigate(screen);
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let theme_icon = match self.theme {
                        Theme::Dark => "🌙",
                        Theme::Light => "☀",
                    };
                    if ui.button(theme_icon).clicked() {
                        self.toggle_theme(ctx);
                    }

                    if let Some(profile) = &self.profile {
                        ui.label(&profile.name);
                        ui.label(profile.role.display_name());
                    }
                });
            });
        });

        // Main content area
        egui::CentralPanel::default().show(ctx, |ui| {
            match self.current_screen {
                Screen::Home => {
                    let profile = self.profile.clone();
                    if let Some(action) = self.home_screen.show(ui, profile.as_ref()) {
                        match action {
                            HomeAction::Refresh => {
                                self.refresh_dashboard();
                                self.fetch_prayer_times();
                            }
                            HomeAction::Navigate(screen) => self.navigate(screen),
                        }
                    }
                }
                Screen::Absensi => {
                    let profile = self.profile.clone();
                    if let Some(action) = self.absensi_screen.show(ui, profile.as_ref()) {
                        match action {
                            AbsensiAction::Refresh => self.refresh_absensi(),
                            AbsensiAction::Export { start, end } => {
                                self.export_attendance(start, end)
                            }
                            AbsensiAction::Back => self.navigate(Screen::Home),
                        }
                    }
                }
                Screen::Setoran => {
                    if let Some(action) = self.setoran_screen.show(ui) {
                        match action {
                            SetoranAction::Refresh => self.refresh_setoran(),
                            SetoranAction::Submit(form) => self.submit_setoran(form),
                            SetoranAction::Back => self.navigate(Screen::Home),
                        }
                    }
                }
                Screen::InputSetoran => {
                    if let Some(action) = self.input_setoran_screen.show(ui) {
                        match action {
                            InputSetoranAction::Submit(form) => self.submit_setoran(form),
                            InputSetoranAction::Back => self.navigate(Screen::Home),
                        }
                    }
                }
                Screen::Leaderboard => {
                    let profile = self.profile.clone();
                    if let Some(action) = self.leaderboard_screen.show(ui, profile.as_ref()) {
                        match action {
                            LeaderboardAction::Refresh => self.refresh_leaderboard(),
                            LeaderboardAction::Back => self.navigate(Screen::Home),
                        }
                    }
                }
                Screen::JoinOrganize => {
                    let profile = self.profile.clone();
                    if let Some(action) = self.join_screen.show(ui, profile.as_ref()) {
                        match action {
                            JoinOrganizeAction::Join(code) => self.join_organize(code),
                            JoinOrganizeAction::RefreshProfile => self.load_profile(),
                            JoinOrganizeAction::Back => self.navigate(Screen::Home),
                        }
                    }
                }
            }
        });

        // Status bar at bottom
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("v{}", env!("CARGO_PKG_VERSION")));
                ui.separator();

                let realtime_ok = self
                    .realtime
                    .as_ref()
                    .map(|r| r.is_running())
                    .unwrap_or(false);
                ui.label(if realtime_ok {
                    "● Live updates"
                } else {
                    "○ Manual refresh"
                });

                if !self.backend_status.is_empty() {
                    ui.separator();
                    ui.label(&self.backend_status);
                }
            });
        });
    }
}

/// Pick the startup theme from the preference and the system setting.
fn initial_theme(preference: ThemePreference) -> Theme {
    match preference {
        ThemePreference::Dark => Theme::Dark,
        ThemePreference::Light => Theme::Light,
        ThemePreference::System => match dark_light::detect() {
            dark_light::Mode::Light => Theme::Light,
            dark_light::Mode::Dark | dark_light::Mode::Default => Theme::Dark,
        },
    }
}

/// Write a finished export to disk.
fn write_export(path: &Path, csv: &str) -> anyhow::Result<()> {
    export::save_csv(path, csv).with_context(|| format!("could not save {}", path.display()))
}
