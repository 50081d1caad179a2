//! Tahfidz - Quran Memorization Program Companion
//!
//! Main entry point for the application.

use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod app;

fn main() -> eframe::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Tahfidz v{}", env!("CARGO_PKG_VERSION"));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([760.0, 560.0])
            .with_title("Tahfidz"),
        ..Default::default()
    };

    eframe::run_native(
        "Tahfidz",
        options,
        Box::new(|cc| Ok(Box::new(app::TahfidzApp::new(cc)))),
    )
}
