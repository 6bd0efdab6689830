use std::path::PathBuf;
use std::process::ExitCode;

use tracing::{error, info};

use mandelviz_app::{AppPreferences, Session};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting mandelviz");

    let mut prefs = AppPreferences::load();
    let session = match Session::new(&prefs) {
        Ok(session) => session,
        Err(e) => {
            error!("Failed to start session: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(stats) = session.last_stats() {
        info!(
            "Rendered [{}] at {} in {:?} ({} interior pixels)",
            session.bounds_text(),
            session.grid().label(),
            stats.elapsed,
            stats.interior_pixels,
        );
    }

    let output = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("mandelviz.png"));
    if let Err(e) = session.export_png(&output) {
        error!("Export failed: {e}");
        return ExitCode::FAILURE;
    }

    prefs.last_view = Some(session.snapshot());
    prefs.save();

    ExitCode::SUCCESS
}
