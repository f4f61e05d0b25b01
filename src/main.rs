#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod cache;
mod config;
mod error;
mod prelude;
mod ui;

use crate::prelude::*;

fn main() -> Result<(), AppError> {
    env_logger::Builder::from_default_env()
        .format_timestamp_secs()
        .init();

    log::info!("Initialising...");

    // Page loads run on this runtime's blocking pool; the UI stays on the main thread.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let store = TomlPreferenceStore::in_home();
    let prefs = store.load().unwrap_or_else(|e| {
        warn!("Ignoring preferences at {}: {e}", store.path().display());
        Preferences::default()
    });

    let path: Option<PathBuf> = std::env::args().nth(1).map(PathBuf::from);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([prefs.width as f32, prefs.height as f32])
            .with_resizable(true),
        ..Default::default()
    };

    let handle = runtime.handle().clone();
    eframe::run_native(
        NAME,
        native_options,
        Box::new(move |cc| {
            Ok(Box::new(WebtoonApp::new(
                cc,
                handle,
                prefs,
                Box::new(store),
                path,
            )))
        }),
    )?;

    log::info!("Bye!");
    Ok(())
}
