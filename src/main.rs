mod app;
mod config;
mod selection;
mod utils;

use anyhow::Result;

use app::ImageUploader;
use config::AppConfig;

fn main() -> Result<()> {
    env_logger::init();

    let config = load_config();

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([640.0, 720.0])
            .with_min_inner_size([420.0, 520.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Image Uploader",
        options,
        Box::new(move |cc| Box::new(ImageUploader::new(cc, config))),
    )
    .map_err(|e| anyhow::anyhow!("failed to start the UI: {e}"))
}

fn load_config() -> AppConfig {
    let cwd = match std::env::current_dir() {
        Ok(cwd) => cwd,
        Err(e) => {
            log::warn!("cannot resolve the working directory ({}), using default limits", e);
            return AppConfig::default();
        }
    };
    match AppConfig::load(&cwd) {
        Ok(Some(config)) => {
            log::info!("loaded {} from {}", AppConfig::FILE_NAME, cwd.display());
            config
        }
        Ok(None) => AppConfig::default(),
        Err(e) => {
            log::warn!(
                "ignoring {} ({:#}), using default limits",
                AppConfig::FILE_NAME,
                e
            );
            AppConfig::default()
        }
    }
}
