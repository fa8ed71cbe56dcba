//! Code Converter — library root and Tauri application entry point.
//!
//! The core (conversion, readiness, providers, clipboard, config) is plain
//! Rust on tokio. The webview shell is behind the `desktop` feature and
//! holds no business logic — only command wiring and startup.
//!
//! Commands are split across:
//!   - commands.rs           — simple state commands (input, language, reset, copy)
//!   - pipeline.rs           — the convert request
//!   - settings_commands.rs  — provider settings + API keys

pub mod clipboard;
pub mod config;
pub mod convert;
pub mod llm;

#[cfg(feature = "desktop")]
mod commands;
#[cfg(feature = "desktop")]
mod pipeline;
#[cfg(feature = "desktop")]
mod settings_commands;

pub use convert::{ConversionState, ConvertError, Converter, SupportedLanguage};

/// Load `.env.local` → `.env` from the project root.
/// Uses CARGO_MANIFEST_DIR so it works regardless of the working directory.
/// Runs before the logger exists (RUST_LOG may come from these files), so
/// it reports on stderr directly.
pub fn load_env_files() {
    let manifest_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    let project_root = manifest_dir.parent().unwrap_or(manifest_dir);

    for env_file in [".env.local", ".env"] {
        let path = project_root.join(env_file);
        if path.exists() {
            match dotenvy::from_path(&path) {
                Ok(_) => eprintln!("[STARTUP] Loaded {}", path.display()),
                Err(e) => eprintln!("[STARTUP] Failed to load {}: {}", path.display(), e),
            }
            break;
        }
    }
}

/// Entry point — called by the desktop binary.
#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use std::sync::Arc;
    use tauri::{Emitter, Manager};

    load_env_files();
    env_logger::init();

    let config = config::AppConfig::load();
    log::info!(
        "[STARTUP] Config: provider={:?}, default language={}",
        config.provider,
        config.default_language
    );

    tauri::Builder::default()
        .invoke_handler(tauri::generate_handler![
            // Simple commands (commands.rs)
            commands::get_conversion_state,
            commands::get_languages,
            commands::set_input_code,
            commands::set_target_language,
            commands::reset_converter,
            commands::copy_output,
            // Pipeline commands (pipeline.rs)
            pipeline::convert_code,
            // Settings commands (settings_commands.rs)
            settings_commands::get_provider_config,
            settings_commands::set_active_provider,
            settings_commands::save_api_key,
            settings_commands::test_provider,
        ])
        .setup(move |app| {
            log::info!("Code Converter starting up");

            // Probe for the AI provider in the background; conversion stays
            // disabled until the first successful probe.
            let probe = llm::provider::ProviderProbe::new(config.clone());
            let (monitor, readiness) = tauri::async_runtime::block_on(async {
                convert::ReadinessMonitor::start(probe, config.poll_interval())
            });

            let handle = app.handle().clone();
            let listener: convert::StateListener = Arc::new(move |state: &ConversionState| {
                let _ = handle.emit("conversion-state", state);
            });

            let converter = Converter::with_options(
                readiness,
                Arc::new(clipboard::SystemClipboard),
                convert::ConverterOptions {
                    default_language: config.default_language,
                    notification_delay: config.notification_delay(),
                    listener: Some(listener),
                },
            );
            let watcher = converter.clone();
            tauri::async_runtime::spawn(async move {
                let _ = watcher.watch_readiness().await;
            });

            app.manage(converter);
            app.manage(monitor);
            log::info!("Webview ready — waiting for AI provider");
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("Error running Code Converter");
}
