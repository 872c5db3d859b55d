pub mod auth;
pub mod commands;
pub mod config;
pub mod draft;
pub mod error;
pub mod history;
pub mod models;
pub mod money;
pub mod print;
pub mod state;
pub mod store;
pub mod workspace;

use std::path::PathBuf;

use auth::Session;
use state::AppState;
use store::LocalStore;

/// Directory name used under the OS data and config dirs.
pub const APP_DIR: &str = "gem-billing";

/// Gem Billing Tauri application library entry point.
///
/// All Tauri builder setup lives here so the thin `main.rs` binary wrapper
/// stays empty.
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // ── Tracing setup (must happen before anything else) ────────────────────
    //
    // Logs go to a single file in the OS data dir:
    //   Linux    ~/.local/share/gem-billing/gem-billing.log
    //   macOS    ~/Library/Application Support/gem-billing/gem-billing.log
    //   Windows  %LOCALAPPDATA%\gem-billing\gem-billing.log
    //
    // RUST_LOG controls the level; INFO when unset.
    let data_dir = dirs::data_local_dir().unwrap_or_default().join(APP_DIR);

    // rolling::never panics if it cannot open the file.
    let _ = std::fs::create_dir_all(&data_dir);

    let file_appender = tracing_appender::rolling::never(&data_dir, "gem-billing.log");
    let (non_blocking, _tracing_guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(non_blocking)
        .init();

    tracing::info!("Gem Billing starting");

    // ── Configuration ────────────────────────────────────────────────────────
    let config_dir = config_dir();
    let config = config::load(&config_dir).unwrap_or_else(|e| {
        tracing::error!("{e}; using built-in letterhead");
        config::builtin()
    });

    // ── Application state ────────────────────────────────────────────────────
    let session = Session::new(LocalStore::in_data_dir(&data_dir));
    let state = AppState::new(session, config);

    // ── Tauri builder ────────────────────────────────────────────────────────
    tauri::Builder::default()
        .manage(state)
        .plugin(tauri_plugin_dialog::init())
        .invoke_handler(tauri::generate_handler![
            commands::auth::session_status,
            commands::auth::login,
            commands::auth::logout,
            commands::draft::get_draft,
            commands::draft::set_field,
            commands::draft::set_line_item_field,
            commands::draft::add_line_item,
            commands::draft::remove_line_item,
            commands::draft::get_totals,
            commands::draft::reset_draft,
            commands::history::generate_invoice,
            commands::history::list_history,
            commands::history::open_history_entry,
            commands::history::delete_history_entry,
            commands::view::get_view,
            commands::view::edit_invoice,
            commands::view::show_history,
            commands::view::show_editor,
            commands::print::render_print_view,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

fn config_dir() -> PathBuf {
    dirs::config_dir().unwrap_or_default().join(APP_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_dir_is_namespaced() {
        assert!(config_dir().ends_with(APP_DIR));
    }
}
