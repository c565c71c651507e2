// Tabdesk Library Entry Point
// Exposes the tab-session core so the desktop shell and tests can use it
// independently.

pub mod error;
pub mod settings;

// Shared state
pub mod state;

// Pure logic modules (no Tauri imports)
pub mod modules;

#[cfg(feature = "desktop")]
pub mod shell;

pub use error::{Error, Result};

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use tauri::Manager;

    use crate::modules::resolver::FsModuleLoader;
    use crate::settings::{LayoutSettings, SETTINGS_FILE};
    use crate::state::AppState;

    tauri::Builder::default()
        .setup(|app| {
            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(log::LevelFilter::Info)
                        .build(),
                )?;
            }

            let settings = LayoutSettings::load(&app.path().app_data_dir()?.join(SETTINGS_FILE));
            let source_root = app.path().resource_dir()?;
            log::info!("[Setup] Resolving pages under {:?}", source_root);

            app.manage(AppState::new(settings, FsModuleLoader::new(source_root)));
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            shell::get_tabs,
            shell::open_tab,
            shell::select_tab,
            shell::close_tab,
            shell::reopen_closed_tab,
            shell::navigate,
            shell::update_tab_cache,
            shell::reorder_tabs,
            shell::current_layout,
            shell::resolve_component,
            shell::get_settings,
            shell::save_settings,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
