// Tauri commands for the webview tab strip and layout renderer.
// Thin wrappers: every decision lives in `modules`, this file only locks,
// delegates and emits `update-tabs`.

use serde::Serialize;
use tauri::{AppHandle, Emitter, Manager, State};

use crate::modules::dashboard::Dashboard;
use crate::modules::navigation::MemoryRouter;
use crate::modules::pane::not_found_message;
use crate::modules::split_view::Layout;
use crate::modules::tab_cache::TabCacheData;
use crate::settings::{LayoutSettings, SETTINGS_FILE};
use crate::state::{AppState, NewTab, Tab, TabsPayload};

pub const UPDATE_TABS_EVENT: &str = "update-tabs";

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LayoutPayload {
    pub route: String,
    pub layout: Layout,
}

/// Resolution result; `path` lets the webview drop answers for panes it
/// has already moved away from.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPage {
    pub path: String,
    pub location: Option<String>,
    pub message: Option<String>,
}

/// Run `f` against the locked dashboard, then broadcast the tab list.
fn with_dashboard<T>(
    app: &AppHandle,
    state: &AppState,
    f: impl FnOnce(&mut Dashboard<MemoryRouter>) -> T,
) -> Result<T, String> {
    let (result, payload) = {
        let mut dashboard = state.dashboard.lock().map_err(|e| e.to_string())?;
        let result = f(&mut dashboard);
        (result, dashboard.snapshot())
    };

    if let Err(e) = app.emit(UPDATE_TABS_EVENT, &payload) {
        log::warn!("[Shell] Failed to emit {}: {}", UPDATE_TABS_EVENT, e);
    }
    Ok(result)
}

#[tauri::command]
pub fn get_tabs(state: State<AppState>) -> Result<TabsPayload, String> {
    let dashboard = state.dashboard.lock().map_err(|e| e.to_string())?;
    Ok(dashboard.snapshot())
}

#[tauri::command]
pub fn open_tab(app: AppHandle, state: State<AppState>, tab: NewTab) -> Result<(), String> {
    log::info!("[Shell] Open {}", tab.path);
    with_dashboard(&app, &state, |d| d.open(tab))
}

#[tauri::command]
pub fn select_tab(app: AppHandle, state: State<AppState>, id: String) -> Result<bool, String> {
    with_dashboard(&app, &state, |d| d.select(&id))
}

#[tauri::command]
pub fn close_tab(app: AppHandle, state: State<AppState>, id: String) -> Result<Option<Tab>, String> {
    log::info!("[Shell] Close {}", id);
    with_dashboard(&app, &state, |d| d.close(&id))
}

#[tauri::command]
pub fn reopen_closed_tab(app: AppHandle, state: State<AppState>) -> Result<Option<String>, String> {
    with_dashboard(&app, &state, |d| d.reopen_closed())
}

#[tauri::command]
pub fn navigate(app: AppHandle, state: State<AppState>, path: String) -> Result<String, String> {
    with_dashboard(&app, &state, |d| {
        d.navigate(&path);
        d.location().full()
    })
}

#[tauri::command]
pub fn update_tab_cache(
    app: AppHandle,
    state: State<AppState>,
    id: String,
    patch: TabCacheData,
) -> Result<(), String> {
    with_dashboard(&app, &state, |d| d.update_cache(&id, patch))
}

/// Tauri command to reorder tabs
#[tauri::command]
pub fn reorder_tabs(
    app: AppHandle,
    state: State<AppState>,
    new_order: Vec<String>,
) -> Result<bool, String> {
    log::debug!("[Tab Reorder] Received new order: {:?}", new_order);
    with_dashboard(&app, &state, |d| d.reorder(&new_order))
}

#[tauri::command]
pub fn current_layout(state: State<AppState>) -> Result<LayoutPayload, String> {
    let dashboard = state.dashboard.lock().map_err(|e| e.to_string())?;
    Ok(LayoutPayload {
        route: dashboard.location().full(),
        layout: dashboard.layout(),
    })
}

#[tauri::command]
pub async fn resolve_component(
    state: State<'_, AppState>,
    path: String,
) -> Result<ResolvedPage, String> {
    let resolver = state.resolver.load_full();
    let resolved = resolver.resolve(&path).await;
    let page = match resolved {
        Some(resolved) => ResolvedPage {
            path,
            location: Some(resolved.location),
            message: None,
        },
        None => ResolvedPage {
            message: Some(not_found_message(&path)),
            path,
            location: None,
        },
    };
    Ok(page)
}

#[tauri::command]
pub fn get_settings(state: State<AppState>) -> LayoutSettings {
    (**state.settings.load()).clone()
}

#[tauri::command]
pub fn save_settings(
    app: AppHandle,
    state: State<AppState>,
    settings: LayoutSettings,
) -> Result<(), String> {
    let path = app
        .path()
        .app_data_dir()
        .map_err(|e| e.to_string())?
        .join(SETTINGS_FILE);
    let settings = settings.sanitized();
    settings.save(&path).map_err(|e| e.to_string())?;
    state.apply_settings(settings)?;

    let payload = state.dashboard.lock().map_err(|e| e.to_string())?.snapshot();
    app.emit(UPDATE_TABS_EVENT, &payload).map_err(|e| e.to_string())
}
