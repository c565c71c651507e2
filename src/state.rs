// Shared state structs to avoid circular dependencies.
// These are used by the modules and the desktop shell and can be tested independently.

use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

use crate::modules::dashboard::Dashboard;
use crate::modules::navigation::MemoryRouter;
use crate::modules::resolver::{ComponentResolver, FsModuleLoader};
use crate::modules::tab_cache::TabCacheData;
use crate::settings::LayoutSettings;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    pub id: String,
    pub title: String,
    pub path: String,
    pub icon: Option<String>,
    pub is_closeable: bool,
    pub cache_data: Option<TabCacheData>,
    /// Opening order; reordering the strip does not change it.
    #[serde(default)]
    pub opened_seq: u64,
}

/// Request to open a tab. `path` is the de-duplication key.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewTab {
    pub title: String,
    pub path: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub cache_data: Option<TabCacheData>,
}

impl NewTab {
    pub fn new(title: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            path: path.into(),
            icon: None,
            cache_data: None,
        }
    }

    pub fn with_cache(mut self, cache: TabCacheData) -> Self {
        self.cache_data = Some(cache);
        self
    }
}

/// A tab that was closed this session and can be reopened.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClosedTab {
    pub title: String,
    pub path: String,
    pub icon: Option<String>,
    pub cache_data: Option<TabCacheData>,
    pub closed_at: DateTime<Utc>,
}

impl From<&Tab> for ClosedTab {
    fn from(tab: &Tab) -> Self {
        Self {
            title: tab.title.clone(),
            path: tab.path.clone(),
            icon: tab.icon.clone(),
            cache_data: tab.cache_data.clone(),
            closed_at: Utc::now(),
        }
    }
}

impl From<ClosedTab> for NewTab {
    fn from(closed: ClosedTab) -> Self {
        Self {
            title: closed.title,
            path: closed.path,
            icon: closed.icon,
            cache_data: closed.cache_data,
        }
    }
}

/// Payload of the `update-tabs` event the shell listens for.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TabsPayload {
    pub tabs: Vec<Tab>,
    pub active_tab_id: Option<String>,
}

pub struct AppState {
    pub settings: ArcSwap<LayoutSettings>,
    pub dashboard: Arc<Mutex<Dashboard<MemoryRouter>>>,
    // Rebuilt when settings change; readers hold their own Arc.
    pub resolver: ArcSwap<ComponentResolver<FsModuleLoader>>,
    loader: FsModuleLoader,
}

impl AppState {
    pub fn new(settings: LayoutSettings, loader: FsModuleLoader) -> Self {
        let router = MemoryRouter::new(&settings.dashboard_root);
        let dashboard = Dashboard::new(router, settings.clone());
        let resolver = ComponentResolver::new(loader.clone(), &settings);

        Self {
            settings: ArcSwap::from_pointee(settings),
            dashboard: Arc::new(Mutex::new(dashboard)),
            resolver: ArcSwap::from_pointee(resolver),
            loader,
        }
    }

    /// Install new settings everywhere they are cached.
    pub fn apply_settings(&self, settings: LayoutSettings) -> Result<(), String> {
        let settings = settings.sanitized();
        let resolver = ComponentResolver::new(self.loader.clone(), &settings);
        {
            let mut dashboard = self.dashboard.lock().map_err(|e| e.to_string())?;
            dashboard.apply_settings(&settings);
        }
        self.resolver.store(Arc::new(resolver));
        self.settings.store(Arc::new(settings));
        log::info!("[Settings] Applied new layout settings");
        Ok(())
    }
}
