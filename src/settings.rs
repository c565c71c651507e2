use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::modules::navigation::canonical_route;

pub const SETTINGS_FILE: &str = "layout_settings.json";

/// Layout and resolution knobs for the dashboard session.
///
/// Every field has a default so a partial JSON file only overrides what it
/// names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutSettings {
    /// Route of the dashboard section; tabs live beneath it.
    pub dashboard_root: String,
    /// Route of the create/edit form that pins to the left pane.
    pub primary_form_path: String,
    /// Substring marking a tab path as the form in edit mode.
    pub edit_marker: String,
    /// Width share of the left pane in split view (0.0 - 1.0).
    pub left_pane_ratio: f32,
    /// Folder the module locations are relative to.
    pub module_root: String,
    /// Accepted module extensions, highest priority first.
    pub extensions: Vec<String>,
    /// Category folders searched by the convention fallback, in order.
    pub categories: Vec<String>,
    /// Explicit relative route key -> module key table.
    pub component_table: BTreeMap<String, String>,
    pub max_closed_tabs: usize,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        let component_table = [
            ("user-list", "user-management/UserList"),
            ("create-user", "user-management/CreateUser"),
            ("search-user", "user-management/SearchUser"),
            ("user-management/UserList", "user-management/UserList"),
            ("user-position", "reports/UserWisePosition"),
            ("orders", "trading/OrderBook"),
            ("trade-book", "reports/TradeBook"),
            ("brokerage-settings", "settings/BrokerageSettings"),
            ("margin-settings", "settings/MarginSettings"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            dashboard_root: "/dashboard".to_string(),
            primary_form_path: "/dashboard/create-user".to_string(),
            edit_marker: "mode=edit".to_string(),
            left_pane_ratio: 0.4,
            module_root: "pages".to_string(),
            extensions: [".tsx", ".jsx", ".ts", ".js"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
            categories: ["dashboard", "trading", "reports", "user-management", "settings"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            component_table,
            max_closed_tabs: 25,
        }
    }
}

impl LayoutSettings {
    /// Strict load: any I/O or parse problem is an error.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::SettingsIo {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Self = serde_json::from_str(&content)?;
        Ok(settings.sanitized())
    }

    /// Lenient load used at startup. Falls back to defaults.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match Self::from_file(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("[Settings] {}, returning defaults", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let tmp_path = path.with_extension("tmp");
        let io_err = |source| Error::SettingsIo {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(self)?;

        // Write to tmp, then rename over the target.
        fs::write(&tmp_path, json).map_err(io_err)?;
        fs::rename(&tmp_path, path).map_err(io_err)?;

        log::info!("[Settings] Saved layout settings to {:?}", path);
        Ok(())
    }

    /// Clamp and normalize values the rest of the crate compares against.
    pub(crate) fn sanitized(mut self) -> Self {
        if !(0.0..=1.0).contains(&self.left_pane_ratio) {
            log::warn!(
                "[Settings] left_pane_ratio {} out of range, clamping",
                self.left_pane_ratio
            );
            self.left_pane_ratio = self.left_pane_ratio.clamp(0.0, 1.0);
        }
        if self.dashboard_root.len() > 1 {
            self.dashboard_root = self.dashboard_root.trim_end_matches('/').to_string();
        }
        self.primary_form_path = canonical_route(&self.primary_form_path);
        self
    }
}
