// Per-tab cached UI state - pure data + merge logic, no Tauri imports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortRule {
    pub field: String,
    pub direction: SortDirection,
}

/// Table view state: pagination, filters and ordered sort rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableState {
    pub page: u32,
    pub page_size: u32,
    #[serde(default)]
    pub filters: BTreeMap<String, Value>,
    #[serde(default)]
    pub sort: Vec<SortRule>,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 20,
            filters: BTreeMap::new(),
            sort: Vec::new(),
        }
    }
}

/// Opaque cache blob carried by a tab.
///
/// Every field is optional. The same type doubles as a patch: fields left
/// `None` in a patch keep whatever the tab already had.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TabCacheData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_data: Option<BTreeMap<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_state: Option<TableState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scroll_position: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_dirty: Option<bool>,
}

impl TabCacheData {
    /// Shallow per-key merge. Sub-objects are replaced whole.
    pub fn merge(&mut self, patch: TabCacheData) {
        let TabCacheData {
            form_data,
            table_state,
            api_data,
            scroll_position,
            last_updated,
            is_dirty,
        } = patch;

        if form_data.is_some() {
            self.form_data = form_data;
        }
        if table_state.is_some() {
            self.table_state = table_state;
        }
        if api_data.is_some() {
            self.api_data = api_data;
        }
        if scroll_position.is_some() {
            self.scroll_position = scroll_position;
        }
        if last_updated.is_some() {
            self.last_updated = last_updated;
        }
        if is_dirty.is_some() {
            self.is_dirty = is_dirty;
        }
    }

    pub fn with_scroll_position(mut self, position: f64) -> Self {
        self.scroll_position = Some(position);
        self
    }

    pub fn with_form_field(mut self, field: &str, value: Value) -> Self {
        self.form_data
            .get_or_insert_with(BTreeMap::new)
            .insert(field.to_string(), value);
        self
    }

    pub fn with_table_state(mut self, state: TableState) -> Self {
        self.table_state = Some(state);
        self
    }

    pub fn with_dirty(mut self, dirty: bool) -> Self {
        self.is_dirty = Some(dirty);
        self
    }
}

/// Merge an optional patch into an optional cache slot.
pub fn merge_into(slot: &mut Option<TabCacheData>, patch: Option<TabCacheData>) {
    let Some(patch) = patch else {
        return;
    };
    match slot {
        Some(existing) => existing.merge(patch),
        None => *slot = Some(patch),
    }
}
