// Tab store - pure logic, no Tauri imports.
// Owns the ordered tab collection and the single active-tab pointer.

use chrono::Utc;
use std::collections::HashMap;

use crate::modules::navigation::canonical_route;
use crate::modules::tab_cache::{merge_into, TabCacheData};
use crate::state::{NewTab, Tab};

/// Ordered collection of open tabs plus the active pointer.
///
/// Operations on ids that are not in the collection are no-ops; UI
/// callbacks may fire after their tab has gone.
#[derive(Debug, Default)]
pub struct TabStore {
    tabs: Vec<Tab>,
    active_tab_id: Option<String>,
    next_seq: u64,
}

impl TabStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn active_tab_id(&self) -> Option<&str> {
        self.active_tab_id.as_deref()
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.active_tab_id.as_deref().and_then(|id| self.get(id))
    }

    pub fn get(&self, id: &str) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == id)
    }

    pub fn find_by_path(&self, path: &str) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.path == path)
    }

    /// Open a tab, or refresh the one already open for the same path.
    ///
    /// The path is stored in the form the router reports it, so
    /// `/dashboard/orders/` and `/dashboard/orders` are one tab. Either way
    /// the tab ends up active.
    pub fn add_tab(&mut self, mut spec: NewTab) {
        spec.path = canonical_route(&spec.path);
        if let Some(existing) = self.tabs.iter_mut().find(|t| t.path == spec.path) {
            existing.title = spec.title;
            merge_into(&mut existing.cache_data, spec.cache_data);
            log::debug!("[Tabs] Reusing tab {} for {}", existing.id, existing.path);
            self.active_tab_id = Some(existing.id.clone());
            return;
        }

        let id = self.generate_id(&spec.path);
        log::debug!("[Tabs] Opened tab {} for {}", id, spec.path);
        self.tabs.push(Tab {
            id: id.clone(),
            title: spec.title,
            path: spec.path,
            icon: spec.icon,
            is_closeable: true,
            cache_data: spec.cache_data,
            opened_seq: self.next_seq,
        });
        self.active_tab_id = Some(id);
    }

    /// Remove a tab. Returns the tab active afterwards.
    ///
    /// Closing the active tab activates the most recently opened remaining
    /// tab, not the closed tab's neighbour; strip order does not matter.
    /// Unknown ids change nothing and return `None`.
    pub fn remove_tab(&mut self, id: &str) -> Option<Tab> {
        let index = self.tabs.iter().position(|t| t.id == id)?;
        let removed = self.tabs.remove(index);

        if self.active_tab_id.as_deref() == Some(removed.id.as_str()) {
            self.active_tab_id = latest_opened(&self.tabs).map(|t| t.id.clone());
        }
        log::debug!(
            "[Tabs] Closed tab {} ({} left, active: {:?})",
            removed.id,
            self.tabs.len(),
            self.active_tab_id
        );

        self.active_tab().cloned()
    }

    /// Sets the pointer without checking that the id exists.
    pub fn set_active_tab(&mut self, id: &str) {
        self.active_tab_id = Some(id.to_string());
    }

    pub fn clear_all_tabs(&mut self) {
        if !self.tabs.is_empty() {
            log::debug!("[Tabs] Clearing {} tabs", self.tabs.len());
        }
        self.tabs.clear();
        self.active_tab_id = None;
    }

    /// Shallow-merge `patch` into the tab's cache, stamping `last_updated`
    /// when the patch does not carry its own.
    pub fn update_tab_cache(&mut self, id: &str, mut patch: TabCacheData) {
        let Some(tab) = self.tabs.iter_mut().find(|t| t.id == id) else {
            return;
        };
        if patch.last_updated.is_none() {
            patch.last_updated = Some(Utc::now());
        }
        merge_into(&mut tab.cache_data, Some(patch));
    }

    /// Reorder by id list. Returns true if the order changed.
    pub fn reorder_tabs(&mut self, new_order: &[String]) -> bool {
        reorder_logic(&mut self.tabs, new_order)
    }

    fn generate_id(&mut self, path: &str) -> String {
        self.next_seq += 1;
        let slug: String = path
            .trim_matches('/')
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
            .collect();
        format!("{}-{}-{}", slug, Utc::now().timestamp_millis(), self.next_seq)
    }
}

/// Most recently opened tab; ties (tabs from the shell without a
/// sequence) go to the later position.
pub fn latest_opened<'a>(tabs: impl IntoIterator<Item = &'a Tab>) -> Option<&'a Tab> {
    tabs.into_iter().max_by_key(|t| t.opened_seq)
}

/// Pure logic for reordering tabs.
/// Returns true if the order changed, false otherwise.
///
/// Algorithm:
/// 1. Map existing tabs by ID for O(1) lookup
/// 2. Rebuild vector based on new_order
/// 3. Append any missing tabs in their previous relative order
fn reorder_logic(tabs: &mut Vec<Tab>, new_order: &[String]) -> bool {
    if tabs.is_empty() || new_order.is_empty() {
        return false;
    }

    let old_order: Vec<String> = tabs.iter().map(|t| t.id.clone()).collect();
    let mut tab_map: HashMap<String, Tab> = tabs.drain(..).map(|t| (t.id.clone(), t)).collect();

    let mut reordered = Vec::with_capacity(old_order.len());
    for id in new_order {
        if let Some(tab) = tab_map.remove(id) {
            reordered.push(tab);
        }
    }

    // Ids the caller did not mention keep their relative order at the end.
    for id in &old_order {
        if let Some(tab) = tab_map.remove(id) {
            reordered.push(tab);
        }
    }

    let changed = reordered.iter().map(|t| &t.id).ne(old_order.iter());
    *tabs = reordered;

    changed
}
