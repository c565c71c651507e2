use std::collections::VecDeque;

use crate::state::{ClosedTab, Tab};

pub const MAX_CLOSED_TABS: usize = 25;

/// Session-scoped stack of closed tabs. Never persisted.
#[derive(Debug)]
pub struct ClosedTabs {
    tabs: VecDeque<ClosedTab>,
    capacity: usize,
}

impl Default for ClosedTabs {
    fn default() -> Self {
        Self::with_capacity(MAX_CLOSED_TABS)
    }
}

impl ClosedTabs {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tabs: VecDeque::new(),
            capacity,
        }
    }

    /// Archives a tab, evicting the oldest entry when full (FIFO)
    pub fn archive(&mut self, tab: &Tab) {
        if self.capacity == 0 {
            return;
        }

        self.tabs.push_back(ClosedTab::from(tab));
        while self.tabs.len() > self.capacity {
            self.tabs.pop_front();
        }

        log::debug!("[ClosedTabs] Archived tab '{}' at {}", tab.title, tab.path);
    }

    /// Retrieves last closed tab (LIFO)
    pub fn pop(&mut self) -> Option<ClosedTab> {
        let tab = self.tabs.pop_back();

        if let Some(ref t) = tab {
            log::debug!("[ClosedTabs] Restored tab '{}' at {}", t.title, t.path);
        }

        tab
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn clear(&mut self) {
        self.tabs.clear();
    }
}
