// Dashboard session: applies user actions to the tab store and router,
// then checks the route/tab invariants and navigates if they are broken.

use crate::modules::closed_tabs::ClosedTabs;
use crate::modules::navigation::{is_root, is_within, Route, Router};
use crate::modules::split_view::{Layout, SplitViewController};
use crate::modules::tab_cache::TabCacheData;
use crate::modules::tabs::TabStore;
use crate::settings::LayoutSettings;
use crate::state::{NewTab, Tab, TabsPayload};

// Reconciliation never needs more than a couple of hops; the cap only
// guards against a misconfigured root that is itself a primary route.
const MAX_RECONCILE_STEPS: usize = 4;

pub struct Dashboard<R: Router> {
    store: TabStore,
    closed: ClosedTabs,
    router: R,
    split_view: SplitViewController,
}

impl<R: Router> Dashboard<R> {
    pub fn new(router: R, settings: LayoutSettings) -> Self {
        Self {
            store: TabStore::new(),
            closed: ClosedTabs::with_capacity(settings.max_closed_tabs),
            router,
            split_view: SplitViewController::new(&settings),
        }
    }

    pub fn store(&self) -> &TabStore {
        &self.store
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    pub fn closed_tab_count(&self) -> usize {
        self.closed.len()
    }

    pub fn location(&self) -> Route {
        self.router.location()
    }

    pub fn layout(&self) -> Layout {
        self.split_view.layout(&self.router.location(), self.store.tabs())
    }

    pub fn snapshot(&self) -> TabsPayload {
        TabsPayload {
            tabs: self.store.tabs().to_vec(),
            active_tab_id: self.store.active_tab_id().map(str::to_string),
        }
    }

    /// Swap in new settings. Open tabs survive; closed-tab history does not.
    pub fn apply_settings(&mut self, settings: &LayoutSettings) {
        self.split_view = SplitViewController::new(settings);
        self.closed = ClosedTabs::with_capacity(settings.max_closed_tabs);
        self.reconcile();
    }

    /// Open (or refresh) a tab and route to it.
    pub fn open(&mut self, spec: NewTab) {
        self.store.add_tab(spec);
        if let Some(path) = self.store.active_tab().map(|t| t.path.clone()) {
            self.router.navigate(&path);
        }
        self.reconcile();
    }

    /// Activate an existing tab. Returns false for unknown ids.
    pub fn select(&mut self, id: &str) -> bool {
        let Some(path) = self.store.get(id).map(|t| t.path.clone()) else {
            return false;
        };
        self.store.set_active_tab(id);
        self.router.navigate(&path);
        self.reconcile();
        true
    }

    /// Close a tab and follow the store's choice of next active tab.
    pub fn close(&mut self, id: &str) -> Option<Tab> {
        let tab = self.store.get(id)?.clone();
        if !tab.is_closeable {
            return self.store.active_tab().cloned();
        }

        self.closed.archive(&tab);
        let next = self.store.remove_tab(id);
        if let Some(ref next) = next {
            if self.router.location().full() != next.path {
                self.router.navigate(&next.path);
            }
        }
        self.reconcile();
        next
    }

    /// Reopen the most recently closed tab.
    pub fn reopen_closed(&mut self) -> Option<String> {
        let closed = self.closed.pop()?;
        self.open(NewTab::from(closed));
        self.store.active_tab_id().map(str::to_string)
    }

    /// Route change from outside the tab strip (menu link, address bar).
    ///
    /// Leaving the dashboard section drops every tab.
    pub fn navigate(&mut self, to: &str) {
        self.router.navigate(to);

        let root = self.split_view.dashboard_root();
        let path = self.router.location().path;
        if !is_within(&path, root) && !is_root(&path, root) {
            self.store.clear_all_tabs();
            self.closed.clear();
        }
        self.reconcile();
    }

    pub fn update_cache(&mut self, id: &str, patch: TabCacheData) {
        self.store.update_tab_cache(id, patch);
    }

    pub fn reorder(&mut self, new_order: &[String]) -> bool {
        self.store.reorder_tabs(new_order)
    }

    pub fn clear(&mut self) {
        self.store.clear_all_tabs();
        self.reconcile();
    }

    /// Post-mutation pass: apply corrective navigation until the route and
    /// the tab set agree.
    fn reconcile(&mut self) {
        for _ in 0..MAX_RECONCILE_STEPS {
            let route = self.router.location();
            let Some(target) = self.split_view.reconcile(&route, self.store.tabs()) else {
                return;
            };
            log::info!("[Dashboard] Reconciling {} -> {}", route.full(), target);
            self.router.navigate(&target);
        }
        log::warn!("[Dashboard] Route did not settle after {} steps", MAX_RECONCILE_STEPS);
    }
}
