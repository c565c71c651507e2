// Split-view layout decisions - pure logic, no Tauri imports.
//
// While the primary create/edit form has a tab, the dashboard shows two
// panes: the form pinned left, anything else right. The controller also
// reports the corrective navigation needed when the route points at a tab
// that no longer exists.

use serde::Serialize;

use crate::modules::navigation::{canonical_route, is_root, is_within, Route};
use crate::modules::tabs::latest_opened;
use crate::settings::LayoutSettings;
use crate::state::Tab;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LeftPane {
    /// The route itself is the form; render the routed outlet.
    LiveRoute,
    /// User navigated elsewhere; keep a mounted instance of the form.
    #[serde(rename_all = "camelCase")]
    PinnedForm { path: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RightPane {
    LiveRoute,
    /// Content of another open tab, resolved through the component resolver.
    #[serde(rename_all = "camelCase")]
    Tab { tab_id: String, path: String },
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Layout {
    Single,
    #[serde(rename_all = "camelCase")]
    Split {
        left: LeftPane,
        right: RightPane,
        left_ratio: f32,
    },
}

impl Layout {
    /// Path the right pane needs resolved, if any.
    pub fn resolve_target(&self) -> Option<&str> {
        match self {
            Layout::Split {
                right: RightPane::Tab { path, .. },
                ..
            } => Some(path.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SplitViewController {
    dashboard_root: String,
    primary_form_path: String,
    edit_marker: String,
    left_ratio: f32,
}

impl SplitViewController {
    pub fn new(settings: &LayoutSettings) -> Self {
        Self {
            dashboard_root: settings.dashboard_root.clone(),
            primary_form_path: canonical_route(&settings.primary_form_path),
            edit_marker: settings.edit_marker.clone(),
            left_ratio: settings.left_pane_ratio,
        }
    }

    pub fn dashboard_root(&self) -> &str {
        &self.dashboard_root
    }

    /// Tab path belongs to the primary form (create route or edit mode).
    pub fn is_primary_tab_path(&self, path: &str) -> bool {
        path == self.primary_form_path
            || (!self.edit_marker.is_empty() && path.contains(&self.edit_marker))
    }

    pub fn is_primary_route(&self, route: &Route) -> bool {
        route.path == self.primary_form_path || route.query_contains(&self.edit_marker)
    }

    pub fn primary_path_open(&self, tabs: &[Tab]) -> bool {
        tabs.iter().any(|t| self.is_primary_tab_path(&t.path))
    }

    /// Most recently opened tab that is not the primary form.
    pub fn secondary_tab<'a>(&self, tabs: &'a [Tab]) -> Option<&'a Tab> {
        latest_opened(tabs.iter().filter(|t| !self.is_primary_tab_path(&t.path)))
    }

    fn primary_tab<'a>(&self, tabs: &'a [Tab]) -> Option<&'a Tab> {
        latest_opened(tabs.iter().filter(|t| self.is_primary_tab_path(&t.path)))
    }

    pub fn layout(&self, route: &Route, tabs: &[Tab]) -> Layout {
        let Some(primary) = self.primary_tab(tabs) else {
            return Layout::Single;
        };

        let (left, right) = if self.is_primary_route(route) {
            let right = match self.secondary_tab(tabs) {
                Some(tab) => RightPane::Tab {
                    tab_id: tab.id.clone(),
                    path: tab.path.clone(),
                },
                None => RightPane::Empty,
            };
            (LeftPane::LiveRoute, right)
        } else {
            let left = LeftPane::PinnedForm {
                path: primary.path.clone(),
            };
            (left, RightPane::LiveRoute)
        };

        Layout::Split {
            left,
            right,
            left_ratio: self.left_ratio,
        }
    }

    /// Corrective navigation target when route and tabs disagree.
    pub fn reconcile(&self, route: &Route, tabs: &[Tab]) -> Option<String> {
        if tabs.is_empty()
            && is_within(&route.path, &self.dashboard_root)
            && !is_root(&route.path, &self.dashboard_root)
        {
            log::debug!("[SplitView] No tabs left at {}, back to root", route.path);
            return Some(self.dashboard_root.clone());
        }

        if self.is_primary_route(route) && !self.primary_path_open(tabs) {
            let target = self
                .secondary_tab(tabs)
                .map(|t| t.path.clone())
                .unwrap_or_else(|| self.dashboard_root.clone());
            if target != route.full() {
                log::debug!("[SplitView] Form tab closed, moving to {}", target);
                return Some(target);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn tabs(paths: &[&str]) -> Vec<Tab> {
        paths
            .iter()
            .enumerate()
            .map(|(i, path)| Tab {
                id: format!("tab-{}", i),
                title: path.to_string(),
                path: path.to_string(),
                icon: None,
                is_closeable: true,
                cache_data: None,
                opened_seq: i as u64 + 1,
            })
            .collect()
    }

    fn route(s: &str) -> Route {
        Route::parse(s).unwrap()
    }

    fn controller() -> SplitViewController {
        SplitViewController::new(&LayoutSettings::default())
    }

    #[rstest]
    #[case("/dashboard/create-user", true)]
    #[case("/dashboard/user-list?mode=edit&id=3", true)]
    #[case("/dashboard/create-user-report", false)]
    #[case("/dashboard/user-list", false)]
    fn test_primary_tab_path(#[case] path: &str, #[case] expected: bool) {
        assert_eq!(controller().is_primary_tab_path(path), expected);
    }

    #[test]
    fn test_single_pane_without_form() {
        let tabs = tabs(&["/dashboard/user-list", "/dashboard/orders"]);
        assert_eq!(controller().layout(&route("/dashboard/orders"), &tabs), Layout::Single);
    }

    #[test]
    fn test_right_pane_is_most_recent_other_tab() {
        let tabs = tabs(&[
            "/dashboard/user-list",
            "/dashboard/create-user",
            "/dashboard/search-user",
        ]);
        let c = controller();
        assert!(c.primary_path_open(&tabs));

        let layout = c.layout(&route("/dashboard/create-user"), &tabs);
        assert_eq!(
            layout,
            Layout::Split {
                left: LeftPane::LiveRoute,
                right: RightPane::Tab {
                    tab_id: "tab-2".to_string(),
                    path: "/dashboard/search-user".to_string(),
                },
                left_ratio: 0.4,
            }
        );
        assert_eq!(layout.resolve_target(), Some("/dashboard/search-user"));
    }

    #[test]
    fn test_right_pane_empty_when_only_form_open() {
        let tabs = tabs(&["/dashboard/create-user"]);
        let layout = controller().layout(&route("/dashboard/create-user"), &tabs);

        assert!(matches!(layout, Layout::Split { right: RightPane::Empty, .. }));
        assert_eq!(layout.resolve_target(), None);
    }

    #[test]
    fn test_right_pane_follows_opening_order_not_strip_order() {
        let mut tabs = tabs(&[
            "/dashboard/user-list",
            "/dashboard/create-user",
            "/dashboard/search-user",
        ]);
        // Dragged: search-user, user-list, create-user.
        tabs.rotate_right(1);
        assert_eq!(tabs[2].path, "/dashboard/create-user");

        let layout = controller().layout(&route("/dashboard/create-user"), &tabs);
        assert_eq!(layout.resolve_target(), Some("/dashboard/search-user"));
    }

    #[test]
    fn test_primary_path_setting_is_normalized() {
        let settings = LayoutSettings {
            primary_form_path: "/dashboard/create-user/".to_string(),
            ..LayoutSettings::default()
        };
        let c = SplitViewController::new(&settings);
        let tabs = tabs(&["/dashboard/orders", "/dashboard/create-user"]);

        assert!(c.is_primary_route(&route("/dashboard/create-user")));
        assert!(c.primary_path_open(&tabs));
    }

    #[test]
    fn test_form_pinned_while_elsewhere() {
        let tabs = tabs(&["/dashboard/create-user", "/dashboard/orders"]);
        let layout = controller().layout(&route("/dashboard/orders"), &tabs);

        assert_eq!(
            layout,
            Layout::Split {
                left: LeftPane::PinnedForm {
                    path: "/dashboard/create-user".to_string()
                },
                right: RightPane::LiveRoute,
                left_ratio: 0.4,
            }
        );
    }

    #[test]
    fn test_edit_mode_route_is_primary() {
        let tabs = tabs(&["/dashboard/user-list", "/dashboard/create-user?mode=edit&id=7"]);
        let layout = controller().layout(&route("/dashboard/create-user?mode=edit&id=7"), &tabs);

        assert!(matches!(
            layout,
            Layout::Split {
                left: LeftPane::LiveRoute,
                right: RightPane::Tab { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_reconcile_empty_tabs_goes_root() {
        let c = controller();
        assert_eq!(
            c.reconcile(&route("/dashboard/orders"), &[]),
            Some("/dashboard".to_string())
        );
        assert_eq!(c.reconcile(&route("/dashboard"), &[]), None);
        assert_eq!(c.reconcile(&route("/login"), &[]), None);
    }

    #[test]
    fn test_reconcile_closed_form_goes_to_other_tab() {
        let c = controller();
        let tabs = tabs(&["/dashboard/user-list", "/dashboard/orders"]);
        assert_eq!(
            c.reconcile(&route("/dashboard/create-user"), &tabs),
            Some("/dashboard/orders".to_string())
        );
    }

    #[test]
    fn test_reconcile_consistent_state() {
        let c = controller();
        let tabs = tabs(&["/dashboard/create-user", "/dashboard/orders"]);
        assert_eq!(c.reconcile(&route("/dashboard/create-user"), &tabs), None);
        assert_eq!(c.reconcile(&route("/dashboard/orders"), &tabs), None);
    }

    #[test]
    fn test_layout_serializes_for_shell() {
        let tabs = tabs(&["/dashboard/create-user", "/dashboard/orders"]);
        let layout = controller().layout(&route("/dashboard/create-user"), &tabs);
        let value = serde_json::to_value(&layout).unwrap();

        assert_eq!(value["kind"], "split");
        assert_eq!(value["right"]["kind"], "tab");
        assert_eq!(value["right"]["tabId"], "tab-1");
        assert_eq!(value["left"]["kind"], "liveRoute");
    }
}
