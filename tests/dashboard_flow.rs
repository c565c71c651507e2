use futures_util::future::{BoxFuture, FutureExt};
use serde_json::json;
use std::collections::HashSet;

use tabdesk_lib::modules::dashboard::Dashboard;
use tabdesk_lib::modules::navigation::{MemoryRouter, Router};
use tabdesk_lib::modules::pane::{resolve_into, PaneContent, PaneSlot};
use tabdesk_lib::modules::resolver::{ComponentResolver, ModuleLoader};
use tabdesk_lib::modules::split_view::{Layout, LeftPane, RightPane};
use tabdesk_lib::modules::tab_cache::TabCacheData;
use tabdesk_lib::settings::LayoutSettings;
use tabdesk_lib::state::NewTab;
use tabdesk_lib::Result;

struct PagesLoader {
    pages: HashSet<&'static str>,
}

impl ModuleLoader for PagesLoader {
    type Module = String;

    fn load<'a>(&'a self, location: &'a str) -> BoxFuture<'a, Result<Option<String>>> {
        async move {
            // Yield once so loads really are asynchronous.
            tokio::task::yield_now().await;
            Ok(self.pages.contains(location).then(|| location.to_string()))
        }
        .boxed()
    }
}

fn resolver() -> ComponentResolver<PagesLoader> {
    let loader = PagesLoader {
        pages: [
            "pages/user-management/UserList.tsx",
            "pages/user-management/SearchUser.tsx",
            "pages/reports/UserWisePosition.tsx",
            "pages/trading/OrderBook.tsx",
        ]
        .into_iter()
        .collect(),
    };
    ComponentResolver::new(loader, &LayoutSettings::default())
}

fn dashboard() -> Dashboard<MemoryRouter> {
    Dashboard::new(MemoryRouter::new("/dashboard"), LayoutSettings::default())
}

fn open(d: &mut Dashboard<MemoryRouter>, title: &str, path: &str) -> String {
    d.open(NewTab::new(title, path));
    d.store().active_tab_id().unwrap().to_string()
}

#[tokio::test]
async fn form_with_other_tabs_shows_most_recent_other_tab() {
    let mut d = dashboard();
    open(&mut d, "Users", "/dashboard/user-list");
    open(&mut d, "Create user", "/dashboard/create-user");
    open(&mut d, "Search", "/dashboard/search-user");

    // Back to the form: it goes left, the search tab goes right.
    let form = d.store().find_by_path("/dashboard/create-user").unwrap().id.clone();
    d.select(&form);

    let layout = d.layout();
    assert!(matches!(
        &layout,
        Layout::Split {
            left: LeftPane::LiveRoute,
            right: RightPane::Tab { path, .. },
            ..
        } if path == "/dashboard/search-user"
    ));

    let r = resolver();
    let mut right = PaneSlot::new();
    let ticket = right.request(layout.resolve_target()).unwrap();
    let (ticket, resolved) = resolve_into(&r, ticket).await;
    assert!(right.complete(ticket, resolved));

    match right.content() {
        PaneContent::Ready(resolved) => {
            assert_eq!(resolved.location, "pages/user-management/SearchUser.tsx")
        }
        other => panic!("unexpected pane: {:?}", other),
    }
}

#[test]
fn only_form_open_gives_empty_right_pane() {
    let mut d = dashboard();
    open(&mut d, "Create user", "/dashboard/create-user");

    assert_eq!(d.location().path, "/dashboard/create-user");
    assert!(matches!(
        d.layout(),
        Layout::Split {
            right: RightPane::Empty,
            ..
        }
    ));
}

#[test]
fn navigating_away_from_form_pins_it_left() {
    let mut d = dashboard();
    open(&mut d, "Create user", "/dashboard/create-user");
    open(&mut d, "Orders", "/dashboard/orders");

    assert_eq!(
        d.layout(),
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
fn closing_all_tabs_returns_to_root() {
    let mut d = dashboard();
    let users = open(&mut d, "Users", "/dashboard/user-list");
    let orders = open(&mut d, "Orders", "/dashboard/orders");

    d.close(&users);
    assert_eq!(d.location().path, "/dashboard/orders");

    d.close(&orders);
    assert_eq!(d.location().path, "/dashboard");
    assert!(d.store().is_empty());
}

#[test]
fn closing_form_tab_under_the_route_moves_to_remaining_tab() {
    let mut d = dashboard();
    open(&mut d, "Orders", "/dashboard/orders");
    let form = open(&mut d, "Create user", "/dashboard/create-user");
    assert_eq!(d.location().path, "/dashboard/create-user");

    d.close(&form);
    assert_eq!(d.location().path, "/dashboard/orders");
    assert_eq!(d.layout(), Layout::Single);
}

#[test]
fn route_left_on_form_without_tab_is_corrected() {
    let mut d = dashboard();
    open(&mut d, "Orders", "/dashboard/orders");

    // Someone routes straight to the form without opening a tab for it.
    d.navigate("/dashboard/create-user");
    assert_eq!(d.location().path, "/dashboard/orders");

    d.clear();
    d.navigate("/dashboard/create-user?mode=edit&id=4");
    assert_eq!(d.location().full(), "/dashboard");
}

#[test]
fn reopening_duplicate_path_keeps_one_tab_and_merges_cache() {
    let mut d = dashboard();
    d.open(
        NewTab::new("Users", "/dashboard/user-list")
            .with_cache(TabCacheData::default().with_form_field("status", json!("active"))),
    );
    open(&mut d, "Orders", "/dashboard/orders");
    d.open(
        NewTab::new("Users (2)", "/dashboard/user-list")
            .with_cache(TabCacheData::default().with_scroll_position(120.0)),
    );

    assert_eq!(d.store().len(), 2);
    let tab = d.store().active_tab().unwrap();
    assert_eq!(tab.title, "Users (2)");
    let cache = tab.cache_data.as_ref().unwrap();
    assert_eq!(cache.scroll_position, Some(120.0));
    assert_eq!(
        cache.form_data.as_ref().unwrap().get("status"),
        Some(&json!("active"))
    );
    assert_eq!(d.router().location().path, "/dashboard/user-list");
}

#[tokio::test]
async fn rapid_switch_discards_stale_load() {
    let r = resolver();
    let mut pane = PaneSlot::new();

    let first = pane.request(Some("/dashboard/user-position")).unwrap();
    let second = pane.request(Some("/dashboard/xyz-widget")).unwrap();

    let (second, missing) = resolve_into(&r, second).await;
    let (first, found) = resolve_into(&r, first).await;
    assert!(found.is_some());

    assert!(pane.complete(second, missing));
    assert!(!pane.complete(first, found));

    match pane.content() {
        PaneContent::NotFound { path, message } => {
            assert_eq!(path, "/dashboard/xyz-widget");
            assert!(message.contains("/dashboard/xyz-widget"));
        }
        other => panic!("unexpected pane: {:?}", other),
    }
}

#[tokio::test]
async fn dragged_strip_still_shows_latest_tab_beside_form() {
    let mut d = dashboard();
    let users = open(&mut d, "Users", "/dashboard/user-list");
    let form = open(&mut d, "Create user", "/dashboard/create-user/");
    let search = open(&mut d, "Search", "/dashboard/search-user");
    d.reorder(&[search, users, form.clone()]);

    // Reopening through the un-normalized path reuses the form tab.
    open(&mut d, "Create user", "/dashboard/create-user/");
    assert_eq!(d.store().len(), 3);
    assert_eq!(d.store().active_tab_id(), Some(form.as_str()));
    assert_eq!(d.location().path, "/dashboard/create-user");

    let layout = d.layout();
    assert_eq!(layout.resolve_target(), Some("/dashboard/search-user"));

    let r = resolver();
    let mut right = PaneSlot::new();
    let ticket = right.request(layout.resolve_target()).unwrap();
    let (ticket, resolved) = resolve_into(&r, ticket).await;
    assert!(right.complete(ticket, resolved));
    assert!(matches!(right.content(), PaneContent::Ready(_)));
}
