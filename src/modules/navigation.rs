// Pure navigation logic - no Tauri imports allowed.
// Route parsing and the router boundary used by the split view and the dashboard session.

use url::Url;

use crate::error::{Error, Result};

// Routes are app-relative; parse them against a throwaway origin.
const ROUTE_BASE: &str = "http://dashboard.local/";

/// A parsed app route: path plus optional raw query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub path: String,
    pub query: Option<String>,
}

impl Route {
    /// Parse `"/dashboard/create-user?mode=edit&id=7"` style input.
    ///
    /// The path keeps its percent-encoding, loses any trailing slash (except
    /// for `/`) and drops the fragment.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let route_err = |source| Error::Route {
            route: input.to_string(),
            source,
        };

        let base = Url::parse(ROUTE_BASE).map_err(route_err)?;
        let url = base.join(trimmed).map_err(route_err)?;

        Ok(Self {
            path: normalize_path(url.path()),
            query: url.query().filter(|q| !q.is_empty()).map(str::to_string),
        })
    }

    pub fn root() -> Self {
        Self {
            path: "/".to_string(),
            query: None,
        }
    }

    /// Path and query joined back into one route string.
    pub fn full(&self) -> String {
        match &self.query {
            Some(q) => format!("{}?{}", self.path, q),
            None => self.path.clone(),
        }
    }

    pub fn query_contains(&self, marker: &str) -> bool {
        !marker.is_empty()
            && self
                .query
                .as_deref()
                .is_some_and(|q| q.contains(marker))
    }
}

/// Supplies the current location and accepts imperative navigation.
pub trait Router {
    fn location(&self) -> Route;
    fn navigate(&mut self, to: &str);
}

/// In-memory router keeping a navigation history.
#[derive(Debug, Clone)]
pub struct MemoryRouter {
    current: Route,
    history: Vec<String>,
}

impl MemoryRouter {
    pub fn new(initial: &str) -> Self {
        let current = Route::parse(initial).unwrap_or_else(|e| {
            log::warn!("[Router] {}, starting at /", e);
            Route::root()
        });
        Self {
            history: vec![current.full()],
            current,
        }
    }

    /// Every location visited, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }
}

impl Router for MemoryRouter {
    fn location(&self) -> Route {
        self.current.clone()
    }

    fn navigate(&mut self, to: &str) {
        match Route::parse(to) {
            Ok(route) => {
                log::debug!("[Router] {} -> {}", self.current.full(), route.full());
                self.history.push(route.full());
                self.current = route;
            }
            Err(e) => log::warn!("[Router] Ignoring navigation: {}", e),
        }
    }
}

pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

/// Route string in the same form the router reports it (`Route::full`).
///
/// Unparseable input only gets its slashes normalized.
pub fn canonical_route(input: &str) -> String {
    match Route::parse(input) {
        Ok(route) => route.full(),
        Err(_) => normalize_path(input.trim()),
    }
}

/// True when `path` lies strictly beneath `root` (`/dashboard/x` under `/dashboard`).
pub fn is_within(path: &str, root: &str) -> bool {
    let root = root.trim_end_matches('/');
    path.strip_prefix(root)
        .is_some_and(|rest| rest.starts_with('/') && rest.len() > 1)
}

pub fn is_root(path: &str, root: &str) -> bool {
    normalize_path(path) == normalize_path(root)
}

/// Route path relative to `root`, query string removed.
///
/// `/dashboard/user-management/UserList?x=1` -> `user-management/UserList`.
pub fn relative_key(path: &str, root: &str) -> String {
    let without_query = path.split(['?', '#']).next().unwrap_or_default();
    let root = root.trim_end_matches('/');
    let relative = match without_query.strip_prefix(root) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => without_query,
    };
    relative.trim_matches('/').to_string()
}

/// Kebab-case segment to PascalCase: `xyz-widget` -> `XyzWidget`.
pub fn kebab_to_pascal(segment: &str) -> String {
    segment
        .split('-')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}
