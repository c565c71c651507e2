// Async load slot for one pane.
//
// A load is keyed by the path it was requested for. When the pane has moved
// on to another path by the time the load finishes, the result is dropped.

use crate::modules::resolver::{ComponentResolver, ModuleLoader, ResolvedComponent};

#[derive(Debug, Clone, PartialEq)]
pub enum PaneContent<M> {
    /// Nothing to show (e.g. no secondary tab open).
    Empty,
    Loading { path: String },
    Ready(ResolvedComponent<M>),
    NotFound { path: String, message: String },
}

/// Handle for an in-flight load; hand it back to [`PaneSlot::complete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    path: String,
}

impl LoadTicket {
    pub fn path(&self) -> &str {
        &self.path
    }
}

#[derive(Debug)]
pub struct PaneSlot<M> {
    content: PaneContent<M>,
}

impl<M> Default for PaneSlot<M> {
    fn default() -> Self {
        Self {
            content: PaneContent::Empty,
        }
    }
}

impl<M: Clone> PaneSlot<M> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> &PaneContent<M> {
        &self.content
    }

    /// The path this pane currently wants to show.
    pub fn desired_path(&self) -> Option<&str> {
        match &self.content {
            PaneContent::Empty => None,
            PaneContent::Loading { path } | PaneContent::NotFound { path, .. } => Some(path.as_str()),
            PaneContent::Ready(resolved) => Some(resolved.path.as_str()),
        }
    }

    /// Point the pane at `path` (or at nothing).
    ///
    /// Returns a ticket when a load has to be started. Re-requesting the
    /// path already shown or loading returns `None`.
    pub fn request(&mut self, path: Option<&str>) -> Option<LoadTicket> {
        let Some(path) = path else {
            self.content = PaneContent::Empty;
            return None;
        };

        match &self.content {
            PaneContent::Loading { path: current } if current == path => return None,
            PaneContent::Ready(resolved) if resolved.path == path => return None,
            _ => {}
        }

        self.content = PaneContent::Loading {
            path: path.to_string(),
        };
        Some(LoadTicket {
            path: path.to_string(),
        })
    }

    /// Apply a finished load. Returns false when the result was stale.
    pub fn complete(&mut self, ticket: LoadTicket, result: Option<ResolvedComponent<M>>) -> bool {
        let wanted = matches!(&self.content, PaneContent::Loading { path } if *path == ticket.path);
        if !wanted {
            log::debug!("[Pane] Dropping stale load for {}", ticket.path);
            return false;
        }

        self.content = match result {
            Some(resolved) => PaneContent::Ready(resolved),
            None => PaneContent::NotFound {
                message: not_found_message(&ticket.path),
                path: ticket.path,
            },
        };
        true
    }
}

/// Resolve the path a ticket was issued for. Nothing is applied here: hand
/// the returned pair to `PaneSlot::complete`, which drops it if the slot has
/// moved on.
pub async fn resolve_into<L: ModuleLoader>(
    resolver: &ComponentResolver<L>,
    ticket: LoadTicket,
) -> (LoadTicket, Option<ResolvedComponent<L::Module>>) {
    let resolved = resolver.resolve(ticket.path()).await;
    (ticket, resolved)
}

pub fn not_found_message(path: &str) -> String {
    format!(
        "No page is registered for '{}'. Add it to the component table or create a matching page component.",
        path
    )
}
