// Module exports for pure logic
pub mod closed_tabs;   // Closed-tab archive (session only)
pub mod dashboard;     // Session orchestration + reconciliation pass
pub mod navigation;    // Routes, router boundary, path helpers
pub mod pane;          // Async pane loads with stale-result guard
pub mod resolver;      // Path -> component resolution
pub mod split_view;    // Single/dual pane decisions
pub mod tab_cache;     // Per-tab cached UI state
pub mod tabs;          // Tab store
