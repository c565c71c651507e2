// Path -> UI module resolution.
//
// Two tiers: the explicit component table is authoritative, the
// kebab-to-Pascal folder convention is a best-effort fallback. The actual
// existence check is injected through `ModuleLoader` so this module never
// depends on a real module system.

use dashmap::DashMap;
use futures_util::future::{BoxFuture, FutureExt};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::modules::navigation::{kebab_to_pascal, relative_key};
use crate::settings::LayoutSettings;

/// Loads a module by its fully qualified location
/// (e.g. `pages/reports/UserWisePosition.tsx`).
///
/// `Ok(None)` means the module does not exist.
pub trait ModuleLoader: Send + Sync {
    type Module: Clone + Send + Sync + 'static;

    fn load<'a>(&'a self, location: &'a str) -> BoxFuture<'a, Result<Option<Self::Module>>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    Table,
    Convention,
}

/// A module key to try, before extensions are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub key: String,
    pub source: ResolutionSource,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedComponent<M> {
    /// Route path the resolution was requested for.
    pub path: String,
    pub key: String,
    pub location: String,
    pub source: ResolutionSource,
    pub module: M,
}

/// `("trading", "xyz-widget")` -> `trading/XyzWidget`
pub fn convention_key(category: &str, segment: &str) -> String {
    format!("{}/{}", category, kebab_to_pascal(segment))
}

pub struct ComponentResolver<L: ModuleLoader> {
    loader: L,
    dashboard_root: String,
    module_root: String,
    extensions: Vec<String>,
    categories: Vec<String>,
    table: BTreeMap<String, String>,
    // Successes only, keyed like the table (relative key, no query); a
    // miss is retried on the next render.
    cache: DashMap<String, ResolvedComponent<L::Module>>,
}

impl<L: ModuleLoader> ComponentResolver<L> {
    pub fn new(loader: L, settings: &LayoutSettings) -> Self {
        Self {
            loader,
            dashboard_root: settings.dashboard_root.clone(),
            module_root: settings.module_root.trim_end_matches('/').to_string(),
            extensions: settings.extensions.clone(),
            categories: settings.categories.clone(),
            table: settings.component_table.clone(),
            cache: DashMap::new(),
        }
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Keys to try for `path`, in priority order.
    pub fn candidates(&self, path: &str) -> Vec<Candidate> {
        let key = relative_key(path, &self.dashboard_root);
        if key.is_empty() {
            return Vec::new();
        }

        let mut candidates = Vec::new();
        if let Some(mapped) = self.table.get(&key) {
            candidates.push(Candidate {
                key: mapped.clone(),
                source: ResolutionSource::Table,
            });
        }

        let segment = key.rsplit('/').next().unwrap_or(key.as_str());
        for category in &self.categories {
            let conventional = convention_key(category, segment);
            if candidates.iter().any(|c| c.key == conventional) {
                continue;
            }
            candidates.push(Candidate {
                key: conventional,
                source: ResolutionSource::Convention,
            });
        }

        candidates
    }

    pub fn location(&self, key: &str, extension: &str) -> String {
        if self.module_root.is_empty() {
            format!("{}{}", key, extension)
        } else {
            format!("{}/{}{}", self.module_root, key, extension)
        }
    }

    /// Cached resolution for `path`, re-stamped with the requested path.
    ///
    /// Routes differing only in query string share an entry.
    pub fn cached(&self, path: &str) -> Option<ResolvedComponent<L::Module>> {
        let key = relative_key(path, &self.dashboard_root);
        self.cache.get(&key).map(|entry| ResolvedComponent {
            path: path.to_string(),
            ..entry.value().clone()
        })
    }

    /// Resolve `path` to a loaded module, or `None` when nothing matches.
    ///
    /// Loader errors count as a miss for that location.
    pub async fn resolve(&self, path: &str) -> Option<ResolvedComponent<L::Module>> {
        if let Some(hit) = self.cached(path) {
            return Some(hit);
        }

        for candidate in self.candidates(path) {
            for extension in &self.extensions {
                let location = self.location(&candidate.key, extension);
                let module = match self.loader.load(&location).await {
                    Ok(Some(module)) => module,
                    Ok(None) => continue,
                    Err(e) => {
                        log::warn!("[Resolver] {}", e);
                        continue;
                    }
                };

                log::debug!(
                    "[Resolver] {} -> {} ({:?})",
                    path,
                    location,
                    candidate.source
                );
                let resolved = ResolvedComponent {
                    path: path.to_string(),
                    key: candidate.key.clone(),
                    location,
                    source: candidate.source,
                    module,
                };
                self.cache
                    .insert(relative_key(path, &self.dashboard_root), resolved.clone());
                return Some(resolved);
            }
        }

        log::info!("[Resolver] No component for {}", path);
        None
    }
}

/// Loader probing module files beneath a front-end source directory.
#[derive(Debug, Clone)]
pub struct FsModuleLoader {
    root: PathBuf,
}

impl FsModuleLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ModuleLoader for FsModuleLoader {
    type Module = PathBuf;

    fn load<'a>(&'a self, location: &'a str) -> BoxFuture<'a, Result<Option<PathBuf>>> {
        async move {
            let path = self.root.join(location);
            match tokio::fs::metadata(&path).await {
                Ok(meta) if meta.is_file() => Ok(Some(path)),
                Ok(_) => Ok(None),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(Error::ModuleLoad {
                    location: location.to_string(),
                    reason: e.to_string(),
                }),
            }
        }
        .boxed()
    }
}
