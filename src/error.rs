use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to access settings file {path}: {source}")]
    SettingsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings: {0}")]
    SettingsParse(#[from] serde_json::Error),

    #[error("invalid route '{route}': {source}")]
    Route {
        route: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to load module {location}: {reason}")]
    ModuleLoad { location: String, reason: String },
}
