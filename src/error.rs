use std::path::PathBuf;

use crate::model::BodyId;

/// Problems with the body catalog or its texture table. These are all caught at
/// startup, before the first frame is drawn.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CatalogError {
    #[error("catalog has no bodies")]
    Empty,

    #[error("body {0} appears more than once")]
    DuplicateId(BodyId),

    #[error("body {0} must have a positive radius")]
    InvalidRadius(BodyId),

    #[error("body {0} must have a positive orbital distance and angular speed")]
    InvalidOrbit(BodyId),

    #[error("catalog needs exactly one central body, found {0}")]
    CentralBodyCount(usize),

    #[error("body {0} has malformed color {1:?}, expected six hex digits")]
    InvalidColor(BodyId, String),

    #[error("no texture entry for body {0}")]
    MissingTexture(BodyId),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("asset not found: {}", .0.display())]
    AssetNotFound(PathBuf),

    #[error("invalid config value for {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
