use thiserror::Error;

/// Top-level error type for the cloudpath engine.
#[derive(Debug, Error)]
pub enum CloudPathError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Edit(#[from] EditError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors produced while turning pointer input into a 3D anchor.
#[derive(Debug, Error, PartialEq)]
pub enum ResolveError {
    #[error("pointer ray does not hit the point cloud or the drawing plane")]
    NotFound,

    #[error("degenerate camera: {0}")]
    DegenerateCamera(String),
}

/// Errors from index-addressed editing operations.
///
/// These are local and expected during interactive editing; an operation that
/// returns one of them has left the collection untouched.
#[derive(Debug, Error, PartialEq)]
pub enum EditError {
    #[error("path index {index} is out of range (collection has {len} paths)")]
    InvalidIndex { index: usize, len: usize },

    #[error("operation needs at least {required} points, path has {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("not in drawing mode")]
    NotDrawing,

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Errors surfaced when exporting the collection.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("there are no paths to export")]
    EmptyCollection,

    #[error("unsupported export format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to encode snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors while decoding a persisted snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("malformed snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unsupported snapshot version: {0}")]
    UnsupportedVersion(String),

    #[error("stored path id {0} is out of range")]
    IdOutOfRange(u64),

    #[error("stored path {record} has an invalid style: {source}")]
    InvalidStyle {
        record: usize,
        #[source]
        source: EditError,
    },
}

/// Errors from the local key-value store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// Errors while loading or validating engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Convenience type alias for results using [`CloudPathError`].
pub type Result<T> = std::result::Result<T, CloudPathError>;
