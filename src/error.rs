use std::path::PathBuf;

/// Errors raised while building a globe
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum GlobeError {
    #[error("cannot build {arcs} arcs from {nodes} nodes: at least 2 nodes are required")]
    TooFewNodes { nodes: usize, arcs: usize },

    #[error("invalid range for {name}: [{min}, {max})")]
    InvalidRange { name: &'static str, min: f32, max: f32 },

    #[error("node index {index} out of range for {nodes} nodes")]
    NodeIndex { index: usize, nodes: usize },

    #[error("arc endpoints must differ (both are node {index})")]
    SelfLoop { index: usize },

    #[error("{name} must lie in [{min}, {max}], got {value}")]
    OutOfBounds { name: &'static str, value: f32, min: f32, max: f32 },
}

/// Errors that can occur while loading the settings file
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse TOML at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
}
