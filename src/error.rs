//! Crate-level error types.
//!
//! Each subsystem has its own error enum; [`PlanetariumError`] wraps them for
//! callers that drive the whole pipeline (fetch, layout, window, render).

use std::path::PathBuf;

use thiserror::Error;

/// Failures while fetching or decoding organisation records.
#[derive(Debug, Error)]
pub enum DataError {
    /// Transport-level failure (DNS, TLS, timeout, connection reset).
    #[error("request to {endpoint} failed: {source}")]
    Http {
        endpoint: String,
        #[source]
        source: Box<ureq::Error>,
    },
    /// The endpoint answered with a non-success status code.
    #[error("{endpoint} answered with HTTP status {status}")]
    Status { endpoint: String, status: u16 },
    /// Reading a local response file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The body was not the JSON envelope we expected.
    #[error("malformed response: {0}")]
    Json(#[from] serde_json::Error),
    /// The server reported GraphQL errors.
    #[error("GraphQL errors: {0}")]
    GraphQl(String),
    /// The envelope carried neither data nor errors.
    #[error("response contained no data")]
    MissingData,
}

/// Failures while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Failures while bringing up the GPU.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to request device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("the surface reports no supported formats for this adapter")]
    IncompatibleSurface,
}

/// Top-level error for the planetarium pipeline.
#[derive(Debug, Error)]
pub enum PlanetariumError {
    #[error(transparent)]
    Data(#[from] DataError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}
