#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("drawing context could not be obtained")]
    SurfaceUnavailable,

    #[error("expected {expected} drawing surfaces, found {found}")]
    MissingSurfaces { expected: usize, found: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
