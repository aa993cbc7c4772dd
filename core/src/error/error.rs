use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot determine home directory")]
    HomeDirUnavailable,
    #[error("config io error: {path} {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("logging setup failed: {0}")]
    Logging(String),
    #[error("api factory failed: {0}")]
    Factory(#[from] anyhow::Error),
}
