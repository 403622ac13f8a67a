use thiserror::Error;

/// User-facing errors.
///
/// The formatter itself is total and has no error path; these arise only in
/// the surrounding file and configuration workflow.
#[derive(Error, Debug)]
pub enum GqlfmtError {
    #[error("gqlfmt config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, GqlfmtError>;
