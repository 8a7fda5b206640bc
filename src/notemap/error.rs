use thiserror::Error;

#[derive(Error, Debug)]
pub enum VaultError {
    #[error("Note not found: {0}")]
    NoteNotFound(String),

    #[error("Note already exists: {0}")]
    NoteExists(String),

    #[error("Section not found: {0}")]
    SectionNotFound(String),

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("No folder mapping for: {0}")]
    MappingNotFound(String),

    #[error("Path escapes the vault root: {0}")]
    OutOfBounds(String),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Metadata error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, VaultError>;
