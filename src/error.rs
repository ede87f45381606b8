use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to access SSH config file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("SSH config file {} is not valid UTF-8", path.display())]
    NotUtf8 { path: PathBuf },

    #[error("Host alias and hostname must not be empty (host {host:?}, hostname {hostname:?})")]
    InvalidHost { host: String, hostname: String },

    #[error("Can not overwrite existing record: {0}")]
    DuplicateHost(String),

    #[error("Cannot import. A problem occurred while reading the import file {}", path.display())]
    Import {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write import progress")]
    Output(#[source] std::io::Error),

    #[error("Malformed import line {line}: {content:?}")]
    MalformedImportLine { line: usize, content: String },
}

pub type Result<T> = std::result::Result<T, Error>;
