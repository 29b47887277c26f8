use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("'{}' not found. Please create a Q&A dataset.", .0.display())]
    MissingInput(PathBuf),

    #[error("Model not trained yet ({} missing). Run training first.", .0.display())]
    ModelNotTrained(PathBuf),

    #[error("Invalid choice: {0:?}")]
    InvalidMenuChoice(String),

    #[error("Invalid dataset {}: {reason}", path.display())]
    InvalidDataset { path: PathBuf, reason: String },

    #[error("Invalid record #{index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    #[error("Dataset contains no records")]
    EmptyCorpus,

    #[error("Questions contain no indexable terms")]
    EmptyVocabulary,

    #[error("Corrupt model artifact {}: {reason}", path.display())]
    CorruptArtifact { path: PathBuf, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// True for the conditions the console reports as a plain message and moves on.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::MissingInput(_) | Self::ModelNotTrained(_) | Self::InvalidMenuChoice(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
