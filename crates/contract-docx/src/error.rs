//! Errors raised while assembling or writing a contract document.

use std::path::PathBuf;

use ecow::EcoString;

use crate::numbering::ListId;

/// The result type for contract-docx.
pub type Result<T, Err = Error> = std::result::Result<T, Err>;

/// An error that aborts an assembly run.
///
/// `InvalidDepth` and `UnregisteredList` are invariant violations in the token
/// stream or in the converter itself. No partial document is produced when
/// either occurs.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A heading token carried a depth outside `1..=6`.
    #[error("invalid heading depth {0}, expected 1 to 6")]
    InvalidDepth(u8),
    /// A list item referenced a list that was never registered.
    #[error("list item references unregistered list {0}")]
    UnregisteredList(ListId),
    /// A token kind outside the template vocabulary was met under
    /// [`UnknownTokenPolicy::Error`](crate::UnknownTokenPolicy::Error).
    #[error("unsupported token `{0}`")]
    UnsupportedToken(EcoString),
    /// Reading a manifest or a section file failed.
    #[error("failed to read {path:?}: {source}")]
    Io {
        /// The file being read.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The manifest is not valid TOML or misses required keys.
    #[error("invalid manifest: {0}")]
    Manifest(#[from] toml::de::Error),
    /// The document could not be serialized.
    #[error("failed to serialize document: {0}")]
    Serialize(EcoString),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
