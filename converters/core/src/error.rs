use std::path::PathBuf;

/// Errors raised while resolving a conversion's inputs.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A file or directory could not be read or written.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// The path being accessed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The source path is missing or not a directory.
    #[error("the path {} is not a valid directory", .0.display())]
    InvalidSourceDir(PathBuf),

    /// The source directory holds no usable Markdown files.
    #[error("no Markdown files found in {}", .0.display())]
    NoSources(PathBuf),

    /// Neither `metadata.yaml` nor `metadata.yml` exists.
    #[error("metadata file not found in {} (metadata.yaml or metadata.yml)", .0.display())]
    MetadataNotFound(PathBuf),

    /// The metadata file is not valid YAML.
    #[error("invalid metadata in {}: {source}", .path.display())]
    Metadata {
        /// The metadata file.
        path: PathBuf,
        /// The YAML error.
        #[source]
        source: serde_yaml::Error,
    },

    /// A required metadata key is absent or empty.
    #[error("'{field}' not found in metadata {}", .path.display())]
    MissingMetadataField {
        /// The missing key.
        field: &'static str,
        /// The metadata file.
        path: PathBuf,
    },

    /// A date could not be parsed as `YYYY-MM-DD`.
    #[error("invalid date format '{input}', use YYYY-MM-DD")]
    InvalidDate {
        /// The rejected input.
        input: String,
        /// The parse failure.
        #[source]
        source: chrono::ParseError,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
