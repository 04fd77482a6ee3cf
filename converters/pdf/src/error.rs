use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Core(#[from] md2lab_converters_core::Error),

    #[error("invalid PDF: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("could not serialize PDF: {0}")]
    Write(#[from] std::io::Error),

    #[error("could not decode logo {}: {source}", .path.display())]
    Logo {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("PDF page {0} has no usable MediaBox")]
    MissingMediaBox(usize),

    #[error("PDF has no page with index {0}")]
    PageNotFound(usize),

    #[error(
        "no Chrome or Chromium executable found; pass --chrome or set {}",
        crate::rasterizer::CHROME_ENV
    )]
    BrowserNotFound,

    #[error("could not launch {}: {source}", .executable.display())]
    BrowserLaunch {
        executable: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} exited with {status}: {stderr}", .executable.display())]
    BrowserFailed {
        executable: PathBuf,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("{} did not produce a PDF", .executable.display())]
    NoOutput { executable: PathBuf },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Advice shown alongside the error.
    #[must_use]
    pub fn advice(&self) -> Option<&'static str> {
        match self {
            Self::BrowserNotFound => Some(
                "install Google Chrome or Chromium, or point md2lab at an existing binary with --chrome",
            ),
            Self::BrowserFailed { .. } | Self::NoOutput { .. } => {
                Some("run the same command with RUST_LOG=debug to see the browser invocation")
            }
            Self::Io { .. }
            | Self::Core(_)
            | Self::Pdf(_)
            | Self::Write(_)
            | Self::Logo { .. }
            | Self::MissingMediaBox(_)
            | Self::PageNotFound(_)
            | Self::BrowserLaunch { .. } => None,
        }
    }
}
