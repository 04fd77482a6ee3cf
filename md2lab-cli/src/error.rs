use std::{fmt::Display, path::PathBuf, process::exit};

use md2lab_converters_core::Error as CoreError;
use md2lab_converters_html::Error as HtmlError;
use md2lab_converters_pdf::Error as PdfError;
use miette::Diagnostic;

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Html(#[from] HtmlError),

    #[error(transparent)]
    Pdf(#[from] PdfError),

    #[error("could not write {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn core_advice(error: &CoreError) -> Option<&'static str> {
    if matches!(error, CoreError::InvalidSourceDir(_)) {
        Some("pass the directory that holds the guide's Markdown files")
    } else if matches!(error, CoreError::NoSources(_)) {
        Some("name files introduction.md, 01-<topic>.md, 02-<topic>.md, ... and resources.md")
    } else if matches!(error, CoreError::MetadataNotFound(_)) {
        Some("create metadata.yaml with at least course_title and course_id")
    } else if matches!(error, CoreError::MissingMetadataField { .. }) {
        Some("metadata.yaml needs both course_title and course_id")
    } else if matches!(error, CoreError::InvalidDate { .. }) {
        Some("dates look like 2025-01-31")
    } else {
        None
    }
}

impl Error {
    fn advice(&self) -> Option<&'static str> {
        match self {
            Self::Core(e) | Self::Pdf(PdfError::Core(e)) => core_advice(e),
            Self::Pdf(e) => e.advice(),
            Self::Html(_) | Self::Output { .. } => None,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Core(_) => "md2lab::input",
            Self::Html(_) => "md2lab::assemble",
            Self::Pdf(_) => "md2lab::pdf",
            Self::Output { .. } => "md2lab::output",
        }
    }
}

impl Diagnostic for Error {
    fn code<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        Some(Box::new(self.kind()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        self.advice()
            .map(|advice| Box::new(advice) as Box<dyn Display + 'a>)
    }
}

/// Prints `e` as a diagnostic and exits with status 1.
pub fn display(e: Error) -> ! {
    eprintln!("{:?}", miette::Report::new(e));
    exit(1);
}
