//! PDF output for md2lab.
//!
//! An assembled HTML document goes through three steps:
//!
//! 1. a [`Rasterizer`] prints it to PDF with the [`PageGeometry`] print rules
//!    ([`ChromeRasterizer`] drives a headless Chrome),
//! 2. the pages are loaded into a [`PdfDocument`] and [`decorate`]d with the
//!    logo, header rule, copyright, fitted course title and page number,
//! 3. the document information dictionary is filled in from the course
//!    metadata.
//!
//! When the logo file is missing, steps 2 and 3 are skipped and the printed
//! document is returned as is.

use std::time::Instant;

use md2lab_converters_core::{Assets, CourseMetadata, Datestamp, Options, PrettyDuration};

pub mod canvas;
pub mod decorator;
mod error;
pub mod fit;
mod geometry;
pub mod info;
pub mod metrics;
mod rasterizer;

pub use canvas::{PageCanvas, PdfDocument};
pub use decorator::{Decoration, decorate};
pub use error::Error;
pub use geometry::{Margins, PageGeometry};
pub use info::DocumentInfo;
pub use rasterizer::{CHROME_ENV, ChromeRasterizer, Rasterizer, with_print_css};

#[derive(Clone, Debug)]
pub struct Processor {
    options: Options,
    assets: Assets,
    geometry: PageGeometry,
}

impl Processor {
    #[must_use]
    pub fn new(options: Options, assets: Assets) -> Self {
        Self {
            options,
            assets,
            geometry: PageGeometry::letter(),
        }
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    #[must_use]
    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Rasterizes `html` and decorates every page.
    ///
    /// # Errors
    ///
    /// Fails when rasterizing fails, the printed PDF cannot be edited, the
    /// logo cannot be decoded, or the course title is missing.
    #[tracing::instrument(skip_all)]
    pub fn convert<R: Rasterizer + ?Sized>(
        &self,
        html: &str,
        rasterizer: &R,
        metadata: &CourseMetadata,
        datestamp: &Datestamp,
    ) -> Result<Vec<u8>, Error> {
        let now = Instant::now();
        let printed = rasterizer.rasterize(html, &self.geometry)?;
        if self.options.timings() {
            eprintln!("  Rasterized in {}", now.elapsed().pretty_print());
        }

        let logo_path = self.assets.logo();
        if !logo_path.is_file() {
            tracing::warn!(logo = %logo_path.display(), "logo not found, skipping page decoration");
            return Ok(printed);
        }
        let logo = image::open(logo_path).map_err(|source| Error::Logo {
            path: logo_path.to_path_buf(),
            source,
        })?;

        let now = Instant::now();
        let title = metadata.course_title()?;
        let mut document = PdfDocument::load(&printed)?;
        decorate(
            &mut document,
            &Decoration {
                logo: &logo,
                title,
                year: datestamp.year(),
                policy: self.options.title_policy(),
            },
        )?;
        document.set_info(&DocumentInfo::for_course(
            metadata,
            self.options.generator_metadata(),
            datestamp,
        )?)?;
        let bytes = document.save()?;
        if self.options.timings() {
            eprintln!("  Decorated in {}", now.elapsed().pretty_print());
        }
        Ok(bytes)
    }
}
