//! Assembles a lab guide's ordered Markdown files into one HTML document.
//!
//! For each file, in order, the [`Processor`]:
//!
//! 1. inserts the datestamp caption after the guide's first `# ` heading
//!    (once per variant, tracked by [`AssemblyContext`]),
//! 2. strips `answers` blocks line by line when the variant excludes them,
//! 3. inlines local images as `data:` URIs,
//! 4. renders the Markdown with the container extension configured for the
//!    variant,
//! 5. wraps the result in a `<section>` named after the file.
//!
//! Sections are separated by page breaks and wrapped in a shell carrying the
//! stylesheet built by [`stylesheet::build`].

use std::path::Path;

use md2lab_converters_core::{Assets, Datestamp, Options, RenderVariant, SourceSet};
use md2lab_parser::{BlockContainers, answers::strip_answers_blocks};

mod datestamp;
mod document;
mod error;
pub mod image;
pub mod stylesheet;

pub use datestamp::{AssemblyContext, caption, insert_datestamp};
pub use document::{AssembledDocument, PAGE_BREAK, Section};
pub use error::Error;

#[derive(Clone, Debug)]
pub struct Processor {
    options: Options,
    assets: Assets,
}

impl Processor {
    #[must_use]
    pub fn new(options: Options, assets: Assets) -> Self {
        Self { options, assets }
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    #[must_use]
    pub fn assets(&self) -> &Assets {
        &self.assets
    }

    /// Assembles every file of `sources` for one variant.
    ///
    /// # Errors
    ///
    /// Fails if a source file or an existing asset cannot be read.
    #[tracing::instrument(skip_all, fields(variant = %variant))]
    pub fn assemble(
        &self,
        sources: &SourceSet,
        variant: &RenderVariant,
        datestamp: &Datestamp,
        title: &str,
    ) -> Result<AssembledDocument, Error> {
        if sources.is_empty() {
            return Err(Error::NoSources);
        }

        let mut context = AssemblyContext::new();
        let containers = BlockContainers::register(variant.container_options());
        let mut sections = Vec::with_capacity(sources.len());

        for path in sources.files() {
            let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
            let html = self.render_file(path, &content, &containers, datestamp, &mut context);
            let file = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
            sections.push(Section { file, html });
        }

        let css = stylesheet::build(&self.assets, self.options.validate_css())?;
        Ok(AssembledDocument::new(
            title,
            &self.options.generator_metadata().to_string(),
            css,
            sections,
        ))
    }

    /// Runs the per-file steps on already read `content`.
    #[must_use]
    pub fn render_file(
        &self,
        path: &Path,
        content: &str,
        containers: &BlockContainers,
        datestamp: &Datestamp,
        context: &mut AssemblyContext,
    ) -> String {
        tracing::debug!(file = %path.display(), "processing file");
        let mut markdown = insert_datestamp(content, datestamp, context);
        if !containers.options().include_answers() {
            markdown = strip_answers_blocks(&markdown);
        }
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        let markdown = image::embed_local_images(&markdown, base_dir);
        containers.to_html(&markdown)
    }
}
