use std::{
    io::Write,
    path::{Path, PathBuf},
    time::Instant,
};

use clap::Parser;
use md2lab_converters_core::{
    Assets, Backend, CourseMetadata, Datestamp, GeneratorMetadata, Options, PrettyDuration,
    RenderVariant, SourceSet, TitlePolicy,
};
use md2lab_converters_pdf::{ChromeRasterizer, Rasterizer};

use crate::error::Error;

/// Subdirectory used instead of the given source when present.
pub const LAB_GUIDES_DIR: &str = "lab-guides";

/// Convert a directory of Markdown lab guides to PDF, with and without answers
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[allow(clippy::struct_excessive_bools)] // CLI flags are naturally booleans
pub struct Args {
    /// Directory holding the guide's Markdown files and metadata.yaml
    #[arg(default_value = ".")]
    pub source: PathBuf,

    /// Print the assembled HTML of every variant to stdout instead of writing PDFs
    #[arg(long)]
    pub html: bool,

    /// Date shown in the guide and recorded in the metadata (YYYY-MM-DD, default today)
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date: Option<String>,

    /// Logo drawn in the page header (default: <SOURCE>/assets/logo.png)
    #[arg(long, value_name = "PATH")]
    pub logo: Option<PathBuf>,

    /// TrueType font embedded in the stylesheet (default: <SOURCE>/assets/font.ttf)
    #[arg(long, value_name = "PATH")]
    pub font: Option<PathBuf>,

    /// Chrome or Chromium executable used to print PDFs
    #[arg(long, value_name = "PATH", conflicts_with = "html")]
    pub chrome: Option<PathBuf>,

    /// Report problems found in custom.css
    #[arg(long)]
    pub validate_css: bool,

    /// How the course title is fitted into the footer
    #[arg(long, value_parser = clap::value_parser!(TitlePolicy), default_value = "wrap")]
    pub title_policy: TitlePolicy,

    /// Show timing information
    #[arg(long)]
    pub timings: bool,
}

impl Args {
    #[must_use]
    pub fn job(&self) -> Job {
        let options = Options::builder()
            .generator_metadata(GeneratorMetadata::new(
                env!("CARGO_PKG_NAME").trim_end_matches("-cli"),
                env!("CARGO_PKG_VERSION"),
            ))
            .backend(if self.html { Backend::Html } else { Backend::Pdf })
            .validate_css(self.validate_css)
            .title_policy(self.title_policy)
            .timings(self.timings)
            .build();
        Job {
            source: self.source.clone(),
            date: self.date.clone(),
            logo: self.logo.clone(),
            font: self.font.clone(),
            options,
        }
    }
}

/// Everything one conversion run needs, independent of the command line.
#[derive(Debug, Clone)]
pub struct Job {
    pub source: PathBuf,
    pub date: Option<String>,
    pub logo: Option<PathBuf>,
    pub font: Option<PathBuf>,
    pub options: Options,
}

/// Where each variant goes.
pub enum Target<'a> {
    /// Pretty HTML written to a stream.
    Html(&'a mut dyn Write),
    /// PDF files printed by a rasterizer, written next to the sources.
    Pdf(&'a dyn Rasterizer),
}

/// Runs the command line.
///
/// # Errors
///
/// Any fatal error of [`execute`], or no browser being found for PDF output.
/// Input errors are reported before the browser is looked up.
pub fn run(args: &Args) -> Result<(), Error> {
    let job = args.job();
    let inputs = Inputs::prepare(&job)?;
    match job.options.backend() {
        Backend::Html => {
            let mut stdout = std::io::stdout().lock();
            inputs.render(&job, Target::Html(&mut stdout))?;
        }
        Backend::Pdf => {
            let chrome = ChromeRasterizer::locate(args.chrome.as_deref())?;
            inputs.render(&job, Target::Pdf(&chrome))?;
        }
    }
    Ok(())
}

/// The directory files are read from: `source/lab-guides` when it exists.
///
/// # Errors
///
/// Fails when `source` is not a directory.
pub fn resolve_source_dir(source: &Path) -> Result<PathBuf, Error> {
    if !source.is_dir() {
        return Err(md2lab_converters_core::Error::InvalidSourceDir(source.to_path_buf()).into());
    }
    let nested = source.join(LAB_GUIDES_DIR);
    if nested.is_dir() {
        tracing::debug!(dir = %nested.display(), "using lab-guides directory");
        Ok(nested)
    } else {
        Ok(source.to_path_buf())
    }
}

/// Renders every planned variant of the guide in `job.source`.
///
/// Inputs are validated before anything is written. Variants run in order;
/// when one fails, files written for earlier variants stay on disk. After
/// the last variant the metadata's `updated` date is rewritten.
///
/// Returns the PDF files written, in variant order (none for HTML).
///
/// # Errors
///
/// Fails on invalid inputs, unreadable sources, rasterizer failures and
/// unwritable outputs.
#[tracing::instrument(skip_all, fields(source = %job.source.display()))]
pub fn execute(job: &Job, target: Target<'_>) -> Result<Vec<PathBuf>, Error> {
    Inputs::prepare(job)?.render(job, target)
}

/// A job's validated inputs.
#[derive(Debug)]
pub struct Inputs {
    dir: PathBuf,
    datestamp: Datestamp,
    metadata: CourseMetadata,
    sources: SourceSet,
    variants: Vec<RenderVariant>,
}

impl Inputs {
    /// Resolves the source directory and date, validates the metadata and
    /// plans the variants. Nothing is written.
    ///
    /// # Errors
    ///
    /// Fails on any input error.
    pub fn prepare(job: &Job) -> Result<Self, Error> {
        let dir = resolve_source_dir(&job.source)?;
        let datestamp = Datestamp::resolve(job.date.as_deref())?;
        let metadata = CourseMetadata::open(&dir)?;
        metadata.validate()?;
        let sources = SourceSet::discover(&dir)?;
        let variants = RenderVariant::plan(sources.read_all()?);
        tracing::info!(
            files = sources.len(),
            variants = variants.len(),
            date = %datestamp,
            "converting lab guide"
        );
        Ok(Self {
            dir,
            datestamp,
            metadata,
            sources,
            variants,
        })
    }

    /// Renders every planned variant to `target`, then records the date in
    /// the metadata.
    ///
    /// # Errors
    ///
    /// Fails on unreadable sources, rasterizer failures and unwritable
    /// outputs.
    pub fn render(mut self, job: &Job, mut target: Target<'_>) -> Result<Vec<PathBuf>, Error> {
        let written = self.render_variants(job, &mut target)?;
        self.metadata.update_date(&self.datestamp)?;
        Ok(written)
    }

    fn render_variants(&self, job: &Job, target: &mut Target<'_>) -> Result<Vec<PathBuf>, Error> {
        let Self {
            dir,
            datestamp,
            metadata,
            sources,
            variants,
        } = self;
        let mut assets = Assets::for_source_dir(dir);
        if let Some(logo) = &job.logo {
            assets = assets.with_logo(logo);
        }
        if let Some(font) = &job.font {
            assets = assets.with_font(font);
        }
        let assembler = md2lab_converters_html::Processor::new(job.options.clone(), assets.clone());
        let printer = md2lab_converters_pdf::Processor::new(job.options.clone(), assets);
        let title = metadata.course_title()?.to_string();

        let mut written = Vec::new();
        for variant in variants {
            let now = Instant::now();
            let document = assembler.assemble(sources, variant, datestamp, &title)?;
            if job.options.timings() {
                eprintln!("  Assembled {variant} in {}", now.elapsed().pretty_print());
            }

            match target {
                Target::Html(out) => {
                    let path = PathBuf::from("<stdout>");
                    out.write_all(document.to_pretty_html().as_bytes())
                        .and_then(|()| out.flush())
                        .map_err(|source| Error::Output { path, source })?;
                }
                Target::Pdf(rasterizer) => {
                    let pdf = printer.convert(&document.to_html(), *rasterizer, metadata, datestamp)?;
                    let path = dir.join(variant.output_file_name(metadata)?);
                    std::fs::write(&path, pdf).map_err(|source| Error::Output {
                        path: path.clone(),
                        source,
                    })?;
                    tracing::info!(path = %path.display(), "generated {variant}");
                    written.push(path);
                }
            }
        }

        Ok(written)
    }
}
