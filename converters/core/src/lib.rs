//! Shared inputs and configuration for md2lab converters.
//!
//! Both the HTML assembler and the PDF decorator work from the same resolved
//! inputs:
//!
//! - [`SourceSet`] - the guide's Markdown files, in reading order
//! - [`CourseMetadata`] - the `metadata.yaml` sidecar
//! - [`Datestamp`] - the run date, shared by every variant
//! - [`RenderVariant`] - the with/without answers passes
//! - [`Options`] - converter configuration
//!
//! # Example
//!
//! ```
//! use md2lab_converters_core::{Backend, GeneratorMetadata, Options, TitlePolicy};
//!
//! let options = Options::builder()
//!     .generator_metadata(GeneratorMetadata::new("md2lab", "0.1.0"))
//!     .backend(Backend::Html)
//!     .title_policy(TitlePolicy::Truncate)
//!     .build();
//! assert_eq!(options.backend(), Backend::Html);
//! ```

mod assets;
mod backend;
mod date;
mod error;
mod metadata;
mod slug;
mod sources;
mod title_policy;
mod variant;

pub use assets::Assets;
pub use backend::Backend;
pub use date::Datestamp;
pub use error::Error;
pub use metadata::{CourseMetadata, metadata_path};
pub use slug::slugify;
pub use sources::SourceSet;
pub use title_policy::TitlePolicy;
pub use variant::RenderVariant;

/// Converter options.
///
/// Use [`Options::builder()`] to construct an instance.
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct Options {
    generator_metadata: GeneratorMetadata,
    backend: Backend,
    validate_css: bool,
    title_policy: TitlePolicy,
    timings: bool,
}

impl Options {
    /// Create a new builder with default values.
    #[must_use]
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::default()
    }

    /// Get the generator metadata.
    #[must_use]
    pub fn generator_metadata(&self) -> &GeneratorMetadata {
        &self.generator_metadata
    }

    /// Get the output backend.
    #[must_use]
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Get whether the stylesheet override is linted before use.
    #[must_use]
    pub fn validate_css(&self) -> bool {
        self.validate_css
    }

    /// Get the footer title fitting policy.
    #[must_use]
    pub fn title_policy(&self) -> TitlePolicy {
        self.title_policy
    }

    /// Get whether timing information should be output.
    #[must_use]
    pub fn timings(&self) -> bool {
        self.timings
    }
}

/// Builder for [`Options`].
#[derive(Debug, Default, Clone)]
pub struct OptionsBuilder {
    generator_metadata: GeneratorMetadata,
    backend: Backend,
    validate_css: bool,
    title_policy: TitlePolicy,
    timings: bool,
}

impl OptionsBuilder {
    /// Set the generator metadata (name and version).
    #[must_use]
    pub fn generator_metadata(mut self, meta: GeneratorMetadata) -> Self {
        self.generator_metadata = meta;
        self
    }

    /// Set the output backend.
    #[must_use]
    pub fn backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Enable or disable linting of `custom.css`.
    #[must_use]
    pub fn validate_css(mut self, validate_css: bool) -> Self {
        self.validate_css = validate_css;
        self
    }

    /// Set the footer title fitting policy.
    #[must_use]
    pub fn title_policy(mut self, policy: TitlePolicy) -> Self {
        self.title_policy = policy;
        self
    }

    /// Enable or disable timing output.
    #[must_use]
    pub fn timings(mut self, timings: bool) -> Self {
        self.timings = timings;
        self
    }

    /// Build the [`Options`] instance.
    #[must_use]
    pub fn build(self) -> Options {
        Options {
            generator_metadata: self.generator_metadata,
            backend: self.backend,
            validate_css: self.validate_css,
            title_policy: self.title_policy,
            timings: self.timings,
        }
    }
}

/// Extension trait for formatting [`Duration`](std::time::Duration) in human-readable form.
pub trait PrettyDuration {
    /// Returns the duration in the largest fitting unit (ns, µs, ms, s),
    /// rounded to two decimals with trailing zeros stripped.
    fn pretty_print(&self) -> String;
}

impl PrettyDuration for std::time::Duration {
    fn pretty_print(&self) -> String {
        let nanos = self.as_nanos();

        // f64 holds every integer up to u128::MAX closely enough for display.
        #[allow(clippy::cast_precision_loss)]
        let f_nanos = nanos as f64;
        let (value, unit) = match nanos {
            0..=999 => return format!("{nanos}ns"),
            1_000..=999_999 => (f_nanos / 1_000.0, "µs"),
            1_000_000..=999_999_999 => (f_nanos / 1_000_000.0, "ms"),
            _ => (f_nanos / 1_000_000_000.0, "s"),
        };
        let number = format!("{value:.2}");
        let number = number.trim_end_matches('0').trim_end_matches('.');
        format!("{number}{unit}")
    }
}

/// Generator metadata: which tool produced the output.
///
/// Written into the HTML `generator` meta tag and the PDF `Creator` entry.
#[derive(Debug, Default, Clone)]
#[non_exhaustive]
pub struct GeneratorMetadata {
    name: String,
    version: String,
}

impl GeneratorMetadata {
    /// Create new generator metadata.
    #[must_use]
    pub fn new<S: AsRef<str>>(name: S, version: S) -> Self {
        Self {
            name: name.as_ref().to_string(),
            version: version.as_ref().to_string(),
        }
    }

    /// Get the generator name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the generator version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }
}

impl std::fmt::Display for GeneratorMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} v{}", self.name, self.version)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[rstest::rstest]
    #[case(Duration::from_nanos(450), "450ns")]
    #[case(Duration::from_micros(12), "12µs")]
    #[case(Duration::from_nanos(1_500), "1.5µs")]
    #[case(Duration::from_millis(250), "250ms")]
    #[case(Duration::from_millis(10), "10ms")]
    #[case(Duration::from_millis(1_234), "1.23s")]
    #[case(Duration::from_secs(2), "2s")]
    fn test_pretty_print(#[case] duration: Duration, #[case] expected: &str) {
        assert_eq!(duration.pretty_print(), expected);
    }

    #[test]
    fn test_builder_defaults() {
        let options = Options::builder().build();
        assert_eq!(options.backend(), Backend::Pdf);
        assert_eq!(options.title_policy(), TitlePolicy::Wrap);
        assert!(!options.validate_css());
        assert!(!options.timings());
    }

    #[test]
    fn test_generator_display() {
        assert_eq!(
            GeneratorMetadata::new("md2lab", "0.1.0").to_string(),
            "md2lab v0.1.0"
        );
    }
}
