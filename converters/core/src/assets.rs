//! Optional files that dress up the output.

use std::path::{Path, PathBuf};

/// Paths to the logo, the body font and the stylesheet override.
///
/// None of them has to exist: a missing logo skips page decoration, a missing
/// font falls back to the stylesheet's font stack and a missing override is
/// simply not applied.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Assets {
    logo: PathBuf,
    font: PathBuf,
    custom_css: PathBuf,
}

impl Assets {
    /// Default locations under `source_dir`: `assets/logo.png`,
    /// `assets/font.ttf` and `custom.css`.
    #[must_use]
    pub fn for_source_dir(source_dir: &Path) -> Self {
        Self {
            logo: source_dir.join("assets").join("logo.png"),
            font: source_dir.join("assets").join("font.ttf"),
            custom_css: source_dir.join("custom.css"),
        }
    }

    /// Overrides the logo path.
    #[must_use]
    pub fn with_logo(mut self, logo: impl Into<PathBuf>) -> Self {
        self.logo = logo.into();
        self
    }

    /// Overrides the font path.
    #[must_use]
    pub fn with_font(mut self, font: impl Into<PathBuf>) -> Self {
        self.font = font.into();
        self
    }

    /// The PNG logo drawn in the page header.
    #[must_use]
    pub fn logo(&self) -> &Path {
        &self.logo
    }

    /// The TrueType font embedded with `@font-face`.
    #[must_use]
    pub fn font(&self) -> &Path {
        &self.font
    }

    /// The stylesheet appended after the default one.
    #[must_use]
    pub fn custom_css(&self) -> &Path {
        &self.custom_css
    }
}
