//! Temporary lab guide source directories.

use std::{
    io,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

/// Metadata used by [`LabFixture::widgets`].
pub const WIDGETS_METADATA: &str = "course_title: \"Intro to Widgets\"\ncourse_id: 42\n";

/// Answer text placed inside the `answers` block of [`LabFixture::widgets`].
pub const WIDGETS_ANSWER: &str = "The widget spins clockwise.";

/// A lab guide source directory that is removed when dropped.
#[derive(Debug)]
pub struct LabFixture {
    dir: TempDir,
}

impl LabFixture {
    /// Creates an empty source directory.
    ///
    /// # Errors
    ///
    /// Fails if the temporary directory cannot be created.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    /// The standard three-file guide: `introduction.md` with one H1,
    /// `01-lab.md` with an `answers` block and `resources.md`, for course
    /// `Intro to Widgets` (id 42).
    ///
    /// # Errors
    ///
    /// Fails if any file cannot be written.
    pub fn widgets() -> io::Result<Self> {
        let fixture = Self::new()?;
        fixture.file(
            "introduction.md",
            "# Intro to Widgets\n\nWelcome to the widgets lab.\n",
        )?;
        fixture.file(
            "01-lab.md",
            &format!(
                "# Lab 1: Spinning\n\n1. Spin the widget.\n\n::: answers\n{WIDGETS_ANSWER}\n:::\n\n::: tip\nWidgets like oil.\n:::\n"
            ),
        )?;
        fixture.file("resources.md", "# Resources\n\n- The widget manual\n")?;
        fixture.metadata(WIDGETS_METADATA)?;
        Ok(fixture)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes a text file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Fails if the file or a parent directory cannot be written.
    pub fn file(&self, name: &str, content: &str) -> io::Result<PathBuf> {
        self.bytes(name, content.as_bytes())
    }

    /// Writes a binary file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Fails if the file or a parent directory cannot be written.
    pub fn bytes(&self, name: &str, content: &[u8]) -> io::Result<PathBuf> {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// Writes `metadata.yaml`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be written.
    pub fn metadata(&self, yaml: &str) -> io::Result<PathBuf> {
        self.file("metadata.yaml", yaml)
    }

    /// Reads a file back as text.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read.
    pub fn read(&self, name: &str) -> io::Result<String> {
        std::fs::read_to_string(self.dir.path().join(name))
    }
}
