//! Discovery and ordering of a lab guide's Markdown files.

use std::{
    path::{Path, PathBuf},
    sync::LazyLock,
};

use regex::Regex;

use crate::Error;

const INTRODUCTION: &str = "introduction.md";
const RESOURCES: &str = "resources.md";

#[allow(clippy::expect_used)]
static LAB_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)-.+\.md$").expect("lab file pattern is valid"));

/// Where a file sorts within the guide.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Rank {
    Introduction,
    Lab(u64, String),
    Resources,
}

fn rank(file_name: &str) -> Option<Rank> {
    let lowered = file_name.to_lowercase();
    if lowered == INTRODUCTION {
        return Some(Rank::Introduction);
    }
    if lowered == RESOURCES {
        return Some(Rank::Resources);
    }
    let number = LAB_FILE
        .captures(file_name)?
        .get(1)?
        .as_str()
        .parse()
        .ok()?;
    Some(Rank::Lab(number, file_name.to_string()))
}

/// The ordered Markdown files of one lab guide.
///
/// `introduction.md` comes first, numbered lab files (`01-setup.md`,
/// `02-search.md`, ...) follow by number and `resources.md` comes last. Other
/// Markdown files are not part of the guide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSet {
    dir: PathBuf,
    files: Vec<PathBuf>,
}

impl SourceSet {
    /// Reads `dir` and orders the Markdown files it contains.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSources`] when no file qualifies, or an I/O error
    /// if the directory cannot be listed.
    #[tracing::instrument]
    pub fn discover(dir: &Path) -> Result<Self, Error> {
        let entries = std::fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::io(dir, e))?;
            if entry.file_type().map_err(|e| Error::io(entry.path(), e))?.is_dir() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        tracing::debug!(count = names.len(), "read directory contents");
        Self::from_names(dir, names)
    }

    /// Orders an explicit list of file names relative to `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSources`] when no name qualifies.
    pub fn from_names<I, S>(dir: &Path, names: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ranked: Vec<(Rank, String)> = names
            .into_iter()
            .filter_map(|name| {
                let name = name.as_ref();
                if !name.ends_with(".md") {
                    return None;
                }
                let rank = rank(name);
                if rank.is_none() {
                    tracing::debug!(name, "skipping unordered Markdown file");
                }
                rank.map(|rank| (rank, name.to_string()))
            })
            .collect();

        if ranked.is_empty() {
            return Err(Error::NoSources(dir.to_path_buf()));
        }
        ranked.sort();

        let files: Vec<PathBuf> = ranked.into_iter().map(|(_, name)| dir.join(name)).collect();
        tracing::info!(
            files = ?files
                .iter()
                .filter_map(|f| f.file_name().and_then(|n| n.to_str()))
                .collect::<Vec<_>>(),
            "ordered markdown files"
        );
        Ok(Self {
            dir: dir.to_path_buf(),
            files,
        })
    }

    /// The directory the files live in.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The files, in guide order.
    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Number of files in the guide.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Always false for a discovered set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Reads every file, in order.
    ///
    /// # Errors
    ///
    /// Fails on the first unreadable file.
    pub fn read_all(&self) -> Result<Vec<String>, Error> {
        self.files
            .iter()
            .map(|path| std::fs::read_to_string(path).map_err(|e| Error::io(path, e)))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn names(set: &SourceSet) -> Vec<&str> {
        set.files()
            .iter()
            .filter_map(|f| f.file_name().and_then(|n| n.to_str()))
            .collect()
    }

    #[test]
    fn test_ordering() {
        let set = SourceSet::from_names(
            Path::new("guide"),
            [
                "resources.md",
                "10-cleanup.md",
                "02-search.md",
                "Introduction.md",
                "01-setup.md",
                "notes.md",
                "metadata.yaml",
                "02-alerts.md",
            ],
        )
        .unwrap();
        assert_eq!(
            names(&set),
            vec![
                "Introduction.md",
                "01-setup.md",
                "02-alerts.md",
                "02-search.md",
                "10-cleanup.md",
                "resources.md",
            ]
        );
        assert_eq!(set.files().first().unwrap(), &Path::new("guide").join("Introduction.md"));
    }

    #[test]
    fn test_labs_only() {
        let set = SourceSet::from_names(Path::new("."), ["2-b.md", "1-a.md"]).unwrap();
        assert_eq!(names(&set), vec!["1-a.md", "2-b.md"]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_no_sources() {
        assert!(matches!(
            SourceSet::from_names(Path::new("."), ["README.txt", "notes.md"]),
            Err(Error::NoSources(_))
        ));
    }

    #[test]
    fn test_discover_reads_directory() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["resources.md", "01-lab.md", "introduction.md", "custom.css"] {
            std::fs::write(dir.path().join(name), "# x\n").unwrap();
        }
        std::fs::create_dir(dir.path().join("03-folder.md")).unwrap();

        let set = SourceSet::discover(dir.path()).unwrap();
        assert_eq!(names(&set), vec!["introduction.md", "01-lab.md", "resources.md"]);
        assert_eq!(set.read_all().unwrap().len(), 3);
    }
}
