//! The course metadata sidecar (`metadata.yaml` / `metadata.yml`).

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_yaml::{Mapping, Value};

use crate::{Datestamp, Error};

const METADATA_EXTENSIONS: [&str; 2] = ["yaml", "yml"];
const COURSE_ID_WIDTH: usize = 4;

#[derive(Debug, Default, Deserialize)]
struct RawMetadata {
    course_title: Option<Value>,
    course_id: Option<Value>,
    version: Option<Value>,
    ga: Option<Value>,
    updated: Option<Value>,
}

/// Course metadata loaded from the sidecar file.
///
/// Only the keys the converter needs are interpreted; everything else in the
/// file is preserved verbatim when [`CourseMetadata::update_date`] rewrites it.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct CourseMetadata {
    path: PathBuf,
    source: String,
    course_title: Option<String>,
    course_id: Option<String>,
    version: Option<String>,
    ga: Option<String>,
    updated: Option<String>,
}

/// Finds the metadata file in `source_dir`, preferring `metadata.yaml`.
///
/// # Errors
///
/// Returns [`Error::MetadataNotFound`] if neither file exists.
pub fn metadata_path(source_dir: &Path) -> Result<PathBuf, Error> {
    METADATA_EXTENSIONS
        .iter()
        .map(|ext| source_dir.join(format!("metadata.{ext}")))
        .find(|path| path.is_file())
        .ok_or_else(|| Error::MetadataNotFound(source_dir.to_path_buf()))
}

fn scalar(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => None,
    }
    .map(|text| text.trim().to_string())
    .filter(|text| !text.is_empty())
}

fn pad_course_id(id: &str) -> String {
    format!("{id:0>COURSE_ID_WIDTH$}")
}

/// The ` # comment` ending a `key: value` line, if any.
fn trailing_comment(line: &str) -> Option<&str> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (_, value) = line.split_once(':')?;
    let offset = line.len() - value.len();
    let mut quote = None;
    let mut previous = ':';
    for (index, c) in value.char_indices() {
        match quote {
            Some(open) if c == open => quote = None,
            Some(_) => {}
            None if c == '\'' || c == '"' => quote = Some(c),
            None if c == '#' && previous.is_whitespace() => {
                let start = value.get(..index).map_or(index, |before| before.trim_end().len());
                return line.get(offset + start..);
            }
            None => {}
        }
        previous = c;
    }
    None
}

/// The key of a top-level `key: value` line, if it is one.
fn top_level_key(line: &str) -> Option<&str> {
    if line.starts_with(char::is_whitespace) || line.starts_with('#') || line.starts_with('-') {
        return None;
    }
    line.split_once(':')
        .map(|(key, _)| key.trim().trim_matches(|c| c == '"' || c == '\''))
}

impl CourseMetadata {
    /// Locates and loads the metadata file in `source_dir`.
    ///
    /// # Errors
    ///
    /// Fails if the file is missing, unreadable or not valid YAML.
    pub fn open(source_dir: &Path) -> Result<Self, Error> {
        Self::load(&metadata_path(source_dir)?)
    }

    /// Loads metadata from `path`.
    ///
    /// # Errors
    ///
    /// Fails if the file is unreadable or not valid YAML.
    #[tracing::instrument]
    pub fn load(path: &Path) -> Result<Self, Error> {
        let source = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let metadata = Self::from_yaml(path, source)?;
        tracing::info!(path = %path.display(), "loading metadata");
        Ok(metadata)
    }

    fn from_yaml(path: &Path, source: String) -> Result<Self, Error> {
        let raw: Option<RawMetadata> =
            serde_yaml::from_str(&source).map_err(|source| Error::Metadata {
                path: path.to_path_buf(),
                source,
            })?;
        let raw = raw.unwrap_or_default();
        Ok(Self {
            path: path.to_path_buf(),
            course_title: scalar(raw.course_title),
            course_id: scalar(raw.course_id).map(|id| pad_course_id(&id)),
            version: scalar(raw.version),
            ga: scalar(raw.ga),
            updated: scalar(raw.updated),
            source,
        })
    }

    /// The file this metadata was loaded from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The course title.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingMetadataField`] if `course_title` is absent.
    pub fn course_title(&self) -> Result<&str, Error> {
        self.course_title
            .as_deref()
            .ok_or_else(|| self.missing("course_title"))
    }

    /// The course id, zero-padded to four digits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingMetadataField`] if `course_id` is absent.
    pub fn course_id(&self) -> Result<&str, Error> {
        self.course_id
            .as_deref()
            .ok_or_else(|| self.missing("course_id"))
    }

    /// The product version, if any.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// The general-availability date, if any.
    #[must_use]
    pub fn ga(&self) -> Option<&str> {
        self.ga.as_deref()
    }

    /// The last update date, if any.
    #[must_use]
    pub fn updated(&self) -> Option<&str> {
        self.updated.as_deref()
    }

    /// Checks that both required keys are present.
    ///
    /// # Errors
    ///
    /// Returns the first missing field.
    pub fn validate(&self) -> Result<(), Error> {
        self.course_title()?;
        self.course_id()?;
        Ok(())
    }

    fn missing(&self, field: &'static str) -> Error {
        Error::MissingMetadataField {
            field,
            path: self.path.clone(),
        }
    }

    /// Rewrites the sidecar with `updated` set to `date` and `course_id`
    /// zero-padded. Every other line is kept as written.
    ///
    /// Files whose layout the line rewrite cannot preserve (flow mappings,
    /// sequences under either key) are re-serialized as plain YAML instead,
    /// which drops their comments.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be written.
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    pub fn update_date(&mut self, date: &Datestamp) -> Result<(), Error> {
        let updated = date.iso();
        let rewritten = self.rewrite(&updated)?;
        std::fs::write(&self.path, &rewritten).map_err(|e| Error::io(&self.path, e))?;
        self.source = rewritten;
        self.updated = Some(updated);
        tracing::info!(updated = %date, "updating metadata");
        Ok(())
    }

    fn rewrite(&self, updated: &str) -> Result<String, Error> {
        let preserved = self.rewrite_lines(updated);
        if self.keeps_content(&preserved, updated) {
            return Ok(preserved);
        }
        tracing::warn!(
            path = %self.path.display(),
            "metadata layout not recognised, rewriting it as plain YAML"
        );
        self.rewrite_document(updated)
    }

    fn rewrite_lines(&self, updated: &str) -> String {
        let mut output = String::with_capacity(self.source.len() + 32);
        let mut wrote_updated = false;
        // Continuation lines of a replaced value are dropped. Blank lines are
        // held back until it is clear whether the value continues past them.
        let mut replacing = false;
        let mut held = String::new();

        for line in self.source.split_inclusive('\n') {
            if replacing {
                if line.trim().is_empty() {
                    held.push_str(line);
                    continue;
                }
                if line.starts_with([' ', '\t']) {
                    held.clear();
                    continue;
                }
                replacing = false;
                output.push_str(&std::mem::take(&mut held));
            }

            let ending = if line.ends_with("\r\n") {
                "\r\n"
            } else if line.ends_with('\n') {
                "\n"
            } else {
                ""
            };
            let comment = trailing_comment(line).unwrap_or_default();
            match top_level_key(line) {
                Some("updated") => {
                    output.push_str(&format!("updated: '{updated}'{comment}{ending}"));
                    wrote_updated = true;
                    replacing = true;
                }
                Some("course_id") => match &self.course_id {
                    Some(id) => {
                        output.push_str(&format!("course_id: '{id}'{comment}{ending}"));
                        replacing = true;
                    }
                    None => output.push_str(line),
                },
                Some(_) | None => output.push_str(line),
            }
        }
        output.push_str(&held);

        if !wrote_updated {
            if !output.is_empty() && !output.ends_with('\n') {
                output.push('\n');
            }
            output.push_str(&format!("updated: '{updated}'\n"));
        }
        output
    }

    /// Whether `rewritten` holds exactly the original keys and values, plus
    /// the new `updated` date and padded `course_id`.
    fn keeps_content(&self, rewritten: &str, updated: &str) -> bool {
        let Ok(Value::Mapping(original)) = serde_yaml::from_str::<Value>(&self.source) else {
            return false;
        };
        let Ok(Value::Mapping(new)) = serde_yaml::from_str::<Value>(rewritten) else {
            return false;
        };

        let replaced = |key: &Value| {
            key.as_str()
                .is_some_and(|key| key == "updated" || (key == "course_id" && self.course_id.is_some()))
        };
        let expected_len = original.len() + usize::from(!original.contains_key("updated"));

        new.len() == expected_len
            && new.get("updated") == Some(&Value::from(updated))
            && self
                .course_id
                .as_ref()
                .is_none_or(|id| new.get("course_id") == Some(&Value::from(id.as_str())))
            && original
                .iter()
                .filter(|(key, _)| !replaced(key))
                .all(|(key, value)| new.get(key) == Some(value))
    }

    fn rewrite_document(&self, updated: &str) -> Result<String, Error> {
        let mut document = if let Ok(Value::Mapping(mapping)) =
            serde_yaml::from_str::<Value>(&self.source)
        {
            mapping
        } else {
            Mapping::new()
        };
        if let Some(id) = &self.course_id {
            document.insert(Value::from("course_id"), Value::from(id.as_str()));
        }
        document.insert(Value::from("updated"), Value::from(updated));
        serde_yaml::to_string(&document).map_err(|source| Error::Metadata {
            path: self.path.clone(),
            source,
        })
    }
}
