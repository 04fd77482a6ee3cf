//! Rendering variants: one pass per answers setting.

use md2lab_parser::{ContainerOptions, answers::has_answers_block};

use crate::{CourseMetadata, Error, slugify};

/// One rendering pass over the guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct RenderVariant {
    include_answers: bool,
    file_suffix: &'static str,
    label: &'static str,
}

impl RenderVariant {
    /// The variant every run produces.
    pub const WITHOUT_ANSWERS: Self = Self {
        include_answers: false,
        file_suffix: "",
        label: "without answers",
    };

    /// The variant produced when any source has an answers block.
    pub const WITH_ANSWERS: Self = Self {
        include_answers: true,
        file_suffix: "-answers",
        label: "with answers",
    };

    /// Plans the variants for a guide whose raw file contents are `contents`:
    /// always [`Self::WITHOUT_ANSWERS`], then [`Self::WITH_ANSWERS`] if any
    /// file contains an answers block.
    #[must_use]
    pub fn plan<I, S>(contents: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let has_answers = contents
            .into_iter()
            .any(|content| has_answers_block(content.as_ref()));
        tracing::debug!(has_answers, "planning rendering variants");
        if has_answers {
            vec![Self::WITHOUT_ANSWERS, Self::WITH_ANSWERS]
        } else {
            vec![Self::WITHOUT_ANSWERS]
        }
    }

    /// Whether answers blocks are rendered.
    #[must_use]
    pub fn include_answers(&self) -> bool {
        self.include_answers
    }

    /// Appended to the output file stem.
    #[must_use]
    pub fn file_suffix(&self) -> &'static str {
        self.file_suffix
    }

    /// Human-readable name for logs.
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Container options configured for this variant.
    #[must_use]
    pub fn container_options(&self) -> ContainerOptions {
        ContainerOptions::new(self.include_answers)
    }

    /// `{course_id}-{slug}[-{version}]-lab-guide{suffix}.pdf`
    ///
    /// # Errors
    ///
    /// Fails if the metadata lacks `course_id` or `course_title`.
    pub fn output_file_name(&self, metadata: &CourseMetadata) -> Result<String, Error> {
        let course_id = metadata.course_id()?;
        let slug = slugify(metadata.course_title()?);
        let version = metadata
            .version()
            .map(|version| format!("-{version}"))
            .unwrap_or_default();
        Ok(format!(
            "{course_id}-{slug}{version}-lab-guide{}.pdf",
            self.file_suffix
        ))
    }
}

impl std::fmt::Display for RenderVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use super::*;

    fn metadata(dir: &Path, yaml: &str) -> CourseMetadata {
        let path = dir.join("metadata.yaml");
        std::fs::write(&path, yaml).unwrap();
        CourseMetadata::load(&path).unwrap()
    }

    #[test]
    fn test_single_variant_without_answers() {
        let plan = RenderVariant::plan(["# Intro\n", "::: note\nx\n:::\n"]);
        assert_eq!(plan, vec![RenderVariant::WITHOUT_ANSWERS]);
    }

    #[test]
    fn test_two_variants_with_answers() {
        let plan = RenderVariant::plan(["# Intro\n", "::: answers\n42\n:::\n"]);
        assert_eq!(
            plan,
            vec![RenderVariant::WITHOUT_ANSWERS, RenderVariant::WITH_ANSWERS]
        );
        assert!(!plan.first().unwrap().include_answers());
        assert!(plan.get(1).unwrap().container_options().include_answers());
    }

    #[test]
    fn test_output_file_names() {
        let dir = tempfile::tempdir().unwrap();
        let meta = metadata(
            dir.path(),
            "course_title: \"Intro to Widgets\"\ncourse_id: 42\n",
        );
        assert_eq!(
            RenderVariant::WITHOUT_ANSWERS.output_file_name(&meta).unwrap(),
            "0042-intro-to-widgets-lab-guide.pdf"
        );
        assert_eq!(
            RenderVariant::WITH_ANSWERS.output_file_name(&meta).unwrap(),
            "0042-intro-to-widgets-lab-guide-answers.pdf"
        );
    }

    #[test]
    fn test_output_file_name_with_version() {
        let dir = tempfile::tempdir().unwrap();
        let meta = metadata(
            dir.path(),
            "course_title: Admin\ncourse_id: 1\nversion: \"9.2\"\n",
        );
        assert_eq!(
            RenderVariant::WITH_ANSWERS.output_file_name(&meta).unwrap(),
            "0001-admin-9.2-lab-guide-answers.pdf"
        );
    }

    #[test]
    fn test_output_file_name_requires_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let meta = metadata(dir.path(), "course_title: Admin\n");
        assert!(matches!(
            RenderVariant::WITHOUT_ANSWERS.output_file_name(&meta),
            Err(Error::MissingMetadataField {
                field: "course_id",
                ..
            })
        ));
    }
}
