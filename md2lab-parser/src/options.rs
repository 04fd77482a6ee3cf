/// Per-variant configuration for the container extension.
///
/// Passed explicitly into [`crate::BlockContainers::register`] so no render
/// step captures variant state from elsewhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct ContainerOptions {
    include_answers: bool,
}

impl ContainerOptions {
    #[must_use]
    pub fn new(include_answers: bool) -> Self {
        Self { include_answers }
    }

    /// Options for the variant that keeps `answers` blocks.
    #[must_use]
    pub fn with_answers() -> Self {
        Self::new(true)
    }

    /// Options for the variant that drops `answers` blocks.
    #[must_use]
    pub fn without_answers() -> Self {
        Self::new(false)
    }

    #[must_use]
    pub fn include_answers(&self) -> bool {
        self.include_answers
    }
}
