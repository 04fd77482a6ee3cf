//! Container block kinds recognised in lab-guide Markdown.

use std::fmt::Display;
use std::str::FromStr;

use crate::Error;

/// The kind of a `:::` container block.
///
/// Kinds are tried in declaration order when an opening line is validated,
/// so the first kind whose name prefixes the parameters wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Caution,
    Danger,
    Hint,
    Info,
    Note,
    Tip,
    Warning,
    Scenario,
    Custom,
    Answers,
}

impl BlockKind {
    /// Every kind, in registration order.
    pub const ALL: [BlockKind; 10] = [
        BlockKind::Caution,
        BlockKind::Danger,
        BlockKind::Hint,
        BlockKind::Info,
        BlockKind::Note,
        BlockKind::Tip,
        BlockKind::Warning,
        BlockKind::Scenario,
        BlockKind::Custom,
        BlockKind::Answers,
    ];

    /// The literal name used after the marker run.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            BlockKind::Caution => "caution",
            BlockKind::Danger => "danger",
            BlockKind::Hint => "hint",
            BlockKind::Info => "info",
            BlockKind::Note => "note",
            BlockKind::Tip => "tip",
            BlockKind::Warning => "warning",
            BlockKind::Scenario => "scenario",
            BlockKind::Custom => "custom",
            BlockKind::Answers => "answers",
        }
    }

    /// Default title shown in the admonition header: the name, capitalised.
    #[must_use]
    pub fn default_title(self) -> String {
        let name = self.name();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Accepts the parameters of an opening line iff, once trimmed, they start
    /// with this kind's name.
    #[must_use]
    pub fn validate(self, params: &str) -> bool {
        params.trim().starts_with(self.name())
    }

    /// Finds the first kind (in registration order) accepting `params`.
    #[must_use]
    pub fn recognize(params: &str) -> Option<BlockKind> {
        Self::ALL.into_iter().find(|kind| kind.validate(params))
    }
}

impl Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for BlockKind {
    type Err = Error;

    fn from_str(kind: &str) -> Result<Self, Self::Err> {
        let lowered = kind.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.name() == lowered)
            .ok_or_else(|| Error::UnknownBlockKind(kind.to_string()))
    }
}
