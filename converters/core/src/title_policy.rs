//! How the footer fits a course title that is too wide.

use std::str::FromStr;

/// Footer title fitting policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TitlePolicy {
    /// Greedy word wrap onto at most two lines, the last ending in an
    /// ellipsis when the title still overflows.
    #[default]
    Wrap,
    /// A single line, cut short with an ellipsis.
    Truncate,
}

impl FromStr for TitlePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "wrap" => Ok(Self::Wrap),
            "truncate" => Ok(Self::Truncate),
            _ => Err(format!(
                "invalid title policy: '{s}', expected: wrap, truncate"
            )),
        }
    }
}

impl std::fmt::Display for TitlePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Wrap => write!(f, "wrap"),
            Self::Truncate => write!(f, "truncate"),
        }
    }
}
