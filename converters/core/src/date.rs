//! The run's datestamp.

use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate, Utc};

use crate::Error;

const ISO_FORMAT: &str = "%Y-%m-%d";

/// The date a conversion run is stamped with.
///
/// Resolved once per run and shared read-only by every rendering variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Datestamp(NaiveDate);

impl Datestamp {
    /// Today's date in UTC.
    #[must_use]
    pub fn today() -> Self {
        Self(Utc::now().date_naive())
    }

    /// Parses a `YYYY-MM-DD` date.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDate`] if `input` is not a valid calendar date
    /// in that format.
    pub fn parse(input: &str) -> Result<Self, Error> {
        NaiveDate::parse_from_str(input.trim(), ISO_FORMAT)
            .map(Self)
            .map_err(|source| Error::InvalidDate {
                input: input.to_string(),
                source,
            })
    }

    /// Uses `input` when given, today otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDate`] if `input` is present but unparseable.
    pub fn resolve(input: Option<&str>) -> Result<Self, Error> {
        input.map_or_else(|| Ok(Self::today()), Self::parse)
    }

    /// The underlying calendar date.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// The year, used in the copyright footer.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// `2025-01-05`
    #[must_use]
    pub fn iso(&self) -> String {
        self.0.format(ISO_FORMAT).to_string()
    }

    /// `January 5, 2025`
    #[must_use]
    pub fn long(&self) -> String {
        self.0.format("%B %-d, %Y").to_string()
    }
}

impl From<NaiveDate> for Datestamp {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl FromStr for Datestamp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Datestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.iso())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_format() {
        let stamp = Datestamp::parse("2025-01-05").unwrap();
        assert_eq!(stamp.iso(), "2025-01-05");
        assert_eq!(stamp.long(), "January 5, 2025");
        assert_eq!(stamp.year(), 2025);
        assert_eq!(stamp.to_string(), "2025-01-05");
    }

    #[rstest::rstest]
    #[case("2025-13-01")]
    #[case("2025-02-30")]
    #[case("05/01/2025")]
    #[case("yesterday")]
    #[case("")]
    fn test_invalid_dates(#[case] input: &str) {
        assert!(matches!(
            Datestamp::parse(input),
            Err(Error::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_resolve() {
        assert_eq!(
            Datestamp::resolve(Some("2024-12-31")).unwrap().iso(),
            "2024-12-31"
        );
        assert!(Datestamp::resolve(None).is_ok());
        assert!(Datestamp::resolve(Some("nope")).is_err());
    }
}
