//! PDF document information dictionary.

use lopdf::{Dictionary, Object, StringFormat};
use md2lab_converters_core::{CourseMetadata, Datestamp, GeneratorMetadata};

/// Author recorded on every guide.
pub const AUTHOR: &str = "Splunk EDU";

/// Entries written into the document information dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentInfo {
    pub creator: String,
    pub author: String,
    pub title: String,
    pub subject: String,
    pub created: Option<Datestamp>,
    pub modified: Datestamp,
}

impl DocumentInfo {
    /// Info for a guide generated on `datestamp`. The creation date is the
    /// course's `ga` date when it parses.
    ///
    /// # Errors
    ///
    /// Fails when the course title is missing.
    pub fn for_course(
        metadata: &CourseMetadata,
        generator: &GeneratorMetadata,
        datestamp: &Datestamp,
    ) -> Result<Self, md2lab_converters_core::Error> {
        let title = metadata.course_title()?.to_string();
        let created = metadata.ga().and_then(|ga| match Datestamp::parse(ga) {
            Ok(date) => Some(date),
            Err(e) => {
                tracing::warn!(ga, error = %e, "ignoring unparseable ga date");
                None
            }
        });
        Ok(Self {
            creator: generator.to_string(),
            author: AUTHOR.to_string(),
            subject: title.clone(),
            title,
            created,
            modified: *datestamp,
        })
    }

    pub(crate) fn write_to(&self, dict: &mut Dictionary) {
        dict.set("Creator", text_string(&self.creator));
        dict.set("Author", text_string(&self.author));
        dict.set("Title", text_string(&self.title));
        dict.set("Subject", text_string(&self.subject));
        if let Some(created) = &self.created {
            dict.set("CreationDate", Object::string_literal(pdf_date(created)));
        }
        dict.set("ModDate", Object::string_literal(pdf_date(&self.modified)));
    }
}

/// A PDF text string. ASCII is written as a literal, anything else as
/// UTF-16BE with a byte order mark.
#[must_use]
pub fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::string_literal(text);
    }
    let mut bytes = vec![0xFE, 0xFF];
    bytes.extend(text.encode_utf16().flat_map(u16::to_be_bytes));
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// `D:YYYYMMDDHHmmSSZ` at midnight UTC.
#[must_use]
pub fn pdf_date(date: &Datestamp) -> String {
    date.date().format("D:%Y%m%d000000Z").to_string()
}
