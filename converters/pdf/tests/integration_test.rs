#![allow(clippy::unwrap_used)]

use std::cell::RefCell;

use lopdf::Document;
use md2lab_converters_core::{
    Assets, CourseMetadata, Datestamp, GeneratorMetadata, Options, TitlePolicy,
};
use md2lab_converters_dev::{
    fixture::LabFixture,
    pdf::{letter_pdf, png_logo},
};
use md2lab_converters_pdf::{Error, PageGeometry, PdfDocument, Processor, Rasterizer};
use pretty_assertions::assert_eq;

/// Returns a blank document and remembers what it was asked to print.
struct FakeRasterizer {
    pages: u32,
    seen: RefCell<Vec<(String, PageGeometry)>>,
}

impl FakeRasterizer {
    fn new(pages: u32) -> Self {
        Self {
            pages,
            seen: RefCell::new(Vec::new()),
        }
    }
}

impl Rasterizer for FakeRasterizer {
    fn rasterize(&self, html: &str, geometry: &PageGeometry) -> Result<Vec<u8>, Error> {
        self.seen.borrow_mut().push((html.to_string(), *geometry));
        Ok(letter_pdf(self.pages).unwrap())
    }
}

fn processor(fixture: &LabFixture, policy: TitlePolicy) -> Processor {
    let options = Options::builder()
        .generator_metadata(GeneratorMetadata::new("md2lab", "0.1.0"))
        .title_policy(policy)
        .build();
    Processor::new(options, Assets::for_source_dir(fixture.path()))
}

fn page_content(bytes: &[u8], page: u32) -> Vec<u8> {
    let doc = Document::load_mem(bytes).unwrap();
    let page_id = *doc.get_pages().get(&page).unwrap();
    doc.get_page_content(page_id).unwrap()
}

fn page_text(bytes: &[u8], page: u32) -> String {
    String::from_utf8_lossy(&page_content(bytes, page)).into_owned()
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

#[test]
fn test_decorates_every_page() {
    let fixture = LabFixture::widgets().unwrap();
    fixture
        .bytes("assets/logo.png", &png_logo(200, 60).unwrap())
        .unwrap();
    let metadata = CourseMetadata::open(fixture.path()).unwrap();
    let rasterizer = FakeRasterizer::new(3);

    let bytes = processor(&fixture, TitlePolicy::Wrap)
        .convert(
            "<html><body>guide</body></html>",
            &rasterizer,
            &metadata,
            &Datestamp::parse("2025-01-05").unwrap(),
        )
        .unwrap();

    let seen = rasterizer.seen.borrow();
    let (html, geometry) = seen.first().unwrap();
    assert_eq!(html, "<html><body>guide</body></html>");
    assert_eq!(*geometry, PageGeometry::letter());

    for page in 1..=3 {
        let text = page_text(&bytes, page);
        assert!(text.contains("(Intro to Widgets) Tj"), "page {page}: {text}");
        assert!(text.contains(&format!("({page}) Tj")), "page {page}: {text}");
        assert!(text.contains("Do"));
    }

    let document = PdfDocument::load(&bytes).unwrap();
    assert_eq!(document.info_entry("Title").as_deref(), Some("Intro to Widgets"));
    assert_eq!(document.info_entry("Author").as_deref(), Some("Splunk EDU"));
    assert_eq!(document.info_entry("Creator").as_deref(), Some("md2lab v0.1.0"));
    assert_eq!(
        document.info_entry("ModDate").as_deref(),
        Some("D:20250105000000Z")
    );
}

#[test]
#[tracing_test::traced_test]
fn test_missing_logo_keeps_printed_document() {
    let fixture = LabFixture::widgets().unwrap();
    let metadata = CourseMetadata::open(fixture.path()).unwrap();

    let bytes = processor(&fixture, TitlePolicy::Wrap)
        .convert(
            "<p>x</p>",
            &FakeRasterizer::new(2),
            &metadata,
            &Datestamp::parse("2025-01-05").unwrap(),
        )
        .unwrap();

    assert_eq!(bytes, letter_pdf(2).unwrap());
    assert!(logs_contain("logo not found"));
}

#[test]
fn test_long_title_truncated_to_one_line() {
    let fixture = LabFixture::new().unwrap();
    fixture
        .metadata(
            "course_title: Advanced Searching and Reporting with Widgets, Gadgets and Gizmos for Administrators\ncourse_id: 7\n",
        )
        .unwrap();
    fixture
        .bytes("assets/logo.png", &png_logo(8, 8).unwrap())
        .unwrap();
    let metadata = CourseMetadata::open(fixture.path()).unwrap();

    let bytes = processor(&fixture, TitlePolicy::Truncate)
        .convert(
            "<p>x</p>",
            &FakeRasterizer::new(1),
            &metadata,
            &Datestamp::parse("2025-01-05").unwrap(),
        )
        .unwrap();

    let content = page_content(&bytes, 1);
    assert!(contains(&content, b"\x85) Tj") || contains(&content, b"\\205) Tj"));
    assert!(!contains(&content, b"Administrators"));
}
