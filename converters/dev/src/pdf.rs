//! Stand-ins for rasterizer output.

use std::{error::Error, io::Cursor};

use image::{ImageFormat, Rgba, RgbaImage};
use lopdf::{Document, Object, Stream, content::Content, dictionary};

/// US Letter in points.
pub const LETTER: (f32, f32) = (612.0, 792.0);

/// A PDF with `pages` empty pages of the given size. The size is set on the
/// page tree root only, so pages inherit their `MediaBox`.
///
/// # Errors
///
/// Fails if the document cannot be serialized.
pub fn blank_pdf(pages: u32, width: f32, height: f32) -> Result<Vec<u8>, Box<dyn Error>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let empty = Content { operations: vec![] }.encode()?;

    let mut kids = Vec::new();
    for _ in 0..pages {
        let content_id = doc.add_object(Stream::new(dictionary! {}, empty.clone()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => i64::from(pages),
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(width),
                Object::Real(height),
            ],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

/// [`blank_pdf`] on US Letter pages.
///
/// # Errors
///
/// Fails if the document cannot be serialized.
pub fn letter_pdf(pages: u32) -> Result<Vec<u8>, Box<dyn Error>> {
    blank_pdf(pages, LETTER.0, LETTER.1)
}

/// A PNG with a translucent magenta fill.
///
/// # Errors
///
/// Fails if the image cannot be encoded.
pub fn png_logo(width: u32, height: u32) -> Result<Vec<u8>, Box<dyn Error>> {
    let image = RgbaImage::from_pixel(width, height, Rgba([226, 0, 130, 200]));
    let mut bytes = Cursor::new(Vec::new());
    image.write_to(&mut bytes, ImageFormat::Png)?;
    Ok(bytes.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_pdf_page_count() -> Result<(), Box<dyn Error>> {
        let doc = Document::load_mem(&letter_pdf(3)?)?;
        assert_eq!(doc.get_pages().len(), 3);
        Ok(())
    }

    #[test]
    fn test_png_logo_decodes() -> Result<(), Box<dyn Error>> {
        let logo = image::load_from_memory(&png_logo(8, 4)?)?;
        assert_eq!((logo.width(), logo.height()), (8, 4));
        Ok(())
    }
}
