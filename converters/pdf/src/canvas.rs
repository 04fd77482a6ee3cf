//! Drawing on top of existing PDF pages.

use std::{collections::BTreeMap, io::Write as _};

use flate2::{Compression, write::ZlibEncoder};
use image::DynamicImage;
use lopdf::{
    Dictionary, Document, Object, ObjectId, Stream, StringFormat,
    content::{Content, Operation},
    dictionary,
};

use crate::{Error, info::DocumentInfo, metrics::encode_win_ansi};

/// Resource name of the footer font.
pub const FONT_RESOURCE: &str = "MdlHelv";

/// Guards against cycles in malformed page trees.
const MAX_TREE_DEPTH: usize = 32;

/// Page dimensions in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

/// Destination of an image, in points from the page's lower-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// A text run set in the footer font.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun<'a> {
    pub text: &'a str,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    /// Fill grey level, `0.0` black to `1.0` white.
    pub grey: f32,
}

/// Absolute-coordinate drawing on the pages of a paginated document.
///
/// Pages are addressed by zero-based index.
pub trait PageCanvas {
    /// Handle to an image embedded once and drawn on many pages.
    type Image: Copy;

    fn page_count(&self) -> usize;

    /// Size of page `page`.
    ///
    /// # Errors
    ///
    /// Fails when the page does not exist or has no size.
    fn page_size(&self, page: usize) -> Result<PageSize, Error>;

    /// Embeds `image` in the document.
    ///
    /// # Errors
    ///
    /// Fails when the image cannot be encoded.
    fn embed_image(&mut self, image: &DynamicImage) -> Result<Self::Image, Error>;

    /// # Errors
    ///
    /// Fails when the page does not exist.
    fn draw_image(&mut self, page: usize, image: Self::Image, rect: Rect) -> Result<(), Error>;

    /// # Errors
    ///
    /// Fails when the page does not exist.
    fn draw_line(
        &mut self,
        page: usize,
        from: (f32, f32),
        to: (f32, f32),
        thickness: f32,
        grey: f32,
    ) -> Result<(), Error>;

    /// # Errors
    ///
    /// Fails when the page does not exist.
    fn draw_text(&mut self, page: usize, run: &TextRun<'_>) -> Result<(), Error>;
}

/// Handle returned by [`PdfDocument::embed_image`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbeddedImage {
    index: usize,
}

/// A `lopdf` document with pending overlay drawing.
///
/// Drawing is buffered per page and written out by [`PdfDocument::save`]:
/// the page's existing content is wrapped in `q`/`Q` and the overlay is
/// appended as a new content stream.
#[derive(Debug)]
pub struct PdfDocument {
    doc: Document,
    pages: Vec<ObjectId>,
    overlays: BTreeMap<usize, Vec<Operation>>,
    images: Vec<ObjectId>,
    font: Option<ObjectId>,
}

impl PdfDocument {
    /// Parses a PDF from memory.
    ///
    /// # Errors
    ///
    /// Fails when the bytes are not a readable PDF.
    pub fn load(bytes: &[u8]) -> Result<Self, Error> {
        let doc = Document::load_mem(bytes)?;
        let pages = doc.get_pages().into_values().collect();
        Ok(Self {
            doc,
            pages,
            overlays: BTreeMap::new(),
            images: Vec::new(),
            font: None,
        })
    }

    fn page_id(&self, page: usize) -> Result<ObjectId, Error> {
        self.pages
            .get(page)
            .copied()
            .ok_or(Error::PageNotFound(page))
    }

    fn resolve<'a>(&'a self, object: &'a Object) -> Result<&'a Object, Error> {
        if let Object::Reference(id) = object {
            Ok(self.doc.get_object(*id)?)
        } else {
            Ok(object)
        }
    }

    /// Looks `key` up on the page, then on its ancestors in the page tree.
    fn inherited(&self, page_id: ObjectId, key: &[u8]) -> Result<Option<&Object>, Error> {
        let mut node = self.doc.get_dictionary(page_id)?;
        for _ in 0..MAX_TREE_DEPTH {
            if let Ok(value) = node.get(key) {
                return Ok(Some(self.resolve(value)?));
            }
            let Ok(parent) = node.get(b"Parent").and_then(Object::as_reference) else {
                return Ok(None);
            };
            node = self.doc.get_dictionary(parent)?;
        }
        Ok(None)
    }

    /// Lower-left corner and size of the page's `MediaBox`.
    fn media_box(&self, page: usize) -> Result<((f32, f32), PageSize), Error> {
        let page_id = self.page_id(page)?;
        let Some(Object::Array(corners)) = self.inherited(page_id, b"MediaBox")? else {
            return Err(Error::MissingMediaBox(page));
        };
        let numbers = corners
            .iter()
            .map(|corner| self.resolve(corner).and_then(|n| Ok(n.as_float()?)))
            .collect::<Result<Vec<f32>, Error>>()?;
        let [llx, lly, urx, ury] = numbers.as_slice() else {
            return Err(Error::MissingMediaBox(page));
        };
        Ok((
            (*llx, *lly),
            PageSize {
                width: urx - llx,
                height: ury - lly,
            },
        ))
    }

    fn overlay(&mut self, page: usize) -> Result<&mut Vec<Operation>, Error> {
        self.page_id(page)?;
        Ok(self.overlays.entry(page).or_default())
    }

    fn font_id(&mut self) -> ObjectId {
        if let Some(id) = self.font {
            return id;
        }
        let id = self.doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        self.font = Some(id);
        id
    }

    /// Merges `info` into the document information dictionary.
    ///
    /// # Errors
    ///
    /// Fails when an existing information dictionary cannot be read.
    pub fn set_info(&mut self, info: &DocumentInfo) -> Result<(), Error> {
        let mut dict = match self.doc.trailer.get(b"Info") {
            Ok(existing) => self.resolve(existing)?.as_dict()?.clone(),
            Err(_) => Dictionary::new(),
        };
        info.write_to(&mut dict);
        let id = self.doc.add_object(dict);
        self.doc.trailer.set("Info", id);
        Ok(())
    }

    /// Value of a document information entry, when it is a string.
    #[must_use]
    pub fn info_entry(&self, key: &str) -> Option<String> {
        let info = self.doc.trailer.get(b"Info").ok()?;
        let dict = self.resolve(info).ok()?.as_dict().ok()?;
        if let Object::String(bytes, _) = dict.get(key.as_bytes()).ok()? {
            Some(String::from_utf8_lossy(bytes).into_owned())
        } else {
            None
        }
    }

    /// Writes pending overlays and serializes the document.
    ///
    /// # Errors
    ///
    /// Fails when a page cannot be updated or the document cannot be written.
    pub fn save(mut self) -> Result<Vec<u8>, Error> {
        let overlays = std::mem::take(&mut self.overlays);
        for (page, operations) in overlays {
            self.apply_overlay(page, operations)?;
        }
        let mut bytes = Vec::new();
        self.doc.save_to(&mut bytes)?;
        Ok(bytes)
    }

    fn apply_overlay(&mut self, page: usize, operations: Vec<Operation>) -> Result<(), Error> {
        let page_id = self.page_id(page)?;
        let ((llx, lly), _) = self.media_box(page)?;

        let mut resources =
            if let Some(Object::Dictionary(dict)) = self.inherited(page_id, b"Resources")? {
                dict.clone()
            } else {
                Dictionary::new()
            };
        let mut fonts = self.resource_category(&resources, b"Font")?;
        if let Some(font) = self.font {
            fonts.set(FONT_RESOURCE, font);
        }
        let mut xobjects = self.resource_category(&resources, b"XObject")?;
        for (index, id) in self.images.iter().enumerate() {
            xobjects.set(image_resource(index), *id);
        }
        resources.set("Font", fonts);
        resources.set("XObject", xobjects);

        let mut wrapped = vec![Operation::new("Q", vec![])];
        if llx != 0.0 || lly != 0.0 {
            wrapped.push(Operation::new(
                "cm",
                vec![1.into(), 0.into(), 0.into(), 1.into(), llx.into(), lly.into()],
            ));
        }
        wrapped.extend(operations);
        let save = self.content_stream(vec![Operation::new("q", vec![])])?;
        let overlay = self.content_stream(wrapped)?;

        let mut contents = vec![Object::Reference(save)];
        contents.extend(self.existing_contents(page_id)?);
        contents.push(Object::Reference(overlay));

        let page_dict = self.doc.get_object_mut(page_id)?.as_dict_mut()?;
        page_dict.set("Resources", resources);
        page_dict.set("Contents", contents);
        Ok(())
    }

    fn resource_category(&self, resources: &Dictionary, key: &[u8]) -> Result<Dictionary, Error> {
        match resources.get(key) {
            Ok(entry) => Ok(self.resolve(entry)?.as_dict()?.clone()),
            Err(_) => Ok(Dictionary::new()),
        }
    }

    fn existing_contents(&self, page_id: ObjectId) -> Result<Vec<Object>, Error> {
        let page_dict = self.doc.get_dictionary(page_id)?;
        let Ok(contents) = page_dict.get(b"Contents") else {
            return Ok(Vec::new());
        };
        if let Object::Array(items) = contents {
            return Ok(items.clone());
        }
        if let Object::Reference(id) = contents
            && let Ok(Object::Array(items)) = self.doc.get_object(*id)
        {
            return Ok(items.clone());
        }
        Ok(vec![contents.clone()])
    }

    fn content_stream(&mut self, operations: Vec<Operation>) -> Result<ObjectId, Error> {
        let content = Content { operations }.encode()?;
        Ok(self.doc.add_object(Stream::new(dictionary! {}, content)))
    }
}

impl PageCanvas for PdfDocument {
    type Image = EmbeddedImage;

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_size(&self, page: usize) -> Result<PageSize, Error> {
        self.media_box(page).map(|(_, size)| size)
    }

    fn embed_image(&mut self, image: &DynamicImage) -> Result<EmbeddedImage, Error> {
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        let mut colour = Vec::with_capacity(rgba.as_raw().len() / 4 * 3);
        let mut alpha = Vec::with_capacity(rgba.as_raw().len() / 4);
        for pixel in rgba.pixels() {
            let [r, g, b, a] = pixel.0;
            colour.extend([r, g, b]);
            alpha.push(a);
        }

        let mut dict = image_dictionary(width, height, "DeviceRGB");
        if alpha.iter().any(|&a| a < u8::MAX) {
            let mask = Stream::new(image_dictionary(width, height, "DeviceGray"), deflate(&alpha)?);
            dict.set("SMask", self.doc.add_object(mask));
        }
        let id = self.doc.add_object(Stream::new(dict, deflate(&colour)?));
        self.images.push(id);
        tracing::debug!(width, height, "embedded image");
        Ok(EmbeddedImage {
            index: self.images.len() - 1,
        })
    }

    fn draw_image(&mut self, page: usize, image: EmbeddedImage, rect: Rect) -> Result<(), Error> {
        self.overlay(page)?.extend([
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    rect.width.into(),
                    0.into(),
                    0.into(),
                    rect.height.into(),
                    rect.x.into(),
                    rect.y.into(),
                ],
            ),
            Operation::new("Do", vec![Object::Name(image_resource(image.index).into_bytes())]),
            Operation::new("Q", vec![]),
        ]);
        Ok(())
    }

    fn draw_line(
        &mut self,
        page: usize,
        from: (f32, f32),
        to: (f32, f32),
        thickness: f32,
        grey: f32,
    ) -> Result<(), Error> {
        self.overlay(page)?.extend([
            Operation::new("q", vec![]),
            Operation::new("G", vec![grey.into()]),
            Operation::new("w", vec![thickness.into()]),
            Operation::new("m", vec![from.0.into(), from.1.into()]),
            Operation::new("l", vec![to.0.into(), to.1.into()]),
            Operation::new("S", vec![]),
            Operation::new("Q", vec![]),
        ]);
        Ok(())
    }

    fn draw_text(&mut self, page: usize, run: &TextRun<'_>) -> Result<(), Error> {
        self.page_id(page)?;
        self.font_id();
        self.overlay(page)?.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![FONT_RESOURCE.into(), run.size.into()]),
            Operation::new("g", vec![run.grey.into()]),
            Operation::new("Td", vec![run.x.into(), run.y.into()]),
            Operation::new(
                "Tj",
                vec![Object::String(encode_win_ansi(run.text), StringFormat::Literal)],
            ),
            Operation::new("ET", vec![]),
        ]);
        Ok(())
    }
}

fn image_resource(index: usize) -> String {
    format!("MdlImg{index}")
}

fn image_dictionary(width: u32, height: u32, colour_space: &str) -> Dictionary {
    dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => i64::from(width),
        "Height" => i64::from(height),
        "ColorSpace" => colour_space,
        "BitsPerComponent" => 8,
        "Filter" => "FlateDecode",
    }
}

fn deflate(bytes: &[u8]) -> Result<Vec<u8>, Error> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes)?;
    Ok(encoder.finish()?)
}
