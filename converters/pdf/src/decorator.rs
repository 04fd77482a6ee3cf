//! Running header and footer drawn on every rasterized page.
//!
//! Layout, in points from the lower-left corner of a `width` x `height`
//! page:
//!
//! - logo at 25 % of its pixel size, 32pt below the top edge, at `x = 64`
//! - grey rule at `y = height - 67` spanning the 64pt side margins
//! - copyright at `(64, 45)`
//! - page number right-aligned at `x = width - 64`, `y = 45`
//! - the course title centred in the gap between the two, fitted with a
//!   [`TitlePolicy`]

use image::DynamicImage;
use md2lab_converters_core::TitlePolicy;

use crate::{
    Error,
    canvas::{PageCanvas, Rect, TextRun},
    fit::fit_title,
    metrics::text_width,
};

pub const MARGIN_X: f32 = 64.0;
pub const LOGO_TOP: f32 = 32.0;
pub const LOGO_SCALE: f32 = 0.25;
/// Distance from the top edge to the rule.
pub const RULE_TOP: f32 = 72.0 - 5.0;
pub const RULE_GREY: f32 = 0.8;
pub const RULE_THICKNESS: f32 = 1.0;
pub const FOOTER_BASELINE: f32 = 45.0;
pub const FOOTER_SIZE: f32 = 9.0;
pub const FOOTER_GREY: f32 = 0.5;
/// Space kept clear on both sides of the title.
pub const TITLE_PADDING: f32 = 12.0;
/// Baseline distance between wrapped title lines, as a multiple of the size.
pub const LINE_HEIGHT: f32 = 1.2;

/// Copyright line for `year`.
#[must_use]
pub fn copyright(year: i32) -> String {
    format!("© {year} Splunk LLC. All rights reserved.")
}

fn footer_width(text: &str) -> f32 {
    text_width(text, FOOTER_SIZE)
}

/// A title line positioned on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub x: f32,
    pub y: f32,
}

/// Footer title placement, identical on every page of the same width.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleLayout {
    /// Horizontal space available to the title.
    pub available: f32,
    pub lines: Vec<PlacedLine>,
}

impl TitleLayout {
    /// Fits `title` between `copyright` and the widest page number of a
    /// `page_count` page document.
    #[must_use]
    pub fn compute(
        title: &str,
        copyright: &str,
        page_width: f32,
        page_count: usize,
        policy: TitlePolicy,
    ) -> Self {
        let left = MARGIN_X + footer_width(copyright) + TITLE_PADDING;
        let right = page_width - MARGIN_X - footer_width(&page_count.to_string()) - TITLE_PADDING;
        let available = right - left;
        if available <= 0.0 {
            tracing::debug!(available, "no room for the footer title");
            return Self {
                available,
                lines: Vec::new(),
            };
        }

        let fitted = fit_title(title, available, policy, footer_width);
        let step = FOOTER_SIZE * LINE_HEIGHT;
        // Lines are centred on the footer baseline.
        #[allow(clippy::cast_precision_loss)]
        let top = FOOTER_BASELINE + step * (fitted.len().saturating_sub(1) as f32) / 2.0;
        let lines = fitted
            .into_iter()
            .enumerate()
            .map(|(index, text)| {
                #[allow(clippy::cast_precision_loss)]
                let y = top - step * index as f32;
                let x = left + (available - footer_width(&text)) / 2.0;
                PlacedLine { text, x, y }
            })
            .collect();
        Self { available, lines }
    }
}

/// What to draw on every page.
#[derive(Debug, Clone)]
pub struct Decoration<'a> {
    pub logo: &'a DynamicImage,
    pub title: &'a str,
    pub year: i32,
    pub policy: TitlePolicy,
}

/// Draws `decoration` on every page of `canvas`.
///
/// # Errors
///
/// Fails when the logo cannot be embedded or a page cannot be drawn on.
#[tracing::instrument(skip_all, fields(pages = canvas.page_count()))]
pub fn decorate<C: PageCanvas>(canvas: &mut C, decoration: &Decoration<'_>) -> Result<(), Error> {
    let page_count = canvas.page_count();
    let copyright = copyright(decoration.year);

    let logo = canvas.embed_image(decoration.logo)?;
    #[allow(clippy::cast_precision_loss)]
    let (logo_width, logo_height) = (
        decoration.logo.width() as f32 * LOGO_SCALE,
        decoration.logo.height() as f32 * LOGO_SCALE,
    );

    let mut layout: Option<(f32, TitleLayout)> = None;
    for page in 0..page_count {
        let size = canvas.page_size(page)?;

        canvas.draw_image(
            page,
            logo,
            Rect {
                x: MARGIN_X,
                y: size.height - logo_height - LOGO_TOP,
                width: logo_width,
                height: logo_height,
            },
        )?;

        let rule_y = size.height - RULE_TOP;
        canvas.draw_line(
            page,
            (MARGIN_X, rule_y),
            (size.width - MARGIN_X, rule_y),
            RULE_THICKNESS,
            RULE_GREY,
        )?;

        canvas.draw_text(
            page,
            &TextRun {
                text: &copyright,
                x: MARGIN_X,
                y: FOOTER_BASELINE,
                size: FOOTER_SIZE,
                grey: FOOTER_GREY,
            },
        )?;

        let title = if let Some((width, cached)) = layout.take()
            && (width - size.width).abs() < f32::EPSILON
        {
            cached
        } else {
            TitleLayout::compute(
                decoration.title,
                &copyright,
                size.width,
                page_count,
                decoration.policy,
            )
        };
        for line in &title.lines {
            canvas.draw_text(
                page,
                &TextRun {
                    text: &line.text,
                    x: line.x,
                    y: line.y,
                    size: FOOTER_SIZE,
                    grey: FOOTER_GREY,
                },
            )?;
        }
        layout = Some((size.width, title));

        let number = (page + 1).to_string();
        canvas.draw_text(
            page,
            &TextRun {
                text: &number,
                x: size.width - MARGIN_X - footer_width(&number),
                y: FOOTER_BASELINE,
                size: FOOTER_SIZE,
                grey: FOOTER_GREY,
            },
        )?;
    }
    tracing::debug!(page_count, "decorated pages");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::unreachable)]
mod tests {
    use image::RgbaImage;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::canvas::PageSize;

    /// Records drawing calls instead of producing a PDF.
    #[derive(Default)]
    struct Recorder {
        sizes: Vec<PageSize>,
        texts: Vec<(usize, String, f32, f32)>,
        lines: Vec<(usize, (f32, f32), (f32, f32))>,
        images: Vec<(usize, Rect)>,
    }

    impl Recorder {
        fn letter(pages: usize) -> Self {
            Self {
                sizes: vec![
                    PageSize {
                        width: 612.0,
                        height: 792.0
                    };
                    pages
                ],
                ..Self::default()
            }
        }

        fn texts_on(&self, page: usize) -> Vec<&str> {
            self.texts
                .iter()
                .filter(|(p, ..)| *p == page)
                .map(|(_, text, ..)| text.as_str())
                .collect()
        }
    }

    impl PageCanvas for Recorder {
        type Image = ();

        fn page_count(&self) -> usize {
            self.sizes.len()
        }

        fn page_size(&self, page: usize) -> Result<PageSize, Error> {
            self.sizes.get(page).copied().ok_or(Error::PageNotFound(page))
        }

        fn embed_image(&mut self, _image: &DynamicImage) -> Result<(), Error> {
            Ok(())
        }

        fn draw_image(&mut self, page: usize, (): (), rect: Rect) -> Result<(), Error> {
            self.images.push((page, rect));
            Ok(())
        }

        fn draw_line(
            &mut self,
            page: usize,
            from: (f32, f32),
            to: (f32, f32),
            _thickness: f32,
            _grey: f32,
        ) -> Result<(), Error> {
            self.lines.push((page, from, to));
            Ok(())
        }

        fn draw_text(&mut self, page: usize, run: &TextRun<'_>) -> Result<(), Error> {
            self.texts.push((page, run.text.to_string(), run.x, run.y));
            Ok(())
        }
    }

    fn logo() -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::new(400, 120))
    }

    #[test]
    fn test_every_page_decorated() {
        let mut canvas = Recorder::letter(3);
        let logo = logo();
        decorate(
            &mut canvas,
            &Decoration {
                logo: &logo,
                title: "Intro to Widgets",
                year: 2025,
                policy: TitlePolicy::Wrap,
            },
        )
        .unwrap();

        assert_eq!(
            canvas.images,
            (0..3)
                .map(|page| (
                    page,
                    Rect {
                        x: 64.0,
                        y: 792.0 - 30.0 - 32.0,
                        width: 100.0,
                        height: 30.0,
                    }
                ))
                .collect::<Vec<_>>()
        );
        assert_eq!(
            canvas.lines.first(),
            Some(&(0, (64.0, 725.0), (548.0, 725.0)))
        );
        assert_eq!(
            canvas.texts_on(2),
            vec![
                "© 2025 Splunk LLC. All rights reserved.",
                "Intro to Widgets",
                "3"
            ]
        );
    }

    #[test]
    fn test_page_number_right_aligned() {
        let mut canvas = Recorder::letter(1);
        let logo = logo();
        decorate(
            &mut canvas,
            &Decoration {
                logo: &logo,
                title: "T",
                year: 2025,
                policy: TitlePolicy::Truncate,
            },
        )
        .unwrap();
        let (_, _, x, y) = canvas.texts.last().unwrap();
        assert!((x + footer_width("1") - (612.0 - 64.0)).abs() < 0.001);
        assert_eq!(*y, 45.0);
    }

    #[test]
    fn test_title_layout_same_on_every_page() {
        let copyright = copyright(2025);
        let title = "Advanced Searching and Reporting with Widgets and Gadgets for Administrators";
        let layout = TitleLayout::compute(title, &copyright, 612.0, 120, TitlePolicy::Wrap);
        assert_eq!(layout.lines.len(), 2);
        assert!(layout.lines.iter().all(|line| footer_width(&line.text) <= layout.available));

        let [first, second] = layout.lines.as_slice() else {
            unreachable!("two lines");
        };
        assert!(((first.y + second.y) / 2.0 - FOOTER_BASELINE).abs() < 0.001);
        assert!((first.y - second.y - FOOTER_SIZE * LINE_HEIGHT).abs() < 0.001);
    }

    #[test]
    fn test_title_budget_uses_widest_page_number() {
        let copyright = copyright(2025);
        let few = TitleLayout::compute("T", &copyright, 612.0, 9, TitlePolicy::Wrap);
        let many = TitleLayout::compute("T", &copyright, 612.0, 100, TitlePolicy::Wrap);
        assert!((few.available - many.available - 2.0 * 556.0 * FOOTER_SIZE / 1000.0).abs() < 0.001);
    }

    #[test]
    fn test_title_centred_in_gap() {
        let copyright = copyright(2025);
        let layout = TitleLayout::compute("Widgets", &copyright, 612.0, 5, TitlePolicy::Wrap);
        let line = layout.lines.first().unwrap();
        let left = MARGIN_X + footer_width(&copyright) + TITLE_PADDING;
        let gap_left = line.x - left;
        let gap_right = left + layout.available - (line.x + footer_width("Widgets"));
        assert!((gap_left - gap_right).abs() < 0.001);
        assert_eq!(line.y, FOOTER_BASELINE);
    }

    #[test]
    fn test_no_room_for_title() {
        let layout = TitleLayout::compute("Widgets", &copyright(2025), 200.0, 5, TitlePolicy::Wrap);
        assert!(layout.lines.is_empty());
    }
}
