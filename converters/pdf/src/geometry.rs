//! Print geometry handed to the rasterizer.

/// Page margins, in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

/// Paper size, margins and content scale for one rasterization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    /// Paper width in inches.
    pub width: f32,
    /// Paper height in inches.
    pub height: f32,
    pub margins: Margins,
    /// Content scale factor, `1.0` being 100 %.
    pub scale: f32,
}

impl PageGeometry {
    /// US Letter with room for the decorated header and footer.
    #[must_use]
    pub const fn letter() -> Self {
        Self {
            width: 8.5,
            height: 11.0,
            margins: Margins {
                top: 1.0,
                bottom: 0.75,
                left: 0.64,
                right: 0.64,
            },
            scale: 0.9,
        }
    }

    /// CSS that makes a browser print with this geometry.
    #[must_use]
    pub fn print_css(&self) -> String {
        let Margins {
            top,
            bottom,
            left,
            right,
        } = self.margins;
        format!(
            "@page {{ size: {}in {}in; margin: {top}in {right}in {bottom}in {left}in; }}\nhtml {{ zoom: {}; }}\n",
            self.width, self.height, self.scale
        )
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::letter()
    }
}
