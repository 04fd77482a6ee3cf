//! The assembled document and its HTML shell.

use std::io::Write;

use md2lab_parser::escape_html;

/// Marker placed between consecutive sections.
pub const PAGE_BREAK: &str = "<div style=\"page-break-before: always;\"></div>";

const INDENT: &str = "  ";

/// Rendered HTML for one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// The source file's stem, e.g. `01-lab`.
    pub file: String,
    pub html: String,
}

impl Section {
    fn write_to(&self, output: &mut String) {
        output.push_str("<section class=\"section\" data-file=\"");
        output.push_str(&escape_html(&self.file));
        output.push_str("\">\n");
        output.push_str(&self.html);
        output.push_str("\n</section>");
    }
}

/// Every section of one variant, plus the stylesheet and title.
#[derive(Debug, Clone)]
pub struct AssembledDocument {
    title: String,
    generator: String,
    css: String,
    sections: Vec<Section>,
}

impl AssembledDocument {
    #[must_use]
    pub fn new(title: &str, generator: &str, css: String, sections: Vec<Section>) -> Self {
        Self {
            title: title.to_string(),
            generator: generator.to_string(),
            css,
            sections,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn css(&self) -> &str {
        &self.css
    }

    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Sections joined with page breaks; none after the last one.
    #[must_use]
    pub fn body(&self) -> String {
        let mut body = String::new();
        for (index, section) in self.sections.iter().enumerate() {
            if index > 0 {
                body.push_str(PAGE_BREAK);
                body.push('\n');
            }
            section.write_to(&mut body);
            body.push('\n');
        }
        body
    }

    /// Writes the compact document used for rasterizing.
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    pub fn render<W: Write + ?Sized>(&self, w: &mut W) -> std::io::Result<()> {
        writeln!(w, "<!DOCTYPE html>")?;
        writeln!(w, "<html>")?;
        writeln!(w, "<head>")?;
        writeln!(w, "<meta charset=\"utf-8\">")?;
        writeln!(
            w,
            "<meta name=\"generator\" content=\"{}\">",
            escape_html(&self.generator)
        )?;
        writeln!(w, "<title>{}</title>", escape_html(&self.title))?;
        writeln!(w, "<style>")?;
        writeln!(w, "{}", self.css)?;
        writeln!(w, "</style>")?;
        writeln!(w, "</head>")?;
        writeln!(w, "<body>")?;
        write!(w, "{}", self.body())?;
        writeln!(w, "</body>")?;
        writeln!(w, "</html>")?;
        Ok(())
    }

    #[must_use]
    pub fn to_html(&self) -> String {
        let mut buffer = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.render(&mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// The document indented for reading. Content of `<pre>` elements is
    /// left untouched.
    #[must_use]
    pub fn to_pretty_html(&self) -> String {
        let mut out = String::new();
        let head = INDENT;
        let inner = INDENT.repeat(2);
        let style = INDENT.repeat(3);

        out.push_str("<!DOCTYPE html>\n<html>\n");
        out.push_str(&format!("{head}<head>\n"));
        out.push_str(&format!("{inner}<meta charset=\"utf-8\">\n"));
        out.push_str(&format!(
            "{inner}<meta name=\"generator\" content=\"{}\">\n",
            escape_html(&self.generator)
        ));
        out.push_str(&format!("{inner}<title>{}</title>\n", escape_html(&self.title)));
        out.push_str(&format!("{inner}<style>\n"));
        out.push_str(&indent_lines(&self.css, &style));
        out.push_str(&format!("{inner}</style>\n"));
        out.push_str(&format!("{head}</head>\n"));
        out.push_str(&format!("{head}<body>\n"));
        out.push_str(&indent_lines(&self.body(), &inner));
        out.push_str(&format!("{head}</body>\n"));
        out.push_str("</html>\n");
        out
    }
}

/// Prefixes every non-empty line with `indent`, except lines inside `<pre>`.
fn indent_lines(text: &str, indent: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    let mut in_pre = false;
    for line in text.lines() {
        if in_pre {
            out.push_str(line);
        } else if !line.trim().is_empty() {
            out.push_str(indent);
            out.push_str(line.trim_end());
        }
        out.push('\n');

        in_pre = match (line.rfind("<pre"), line.rfind("</pre>")) {
            (Some(open), Some(close)) => open > close,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => in_pre,
        };
    }
    out
}
