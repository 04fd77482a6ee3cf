//! One-time datestamp caption below the guide's first top-level heading.

use md2lab_converters_core::Datestamp;
use md2lab_parser::fence::CodeFence;

/// Mutable state threaded through the per-file loop of one variant.
///
/// Create a fresh context for every rendering variant.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AssemblyContext {
    datestamp_inserted: bool,
}

impl AssemblyContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn datestamp_inserted(&self) -> bool {
        self.datestamp_inserted
    }
}

fn is_top_level_heading(line: &str) -> bool {
    let indent = line.len() - line.trim_start_matches(' ').len();
    if indent > 3 {
        return false;
    }
    let rest = line.trim_start_matches(' ').trim_end_matches(['\r', '\n']);
    rest.strip_prefix('#')
        .is_some_and(|after| after.is_empty() || after.starts_with([' ', '\t']))
}

#[must_use]
pub fn caption(datestamp: &Datestamp) -> String {
    format!(
        "<p class=\"datestamp\" style=\"text-align: right;\">{}</p>",
        datestamp.long()
    )
}

/// Inserts the datestamp caption after the first `# ` heading outside fenced
/// code, unless `context` says a previous file already received it.
#[must_use]
pub fn insert_datestamp(
    content: &str,
    datestamp: &Datestamp,
    context: &mut AssemblyContext,
) -> String {
    if context.datestamp_inserted {
        return content.to_string();
    }

    let mut output = String::with_capacity(content.len() + 80);
    let mut fence: Option<CodeFence> = None;
    let mut inserted = false;

    for line in content.split_inclusive('\n') {
        output.push_str(line);
        if inserted {
            continue;
        }
        let text = line.trim_end_matches(['\r', '\n']);
        match fence {
            Some(open) => {
                if open.is_closed_by(text) {
                    fence = None;
                }
            }
            None => {
                if let Some(open) = CodeFence::open(text) {
                    fence = Some(open);
                } else if is_top_level_heading(text) {
                    if !line.ends_with('\n') {
                        output.push('\n');
                    }
                    output.push('\n');
                    output.push_str(&caption(datestamp));
                    output.push_str("\n\n");
                    inserted = true;
                }
            }
        }
    }

    if inserted {
        tracing::debug!(date = %datestamp.long(), "inserted datestamp");
        context.datestamp_inserted = true;
    }
    output
}
