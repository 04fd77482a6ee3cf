//! Output format selection.

/// What a conversion run produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Backend {
    /// Rasterized and decorated PDF files.
    #[default]
    Pdf,
    /// Pretty-printed HTML on standard output; no PDF is rasterized.
    Html,
}
