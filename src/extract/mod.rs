use {
    crate::{error::Result, source::SourceKind},
    std::path::Path,
};

mod docx;
mod html;
mod pdf;

pub use docx::DocxExtractor;
pub use html::HtmlExtractor;
pub use pdf::PdfExtractor;

/// Reads the raw, uncleaned text of a single document.
pub trait Extractor: Sync {
    fn kind(&self) -> SourceKind;
    fn extract(&self, path: &Path) -> Result<String>;
}

pub fn extractor_for(kind: SourceKind) -> Box<dyn Extractor> {
    match kind {
        SourceKind::Docx => Box::new(DocxExtractor),
        SourceKind::Html => Box::new(HtmlExtractor),
        SourceKind::Pdf => Box::new(PdfExtractor),
    }
}

/// Trim each part, drop empty ones, join with newlines.
fn join_nonempty<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parts
        .into_iter()
        .filter_map(|part| {
            let part = part.as_ref().trim();
            (!part.is_empty()).then(|| part.to_owned())
        })
        .collect::<Vec<_>>()
        .join("\n")
}
