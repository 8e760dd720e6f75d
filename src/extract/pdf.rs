use {
    super::{join_nonempty, Extractor},
    crate::{error::Result, source::SourceKind},
    lopdf::Document,
    std::path::Path,
    tracing::{debug, info},
};

pub struct PdfExtractor;

impl Extractor for PdfExtractor {
    fn kind(&self) -> SourceKind {
        SourceKind::Pdf
    }

    fn extract(&self, path: &Path) -> Result<String> {
        let document = Document::load(path)?;
        let pages = document.get_pages();
        info!("{:?} has {} pages", path.file_name().unwrap_or_default(), pages.len());

        let mut texts = Vec::with_capacity(pages.len());
        for &page in pages.keys() {
            match document.extract_text(&[page]) {
                Ok(text) => texts.push(text),
                Err(err) => debug!("{path:?}: skipping page {page}: {err}"),
            }
        }
        Ok(join_nonempty(texts))
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        lopdf::{
            content::{Content, Operation},
            dictionary, Object, Stream,
        },
        std::fs,
    };

    /// A PDF with one page per entry; `None` gives a page without text.
    fn write_pdf(path: &Path, pages: &[Option<&str>]) {
        let mut document = Document::with_version("1.5");
        let pages_id = document.new_object_id();
        let font_id = document.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = document.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids = Vec::new();
        for text in pages {
            let operations = match text {
                Some(text) => vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![72.into(), 700.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
                None => vec![],
            };
            let content = Content { operations };
            let content_id =
                document.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = document.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(Object::from(page_id));
        }

        let count = kids.len() as i64;
        document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );
        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        document.trailer.set("Root", catalog_id);
        document.save(path).unwrap();
    }

    #[test]
    fn pages_are_joined_and_blank_pages_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.pdf");
        write_pdf(&path, &[Some("Chuong mot"), None, Some("Chuong hai")]);

        let text = PdfExtractor.extract(&path).unwrap();
        assert_eq!(text, "Chuong mot\nChuong hai");
    }

    #[test]
    fn garbage_is_reported_as_pdf_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        fs::write(&path, b"not a pdf at all").unwrap();
        let err = PdfExtractor.extract(&path).unwrap_err();
        assert!(matches!(err, crate::error::Error::Pdf(_)), "{err:?}");
    }
}
