use {
    super::{join_nonempty, Extractor},
    crate::{
        error::{IoContext, Result},
        source::SourceKind,
    },
    quick_xml::{events::Event, Reader},
    std::{fs::File, io::Read, path::Path},
};

const DOCUMENT_XML: &str = "word/document.xml";

pub struct DocxExtractor;

impl Extractor for DocxExtractor {
    fn kind(&self) -> SourceKind {
        SourceKind::Docx
    }

    fn extract(&self, path: &Path) -> Result<String> {
        let file = File::open(path).at(path)?;
        let mut archive = zip::ZipArchive::new(file)?;
        let mut xml = String::new();
        archive
            .by_name(DOCUMENT_XML)?
            .read_to_string(&mut xml)
            .at(path)?;
        Ok(join_nonempty(body_paragraphs(&xml)?))
    }
}

/// Whether the elements between a paragraph and a `w:t` make it part of the
/// paragraph's own runs (and not a nested text box or field).
fn is_run_path(path: &[Vec<u8>]) -> bool {
    match path {
        [run] => run == b"w:r",
        [link, run] => link == b"w:hyperlink" && run == b"w:r",
        _ => false,
    }
}

/// Text of every paragraph directly below `w:body`, in document order.
fn body_paragraphs(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Vec<u8>> = Vec::new();
    // index in `stack` just past the open top-level paragraph
    let mut paragraph: Option<usize> = None;
    let mut in_text = false;
    let mut paragraphs = Vec::new();
    let mut current = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.name().as_ref().to_vec();
                match paragraph {
                    None if name == b"w:p"
                        && stack.last().map(|top| top == b"w:body").unwrap_or(false) =>
                    {
                        paragraph = Some(stack.len() + 1);
                        current.clear();
                    }
                    Some(depth) if name == b"w:t" => {
                        in_text = is_run_path(&stack[depth..]);
                    }
                    _ => {}
                }
                stack.push(name);
            }
            Event::Empty(e) => {
                if let Some(depth) = paragraph {
                    if is_run_path(&stack[depth..]) {
                        match e.name().as_ref() {
                            b"w:tab" => current.push('\t'),
                            b"w:br" | b"w:cr" => current.push('\n'),
                            _ => {}
                        }
                    }
                }
            }
            Event::Text(e) if in_text => current.push_str(&e.unescape()?),
            Event::End(_) => {
                stack.pop();
                in_text = false;
                if paragraph == Some(stack.len() + 1) {
                    paragraph = None;
                    paragraphs.push(std::mem::take(&mut current));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(paragraphs)
}
