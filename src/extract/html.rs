use {
    super::{join_nonempty, Extractor},
    crate::{
        error::{IoContext, Result},
        source::SourceKind,
    },
    scraper::{ElementRef, Html, Selector},
    std::{fs, path::Path, sync::OnceLock},
};

pub struct HtmlExtractor;

impl Extractor for HtmlExtractor {
    fn kind(&self) -> SourceKind {
        SourceKind::Html
    }

    fn extract(&self, path: &Path) -> Result<String> {
        let html = fs::read_to_string(path).at(path)?;
        Ok(page_text(&html))
    }
}

struct Selectors {
    article: Selector,
    paragraph: Selector,
    story: Selector,
    body: Selector,
}

fn selectors() -> &'static Selectors {
    static SELECTORS: OnceLock<Selectors> = OnceLock::new();
    SELECTORS.get_or_init(|| {
        let parse = |css: &str| Selector::parse(css).expect("static selector");
        Selectors {
            article: parse("article"),
            paragraph: parse("p"),
            story: parse("div.story-content"),
            body: parse("body"),
        }
    })
}

/// Text below `element`, ignoring anything inside `<script>` or `<style>`.
fn visible_text(element: ElementRef) -> String {
    element
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .map(|e| matches!(e.name(), "script" | "style"))
                    .unwrap_or(false)
            });
            (!hidden).then_some(&**text)
        })
        .collect()
}

/// Main text of a story page: article paragraphs, else the story container,
/// else the whole body.
pub(crate) fn page_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let selectors = selectors();

    if let Some(article) = document.select(&selectors.article).next() {
        return join_nonempty(article.select(&selectors.paragraph).map(visible_text));
    }
    if let Some(story) = document.select(&selectors.story).next() {
        return visible_text(story);
    }
    if let Some(body) = document.select(&selectors.body).next() {
        return visible_text(body);
    }
    visible_text(document.root_element())
}
