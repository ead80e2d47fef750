//! A minimal textual PDF viewer for the terminal.
//!
//! It checks the file header and counts page objects; it does not render
//! page content.

use docchat_core::document::{DocumentHandle, DocumentSource};
use docchat_core::error::{DocChatError, Result};
use docchat_core::viewer::{RenderedPage, ViewerAdapter};
use regex::bytes::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

const PDF_HEADER: &[u8] = b"%PDF-";

fn page_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // `\b` keeps the `/Type /Pages` tree nodes out of the count.
    PATTERN.get_or_init(|| Regex::new(r"/Type\s*/Page\b").expect("page pattern is valid"))
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PdfViewer;

impl PdfViewer {
    fn bytes<'a>(&self, document: &'a DocumentHandle) -> Result<Cow<'a, [u8]>> {
        match document.source() {
            DocumentSource::Bytes(bytes) => Ok(Cow::Borrowed(&bytes[..])),
            DocumentSource::Path(path) => std::fs::read(path).map(Cow::Owned).map_err(|e| {
                DocChatError::ViewerLoad(format!("Cannot read {}: {}", path.display(), e))
            }),
        }
    }

    fn count_pages(data: &[u8]) -> Result<u32> {
        if !data.starts_with(PDF_HEADER) {
            return Err(DocChatError::ViewerLoad("Invalid PDF structure".to_string()));
        }

        let pages = page_pattern().find_iter(data).count();
        if pages == 0 {
            return Err(DocChatError::ViewerLoad(
                "No pages found in document".to_string(),
            ));
        }
        u32::try_from(pages).map_err(|_| DocChatError::ViewerLoad("Too many pages".to_string()))
    }
}

impl ViewerAdapter for PdfViewer {
    fn load(&self, document: &DocumentHandle) -> Result<u32> {
        let data = self.bytes(document)?;
        let pages = Self::count_pages(&data)?;
        tracing::debug!(
            "[Viewer] {} has {} page(s)",
            document.display_name(),
            pages
        );
        Ok(pages)
    }

    fn render_page(&self, document: &DocumentHandle, page_number: u32) -> Result<RenderedPage> {
        let page_count = self.load(document)?;
        if page_number == 0 || page_number > page_count {
            return Err(DocChatError::PageOutOfRange {
                page_number,
                page_count,
            });
        }

        Ok(RenderedPage {
            page_number,
            page_count,
            content: format!(
                "{} | page {} of {}",
                document.display_name(),
                page_number,
                page_count
            ),
        })
    }
}
