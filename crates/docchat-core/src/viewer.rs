//! Contract with the external document viewer.
//!
//! The viewer owns its own rendering state. The orchestrator only hands it a
//! read reference to the selected document and turns its outcome into a
//! [`ViewerState`] and, on failure, a notice.

use serde::{Deserialize, Serialize};

use crate::document::DocumentHandle;
use crate::error::Result;

/// One rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    /// 1-based page number
    pub page_number: u32,
    pub page_count: u32,
    pub content: String,
}

/// A document viewer (PDF engine, terminal preview, ...).
pub trait ViewerAdapter: Send + Sync {
    /// Opens `document` and reports its total page count.
    ///
    /// # Errors
    ///
    /// Returns `DocChatError::ViewerLoad` if the document cannot be opened.
    fn load(&self, document: &DocumentHandle) -> Result<u32>;

    /// Renders one 1-based page of `document`.
    fn render_page(&self, document: &DocumentHandle, page_number: u32) -> Result<RenderedPage>;
}

/// What the viewer currently presents.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ViewerState {
    /// No document selected; show a placeholder.
    #[default]
    Empty,
    Loaded {
        display_name: String,
        page_count: u32,
    },
    Failed {
        display_name: String,
        reason: String,
    },
}

impl ViewerState {
    /// Runs `adapter` over the optional selection.
    pub fn present(adapter: &dyn ViewerAdapter, document: Option<&DocumentHandle>) -> Self {
        let Some(document) = document else {
            return Self::Empty;
        };

        match adapter.load(document) {
            Ok(page_count) => Self::Loaded {
                display_name: document.display_name().to_string(),
                page_count,
            },
            Err(err) => Self::Failed {
                display_name: document.display_name().to_string(),
                reason: err.notice_text(),
            },
        }
    }

    pub fn page_count(&self) -> Option<u32> {
        match self {
            Self::Loaded { page_count, .. } => Some(*page_count),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DocChatError;

    struct FixedViewer(std::result::Result<u32, String>);

    impl ViewerAdapter for FixedViewer {
        fn load(&self, _document: &DocumentHandle) -> Result<u32> {
            self.0.clone().map_err(DocChatError::ViewerLoad)
        }

        fn render_page(&self, _document: &DocumentHandle, page_number: u32) -> Result<RenderedPage> {
            Ok(RenderedPage {
                page_number,
                page_count: 1,
                content: String::new(),
            })
        }
    }

    #[test]
    fn test_no_document_is_placeholder_not_error() {
        let state = ViewerState::present(&FixedViewer(Err("never called".into())), None);
        assert_eq!(state, ViewerState::Empty);
        assert!(!state.is_failed());
    }

    #[test]
    fn test_loaded_reports_page_count() {
        let doc = DocumentHandle::from_bytes("report.pdf", None, vec![0u8]);
        let state = ViewerState::present(&FixedViewer(Ok(12)), Some(&doc));
        assert_eq!(state.page_count(), Some(12));
    }

    #[test]
    fn test_load_error_is_distinguishable() {
        let doc = DocumentHandle::from_bytes("corrupt.pdf", None, vec![0u8]);
        let state = ViewerState::present(&FixedViewer(Err("Invalid PDF structure".into())), Some(&doc));
        assert_eq!(
            state,
            ViewerState::Failed {
                display_name: "corrupt.pdf".into(),
                reason: "Invalid PDF structure".into()
            }
        );
    }
}
