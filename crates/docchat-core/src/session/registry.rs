use super::{SessionPolicy, SessionReference, SessionUpdate};
use crate::document::UploadedDocumentRecord;
use crate::error::{DocChatError, Result};
use crate::service::UploadReceipt;

/// Holds the identifiers issued by successful uploads.
///
/// Identifiers only enter the registry through [`SessionRegistry::apply_upload`],
/// which takes the receipt of a completed upload. The only other mutation,
/// [`SessionRegistry::reset`], can remove identifiers but never introduce one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRegistry {
    policy: SessionPolicy,
    reference: Option<SessionReference>,
    documents: Vec<UploadedDocumentRecord>,
}

impl SessionRegistry {
    pub fn new(policy: SessionPolicy) -> Self {
        Self {
            policy,
            reference: None,
            documents: Vec::new(),
        }
    }

    pub fn policy(&self) -> SessionPolicy {
        self.policy
    }

    /// The current session reference, or `None` before the first upload.
    pub fn current(&self) -> Option<&SessionReference> {
        self.reference.as_ref()
    }

    /// True iff at least one valid identifier is present.
    pub fn can_dispatch(&self) -> bool {
        self.reference
            .as_ref()
            .is_some_and(SessionReference::is_dispatchable)
    }

    /// Uploaded documents in upload order (multi policy only; empty otherwise).
    pub fn uploaded_documents(&self) -> &[UploadedDocumentRecord] {
        &self.documents
    }

    /// Records a successful upload.
    ///
    /// Under the single policy the active session is replaced; under the multi
    /// policy the document id is appended. A receipt with a blank identifier is
    /// rejected as a malformed response and leaves the registry unchanged.
    pub fn apply_upload(
        &mut self,
        display_name: &str,
        receipt: &UploadReceipt,
    ) -> Result<SessionUpdate> {
        let id = receipt.id.trim();
        if id.is_empty() {
            return Err(DocChatError::transport(
                "Server response did not include a document identifier",
            ));
        }

        match self.policy {
            SessionPolicy::Single => {
                let previous = match self.reference.take() {
                    Some(SessionReference::Single { session_id }) => Some(session_id),
                    _ => None,
                };
                self.reference = Some(SessionReference::Single {
                    session_id: id.to_string(),
                });
                Ok(SessionUpdate::Replaced {
                    previous,
                    session_id: id.to_string(),
                })
            }
            SessionPolicy::Multi => {
                let record = UploadedDocumentRecord {
                    display_name: display_name.to_string(),
                    document_id: id.to_string(),
                };
                self.documents.push(record.clone());

                if let Some(SessionReference::Multi { document_ids }) = &mut self.reference {
                    document_ids.push(id.to_string());
                } else {
                    self.reference = Some(SessionReference::Multi {
                        document_ids: vec![id.to_string()],
                    });
                }

                Ok(SessionUpdate::Appended {
                    record,
                    total: self.documents.len(),
                })
            }
        }
    }

    /// Drops every identifier, returning what was held.
    pub fn reset(&mut self) -> Option<SessionReference> {
        self.documents.clear();
        self.reference.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn receipt(id: &str) -> UploadReceipt {
        UploadReceipt {
            id: id.to_string(),
            message: None,
        }
    }

    #[test]
    fn test_empty_registry_cannot_dispatch() {
        let registry = SessionRegistry::new(SessionPolicy::Multi);
        assert!(registry.current().is_none());
        assert!(!registry.can_dispatch());
    }

    #[test]
    fn test_single_policy_replaces_session() {
        let mut registry = SessionRegistry::new(SessionPolicy::Single);

        let first = registry.apply_upload("a.pdf", &receipt("s-1")).unwrap();
        assert_eq!(
            first,
            SessionUpdate::Replaced {
                previous: None,
                session_id: "s-1".into()
            }
        );

        let second = registry.apply_upload("b.pdf", &receipt("s-2")).unwrap();
        assert_eq!(
            second,
            SessionUpdate::Replaced {
                previous: Some("s-1".into()),
                session_id: "s-2".into()
            }
        );
        assert_eq!(
            registry.current(),
            Some(&SessionReference::Single {
                session_id: "s-2".into()
            })
        );
        assert!(registry.uploaded_documents().is_empty());
        assert!(registry.can_dispatch());
    }

    #[test]
    fn test_multi_policy_appends_in_upload_order_with_duplicates() {
        let mut registry = SessionRegistry::new(SessionPolicy::Multi);
        registry.apply_upload("a.pdf", &receipt("abc123")).unwrap();
        registry.apply_upload("b.pdf", &receipt("def456")).unwrap();
        let update = registry.apply_upload("a.pdf", &receipt("abc123")).unwrap();

        assert_eq!(update.issued_id(), "abc123");
        assert!(matches!(update, SessionUpdate::Appended { total: 3, .. }));
        assert_eq!(
            registry.current(),
            Some(&SessionReference::Multi {
                document_ids: vec!["abc123".into(), "def456".into(), "abc123".into()]
            })
        );
        let names: Vec<_> = registry
            .uploaded_documents()
            .iter()
            .map(|d| d.display_name.as_str())
            .collect();
        assert_eq!(names, ["a.pdf", "b.pdf", "a.pdf"]);
    }

    #[test]
    fn test_blank_identifier_is_rejected_without_mutation() {
        let mut registry = SessionRegistry::new(SessionPolicy::Multi);
        registry.apply_upload("a.pdf", &receipt("abc123")).unwrap();
        let before = registry.clone();

        let err = registry.apply_upload("b.pdf", &receipt("   ")).unwrap_err();
        assert!(err.is_transport());
        assert_eq!(registry, before);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut registry = SessionRegistry::new(SessionPolicy::Single);
        registry.apply_upload("a.pdf", &receipt("s-1")).unwrap();

        let dropped = registry.reset();
        assert_eq!(
            dropped,
            Some(SessionReference::Single {
                session_id: "s-1".into()
            })
        );
        assert!(!registry.can_dispatch());
    }
}
