//! HTTP client for the DocChat answering service.

pub mod http_service;
pub mod wire;

pub use http_service::HttpDocumentService;
