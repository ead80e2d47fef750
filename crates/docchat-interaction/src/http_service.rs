//! HttpDocumentService - REST implementation of `DocumentService`.
//!
//! Every request carries its own timeout (upload or question), so a stalled
//! server surfaces as a transport failure instead of a request that never
//! resolves.

use async_trait::async_trait;
use docchat_core::config::ClientConfig;
use docchat_core::document::DocumentHandle;
use docchat_core::error::{DocChatError, Result};
use docchat_core::service::{AnswerReply, DocumentService, UploadReceipt};
use docchat_core::session::{SessionPolicy, SessionReference};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::wire::{self, ChatRequest, ChatResponse, UploadResponse};

/// Service implementation that talks to the answering service over HTTP.
#[derive(Clone)]
pub struct HttpDocumentService {
    client: Client,
    base_url: String,
    upload_timeout: Duration,
    question_timeout: Duration,
}

impl HttpDocumentService {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Uses a preconfigured client (proxies, TLS settings).
    pub fn with_client(client: Client, config: &ClientConfig) -> Self {
        Self {
            client,
            base_url: config.endpoint_base().to_string(),
            upload_timeout: config.upload_timeout(),
            question_timeout: config.question_timeout(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn upload_form(document: &DocumentHandle, bytes: Vec<u8>) -> Result<Form> {
        let part = Part::bytes(bytes)
            .file_name(document.display_name().to_string())
            .mime_str(document.mime_type())
            .map_err(|err| DocChatError::internal(format!("Invalid MIME type: {err}")))?;
        Ok(Form::new().part(wire::UPLOAD_FIELD, part))
    }
}

#[async_trait]
impl DocumentService for HttpDocumentService {
    async fn upload(
        &self,
        policy: SessionPolicy,
        document: &DocumentHandle,
    ) -> Result<UploadReceipt> {
        let bytes = document.read_bytes().await?;
        let url = self.url(wire::upload_path(policy));
        tracing::debug!(
            "[Http] POST {} ({}, {} bytes)",
            url,
            document.display_name(),
            bytes.len()
        );

        let form = Self::upload_form(document, bytes)?;
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .timeout(self.upload_timeout)
            .send()
            .await
            .map_err(|err| map_request_error(err, self.upload_timeout))?;

        let parsed: UploadResponse = parse_json(check_status(response).await?).await?;
        parsed.into_receipt(policy)
    }

    async fn ask(&self, question: &str, scope: &SessionReference) -> Result<AnswerReply> {
        let url = self.url(wire::CHAT_PATH);
        tracing::debug!("[Http] POST {} ({} id(s) in scope)", url, scope.len());

        let response = self
            .client
            .post(&url)
            .json(&ChatRequest::new(question, scope))
            .timeout(self.question_timeout)
            .send()
            .await
            .map_err(|err| map_request_error(err, self.question_timeout))?;

        let parsed: ChatResponse = parse_json(check_status(response).await?).await?;
        Ok(parsed.into_reply(scope.policy()))
    }

    async fn clear_session(&self, session_id: &str) -> Result<()> {
        let url = self.url(&wire::session_path(session_id));
        tracing::debug!("[Http] DELETE {}", url);

        let response = self
            .client
            .delete(&url)
            .timeout(self.question_timeout)
            .send()
            .await
            .map_err(|err| map_request_error(err, self.question_timeout))?;

        check_status(response).await?;
        Ok(())
    }

    async fn health(&self, policy: SessionPolicy) -> Result<()> {
        let url = self.url(wire::health_path(policy));
        let response = self
            .client
            .get(&url)
            .timeout(self.question_timeout)
            .send()
            .await
            .map_err(|err| map_request_error(err, self.question_timeout))?;

        check_status(response).await?;
        Ok(())
    }
}

fn map_request_error(err: reqwest::Error, timeout: Duration) -> DocChatError {
    if err.is_timeout() {
        tracing::warn!("[Http] Request timed out after {:?}", timeout);
        DocChatError::transport(format!(
            "Request timed out after {} seconds",
            timeout.as_secs()
        ))
    } else {
        tracing::warn!("[Http] Request failed: {}", err);
        DocChatError::transport(format!("Request failed: {err}"))
    }
}

/// Turns a non-2xx response into a transport error carrying the server `detail`.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = wire::error_detail(&body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .map(|reason| format!("{} {}", status.as_u16(), reason))
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
    });
    tracing::warn!("[Http] {} response: {}", status, message);

    Err(DocChatError::http_status(status.as_u16(), message))
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    response
        .json()
        .await
        .map_err(|err| DocChatError::transport(format!("Malformed response body: {err}")))
}
