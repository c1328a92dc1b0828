use std::future::Future;

use futures::future::{select, Either};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use thiserror::Error;

use crate::config;
use crate::form::draft::ApplicationDraft;

pub const APPLY_PATH: &str = "/api/apply";

/// Everything that can go wrong between pressing "Submit" and getting a 2xx.
/// The form shows all of them the same way, as one line of text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("Could not prepare the application: {0}")]
    Encode(String),
    #[error("Request failed: {0}")]
    Network(String),
    #[error("The server did not answer within {0} seconds, please try again")]
    Timeout(u32),
    #[error("{}", status_message(.status, .body))]
    Status { status: u16, body: String },
    #[error("Could not read the server response: {0}")]
    Body(String),
}

fn status_message(status: &u16, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        format!("Submission failed with status {}", status)
    } else {
        format!("Submission failed ({}): {}", status, body)
    }
}

pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Maps the endpoint's answer to an outcome. Non-2xx bodies are plain-text
/// error descriptions.
pub fn classify_response(status: u16, body: String) -> Result<(), SubmissionError> {
    if is_success(status) {
        Ok(())
    } else {
        Err(SubmissionError::Status { status, body })
    }
}

pub fn apply_endpoint(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), APPLY_PATH)
}

/// Races `request` against `deadline`. When the deadline fires first the
/// request is dropped and the result is `Timeout(timeout_secs)`; a request
/// that is ready on the same poll wins.
pub async fn with_deadline<R, D>(
    request: R,
    deadline: D,
    timeout_secs: u32,
) -> Result<R::Output, SubmissionError>
where
    R: Future,
    D: Future<Output = ()>,
{
    match select(Box::pin(request), Box::pin(deadline)).await {
        Either::Left((output, _)) => Ok(output),
        Either::Right(_) => Err(SubmissionError::Timeout(timeout_secs)),
    }
}

/// Something that can deliver a finished application.
#[allow(async_fn_in_trait)]
pub trait ApplicationClient {
    async fn send(&self, draft: &ApplicationDraft) -> Result<(), SubmissionError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpApplicationClient {
    base_url: String,
    timeout_ms: u32,
}

impl HttpApplicationClient {
    pub fn new(base_url: impl Into<String>, timeout_ms: u32) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms,
        }
    }

    pub fn from_config() -> Self {
        Self::new(config::get_backend_url(), config::SUBMIT_TIMEOUT_MS)
    }

    pub fn endpoint(&self) -> String {
        apply_endpoint(&self.base_url)
    }
}

impl ApplicationClient for HttpApplicationClient {
    async fn send(&self, draft: &ApplicationDraft) -> Result<(), SubmissionError> {
        let request = Request::post(&self.endpoint())
            .json(draft)
            .map_err(|e| SubmissionError::Encode(e.to_string()))?;

        let deadline = TimeoutFuture::new(self.timeout_ms);
        let response = with_deadline(request.send(), deadline, self.timeout_ms / 1000)
            .await
            .map_err(|e| {
                log::warn!("Application submission timed out after {}ms", self.timeout_ms);
                e
            })?
            .map_err(|e| SubmissionError::Network(e.to_string()))?;

        let status = response.status();
        if is_success(status) {
            return Ok(());
        }

        let body = response
            .text()
            .await
            .map_err(|e| SubmissionError::Body(e.to_string()))?;
        classify_response(status, body)
    }
}
