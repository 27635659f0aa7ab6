//! Classification of async-openai failures.
//!
//! The provider client raises [`OpenAIError`]; every call site converts it here so callers only
//! see [`ClientError`] and can tell transport trouble, provider errors, content-policy refusals
//! and malformed payloads apart.

use async_openai::error::OpenAIError;
use thiserror::Error;

/// Provider error code for a request refused by the safety system.
pub const CONTENT_POLICY_CODE: &str = "content_policy_violation";

#[derive(Debug, Error)]
pub enum ClientError {
    /// Network failure, timeout, or non-success HTTP status without a provider error body.
    #[error("transport error: {0}")]
    Transport(String),

    /// The provider returned an error object.
    #[error("API error: {message} (code: {code:?})")]
    Api {
        message: String,
        code: Option<String>,
    },

    /// The provider refused the request on content-policy grounds.
    #[error("content policy violation: {0}")]
    ContentPolicy(String),

    /// The response arrived but lacks the expected field or could not be decoded.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The request could not be built locally.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    pub fn is_content_policy(&self) -> bool {
        matches!(self, ClientError::ContentPolicy(_))
    }
}

/// Provider codes arrive either as plain strings or as JSON values; strip JSON quoting.
fn normalize_code(raw: String) -> String {
    raw.trim_matches('"').to_string()
}

impl From<OpenAIError> for ClientError {
    fn from(err: OpenAIError) -> Self {
        match err {
            OpenAIError::ApiError(api) => {
                let code = api.code.as_ref().map(|c| normalize_code(c.to_string()));
                let refused = code.as_deref() == Some(CONTENT_POLICY_CODE)
                    || api.message.contains("safety system");
                if refused {
                    ClientError::ContentPolicy(api.message)
                } else {
                    ClientError::Api {
                        message: api.message,
                        code,
                    }
                }
            }
            OpenAIError::JSONDeserialize(e) => ClientError::MalformedResponse(e.to_string()),
            OpenAIError::InvalidArgument(m) => ClientError::InvalidRequest(m),
            other => ClientError::Transport(other.to_string()),
        }
    }
}
