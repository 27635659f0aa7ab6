use thiserror::Error;

/// Apology sent to the user when the image service refuses a prompt on content-policy grounds.
pub const POLICY_REJECTION_MESSAGE: &str =
    "Sorry, I can't draw that: the request was rejected by the content policy. Try describing something else.";

/// Apology sent to the user when the completion service refuses to answer on content-policy grounds.
pub const ANSWER_REFUSED_MESSAGE: &str =
    "Sorry, I can't help with that: the request was rejected by the content policy.";

/// Fallback sent to the user when the AI service could not produce an answer.
pub const SERVICE_FAILURE_MESSAGE: &str =
    "Sorry, I couldn't get an answer right now. Please try again a bit later.";

#[derive(Error, Debug)]
pub enum RelayError {
    /// Transport failure or provider error object while calling the AI service.
    #[error("AI service access error: {0}")]
    ServiceAccess(String),

    /// The provider answered but the expected content field was missing.
    #[error("Malformed AI service response: {0}")]
    ResponseShape(String),

    /// Sending the reply to the messaging platform failed.
    #[error("Delivery error: {0}")]
    Delivery(String),

    /// The image service refused the prompt on content-policy grounds.
    #[error("Content policy rejection: {0}")]
    PolicyRejection(String),

    /// The completion service refused to answer on content-policy grounds.
    #[error("Answer refused by content policy: {0}")]
    AnswerRefused(String),

    /// The generated image could not be persisted.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl RelayError {
    /// Text to show the user for this failure, if any. Delivery failures have none: the send itself failed.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            RelayError::PolicyRejection(_) => Some(POLICY_REJECTION_MESSAGE),
            RelayError::AnswerRefused(_) => Some(ANSWER_REFUSED_MESSAGE),
            RelayError::ServiceAccess(_)
            | RelayError::ResponseShape(_)
            | RelayError::Storage(_) => Some(SERVICE_FAILURE_MESSAGE),
            RelayError::Delivery(_) => None,
        }
    }

    /// Policy rejections are an expected outcome and are not logged as errors.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            RelayError::PolicyRejection(_) | RelayError::AnswerRefused(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;
