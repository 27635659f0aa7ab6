//! HTTP-level tests for [`openai_client::OpenAIClient::chat_completion`] against a mockito server.
//!
//! Covers: successful reply, missing content, provider error object, content-policy code.

use openai_client::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs, ClientError, OpenAIClient,
};

fn user_message(text: &str) -> ChatCompletionRequestMessage {
    ChatCompletionRequestUserMessageArgs::default()
        .content(text)
        .build()
        .unwrap()
        .into()
}

fn client_for(server: &mockito::ServerGuard) -> OpenAIClient {
    OpenAIClient::with_base_url("sk-test-key-0000000000".to_string(), server.url())
}

fn completion_body(content: serde_json::Value) -> String {
    serde_json::json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "created": 1700000000,
        "model": "gpt-3.5-turbo",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 5, "completion_tokens": 1, "total_tokens": 6 }
    })
    .to_string()
}

/// **Test: assistant content of the first choice is returned.**
#[tokio::test]
async fn chat_completion_returns_first_choice_content() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body(serde_json::json!("hi")))
        .create_async()
        .await;

    let reply = client_for(&server)
        .chat_completion("gpt-3.5-turbo", vec![user_message("hello")])
        .await
        .unwrap();

    assert_eq!(reply, "hi");
    mock.assert_async().await;
}

/// **Test: a choice with null content is a malformed response.**
#[tokio::test]
async fn chat_completion_null_content_is_malformed() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body(serde_json::Value::Null))
        .create_async()
        .await;

    let err = client_for(&server)
        .chat_completion("gpt-3.5-turbo", vec![user_message("hello")])
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::MalformedResponse(_)), "got {err:?}");
}

/// **Test: a provider error object becomes ClientError::Api.**
#[tokio::test]
async fn chat_completion_provider_error_is_api_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error","param":null,"code":"invalid_api_key"}}"#,
        )
        .create_async()
        .await;

    let err = client_for(&server)
        .chat_completion("gpt-3.5-turbo", vec![user_message("hello")])
        .await
        .unwrap_err();

    match err {
        ClientError::Api { message, code } => {
            assert!(message.contains("Incorrect API key"));
            assert_eq!(code.as_deref(), Some("invalid_api_key"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

/// **Test: the content_policy_violation code is classified separately.**
#[tokio::test]
async fn chat_completion_policy_code_is_content_policy() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"error":{"message":"Your request was rejected.","type":"invalid_request_error","param":null,"code":"content_policy_violation"}}"#,
        )
        .create_async()
        .await;

    let err = client_for(&server)
        .chat_completion("gpt-3.5-turbo", vec![user_message("something bad")])
        .await
        .unwrap_err();

    assert!(err.is_content_policy(), "got {err:?}");
}
