//! OpenRouter client tests against a mock server

#[cfg(test)]
mod tests {
    use crate::config::AiConfig;
    use crate::error::PyGeniusError;
    use crate::llm::backend::ChatBackend;
    use crate::llm::client::{OpenRouterClient, extract_message_content};
    use crate::llm::messages::ChatRequest;
    use crate::llm::streaming::collect_text;
    use futures::StreamExt;
    use reqwest::Client;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_client(base_url: &str) -> OpenRouterClient {
        let config = AiConfig::default()
            .with_api_key("test-api-key")
            .with_base_url(base_url);
        let http_client = Client::builder()
            .no_proxy()
            .build()
            .expect("Failed to create HTTP client");
        OpenRouterClient::with_http_client(config, http_client)
    }

    fn mock_completion(content: &str) -> serde_json::Value {
        json!({
            "id": "gen-test123",
            "object": "chat.completion",
            "created": 1704067200,
            "model": "openai/gpt-3.5-turbo",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }]
        })
    }

    fn sse_body(pieces: &[&str]) -> String {
        let mut body = String::new();
        for piece in pieces {
            body.push_str(&format!(
                "data: {}\n\n",
                json!({"choices": [{"index": 0, "delta": {"content": piece}}]})
            ));
        }
        body.push_str("data: [DONE]\n\n");
        body
    }

    #[tokio::test]
    async fn test_chat_success_sends_expected_headers_and_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer test-api-key"))
            .and(header("HTTP-Referer", "https://pygenius.ai"))
            .and(header("X-Title", "PyGenius AI"))
            .and(body_partial_json(json!({
                "model": "openai/gpt-3.5-turbo",
                "max_tokens": 2000,
                "messages": [
                    {"role": "system", "content": "be brief"},
                    {"role": "user", "content": "what is a list?"}
                ]
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(mock_completion("A list is ordered.")),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let result = client.chat("be brief", "what is a list?").await;
        assert_eq!(result.unwrap(), "A list is ordered.");
    }

    #[tokio::test]
    async fn test_chat_non_success_is_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {"message": "No auth credentials found", "code": 401}
            })))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let err = client.chat("s", "u").await.unwrap_err();
        match err {
            PyGeniusError::Api { status, body } => {
                assert_eq!(status, 401);
                assert!(body.contains("No auth credentials found"));
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_chat_server_error_is_transient() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream overloaded"))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let err = client.chat("s", "u").await.unwrap_err();
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn test_chat_invalid_json_is_parse_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let err = client.chat("s", "u").await.unwrap_err();
        assert!(matches!(err, PyGeniusError::Parse(_)));
    }

    #[tokio::test]
    async fn test_chat_empty_choices_is_missing_field() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let err = client.chat("s", "u").await.unwrap_err();
        assert_eq!(err, PyGeniusError::missing_field("choices"));
    }

    #[tokio::test]
    async fn test_chat_without_key_never_hits_network() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(mock_completion("x")))
            .expect(0)
            .mount(&mock_server)
            .await;

        let config = AiConfig::default().with_base_url(mock_server.uri());
        let client = OpenRouterClient::with_http_client(config, Client::new());
        assert!(!client.has_api_key());
        assert_eq!(
            client.complete("s", "u").await.unwrap_err(),
            PyGeniusError::NotConfigured
        );
    }

    #[tokio::test]
    async fn test_stream_yields_deltas() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(json!({"stream": true})))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Content-Type", "text/event-stream")
                    .set_body_string(sse_body(&["Loops ", "repeat ", "code."])),
            )
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let stream = client.stream("s", "u").await.unwrap();
        let pieces: Vec<String> = stream.map(|piece| piece.unwrap()).collect().await;
        assert_eq!(pieces, vec!["Loops ", "repeat ", "code."]);
    }

    #[tokio::test]
    async fn test_stream_non_success_fails_before_streaming() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let err = match client.stream("s", "u").await {
            Ok(_) => panic!("Expected an error"),
            Err(err) => err,
        };
        assert!(matches!(err, PyGeniusError::Api { status: 429, .. }));
    }

    #[tokio::test]
    async fn test_stream_collects_to_full_text() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string(sse_body(&["a", "b", "c"])))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let text = collect_text(client.chat_stream("s", "u").await.unwrap())
            .await
            .unwrap();
        assert_eq!(text, "abc");
    }

    #[test]
    fn test_extract_message_content_missing() {
        let err = extract_message_content(&json!({"choices": [{"message": {}}]})).unwrap_err();
        assert!(matches!(err, PyGeniusError::MissingField(_)));
    }

    #[test]
    fn test_total_timeout_applies_to_one_shot_requests_only() {
        let client = create_test_client("http://localhost:1");
        let total = AiConfig::default().timeouts.total_timeout();

        let one_shot = ChatRequest::new("m", "s", "u", 0.7, 10);
        let request = client.build_request(&one_shot).unwrap().build().unwrap();
        assert_eq!(request.timeout(), Some(&total));

        let streaming = ChatRequest::new("m", "s", "u", 0.7, 10).streaming();
        let request = client.build_request(&streaming).unwrap().build().unwrap();
        assert_eq!(request.timeout(), None);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = AiConfig::default();
        config.max_tokens = 0;
        assert!(OpenRouterClient::new(config).is_err());
    }
}
