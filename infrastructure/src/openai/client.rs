//! HTTP transport for the chat-completions endpoint.

use crate::openai::protocol::{ChatMessage, ChatRequest, ChatResponse};
use auction_application::GatewayError;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

/// Shared HTTP client bound to one endpoint.
pub struct ChatClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl ChatClient {
    /// Build a client whose requests fail with [`GatewayError::Timeout`]
    /// after `timeout`.
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Other(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Send one completion request and return the first choice's content.
    pub async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<String, GatewayError> {
        let request = ChatRequest { model, messages };
        debug!(
            "POST {} (model: {}, messages: {})",
            self.completions_url(),
            model,
            messages.len()
        );

        let mut builder = self.http.post(self.completions_url()).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status(status, model, &body));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        match parsed.first_content() {
            Some(content) if !content.trim().is_empty() => Ok(content.to_string()),
            Some(_) => Err(GatewayError::InvalidResponse(
                "empty completion content".to_string(),
            )),
            None => Err(GatewayError::InvalidResponse(
                "no choices in response".to_string(),
            )),
        }
    }
}

fn map_transport_error(error: reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout
    } else if error.is_connect() {
        GatewayError::ConnectionError(error.to_string())
    } else {
        GatewayError::RequestFailed(error.to_string())
    }
}

fn map_status(status: StatusCode, model: &str, body: &str) -> GatewayError {
    match status {
        StatusCode::NOT_FOUND => GatewayError::ModelNotAvailable(model.to_string()),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => GatewayError::Timeout,
        _ => GatewayError::RequestFailed(format!("status {}: {}", status, body.trim())),
    }
}

#[cfg(test)]
pub(crate) mod test_server {
    //! One-shot HTTP responder for exercising the client without a network.

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve one request with `status` and `body`; the handle yields the raw request.
    pub async fn serve_once(status: u16, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {} X\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            request
        });

        (format!("http://{}/v1", addr), handle)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buffer.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buffer);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buffer.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::test_server::serve_once;
    use super::*;

    const OK_BODY: &str = r#"{"choices":[{"message":{"role":"assistant","content":"proposal text"}}]}"#;

    #[test]
    fn test_trailing_slash_removed() {
        let client = ChatClient::new("http://localhost:8000/v1/", None, Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000/v1");
        assert_eq!(
            client.completions_url(),
            "http://localhost:8000/v1/chat/completions"
        );
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            map_status(StatusCode::NOT_FOUND, "m", ""),
            GatewayError::ModelNotAvailable(m) if m == "m"
        ));
        assert!(matches!(
            map_status(StatusCode::GATEWAY_TIMEOUT, "m", ""),
            GatewayError::Timeout
        ));
        assert!(matches!(
            map_status(StatusCode::INTERNAL_SERVER_ERROR, "m", "boom"),
            GatewayError::RequestFailed(msg) if msg.contains("boom")
        ));
    }

    #[tokio::test]
    async fn test_complete_returns_first_choice() {
        let (url, server) = serve_once(200, OK_BODY).await;
        let client = ChatClient::new(&url, Some("sk-test".to_string()), Duration::from_secs(5)).unwrap();

        let content = client
            .complete("gpt-4o-mini", &[ChatMessage::user("write a plan")])
            .await
            .unwrap();
        assert_eq!(content, "proposal text");

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /v1/chat/completions"));
        assert!(request.to_lowercase().contains("authorization: bearer sk-test"));
        assert!(request.contains("\"model\":\"gpt-4o-mini\""));
        assert!(request.contains("write a plan"));
    }

    #[tokio::test]
    async fn test_server_error_is_request_failed() {
        let (url, _server) = serve_once(500, r#"{"error":"overloaded"}"#).await;
        let client = ChatClient::new(&url, None, Duration::from_secs(5)).unwrap();

        let error = client
            .complete("gpt-4o", &[ChatMessage::user("hi")])
            .await
            .unwrap_err();
        assert!(matches!(error, GatewayError::RequestFailed(msg) if msg.contains("overloaded")));
    }

    #[tokio::test]
    async fn test_no_choices_is_invalid_response() {
        let (url, _server) = serve_once(200, r#"{"choices":[]}"#).await;
        let client = ChatClient::new(&url, None, Duration::from_secs(5)).unwrap();

        let error = client
            .complete("gpt-4o", &[ChatMessage::user("hi")])
            .await
            .unwrap_err();
        assert!(matches!(error, GatewayError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_unparsable_body_is_invalid_response() {
        let (url, _server) = serve_once(200, "not json").await;
        let client = ChatClient::new(&url, None, Duration::from_secs(5)).unwrap();

        let error = client
            .complete("gpt-4o", &[ChatMessage::user("hi")])
            .await
            .unwrap_err();
        assert!(matches!(error, GatewayError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_refused_connection_is_connection_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ChatClient::new(&format!("http://{}", addr), None, Duration::from_secs(5)).unwrap();
        let error = client
            .complete("gpt-4o", &[ChatMessage::user("hi")])
            .await
            .unwrap_err();
        assert!(matches!(error, GatewayError::ConnectionError(_)));
    }
}
