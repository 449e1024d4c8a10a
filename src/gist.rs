use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::GistConfig;
use crate::error::ReportError;

pub const DESCRIPTION: &str = "Token Invalidator bot by cane#8081.";
const CONTENT_TYPE: &str = "application/vnd.github.v3+json";

#[derive(Debug, Clone, Serialize)]
pub struct TokenPayload {
    pub description: String,
    pub public: bool,
    pub files: Files,
}

#[derive(Debug, Clone, Serialize)]
pub struct Files {
    #[serde(rename = "tokens.txt")]
    pub tokens: TokenFile,
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenFile {
    pub content: String,
}

#[derive(Debug, Deserialize)]
struct GistResponse {
    html_url: String,
}

impl TokenPayload {
    /// Public gist holding one token per line, in detection order.
    pub fn new(tokens: &[String]) -> Self {
        Self {
            description: DESCRIPTION.to_string(),
            public: true,
            files: Files {
                tokens: TokenFile {
                    content: tokens.join("\n"),
                },
            },
        }
    }
}

pub struct GistClient {
    client: reqwest::Client,
    config: GistConfig,
}

impl GistClient {
    pub fn new(config: GistConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Publish `tokens` as a public gist and return its `html_url`.
    pub async fn create(&self, tokens: &[String]) -> Result<String, ReportError> {
        let body = serde_json::to_vec(&TokenPayload::new(tokens)).map_err(ReportError::Serialize)?;

        debug!(
            "Creating gist with {} token(s) at {}",
            tokens.len(),
            self.config.api_url
        );

        let response = self
            .client
            .post(&self.config.api_url)
            .header(reqwest::header::AUTHORIZATION, &self.config.api_token)
            .header(reqwest::header::CONTENT_TYPE, CONTENT_TYPE)
            .header(reqwest::header::USER_AGENT, &self.config.user_agent)
            .body(body)
            .send()
            .await
            .map_err(ReportError::Transport)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(ReportError::Transport)?;

        if !status.is_success() {
            return Err(ReportError::Status {
                status,
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        let gist: GistResponse =
            serde_json::from_slice(&bytes).map_err(|source| ReportError::Decode { status, source })?;

        Ok(gist.html_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GistClient {
        let mut config = GistConfig::new("token test-pat");
        config.api_url = format!("{}/gists", server.uri());
        GistClient::new(config)
    }

    #[test]
    fn test_payload_shape() {
        let tokens = vec!["abcd1234abcd1234abcd1234.abcdef.abcdefghijklmnopqrstuvwxy".to_string()];
        let value = serde_json::to_value(TokenPayload::new(&tokens)).unwrap();
        assert_eq!(
            value,
            json!({
                "description": "Token Invalidator bot by cane#8081.",
                "public": true,
                "files": {
                    "tokens.txt": {
                        "content": "abcd1234abcd1234abcd1234.abcdef.abcdefghijklmnopqrstuvwxy"
                    }
                }
            })
        );
    }

    #[test]
    fn test_payload_joins_tokens_with_newlines() {
        let tokens = vec!["a".to_string(), "b".to_string(), "a".to_string()];
        assert_eq!(TokenPayload::new(&tokens).files.tokens.content, "a\nb\na");
    }

    #[tokio::test]
    async fn test_create_returns_html_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/gists"))
            .and(header("authorization", "token test-pat"))
            .and(header("content-type", CONTENT_TYPE))
            .and(header("user-agent", "Token Invalidator bot"))
            .and(body_json(json!({
                "description": DESCRIPTION,
                "public": true,
                "files": { "tokens.txt": { "content": "t1\nt2" } }
            })))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!({
                    "id": "abc",
                    "html_url": "https://gist.example/abc"
                })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let url = client_for(&server)
            .create(&["t1".to_string(), "t2".to_string()])
            .await
            .unwrap();
        assert_eq!(url, "https://gist.example/abc");
    }

    #[tokio::test]
    async fn test_create_rejects_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "message": "Bad credentials" })),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).create(&["t".to_string()]).await.unwrap_err();
        assert!(matches!(err, ReportError::Status { .. }));
        assert_eq!(err.status(), Some(reqwest::StatusCode::UNAUTHORIZED));
        assert!(err.to_string().contains("401"));
    }

    #[tokio::test]
    async fn test_create_reports_status_on_decode_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server).create(&["t".to_string()]).await.unwrap_err();
        assert!(matches!(err, ReportError::Decode { .. }));
        assert_eq!(err.status(), Some(reqwest::StatusCode::CREATED));
        assert!(err.to_string().contains("201"));
    }

    #[tokio::test]
    async fn test_create_requires_html_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "abc" })))
            .mount(&server)
            .await;

        let err = client_for(&server).create(&["t".to_string()]).await.unwrap_err();
        assert!(matches!(err, ReportError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_create_transport_failure() {
        let mut config = GistConfig::new("token test-pat");
        config.api_url = "http://127.0.0.1:1/gists".to_string();
        let client = GistClient::new(config);

        let err = client.create(&["t".to_string()]).await.unwrap_err();
        assert!(matches!(err, ReportError::Transport(_)));
        assert_eq!(err.status(), None);
    }
}
