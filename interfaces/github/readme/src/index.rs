use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Subset of the GitHub "repository content" object returned for a README.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubReadme {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub encoding: String,
    pub html_url: Option<String>,
}

impl GitHubReadme {
    /// Decodes `content` into README text.
    ///
    /// GitHub wraps base64 payloads at 60 columns, so whitespace is stripped
    /// before decoding. Any other encoding is returned as is.
    pub fn decoded_content(&self) -> Result<String, DecodeReadmeError> {
        if self.encoding != "base64" {
            return Ok(self.content.clone());
        }

        let compact: String = self
            .content
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();

        let bytes = STANDARD
            .decode(compact.as_bytes())
            .map_err(|source| DecodeReadmeError::Base64 { source })?;

        String::from_utf8(bytes).map_err(|source| DecodeReadmeError::InvalidUtf8 { source })
    }
}

pub async fn fetch_repo_readme(
    client: &Client,
    api_url: &str,
    token: &str,
    owner: &str,
    name: &str,
) -> Result<GitHubReadme, FetchRepoReadmeError> {
    if token.trim().is_empty() {
        return Err(FetchRepoReadmeError::MissingToken);
    }

    let url = format!("{}/repos/{owner}/{name}/readme", api_url.trim_end_matches('/'));

    let response = client
        .get(url)
        .header("Authorization", format!("Bearer {token}"))
        .header("Accept", "application/vnd.github+json")
        .header("X-GitHub-Api-Version", "2022-11-28")
        .header("User-Agent", "readme-links")
        .send()
        .await
        .map_err(|source| FetchRepoReadmeError::RequestSend { source })?;

    let status = response.status();

    let body = response
        .text()
        .await
        .map_err(|source| FetchRepoReadmeError::ResponseRead { source })?;

    if !status.is_success() {
        return Err(FetchRepoReadmeError::UnexpectedStatus { status, body });
    }

    serde_json::from_str(&body)
        .map_err(|source| FetchRepoReadmeError::DeserializeResponseBody { source })
}

#[derive(Debug, Error)]
pub enum FetchRepoReadmeError {
    #[error("GitHub access token is missing or empty")]
    MissingToken,

    #[error("RequestSend: {source}")]
    RequestSend {
        source: reqwest::Error,
    },

    #[error("ResponseRead: {source}")]
    ResponseRead {
        source: reqwest::Error,
    },

    #[error("UnexpectedStatus: {status}")]
    UnexpectedStatus {
        status: StatusCode,
        body: String,
    },

    #[error("DeserializeResponseBody: {source}")]
    DeserializeResponseBody {
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum DecodeReadmeError {
    #[error("Base64: {source}")]
    Base64 {
        source: base64::DecodeError,
    },

    #[error("InvalidUtf8: {source}")]
    InvalidUtf8 {
        source: std::string::FromUtf8Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn readme_body(text: &str) -> serde_json::Value {
        let encoded = STANDARD.encode(text);
        // GitHub splits the payload over several lines
        let (head, tail) = encoded.split_at(encoded.len() / 2);
        serde_json::json!({
            "name": "README.md",
            "path": "README.md",
            "content": format!("{head}\n{tail}\n"),
            "encoding": "base64",
            "html_url": "https://github.com/avelino/awesome-go/blob/main/README.md",
        })
    }

    #[tokio::test]
    async fn fetches_and_decodes_readme() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/repos/avelino/awesome-go/readme")
                .header("Authorization", "Bearer secret")
                .header("Accept", "application/vnd.github+json");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(readme_body("# Awesome Go\nhttps://github.com/gin-gonic/gin\n"));
        });

        let readme = fetch_repo_readme(
            &Client::new(),
            &server.base_url(),
            "secret",
            "avelino",
            "awesome-go",
        )
        .await
        .unwrap();

        mock.assert();
        assert_eq!(
            readme.html_url.as_deref(),
            Some("https://github.com/avelino/awesome-go/blob/main/README.md")
        );
        assert_eq!(
            readme.decoded_content().unwrap(),
            "# Awesome Go\nhttps://github.com/gin-gonic/gin\n"
        );
    }

    #[tokio::test]
    async fn missing_token_skips_the_request() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.path_contains("/readme");
            then.status(200);
        });

        let err = fetch_repo_readme(&Client::new(), &server.base_url(), "  ", "o", "r")
            .await
            .unwrap_err();

        assert!(matches!(err, FetchRepoReadmeError::MissingToken));
        mock.assert_hits(0);
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/repos/nobody/nothing/readme");
            then.status(404).body(r#"{"message":"Not Found"}"#);
        });

        let err = fetch_repo_readme(&Client::new(), &server.base_url(), "t", "nobody", "nothing")
            .await
            .unwrap_err();

        match err {
            FetchRepoReadmeError::UnexpectedStatus { status, body } => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert!(body.contains("Not Found"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_a_deserialize_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/repos/o/r/readme");
            then.status(200).body("not json");
        });

        let err = fetch_repo_readme(&Client::new(), &server.base_url(), "t", "o", "r")
            .await
            .unwrap_err();

        assert!(matches!(err, FetchRepoReadmeError::DeserializeResponseBody { .. }));
    }

    #[tokio::test]
    async fn invalid_base64_is_a_decode_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/repos/o/r/readme");
            then.status(200).json_body(serde_json::json!({
                "name": "README.md",
                "path": "README.md",
                "content": "!!!not base64!!!",
                "encoding": "base64",
            }));
        });

        let readme = fetch_repo_readme(&Client::new(), &server.base_url(), "t", "o", "r")
            .await
            .unwrap();

        assert!(matches!(
            readme.decoded_content(),
            Err(DecodeReadmeError::Base64 { .. })
        ));
    }

    #[test]
    fn non_base64_encoding_is_returned_verbatim() {
        let readme = GitHubReadme {
            content: "plain text".to_string(),
            encoding: "none".to_string(),
            html_url: None,
        };

        assert_eq!(readme.decoded_content().unwrap(), "plain text");
    }

    #[test]
    fn non_utf8_payload_is_rejected() {
        let readme = GitHubReadme {
            content: STANDARD.encode([0xff, 0xfe, 0xfd]),
            encoding: "base64".to_string(),
            html_url: None,
        };

        assert!(matches!(
            readme.decoded_content(),
            Err(DecodeReadmeError::InvalidUtf8 { .. })
        ));
    }
}
