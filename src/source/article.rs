//! `ArticleSource` trait and the Wikipedia search implementation.
//!
//! [`WikipediaSource`] runs one MediaWiki `generator=search` query with
//! `prop=extracts&explaintext=1` and returns the plain-text body of the best
//! match.  The endpoint host and timeout come from [`SearchConfig`].

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::config::{Language, SearchConfig};

// ---------------------------------------------------------------------------
// SearchError
// ---------------------------------------------------------------------------

/// Ways an article fetch can fail.  `Display` is the user-facing message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// Transport failure or a non-success HTTP status.
    #[error("Network request failed ({0}). Please check your connection and try again.")]
    FetchFailed(String),

    /// The search matched no page.
    #[error("No article found for \"{query}\". Please try a different search term.")]
    NoResults { query: String },

    /// A page matched but carried no usable text.
    #[error("Could not extract text from the article.")]
    NoExtractableText,

    /// The response body was not the expected JSON.  Shown to the user as a
    /// failed request.
    #[error("Network request failed (unexpected response: {0}). Please check your connection and try again.")]
    Parse(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SearchError::FetchFailed("timed out".into())
        } else {
            SearchError::FetchFailed(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// ArticleSource trait
// ---------------------------------------------------------------------------

/// Supplies article text for a search query.
///
/// Implementors must be `Send + Sync` so the search worker can hold them as
/// `Arc<dyn ArticleSource>`.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    async fn fetch(&self, query: &str, language: Language) -> Result<String, SearchError>;
}

// ---------------------------------------------------------------------------
// WikipediaSource
// ---------------------------------------------------------------------------

/// Fetches plain-text article extracts from Wikipedia.
pub struct WikipediaSource {
    client: reqwest::Client,
    config: SearchConfig,
}

impl WikipediaSource {
    /// Build a source from config.
    ///
    /// The client carries the configured timeout.  If the builder fails a
    /// default client is used instead.
    pub fn from_config(config: &SearchConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("vestal/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
        }
    }

    /// API endpoint for `language`.
    pub fn endpoint(&self, language: Language) -> String {
        self.config
            .endpoint_template
            .replace("{lang}", language.code())
    }
}

#[async_trait]
impl ArticleSource for WikipediaSource {
    async fn fetch(&self, query: &str, language: Language) -> Result<String, SearchError> {
        let url = self.endpoint(language);
        log::debug!("search: {url} q={query:?}");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("prop", "extracts"),
                ("exlimit", "1"),
                ("explaintext", "1"),
                ("generator", "search"),
                ("gsrsearch", query),
                ("gsrlimit", "1"),
                ("origin", "*"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::FetchFailed(format!("HTTP {status}")));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| SearchError::Parse(e.to_string()))?;

        parse_extract(&json, query)
    }
}

/// Pull the article body out of a `prop=extracts` response.
///
/// A response without `query.pages`, or whose page id is `-1`, matched
/// nothing.  A page whose `extract` is missing or blank has no usable text.
pub fn parse_extract(json: &Value, query: &str) -> Result<String, SearchError> {
    let no_results = || SearchError::NoResults {
        query: query.to_owned(),
    };

    let pages = json
        .get("query")
        .and_then(|q| q.get("pages"))
        .and_then(Value::as_object)
        .ok_or_else(no_results)?;

    let (page_id, page) = pages.iter().next().ok_or_else(no_results)?;
    if page_id == "-1" || page.get("missing").is_some() {
        return Err(no_results());
    }

    match page.get("extract").and_then(Value::as_str) {
        Some(extract) if !extract.trim().is_empty() => Ok(extract.to_owned()),
        _ => Err(SearchError::NoExtractableText),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_page_text() {
        let body = json!({
            "batchcomplete": "",
            "query": { "pages": { "9228": {
                "pageid": 9228, "ns": 0, "title": "Earth", "index": 1,
                "extract": "Earth is the third planet from the Sun."
            }}}
        });
        assert_eq!(
            parse_extract(&body, "earth").as_deref(),
            Ok("Earth is the third planet from the Sun.")
        );
    }

    #[test]
    fn missing_query_object_is_no_results() {
        let body = json!({ "batchcomplete": "" });
        assert_eq!(
            parse_extract(&body, "zzqx"),
            Err(SearchError::NoResults {
                query: "zzqx".into()
            })
        );
    }

    #[test]
    fn minus_one_page_is_no_results() {
        let body = json!({ "query": { "pages": { "-1": { "missing": "" } } } });
        assert!(matches!(
            parse_extract(&body, "nothing"),
            Err(SearchError::NoResults { .. })
        ));
    }

    #[test]
    fn empty_pages_is_no_results() {
        let body = json!({ "query": { "pages": {} } });
        assert!(matches!(
            parse_extract(&body, "x"),
            Err(SearchError::NoResults { .. })
        ));
    }

    #[test]
    fn page_without_extract_is_no_text() {
        let body = json!({ "query": { "pages": { "42": { "title": "Stub" } } } });
        assert_eq!(parse_extract(&body, "stub"), Err(SearchError::NoExtractableText));

        let blank = json!({ "query": { "pages": { "42": { "extract": "  \n" } } } });
        assert_eq!(parse_extract(&blank, "stub"), Err(SearchError::NoExtractableText));
    }

    #[test]
    fn failure_messages_are_distinct() {
        let messages = [
            SearchError::FetchFailed("HTTP 503".into()).to_string(),
            SearchError::NoResults {
                query: "q".into(),
            }
            .to_string(),
            SearchError::NoExtractableText.to_string(),
        ];
        assert_ne!(messages[0], messages[1]);
        assert_ne!(messages[1], messages[2]);
        assert_ne!(messages[0], messages[2]);
        assert!(messages[1].contains("\"q\""));
    }

    #[test]
    fn parse_error_reads_as_failed_request() {
        let parse = SearchError::Parse("bad body".into()).to_string();
        let fetch = SearchError::FetchFailed("HTTP 500".into()).to_string();
        assert!(parse.starts_with("Network request failed"));
        assert!(parse.contains("bad body"));
        assert_eq!(
            parse.split('(').next(),
            fetch.split('(').next(),
        );
    }

    // --- fetch against a local HTTP server --------------------------------

    /// Serve one canned HTTP reply on a loopback port and return an endpoint
    /// template pointing at it.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("local addr");

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.expect("accept");
            let mut request = [0u8; 4096];
            let _ = stream.read(&mut request).await;
            let reply = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(reply.as_bytes()).await.expect("write");
            let _ = stream.shutdown().await;
        });

        format!("http://{addr}/{{lang}}/api.php")
    }

    fn local_source(endpoint_template: String) -> WikipediaSource {
        WikipediaSource::from_config(&SearchConfig {
            endpoint_template,
            timeout_secs: 5,
            ..SearchConfig::default()
        })
    }

    #[tokio::test]
    async fn http_error_status_is_fetch_failed() {
        let source = local_source(serve_once("503 Service Unavailable", "").await);

        match source.fetch("earth", Language::En).await {
            Err(SearchError::FetchFailed(msg)) => assert!(msg.contains("503"), "{msg}"),
            other => panic!("expected FetchFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_body_is_parse_error() {
        let source = local_source(serve_once("200 OK", "not json").await);

        let result = source.fetch("earth", Language::En).await;
        assert!(matches!(result, Err(SearchError::Parse(_))), "{result:?}");
    }

    #[tokio::test]
    async fn successful_fetch_returns_extract() {
        let body = r#"{"query":{"pages":{"7":{"pageid":7,"title":"Moon","extract":"The Moon orbits Earth."}}}}"#;
        let source = local_source(serve_once("200 OK", body).await);

        let text = source.fetch("moon", Language::It).await.expect("extract");
        assert_eq!(text, "The Moon orbits Earth.");
    }

    #[tokio::test]
    async fn empty_search_over_http_is_no_results() {
        let body = r#"{"batchcomplete":""}"#;
        let source = local_source(serve_once("200 OK", body).await);

        let result = source.fetch("zzqx", Language::En).await;
        assert_eq!(
            result,
            Err(SearchError::NoResults {
                query: "zzqx".into()
            })
        );
    }

    #[test]
    fn endpoint_substitutes_language() {
        let source = WikipediaSource::from_config(&SearchConfig::default());
        assert_eq!(
            source.endpoint(Language::It),
            "https://it.wikipedia.org/w/api.php"
        );
    }

    #[test]
    fn source_is_object_safe() {
        let source: Box<dyn ArticleSource> =
            Box::new(WikipediaSource::from_config(&SearchConfig::default()));
        drop(source);
    }
}
