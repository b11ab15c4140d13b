//! Background search worker.
//!
//! The UI sends [`SearchCommand`]s and polls [`SearchResult`]s with
//! `try_recv` every frame.  The worker runs on the tokio runtime and never
//! touches reading state; its only output is a new text or an error message.
//!
//! A fetch cannot be canceled.  If the user moves on before it completes,
//! the result is still delivered and the UI decides what to do with it.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::config::Language;
use crate::reader::Waker;

use super::article::ArticleSource;

/// Requests sent from the UI to the search worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchCommand {
    Fetch { query: String, language: Language },
}

impl SearchCommand {
    /// Build a fetch command, `None` for a blank query.
    pub fn fetch(query: &str, language: Language) -> Option<Self> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        Some(SearchCommand::Fetch {
            query: query.to_owned(),
            language,
        })
    }
}

/// Outcomes delivered back to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    /// An article body ready to replace the current text.
    Loaded { query: String, text: String },
    /// The fetch failed; `message` is ready for display.
    Failed { message: String },
}

/// Run the worker until `command_rx` is closed.
pub async fn run_search_worker(
    source: Arc<dyn ArticleSource>,
    mut command_rx: mpsc::Receiver<SearchCommand>,
    result_tx: mpsc::Sender<SearchResult>,
    waker: Option<Waker>,
) {
    while let Some(command) = command_rx.recv().await {
        let SearchCommand::Fetch { query, language } = command;

        let result = match source.fetch(&query, language).await {
            Ok(text) => {
                log::info!(
                    "search: loaded {:?} ({}, {} bytes)",
                    query,
                    language.code(),
                    text.len()
                );
                SearchResult::Loaded { query, text }
            }
            Err(e) => {
                log::warn!("search: {:?} failed: {e:?}", query);
                SearchResult::Failed {
                    message: e.to_string(),
                }
            }
        };

        if result_tx.send(result).await.is_err() {
            break;
        }
        if let Some(wake) = &waker {
            wake();
        }
    }

    log::info!("search: command channel closed, worker shutting down");
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
