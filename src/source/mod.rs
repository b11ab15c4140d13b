//! Text sources feeding the reader.
//!
//! * [`ArticleSource`] — async trait for fetching an article body.
//! * [`WikipediaSource`] — MediaWiki search + plain-text extract.
//! * [`run_search_worker`] — background task turning [`SearchCommand`]s into
//!   [`SearchResult`]s.
//! * [`read_clipboard_text`] — paste from the system clipboard.
//!
//! Every failure is turned into a display string at this boundary; nothing
//! here can affect a running reading session.

pub mod article;
pub mod clipboard;
pub mod worker;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use article::{parse_extract, ArticleSource, SearchError, WikipediaSource};
pub use clipboard::{read_clipboard_text, ClipboardError};
pub use worker::{run_search_worker, SearchCommand, SearchResult};
