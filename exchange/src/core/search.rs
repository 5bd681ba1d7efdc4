//! Keyword search page: find a book by title or author, then hand it to the donate page

use url::form_urlencoded;

use shared::{BookRecord, DONATE_PATH, LookupFailure, Navigation, PageId, page_info, page_warn};
use crate::traits::MetadataLookup;

const NO_RESULTS_MESSAGE: &str = "No books were found.";

/// Search page state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookSearch {
    results: Vec<BookRecord>,
    error: Option<String>,
}

impl BookSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Candidates from the last search, in provider order
    pub fn results(&self) -> &[BookRecord] {
        &self.results
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Run a title/author search, replacing previous results
    pub async fn search<L>(&mut self, lookup: &L, title: &str, author: &str) -> Result<usize, LookupFailure>
    where
        L: MetadataLookup + ?Sized,
    {
        self.results.clear();
        self.error = None;

        let title = Some(title.trim()).filter(|t| !t.is_empty()).map(str::to_string);
        let author = Some(author.trim()).filter(|a| !a.is_empty()).map(str::to_string);
        if title.is_none() && author.is_none() {
            self.error = Some(LookupFailure::InvalidQuery.user_message());
            return Err(LookupFailure::InvalidQuery);
        }

        match lookup.lookup_by_text(title, author).await {
            Ok(candidates) => {
                page_info!(PageId::FindBook, "🔍 Search returned {} candidates", candidates.len());
                if candidates.is_empty() {
                    self.error = Some(NO_RESULTS_MESSAGE.to_string());
                }
                self.results = candidates;
                Ok(self.results.len())
            }
            Err(failure) => {
                page_warn!(PageId::FindBook, error = %failure, "Keyword search failed");
                self.error = Some(failure.user_message());
                Err(failure)
            }
        }
    }

    /// Navigation to the donate page prefilled with the chosen candidate
    pub fn select(&self, index: usize) -> Option<Navigation> {
        self.results.get(index).map(donate_navigation)
    }
}

/// `/donate?title=..&author=..&isbn=..&thumbnail=..` for a candidate
pub fn donate_navigation(book: &BookRecord) -> Navigation {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("title", &book.title)
        .append_pair("author", book.author().unwrap_or_default())
        .append_pair("isbn", book.isbn().unwrap_or_default())
        .append_pair("thumbnail", book.thumbnail().unwrap_or_default())
        .finish();

    Navigation::ToDonate {
        url: format!("{DONATE_PATH}?{query}"),
    }
}
