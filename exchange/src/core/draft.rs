//! Entry page draft for a donate or receive transaction

use url::form_urlencoded;

use shared::{
    BookRecord, Navigation, PageId, PendingTransaction, TransactionKind, is_isbn_shaped, logging, normalize_isbn,
    page_info, page_warn,
};
use crate::core::codec;
use crate::traits::MetadataLookup;
use crate::types::{DraftError, LookupOutcome};

const NOT_FOUND_MESSAGE: &str = "No book was found for this ISBN. You can enter the details by hand.";

/// In-progress record on an entry page
///
/// Fields hold whatever the user typed; they are normalized into a
/// `BookRecord` only when the draft advances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    kind: TransactionKind,
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub thumbnail: String,
    search_error: Option<String>,
}

impl TransactionDraft {
    pub fn new(kind: TransactionKind) -> Self {
        Self {
            kind,
            isbn: String::new(),
            title: String::new(),
            author: String::new(),
            thumbnail: String::new(),
            search_error: None,
        }
    }

    pub fn donate() -> Self {
        Self::new(TransactionKind::Donate)
    }

    pub fn receive() -> Self {
        Self::new(TransactionKind::Receive)
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    fn page(&self) -> PageId {
        PageId::entry(self.kind)
    }

    /// Inline, non-fatal lookup message
    pub fn search_error(&self) -> Option<&str> {
        self.search_error.as_deref()
    }

    /// Current fields as a record
    pub fn book(&self) -> BookRecord {
        BookRecord::titled(self.title.trim())
            .with_isbn(normalize_isbn(&self.isbn))
            .with_author(self.author.trim())
            .with_thumbnail(self.thumbnail.trim())
    }

    /// Overwrite the fields present in `incoming`; returns whether anything changed
    pub fn merge(&mut self, incoming: &BookRecord) -> bool {
        let mut merged = false;
        if incoming.has_title() {
            self.title = incoming.title.clone();
            merged = true;
        }
        for (field, value) in [
            (&mut self.isbn, incoming.isbn()),
            (&mut self.author, incoming.author()),
            (&mut self.thumbnail, incoming.thumbnail()),
        ] {
            if let Some(value) = value {
                *field = value.to_string();
                merged = true;
            }
        }
        merged
    }

    /// Merge fields handed over in a query string (e.g. from the search page)
    ///
    /// Returns true when something was merged, at which point the page drops
    /// the query from its URL.
    pub fn merge_query(&mut self, query: &str) -> bool {
        let mut incoming = BookRecord::default();
        for (key, value) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            match key.as_ref() {
                "title" => incoming.title = value.into_owned(),
                "author" => incoming = incoming.with_author(value.into_owned()),
                "isbn" => incoming = incoming.with_isbn(value.into_owned()),
                "thumbnail" => incoming = incoming.with_thumbnail(value.into_owned()),
                _ => {}
            }
        }

        let merged = self.merge(&incoming);
        if merged {
            page_info!(self.page(), "📥 Prefilled draft from navigation: {}", self.title);
        }
        merged
    }

    /// Look up the entered identifier and fill the other fields from the first candidate
    pub async fn lookup_identifier<L>(&mut self, lookup: &L) -> LookupOutcome
    where
        L: MetadataLookup + ?Sized,
    {
        self.search_error = None;
        let isbn = normalize_isbn(&self.isbn);
        if isbn.is_empty() {
            return LookupOutcome::Skipped;
        }

        match lookup.lookup_by_identifier(&isbn).await {
            Ok(candidates) => match candidates.into_iter().next() {
                Some(found) => {
                    // an identifier-only candidate keeps what the user typed as title
                    if found.has_title() {
                        self.title = found.title.clone();
                    }
                    self.author = found.author().unwrap_or_default().to_string();
                    self.thumbnail = found.thumbnail().unwrap_or_default().to_string();
                    page_info!(self.page(), "🔍 ISBN {} resolved to '{}'", isbn, self.title);
                    LookupOutcome::Populated
                }
                None => {
                    page_info!(self.page(), "🔍 No catalog match for ISBN {}", isbn);
                    self.search_error = Some(NOT_FOUND_MESSAGE.to_string());
                    LookupOutcome::NotFound
                }
            },
            Err(failure) => {
                page_warn!(self.page(), error = %failure, "ISBN lookup failed");
                self.search_error = Some(failure.user_message());
                LookupOutcome::Failed(failure)
            }
        }
    }

    /// Take a raw identifier from the barcode scanner and look it up
    pub async fn capture<L>(&mut self, raw_code: &str, lookup: &L) -> LookupOutcome
    where
        L: MetadataLookup + ?Sized,
    {
        self.isbn = normalize_isbn(raw_code);
        logging::log_progress(self.page(), "Barcode captured", &self.isbn);
        if !self.isbn.is_empty() && !is_isbn_shaped(&self.isbn) {
            // still looked up; the catalog decides
            page_warn!(self.page(), code = %self.isbn, "Captured code does not look like an ISBN");
        }
        self.lookup_identifier(lookup).await
    }

    pub fn can_advance(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// Encode the draft and point at the confirmation page; makes no network call
    pub fn advance(&self) -> Result<Navigation, DraftError> {
        if !self.can_advance() {
            return Err(DraftError::TitleRequired);
        }

        let transaction = PendingTransaction::new(self.kind, self.book()).with_origin(self.page().to_string());
        let url = codec::confirm_url(&transaction).map_err(|e| DraftError::Encoding(e.to_string()))?;

        page_info!(self.page(), "➡️ Advancing {} of '{}' to confirmation", self.kind, transaction.book.title);
        Ok(Navigation::ToConfirm { kind: self.kind, url })
    }
}
