//! Book and transaction types shared by every page controller

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Kind of exchange transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Giving up ownership of a book into the shared pool
    Donate,
    /// Taking an already shelved book
    Receive,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Donate => write!(f, "donate"),
            TransactionKind::Receive => write!(f, "receive"),
        }
    }
}

/// Bibliographic record for a single book
///
/// Optional fields are only set through the `with_*` builders or by
/// deserializing, both of which turn blank values into `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    isbn: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    author: Option<String>,
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    thumbnail: Option<String>,
}

impl BookRecord {
    /// Record with only a title
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_isbn(mut self, isbn: impl Into<String>) -> Self {
        self.isbn = present(isbn.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = present(author.into());
        self
    }

    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = present(thumbnail.into());
        self
    }

    pub fn isbn(&self) -> Option<&str> {
        self.isbn.as_deref()
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn thumbnail(&self) -> Option<&str> {
        self.thumbnail.as_deref()
    }

    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }

    pub fn has_isbn(&self) -> bool {
        self.isbn.as_deref().is_some_and(|isbn| !isbn.trim().is_empty())
    }

    /// A record with neither an identifier nor a title cannot advance the workflow
    pub fn is_usable(&self) -> bool {
        self.has_isbn() || self.has_title()
    }

    /// Thumbnail URL for display, upgraded to https
    pub fn display_thumbnail(&self) -> Option<String> {
        self.thumbnail.as_ref().map(|url| match url.strip_prefix("http://") {
            Some(rest) => format!("https://{rest}"),
            None => url.clone(),
        })
    }
}

/// A transaction waiting for confirmation
///
/// Serialized flat: the book fields sit next to `kind` and the transient
/// `from` tag, which is how the token travels between pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTransaction {
    #[serde(flatten)]
    pub book: BookRecord,
    pub kind: TransactionKind,
    #[serde(rename = "from", default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

impl PendingTransaction {
    pub fn new(kind: TransactionKind, book: BookRecord) -> Self {
        Self { book, kind, origin: None }
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Drop transient workflow metadata, keeping only the book
    pub fn into_book(self) -> BookRecord {
        self.book
    }
}

/// Body of the donate endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonatePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl From<BookRecord> for DonatePayload {
    fn from(book: BookRecord) -> Self {
        Self {
            isbn: book.isbn,
            title: book.title,
            author: book.author,
            thumbnail: book.thumbnail,
        }
    }
}

/// Body of the receive endpoint: the identifier and nothing else
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivePayload {
    pub isbn: String,
}

/// Strip the separators people and scanners put into ISBNs
pub fn normalize_isbn(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect()
}

/// Whether a normalized identifier has the shape of an ISBN-10 or ISBN-13
pub fn is_isbn_shaped(isbn: &str) -> bool {
    let bytes = isbn.as_bytes();
    match bytes.len() {
        13 => bytes.iter().all(u8::is_ascii_digit),
        10 => {
            bytes[..9].iter().all(u8::is_ascii_digit)
                && (bytes[9].is_ascii_digit() || bytes[9] == b'X' || bytes[9] == b'x')
        }
        _ => false,
    }
}

fn present(value: String) -> Option<String> {
    if value.trim().is_empty() { None } else { Some(value) }
}

fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.and_then(present))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_strings_deserialize_as_absent() {
        let json = r#"{"isbn":"","title":"Linear Algebra","author":"","thumbnail":"","kind":"donate","from":"donate"}"#;
        let pending: PendingTransaction = serde_json::from_str(json).unwrap();

        assert_eq!(pending.book.isbn(), None);
        assert_eq!(pending.book.author(), None);
        assert_eq!(pending.book.thumbnail(), None);
        assert_eq!(pending.origin.as_deref(), Some("donate"));
    }

    #[test]
    fn test_transaction_serializes_flat() {
        let pending = PendingTransaction::new(
            TransactionKind::Receive,
            BookRecord::default().with_isbn("9784000000001"),
        );
        let value = serde_json::to_value(&pending).unwrap();

        assert_eq!(value["isbn"], "9784000000001");
        assert_eq!(value["kind"], "receive");
        assert!(value.get("from").is_none());
        assert!(value.get("author").is_none());
    }

    #[test]
    fn test_usable_record() {
        assert!(!BookRecord::default().is_usable());
        assert!(BookRecord::titled("Calculus").is_usable());
        assert!(BookRecord::default().with_isbn("4000000000").is_usable());
        assert!(!BookRecord::titled("   ").is_usable());
    }

    #[test]
    fn test_display_thumbnail_upgrades_http() {
        let book = BookRecord::titled("Optics").with_thumbnail("http://books.example/t.jpg");
        assert_eq!(book.display_thumbnail().as_deref(), Some("https://books.example/t.jpg"));

        let secure = BookRecord::titled("Optics").with_thumbnail("https://books.example/t.jpg");
        assert_eq!(secure.display_thumbnail().as_deref(), Some("https://books.example/t.jpg"));
    }

    #[test]
    fn test_donate_payload_omits_absent_fields() {
        let book = BookRecord::titled("Intro to X").with_isbn("9784000000000");
        let payload = DonatePayload::from(book);

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({"isbn": "9784000000000", "title": "Intro to X"})
        );
    }

    #[test]
    fn test_isbn_shapes() {
        assert_eq!(normalize_isbn(" 978-4-00-000000-0 "), "9784000000000");
        assert!(is_isbn_shaped("9784000000000"));
        assert!(is_isbn_shaped("400000000X"));
        assert!(!is_isbn_shaped("97840000"));
        assert!(!is_isbn_shaped("978400000000A"));
    }
}
