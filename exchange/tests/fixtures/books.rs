//! Book records and catalog responses used across flow tests

use serde_json::{Value, json};
use shared::BookRecord;

pub const DONATED_ISBN: &str = "9784000000000";
pub const SHELVED_ISBN: &str = "9784000000001";

/// The record a donor enters by hand
pub fn donated_book() -> BookRecord {
    BookRecord::titled("Intro to X").with_isbn(DONATED_ISBN)
}

/// A book already on the shelf
#[allow(dead_code)]
pub fn shelved_book() -> BookRecord {
    BookRecord::titled("Linear Algebra Done Right")
        .with_isbn(SHELVED_ISBN)
        .with_author("Sheldon Axler")
}

/// Catalog volumes response holding one match for `isbn`
#[allow(dead_code)]
pub fn volumes_response(isbn: &str, title: &str) -> Value {
    json!({
        "totalItems": 1,
        "items": [{
            "volumeInfo": {
                "title": title,
                "authors": ["Sheldon Axler"],
                "industryIdentifiers": [
                    { "type": "ISBN_10", "identifier": "3319110799" },
                    { "type": "ISBN_13", "identifier": isbn }
                ],
                "imageLinks": { "thumbnail": "http://books.example/cover.jpg" }
            }
        }]
    })
}
