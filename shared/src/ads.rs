//! Promotional items shown in the sponsor banner

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::{SharedError, SharedResult};

/// Media asset of a promotional item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AdMedia {
    Image { url: String },
    Video { url: String },
}

/// What the banner renders for an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdPayload {
    pub media: AdMedia,
    pub alt_text: String,
    pub link_url: String,
    /// Link leaves the site and opens in a new tab
    #[serde(default)]
    pub is_external: bool,
}

/// Pool entry with its selection weight
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedItem {
    pub id: String,
    pub payload: AdPayload,
    pub weight: u32,
}

impl WeightedItem {
    pub fn new(id: impl Into<String>, payload: AdPayload, weight: u32) -> Self {
        Self {
            id: id.into(),
            payload,
            weight,
        }
    }
}

/// Built-in sponsor pool
pub fn default_pool() -> Vec<WeightedItem> {
    vec![
        WeightedItem::new(
            "ad001",
            AdPayload {
                media: AdMedia::Image {
                    url: "/images/ads/questionnaire.png".to_string(),
                },
                alt_text: "Questionnaire".to_string(),
                link_url: "https://docs.google.com/forms/d/e/1FAIpQLSdaipBlZGv6E86lNmFGAtmsCmZg42aUy7cebj751LJwFYY_cw/viewform?usp=header".to_string(),
                is_external: false,
            },
            3,
        ),
        WeightedItem::new(
            "ad002",
            AdPayload {
                media: AdMedia::Image {
                    url: "/images/ads/meiowelnavi-logo.png".to_string(),
                },
                alt_text: "Meio WelNavi".to_string(),
                link_url: "https://www.meio-u.ac.jp/welnavi/".to_string(),
                is_external: false,
            },
            1,
        ),
    ]
}

/// Load a pool from a JSON array file
pub fn load_pool(path: impl AsRef<Path>) -> SharedResult<Vec<WeightedItem>> {
    let raw = std::fs::read_to_string(path.as_ref())?;
    serde_json::from_str(&raw).map_err(|e| SharedError::DeserializationError {
        message: format!("ad pool {}: {e}", path.as_ref().display()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_pool_weights() {
        let pool = default_pool();
        let weights: Vec<u32> = pool.iter().map(|item| item.weight).collect();
        assert_eq!(weights, vec![3, 1]);
    }

    #[test]
    fn test_load_pool_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":"clip","weight":2,"payload":{{"media":{{"type":"video","url":"/v/clip.mp4"}},"alt_text":"Clip","link_url":"https://example.org","is_external":true}}}}]"#
        )
        .unwrap();

        let pool = load_pool(file.path()).unwrap();
        assert_eq!(pool.len(), 1);
        assert_eq!(pool[0].weight, 2);
        assert!(pool[0].payload.is_external);
        assert!(matches!(pool[0].payload.media, AdMedia::Video { .. }));
    }

    #[test]
    fn test_load_pool_rejects_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not a pool").unwrap();

        let result = load_pool(file.path());
        assert!(matches!(result, Err(SharedError::DeserializationError { .. })));
    }
}
