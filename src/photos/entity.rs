use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Metadata record of one search result, as found in an item's `data` array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PhotoEntity {
    pub nasa_id: String,
    pub date_created: DateTime<Utc>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub photographer: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl PhotoEntity {
    pub fn id(&self) -> &str {
        &self.nasa_id
    }
}
