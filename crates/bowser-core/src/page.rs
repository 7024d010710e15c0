//! Page data structure
//!
//! A page is one submitted URL plus whatever the user captured for it.
//! The id is fixed at creation; everything else may change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use bowser_storage::NewPageData;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    id: Uuid,
    /// Source URL
    pub url: Url,
    /// Display title, the URL until something better is known
    pub title: String,
    pub last_updated: DateTime<Utc>,
    /// Extracted page text
    pub full_text: Option<String>,
    /// Encoded snapshot image
    pub snapshot: Option<Vec<u8>>,
}

impl Page {
    pub fn new(url: Url) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: url.to_string(),
            url,
            last_updated: Utc::now(),
            full_text: None,
            snapshot: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.touch();
    }

    pub fn set_full_text(&mut self, text: Option<String>) {
        self.full_text = text;
        self.touch();
    }

    pub fn set_snapshot(&mut self, bytes: Vec<u8>) {
        self.snapshot = Some(bytes);
        self.touch();
    }

    fn touch(&mut self) {
        self.last_updated = Utc::now();
    }

    /// Row view used when inserting into the store.
    pub fn as_row(&self) -> NewPageData<'_> {
        NewPageData {
            id: &self.id,
            title: &self.title,
            url: &self.url,
            last_updated: self.last_updated,
            full_text: self.full_text.as_deref(),
            snapshot: self.snapshot.as_deref(),
        }
    }
}
