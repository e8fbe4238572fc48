use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// A persisted document. The title doubles as the storage filename, so it is
/// the one field that is never null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub signee: Option<String>,
    #[serde(default)]
    pub content: Content,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub header: Option<String>,
    pub data: Option<String>,
}

// None marks a field the request does not touch, which keeps "no change"
// distinguishable from "clear this field". The content object itself may be
// absent or null, either way its nested fields stay untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentPatch {
    pub title: Option<String>,
    pub signee: Option<String>,
    pub content: Option<Content>,
}

impl Document {
    /// Field-wise merge: every field the patch provides replaces the stored
    /// one, every field it omits is kept. A patch title renames the document;
    /// moving the file is the caller's job.
    pub fn merge(self, patch: DocumentPatch) -> Document {
        let content = patch.content.unwrap_or_default();
        Document {
            title: patch.title.unwrap_or(self.title),
            signee: patch.signee.or(self.signee),
            content: Content {
                header: content.header.or(self.content.header),
                data: content.data.or(self.content.data),
            },
        }
    }
}

impl DocumentPatch {
    /// Admission check for creation: the candidate needs a title no stored
    /// document already uses (case-sensitive, exact match). On success the
    /// candidate's fields become the document as provided, nulls included.
    pub fn into_document(self, existing_titles: &[String]) -> Result<Document, ApiError> {
        let title = self.title.ok_or(ApiError::MissingTitle)?;
        if existing_titles.iter().any(|existing| *existing == title) {
            return Err(ApiError::TitleConflict(title));
        }
        Ok(Document {
            title,
            signee: self.signee,
            content: self.content.unwrap_or_default(),
        })
    }
}
