//! Document addressing and payload types.

use serde::{Deserialize, Serialize};

/// Identifies a single document by index and id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct DocRef {
    /// The index the document lives in.
    pub index: String,
    /// The document id within the index.
    pub id: String,
}

impl DocRef {
    /// Create a new document reference.
    ///
    /// # Example
    ///
    /// ```
    /// use search_shared::DocRef;
    ///
    /// let doc = DocRef::new("users", "1");
    /// assert_eq!(doc.index, "users");
    /// ```
    pub fn new(index: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            id: id.into(),
        }
    }
}

/// A document to be written at a known index and id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InsertDoc<T> {
    /// The index to write into.
    pub index: String,
    /// The document id.
    pub id: String,
    /// The document body.
    pub doc: T,
}

/// Partial update payload; `doc` holds only the fields to change.
pub type UpdateDoc<T> = InsertDoc<T>;

impl<T> InsertDoc<T> {
    /// Create a new insert payload.
    pub fn new(index: impl Into<String>, id: impl Into<String>, doc: T) -> Self {
        Self {
            index: index.into(),
            id: id.into(),
            doc,
        }
    }

    /// The reference of the document this payload targets.
    pub fn doc_ref(&self) -> DocRef {
        DocRef::new(self.index.clone(), self.id.clone())
    }
}
