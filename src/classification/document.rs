//! Documents and ordered document groups.
//!
//! A [`DocumentGroups`] value is an insertion-ordered mapping from a group
//! key to the documents of that group. For training the keys are class
//! labels; for testing they are either the class labels (ground truth) or
//! arbitrary batch names.

use serde::{Deserialize, Serialize};

/// A raw document with a caller-chosen identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Identifier used to report on the document (file name, row id, ...).
    pub id: String,
    /// Raw document text.
    pub text: String,
}

impl Document {
    /// Create a new document.
    pub fn new<I: Into<String>, T: Into<String>>(id: I, text: T) -> Self {
        Document {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// A named, ordered sequence of documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentGroup {
    /// Group key: a class label or a batch name.
    pub key: String,
    /// Documents in ingestion order.
    pub documents: Vec<Document>,
}

impl DocumentGroup {
    /// Create a new group.
    pub fn new<K: Into<String>>(key: K, documents: Vec<Document>) -> Self {
        DocumentGroup {
            key: key.into(),
            documents,
        }
    }

    /// Number of documents in the group.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the group has no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Insertion-ordered mapping from group key to documents.
///
/// Keys are unique; inserting an existing key replaces its documents in
/// place and keeps the original position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentGroups {
    groups: Vec<DocumentGroup>,
}

impl DocumentGroups {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a group, returning the documents it replaced, if any.
    pub fn insert<K: Into<String>>(
        &mut self,
        key: K,
        documents: Vec<Document>,
    ) -> Option<Vec<Document>> {
        let key = key.into();
        match self.groups.iter_mut().find(|group| group.key == key) {
            Some(group) => Some(std::mem::replace(&mut group.documents, documents)),
            None => {
                self.groups.push(DocumentGroup::new(key, documents));
                None
            }
        }
    }

    /// Append one document to the group `key`, creating the group if needed.
    pub fn push_document<K: Into<String>>(&mut self, key: K, document: Document) {
        let key = key.into();
        match self.groups.iter_mut().find(|group| group.key == key) {
            Some(group) => group.documents.push(document),
            None => self.groups.push(DocumentGroup::new(key, vec![document])),
        }
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with_group<K: Into<String>>(mut self, key: K, documents: Vec<Document>) -> Self {
        self.insert(key, documents);
        self
    }

    /// Look up a group by key.
    pub fn get(&self, key: &str) -> Option<&DocumentGroup> {
        self.groups.iter().find(|group| group.key == key)
    }

    /// Group keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|group| group.key.as_str())
    }

    /// Iterate over groups in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, DocumentGroup> {
        self.groups.iter()
    }

    /// Iterate over `(group key, document)` pairs in order.
    pub fn documents(&self) -> impl Iterator<Item = (&str, &Document)> {
        self.groups.iter().flat_map(|group| {
            group
                .documents
                .iter()
                .map(move |document| (group.key.as_str(), document))
        })
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether there are no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of documents over all groups.
    pub fn total_documents(&self) -> usize {
        self.groups.iter().map(DocumentGroup::len).sum()
    }
}

impl<'a> IntoIterator for &'a DocumentGroups {
    type Item = &'a DocumentGroup;
    type IntoIter = std::slice::Iter<'a, DocumentGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

impl FromIterator<DocumentGroup> for DocumentGroups {
    fn from_iter<T: IntoIterator<Item = DocumentGroup>>(iter: T) -> Self {
        let mut groups = DocumentGroups::new();
        for group in iter {
            groups.insert(group.key, group.documents);
        }
        groups
    }
}
