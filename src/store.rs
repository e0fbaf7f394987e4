//! In-memory store for accepted documents.
//!
//! Holds validated uploads so the download and preview endpoints operate on
//! real documents. Deliberately in-process only: state does not survive a
//! restart. Documents are scoped to their uploader.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use uuid::Uuid;

/// An accepted document held in memory.
#[derive(Debug, Clone)]
pub struct StoredDocument {
    pub id: Uuid,
    /// Sanitized filename; never the raw client-supplied name.
    pub filename: String,
    pub content_type: String,
    pub owner: String,
    pub uploaded_at_epoch_secs: u64,
    pub data: Vec<u8>,
}

/// Metadata view without the payload, for list responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMeta {
    pub id: Uuid,
    pub filename: String,
    pub content_type: String,
    pub size: u64,
    pub uploaded_at: u64,
}

impl From<&StoredDocument> for DocumentMeta {
    fn from(doc: &StoredDocument) -> Self {
        Self {
            id: doc.id,
            filename: doc.filename.clone(),
            content_type: doc.content_type.clone(),
            size: doc.data.len() as u64,
            uploaded_at: doc.uploaded_at_epoch_secs,
        }
    }
}

/// Uuid-keyed document map behind a mutex.
pub struct DocumentStore {
    documents: Mutex<HashMap<Uuid, StoredDocument>>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self {
            documents: Mutex::new(HashMap::new()),
        }
    }

    /// Insert an accepted upload and return its id.
    pub fn insert(&self, filename: &str, content_type: &str, owner: &str, data: Vec<u8>) -> Uuid {
        let id = Uuid::new_v4();
        let doc = StoredDocument {
            id,
            filename: sanitize_filename(filename),
            content_type: content_type.to_string(),
            owner: owner.to_string(),
            uploaded_at_epoch_secs: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
            data,
        };
        self.documents
            .lock()
            .expect("document store mutex poisoned")
            .insert(id, doc);
        id
    }

    /// Fetch a document if it exists and belongs to `owner`.
    pub fn get(&self, id: &Uuid, owner: &str) -> Option<StoredDocument> {
        self.documents
            .lock()
            .expect("document store mutex poisoned")
            .get(id)
            .filter(|doc| doc.owner == owner)
            .cloned()
    }

    /// Metadata for all documents owned by `owner`, newest first.
    pub fn list(&self, owner: &str) -> Vec<DocumentMeta> {
        let documents = self.documents.lock().expect("document store mutex poisoned");
        let mut metas: Vec<DocumentMeta> = documents
            .values()
            .filter(|doc| doc.owner == owner)
            .map(DocumentMeta::from)
            .collect();
        metas.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        metas
    }

    pub fn len(&self) -> usize {
        self.documents
            .lock()
            .expect("document store mutex poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip path components and traversal markers from a client filename.
///
/// The validator only warns on unsafe names; this is the downstream
/// sanitization those warnings point at.
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned = base.replace("..", "");
    if cleaned.trim_matches('.').is_empty() {
        "document".to_string()
    } else {
        cleaned
    }
}
