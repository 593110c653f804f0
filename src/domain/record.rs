// Behaviour shared by every record kind held in an entity store
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A flat record with a numeric identifier and an id-less draft shape.
///
/// The draft is what a form buffers: creating turns a draft into a record with
/// a fresh id, revising applies a draft to an existing record and keeps its id.
pub trait Record: Clone + Serialize + Send + Sync + 'static {
    type Draft: Clone + Default + Serialize + DeserializeOwned + Send + Sync + 'static;

    /// Human name of the record kind, used in logs
    const KIND: &'static str;

    /// Empty-state message for a filtered view without rows
    const EMPTY_MESSAGE: &'static str;

    fn id(&self) -> u32;

    fn zone(&self) -> &str;

    /// Label matched by the categorical status filter
    fn status_label(&self) -> &str;

    /// Fields the free-text search is matched against
    fn search_fields(&self) -> Vec<&str>;

    fn from_draft(id: u32, draft: Self::Draft) -> Self;

    fn revise(&self, draft: Self::Draft) -> Self;

    fn to_draft(&self) -> Self::Draft;

    /// Same record under another identifier, used when merging imports
    fn with_id(self, id: u32) -> Self;
}

/// Next identifier for a kind: one past the highest id in use, 1 when empty.
pub fn next_id<R: Record>(records: &[R]) -> u32 {
    records.iter().map(Record::id).max().unwrap_or(0) + 1
}
