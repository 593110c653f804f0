// Repository trait for the per-kind record stores
use crate::domain::record::Record;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: u32 },

    #[error("no {kind} form is open")]
    FormClosed { kind: &'static str },
}

impl StoreError {
    pub fn not_found<R: Record>(id: u32) -> Self {
        StoreError::NotFound { kind: R::KIND, id }
    }
}

#[async_trait]
pub trait EntityRepository<R: Record>: Send + Sync {
    /// All records in insertion order
    async fn list(&self) -> Vec<R>;

    async fn get(&self, id: u32) -> Option<R>;

    /// Append a new record under a fresh identifier
    async fn insert(&self, draft: R::Draft) -> R;

    /// Append records under fresh identifiers, ignoring the ids they carry
    async fn append_all(&self, records: Vec<R>) -> Vec<R>;

    /// Replace the record with this id, keeping the id
    async fn replace(&self, id: u32, draft: R::Draft) -> Result<R, StoreError>;

    async fn remove(&self, id: u32) -> Result<R, StoreError>;
}
