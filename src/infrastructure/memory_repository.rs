// In-memory repository: one vector per record kind, nothing survives a restart
use crate::application::entity_repository::{EntityRepository, StoreError};
use crate::domain::record::{Record, next_id};
use async_trait::async_trait;
use tokio::sync::RwLock;

struct Table<R> {
    records: Vec<R>,
    /// Highest id ever handed out, so deleting the newest record never
    /// frees its id for reuse
    high_water: u32,
}

impl<R: Record> Table<R> {
    fn allocate_id(&mut self) -> u32 {
        let id = next_id(&self.records).max(self.high_water + 1);
        self.high_water = id;
        id
    }
}

pub struct InMemoryRepository<R> {
    table: RwLock<Table<R>>,
}

impl<R: Record> InMemoryRepository<R> {
    pub fn new(seed: Vec<R>) -> Self {
        let high_water = seed.iter().map(Record::id).max().unwrap_or(0);
        Self {
            table: RwLock::new(Table {
                records: seed,
                high_water,
            }),
        }
    }
}

#[async_trait]
impl<R: Record> EntityRepository<R> for InMemoryRepository<R> {
    async fn list(&self) -> Vec<R> {
        self.table.read().await.records.clone()
    }

    async fn get(&self, id: u32) -> Option<R> {
        self.table
            .read()
            .await
            .records
            .iter()
            .find(|r| r.id() == id)
            .cloned()
    }

    async fn insert(&self, draft: R::Draft) -> R {
        let mut table = self.table.write().await;
        let id = table.allocate_id();
        let record = R::from_draft(id, draft);
        table.records.push(record.clone());
        record
    }

    async fn append_all(&self, records: Vec<R>) -> Vec<R> {
        let mut table = self.table.write().await;
        let mut appended = Vec::with_capacity(records.len());
        for record in records {
            let id = table.allocate_id();
            let record = record.with_id(id);
            table.records.push(record.clone());
            appended.push(record);
        }
        appended
    }

    async fn replace(&self, id: u32, draft: R::Draft) -> Result<R, StoreError> {
        let mut table = self.table.write().await;
        let slot = table
            .records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| StoreError::not_found::<R>(id))?;
        *slot = slot.revise(draft);
        Ok(slot.clone())
    }

    async fn remove(&self, id: u32) -> Result<R, StoreError> {
        let mut table = self.table.write().await;
        let index = table
            .records
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| StoreError::not_found::<R>(id))?;
        Ok(table.records.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::route::{Route, RouteDraft, RouteStatus};
    use crate::infrastructure::seed::seed_routes;

    fn planned(name: &str) -> RouteDraft {
        RouteDraft {
            name: name.to_string(),
            zone: "Zone C".to_string(),
            distance: "11.0 km".to_string(),
            points: 5,
            ..RouteDraft::default()
        }
    }

    #[tokio::test]
    async fn test_ids_follow_highest_and_are_not_reused() {
        let repo = InMemoryRepository::new(seed_routes());

        let third = repo.insert(planned("Route C-1")).await;
        assert_eq!(third.id, 3);

        repo.remove(3).await.unwrap();
        let fourth = repo.insert(planned("Route C-2")).await;
        assert_eq!(fourth.id, 4);
    }

    #[tokio::test]
    async fn test_first_id_in_empty_store_is_one() {
        let repo: InMemoryRepository<Route> = InMemoryRepository::new(Vec::new());
        assert_eq!(repo.insert(planned("Route A-9")).await.id, 1);
    }

    #[tokio::test]
    async fn test_replace_keeps_id_and_position() {
        let repo = InMemoryRepository::new(seed_routes());
        let mut draft = seed_routes()[0].to_draft();
        draft.status = RouteStatus::InProgress;

        let replaced = repo.replace(1, draft).await.unwrap();
        assert_eq!(replaced.id, 1);
        assert_eq!(repo.list().await[0].status, RouteStatus::InProgress);

        assert!(repo.replace(9, planned("x")).await.is_err());
        assert_eq!(repo.list().await.len(), 2);
    }

    #[tokio::test]
    async fn test_append_all_assigns_fresh_ids() {
        let repo = InMemoryRepository::new(seed_routes());
        let imported = repo.append_all(seed_routes()).await;

        let ids: Vec<u32> = imported.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 4]);
        assert_eq!(repo.list().await.len(), 4);
    }
}
