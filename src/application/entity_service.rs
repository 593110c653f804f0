// Entity service - CRUD, filtering and the edit form for one record kind
use crate::application::entity_repository::{EntityRepository, StoreError};
use crate::application::filter::{FilteredView, RecordQuery};
use crate::application::form_controller::{FormController, FormState, Submission};
use crate::domain::record::Record;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone, Serialize)]
pub struct DeleteOutcome<R> {
    pub deleted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<R>,
}

pub struct EntityService<R: Record> {
    repository: Arc<dyn EntityRepository<R>>,
    form: Arc<Mutex<FormController<R>>>,
}

impl<R: Record> Clone for EntityService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
            form: self.form.clone(),
        }
    }
}

impl<R: Record> EntityService<R> {
    pub fn new(repository: Arc<dyn EntityRepository<R>>) -> Self {
        Self {
            repository,
            form: Arc::new(Mutex::new(FormController::new())),
        }
    }

    pub async fn all(&self) -> Vec<R> {
        self.repository.list().await
    }

    pub async fn list(&self, query: &RecordQuery) -> FilteredView<R> {
        let view = query.apply(self.repository.list().await);
        tracing::debug!("Filtered {} list: {} of {}", R::KIND, view.shown, view.total);
        view
    }

    pub async fn get(&self, id: u32) -> Result<R, StoreError> {
        self.repository
            .get(id)
            .await
            .ok_or_else(|| StoreError::not_found::<R>(id))
    }

    pub async fn create(&self, draft: R::Draft) -> R {
        let record = self.repository.insert(draft).await;
        tracing::info!("Created {} {}", R::KIND, record.id());
        record
    }

    pub async fn update(&self, id: u32, draft: R::Draft) -> Result<R, StoreError> {
        let record = self.repository.replace(id, draft).await?;
        tracing::info!("Updated {} {}", R::KIND, id);
        Ok(record)
    }

    /// Remove a record once the caller has confirmed; a declined
    /// confirmation leaves the store untouched
    pub async fn delete(&self, id: u32, confirmed: bool) -> Result<DeleteOutcome<R>, StoreError> {
        if !confirmed {
            self.get(id).await?;
            tracing::debug!("Delete of {} {} declined", R::KIND, id);
            return Ok(DeleteOutcome {
                deleted: false,
                record: None,
            });
        }

        let record = self.repository.remove(id).await?;
        tracing::info!("Deleted {} {}", R::KIND, id);
        Ok(DeleteOutcome {
            deleted: true,
            record: Some(record),
        })
    }

    pub async fn merge(&self, records: Vec<R>) -> Vec<R> {
        if records.is_empty() {
            return records;
        }
        let merged = self.repository.append_all(records).await;
        tracing::info!("Merged {} imported {} records", merged.len(), R::KIND);
        merged
    }

    pub async fn form(&self) -> FormState<R::Draft> {
        self.form.lock().await.state()
    }

    pub async fn open_create_form(&self) -> FormState<R::Draft> {
        let mut form = self.form.lock().await;
        form.open_create();
        form.state()
    }

    pub async fn open_edit_form(&self, id: u32) -> Result<FormState<R::Draft>, StoreError> {
        let record = self.get(id).await?;
        let mut form = self.form.lock().await;
        form.open_edit(&record);
        Ok(form.state())
    }

    pub async fn update_form(&self, draft: R::Draft) -> Result<FormState<R::Draft>, StoreError> {
        let mut form = self.form.lock().await;
        form.set_draft(draft)?;
        Ok(form.state())
    }

    pub async fn cancel_form(&self) -> FormState<R::Draft> {
        let mut form = self.form.lock().await;
        form.cancel();
        form.state()
    }

    pub async fn submit_form(&self) -> Result<R, StoreError> {
        let submission = self.form.lock().await.submit()?;
        match submission {
            Submission::Create(draft) => Ok(self.create(draft).await),
            Submission::Update(id, draft) => self.update(id, draft).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::collection_point::{CollectionPoint, CollectionPointDraft, PointStatus};
    use crate::domain::employee::{Employee, EmployeeDraft};
    use crate::infrastructure::memory_repository::InMemoryRepository;
    use crate::infrastructure::seed::{seed_employees, seed_points};

    fn points() -> EntityService<CollectionPoint> {
        EntityService::new(Arc::new(InMemoryRepository::new(seed_points())))
    }

    fn draft() -> CollectionPointDraft {
        CollectionPointDraft {
            name: "Point C1".to_string(),
            zone: "Zone C".to_string(),
            waste_type: "Metal".to_string(),
            fill: 60,
            status: PointStatus::Active,
            location: "48.8693, 2.3412".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_then_delete_restores_contents() {
        let service = points();
        let before = service.all().await;

        let created = service.create(draft()).await;
        assert_eq!(created.id, 4);

        let outcome = service.delete(created.id, true).await.unwrap();
        assert!(outcome.deleted);
        assert_eq!(service.all().await, before);
    }

    #[tokio::test]
    async fn test_declined_delete_keeps_record() {
        let service = points();
        let outcome = service.delete(2, false).await.unwrap();

        assert!(!outcome.deleted);
        assert_eq!(service.all().await.len(), 3);
        assert_eq!(
            service.delete(42, false).await.unwrap_err(),
            StoreError::NotFound {
                kind: "collection point",
                id: 42
            }
        );
    }

    #[tokio::test]
    async fn test_edit_then_cancel_leaves_store_unchanged() {
        let service = points();
        let before = service.all().await;

        let state = service.open_edit_form(1).await.unwrap();
        let mut edited = state.draft;
        edited.fill = 12;
        edited.name = "Renamed".to_string();
        service.update_form(edited).await.unwrap();
        service.cancel_form().await;

        assert_eq!(service.all().await, before);
        assert!(service.submit_form().await.is_err());
    }

    #[tokio::test]
    async fn test_form_submit_updates_or_creates() {
        let service = points();

        let mut state = service.open_edit_form(3).await.unwrap();
        state.draft.status = PointStatus::Inactive;
        service.update_form(state.draft).await.unwrap();
        let updated = service.submit_form().await.unwrap();
        assert_eq!(updated.id, 3);
        assert_eq!(service.get(3).await.unwrap().status, PointStatus::Inactive);

        service.open_create_form().await;
        service.update_form(draft()).await.unwrap();
        let created = service.submit_form().await.unwrap();
        assert_eq!(created.id, 4);
        assert!(!service.form().await.open);
    }

    #[tokio::test]
    async fn test_deleting_last_visible_record_shows_empty_state() {
        let service = points();
        let query = RecordQuery::new(None, Some("Zone B"), None);
        assert_eq!(service.list(&query).await.shown, 1);

        service.delete(3, true).await.unwrap();

        let view = service.list(&query).await;
        assert!(view.items.is_empty());
        assert_eq!(view.empty_message, Some("No collection points found"));
    }

    #[tokio::test]
    async fn test_employee_update_keeps_route_count() {
        let service: EntityService<Employee> =
            EntityService::new(Arc::new(InMemoryRepository::new(seed_employees())));

        let updated = service
            .update(
                3,
                EmployeeDraft {
                    name: "Ahmed Hassan".to_string(),
                    zone: "Zone D".to_string(),
                    skill: "Supervisor".to_string(),
                    ..EmployeeDraft::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.routes, 4);
        assert_eq!(updated.zone, "Zone D");
    }
}
