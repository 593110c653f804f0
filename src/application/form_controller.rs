// Form controller: buffers one record's edits until submit or cancel
use crate::application::entity_repository::StoreError;
use crate::domain::record::Record;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState<D> {
    pub open: bool,
    /// Set while editing an existing record, absent while creating
    pub editing_id: Option<u32>,
    pub draft: D,
}

/// What a submitted form asks the store to do
#[derive(Debug, Clone, PartialEq)]
pub enum Submission<D> {
    Create(D),
    Update(u32, D),
}

pub struct FormController<R: Record> {
    open: bool,
    editing_id: Option<u32>,
    draft: R::Draft,
}

impl<R: Record> Default for FormController<R> {
    fn default() -> Self {
        Self {
            open: false,
            editing_id: None,
            draft: R::Draft::default(),
        }
    }
}

impl<R: Record> FormController<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FormState<R::Draft> {
        FormState {
            open: self.open,
            editing_id: self.editing_id,
            draft: self.draft.clone(),
        }
    }

    pub fn open_create(&mut self) {
        self.reset();
        self.open = true;
    }

    pub fn open_edit(&mut self, record: &R) {
        self.draft = record.to_draft();
        self.editing_id = Some(record.id());
        self.open = true;
    }

    pub fn set_draft(&mut self, draft: R::Draft) -> Result<(), StoreError> {
        if !self.open {
            return Err(StoreError::FormClosed { kind: R::KIND });
        }
        self.draft = draft;
        Ok(())
    }

    pub fn cancel(&mut self) {
        self.reset();
    }

    /// Close the form and hand back what it should commit
    pub fn submit(&mut self) -> Result<Submission<R::Draft>, StoreError> {
        if !self.open {
            return Err(StoreError::FormClosed { kind: R::KIND });
        }
        let draft = std::mem::take(&mut self.draft);
        let submission = match self.editing_id {
            Some(id) => Submission::Update(id, draft),
            None => Submission::Create(draft),
        };
        self.reset();
        Ok(submission)
    }

    fn reset(&mut self) {
        self.open = false;
        self.editing_id = None;
        self.draft = R::Draft::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::route::{Route, RouteDraft};
    use crate::infrastructure::seed::seed_routes;

    #[test]
    fn test_create_mode_without_editing_id() {
        let mut form = FormController::<Route>::new();
        form.open_create();

        let draft = RouteDraft {
            name: "Route C-1".to_string(),
            ..RouteDraft::default()
        };
        form.set_draft(draft.clone()).unwrap();

        assert_eq!(form.submit(), Ok(Submission::Create(draft)));
        assert!(!form.state().open);
    }

    #[test]
    fn test_edit_mode_buffers_existing_record() {
        let route = seed_routes().remove(1);
        let mut form = FormController::<Route>::new();
        form.open_edit(&route);

        let state = form.state();
        assert_eq!(state.editing_id, Some(2));
        assert_eq!(state.draft.name, "Route B-1");

        match form.submit().unwrap() {
            Submission::Update(id, draft) => {
                assert_eq!(id, 2);
                assert_eq!(draft, route.to_draft());
            }
            other => panic!("expected update, got {:?}", other),
        }
    }

    #[test]
    fn test_cancel_discards_buffer() {
        let mut form = FormController::<Route>::new();
        form.open_edit(&seed_routes()[0]);
        form.cancel();

        assert_eq!(form.state(), FormController::<Route>::new().state());
        assert_eq!(
            form.submit(),
            Err(StoreError::FormClosed { kind: "route" })
        );
        assert!(form.set_draft(RouteDraft::default()).is_err());
    }
}
