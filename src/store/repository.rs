//! Repository running each board operation as one load→mutate→save cycle.

use std::sync::Arc;

use super::Store;
use crate::errors::AppError;
use crate::models::{
    timestamp, CreateRevisionRequest, RecordVisitRequest, Revision, UpdateRevisionRequest, Visit,
};

/// Board operations over an injected [`Store`].
#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn Store>,
}

impl Repository {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    // ==================== REVISION OPERATIONS ====================

    /// List all revisions in stored order.
    pub async fn list_revisions(&self) -> Vec<Revision> {
        self.store.load().await.revisions
    }

    /// Create a revision with the next free id.
    pub async fn create_revision(
        &self,
        request: CreateRevisionRequest,
    ) -> Result<Revision, AppError> {
        let mut datastore = self.store.load().await;
        let revision = datastore.add_revision(request, timestamp::now());
        self.store.save(&datastore).await?;

        tracing::debug!("Created revision {}", revision.id);
        Ok(revision)
    }

    /// Set the completion flag of a revision. Nothing is written when the id
    /// is unknown.
    pub async fn update_revision(
        &self,
        id: i64,
        request: UpdateRevisionRequest,
    ) -> Result<Revision, AppError> {
        let mut datastore = self.store.load().await;
        let revision = datastore
            .set_completed(id, request.completed.unwrap_or(false))
            .ok_or_else(|| AppError::NotFound("Revision not found".to_string()))?;
        self.store.save(&datastore).await?;
        Ok(revision)
    }

    /// Delete every revision with this id. `None` matches nothing. The
    /// document is written back either way, and this succeeds even if
    /// nothing matched.
    pub async fn delete_revision(&self, id: Option<i64>) -> Result<(), AppError> {
        let mut datastore = self.store.load().await;
        let removed = id.map_or(0, |id| datastore.remove_revisions(id));
        self.store.save(&datastore).await?;

        tracing::debug!("Deleted {} revision(s) with id {:?}", removed, id);
        Ok(())
    }

    // ==================== ACCESS HISTORY OPERATIONS ====================

    /// Append a visit to the access history.
    pub async fn record_visit(&self, request: RecordVisitRequest) -> Result<Visit, AppError> {
        let mut datastore = self.store.load().await;
        let visit = datastore.record_visit(request, timestamp::now());
        self.store.save(&datastore).await?;
        Ok(visit)
    }

    /// List the access history in chronological order.
    pub async fn list_visits(&self) -> Vec<Visit> {
        self.store.load().await.access_history
    }

    /// Remove every recorded visit.
    pub async fn clear_visits(&self) -> Result<(), AppError> {
        let mut datastore = self.store.load().await;
        datastore.clear_history();
        self.store.save(&datastore).await?;
        Ok(())
    }
}
