//! In-memory label storage

use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;

use super::model::{LabelCreate, LabelOut, LabelSummary, LabelUpdate};
use crate::{
    ids::{GroupId, LabelId},
    repository::{
        GroupScopedRepository, Identified, RepositoryError, RepositoryOperation, RepositoryResult,
    },
};

/// Any repository that stores labels
pub trait LabelRepository:
    GroupScopedRepository<
    Id = LabelId,
    Summary = LabelSummary,
    Detail = LabelOut,
    Create = LabelCreate,
    Update = LabelUpdate,
>
{
}

impl<T> LabelRepository for T where
    T: GroupScopedRepository<
        Id = LabelId,
        Summary = LabelSummary,
        Detail = LabelOut,
        Create = LabelCreate,
        Update = LabelUpdate,
    >
{
}

#[derive(Debug, Clone)]
struct LabelRecord {
    group: GroupId,
    label: LabelSummary,
}

/// Labels kept in a map guarded by a `tokio` `RwLock`
///
/// Every method takes the lock once, so each call observes and leaves the
/// store in a consistent state.
#[derive(Debug, Default)]
pub struct InMemoryLabelRepository {
    labels: RwLock<HashMap<LabelId, LabelRecord>>,
}

impl InMemoryLabelRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn not_found(operation: RepositoryOperation, id: LabelId) -> RepositoryError {
        RepositoryError::not_found(<Self as GroupScopedRepository>::ENTITY, id.to_string())
            .with_operation(operation)
    }
}

impl GroupScopedRepository for InMemoryLabelRepository {
    type Id = LabelId;
    type Summary = LabelSummary;
    type Detail = LabelOut;
    type Create = LabelCreate;
    type Update = LabelUpdate;

    const ENTITY: &'static str = "Label";

    async fn get_all(&self, group: GroupId) -> RepositoryResult<Vec<LabelSummary>> {
        let labels = self.labels.read().await;
        let mut items: Vec<LabelSummary> = labels
            .values()
            .filter(|record| record.group == group)
            .map(|record| record.label.clone())
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name).then(a.created_at.cmp(&b.created_at)));
        Ok(items)
    }

    async fn create(&self, group: GroupId, data: LabelCreate) -> RepositoryResult<LabelSummary> {
        let now = Utc::now();
        let label = LabelSummary {
            id: LabelId::new(),
            name: data.name,
            description: data.description,
            color: data.color,
            created_at: now,
            updated_at: now,
        };

        let mut labels = self.labels.write().await;
        if labels.contains_key(&label.id) {
            return Err(RepositoryError::already_exists(Self::ENTITY, label.id.to_string()));
        }
        labels.insert(
            label.id,
            LabelRecord {
                group,
                label: label.clone(),
            },
        );

        tracing::debug!(id = %label.id, %group, "Label created");
        Ok(label)
    }

    async fn get_one_by_group(&self, group: GroupId, id: LabelId) -> RepositoryResult<LabelOut> {
        let labels = self.labels.read().await;
        labels
            .get(&id)
            .filter(|record| record.group == group)
            .map(|record| LabelOut::from(record.label.clone()))
            .ok_or_else(|| Self::not_found(RepositoryOperation::GetOneByGroup, id))
    }

    async fn delete_by_group(&self, group: GroupId, id: LabelId) -> RepositoryResult<()> {
        let mut labels = self.labels.write().await;
        let owned = labels.get(&id).is_some_and(|record| record.group == group);
        if !owned {
            return Err(Self::not_found(RepositoryOperation::DeleteByGroup, id));
        }
        labels.remove(&id);
        Ok(())
    }

    async fn update_by_group(
        &self,
        group: GroupId,
        data: LabelUpdate,
    ) -> RepositoryResult<LabelOut> {
        let id = data.id().copied().ok_or_else(|| {
            RepositoryError::validation_failed(
                RepositoryOperation::UpdateByGroup,
                "Label id is required",
            )
        })?;

        let mut labels = self.labels.write().await;
        let record = labels
            .get_mut(&id)
            .filter(|record| record.group == group)
            .ok_or_else(|| Self::not_found(RepositoryOperation::UpdateByGroup, id))?;

        record.label.name = data.name;
        record.label.description = data.description;
        record.label.color = data.color;
        record.label.updated_at = Utc::now();

        Ok(LabelOut::from(record.label.clone()))
    }
}
