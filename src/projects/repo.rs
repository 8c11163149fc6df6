use async_trait::async_trait;
use bson::oid::ObjectId;

use crate::projects::repo_types::{NewProject, Project, ProjectFields};

/// Access to the `projects` collection.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Persist a new project; the store assigns its identifier.
    async fn insert(&self, project: NewProject) -> anyhow::Result<Project>;

    /// All projects in the store's natural order.
    async fn find_all(&self) -> anyhow::Result<Vec<Project>>;

    async fn find_by_id(&self, id: ObjectId) -> anyhow::Result<Option<Project>>;

    /// Replace the editable fields and return the updated document, or `None`
    /// if nothing matched.
    async fn update_fields(
        &self,
        id: ObjectId,
        fields: &ProjectFields,
    ) -> anyhow::Result<Option<Project>>;

    /// Targeted update of the `order` field. Returns whether a document matched.
    async fn set_order(&self, id: ObjectId, order: i64) -> anyhow::Result<bool>;

    /// Returns whether a document was deleted.
    async fn delete(&self, id: ObjectId) -> anyhow::Result<bool>;
}
