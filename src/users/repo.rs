use async_trait::async_trait;
use bson::oid::ObjectId;

use crate::users::repo_types::{OwnerRef, UserDoc};

/// Access to the `users` collection.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_owner(&self, owner: OwnerRef) -> anyhow::Result<Option<UserDoc>>;

    /// Overwrite the user's project reference list.
    async fn set_projects(&self, user_id: ObjectId, projects: &[ObjectId]) -> anyhow::Result<()>;
}
