use bson::oid::ObjectId;
use tracing::{debug, instrument};

use crate::error::AppError;
use crate::users::repo::UserStore;
use crate::users::repo_types::{OwnerRef, UserDoc};

pub async fn load_owner(users: &dyn UserStore, owner: OwnerRef) -> Result<UserDoc, AppError> {
    users
        .find_owner(owner)
        .await
        .map_err(AppError::store("load owner"))?
        .ok_or_else(|| AppError::not_found("User not found"))
}

/// Record `project_id` on the owner. Already-linked ids are left as they are.
#[instrument(skip(users))]
pub async fn attach_project(
    users: &dyn UserStore,
    owner: OwnerRef,
    project_id: ObjectId,
) -> Result<(), AppError> {
    let mut user = load_owner(users, owner).await?;
    if user.projects.contains(&project_id) {
        debug!(user_id = %user.id, %project_id, "project already linked");
        return Ok(());
    }
    user.projects.push(project_id);
    users
        .set_projects(user.id, &user.projects)
        .await
        .map_err(AppError::store("attach project to owner"))
}

/// Drop `project_id` from the owner's list, keeping the rest in order.
#[instrument(skip(users, user), fields(user_id = %user.id))]
pub async fn detach_project(
    users: &dyn UserStore,
    user: &UserDoc,
    project_id: ObjectId,
) -> Result<(), AppError> {
    let remaining: Vec<ObjectId> = user
        .projects
        .iter()
        .copied()
        .filter(|id| *id != project_id)
        .collect();
    users
        .set_projects(user.id, &remaining)
        .await
        .map_err(AppError::store("detach project from owner"))
}
