use bson::oid::ObjectId;
use tracing::{error, info, instrument, warn};

use crate::error::AppError;
use crate::projects::dto::ReorderRequestItem;
use crate::projects::ordering::{self, KanbanEntry, ReorderEntry};
use crate::projects::repo_types::{NewProject, Project, ProjectFields};
use crate::state::AppState;
use crate::users::linkage;

/// Result of a listing; an empty store is reported as such rather than as an
/// empty vector.
#[derive(Debug, PartialEq)]
pub enum Listing<T> {
    Empty,
    Items(Vec<T>),
}

pub(crate) fn parse_project_id(raw: &str) -> Result<ObjectId, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::validation("Project ID is required"));
    }
    ObjectId::parse_str(raw).map_err(|_| AppError::validation("Invalid project ID"))
}

fn validate_fields(fields: &ProjectFields) -> Result<(), AppError> {
    let required = [
        &fields.project_name,
        &fields.small_description,
        &fields.description,
    ];
    if required.iter().any(|s| s.trim().is_empty()) {
        return Err(AppError::validation(
            "Name, small description and description are required",
        ));
    }
    Ok(())
}

async fn fetch_all(state: &AppState) -> Result<Vec<Project>, AppError> {
    state
        .projects
        .find_all()
        .await
        .map_err(AppError::store("fetch projects"))
}

#[instrument(skip(state))]
pub async fn list_projects(state: &AppState) -> Result<Listing<Project>, AppError> {
    let mut projects = fetch_all(state).await?;
    if projects.is_empty() {
        return Ok(Listing::Empty);
    }
    ordering::sort_by_order(&mut projects);
    Ok(Listing::Items(projects))
}

#[instrument(skip(state))]
pub async fn list_kanban(state: &AppState) -> Result<Listing<KanbanEntry>, AppError> {
    let projects = fetch_all(state).await?;
    if projects.is_empty() {
        return Ok(Listing::Empty);
    }
    Ok(Listing::Items(ordering::kanban(projects)))
}

#[instrument(skip(state))]
pub async fn get_project(state: &AppState, raw_id: &str) -> Result<Project, AppError> {
    let id = parse_project_id(raw_id)?;
    state
        .projects
        .find_by_id(id)
        .await
        .map_err(AppError::store("fetch project"))?
        .ok_or_else(|| AppError::not_found("Project not found"))
}

/// Persist the project, then link it to the owner. A linkage failure leaves
/// the project in place.
#[instrument(skip(state, fields))]
pub async fn create_project(
    state: &AppState,
    fields: ProjectFields,
    order: i64,
) -> Result<Project, AppError> {
    validate_fields(&fields)?;

    let project = state
        .projects
        .insert(NewProject { fields, order })
        .await
        .map_err(AppError::store("insert project"))?;

    if let Err(e) = linkage::attach_project(state.users.as_ref(), state.owner(), project.id).await {
        error!(project_id = %project.id, error = %e, "project persisted but not linked to owner");
        return Err(e);
    }

    info!(project_id = %project.id, "project created");
    Ok(project)
}

#[instrument(skip(state, fields))]
pub async fn update_project(
    state: &AppState,
    raw_id: &str,
    fields: ProjectFields,
) -> Result<Project, AppError> {
    let id = parse_project_id(raw_id)?;
    validate_fields(&fields)?;

    let updated = state
        .projects
        .update_fields(id, &fields)
        .await
        .map_err(AppError::store("update project"))?
        .ok_or_else(|| AppError::not_found("Project not found"))?;

    info!(project_id = %id, "project updated");
    Ok(updated)
}

/// Unlink from the owner first, then remove the record. If the unlink fails
/// the project is kept; if the removal fails the unlink is not undone.
#[instrument(skip(state))]
pub async fn delete_project(state: &AppState, raw_id: &str) -> Result<(), AppError> {
    let id = parse_project_id(raw_id)?;
    let user = linkage::load_owner(state.users.as_ref(), state.owner()).await?;

    linkage::detach_project(state.users.as_ref(), &user, id).await?;

    let deleted = state
        .projects
        .delete(id)
        .await
        .map_err(AppError::store("delete project"))?;
    if !deleted {
        warn!(project_id = %id, "owner unlinked but no project record to delete");
        return Err(AppError::not_found("Project not found"));
    }

    info!(project_id = %id, user_id = %user.id, "project removed");
    Ok(())
}

/// Every id in the batch is validated before the first update is issued.
#[instrument(skip(state, items), fields(entries = items.len()))]
pub async fn reorder_projects(
    state: &AppState,
    items: Vec<ReorderRequestItem>,
) -> Result<usize, AppError> {
    let entries = items
        .into_iter()
        .map(|item| -> Result<ReorderEntry, AppError> {
            Ok(ReorderEntry {
                project_id: parse_project_id(&item.project_id)?,
                order: item.order,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    ordering::reorder(state.projects.as_ref(), &entries).await
}

#[instrument(skip(state))]
pub async fn normalize_order(state: &AppState) -> Result<usize, AppError> {
    ordering::normalize(state.projects.as_ref()).await
}
