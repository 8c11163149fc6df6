use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{instrument, warn};

use crate::{auth::AdminUser, error::AppError, response::ApiResponse, state::AppState};

use super::dto::{KanbanItem, ProjectRequest, ProjectResponse, ReorderRequestItem, ReorderResponse};
use super::services::{self, Listing};

// `kanban` and the other literal segments go before `:id`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/projects", get(list_projects).post(create_project))
        .route("/projects/kanban", get(list_kanban))
        .route("/projects/updateOrder", post(update_order))
        .route("/projects/normalizeOrder", post(normalize_order))
        .route(
            "/projects/:id",
            get(get_project).put(update_project).delete(delete_project),
        )
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    match payload {
        Ok(Json(v)) => Ok(v),
        Err(e) => {
            warn!(error = %e, "rejected request body");
            Err(AppError::validation("Invalid request body"))
        }
    }
}

#[instrument(skip(state))]
pub async fn list_projects(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<ProjectResponse>>, AppError> {
    Ok(match services::list_projects(&state).await? {
        Listing::Empty => ApiResponse::empty("No projects found"),
        Listing::Items(projects) => ApiResponse::ok(
            "Projects retrieved successfully",
            projects.into_iter().map(Into::into).collect(),
        ),
    })
}

#[instrument(skip(state))]
pub async fn list_kanban(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<KanbanItem>>, AppError> {
    Ok(match services::list_kanban(&state).await? {
        Listing::Empty => ApiResponse::empty("No projects found"),
        Listing::Items(entries) => ApiResponse::ok(
            "Projects retrieved successfully",
            entries.into_iter().map(Into::into).collect(),
        ),
    })
}

#[instrument(skip(state))]
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<ProjectResponse>, AppError> {
    let project = services::get_project(&state, &id).await?;
    Ok(ApiResponse::ok("Project retrieved successfully", project.into()))
}

#[instrument(skip(state, payload))]
pub async fn create_project(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    payload: Result<Json<ProjectRequest>, JsonRejection>,
) -> Result<ApiResponse<ProjectResponse>, AppError> {
    let (fields, order) = body(payload)?.into_parts();
    let project = services::create_project(&state, fields, order).await?;
    Ok(ApiResponse::ok("Project added successfully", project.into()))
}

#[instrument(skip(state, payload))]
pub async fn update_project(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
    payload: Result<Json<ProjectRequest>, JsonRejection>,
) -> Result<ApiResponse<ProjectResponse>, AppError> {
    let (fields, _) = body(payload)?.into_parts();
    let project = services::update_project(&state, &id, fields).await?;
    Ok(ApiResponse::ok("Project updated successfully", project.into()))
}

#[instrument(skip(state))]
pub async fn delete_project(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>, AppError> {
    services::delete_project(&state, &id).await?;
    Ok(ApiResponse::empty("Project removed successfully"))
}

#[instrument(skip(state, payload))]
pub async fn update_order(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    payload: Result<Json<Vec<ReorderRequestItem>>, JsonRejection>,
) -> Result<ApiResponse<ReorderResponse>, AppError> {
    let updated = services::reorder_projects(&state, body(payload)?).await?;
    Ok(ApiResponse::ok(
        "Project order updated successfully",
        ReorderResponse { updated },
    ))
}

#[instrument(skip(state))]
pub async fn normalize_order(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
) -> Result<ApiResponse<ReorderResponse>, AppError> {
    let updated = services::normalize_order(&state).await?;
    Ok(ApiResponse::ok("Project order normalized", ReorderResponse { updated }))
}
