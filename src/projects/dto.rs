use serde::{Deserialize, Serialize};

use crate::db::serde_helpers::null_as_empty;
use crate::projects::ordering::KanbanEntry;
use crate::projects::repo_types::{Project, ProjectFields};

/// Body of `POST /projects` and `PUT /projects/:id`. Missing required
/// strings deserialize as empty and are rejected by validation.
#[derive(Debug, Deserialize)]
pub struct ProjectRequest {
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub small_description: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub skills: Vec<String>,
    pub project_repository: Option<String>,
    pub project_live_link: Option<String>,
    pub project_video: Option<String>,
    /// Only honoured on create.
    #[serde(default)]
    pub order: i64,
}

impl ProjectRequest {
    pub fn into_parts(self) -> (ProjectFields, i64) {
        let fields = ProjectFields {
            project_name: self.project_name,
            small_description: self.small_description,
            description: self.description,
            skills: self.skills,
            project_repository: self.project_repository,
            project_live_link: self.project_live_link,
            project_video: self.project_video,
        };
        (fields, self.order)
    }
}

#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub id: String,
    pub project_name: String,
    pub small_description: String,
    pub description: String,
    pub skills: Vec<String>,
    pub project_repository: Option<String>,
    pub project_live_link: Option<String>,
    pub project_video: Option<String>,
    pub order: i64,
    /// RFC 3339; `null` for documents that predate timestamps.
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Project> for ProjectResponse {
    fn from(p: Project) -> Self {
        Self {
            id: p.id.to_hex(),
            project_name: p.project_name,
            small_description: p.small_description,
            description: p.description,
            skills: p.skills,
            project_repository: p.project_repository,
            project_live_link: p.project_live_link,
            project_video: p.project_video,
            order: p.order,
            created_at: p.created_at.and_then(|t| t.try_to_rfc3339_string().ok()),
            updated_at: p.updated_at.and_then(|t| t.try_to_rfc3339_string().ok()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReorderRequestItem {
    pub project_id: String,
    pub order: i64,
}

#[derive(Debug, Serialize)]
pub struct KanbanItem {
    pub order: i64,
    pub project_id: String,
    pub project_title: String,
}

impl From<KanbanEntry> for KanbanItem {
    fn from(e: KanbanEntry) -> Self {
        Self {
            order: e.order,
            project_id: e.project_id.to_hex(),
            project_title: e.project_title,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReorderResponse {
    pub updated: usize,
}
