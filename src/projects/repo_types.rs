use bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::db::serde_helpers::null_as_empty;

/// Project document as stored in the `projects` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub project_name: String,
    pub small_description: String,
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub skills: Vec<String>,
    #[serde(default)]
    pub project_repository: Option<String>,
    #[serde(default)]
    pub project_live_link: Option<String>,
    #[serde(default)]
    pub project_video: Option<String>,
    #[serde(default)]
    pub order: i64,
    /// Absent on documents written before timestamps were tracked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime>,
}

/// The editable part of a project. Serialized as-is into a `$set` on update,
/// so it must never carry `_id` or `order`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectFields {
    pub project_name: String,
    pub small_description: String,
    pub description: String,
    pub skills: Vec<String>,
    pub project_repository: Option<String>,
    pub project_live_link: Option<String>,
    pub project_video: Option<String>,
}

/// A project that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub fields: ProjectFields,
    pub order: i64,
}

impl Project {
    pub fn from_new(id: ObjectId, new: NewProject, now: DateTime) -> Self {
        let mut project = Self {
            id,
            project_name: String::new(),
            small_description: String::new(),
            description: String::new(),
            skills: Vec::new(),
            project_repository: None,
            project_live_link: None,
            project_video: None,
            order: new.order,
            created_at: Some(now),
            updated_at: Some(now),
        };
        project.apply(new.fields);
        project
    }

    /// Partial replacement; identity and `order` stay as they are.
    pub fn apply(&mut self, fields: ProjectFields) {
        self.project_name = fields.project_name;
        self.small_description = fields.small_description;
        self.description = fields.description;
        self.skills = fields.skills;
        self.project_repository = fields.project_repository;
        self.project_live_link = fields.project_live_link;
        self.project_video = fields.project_video;
    }
}
