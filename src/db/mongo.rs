//! MongoDB-backed implementation of the project and user stores.

use anyhow::Context;
use async_trait::async_trait;
use bson::{doc, oid::ObjectId, DateTime, Document};
use futures_util::TryStreamExt;
use mongodb::{options::ReturnDocument, Client, Collection};
use tracing::{debug, info};

use crate::config::MongoConfig;
use crate::projects::repo::ProjectStore;
use crate::projects::repo_types::{NewProject, Project, ProjectFields};
use crate::users::repo::UserStore;
use crate::users::repo_types::{OwnerRef, UserDoc};

pub const PROJECT_COLLECTION: &str = "projects";
pub const USER_COLLECTION: &str = "users";

#[derive(Clone)]
pub struct MongoStore {
    projects: Collection<Project>,
    users: Collection<UserDoc>,
}

impl MongoStore {
    pub async fn connect(cfg: &MongoConfig) -> anyhow::Result<Self> {
        info!(database = %cfg.database, "connecting to MongoDB");

        // Fail fast instead of hanging on an unreachable server.
        let uri = if cfg.uri.contains('?') {
            format!("{}&serverSelectionTimeoutMS=3000&connectTimeoutMS=3000", cfg.uri)
        } else {
            format!("{}?serverSelectionTimeoutMS=3000&connectTimeoutMS=3000", cfg.uri)
        };
        let client = Client::with_uri_str(&uri)
            .await
            .context("connect to MongoDB")?;
        let db = client.database(&cfg.database);
        db.run_command(doc! { "ping": 1 })
            .await
            .context("ping MongoDB")?;

        info!(database = %cfg.database, "connected to MongoDB");
        Ok(Self {
            projects: db.collection(PROJECT_COLLECTION),
            users: db.collection(USER_COLLECTION),
        })
    }

    fn raw_projects(&self) -> Collection<Document> {
        self.projects.clone_with_type()
    }
}

#[async_trait]
impl ProjectStore for MongoStore {
    async fn insert(&self, project: NewProject) -> anyhow::Result<Project> {
        let mut document =
            bson::to_document(&project.fields).context("encode project document")?;
        document.insert("order", project.order);
        let now = DateTime::now();
        document.insert("created_at", now);
        document.insert("updated_at", now);

        let result = self
            .raw_projects()
            .insert_one(document)
            .await
            .context("insert project")?;
        let id = result
            .inserted_id
            .as_object_id()
            .context("inserted project id is not an ObjectId")?;
        debug!(project_id = %id, "project inserted");
        Ok(Project::from_new(id, project, now))
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Project>> {
        let cursor = self
            .projects
            .find(doc! {})
            .await
            .context("find projects")?;
        cursor
            .try_collect::<Vec<Project>>()
            .await
            .context("read projects cursor")
    }

    async fn find_by_id(&self, id: ObjectId) -> anyhow::Result<Option<Project>> {
        self.projects
            .find_one(doc! { "_id": id })
            .await
            .context("find project by id")
    }

    async fn update_fields(
        &self,
        id: ObjectId,
        fields: &ProjectFields,
    ) -> anyhow::Result<Option<Project>> {
        let mut set = bson::to_document(fields).context("encode project fields")?;
        set.insert("updated_at", DateTime::now());
        self.projects
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await
            .context("update project fields")
    }

    async fn set_order(&self, id: ObjectId, order: i64) -> anyhow::Result<bool> {
        let result = self
            .projects
            .update_one(
                doc! { "_id": id },
                doc! { "$set": { "order": order, "updated_at": DateTime::now() } },
            )
            .await
            .context("update project order")?;
        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: ObjectId) -> anyhow::Result<bool> {
        let result = self
            .projects
            .delete_one(doc! { "_id": id })
            .await
            .context("delete project")?;
        Ok(result.deleted_count > 0)
    }
}

#[async_trait]
impl UserStore for MongoStore {
    async fn find_owner(&self, owner: OwnerRef) -> anyhow::Result<Option<UserDoc>> {
        let filter = match owner {
            OwnerRef::Configured(id) => doc! { "_id": id },
            OwnerRef::FirstFound => doc! {},
        };
        self.users
            .find_one(filter)
            .await
            .context("find owner user")
    }

    async fn set_projects(&self, user_id: ObjectId, projects: &[ObjectId]) -> anyhow::Result<()> {
        self.users
            .update_one(
                doc! { "_id": user_id },
                doc! { "$set": { "projects": projects.to_vec() } },
            )
            .await
            .context("update user projects")?;
        Ok(())
    }
}
