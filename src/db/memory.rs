//! In-process store used by `AppState::fake()` and the test suites.
//!
//! Keeps insertion order as the natural order, like a collection scan
//! without a sort. Individual operations can be made to fail to exercise
//! the partial-failure paths of multi-step operations.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use bson::{oid::ObjectId, DateTime};

use crate::projects::repo::ProjectStore;
use crate::projects::repo_types::{NewProject, Project, ProjectFields};
use crate::users::repo::UserStore;
use crate::users::repo_types::{OwnerRef, UserDoc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    InsertProject,
    FindProjects,
    FindProject,
    UpdateProject,
    SetOrder,
    DeleteProject,
    FindOwner,
    SetUserProjects,
}

#[derive(Default)]
struct Inner {
    projects: Vec<Project>,
    users: Vec<UserDoc>,
    /// Remaining successful calls before the op starts failing.
    failing: HashMap<StoreOp, usize>,
}

impl Inner {
    fn check(&mut self, op: StoreOp) -> anyhow::Result<()> {
        match self.failing.get_mut(&op) {
            Some(0) => anyhow::bail!("injected {op:?} failure"),
            Some(left) => {
                *left -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding a single user with no projects.
    pub fn with_owner() -> (Self, ObjectId) {
        let store = Self::new();
        let id = store.add_user(Vec::new());
        (store, id)
    }

    pub fn add_user(&self, projects: Vec<ObjectId>) -> ObjectId {
        let id = ObjectId::new();
        self.guard().users.push(UserDoc { id, projects });
        id
    }

    pub fn fail_on(&self, op: StoreOp) {
        self.fail_after(op, 0);
    }

    /// Let `successes` calls of `op` through, then fail every later one.
    pub fn fail_after(&self, op: StoreOp, successes: usize) {
        self.guard().failing.insert(op, successes);
    }

    pub fn projects(&self) -> Vec<Project> {
        self.guard().projects.clone()
    }

    pub fn user(&self, id: ObjectId) -> Option<UserDoc> {
        self.guard().users.iter().find(|u| u.id == id).cloned()
    }

    fn guard(&self) -> MutexGuard<'_, Inner> {
        // A poisoned lock only means another test thread panicked mid-call.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl ProjectStore for MemoryStore {
    async fn insert(&self, project: NewProject) -> anyhow::Result<Project> {
        let mut inner = self.guard();
        inner.check(StoreOp::InsertProject)?;
        let created = Project::from_new(ObjectId::new(), project, DateTime::now());
        inner.projects.push(created.clone());
        Ok(created)
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Project>> {
        let mut inner = self.guard();
        inner.check(StoreOp::FindProjects)?;
        Ok(inner.projects.clone())
    }

    async fn find_by_id(&self, id: ObjectId) -> anyhow::Result<Option<Project>> {
        let mut inner = self.guard();
        inner.check(StoreOp::FindProject)?;
        Ok(inner.projects.iter().find(|p| p.id == id).cloned())
    }

    async fn update_fields(
        &self,
        id: ObjectId,
        fields: &ProjectFields,
    ) -> anyhow::Result<Option<Project>> {
        let mut inner = self.guard();
        inner.check(StoreOp::UpdateProject)?;
        Ok(inner.projects.iter_mut().find(|p| p.id == id).map(|p| {
            p.apply(fields.clone());
            p.updated_at = Some(DateTime::now());
            p.clone()
        }))
    }

    async fn set_order(&self, id: ObjectId, order: i64) -> anyhow::Result<bool> {
        let mut inner = self.guard();
        inner.check(StoreOp::SetOrder)?;
        match inner.projects.iter_mut().find(|p| p.id == id) {
            Some(p) => {
                p.order = order;
                p.updated_at = Some(DateTime::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: ObjectId) -> anyhow::Result<bool> {
        let mut inner = self.guard();
        inner.check(StoreOp::DeleteProject)?;
        let before = inner.projects.len();
        inner.projects.retain(|p| p.id != id);
        Ok(inner.projects.len() < before)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_owner(&self, owner: OwnerRef) -> anyhow::Result<Option<UserDoc>> {
        let mut inner = self.guard();
        inner.check(StoreOp::FindOwner)?;
        let found = match owner {
            OwnerRef::Configured(id) => inner.users.iter().find(|u| u.id == id),
            OwnerRef::FirstFound => inner.users.first(),
        };
        Ok(found.cloned())
    }

    async fn set_projects(&self, user_id: ObjectId, projects: &[ObjectId]) -> anyhow::Result<()> {
        let mut inner = self.guard();
        inner.check(StoreOp::SetUserProjects)?;
        if let Some(user) = inner.users.iter_mut().find(|u| u.id == user_id) {
            user.projects = projects.to_vec();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str) -> ProjectFields {
        ProjectFields {
            project_name: name.into(),
            small_description: "short".into(),
            description: "long".into(),
            skills: vec![],
            project_repository: None,
            project_live_link: None,
            project_video: None,
        }
    }

    #[tokio::test]
    async fn fail_after_lets_some_calls_through() {
        let store = MemoryStore::new();
        let a = store
            .insert(NewProject { fields: fields("a"), order: 0 })
            .await
            .unwrap();
        store.fail_after(StoreOp::SetOrder, 1);
        assert!(store.set_order(a.id, 5).await.unwrap());
        assert!(store.set_order(a.id, 6).await.is_err());
        assert_eq!(store.projects()[0].order, 5);
    }

    #[tokio::test]
    async fn writes_bump_updated_at_only() {
        let store = MemoryStore::new();
        let created = store
            .insert(NewProject { fields: fields("a"), order: 0 })
            .await
            .unwrap();
        assert!(created.created_at.is_some());
        assert_eq!(created.created_at, created.updated_at);

        let updated = store
            .update_fields(created.id, &fields("b"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);

        store.set_order(created.id, 3).await.unwrap();
        let stored = &store.projects()[0];
        assert_eq!(stored.created_at, created.created_at);
        assert!(stored.updated_at >= updated.updated_at);
    }

    #[tokio::test]
    async fn configured_owner_is_looked_up_by_id() {
        let store = MemoryStore::new();
        let first = store.add_user(vec![]);
        let second = store.add_user(vec![]);

        let found = store.find_owner(OwnerRef::Configured(second)).await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(second));

        let found = store.find_owner(OwnerRef::FirstFound).await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(first));

        let missing = store
            .find_owner(OwnerRef::Configured(ObjectId::new()))
            .await
            .unwrap();
        assert!(missing.is_none());
    }
}
