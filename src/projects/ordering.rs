use bson::oid::ObjectId;
use tracing::{info, instrument, warn};

use crate::error::AppError;
use crate::projects::repo::ProjectStore;
use crate::projects::repo_types::Project;

/// One `(project, new order)` pair of a bulk reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReorderEntry {
    pub project_id: ObjectId,
    pub order: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KanbanEntry {
    pub order: i64,
    pub project_id: ObjectId,
    pub project_title: String,
}

/// Ascending by `order`; ties keep the store's order.
pub fn sort_by_order(projects: &mut [Project]) {
    projects.sort_by_key(|p| p.order);
}

/// Board view: the ascending listing, reversed.
pub fn kanban(mut projects: Vec<Project>) -> Vec<KanbanEntry> {
    sort_by_order(&mut projects);
    projects
        .into_iter()
        .rev()
        .map(|p| KanbanEntry {
            order: p.order,
            project_id: p.id,
            project_title: p.project_name,
        })
        .collect()
}

/// Apply each entry as its own `order` update, in sequence. The first store
/// failure stops the batch; updates already applied stay applied.
/// Returns the number of projects that matched.
#[instrument(skip(store, entries), fields(entries = entries.len()))]
pub async fn reorder(store: &dyn ProjectStore, entries: &[ReorderEntry]) -> Result<usize, AppError> {
    let mut applied = 0;
    for entry in entries {
        let matched = store
            .set_order(entry.project_id, entry.order)
            .await
            .map_err(AppError::store("update project order"))?;
        if matched {
            applied += 1;
        } else {
            warn!(project_id = %entry.project_id, "reorder entry matched no project");
        }
    }
    info!(applied, "project order updated");
    Ok(applied)
}

/// Renumber every project 1..=n following the store's natural order.
#[instrument(skip(store))]
pub async fn normalize(store: &dyn ProjectStore) -> Result<usize, AppError> {
    let projects = store
        .find_all()
        .await
        .map_err(AppError::store("fetch projects"))?;
    let entries: Vec<ReorderEntry> = projects
        .iter()
        .zip(1..)
        .map(|(p, order)| ReorderEntry {
            project_id: p.id,
            order,
        })
        .collect();
    reorder(store, &entries).await
}
