use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::db::serde_helpers::null_as_empty;

/// The owner record. Only the reference list is read or written here; any
/// other fields on the stored document are left alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDoc {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub projects: Vec<ObjectId>,
}

/// Which user record owns the projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerRef {
    Configured(ObjectId),
    /// Whatever user record the store returns first.
    FirstFound,
}

impl From<Option<ObjectId>> for OwnerRef {
    fn from(id: Option<ObjectId>) -> Self {
        id.map_or(Self::FirstFound, Self::Configured)
    }
}
