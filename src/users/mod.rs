pub mod linkage;
pub mod repo;
pub mod repo_types;
