#[cfg(test)]
pub mod memory;
pub mod mongo;
pub mod serde_helpers;

#[cfg(test)]
pub use memory::MemoryStore;
pub use mongo::MongoStore;
