//! The Graph Store collaborator interface (§6): one parameterized
//! query operation plus typed wrappers around the three named Cypher
//! templates, and an in-memory test double.

pub mod memory;
mod queries;
mod rows;
mod store;

pub use memory::InMemoryGraphStore;
pub use rows::DiffHunkRow;
pub use rows::SnapshotRow;
pub use rows::ToolCallRow;
pub use store::GraphStore;
