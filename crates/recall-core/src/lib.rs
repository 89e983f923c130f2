//! Shared types for the temporal core: bitemporal time, domain entities,
//! stable identifiers, and the error taxonomy every other `recall-*`
//! crate returns over its public contract.

mod entities;
mod error;
mod ids;
mod time;

pub use entities::BlobRef;
pub use entities::DiffHunk;
pub use entities::Session;
pub use entities::Snapshot;
pub use entities::Thought;
pub use entities::ToolCall;
pub use error::RecallError;
pub use ids::DiffHunkId;
pub use ids::SessionId;
pub use ids::ThoughtId;
pub use ids::ToolCallId;
pub use time::Timestamp;
pub use time::MAX_DATE;

pub type Result<T> = std::result::Result<T, RecallError>;
