//! The virtual filesystem: an in-memory hierarchical tree with a gzip(JSON)
//! snapshot format, owned exclusively by whichever rehydration built it.

mod path;
mod snapshot;
mod tree;
mod vfs;

pub use snapshot::SnapshotFormat;
pub use vfs::Vfs;
