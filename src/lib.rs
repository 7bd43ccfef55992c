//! Unixio: virtual file handles over local files

// Global type definitions
pub mod types;

pub mod vfs;

// Re-export vfs items for easier access
pub use vfs::{LocalTransport, SeekWhence, VfsError, VfsFile, VfsRegistry, VfsResult, VfsTransport};
