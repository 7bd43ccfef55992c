//! VFS (Virtual File System) module
//!
//! This module provides a uniform file-handle interface over pluggable
//! transports, with a local file transport that wraps libc system calls.

// Re-export error types and result type
pub mod error;
pub use error::{VfsError, VfsResult};

// Re-export interface traits
pub mod interface;
pub use interface::{SeekWhence, VfsFile, VfsTransport};

pub mod config;
pub use config::TransportConfig;

pub mod mode;
pub use mode::{Access, OpenMode};

pub mod uri;
pub use uri::{path_to_uri, uri_to_path};

// Re-export local file transport implementation
pub mod local_fs;
pub use local_fs::{LocalFileHandle, LocalTransport};

pub mod registry;
pub use registry::VfsRegistry;
