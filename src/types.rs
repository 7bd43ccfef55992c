//! Global type definitions
//!
//! Stores constants and type aliases shared by the transport and its registry

/// Native descriptor type owned by a local file handle
pub type Descriptor = libc::c_int;

/// Descriptor value of a handle whose descriptor has been released
pub const INVALID_DESCRIPTOR: Descriptor = -1;

/// URI prefix served by the local transport
pub const FILE_URI_ID: &str = "file://";

/// Permission bits for newly created files (rw-r--r--)
pub const DEFAULT_CREATE_MODE: u32 = 0o644;

/// Marker in a mode string requesting read+write access
pub const UPDATE_MARKER: char = '+';
