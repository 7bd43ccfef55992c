//! Mode string parsing
//!
//! Translates the `fopen`-style mode strings handed to transports into
//! open(2) flags.

use crate::types::UPDATE_MARKER;
use crate::vfs::error::{VfsError, VfsResult};
use libc::c_int;

/// What the first character of a mode string asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// `r`: the file must exist
    Read,
    /// `w`: create or truncate
    Write,
    /// `a`: create if absent, every write goes to the end
    Append,
}

/// Parsed mode string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenMode {
    access: Access,
    update: bool,
}

impl OpenMode {
    /// Parse a mode string such as `"r"`, `"w+"` or `"ab+"`.
    ///
    /// Only the first character and the presence of `+` matter; anything else
    /// (`b`, `t`, ...) is ignored.
    pub fn parse(mode: &str) -> VfsResult<Self> {
        let access = match mode.chars().next() {
            Some('r') => Access::Read,
            Some('w') => Access::Write,
            Some('a') => Access::Append,
            _ => return Err(VfsError::InvalidMode(mode.to_string())),
        };

        Ok(OpenMode {
            access,
            update: mode.contains(UPDATE_MARKER),
        })
    }

    pub fn access(&self) -> Access {
        self.access
    }

    pub fn is_update(&self) -> bool {
        self.update
    }

    pub fn readable(&self) -> bool {
        self.update || self.access == Access::Read
    }

    pub fn writable(&self) -> bool {
        self.update || self.access != Access::Read
    }

    /// Whether opening may create the file, so permission bits are needed
    pub fn creates(&self) -> bool {
        self.access != Access::Read
    }

    /// open(2) flags for this mode. Always includes `O_CLOEXEC`.
    pub fn flags(&self) -> c_int {
        let rw = match (self.access, self.update) {
            (_, true) => libc::O_RDWR,
            (Access::Read, false) => libc::O_RDONLY,
            (_, false) => libc::O_WRONLY,
        };

        let extra = match self.access {
            Access::Read => 0,
            Access::Write => libc::O_CREAT | libc::O_TRUNC,
            Access::Append => libc::O_CREAT | libc::O_APPEND,
        };

        rw | extra | libc::O_CLOEXEC
    }
}
