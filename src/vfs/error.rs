//! VFS error definitions

use std::error::Error;
use std::fmt;

/// VFS error types
#[derive(Debug)]
pub enum VfsError {
    /// Permission denied error
    PermissionDenied(String),
    /// File or directory not found error
    NotFound(String),
    /// Entry already exists (file, or transport for a scheme)
    AlreadyExists(String),
    /// Invalid argument error
    InvalidArgument(String),
    /// Mode string with an unknown first character
    InvalidMode(String),
    /// URI that cannot be converted to a local path
    InvalidUri(String),
    /// No transport registered for the URI's scheme
    UnsupportedScheme(String),
    /// Malformed transport configuration
    ConfigError(String),
    /// I/O error
    IoError(std::io::Error),
    /// System call error with error code
    SystemError(i32, String),
}

impl VfsError {
    /// Build a `SystemError` for a failed call, carrying the OS error text.
    pub fn os(errno: i32, call: &str) -> Self {
        VfsError::SystemError(
            errno,
            format!("{} failed: {}", call, std::io::Error::from_raw_os_error(errno)),
        )
    }

    /// Classify a failed `open` by its errno, the way callers usually care about.
    pub fn from_open_errno(errno: i32, path: &str) -> Self {
        match errno {
            libc::ENOENT => VfsError::NotFound(path.to_string()),
            libc::EACCES => VfsError::PermissionDenied(path.to_string()),
            libc::EEXIST => VfsError::AlreadyExists(path.to_string()),
            _ => VfsError::SystemError(
                errno,
                format!(
                    "open failed for path '{}': {}",
                    path,
                    std::io::Error::from_raw_os_error(errno)
                ),
            ),
        }
    }

    /// OS error code behind this error, if any.
    pub fn errno(&self) -> Option<i32> {
        match self {
            VfsError::SystemError(errno, _) => Some(*errno),
            VfsError::IoError(err) => err.raw_os_error(),
            VfsError::NotFound(_) => Some(libc::ENOENT),
            VfsError::PermissionDenied(_) => Some(libc::EACCES),
            VfsError::AlreadyExists(_) => Some(libc::EEXIST),
            _ => None,
        }
    }
}

impl fmt::Display for VfsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VfsError::PermissionDenied(path) => write!(f, "Permission denied: {}", path),
            VfsError::NotFound(path) => write!(f, "File or directory not found: {}", path),
            VfsError::AlreadyExists(what) => write!(f, "Already exists: {}", what),
            VfsError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            VfsError::InvalidMode(mode) => write!(f, "Invalid mode string: {:?}", mode),
            VfsError::InvalidUri(uri) => write!(f, "Invalid file URI: {}", uri),
            VfsError::UnsupportedScheme(uri) => {
                write!(f, "No transport registered for URI: {}", uri)
            }
            VfsError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            VfsError::IoError(err) => write!(f, "I/O error: {}", err),
            VfsError::SystemError(errno, msg) => {
                write!(f, "System error (errno {}): {}", errno, msg)
            }
        }
    }
}

impl Error for VfsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            VfsError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for VfsError {
    fn from(err: std::io::Error) -> Self {
        VfsError::IoError(err)
    }
}

impl From<std::ffi::NulError> for VfsError {
    fn from(err: std::ffi::NulError) -> Self {
        VfsError::InvalidArgument(err.to_string())
    }
}

impl From<serde_json::Error> for VfsError {
    fn from(err: serde_json::Error) -> Self {
        VfsError::ConfigError(err.to_string())
    }
}

/// Result type for VFS operations
pub type VfsResult<T> = Result<T, VfsError>;
