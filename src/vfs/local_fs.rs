//! Local file transport using libc system calls
//!
//! Serves `file://` URIs. Every handle owns one descriptor; the cursor lives in
//! the kernel and is never cached here.

use crate::types::{Descriptor, FILE_URI_ID, INVALID_DESCRIPTOR};
use crate::vfs::config::TransportConfig;
use crate::vfs::error::{VfsError, VfsResult};
use crate::vfs::interface::{SeekWhence, VfsFile, VfsTransport};
use crate::vfs::mode::OpenMode;
use crate::vfs::registry::VfsRegistry;
use crate::vfs::uri::uri_to_path;
use libc::{self, c_int, c_uint, c_void, off_t, size_t};
use log::{debug, error};
use std::ffi::CString;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::sync::Arc;

fn errno() -> i32 {
    std::io::Error::last_os_error().raw_os_error().unwrap_or(0)
}

impl SeekWhence {
    fn as_raw(self) -> c_int {
        match self {
            SeekWhence::Set => libc::SEEK_SET,
            SeekWhence::Current => libc::SEEK_CUR,
            SeekWhence::End => libc::SEEK_END,
        }
    }
}

/// Local file handle implementation
pub struct LocalFileHandle {
    fd: Descriptor,
    sync_on_close: bool,
    last_error: Option<VfsError>,
}

impl LocalFileHandle {
    fn new(fd: Descriptor, sync_on_close: bool) -> Self {
        LocalFileHandle {
            fd,
            sync_on_close,
            last_error: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn raw_fd(&self) -> Descriptor {
        self.fd
    }

    /// Record a failed transfer call; read/write report errors this way.
    fn fail_transfer(&mut self, call: &str) {
        let err = VfsError::os(errno(), call);
        error!(target: "unixio", "{}", err);
        self.last_error = Some(err);
    }

    fn release(&mut self) {
        if self.fd != INVALID_DESCRIPTOR {
            let _ = unsafe { libc::close(self.fd) };
            self.fd = INVALID_DESCRIPTOR;
        }
    }
}

impl VfsFile for LocalFileHandle {
    fn read(&mut self, buf: &mut [u8], size: usize, nitems: usize) -> usize {
        let goal = size.saturating_mul(nitems).min(buf.len());
        let mut total = 0;

        debug!(target: "unixio", "read {} x {}", size, nitems);

        while total < goal {
            let result = unsafe {
                libc::read(
                    self.fd,
                    buf[total..].as_mut_ptr() as *mut c_void,
                    (goal - total) as size_t,
                )
            };

            if result < 0 {
                self.fail_transfer("read");
                break;
            }

            // End of data
            if result == 0 {
                break;
            }

            total += result as usize;
        }

        debug!(target: "unixio", " = {}", total);

        if size > 0 { total / size } else { 0 }
    }

    fn write(&mut self, buf: &[u8], size: usize, nitems: usize) -> usize {
        let goal = size.saturating_mul(nitems).min(buf.len());
        let mut total = 0;

        debug!(target: "unixio", "write {} x {}", size, nitems);

        while total < goal {
            let result = unsafe {
                libc::write(
                    self.fd,
                    buf[total..].as_ptr() as *const c_void,
                    (goal - total) as size_t,
                )
            };

            if result < 0 {
                self.fail_transfer("write");
                break;
            }

            total += result as usize;
        }

        debug!(target: "unixio", " = {}", total);

        if size > 0 { total / size } else { 0 }
    }

    fn getc(&mut self) -> Option<u8> {
        let mut byte = [0u8; 1];
        if self.read(&mut byte, 1, 1) == 1 {
            Some(byte[0])
        } else {
            None
        }
    }

    fn ungetc(&mut self, c: u8) -> Option<u8> {
        self.seek(-1, SeekWhence::Current).ok().map(|_| c)
    }

    fn seek(&mut self, offset: i64, whence: SeekWhence) -> VfsResult<()> {
        debug!(target: "unixio", "seek {}, whence = {:?}", offset, whence);

        let result = unsafe { libc::lseek(self.fd, offset as off_t, whence.as_raw()) };

        if result < 0 {
            let err = VfsError::os(errno(), "lseek");
            error!(target: "unixio", "{}", err);
            Err(err)
        } else {
            Ok(())
        }
    }

    fn rewind(&mut self) {
        let _ = self.seek(0, SeekWhence::Set);
    }

    fn tell(&self) -> VfsResult<u64> {
        let result = unsafe { libc::lseek(self.fd, 0, libc::SEEK_CUR) };

        if result < 0 {
            let err = VfsError::os(errno(), "lseek");
            error!(target: "unixio", "{}", err);
            Err(err)
        } else {
            Ok(result as u64)
        }
    }

    fn eof(&mut self) -> bool {
        match self.getc() {
            None => true,
            Some(c) => {
                // Steps the cursor back over the byte just consumed
                let _ = self.ungetc(c);
                false
            }
        }
    }

    fn truncate(&mut self, length: u64) -> VfsResult<()> {
        debug!(target: "unixio", "truncate {}", length);

        let length = off_t::try_from(length)
            .map_err(|_| VfsError::InvalidArgument(format!("length {} too large", length)))?;

        let result = unsafe { libc::ftruncate(self.fd, length) };

        if result < 0 {
            let err = VfsError::os(errno(), "ftruncate");
            error!(target: "unixio", "{}", err);
            Err(err)
        } else {
            Ok(())
        }
    }

    fn size(&mut self) -> VfsResult<u64> {
        let position = self.tell()?;

        self.seek(0, SeekWhence::End)?;
        let length = self.tell()?;

        let position = i64::try_from(position)
            .map_err(|_| VfsError::InvalidArgument(format!("offset {} too large", position)))?;
        self.seek(position, SeekWhence::Set)?;

        Ok(length)
    }

    fn take_error(&mut self) -> Option<VfsError> {
        self.last_error.take()
    }

    fn close(mut self: Box<Self>) -> VfsResult<()> {
        debug!(target: "unixio", "close");

        let mut status = Ok(());

        if self.sync_on_close && unsafe { libc::fsync(self.fd) } < 0 {
            let err = VfsError::os(errno(), "fsync");
            error!(target: "unixio", "{}", err);
            status = Err(err);
        }

        // Released even if fsync failed; Drop sees INVALID_DESCRIPTOR afterwards
        self.release();
        status
    }
}

impl Drop for LocalFileHandle {
    fn drop(&mut self) {
        self.release();
    }
}

/// Local file transport
pub struct LocalTransport {
    config: TransportConfig,
}

impl Default for LocalTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalTransport {
    /// Create a transport with the default configuration
    pub fn new() -> Self {
        Self::with_config(TransportConfig::default())
    }

    pub fn with_config(config: TransportConfig) -> Self {
        LocalTransport { config }
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Register this transport for `file://` URIs.
    pub fn register(self, registry: &VfsRegistry) -> VfsResult<()> {
        registry.register(Arc::new(self))
    }

    /// Open a local path directly, skipping URI conversion.
    pub fn open_path(&self, path: &Path, mode: &str) -> VfsResult<LocalFileHandle> {
        let mode = OpenMode::parse(mode)?;
        self.open_internal(path, mode)
    }

    fn open_internal(&self, path: &Path, mode: OpenMode) -> VfsResult<LocalFileHandle> {
        // Create CString in scope so it lives during the system call
        let c_path = CString::new(path.as_os_str().as_bytes())?;
        let flags = mode.flags();

        let fd = unsafe {
            if mode.creates() {
                libc::open(c_path.as_ptr(), flags, self.config.create_mode as c_uint)
            } else {
                libc::open(c_path.as_ptr(), flags)
            }
        };

        if fd < 0 {
            let errno = errno();
            error!(
                target: "unixio",
                "Cannot open {}: {}.",
                path.display(),
                std::io::Error::from_raw_os_error(errno)
            );
            return Err(VfsError::from_open_errno(errno, &path.to_string_lossy()));
        }

        Ok(LocalFileHandle::new(fd, self.config.sync_on_close))
    }
}

impl VfsTransport for LocalTransport {
    fn uri_id(&self) -> &str {
        FILE_URI_ID
    }

    fn open(&self, uri: &str, mode: &str) -> VfsResult<Box<dyn VfsFile>> {
        debug!(target: "unixio", "fopen {}, mode = {}", uri, mode);

        let mode = OpenMode::parse(mode)?;
        let path = uri_to_path(uri)?;

        let handle = self.open_internal(&path, mode)?;
        Ok(Box::new(handle))
    }
}
