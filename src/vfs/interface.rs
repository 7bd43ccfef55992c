//! VFS interface definitions

use crate::vfs::error::{VfsError, VfsResult};

/// Reference point of a seek
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekWhence {
    /// From the start of the file
    Set,
    /// From the current position
    Current,
    /// From the end of the file
    End,
}

/// File handle trait for VFS operations
///
/// A handle owns one open file until `close` consumes it. None of the methods
/// are safe to interleave on the same handle: `eof`, `ungetc` and `size` move
/// the cursor in several steps and assume nobody else touches it meanwhile.
pub trait VfsFile: Send {
    /// Read up to `nitems` elements of `size` bytes into `buf`.
    ///
    /// Loops until the request is satisfied, the file reports end of data, or
    /// the underlying read fails. Returns the number of whole elements read;
    /// a short count is not an error by itself, see `eof` and `take_error`.
    fn read(&mut self, buf: &mut [u8], size: usize, nitems: usize) -> usize;

    /// Write up to `nitems` elements of `size` bytes from `buf`.
    ///
    /// Returns the number of whole elements written. Stops at the first
    /// failing write.
    fn write(&mut self, buf: &[u8], size: usize, nitems: usize) -> usize;

    /// Read a single byte. `None` means end of file (or a failed read).
    fn getc(&mut self) -> Option<u8>;

    /// Push back the byte just read by stepping the cursor back one position.
    ///
    /// Returns `c` on success and `None` if the cursor could not be moved. The
    /// byte itself is not buffered: only a pushback directly after a read is
    /// guaranteed to be observed again.
    fn ungetc(&mut self, c: u8) -> Option<u8>;

    /// Move the cursor.
    fn seek(&mut self, offset: i64, whence: SeekWhence) -> VfsResult<()>;

    /// Move the cursor back to the start of the file.
    fn rewind(&mut self);

    /// Current cursor offset.
    fn tell(&self) -> VfsResult<u64>;

    /// Whether the cursor sits at end of file.
    fn eof(&mut self) -> bool;

    /// Set the file length to exactly `length` bytes.
    fn truncate(&mut self, length: u64) -> VfsResult<()>;

    /// Total file length. The cursor is left where it was.
    fn size(&mut self) -> VfsResult<u64>;

    /// Error of the last failed read or write, if any. Clears it.
    fn take_error(&mut self) -> Option<VfsError>;

    /// Flush to durable storage and release the handle.
    ///
    /// The handle is released even when the flush fails; the error is still
    /// reported.
    fn close(self: Box<Self>) -> VfsResult<()>;
}

/// Transport trait
///
/// A transport serves one URI prefix (for example `file://`) and produces
/// handles for it. Transports are registered in a `VfsRegistry`.
pub trait VfsTransport: Send + Sync {
    /// URI prefix this transport serves, including `://`
    fn uri_id(&self) -> &str;

    /// Open `uri` with a C-style mode string (`r`, `w+`, `a`, ...)
    ///
    /// # Returns
    /// * `Ok(Box<dyn VfsFile>)` if the file was opened successfully
    /// * `Err(VfsError)` if the mode, the URI or the open itself failed; no
    ///   resource is held in that case
    fn open(&self, uri: &str, mode: &str) -> VfsResult<Box<dyn VfsFile>>;

    /// Query a metadata field of an open file. Transports without metadata
    /// support keep the default.
    fn metadata(&self, _file: &mut dyn VfsFile, _field: &str) -> Option<String> {
        None
    }
}
