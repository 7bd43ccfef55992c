//! `file://` URI conversion
//!
//! Accepted form: `file://[localhost]/absolute/path`, with `%XX` escapes
//! decoded to raw bytes. Fragments, escaped `/` and escaped NUL are rejected.

use crate::vfs::error::{VfsError, VfsResult};
use std::ffi::OsString;
use std::os::unix::ffi::{OsStrExt, OsStringExt};
use std::path::{Path, PathBuf};

const FILE_SCHEME: &str = "file";
const LOCAL_HOST: &str = "localhost";

/// Convert a `file://` URI to a local path.
///
/// # Errors
///
/// Returns `VfsError::InvalidUri` if:
/// - the scheme is not `file` or the `://` separator is missing
/// - the host is neither empty nor `localhost`
/// - the URI has a fragment or no absolute path
/// - an escape is malformed or decodes to `/` or NUL
pub fn uri_to_path(uri: &str) -> VfsResult<PathBuf> {
    let invalid = || VfsError::InvalidUri(uri.to_string());

    let scheme_end = uri.find("://").ok_or_else(invalid)?;
    if !uri[..scheme_end].eq_ignore_ascii_case(FILE_SCHEME) {
        return Err(invalid());
    }

    let rest = &uri[scheme_end + 3..];
    if rest.contains('#') {
        return Err(invalid());
    }

    // Split host from path; the path keeps its leading '/'
    let slash = rest.find('/').ok_or_else(invalid)?;
    let (host, path) = rest.split_at(slash);
    if !host.is_empty() && !host.eq_ignore_ascii_case(LOCAL_HOST) {
        return Err(invalid());
    }

    let bytes = percent_decode(path.as_bytes()).ok_or_else(invalid)?;
    Ok(PathBuf::from(OsString::from_vec(bytes)))
}

/// Convert an absolute local path to a `file://` URI.
pub fn path_to_uri(path: &Path) -> VfsResult<String> {
    if !path.is_absolute() {
        return Err(VfsError::InvalidArgument(format!(
            "path is not absolute: {}",
            path.display()
        )));
    }

    let bytes = path.as_os_str().as_bytes();
    let mut uri = String::with_capacity(7 + bytes.len());
    uri.push_str(FILE_SCHEME);
    uri.push_str("://");

    for &byte in bytes {
        if is_path_safe(byte) {
            uri.push(byte as char);
        } else {
            uri.push_str(&format!("%{:02X}", byte));
        }
    }

    Ok(uri)
}

fn is_path_safe(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || b"/-._~!$&'()*+,;=:@".contains(&byte)
}

fn hex_value(byte: u8) -> Option<u8> {
    (byte as char).to_digit(16).map(|d| d as u8)
}

fn percent_decode(input: &[u8]) -> Option<Vec<u8>> {
    let mut out = Vec::with_capacity(input.len());
    let mut i = 0;

    while i < input.len() {
        if input[i] == b'%' {
            let hi = input.get(i + 1).copied().and_then(hex_value)?;
            let lo = input.get(i + 2).copied().and_then(hex_value)?;
            let byte = (hi << 4) | lo;
            if byte == b'/' || byte == 0 {
                return None;
            }
            out.push(byte);
            i += 3;
        } else {
            out.push(input[i]);
            i += 1;
        }
    }

    Some(out)
}
