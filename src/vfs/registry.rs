//! Transport registry
//!
//! Maps URI prefixes to the transport that serves them.

use crate::vfs::error::{VfsError, VfsResult};
use crate::vfs::interface::{VfsFile, VfsTransport};
use log::{debug, info};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

pub struct VfsRegistry {
    transports: RwLock<HashMap<String, Arc<dyn VfsTransport>>>,
}

impl Default for VfsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl VfsRegistry {
    pub fn new() -> Self {
        Self {
            transports: RwLock::new(HashMap::new()),
        }
    }

    /// Register a transport under its `uri_id`. Prefixes are case-insensitive.
    pub fn register(&self, transport: Arc<dyn VfsTransport>) -> VfsResult<()> {
        let uri_id = transport.uri_id().to_ascii_lowercase();
        if uri_id.is_empty() {
            return Err(VfsError::InvalidArgument(
                "transport has an empty uri_id".to_string(),
            ));
        }

        let mut transports = self.transports.write();
        if transports.contains_key(&uri_id) {
            return Err(VfsError::AlreadyExists(uri_id));
        }

        info!(target: "unixio", "registered transport for {}", uri_id);
        transports.insert(uri_id, transport);
        Ok(())
    }

    /// Transport with the longest `uri_id` that prefixes `uri`.
    pub fn transport_for(&self, uri: &str) -> Option<Arc<dyn VfsTransport>> {
        let transports = self.transports.read();

        transports
            .iter()
            .filter(|(uri_id, _)| {
                uri.len() >= uri_id.len()
                    && uri.is_char_boundary(uri_id.len())
                    && uri[..uri_id.len()].eq_ignore_ascii_case(uri_id)
            })
            .max_by_key(|(uri_id, _)| uri_id.len())
            .map(|(_, transport)| Arc::clone(transport))
    }

    /// Open `uri` through the transport registered for its scheme.
    pub fn open(&self, uri: &str, mode: &str) -> VfsResult<Box<dyn VfsFile>> {
        let transport = self
            .transport_for(uri)
            .ok_or_else(|| VfsError::UnsupportedScheme(uri.to_string()))?;

        debug!(target: "unixio", "dispatching {} to {}", uri, transport.uri_id());
        transport.open(uri, mode)
    }

    /// Registered URI prefixes, sorted
    pub fn schemes(&self) -> Vec<String> {
        let mut schemes: Vec<String> = self.transports.read().keys().cloned().collect();
        schemes.sort();
        schemes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vfs::interface::SeekWhence;

    struct NullTransport {
        uri_id: &'static str,
    }

    impl VfsTransport for NullTransport {
        fn uri_id(&self) -> &str {
            self.uri_id
        }

        fn open(&self, uri: &str, _mode: &str) -> VfsResult<Box<dyn VfsFile>> {
            Err(VfsError::NotFound(format!("{} via {}", uri, self.uri_id)))
        }
    }

    #[test]
    fn test_registry_duplicate_scheme() {
        let registry = VfsRegistry::new();
        registry
            .register(Arc::new(NullTransport { uri_id: "null://" }))
            .unwrap();

        let result = registry.register(Arc::new(NullTransport { uri_id: "NULL://" }));
        assert!(matches!(result, Err(VfsError::AlreadyExists(_))));
        assert_eq!(registry.schemes(), vec!["null://".to_string()]);
    }

    #[test]
    fn test_registry_longest_prefix_wins() {
        let registry = VfsRegistry::new();
        registry
            .register(Arc::new(NullTransport { uri_id: "x://" }))
            .unwrap();
        registry
            .register(Arc::new(NullTransport { uri_id: "x://special/" }))
            .unwrap();

        let transport = registry.transport_for("x://special/a").unwrap();
        assert_eq!(transport.uri_id(), "x://special/");

        let transport = registry.transport_for("X://plain").unwrap();
        assert_eq!(transport.uri_id(), "x://");

        match registry.open("x://special/a", "r") {
            Err(VfsError::NotFound(msg)) => assert!(msg.ends_with("via x://special/")),
            _ => panic!("expected dispatch to the longer prefix"),
        }
    }

    #[test]
    fn test_registry_unsupported_scheme() {
        let registry = VfsRegistry::new();
        assert!(registry.transport_for("file:///tmp/a").is_none());
        assert!(matches!(
            registry.open("http://host/a", "r"),
            Err(VfsError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn test_registry_default_metadata_absent() {
        let registry = VfsRegistry::new();
        crate::vfs::LocalTransport::new().register(&registry).unwrap();

        let dir = tempfile::TempDir::new().unwrap();
        let uri = crate::vfs::path_to_uri(&dir.path().join("m.bin")).unwrap();

        let transport = registry.transport_for(&uri).unwrap();
        let mut file = registry.open(&uri, "w+").unwrap();
        file.seek(0, SeekWhence::Set).unwrap();
        assert_eq!(transport.metadata(file.as_mut(), "title"), None);
        file.close().unwrap();
    }
}
