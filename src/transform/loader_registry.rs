use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::{
    errors::{CopyError, Result},
    mapping::VersionInfo,
    transform::{COPY_COLUMNS_VERSION, CopyColumnsTransform, RowTransform},
};

/// Rebuilds a transform from a complete persisted blob, header included.
pub type TransformLoader = fn(&[u8]) -> Result<Box<dyn RowTransform>>;

static GLOBAL: Lazy<LoaderRegistry> = Lazy::new(LoaderRegistry::default_registry);

/// Signature-keyed table of transform loaders.
///
/// Loaders are registered explicitly; nothing registers itself.
#[derive(Default)]
pub struct LoaderRegistry {
    by_signature: HashMap<[u8; 8], (&'static str, TransformLoader)>,
}

impl LoaderRegistry {
    pub fn new() -> Self { Self { by_signature: HashMap::new() } }

    pub fn register(&mut self, version: &VersionInfo, loader: TransformLoader) {
        self.by_signature.insert(version.signature, (version.loader_name, loader));
    }

    pub fn get(&self, signature: &[u8; 8]) -> Option<TransformLoader> {
        self.by_signature.get(signature).map(|(_, loader)| *loader)
    }

    /// Registered loader names, sorted.
    pub fn list(&self) -> Vec<&'static str> {
        let mut v: Vec<_> = self.by_signature.values().map(|(name, _)| *name).collect();
        v.sort();
        v
    }

    /// Pick the loader from the blob's signature and run it.
    pub fn load(&self, bytes: &[u8]) -> Result<Box<dyn RowTransform>> {
        let signature: [u8; 8] = bytes
            .get(..8)
            .and_then(|s| s.try_into().ok())
            .ok_or_else(|| std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!("blob of {} bytes has no signature", bytes.len()),
            ))?;

        let (name, loader) = self.by_signature.get(&signature).ok_or_else(|| CopyError::VersionIncompatible {
            found: format!("signature '{}'", String::from_utf8_lossy(&signature)),
            expected: format!("one of {:?}", self.list()),
        })?;
        tracing::debug!(loader = *name, bytes = bytes.len(), "loading transform");
        loader(bytes)
    }

    pub fn default_registry() -> Self {
        let mut registry = Self::new();
        registry.register(&COPY_COLUMNS_VERSION, CopyColumnsTransform::load_boxed);
        registry
    }

    pub fn global() -> &'static LoaderRegistry {
        &GLOBAL
    }
}
