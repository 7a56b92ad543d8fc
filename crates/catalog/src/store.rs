//! Remote object store port.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque handle to an object returned by a listing call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemoteObjectRef {
    path: String,
}

impl RemoteObjectRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Full object path, e.g. `images/1.png`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Last path segment, e.g. `1.png`.
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// Listing a prefix failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ListError {
    #[error("object store unavailable: {0}")]
    Unavailable(String),

    #[error("listing of '{prefix}' denied")]
    Denied { prefix: String },
}

/// Resolving one object to a fetchable URL failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("object '{path}' not found")]
    NotFound { path: String },

    #[error("could not resolve '{path}': {reason}")]
    Unavailable { path: String, reason: String },

    #[error("resolving '{path}' timed out after {after_ms} ms")]
    TimedOut { path: String, after_ms: u128 },
}

/// Read-only surface of the object store the catalog depends on.
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// List the objects directly under `prefix`, in the store's order.
    async fn list_objects(&self, prefix: &str) -> Result<Vec<RemoteObjectRef>, ListError>;

    /// Resolve an object to a URL the presentation layer can fetch.
    async fn resolve_url(&self, object: &RemoteObjectRef) -> Result<String, ResolutionError>;
}

/// In-memory object store.
///
/// Intended for tests/dev. Lists in lexicographic path order, like the hosted
/// store does.
#[derive(Debug, Default)]
pub struct InMemoryObjectStore {
    objects: RwLock<BTreeMap<String, String>>,
    unresolvable: RwLock<BTreeSet<String>>,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an object and the URL it resolves to.
    pub fn with_object(self, path: impl Into<String>, url: impl Into<String>) -> Self {
        self.insert(path, url);
        self
    }

    pub fn insert(&self, path: impl Into<String>, url: impl Into<String>) {
        if let Ok(mut objects) = self.objects.write() {
            objects.insert(path.into(), url.into());
        }
    }

    /// Keep the object listed but make its URL resolution fail.
    pub fn mark_unresolvable(&self, path: impl Into<String>) {
        if let Ok(mut unresolvable) = self.unresolvable.write() {
            unresolvable.insert(path.into());
        }
    }

    /// Undo [`mark_unresolvable`](Self::mark_unresolvable).
    pub fn mark_resolvable(&self, path: &str) {
        if let Ok(mut unresolvable) = self.unresolvable.write() {
            unresolvable.remove(path);
        }
    }
}

#[async_trait::async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn list_objects(&self, prefix: &str) -> Result<Vec<RemoteObjectRef>, ListError> {
        let objects = self
            .objects
            .read()
            .map_err(|_| ListError::Unavailable("lock poisoned".to_string()))?;

        Ok(objects
            .keys()
            .filter(|path| {
                path.strip_prefix(prefix)
                    .is_some_and(|rest| !rest.is_empty() && !rest.contains('/'))
            })
            .map(RemoteObjectRef::new)
            .collect())
    }

    async fn resolve_url(&self, object: &RemoteObjectRef) -> Result<String, ResolutionError> {
        let unavailable = |reason: &str| ResolutionError::Unavailable {
            path: object.path().to_string(),
            reason: reason.to_string(),
        };

        let unresolvable = self.unresolvable.read().map_err(|_| unavailable("lock poisoned"))?;
        if unresolvable.contains(object.path()) {
            return Err(unavailable("download URL unavailable"));
        }

        let objects = self.objects.read().map_err(|_| unavailable("lock poisoned"))?;
        objects
            .get(object.path())
            .cloned()
            .ok_or_else(|| ResolutionError::NotFound {
                path: object.path().to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> InMemoryObjectStore {
        InMemoryObjectStore::new()
            .with_object("images/2.png", "https://cdn/images/2.png")
            .with_object("images/1.png", "https://cdn/images/1.png")
            .with_object("images/thumbs/1.png", "https://cdn/images/thumbs/1.png")
            .with_object("banners/a.png", "https://cdn/banners/a.png")
    }

    #[tokio::test]
    async fn lists_direct_children_in_path_order() {
        let listed = store().list_objects("images/").await.unwrap();
        let paths: Vec<_> = listed.iter().map(RemoteObjectRef::path).collect();
        assert_eq!(paths, vec!["images/1.png", "images/2.png"]);
    }

    #[tokio::test]
    async fn listing_unknown_prefix_is_empty() {
        assert!(store().list_objects("videos/").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn resolves_and_reports_missing_objects() {
        let store = store();
        let url = store.resolve_url(&RemoteObjectRef::new("banners/a.png")).await.unwrap();
        assert_eq!(url, "https://cdn/banners/a.png");

        let err = store.resolve_url(&RemoteObjectRef::new("banners/z.png")).await.unwrap_err();
        assert!(matches!(err, ResolutionError::NotFound { .. }));
    }

    #[tokio::test]
    async fn unresolvable_objects_stay_listed() {
        let store = store();
        store.mark_unresolvable("images/2.png");

        assert_eq!(store.list_objects("images/").await.unwrap().len(), 2);
        let err = store.resolve_url(&RemoteObjectRef::new("images/2.png")).await.unwrap_err();
        assert!(matches!(err, ResolutionError::Unavailable { .. }));
    }

    #[test]
    fn name_is_last_segment() {
        assert_eq!(RemoteObjectRef::new("images/7.png").name(), "7.png");
        assert_eq!(RemoteObjectRef::new("root.png").name(), "root.png");
    }
}
