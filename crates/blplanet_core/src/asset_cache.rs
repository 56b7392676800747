//! Asset cache
//!
//! A type-erased store for anything implementing the [`Asset`] trait.
//! Assets are deduplicated by file path and shared through `Arc`.
//!
//! - [`AssetId`] - Unique identifier for a cached asset (incrementing `u64`)
//! - [`AssetHandle`] - Lightweight handle returned to callers, containing id and path
//! - [`Asset`] trait - Implemented by types that can be loaded from files
//! - [`AssetCache`] - Main cache storing `Arc<dyn Any + Send + Sync>` internally

use std::any::Any;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::asset_error::AssetError;

/// Unique identifier for an asset in the cache.
///
/// Asset IDs are assigned sequentially starting from 1. An ID of 0 is reserved
/// and never assigned to a valid asset.
pub type AssetId = u64;

/// A lightweight handle to a cached asset.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct AssetHandle {
    id: AssetId,
    path: PathBuf,
}

impl AssetHandle {
    /// Get the asset ID
    pub fn id(&self) -> AssetId {
        self.id
    }

    /// Get the file path this asset was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Trait for types that can be loaded from files and cached.
pub trait Asset: Sized + Send + Sync + 'static {
    /// Load this asset from the given file path.
    ///
    /// # Errors
    ///
    /// Returns an [`AssetError`] if the file cannot be read or parsed.
    fn load_from_file(path: &Path) -> Result<Self, AssetError>;
}

/// A type-erased asset cache
///
/// Inserting the same path twice returns the first handle.
pub struct AssetCache {
    assets: HashMap<AssetId, Arc<dyn Any + Send + Sync>>,
    path_index: HashMap<PathBuf, AssetId>,
    next_id: u64,
}

impl Default for AssetCache {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetCache {
    /// Create a new empty asset cache.
    pub fn new() -> Self {
        Self {
            assets: HashMap::new(),
            path_index: HashMap::new(),
            next_id: 1, // 0 is reserved as "no asset"
        }
    }

    /// Store an already-loaded asset under `path`
    ///
    /// If the path is already cached the existing handle is returned and
    /// `data` is dropped.
    pub fn insert<T: Asset>(&mut self, path: impl AsRef<Path>, data: T) -> AssetHandle {
        let path = path.as_ref().to_path_buf();
        if let Some(&id) = self.path_index.get(&path) {
            return AssetHandle { id, path };
        }

        let id = self.next_id;
        self.next_id += 1;

        self.assets.insert(id, Arc::new(data));
        self.path_index.insert(path.clone(), id);
        log::debug!("Cached asset {} as #{}", path.display(), id);

        AssetHandle { id, path }
    }

    /// Retrieve a cached asset by its handle, downcasting to the requested type.
    ///
    /// Returns `None` if the handle is unknown or if the stored type does not
    /// match `T`.
    pub fn get<T: Asset>(&self, handle: &AssetHandle) -> Option<Arc<T>> {
        let data = self.assets.get(&handle.id)?;
        data.clone().downcast::<T>().ok()
    }

    /// Handle for a path that is already cached
    pub fn handle_for(&self, path: impl AsRef<Path>) -> Option<AssetHandle> {
        let path = path.as_ref();
        self.path_index.get(path).map(|&id| AssetHandle {
            id,
            path: path.to_path_buf(),
        })
    }

    /// Get the number of assets currently in the cache.
    pub fn asset_count(&self) -> usize {
        self.assets.len()
    }

    /// Check if an asset with the given handle is in the cache.
    pub fn contains(&self, handle: &AssetHandle) -> bool {
        self.assets.contains_key(&handle.id)
    }
}
