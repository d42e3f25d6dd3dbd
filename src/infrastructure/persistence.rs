use crate::domain::{Cart, ShopError, ShopResult};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Key-value blob storage, the terminal stand-in for browser local storage.
pub trait BlobStore {
    fn get(&self, key: &str) -> ShopResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> ShopResult<()>;
    fn remove(&mut self, key: &str) -> ShopResult<()>;
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Keys name a single file directly inside the store directory.
    fn path_for(&self, key: &str) -> ShopResult<PathBuf> {
        let invalid = key.is_empty()
            || key == "."
            || key == ".."
            || key.contains(['/', '\\']);
        if invalid {
            return Err(ShopError::InvalidStorageKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl BlobStore for FileBlobStore {
    fn get(&self, key: &str) -> ShopResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)?) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> ShopResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(path, value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> ShopResult<()> {
        match fs::remove_file(self.path_for(key)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory blob store.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    entries: HashMap<String, String>,
}

impl MemoryBlobStore {
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::default();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> ShopResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> ShopResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> ShopResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// The persisted cart: one JSON array under one well-known key.
///
/// Every mutation reads the whole cart, applies the change and rewrites the
/// whole blob.
pub struct CartStore {
    blobs: Box<dyn BlobStore>,
    key: String,
}

impl CartStore {
    pub fn new(blobs: Box<dyn BlobStore>, key: impl Into<String>) -> Self {
        Self {
            blobs,
            key: key.into(),
        }
    }

    pub fn blobs(&self) -> &dyn BlobStore {
        self.blobs.as_ref()
    }

    /// Current cart. Missing, unreadable or corrupt data yields an empty cart.
    pub fn load(&self) -> Cart {
        let raw = match self.blobs.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Cart::default(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "cart storage unreadable, starting empty");
                return Cart::default();
            }
        };

        match serde_json::from_str::<Cart>(&raw) {
            Ok(cart) => cart,
            Err(e) => {
                warn!(key = %self.key, error = %e, "discarding corrupt cart data");
                Cart::default()
            }
        }
    }

    fn save(&mut self, cart: &Cart) -> ShopResult<()> {
        let json = serde_json::to_string(cart)?;
        self.blobs.set(&self.key, &json)?;
        debug!(key = %self.key, lines = cart.items().len(), "cart saved");
        Ok(())
    }

    pub fn add(&mut self, id: &str, name: &str, price: f64) -> ShopResult<Cart> {
        let cart = self.load().with_added(id, name, price);
        self.save(&cart)?;
        Ok(cart)
    }

    pub fn remove(&mut self, id: &str) -> ShopResult<Cart> {
        let cart = self.load().without(id);
        self.save(&cart)?;
        Ok(cart)
    }

    pub fn set_quantity(&mut self, id: &str, qty: i64) -> ShopResult<Cart> {
        let current = self.load();
        if current.get(id).is_none() {
            return Ok(current);
        }
        let cart = current.with_quantity(id, qty);
        self.save(&cart)?;
        Ok(cart)
    }

    pub fn increment(&mut self, id: &str) -> ShopResult<Cart> {
        let qty = self.load().get(id).map(|item| i64::from(item.qty));
        match qty {
            Some(qty) => self.set_quantity(id, qty + 1),
            None => Ok(self.load()),
        }
    }

    pub fn decrement(&mut self, id: &str) -> ShopResult<Cart> {
        let qty = self.load().get(id).map(|item| i64::from(item.qty));
        match qty {
            Some(qty) => self.set_quantity(id, qty - 1),
            None => Ok(self.load()),
        }
    }

    pub fn clear(&mut self) -> ShopResult<()> {
        self.blobs.remove(&self.key)
    }
}
