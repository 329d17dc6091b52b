use crate::error::Result;

/// Synchronous string key-value store, the shape of browser local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

#[cfg(test)]
pub use memory::MemoryStore;
