//! In-memory slot storage. Clones share the same map.

use super::StorageResult;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    slots: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeded storage, as if left behind by an earlier session.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage.slots.borrow_mut().insert(key.to_string(), value.to_string());
        storage
    }

    pub fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    pub fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.slots.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    pub fn remove(&self, key: &str) -> StorageResult<()> {
        self.slots.borrow_mut().remove(key);
        Ok(())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.slots.borrow().contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_slots() {
        let a = MemoryStorage::new();
        let b = a.clone();
        a.set("k", "v").unwrap();
        assert_eq!(b.get("k").unwrap().as_deref(), Some("v"));
        b.remove("k").unwrap();
        assert!(!a.contains("k"));
    }
}
