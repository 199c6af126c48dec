use std::collections::HashMap;
use std::sync::Arc;

use scdcore::data::collection::PeakCollection;

/// Named storage for peak collections.
///
/// The run driver resolves its inputs and publishes its output through this
/// interface, so anything map-like can stand behind it.
pub trait WorkspaceStore {
    /// Returns the collection registered under `name`.
    fn get(&self, name: &str) -> Option<Arc<PeakCollection>>;
    /// Registers `collection` under `name`, replacing any previous entry.
    fn insert(&mut self, name: &str, collection: PeakCollection);
    /// Removes and returns the entry under `name`.
    fn remove(&mut self, name: &str) -> Option<Arc<PeakCollection>>;
    fn contains(&self, name: &str) -> bool;
    /// Returns all registered names in sorted order.
    fn names(&self) -> Vec<String>;
}

/// Workspace store backed by an in-process hash map.
#[derive(Clone, Debug, Default)]
pub struct InMemoryStore {
    entries: HashMap<String, Arc<PeakCollection>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        InMemoryStore {
            entries: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl WorkspaceStore for InMemoryStore {
    fn get(&self, name: &str) -> Option<Arc<PeakCollection>> {
        self.entries.get(name).map(Arc::clone)
    }

    fn insert(&mut self, name: &str, collection: PeakCollection) {
        self.entries.insert(name.to_string(), Arc::new(collection));
    }

    fn remove(&mut self, name: &str) -> Option<Arc<PeakCollection>> {
        self.entries.remove(name)
    }

    fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scdcore::data::collection::Instrument;

    fn empty_collection(instrument_name: &str) -> PeakCollection {
        PeakCollection::new(Arc::new(Instrument::new(instrument_name)), vec![])
    }

    #[test]
    fn test_insert_then_get_shares_one_entry() {
        let mut store = InMemoryStore::new();
        store.insert("run_4000", empty_collection("TOPAZ"));

        let first = store.get("run_4000").unwrap();
        let second = store.get("run_4000").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(store.contains("run_4000"));
        assert!(store.get("run_4001").is_none());
    }

    #[test]
    fn test_insert_replaces_existing_entry() {
        let mut store = InMemoryStore::new();
        store.insert("peaks", empty_collection("TOPAZ"));
        store.insert("peaks", empty_collection("MANDI"));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("peaks").unwrap().instrument.name, "MANDI");
    }

    #[test]
    fn test_remove_empties_the_store() {
        let mut store = InMemoryStore::new();
        store.insert("peaks", empty_collection("TOPAZ"));

        let removed = store.remove("peaks");

        assert!(removed.is_some());
        assert!(store.is_empty());
        assert!(store.remove("peaks").is_none());
    }

    #[test]
    fn test_names_are_sorted() {
        let mut store = InMemoryStore::new();
        store.insert("zeta", empty_collection("TOPAZ"));
        store.insert("alpha", empty_collection("TOPAZ"));
        store.insert("mid", empty_collection("TOPAZ"));

        assert_eq!(store.names(), vec!["alpha", "mid", "zeta"]);
    }
}
