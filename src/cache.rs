use alloc::{borrow::ToOwned as _, collections::BTreeMap, string::String};
use parking_lot::RwLock;

use crate::bean::Bean;

/// Singleton instances by registered name.
///
/// Reads take a shared lock only, so lookups after startup don't contend.
#[derive(Default)]
pub(crate) struct Cache {
    map: RwLock<BTreeMap<String, Bean>>,
}

impl Cache {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            map: RwLock::new(BTreeMap::new()),
        }
    }

    #[must_use]
    pub(crate) fn get(&self, name: &str) -> Option<Bean> {
        self.map.read().get(name).cloned()
    }

    /// Stores the bean unless the name is already cached.
    /// Returns the cached bean, which is `bean` only if the entry was vacant.
    pub(crate) fn insert(&self, name: &str, bean: Bean) -> Bean {
        self.map.write().entry(name.to_owned()).or_insert(bean).clone()
    }

    #[inline]
    #[must_use]
    pub(crate) fn contains(&self, name: &str) -> bool {
        self.map.read().contains_key(name)
    }

    #[inline]
    #[must_use]
    pub(crate) fn len(&self) -> usize {
        self.map.read().len()
    }
}
