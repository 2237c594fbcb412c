use alloc::{
    collections::BTreeSet,
    string::{String, ToString as _},
    vec::Vec,
};
use tracing::debug;

use crate::unit::{Unit, __UNITS};

/// Every unit the scanner can see, grouped by namespace.
///
/// Namespaces are module paths (`app::service`). A namespace resolves if it was declared,
/// or if a unit lives in it or in one of its sub-namespaces.
#[derive(Clone, Default)]
pub struct Catalog {
    units: Vec<Unit>,
    namespaces: BTreeSet<String>,
}

impl Catalog {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            units: Vec::new(),
            namespaces: BTreeSet::new(),
        }
    }

    /// Collects the units registered at link time
    #[must_use]
    pub fn linked() -> Self {
        let catalog = __UNITS.iter().fold(Self::new(), |catalog, getter| catalog.with_unit(getter()));
        debug!(units = catalog.units.len(), "Linked catalog collected");
        catalog
    }

    #[inline]
    #[must_use]
    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.units.push(unit);
        self
    }

    /// Makes the namespace resolvable even if no unit lives in it
    #[inline]
    #[must_use]
    pub fn declare_namespace(mut self, namespace: &str) -> Self {
        self.namespaces.insert(namespace.to_string());
        self
    }

    /// Units declared directly in the namespace, in catalog order.
    /// Sub-namespaces aren't walked.
    ///
    /// Returns `None` if the namespace doesn't resolve.
    #[must_use]
    pub fn resolve(&self, namespace: &str) -> Option<Vec<&Unit>> {
        let declared = self.namespaces.contains(namespace);
        let mut found = declared;
        let mut units = Vec::new();

        for unit in &self.units {
            if unit.namespace == namespace {
                found = true;
                units.push(unit);
            } else if is_nested(unit.namespace, namespace) {
                found = true;
            }
        }

        found.then_some(units)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

fn is_nested(namespace: &str, parent: &str) -> bool {
    namespace
        .strip_prefix(parent)
        .is_some_and(|rest| rest.starts_with("::"))
}
