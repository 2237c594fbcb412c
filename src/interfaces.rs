use alloc::{
    boxed::Box,
    collections::{btree_map, BTreeMap},
    sync::Arc,
};
use core::any::{type_name, Any, TypeId};

/// Capability interfaces published by a bean.
///
/// Every entry is an `Arc<I>` keyed by `TypeId::of::<I>()`, where `I` is usually a trait object
/// (`dyn UserInterface`) but can be a concrete type as well.
/// Note that `dyn Trait` and `dyn Trait + Send + Sync` are different keys.
#[derive(Default)]
pub struct Interfaces {
    entries: BTreeMap<TypeId, Exposed>,
}

pub(crate) struct Exposed {
    pub(crate) type_name: &'static str,
    pub(crate) value: Box<dyn Any + Send + Sync>,
}

impl Interfaces {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: BTreeMap::new() }
    }

    /// Publishes `interface` as `I`, replacing a previous entry for `I`
    #[inline]
    pub fn expose<I>(&mut self, interface: Arc<I>) -> &mut Self
    where
        I: ?Sized + Send + Sync + 'static,
    {
        self.entries.insert(
            TypeId::of::<I>(),
            Exposed {
                type_name: type_name::<I>(),
                value: Box::new(interface),
            },
        );
        self
    }

    #[must_use]
    pub fn get<I>(&self) -> Option<Arc<I>>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        self.entries
            .get(&TypeId::of::<I>())
            .and_then(|exposed| exposed.value.downcast_ref::<Arc<I>>())
            .cloned()
    }

    #[inline]
    #[must_use]
    pub fn contains<I>(&self) -> bool
    where
        I: ?Sized + 'static,
    {
        self.entries.contains_key(&TypeId::of::<I>())
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names of the exposed types, in no particular order
    pub fn type_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.values().map(|exposed| exposed.type_name)
    }

    #[inline]
    pub(crate) fn into_entries(self) -> btree_map::IntoIter<TypeId, Exposed> {
        self.entries.into_iter()
    }

    #[inline]
    pub(crate) fn insert_exposed(&mut self, type_id: TypeId, exposed: Exposed) {
        self.entries.insert(type_id, exposed);
    }
}
