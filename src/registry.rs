use alloc::{
    borrow::ToOwned as _,
    collections::{btree_map, BTreeMap, BTreeSet},
    string::String,
    vec::Vec,
};
use core::fmt::{self, Debug, Formatter};

use crate::{
    any::TypeInfo,
    config::Wiring,
    errors::{DFSErrorKind, WiringErrorKind},
    scope::Scope,
    unit::Constructor,
};

/// The container's record of a component
#[derive(Clone)]
pub struct ComponentDescriptor {
    pub(crate) name: String,
    pub(crate) type_info: TypeInfo,
    pub(crate) scope: Scope,
    pub(crate) constructor: Option<Constructor>,
    pub(crate) dependencies: Vec<DependencySlot>,
}

/// A field to inject and the registered name it's wired to
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DependencySlot {
    pub field: &'static str,
    pub target: String,
}

impl ComponentDescriptor {
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn type_info(&self) -> TypeInfo {
        self.type_info
    }

    #[inline]
    #[must_use]
    pub fn scope(&self) -> Scope {
        self.scope
    }

    #[inline]
    #[must_use]
    pub fn dependencies(&self) -> &[DependencySlot] {
        &self.dependencies
    }

    #[inline]
    #[must_use]
    pub(crate) fn constructor(&self) -> Option<Constructor> {
        self.constructor
    }
}

impl Debug for ComponentDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDescriptor")
            .field("name", &self.name)
            .field("type_info", &self.type_info)
            .field("scope", &self.scope)
            .field("has_constructor", &self.constructor.is_some())
            .field("dependencies", &self.dependencies)
            .finish()
    }
}

/// Descriptor store: registered name -> descriptor.
/// Filled once by the scanner, read-only afterwards.
#[derive(Clone, Default)]
pub struct Registry {
    entries: BTreeMap<String, ComponentDescriptor>,
}

impl Registry {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: BTreeMap::new() }
    }

    #[inline]
    pub(crate) fn insert(&mut self, descriptor: ComponentDescriptor) -> Option<ComponentDescriptor> {
        self.entries.insert(descriptor.name.clone(), descriptor)
    }

    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ComponentDescriptor> {
        self.entries.get(name)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    #[inline]
    pub fn iter(&self) -> btree_map::Values<'_, String, ComponentDescriptor> {
        self.entries.values()
    }

    #[inline]
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
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
}

impl Registry {
    /// Re-points dependency slots according to the wiring table
    pub(crate) fn apply_wiring(&mut self, wiring: &Wiring) -> Result<(), WiringErrorKind> {
        for (component, field, target) in wiring.iter() {
            let Some(descriptor) = self.entries.get_mut(component) else {
                return Err(WiringErrorKind::UnknownComponent {
                    name: component.to_owned(),
                });
            };
            let Some(slot) = descriptor.dependencies.iter_mut().find(|slot| slot.field == field) else {
                return Err(WiringErrorKind::UnknownSlot {
                    name: component.to_owned(),
                    field: field.to_owned(),
                });
            };
            target.clone_into(&mut slot.target);
        }
        Ok(())
    }

    pub(crate) fn dfs_detect(&self) -> Result<(), DFSErrorKind> {
        let mut visited = BTreeSet::new();
        let mut stack = Vec::new();

        for (name, ComponentDescriptor { dependencies, .. }) in &self.entries {
            if let Some(repeated) = self.dfs_visit(name, dependencies, &mut visited, &mut stack) {
                stack.push(repeated.to_owned());
                let first = stack.remove(0);
                return Err(DFSErrorKind::CyclicDependency {
                    graph: (first, stack.into_boxed_slice()),
                });
            }
        }
        Ok(())
    }

    /// Returns the name closing the cycle, leaving the path to it in `stack`
    fn dfs_visit<'a>(
        &'a self,
        name: &'a str,
        dependencies: &'a [DependencySlot],
        visited: &mut BTreeSet<&'a str>,
        stack: &mut Vec<String>,
    ) -> Option<&'a str> {
        if visited.contains(name) {
            return None;
        }
        if let Some(position) = stack.iter().position(|on_stack| on_stack == name) {
            stack.drain(..position);
            return Some(name);
        }
        stack.push(name.to_owned());

        for DependencySlot { target, .. } in dependencies {
            if let Some((target, ComponentDescriptor { dependencies, .. })) = self.entries.get_key_value(target.as_str()) {
                if let Some(repeated) = self.dfs_visit(target, dependencies, visited, stack) {
                    return Some(repeated);
                }
            }
        }

        stack.pop();
        visited.insert(name);
        None
    }
}
