use alloc::{boxed::Box, vec::Vec};

use crate::{any::TypeInfo, component::Instance, post_processor::PostProcessor};

pub use linkme::{self, distributed_slice};

/// Units registered at link time, usually by `#[derive(Component)]`
#[distributed_slice]
pub static __UNITS: [fn() -> Unit];

pub type Constructor = fn() -> anyhow::Result<Instance>;
pub type PostProcessorConstructor = fn() -> anyhow::Result<Box<dyn PostProcessor>>;

/// A type declared in a namespace, together with the markers the scanner reads.
///
/// A unit without a component marker is still a member of its namespace, but the scanner skips it.
#[derive(Clone)]
pub struct Unit {
    pub(crate) namespace: &'static str,
    pub(crate) type_info: TypeInfo,
    pub(crate) component: Option<&'static str>,
    pub(crate) scope: Option<&'static str>,
    pub(crate) autowired: Vec<FieldMarker>,
    pub(crate) constructor: Option<Constructor>,
    pub(crate) post_processor: Option<PostProcessorConstructor>,
}

/// A field marked as a dependency and the registered name it asks for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldMarker {
    pub field: &'static str,
    pub name: &'static str,
}

impl Unit {
    #[inline]
    #[must_use]
    pub fn new<T: ?Sized + 'static>(namespace: &'static str) -> Self {
        Self {
            namespace,
            type_info: TypeInfo::of::<T>(),
            component: None,
            scope: None,
            autowired: Vec::new(),
            constructor: None,
            post_processor: None,
        }
    }

    /// Component marker with the registered name
    #[inline]
    #[must_use]
    pub fn component(mut self, name: &'static str) -> Self {
        self.component = Some(name);
        self
    }

    /// Scope marker, `"singleton"` or `"prototype"`
    #[inline]
    #[must_use]
    pub fn scope(mut self, scope: &'static str) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Dependency marker on `field`, asking for the component registered as `name`
    #[inline]
    #[must_use]
    pub fn autowired(mut self, field: &'static str, name: &'static str) -> Self {
        self.autowired.push(FieldMarker { field, name });
        self
    }

    /// Zero-argument constructor
    #[inline]
    #[must_use]
    pub fn constructor(mut self, constructor: Constructor) -> Self {
        self.constructor = Some(constructor);
        self
    }

    /// Post-processor capability
    #[inline]
    #[must_use]
    pub fn post_processor(mut self, constructor: PostProcessorConstructor) -> Self {
        self.post_processor = Some(constructor);
        self
    }

    #[inline]
    #[must_use]
    pub fn namespace(&self) -> &'static str {
        self.namespace
    }

    #[inline]
    #[must_use]
    pub fn type_info(&self) -> TypeInfo {
        self.type_info
    }

    #[inline]
    #[must_use]
    pub fn component_name(&self) -> Option<&'static str> {
        self.component
    }
}
