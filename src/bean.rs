use alloc::{string::String, sync::Arc};
use core::fmt::{self, Debug, Formatter};

use crate::{
    any::{AsAny, TypeInfo},
    component::{Component, Instance},
    interfaces::Interfaces,
};

/// A fully built component as handed out by the container.
///
/// Cloning is cheap and keeps the identity: clones of a singleton are [`Bean::ptr_eq`].
#[derive(Clone)]
pub struct Bean {
    inner: Arc<BeanInner>,
}

struct BeanInner {
    name: String,
    instance: Arc<dyn Component>,
    interfaces: Interfaces,
}

impl Bean {
    /// Seals the instance, collecting the interfaces it exposes
    #[must_use]
    pub fn new(name: impl Into<String>, instance: Instance) -> Self {
        let instance: Arc<dyn Component> = Arc::from(instance);
        let mut interfaces = Interfaces::new();
        Arc::clone(&instance).expose(&mut interfaces);

        Self {
            inner: Arc::new(BeanInner {
                name: name.into(),
                instance,
                interfaces,
            }),
        }
    }

    /// Name the bean is registered with
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Type of the final instance, which is a proxy type for intercepted beans
    #[inline]
    #[must_use]
    pub fn type_info(&self) -> TypeInfo {
        (*self.inner.instance).type_info()
    }

    #[inline]
    #[must_use]
    pub fn interfaces(&self) -> &Interfaces {
        &self.inner.interfaces
    }

    /// Looks up an exposed capability interface
    #[inline]
    #[must_use]
    pub fn interface<I>(&self) -> Option<Arc<I>>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        self.inner.interfaces.get()
    }

    #[inline]
    #[must_use]
    pub fn is<T: Component>(&self) -> bool {
        self.inner.instance.is::<T>()
    }

    #[inline]
    #[must_use]
    pub fn downcast_ref<T: Component>(&self) -> Option<&T> {
        self.inner.instance.downcast_ref()
    }

    #[must_use]
    pub fn downcast<T: Component>(&self) -> Option<Arc<T>> {
        <dyn Component as AsAny>::into_any_arc(Arc::clone(&self.inner.instance))
            .downcast()
            .ok()
    }

    /// Whether both handles point to the same instance
    #[inline]
    #[must_use]
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.inner, &other.inner)
    }
}

impl Debug for Bean {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bean")
            .field("name", &self.inner.name)
            .field("type", &self.type_info())
            .field("at", &Arc::as_ptr(&self.inner))
            .finish()
    }
}
