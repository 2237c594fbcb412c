use alloc::{borrow::ToOwned as _, boxed::Box, sync::Arc};

use crate::{any::AsAny, bean::Bean, errors::InjectErrorKind, interfaces::Interfaces};

/// Working value of the lifecycle, owned by the call that builds it
pub type Instance = Box<dyn Component>;

/// A type managed by the container.
///
/// Usually implemented with `#[derive(Component)]`, which also registers the type in the
/// link-time catalog. Every method has a default, so a hand-written impl only overrides
/// the capabilities the type actually has.
pub trait Component: AsAny {
    /// Assigns the bean resolved for the dependency slot `field`
    ///
    /// # Errors
    /// - Returns [`InjectErrorKind::UnknownField`] if the type has no such slot
    /// - Returns [`InjectErrorKind::IncorrectType`] if the bean doesn't fit the field
    fn inject(&mut self, field: &str, bean: Bean) -> Result<(), InjectErrorKind> {
        let _ = bean;
        Err(InjectErrorKind::UnknownField { field: field.to_owned() })
    }

    fn as_name_aware(&mut self) -> Option<&mut dyn NameAware> {
        None
    }

    fn as_initializable(&mut self) -> Option<&mut dyn Initializable> {
        None
    }

    /// Publishes the capability interfaces callers can look the bean up by
    fn expose(self: Arc<Self>, interfaces: &mut Interfaces) {
        let _ = interfaces;
    }
}

impl dyn Component {
    #[inline]
    #[must_use]
    pub fn is<T: Component>(&self) -> bool {
        self.as_any().is::<T>()
    }

    #[inline]
    #[must_use]
    pub fn downcast_ref<T: Component>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    #[inline]
    #[must_use]
    pub fn downcast_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut()
    }
}

/// Receives the name the component is registered with
pub trait NameAware {
    fn set_bean_name(&mut self, name: &str);
}

/// Called once dependencies are injected and before-initialization hooks ran
pub trait Initializable {
    /// # Errors
    /// Any error aborts creation of the component
    fn after_properties_set(&mut self) -> anyhow::Result<()>;
}
