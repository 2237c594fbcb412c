//! Interception of a single component through hand-written decorators.
//!
//! [`Interceptor`] is a post-processor bound to one registered name. After that component is
//! initialized, it's replaced with a proxy exposing the same capability interfaces, each wrapped
//! by the decorator registered for it. A decorator calls [`Trace::enter`] first and then forwards
//! the call unchanged:
//!
//! ```rust
//! use slumber::{Interceptor, Trace};
//! use std::sync::Arc;
//!
//! trait UserInterface: Send + Sync {
//!     fn test(&self) -> u8;
//! }
//!
//! struct TracedUserInterface {
//!     inner: Arc<dyn UserInterface>,
//!     trace: Trace,
//! }
//!
//! impl UserInterface for TracedUserInterface {
//!     fn test(&self) -> u8 {
//!         self.trace.enter("test");
//!         self.inner.test()
//!     }
//! }
//!
//! let interceptor = Interceptor::new("userService").decorate::<dyn UserInterface, _>(|inner, trace| {
//!     Arc::new(TracedUserInterface { inner, trace }) as Arc<dyn UserInterface>
//! });
//! assert_eq!(interceptor.target(), "userService");
//! ```

use alloc::{
    borrow::ToOwned as _,
    boxed::Box,
    collections::BTreeMap,
    string::String,
    sync::Arc,
    vec::Vec,
};
use anyhow::anyhow;
use core::any::{Any, TypeId};
use tracing::{debug, info};

use crate::{
    any::AsAny as _,
    component::{Component, Instance},
    interfaces::{Exposed, Interfaces},
    post_processor::PostProcessor,
};

type Decorate = Arc<dyn Fn(&(dyn Any + Send + Sync), Trace) -> Option<Box<dyn Any + Send + Sync>> + Send + Sync>;

/// Emits the trace event of an intercepted call
#[derive(Clone, Debug)]
pub struct Trace {
    bean: Arc<str>,
}

impl Trace {
    #[inline]
    #[must_use]
    pub(crate) fn new(bean: &str) -> Self {
        Self { bean: Arc::from(bean) }
    }

    #[inline]
    #[must_use]
    pub fn bean_name(&self) -> &str {
        &self.bean
    }

    /// Must be called before forwarding `method` to the delegate
    #[inline]
    pub fn enter(&self, method: &'static str) {
        info!(bean = &*self.bean, method, "Proxy logic");
    }
}

/// Built-in post-processor wrapping the component registered as `target`
#[derive(Clone)]
pub struct Interceptor {
    target: String,
    decorators: Arc<BTreeMap<TypeId, Decorate>>,
}

impl Interceptor {
    #[inline]
    #[must_use]
    pub fn new(target: &str) -> Self {
        Self {
            target: target.to_owned(),
            decorators: Arc::new(BTreeMap::new()),
        }
    }

    /// Registers the decorator for interface `I`
    #[must_use]
    pub fn decorate<I, F>(mut self, decorator: F) -> Self
    where
        I: ?Sized + Send + Sync + 'static,
        F: Fn(Arc<I>, Trace) -> Arc<I> + Send + Sync + 'static,
    {
        let decorate: Decorate = Arc::new(move |value: &(dyn Any + Send + Sync), trace: Trace| {
            value
                .downcast_ref::<Arc<I>>()
                .map(|inner| Box::new(decorator(Arc::clone(inner), trace)) as Box<dyn Any + Send + Sync>)
        });
        Arc::make_mut(&mut self.decorators).insert(TypeId::of::<I>(), decorate);
        self
    }

    #[inline]
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Wraps the instance without checking the name
    ///
    /// # Errors
    /// Returns an error if the instance exposes an interface with no registered decorator
    pub fn intercept(&self, instance: Instance, name: &str) -> anyhow::Result<Instance> {
        let target: Arc<dyn Component> = Arc::from(instance);
        let target_type = (*target).type_info();

        let mut exposed = Interfaces::new();
        Arc::clone(&target).expose(&mut exposed);

        let undecorated = exposed
            .into_entries()
            .filter(|(type_id, _)| *type_id != target_type.id && !self.decorators.contains_key(type_id))
            .map(|(_, exposed)| exposed.type_name)
            .collect::<Vec<_>>();
        if !undecorated.is_empty() {
            return Err(anyhow!("No decorator for {} exposed by `{}`", undecorated.join(", "), name));
        }

        Ok(Box::new(Proxy {
            target,
            trace: Trace::new(name),
            decorators: Arc::clone(&self.decorators),
        }))
    }
}

impl PostProcessor for Interceptor {
    fn after_initialization(&self, instance: Instance, name: &str) -> anyhow::Result<Instance> {
        if name != self.target {
            return Ok(instance);
        }

        let proxy = self.intercept(instance, name)?;
        debug!(name, decorators = self.decorators.len(), "Intercepted");
        Ok(proxy)
    }
}

/// Stand-in for an intercepted component.
///
/// Exposes the target's interfaces through the decorators, except the target's own concrete type:
/// the proxy is a different object, so downcasting the bean to the target type fails.
/// Every other interface has a decorator, [`Interceptor::intercept`] checks it.
pub(crate) struct Proxy {
    target: Arc<dyn Component>,
    trace: Trace,
    decorators: Arc<BTreeMap<TypeId, Decorate>>,
}

impl Component for Proxy {
    fn expose(self: Arc<Self>, interfaces: &mut Interfaces) {
        let target_type = (*self.target).type_info();

        let mut target_interfaces = Interfaces::new();
        Arc::clone(&self.target).expose(&mut target_interfaces);

        for (type_id, exposed) in target_interfaces.into_entries() {
            if type_id == target_type.id {
                continue;
            }

            let decorated = self
                .decorators
                .get(&type_id)
                .and_then(|decorate| decorate(&*exposed.value, self.trace.clone()));
            if let Some(value) = decorated {
                interfaces.insert_exposed(
                    type_id,
                    Exposed {
                        type_name: exposed.type_name,
                        value,
                    },
                );
            }
        }
    }
}
