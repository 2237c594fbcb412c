use alloc::{borrow::ToOwned as _, boxed::Box, sync::Arc, vec::Vec};
use core::any::type_name;
use tracing::{debug, error, info, info_span};

use crate::{
    bean::Bean,
    cache::Cache,
    catalog::Catalog,
    config::Config,
    errors::{ContainerErrorKind, ResolveErrorKind},
    lifecycle::create_bean,
    post_processor::PostProcessor,
    registry::{ComponentDescriptor, Registry},
    scanner::{scan, Scan},
    scope::Scope,
};

/// Holds the components of a scanned namespace.
///
/// Construction scans the namespace, applies the wiring table, rejects dependency cycles and
/// builds every singleton, so a container that was built successfully has all its singletons ready.
/// Cloning is cheap, clones share the same components.
#[derive(Clone)]
pub struct Container {
    inner: Arc<ContainerInner>,
}

struct ContainerInner {
    registry: Registry,
    post_processors: Vec<Box<dyn PostProcessor>>,
    cache: Cache,
}

impl Container {
    /// Creates a container for the namespace from the units registered at link time
    ///
    /// # Errors
    /// - Returns [`ContainerErrorKind::Scan`] if the namespace can't be scanned
    /// - Returns [`ContainerErrorKind::Wiring`] if the wiring table refers to unknown components or slots
    /// - Returns [`ContainerErrorKind::Cycle`] if components depend on each other in a cycle
    /// - Returns [`ContainerErrorKind::Resolve`] if a singleton can't be built
    #[inline]
    pub fn new(config: Config) -> Result<Self, ContainerErrorKind> {
        Self::with_catalog(&Catalog::linked(), config)
    }

    /// Creates a container for the namespace from the given catalog
    ///
    /// # Errors
    /// Same as [`Container::new`]
    pub fn with_catalog(catalog: &Catalog, config: Config) -> Result<Self, ContainerErrorKind> {
        let span = info_span!("container", namespace = config.namespace.as_str());
        let _guard = span.enter();

        let Scan {
            mut registry,
            post_processors,
        } = scan(catalog, &config.namespace)?;

        if let Err(err) = registry.apply_wiring(&config.wiring) {
            error!("{}", err);
            return Err(err.into());
        }
        if let Err(err) = registry.dfs_detect() {
            error!("{}", err);
            return Err(err.into());
        }

        let container = Self {
            inner: Arc::new(ContainerInner {
                registry,
                post_processors,
                cache: Cache::new(),
            }),
        };

        for descriptor in container.inner.registry.iter() {
            if descriptor.scope() != Scope::Singleton {
                continue;
            }
            // Built earlier as a dependency of another singleton
            if container.inner.cache.contains(descriptor.name()) {
                continue;
            }

            let bean = create_bean(&container, descriptor)?;
            container.inner.cache.insert(descriptor.name(), bean);
        }

        info!(
            components = container.inner.registry.len(),
            singletons = container.inner.cache.len(),
            post_processors = container.inner.post_processors.len(),
            "Container built"
        );

        Ok(container)
    }

    /// Gets the component registered as `name`.
    /// Singletons are the same instance on every call, prototypes are built anew.
    ///
    /// # Errors
    /// - Returns [`ResolveErrorKind::NoSuchComponent`] if no component is registered as `name`
    /// - Returns other [`ResolveErrorKind`] variants if the component can't be built
    pub fn get_bean(&self, name: &str) -> Result<Bean, ResolveErrorKind> {
        let span = info_span!("get_bean", name);
        let _guard = span.enter();

        let Some(descriptor) = self.inner.registry.get(name) else {
            let err = ResolveErrorKind::NoSuchComponent { name: name.to_owned() };
            error!("{}", err);
            return Err(err);
        };

        match descriptor.scope() {
            Scope::Singleton => {
                if let Some(bean) = self.inner.cache.get(name) {
                    debug!("Found in cache");
                    return Ok(bean);
                }
                debug!("Not found in cache");

                let bean = create_bean(self, descriptor)?;
                let bean = self.inner.cache.insert(name, bean);
                debug!("Cached");
                Ok(bean)
            }
            Scope::Prototype => create_bean(self, descriptor),
        }
    }

    /// Gets the capability interface `I` exposed by the component registered as `name`
    ///
    /// # Errors
    /// - Returns [`ResolveErrorKind::IncorrectType`] if the component doesn't expose `I`
    /// - Returns errors of [`Container::get_bean`]
    pub fn get<I>(&self, name: &str) -> Result<Arc<I>, ResolveErrorKind>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        let bean = self.get_bean(name)?;

        bean.interface::<I>().ok_or_else(|| {
            let err = ResolveErrorKind::IncorrectType {
                name: name.to_owned(),
                expected: type_name::<I>(),
                actual: bean.type_info().name,
            };
            error!("{}", err);
            err
        })
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.inner.registry.contains(name)
    }

    /// Registered names in ascending order
    #[inline]
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.inner.registry.names()
    }

    #[inline]
    #[must_use]
    pub fn descriptor(&self, name: &str) -> Option<&ComponentDescriptor> {
        self.inner.registry.get(name)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.registry.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.registry.is_empty()
    }

    #[inline]
    pub(crate) fn post_processors(&self) -> &[Box<dyn PostProcessor>] {
        &self.inner.post_processors
    }
}
