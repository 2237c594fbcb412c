use alloc::{borrow::ToOwned as _, boxed::Box, vec::Vec};
use tracing::{debug, error, info_span};

use crate::{
    catalog::Catalog,
    errors::{InstantiateErrorKind, ScanErrorKind},
    post_processor::PostProcessor,
    registry::{ComponentDescriptor, DependencySlot, Registry},
    scope::Scope,
    unit::Unit,
};

/// Result of a namespace scan
pub(crate) struct Scan {
    pub(crate) registry: Registry,
    pub(crate) post_processors: Vec<Box<dyn PostProcessor>>,
}

/// Walks the units declared directly in `namespace`, registering components and
/// constructing post-processors in discovery order.
pub(crate) fn scan(catalog: &Catalog, namespace: &str) -> Result<Scan, ScanErrorKind> {
    let span = info_span!("scan", namespace);
    let _guard = span.enter();

    let Some(units) = catalog.resolve(namespace) else {
        let err = ScanErrorKind::NamespaceNotFound {
            namespace: namespace.to_owned(),
        };
        error!("{}", err);
        return Err(err);
    };
    debug!(units = units.len(), "Namespace resolved");

    let mut registry = Registry::new();
    let mut post_processors = Vec::new();
    let mut claimed = Vec::with_capacity(units.len());

    for unit in units {
        let Some(name) = unit.component else {
            debug!(unit = unit.type_info.name, "No component marker, skipped");
            continue;
        };

        if claimed.contains(&name) {
            let err = ScanErrorKind::DuplicateName { name };
            error!("{}", err);
            return Err(err);
        }
        claimed.push(name);

        if let Some(constructor) = unit.post_processor {
            let post_processor = constructor().map_err(|err| {
                let err = ScanErrorKind::Instantiate {
                    name,
                    kind: InstantiateErrorKind::Constructor {
                        type_name: unit.type_info.name,
                        err,
                    },
                };
                error!("{}", err);
                err
            })?;
            post_processors.push(post_processor);
            debug!(name, "Post-processor registered");
            continue;
        }

        let descriptor = describe(unit, name)?;
        debug!(name, scope = descriptor.scope.name(), "Component registered");
        registry.insert(descriptor);
    }

    Ok(Scan {
        registry,
        post_processors,
    })
}

fn describe(unit: &Unit, name: &'static str) -> Result<ComponentDescriptor, ScanErrorKind> {
    let scope = match unit.scope {
        Some(scope) => Scope::from_name(scope).ok_or_else(|| {
            let err = ScanErrorKind::UnknownScope { name, scope };
            error!("{}", err);
            err
        })?,
        None => Scope::default(),
    };

    Ok(ComponentDescriptor {
        name: name.to_owned(),
        type_info: unit.type_info,
        scope,
        constructor: unit.constructor,
        dependencies: unit
            .autowired
            .iter()
            .map(|marker| DependencySlot {
                field: marker.field,
                target: marker.name.to_owned(),
            })
            .collect(),
    })
}
