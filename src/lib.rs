#![no_std]

extern crate alloc;
extern crate self as slumber;

pub(crate) mod any;
pub(crate) mod bean;
pub(crate) mod cache;
pub(crate) mod catalog;
pub(crate) mod component;
pub(crate) mod config;
pub(crate) mod container;
pub(crate) mod errors;
pub(crate) mod intercept;
pub(crate) mod interfaces;
pub(crate) mod lifecycle;
pub(crate) mod post_processor;
pub(crate) mod registry;
pub(crate) mod scanner;
pub(crate) mod scope;

pub mod macros_utils;
pub mod unit;

pub use any::{AsAny, TypeInfo};
pub use bean::Bean;
pub use catalog::Catalog;
pub use component::{Component, Initializable, Instance, NameAware};
pub use config::{Config, Wiring};
pub use container::Container;
pub use errors::{
    ContainerErrorKind, DFSErrorKind, InjectErrorKind, InstantiateErrorKind, ResolveErrorKind, ScanErrorKind, WiringErrorKind,
};
pub use intercept::{Interceptor, Trace};
pub use interfaces::Interfaces;
pub use post_processor::{PostProcessor, Stage};
pub use registry::{ComponentDescriptor, DependencySlot, Registry};
pub use scope::Scope;
pub use unit::{FieldMarker, Unit};

#[cfg(feature = "macros")]
pub use slumber_macros::Component;
